// src/data_input/column_names.rs

/// Logical channels of a YUCO export, independent of how a given firmware
/// version spelled the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    TimeSinceStartup,
    MonotonicTime,
    Depth,
    VehicleDepth,
    Altitude,
    Pressure,
    Temperature,
    Conductivity,
    Salinity,
    OxygenConcentration,
    OdoPhase,
    OdoTemperature,
    Turbidity,
    AuvStatus,
    GpsAccepted,
}

pub const CHANNEL_COUNT: usize = 15;

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::TimeSinceStartup,
        Channel::MonotonicTime,
        Channel::Depth,
        Channel::VehicleDepth,
        Channel::Altitude,
        Channel::Pressure,
        Channel::Temperature,
        Channel::Conductivity,
        Channel::Salinity,
        Channel::OxygenConcentration,
        Channel::OdoPhase,
        Channel::OdoTemperature,
        Channel::Turbidity,
        Channel::AuvStatus,
        Channel::GpsAccepted,
    ];

    /// Accepted header spellings, highest priority first.
    ///
    /// Older exports wrote the degree sign in Latin-1, which decodes to
    /// U+FFFD, hence the `\u{FFFD}` variants.
    pub fn header_variants(self) -> &'static [&'static str] {
        match self {
            Channel::TimeSinceStartup => &["Time since startup (s)"],
            Channel::MonotonicTime => &["Legato3 Monotonic time (s)"],
            Channel::Depth => &["Legato3 Depth (m)"],
            Channel::VehicleDepth => &["Depth (m)"],
            Channel::Altitude => &["Altitude (m)"],
            Channel::Pressure => &["Legato3 Pressure (bar)"],
            Channel::Temperature => &[
                "Legato3 Temperature (\u{FFFD}C)",
                "Legato3 Temperature (C°)",
                "Legato3 Temperature (°C)",
            ],
            Channel::Conductivity => &["Legato3 Conductivity (mS/cm)"],
            Channel::Salinity => &["Legato3 Salinity (PSU)"],
            Channel::OxygenConcentration => &["Legato3 Oxygen Concentration (umol/L)"],
            Channel::OdoPhase => &["Legato3 ODO Phase (\u{FFFD})", "Legato3 ODO Phase (°)"],
            Channel::OdoTemperature => &[
                "Legato3 ODO Temperature (C°)",
                "Legato3 ODO Temperature (°C)",
                "Legato3 ODO Temperature (\u{FFFD}C)",
            ],
            Channel::Turbidity => &[
                "Legato3 Turbidity High (FTU)",
                "Legato3 Turbidity (?)",
                "Legato3 Turbidity (NTU)",
            ],
            Channel::AuvStatus => &["AUV Status"],
            Channel::GpsAccepted => &["GPS Coordinates Accepted (Y/N)"],
        }
    }

    /// Short name used in log messages and errors.
    pub fn name(self) -> &'static str {
        match self {
            Channel::TimeSinceStartup => "time since startup",
            Channel::MonotonicTime => "Legato3 monotonic time",
            Channel::Depth => "Legato3 depth",
            Channel::VehicleDepth => "vehicle depth",
            Channel::Altitude => "altitude",
            Channel::Pressure => "Legato3 pressure",
            Channel::Temperature => "Legato3 temperature",
            Channel::Conductivity => "Legato3 conductivity",
            Channel::Salinity => "Legato3 salinity",
            Channel::OxygenConcentration => "Legato3 oxygen concentration",
            Channel::OdoPhase => "Legato3 ODO phase",
            Channel::OdoTemperature => "Legato3 ODO temperature",
            Channel::Turbidity => "Legato3 turbidity",
            Channel::AuvStatus => "AUV status",
            Channel::GpsAccepted => "GPS coordinates accepted",
        }
    }

    /// Channels without which no figure can be drawn.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Channel::TimeSinceStartup
                | Channel::Depth
                | Channel::Pressure
                | Channel::Temperature
                | Channel::Conductivity
                | Channel::Salinity
                | Channel::AuvStatus
        )
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Column index of every channel found in a header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    found: [Option<(usize, &'static str)>; CHANNEL_COUNT],
}

impl ColumnMap {
    /// Resolves every channel against the given header cells.
    pub fn from_headers<'h, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let mut map = ColumnMap::default();
        for channel in Channel::ALL {
            map.found[channel.slot()] = channel.header_variants().iter().find_map(|&variant| {
                headers
                    .iter()
                    .position(|&h| h == variant)
                    .map(|index| (index, variant))
            });
        }
        map
    }

    pub fn index(&self, channel: Channel) -> Option<usize> {
        self.found[channel.slot()].map(|(index, _)| index)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.found[channel.slot()].is_some()
    }

    /// The header spelling that matched, if any.
    pub fn matched_variant(&self, channel: Channel) -> Option<&'static str> {
        self.found[channel.slot()].map(|(_, variant)| variant)
    }

    /// True when the match is not the channel's preferred spelling.
    pub fn used_fallback(&self, channel: Channel) -> bool {
        self.matched_variant(channel)
            .is_some_and(|variant| variant != channel.header_variants()[0])
    }

    pub fn missing_required(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|&channel| channel.is_required() && !self.contains(channel))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_slots_follow_all_order() {
        for (slot, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.slot(), slot);
        }
    }

    #[test]
    fn test_every_channel_has_a_variant() {
        for channel in Channel::ALL {
            assert!(!channel.header_variants().is_empty(), "{:?}", channel);
        }
    }

    #[test]
    fn test_variant_priority_beats_column_order() {
        let headers = ["Legato3 Temperature (C°)", "Legato3 Temperature (\u{FFFD}C)"];
        let map = ColumnMap::from_headers(headers);
        assert_eq!(map.index(Channel::Temperature), Some(1));
        assert!(!map.used_fallback(Channel::Temperature));
    }

    #[test]
    fn test_turbidity_falls_back_to_ntu() {
        let map = ColumnMap::from_headers(["AUV Status", " Legato3 Turbidity (NTU) "]);
        assert_eq!(map.index(Channel::Turbidity), Some(1));
        assert_eq!(map.matched_variant(Channel::Turbidity), Some("Legato3 Turbidity (NTU)"));
        assert!(map.used_fallback(Channel::Turbidity));
    }

    #[test]
    fn test_missing_required_lists_only_required_channels() {
        let map = ColumnMap::from_headers(["Time since startup (s)", "AUV Status"]);
        let missing = map.missing_required();
        assert!(missing.contains(&Channel::Temperature));
        assert!(missing.contains(&Channel::Depth));
        assert!(!missing.contains(&Channel::Turbidity));
        assert!(!missing.contains(&Channel::TimeSinceStartup));
    }
}
