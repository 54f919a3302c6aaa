// src/data_input/log_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::path::Path;

use crate::data_input::column_names::{Channel, ColumnMap};
use crate::data_input::log_data::YucoRowData;
use crate::error::LogParseError;

const UTF8_BOM: &str = "\u{FEFF}";

/// A parsed export: every data row plus the header resolution.
#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub rows: Vec<YucoRowData>,
    pub columns: ColumnMap,
}

/// Reads a file as text. Invalid UTF-8 (Latin-1 degree signs in older
/// exports) is replaced by U+FFFD instead of failing.
pub fn read_log_text(input_file_path: &Path) -> Result<String, LogParseError> {
    let bytes = fs::read(input_file_path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::warn!(
                "'{}' is not valid UTF-8 (first bad byte at {}), decoding lossily",
                input_file_path.display(),
                err.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Parses the CSV export at `input_file_path`.
pub fn parse_log_file(input_file_path: &Path) -> Result<ParsedLog, LogParseError> {
    let text = read_log_text(input_file_path)?;
    parse_log_text(&text)
}

/// Parses an export already held in memory.
pub fn parse_log_text(text: &str) -> Result<ParsedLog, LogParseError> {
    if text.trim().is_empty() {
        return Err(LogParseError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header_record = reader.headers()?.clone();
    if header_record.iter().all(|h| h.trim().is_empty()) {
        return Err(LogParseError::EmptyFile);
    }

    let columns = ColumnMap::from_headers(header_record.iter());
    log::debug!("Header mapping status:");
    for channel in Channel::ALL {
        match columns.matched_variant(channel) {
            Some(variant) => log::debug!("  {}: Found as '{}'", channel.name(), variant),
            None => log::debug!(
                "  {}: Not Found{}",
                channel.name(),
                if channel.is_required() { " (required)" } else { "" }
            ),
        }
        if columns.used_fallback(channel) {
            log::info!(
                "  {}: using legacy header '{}'",
                channel.name(),
                columns.matched_variant(channel).unwrap_or_default()
            );
        }
    }

    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(LogParseError::MissingColumns(
            missing.iter().map(|channel| channel.name().to_string()).collect(),
        ));
    }

    let mut rows = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(parse_record(&record, &columns)),
            Err(e) => {
                log::warn!("Skipping row {} due to CSV read error: {}", row_index + 1, e);
            }
        }
    }
    log::info!("Finished reading {} data rows.", rows.len());

    Ok(ParsedLog { rows, columns })
}

fn parse_record(record: &StringRecord, columns: &ColumnMap) -> YucoRowData {
    let cell = |channel: Channel| {
        columns
            .index(channel)
            .and_then(|csv_idx| record.get(csv_idx))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };
    let number = |channel: Channel| -> Option<f64> {
        cell(channel).and_then(|value| value.parse::<f64>().ok())
    };
    let text = |channel: Channel| -> Option<String> { cell(channel).map(str::to_string) };

    YucoRowData {
        time_s: number(Channel::TimeSinceStartup),
        monotonic_time_s: number(Channel::MonotonicTime),
        depth_m: number(Channel::Depth),
        vehicle_depth_m: number(Channel::VehicleDepth),
        altitude_m: number(Channel::Altitude),
        pressure_bar: number(Channel::Pressure),
        temperature_c: number(Channel::Temperature),
        conductivity_ms_cm: number(Channel::Conductivity),
        salinity_psu: number(Channel::Salinity),
        oxygen_umol_l: number(Channel::OxygenConcentration),
        odo_phase_deg: number(Channel::OdoPhase),
        odo_temperature_c: number(Channel::OdoTemperature),
        turbidity: number(Channel::Turbidity),
        auv_status: text(Channel::AuvStatus),
        gps_accepted: text(Channel::GpsAccepted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Time since startup (s),AUV Status,GPS Coordinates Accepted (Y/N),Legato3 Depth (m),Legato3 Pressure (bar),Legato3 Temperature (C°),Legato3 Conductivity (mS/cm),Legato3 Salinity (PSU)";

    #[test]
    fn test_parses_values_and_blank_cells() {
        let text = format!("{HEADER}\n1.5,MISSION,N,3.2,10.45,14.1,52.3,38.1\n2.0,MISSION,N,,10.5,abc,52.4,38.0\n");
        let log = parse_log_text(&text).unwrap();
        assert_eq!(log.rows.len(), 2);
        assert_eq!(log.rows[0].time_s, Some(1.5));
        assert_eq!(log.rows[0].temperature_c, Some(14.1));
        assert_eq!(log.rows[0].auv_status.as_deref(), Some("MISSION"));
        assert_eq!(log.rows[1].depth_m, None);
        assert_eq!(log.rows[1].temperature_c, None);
        assert_eq!(log.rows[1].oxygen_umol_l, None);
    }

    #[test]
    fn test_missing_required_columns_are_all_reported() {
        let err = parse_log_text("Time since startup (s),AUV Status\n1,MISSION\n").unwrap_err();
        match err {
            LogParseError::MissingColumns(missing) => {
                assert!(missing.contains(&"Legato3 temperature".to_string()));
                assert!(missing.contains(&"Legato3 salinity".to_string()));
                assert_eq!(missing.len(), 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(matches!(parse_log_text("\n\n"), Err(LogParseError::EmptyFile)));
    }

    #[test]
    fn test_header_only_gives_no_rows() {
        let log = parse_log_text(HEADER).unwrap();
        assert!(log.rows.is_empty());
    }
}
