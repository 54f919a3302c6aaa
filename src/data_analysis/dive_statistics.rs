// src/data_analysis/dive_statistics.rs

use std::fmt;

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;

use crate::data_analysis::oxygen_calibration::OxygenSeries;
use crate::data_input::dive_data::DiveData;

/// Smallest and largest non-NaN value of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

/// `None` for an empty or all-NaN series.
pub fn value_extent(values: ArrayView1<f64>) -> Option<Extent> {
    if values.iter().all(|v| v.is_nan()) {
        return None;
    }
    Some(Extent {
        min: *values.min_skipnan(),
        max: *values.max_skipnan(),
    })
}

/// Min/max summary printed with `--stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveStatistics {
    pub entries: Vec<(&'static str, Option<Extent>)>,
}

impl DiveStatistics {
    pub fn compute(dive: &DiveData, oxygen: Option<&OxygenSeries>) -> Self {
        let mut entries = vec![
            ("temperature", value_extent(dive.temperature_c.view())),
            ("salinity", value_extent(dive.salinity_psu.view())),
        ];
        if let Some(series) = oxygen {
            entries.push((
                "compensated oxygen",
                value_extent(series.compensated_concentration_umol_l.view()),
            ));
            entries.push(("oxygen saturation", value_extent(series.saturation_percent.view())));
        }
        DiveStatistics { entries }
    }

    pub fn get(&self, name: &str) -> Option<Extent> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .and_then(|(_, extent)| *extent)
    }
}

impl fmt::Display for DiveStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, extent) in &self.entries {
            match extent {
                Some(e) => {
                    writeln!(f, "{name} min : {}", e.min)?;
                    writeln!(f, "{name} max : {}", e.max)?;
                }
                None => writeln!(f, "{name} min/max : no data")?,
            }
        }
        Ok(())
    }
}
