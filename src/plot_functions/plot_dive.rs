// src/plot_functions/plot_dive.rs

use std::error::Error;
use std::path::Path;

use ndarray::ArrayView1;

use crate::constants::*;
use crate::data_analysis::oxygen_calibration::OxygenSeries;
use crate::data_input::dive_data::DiveData;
use crate::plot_functions::plot_depth_profile::plot_depth_profile;
use crate::plot_functions::plot_depth_section::SectionFigure;
use crate::plot_functions::plot_time_series::TimeSeriesFigure;
use crate::plot_functions::plot_ts_diagram::plot_ts_diagram;
use crate::types::FigureList;

/// Optional figure groups. A group is drawn only when enabled here AND the
/// file carries the channels it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureToggles {
    pub oxygen: bool,
    pub turbidity: bool,
}

impl Default for FigureToggles {
    fn default() -> Self {
        Self {
            oxygen: true,
            turbidity: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Figure<'a> {
    DepthProfile,
    Section(SectionFigure<'a>),
    TimeSeries(TimeSeriesFigure<'a>),
    TsDiagram,
}

struct FigureBuilder<'a> {
    dive: &'a DiveData,
    figures: FigureList<'a>,
}

impl<'a> FigureBuilder<'a> {
    fn section(
        &mut self,
        file_name: &'static str,
        title: &'static str,
        value_label: &'static str,
        values: ArrayView1<'a, f64>,
    ) {
        self.figures.push((
            file_name,
            Figure::Section(SectionFigure {
                title,
                value_label,
                time_label: LABEL_TIME_SINCE_STARTUP,
                time_s: self.dive.time_s.view(),
                depth_m: self.dive.depth_m.view(),
                values,
                bottom_depth_m: self.dive.bottom_depth_m.as_ref().map(|b| b.view()),
            }),
        ));
    }

    fn time_series(
        &mut self,
        file_name: &'static str,
        title: &'static str,
        value_label: &'static str,
        values: ArrayView1<'a, f64>,
    ) {
        self.figures.push((
            file_name,
            Figure::TimeSeries(TimeSeriesFigure {
                title,
                value_label,
                time_label: LABEL_TIME_SINCE_STARTUP,
                time_s: self.dive.time_s.view(),
                values,
            }),
        ));
    }
}

/// Selects the figures to draw for one dive, in file-number order.
pub fn dive_figures<'a>(
    dive: &'a DiveData,
    oxygen_series: Option<&'a OxygenSeries>,
    toggles: FigureToggles,
) -> FigureList<'a> {
    let mut builder = FigureBuilder {
        dive,
        figures: Vec::new(),
    };
    let oxygen = dive.oxygen.as_ref().filter(|_| toggles.oxygen);
    let turbidity = dive.turbidity.as_ref().filter(|_| toggles.turbidity);

    builder.figures.push((FIG_TIME_DEPTH, Figure::DepthProfile));
    builder.section(
        FIG_SECTION_TEMPERATURE,
        "Temperature by depth during the flight",
        LABEL_TEMPERATURE,
        dive.temperature_c.view(),
    );
    builder.time_series(
        FIG_TEMPERATURE,
        "Legato3 temperature during the flight",
        LABEL_TEMPERATURE,
        dive.temperature_c.view(),
    );
    builder.section(
        FIG_SECTION_CONDUCTIVITY,
        "Conductivity by depth during the flight",
        LABEL_CONDUCTIVITY,
        dive.conductivity_ms_cm.view(),
    );
    builder.time_series(
        FIG_CONDUCTIVITY,
        "Legato3 conductivity during the flight",
        LABEL_CONDUCTIVITY,
        dive.conductivity_ms_cm.view(),
    );

    if let Some(channels) = oxygen {
        builder.section(
            FIG_SECTION_REPORTED_OXYGEN,
            "Reported oxygen concentration by depth during the flight",
            LABEL_OXYGEN,
            channels.reported_umol_l.view(),
        );
        builder.time_series(
            FIG_REPORTED_OXYGEN,
            "Reported oxygen concentration during the flight",
            LABEL_OXYGEN,
            channels.reported_umol_l.view(),
        );

        if let (Some(odo_temperature), Some(monotonic)) =
            (&channels.odo_temperature_c, &dive.monotonic_time_s)
        {
            builder.figures.push((
                FIG_SECTION_ODO_TEMPERATURE,
                Figure::Section(SectionFigure {
                    title: "Optode temperature by depth during the flight",
                    value_label: LABEL_TEMPERATURE,
                    time_label: LABEL_MONOTONIC_TIME,
                    time_s: monotonic.view(),
                    depth_m: dive.depth_m.view(),
                    values: odo_temperature.view(),
                    bottom_depth_m: None,
                }),
            ));
            builder.figures.push((
                FIG_ODO_TEMPERATURE,
                Figure::TimeSeries(TimeSeriesFigure {
                    title: "Optode temperature during the flight",
                    value_label: LABEL_TEMPERATURE,
                    time_label: LABEL_MONOTONIC_TIME,
                    time_s: monotonic.view(),
                    values: odo_temperature.view(),
                }),
            ));
        }

        builder.section(
            FIG_SECTION_ODO_PHASE,
            "Optode phase by depth during the flight",
            LABEL_PHASE,
            channels.phase_deg.view(),
        );
        builder.time_series(
            FIG_ODO_PHASE,
            "Optode phase during the flight",
            LABEL_PHASE,
            channels.phase_deg.view(),
        );
    }

    builder.section(
        FIG_SECTION_SALINITY,
        "Salinity by depth during the flight",
        LABEL_SALINITY,
        dive.salinity_psu.view(),
    );
    builder.time_series(
        FIG_SALINITY,
        "Legato3 salinity during the flight",
        LABEL_SALINITY,
        dive.salinity_psu.view(),
    );

    if let Some(turbidity) = turbidity {
        builder.section(
            FIG_SECTION_TURBIDITY,
            "Turbidity by depth during the flight",
            LABEL_TURBIDITY,
            turbidity.view(),
        );
        builder.time_series(
            FIG_TURBIDITY,
            "Legato3 turbidity during the flight",
            LABEL_TURBIDITY,
            turbidity.view(),
        );
    }

    builder.figures.push((FIG_TS_DIAGRAM, Figure::TsDiagram));

    if let (Some(_), Some(series)) = (oxygen, oxygen_series) {
        builder.section(
            FIG_SECTION_COMPENSATED_OXYGEN,
            "Compensated oxygen concentration by depth during the flight",
            LABEL_OXYGEN,
            series.compensated_concentration_umol_l.view(),
        );
        builder.section(
            FIG_SECTION_SATURATION,
            "Computed oxygen saturation by depth during the flight",
            LABEL_SATURATION,
            series.saturation_percent.view(),
        );
    }

    builder.figures
}

/// Draws every selected figure into `output_dir`. Returns the number of
/// figures that contained data.
pub fn plot_dive(
    dive: &DiveData,
    oxygen_series: Option<&OxygenSeries>,
    toggles: FigureToggles,
    output_dir: &Path,
    root_name: &str,
) -> Result<usize, Box<dyn Error>> {
    let figures = dive_figures(dive, oxygen_series, toggles);
    log::info!("Rendering {} figures for '{}'...", figures.len(), root_name);

    let mut plotted = 0;
    for (file_name, figure) in &figures {
        let output_path = output_dir.join(file_name);
        let has_data = match figure {
            Figure::DepthProfile => plot_depth_profile(dive, &output_path, root_name)?,
            Figure::Section(section) => section.plot(&output_path, root_name)?,
            Figure::TimeSeries(series) => series.plot(&output_path, root_name)?,
            Figure::TsDiagram => plot_ts_diagram(dive, &output_path, root_name)?,
        };
        if has_data {
            plotted += 1;
        }
    }
    Ok(plotted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::oxygen_calibration::CalibrationTable;
    use crate::data_input::dive_data::OxygenChannels;
    use ndarray::array;

    fn base_dive() -> DiveData {
        DiveData {
            time_s: array![0.0, 1.0],
            monotonic_time_s: None,
            depth_m: array![2.0, 3.0],
            bottom_depth_m: None,
            pressure_bar: array![0.2, 0.3],
            temperature_c: array![15.0, 14.9],
            conductivity_ms_cm: array![50.0, 50.1],
            salinity_psu: array![37.5, 37.6],
            oxygen: None,
            turbidity: None,
        }
    }

    fn names(figures: &FigureList<'_>) -> Vec<&'static str> {
        figures.iter().map(|(name, _)| *name).collect()
    }

    fn with_oxygen(odo_temperature: bool) -> DiveData {
        let mut dive = base_dive();
        dive.oxygen = Some(OxygenChannels {
            reported_umol_l: array![240.0, 241.0],
            phase_deg: array![30.0, 30.1],
            odo_temperature_c: odo_temperature.then(|| array![15.1, 15.0]),
        });
        dive
    }

    #[test]
    fn test_core_figures_always_present() {
        let dive = base_dive();
        let figures = dive_figures(&dive, None, FigureToggles::default());
        assert_eq!(
            names(&figures),
            vec![
                FIG_TIME_DEPTH,
                FIG_SECTION_TEMPERATURE,
                FIG_TEMPERATURE,
                FIG_SECTION_CONDUCTIVITY,
                FIG_CONDUCTIVITY,
                FIG_SECTION_SALINITY,
                FIG_SALINITY,
                FIG_TS_DIAGRAM,
            ]
        );
    }

    #[test]
    fn test_all_eighteen_figures() {
        let mut dive = with_oxygen(true);
        dive.monotonic_time_s = Some(array![100.0, 101.0]);
        dive.turbidity = Some(array![0.5, 0.6]);
        let series = dive
            .derive_oxygen(&CalibrationTable::RBR_ODO)
            .expect("equal lengths")
            .expect("oxygen channels");

        let figures = dive_figures(&dive, Some(&series), FigureToggles::default());
        assert_eq!(figures.len(), 18);
        assert_eq!(figures.last().map(|f| f.0), Some(FIG_SECTION_SATURATION));
    }

    #[test]
    fn test_odo_temperature_needs_monotonic_time() {
        let dive = with_oxygen(true);
        let figures = names(&dive_figures(&dive, None, FigureToggles::default()));
        assert!(figures.contains(&FIG_SECTION_REPORTED_OXYGEN));
        assert!(figures.contains(&FIG_ODO_PHASE));
        assert!(!figures.contains(&FIG_ODO_TEMPERATURE));
        // No derived series, no compensated sections.
        assert!(!figures.contains(&FIG_SECTION_COMPENSATED_OXYGEN));
    }

    #[test]
    fn test_toggles_disable_groups() {
        let mut dive = with_oxygen(false);
        dive.turbidity = Some(array![0.5, 0.6]);
        let toggles = FigureToggles {
            oxygen: false,
            turbidity: false,
        };
        assert_eq!(dive_figures(&dive, None, toggles).len(), 8);
    }

    #[test]
    fn test_monotonic_sections_have_no_bottom_overlay() {
        let mut dive = with_oxygen(true);
        dive.monotonic_time_s = Some(array![100.0, 101.0]);
        dive.bottom_depth_m = Some(array![30.0, 30.0]);
        let figures = dive_figures(&dive, None, FigureToggles::default());
        for (name, figure) in &figures {
            if let Figure::Section(section) = figure {
                let expect_bottom = *name != FIG_SECTION_ODO_TEMPERATURE;
                assert_eq!(section.bottom_depth_m.is_some(), expect_bottom, "{name}");
            }
        }
    }
}
