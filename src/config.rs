// src/config.rs

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::constants::MIN_MISSION_DEPTH_M;
use crate::data_input::mission_filter::{MissionCriteria, ValueBounds};
use crate::plot_functions::plot_dive::FigureToggles;

#[derive(Parser, Debug)]
#[command(
    name = "yuco-csv-render",
    version,
    about = "Renders YUCO glider Legato3 CSV exports into mission figures",
    long_about = None
)]
pub struct Cli {
    /// CSV files, or directories scanned for *.csv
    #[arg(required = true, value_hint = ValueHint::AnyPath)]
    pub inputs: Vec<PathBuf>,

    /// Root for the per-file figure directories (defaults next to each input)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Skip the oxygen figures even when the optode channels are present
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_oxygen: bool,

    /// Skip the turbidity figures
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_turbidity: bool,

    /// Print min/max of temperature, salinity and derived oxygen per file
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub stats: bool,

    /// Only keep samples deeper than this [m]
    #[arg(long, default_value_t = MIN_MISSION_DEPTH_M)]
    pub min_depth: f64,

    /// Lowest temperature kept [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub temperature_min: Option<f64>,

    /// Highest temperature kept [°C]
    #[arg(long, allow_negative_numbers = true)]
    pub temperature_max: Option<f64>,

    /// Lowest salinity kept [PSU]
    #[arg(long)]
    pub salinity_min: Option<f64>,

    /// Highest salinity kept [PSU]
    #[arg(long)]
    pub salinity_max: Option<f64>,
}

/// Resolved run options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub figures: FigureToggles,
    pub print_statistics: bool,
    pub mission: MissionCriteria,
}

impl From<Cli> for RenderOptions {
    fn from(cli: Cli) -> Self {
        RenderOptions {
            inputs: cli.inputs,
            output_dir: cli.output_dir,
            figures: FigureToggles {
                oxygen: !cli.no_oxygen,
                turbidity: !cli.no_turbidity,
            },
            print_statistics: cli.stats,
            mission: MissionCriteria {
                min_depth_m: cli.min_depth,
                temperature: ValueBounds {
                    min: cli.temperature_min,
                    max: cli.temperature_max,
                },
                salinity: ValueBounds {
                    min: cli.salinity_min,
                    max: cli.salinity_max,
                },
            },
        }
    }
}
