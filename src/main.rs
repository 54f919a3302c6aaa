// src/main.rs

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use log::LevelFilter;

use yuco_csv_render::config::{Cli, RenderOptions};
use yuco_csv_render::data_analysis::dive_statistics::DiveStatistics;
use yuco_csv_render::data_analysis::oxygen_calibration::CalibrationTable;
use yuco_csv_render::data_input::discovery::{collect_csv_files, output_directory_for};
use yuco_csv_render::data_input::log_parser::parse_log_file;
use yuco_csv_render::data_input::mission_filter::select_mission_samples;
use yuco_csv_render::error::LogParseError;
use yuco_csv_render::plot_functions::plot_dive::plot_dive;

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    builder.parse_default_env();

    // Just the level and the message
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });

    let _ = builder.try_init();
}

fn process_file(
    input_file: &Path,
    options: &RenderOptions,
    table: &CalibrationTable,
) -> Result<(), Box<dyn Error>> {
    let root_name = input_file
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    log::info!("--- Processing '{}' ---", input_file.display());

    let parsed = parse_log_file(input_file)?;
    let dive = match select_mission_samples(&parsed, &options.mission) {
        Ok(dive) => dive,
        Err(LogParseError::MissingColumns(_)) => {
            log::warn!("'{}' ignored, no GPS acceptance flag.", input_file.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if dive.is_empty() {
        log::warn!("'{}' has no mission samples; figures will be empty.", root_name);
    }

    let oxygen = if options.figures.oxygen {
        dive.derive_oxygen(table)?
    } else {
        None
    };

    if options.print_statistics {
        println!("{root_name}");
        print!("{}", DiveStatistics::compute(&dive, oxygen.as_ref()));
    }

    let output_dir = output_directory_for(input_file, options.output_dir.as_deref());
    fs::create_dir_all(&output_dir)?;
    let plotted = plot_dive(&dive, oxygen.as_ref(), options.figures, &output_dir, &root_name)?;
    log::info!(
        "Finished '{}': {} figure(s) with data in '{}'.",
        root_name,
        plotted,
        output_dir.display()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let options = RenderOptions::from(Cli::parse());
    log::info!("yuco-csv-render {}", yuco_csv_render::crate_version());

    let input_files = collect_csv_files(&options.inputs)?;
    if input_files.is_empty() {
        log::warn!("No CSV files to process.");
        return Ok(());
    }

    let table = CalibrationTable::RBR_ODO;
    let mut failures = 0;
    for input_file in &input_files {
        if let Err(e) = process_file(input_file, &options, &table) {
            failures += 1;
            log::error!("Failed to process '{}': {}", input_file.display(), e);
        }
    }

    log::info!(
        "Processed {} file(s), {} failed.",
        input_files.len(),
        failures
    );
    Ok(())
}
