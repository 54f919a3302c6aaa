// src/data_input/discovery.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Expands the command-line inputs into the list of exports to process.
///
/// Files are taken as given; directories contribute their `*.csv` entries
/// (not recursive), sorted by path.
pub fn collect_csv_files(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let metadata = fs::metadata(input).map_err(|e| {
            io::Error::new(e.kind(), format!("{}: {}", input.display(), e))
        })?;
        if metadata.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && has_csv_extension(path))
                .collect();
            found.sort();
            log::info!("Found {} CSV file(s) in '{}'.", found.len(), input.display());
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Directory receiving the figures of one export: `<root>/<file stem>/`,
/// where root defaults to the export's own directory.
pub fn output_directory_for(input_file: &Path, output_root: Option<&Path>) -> PathBuf {
    let stem = input_file.file_stem().unwrap_or_default();
    let root = output_root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input_file.parent().map(Path::to_path_buf).unwrap_or_default());
    root.join(stem)
}
