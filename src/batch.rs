use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use tracing::{error, info};
use walkdir::WalkDir;

use crate::convert::Converter;
use crate::error::{ConvertError, Result};

/// Extensions picked up by a directory scan. Matching is exact: `.Srt` is skipped.
const SRT_EXTENSIONS: &[&str] = &["srt", "SRT"];

/// Outcome counts for a batch of conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub converted: usize,
    pub failed: usize,
}

impl BatchStats {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn total(&self) -> usize {
        self.converted + self.failed
    }

    fn record(&mut self, ok: bool) {
        if ok {
            self.converted += 1;
        } else {
            self.failed += 1;
        }
    }

    fn merge(&mut self, other: BatchStats) {
        self.converted += other.converted;
        self.failed += other.failed;
    }
}

/// Whether a directory scan should convert `path`.
pub fn is_srt_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SRT_EXTENSIONS.contains(&ext))
}

/// Convert every `.srt`/`.SRT` regular file or symlink in `dir`.
///
/// With `recursive`, subdirectories are walked too; symlinked directories
/// are not followed. Fails only when `dir` itself cannot be read. Per-file
/// failures and unreadable subdirectories are logged and counted.
pub fn convert_directory(converter: &Converter, dir: &Path, recursive: bool) -> Result<BatchStats> {
    fs::read_dir(dir).map_err(|source| ConvertError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    if !converter.is_quiet() {
        info!("Searching for files to convert in: {}", dir.display());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name();

    let mut stats = BatchStats::default();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).display().to_string();
                error!("Could not read directory \"{}\": {}", path, e);
                stats.failed += 1;
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            if !converter.is_quiet() {
                info!("Searching for files to convert in: {}", entry.path().display());
            }
        } else if (file_type.is_file() || file_type.is_symlink()) && is_srt_path(entry.path()) {
            stats.record(converter.try_convert(entry.path()));
        }
    }

    Ok(stats)
}

/// Convert each input: directories are batch-converted, anything else is
/// treated as a single subtitle file.
pub fn convert_inputs(converter: &Converter, inputs: &[PathBuf], recursive: bool) -> BatchStats {
    let mut stats = BatchStats::default();

    for input in inputs {
        if input.is_dir() {
            match convert_directory(converter, input, recursive) {
                Ok(dir_stats) => stats.merge(dir_stats),
                Err(e) => {
                    error!("{}", e);
                    stats.failed += 1;
                }
            }
        } else {
            stats.record(converter.try_convert(input));
        }
    }

    stats
}

/// Print a summary of a batch run.
pub fn print_summary(stats: &BatchStats) {
    println!();
    if stats.is_success() {
        println!(
            "{} Converted {} file(s)",
            style("✓").green(),
            stats.converted
        );
    } else {
        println!(
            "{} Converted {} of {} file(s), {} failed",
            style("!").yellow(),
            stats.converted,
            stats.total(),
            style(stats.failed).red()
        );
    }
}
