use anyhow::{Context, Result};
use clap::Parser;
use srt2vtt::{convert_inputs, print_summary, Config, Converter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "srt2vtt")]
#[command(version, about = "Convert SRT subtitles to WebVTT")]
#[command(long_about = "Convert SubRip (.srt) subtitle files to WebVTT (.vtt), optionally shifting every timecode. Directories are scanned for .srt and .SRT files.")]
struct Cli {
    /// Subtitle files or directories to convert
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Directory to write .vtt files to (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Milliseconds to add to every timecode (may be negative)
    #[arg(short = 't', long, allow_negative_numbers = true)]
    offset: Option<i64>,

    /// Also convert files in subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(offset) = self.offset {
            config.time_offset_ms = offset;
        }
        if let Some(ref dir) = self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        config.recursive |= self.recursive;
        config.quiet |= self.quiet;
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load().context("Failed to load configuration")?;
    cli.apply(&mut config);
    config
        .validate()
        .context("Configuration validation failed")?;

    debug!("Offset:     {} ms", config.time_offset_ms);
    if let Some(ref dir) = config.output_dir {
        debug!("Output dir: {}", dir.display());
    }

    let converter = Converter::new(config.convert_options());
    let stats = convert_inputs(&converter, &cli.paths, config.recursive);

    if !config.quiet {
        print_summary(&stats);
    }

    Ok(if stats.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_offset_parses() {
        let cli = Cli::try_parse_from(["srt2vtt", "-t", "-1500", "movie.srt"]).unwrap();
        assert_eq!(cli.offset, Some(-1500));
        assert_eq!(cli.paths, vec![PathBuf::from("movie.srt")]);
    }

    #[test]
    fn test_path_required() {
        assert!(Cli::try_parse_from(["srt2vtt"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from(["srt2vtt", "-r", "-q", "-o", "out", "--offset", "250", "subs"])
            .unwrap();
        let mut config = Config {
            time_offset_ms: -10,
            ..Default::default()
        };
        cli.apply(&mut config);

        assert_eq!(config.time_offset_ms, 250);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert!(config.recursive);
        assert!(config.quiet);
    }

    #[test]
    fn test_config_kept_without_flags() {
        let cli = Cli::try_parse_from(["srt2vtt", "a.srt", "b.srt"]).unwrap();
        let mut config = Config {
            time_offset_ms: 400,
            recursive: true,
            ..Default::default()
        };
        cli.apply(&mut config);

        assert_eq!(config.time_offset_ms, 400);
        assert!(config.recursive);
        assert_eq!(cli.paths.len(), 2);
    }
}
