use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::error::{ConvertError, Result};
use crate::subtitle::{classify, html_encode_latin1, vtt, LineKind};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Settings fixed for the lifetime of a [`Converter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Signed shift applied to every timecode, in milliseconds.
    pub offset_ms: i64,
    /// Where to write `.vtt` files. `None` writes next to the input.
    pub output_dir: Option<PathBuf>,
    /// Suppress progress reports. Errors are still logged.
    pub quiet: bool,
}

/// Counts gathered while converting one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Timecode lines rewritten.
    pub cues: usize,
    /// Sequence-number lines dropped.
    pub index_lines: usize,
    /// Lines written after the header.
    pub lines_written: usize,
}

/// Converts SRT documents to WebVTT.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn is_quiet(&self) -> bool {
        self.options.quiet
    }

    /// Where the WebVTT file for `input` goes.
    ///
    /// A trailing `.srt` (any case) becomes `.vtt`; other names get `.vtt`
    /// appended. With an output directory only the file name is kept.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let has_srt_ext = input
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"));

        let output = if has_srt_ext {
            input.with_extension("vtt")
        } else {
            let mut name = input.as_os_str().to_os_string();
            name.push(".vtt");
            PathBuf::from(name)
        };

        match (&self.options.output_dir, output.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => output,
        }
    }

    /// Convert one file, reporting the outcome. Returns `true` on success.
    ///
    /// This is the per-file failure boundary: errors are logged with the
    /// input path and never propagate to the caller.
    pub fn try_convert(&self, input: &Path) -> bool {
        match self.convert_path(input) {
            Ok(_) => true,
            Err(e) => {
                error!("An error occurred converting \"{}\": {}", input.display(), e);
                false
            }
        }
    }

    /// Convert `input` to its derived output path, creating the output
    /// directory first if needed. Returns the path written.
    pub fn convert_path(&self, input: &Path) -> Result<PathBuf> {
        let output = self.output_path_for(input);
        self.ensure_output_dir()?;

        if !self.is_quiet() {
            info!("Converting file: {} => {}", input.display(), output.display());
        }

        let stats = self.convert_file(input, &output)?;
        debug!(
            "{}: {} cues, {} index lines dropped, {} lines written",
            input.display(),
            stats.cues,
            stats.index_lines,
            stats.lines_written
        );

        if !self.is_quiet() {
            info!("Done!");
        }

        Ok(output)
    }

    /// Convert the SRT file at `input` into a WebVTT file at `output`.
    ///
    /// The input is opened before the output is created, so a missing input
    /// leaves no empty `.vtt` behind. Both handles close on every return path.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<FileStats> {
        let reader = File::open(input).map_err(|source| ConvertError::FileOpen {
            path: input.to_path_buf(),
            source,
        })?;
        let writer = File::create(output).map_err(|source| ConvertError::FileOpen {
            path: output.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(writer);
        let stats = self.convert_stream(BufReader::new(reader), &mut writer)?;
        writer.flush()?;

        Ok(stats)
    }

    /// Stream SRT lines from `reader` to WebVTT on `writer`.
    ///
    /// Input must be UTF-8; `\n` and `\r\n` endings are both accepted and
    /// output always uses `\n`.
    pub fn convert_stream<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<FileStats> {
        let mut stats = FileStats::default();

        writer.write_all(vtt::HEADER.as_bytes())?;

        for (n, line) in reader.lines().enumerate() {
            let mut line = line?;
            if n == 0 && line.starts_with(BYTE_ORDER_MARK) {
                line.replace_range(..BYTE_ORDER_MARK.len_utf8(), "");
            }

            match classify(&line)? {
                LineKind::Index => {
                    stats.index_lines += 1;
                    continue;
                }
                LineKind::Timecode(timecode) => {
                    let rendered = vtt::format_timecode(&line, timecode, self.options.offset_ms);
                    writeln!(writer, "{}", rendered)?;
                    stats.cues += 1;
                }
                LineKind::Text => {
                    writeln!(writer, "{}", html_encode_latin1(&line))?;
                }
            }
            stats.lines_written += 1;
        }

        Ok(stats)
    }

    /// Create the configured output directory (one level) when missing.
    fn ensure_output_dir(&self) -> Result<()> {
        let Some(dir) = &self.options.output_dir else {
            return Ok(());
        };
        if dir.is_dir() {
            return Ok(());
        }

        if !self.is_quiet() {
            info!("Creating directory: {}", dir.display());
        }

        match fs::create_dir(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
            Err(source) => Err(ConvertError::FileOpen {
                path: dir.clone(),
                source,
            }),
        }
    }
}
