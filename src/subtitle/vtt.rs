// WebVTT output
use super::line::TimecodeLine;

/// Mandatory first line of every WebVTT document, followed by a blank line.
pub const HEADER: &str = "WEBVTT\n\n";

/// Render a timecode line for WebVTT.
///
/// With a zero offset the original SRT line is reused with its commas
/// swapped for periods. This yields the same bytes as formatting the
/// parsed timestamps.
pub fn format_timecode(raw: &str, timecode: TimecodeLine, offset_ms: i64) -> String {
    if offset_ms == 0 {
        return raw.replace(',', ".");
    }

    let shifted = timecode.offset(offset_ms);
    format!("{} --> {}", shifted.start, shifted.end)
}
