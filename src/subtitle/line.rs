// SRT line classification
use std::sync::LazyLock;

use regex::Regex;

use super::timestamp::Timestamp;
use crate::error::Result;

static INDEX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid regex"));

static TIMECODE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})$")
        .expect("Invalid regex")
});

/// Start and end of a cue as read from an SRT timecode line.
///
/// `start > end` is representable; offsetting does not reorder the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimecodeLine {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimecodeLine {
    /// Apply the same offset to both ends, clamping each at zero on its own.
    pub fn offset(self, offset_ms: i64) -> Self {
        Self {
            start: self.start.offset(offset_ms),
            end: self.end.offset(offset_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Cue sequence number. Dropped from WebVTT output.
    Index,
    Timecode(TimecodeLine),
    /// Dialogue, blank lines and anything unrecognised.
    Text,
}

/// Classify one line of SRT input. `line` must not contain its terminator.
///
/// Both patterns must match the whole line, so `"42 dialogue"` is text.
pub fn classify(line: &str) -> Result<LineKind> {
    if INDEX_LINE.is_match(line) {
        return Ok(LineKind::Index);
    }

    if let Some(caps) = TIMECODE_LINE.captures(line) {
        let start = Timestamp::parse_srt(&caps[1])?;
        let end = Timestamp::parse_srt(&caps[2])?;
        return Ok(LineKind::Timecode(TimecodeLine { start, end }));
    }

    Ok(LineKind::Text)
}
