// SRT/WebVTT timestamps
use std::fmt;

use crate::error::{ConvertError, Result};

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Milliseconds since midnight. Never negative.
///
/// Displays in WebVTT form, `HH:MM:SS.mmm`. Hour counts above 99 widen the
/// hour field rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`) by fixed field position.
    ///
    /// Hours sit at 0..2, minutes at 3..5, seconds at 6..8 and milliseconds
    /// from 9 to the end. Separators are not checked; callers are expected
    /// to have matched the timecode pattern already.
    pub fn parse_srt(s: &str) -> Result<Self> {
        let hours = field(s, 0..2, "hours")?;
        let minutes = field(s, 3..5, "minutes")?;
        let seconds = field(s, 6..8, "seconds")?;
        let millis = field(s, 9..s.len(), "milliseconds")?;

        Ok(Self(
            hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis,
        ))
    }

    /// Shift by a signed offset, flooring at zero.
    pub fn offset(self, offset_ms: i64) -> Self {
        let shifted = i128::from(self.0) + i128::from(offset_ms);
        Self(u64::try_from(shifted.max(0)).unwrap_or(u64::MAX))
    }
}

fn field(s: &str, range: std::ops::Range<usize>, name: &str) -> Result<u64> {
    let malformed = |reason: String| ConvertError::MalformedTimecode {
        timestamp: s.to_string(),
        reason,
    };

    let part = s
        .get(range)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| malformed(format!("missing {name} field")))?;

    part.parse::<u64>()
        .map_err(|e| malformed(format!("invalid {name} '{part}': {e}")))
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / MS_PER_HOUR;
        let minutes = (self.0 % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (self.0 % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = self.0 % MS_PER_SECOND;
        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_srt() {
        let ts = Timestamp::parse_srt("01:02:03,456").unwrap();
        assert_eq!(ts.as_millis(), 3_723_456);
    }

    #[test]
    fn test_round_trip_changes_only_separator() {
        for s in ["00:00:00,000", "00:00:01,500", "12:34:56,789", "99:59:59,999"] {
            let ts = Timestamp::parse_srt(s).unwrap();
            assert_eq!(ts.to_string(), s.replace(',', "."));
        }
    }

    #[test]
    fn test_format_zero_pads() {
        assert_eq!(Timestamp::from_millis(0).to_string(), "00:00:00.000");
        assert_eq!(Timestamp::from_millis(61_005).to_string(), "00:01:01.005");
        assert_eq!(Timestamp::from_millis(3_600_050).to_string(), "01:00:00.050");
    }

    #[test]
    fn test_format_hours_widen_past_99() {
        let ts = Timestamp::from_millis(100 * MS_PER_HOUR + 1);
        assert_eq!(ts.to_string(), "100:00:00.001");
    }

    #[test]
    fn test_offset_forward_and_back() {
        let ts = Timestamp::from_millis(5_000);
        assert_eq!(ts.offset(1_500).as_millis(), 6_500);
        assert_eq!(ts.offset(-4_000).as_millis(), 1_000);
        assert_eq!(ts.offset(0), ts);
    }

    #[test]
    fn test_offset_clamps_at_zero() {
        let ts = Timestamp::parse_srt("00:00:00,500").unwrap();
        let shifted = ts.offset(-1_000);
        assert_eq!(shifted.as_millis(), 0);
        assert_eq!(shifted.to_string(), "00:00:00.000");
    }

    #[test]
    fn test_parse_rejects_non_numeric_fields() {
        let err = Timestamp::parse_srt("aa:00:00,000").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedTimecode { .. }));
        assert!(err.to_string().contains("hours"));

        assert!(Timestamp::parse_srt("00:00:00,").is_err());
        assert!(Timestamp::parse_srt("00:00").is_err());
        assert!(Timestamp::parse_srt("").is_err());
    }
}
