//! HH:MM:SS timestamps and compact duration rendering
//!
//! Parsing is deliberately arithmetic: components are not range checked, so
//! `"00:90:00"` is 5400 seconds. Range rules belong in the schema.

use thiserror::Error;

/// Timestamp parse failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Timestamp must be HH:MM:SS, got: {0}")]
    WrongShape(String),

    #[error("Timestamp component {component:?} in {text:?} is not a non-negative integer")]
    BadComponent { text: String, component: String },

    #[error("Timestamp {0:?} is too large to represent in seconds")]
    Overflow(String),
}

/// Convert an `HH:MM:SS` string to seconds.
///
/// Components may be unpadded (`"1:2:3"`) but must consist of ASCII digits only.
pub fn parse_timestamp(text: &str) -> Result<u64, TimestampError> {
    let parts: Vec<&str> = text.split(':').collect();
    let &[hours, minutes, seconds] = parts.as_slice() else {
        return Err(TimestampError::WrongShape(text.to_string()));
    };

    let component = |raw: &str| -> Result<u64, TimestampError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimestampError::BadComponent {
                text: text.to_string(),
                component: raw.to_string(),
            });
        }
        raw.parse::<u64>()
            .map_err(|_| TimestampError::Overflow(text.to_string()))
    };

    let (hours, minutes, seconds) = (component(hours)?, component(minutes)?, component(seconds)?);
    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(|| TimestampError::Overflow(text.to_string()))
}

/// Signed length of a clip in seconds (`end - start`).
///
/// Negative values mean the data is malformed; callers decide what to do with them.
/// Computed in `i128` so any pair of parseable timestamps has an exact difference.
pub fn clip_duration(start: &str, end: &str) -> Result<i128, TimestampError> {
    let start = i128::from(parse_timestamp(start)?);
    let end = i128::from(parse_timestamp(end)?);
    Ok(end - start)
}

/// Render seconds as `1h 02m 03s`, `2m 03s` or `3s`.
///
/// Fractional input is rounded half away from zero first.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    let (mm, ss) = (total / 60, total % 60);
    let (hh, mm) = (mm / 60, mm % 60);

    if hh > 0 {
        format!("{hh}h {mm:02}m {ss:02}s")
    } else if mm > 0 {
        format!("{mm}m {ss:02}s")
    } else {
        format!("{ss}s")
    }
}
