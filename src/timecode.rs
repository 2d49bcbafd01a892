/*!
 * Timestamp parsing for timed-text documents.
 *
 * Transcriber output mixes two timestamp shapes: `hh:mm:ss.fff` in WebVTT
 * cue lines and `[mm:ss.fff]` in console-style output. Both are accepted
 * here, and an unparsable timestamp is reported as a value rather than
 * raised so the caller can skip the cue and keep going.
 */

use crate::errors::CaptionError;

/// Convert a raw timestamp string into seconds.
///
/// Accepts `mm:ss`, `hh:mm:ss`, optionally with a `.fff` fractional part on
/// the seconds segment and optionally wrapped in `[` `]` brackets. A lone
/// bracket on either side is tolerated because the bracketed cue layout
/// splits into halves that each carry one bracket.
///
/// The fractional part is interpreted as thousandths of a second regardless
/// of its digit count (`"02.5"` is 2 + 5/1000 seconds, not 2.5), matching
/// the transcriber's own timestamp emitter.
pub fn parse_timestamp(raw: &str) -> Result<f64, CaptionError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let stripped = stripped.strip_suffix(']').unwrap_or(stripped);

    let invalid = || CaptionError::InvalidTimestampFormat {
        raw: raw.to_string(),
    };

    let segments: Vec<&str> = stripped.split(':').collect();
    let (hours_raw, minutes_raw, seconds_raw) = match segments.as_slice() {
        [minutes, seconds] => (None, *minutes, *seconds),
        [hours, minutes, seconds] => (Some(*hours), *minutes, *seconds),
        _ => return Err(invalid()),
    };

    let hours = match hours_raw {
        Some(value) => parse_component(value).ok_or_else(invalid)?,
        None => 0.0,
    };
    let minutes = parse_component(minutes_raw).ok_or_else(invalid)?;

    let (seconds, fraction) = match seconds_raw.split_once('.') {
        Some((whole, fractional)) => {
            // At most one '.'; a second dot would survive inside the
            // fractional part and parse as its own float.
            if fractional.contains('.') {
                return Err(invalid());
            }
            (
                parse_component(whole).ok_or_else(invalid)?,
                parse_component(fractional).ok_or_else(invalid)? / 1000.0,
            )
        }
        None => (parse_component(seconds_raw).ok_or_else(invalid)?, 0.0),
    };

    Ok(hours * 3600.0 + minutes * 60.0 + seconds + fraction)
}

/// Parse one numeric timestamp component, rejecting anything that would
/// violate the finite, non-negative interval invariant.
fn parse_component(segment: &str) -> Option<f64> {
    let value: f64 = segment.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
