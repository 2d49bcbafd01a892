/*!
 * Caption stream parsing.
 *
 * Turns a raw timed-text document (WebVTT or the transcriber's bracketed
 * console format) into ordered caption records plus a list of cues whose
 * timing could not be parsed. Rejected cues never abort parsing; they only
 * shrink the output and surface as warnings.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::CaptionError;
use crate::timecode::parse_timestamp;

/// Separator between the start and end timestamps of a cue timing line.
const TIMING_SEPARATOR: &str = "-->";

/// Header marker opening a WebVTT document.
const HEADER_MARKER: &str = "WEBVTT";

// Bracketed cue layout: timing enclosed in brackets, text directly after
// with no separating whitespace, e.g. "[00:00.000 --> 00:04.000] text".
static BRACKETED_CUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]]*)\](.*)$").unwrap()
});

/// Time span of one caption, in seconds.
///
/// Both bounds are finite and non-negative, but `start <= end` is not
/// guaranteed: upstream transcribers occasionally emit inverted intervals
/// and those pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeInterval {
    /// Start of the caption, in seconds
    pub start: f64,
    /// End of the caption, in seconds
    pub end: f64,
}

/// One parsed caption: a time interval plus its raw body text.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionRecord {
    /// When the caption is displayed
    pub interval: TimeInterval,
    /// Caption body with multi-line text joined by single spaces
    pub text: String,
}

/// A cue block whose timing line could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedCue {
    /// The offending timing line, as found in the document
    pub raw_line: String,
}

/// Result of parsing a timed-text document.
///
/// Records appear in source order, never time-sorted.
#[derive(Debug, Default)]
pub struct CaptionDocument {
    /// Captions with valid timing
    pub records: Vec<CaptionRecord>,
    /// Cues skipped because their timing line was unparsable
    pub rejected: Vec<RejectedCue>,
}

impl CaptionDocument {
    /// Parse a timed-text document line by line.
    ///
    /// The parser scans for lines containing the timing separator, splits
    /// each into a timing pair plus an optional same-line text remainder,
    /// then accumulates subsequent body lines until a blank line, the next
    /// timing line, or end of input. A cue with valid timing but empty text
    /// still yields a record; token filtering happens downstream.
    pub fn parse(content: &str) -> Self {
        let mut records = Vec::new();
        let mut rejected = Vec::new();

        // Interval and accumulated text of the cue currently being read.
        let mut current: Option<(TimeInterval, String)> = None;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.contains(TIMING_SEPARATOR) {
                // The next timing line closes the cue being accumulated
                // without consuming itself.
                if let Some((interval, text)) = current.take() {
                    records.push(CaptionRecord { interval, text });
                }

                match split_cue_line(trimmed) {
                    Ok((interval, remainder)) => {
                        current = Some((interval, remainder.trim().to_string()));
                    }
                    Err(error) => {
                        warn!("Skipping cue: {}", error);
                        rejected.push(RejectedCue {
                            raw_line: trimmed.to_string(),
                        });
                    }
                }
                continue;
            }

            if trimmed.is_empty() {
                if let Some((interval, text)) = current.take() {
                    records.push(CaptionRecord { interval, text });
                }
                continue;
            }

            match current.as_mut() {
                Some((_, text)) => {
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(trimmed);
                }
                // Outside a cue: skip the header marker, cue sequence
                // numbers and any stray text.
                None => {
                    if trimmed != HEADER_MARKER {
                        debug!("Ignoring non-cue line: {}", trimmed);
                    }
                }
            }
        }

        if let Some((interval, text)) = current.take() {
            records.push(CaptionRecord { interval, text });
        }

        debug!(
            "Parsed {} caption(s), rejected {} cue(s)",
            records.len(),
            rejected.len()
        );

        CaptionDocument { records, rejected }
    }
}

/// Split a timing line into its interval and the same-line text remainder.
///
/// Two layouts are supported: a bracketed timing pair followed directly by
/// text, and a bare `start --> end` pair optionally followed by free text.
fn split_cue_line(line: &str) -> Result<(TimeInterval, &str), CaptionError> {
    let malformed = || CaptionError::MalformedCueLine {
        line: line.to_string(),
    };

    let (timing_part, remainder) = match BRACKETED_CUE.captures(line) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => (line, ""),
    };

    let fields: Vec<&str> = timing_part.split(TIMING_SEPARATOR).collect();
    let (start_raw, end_part) = match fields.as_slice() {
        [start, end] => (*start, *end),
        _ => return Err(malformed()),
    };

    // In the unbracketed layout any free text follows the end timestamp on
    // the same line; the timestamp is the first whitespace-delimited field.
    let (end_raw, remainder) = if remainder.is_empty() {
        match end_part.trim_start().split_once(char::is_whitespace) {
            Some((end, tail)) => (end, tail),
            None => (end_part, remainder),
        }
    } else {
        (end_part, remainder)
    };

    let interval = TimeInterval {
        start: parse_timestamp(start_raw)?,
        end: parse_timestamp(end_raw)?,
    };

    Ok((interval, remainder))
}
