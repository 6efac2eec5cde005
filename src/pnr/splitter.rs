//! Splitting a composite PNRGOV message into single-PNR messages.
//!
//! A PNRGOV message carries one shared header (`UNB`..), any number of PNR
//! bodies each opened by an `SRC` segment, and a shared footer (`UNT`..).
//! Each extracted PNR is re-wrapped with the service string advice, header
//! and footer so it can be parsed on its own.

use regex::Regex;

use crate::edifact::{EdifactLexer, SegmentLexer};
use crate::error::ParseError;

/// Segment that opens each PNR body
pub const RECORD_START_TAG: &str = "SRC";

/// Segment that opens the shared header
pub const HEADER_TAG: &str = "UNB";

/// Segment that opens the shared footer
pub const FOOTER_TAG: &str = "UNT";

fn record_start_pattern(terminator: char) -> Option<Regex> {
    let pattern = format!(
        r"{}\s*{}",
        RECORD_START_TAG,
        regex::escape(&terminator.to_string())
    );

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Invalid record start pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// Extract the body of the PNR at zero-based `index`.
///
/// The body runs from its `SRC` segment up to the next `SRC`, or to the
/// footer when it is the last PNR, or to end of message when there is no
/// footer either.
///
/// # Returns
/// * `Some(body)` - PNR text at `index`
/// * `None` - The message holds fewer than `index + 1` PNRs
pub fn single_pnr<L: SegmentLexer + ?Sized>(lexer: &L, index: usize) -> Option<String> {
    let message = lexer.message();
    let pattern = record_start_pattern(lexer.segment_terminator())?;
    let mut starts = pattern.find_iter(message).skip(index).map(|m| m.start());

    let start = starts.next()?;
    let end = body_end(start, starts.next(), lexer.segment_start(FOOTER_TAG), message.len());

    Some(message[start..end].to_string())
}

fn body_end(start: usize, next_start: Option<usize>, footer: Option<usize>, len: usize) -> usize {
    next_start
        .or(footer)
        .filter(|&end| end > start)
        .unwrap_or(len)
}

/// Split a composite message into self-contained single-PNR messages.
///
/// A blank message, or one without any `SRC` segment, yields an empty list.
///
/// # Errors
/// Returns an error only when the service string advice is unusable.
///
/// # Example
///
/// ```
/// use pnrgov::pnr::split_pnrs;
///
/// let msg = "UNB+IATA'UNH+1'SRC'TIF+SMITH'SRC'TIF+JONES'UNT+5+1'";
/// let pnrs = split_pnrs(msg).unwrap();
///
/// assert_eq!(pnrs.len(), 2);
/// assert_eq!(pnrs[0], "UNA:+.? 'UNB+IATA'UNH+1'SRC'TIF+SMITH'UNT+5+1'");
/// assert_eq!(pnrs[1], "UNA:+.? 'UNB+IATA'UNH+1'SRC'TIF+JONES'UNT+5+1'");
/// ```
pub fn split_pnrs(message: &str) -> Result<Vec<String>, ParseError> {
    if message.trim().is_empty() {
        return Ok(Vec::new());
    }

    let lexer = EdifactLexer::new(message)?;
    Ok(split_pnrs_with(&lexer))
}

/// Split using an already-constructed lexer.
pub fn split_pnrs_with<L: SegmentLexer + ?Sized>(lexer: &L) -> Vec<String> {
    let message = lexer.message();

    let Some(first_record) = lexer.segment_start(RECORD_START_TAG) else {
        tracing::debug!("Message has no {} segment, nothing to split", RECORD_START_TAG);
        return Vec::new();
    };

    let header = match lexer.segment_start(HEADER_TAG) {
        Some(start) if start < first_record => &message[start..first_record],
        _ => "",
    };

    let footer_start = lexer.segment_start(FOOTER_TAG);
    let footer = footer_start.map(|start| &message[start..]).unwrap_or("");

    let service_string = lexer.service_string_segment();

    let Some(pattern) = record_start_pattern(lexer.segment_terminator()) else {
        return Vec::new();
    };
    let starts: Vec<usize> = pattern.find_iter(message).map(|m| m.start()).collect();

    let pnrs: Vec<String> = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = body_end(start, starts.get(i + 1).copied(), footer_start, message.len());
            format!("{}{}{}{}", service_string, header, &message[start..end], footer)
        })
        .collect();

    tracing::debug!("Split message into {} PNRs", pnrs.len());
    pnrs
}
