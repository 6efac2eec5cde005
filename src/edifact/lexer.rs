//! Minimal EDIFACT lexer: service string advice and segment offsets.
//!
//! Only what the PNR splitter needs is recognised here: the delimiter set
//! declared by an optional leading `UNA` segment, and the byte offset at which
//! each segment begins.

use crate::error::ParseError;

const UNA_TAG: &str = "UNA";
const UNA_LENGTH: usize = 9;

/// Capability the PNR splitter consumes from a tokenizer.
///
/// Implement this trait to plug in a different tokenizer; `EdifactLexer` is
/// the default implementation.
pub trait SegmentLexer {
    /// The full message text being tokenized.
    fn message(&self) -> &str;

    /// The segment terminator in effect for this message.
    fn segment_terminator(&self) -> char;

    /// Byte offset of the first segment with the given tag, if any.
    fn segment_start(&self, tag: &str) -> Option<usize>;

    /// Text of the service string advice (`UNA...`) describing the delimiters.
    fn service_string_segment(&self) -> String;

    /// Like [`segment_start`](Self::segment_start), for segments the caller
    /// cannot do without.
    ///
    /// # Errors
    /// Returns `ParseError::SegmentNotFound` when no segment has the tag.
    fn require_segment(&self, tag: &str) -> Result<usize, ParseError> {
        self.segment_start(tag).ok_or_else(|| ParseError::SegmentNotFound {
            tag: tag.to_string(),
        })
    }
}

/// Delimiter set declared by the `UNA` service string advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub component: char,
    pub data_element: char,
    pub decimal: char,
    pub release: char,
    pub reserved: char,
    pub segment_terminator: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            component: ':',
            data_element: '+',
            decimal: '.',
            release: '?',
            reserved: ' ',
            segment_terminator: '\'',
        }
    }
}

impl Delimiters {
    /// Parse the six delimiter characters following `UNA`.
    fn from_una(una: &str) -> Result<Self, ParseError> {
        let chars: Vec<char> = una.chars().skip(UNA_TAG.len()).take(6).collect();
        if chars.len() != 6 {
            return Err(ParseError::InvalidServiceString(una.to_string()));
        }

        Ok(Self {
            component: chars[0],
            data_element: chars[1],
            decimal: chars[2],
            release: chars[3],
            reserved: chars[4],
            segment_terminator: chars[5],
        })
    }

    /// Render as a `UNA` segment.
    pub fn to_una(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}",
            UNA_TAG,
            self.component,
            self.data_element,
            self.decimal,
            self.release,
            self.reserved,
            self.segment_terminator
        )
    }
}

/// Start offset and tag of one segment in the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentBoundary {
    pub tag: String,
    pub start: usize,
}

/// Default `SegmentLexer` over an EDIFACT message held in memory.
#[derive(Debug, Clone)]
pub struct EdifactLexer {
    message: String,
    delimiters: Delimiters,
    segments: Vec<SegmentBoundary>,
}

impl EdifactLexer {
    /// Tokenize a message.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyMessage` for blank input and
    /// `ParseError::InvalidServiceString` when a `UNA` segment is truncated.
    pub fn new(message: impl Into<String>) -> Result<Self, ParseError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ParseError::EmptyMessage);
        }

        let una_start = message.find(|c: char| !c.is_whitespace()).unwrap_or(0);
        let (delimiters, body_start, mut segments) = if message[una_start..].starts_with(UNA_TAG) {
            let una: String = message[una_start..].chars().take(UNA_LENGTH).collect();
            let delimiters = Delimiters::from_una(&una)?;
            let una_segment = SegmentBoundary {
                tag: UNA_TAG.to_string(),
                start: una_start,
            };
            (delimiters, una_start + una.len(), vec![una_segment])
        } else {
            (Delimiters::default(), 0, Vec::new())
        };

        segments.extend(scan_segments(&message, body_start, &delimiters));

        tracing::debug!(
            "Tokenized message: {} segments, terminator '{}'",
            segments.len(),
            delimiters.segment_terminator
        );

        Ok(Self {
            message,
            delimiters,
            segments,
        })
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// All segment boundaries in message order.
    pub fn segments(&self) -> &[SegmentBoundary] {
        &self.segments
    }
}

impl SegmentLexer for EdifactLexer {
    fn message(&self) -> &str {
        &self.message
    }

    fn segment_terminator(&self) -> char {
        self.delimiters.segment_terminator
    }

    fn segment_start(&self, tag: &str) -> Option<usize> {
        self.segments
            .iter()
            .find(|s| s.tag == tag)
            .map(|s| s.start)
    }

    fn service_string_segment(&self) -> String {
        self.delimiters.to_una()
    }
}

/// Walk the message from `from`, recording where each segment starts.
///
/// A released character (preceded by the release indicator) never ends a
/// segment or a tag.
fn scan_segments(message: &str, from: usize, delimiters: &Delimiters) -> Vec<SegmentBoundary> {
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;
    let mut tag = String::new();
    let mut in_tag = false;
    let mut released = false;

    for (offset, c) in message[from..].char_indices() {
        let offset = from + offset;

        if released {
            released = false;
            if in_tag {
                tag.push(c);
            }
            continue;
        }

        if start.is_none() {
            if c.is_whitespace() {
                continue;
            }
            start = Some(offset);
            in_tag = true;
            tag.clear();
        }

        if c == delimiters.release {
            released = true;
        } else if c == delimiters.segment_terminator {
            if let Some(begin) = start.take() {
                segments.push(SegmentBoundary {
                    tag: tag.trim().to_string(),
                    start: begin,
                });
            }
            in_tag = false;
        } else if c == delimiters.data_element || c == delimiters.component {
            in_tag = false;
        } else if in_tag {
            tag.push(c);
        }
    }

    // Trailing segment without a terminator
    if let Some(begin) = start {
        if !tag.trim().is_empty() {
            segments.push(SegmentBoundary {
                tag: tag.trim().to_string(),
                start: begin,
            });
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiters_without_una() {
        let lexer = EdifactLexer::new("UNB+IATA:1+A'UNH+1+PNRGOV'UNT+2+1'").unwrap();

        assert_eq!(lexer.segment_terminator(), '\'');
        assert_eq!(lexer.service_string_segment(), "UNA:+.? '");
        assert_eq!(lexer.segment_start("UNB"), Some(0));
        assert_eq!(lexer.segment_start("UNH"), Some(13));
        assert_eq!(lexer.segment_start("UNT"), Some(26));
        assert_eq!(lexer.segment_start("UNZ"), None);
    }

    #[test]
    fn test_una_declares_terminator() {
        let lexer = EdifactLexer::new("UNA:+.? ~UNB+IATA~SRC~UNT+1~").unwrap();

        assert_eq!(lexer.segment_terminator(), '~');
        assert_eq!(lexer.service_string_segment(), "UNA:+.? ~");
        assert_eq!(lexer.segment_start("UNA"), Some(0));
        assert_eq!(lexer.segment_start("UNB"), Some(9));
        assert_eq!(lexer.segment_start("SRC"), Some(18));
    }

    #[test]
    fn test_whitespace_between_segments() {
        let lexer = EdifactLexer::new("UNB+IATA'\nSRC'\r\nTIF+SMITH'").unwrap();

        assert_eq!(lexer.segment_start("SRC"), Some(10));
        assert_eq!(lexer.segment_start("TIF"), Some(16));
    }

    #[test]
    fn test_released_terminator_does_not_split() {
        let lexer = EdifactLexer::new("TIF+O?'BRIEN'SRC'").unwrap();
        let tags: Vec<&str> = lexer.segments().iter().map(|s| s.tag.as_str()).collect();

        assert_eq!(tags, vec!["TIF", "SRC"]);
    }

    #[test]
    fn test_truncated_una_is_rejected() {
        let result = EdifactLexer::new("UNA:+");
        assert!(matches!(result, Err(ParseError::InvalidServiceString(_))));
    }

    #[test]
    fn test_require_segment() {
        let lexer = EdifactLexer::new("UNB+IATA'SRC'TIF+SMITH'").unwrap();

        assert_eq!(lexer.require_segment("SRC"), Ok(9));
        assert_eq!(
            lexer.require_segment("UNT"),
            Err(ParseError::SegmentNotFound {
                tag: "UNT".to_string()
            })
        );
    }

    #[test]
    fn test_blank_message_is_rejected() {
        assert_eq!(EdifactLexer::new("  ").unwrap_err(), ParseError::EmptyMessage);
    }
}
