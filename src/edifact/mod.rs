//! EDIFACT tokenizing capability and the segment types read by the extractors.

pub mod lexer;
pub mod segments;

// Re-export key types
pub use lexer::{Delimiters, EdifactLexer, SegmentBoundary, SegmentLexer};
pub use segments::{Add, Ssr, Tif, TravelerDetails};
