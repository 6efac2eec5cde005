//! # pnrgov: PNRGOV Passenger Record Extraction
//!
//! Splits composite PNRGOV (EDIFACT) reservation messages into single-PNR
//! messages and reconstructs typed passenger records from the loosely
//! structured SSR free text they carry.
//!
//! ## Features
//!
//! - **Message splitting**: one self-contained message per `SRC` body, re-wrapped
//!   with the shared `UNB`.. header and `UNT`.. footer
//! - **DOCS layout resolution**: picks one of several positional layouts from
//!   the emptiness pattern of the free-text fields
//! - **Name normalization**: title and generational suffix extraction with a
//!   gender tie-break, driven by YAML-configurable tables
//! - **Passenger assembly**: best-segment selection, citizenship backfill and
//!   TIF name/reference merging
//! - **Traveler matching**: links secondary segments to a built passenger
//!
//! ## Example
//!
//! ```
//! use pnrgov::{PassengerBuilder, Ssr, Tif};
//!
//! let docs = vec![Ssr::docs(
//!     "/P/GBR/123456789/GBR/12JUL64/M/23AUG19/SMITHJR/JONATHON/ROBERT",
//! )];
//! let tif = Tif::single("SMITH", "JONATHON", "1");
//!
//! let passenger = PassengerBuilder::default().build(&docs, &tif).unwrap();
//! assert_eq!(passenger.last_name.as_deref(), Some("SMITH"));
//! assert_eq!(passenger.suffix.as_deref(), Some("JR"));
//! assert_eq!(passenger.traveler_reference_number.as_deref(), Some("1"));
//! ```

// Core modules
pub mod error;
pub mod dates;
pub mod record;
pub mod serialization;
pub mod envelope;

// EDIFACT tokenizing capability and segment inputs
pub mod edifact;

// PNR extraction pipeline
pub mod pnr;

// Re-export key types
pub use error::{ConfigError, ParseError};
pub use record::{AddressRecord, DocumentRecord, PassengerRecord, PhoneRecord, Record};
pub use envelope::MessageEnvelope;
pub use serialization::{NdjsonWriter, SerializationError};

pub use edifact::{Add, EdifactLexer, SegmentLexer, Ssr, Tif, TravelerDetails};

pub use pnr::{
    match_traveler, split_pnrs, DocumentLayout, DocumentResolver, FieldList, NameNormalizer,
    NameTables, PassengerBuilder, TravelerGroup,
};
