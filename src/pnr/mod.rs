//! PNR extraction: message splitting, DOCS layout resolution, name
//! normalization, passenger assembly and traveler matching.
//!
//! Data flows splitter → (per traveler group) document resolver and name
//! normalizer → passenger builder → traveler matcher. The free-text splitter
//! is shared by the resolver and the standalone extractors.

pub mod document;
pub mod extractors;
pub mod free_text;
pub mod matcher;
pub mod names;
pub mod passenger;
pub mod splitter;

// Re-export key types
pub use document::{DocumentLayout, DocumentResolver, ResolvedDocument};
pub use extractors::{
    address_from_add, address_from_ssr, bag_tag_from_element, create_phone, create_visa,
    frequent_flyer_from_free_text, phone_from_free_text, phone_from_lts, prep_telephone_number,
};
pub use free_text::{split_free_text, FieldList, FIELD_DELIMITER};
pub use matcher::match_traveler;
pub use names::{default_normalizer, NameNormalizer, NameTables, NormalizedName, RawName};
pub use passenger::{select_best_segment, PassengerBuilder, TravelerGroup, PASSENGER_TYPE};
pub use splitter::{single_pnr, split_pnrs, split_pnrs_with, HEADER_TAG};
