//! Parsed segment inputs consumed by the PNR extractors.
//!
//! These are produced upstream by a full PNRGOV segment parser and are
//! read-only here.

use serde::{Deserialize, Serialize};

/// Special service request segment (`SSR`), e.g. DOCS, DOCA, DOCO, FQTV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ssr {
    pub code: String,
    pub free_text: Option<String>,
}

impl Ssr {
    pub fn new(code: impl Into<String>, free_text: Option<&str>) -> Self {
        Self {
            code: code.into(),
            free_text: free_text.map(str::to_string),
        }
    }

    /// A passport/travel document request carrying the given free text.
    pub fn docs(free_text: &str) -> Self {
        Self::new("DOCS", Some(free_text))
    }

    pub fn free_text(&self) -> Option<&str> {
        self.free_text.as_deref()
    }
}

/// One traveler entry inside a `TIF` segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerDetails {
    pub reference_number: Option<String>,
    pub given_name: Option<String>,
}

/// Traveler information segment (`TIF`): shared surname plus per-traveler details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tif {
    pub surname: Option<String>,
    pub details: Vec<TravelerDetails>,
}

impl Tif {
    /// A TIF with a single traveler.
    pub fn single(surname: &str, given_name: &str, reference_number: &str) -> Self {
        Self {
            surname: Some(surname.to_string()),
            details: vec![TravelerDetails {
                reference_number: Some(reference_number.to_string()),
                given_name: Some(given_name.to_string()),
            }],
        }
    }

    pub fn first_traveler(&self) -> Option<&TravelerDetails> {
        self.details.first()
    }
}

/// Address segment (`ADD`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Add {
    pub address_type: Option<String>,
    pub street_number_and_name: Option<String>,
    pub city: Option<String>,
    pub state_or_province_code: Option<String>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssr_constructors() {
        let ssr = Ssr::docs("/P/GBR/123");
        assert_eq!(ssr.code, "DOCS");
        assert_eq!(ssr.free_text(), Some("/P/GBR/123"));

        let bare = Ssr::new("FQTV", None);
        assert_eq!(bare.free_text(), None);
    }

    #[test]
    fn test_tif_first_traveler() {
        let tif = Tif::single("SMITH", "JOHN", "1");
        let first = tif.first_traveler().unwrap();
        assert_eq!(first.given_name.as_deref(), Some("JOHN"));
        assert_eq!(first.reference_number.as_deref(), Some("1"));

        assert!(Tif::default().first_traveler().is_none());
    }

    #[test]
    fn test_segments_deserialize_from_json() {
        let tif: Tif = serde_json::from_str(
            r#"{"surname":"DOE","details":[{"reference_number":"7","given_name":"JANE"}]}"#,
        )
        .unwrap();
        assert_eq!(tif, Tif::single("DOE", "JANE", "7"));
    }
}
