//! Value records produced by PNR extraction.
//!
//! These are plain containers with public fields: the extractors fill them in
//! place and hand them back once every contributing segment has been folded in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Common behaviour for every extracted record type.
///
/// # Example
///
/// ```
/// use pnrgov::{PhoneRecord, Record};
///
/// let phone = PhoneRecord { number: Some("15551234".to_string()) };
/// assert!(phone.to_json().unwrap().contains("15551234"));
/// assert_eq!(PhoneRecord::NAME, "Phone");
/// ```
pub trait Record: Serialize + Sized {
    /// The name of this record type
    const NAME: &'static str;

    /// Convert record to JSON string
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Convert record to pretty-printed JSON string
    fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert record to NDJSON line (newline-delimited JSON)
    fn to_ndjson_line(&self) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!("{}\n", json))
    }
}

/// A travel document (passport, visa, alien card).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub issuance_country: Option<String>,
    pub issuance_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
}

impl DocumentRecord {
    /// A document is only attached to a passenger when both its type and
    /// number are non-blank.
    pub fn is_complete(&self) -> bool {
        !is_blank(self.document_type.as_deref()) && !is_blank(self.document_number.as_deref())
    }
}

impl Record for DocumentRecord {
    const NAME: &'static str = "Document";
}

/// One traveler reconstructed from a traveler group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub passenger_type: Option<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub age: Option<i32>,
    pub citizenship_country: Option<String>,
    pub traveler_reference_number: Option<String>,
    pub document: Option<DocumentRecord>,
}

impl Record for PassengerRecord {
    const NAME: &'static str = "Passenger";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address_type: Option<String>,
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl Record for AddressRecord {
    const NAME: &'static str = "Address";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub number: Option<String>,
}

impl Record for PhoneRecord {
    const NAME: &'static str = "Phone";
}

/// True when the value is absent, empty, or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}
