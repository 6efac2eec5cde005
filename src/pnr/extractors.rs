//! Standalone free-text extractors: visas, addresses, phones, loyalty numbers
//! and bag tags.

use chrono::Utc;

use crate::edifact::{Add, Ssr};
use crate::pnr::document::{non_empty, parse_date_field};
use crate::pnr::free_text::{split_free_text, FIELD_DELIMITER};
use crate::record::{is_blank, AddressRecord, DocumentRecord, PhoneRecord};

/// Marker preceding the number in an LTS phone element
const LTS_PHONE_MARKER: &str = "APM";

/// Visa from SSR DOCO free text.
///
/// Field 1 (place of birth) and field 4 (city of issue) are not kept.
///
/// ```text
/// /LONDON GBR/V/12345678/WASHINGTON/12FEB17/USA
/// ```
pub fn create_visa(ssr: &Ssr) -> Option<DocumentRecord> {
    let fields = split_free_text(ssr.free_text())?;
    let today = Utc::now().date_naive();

    Some(DocumentRecord {
        document_type: non_empty(&fields, 2),
        document_number: non_empty(&fields, 3),
        issuance_date: parse_date_field(&fields, 5, today, "visa issuance date"),
        issuance_country: non_empty(&fields, 6),
        expiration_date: None,
    })
}

/// Address from SSR DOCA free text.
///
/// ```text
/// /D/AUS/13 SHORE AVENUE/BROADBEACH/QLD/4215
/// ```
pub fn address_from_ssr(ssr: &Ssr) -> Option<AddressRecord> {
    let fields = split_free_text(ssr.free_text())?;

    Some(AddressRecord {
        country: non_empty(&fields, 2),
        line1: non_empty(&fields, 3),
        city: non_empty(&fields, 4),
        state: non_empty(&fields, 5),
        postal_code: non_empty(&fields, 6),
        ..Default::default()
    })
}

/// Address from an ADD segment.
pub fn address_from_add(add: &Add) -> AddressRecord {
    AddressRecord {
        address_type: add.address_type.clone(),
        line1: add.street_number_and_name.clone(),
        city: add.city.clone(),
        state: add.state_or_province_code.clone(),
        country: add.country_code.clone(),
        postal_code: add.postal_code.clone(),
        phone_number: add.telephone.as_deref().and_then(prep_telephone_number),
        email: add.email.clone(),
    }
}

pub fn create_phone(number: &str) -> PhoneRecord {
    PhoneRecord {
        number: prep_telephone_number(number),
    }
}

/// Keep only the digits of a phone number; blank input gives `None`.
pub fn prep_telephone_number(number: &str) -> Option<String> {
    if number.trim().is_empty() {
        return None;
    }
    Some(number.chars().filter(|c| c.is_ascii_digit()).collect())
}

/// Phone number from an LTS element such as `APM 15551234/H`.
///
/// Whitespace is removed, everything up to `APM` dropped, and the rest cut
/// at a `/` past the first character.
pub fn phone_from_lts(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let after_marker = match compact.find(LTS_PHONE_MARKER) {
        Some(idx) => &compact[idx + LTS_PHONE_MARKER.len()..],
        None => compact.as_str(),
    };

    match after_marker.find(FIELD_DELIMITER) {
        Some(idx) if idx > 0 => after_marker[..idx].to_string(),
        _ => after_marker.to_string(),
    }
}

/// Text before the `-` of the last `/`-separated token that contains one
/// past its first character.
fn last_hyphenated_prefix(free_text: &str) -> Option<String> {
    free_text
        .split(FIELD_DELIMITER)
        .map(str::trim)
        .filter_map(|token| match token.find('-') {
            Some(idx) if idx > 0 => Some(token[..idx].to_string()),
            _ => None,
        })
        .last()
}

/// Frequent flyer number from SSR FQTV free text, e.g. `/UA 123456789-1`.
pub fn frequent_flyer_from_free_text(free_text: &str) -> Option<String> {
    last_hyphenated_prefix(free_text)
}

/// Phone number from SSR CTCM free text, e.g. `/15551234567-EN`.
pub fn phone_from_free_text(free_text: &str) -> Option<String> {
    last_hyphenated_prefix(free_text)
}

/// Bag tag id for the `counter`-th bag of a tag element.
///
/// Numeric tags are incremented by `counter`; anything else, including a
/// number too large to increment, has the counter appended. A blank tag
/// gives `"0"`.
pub fn bag_tag_from_element(tag_number: &str, counter: i64) -> String {
    if is_blank(Some(tag_number)) {
        return "0".to_string();
    }

    let tag: String = tag_number.chars().filter(|c| !c.is_whitespace()).collect();
    match tag.parse::<i64>().ok().and_then(|value| value.checked_add(counter)) {
        Some(value) => value.to_string(),
        None => format!("{}{}", tag, counter),
    }
}
