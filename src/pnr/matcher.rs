//! Linking secondary segments back to an already-built passenger.
//!
//! Baggage, contact and loyalty segments reference a traveler through a TIF.
//! The match is by exact surname and given name; when nothing matches the
//! first passenger is used so the data stays associated with the PNR.

use crate::edifact::Tif;
use crate::record::PassengerRecord;

/// Find the passenger a TIF refers to.
///
/// # Returns
/// * The first passenger whose last and first names equal the TIF's surname
///   and first given name (case-sensitive)
/// * Otherwise the first passenger in the list
/// * `None` only when `passengers` is empty
pub fn match_traveler<'p>(tif: Option<&Tif>, passengers: &'p [PassengerRecord]) -> Option<&'p PassengerRecord> {
    let fallback = passengers.first()?;

    let Some(tif) = tif else {
        return Some(fallback);
    };
    let (Some(surname), Some(given_name)) = (
        tif.surname.as_deref(),
        tif.first_traveler().and_then(|t| t.given_name.as_deref()),
    ) else {
        return Some(fallback);
    };

    let matched = passengers.iter().find(|p| {
        p.last_name.as_deref() == Some(surname) && p.first_name.as_deref() == Some(given_name)
    });

    if matched.is_none() {
        tracing::debug!(
            "No passenger named {}/{}, using first passenger",
            surname,
            given_name
        );
    }

    Some(matched.unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(last: &str, first: &str, reference: &str) -> PassengerRecord {
        PassengerRecord {
            last_name: Some(last.to_string()),
            first_name: Some(first.to_string()),
            traveler_reference_number: Some(reference.to_string()),
            ..Default::default()
        }
    }

    fn passengers() -> Vec<PassengerRecord> {
        vec![
            passenger("SMITH", "JOHN", "1"),
            passenger("JONES", "MARY", "2"),
            passenger("JONES", "MARY", "3"),
        ]
    }

    #[test]
    fn test_exact_match_returns_first_hit() {
        let list = passengers();
        let tif = Tif::single("JONES", "MARY", "X");

        let found = match_traveler(Some(&tif), &list).unwrap();
        assert_eq!(found.traveler_reference_number.as_deref(), Some("2"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let list = passengers();
        let tif = Tif::single("Jones", "Mary", "X");

        let found = match_traveler(Some(&tif), &list).unwrap();
        assert_eq!(found.traveler_reference_number.as_deref(), Some("1"));
    }

    #[test]
    fn test_falls_back_to_first_passenger() {
        let list = passengers();

        let tif = Tif::single("BROWN", "ANN", "X");
        let found = match_traveler(Some(&tif), &list).unwrap();
        assert_eq!(found.traveler_reference_number.as_deref(), Some("1"));

        let found = match_traveler(None, &list).unwrap();
        assert_eq!(found.traveler_reference_number.as_deref(), Some("1"));

        let found = match_traveler(Some(&Tif::default()), &list).unwrap();
        assert_eq!(found.traveler_reference_number.as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_list() {
        let tif = Tif::single("SMITH", "JOHN", "1");
        assert!(match_traveler(Some(&tif), &[]).is_none());
    }
}
