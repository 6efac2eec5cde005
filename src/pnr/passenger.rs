//! Passenger assembly for one traveler group.
//!
//! Group 2 of a PNR opens with a `TIF` segment and may carry several SSR
//! DOCS segments for the same traveler: a passport plus an alien card, or a
//! line split because it ran past the 69 character limit. The longest DOCS
//! payload supplies most of the passenger; the others only backfill a
//! missing citizenship. The TIF supplies the traveler reference number and
//! fills names the DOCS payload left blank.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::edifact::{Ssr, Tif};
use crate::pnr::document::{DocumentLayout, DocumentResolver};
use crate::pnr::free_text::split_free_text;
use crate::pnr::names::{NameNormalizer, RawName};
use crate::record::{is_blank, DocumentRecord, PassengerRecord};

/// Passenger type assigned to every record built from DOCS data
pub const PASSENGER_TYPE: &str = "P";

/// The segments describing one traveler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelerGroup {
    pub tif: Tif,
    pub docs: Vec<Ssr>,
}

/// Builds passenger records from traveler groups.
#[derive(Debug, Clone, Copy)]
pub struct PassengerBuilder<'a> {
    resolver: DocumentResolver<'a>,
}

impl Default for PassengerBuilder<'static> {
    fn default() -> Self {
        Self {
            resolver: DocumentResolver::default(),
        }
    }
}

impl<'a> PassengerBuilder<'a> {
    pub fn new(normalizer: &'a NameNormalizer) -> Self {
        Self {
            resolver: DocumentResolver::new(normalizer),
        }
    }

    /// Fix the reference date used to derive age.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.resolver = self.resolver.with_today(today);
        self
    }

    /// Build the passenger for one traveler group.
    ///
    /// # Arguments
    /// * `docs` - SSR DOCS segments of the group, in message order
    /// * `tif` - The group's traveler information segment
    ///
    /// # Returns
    /// * `Some(passenger)` - Built from the DOCS data and/or the TIF
    /// * `None` - No DOCS segment carries free text and the TIF has no traveler
    pub fn build(&self, docs: &[Ssr], tif: &Tif) -> Option<PassengerRecord> {
        let best = select_best_segment(docs);
        if best.is_none() && tif.details.is_empty() {
            tracing::debug!("Traveler group has neither DOCS free text nor TIF details");
            return None;
        }

        let mut passenger = PassengerRecord {
            passenger_type: Some(PASSENGER_TYPE.to_string()),
            ..Default::default()
        };
        let mut document = DocumentRecord::default();

        let resolved = best
            .and_then(|ssr| split_free_text(ssr.free_text()))
            .map(|fields| self.resolver.resolve(&fields));

        if let Some(resolved) = resolved {
            passenger.citizenship_country = resolved.citizenship_country;
            passenger.dob = resolved.dob;
            passenger.age = resolved.age;
            passenger.gender = resolved.gender;
            passenger.title = resolved.name.title;
            passenger.first_name = resolved.name.first_name;
            passenger.middle_name = resolved.name.middle_name;
            passenger.last_name = resolved.name.last_name;
            passenger.suffix = resolved.name.suffix;
            document = resolved.document;
        }

        backfill_citizenship(&mut passenger, docs);

        if document.is_complete() {
            if is_blank(passenger.citizenship_country.as_deref()) {
                passenger.citizenship_country = document.issuance_country.clone();
            }
            passenger.document = Some(document);
        } else if best.is_some() {
            tracing::warn!(
                "Discarding incomplete document (type {:?}, number {:?})",
                document.document_type,
                document.document_number
            );
        }

        self.merge_traveler_info(&mut passenger, tif);

        let normalizer = self.resolver.normalizer();
        passenger.first_name = passenger.first_name.map(|s| normalizer.strip_duplicate_marker(&s));
        passenger.middle_name = passenger.middle_name.map(|s| normalizer.strip_duplicate_marker(&s));
        passenger.last_name = passenger.last_name.map(|s| normalizer.strip_duplicate_marker(&s));

        Some(passenger)
    }

    /// Build one record per group, skipping groups that yield none.
    pub fn build_all(&self, groups: &[TravelerGroup]) -> Vec<PassengerRecord> {
        groups
            .iter()
            .filter_map(|group| self.build(&group.docs, &group.tif))
            .collect()
    }

    /// Fold the TIF's reference number and names into the passenger.
    ///
    /// DOCS names take priority: TIF names only fill blanks. The reference
    /// number is always taken from the TIF.
    fn merge_traveler_info(&self, passenger: &mut PassengerRecord, tif: &Tif) {
        let Some(traveler) = tif.first_traveler() else {
            return;
        };

        passenger.traveler_reference_number = traveler.reference_number.clone();

        let name = self.resolver.normalizer().normalize(RawName {
            last: tif.surname.as_deref(),
            first: traveler.given_name.as_deref(),
            middle: None,
            gender: passenger.gender.as_deref(),
        });

        if !is_blank(tif.surname.as_deref()) && is_blank(passenger.last_name.as_deref()) {
            passenger.last_name = name.last_name;
        }
        if !is_blank(traveler.given_name.as_deref()) && is_blank(passenger.first_name.as_deref()) {
            passenger.first_name = name.first_name;
        }
        if name.title.is_some() {
            passenger.title = name.title;
        }
        if name.suffix.is_some() {
            passenger.suffix = name.suffix;
        }
    }
}

/// The DOCS segment with the longest free text; ties go to the earliest.
pub fn select_best_segment(docs: &[Ssr]) -> Option<&Ssr> {
    let mut best: Option<(&Ssr, usize)> = None;
    for ssr in docs {
        let Some(text) = ssr.free_text() else {
            continue;
        };
        let len = text.chars().count();
        if best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((ssr, len));
        }
    }
    best.map(|(ssr, _)| ssr)
}

/// Fill a blank citizenship from the first DOCS segment that carries one.
fn backfill_citizenship(passenger: &mut PassengerRecord, docs: &[Ssr]) {
    if !is_blank(passenger.citizenship_country.as_deref()) {
        return;
    }

    let found = docs
        .iter()
        .filter_map(|ssr| split_free_text(ssr.free_text()))
        .find_map(|fields| DocumentLayout::detect(&fields).citizenship_country(&fields));

    if let Some(country) = found {
        tracing::debug!("Backfilled citizenship {} from secondary DOCS", country);
        passenger.citizenship_country = Some(country);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edifact::TravelerDetails;
    use crate::pnr::names::default_normalizer;

    fn builder() -> PassengerBuilder<'static> {
        PassengerBuilder::new(default_normalizer())
            .with_today(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn tif(surname: &str, given: &str, reference: &str) -> Tif {
        Tif::single(surname, given, reference)
    }

    #[test]
    fn test_build_from_standard_docs() {
        let docs = vec![Ssr::docs(
            "/P/GBR/123456789/GBR/12JUL64/M/23AUG19/SMITHJR/JONATHON/ROBERT",
        )];
        let p = builder().build(&docs, &tif("SMITH", "JONATHON", "1.1")).unwrap();

        assert_eq!(p.passenger_type.as_deref(), Some("P"));
        assert_eq!(p.last_name.as_deref(), Some("SMITH"));
        assert_eq!(p.suffix.as_deref(), Some("JR"));
        assert_eq!(p.first_name.as_deref(), Some("JONATHON"));
        assert_eq!(p.middle_name.as_deref(), Some("ROBERT"));
        assert_eq!(p.citizenship_country.as_deref(), Some("GBR"));
        assert_eq!(p.age, Some(62));
        assert_eq!(p.traveler_reference_number.as_deref(), Some("1.1"));

        let doc = p.document.unwrap();
        assert_eq!(doc.document_type.as_deref(), Some("P"));
        assert_eq!(doc.document_number.as_deref(), Some("123456789"));
    }

    #[test]
    fn test_longest_free_text_wins_regardless_of_order() {
        let short = Ssr::docs("/P/USA/1/USA");
        let long = Ssr::docs("/P/GBR/123456789/GBR/12JUL64/M/23AUG19/SMITH/JOHN");
        let no_text = Ssr::new("DOCS", None);

        let docs = [short.clone(), no_text.clone(), long.clone()];
        assert_eq!(select_best_segment(&docs), Some(&long));

        let docs = [long.clone(), short.clone()];
        assert_eq!(select_best_segment(&docs), Some(&long));

        assert_eq!(select_best_segment(&[no_text]), None);
    }

    #[test]
    fn test_ties_go_to_first_segment() {
        let a = Ssr::docs("/P/GBR/111");
        let b = Ssr::docs("/P/USA/222");
        let docs = [a.clone(), b];

        assert_eq!(select_best_segment(&docs), Some(&a));
    }

    #[test]
    fn test_citizenship_backfilled_from_secondary_docs() {
        let docs = vec![
            Ssr::docs("/P/USA/554416148//06MAY02/F/27SEP21/ROBERTS/ELIZABETH/ANNE"),
            Ssr::docs("/A/USA/X1234/MEX"),
        ];
        let p = builder().build(&docs, &tif("ROBERTS", "ELIZABETH", "2")).unwrap();

        assert_eq!(p.citizenship_country.as_deref(), Some("MEX"));
        assert_eq!(p.document.unwrap().document_number.as_deref(), Some("554416148"));
    }

    #[test]
    fn test_citizenship_defaults_to_issuing_country() {
        let docs = vec![Ssr::docs("/P/CAN/AB123456//01JAN80/M")];
        let p = builder().build(&docs, &Tif::default()).unwrap();

        assert_eq!(p.citizenship_country.as_deref(), Some("CAN"));
        assert!(p.document.is_some());
    }

    #[test]
    fn test_incomplete_document_not_attached() {
        let docs = vec![Ssr::docs("/////05MAY02/F//ROBERTS/ELIZABETH-1ROBERTS/ELIZABETH")];
        let p = builder().build(&docs, &tif("ROBERTS", "ELIZABETH", "3")).unwrap();

        assert!(p.document.is_none());
        assert_eq!(p.citizenship_country, None);
        assert_eq!(p.first_name.as_deref(), Some("ELIZABETH"));
        assert_eq!(p.dob, NaiveDate::from_ymd_opt(2002, 5, 5));
    }

    #[test]
    fn test_docs_names_take_priority_over_tif() {
        let docs = vec![Ssr::docs("/P/GBR/123/GBR/12JUL64/M/23AUG19/SMITH/JOHN")];
        let p = builder().build(&docs, &tif("SMYTHE", "JON", "1")).unwrap();

        assert_eq!(p.last_name.as_deref(), Some("SMITH"));
        assert_eq!(p.first_name.as_deref(), Some("JOHN"));
    }

    #[test]
    fn test_tif_fills_blank_names_and_title() {
        let docs = vec![Ssr::docs("/P/GBR/123/GBR/12JUL64/F/23AUG19")];
        let p = builder().build(&docs, &tif("WILLIAMS", "ANNMRS", "4")).unwrap();

        assert_eq!(p.last_name.as_deref(), Some("WILLIAMS"));
        assert_eq!(p.first_name.as_deref(), Some("ANN"));
        assert_eq!(p.title.as_deref(), Some("MRS"));
    }

    #[test]
    fn test_reference_attached_without_docs() {
        let p = builder().build(&[], &tif("DOE", "JANE", "7")).unwrap();

        assert_eq!(p.traveler_reference_number.as_deref(), Some("7"));
        assert_eq!(p.last_name.as_deref(), Some("DOE"));
        assert_eq!(p.first_name.as_deref(), Some("JANE"));
        assert!(p.document.is_none());
    }

    #[test]
    fn test_empty_group_builds_nothing() {
        assert_eq!(builder().build(&[], &Tif::default()), None);
        assert_eq!(builder().build(&[Ssr::new("DOCS", None)], &Tif::default()), None);
    }

    #[test]
    fn test_duplicate_marker_removed_from_tif_names() {
        let tif = Tif {
            surname: Some("ROBERTS-1".to_string()),
            details: vec![TravelerDetails {
                reference_number: Some("5".to_string()),
                given_name: Some("ELIZABETH-1ROBERTS".to_string()),
            }],
        };
        let p = builder().build(&[], &tif).unwrap();

        assert_eq!(p.last_name.as_deref(), Some("ROBERTS"));
        assert_eq!(p.first_name.as_deref(), Some("ELIZABETH"));
    }

    #[test]
    fn test_build_all_skips_empty_groups() {
        let groups = vec![
            TravelerGroup {
                tif: tif("SMITH", "JOHN", "1"),
                docs: vec![Ssr::docs("/P/GBR/123/GBR/12JUL64/M/23AUG19/SMITH/JOHN")],
            },
            TravelerGroup::default(),
            TravelerGroup {
                tif: tif("DOE", "JANE", "2"),
                docs: vec![],
            },
        ];

        let passengers = builder().build_all(&groups);
        assert_eq!(passengers.len(), 2);
        assert_eq!(passengers[1].traveler_reference_number.as_deref(), Some("2"));
    }
}
