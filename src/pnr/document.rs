//! Travel document (SSR DOCS) free-text layout resolution.
//!
//! The sending system does not say which optional leading fields it filled,
//! so the same DOCS payload comes in several positional layouts. The layout
//! is chosen from which fields are empty:
//!
//! ```text
//! Standard   /P/GBR/123456789/GBR/12JUL64/M/23AUG19/SMITHJR/JONATHON/ROBERT
//! Shifted    //P/USA/554416148/USA/06MAY02/F/27SEP21/ROBERTS/ELIZABETH/ANNE
//! BlankType  //USA/497994674//17MAR47/M/02NOV16/ELMORE/ERVINMR/DARIN
//! ```
//!
//! Payloads that fit none of them contribute no document data.

use chrono::{NaiveDate, Utc};

use crate::dates::{calculate_age, parse_document_date_at};
use crate::pnr::free_text::FieldList;
use crate::pnr::names::{default_normalizer, NameNormalizer, NormalizedName, RawName};
use crate::record::DocumentRecord;

/// Field positions for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutPositions {
    document_type: usize,
    issuance_country: usize,
    document_number: usize,
    citizenship_country: usize,
    dob: usize,
    gender: usize,
    expiration_date: usize,
    last_name: usize,
    first_name: usize,
    middle_name: usize,
}

impl LayoutPositions {
    const fn starting_at(document_type: usize) -> Self {
        Self {
            document_type,
            issuance_country: document_type + 1,
            document_number: document_type + 2,
            citizenship_country: document_type + 3,
            dob: document_type + 4,
            gender: document_type + 5,
            expiration_date: document_type + 6,
            last_name: document_type + 7,
            first_name: document_type + 8,
            middle_name: document_type + 9,
        }
    }
}

/// Known DOCS free-text layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout {
    /// Document type present at field 1, or fields 1 and 2 both empty.
    Standard,
    /// Field 1 empty, fields 2 and 4 present: everything shifted right by one.
    Shifted,
    /// Fields 1 and 4 empty: standard positions with a blank type.
    BlankType,
}

impl DocumentLayout {
    /// Pick the layout for a field list.
    ///
    /// A missing field counts as empty, so the rules cover every emptiness
    /// pattern of fields 1, 2 and 4. Payloads that fit no real-world layout
    /// (several blank leading fields) land in `Standard` with a blank type and
    /// yield an incomplete document, which is never attached.
    pub fn detect(fields: &FieldList) -> Self {
        match (fields.is_present(1), fields.is_present(2), fields.is_present(4)) {
            (true, _, _) | (false, false, _) => DocumentLayout::Standard,
            (false, true, true) => DocumentLayout::Shifted,
            (false, true, false) => DocumentLayout::BlankType,
        }
    }

    fn positions(self) -> LayoutPositions {
        match self {
            DocumentLayout::Standard | DocumentLayout::BlankType => LayoutPositions::starting_at(1),
            DocumentLayout::Shifted => LayoutPositions::starting_at(2),
        }
    }

    /// Citizenship country of a field list under this layout, if present.
    pub fn citizenship_country(self, fields: &FieldList) -> Option<String> {
        non_empty(fields, self.positions().citizenship_country)
    }
}

/// Everything one DOCS payload contributes to a passenger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub document: DocumentRecord,
    pub citizenship_country: Option<String>,
    pub dob: Option<NaiveDate>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub name: NormalizedName,
}

/// Resolves DOCS field lists into document and passenger fields.
#[derive(Debug, Clone, Copy)]
pub struct DocumentResolver<'a> {
    normalizer: &'a NameNormalizer,
    today: NaiveDate,
}

impl Default for DocumentResolver<'static> {
    fn default() -> Self {
        Self::new(default_normalizer())
    }
}

impl<'a> DocumentResolver<'a> {
    pub fn new(normalizer: &'a NameNormalizer) -> Self {
        Self {
            normalizer,
            today: Utc::now().date_naive(),
        }
    }

    /// Fix the reference date used to derive age.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn normalizer(&self) -> &'a NameNormalizer {
        self.normalizer
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve a field list.
    ///
    /// Unparseable dates are left unset.
    pub fn resolve(&self, fields: &FieldList) -> ResolvedDocument {
        let layout = DocumentLayout::detect(fields);
        tracing::debug!("DOCS layout {:?} for '{}'", layout, fields);

        let pos = layout.positions();

        let dob = parse_date_field(fields, pos.dob, self.today, "date of birth");
        let age = dob.map(|d| calculate_age(d, self.today));
        let gender = non_empty(fields, pos.gender);

        let document = DocumentRecord {
            document_type: non_empty(fields, pos.document_type),
            document_number: non_empty(fields, pos.document_number),
            issuance_country: non_empty(fields, pos.issuance_country),
            issuance_date: None,
            expiration_date: parse_date_field(fields, pos.expiration_date, self.today, "expiration date"),
        };

        let name = self.normalizer.normalize(RawName {
            last: fields.get(pos.last_name),
            first: fields.get(pos.first_name),
            middle: fields.get(pos.middle_name),
            gender: gender.as_deref(),
        });

        ResolvedDocument {
            document,
            citizenship_country: non_empty(fields, pos.citizenship_country),
            dob,
            age,
            gender,
            name,
        }
    }

    /// Resolve raw DOCS free text.
    pub fn resolve_free_text(&self, free_text: &str) -> ResolvedDocument {
        self.resolve(&FieldList::parse(free_text))
    }
}

/// Field value, or `None` when missing or empty.
pub(crate) fn non_empty(fields: &FieldList, index: usize) -> Option<String> {
    fields.get(index).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse a `ddMMMyy` field; a malformed value is logged and left unset.
pub(crate) fn parse_date_field(
    fields: &FieldList,
    index: usize,
    today: NaiveDate,
    what: &str,
) -> Option<NaiveDate> {
    let value = fields.get(index).filter(|s| !s.is_empty())?;
    match parse_document_date_at(value, today) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Leaving {} unset: {}", what, e);
            None
        }
    }
}
