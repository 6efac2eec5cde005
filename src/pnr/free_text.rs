//! Positional field splitting for SSR free text.
//!
//! Free text such as `/P/GBR/123456789/GBR/12JUL64/M/23AUG19/SMITHJR/JONATHON`
//! is a `/`-separated list whose positions only gain meaning once a layout
//! has been chosen. Empty fields are kept so positions stay stable.

use std::fmt;

/// Separator between free-text fields
pub const FIELD_DELIMITER: char = '/';

/// Ordered, trimmed free-text fields with safe positional access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    fields: Vec<String>,
}

impl FieldList {
    /// Split a payload on `/`, trimming each field.
    ///
    /// # Example
    ///
    /// ```
    /// use pnrgov::pnr::FieldList;
    ///
    /// let fields = FieldList::parse("A/ B //D");
    /// assert_eq!(fields.as_slice(), &["A", "B", "", "D"]);
    /// ```
    pub fn parse(payload: &str) -> Self {
        let fields = payload
            .split(FIELD_DELIMITER)
            .map(|s| s.trim().to_string())
            .collect();

        Self { fields }
    }

    /// Field at `index`, or `None` when the list is shorter.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|s| s.as_str())
    }

    /// True when the field is missing or empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index).map_or(true, str::is_empty)
    }

    pub fn is_present(&self, index: usize) -> bool {
        !self.is_empty_at(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join("/"))
    }
}

/// Split an optional payload. Absent payload yields `None`, distinct from an
/// empty list, so callers can short-circuit.
pub fn split_free_text(payload: Option<&str>) -> Option<FieldList> {
    payload.map(FieldList::parse)
}
