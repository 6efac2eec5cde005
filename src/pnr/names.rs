//! Passenger name normalization.
//!
//! Reservation systems glue honorifics onto given names (`ERVINMR`,
//! `MRJOHN`) and generational suffixes onto surnames (`SMITHJR`). The
//! normalizer strips them using ordered lookup tables: the first entry that
//! matches wins, except that an `MR` match on a female-flagged record is
//! rejected and the scan moves on.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Honorific that is rejected for female passengers
const MALE_HONORIFIC: &str = "MR";
const FEMALE_GENDER: &str = "F";

/// Ordered lookup tables used by [`NameNormalizer`].
///
/// # Example YAML
///
/// ```yaml
/// honorifics: [MR, MRS, MS, DR]
/// suffixes: [JR, SR, III]
/// duplicate_marker: "-1"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameTables {
    /// Titles matched as a prefix or suffix of the given name, in precedence order
    pub honorifics: Vec<String>,

    /// Generational suffixes matched at the end of the surname, in precedence order
    pub suffixes: Vec<String>,

    /// Marker after which a name field is truncated
    pub duplicate_marker: String,
}

impl Default for NameTables {
    fn default() -> Self {
        Self {
            honorifics: [
                "MR", "MRS", "MS", "DR", "MISS", "SIR", "MADAM", "MAYOR", "PRESIDENT",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            suffixes: ["JR", "SR"].iter().map(|s| s.to_string()).collect(),
            duplicate_marker: "-1".to_string(),
        }
    }
}

impl NameTables {
    /// Load tables from a YAML file. Missing keys fall back to the defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid YAML, or
    /// contains an empty table entry.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let tables: NameTables = serde_yaml::from_str(yaml)?;
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.honorifics.iter().any(|h| h.is_empty()) {
            return Err(ConfigError::Invalid("honorifics contain an empty entry".to_string()));
        }
        if self.suffixes.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Invalid("suffixes contain an empty entry".to_string()));
        }
        if self.duplicate_marker.is_empty() {
            return Err(ConfigError::Invalid("duplicate_marker is empty".to_string()));
        }
        Ok(())
    }
}

/// Raw name fields as they appear in a segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawName<'a> {
    pub last: Option<&'a str>,
    pub first: Option<&'a str>,
    pub middle: Option<&'a str>,
    pub gender: Option<&'a str>,
}

/// Name fields after title and suffix extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedName {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
}

/// Outcome of testing one honorific against a given name.
#[derive(Debug, PartialEq, Eq)]
enum HonorificMatch {
    /// Honorific found; carries the remaining given name
    Accept(String),
    /// Honorific found but ruled out by gender
    Reject,
    NoMatch,
}

/// Strips honorifics and suffixes using immutable lookup tables.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    tables: NameTables,
}

impl NameNormalizer {
    pub fn new(tables: NameTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &NameTables {
        &self.tables
    }

    /// Normalize raw name fields.
    ///
    /// Fields default to the raw input when no rule fires. Any field holding
    /// the duplicate marker is truncated at its first occurrence. Stacked
    /// tokens (`DRMRJOHN`, `SMITHJRJR`) are stripped one per pass until no
    /// rule fires; the outermost title and suffix are reported.
    ///
    /// # Example
    ///
    /// ```
    /// use pnrgov::pnr::{NameNormalizer, RawName};
    ///
    /// let name = NameNormalizer::default().normalize(RawName {
    ///     last: Some("ELMORE"),
    ///     first: Some("ERVINMR"),
    ///     middle: Some("DARIN"),
    ///     gender: Some("M"),
    /// });
    ///
    /// assert_eq!(name.title.as_deref(), Some("MR"));
    /// assert_eq!(name.first_name.as_deref(), Some("ERVIN"));
    /// ```
    pub fn normalize(&self, raw: RawName<'_>) -> NormalizedName {
        let mut name = NormalizedName {
            first_name: raw.first.map(str::to_string),
            middle_name: raw.middle.map(str::to_string),
            last_name: raw.last.map(str::to_string),
            ..Default::default()
        };

        // Every rule that fires shortens a field, so this terminates.
        loop {
            let mut changed = false;

            let stripped = name
                .first_name
                .as_deref()
                .and_then(|first| self.strip_honorific(first, raw.gender));
            if let Some((honorific, remainder)) = stripped {
                name.title = name.title.or(Some(honorific));
                name.first_name = Some(remainder);
                changed = true;
            }

            let stripped = name.last_name.as_deref().and_then(|last| self.strip_suffix(last));
            if let Some((suffix, remainder)) = stripped {
                name.suffix = name.suffix.or(Some(suffix));
                name.last_name = Some(remainder);
                changed = true;
            }

            for field in [&mut name.first_name, &mut name.middle_name, &mut name.last_name] {
                let truncated = field.as_deref().and_then(|v| self.truncate_at_marker(v));
                if let Some(value) = truncated {
                    *field = Some(value);
                    changed = true;
                }
            }

            if !changed {
                return name;
            }
        }
    }

    /// First honorific in table order that is accepted for this gender.
    fn strip_honorific(&self, first: &str, gender: Option<&str>) -> Option<(String, String)> {
        for honorific in &self.tables.honorifics {
            match self.match_honorific(honorific, first, gender) {
                HonorificMatch::Accept(remainder) => return Some((honorific.clone(), remainder)),
                HonorificMatch::Reject => {
                    tracing::debug!(
                        "Rejected honorific {} on '{}' for female passenger",
                        honorific,
                        first
                    );
                    continue;
                }
                HonorificMatch::NoMatch => continue,
            }
        }
        None
    }

    fn strip_suffix(&self, last: &str) -> Option<(String, String)> {
        let suffix = self
            .tables
            .suffixes
            .iter()
            .find(|s| !s.is_empty() && last.ends_with(s.as_str()))?;

        let remainder = last[..last.len() - suffix.len()].trim().to_string();
        Some((suffix.clone(), remainder))
    }

    fn match_honorific(&self, honorific: &str, first: &str, gender: Option<&str>) -> HonorificMatch {
        if honorific.is_empty() {
            return HonorificMatch::NoMatch;
        }

        let remainder = if let Some(rest) = first.strip_prefix(honorific) {
            rest.trim()
        } else if let Some(rest) = first.strip_suffix(honorific) {
            rest.trim()
        } else {
            return HonorificMatch::NoMatch;
        };

        let is_female = gender.map_or(false, |g| g.eq_ignore_ascii_case(FEMALE_GENDER));
        if is_female && honorific.eq_ignore_ascii_case(MALE_HONORIFIC) {
            HonorificMatch::Reject
        } else {
            HonorificMatch::Accept(remainder.to_string())
        }
    }

    /// Name cut before the duplicate marker, or `None` when there is none.
    fn truncate_at_marker(&self, value: &str) -> Option<String> {
        let marker = self.tables.duplicate_marker.as_str();
        if marker.is_empty() {
            return None;
        }
        value.find(marker).map(|idx| value[..idx].to_string())
    }

    /// Truncate a name at the first duplicate marker (`-1`), if any.
    pub fn strip_duplicate_marker(&self, value: &str) -> String {
        self.truncate_at_marker(value)
            .unwrap_or_else(|| value.to_string())
    }
}

static DEFAULT_NORMALIZER: OnceLock<NameNormalizer> = OnceLock::new();

/// Process-wide normalizer built from the default tables.
pub fn default_normalizer() -> &'static NameNormalizer {
    DEFAULT_NORMALIZER.get_or_init(NameNormalizer::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(last: &str, first: &str, middle: Option<&str>, gender: &str) -> NormalizedName {
        NameNormalizer::default().normalize(RawName {
            last: Some(last),
            first: Some(first),
            middle,
            gender: Some(gender),
        })
    }

    #[test]
    fn test_honorific_as_suffix() {
        let name = normalize("ELMORE", "ERVINMR", Some("DARIN"), "M");

        assert_eq!(name.title.as_deref(), Some("MR"));
        assert_eq!(name.first_name.as_deref(), Some("ERVIN"));
        assert_eq!(name.last_name.as_deref(), Some("ELMORE"));
        assert_eq!(name.middle_name.as_deref(), Some("DARIN"));
        assert_eq!(name.suffix, None);
    }

    #[test]
    fn test_honorific_as_prefix_is_trimmed() {
        let name = normalize("SMITH", "DR JANE", None, "F");

        assert_eq!(name.title.as_deref(), Some("DR"));
        assert_eq!(name.first_name.as_deref(), Some("JANE"));
    }

    #[test]
    fn test_generational_suffix() {
        let name = normalize("SMITHJR", "JONATHON", Some("ROBERT"), "M");

        assert_eq!(name.suffix.as_deref(), Some("JR"));
        assert_eq!(name.last_name.as_deref(), Some("SMITH"));
        assert_eq!(name.title, None);
    }

    #[test]
    fn test_female_rejects_mr_and_continues() {
        let name = normalize("JONES", "MRJONES", None, "F");
        assert_eq!(name.title, None);
        assert_eq!(name.first_name.as_deref(), Some("MRJONES"));

        let name = normalize("JONES", "MRJONES", None, "f");
        assert_eq!(name.title, None);

        let name = normalize("SMITH", "MRSANNA", None, "F");
        assert_eq!(name.title.as_deref(), Some("MRS"));
        assert_eq!(name.first_name.as_deref(), Some("ANNA"));
    }

    #[test]
    fn test_mr_wins_by_table_order_for_male() {
        let name = normalize("JONES", "MRJONES", None, "M");
        assert_eq!(name.title.as_deref(), Some("MR"));
        assert_eq!(name.first_name.as_deref(), Some("JONES"));

        let name = normalize("SMITH", "MRSANNA", None, "M");
        assert_eq!(name.title.as_deref(), Some("MR"));
        assert_eq!(name.first_name.as_deref(), Some("SANNA"));
    }

    #[test]
    fn test_duplicate_marker_truncation() {
        let name = normalize("ROBERTS", "ELIZABETH-1ROBERTS", Some("ANNE-1"), "F");

        assert_eq!(name.first_name.as_deref(), Some("ELIZABETH"));
        assert_eq!(name.middle_name.as_deref(), Some("ANNE"));
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let name = NameNormalizer::default().normalize(RawName::default());
        assert_eq!(name, NormalizedName::default());
    }

    fn renormalize(name: &NormalizedName, gender: &str) -> NormalizedName {
        default_normalizer().normalize(RawName {
            last: name.last_name.as_deref(),
            first: name.first_name.as_deref(),
            middle: name.middle_name.as_deref(),
            gender: Some(gender),
        })
    }

    #[test]
    fn test_stacked_tokens_are_fully_stripped() {
        let name = normalize("SMITHJRJR", "DRMRJOHN", None, "M");

        assert_eq!(name.title.as_deref(), Some("DR"));
        assert_eq!(name.first_name.as_deref(), Some("JOHN"));
        assert_eq!(name.suffix.as_deref(), Some("JR"));
        assert_eq!(name.last_name.as_deref(), Some("SMITH"));
    }

    #[test]
    fn test_marker_exposing_honorific_is_stripped() {
        let name = normalize("JONES", "JOHNMR-1X", None, "M");

        assert_eq!(name.title.as_deref(), Some("MR"));
        assert_eq!(name.first_name.as_deref(), Some("JOHN"));
    }

    #[test]
    fn test_normalizing_output_again_is_a_no_op() {
        let inputs = [
            ("SMITHJRJR", "DRMRJOHN", Some("ROBERT-1"), "M"),
            ("SMITHJR", "JONATHONMR", Some("ROBERT"), "M"),
            ("JONES", "MRJONES", None, "F"),
            ("ROBERTS", "ELIZABETH-1ROBERTS", Some("ANNE"), "F"),
            ("JONES", "JOHNMR-1X", None, "M"),
        ];

        for (last, first, middle, gender) in inputs {
            let once = normalize(last, first, middle, gender);
            let twice = renormalize(&once, gender);

            assert_eq!(twice.first_name, once.first_name, "first name of {}", first);
            assert_eq!(twice.middle_name, once.middle_name, "middle name of {}", first);
            assert_eq!(twice.last_name, once.last_name, "last name of {}", last);
            assert_eq!(twice.title, None);
            assert_eq!(twice.suffix, None);
        }
    }

    #[test]
    fn test_same_input_same_output() {
        let raw = RawName {
            last: Some("SMITHJR"),
            first: Some("JONATHONMR"),
            middle: Some("ROBERT"),
            gender: Some("M"),
        };
        assert_eq!(default_normalizer().normalize(raw), default_normalizer().normalize(raw));
    }

    #[test]
    fn test_tables_from_yaml() {
        let tables = NameTables::from_yaml_str("suffixes: [JR, SR, III]\n").unwrap();

        assert_eq!(tables.suffixes, vec!["JR", "SR", "III"]);
        assert_eq!(tables.honorifics, NameTables::default().honorifics);

        let name = NameNormalizer::new(tables).normalize(RawName {
            last: Some("GATESIII"),
            ..Default::default()
        });
        assert_eq!(name.suffix.as_deref(), Some("III"));
        assert_eq!(name.last_name.as_deref(), Some("GATES"));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let tables = NameTables::from_yaml_str(include_str!("../../config/names.yaml")).unwrap();
        assert_eq!(tables, NameTables::default());
    }

    #[test]
    fn test_tables_reject_empty_entries() {
        let result = NameTables::from_yaml_str("honorifics: [MR, \"\"]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
