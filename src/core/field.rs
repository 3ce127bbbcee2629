//! Directory fields, typed field values and format validation

use crate::core::alumnus::Alumnus;
use crate::core::error::QueryError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// The directory fields a query can refer to by name
///
/// Each field maps to a typed extractor over [`Alumnus`]; there is no
/// string-keyed property access anywhere in the query path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryField {
    Name,
    Batch,
    Company,
    Location,
    Industry,
}

impl DirectoryField {
    /// Every directory field
    pub const ALL: [DirectoryField; 5] = [
        DirectoryField::Name,
        DirectoryField::Batch,
        DirectoryField::Company,
        DirectoryField::Location,
        DirectoryField::Industry,
    ];

    /// Fields that accept inclusion filters, in the order filter controls are shown
    pub const FILTERABLE: [DirectoryField; 4] = [
        DirectoryField::Batch,
        DirectoryField::Location,
        DirectoryField::Industry,
        DirectoryField::Company,
    ];

    /// Fields the free-text search looks at
    pub const SEARCHABLE: [DirectoryField; 4] = [
        DirectoryField::Name,
        DirectoryField::Company,
        DirectoryField::Batch,
        DirectoryField::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectoryField::Name => "name",
            DirectoryField::Batch => "batch",
            DirectoryField::Company => "company",
            DirectoryField::Location => "location",
            DirectoryField::Industry => "industry",
        }
    }

    pub fn is_filterable(&self) -> bool {
        Self::FILTERABLE.contains(self)
    }

    /// Extract this field's value from a record
    pub fn extract<'a>(&self, alumnus: &'a Alumnus) -> FieldValue<'a> {
        match self {
            DirectoryField::Name => FieldValue::Text(&alumnus.name),
            DirectoryField::Batch => FieldValue::Integer(i64::from(alumnus.batch)),
            DirectoryField::Company => FieldValue::Text(&alumnus.company),
            DirectoryField::Location => FieldValue::Text(&alumnus.location),
            DirectoryField::Industry => FieldValue::Text(&alumnus.industry),
        }
    }

    /// Parse a field name that is about to be used as a filter
    pub fn parse_filterable(name: &str) -> Result<Self, QueryError> {
        let field: DirectoryField = name.parse()?;
        if field.is_filterable() {
            Ok(field)
        } else {
            Err(QueryError::NotFilterable {
                field: name.to_string(),
            })
        }
    }
}

impl fmt::Display for DirectoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectoryField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownField {
                field: s.to_string(),
            })
    }
}

/// A borrowed, typed view of one field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
}

impl<'a> FieldValue<'a> {
    /// The value coerced to text, as filter values are compared
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Owned key with the same ascending order as [`FieldValue::compare`]
    pub fn sort_key(&self) -> SortKey {
        match *self {
            FieldValue::Integer(i) => SortKey::Integer(i),
            FieldValue::Text(s) => SortKey::Text(s.to_lowercase()),
        }
    }

    /// Case-insensitive containment of an already lower-cased needle
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.to_text().to_lowercase().contains(needle)
    }

    /// Ascending order: numbers numerically, text case-insensitively
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => compare_text(a, b),
            _ => compare_text(&self.to_text(), &other.to_text()),
        }
    }
}

/// Precomputed sort key; text is stored lower-cased
///
/// Keys from one field are always the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Integer(i64),
    Text(String),
}

/// Case-insensitive text ordering
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Field format validators for request payloads
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Url,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a string value against this format
    pub fn validate(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Url => Self::is_valid_url(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is a valid regex")
        });
        regex.is_match(email)
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| {
            Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is a valid regex")
        });
        regex.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheppard() -> Alumnus {
        Alumnus::new(
            2,
            "John Sheppard",
            2004,
            "Atlantis Expedition",
            "Pegasus Galaxy",
            "Exploration",
        )
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!("batch".parse::<DirectoryField>(), Ok(DirectoryField::Batch));
        assert_eq!(" Company ".parse::<DirectoryField>(), Ok(DirectoryField::Company));
        assert_eq!(
            "salary".parse::<DirectoryField>(),
            Err(QueryError::UnknownField {
                field: "salary".to_string()
            })
        );
    }

    #[test]
    fn test_name_is_not_filterable() {
        assert_eq!(
            DirectoryField::parse_filterable("name"),
            Err(QueryError::NotFilterable {
                field: "name".to_string()
            })
        );
        assert_eq!(
            DirectoryField::parse_filterable("industry"),
            Ok(DirectoryField::Industry)
        );
    }

    #[test]
    fn test_extract_typed_values() {
        let alumnus = sheppard();
        assert_eq!(
            DirectoryField::Batch.extract(&alumnus),
            FieldValue::Integer(2004)
        );
        assert_eq!(
            DirectoryField::Location.extract(&alumnus),
            FieldValue::Text("Pegasus Galaxy")
        );
        assert_eq!(DirectoryField::Batch.extract(&alumnus).to_text(), "2004");
    }

    #[test]
    fn test_numeric_compare_is_not_lexicographic() {
        let a = FieldValue::Integer(970);
        let b = FieldValue::Integer(2004);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_text_compare_ignores_case() {
        let a = FieldValue::Text("atlantis");
        let b = FieldValue::Text("Stargate");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(
            FieldValue::Text("DAKARA").compare(&FieldValue::Text("dakara")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_key_orders_like_compare() {
        let values = [
            FieldValue::Text("atlantis"),
            FieldValue::Text("Stargate"),
            FieldValue::Text("DAKARA"),
            FieldValue::Text("dakara"),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(a.sort_key().cmp(&b.sort_key()), a.compare(b));
            }
        }
        assert!(FieldValue::Integer(970).sort_key() < FieldValue::Integer(2004).sort_key());
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;

        assert!(format.validate("s.carter@sgc.mil"));
        assert!(format.validate("user.name+tag@example.co.uk"));
        assert!(!format.validate("invalid-email"));
        assert!(!format.validate("@example.com"));
    }

    #[test]
    fn test_url_validation() {
        let format = FieldFormat::Url;

        assert!(format.validate("https://placehold.co/600x300"));
        assert!(!format.validate("not a url"));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^[a-z0-9-]+$").unwrap());

        assert!(format.validate("research-grants"));
        assert!(!format.validate("Research Grants"));
    }
}
