//! Immutable alumni roster

use crate::core::engine::{self, FilterOptions};
use crate::core::error::RosterError;
use crate::core::query::{DirectoryQuery, SortSpec};
use crate::core::{Alumnus, QueryableStore};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// The full, read-only set of directory records
///
/// Cloning is cheap: records are shared behind an `Arc`. Filter options are
/// derived once, when the roster is built.
#[derive(Debug, Clone)]
pub struct Roster {
    records: Arc<[Alumnus]>,
    filter_options: Arc<FilterOptions>,
}

impl Roster {
    /// Build a roster, rejecting duplicate identifiers
    pub fn new(records: Vec<Alumnus>) -> Result<Self, RosterError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(RosterError::DuplicateId { id: record.id });
            }
        }

        let filter_options = FilterOptions::derive(&records);
        tracing::debug!(records = records.len(), "Roster built");

        Ok(Self {
            records: records.into(),
            filter_options: Arc::new(filter_options),
        })
    }

    /// An empty roster
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            filter_options: Arc::new(FilterOptions::derive(&[])),
        }
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self, RosterError> {
        let records: Vec<Alumnus> = serde_json::from_str(json).map_err(|e| RosterError::Parse {
            source_path: None,
            message: e.to_string(),
        })?;
        Self::new(records)
    }

    /// Parse a YAML sequence of records
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RosterError> {
        let records: Vec<Alumnus> = serde_yaml::from_str(yaml).map_err(|e| RosterError::Parse {
            source_path: None,
            message: e.to_string(),
        })?;
        Self::new(records)
    }

    /// Load a roster file; the extension picks the format
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, RosterError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => return Err(RosterError::UnsupportedFormat { path: shown }),
        };

        let content = std::fs::read_to_string(path).map_err(|e| RosterError::Io {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        let roster = parse(&content).map_err(|err| match err {
            RosterError::Parse { message, .. } => RosterError::Parse {
                source_path: Some(shown.clone()),
                message,
            },
            other => other,
        })?;

        tracing::info!(path = %shown, records = roster.len(), "Roster loaded");
        Ok(roster)
    }

    pub fn records(&self) -> &[Alumnus] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by identifier
    pub fn get(&self, id: u32) -> Option<&Alumnus> {
        self.records.iter().find(|a| a.id == id)
    }

    /// Look up a record, failing with `NotFound`
    pub fn require(&self, id: u32) -> Result<&Alumnus, RosterError> {
        self.get(id).ok_or(RosterError::NotFound { id })
    }

    /// Evaluate a directory query over the whole roster
    pub fn evaluate(&self, query: &DirectoryQuery) -> Vec<Alumnus> {
        engine::evaluate(&self.records, query)
    }

    /// Distinct values per filterable field
    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::empty()
    }
}

impl QueryableStore<Alumnus> for Roster {
    fn apply_filters(&self, data: Vec<Alumnus>, query: &DirectoryQuery) -> Vec<Alumnus> {
        data.into_iter()
            .filter(|alumnus| engine::matches(alumnus, query))
            .collect()
    }

    fn apply_sort(&self, data: Vec<Alumnus>, sort: &SortSpec) -> Vec<Alumnus> {
        engine::sort_records(data, sort)
    }

    fn list_all(&self) -> Vec<Alumnus> {
        self.records.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::DirectoryField;
    use std::io::Write;

    const ROSTER_JSON: &str = r#"[
        {"id": 1, "name": "Samantha Carter", "batch": 2015, "company": "Stargate Command", "location": "Colorado Springs", "industry": "Aerospace & Defense"},
        {"id": 4, "name": "Teal'c", "batch": 2007, "company": "Free Jaffa Nation", "location": "Dakara", "industry": "Government"}
    ]"#;

    #[test]
    fn test_from_json_str() {
        let roster = Roster::from_json_str(ROSTER_JSON).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(4).unwrap().name, "Teal'c");
        assert!(roster.get(99).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let records = vec![
            Alumnus::new(7, "George Hammond", 1970, "Stargate Command", "Washington D.C.", "Aerospace & Defense"),
            Alumnus::new(7, "Ronon Dex", 2005, "Atlantis Expedition", "Pegasus Galaxy", "Security"),
        ];
        assert!(matches!(
            Roster::new(records),
            Err(RosterError::DuplicateId { id: 7 })
        ));
    }

    #[test]
    fn test_require_missing_is_not_found() {
        let roster = Roster::from_json_str(ROSTER_JSON).unwrap();
        assert!(matches!(
            roster.require(3),
            Err(RosterError::NotFound { id: 3 })
        ));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
- id: 8
  name: Ronon Dex
  batch: 2005
  company: Atlantis Expedition
  location: Pegasus Galaxy
  industry: Security
  skills: [Tracking, Intimidation]
"#;
        let roster = Roster::from_yaml_str(yaml).unwrap();
        assert_eq!(roster.records()[0].skills.len(), 2);
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(ROSTER_JSON.as_bytes()).unwrap();

        let roster = Roster::from_file(file.path()).unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        assert!(matches!(
            Roster::from_file(file.path()),
            Err(RosterError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();

        match Roster::from_file(file.path()) {
            Err(RosterError::Parse { source_path, .. }) => assert!(source_path.is_some()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_queryable_store_matches_evaluate() {
        let roster = Roster::from_json_str(ROSTER_JSON).unwrap();
        let query = DirectoryQuery::new().with_sort(SortSpec::descending(DirectoryField::Batch));
        assert_eq!(roster.query(&query), roster.evaluate(&query));
    }

    #[test]
    fn test_filter_options_are_derived_on_build() {
        let roster = Roster::from_json_str(ROSTER_JSON).unwrap();
        assert_eq!(
            roster.filter_options().values(DirectoryField::Batch),
            ["2015", "2007"]
        );
        assert!(Roster::empty().filter_options().values(DirectoryField::Batch).is_empty());
    }
}
