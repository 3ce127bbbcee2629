//! Directory queries, query-string parameters and pagination utilities

use crate::core::error::QueryError;
use crate::core::field::DirectoryField;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Accepted values per filterable field
///
/// A field with no accepted values imposes no restriction. Fields combine
/// with AND, values within one field combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    accepted: BTreeMap<DirectoryField, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted values for a field
    ///
    /// Fails if the field is not filterable.
    pub fn with_values<I, S>(mut self, field: DirectoryField, values: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ensure_filterable(field)?;
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.accepted.remove(&field);
        } else {
            self.accepted.insert(field, values);
        }
        Ok(self)
    }

    /// Select the value if it is not selected, deselect it otherwise
    ///
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, field: DirectoryField, value: &str) -> Result<bool, QueryError> {
        ensure_filterable(field)?;
        let values = self.accepted.entry(field).or_default();
        let selected = if values.remove(value) {
            false
        } else {
            values.insert(value.to_string());
            true
        };
        if values.is_empty() {
            self.accepted.remove(&field);
        }
        Ok(selected)
    }

    /// Accepted values for a field, if it is restricted
    pub fn accepted(&self, field: DirectoryField) -> Option<&BTreeSet<String>> {
        self.accepted.get(&field).filter(|values| !values.is_empty())
    }

    /// Restricted fields with their accepted values
    pub fn active(&self) -> impl Iterator<Item = (DirectoryField, &BTreeSet<String>)> {
        self.accepted
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(field, values)| (*field, values))
    }

    /// True when no field is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.active().next().is_none()
    }
}

fn ensure_filterable(field: DirectoryField) -> Result<(), QueryError> {
    if field.is_filterable() {
        Ok(())
    } else {
        Err(QueryError::NotFilterable {
            field: field.to_string(),
        })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(QueryError::InvalidDirection {
                direction: s.to_string(),
            }),
        }
    }
}

/// Sort key and direction
///
/// # Format
/// - `field` (ascending)
/// - `field:asc`, `field:desc`
/// - `field-asc`, `field-desc` (the directory's sort dropdown values)
///
/// # Example
/// ```
/// # use alumni::core::query::{SortDirection, SortSpec};
/// # use alumni::core::field::DirectoryField;
/// let spec: SortSpec = "batch-desc".parse().unwrap();
/// assert_eq!(spec.field, DirectoryField::Batch);
/// assert_eq!(spec.direction, SortDirection::Descending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: DirectoryField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: DirectoryField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: DirectoryField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: DirectoryField) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(DirectoryField::Name)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field, self.direction.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(|c| c == ':' || c == '-') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, SortDirection::Ascending),
        };
        Ok(Self::new(field.parse()?, direction))
    }
}

/// An immutable directory query: search term, field filters and sort order
///
/// Build a new value whenever an input changes; the engine never reads
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryQuery {
    pub search_term: String,
    pub filters: FilterState,
    pub sort: SortSpec,
}

impl DirectoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Restrict a field, named as the UI names it, to the given values
    pub fn with_filter<I, S>(mut self, field: &str, values: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field = DirectoryField::parse_filterable(field)?;
        self.filters = self.filters.with_values(field, values)?;
        Ok(self)
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Sort by a field named as the UI names it
    pub fn sorted_by(self, field: &str, direction: SortDirection) -> Result<Self, QueryError> {
        let field: DirectoryField = field.parse()?;
        Ok(self.with_sort(SortSpec::new(field, direction)))
    }

    /// The lower-cased search term, or `None` when the search is empty
    pub fn search_needle(&self) -> Option<String> {
        if self.search_term.is_empty() {
            None
        } else {
            Some(self.search_term.to_lowercase())
        }
    }
}

/// Query parameters for listing the directory
///
/// # Example
/// ```text
/// GET /alumni?search=atlantis
/// GET /alumni?filter={"batch": ["2004"], "location": "Pegasus Galaxy"}
/// GET /alumni?sort=batch:desc&page=2&limit=10
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Free-text search over name, company, batch and location
    pub search: Option<String>,

    /// Filters as a JSON object of field → value or list of values
    pub filter: Option<String>,

    /// Sort expression, see [`SortSpec`]
    pub sort: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            search: None,
            filter: None,
            sort: None,
        }
    }
}

/// Default page size
pub const DEFAULT_LIMIT: usize = 20;

/// Default page size ceiling
pub const MAX_LIMIT: usize = 100;

impl QueryParams {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, ensuring it doesn't exceed the default maximum
    pub fn limit(&self) -> usize {
        self.limit_capped(MAX_LIMIT)
    }

    /// Get limit clamped to `1..=max`
    pub fn limit_capped(&self, max: usize) -> usize {
        self.limit.clamp(1, max.max(1))
    }

    /// Parse the filter parameter
    pub fn filter_state(&self) -> Result<FilterState, QueryError> {
        let Some(raw) = self.filter.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(FilterState::new());
        };

        let FilterEntries(entries) =
            serde_json::from_str(raw).map_err(|e| QueryError::MalformedFilter {
                message: e.to_string(),
            })?;

        let mut state = FilterState::new();
        let mut seen = BTreeSet::new();
        for (key, value) in entries {
            let field = DirectoryField::parse_filterable(&key)?;
            if !seen.insert(field) {
                return Err(QueryError::MalformedFilter {
                    message: format!("field '{}' appears more than once", field),
                });
            }
            let values = match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(filter_value_text)
                    .collect::<Result<Vec<_>, _>>()?,
                scalar => vec![filter_value_text(scalar)?],
            };
            state = state.with_values(field, values)?;
        }
        Ok(state)
    }

    /// Build the directory query, falling back to `default_sort`
    pub fn to_query(&self, default_sort: SortSpec) -> Result<DirectoryQuery, QueryError> {
        let sort = match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(expr) => expr.parse()?,
            None => default_sort,
        };

        Ok(DirectoryQuery::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_filters(self.filter_state()?)
            .with_sort(sort))
    }
}

/// Filter object entries in document order, duplicates included
struct FilterEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for FilterEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = FilterEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of field to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(FilterEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn filter_value_text(value: Value) -> Result<String, QueryError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(QueryError::MalformedFilter {
            message: format!("filter values must be strings or numbers, got {}", other),
        }),
    }
}

/// Paginated response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Slice one page out of a full result
    pub fn from_results(results: Vec<T>, page: usize, limit: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total = results.len();
        let data = results
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        Self {
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
