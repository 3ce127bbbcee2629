//! Directory query engine
//!
//! Evaluation runs in three passes over a borrowed roster: free-text search,
//! field filters, then a stable sort. The result is a fresh vector; the
//! roster is never touched.

use crate::core::alumnus::Alumnus;
use crate::core::field::{DirectoryField, compare_text};
use crate::core::query::{DirectoryQuery, FilterState, SortDirection, SortSpec};
use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Evaluate a query against a roster
///
/// The result is a subset of `roster`, ordered by the query's sort key with
/// equal keys kept in roster order. An empty result is a normal outcome.
pub fn evaluate(roster: &[Alumnus], query: &DirectoryQuery) -> Vec<Alumnus> {
    let needle = query.search_needle();
    let matching = roster
        .iter()
        .filter(|alumnus| matches_search(alumnus, needle.as_deref()))
        .filter(|alumnus| matches_filters(alumnus, &query.filters))
        .cloned()
        .collect();

    sort_records(matching, &query.sort)
}

/// Whether a record satisfies both the search term and the field filters
pub fn matches(alumnus: &Alumnus, query: &DirectoryQuery) -> bool {
    matches_search(alumnus, query.search_needle().as_deref())
        && matches_filters(alumnus, &query.filters)
}

/// Free-text match against name, company, batch and location
///
/// `needle` must already be lower-cased; `None` matches everything.
pub fn matches_search(alumnus: &Alumnus, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };

    DirectoryField::SEARCHABLE
        .iter()
        .any(|field| field.extract(alumnus).contains_lowercase(needle))
}

/// Field filter match: every restricted field must hold an accepted value
pub fn matches_filters(alumnus: &Alumnus, filters: &FilterState) -> bool {
    filters.active().all(|(field, accepted)| {
        let value = field.extract(alumnus).to_text();
        accepted.contains(&*value)
    })
}

/// Stable sort by one field
///
/// Keys are computed once per record; equal keys keep their input order in
/// either direction.
pub fn sort_records(mut records: Vec<Alumnus>, sort: &SortSpec) -> Vec<Alumnus> {
    match sort.direction {
        SortDirection::Ascending => {
            records.sort_by_cached_key(|a| sort.field.extract(a).sort_key());
        }
        SortDirection::Descending => {
            records.sort_by_cached_key(|a| Reverse(sort.field.extract(a).sort_key()));
        }
    }
    records
}

/// Distinct values present in the roster for each filterable field
///
/// Batches are listed most recent first, text values alphabetically
/// ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterOptions {
    options: IndexMap<DirectoryField, Vec<String>>,
}

impl FilterOptions {
    /// Derive the options from a roster
    pub fn derive(roster: &[Alumnus]) -> Self {
        let options = DirectoryField::FILTERABLE
            .iter()
            .map(|field| (*field, distinct_values(roster, *field)))
            .collect();
        Self { options }
    }

    /// Options for one field; empty for non-filterable fields
    pub fn values(&self, field: DirectoryField) -> &[String] {
        self.options.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (DirectoryField, &[String])> {
        self.options
            .iter()
            .map(|(field, values)| (*field, values.as_slice()))
    }
}

fn distinct_values(roster: &[Alumnus], field: DirectoryField) -> Vec<String> {
    if field == DirectoryField::Batch {
        let batches: BTreeSet<i32> = roster.iter().map(|a| a.batch).collect();
        return batches.into_iter().rev().map(|b| b.to_string()).collect();
    }

    let distinct: BTreeSet<String> = roster
        .iter()
        .map(|a| field.extract(a).to_text().into_owned())
        .collect();
    let mut values: Vec<String> = distinct.into_iter().collect();
    // BTreeSet order breaks ties between values that differ only in case
    values.sort_by(|a, b| compare_text(a, b));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::FilterState;

    fn roster() -> Vec<Alumnus> {
        vec![
            Alumnus::new(1, "Samantha Carter", 2015, "Stargate Command", "Colorado Springs", "Aerospace & Defense"),
            Alumnus::new(2, "John Sheppard", 2004, "Atlantis Expedition", "Pegasus Galaxy", "Exploration"),
            Alumnus::new(3, "Daniel Jackson", 1997, "Stargate Command", "Colorado Springs", "Research"),
            Alumnus::new(5, "Rodney McKay", 2004, "Atlantis Expedition", "Pegasus Galaxy", "Research"),
        ]
    }

    fn ids(records: &[Alumnus]) -> Vec<u32> {
        records.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_default_query_sorts_by_name() {
        let result = evaluate(&roster(), &DirectoryQuery::new());
        assert_eq!(ids(&result), vec![3, 2, 5, 1]);
    }

    #[test]
    fn test_search_matches_batch_digits() {
        let query = DirectoryQuery::new().with_search("199");
        assert_eq!(ids(&evaluate(&roster(), &query)), vec![3]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = DirectoryQuery::new().with_search("PEGASUS");
        assert_eq!(ids(&evaluate(&roster(), &query)), vec![2, 5]);
    }

    #[test]
    fn test_search_does_not_look_at_industry() {
        let query = DirectoryQuery::new().with_search("exploration");
        assert!(evaluate(&roster(), &query).is_empty());
    }

    #[test]
    fn test_filters_and_across_fields_or_within() {
        let filters = FilterState::new()
            .with_values(DirectoryField::Industry, ["Research", "Exploration"])
            .unwrap()
            .with_values(DirectoryField::Location, ["Pegasus Galaxy"])
            .unwrap();
        let query = DirectoryQuery::new().with_filters(filters);
        assert_eq!(ids(&evaluate(&roster(), &query)), vec![2, 5]);
    }

    #[test]
    fn test_filter_values_are_exact() {
        let query = DirectoryQuery::new()
            .with_filter("location", ["pegasus galaxy"])
            .unwrap();
        assert!(evaluate(&roster(), &query).is_empty());
    }

    #[test]
    fn test_batch_descending_single_comparator() {
        let query = DirectoryQuery::new().with_sort(SortSpec::descending(DirectoryField::Batch));
        assert_eq!(ids(&evaluate(&roster(), &query)), vec![1, 2, 5, 3]);

        let query = DirectoryQuery::new().with_sort(SortSpec::ascending(DirectoryField::Batch));
        assert_eq!(ids(&evaluate(&roster(), &query)), vec![3, 2, 5, 1]);
    }

    #[test]
    fn test_descending_text_sort_keeps_ties_in_input_order() {
        let roster = vec![
            Alumnus::new(1, "a", 2000, "stargate command", "x", "i"),
            Alumnus::new(2, "b", 2000, "Atlantis", "x", "i"),
            Alumnus::new(3, "c", 2000, "Stargate Command", "x", "i"),
            Alumnus::new(4, "d", 2000, "atlantis", "x", "i"),
        ];
        let sort = SortSpec::descending(DirectoryField::Company);
        assert_eq!(ids(&sort_records(roster.clone(), &sort)), vec![1, 3, 2, 4]);

        let sort = SortSpec::ascending(DirectoryField::Company);
        assert_eq!(ids(&sort_records(roster, &sort)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_matches_agrees_with_evaluate() {
        let query = DirectoryQuery::new().with_search("stargate");
        let roster = roster();
        let expected: Vec<u32> = roster
            .iter()
            .filter(|a| matches(a, &query))
            .map(|a| a.id)
            .collect();
        let mut actual = ids(&evaluate(&roster, &query));
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_filter_options_ordering() {
        let options = FilterOptions::derive(&roster());
        assert_eq!(options.values(DirectoryField::Batch), ["2015", "2004", "1997"]);
        assert_eq!(
            options.values(DirectoryField::Location),
            ["Colorado Springs", "Pegasus Galaxy"]
        );
        assert_eq!(
            options.values(DirectoryField::Industry),
            ["Aerospace & Defense", "Exploration", "Research"]
        );
        assert!(options.values(DirectoryField::Name).is_empty());
    }

    #[test]
    fn test_filter_options_text_ignores_case() {
        let roster = vec![
            Alumnus::new(1, "a", 2000, "zeta", "x", "i"),
            Alumnus::new(2, "b", 2000, "Alpha", "x", "i"),
            Alumnus::new(3, "c", 2000, "beta", "x", "i"),
        ];
        let options = FilterOptions::derive(&roster);
        assert_eq!(options.values(DirectoryField::Company), ["Alpha", "beta", "zeta"]);
        assert_eq!(options.values(DirectoryField::Batch), ["2000"]);
    }

    #[test]
    fn test_filter_options_field_order() {
        let options = FilterOptions::derive(&roster());
        let fields: Vec<DirectoryField> = options.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, DirectoryField::FILTERABLE.to_vec());
    }
}
