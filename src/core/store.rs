//! Store traits for filtering and sorting

use crate::core::query::{DirectoryQuery, SortSpec};

/// Trait for stores that support directory-style querying
///
/// `query` composes the two passes; implementors only provide them.
pub trait QueryableStore<T>: Send + Sync {
    /// Keep the entries matching the query's search term and field filters
    fn apply_filters(&self, data: Vec<T>, query: &DirectoryQuery) -> Vec<T>;

    /// Stable sort of a collection
    fn apply_sort(&self, data: Vec<T>, sort: &SortSpec) -> Vec<T>;

    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Filter then sort everything the store holds
    fn query(&self, query: &DirectoryQuery) -> Vec<T> {
        let filtered = self.apply_filters(self.list_all(), query);
        self.apply_sort(filtered, &query.sort)
    }
}
