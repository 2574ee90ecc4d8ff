//! Generic filter/search/sort projection over an in-memory list.
//!
//! The client table, the calendar session list, and the conversation
//! sidebar all present the same shape: facet filters ANDed together, a
//! case-insensitive substring query, a stable sort, and a selection set
//! scoped to the rows currently visible. `visible()` is a pure
//! recomputation; the backing items are never mutated by filtering.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Comparable projection of one sortable field.
///
/// Timestamps compare as timestamps, numbers numerically, text
/// case-insensitively; a missing value sorts before any present one.
#[derive(Clone, Debug, PartialEq)]
pub enum SortValue {
    Missing,
    Number(i64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Number(_) => 1,
            SortValue::Timestamp(_) => 2,
            SortValue::Text(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Timestamp(a), SortValue::Timestamp(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Implemented by every entity that can back a filterable list.
pub trait Filterable {
    /// Unique id used by the selection set.
    fn id(&self) -> i32;

    /// String fields the free-text query matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of the named facet, or `None` when the entity has no such facet.
    fn facet_value(&self, facet: &str) -> Option<String>;

    /// Comparable value for the named sort key.
    fn sort_value(&self, key: &str) -> SortValue;
}

/// Why a list rendered no rows. The two cases are distinct on purpose:
/// an empty collection and an over-constrained filter read differently.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListEmptyState {
    /// The backing collection itself has no items.
    NoItems,
    /// Items exist but none match the active query/facets.
    NoMatches,
}

#[derive(Clone, Debug, Default)]
pub struct FilterableCollection<T> {
    items: Vec<T>,
    query: String,
    facet_filters: BTreeMap<String, HashSet<String>>,
    sort: Option<(String, SortDirection)>,
    selected: HashSet<i32>,
}

impl<T: Filterable> FilterableCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            query: String::new(),
            facet_filters: BTreeMap::new(),
            sort: None,
            selected: HashSet::new(),
        }
    }

    /// The unfiltered backing items, in arrival order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the free-text filter.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Replaces the accepted-value set for one facet. An empty set means
    /// the facet is unconstrained and is removed entirely.
    pub fn set_facet(&mut self, facet: impl Into<String>, values: HashSet<String>) {
        let facet = facet.into();
        if values.is_empty() {
            self.facet_filters.remove(&facet);
        } else {
            self.facet_filters.insert(facet, values);
        }
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort
            .as_ref()
            .map(|(key, direction)| (key.as_str(), *direction))
    }

    /// Replaces the active sort outright.
    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        self.sort = Some((key.into(), direction));
    }

    /// Column-header behavior: a click on the active key toggles its
    /// direction instead of resetting it; any other key sorts ascending.
    pub fn sort_by(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some((current, direction)) if current == key => {
                Some((current, direction.toggled()))
            }
            _ => Some((key.to_string(), SortDirection::Asc)),
        };
    }

    /// The filtered, sorted projection: facets → query → stable sort.
    pub fn visible(&self) -> Vec<&T> {
        let query = self.query.trim().to_lowercase();

        let mut rows: Vec<&T> = self
            .items
            .iter()
            .filter(|item| self.matches_facets(*item))
            .filter(|item| {
                query.is_empty()
                    || item
                        .search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&query))
            })
            .collect();

        if let Some((key, direction)) = &self.sort {
            // Vec::sort_by is stable, so ties keep their arrival order in
            // either direction.
            rows.sort_by(|a, b| {
                let ordering = a.sort_value(key).compare(&b.sort_value(key));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }

    /// Distinguishes "nothing exists" from "nothing matches".
    pub fn empty_state(&self) -> Option<ListEmptyState> {
        if self.items.is_empty() {
            Some(ListEmptyState::NoItems)
        } else if self.visible().is_empty() {
            Some(ListEmptyState::NoMatches)
        } else {
            None
        }
    }

    pub fn selected(&self) -> &HashSet<i32> {
        &self.selected
    }

    /// Flips selection for a visible row; ids outside the current
    /// projection are ignored, so hidden rows cannot be selected.
    pub fn toggle_selection(&mut self, id: i32) {
        if !self.visible().iter().any(|item| item.id() == id) {
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selects every visible row, or clears the selection entirely.
    pub fn select_all(&mut self, select: bool) {
        if select {
            self.selected = self.visible().iter().map(|item| item.id()).collect();
        } else {
            self.selected.clear();
        }
    }

    /// Visible rows that are currently selected, in projection order.
    pub fn selected_visible(&self) -> Vec<&T> {
        self.visible()
            .into_iter()
            .filter(|item| self.selected.contains(&item.id()))
            .collect()
    }

    fn matches_facets(&self, item: &T) -> bool {
        self.facet_filters.iter().all(|(facet, accepted)| {
            item.facet_value(facet)
                .is_some_and(|value| accepted.contains(&value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: i32,
        status: &'static str,
        name: &'static str,
        score: i64,
    }

    impl Filterable for Row {
        fn id(&self) -> i32 {
            self.id
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn facet_value(&self, facet: &str) -> Option<String> {
            match facet {
                "status" => Some(self.status.to_string()),
                _ => None,
            }
        }

        fn sort_value(&self, key: &str) -> SortValue {
            match key {
                "score" => SortValue::Number(self.score),
                _ => SortValue::Text(self.name.to_string()),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                status: "active",
                name: "Sarah",
                score: 2,
            },
            Row {
                id: 2,
                status: "paused",
                name: "Michael",
                score: 1,
            },
            Row {
                id: 3,
                status: "active",
                name: "Emily",
                score: 2,
            },
        ]
    }

    fn ids(rows: Vec<&Row>) -> Vec<i32> {
        rows.iter().map(|row| row.id).collect()
    }

    #[test]
    fn facet_filter_keeps_members_in_original_order() {
        let mut list = FilterableCollection::new(rows());
        list.set_facet("status", HashSet::from(["active".to_string()]));
        assert_eq!(ids(list.visible()), vec![1, 3]);
    }

    #[test]
    fn empty_facet_set_removes_the_constraint() {
        let mut list = FilterableCollection::new(rows());
        list.set_facet("status", HashSet::from(["active".to_string()]));
        list.set_facet("status", HashSet::new());
        assert_eq!(ids(list.visible()), vec![1, 2, 3]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let mut list = FilterableCollection::new(rows());
        list.set_query("ARA");
        assert_eq!(ids(list.visible()), vec![1]);
    }

    #[test]
    fn clearing_query_restores_facet_only_projection() {
        let mut list = FilterableCollection::new(rows());
        list.set_facet("status", HashSet::from(["active".to_string()]));
        list.set_query("sarah");
        assert_eq!(ids(list.visible()), vec![1]);
        list.set_query("");
        assert_eq!(ids(list.visible()), vec![1, 3]);
    }

    #[test]
    fn sort_by_toggles_direction_on_repeat() {
        let mut list = FilterableCollection::new(rows());
        list.sort_by("score");
        assert_eq!(ids(list.visible()), vec![2, 1, 3]);
        // Tie between ids 1 and 3 keeps arrival order in both directions.
        list.sort_by("score");
        assert_eq!(ids(list.visible()), vec![1, 3, 2]);
        list.sort_by("score");
        assert_eq!(ids(list.visible()), vec![2, 1, 3]);
    }

    #[test]
    fn selection_is_scoped_to_visible_rows() {
        let mut list = FilterableCollection::new(rows());
        list.set_facet("status", HashSet::from(["active".to_string()]));

        list.toggle_selection(2); // hidden by the facet
        assert!(list.selected().is_empty());

        list.select_all(true);
        assert_eq!(list.selected(), &HashSet::from([1, 3]));

        list.select_all(false);
        assert!(list.selected().is_empty());
    }

    #[test]
    fn empty_states_are_distinct() {
        let empty: FilterableCollection<Row> = FilterableCollection::new(vec![]);
        assert_eq!(empty.empty_state(), Some(ListEmptyState::NoItems));

        let mut filtered = FilterableCollection::new(rows());
        filtered.set_query("zzz");
        assert_eq!(filtered.empty_state(), Some(ListEmptyState::NoMatches));

        assert_ne!(
            empty.empty_state(),
            filtered.empty_state(),
        );
    }

    #[test]
    fn visible_is_always_a_subset_of_items() {
        let mut list = FilterableCollection::new(rows());
        list.set_query("a");
        list.set_facet("status", HashSet::from(["active".to_string()]));
        let item_ids: HashSet<i32> = list.items().iter().map(|row| row.id).collect();
        for row in list.visible() {
            assert!(item_ids.contains(&row.id));
        }
    }
}
