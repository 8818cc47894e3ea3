//! Filter and search reduction over record collections.
//!
//! This module derives the filtered, ordered record set shown by a windowed list
//! from the raw records, the current [`FilterCriteria`] and the [`FieldSet`] that
//! says which record fields take part in matching.
//!
//! An item passes the filter if **all** of the following hold:
//!
//! 1. For every active categorical filter (a key listed in
//!    [`FieldSet::filterable`] whose value is neither `""` nor `"all"`), the
//!    record's field is exactly equal to the selected value.
//! 2. If a search string is present, at least one field listed in
//!    [`FieldSet::searchable`] matches it. In [`SearchMode::Substring`] (the
//!    default) that is a case-insensitive substring test; in
//!    [`SearchMode::Fuzzy`] the skim fuzzy matcher is used instead.
//!
//! The reducer never reorders: the result follows the order of the backing
//! collection, whatever the search mode.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Filter value meaning "no constraint" besides the empty string.
pub const ALL: &str = "all";

/// A record that can be listed, filtered and searched.
///
/// Records are opaque to the controller apart from a stable identifier and a
/// by-name field accessor used by the reducer.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::filter::Record;
/// use std::borrow::Cow;
///
/// #[derive(Clone)]
/// struct Student {
///     id: u32,
///     name: String,
///     class: String,
/// }
///
/// impl Record for Student {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
///
///     fn field(&self, name: &str) -> Option<Cow<'_, str>> {
///         match name {
///             "name" => Some(Cow::Borrowed(&self.name)),
///             "class" => Some(Cow::Borrowed(&self.class)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Clone {
    /// Stable unique identifier type.
    type Id: Clone + Eq + Debug;

    /// Returns the record's unique identifier.
    fn id(&self) -> Self::Id;

    /// Returns the textual value of the named field, or `None` if the record has
    /// no such field.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// How the free-text search string is matched against searchable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring containment.
    #[default]
    Substring,
    /// Skim-style fuzzy matching (characters in order, gaps allowed).
    Fuzzy,
}

/// The record fields that take part in filtering and searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    /// Fields eligible for free-text search.
    pub searchable: Vec<String>,
    /// Fields eligible for exact-match categorical filters.
    pub filterable: Vec<String>,
}

impl FieldSet {
    /// Creates a field set from searchable and filterable field names.
    pub fn new<S, F>(searchable: S, filterable: F) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            searchable: searchable.into_iter().map(Into::into).collect(),
            filterable: filterable.into_iter().map(Into::into).collect(),
        }
    }

    fn is_filterable(&self, key: &str) -> bool {
        self.filterable.iter().any(|f| f == key)
    }
}

/// The current search string and categorical filter selections.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::filter::FilterCriteria;
///
/// let criteria = FilterCriteria::new()
///     .with_search("ali")
///     .with_filter("class", "10")
///     .with_filter("school", "all");
///
/// assert_eq!(criteria.search(), "ali");
/// assert_eq!(criteria.active_filters().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    search: String,
    filters: BTreeMap<String, String>,
}

impl FilterCriteria {
    /// Creates criteria with no search and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search string (builder pattern).
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets one filter selection (builder pattern).
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(key, value);
        self
    }

    /// Returns the search string.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replaces the search string.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Returns the selected value for a filter key, if any.
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Selects a value for a filter key. `""` and `"all"` remove the selection.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() || value == ALL {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }

    /// Removes every filter selection. The search string is kept.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Iterates over filter selections that actually constrain the result.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty() && v.as_str() != ALL)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if these criteria let every record through.
    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.active_filters().next().is_none()
    }
}

/// Returns the records passing `criteria`, in collection order.
///
/// # Examples
///
/// ```rust
/// # use bubbletea_windowed_list::filter::{filter, FieldSet, FilterCriteria, Record, SearchMode};
/// # use std::borrow::Cow;
/// # #[derive(Clone)]
/// # struct Doc { id: u32, name: &'static str, dept: &'static str }
/// # impl Record for Doc {
/// #     type Id = u32;
/// #     fn id(&self) -> u32 { self.id }
/// #     fn field(&self, n: &str) -> Option<Cow<'_, str>> {
/// #         match n { "name" => Some(Cow::Borrowed(self.name)), "dept" => Some(Cow::Borrowed(self.dept)), _ => None }
/// #     }
/// # }
/// let docs = vec![
///     Doc { id: 1, name: "Dr. Amal", dept: "cardio" },
///     Doc { id: 2, name: "Dr. Bilal", dept: "neuro" },
///     Doc { id: 3, name: "Dr. Amina", dept: "neuro" },
/// ];
/// let fields = FieldSet::new(["name"], ["dept"]);
/// let criteria = FilterCriteria::new().with_search("AM").with_filter("dept", "neuro");
///
/// let hits = filter(&docs, &criteria, &fields, SearchMode::Substring);
/// assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);
/// ```
pub fn filter<'a, R: Record>(
    items: &'a [R],
    criteria: &FilterCriteria,
    fields: &FieldSet,
    mode: SearchMode,
) -> Vec<&'a R> {
    filter_indices(items, criteria, fields, mode)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}

/// Like [`filter`], but returns positions into `items` rather than references.
pub fn filter_indices<R: Record>(
    items: &[R],
    criteria: &FilterCriteria,
    fields: &FieldSet,
    mode: SearchMode,
) -> Vec<usize> {
    if criteria.is_identity() {
        return (0..items.len()).collect();
    }

    let constraints: Vec<(&str, &str)> = criteria
        .active_filters()
        .filter(|(key, _)| {
            let known = fields.is_filterable(key);
            if !known {
                log::debug!("ignoring filter on non-filterable field {key:?}");
            }
            known
        })
        .collect();

    let search = Search::new(criteria.search(), mode);

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            constraints
                .iter()
                .all(|(key, value)| item.field(key).is_some_and(|v| v == *value))
        })
        .filter(|(_, item)| search.matches(*item, &fields.searchable))
        .map(|(i, _)| i)
        .collect()
}

enum Search {
    Any,
    Substring(String),
    Fuzzy(SkimMatcherV2, String),
}

impl Search {
    fn new(text: &str, mode: SearchMode) -> Self {
        if text.is_empty() {
            return Search::Any;
        }
        match mode {
            SearchMode::Substring => Search::Substring(text.to_lowercase()),
            SearchMode::Fuzzy => Search::Fuzzy(SkimMatcherV2::default(), text.to_string()),
        }
    }

    fn matches<R: Record>(&self, item: &R, searchable: &[String]) -> bool {
        let needle = match self {
            Search::Any => return true,
            Search::Substring(n) | Search::Fuzzy(_, n) => n,
        };
        searchable
            .iter()
            .filter_map(|name| item.field(name))
            .any(|value| match self {
                Search::Fuzzy(matcher, _) => matcher.fuzzy_match(&value, needle).is_some(),
                _ => value.to_lowercase().contains(needle.as_str()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Student {
        id: usize,
        name: String,
        class: String,
        section: String,
    }

    impl Record for Student {
        type Id = usize;

        fn id(&self) -> usize {
            self.id
        }

        fn field(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "name" => Some(Cow::Borrowed(&self.name)),
                "class" => Some(Cow::Borrowed(&self.class)),
                "section" => Some(Cow::Borrowed(&self.section)),
                _ => None,
            }
        }
    }

    fn student(id: usize, name: &str, class: &str, section: &str) -> Student {
        Student {
            id,
            name: name.to_string(),
            class: class.to_string(),
            section: section.to_string(),
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student(1, "Aisha Khan", "10", "A"),
            student(2, "Omar Farooq", "9", "B"),
            student(3, "Sara Ahmed", "10", "B"),
            student(4, "Bilal Shah", "10", "A"),
            student(5, "Hina Malik", "8", "C"),
        ]
    }

    fn fields() -> FieldSet {
        FieldSet::new(["name"], ["class", "section"])
    }

    fn ids(items: &[&Student]) -> Vec<usize> {
        items.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_identity_when_no_criteria() {
        let items = roster();
        let out = filter(&items, &FilterCriteria::new(), &fields(), SearchMode::Substring);
        assert_eq!(ids(&out), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_all_and_empty_values_do_not_constrain() {
        let items = roster();
        let criteria = FilterCriteria::new()
            .with_filter("class", "all")
            .with_filter("section", "");
        assert!(criteria.is_identity());
        assert_eq!(criteria, FilterCriteria::new());
        let out = filter(&items, &criteria, &fields(), SearchMode::Substring);
        assert_eq!(out.len(), items.len());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = roster();
        let criteria = FilterCriteria::new().with_search("AH");
        let out = filter(&items, &criteria, &fields(), SearchMode::Substring);
        // "Sara Ahmed" and "Bilal Shah"
        assert_eq!(ids(&out), vec![3, 4]);
    }

    #[test]
    fn test_categorical_filters_are_exact_and_case_sensitive() {
        let items = roster();
        let criteria = FilterCriteria::new().with_filter("section", "a");
        assert!(filter(&items, &criteria, &fields(), SearchMode::Substring).is_empty());

        let criteria = FilterCriteria::new().with_filter("section", "A");
        let out = filter(&items, &criteria, &fields(), SearchMode::Substring);
        assert_eq!(ids(&out), vec![1, 4]);
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let items = roster();
        let criteria = FilterCriteria::new()
            .with_search("a")
            .with_filter("class", "10")
            .with_filter("section", "B");
        let out = filter(&items, &criteria, &fields(), SearchMode::Substring);
        assert_eq!(ids(&out), vec![3]);
    }

    #[test]
    fn test_search_only_looks_at_searchable_fields() {
        let items = roster();
        // "B" is a section value but section is not searchable; only names match.
        let criteria = FilterCriteria::new().with_search("b");
        let out = filter(&items, &criteria, &fields(), SearchMode::Substring);
        assert_eq!(ids(&out), vec![4]);
    }

    #[test]
    fn test_unknown_filter_keys_are_ignored() {
        let items = roster();
        let criteria = FilterCriteria::new().with_filter("school", "North");
        let out = filter(&items, &criteria, &fields(), SearchMode::Substring);
        assert_eq!(out.len(), items.len());
    }

    #[test]
    fn test_missing_field_fails_filter() {
        let items = roster();
        let fields = FieldSet::new(["name"], ["house"]);
        let criteria = FilterCriteria::new().with_filter("house", "Red");
        assert!(filter(&items, &criteria, &fields, SearchMode::Substring).is_empty());
    }

    #[test]
    fn test_fuzzy_mode_keeps_collection_order() {
        let items = roster();
        let criteria = FilterCriteria::new().with_search("aml");
        let out = filter(&items, &criteria, &fields(), SearchMode::Fuzzy);
        // a..m..l in "Hina Malik" only; substring mode finds nothing
        assert_eq!(ids(&out), vec![5]);
        assert!(filter(&items, &criteria, &fields(), SearchMode::Substring).is_empty());
    }

    #[test]
    fn test_filter_indices_points_into_items() {
        let items = roster();
        let criteria = FilterCriteria::new().with_filter("class", "10");
        let idx = filter_indices(&items, &criteria, &fields(), SearchMode::Substring);
        assert_eq!(idx, vec![0, 2, 3]);
    }

    fn arb_student() -> impl Strategy<Value = Student> {
        (
            0usize..1000,
            "[a-zA-Z ]{0,12}",
            prop::sample::select(vec!["8", "9", "10"]),
            prop::sample::select(vec!["A", "B", "C"]),
        )
            .prop_map(|(id, name, class, section)| student(id, &name, class, section))
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            "[a-zA-Z]{0,3}",
            prop::sample::select(vec!["", "all", "8", "9", "10"]),
            prop::sample::select(vec!["", "all", "A", "B", "C"]),
        )
            .prop_map(|(search, class, section)| {
                FilterCriteria::new()
                    .with_search(search)
                    .with_filter("class", class)
                    .with_filter("section", section)
            })
    }

    proptest! {
        #[test]
        fn filtering_is_idempotent(
            items in prop::collection::vec(arb_student(), 0..40),
            criteria in arb_criteria(),
            fuzzy in any::<bool>(),
        ) {
            let mode = if fuzzy { SearchMode::Fuzzy } else { SearchMode::Substring };
            let once: Vec<Student> = filter(&items, &criteria, &fields(), mode)
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<Student> = filter(&once, &criteria, &fields(), mode)
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn filtering_preserves_order_and_is_a_subset(
            items in prop::collection::vec(arb_student(), 0..40),
            criteria in arb_criteria(),
        ) {
            let idx = filter_indices(&items, &criteria, &fields(), SearchMode::Substring);
            prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(idx.iter().all(|&i| i < items.len()));
        }
    }
}
