//! Structured per-field filters.
//!
//! Filters combine with OR semantics: an item is kept if it matches any
//! filter, and appears once even if it matches several. Results are grouped
//! by filter in filter order, then deduplicated by item identity.

use super::search::TextMatcher;
use crate::model::{Record, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a structured filter compares its value with the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// Free-text test with the table's matcher
    FreeText,
    /// Stringified equality
    Exact,
}

/// A single `field = value` (or `field matches value`) predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFilter {
    pub key: String,
    pub kind: MatchKind,
    pub value: Value,
}

impl StructuredFilter {
    pub fn exact(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            kind: MatchKind::Exact,
            value: value.into(),
        }
    }

    pub fn free_text(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            kind: MatchKind::FreeText,
            value: value.into(),
        }
    }

    /// Whether `item` satisfies this filter.
    pub fn matches<T: Record>(&self, item: &T, matcher: &TextMatcher) -> bool {
        self.predicate(matcher)(item)
    }

    /// Prepare this filter for testing many items.
    fn predicate<T: Record>(&self, matcher: &TextMatcher) -> impl Fn(&T) -> bool + '_ {
        let wanted = self.value.to_string();
        let compiled = match self.kind {
            MatchKind::FreeText => Some(matcher.compile(&wanted)),
            MatchKind::Exact => None,
        };
        move |item: &T| {
            item.field_text(&self.key).is_some_and(|field| match &compiled {
                Some(compiled) => compiled.test(&field),
                None => field == wanted,
            })
        }
    }
}

/// Positions of the items kept by `filters`.
///
/// With no filters every position is returned in order. Otherwise the
/// per-filter matches are concatenated in filter order and the first
/// occurrence of each identity wins.
pub fn matching_indices<T, F>(
    items: &[T],
    filters: &[StructuredFilter],
    matcher: &TextMatcher,
    identity: F,
) -> Vec<usize>
where
    T: Record,
    F: Fn(&T) -> Value,
{
    if filters.is_empty() {
        return (0..items.len()).collect();
    }

    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for filter in filters {
        let predicate = filter.predicate(matcher);
        for (idx, item) in items.iter().enumerate() {
            if predicate(item) && seen.insert(identity(item)) {
                result.push(idx);
            }
        }
    }
    result
}

/// The items kept by `filters`.
pub fn apply<'a, T, F>(
    items: &'a [T],
    filters: &[StructuredFilter],
    matcher: &TextMatcher,
    identity: F,
) -> Vec<&'a T>
where
    T: Record,
    F: Fn(&T) -> Value,
{
    matching_indices(items, filters, matcher, identity)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

/// Remove every filter on `key`.
///
/// Removal is per key, not per value.
#[must_use]
pub fn without_key(filters: &[StructuredFilter], key: &str) -> Vec<StructuredFilter> {
    filters.iter().filter(|f| f.key != key).cloned().collect()
}

/// Filters sharing a key, grouped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub key: String,
    pub label: String,
    pub values: Vec<Value>,
}

impl Chip {
    /// `Label: v1, v2`
    #[must_use]
    pub fn text(&self) -> String {
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        format!("{}: {}", self.label, values.join(", "))
    }
}

/// Group filters by key in first-seen order.
///
/// `label_of` maps a key to its column label; unknown keys use the key.
pub fn chips<'a>(
    filters: &[StructuredFilter],
    label_of: impl Fn(&str) -> Option<&'a str>,
) -> Vec<Chip> {
    let mut grouped: IndexMap<&str, Vec<Value>> = IndexMap::new();
    for filter in filters {
        let values = grouped.entry(filter.key.as_str()).or_default();
        if !values.contains(&filter.value) {
            values.push(filter.value.clone());
        }
    }
    grouped
        .into_iter()
        .map(|(key, values)| Chip {
            key: key.to_string(),
            label: label_of(key).unwrap_or(key).to_string(),
            values,
        })
        .collect()
}
