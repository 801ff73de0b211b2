//! Single-column sorting.
//!
//! Two numbers compare numerically; anything else compares by display string
//! with a case-folding collation (letters first by their lowercase form, then
//! lowercase before uppercase). Sorting is stable and never mutates input.

use crate::model::{Record, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to a sorted column header.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// The active sort: one key and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: SortOrder::Descending,
        }
    }

    /// The spec after a click on the header of `key`.
    ///
    /// Clicking the sorted column flips its direction; clicking another
    /// column sorts it ascending.
    #[must_use]
    pub fn after_click(current: Option<&Self>, key: &str) -> Self {
        match current {
            Some(spec) if spec.key == key => Self {
                key: spec.key.clone(),
                order: spec.order.reversed(),
            },
            _ => Self::ascending(key),
        }
    }
}

/// Compare two strings with a case-folding collation.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Compare two field values in ascending order.
///
/// A missing field compares as the empty string.
#[must_use]
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(x), Some(y)) = (a, b) {
        if let (Some(x), Some(y)) = (x.as_integer(), y.as_integer()) {
            return x.cmp(&y);
        }
        if let (Some(x), Some(y)) = (x.as_number(), y.as_number()) {
            return x.total_cmp(&y);
        }
    }
    let a = a.map(ToString::to_string).unwrap_or_default();
    let b = b.map(ToString::to_string).unwrap_or_default();
    collate(&a, &b)
}

/// Reorder `indices` (positions into `items`) by `spec`, stably.
pub fn sort_indices<T: Record>(items: &[T], indices: &mut [usize], spec: &SortSpec) {
    let mut keyed: Vec<(Option<Value>, usize)> = indices
        .iter()
        .map(|&idx| (items[idx].field(&spec.key), idx))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_values(a.as_ref(), b.as_ref());
        match spec.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    for (slot, (_, idx)) in indices.iter_mut().zip(keyed) {
        *slot = idx;
    }
}

/// A sorted copy of `items`.
pub fn apply<'a, T: Record>(items: &'a [T], spec: &SortSpec) -> Vec<&'a T> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    sort_indices(items, &mut indices, spec);
    indices.into_iter().map(|idx| &items[idx]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Post;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.into(),
            body: String::new(),
        }
    }

    fn ids(posts: &[&Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_numeric_sort() {
        let items = vec![post(3, ""), post(1, ""), post(2, ""), post(10, "")];
        assert_eq!(ids(&apply(&items, &SortSpec::ascending("id"))), vec![1, 2, 3, 10]);
        assert_eq!(ids(&apply(&items, &SortSpec::descending("id"))), vec![10, 3, 2, 1]);
    }

    #[test]
    fn test_text_sort_folds_case() {
        let items = vec![post(1, "banana"), post(2, "Apple"), post(3, "apple pie")];
        assert_eq!(ids(&apply(&items, &SortSpec::ascending("title"))), vec![2, 3, 1]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let items = vec![post(1, "b"), post(2, "a"), post(3, "b"), post(4, "a")];
        assert_eq!(ids(&apply(&items, &SortSpec::descending("title"))), vec![1, 3, 2, 4]);
        assert_eq!(ids(&apply(&items, &SortSpec::ascending("title"))), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("a", "B"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("Zed", "zed"), Ordering::Greater);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_mixed_values_compare_as_text() {
        let ten = Value::from(10u64);
        let two = Value::from("2");
        assert_eq!(compare_values(Some(&ten), Some(&two)), Ordering::Less);
        assert_eq!(compare_values(None, Some(&two)), Ordering::Less);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let low = Value::from(1u64 << 53);
        let high = Value::from((1u64 << 53) + 1);
        assert_eq!(compare_values(Some(&low), Some(&high)), Ordering::Less);
        assert_eq!(
            compare_values(Some(&Value::from(2.5)), Some(&Value::from(3u64))),
            Ordering::Less
        );
    }

    #[test]
    fn test_after_click_toggles() {
        let first = SortSpec::after_click(None, "id");
        assert_eq!(first, SortSpec::ascending("id"));

        let second = SortSpec::after_click(Some(&first), "id");
        assert_eq!(second, SortSpec::descending("id"));

        let other = SortSpec::after_click(Some(&second), "title");
        assert_eq!(other, SortSpec::ascending("title"));
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let items = vec![post(2, ""), post(1, "")];
        let _ = apply(&items, &SortSpec::ascending("id"));
        assert_eq!(items[0].id, 2);
    }
}
