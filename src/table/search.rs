//! Free-text search over a collection.
//!
//! A search keeps every item for which the term matches at least one
//! candidate string: the value at the search key, or every field value when
//! no key is set. An empty term matches everything.

use crate::model::Record;
use clap::ValueEnum;
use regex::{Regex, RegexBuilder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a free-text term is matched against a candidate string.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Candidate contains the term
    #[default]
    Substring,
    /// Term is a regular expression searched for in the candidate
    Regex,
}

/// Free-text predicate configuration shared by search and free-text filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMatcher {
    pub mode: MatchMode,
    pub case_sensitive: bool,
}

impl TextMatcher {
    #[must_use]
    pub const fn new(mode: MatchMode, case_sensitive: bool) -> Self {
        Self {
            mode,
            case_sensitive,
        }
    }

    /// Prepare the predicate for one term.
    #[must_use]
    pub fn compile(&self, term: &str) -> CompiledMatcher {
        if term.is_empty() {
            return CompiledMatcher::Everything;
        }
        match self.mode {
            MatchMode::Substring => CompiledMatcher::Substring {
                needle: if self.case_sensitive {
                    term.to_string()
                } else {
                    term.to_lowercase()
                },
                case_sensitive: self.case_sensitive,
            },
            MatchMode::Regex => match RegexBuilder::new(term)
                .case_insensitive(!self.case_sensitive)
                .build()
            {
                Ok(re) => CompiledMatcher::Regex(re),
                Err(e) => {
                    tracing::debug!("Invalid search pattern {:?}: {}", term, e);
                    CompiledMatcher::Nothing
                }
            },
        }
    }

    /// One-off test of `term` against `candidate`.
    #[must_use]
    pub fn test(&self, term: &str, candidate: &str) -> bool {
        self.compile(term).test(candidate)
    }
}

/// A term prepared for repeated matching.
#[derive(Debug, Clone)]
pub enum CompiledMatcher {
    /// Empty term
    Everything,
    Substring { needle: String, case_sensitive: bool },
    Regex(Regex),
    /// A pattern that failed to compile matches nothing
    Nothing,
}

impl CompiledMatcher {
    #[must_use]
    pub fn test(&self, candidate: &str) -> bool {
        match self {
            Self::Everything => true,
            Self::Substring {
                needle,
                case_sensitive: true,
            } => candidate.contains(needle.as_str()),
            Self::Substring { needle, .. } => candidate.to_lowercase().contains(needle.as_str()),
            Self::Regex(re) => re.is_match(candidate),
            Self::Nothing => false,
        }
    }
}

/// The search input: a term and an optional field to search in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    pub term: String,
    /// Field to search; `None` searches every field
    pub key: Option<String>,
}

impl SearchSpec {
    pub fn new(term: impl Into<String>, key: Option<String>) -> Self {
        Self {
            term: term.into(),
            key,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

/// Whether `item` matches the search.
pub fn item_matches<T: Record>(item: &T, key: Option<&str>, matcher: &CompiledMatcher) -> bool {
    match key {
        Some(key) => item
            .field_text(key)
            .is_some_and(|candidate| matcher.test(&candidate)),
        None => item
            .field_values()
            .iter()
            .any(|value| matcher.test(&value.to_string())),
    }
}

/// Positions of the items kept by the search, in input order.
pub fn matching_indices<T: Record>(
    items: &[T],
    spec: &SearchSpec,
    matcher: &TextMatcher,
) -> Vec<usize> {
    if spec.is_empty() {
        return (0..items.len()).collect();
    }
    let compiled = matcher.compile(&spec.term);
    let key = spec.key.as_deref();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item_matches(*item, key, &compiled))
        .map(|(idx, _)| idx)
        .collect()
}

/// The items kept by the search, in input order.
pub fn apply<'a, T: Record>(
    items: &'a [T],
    spec: &SearchSpec,
    matcher: &TextMatcher,
) -> Vec<&'a T> {
    matching_indices(items, spec, matcher)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}
