//! `list` command handler.

use super::render::{render_json, render_table};
use crate::console::Console;
use crate::error::{ConsoleError, Result};
use crate::model::{Post, Value};
use crate::source::CollectionSource;
use crate::table::{MatchKind, SortOrder, StructuredFilter};
use clap::ValueEnum;
use std::num::NonZeroUsize;

/// Output format of the `list` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// The visible page as JSON
    Json,
}

/// What to show: one page of the narrowed, sorted table.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Search box term
    pub search: Option<String>,
    /// Structured filters; applied after the search, so they win
    pub filters: Vec<StructuredFilter>,
    pub sort: Option<(String, SortOrder)>,
    /// 1-based page
    pub page: usize,
    pub page_size: Option<NonZeroUsize>,
    pub format: OutputFormat,
}

/// Parse `key=value` into an exact-match filter.
pub fn parse_exact_filter(arg: &str) -> std::result::Result<StructuredFilter, String> {
    parse_filter(arg, MatchKind::Exact)
}

/// Parse `key=value` into a free-text filter.
pub fn parse_text_filter(arg: &str) -> std::result::Result<StructuredFilter, String> {
    parse_filter(arg, MatchKind::FreeText)
}

fn parse_filter(arg: &str, kind: MatchKind) -> std::result::Result<StructuredFilter, String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{arg}'"));
    }
    Ok(StructuredFilter {
        key: key.to_string(),
        kind,
        value: Value::from(value),
    })
}

/// Load posts, apply the query and render one page.
pub fn run_list<S: CollectionSource<Post>>(
    console: &mut Console<S>,
    query: &ListQuery,
) -> Result<String> {
    console.load()?;
    let role = console.role();
    let table = console.table_mut();

    if let Some(size) = query.page_size {
        table.set_page_size(size);
    }
    if let Some(term) = &query.search {
        table.search(term.as_str());
    }
    if !query.filters.is_empty() {
        table.apply_filters(query.filters.clone())?;
    }
    if let Some((key, order)) = &query.sort {
        table.sort_by(key)?;
        if *order == SortOrder::Descending {
            table.sort_by(key)?;
        }
    }
    table.go_to_page(query.page.max(1));
    tracing::debug!(
        working = table.working_len(),
        page = query.page,
        "Listing posts"
    );

    match query.format {
        OutputFormat::Table => Ok(render_table(table, role)),
        OutputFormat::Json => render_json(table).map_err(ConsoleError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        let filter = parse_exact_filter("userId=1").unwrap();
        assert_eq!(filter, StructuredFilter::exact("userId", "1"));

        let filter = parse_text_filter("title= qui est").unwrap();
        assert_eq!(filter.value, Value::from(" qui est"));
        assert_eq!(filter.kind, MatchKind::FreeText);

        assert!(parse_exact_filter("userId").is_err());
        assert!(parse_exact_filter("=1").is_err());
    }
}
