//! Plain-text and JSON rendering of the post table.

use crate::model::{Post, Role};
use crate::table::{NarrowingMode, Table};
use serde_json::json;
use unicode_width::UnicodeWidthStr;

/// Column separator in the text table.
const SEPARATOR: &str = " | ";

/// Render the visible page as an aligned text table.
///
/// Above the table: the active search or the filter chips. Below it: the
/// pagination line and the controls `role` may use.
#[must_use]
pub fn render_table(table: &Table<Post>, role: Role) -> String {
    let state = table.state();
    let mut out = String::new();

    match state.mode() {
        NarrowingMode::Search if !state.search().is_empty() => {
            out.push_str(&format!(
                "{}: {}\n",
                table.options().filter_label,
                state.search().term
            ));
        }
        NarrowingMode::StructuredFilter => {
            let chips: Vec<String> = table.chips().iter().map(|c| c.text()).collect();
            if !chips.is_empty() {
                out.push_str(&format!("Filters: {}\n", chips.join(" | ")));
            }
        }
        _ => {}
    }

    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|column| match state.sort() {
            Some(spec) if spec.key == column.key() => {
                format!("{} {}", column.label(), spec.order.indicator())
            }
            _ => column.label().to_string(),
        })
        .collect();
    let rows = table.rows();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    out.push_str(&format_row(&headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    if rows.is_empty() {
        out.push_str("No data to show\n");
    }
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }

    let page = table.page_info();
    if table.working_len() > 0 {
        out.push_str(&format!(
            "\nPage {} of {} ({} items)\n",
            page.current_page,
            page.total_pages,
            table.working_len()
        ));
    }

    let affordances = table.affordances(role);
    let mut actions = Vec::new();
    if affordances.new {
        actions.push(table.add_label());
    }
    if affordances.edit {
        actions.push("edit".to_string());
    }
    if affordances.delete {
        actions.push("delete".to_string());
    }
    if !actions.is_empty() {
        out.push_str(&format!("Actions: {}\n", actions.join(", ")));
    }

    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    let mut line = padded.join(SEPARATOR).trim_end().to_string();
    line.push('\n');
    line
}

/// Left-align `text` in `width` terminal columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Render one post in full.
#[must_use]
pub fn render_post(post: &Post) -> String {
    format!(
        "ID: {}\nUser ID: {}\nTitle: {}\nBody: {}\n",
        post.id, post.user_id, post.title, post.body
    )
}

/// Render the visible page as JSON.
pub fn render_json(table: &Table<Post>) -> serde_json::Result<String> {
    let page = table.page_info();
    let value = json!({
        "page": page.current_page,
        "total_pages": page.total_pages,
        "total_items": table.working_len(),
        "items": table.visible_page(),
    });
    serde_json::to_string_pretty(&value)
}
