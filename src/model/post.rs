//! The post item managed by the console.

use super::column::{Column, FilterKind};
use super::{Record, Value};
use crate::source::{Entity, RecordId};
use serde::{Deserialize, Serialize};

/// Default number of characters shown for long text columns.
pub const MAX_CHARS_PER_COLUMN: usize = 30;

/// A post in the remote collection.
///
/// An `id` of zero marks a post that has not been persisted yet; the remote
/// collection assigns the real id on create.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "is_unsaved")]
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

const fn is_unsaved(id: &u64) -> bool {
    *id == 0
}

impl Post {
    /// A fresh, unsaved post.
    #[must_use]
    pub fn draft(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: 0,
            user_id: 0,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Whether the remote collection has assigned this post an id.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Identity used by tables and sources.
    #[must_use]
    pub fn key(&self) -> Value {
        Value::from(self.id)
    }
}

impl Record for Post {
    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.into()),
            "userId" => Some(self.user_id.into()),
            "title" => Some(self.title.as_str().into()),
            "body" => Some(self.body.as_str().into()),
            _ => None,
        }
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            self.id.into(),
            self.user_id.into(),
            self.title.as_str().into(),
            self.body.as_str().into(),
        ]
    }
}

impl Entity for Post {
    fn id(&self) -> Option<RecordId> {
        self.is_persisted().then(|| self.key())
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Truncate `text` to `max` characters, appending `...` when cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Column descriptors for the post table.
#[must_use]
pub fn post_columns(truncate_at: usize) -> Vec<Column<Post>> {
    vec![
        Column::new("id", "ID")
            .sortable()
            .filterable(FilterKind::SingleSelect),
        Column::new("userId", "User ID")
            .sortable()
            .filterable(FilterKind::MultiSelect),
        Column::new("title", "Title")
            .sortable()
            .filterable(FilterKind::FreeText)
            .render(move |post: &Post| truncate_chars(&post.title, truncate_at)),
        Column::new("body", "Body")
            .sortable()
            .filterable(FilterKind::FreeText)
            .render(move |post: &Post| truncate_chars(&post.body, truncate_at)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_shape() {
        let post: Post =
            serde_json::from_str(r#"{"id":3,"userId":1,"title":"t","body":"b"}"#).unwrap();
        assert_eq!(post.id, 3);
        assert_eq!(post.user_id, 1);

        let draft = serde_json::to_value(Post::draft("new", "text")).unwrap();
        assert!(draft.get("id").is_none());
        assert_eq!(draft["userId"], 0);
    }

    #[test]
    fn test_post_record_fields() {
        let post = Post {
            id: 2,
            user_id: 5,
            title: "Title".into(),
            body: "Body".into(),
        };
        assert_eq!(post.field_text("userId").as_deref(), Some("5"));
        assert_eq!(post.field_values().len(), 4);
        assert!(post.field("user_id").is_none());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 30), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }

    #[test]
    fn test_post_columns_render_truncated() {
        let columns = post_columns(4);
        let post = Post::draft("A long title", "x");
        let title = columns.iter().find(|c| c.key() == "title").unwrap();
        assert_eq!(title.render_cell(&post), "A lo...");
        assert!(columns.iter().all(Column::is_sortable));
    }
}
