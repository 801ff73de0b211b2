//! Collection source traits.

use crate::error::Result;
use crate::model::{Record, Value};

/// Identity of an item in a collection source.
pub type RecordId = Value;

/// An item a collection source can persist.
pub trait Entity: Record + Clone {
    /// Server-assigned identity, or `None` for an unsaved draft.
    fn id(&self) -> Option<RecordId>;

    /// Stamp a freshly assigned identity onto the item.
    fn assign_id(&mut self, id: u64);
}

/// Remote (or in-memory) store of a collection of items.
///
/// Every operation may fail with a transport error (no response) or a status
/// error (non-success response). Implementations never retry.
///
/// # Example
///
/// ```ignore
/// use postdesk::source::{CollectionSource, MemorySource};
///
/// let source = MemorySource::new(demo_posts());
/// let created = source.create(Post::draft("title", "body"))?;
/// source.delete(&created.key())?;
/// ```
pub trait CollectionSource<T>: Send + Sync {
    /// Fetch the full collection.
    fn list(&self) -> Result<Vec<T>>;

    /// Persist a new item; returns it with its assigned identity.
    fn create(&self, item: &T) -> Result<T>;

    /// Replace the item with identity `id`; returns the persisted item.
    fn update(&self, id: &RecordId, item: &T) -> Result<T>;

    /// Remove the item with identity `id`.
    fn delete(&self, id: &RecordId) -> Result<()>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<T, S: CollectionSource<T> + ?Sized> CollectionSource<T> for Box<S> {
    fn list(&self) -> Result<Vec<T>> {
        (**self).list()
    }

    fn create(&self, item: &T) -> Result<T> {
        (**self).create(item)
    }

    fn update(&self, id: &RecordId, item: &T) -> Result<T> {
        (**self).update(id, item)
    }

    fn delete(&self, id: &RecordId) -> Result<()> {
        (**self).delete(id)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl Entity for serde_json::Map<String, serde_json::Value> {
    fn id(&self) -> Option<RecordId> {
        self.get("id").filter(|v| !v.is_null()).map(Value::from_json)
    }

    fn assign_id(&mut self, id: u64) {
        self.insert("id".to_string(), id.into());
    }
}
