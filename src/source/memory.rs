//! In-memory collection source.

use super::traits::{CollectionSource, Entity, RecordId};
use crate::error::{ConsoleError, Result};
use crate::model::Post;
use std::sync::{Mutex, PoisonError};

/// A collection held in process memory.
///
/// Identities are assigned as one past the largest numeric id seen so far.
/// Unknown ids fail with status 404, mirroring a REST backend.
#[derive(Debug, Default)]
pub struct MemorySource<T> {
    items: Mutex<Vec<T>>,
}

impl<T: Entity> MemorySource<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Number of items currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(items: &[T], id: &RecordId) -> Option<usize> {
        items.iter().position(|item| item.id().as_ref() == Some(id))
    }

    fn next_id(items: &[T]) -> u64 {
        items
            .iter()
            .filter_map(|item| item.id()?.as_integer())
            .filter_map(|id| u64::try_from(id).ok())
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

fn not_found(context: String) -> ConsoleError {
    ConsoleError::status(context, 404, "Not Found")
}

impl<T: Entity + Send> CollectionSource<T> for MemorySource<T> {
    fn list(&self) -> Result<Vec<T>> {
        Ok(self.lock().clone())
    }

    fn create(&self, item: &T) -> Result<T> {
        let mut items = self.lock();
        let mut created = item.clone();
        created.assign_id(Self::next_id(&items));
        items.push(created.clone());
        tracing::debug!(total = items.len(), "Created item in memory source");
        Ok(created)
    }

    fn update(&self, id: &RecordId, item: &T) -> Result<T> {
        let mut items = self.lock();
        let idx = Self::position(&items, id).ok_or_else(|| not_found(format!("updating {id}")))?;
        items[idx] = item.clone();
        Ok(item.clone())
    }

    fn delete(&self, id: &RecordId) -> Result<()> {
        let mut items = self.lock();
        let idx = Self::position(&items, id).ok_or_else(|| not_found(format!("deleting {id}")))?;
        items.remove(idx);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Demo posts for offline use.
#[must_use]
pub fn demo_posts() -> Vec<Post> {
    const TITLES: [&str; 12] = [
        "sunt aut facere repellat provident",
        "qui est esse",
        "ea molestias quasi exercitationem",
        "eum et est occaecati",
        "nesciunt quas odio",
        "dolorem eum magni eos aperiam",
        "magnam facilis autem",
        "dolorem dolore est ipsam",
        "nesciunt iure omnis dolorem tempora",
        "optio molestias id quia eum",
        "et ea vero quia laudantium autem",
        "in quibusdam tempore odit est dolorem",
    ];
    TITLES
        .iter()
        .zip(1u64..)
        .map(|(title, id)| Post {
            id,
            user_id: (id - 1) / 4 + 1,
            title: (*title).to_string(),
            body: format!("body of post {id}"),
        })
        .collect()
}
