//! Console dialogs and pending mutations.

use crate::error::Result;
use crate::model::Post;
use crate::source::{CollectionSource, RecordId};

/// The modal currently open over the post table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Read-only view of one post
    Detail(Post),
    /// Create or update form
    Edit { draft: Post, is_new: bool },
    /// "Are you sure?" before deleting
    ConfirmDelete(Post),
}

impl Dialog {
    /// Post shown by the dialog.
    #[must_use]
    pub const fn post(&self) -> &Post {
        match self {
            Self::Detail(post) | Self::ConfirmDelete(post) => post,
            Self::Edit { draft, .. } => draft,
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Detail(_) => "Post",
            Self::Edit { is_new: true, .. } => "New Post",
            Self::Edit { is_new: false, .. } => "Edit Post",
            Self::ConfirmDelete(_) => "Delete Post",
        }
    }
}

/// The request a pending mutation sends to the collection source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    Create(Post),
    Update(RecordId, Post),
    Delete(RecordId),
}

impl MutationRequest {
    /// Send the request. `Some` carries the persisted post.
    pub fn perform<S: CollectionSource<Post> + ?Sized>(&self, source: &S) -> Result<Option<Post>> {
        match self {
            Self::Create(post) => source.create(post).map(Some),
            Self::Update(id, post) => source.update(id, post).map(Some),
            Self::Delete(id) => source.delete(id).map(|()| None),
        }
    }

    /// Flash text shown when the request succeeds.
    #[must_use]
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Create(_) => "Post created",
            Self::Update(..) => "Post updated",
            Self::Delete(_) => "Post deleted",
        }
    }
}

/// Ticket for a mutation that has been dispatched but not yet resolved.
///
/// Only the ticket matching the console's current pending mutation is
/// applied; any other is a stale response and gets dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub(crate) ticket: u64,
    pub request: MutationRequest,
}

impl PendingMutation {
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn test_dialog_titles() {
        let post = Post::draft("t", "b");
        assert_eq!(
            Dialog::Edit {
                draft: post.clone(),
                is_new: true
            }
            .title(),
            "New Post"
        );
        assert_eq!(Dialog::ConfirmDelete(post.clone()).post(), &post);
    }

    #[test]
    fn test_perform_against_memory() {
        let source = MemorySource::<Post>::new(vec![]);
        let created = MutationRequest::Create(Post::draft("t", "b"))
            .perform(&source)
            .unwrap();
        assert_eq!(created.map(|p| p.id), Some(1));

        let deleted = MutationRequest::Delete(RecordId::from(1u64))
            .perform(&source)
            .unwrap();
        assert!(deleted.is_none());
    }
}
