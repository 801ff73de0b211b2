//! The post console: a [`Table`] of posts hosted over a collection source.
//!
//! The console reacts to table events by opening dialogs, runs mutations
//! against the source one at a time, and routes failures to an
//! [`ErrorBoundary`].
//!
//! Mutations are two-phase so a host can dispatch the request on its own
//! schedule:
//!
//! ```
//! use postdesk::console::Console;
//! use postdesk::model::{Role, User};
//! use postdesk::source::{demo_posts, MemorySource};
//! use postdesk::table::TableOptions;
//!
//! let source = MemorySource::new(demo_posts());
//! let admin = User::new(1, "admin@example.com", Role::Admin);
//! let mut console = Console::new(source, Some(admin), TableOptions::default(), 30)?;
//! console.load()?;
//!
//! console.open_new()?;
//! console.update_draft(Some("hello".into()), Some("world".into()))?;
//! let pending = console.begin_submit()?;
//! assert!(console.is_busy());
//!
//! let result = pending.request.perform(console.source());
//! console.finish(pending, result)?;
//! assert_eq!(console.table().working_len(), 13);
//! # Ok::<(), postdesk::ConsoleError>(())
//! ```

mod boundary;
mod dialog;
mod flash;

pub use boundary::{ErrorBoundary, ErrorNotice};
pub use dialog::{Dialog, MutationRequest, PendingMutation};
pub use flash::FlashMessage;

use crate::error::{ConsoleError, ErrorContext, FailureKind, Result};
use crate::model::{Post, Role, RoleProvider, User, post_columns};
use crate::source::{CollectionSource, Entity, RecordId};
use crate::table::{Permission, Table, TableEvent, TableOptions, gate};

/// Post CRUD console.
pub struct Console<S> {
    source: S,
    table: Table<Post>,
    user: Option<User>,
    dialog: Option<Dialog>,
    pending: Option<PendingMutation>,
    next_ticket: u64,
    flash: FlashMessage,
    boundary: ErrorBoundary,
}

impl<S: CollectionSource<Post>> Console<S> {
    /// Create a console with an empty table; call [`Console::load`] to fill it.
    pub fn new(
        source: S,
        user: Option<User>,
        options: TableOptions,
        truncate_at: usize,
    ) -> Result<Self> {
        let table = Table::new(post_columns(truncate_at), Vec::new(), Post::key, options)?;
        Ok(Self {
            source,
            table,
            user,
            dialog: None,
            pending: None,
            next_ticket: 1,
            flash: FlashMessage::new(),
            boundary: ErrorBoundary::new(),
        })
    }

    /// Fetch the collection and hand it to the table.
    pub fn load(&mut self) -> Result<()> {
        tracing::debug!(source = self.source.name(), "Loading posts");
        let items = self.source.list().context("loading posts");
        let items = self.guard(items)?;
        self.table.set_items(items);
        Ok(())
    }

    /// Open the create form. Requires the create permission.
    pub fn open_new(&mut self) -> Result<()> {
        self.ensure_idle()?;
        let event = self.table.request_new(self.role());
        let event = self.guard(event)?;
        self.open_from_event(event);
        Ok(())
    }

    /// Open the edit form for post `id`. Requires the edit permission.
    pub fn open_edit(&mut self, id: &RecordId) -> Result<()> {
        self.ensure_idle()?;
        let event = self.table.request_edit(self.role(), id);
        let event = self.guard(event)?;
        self.open_from_event(event);
        Ok(())
    }

    /// Open the delete confirmation for post `id`. Requires the delete
    /// permission.
    pub fn open_delete(&mut self, id: &RecordId) -> Result<()> {
        self.ensure_idle()?;
        let event = self.table.request_delete(self.role(), id);
        let event = self.guard(event)?;
        self.open_from_event(event);
        Ok(())
    }

    /// Open the read-only view of post `id`.
    pub fn open_detail(&mut self, id: &RecordId) -> Result<()> {
        self.ensure_idle()?;
        let event = self.table.activate_row(id)?;
        self.open_from_event(event);
        Ok(())
    }

    /// Edit the open form. `None` leaves a field unchanged.
    pub fn update_draft(&mut self, title: Option<String>, body: Option<String>) -> Result<()> {
        self.ensure_idle()?;
        match &mut self.dialog {
            Some(Dialog::Edit { draft, .. }) => {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(body) = body {
                    draft.body = body;
                }
                Ok(())
            }
            _ => Err(ConsoleError::NoDialog("edit".to_string())),
        }
    }

    /// Close the open dialog, discarding any draft.
    ///
    /// A mutation already dispatched is not cancelled; its response will be
    /// dropped as stale.
    pub fn close_dialog(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(ticket = pending.ticket, "Dialog closed with mutation in flight");
        }
        self.dialog = None;
    }

    /// First phase of saving the edit form.
    ///
    /// The draft's owner becomes the current user.
    pub fn begin_submit(&mut self) -> Result<PendingMutation> {
        let Some(Dialog::Edit { draft, is_new }) = &self.dialog else {
            return Err(ConsoleError::NoDialog("edit".to_string()));
        };
        self.ensure_idle()?;

        let permission = if *is_new {
            Permission::Create
        } else {
            Permission::Edit
        };
        let mut post = draft.clone();
        post.user_id = self.user.as_ref().map_or(0, |user| user.id);
        let request = if *is_new {
            MutationRequest::Create(post)
        } else {
            MutationRequest::Update(post.key(), post)
        };

        let allowed = gate::require(self.role(), permission);
        self.guard(allowed)?;
        Ok(self.dispatch(request))
    }

    /// First phase of a confirmed delete.
    pub fn begin_delete(&mut self) -> Result<PendingMutation> {
        let Some(Dialog::ConfirmDelete(post)) = &self.dialog else {
            return Err(ConsoleError::NoDialog("delete".to_string()));
        };
        self.ensure_idle()?;

        let request = MutationRequest::Delete(post.key());
        let allowed = gate::require(self.role(), Permission::Delete);
        self.guard(allowed)?;
        Ok(self.dispatch(request))
    }

    /// Second phase: apply the source's answer to `pending`.
    ///
    /// A ticket that is no longer current (its dialog was closed) is ignored.
    pub fn finish(&mut self, pending: PendingMutation, result: Result<Option<Post>>) -> Result<()> {
        if self.pending.as_ref().map(PendingMutation::ticket) != Some(pending.ticket) {
            tracing::debug!(ticket = pending.ticket, "Dropping stale mutation response");
            return Ok(());
        }
        self.pending = None;

        let saved = self.guard(result)?;
        let mut items = self.table.state().source().to_vec();
        match (&pending.request, saved) {
            (MutationRequest::Create(_), Some(post)) => items.push(post),
            (MutationRequest::Update(id, _), Some(post)) => {
                if let Some(slot) = items.iter_mut().find(|p| p.id().as_ref() == Some(id)) {
                    *slot = post;
                }
            }
            (MutationRequest::Delete(id), _) => items.retain(|p| p.id().as_ref() != Some(id)),
            (_, None) => {}
        }
        tracing::info!(
            ticket = pending.ticket,
            total = items.len(),
            "{}",
            pending.request.success_message()
        );
        self.table.set_items(items);
        self.dialog = None;
        self.flash.set(pending.request.success_message());
        Ok(())
    }

    /// Save the edit form: both phases against the source.
    pub fn submit(&mut self) -> Result<()> {
        let pending = self.begin_submit()?;
        let result = pending.request.perform(&self.source);
        self.finish(pending, result)
    }

    /// Delete the post in the confirmation dialog: both phases.
    pub fn confirm_delete(&mut self) -> Result<()> {
        let pending = self.begin_delete()?;
        let result = pending.request.perform(&self.source);
        self.finish(pending, result)
    }

    /// A navigation happened: the error fallback goes away.
    pub fn on_navigate(&mut self) {
        self.boundary.clear();
    }

    /// Switch the signed-in user.
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    fn dispatch(&mut self, request: MutationRequest) -> PendingMutation {
        let pending = PendingMutation {
            ticket: self.next_ticket,
            request,
        };
        self.next_ticket += 1;
        tracing::debug!(ticket = pending.ticket, request = ?pending.request, "Dispatching mutation");
        self.pending = Some(pending.clone());
        pending
    }

    fn open_from_event(&mut self, event: TableEvent<Post>) {
        self.flash.clear();
        self.dialog = match event {
            TableEvent::RequestNew => Some(Dialog::Edit {
                draft: Post::draft("", ""),
                is_new: true,
            }),
            TableEvent::RequestEdit(post) => Some(Dialog::Edit {
                draft: post,
                is_new: false,
            }),
            TableEvent::RequestDelete(post) => Some(Dialog::ConfirmDelete(post)),
            TableEvent::RowActivated(post) => Some(Dialog::Detail(post)),
        };
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.pending.is_some() {
            return Err(ConsoleError::MutationInFlight);
        }
        Ok(())
    }

    /// Route boundary-worthy failures to the error boundary.
    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result
            && err.kind() != FailureKind::Other
        {
            self.boundary.capture(err);
        }
        result
    }
}

impl<S> Console<S> {
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn table(&self) -> &Table<Post> {
        &self.table
    }

    /// The table, for search, filter, sort and paging actions.
    pub const fn table_mut(&mut self) -> &mut Table<Post> {
        &mut self.table
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.user.current_role()
    }

    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Whether a mutation is awaiting its response.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn flash(&self) -> &FlashMessage {
        &self.flash
    }

    pub const fn flash_mut(&mut self) -> &mut FlashMessage {
        &mut self.flash
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&ErrorNotice> {
        self.boundary.notice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, demo_posts};

    fn console(role: Role) -> Console<MemorySource<Post>> {
        let user = User::new(7, "user@example.com", role);
        let mut console = Console::new(
            MemorySource::new(demo_posts()),
            Some(user),
            TableOptions::default(),
            30,
        )
        .unwrap();
        console.load().unwrap();
        console
    }

    #[test]
    fn test_submit_new_sets_owner() {
        let mut c = console(Role::Admin);
        c.open_new().unwrap();
        c.update_draft(Some("t".into()), Some("b".into())).unwrap();
        c.submit().unwrap();

        let created = c.table().find(&RecordId::from(13u64)).unwrap();
        assert_eq!(created.user_id, 7);
        assert!(c.dialog().is_none());
        assert_eq!(c.flash().peek(), Some("Post created"));
    }

    #[test]
    fn test_second_begin_is_rejected() {
        let mut c = console(Role::Editor);
        c.open_edit(&RecordId::from(2u64)).unwrap();
        let _pending = c.begin_submit().unwrap();
        assert!(matches!(c.begin_submit(), Err(ConsoleError::MutationInFlight)));
        assert!(c.is_busy());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut c = console(Role::Admin);
        c.open_delete(&RecordId::from(1u64)).unwrap();
        let pending = c.begin_delete().unwrap();
        c.close_dialog();
        assert!(!c.is_busy());

        c.finish(pending, Ok(None)).unwrap();
        assert_eq!(c.table().working_len(), 12);
        assert!(!c.flash().has_message());
    }

    #[test]
    fn test_access_denied_reaches_boundary() {
        let mut c = console(Role::Reader);
        let err = c.open_edit(&RecordId::from(1u64)).unwrap_err();
        assert!(err.is_access_denied());
        assert_eq!(c.notice().map(|n| n.title.as_str()), Some("Access denied!"));

        c.on_navigate();
        assert!(c.notice().is_none());
    }

    #[test]
    fn test_update_draft_needs_edit_dialog() {
        let mut c = console(Role::Admin);
        c.open_detail(&RecordId::from(1u64)).unwrap();
        assert!(matches!(
            c.update_draft(Some("x".into()), None),
            Err(ConsoleError::NoDialog(_))
        ));
    }
}
