//! Integration tests for the post console over an in-memory source.

use postdesk::console::{Console, Dialog, MutationRequest};
use postdesk::error::{ConsoleError, FailureKind, Result};
use postdesk::model::{Post, Role, User};
use postdesk::source::{CollectionSource, MemorySource, RecordId, demo_posts};
use postdesk::table::{NarrowingMode, TableOptions};
use std::sync::atomic::{AtomicUsize, Ordering};

fn user(role: Role) -> Option<User> {
    Some(User::new(
        match role {
            Role::Admin => 1,
            Role::Editor => 2,
            _ => 3,
        },
        format!("{role}@gmail.com"),
        role,
    ))
}

fn console(role: Role) -> Console<MemorySource<Post>> {
    let mut console = Console::new(
        MemorySource::new(demo_posts()),
        user(role),
        TableOptions::default(),
        30,
    )
    .unwrap();
    console.load().unwrap();
    console
}

fn id(n: u64) -> RecordId {
    RecordId::from(n)
}

/// Source whose every call fails with a fixed error.
struct FailingSource {
    calls: AtomicUsize,
    status: Option<u16>,
}

impl FailingSource {
    fn status(code: u16) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            status: Some(code),
        }
    }

    fn offline() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            status: None,
        }
    }

    fn fail<T>(&self, context: &str) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match self.status {
            Some(code) => ConsoleError::status(context, code, "Internal Server Error"),
            None => ConsoleError::transport(context, "connection refused"),
        })
    }
}

impl CollectionSource<Post> for FailingSource {
    fn list(&self) -> Result<Vec<Post>> {
        self.fail("GET /posts")
    }

    fn create(&self, _item: &Post) -> Result<Post> {
        self.fail("POST /posts")
    }

    fn update(&self, _id: &RecordId, _item: &Post) -> Result<Post> {
        self.fail("PUT /posts")
    }

    fn delete(&self, _id: &RecordId) -> Result<()> {
        self.fail("DELETE /posts")
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

// ============================================================================
// Happy paths
// ============================================================================

#[test]
fn test_admin_creates_post() {
    let mut console = console(Role::Admin);
    console.open_new().unwrap();
    assert_eq!(console.dialog().map(Dialog::title), Some("New Post"));

    console
        .update_draft(Some("fresh".into()), Some("content".into()))
        .unwrap();
    console.submit().unwrap();

    assert!(console.dialog().is_none());
    assert_eq!(console.flash().peek(), Some("Post created"));
    assert_eq!(console.table().working_len(), 13);

    let created = console.table().find(&id(13)).unwrap();
    assert_eq!(created.title, "fresh");
    assert_eq!(created.user_id, 1);
    assert_eq!(console.source().len(), 13);
}

#[test]
fn test_editor_updates_post() {
    let mut console = console(Role::Editor);
    console.open_edit(&id(5)).unwrap();
    console.update_draft(None, Some("edited".into())).unwrap();
    console.submit().unwrap();

    let post = console.table().find(&id(5)).unwrap();
    assert_eq!(post.body, "edited");
    assert_eq!(post.user_id, 2);
    assert_eq!(console.table().working_len(), 12);
    assert_eq!(console.flash().peek(), Some("Post updated"));
}

#[test]
fn test_admin_deletes_post() {
    let mut console = console(Role::Admin);
    console.open_delete(&id(4)).unwrap();
    assert!(matches!(console.dialog(), Some(Dialog::ConfirmDelete(p)) if p.id == 4));

    console.confirm_delete().unwrap();
    assert!(console.table().find(&id(4)).is_none());
    assert_eq!(console.source().len(), 11);
    assert_eq!(console.flash().peek(), Some("Post deleted"));
}

#[test]
fn test_row_activation_opens_detail_for_anyone() {
    let mut console = console(Role::None);
    console.open_detail(&id(1)).unwrap();
    match console.dialog() {
        Some(Dialog::Detail(post)) => assert_eq!(post.title, "sunt aut facere repellat provident"),
        other => panic!("unexpected dialog {other:?}"),
    }
    console.close_dialog();
    assert!(console.dialog().is_none());
}

#[test]
fn test_sort_survives_mutation() {
    let mut console = console(Role::Admin);
    console.table_mut().sort_by("id").unwrap();
    console.table_mut().sort_by("id").unwrap();
    console.table_mut().search("body of post 1");
    assert_eq!(console.table().working_len(), 4);

    console.open_delete(&id(12)).unwrap();
    console.confirm_delete().unwrap();

    // fresh data drops the narrowing but keeps the sort
    let ids: Vec<u64> = console.table().visible_page().iter().map(|p| p.id).collect();
    assert_eq!(ids, (2..=11).rev().collect::<Vec<u64>>());
    assert_eq!(console.table().state().mode(), NarrowingMode::None);
}

// ============================================================================
// Role gate
// ============================================================================

#[test]
fn test_gate_refuses_and_reports() {
    let mut console = console(Role::Editor);

    let err = console.open_new().unwrap_err();
    assert!(err.is_access_denied());
    assert!(console.dialog().is_none());

    let notice = console.notice().unwrap();
    assert_eq!(notice.kind, FailureKind::AccessDenied);
    assert_eq!(notice.title, "Access denied!");

    console.on_navigate();
    assert!(console.notice().is_none());

    assert!(console.open_delete(&id(1)).unwrap_err().is_access_denied());
}

#[test]
fn test_gate_rechecked_at_submit() {
    let mut console = console(Role::Admin);
    console.open_new().unwrap();
    console.set_user(user(Role::Reader));

    let err = console.submit().unwrap_err();
    assert!(err.is_access_denied());
    assert_eq!(console.source().len(), 12);
    // the form stays open for another attempt
    assert!(console.dialog().is_some());
    assert!(!console.is_busy());
}

#[test]
fn test_anonymous_cannot_mutate() {
    let mut console = console(Role::None);
    assert!(console.open_edit(&id(1)).unwrap_err().is_access_denied());
    assert!(!console.table().affordances(console.role()).has_row_actions());
}

// ============================================================================
// Two-phase mutations
// ============================================================================

#[test]
fn test_second_submit_while_in_flight_is_refused() {
    let mut console = console(Role::Admin);
    console.open_new().unwrap();
    let pending = console.begin_submit().unwrap();

    assert!(matches!(
        console.begin_submit(),
        Err(ConsoleError::MutationInFlight)
    ));
    assert!(matches!(
        console.open_edit(&id(1)),
        Err(ConsoleError::MutationInFlight)
    ));

    let result = pending.request.perform(console.source());
    console.finish(pending, result).unwrap();
    assert!(!console.is_busy());
    assert_eq!(console.source().len(), 13);
}

#[test]
fn test_response_after_close_is_dropped() {
    let mut console = console(Role::Admin);
    console.open_delete(&id(2)).unwrap();
    let pending = console.begin_delete().unwrap();
    assert!(matches!(pending.request, MutationRequest::Delete(_)));

    console.close_dialog();
    let result = pending.request.perform(console.source());
    console.finish(pending, result).unwrap();

    // the source changed but the table was not told
    assert_eq!(console.source().len(), 11);
    assert!(console.table().find(&id(2)).is_some());
    assert!(!console.flash().has_message());
}

#[test]
fn test_old_ticket_does_not_complete_new_mutation() {
    let mut console = console(Role::Admin);
    console.open_edit(&id(3)).unwrap();
    let first = console.begin_submit().unwrap();
    console.close_dialog();

    console.open_edit(&id(3)).unwrap();
    console.update_draft(Some("second".into()), None).unwrap();
    let second = console.begin_submit().unwrap();
    assert_ne!(first.ticket(), second.ticket());

    let stale = first.request.perform(console.source());
    console.finish(first, stale).unwrap();
    assert!(console.is_busy());

    let result = second.request.perform(console.source());
    console.finish(second, result).unwrap();
    assert_eq!(console.table().find(&id(3)).unwrap().title, "second");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_status_failure_on_load() {
    let mut console =
        Console::new(FailingSource::status(500), user(Role::Admin), TableOptions::default(), 30)
            .unwrap();

    let err = console.load().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Status(500));
    assert!(err.to_string().contains("loading posts"));

    let notice = console.notice().unwrap();
    assert_eq!(notice.title, "status: 500");
    assert_eq!(notice.message, "message: Internal Server Error");
    assert!(console.table().is_empty_view());
}

#[test]
fn test_transport_failure_keeps_form_open() {
    let source = FailingSource::offline();
    let mut console = Console::new(source, user(Role::Admin), TableOptions::default(), 30).unwrap();

    console.open_new().unwrap();
    let err = console.submit().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    assert_eq!(console.notice().unwrap().title, "Something went wrong!");
    assert!(matches!(console.dialog(), Some(Dialog::Edit { is_new: true, .. })));
    assert!(!console.is_busy());
    assert_eq!(console.source().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_no_dialog_errors() {
    let mut console = console(Role::Admin);
    assert!(matches!(
        console.update_draft(Some("x".into()), None),
        Err(ConsoleError::NoDialog(_))
    ));
    assert!(matches!(
        console.begin_delete(),
        Err(ConsoleError::NoDialog(_))
    ));
    assert!(console.notice().is_none());
}

#[test]
fn test_boxed_source() {
    let source: Box<dyn CollectionSource<Post>> = Box::new(MemorySource::new(demo_posts()));
    let mut console = Console::new(source, user(Role::Reader), TableOptions::default(), 30).unwrap();
    console.load().unwrap();
    assert_eq!(console.table().working_len(), 12);
    assert_eq!(console.source().name(), "memory");
}
