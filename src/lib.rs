//! **A role-gated CRUD console over a collection of posts.**
//!
//! `postdesk` is built around a generic tabular data engine: given an
//! in-memory collection of records and a set of column descriptors, a
//! [`Table`] searches or filters them, sorts, paginates and decides which
//! row controls the signed-in user may see. On top of it, a [`Console`]
//! hosts a table of [`Post`]s loaded from a collection source and turns row
//! controls into create, edit and delete dialogs.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Record`], [`Value`], [`Column`] and the [`Post`] and
//!   [`User`] types.
//! - **[`table`]**: the engine. Every state change goes through a single
//!   reducer so the working collection, page count and visible page always
//!   agree.
//! - **[`source`]**: where items live. [`MemorySource`] for offline use and
//!   tests; `HttpSource` for a JSON REST API (`remote` feature).
//! - **[`console`]**: dialogs, two-phase mutations, flash messages and the
//!   error boundary.
//! - **[`config`]**: YAML configuration with discovery, validation and
//!   presets.
//! - **[`cli`]**: the handlers behind the `postdesk` binary.
//!
//! ## Getting Started
//!
//! ```
//! use postdesk::{Console, MemorySource, Role, TableOptions, User, demo_posts};
//!
//! let editor = User::new(2, "editor@example.com", Role::Editor);
//! let mut console = Console::new(
//!     MemorySource::new(demo_posts()),
//!     Some(editor),
//!     TableOptions::default().with_page_size(std::num::NonZeroUsize::new(5).unwrap()),
//!     30,
//! )?;
//! console.load()?;
//!
//! let table = console.table();
//! assert_eq!(table.page_info().total_pages, 3);
//! assert!(table.affordances(Role::Editor).edit);
//! assert!(!table.affordances(Role::Editor).delete);
//! # Ok::<(), postdesk::ConsoleError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): enables `HttpSource` and pulls in `reqwest`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Page arithmetic and id conversions are bounded in practice
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::unused_self,
    // Variable names like `min`/`mid` or `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod source;
pub mod table;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use console::{Console, Dialog, ErrorBoundary, ErrorNotice, FlashMessage, PendingMutation};
pub use error::{ConsoleError, ErrorContext, FailureKind, Result, SourceErrorKind};
pub use model::{Column, Post, Record, Role, User, Value, post_columns};
#[cfg(feature = "remote")]
pub use source::{HttpSource, HttpSourceConfig};
pub use source::{CollectionSource, Entity, MemorySource, RecordId, demo_posts};
pub use table::{
    Action, NarrowingMode, SortOrder, StructuredFilter, Table, TableEvent, TableOptions,
    TableState, reduce,
};
