//! Item model for postdesk.
//!
//! The table engine works over any [`Record`]: a type whose scalar fields
//! ([`Value`]) can be read by name. [`Post`] is the record managed by the
//! console; [`Column`] describes how a field is shown, sorted and filtered.

mod column;
mod post;
mod record;
mod user;
mod value;

pub use column::{Column, FilterKind, RenderFn};
pub use post::{MAX_CHARS_PER_COLUMN, Post, post_columns, truncate_chars};
pub use record::Record;
pub use user::{Role, RoleProvider, User};
pub use value::Value;
