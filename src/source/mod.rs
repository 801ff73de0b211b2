//! Collection sources.
//!
//! A collection source stores the items a console manages. The table never
//! talks to a source itself; its host lists items into it and forwards
//! mutations.
//!
//! - [`MemorySource`] keeps items in process memory (offline use and tests).
//! - [`HttpSource`] talks to a JSON REST API. Requires the `remote` feature.

#[cfg(feature = "remote")]
mod http;
mod memory;
mod traits;

#[cfg(feature = "remote")]
pub use http::{HttpSource, HttpSourceConfig};
pub use memory::{MemorySource, demo_posts};
pub use traits::{CollectionSource, Entity, RecordId};
