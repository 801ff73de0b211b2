//! Events a table emits to its host.

/// Requests raised by row and header controls.
///
/// The table never performs a mutation itself; the host reacts to these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<T> {
    /// "Add" button
    RequestNew,
    /// Edit control on a row
    RequestEdit(T),
    /// Delete control on a row
    RequestDelete(T),
    /// A row was clicked
    RowActivated(T),
}

impl<T> TableEvent<T> {
    /// The item the event refers to, if any.
    pub const fn item(&self) -> Option<&T> {
        match self {
            Self::RequestNew => None,
            Self::RequestEdit(item) | Self::RequestDelete(item) | Self::RowActivated(item) => {
                Some(item)
            }
        }
    }
}
