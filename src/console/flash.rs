//! Transient confirmation messages ("Post created").

use std::time::{Duration, Instant};

/// A one-line message shown after a successful action.
///
/// ```
/// use postdesk::console::FlashMessage;
///
/// let mut flash = FlashMessage::new();
/// flash.set("Post deleted");
/// assert_eq!(flash.peek(), Some("Post deleted"));
/// assert_eq!(flash.take().as_deref(), Some("Post deleted"));
/// assert!(!flash.has_message());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlashMessage {
    message: Option<String>,
    set_at: Option<Instant>,
    /// None keeps the message until cleared
    expire_after: Option<Duration>,
}

impl FlashMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A flash that expires `duration` after being set.
    #[must_use]
    pub const fn expiring(duration: Duration) -> Self {
        Self {
            message: None,
            set_at: None,
            expire_after: Some(duration),
        }
    }

    pub fn set(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.set_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// The current message, dropping it first if it has expired.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.expire_after)
            && set_at.elapsed() >= duration
        {
            self.clear();
        }
        self.message.as_deref()
    }

    /// The current message without checking expiry.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }

    /// Take the message, clearing it.
    pub const fn take(&mut self) -> Option<String> {
        self.set_at = None;
        self.message.take()
    }
}
