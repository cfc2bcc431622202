//! Toast notices.
//!
//! Only the latest notice is kept; it expires after the configured lifetime.

use std::time::Duration;

use tokio::time::Instant;

/// A notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

/// Holds the current toast.
#[derive(Debug, Clone)]
pub struct Toaster {
    ttl: Duration,
    current: Option<Toast>,
}

impl Toaster {
    /// Create a toaster whose notices live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Show a notice, replacing any previous one.
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "Toast");
        self.current = Some(Toast {
            message,
            shown_at: Instant::now(),
        });
    }

    /// The visible notice, if it hasn't expired.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|toast| toast.shown_at.elapsed() < self.ttl)
            .map(|toast| toast.message.as_str())
    }

    /// The latest notice regardless of expiry.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.current.as_ref().map(|toast| toast.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires() {
        let mut toaster = Toaster::new(Duration::from_millis(1800));
        assert_eq!(toaster.current(), None);

        toaster.show("Added to cart");
        assert_eq!(toaster.current(), Some("Added to cart"));

        tokio::time::advance(Duration::from_millis(1799)).await;
        assert_eq!(toaster.current(), Some("Added to cart"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(toaster.current(), None);
        assert_eq!(toaster.last(), Some("Added to cart"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_toast_wins() {
        let mut toaster = Toaster::new(Duration::from_millis(1800));
        toaster.show("Logged in");
        toaster.show("Added to cart");
        assert_eq!(toaster.current(), Some("Added to cart"));

        // A new notice restarts the lifetime
        tokio::time::advance(Duration::from_millis(1500)).await;
        toaster.show("Removed from cart");
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(toaster.current(), Some("Removed from cart"));
    }
}
