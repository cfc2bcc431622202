//! Tick-driven UI timers: the UPI payment countdown and the home slideshow.
//!
//! Both are plain state machines that can be stepped by hand, plus an async
//! driver built on `tokio::time::interval`.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

/// Countdown tick period.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Visible countdown shown while waiting for a UPI payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Start a countdown of `secs` seconds.
    #[must_use]
    pub const fn new(secs: u32) -> Self {
        Self { remaining: secs }
    }

    /// Seconds left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the countdown has reached zero.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Status line shown next to the payment form.
    #[must_use]
    pub fn text(&self) -> String {
        format!("Open your UPI app to pay… {}s", self.remaining)
    }

    /// Advance by one second. Returns whether the countdown is now done.
    pub const fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_done()
    }

    /// Drive the countdown to zero, one tick per second.
    ///
    /// `on_tick` sees the countdown after every tick, including the final one.
    pub async fn run<F>(mut self, mut on_tick: F)
    where
        F: FnMut(&Self),
    {
        let mut ticker = interval(COUNTDOWN_TICK);
        // The first tick completes immediately
        ticker.tick().await;

        while !self.is_done() {
            ticker.tick().await;
            self.tick();
            on_tick(&self);
        }
    }
}

/// Rotating image carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slideshow {
    images: Vec<String>,
    index: usize,
    period: Duration,
}

impl Slideshow {
    /// Create a slideshow starting at the first image.
    #[must_use]
    pub const fn new(images: Vec<String>, period: Duration) -> Self {
        Self {
            images,
            index: 0,
            period,
        }
    }

    /// All images in display order.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Index of the active image.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The active image, if there are any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Rotation period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Move to the next image, wrapping around.
    pub fn advance(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    /// Rotate `rounds` times, once per period.
    pub async fn run<F>(&mut self, rounds: usize, mut on_change: F)
    where
        F: FnMut(&Self),
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        for _ in 0..rounds {
            ticker.tick().await;
            self.advance();
            on_change(self);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_countdown_text() {
        let mut countdown = Countdown::new(10);
        assert_eq!(countdown.text(), "Open your UPI app to pay… 10s");
        assert!(!countdown.tick());
        assert_eq!(countdown.text(), "Open your UPI app to pay… 9s");
    }

    #[test]
    fn test_countdown_saturates() {
        let mut countdown = Countdown::new(1);
        assert!(countdown.tick());
        assert!(countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_takes_one_second_per_tick() {
        let start = Instant::now();
        let mut seen = Vec::new();
        Countdown::new(10).run(|c| seen.push(c.remaining())).await;

        assert_eq!(seen, (0..10).rev().collect::<Vec<_>>());
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_countdown_finishes_immediately() {
        let start = Instant::now();
        let mut ticks = 0;
        Countdown::new(0).run(|_| ticks += 1).await;
        assert_eq!(ticks, 0);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_slideshow_wraps() {
        let images = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut slideshow = Slideshow::new(images, Duration::from_secs(3));
        assert_eq!(slideshow.current(), Some("a"));
        slideshow.advance();
        slideshow.advance();
        assert_eq!(slideshow.current(), Some("c"));
        slideshow.advance();
        assert_eq!(slideshow.current(), Some("a"));
    }

    #[test]
    fn test_empty_slideshow() {
        let mut slideshow = Slideshow::new(Vec::new(), Duration::from_secs(3));
        slideshow.advance();
        assert_eq!(slideshow.current(), None);
        assert_eq!(slideshow.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slideshow_rotates_every_period() {
        let images = (1..=4).map(|i| format!("slide-{i}")).collect();
        let mut slideshow = Slideshow::new(images, Duration::from_secs(3));
        let start = Instant::now();
        let mut shown = Vec::new();

        slideshow
            .run(5, |s| shown.push(s.current().unwrap().to_string()))
            .await;

        assert_eq!(shown, ["slide-2", "slide-3", "slide-4", "slide-1", "slide-2"]);
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }
}
