//! Incremental reveal policy (made by FontLab https://www.fontlab.com/)
//!
//! The host reports scroll geometry; [`ScrollMetrics::is_near_end`] turns it
//! into a level-triggered "near the end" signal, and [`grow_reveal`] decides
//! the next reveal limit. Both are pure so they can be called on every scroll
//! event without debouncing.

use serde::{Deserialize, Serialize};

/// Results exposed when a session starts.
pub const INITIAL_REVEAL: usize = 12;

/// Results added per proximity signal.
pub const REVEAL_STEP: usize = 8;

/// Remaining scroll distance under which the host should ask for more.
pub const PROXIMITY_THRESHOLD: f64 = 1000.0;

/// Grow the reveal limit by `step`, capped at `catalog_size`.
///
/// Never decreases the limit: a `current` already at or past the cap is
/// returned unchanged.
pub fn grow_reveal(current: usize, catalog_size: usize, step: usize) -> usize {
    if current >= catalog_size {
        return current;
    }
    current.saturating_add(step).min(catalog_size)
}

/// Scroll geometry observed by the host, in any consistent unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Visible extent of the viewport.
    pub viewport_extent: f64,
    /// Distance scrolled from the top of the content.
    pub scroll_offset: f64,
    /// Total extent of the scrollable content.
    pub content_extent: f64,
}

impl ScrollMetrics {
    pub fn new(viewport_extent: f64, scroll_offset: f64, content_extent: f64) -> Self {
        Self {
            viewport_extent,
            scroll_offset,
            content_extent,
        }
    }

    /// True while the unrendered distance below the viewport is within
    /// `threshold`, including pages shorter than the viewport.
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.viewport_extent + self.scroll_offset >= self.content_extent - threshold
    }
}
