//! Scroll position monitoring.
//!
//! The [`ScrollMonitor`] turns successive viewport samples into a
//! [`ScrollSignal`]. It only proposes loads: whether a signal actually moves the
//! window is decided by the window state's own guards.
//!
//! The monitor also keeps the viewport visually anchored across backward loads.
//! When rows are prepended above the viewport the content grows by some height;
//! the next sample after the commit yields a corrected scroll offset shifted by
//! exactly that growth, so the rows under the user's eyes stay put.

/// Default ratio of scrolled content past which a forward load is proposed.
pub const DEFAULT_FORWARD_THRESHOLD: f64 = 0.8;

/// Default fraction of the viewport height near the top that proposes a backward load.
pub const DEFAULT_BACKWARD_THRESHOLD: f64 = 0.2;

/// One sample of the viewport's scroll geometry.
///
/// Units are whatever the host measures in (terminal lines, pixels); only
/// ratios and differences are used.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Offset of the viewport's top edge into the content.
    pub scroll_top: f64,
    /// Total height of the scrollable content.
    pub scroll_height: f64,
    /// Visible height of the viewport.
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Creates a sample.
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Fraction of the content above the viewport's bottom edge, or `None` for
    /// empty content.
    pub fn bottom_ratio(&self) -> Option<f64> {
        if self.scroll_height <= 0.0 {
            return None;
        }
        Some((self.scroll_top + self.client_height) / self.scroll_height)
    }
}

/// Direction of travel between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// The offset did not change.
    Still,
    /// The offset increased.
    Down,
    /// The offset decreased.
    Up,
}

/// Load proposed by a scroll sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollSignal {
    /// Nothing to do.
    #[default]
    None,
    /// The user neared the bottom; extend the trailing edge.
    Forward,
    /// The user neared the top; retract the leading edge.
    Backward,
}

/// Detects load intent from viewport samples.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::scroll::{ScrollMetrics, ScrollMonitor, ScrollSignal};
///
/// let mut monitor = ScrollMonitor::new();
/// // 85% of the content scrolled past: propose a forward load.
/// let signal = monitor.observe(ScrollMetrics::new(650.0, 1000.0, 200.0), false);
/// assert_eq!(signal, ScrollSignal::Forward);
///
/// // Scrolling back up near the top with rows above the window.
/// let signal = monitor.observe(ScrollMetrics::new(30.0, 1000.0, 200.0), true);
/// assert_eq!(signal, ScrollSignal::Backward);
/// ```
#[derive(Debug, Clone)]
pub struct ScrollMonitor {
    forward_threshold: f64,
    backward_threshold: f64,
    last_scroll_top: f64,
    anchor: Option<Anchor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    Height(f64),
    Shift(f64),
}

impl Default for ScrollMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollMonitor {
    /// Creates a monitor with the default thresholds.
    pub fn new() -> Self {
        Self {
            forward_threshold: DEFAULT_FORWARD_THRESHOLD,
            backward_threshold: DEFAULT_BACKWARD_THRESHOLD,
            last_scroll_top: 0.0,
            anchor: None,
        }
    }

    /// Sets both thresholds (builder pattern). Values are clamped into `[0, 1]`.
    pub fn with_thresholds(mut self, forward: f64, backward: f64) -> Self {
        self.forward_threshold = clamp_ratio(forward);
        self.backward_threshold = clamp_ratio(backward);
        self
    }

    /// The forward threshold.
    pub fn forward_threshold(&self) -> f64 {
        self.forward_threshold
    }

    /// The backward threshold.
    pub fn backward_threshold(&self) -> f64 {
        self.backward_threshold
    }

    /// Scroll offset of the previous sample.
    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Classifies `scroll_top` against the previous sample.
    pub fn direction(&self, scroll_top: f64) -> ScrollDirection {
        if scroll_top > self.last_scroll_top {
            ScrollDirection::Down
        } else if scroll_top < self.last_scroll_top {
            ScrollDirection::Up
        } else {
            ScrollDirection::Still
        }
    }

    /// Consumes a sample and returns the proposed load.
    ///
    /// `has_previous` tells whether the window has rows before its leading edge;
    /// without them a backward signal is never produced. A backward signal needs
    /// upward travel; a forward signal only needs the bottom ratio past the
    /// threshold, whatever the direction.
    pub fn observe(&mut self, metrics: ScrollMetrics, has_previous: bool) -> ScrollSignal {
        let direction = self.direction(metrics.scroll_top);
        self.last_scroll_top = metrics.scroll_top;

        let near_top = metrics.scroll_top < metrics.client_height * self.backward_threshold;
        if direction == ScrollDirection::Up && near_top && has_previous {
            return ScrollSignal::Backward;
        }

        match metrics.bottom_ratio() {
            Some(ratio) if ratio > self.forward_threshold => ScrollSignal::Forward,
            _ => ScrollSignal::None,
        }
    }

    /// Records the content height just before rows are prepended. The
    /// correction is the height the content grew by.
    pub fn anchor(&mut self, scroll_height: f64) {
        self.anchor = Some(Anchor::Height(scroll_height));
    }

    /// Records a fixed offset shift for a prepend that leaves the content
    /// height unchanged, e.g. when as many rows left the bottom.
    pub fn anchor_shift(&mut self, shift: f64) {
        self.anchor = Some(Anchor::Shift(shift));
    }

    /// Returns true while an anchor waits for the post-commit sample.
    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// Resolves a pending anchor against the first sample taken after the
    /// prepend.
    ///
    /// Returns the corrected scroll offset when the rows moved. The corrected
    /// offset becomes the reference for the next direction check, so the
    /// correction itself is not read as user scrolling.
    pub fn settle(&mut self, metrics: ScrollMetrics) -> Option<f64> {
        let shift = match self.anchor.take()? {
            Anchor::Height(before) => metrics.scroll_height - before,
            Anchor::Shift(shift) => shift,
        };
        if shift == 0.0 {
            return None;
        }
        let corrected = (metrics.scroll_top + shift).max(0.0);
        log::debug!(
            "scroll anchored: shift {}, top {} -> {}",
            shift,
            metrics.scroll_top,
            corrected
        );
        self.last_scroll_top = corrected;
        Some(corrected)
    }

    /// Forgets the previous sample and any pending anchor.
    pub fn reset(&mut self) {
        self.last_scroll_top = 0.0;
        self.anchor = None;
    }
}

pub(crate) fn clamp_ratio(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
