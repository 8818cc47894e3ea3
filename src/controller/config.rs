//! Controller configuration.

use crate::filter::{FieldSet, SearchMode};
use crate::loader::DEFAULT_LOAD_LATENCY;
use crate::scroll::{clamp_ratio, DEFAULT_BACKWARD_THRESHOLD, DEFAULT_FORWARD_THRESHOLD};
use crate::summary::PageStyle;
use crate::window::Retraction;
use std::time::Duration;

/// Default number of rows added or removed per load.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Options recognised by a windowed list controller.
///
/// Values are clamped rather than rejected: the page size is at least 1 and the
/// thresholds stay within `[0, 1]`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::controller::Config;
///
/// let config = Config::new()
///     .with_page_size(15)
///     .with_thresholds(0.9, 0.1)
///     .with_searchable_fields(["name", "email"])
///     .with_filterable_fields(["class", "section"]);
///
/// assert_eq!(config.page_size, 15);
/// assert_eq!(config.fields.searchable, vec!["name", "email"]);
///
/// // Out of range values are clamped
/// let clamped = Config::new().with_page_size(0).with_thresholds(2.0, -1.0);
/// assert_eq!(clamped.page_size, 1);
/// assert_eq!(clamped.forward_threshold, 1.0);
/// assert_eq!(clamped.backward_threshold, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Rows per load.
    pub page_size: usize,
    /// Scrolled ratio past which a forward load is proposed.
    pub forward_threshold: f64,
    /// Fraction of the viewport height near the top that proposes a backward load.
    pub backward_threshold: f64,
    /// Searchable and filterable record fields.
    pub fields: FieldSet,
    /// How the search string is matched.
    pub search_mode: SearchMode,
    /// What backward loads do to the trailing edge.
    pub retraction: Retraction,
    /// Delay of the default loader.
    pub load_latency: Duration,
    /// How the page indicator is drawn.
    pub page_style: PageStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            forward_threshold: DEFAULT_FORWARD_THRESHOLD,
            backward_threshold: DEFAULT_BACKWARD_THRESHOLD,
            fields: FieldSet::default(),
            search_mode: SearchMode::default(),
            retraction: Retraction::default(),
            load_latency: DEFAULT_LOAD_LATENCY,
            page_style: PageStyle::default(),
        }
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size, clamped to at least 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the forward and backward thresholds, clamped into `[0, 1]`.
    pub fn with_thresholds(mut self, forward: f64, backward: f64) -> Self {
        self.forward_threshold = clamp_ratio(forward);
        self.backward_threshold = clamp_ratio(backward);
        self
    }

    /// Sets the fields matched by the search string.
    pub fn with_searchable_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields.searchable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fields accepted as exact-match filter keys.
    pub fn with_filterable_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields.filterable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the search mode.
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Sets the retraction policy.
    pub fn with_retraction(mut self, retraction: Retraction) -> Self {
        self.retraction = retraction;
        self
    }

    /// Sets the delay of the default loader.
    pub fn with_load_latency(mut self, latency: Duration) -> Self {
        self.load_latency = latency;
        self
    }

    /// Sets the page indicator style.
    pub fn with_page_style(mut self, style: PageStyle) -> Self {
        self.page_style = style;
        self
    }
}
