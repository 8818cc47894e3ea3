//! The controller struct, construction, accessors and input changes.

use super::config::Config;
use super::keys::ControllerKeyMap;
use crate::filter::{filter_indices, FilterCriteria, Record};
use crate::loader::{DelayedLoader, Loader};
use crate::render::{project, Projection, RowDelegate};
use crate::scroll::{ScrollMetrics, ScrollMonitor};
use crate::summary::{Summary, SummaryStyles};
use crate::window::{LoadState, LoadTicket, Window, WindowState};

/// A windowed list over a record collection.
///
/// The controller owns the records, the filter criteria, and the window into
/// the filtered set. The host feeds it scroll samples and forwards its
/// messages; it reads back the [`Projection`] to render and a [`Summary`] for
/// "showing X–Y of N" displays.
///
/// Transitions:
///
/// - changing the criteria or replacing the records resets the window to the
///   first page and invalidates any in-flight load;
/// - scroll samples and explicit requests issue at most one load at a time;
/// - a completion only commits if it was issued under the current generation.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::controller::{Config, Controller};
/// use bubbletea_windowed_list::filter::Record;
/// use bubbletea_windowed_list::render::PlainDelegate;
/// use bubbletea_windowed_list::window::Window;
/// use std::borrow::Cow;
/// use std::fmt;
///
/// #[derive(Clone)]
/// struct Patient { id: u32, name: String }
///
/// impl fmt::Display for Patient {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}", self.name)
///     }
/// }
///
/// impl Record for Patient {
///     type Id = u32;
///     fn id(&self) -> u32 { self.id }
///     fn field(&self, name: &str) -> Option<Cow<'_, str>> {
///         (name == "name").then(|| Cow::Borrowed(self.name.as_str()))
///     }
/// }
///
/// let patients: Vec<Patient> = (0..100)
///     .map(|id| Patient { id, name: format!("Patient {id}") })
///     .collect();
/// let config = Config::new().with_page_size(20).with_searchable_fields(["name"]);
/// let mut list = Controller::new(patients, PlainDelegate, config);
///
/// assert_eq!(list.window(), Window::new(0, 20));
///
/// list.set_search("patient 9");
/// // "Patient 9" and "Patient 90".."Patient 99"
/// assert_eq!(list.len(), 11);
/// assert_eq!(list.window(), Window::new(0, 11));
/// ```
pub struct Controller<R: Record> {
    pub(super) items: Vec<R>,
    pub(super) criteria: FilterCriteria,
    pub(super) config: Config,
    /// Positions into `items` of the records passing `criteria`.
    pub(super) filtered: Vec<usize>,
    pub(super) window: WindowState,
    pub(super) monitor: ScrollMonitor,
    pub(super) last_metrics: Option<ScrollMetrics>,
    pub(super) scroll_correction: Option<f64>,
    pub(super) loader: Box<dyn Loader>,
    pub(super) delegate: Box<dyn RowDelegate<R> + Send + Sync>,
    pub(super) keymap: ControllerKeyMap,
    pub(super) styles: SummaryStyles,
}

impl<R: Record> Controller<R> {
    /// Creates a controller positioned at the first page of `items`.
    pub fn new<D>(items: Vec<R>, delegate: D, config: Config) -> Self
    where
        D: RowDelegate<R> + Send + Sync + 'static,
    {
        let window = WindowState::new(config.page_size).with_retraction(config.retraction);
        let monitor = ScrollMonitor::new()
            .with_thresholds(config.forward_threshold, config.backward_threshold);
        let loader = DelayedLoader::new(config.load_latency);

        let mut controller = Self {
            items,
            criteria: FilterCriteria::default(),
            config,
            filtered: Vec::new(),
            window,
            monitor,
            last_metrics: None,
            scroll_correction: None,
            loader: Box::new(loader),
            delegate: Box::new(delegate),
            keymap: ControllerKeyMap::default(),
            styles: SummaryStyles::default(),
        };
        controller.refilter();
        controller
    }

    /// Replaces the loader (builder pattern).
    pub fn with_loader<L: Loader + 'static>(mut self, loader: L) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Replaces the key bindings (builder pattern).
    pub fn with_keymap(mut self, keymap: ControllerKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the status line styles (builder pattern).
    pub fn with_styles(mut self, styles: SummaryStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Applies initial criteria (builder pattern).
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.set_criteria(criteria);
        self
    }

    /// Identifier used to route scroll and load messages to this controller.
    pub fn id(&self) -> i64 {
        self.window.id()
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The key bindings.
    pub fn keymap(&self) -> &ControllerKeyMap {
        &self.keymap
    }

    /// All records, unfiltered.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    /// The current criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Length of the filtered set.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    /// Returns true if no record passes the criteria.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// The window into the filtered set.
    pub fn window(&self) -> Window {
        self.window.window()
    }

    /// Derived loading information.
    pub fn load_state(&self) -> LoadState {
        self.window.load_state()
    }

    /// The load currently in flight, if any.
    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.window.in_flight()
    }

    /// The filtered records, in collection order.
    pub fn filtered_items(&self) -> Vec<&R> {
        self.filtered.iter().map(|&i| &self.items[i]).collect()
    }

    /// The records to render plus spacer counts.
    pub fn projection(&self) -> Projection<&R> {
        let positions = project(&self.filtered, self.window.window());
        Projection {
            visible: positions
                .visible
                .into_iter()
                .map(|&i| &self.items[i])
                .collect(),
            leading_spacer_count: positions.leading_spacer_count,
            trailing_spacer_count: positions.trailing_spacer_count,
        }
    }

    /// Records inside the window.
    pub fn visible_items(&self) -> Vec<&R> {
        self.projection().visible
    }

    /// Position summary for status displays.
    pub fn summary(&self) -> Summary {
        Summary::new(
            self.window.window(),
            self.window.load_state(),
            self.filtered.len(),
            self.window.page_size(),
        )
    }

    /// Height of one rendered row, as reported by the delegate.
    pub fn row_height(&self) -> usize {
        self.delegate.height()
    }

    /// Scroll offset the host should apply to keep its viewport anchored after
    /// a backward load. Returns each correction once.
    pub fn take_scroll_correction(&mut self) -> Option<f64> {
        self.scroll_correction.take()
    }

    /// Replaces the records and resets the window.
    pub fn set_items(&mut self, items: Vec<R>) {
        self.items = items;
        self.refilter();
    }

    /// Appends records, e.g. a page delivered by a paged backend.
    ///
    /// The window keeps its position; only the filtered length grows.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = R>) {
        let offset = self.items.len();
        self.items.extend(items);
        let added = filter_indices(
            &self.items[offset..],
            &self.criteria,
            &self.config.fields,
            self.config.search_mode,
        );
        self.filtered.extend(added.into_iter().map(|i| i + offset));
        self.window.set_len(self.filtered.len());
    }

    /// Replaces the search string. Resets the window if it changed.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let mut criteria = self.criteria.clone();
        criteria.set_search(search);
        self.set_criteria(criteria);
    }

    /// Selects a filter value. Resets the window if the criteria changed.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let mut criteria = self.criteria.clone();
        criteria.set_filter(key, value);
        self.set_criteria(criteria);
    }

    /// Clears every filter selection, keeping the search string.
    pub fn clear_filters(&mut self) {
        let mut criteria = self.criteria.clone();
        criteria.clear_filters();
        self.set_criteria(criteria);
    }

    /// Replaces the criteria. Resets the window if they changed.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria == self.criteria {
            return;
        }
        self.criteria = criteria;
        self.refilter();
    }

    /// Recomputes the filtered set and restarts from the first page.
    fn refilter(&mut self) {
        self.filtered = filter_indices(
            &self.items,
            &self.criteria,
            &self.config.fields,
            self.config.search_mode,
        );
        self.window.reset(self.filtered.len());
        self.monitor.reset();
        self.scroll_correction = None;
    }
}
