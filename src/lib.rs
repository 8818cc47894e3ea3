#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-windowed-list/")]

//! # bubbletea-windowed-list
//!
//! A windowed-loading list controller for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. Large record collections are filtered down by a search string
//! and categorical filters, then materialised one page at a time as the user
//! scrolls in either direction.
//!
//! ## Overview
//!
//! The crate is split into four layers that can be used on their own or
//! through the composed [`Controller`]:
//!
//! | Module | Role |
//! |--------|------|
//! | [`filter`] | Derives the filtered record set from search and filter criteria |
//! | [`window`] | Owns the `[start, end)` window, loading guards and stale-load detection |
//! | [`scroll`] | Turns viewport samples into load signals and keeps the viewport anchored |
//! | [`render`] | Projects the window into visible rows and spacer counts |
//!
//! [`summary`] formats "Showing X–Y of N" status lines, [`loader`] supplies
//! the deferred completion of loads, and [`key`] holds key bindings.
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_windowed_list::prelude::*;
//! use std::borrow::Cow;
//!
//! #[derive(Clone)]
//! struct Student { id: u32, name: String, class: String }
//!
//! impl std::fmt::Display for Student {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{}", self.name)
//!     }
//! }
//!
//! impl Record for Student {
//!     type Id = u32;
//!     fn id(&self) -> u32 { self.id }
//!     fn field(&self, name: &str) -> Option<Cow<'_, str>> {
//!         match name {
//!             "name" => Some(Cow::Borrowed(&self.name)),
//!             "class" => Some(Cow::Borrowed(&self.class)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let students: Vec<Student> = (0..100)
//!     .map(|id| Student { id, name: format!("Student {id}"), class: format!("{}", 8 + id % 3) })
//!     .collect();
//!
//! let config = Config::new()
//!     .with_searchable_fields(["name"])
//!     .with_filterable_fields(["class"]);
//! let mut list = Controller::new(students, PlainDelegate, config);
//! assert_eq!(list.summary().range_text(), "Showing 1–20 of 100");
//!
//! list.set_filter("class", "9");
//! assert_eq!(list.len(), 33);
//! assert_eq!(list.window(), Window::new(0, 20));
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! [`Controller`] implements `bubbletea_rs::Model`. A host embedding it
//! forwards its messages and samples its viewport:
//!
//! ```rust
//! use bubbletea_windowed_list::prelude::*;
//! use bubbletea_rs::{Cmd, Msg};
//!
//! struct App<R: Record> {
//!     list: Controller<R>,
//! }
//!
//! impl<R: Record> App<R> {
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.list.update(msg)
//!     }
//!
//!     fn scrolled(&mut self, top: f64, height: f64, client: f64) -> Option<Cmd> {
//!         let msg = ScrollMsg::new(self.list.id(), ScrollMetrics::new(top, height, client));
//!         self.list.update(Box::new(msg))
//!     }
//! }
//! ```

pub mod controller;
pub mod filter;
pub mod key;
pub mod loader;
pub mod render;
pub mod scroll;
pub mod summary;
pub mod window;

pub use controller::{Config, Controller, ControllerKeyMap, ScrollMsg, DEFAULT_PAGE_SIZE};
pub use filter::{filter, filter_indices, FieldSet, FilterCriteria, Record, SearchMode, ALL};
pub use key::{Binding, Help as KeyHelp, KeyMap};
pub use loader::{DelayedLoader, LoadError, LoadedMsg, Loader, DEFAULT_LOAD_LATENCY};
pub use render::{project, PlainDelegate, Projection, RowDelegate};
pub use scroll::{ScrollDirection, ScrollMetrics, ScrollMonitor, ScrollSignal};
pub use summary::{PageStyle, Summary, SummaryStyles};
pub use window::{
    Completion, Direction, LoadState, LoadTicket, Retraction, Window, WindowState,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_windowed_list::prelude::*;
/// ```
pub mod prelude {
    pub use crate::controller::{Config, Controller, ControllerKeyMap, ScrollMsg};
    pub use crate::filter::{FieldSet, FilterCriteria, Record, SearchMode};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::loader::{DelayedLoader, LoadError, LoadedMsg, Loader};
    pub use crate::render::{PlainDelegate, Projection, RowDelegate};
    pub use crate::scroll::{ScrollMetrics, ScrollSignal};
    pub use crate::summary::{PageStyle, Summary};
    pub use crate::window::{LoadState, Window};
}
