//! Windowed list controller.
//!
//! [`Controller`] composes the filter reducer, the window state, the scroll
//! monitor and the render adapter into one component per list screen. It
//! follows the Elm architecture used by bubbletea-rs: messages go in through
//! [`Controller::update`], commands come out, and [`Controller::view`] renders
//! the current window.
//!
//! ## Messages
//!
//! - [`ScrollMsg`]: a viewport sample from the host, routed by controller id.
//! - [`LoadedMsg`](crate::loader::LoadedMsg): completion of a load issued by
//!   this controller. Completions from before the latest filter reset are
//!   dropped.
//! - `KeyMsg`: the [`ControllerKeyMap`] bindings request loads directly.
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_windowed_list::controller::{Config, Controller, ScrollMsg};
//! use bubbletea_windowed_list::filter::Record;
//! use bubbletea_windowed_list::render::PlainDelegate;
//! use bubbletea_windowed_list::scroll::ScrollMetrics;
//! use std::borrow::Cow;
//!
//! #[derive(Clone)]
//! struct Row(u32);
//!
//! impl std::fmt::Display for Row {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "row {}", self.0)
//!     }
//! }
//!
//! impl Record for Row {
//!     type Id = u32;
//!     fn id(&self) -> u32 { self.0 }
//!     fn field(&self, _: &str) -> Option<Cow<'_, str>> { None }
//! }
//!
//! let mut list = Controller::new((0..100).map(Row).collect(), PlainDelegate, Config::new());
//!
//! // The host reports that its viewport is near the bottom of the 20 rows.
//! let msg = ScrollMsg::new(list.id(), ScrollMetrics::new(10.0, 20.0, 8.0));
//! let cmd = list.update(Box::new(msg));
//! assert!(cmd.is_some());
//! assert!(list.load_state().loading);
//! ```

mod config;
mod keys;
mod loading;
mod model;


pub use config::{Config, DEFAULT_PAGE_SIZE};
pub use keys::ControllerKeyMap;
pub use model::Controller;

use crate::filter::Record;
use crate::loader::LoadedMsg;
use crate::render::PlainDelegate;
use crate::scroll::ScrollMetrics;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::fmt::Display;

/// A viewport sample addressed to one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMsg {
    /// Target controller, see [`Controller::id`].
    pub id: i64,
    /// The sample.
    pub metrics: ScrollMetrics,
}

impl ScrollMsg {
    /// Creates a scroll message for controller `id`.
    pub fn new(id: i64, metrics: ScrollMetrics) -> Self {
        Self { id, metrics }
    }
}

impl<R: Record> Controller<R> {
    /// Processes a message and returns the command to run, if any.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(loaded) = msg.downcast_ref::<LoadedMsg>() {
            self.handle_loaded(loaded);
            return None;
        }

        if let Some(scroll) = msg.downcast_ref::<ScrollMsg>() {
            if scroll.id != self.id() {
                return None;
            }
            return self.on_scroll(scroll.metrics);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.load_more.matches(key_msg) {
                return self.load_more();
            } else if self.keymap.load_previous.matches(key_msg) {
                return self.load_previous();
            }
        }

        None
    }

    /// Renders the rows inside the window followed by the status line.
    ///
    /// Spacers are not drawn; hosts that need scrollbar-accurate layout read
    /// [`Controller::projection`] and reserve the spacer heights themselves.
    pub fn view(&self) -> String {
        let projection = self.projection();
        let start = projection.leading_spacer_count;

        let mut sections: Vec<String> = projection
            .visible
            .iter()
            .enumerate()
            .map(|(offset, item)| self.delegate.render(start + offset, item))
            .collect();

        sections.push(self.styles.render(&self.summary(), self.config.page_style));
        sections.join("\n")
    }
}

impl<R> BubbleTeaModel for Controller<R>
where
    R: Record + Display + Send + Sync + 'static,
{
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new(), PlainDelegate, Config::default()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Controller::update(self, msg)
    }

    fn view(&self) -> String {
        Controller::view(self)
    }
}
