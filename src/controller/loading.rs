//! Load requests, scroll handling and completion for the controller.

use super::model::Controller;
use crate::filter::Record;
use crate::loader::LoadedMsg;
use crate::scroll::{ScrollMetrics, ScrollSignal};
use crate::window::{Completion, Direction, Retraction};
use bubbletea_rs::Cmd;

impl<R: Record> Controller<R> {
    /// Requests a forward load.
    ///
    /// Returns the command completing the load, or `None` if a load is already
    /// in flight or the window already reaches the end of the filtered set.
    pub fn load_more(&mut self) -> Option<Cmd> {
        let ticket = self.window.begin_load_more()?;
        Some(self.loader.schedule(ticket))
    }

    /// Requests a backward load.
    ///
    /// Returns the command completing the load, or `None` if a load is already
    /// in flight or the window already starts at the first record.
    pub fn load_previous(&mut self) -> Option<Cmd> {
        let ticket = self.window.begin_load_previous()?;
        Some(self.loader.schedule(ticket))
    }

    /// Feeds one viewport sample.
    ///
    /// The first sample after a backward load resolves the scroll anchor: when
    /// the content grew, the corrected offset is stored for
    /// [`take_scroll_correction`](Controller::take_scroll_correction) and the
    /// sample is not used for load detection. Otherwise the sample may issue a
    /// load, whose command is returned.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<Cmd> {
        if let Some(corrected) = self.monitor.settle(metrics) {
            self.scroll_correction = Some(corrected);
            self.last_metrics = Some(ScrollMetrics {
                scroll_top: corrected,
                ..metrics
            });
            return None;
        }
        self.last_metrics = Some(metrics);

        let has_previous = self.window.load_state().has_previous;
        match self.monitor.observe(metrics, has_previous) {
            ScrollSignal::Forward => self.load_more(),
            ScrollSignal::Backward => self.load_previous(),
            ScrollSignal::None => None,
        }
    }

    /// Applies a completed load. Returns true if the window state changed.
    ///
    /// Completions for another controller, or issued before the latest reset,
    /// are discarded. A failed completion clears the loading flag and leaves
    /// the window where it was.
    pub fn handle_loaded(&mut self, msg: &LoadedMsg) -> bool {
        if msg.ticket.id != self.id() {
            return false;
        }

        if let Err(err) = &msg.outcome {
            if self.window.abandon(msg.ticket) {
                log::warn!("window {}: {:?} load failed: {}", self.id(), msg.ticket.direction, err);
                return true;
            }
            return false;
        }

        match self.window.complete(msg.ticket) {
            Completion::Stale => false,
            Completion::Committed { before, after } => {
                let prepended = before.start.saturating_sub(after.start);
                if msg.ticket.direction == Direction::Backward && prepended > 0 {
                    self.anchor_prepended(prepended);
                }
                true
            }
        }
    }

    /// Arms the scroll anchor for `rows` rows prepended above the viewport.
    ///
    /// The offset shifts by the height of those rows. A constant span drops as
    /// many rows at the bottom, so the content height does not change and the
    /// shift comes from the row height instead of the next sample.
    fn anchor_prepended(&mut self, rows: usize) {
        match self.config.retraction {
            Retraction::KeepTrailingEdge => {
                if let Some(metrics) = self.last_metrics {
                    self.monitor.anchor(metrics.scroll_height);
                }
            }
            Retraction::ConstantSpan => {
                let shift = rows * self.row_height();
                self.monitor.anchor_shift(shift as f64);
            }
        }
    }
}
