//! Deferred load completion.
//!
//! Moving a window edge is a two-phase operation: the controller issues a
//! [`LoadTicket`] and hands it to a [`Loader`], which returns a command that
//! eventually delivers a [`LoadedMsg`] back through the bubbletea-rs runtime.
//!
//! [`DelayedLoader`] simulates latency with a timer and always succeeds; it
//! stands in for a paged backend. A backend-driven loader would fetch the page
//! inside its command, append the records to the controller, and report failures
//! through [`LoadError`].

use crate::window::LoadTicket;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;
use thiserror::Error;

/// Default latency of [`DelayedLoader`].
pub const DEFAULT_LOAD_LATENCY: Duration = Duration::from_millis(300);

/// Failure reported by a loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The backend could not produce the requested page.
    #[error("failed to load page: {0}")]
    Backend(String),
    /// The request was abandoned before completing.
    #[error("load request cancelled")]
    Cancelled,
}

/// Completion of a load, routed back to the controller that issued it.
#[derive(Debug, Clone)]
pub struct LoadedMsg {
    /// The ticket being completed.
    pub ticket: LoadTicket,
    /// Whether the load succeeded.
    pub outcome: Result<(), LoadError>,
}

impl LoadedMsg {
    /// A successful completion.
    pub fn completed(ticket: LoadTicket) -> Self {
        Self {
            ticket,
            outcome: Ok(()),
        }
    }

    /// A failed completion.
    pub fn failed(ticket: LoadTicket, error: LoadError) -> Self {
        Self {
            ticket,
            outcome: Err(error),
        }
    }
}

/// Produces the command that completes a load.
///
/// This is the substitution point between local slicing and a real paged
/// fetch: the window manager only sees the [`LoadedMsg`] that comes back.
pub trait Loader: Send + Sync {
    /// Schedules completion of `ticket`.
    fn schedule(&self, ticket: LoadTicket) -> Cmd;
}

/// Completes every load successfully after a fixed delay.
///
/// A zero delay completes on the next poll of the command, without a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedLoader {
    latency: Duration,
}

impl DelayedLoader {
    /// Creates a loader that completes after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The configured delay.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for DelayedLoader {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_LATENCY)
    }
}

impl Loader for DelayedLoader {
    fn schedule(&self, ticket: LoadTicket) -> Cmd {
        if self.latency.is_zero() {
            return Box::pin(async move { Some(Box::new(LoadedMsg::completed(ticket)) as Msg) });
        }
        bubbletea_tick(self.latency, move |_| {
            Box::new(LoadedMsg::completed(ticket)) as Msg
        })
    }
}
