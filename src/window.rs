//! Window state for incremental, bidirectional loading.
//!
//! The [`WindowState`] owns the half-open range `[start, end)` of the filtered
//! record set that is currently materialised, plus the in-flight load, if any.
//! Loads are two-phase: [`WindowState::begin_load_more`] /
//! [`WindowState::begin_load_previous`] hand out a [`LoadTicket`] and mark the
//! state as loading; [`WindowState::complete`] commits the ticket once the
//! deferred completion arrives.
//!
//! Every [`WindowState::reset`] bumps a generation counter. A ticket issued
//! under an older generation is stale and its completion is discarded, so a slow
//! load from a previous search can never clobber a freshly reset window.
//!
//! The invariant `0 <= start <= end <= len` holds after every transition.

use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// The half-open index range `[start, end)` currently materialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    /// First materialised index.
    pub start: usize,
    /// One past the last materialised index.
    pub end: usize,
}

impl Window {
    /// Creates a window. `end` is raised to `start` if it would precede it.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of materialised indices.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if nothing is materialised.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamps both edges into `[0, len]`.
    pub fn clamped(self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}

/// Derived loading information for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    /// A load is in flight.
    pub loading: bool,
    /// Records exist past the trailing edge.
    pub has_more: bool,
    /// Records exist before the leading edge.
    pub has_previous: bool,
    /// 1-based page reached by the trailing edge. Informational only.
    pub page: usize,
}

/// Which edge of the window a load moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Extend the trailing edge.
    Forward,
    /// Retract the leading edge towards the start.
    Backward,
}

/// What a backward load does to the trailing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retraction {
    /// Leave the trailing edge where it is. Rows already rendered stay rendered.
    #[default]
    KeepTrailingEdge,
    /// Move the trailing edge up by the same amount so the window size stays constant.
    ConstantSpan,
}

/// Handle for one in-flight load.
///
/// Tickets are produced by the `begin_*` methods and passed back to
/// [`WindowState::complete`] when the deferred continuation fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// Identifier of the window state that issued the ticket.
    pub id: i64,
    /// Reset generation the ticket was issued under.
    pub generation: u64,
    /// Edge being moved.
    pub direction: Direction,
}

/// Result of committing a [`LoadTicket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The window moved from `before` to the current window.
    Committed {
        /// Window before the commit.
        before: Window,
        /// Window after the commit.
        after: Window,
    },
    /// The ticket belonged to another window state or an older generation.
    Stale,
}

/// Owner of the window and its loading state.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::window::{Window, WindowState};
///
/// let mut state = WindowState::new(20);
/// state.reset(100);
/// assert_eq!(state.window(), Window::new(0, 20));
///
/// let ticket = state.begin_load_more().unwrap();
/// assert!(state.load_state().loading);
/// assert!(state.begin_load_more().is_none()); // at most one in flight
///
/// state.complete(ticket);
/// assert_eq!(state.window(), Window::new(0, 40));
/// assert_eq!(state.load_state().page, 2);
/// ```
#[derive(Debug, Clone)]
pub struct WindowState {
    id: i64,
    page_size: usize,
    retraction: Retraction,
    len: usize,
    window: Window,
    generation: u64,
    in_flight: Option<LoadTicket>,
}

impl WindowState {
    /// Creates an empty window state. `page_size` is clamped to at least 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            id: next_id(),
            page_size: page_size.max(1),
            retraction: Retraction::default(),
            len: 0,
            window: Window::default(),
            generation: 0,
            in_flight: None,
        }
    }

    /// Sets the retraction policy (builder pattern).
    pub fn with_retraction(mut self, retraction: Retraction) -> Self {
        self.retraction = retraction;
        self
    }

    /// Unique identifier used to route completions.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Rows added or removed per load.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current reset generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Length of the filtered set the window is positioned against.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the filtered set is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// The in-flight load, if any.
    pub fn in_flight(&self) -> Option<LoadTicket> {
        self.in_flight
    }

    /// Derives the load state from the window.
    pub fn load_state(&self) -> LoadState {
        LoadState {
            loading: self.in_flight.is_some(),
            has_more: self.window.end < self.len,
            has_previous: self.window.start > 0,
            page: self.window.end.div_ceil(self.page_size).max(1),
        }
    }

    /// Repositions the window at the start of a filtered set of `len` records.
    ///
    /// Cancels any in-flight load: its completion will be discarded.
    pub fn reset(&mut self, len: usize) {
        self.generation += 1;
        self.in_flight = None;
        self.len = len;
        self.window = Window::new(0, self.page_size.min(len));
        log::debug!(
            "window {} reset: len={} window={:?} generation={}",
            self.id,
            len,
            self.window,
            self.generation
        );
    }

    /// Changes the set length without repositioning, e.g. after a page of
    /// records was appended. The window is clamped if the set shrank.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.window = self.window.clamped(len);
    }

    /// Issues a forward load, or returns `None` if loading or nothing is left.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        let state = self.load_state();
        if state.loading || !state.has_more {
            return None;
        }
        Some(self.issue(Direction::Forward))
    }

    /// Issues a backward load, or returns `None` if loading or already at the start.
    pub fn begin_load_previous(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() || self.window.start == 0 {
            return None;
        }
        Some(self.issue(Direction::Backward))
    }

    fn issue(&mut self, direction: Direction) -> LoadTicket {
        let ticket = LoadTicket {
            id: self.id,
            generation: self.generation,
            direction,
        };
        self.in_flight = Some(ticket);
        log::debug!("window {} load issued: {:?}", self.id, ticket);
        ticket
    }

    /// Returns true if `ticket` is the load this state is waiting for.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.in_flight.as_ref() == Some(ticket)
    }

    /// Commits a completed load.
    ///
    /// Stale tickets leave the state untouched.
    pub fn complete(&mut self, ticket: LoadTicket) -> Completion {
        if !self.is_current(&ticket) {
            log::debug!("window {} discarding stale load {:?}", self.id, ticket);
            return Completion::Stale;
        }
        self.in_flight = None;

        let before = self.window;
        self.window = match ticket.direction {
            Direction::Forward => {
                Window::new(before.start, (before.end + self.page_size).min(self.len))
            }
            Direction::Backward => {
                let start = before.start.saturating_sub(self.page_size);
                let end = match self.retraction {
                    Retraction::KeepTrailingEdge => before.end,
                    Retraction::ConstantSpan => before.end - (before.start - start),
                };
                Window::new(start, end)
            }
        }
        .clamped(self.len);

        log::debug!(
            "window {} committed {:?}: {:?} -> {:?}",
            self.id,
            ticket.direction,
            before,
            self.window
        );
        Completion::Committed {
            before,
            after: self.window,
        }
    }

    /// Drops the in-flight load without moving the window, e.g. after the
    /// loader reported a failure. Stale tickets are ignored.
    pub fn abandon(&mut self, ticket: LoadTicket) -> bool {
        if self.is_current(&ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn force_window(&mut self, window: Window) {
        self.window = window.clamped(self.len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn load_more(state: &mut WindowState) {
        if let Some(t) = state.begin_load_more() {
            state.complete(t);
        }
    }

    fn load_previous(state: &mut WindowState) {
        if let Some(t) = state.begin_load_previous() {
            state.complete(t);
        }
    }

    #[test]
    fn test_scenario_initial_window() {
        let mut s = WindowState::new(20);
        s.reset(100);
        assert_eq!(s.window(), Window::new(0, 20));
        let ls = s.load_state();
        assert!(ls.has_more);
        assert!(!ls.has_previous);
        assert!(!ls.loading);
        assert_eq!(ls.page, 1);
    }

    #[test]
    fn test_scenario_three_load_more() {
        let mut s = WindowState::new(20);
        s.reset(100);
        for expected in [40, 60, 80] {
            load_more(&mut s);
            assert_eq!(s.window().end, expected);
        }
        assert_eq!(s.window(), Window::new(0, 80));
        assert!(s.load_state().has_more);
        assert_eq!(s.load_state().page, 4);
    }

    #[test]
    fn test_scenario_reset_to_small_set() {
        let mut s = WindowState::new(20);
        s.reset(100);
        load_more(&mut s);
        load_more(&mut s);
        load_more(&mut s);

        s.reset(5);
        assert_eq!(s.window(), Window::new(0, 5));
        assert!(!s.load_state().has_more);
    }

    #[test]
    fn test_scenario_empty_set() {
        let mut s = WindowState::new(20);
        s.reset(0);
        assert_eq!(s.window(), Window::new(0, 0));
        let ls = s.load_state();
        assert!(!ls.has_more);
        assert!(!ls.has_previous);
        assert_eq!(ls.page, 1);
        assert!(s.begin_load_more().is_none());
        assert!(s.begin_load_previous().is_none());
    }

    #[test]
    fn test_scenario_load_previous_keeps_trailing_edge() {
        let mut s = WindowState::new(20);
        s.reset(100);
        s.force_window(Window::new(40, 80));
        load_previous(&mut s);
        assert_eq!(s.window(), Window::new(20, 80));
        assert!(s.load_state().has_previous);
        load_previous(&mut s);
        assert_eq!(s.window(), Window::new(0, 80));
        assert!(!s.load_state().has_previous);
    }

    #[test]
    fn test_constant_span_retraction_moves_both_edges() {
        let mut s = WindowState::new(20).with_retraction(Retraction::ConstantSpan);
        s.reset(100);
        s.force_window(Window::new(50, 90));
        load_previous(&mut s);
        assert_eq!(s.window(), Window::new(30, 70));
        load_previous(&mut s);
        load_previous(&mut s);
        // leading edge clamps at 0 and the trailing edge moves by the same 10
        assert_eq!(s.window(), Window::new(0, 40));
    }

    #[test]
    fn test_load_more_clamps_to_len() {
        let mut s = WindowState::new(20);
        s.reset(45);
        load_more(&mut s);
        load_more(&mut s);
        assert_eq!(s.window(), Window::new(0, 45));
        assert!(!s.load_state().has_more);
        assert_eq!(s.load_state().page, 3);
        assert!(s.begin_load_more().is_none());
    }

    #[test]
    fn test_loading_blocks_both_directions() {
        let mut s = WindowState::new(10);
        s.reset(100);
        s.force_window(Window::new(30, 60));
        let t = s.begin_load_more().unwrap();
        assert!(s.begin_load_more().is_none());
        assert!(s.begin_load_previous().is_none());
        assert_eq!(s.window(), Window::new(30, 60));
        s.complete(t);
        assert_eq!(s.window(), Window::new(30, 70));
    }

    #[test]
    fn test_reset_discards_in_flight_load() {
        let mut s = WindowState::new(20);
        s.reset(100);
        let t = s.begin_load_more().unwrap();
        s.reset(100);
        assert!(!s.load_state().loading);
        assert_eq!(s.complete(t), Completion::Stale);
        assert_eq!(s.window(), Window::new(0, 20));
    }

    #[test]
    fn test_ticket_from_other_state_is_stale() {
        let mut a = WindowState::new(20);
        let mut b = WindowState::new(20);
        a.reset(100);
        b.reset(100);
        let ta = a.begin_load_more().unwrap();
        let _tb = b.begin_load_more().unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(b.complete(ta), Completion::Stale);
        assert_eq!(b.window(), Window::new(0, 20));
    }

    #[test]
    fn test_completing_twice_is_stale() {
        let mut s = WindowState::new(20);
        s.reset(100);
        let t = s.begin_load_more().unwrap();
        assert!(matches!(s.complete(t), Completion::Committed { .. }));
        assert_eq!(s.complete(t), Completion::Stale);
        assert_eq!(s.window(), Window::new(0, 40));
    }

    #[test]
    fn test_abandon_clears_loading_only() {
        let mut s = WindowState::new(20);
        s.reset(100);
        let t = s.begin_load_more().unwrap();
        assert!(s.abandon(t));
        assert!(!s.load_state().loading);
        assert_eq!(s.window(), Window::new(0, 20));
        assert!(!s.abandon(t));
    }

    #[test]
    fn test_set_len_clamps_window() {
        let mut s = WindowState::new(20);
        s.reset(100);
        s.force_window(Window::new(40, 80));
        s.set_len(30);
        assert_eq!(s.window(), Window::new(30, 30));
        s.set_len(200);
        assert_eq!(s.window(), Window::new(30, 30));
        assert!(s.load_state().has_more);
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        let s = WindowState::new(0);
        assert_eq!(s.page_size(), 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        More,
        Previous,
        Reset(usize),
        Append(usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::More),
            3 => Just(Op::Previous),
            1 => (0usize..300).prop_map(Op::Reset),
            1 => (0usize..50).prop_map(Op::Append),
        ]
    }

    proptest! {
        #[test]
        fn transitions_keep_window_invariants(
            page_size in 1usize..40,
            len in 0usize..300,
            ops in prop::collection::vec(arb_op(), 0..60),
            constant_span in any::<bool>(),
        ) {
            let retraction = if constant_span {
                Retraction::ConstantSpan
            } else {
                Retraction::KeepTrailingEdge
            };
            let mut s = WindowState::new(page_size).with_retraction(retraction);
            s.reset(len);
            for op in ops {
                let before = s.window();
                match op {
                    Op::More => {
                        load_more(&mut s);
                        prop_assert!(s.window().end >= before.end);
                        prop_assert_eq!(s.window().start, before.start);
                    }
                    Op::Previous => {
                        load_previous(&mut s);
                        prop_assert!(s.window().start <= before.start);
                    }
                    Op::Reset(n) => {
                        s.reset(n);
                        prop_assert_eq!(s.window().start, 0);
                    }
                    Op::Append(n) => s.set_len(s.len() + n),
                }
                let w = s.window();
                prop_assert!(w.start <= w.end);
                prop_assert!(w.end <= s.len());
            }
        }

        #[test]
        fn guards_leave_window_unchanged(
            page_size in 1usize..40,
            len in 0usize..200,
        ) {
            let mut s = WindowState::new(page_size);
            s.reset(len);

            // at start: load_previous is a no-op
            let w = s.window();
            prop_assert!(s.begin_load_previous().is_none());
            prop_assert_eq!(s.window(), w);

            // exhausted: load_more is a no-op
            while let Some(t) = s.begin_load_more() {
                s.complete(t);
            }
            let w = s.window();
            prop_assert!(!s.load_state().has_more);
            prop_assert!(s.begin_load_more().is_none());
            prop_assert_eq!(s.window(), w);
        }
    }
}
