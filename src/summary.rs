//! "Showing X–Y of N" summaries and page indicators.
//!
//! A [`Summary`] is computed from the window and load state; it never stores a
//! page number of its own. The page shown is the page reached by the window's
//! trailing edge, and the total page count follows from the filtered length.

use crate::window::{LoadState, Window};
use lipgloss_extras::prelude::*;

/// How the page indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStyle {
    /// Page numbers, e.g. `2/5`.
    #[default]
    Arabic,
    /// One dot per page, e.g. `○ • ○ ○ ○`.
    Dots,
}

/// Position summary for the rendering layer.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::summary::Summary;
/// use bubbletea_windowed_list::window::WindowState;
///
/// let mut state = WindowState::new(20);
/// state.reset(100);
///
/// let summary = Summary::new(state.window(), state.load_state(), state.len(), state.page_size());
/// assert_eq!(summary.range_text(), "Showing 1–20 of 100");
/// assert_eq!(summary.page_text(), "1/5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// 1-based index of the first materialised record, 0 when empty.
    pub first: usize,
    /// 1-based index of the last materialised record, 0 when empty.
    pub last: usize,
    /// Length of the filtered set.
    pub total: usize,
    /// Page reached by the trailing edge.
    pub page: usize,
    /// Pages in the filtered set, at least 1.
    pub total_pages: usize,
    /// A load is in flight.
    pub loading: bool,
}

impl Summary {
    /// Builds a summary; `page_size` is treated as at least 1.
    pub fn new(window: Window, state: LoadState, total: usize, page_size: usize) -> Self {
        let window = window.clamped(total);
        let (first, last) = if window.is_empty() {
            (0, 0)
        } else {
            (window.start + 1, window.end)
        };
        let total_pages = total.div_ceil(page_size.max(1)).max(1);
        Self {
            first,
            last,
            total,
            page: state.page.min(total_pages),
            total_pages,
            loading: state.loading,
        }
    }

    /// Returns true if the filtered set is empty.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `Showing X–Y of N`, or `No records found` for an empty set.
    pub fn range_text(&self) -> String {
        if self.is_empty() {
            return "No records found".to_string();
        }
        format!("Showing {}–{} of {}", self.first, self.last, self.total)
    }

    /// `page/total` page numbers.
    pub fn page_text(&self) -> String {
        format!("{}/{}", self.page, self.total_pages)
    }

    /// One dot per page with the current page highlighted.
    pub fn dots_text(&self, active: &str, inactive: &str) -> String {
        (1..=self.total_pages)
            .map(|p| if p == self.page { active } else { inactive })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Page indicator in the given style.
    pub fn indicator(&self, style: PageStyle) -> String {
        match style {
            PageStyle::Arabic => self.page_text(),
            PageStyle::Dots => self.dots_text(ACTIVE_DOT, INACTIVE_DOT),
        }
    }
}

/// Dot drawn for the current page.
pub const ACTIVE_DOT: &str = "•";
/// Dot drawn for other pages.
pub const INACTIVE_DOT: &str = "○";

/// Styles for the status line.
#[derive(Debug, Clone)]
pub struct SummaryStyles {
    /// Range text.
    pub status: Style,
    /// Empty-state message.
    pub empty: Style,
    /// Page indicator.
    pub pagination: Style,
    /// Loading marker.
    pub loading: Style,
}

impl Default for SummaryStyles {
    fn default() -> Self {
        Self {
            status: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            pagination: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#9CA3AF",
                    Dark: "#6B7280",
                })
                .padding_left(2),
            loading: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
        }
    }
}

impl SummaryStyles {
    /// Renders the full status line for `summary`.
    pub fn render(&self, summary: &Summary, page_style: PageStyle) -> String {
        if summary.is_empty() {
            return self.empty.render(&summary.range_text());
        }
        let mut line = self.status.render(&summary.range_text());
        if summary.total_pages > 1 {
            line.push_str(&self.pagination.render(&summary.indicator(page_style)));
        }
        if summary.loading {
            line.push(' ');
            line.push_str(&self.loading.render("Loading…"));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(window: Window, len: usize, page_size: usize, loading: bool) -> LoadState {
        LoadState {
            loading,
            has_more: window.end < len,
            has_previous: window.start > 0,
            page: window.end.div_ceil(page_size).max(1),
        }
    }

    fn summary(start: usize, end: usize, len: usize, page_size: usize) -> Summary {
        let w = Window::new(start, end);
        Summary::new(w, state(w, len, page_size, false), len, page_size)
    }

    #[test]
    fn test_range_text() {
        assert_eq!(summary(0, 20, 100, 20).range_text(), "Showing 1–20 of 100");
        assert_eq!(summary(20, 80, 100, 20).range_text(), "Showing 21–80 of 100");
    }

    #[test]
    fn test_empty_summary() {
        let s = summary(0, 0, 0, 20);
        assert!(s.is_empty());
        assert_eq!((s.first, s.last), (0, 0));
        assert_eq!(s.range_text(), "No records found");
        assert_eq!(s.page_text(), "1/1");
    }

    #[test]
    fn test_page_follows_trailing_edge() {
        let s = summary(0, 60, 100, 20);
        assert_eq!(s.page, 3);
        assert_eq!(s.total_pages, 5);
        assert_eq!(s.page_text(), "3/5");

        let s = summary(0, 45, 45, 20);
        assert_eq!(s.page_text(), "3/3");
    }

    #[test]
    fn test_dots_indicator() {
        let s = summary(0, 40, 100, 20);
        assert_eq!(s.indicator(PageStyle::Dots), "○ • ○ ○ ○");
        assert_eq!(s.indicator(PageStyle::Arabic), "2/5");
    }

    #[test]
    fn test_summary_clamps_window() {
        let w = Window::new(0, 80);
        let s = Summary::new(w, state(w, 5, 20, false), 5, 20);
        assert_eq!(s.range_text(), "Showing 1–5 of 5");
        assert_eq!(s.page_text(), "1/1");
    }

    #[test]
    fn test_styled_line_contains_parts() {
        let styles = SummaryStyles::default();
        let w = Window::new(0, 20);
        let s = Summary::new(w, state(w, 100, 20, true), 100, 20);
        let line = styles.render(&s, PageStyle::Arabic);
        assert!(line.contains("Showing 1–20 of 100"));
        assert!(line.contains("1/5"));
        assert!(line.contains("Loading…"));

        let empty = summary(0, 0, 0, 20);
        assert!(styles.render(&empty, PageStyle::Arabic).contains("No records found"));
    }
}
