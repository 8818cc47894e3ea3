//! Projection of a window onto the filtered record set.
//!
//! [`project`] maps the current window to the slice of records to actually
//! render, plus the number of unrendered rows before and after it. Hosts render
//! those as spacers of known height so the scrollbar reflects the full content
//! even though only the window exists in the render tree.
//!
//! Row rendering itself is delegated to a [`RowDelegate`].

use crate::window::Window;
use std::fmt::Display;

/// Rows to render for a window, plus spacer counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<T> {
    /// Records inside the window, in order.
    pub visible: Vec<T>,
    /// Unrendered rows before the window.
    pub leading_spacer_count: usize,
    /// Unrendered rows after the window.
    pub trailing_spacer_count: usize,
}

impl<T> Projection<T> {
    /// Total rows represented: spacers plus visible records.
    pub fn total(&self) -> usize {
        self.leading_spacer_count + self.visible.len() + self.trailing_spacer_count
    }

    /// Height of the leading spacer for rows of `row_height`.
    pub fn leading_spacer_height(&self, row_height: usize) -> usize {
        self.leading_spacer_count * row_height
    }

    /// Height of the trailing spacer for rows of `row_height`.
    pub fn trailing_spacer_height(&self, row_height: usize) -> usize {
        self.trailing_spacer_count * row_height
    }

    /// Height of the whole content, rendered rows and spacers together.
    pub fn content_height(&self, row_height: usize) -> usize {
        self.total() * row_height
    }
}

/// Slices `filtered` by `window`.
///
/// A window that runs past the end of `filtered` (a scroll signal racing a
/// filter reset) is clamped rather than rejected.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::render::project;
/// use bubbletea_windowed_list::window::Window;
///
/// let rows: Vec<u32> = (0..100).collect();
/// let p = project(&rows, Window::new(20, 40));
///
/// assert_eq!(p.visible.len(), 20);
/// assert_eq!(*p.visible[0], 20);
/// assert_eq!(p.leading_spacer_count, 20);
/// assert_eq!(p.trailing_spacer_count, 60);
/// ```
pub fn project<T>(filtered: &[T], window: Window) -> Projection<&T> {
    let window = window.clamped(filtered.len());
    Projection {
        visible: filtered[window.start..window.end].iter().collect(),
        leading_spacer_count: window.start,
        trailing_spacer_count: filtered.len() - window.end,
    }
}

/// Renders one record as a row of text.
pub trait RowDelegate<R> {
    /// Renders `item`, which sits at `index` in the filtered set.
    fn render(&self, index: usize, item: &R) -> String;

    /// Height in lines of every rendered row.
    fn height(&self) -> usize {
        1
    }
}

/// Renders records through their `Display` implementation, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDelegate;

impl<R: Display> RowDelegate<R> for PlainDelegate {
    fn render(&self, _index: usize, item: &R) -> String {
        item.to_string()
    }
}
