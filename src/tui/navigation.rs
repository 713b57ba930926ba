//! Row layout of the entry list and cursor/scroll movement over it.
//!
//! Entry `i` with `L(i)` wrapped title rows occupies the rows
//! `start_of(i) .. start_of(i) + L(i)`; the row ranges tile `0..total_rows()`
//! without gaps. [`NavigationState`] values are never mutated in place: every
//! movement returns the next state, which keeps the cursor on the first row
//! of an entry and that row inside the viewport.

use crate::domain::Entry;
use crate::tui::wrap::{title_wrap_width, wrap_title};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutIndex {
    rows: Vec<Vec<String>>,
    starts: Vec<usize>,
    total_rows: usize,
    display_width: usize,
}

impl LayoutIndex {
    pub fn build(entries: &[Entry], display_width: usize) -> Self {
        let width = title_wrap_width(display_width);
        let rows = entries
            .iter()
            .map(|entry| wrap_title(&entry.title, width))
            .collect();
        Self::from_rows(rows, display_width)
    }

    fn from_rows(rows: Vec<Vec<String>>, display_width: usize) -> Self {
        let mut starts = Vec::with_capacity(rows.len());
        let mut total_rows = 0;
        for lines in &rows {
            starts.push(total_rows);
            // An entry never takes less than one row.
            total_rows += lines.len().max(1);
        }
        Self {
            rows,
            starts,
            total_rows,
            display_width,
        }
    }

    pub fn display_width(&self) -> usize {
        self.display_width
    }

    pub fn entry_count(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(1)
    }

    /// First row of entry `entry`; `total_rows()` past the last entry.
    pub fn start_of(&self, entry: usize) -> usize {
        self.starts.get(entry).copied().unwrap_or(self.total_rows)
    }

    pub fn row_count(&self, entry: usize) -> usize {
        self.rows.get(entry).map_or(0, |lines| lines.len().max(1))
    }

    pub fn title_rows(&self, entry: usize) -> &[String] {
        self.rows.get(entry).map_or(&[], Vec::as_slice)
    }

    /// The entry owning `row`: the smallest `i` with `start_of(i + 1) > row`.
    pub fn entry_at(&self, row: usize) -> Option<usize> {
        if row >= self.total_rows {
            return None;
        }
        Some(self.starts.partition_point(|&start| start <= row) - 1)
    }

    pub fn is_first_row(&self, row: usize) -> bool {
        self.entry_at(row)
            .is_some_and(|entry| self.start_of(entry) == row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub cursor_row: usize,
    pub scroll: usize,
    pub viewport_height: usize,
}

impl NavigationState {
    pub fn new(viewport_height: usize) -> Self {
        Self {
            cursor_row: 0,
            scroll: 0,
            viewport_height,
        }
    }

    fn height(&self) -> usize {
        self.viewport_height.max(1)
    }

    pub fn cursor_entry(&self, layout: &LayoutIndex) -> Option<usize> {
        layout.entry_at(self.cursor_row)
    }

    /// Visible layout rows, clipped to the layout.
    pub fn visible_rows(&self, layout: &LayoutIndex) -> std::ops::Range<usize> {
        let end = (self.scroll + self.height()).min(layout.total_rows());
        self.scroll.min(end)..end
    }

    /// Put the cursor on the first row of `entry` and scroll just enough to
    /// show it, preferring to show the whole entry.
    pub fn focus(self, layout: &LayoutIndex, entry: usize) -> Self {
        if entry >= layout.entry_count() {
            return self;
        }
        let height = self.height();
        let start = layout.start_of(entry);
        let bottom = start + layout.row_count(entry) - 1;

        let mut next = self;
        next.cursor_row = start;
        if start < next.scroll {
            next.scroll = start;
        } else if bottom >= next.scroll + height {
            next.scroll = start.min(bottom + 1 - height);
        }
        next.scroll = next.scroll.min(layout.max_scroll());
        next
    }

    /// Next entry, wrapping from the last to the first.
    pub fn move_down(self, layout: &LayoutIndex) -> Self {
        let Some(entry) = self.cursor_entry(layout) else {
            return self;
        };
        self.focus(layout, (entry + 1) % layout.entry_count())
    }

    /// Previous entry, wrapping from the first to the last.
    pub fn move_up(self, layout: &LayoutIndex) -> Self {
        let Some(entry) = self.cursor_entry(layout) else {
            return self;
        };
        let previous = entry.checked_sub(1).unwrap_or(layout.entry_count() - 1);
        self.focus(layout, previous)
    }

    /// Scroll the view one row down. A cursor on the row scrolled out of
    /// view moves to the next entry; on the last entry the scroll is refused.
    pub fn scroll_down(self, layout: &LayoutIndex) -> Self {
        let Some(entry) = self.cursor_entry(layout) else {
            return self;
        };
        if self.scroll >= layout.max_scroll() {
            return self;
        }

        let mut next = self;
        next.scroll += 1;
        if next.cursor_row < next.scroll {
            if entry + 1 >= layout.entry_count() {
                return self;
            }
            next.cursor_row = layout.start_of(entry + 1);
            let height = next.height();
            if next.cursor_row >= next.scroll + height {
                next.scroll = next.cursor_row + 1 - height;
            }
        }
        next
    }

    /// Scroll the view one row up, the mirror of [`Self::scroll_down`].
    pub fn scroll_up(self, layout: &LayoutIndex) -> Self {
        let Some(entry) = self.cursor_entry(layout) else {
            return self;
        };
        if self.scroll == 0 {
            return self;
        }

        let mut next = self;
        next.scroll -= 1;
        if next.cursor_row >= next.scroll + next.height() {
            let Some(previous) = entry.checked_sub(1) else {
                return self;
            };
            next.cursor_row = layout.start_of(previous);
            if next.cursor_row < next.scroll {
                next.scroll = next.cursor_row;
            }
        }
        next
    }

    /// Carry the state over to a layout rebuilt for another width or a
    /// viewport of another height. The cursor stays on the same entry and
    /// the entry at the top of the view stays at the top where possible.
    pub fn relayout(self, old: &LayoutIndex, new: &LayoutIndex, viewport_height: usize) -> Self {
        let cursor_entry = old.entry_at(self.cursor_row).unwrap_or(0);
        let top_entry = old.entry_at(self.scroll).unwrap_or(0);

        let moved = Self {
            cursor_row: 0,
            scroll: new.start_of(top_entry).min(new.max_scroll()),
            viewport_height,
        };
        if new.is_empty() {
            return Self::new(viewport_height);
        }
        moved.focus(new, cursor_entry.min(new.entry_count() - 1))
    }
}
