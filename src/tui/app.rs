use crate::domain::Entry;
use crate::highlight::{Classification, MatchKind, Matcher};
use crate::tui::detail::DetailController;
use crate::tui::navigation::{LayoutIndex, NavigationState};

/// Rows taken by the status line at the bottom of the screen.
pub const STATUS_HEIGHT: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Detail { entry: usize, scroll: usize },
    /// Help overlay on top of the mode it was opened from.
    Help(Box<Mode>),
}

pub struct TuiApp {
    pub entries: Vec<Entry>,
    pub layout: LayoutIndex,
    pub nav: NavigationState,
    pub classes: Vec<Classification>,
    pub mode: Mode,
    pub detail: DetailController,
    /// Largest useful detail scroll, known after the detail view is drawn.
    pub detail_max_scroll: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(entries: Vec<Entry>, classes: Vec<Classification>, width: u16, height: u16) -> Self {
        let layout = LayoutIndex::build(&entries, width as usize);
        Self {
            entries,
            layout,
            nav: NavigationState::new(list_height(height)),
            classes,
            mode: Mode::List,
            detail: DetailController::new(),
            detail_max_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn cursor_entry(&self) -> Option<usize> {
        self.nav.cursor_entry(&self.layout)
    }

    /// Entry the entry-level actions apply to: the open one in the detail
    /// view, the one under the cursor otherwise.
    pub fn target_entry(&self) -> Option<usize> {
        match self.base_mode() {
            Mode::Detail { entry, .. } => Some(*entry),
            _ => self.cursor_entry(),
        }
    }

    fn base_mode(&self) -> &Mode {
        let mut mode = &self.mode;
        while let Mode::Help(previous) = mode {
            mode = previous;
        }
        mode
    }

    pub fn class_of(&self, entry: usize) -> Classification {
        self.classes.get(entry).copied().unwrap_or_default()
    }

    pub fn set_saved(&mut self, entry: usize, saved: bool) {
        if let Some(class) = self.classes.get_mut(entry) {
            class.saved = saved;
        }
    }

    /// Recompute the match axis of one entry after its text changed.
    pub fn reclassify(&mut self, entry: usize, matcher: &Matcher) {
        let matched = self
            .entries
            .get(entry)
            .map_or(MatchKind::None, |e| matcher.match_kind(e));
        if let Some(class) = self.classes.get_mut(entry) {
            class.matched = matched;
        }
    }

    pub fn move_down(&mut self) {
        self.nav = self.nav.move_down(&self.layout);
        self.clear_status();
    }

    pub fn move_up(&mut self) {
        self.nav = self.nav.move_up(&self.layout);
        self.clear_status();
    }

    pub fn scroll_down(&mut self) {
        self.nav = self.nav.scroll_down(&self.layout);
        self.clear_status();
    }

    pub fn scroll_up(&mut self) {
        self.nav = self.nav.scroll_up(&self.layout);
        self.clear_status();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let layout = if self.layout.display_width() == width as usize {
            self.layout.clone()
        } else {
            LayoutIndex::build(&self.entries, width as usize)
        };
        self.nav = self.nav.relayout(&self.layout, &layout, list_height(height));
        self.layout = layout;
    }

    /// Open the detail view of the entry under the cursor.
    pub fn open_detail(&mut self) -> Option<usize> {
        let entry = self.cursor_entry()?;
        self.mode = Mode::Detail { entry, scroll: 0 };
        self.detail_max_scroll = 0;
        Some(entry)
    }

    /// Back to the list with the cursor on the entry that was open.
    pub fn close_detail(&mut self) {
        if let Mode::Detail { entry, .. } = self.mode {
            self.nav = self.nav.focus(&self.layout, entry);
        }
        self.mode = Mode::List;
        self.clear_status();
    }

    pub fn scroll_detail(&mut self, down: bool) {
        if let Mode::Detail { scroll, .. } = &mut self.mode {
            *scroll = if down {
                (*scroll + 1).min(self.detail_max_scroll)
            } else {
                scroll.saturating_sub(1)
            };
        }
    }

    pub fn show_help(&mut self) {
        if !matches!(self.mode, Mode::Help(_)) {
            let previous = std::mem::replace(&mut self.mode, Mode::List);
            self.mode = Mode::Help(Box::new(previous));
        }
    }

    pub fn close_help(&mut self) {
        if let Mode::Help(previous) = std::mem::replace(&mut self.mode, Mode::List) {
            self.mode = *previous;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

fn list_height(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(STATUS_HEIGHT) as usize
}
