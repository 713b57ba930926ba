use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Release and repeat events are reported on some platforms.
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(AppEvent::Key(key))
                }
                Event::Resize(width, height) => return Ok(AppEvent::Resize(width, height)),
                _ => {}
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveDown,
    MoveUp,
    ScrollDown,
    ScrollUp,
    Activate,
    Close,
    OpenUrl,
    Save,
    Delete,
    FetchDocument,
    OpenDocument,
    Help,
    None,
}

impl Action {
    pub fn description(self) -> &'static str {
        match self {
            Action::Quit => "quit (closes the detail view when open)",
            Action::MoveDown => "next entry",
            Action::MoveUp => "previous entry",
            Action::ScrollDown => "scroll one line down",
            Action::ScrollUp => "scroll one line up",
            Action::Activate => "open / close the detail view",
            Action::Close => "close the detail view",
            Action::OpenUrl => "open the entry page in the browser",
            Action::Save => "save the entry to the database",
            Action::Delete => "delete the entry from the database",
            Action::FetchDocument => "download the latest PDF",
            Action::OpenDocument => "open the latest PDF in the reader",
            Action::Help => "show this help",
            Action::None => "",
        }
    }
}
