pub mod app;
pub mod detail;
pub mod event;
pub mod layout;
pub mod navigation;
pub mod wrap;

use std::ffi::OsStr;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, DigestError, Result};
use crate::config::Config;
use crate::document;
use crate::domain::Entry;
use crate::store::{DeleteOutcome, SaveOutcome};

use self::app::{Mode, TuiApp};
use self::detail::AbstractOutcome;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive reader until the user quits. Only terminal I/O
/// errors end the session early.
pub async fn run(ctx: &AppContext, config: &Config, entries: Vec<Entry>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config, entries).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    ctx: &AppContext,
    config: &Config,
    entries: Vec<Entry>,
) -> Result<()> {
    let size = terminal.size()?;
    let classes = ctx.matcher.classify_all(&entries, |identifier| {
        ctx.store.exists(identifier).unwrap_or_else(|e| {
            tracing::warn!(identifier, error = %e, "store lookup failed");
            false
        })
    });
    let mut tui_app = TuiApp::new(entries, classes, size.width, size.height);
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, config))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let mut redraw = |app: &mut TuiApp| -> Result<()> {
                    terminal.draw(|frame| layout::render(frame, app, config))?;
                    Ok(())
                };
                handle_key(&mut tui_app, ctx, config, key, &mut redraw).await?;
            }
            AppEvent::Resize(width, height) => {
                tui_app.resize(width, height);
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dispatch one key press. `redraw` is called before every network wait so
/// the status line shows what is being waited for.
pub async fn handle_key<F>(
    app: &mut TuiApp,
    ctx: &AppContext,
    config: &Config,
    key: KeyEvent,
    redraw: &mut F,
) -> Result<()>
where
    F: FnMut(&mut TuiApp) -> Result<()>,
{
    if matches!(app.mode, Mode::Help(_)) {
        app.close_help();
        return Ok(());
    }
    let action = config.keybindings.get_action(&key);
    handle_action(app, ctx, action, redraw).await
}

pub async fn handle_action<F>(
    app: &mut TuiApp,
    ctx: &AppContext,
    action: Action,
    redraw: &mut F,
) -> Result<()>
where
    F: FnMut(&mut TuiApp) -> Result<()>,
{
    let in_detail = matches!(app.mode, Mode::Detail { .. });

    match action {
        Action::Quit if in_detail => app.close_detail(),
        Action::Quit => app.should_quit = true,
        Action::MoveDown | Action::ScrollDown if in_detail => app.scroll_detail(true),
        Action::MoveUp | Action::ScrollUp if in_detail => app.scroll_detail(false),
        Action::MoveDown => app.move_down(),
        Action::MoveUp => app.move_up(),
        Action::ScrollDown => app.scroll_down(),
        Action::ScrollUp => app.scroll_up(),
        Action::Activate | Action::Close if in_detail => app.close_detail(),
        Action::Activate => open_detail(app, ctx, redraw).await?,
        Action::Close => app.clear_status(),
        Action::OpenUrl => open_url(app, ctx),
        Action::Save => save_entry(app, ctx),
        Action::Delete => delete_entry(app, ctx),
        Action::FetchDocument => fetch_document(app, ctx, redraw).await?,
        Action::OpenDocument => open_document(app, ctx, redraw).await?,
        Action::Help => app.show_help(),
        Action::None => {}
    }

    Ok(())
}

async fn open_detail<F>(app: &mut TuiApp, ctx: &AppContext, redraw: &mut F) -> Result<()>
where
    F: FnMut(&mut TuiApp) -> Result<()>,
{
    let Some(index) = app.open_detail() else {
        return Ok(());
    };
    let Some(entry) = app.entries.get(index) else {
        return Ok(());
    };
    if !app.detail.needs_fetch(index, entry) {
        app.clear_status();
        return Ok(());
    }

    let url = entry.url.clone();
    app.set_status(format!("Getting abstract from {}", url));
    redraw(app)?;

    let Some(entry) = app.entries.get_mut(index) else {
        return Ok(());
    };
    match app
        .detail
        .ensure_abstract(index, entry, ctx.fetcher.as_ref())
        .await
    {
        AbstractOutcome::Fetched => {
            app.reclassify(index, &ctx.matcher);
            app.clear_status();
        }
        AbstractOutcome::NotFound => app.set_status(format!("No abstract found at {}", url)),
        AbstractOutcome::Failed(reason) => {
            app.set_status(format!("Cannot connect with {}: {}", url, reason))
        }
        _ => app.clear_status(),
    }
    Ok(())
}

fn target(app: &TuiApp) -> Option<(usize, Entry)> {
    let index = app.target_entry()?;
    app.entries.get(index).map(|entry| (index, entry.clone()))
}

fn open_url(app: &mut TuiApp, ctx: &AppContext) {
    let Some((_, entry)) = target(app) else {
        return;
    };
    let Some(url) = entry.url() else {
        app.set_status("No url found.".to_string());
        return;
    };

    match ctx
        .opener
        .open(ctx.settings.browser.as_deref(), OsStr::new(url))
    {
        Ok(()) => app.set_status(format!("{} {}", ctx.browser_label(), url)),
        Err(e) => {
            tracing::warn!(url, error = %e, "failed to launch browser");
            app.set_status(format!("Failed to open browser: {}", e));
        }
    }
}

fn save_entry(app: &mut TuiApp, ctx: &AppContext) {
    let Some((index, entry)) = target(app) else {
        return;
    };

    match ctx.store.save(&entry) {
        Ok(SaveOutcome::Saved) => {
            app.set_saved(index, true);
            app.set_status(format!("{} written to db", entry.identifier));
        }
        Ok(SaveOutcome::AlreadySaved) => {
            app.set_saved(index, true);
            app.set_status(format!("{} already in db", entry.identifier));
        }
        Err(e) => {
            tracing::warn!(identifier = %entry.identifier, error = %e, "save failed");
            app.set_status(format!("Save failed: {}", e.status_text()));
        }
    }
}

fn delete_entry(app: &mut TuiApp, ctx: &AppContext) {
    let Some((index, entry)) = target(app) else {
        return;
    };
    if !entry.has_identifier() {
        app.set_status("Entry has no identifier".to_string());
        return;
    }

    match ctx.store.delete(&entry.identifier) {
        Ok(DeleteOutcome::Removed) => {
            app.set_saved(index, false);
            app.set_status(format!("{} removed from db", entry.identifier));
        }
        Ok(DeleteOutcome::NotSaved) => {
            app.set_saved(index, false);
            app.set_status(format!("{} is not in db", entry.identifier));
        }
        Err(DigestError::StoreMissing(_)) => app.set_status("db does not exist.".to_string()),
        Err(e) => {
            tracing::warn!(identifier = %entry.identifier, error = %e, "delete failed");
            app.set_status(format!("Delete failed: {}", e.status_text()));
        }
    }
}

async fn fetch_document<F>(app: &mut TuiApp, ctx: &AppContext, redraw: &mut F) -> Result<()>
where
    F: FnMut(&mut TuiApp) -> Result<()>,
{
    let Some((_, entry)) = target(app) else {
        return Ok(());
    };
    app.set_status(format!("Getting latest version of {}", entry.identifier));
    redraw(app)?;

    match document::download_latest(ctx.fetcher.as_ref(), &entry, &ctx.settings.download_dir).await
    {
        Ok(path) => app.set_status(format!("written to {}", path.display())),
        Err(e) => {
            tracing::warn!(identifier = %entry.identifier, error = %e, "download failed");
            app.set_status(format!("Download failed: {}", e.status_text()));
        }
    }
    Ok(())
}

async fn open_document<F>(app: &mut TuiApp, ctx: &AppContext, redraw: &mut F) -> Result<()>
where
    F: FnMut(&mut TuiApp) -> Result<()>,
{
    let Some((_, entry)) = target(app) else {
        return Ok(());
    };
    app.set_status(format!("Looking for the latest version of {}", entry.identifier));
    redraw(app)?;

    let path =
        match document::ensure_local(ctx.fetcher.as_ref(), &entry, &ctx.settings.download_dir).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(identifier = %entry.identifier, error = %e, "download failed");
                app.set_status(format!("Download failed: {}", e.status_text()));
                return Ok(());
            }
        };

    match ctx
        .opener
        .open(ctx.settings.pdf_reader.as_deref(), path.as_os_str())
    {
        Ok(()) => app.set_status(format!("{} {}", ctx.reader_label(), path.display())),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to launch viewer");
            app.set_status(format!("Failed to open document: {}", e));
        }
    }
    Ok(())
}
