use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::highlight::MatchKind;
use crate::tui::app::{Mode, TuiApp};
use crate::tui::detail::detail_sections;
use crate::tui::event::Action;
use crate::tui::wrap::{wrap_words, MARKER_WIDTH};

const DETAIL_MAX_WIDTH: u16 = 82;
const DETAIL_LEFT: u16 = 2;

pub fn render(frame: &mut Frame, app: &mut TuiApp, config: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let colors = &config.colors;
    render_list(frame, app, chunks[0], colors);

    let (detail, help) = match &app.mode {
        Mode::List => (None, false),
        Mode::Detail { entry, scroll } => (Some((*entry, *scroll)), false),
        Mode::Help(previous) => match previous.as_ref() {
            Mode::Detail { entry, scroll } => (Some((*entry, *scroll)), true),
            _ => (None, true),
        },
    };
    if let Some((entry, scroll)) = detail {
        render_detail(frame, app, entry, scroll, chunks[0], colors);
    }
    if help {
        render_help(frame, chunks[0], config);
    }

    render_status_bar(frame, app, chunks[1], colors);
}

fn open_entry(mode: &Mode) -> Option<usize> {
    match mode {
        Mode::Detail { entry, .. } => Some(*entry),
        Mode::Help(previous) => open_entry(previous),
        Mode::List => None,
    }
}

fn render_list(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let open = open_entry(&app.mode);
    let mut lines = Vec::new();

    for row in app.nav.visible_rows(&app.layout) {
        let Some(entry) = app.layout.entry_at(row) else {
            break;
        };
        let class = app.class_of(entry);
        let start = app.layout.start_of(entry);
        let text = app
            .layout
            .title_rows(entry)
            .get(row - start)
            .map(String::as_str)
            .unwrap_or_default();

        let marker = if row == start {
            let label = format!("({})", entry + 1);
            let style = if row == app.nav.cursor_row {
                let bg = if class.saved {
                    colors.cursor_saved_bg
                } else {
                    colors.cursor_unsaved_bg
                };
                Style::default().fg(colors.cursor_fg).bg(bg)
            } else if class.saved {
                Style::default().fg(colors.marker_saved)
            } else {
                Style::default().fg(colors.marker_unsaved)
            };
            let pad = MARKER_WIDTH.saturating_sub(label.chars().count());
            vec![Span::styled(label, style), Span::raw(" ".repeat(pad))]
        } else {
            vec![Span::raw(" ".repeat(MARKER_WIDTH))]
        };

        let title_style = if open == Some(entry) {
            Style::default()
                .fg(colors.detail_title)
                .add_modifier(Modifier::BOLD)
        } else {
            match class.matched {
                MatchKind::Author => Style::default().fg(colors.author_match),
                MatchKind::Content => Style::default().fg(colors.content_match),
                MatchKind::None => Style::default(),
            }
        };

        let mut spans = marker;
        spans.push(Span::styled(text.to_string(), title_style));
        lines.push(Line::from(spans));
    }

    if app.entries.is_empty() {
        lines.push(Line::from("No entries in this digest."));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn detail_text(app: &TuiApp, entry: usize, width: usize, colors: &ColorConfig) -> Vec<Line<'static>> {
    let Some(e) = app.entries.get(entry) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (i, (label, value)) in detail_sections(e).into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let label_style = Style::default()
            .fg(colors.detail_label)
            .add_modifier(Modifier::BOLD);
        lines.push(Line::from(Span::styled(format!("{}:", label), label_style)));
        for row in wrap_words(&value, width, "") {
            lines.push(Line::from(row));
        }
    }
    lines
}

/// Detail box under the open entry's title, or from the top of the list
/// when there is not enough room below. Content taller than the box scrolls.
fn render_detail(
    frame: &mut Frame,
    app: &mut TuiApp,
    entry: usize,
    scroll: usize,
    area: Rect,
    colors: &ColorConfig,
) {
    let width = area.width.saturating_sub(DETAIL_LEFT * 2).min(DETAIL_MAX_WIDTH);
    if width < 6 || area.height < 3 {
        return;
    }
    // Two border columns and one column of padding on each side.
    let inner_width = width.saturating_sub(4) as usize;
    let lines = detail_text(app, entry, inner_width, colors);
    let wanted = (lines.len() + 2).min(u16::MAX as usize) as u16;

    let below = (app.layout.start_of(entry) + app.layout.row_count(entry))
        .saturating_sub(app.nav.scroll)
        .min(area.height as usize) as u16;
    let (top, height) = if below.saturating_add(wanted) <= area.height {
        (below, wanted)
    } else {
        (0, wanted.min(area.height))
    };

    let visible = height.saturating_sub(2) as usize;
    app.detail_max_scroll = lines.len().saturating_sub(visible);
    let scroll = scroll.min(app.detail_max_scroll);

    let rect = Rect::new(area.x + DETAIL_LEFT, area.y + top, width, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.detail_border));
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block.padding(Padding::horizontal(1)))
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

fn render_help(frame: &mut Frame, area: Rect, config: &Config) {
    let mut lines = vec![Line::from(Span::styled(
        "Keys",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    for (action, keys) in config.keybindings.describe() {
        if action == Action::None {
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<18}", keys),
                Style::default().fg(config.colors.detail_label),
            ),
            Span::raw(action.description()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Press any key to close this help."));

    let width = area.width.min(70);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.colors.detail_border));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), rect);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = match &app.status_message {
        Some(msg) => msg.clone(),
        None => {
            let position = app.target_entry().map_or(0, |i| i + 1);
            format!(
                "[{}/{}]  h:Help  j/k:Move  Enter:Details  u:Url  s:Save  d:Delete  o:PDF  q:Quit",
                position,
                app.entries.len()
            )
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
