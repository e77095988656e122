use crate::api::User;
use crate::config::QrBox;
use crate::ui::app::{App, SCAN_METHODS};
use crate::ui::footer::Footer;
use crate::ui::header::{position_label, Header};
use crate::ui::layout::{centered_rect, layout_regions};
use crate::ui::screen::Screen;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(
        Header::new(app.user(), app.leaderboard().len()).widget(),
        header,
    );
    frame.render_widget(Clear, body);

    let screen = app.active_screen();
    let panel = centered_rect(70, 80, body);
    let block = Block::default()
        .title(format!(" {} ", screen.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let lines = match screen {
        Screen::Initial => initial_lines(),
        Screen::Login => form_lines("Log in with your email.", app.email_input()),
        Screen::Register => form_lines("Register a new player.", app.email_input()),
        Screen::Main => main_lines(app.user(), app.leaderboard().len()),
        Screen::ScanMethodChoice => method_lines(app.method_selection()),
        Screen::CameraScanner => camera_lines(app),
        Screen::ImageUpload => {
            form_lines("Path of an image containing a QR code.", app.image_path_input())
        }
        Screen::Leaderboard => leaderboard_lines(app),
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    if screen.has_text_input() {
        let input = match screen {
            Screen::ImageUpload => app.image_path_input(),
            _ => app.email_input(),
        };
        set_input_cursor(frame, inner, input);
    }

    let footer_widget = Footer::new(screen, app.status().current(), app.is_busy());
    frame.render_widget(footer_widget.widget(footer), footer);
}

fn text_style() -> Style {
    Style::default().fg(HEADER_TEXT)
}

fn dim_style() -> Style {
    Style::default().fg(HEADER_SEPARATOR)
}

fn initial_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Find QR codes, scan them, climb the leaderboard.",
            text_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[l] ", Style::default().fg(ACCENT)),
            Span::styled("Log in", text_style()),
        ]),
        Line::from(vec![
            Span::styled("[r] ", Style::default().fg(ACCENT)),
            Span::styled("Register", text_style()),
        ]),
    ]
}

// The input sits on the third line; `set_input_cursor` relies on it.
fn form_lines(prompt: &str, input: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(prompt.to_string(), text_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::styled(input.to_string(), text_style()),
        ]),
    ]
}

fn set_input_cursor(frame: &mut Frame<'_>, inner: Rect, input: &str) {
    if inner.width == 0 || inner.height < 3 {
        return;
    }
    frame.set_cursor_position((cursor_column(inner, input), inner.y + 2));
}

/// Column just past the typed text, clamped to the panel.
fn cursor_column(inner: Rect, input: &str) -> u16 {
    let offset = u16::try_from(input.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    inner.x + offset.min(inner.width.saturating_sub(1))
}

fn main_lines(user: Option<&User>, players: usize) -> Vec<Line<'static>> {
    let Some(user) = user else {
        return vec![Line::from(Span::styled("Not logged in.", dim_style()))];
    };
    vec![
        Line::from(vec![
            Span::styled("Player:   ", dim_style()),
            Span::styled(user.email.clone(), text_style()),
        ]),
        Line::from(vec![
            Span::styled("Points:   ", dim_style()),
            Span::styled(
                user.points.to_string(),
                text_style().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Position: ", dim_style()),
            Span::styled(position_label(user.position, players), text_style()),
        ]),
    ]
}

fn method_lines(selected: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("How do you want to scan?", text_style())),
        Line::from(""),
    ];
    for (index, (_, label)) in SCAN_METHODS.iter().enumerate() {
        let style = if index == selected {
            text_style()
                .bg(ACTIVE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            text_style()
        };
        let marker = if index == selected { "› " } else { "  " };
        lines.push(Line::from(Span::styled(format!("{marker}{label}"), style)));
    }
    lines
}

fn camera_lines(app: &App) -> Vec<Line<'static>> {
    let source = app
        .camera_source()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    let config = app.scan_config();
    let qrbox = match config.qrbox {
        QrBox::Pixels(px) => format!("{px}px"),
        QrBox::Fraction(f) => format!("{:.0}% of the frame", f * 100.0),
    };
    let state = if app.is_scanner_running() {
        "Looking for a QR code..."
    } else {
        "Starting..."
    };
    vec![
        Line::from(Span::styled(state, text_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Source:   ", dim_style()),
            Span::styled(source, text_style()),
        ]),
        Line::from(vec![
            Span::styled("Rate:     ", dim_style()),
            Span::styled(format!("{} fps", config.fps), text_style()),
        ]),
        Line::from(vec![
            Span::styled("Scan box: ", dim_style()),
            Span::styled(qrbox, text_style()),
        ]),
    ]
}

fn leaderboard_lines(app: &App) -> Vec<Line<'static>> {
    let entries = app.leaderboard();
    if entries.is_empty() {
        let text = if app.is_busy() {
            "Loading..."
        } else {
            "No players yet."
        };
        return vec![Line::from(Span::styled(text, dim_style()))];
    }

    let me = app.user().map(|user| user.email.to_lowercase());
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mine = me
                .as_deref()
                .is_some_and(|email| entry.email.to_lowercase() == email);
            let style = if mine {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                text_style()
            };
            Line::from(Span::styled(
                format!("{:>3}. {:<32} {:>6}", index + 1, entry.email, entry.points),
                style,
            ))
        })
        .collect()
}
