use crate::ui::screen::Screen;
use crate::ui::status::{Severity, StatusMessage};
use crate::ui::theme::{
    GLOBAL_BORDER, HEADER_TEXT, MESSAGE_ERROR, MESSAGE_INFO, MESSAGE_SUCCESS,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer<'a> {
    screen: Screen,
    status: Option<&'a StatusMessage>,
    busy: bool,
}

impl<'a> Footer<'a> {
    pub fn new(screen: Screen, status: Option<&'a StatusMessage>, busy: bool) -> Self {
        Self {
            screen,
            status,
            busy,
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = format!(" {}", hints_for(self.screen));
        let version = format!("v{} ", VERSION);

        // Char count, not byte count: the hints contain box-drawing separators.
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints.chars().count())
            .saturating_sub(version.chars().count());

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let hints_line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        let mut status_spans = Vec::new();
        if self.busy {
            status_spans.push(Span::styled(" ⋯ working", text_style));
        }
        if let Some(message) = self.status {
            status_spans.push(Span::styled(
                format!(" {}", message.text),
                Style::default().fg(severity_color(message.severity)),
            ));
        }

        Paragraph::new(vec![hints_line, Line::from(status_spans)])
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

fn severity_color(severity: Severity) -> ratatui::style::Color {
    match severity {
        Severity::Info => MESSAGE_INFO,
        Severity::Success => MESSAGE_SUCCESS,
        Severity::Error => MESSAGE_ERROR,
    }
}

pub fn hints_for(screen: Screen) -> &'static str {
    match screen {
        Screen::Initial => "l: Login │ r: Register │ q: Quit",
        Screen::Login | Screen::Register => "Enter: Submit │ Esc: Back │ Ctrl+Q: Quit",
        Screen::Main => "s: Scan │ b: Leaderboard │ u: Refresh │ o: Logout │ q: Quit",
        Screen::ScanMethodChoice => "↑/↓: Select │ Enter: Choose │ c: Camera │ i: Image │ Esc: Back",
        Screen::CameraScanner => "Esc: Cancel",
        Screen::ImageUpload => "Enter: Decode │ Esc: Cancel",
        Screen::Leaderboard => "u: Refresh │ Esc: Back",
    }
}
