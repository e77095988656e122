use crate::api::User;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Top bar: app name plus the logged-in user's standing.
pub struct Header<'a> {
    user: Option<&'a User>,
    players: usize,
}

impl<'a> Header<'a> {
    pub fn new(user: Option<&'a User>, players: usize) -> Self {
        Self { user, players }
    }

    pub fn widget(&self) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "QR Quest",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ];

        match self.user {
            Some(user) => {
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled(user.email.clone(), text_style));
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled(format!("{} pts", user.points), text_style));
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled(
                    position_label(user.position, self.players),
                    text_style,
                ));
            }
            None => {
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled("not logged in", separator_style));
            }
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

pub fn position_label(position: Option<u32>, players: usize) -> String {
    match (position, players) {
        (Some(position), 0) => format!("#{position}"),
        (Some(position), players) => format!("#{position} of {players}"),
        (None, _) => "unranked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_label_formats() {
        assert_eq!(position_label(Some(2), 10), "#2 of 10");
        assert_eq!(position_label(Some(2), 0), "#2");
        assert_eq!(position_label(None, 10), "unranked");
    }
}
