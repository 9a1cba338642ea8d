use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Returns true if it consumed the event
    pub fn handle_key(&mut self, _key: KeyEvent) -> bool {
        if self.visible {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_width = area.width * 55 / 100;
        let popup_height = area.height * 60 / 100;
        let x = area.x + (area.width - popup_width) / 2;
        let y = area.y + (area.height - popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .borders(Borders::ALL)
            .border_style(THEME.border_focused_style())
            .style(Style::default().bg(THEME.surface));

        let key_style = Style::default().fg(THEME.text_accent);
        let text_style = Style::default().fg(THEME.text);
        let section_style = Style::default()
            .fg(THEME.text_accent)
            .add_modifier(Modifier::BOLD);

        let help_text = vec![
            Line::from(Span::styled("Waving", section_style)),
            Line::from(vec![
                Span::styled("  w        ", key_style),
                Span::styled("Compose a wave", text_style),
            ]),
            Line::from(vec![
                Span::styled("  Enter    ", key_style),
                Span::styled("Submit the draft", text_style),
            ]),
            Line::from(vec![
                Span::styled("  Esc      ", key_style),
                Span::styled("Close the compose popup", text_style),
            ]),
            Line::from(""),
            Line::from(Span::styled("Wallet", section_style)),
            Line::from(vec![
                Span::styled("  c        ", key_style),
                Span::styled("Connect the configured wallet", text_style),
            ]),
            Line::from(""),
            Line::from(Span::styled("Feed", section_style)),
            Line::from(vec![
                Span::styled("  \u{2191}/k      ", key_style),
                Span::styled("Move up", text_style),
            ]),
            Line::from(vec![
                Span::styled("  \u{2193}/j      ", key_style),
                Span::styled("Move down", text_style),
            ]),
            Line::from(vec![
                Span::styled("  g / G    ", key_style),
                Span::styled("Jump to oldest / newest", text_style),
            ]),
            Line::from(vec![
                Span::styled("  r        ", key_style),
                Span::styled("Reload the wave feed", text_style),
            ]),
            Line::from(""),
            Line::from(Span::styled("Export", section_style)),
            Line::from(vec![
                Span::styled("  e        ", key_style),
                Span::styled("Export the feed as CSV", text_style),
            ]),
            Line::from(vec![
                Span::styled("  E        ", key_style),
                Span::styled("Export the feed as JSON", text_style),
            ]),
            Line::from(""),
            Line::from(Span::styled("Other", section_style)),
            Line::from(vec![
                Span::styled("  ?        ", key_style),
                Span::styled("Toggle this help", text_style),
            ]),
            Line::from(vec![
                Span::styled("  q        ", key_style),
                Span::styled("Quit", text_style),
            ]),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}
