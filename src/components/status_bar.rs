use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

pub struct StatusBar {
    pub connected: bool,
    pub live: bool,
    pub loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            connected: false,
            live: false,
            loading: false,
            error_message: None,
            info_message: None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let bg = Block::default().style(THEME.header_style());
        frame.render_widget(bg, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        // --- Left side: error > info > loading > key hints ---
        let left_content = if let Some(ref err) = self.error_message {
            Line::from(vec![
                Span::styled(
                    " ! ",
                    Style::default()
                        .fg(THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(err.as_str(), Style::default().fg(THEME.warning)),
            ])
        } else if let Some(ref info) = self.info_message {
            Line::from(Span::styled(
                format!(" {info}"),
                Style::default().fg(THEME.text_accent),
            ))
        } else if self.loading {
            Line::from(Span::styled(
                " Working...",
                Style::default().fg(THEME.text_accent),
            ))
        } else {
            Line::from(vec![
                Span::styled(" w", Style::default().fg(THEME.text_accent)),
                Span::styled(":Wave  ", Style::default().fg(THEME.text_muted)),
                Span::styled("c", Style::default().fg(THEME.text_accent)),
                Span::styled(":Connect  ", Style::default().fg(THEME.text_muted)),
                Span::styled("r", Style::default().fg(THEME.text_accent)),
                Span::styled(":Refresh  ", Style::default().fg(THEME.text_muted)),
                Span::styled("e", Style::default().fg(THEME.text_accent)),
                Span::styled(":Export  ", Style::default().fg(THEME.text_muted)),
                Span::styled("?", Style::default().fg(THEME.text_accent)),
                Span::styled(":Help  ", Style::default().fg(THEME.text_muted)),
                Span::styled("q", Style::default().fg(THEME.text_accent)),
                Span::styled(":Quit", Style::default().fg(THEME.text_muted)),
            ])
        };

        let left = Paragraph::new(left_content).style(THEME.header_style());
        frame.render_widget(left, chunks[0]);

        // --- Right side: live indicator + connection status ---
        let (live_color, live_text) = if self.live {
            (THEME.success, "Live")
        } else {
            (THEME.text_muted, "Live:--")
        };

        let (dot_color, status_text) = if self.connected {
            (THEME.success, "Connected")
        } else {
            (THEME.error, "Disconnected")
        };

        let right_content = Line::from(vec![
            Span::styled(live_text, Style::default().fg(live_color)),
            Span::styled(" | ", THEME.muted_style()),
            Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
            Span::styled(format!("{status_text} "), Style::default().fg(dot_color)),
        ]);

        let right = Paragraph::new(right_content)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(right, chunks[1]);
    }
}
