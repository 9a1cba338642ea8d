use alloy::primitives::Address;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

pub struct Header {
    pub chain_id: u64,
    pub connected: bool,
    pub account: Option<Address>,
    pub total_waves: u64,
}

impl Header {
    pub fn new() -> Self {
        Self {
            chain_id: 0,
            connected: false,
            account: None,
            total_waves: 0,
        }
    }

    fn display_chain_name(&self) -> &str {
        match self.chain_id {
            1 => "Mainnet",
            11155111 => "Sepolia",
            17000 => "Holesky",
            10 => "Optimism",
            42161 => "Arbitrum",
            8453 => "Base",
            137 => "Polygon",
            31337 => "Local",
            _ => "Unknown",
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header_block = Block::default().style(THEME.header_style());
        frame.render_widget(header_block, area);

        // Left (title), center (account), right (network + counter)
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Min(0),
                Constraint::Length(32),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            " waveportal",
            Style::default()
                .fg(THEME.text_accent)
                .add_modifier(Modifier::BOLD),
        ))
        .style(THEME.header_style());
        frame.render_widget(title, chunks[0]);

        let account_line = match self.account {
            Some(account) => Line::from(vec![
                Span::styled("\u{25cf} ", THEME.success_style()),
                Span::styled(utils::truncate_address(&account), THEME.address_style()),
            ]),
            None => Line::from(Span::styled("no wallet connected", THEME.muted_style())),
        };
        let account_paragraph = Paragraph::new(account_line)
            .alignment(Alignment::Center)
            .style(THEME.header_style());
        frame.render_widget(account_paragraph, chunks[1]);

        let network_info = if self.connected {
            Line::from(vec![
                Span::styled(self.display_chain_name(), Style::default().fg(THEME.text)),
                Span::styled(" | ", THEME.muted_style()),
                Span::styled(
                    format!("{} waves ", utils::format_number(self.total_waves)),
                    THEME.accent_style(),
                ),
            ])
        } else {
            Line::from(Span::styled("connecting... ", THEME.muted_style()))
        };
        let network_paragraph = Paragraph::new(network_info)
            .alignment(Alignment::Right)
            .style(THEME.header_style());
        frame.render_widget(network_paragraph, chunks[2]);
    }
}
