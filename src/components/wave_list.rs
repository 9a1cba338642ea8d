use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::components::Component;
use crate::data::types::WaveRecord;
use crate::events::AppEvent;
use crate::theme::THEME;
use crate::utils;

/// Scrollable table of waves in arrival order: seeded history first,
/// live arrivals appended below.
pub struct WaveList {
    pub waves: Vec<WaveRecord>,
    pub wallet_connected: bool,
    pub loading: bool,
    table_state: TableState,
    scroll_state: ScrollbarState,
}

impl WaveList {
    pub fn new() -> Self {
        Self {
            waves: Vec::new(),
            wallet_connected: false,
            loading: false,
            table_state: TableState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    /// Replace the rendered list, keeping the selection in bounds.
    pub fn set_waves(&mut self, waves: Vec<WaveRecord>) {
        self.waves = waves;
        if self.waves.is_empty() {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= self.waves.len() {
                self.table_state.select(Some(self.waves.len() - 1));
            }
        }
        self.scroll_state = self.scroll_state.content_length(self.waves.len());
    }

    fn select_next(&mut self) {
        if self.waves.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if current + 1 >= self.waves.len() {
            current
        } else {
            current + 1
        };
        self.table_state.select(Some(next));
        self.scroll_state = self.scroll_state.position(next);
    }

    fn select_prev(&mut self) {
        if self.waves.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let prev = current.saturating_sub(1);
        self.table_state.select(Some(prev));
        self.scroll_state = self.scroll_state.position(prev);
    }

    fn select_first(&mut self) {
        if !self.waves.is_empty() {
            self.table_state.select(Some(0));
            self.scroll_state = self.scroll_state.position(0);
        }
    }

    fn select_last(&mut self) {
        if !self.waves.is_empty() {
            let last = self.waves.len() - 1;
            self.table_state.select(Some(last));
            self.scroll_state = self.scroll_state.position(last);
        }
    }
}

impl Component for WaveList {
    fn handle_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') => self.select_first(),
            KeyCode::Char('G') => self.select_last(),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut outer_block = Block::default()
            .title(format!(" Waves ({}) ", self.waves.len()))
            .borders(Borders::ALL)
            .border_style(THEME.border_style());

        // Absolute time of the selected wave along the bottom edge; the
        // table rows themselves only show relative age.
        if let Some(wave) = self
            .table_state
            .selected()
            .and_then(|selected| self.waves.get(selected))
        {
            outer_block = outer_block.title_bottom(
                Line::from(Span::styled(
                    format!(" {} ", utils::format_timestamp(&wave.timestamp)),
                    THEME.hash_style(),
                ))
                .right_aligned(),
            );
        }

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        if self.waves.is_empty() {
            let msg = if self.loading {
                "Loading waves..."
            } else if self.wallet_connected {
                "No waves yet - press w to send the first one"
            } else {
                "Connect a wallet to load the wave feed - press c"
            };
            let text = Paragraph::new(msg)
                .style(THEME.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(text, inner);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Waver"),
            Cell::from("Time"),
            Cell::from("Message"),
        ])
        .style(THEME.table_header_style());

        let rows: Vec<Row> = self
            .waves
            .iter()
            .map(|wave| {
                Row::new(vec![
                    Cell::from(utils::truncate_address(&wave.waver)).style(THEME.address_style()),
                    Cell::from(utils::format_time_ago(&wave.timestamp))
                        .style(THEME.muted_style()),
                    Cell::from(wave.message.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(THEME.selected_style())
            .highlight_symbol(" > ");

        frame.render_stateful_widget(table, inner, &mut self.table_state);
    }
}
