use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;

/// Upper bound on a wave message. The contract itself accepts any string,
/// but the fixed gas limit would fail an oversized one on-chain; this
/// fails it early with a visible notice instead.
pub const MAX_MESSAGE_LEN: usize = 280;

/// Popup input for drafting a wave message. The draft survives closing
/// the popup and a failed submission; it is cleared only after the wave
/// has actually mined.
pub struct Compose {
    pub active: bool,
    input: String,
    cursor_position: usize,
    pub error: Option<String>,
}

impl Compose {
    pub fn new() -> Self {
        Self {
            active: false,
            input: String::new(),
            cursor_position: 0,
            error: None,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.cursor_position = self.input.len();
        self.error = None;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.error = None;
    }

    /// Forget the draft. Called once a submission has mined.
    pub fn clear_draft(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn draft(&self) -> &str {
        &self.input
    }

    /// Returns Some(message) when the user submits a valid draft; the
    /// popup closes but the draft is retained until `clear_draft`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        if !self.active {
            return None;
        }

        match key.code {
            KeyCode::Enter => match validate_message(&self.input) {
                Ok(message) => {
                    self.active = false;
                    self.error = None;
                    Some(message)
                }
                Err(reason) => {
                    self.error = Some(reason);
                    None
                }
            },
            KeyCode::Esc => {
                self.deactivate();
                None
            }
            KeyCode::Backspace => {
                if let Some(c) = self.input[..self.cursor_position].chars().next_back() {
                    self.cursor_position -= c.len_utf8();
                    self.input.remove(self.cursor_position);
                }
                self.error = None;
                None
            }
            KeyCode::Delete => {
                if self.cursor_position < self.input.len() {
                    self.input.remove(self.cursor_position);
                }
                self.error = None;
                None
            }
            KeyCode::Left => {
                if let Some(c) = self.input[..self.cursor_position].chars().next_back() {
                    self.cursor_position -= c.len_utf8();
                }
                None
            }
            KeyCode::Right => {
                if let Some(c) = self.input[self.cursor_position..].chars().next() {
                    self.cursor_position += c.len_utf8();
                }
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.input.len();
                None
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.input.clear();
                    self.cursor_position = 0;
                } else {
                    self.input.insert(self.cursor_position, c);
                    self.cursor_position += c.len_utf8();
                }
                self.error = None;
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let width = area.width.min(70);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let popup_area = Rect::new(x, area.y + 2, width, 3);

        frame.render_widget(Clear, popup_area);

        let border_style = if self.error.is_some() {
            THEME.error_style()
        } else {
            THEME.border_focused_style()
        };

        let title = if let Some(ref err) = self.error {
            format!(" Wave - {err} ")
        } else {
            format!(" Wave ({}/{MAX_MESSAGE_LEN}) ", self.input.chars().count())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(THEME.surface));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let display_text = if self.input.is_empty() {
            Span::styled("Say something, then press Enter...", THEME.muted_style())
        } else {
            Span::styled(&self.input, Style::default().fg(THEME.text))
        };

        let input_paragraph = Paragraph::new(display_text);
        frame.render_widget(input_paragraph, inner);

        let cursor_col = self.input[..self.cursor_position].chars().count() as u16;
        let cursor_x = inner.x + cursor_col;
        let cursor_y = inner.y;
        if cursor_x < inner.right() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

/// Validate a draft before a transaction is attempted: trimmed non-empty
/// and within the length cap.
fn validate_message(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("message is empty".to_string());
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(format!("message is over {MAX_MESSAGE_LEN} characters"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(compose: &mut Compose, code: KeyCode) -> Option<String> {
        compose.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(compose: &mut Compose, s: &str) {
        for c in s.chars() {
            press(compose, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_builds_draft() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, "gm frens");
        assert_eq!(compose.draft(), "gm frens");
    }

    #[test]
    fn test_submit_returns_trimmed_message_and_closes() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, "  hello  ");
        let submitted = press(&mut compose, KeyCode::Enter);
        assert_eq!(submitted.as_deref(), Some("hello"));
        assert!(!compose.active);
    }

    #[test]
    fn test_empty_submit_is_rejected() {
        let mut compose = Compose::new();
        compose.activate();
        assert!(press(&mut compose, KeyCode::Enter).is_none());
        assert!(compose.error.is_some());
        assert!(compose.active);
    }

    #[test]
    fn test_whitespace_only_submit_is_rejected() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, "   ");
        assert!(press(&mut compose, KeyCode::Enter).is_none());
        assert!(compose.error.is_some());
    }

    #[test]
    fn test_over_limit_submit_is_rejected() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, &"x".repeat(MAX_MESSAGE_LEN + 1));
        assert!(press(&mut compose, KeyCode::Enter).is_none());
        assert!(compose.error.is_some());
    }

    #[test]
    fn test_draft_survives_submit_until_cleared() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, "wave one");
        let submitted = press(&mut compose, KeyCode::Enter);
        assert!(submitted.is_some());

        // Failed submission path: reopening shows the draft for a retry.
        compose.activate();
        assert_eq!(compose.draft(), "wave one");

        // Mined path: the draft is gone.
        compose.clear_draft();
        assert_eq!(compose.draft(), "");
    }

    #[test]
    fn test_backspace_and_ctrl_u() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, "abc");
        press(&mut compose, KeyCode::Backspace);
        assert_eq!(compose.draft(), "ab");

        compose.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(compose.draft(), "");
    }

    #[test]
    fn test_multibyte_input_edits_cleanly() {
        let mut compose = Compose::new();
        compose.activate();
        type_str(&mut compose, "wave 👋!");
        assert_eq!(compose.draft(), "wave 👋!");

        // Cursor walks char boundaries, not bytes.
        press(&mut compose, KeyCode::Left);
        press(&mut compose, KeyCode::Backspace);
        assert_eq!(compose.draft(), "wave !");
    }

    #[test]
    fn test_inactive_compose_ignores_keys() {
        let mut compose = Compose::new();
        assert!(press(&mut compose, KeyCode::Char('x')).is_none());
        assert_eq!(compose.draft(), "");
    }
}
