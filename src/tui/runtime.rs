use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::collections::HashMap;

use crate::tui::open::try_open_link;
use crate::tui::{App, Command, Subscription, Theme};

/// The runtime owns an app's state, routes input to it and executes the
/// commands it returns
pub struct Runtime<A: App> {
    /// Current app state
    state: A::State,

    theme: Theme,

    /// Keyboard subscriptions
    key_subscriptions: HashMap<KeyCode, A::Msg>,

    /// Key descriptions for the help overlay, in declaration order
    key_bindings: Vec<(KeyCode, String)>,

    help_menu_open: bool,
    help_scroll_offset: usize,
}

impl<A: App> Runtime<A> {
    pub fn new(state: A::State, theme: Theme) -> Self {
        let mut runtime = Self {
            state,
            theme,
            key_subscriptions: HashMap::new(),
            key_bindings: Vec::new(),
            help_menu_open: false,
            help_scroll_offset: 0,
        };
        runtime.update_subscriptions();
        runtime
    }

    /// Get a reference to the app's state
    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn help_menu_open(&self) -> bool {
        self.help_menu_open
    }

    /// Get keyboard bindings for help menu
    pub fn key_bindings(&self) -> &[(KeyCode, String)] {
        &self.key_bindings
    }

    /// Rebuild subscriptions from the current state
    fn update_subscriptions(&mut self) {
        self.key_subscriptions.clear();
        self.key_bindings.clear();

        for sub in A::subscriptions(&self.state) {
            match sub {
                Subscription::Keyboard {
                    key,
                    msg,
                    description,
                } => {
                    self.key_subscriptions.insert(key, msg);
                    self.key_bindings.push((key, description));
                }
            }
        }
    }

    /// Feed a message through update and run the resulting command.
    /// Returns false when the app asked to quit.
    pub fn dispatch(&mut self, msg: A::Msg) -> Result<bool> {
        let command = A::update(&mut self.state, msg);
        let keep_running = self.execute_command(command)?;
        self.update_subscriptions();
        Ok(keep_running)
    }

    /// Handle a keyboard event (returns false to quit)
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        if key_event.code == KeyCode::Char('q')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Ok(false);
        }

        // Global keys: F1 toggles help menu
        if key_event.code == KeyCode::F(1) {
            self.help_menu_open = !self.help_menu_open;
            self.help_scroll_offset = 0;
            return Ok(true);
        }

        // When help menu is open, intercept keys for help control
        if self.help_menu_open {
            match key_event.code {
                KeyCode::Esc => self.help_menu_open = false,
                KeyCode::Up => {
                    self.help_scroll_offset = self.help_scroll_offset.saturating_sub(1);
                }
                KeyCode::Down => {
                    self.help_scroll_offset = self.help_scroll_offset.saturating_add(1);
                }
                _ => {}
            }
            return Ok(true);
        }

        if let Some(msg) = A::capture_key(&self.state, key_event.code) {
            return self.dispatch(msg);
        }

        if let Some(msg) = self.key_subscriptions.get(&key_event.code).cloned() {
            return self.dispatch(msg);
        }

        Ok(true)
    }

    /// Handle a mouse event; the wheel scrolls like the arrow keys
    pub fn handle_mouse(&mut self, mouse_event: MouseEvent) -> Result<bool> {
        let key = match mouse_event.kind {
            MouseEventKind::ScrollUp => KeyCode::Up,
            MouseEventKind::ScrollDown => KeyCode::Down,
            _ => return Ok(true),
        };
        self.handle_key(KeyEvent::new(key, KeyModifiers::NONE))
    }

    /// Execute a command
    fn execute_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::None => Ok(true),

            Command::OpenLink(target) => {
                try_open_link(&target);
                Ok(true)
            }

            Command::Quit => Ok(false),
        }
    }

    /// Render header, app content and (if open) the help overlay
    pub fn render(&mut self, frame: &mut Frame) {
        let full_area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(full_area);

        self.render_header(frame, chunks[0]);
        A::view(&mut self.state, frame, chunks[1], &self.theme);

        if self.help_menu_open {
            self.render_help_menu(frame, full_area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;

        // Build title line with optional status
        let mut spans = vec![Span::styled(
            A::title(),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )];
        if let Some(status_line) = A::status(&self.state, theme) {
            spans.push(Span::raw(" "));
            spans.extend(status_line.spans);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.surface1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(15)])
            .split(inner);

        frame.render_widget(Paragraph::new(Line::from(spans)), columns[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "[?] F1 Help",
                Style::default().fg(theme.overlay1),
            )),
            columns[1],
        );
    }

    fn render_help_menu(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;

        let global_bindings = [
            (KeyCode::F(1), "Toggle help menu".to_string()),
            (KeyCode::Esc, "Close help menu".to_string()),
        ];

        let mut help_items = vec![
            Line::from(Span::styled(
                "▼ Global",
                Style::default().fg(theme.peach).add_modifier(Modifier::BOLD),
            )),
        ];
        help_items.extend(global_bindings.iter().map(|(key, description)| {
            binding_line(key, description, theme, theme.mauve)
        }));
        help_items.push(Line::from(""));
        help_items.push(Line::from(Span::styled(
            format!("▼ {}", A::title()),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )));
        help_items.extend(
            self.key_bindings
                .iter()
                .map(|(key, description)| binding_line(key, description, theme, theme.green)),
        );

        let visible: Vec<Line> = help_items
            .into_iter()
            .skip(self.help_scroll_offset)
            .chain(std::iter::once(Line::from(Span::styled(
                "[ESC to close | ↑↓ to scroll]",
                Style::default().fg(theme.overlay1),
            ))))
            .collect();

        // Calculate centered position for help modal
        let modal_width = area.width.min(60);
        let modal_height = area.height.min(20);
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(modal_width)) / 2,
            y: area.y + (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        let modal = Paragraph::new(visible).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(theme.lavender)),
        );
        frame.render_widget(Clear, modal_area);
        frame.render_widget(modal, modal_area);
    }
}

fn binding_line(
    key: &KeyCode,
    description: &str,
    theme: &Theme,
    key_color: ratatui::style::Color,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:13}", key_label(key)), Style::default().fg(key_color)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(theme.text)),
    ])
}

/// Short, human readable key name for the help overlay
pub fn key_label(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{Document, PanelPath, RenderOptions};
    use crate::tui::ThemeVariant;
    use crate::tui::apps::{DocumentApp, document_app};
    use serde_json::json;

    fn runtime() -> Runtime<DocumentApp> {
        let document = Document::new("doc", json!({"a": {"b": 1}, "c": 2})).unwrap();
        let state = document_app::State::new(document, RenderOptions::default());
        Runtime::new(state, Theme::new(ThemeVariant::Mocha))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut runtime = runtime();
        assert!(!runtime.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)).unwrap());
        assert!(!runtime.handle_key(press(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut runtime = runtime();
        runtime.handle_key(press(KeyCode::F(1))).unwrap();
        assert!(runtime.help_menu_open());

        // 'q' would quit the app, but the overlay owns input while open
        assert!(runtime.handle_key(press(KeyCode::Char('q'))).unwrap());
        runtime.handle_key(press(KeyCode::Esc)).unwrap();
        assert!(!runtime.help_menu_open());
    }

    #[test]
    fn test_keys_and_wheel_reach_the_app() {
        let mut runtime = runtime();
        runtime.handle_key(press(KeyCode::Char('j'))).unwrap();
        assert_eq!(
            runtime.state().tree().selected(),
            Some(&PanelPath::from_segments(["a"]))
        );

        runtime
            .handle_mouse(MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
            .unwrap();
        assert_eq!(runtime.state().tree().selected(), Some(&PanelPath::root()));
    }

    #[test]
    fn test_search_prompt_captures_plain_keys() {
        let mut runtime = runtime();
        runtime.handle_key(press(KeyCode::Char('/'))).unwrap();
        // Typed into the prompt instead of quitting
        assert!(runtime.handle_key(press(KeyCode::Char('q'))).unwrap());
        assert!(runtime.key_bindings().iter().any(|(key, _)| *key == KeyCode::Char('/')));
    }

    #[test]
    fn test_key_label() {
        assert_eq!(key_label(&KeyCode::Char(' ')), "Space");
        assert_eq!(key_label(&KeyCode::F(1)), "F1");
        assert_eq!(key_label(&KeyCode::Enter), "Enter");
    }
}
