use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::panels::{CollapseState, Document, RenderOptions};
use crate::tui::pane::{self, PaneSnapshot};
use crate::tui::widgets::{SearchState, TreeState};
use crate::tui::{App, Command, Subscription, Theme};

/// Single-document viewer: one panel tree for the whole JSON document
pub struct DocumentApp;

#[derive(Clone)]
pub enum Msg {
    Navigate(KeyCode),
    Toggle,
    Expand,
    CollapseOrParent,
    ExpandAll,
    CollapseAll,
    OpenLink,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SubmitSearch,
    CancelSearch,
    NextMatch,
    Quit,
}

pub struct State {
    document: Document,
    options: RenderOptions,
    collapse: CollapseState,
    tree: TreeState,
    search: SearchState,
    snapshot: PaneSnapshot,
    notice: Option<String>,
}

impl State {
    pub fn new(document: Document, options: RenderOptions) -> Self {
        let mut state = Self {
            document,
            options,
            collapse: CollapseState::new(),
            tree: TreeState::new(),
            search: SearchState::new(),
            snapshot: PaneSnapshot::default(),
            notice: None,
        };
        state.refresh();
        state
    }

    pub fn collapse_state(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn tree(&self) -> &TreeState {
        &self.tree
    }

    pub fn snapshot(&self) -> &PaneSnapshot {
        &self.snapshot
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Rebuild the panel tree after the collapse flags changed
    fn refresh(&mut self) {
        match self.document.render(&self.collapse, &self.options) {
            Ok(panel) => self.snapshot = PaneSnapshot::from_panel(&panel),
            Err(e) => {
                log::error!("Failed to render document: {}", e);
                self.notice = Some(e.to_string());
                self.snapshot = PaneSnapshot::default();
            }
        }
        self.tree.sync(&self.snapshot.lines);
    }
}

impl App for DocumentApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg) -> Command {
        state.notice = None;
        match msg {
            Msg::Navigate(key) => {
                state.tree.handle_key(key);
                return Command::None;
            }
            Msg::Toggle => pane::toggle_selected(&state.snapshot, &mut state.collapse, &mut state.tree),
            Msg::Expand => pane::expand_selected(&state.snapshot, &mut state.collapse, &state.tree),
            Msg::CollapseOrParent => {
                pane::collapse_or_parent(&state.snapshot, &mut state.collapse, &mut state.tree)
            }
            Msg::ExpandAll => pane::set_all(&state.snapshot, &mut state.collapse, false),
            Msg::CollapseAll => pane::set_all(&state.snapshot, &mut state.collapse, true),
            Msg::OpenLink => {
                return match pane::selected_link(&state.snapshot, &state.tree) {
                    Some(target) => {
                        state.notice = Some(format!("opening {}", target));
                        Command::open_link(target)
                    }
                    None => {
                        state.notice = Some("no link on this panel".to_string());
                        Command::None
                    }
                };
            }
            Msg::StartSearch => {
                state.search.start();
                return Command::None;
            }
            Msg::SearchInput(c) => {
                state.search.push_char(c);
                return Command::None;
            }
            Msg::SearchBackspace => {
                state.search.pop_char();
                return Command::None;
            }
            Msg::CancelSearch => {
                state.search.cancel();
                return Command::None;
            }
            Msg::SubmitSearch => match state.search.submit(&state.snapshot.all_lines) {
                Some(hit) => jump_to(state, hit),
                None => {
                    state.notice = Some(format!("no match for '{}'", state.search.query()));
                    return Command::None;
                }
            },
            Msg::NextMatch => match state.search.next_match() {
                Some(hit) => jump_to(state, hit),
                None => return Command::None,
            },
            Msg::Quit => return Command::Quit,
        }
        state.refresh();
        Command::None
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let title = state.document.title().to_string();
        pane::draw_pane(frame, chunks[0], &title, &state.snapshot, &mut state.tree, theme, true);

        let footer = if state.search.is_editing() {
            Line::from(vec![
                Span::styled("/", Style::default().fg(theme.yellow)),
                Span::styled(state.search.query().to_string(), Style::default().fg(theme.text)),
                Span::styled("▏", Style::default().fg(theme.overlay1)),
            ])
        } else if let Some(notice) = &state.notice {
            Line::from(Span::styled(notice.clone(), theme.warning_style()))
        } else {
            Line::from(Span::styled(
                "↑↓ move  Enter toggle  e/c expand/collapse all  / search  o open link  q quit",
                Style::default().fg(theme.overlay1),
            ))
        };
        frame.render_widget(Paragraph::new(footer), chunks[1]);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        let mut subs = vec![
            Subscription::keyboard(KeyCode::Up, "Move up", Msg::Navigate(KeyCode::Up)),
            Subscription::keyboard(KeyCode::Down, "Move down", Msg::Navigate(KeyCode::Down)),
            Subscription::keyboard(KeyCode::Char('k'), "Move up", Msg::Navigate(KeyCode::Up)),
            Subscription::keyboard(KeyCode::Char('j'), "Move down", Msg::Navigate(KeyCode::Down)),
            Subscription::keyboard(KeyCode::PageUp, "Page up", Msg::Navigate(KeyCode::PageUp)),
            Subscription::keyboard(KeyCode::PageDown, "Page down", Msg::Navigate(KeyCode::PageDown)),
            Subscription::keyboard(KeyCode::Home, "First line", Msg::Navigate(KeyCode::Home)),
            Subscription::keyboard(KeyCode::End, "Last line", Msg::Navigate(KeyCode::End)),
            Subscription::keyboard(KeyCode::Enter, "Toggle panel", Msg::Toggle),
            Subscription::keyboard(KeyCode::Char(' '), "Toggle panel", Msg::Toggle),
            Subscription::keyboard(KeyCode::Right, "Expand panel", Msg::Expand),
            Subscription::keyboard(KeyCode::Char('l'), "Expand panel", Msg::Expand),
            Subscription::keyboard(KeyCode::Left, "Collapse / go to parent", Msg::CollapseOrParent),
            Subscription::keyboard(KeyCode::Char('h'), "Collapse / go to parent", Msg::CollapseOrParent),
            Subscription::keyboard(KeyCode::Char('e'), "Expand all", Msg::ExpandAll),
            Subscription::keyboard(KeyCode::Char('c'), "Collapse all", Msg::CollapseAll),
            Subscription::keyboard(KeyCode::Char('o'), "Open link", Msg::OpenLink),
            Subscription::keyboard(KeyCode::Char('/'), "Search keys", Msg::StartSearch),
            Subscription::keyboard(KeyCode::Char('q'), "Quit", Msg::Quit),
        ];

        if state.search.is_active() {
            subs.push(Subscription::keyboard(KeyCode::Char('n'), "Next match", Msg::NextMatch));
            subs.push(Subscription::keyboard(KeyCode::Esc, "Clear search", Msg::CancelSearch));
        } else {
            subs.push(Subscription::keyboard(KeyCode::Esc, "Quit", Msg::Quit));
        }

        subs
    }

    fn title() -> &'static str {
        "Document"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        let mut spans = vec![Span::styled(
            format!("- {}", state.document.title()),
            Style::default().fg(theme.subtext0),
        )];
        if let (Some(position), true) = (state.search.position(), state.search.is_active()) {
            spans.push(Span::styled(
                format!("  match {}/{}", position, state.search.match_count()),
                theme.info_style(),
            ));
        }
        Some(Line::from(spans))
    }

    fn capture_key(state: &State, key: KeyCode) -> Option<Msg> {
        if !state.search.is_editing() {
            return None;
        }
        match key {
            KeyCode::Char(c) => Some(Msg::SearchInput(c)),
            KeyCode::Backspace => Some(Msg::SearchBackspace),
            KeyCode::Enter => Some(Msg::SubmitSearch),
            KeyCode::Esc => Some(Msg::CancelSearch),
            _ => None,
        }
    }
}

/// Make a search hit visible and select it
fn jump_to(state: &mut State, hit: crate::panels::PanelPath) {
    pane::reveal(&state.snapshot, &mut state.collapse, &hit);
    state.tree.select(Some(hit));
}
