use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use std::collections::HashMap;

use crate::panels::{
    CollapseState, ComparisonEntry, ComparisonState, RenderOptions, Side, build_section,
};
use crate::tui::pane::{self, PaneSnapshot};
use crate::tui::widgets::TreeState;
use crate::tui::{App, Command, Subscription, Theme};

/// Side-by-side viewer for comparison entries, one section at a time
pub struct ComparisonApp;

#[derive(Clone)]
pub enum Msg {
    Navigate(KeyCode),
    Toggle,
    Expand,
    CollapseOrParent,
    ExpandAll,
    CollapseAll,
    OpenLink,
    NextSection,
    PrevSection,
    SwitchSide,
    Quit,
}

pub struct State {
    entries: Vec<ComparisonEntry>,
    options: RenderOptions,
    collapse: ComparisonState,
    trees: HashMap<(usize, Side), TreeState>,
    section: usize,
    focus: Side,
    title: String,
    test_snapshot: PaneSnapshot,
    existing_snapshot: PaneSnapshot,
    notice: Option<String>,
}

impl State {
    pub fn new(entries: Vec<ComparisonEntry>, options: RenderOptions) -> Self {
        let mut state = Self {
            entries,
            options,
            collapse: ComparisonState::new(),
            trees: HashMap::new(),
            section: 0,
            focus: Side::Test,
            title: String::new(),
            test_snapshot: PaneSnapshot::default(),
            existing_snapshot: PaneSnapshot::default(),
            notice: None,
        };
        state.refresh();
        state
    }

    pub fn section(&self) -> usize {
        self.section
    }

    pub fn focus(&self) -> Side {
        self.focus
    }

    /// Title of the section on screen
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn snapshot(&self, side: Side) -> &PaneSnapshot {
        match side {
            Side::Test => &self.test_snapshot,
            Side::Existing => &self.existing_snapshot,
        }
    }

    pub fn collapse_state(&self, side: Side) -> Option<&CollapseState> {
        self.collapse.tree(self.section, side)
    }

    fn refresh(&mut self) {
        let Some(entry) = self.entries.get(self.section) else {
            self.title = "no comparison entries".to_string();
            self.test_snapshot = PaneSnapshot::default();
            self.existing_snapshot = PaneSnapshot::default();
            return;
        };

        match build_section(self.section, entry, &self.collapse, &self.options) {
            Ok(section) => {
                self.title = section.title();
                self.test_snapshot = PaneSnapshot::from_panel(&section.test);
                self.existing_snapshot = PaneSnapshot::from_panel(&section.existing);
            }
            Err(e) => {
                log::error!("Failed to render comparison section {}: {}", self.section + 1, e);
                self.notice = Some(e.to_string());
                self.test_snapshot = PaneSnapshot::default();
                self.existing_snapshot = PaneSnapshot::default();
            }
        }

        let section = self.section;
        self.trees
            .entry((section, Side::Test))
            .or_default()
            .sync(&self.test_snapshot.lines);
        self.trees
            .entry((section, Side::Existing))
            .or_default()
            .sync(&self.existing_snapshot.lines);
    }

    /// Snapshot, collapse flags and selection of the focused tree
    fn focused_parts(&mut self) -> (&PaneSnapshot, &mut CollapseState, &mut TreeState) {
        let snapshot = match self.focus {
            Side::Test => &self.test_snapshot,
            Side::Existing => &self.existing_snapshot,
        };
        let collapse = self.collapse.tree_mut(self.section, self.focus);
        let tree = self.trees.entry((self.section, self.focus)).or_default();
        (snapshot, collapse, tree)
    }
}

impl App for ComparisonApp {
    type State = State;
    type Msg = Msg;

    fn update(state: &mut State, msg: Msg) -> Command {
        state.notice = None;
        match msg {
            Msg::Navigate(key) => {
                let (_, _, tree) = state.focused_parts();
                tree.handle_key(key);
                return Command::None;
            }
            Msg::Toggle => {
                let (snapshot, collapse, tree) = state.focused_parts();
                pane::toggle_selected(snapshot, collapse, tree);
            }
            Msg::Expand => {
                let (snapshot, collapse, tree) = state.focused_parts();
                pane::expand_selected(snapshot, collapse, tree);
            }
            Msg::CollapseOrParent => {
                let (snapshot, collapse, tree) = state.focused_parts();
                pane::collapse_or_parent(snapshot, collapse, tree);
            }
            Msg::ExpandAll => {
                let (snapshot, collapse, _) = state.focused_parts();
                pane::set_all(snapshot, collapse, false);
            }
            Msg::CollapseAll => {
                let (snapshot, collapse, _) = state.focused_parts();
                pane::set_all(snapshot, collapse, true);
            }
            Msg::OpenLink => {
                let (snapshot, _, tree) = state.focused_parts();
                return match pane::selected_link(snapshot, tree) {
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
            Msg::NextSection => {
                if state.section + 1 < state.entries.len() {
                    state.section += 1;
                }
            }
            Msg::PrevSection => {
                state.section = state.section.saturating_sub(1);
            }
            Msg::SwitchSide => {
                state.focus = state.focus.other();
                return Command::None;
            }
            Msg::Quit => return Command::Quit,
        }
        state.refresh();
        Command::None
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(state.title.clone(), theme.header_style()))),
            rows[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let section = state.section;
        for (side, column) in [(Side::Test, columns[0]), (Side::Existing, columns[1])] {
            let snapshot = match side {
                Side::Test => &state.test_snapshot,
                Side::Existing => &state.existing_snapshot,
            };
            let tree = state.trees.entry((section, side)).or_default();
            pane::draw_pane(
                frame,
                column,
                side.label(),
                snapshot,
                tree,
                theme,
                state.focus == side,
            );
        }

        let footer = match &state.notice {
            Some(notice) => Line::from(Span::styled(notice.clone(), theme.warning_style())),
            None => Line::from(Span::styled(
                "Tab switch side  n/p next/prev chunk  Enter toggle  o open link  q quit",
                Style::default().fg(theme.overlay1),
            )),
        };
        frame.render_widget(Paragraph::new(footer), rows[2]);
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![
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
            Subscription::keyboard(KeyCode::Tab, "Switch side", Msg::SwitchSide),
            Subscription::keyboard(KeyCode::Char('n'), "Next chunk", Msg::NextSection),
            Subscription::keyboard(KeyCode::Char(']'), "Next chunk", Msg::NextSection),
            Subscription::keyboard(KeyCode::Char('p'), "Previous chunk", Msg::PrevSection),
            Subscription::keyboard(KeyCode::Char('['), "Previous chunk", Msg::PrevSection),
            Subscription::keyboard(KeyCode::Char('q'), "Quit", Msg::Quit),
            Subscription::keyboard(KeyCode::Esc, "Quit", Msg::Quit),
        ]
    }

    fn title() -> &'static str {
        "Compare"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        if state.entries.is_empty() {
            return None;
        }
        Some(Line::from(Span::styled(
            format!("- {}/{}", state.section + 1, state.entries.len()),
            Style::default().fg(theme.subtext0),
        )))
    }
}
