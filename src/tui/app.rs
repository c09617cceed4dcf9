use crossterm::event::KeyCode;
use ratatui::{Frame, layout::Rect, text::Line};

use crate::tui::{Command, Subscription, Theme};

/// The main trait that all TUI apps must implement.
///
/// This follows the Elm architecture:
/// - State: data that represents the app's current state
/// - Msg: events/actions that can happen
/// - update: handles messages and returns commands
/// - view: draws the current state
/// - subscriptions: declares what inputs the app wants to receive
pub trait App: Sized + 'static {
    /// The app's state type
    type State;

    /// The app's message type
    type Msg: Clone;

    /// Update the state based on a message and return a command
    fn update(state: &mut Self::State, msg: Self::Msg) -> Command;

    /// Draw the current state into `area`
    /// Note: Takes &mut so views can keep scroll offsets in sync
    fn view(state: &mut Self::State, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Declare what inputs this app wants to receive
    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// Return the app's title (static string for help menu, etc.)
    fn title() -> &'static str;

    /// Return optional status text (dynamic, styled based on state)
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }

    /// Optional: claim a key before subscriptions see it (text prompts)
    fn capture_key(_state: &Self::State, _key: KeyCode) -> Option<Self::Msg> {
        None
    }
}
