pub mod app;
pub mod apps;
pub mod command;
pub mod open;
pub mod pane;
pub mod runtime;
pub mod subscription;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use command::Command;
pub use runtime::Runtime;
pub use subscription::Subscription;
pub use terminal::run_app;
pub use theme::{Theme, ThemeVariant};
