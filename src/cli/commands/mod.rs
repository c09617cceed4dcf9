pub mod compare;
pub mod config;
pub mod output;
pub mod view;

pub use compare::{CompareCommands, compare_command};
pub use config::{ConfigCommands, config_command};
pub use output::OutputArgs;
pub use view::{ViewCommands, view_command};
