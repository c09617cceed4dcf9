/// Commands represent side effects that apps want to perform.
/// They are returned from the update() function and executed by the runtime.
pub enum Command {
    /// Do nothing
    None,

    /// Hand a link target to the platform opener
    OpenLink(String),

    /// Quit the application
    Quit,
}

impl Command {
    pub fn open_link(target: impl Into<String>) -> Self {
        Command::OpenLink(target.into())
    }
}
