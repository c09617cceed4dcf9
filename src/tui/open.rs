use std::io;
use std::process::Command;
use std::thread::{self, JoinHandle};

/// Try to open a link target with the platform's default handler.
///
/// Failures are logged and otherwise ignored so the UI keeps running.
pub fn try_open_link(target: &str) {
    let command = if cfg!(target_os = "windows") {
        // Empty string after start is for window title
        let mut command = Command::new("cmd");
        command.args(["/c", "start", "", target]);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(target);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(target);
        command
    };

    match spawn_reaped(command) {
        Ok(_) => log::info!("Opened link: {}", target),
        Err(e) => log::warn!("Could not open link {}: {}", target, e),
    }
}

/// Spawn `command` and wait for it on a detached thread so the child is reaped
fn spawn_reaped(mut command: Command) -> io::Result<JoinHandle<()>> {
    let mut child = command.spawn()?;
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => log::warn!("Link opener exited with {}", status),
        Ok(_) => {}
        Err(e) => log::warn!("Failed to wait for link opener: {}", e),
    }))
}
