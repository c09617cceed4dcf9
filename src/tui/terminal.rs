use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::{Duration, Instant};

use crate::tui::{App, Runtime};

const FRAME_TIME: Duration = Duration::from_millis(16);

/// Take over the terminal and drive `runtime` until the app quits.
/// The terminal is restored even when the loop fails.
pub async fn run_app<A: App>(mut runtime: Runtime<A>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    log::info!("Launching {} view", A::title());
    let result = event_loop(&mut terminal, &mut runtime).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("TUI loop failed: {:#}", e);
    }
    result
}

async fn event_loop<B: Backend, A: App>(
    terminal: &mut Terminal<B>,
    runtime: &mut Runtime<A>,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Drain pending input before drawing
        while event::poll(Duration::from_millis(0))? {
            let keep_running = match event::read()? {
                Event::Key(key) => runtime.handle_key(key)?,
                Event::Mouse(mouse) => runtime.handle_mouse(mouse)?,
                _ => true,
            };
            if !keep_running {
                return Ok(());
            }
        }

        terminal.draw(|frame| runtime.render(frame))?;

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }
}
