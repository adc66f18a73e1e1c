//! Terminal setup and teardown
//!
//! Raw mode, the alternate screen and, where the terminal supports it, key
//! release reporting so backspace can be held to clear. A panic hook puts the
//! terminal back before the panic message prints.

use anyhow::Result;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::calculator::LongPress;
use crate::config::settings::Settings;
use crate::storage::Storage;

use super::app::{App, BackspaceMode};
use super::event::{EventHandler, TICK_RATE};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Set while key release reporting is pushed onto the terminal
static KEY_RELEASES_ENABLED: AtomicBool = AtomicBool::new(false);

/// Initialize the terminal for TUI mode
///
/// Returns the terminal and the backspace mode its key reporting allows.
pub fn init_terminal() -> Result<(Tui, BackspaceMode)> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let mode = if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        KEY_RELEASES_ENABLED.store(true, Ordering::SeqCst);
        BackspaceMode::LongPress
    } else {
        tracing::debug!("terminal does not report key releases, using short-press backspace");
        BackspaceMode::ShortPress
    };

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok((terminal, mode))
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    if KEY_RELEASES_ENABLED.swap(false, Ordering::SeqCst) {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(storage: &Storage, settings: &Settings) -> Result<()> {
    let (mut terminal, mode) = init_terminal()?;

    let result = run_loop(&mut terminal, storage, settings, mode);

    restore_terminal()?;
    result
}

fn run_loop(
    terminal: &mut Tui,
    storage: &Storage,
    settings: &Settings,
    mode: BackspaceMode,
) -> Result<()> {
    let mut app = App::new(storage, LongPress::from_millis(settings.long_press_ms), mode)?;
    let events = EventHandler::new(TICK_RATE);

    tracing::info!(root = %storage.paths().root().display(), ?mode, "tui started");

    loop {
        terminal.draw(|frame| super::views::render(frame, &app))?;

        let event = events.next()?;
        if let Err(e) = handle_event(&mut app, event) {
            tracing::error!(error = %e, "event handling failed");
            app.set_status(e.to_string());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
