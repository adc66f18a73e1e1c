//! TUI views
//!
//! The budget header, the keypad, the label picker and the status bar.

pub mod header;
pub mod keypad;
pub mod labels;
pub mod status_bar;

use ratatui::style::Color;
use ratatui::Frame;

use super::app::{App, Screen};
use super::layout::AppLayout;
use crate::warning::StyleHook;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    header::render(frame, app, layout.header);
    match app.screen {
        Screen::Keypad => keypad::render(frame, app, layout.main),
        Screen::LabelPicker => labels::render(frame, app, layout.main),
    }
    status_bar::render(frame, app, layout.status_bar);
}

pub(crate) fn hook_color(hook: &StyleHook) -> Color {
    let (r, g, b) = hook.rgb();
    Color::Rgb(r, g, b)
}
