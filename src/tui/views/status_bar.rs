//! Status bar view
//!
//! Shows the last status message and key hints for the current screen

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, BackspaceMode, PickerFocus, Screen};

/// Key hints for the current screen
pub fn hints(app: &App) -> &'static str {
    match (app.screen, app.picker_focus, app.backspace_mode) {
        (Screen::Keypad, _, BackspaceMode::LongPress) => {
            " 0-9 . + - =  Enter:OK  Bksp:del (hold:clear)  q:Quit "
        }
        (Screen::Keypad, _, BackspaceMode::ShortPress) => {
            " 0-9 . + - =  Enter:OK  Bksp:del  Del:clear  q:Quit "
        }
        (Screen::LabelPicker, PickerFocus::List, _) => " ↑↓:Select  Enter:Save  Tab:Custom  Esc:Back ",
        (Screen::LabelPicker, PickerFocus::CustomLabel, _) => " Enter:Save  Tab/Esc:List ",
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw("│"));
    }

    spans.push(Span::styled(hints(app), Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
