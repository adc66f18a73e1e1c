//! Label picker view
//!
//! Shown after the amount is confirmed: the configured labels in order, and
//! a free-text field for a one-off label.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::app::{App, PickerFocus};
use crate::tui::widgets::TextInput;

/// Render the label picker
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let amount = app
        .pending_amount
        .map(|a| a.to_string())
        .unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let list_focused = app.picker_focus == PickerFocus::List;
    let items: Vec<ListItem> = app
        .context
        .labels()
        .iter()
        .map(|label| {
            let (r, g, b) = label.rgb().unwrap_or((128, 128, 128));
            ListItem::new(Line::from(vec![
                Span::styled(" ● ", Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(label.name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Label for {} ", amount))
                .borders(Borders::ALL)
                .border_style(border_style(list_focused)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.context.labels().is_empty() {
        state.select(Some(app.selected_label));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let custom_focused = app.picker_focus == PickerFocus::CustomLabel;
    let block = Block::default()
        .title(" Custom label ")
        .borders(Borders::ALL)
        .border_style(border_style(custom_focused));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let input: TextInput = app.custom_label.clone().focused(custom_focused);
    frame.render_widget(input, inner);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
