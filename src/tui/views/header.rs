//! Budget header
//!
//! Money left this month in the warning colors, with the red banner once the
//! red threshold is reached.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::hook_color;
use crate::display::format_currency;
use crate::models::MonthKey;
use crate::tui::app::App;
use crate::warning::WarningStyle;

/// Render the header
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let today = app.today();
    let ctx = &app.context;
    let state = ctx.current_warning_state(today);
    let style = WarningStyle::for_state(state);
    let accent = hook_color(&style.progress);
    let headline_color = hook_color(&style.foreground);

    let left = ctx.budget_left(today);
    let headline = if left.is_negative() {
        format!("Over by {}", format_currency(left.abs().as_dollars_f64()))
    } else {
        format!("{} left", format_currency(left.as_dollars_f64()))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default()
                .fg(headline_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Spent {} of {} ({}%)",
            format_currency(ctx.current_month_spending(today).as_dollars_f64()),
            format_currency(ctx.budget().amount.as_dollars_f64()),
            ctx.spent_percentage(today)
        )),
    ];

    if ctx.should_show_warning(today) {
        lines.push(Line::from(Span::styled(
            "Careful! You're almost out of budget",
            Style::default().fg(Color::Black).bg(accent),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            ctx.threshold_descriptions().yellow_sentence(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", MonthKey::from_date(today)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
