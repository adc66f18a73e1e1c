//! Keypad view
//!
//! The equation trace above the main display, then the key grid. The check
//! key lights up once the amount can be committed.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

const KEY_ROWS: [[&str; 4]; 4] = [
    ["7", "8", "9", "-"],
    ["4", "5", "6", "+"],
    ["1", "2", "3", "="],
    [".", "0", "<", "OK"],
];

/// Render the keypad
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Add spending ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(inner);

    let calc = &app.calculator;

    let mut trace = calc.trace().to_string();
    if let Some(op) = calc.pending_operator() {
        if calc.is_awaiting_operand() {
            trace = format!("{} {}", trace, op.symbol());
        }
    }
    frame.render_widget(
        Paragraph::new(trace)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(format!("${}", calc.display()))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        chunks[1],
    );

    let can_commit = calc.can_commit();
    let rows: Vec<Line> = KEY_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|key| {
                    let style = match *key {
                        "OK" if can_commit => Style::default()
                            .fg(Color::Black)
                            .bg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                        "OK" => Style::default().fg(Color::DarkGray),
                        "-" | "+" | "=" | "<" => Style::default().fg(Color::Cyan),
                        _ => Style::default().fg(Color::White),
                    };
                    Span::styled(format!("{:^8}", key), style)
                })
                .collect();
            Line::from(spans)
        })
        .flat_map(|line| [line, Line::default()])
        .collect();

    frame.render_widget(
        Paragraph::new(rows).alignment(Alignment::Center),
        chunks[2],
    );
}
