//! Layout definitions for the TUI
//!
//! Header with the budget summary, main panel, status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the main panel grows, keeping the keypad phone-shaped
const MAX_PANEL_WIDTH: u16 = 48;

/// Layout regions for the TUI
pub struct AppLayout {
    /// Budget left and warning banner
    pub header: Rect,
    /// Keypad or label picker
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let column = centered_column(area, MAX_PANEL_WIDTH);
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(column);

        Self {
            header: vertical[0],
            main: vertical[1],
            status_bar: Rect {
                x: area.x,
                width: area.width,
                ..vertical[2]
            },
        }
    }
}

/// A full-height column of at most `max_width`, centered horizontally
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}
