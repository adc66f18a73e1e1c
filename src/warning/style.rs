//! Presentation hooks for warning states
//!
//! Each state maps to a graduated set of colors. Hooks carry both the utility
//! class name used by the web front end and the hex value the terminal front
//! end renders with.

use super::classify::WarningState;

/// A single color hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleHook {
    pub class: &'static str,
    pub hex: &'static str,
}

impl StyleHook {
    const fn new(class: &'static str, hex: &'static str) -> Self {
        Self { class, hex }
    }

    /// Parse `hex` into RGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_rgb(self.hex).unwrap_or((0, 0, 0))
    }
}

/// Style hooks for one warning state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningStyle {
    pub background: StyleHook,
    pub foreground: StyleHook,
    pub foreground_dark: StyleHook,
    pub foreground_extra_dark: StyleHook,
    pub progress: StyleHook,
    pub accent: StyleHook,
    /// Fill color of the animated budget gauge
    pub wave_hex: &'static str,
}

const GREEN_STYLE: WarningStyle = WarningStyle {
    background: StyleHook::new("bg-lime-100", "#ecfccb"),
    foreground: StyleHook::new("text-lime-600", "#65a30d"),
    foreground_dark: StyleHook::new("text-lime-600", "#65a30d"),
    foreground_extra_dark: StyleHook::new("text-lime-800", "#3f6212"),
    progress: StyleHook::new("bg-lime-500", "#84cc16"),
    accent: StyleHook::new("text-lime-500", "#84cc16"),
    wave_hex: "#16a34a",
};

const YELLOW_STYLE: WarningStyle = WarningStyle {
    background: StyleHook::new("bg-amber-100", "#fef3c7"),
    foreground: StyleHook::new("text-amber-600", "#d97706"),
    foreground_dark: StyleHook::new("text-amber-600", "#d97706"),
    foreground_extra_dark: StyleHook::new("text-amber-700", "#b45309"),
    progress: StyleHook::new("bg-amber-500", "#f59e0b"),
    accent: StyleHook::new("text-amber-400", "#fbbf24"),
    wave_hex: "#fbbf24",
};

const RED_STYLE: WarningStyle = WarningStyle {
    background: StyleHook::new("bg-red-100", "#fee2e2"),
    foreground: StyleHook::new("text-red-600", "#dc2626"),
    foreground_dark: StyleHook::new("text-red-600", "#dc2626"),
    foreground_extra_dark: StyleHook::new("text-red-800", "#991b1b"),
    progress: StyleHook::new("bg-red-500", "#ef4444"),
    accent: StyleHook::new("text-red-300", "#fca5a5"),
    wave_hex: "#b91c1c",
};

impl WarningStyle {
    pub fn for_state(state: WarningState) -> &'static WarningStyle {
        match state {
            WarningState::Green => &GREEN_STYLE,
            WarningState::Yellow => &YELLOW_STYLE,
            WarningState::Red => &RED_STYLE,
        }
    }
}

/// Red-or-neutral hooks for historical month displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverBudgetStyle {
    pub background: StyleHook,
    /// `None` keeps the surrounding text color
    pub foreground: Option<StyleHook>,
    pub foreground_dark: StyleHook,
    pub accent: StyleHook,
}

impl OverBudgetStyle {
    pub fn for_spending(spending: f64, total_budget: f64) -> Self {
        if spending > total_budget {
            Self {
                background: StyleHook::new("bg-red-100", "#fee2e2"),
                foreground: Some(StyleHook::new("text-red-600", "#dc2626")),
                foreground_dark: StyleHook::new("text-red-600", "#dc2626"),
                accent: StyleHook::new("text-red-300", "#fca5a5"),
            }
        } else {
            Self {
                background: StyleHook::new("bg-gray-100", "#f3f4f6"),
                foreground: None,
                foreground_dark: StyleHook::new("text-gray-900", "#111827"),
                accent: StyleHook::new("text-gray-400", "#9ca3af"),
            }
        }
    }
}

/// Parse `#rrggbb`
pub fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
