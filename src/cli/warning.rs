//! Warning threshold CLI commands

use clap::Subcommand;

use crate::display::format_warning_settings;
use crate::error::{PennywiseError, PennywiseResult};
use crate::services::SettingsService;
use crate::storage::Storage;
use crate::warning::{Threshold, WarningSettings};

/// Warning subcommands
#[derive(Subcommand)]
pub enum WarningCommands {
    /// Show the warning thresholds
    Show,

    /// Change the warning thresholds
    Set {
        /// Yellow threshold: "40%" of the budget left, or an amount like "150"
        #[arg(short, long)]
        yellow: Option<String>,
        /// Red threshold: "20%" of the budget left, or an amount like "$50"
        #[arg(short, long)]
        red: Option<String>,
    },
}

/// Parse `"40%"` as a percentage and `"150"` or `"$150"` as an amount
pub(crate) fn parse_threshold(input: &str) -> PennywiseResult<Threshold> {
    let trimmed = input.trim();
    let invalid = || {
        PennywiseError::Validation(format!(
            "Invalid threshold '{}': use a percentage like 40% or an amount like 150",
            input
        ))
    };

    let (text, percentage) = match trimmed.strip_suffix('%') {
        Some(number) => (number.trim(), true),
        None => (trimmed.strip_prefix('$').unwrap_or(trimmed).trim(), false),
    };
    let value: f64 = text.replace(',', "").parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }

    Ok(if percentage {
        Threshold::percentage(value)
    } else {
        Threshold::amount(value)
    })
}

/// Handle a warning command
pub fn handle_warning_command(storage: &Storage, cmd: WarningCommands) -> PennywiseResult<()> {
    let service = SettingsService::new(storage);

    match cmd {
        WarningCommands::Show => {
            print!("{}", format_warning_settings(&service.warning()?));
        }

        WarningCommands::Set { yellow, red } => {
            if yellow.is_none() && red.is_none() {
                println!("No changes specified. Use --yellow and/or --red.");
                return Ok(());
            }

            let current = service.warning()?;
            let updated = WarningSettings::new(
                yellow
                    .as_deref()
                    .map(parse_threshold)
                    .transpose()?
                    .unwrap_or(current.yellow),
                red.as_deref()
                    .map(parse_threshold)
                    .transpose()?
                    .unwrap_or(current.red),
            );

            let saved = service.update_warning(updated)?;
            println!("Warning thresholds updated.");
            print!("{}", format_warning_settings(&saved));
        }
    }

    Ok(())
}
