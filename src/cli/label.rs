//! Transaction label CLI commands
//!
//! Labels are the transaction types offered when recording spending. Their
//! order is the order the keypad's label picker shows them in.

use clap::Subcommand;

use super::resolve_label;
use crate::display::format_label_list;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{TransactionLabel, DEFAULT_LABEL_COLOR, LABEL_PALETTE};
use crate::services::SettingsService;
use crate::storage::Storage;

/// Label subcommands
#[derive(Subcommand)]
pub enum LabelCommands {
    /// List labels in picker order
    List,

    /// Add a label
    Add {
        /// Label name
        name: String,
        /// Color as #rrggbb (defaults to the next palette color)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename or recolor a label
    Edit {
        /// Label name or ID
        label: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color as #rrggbb
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Remove a label
    Remove {
        /// Label name or ID
        label: String,
    },

    /// Move a label to a new position in the picker
    Move {
        /// Label name or ID
        label: String,
        /// New position, starting at 1
        position: usize,
    },
}

/// Handle a label command
pub fn handle_label_command(storage: &Storage, cmd: LabelCommands) -> PennywiseResult<()> {
    let service = SettingsService::new(storage);

    match cmd {
        LabelCommands::List => {
            print!("{}", format_label_list(&service.labels()?));
        }

        LabelCommands::Add { name, color } => {
            let color = match color {
                Some(color) => color,
                None => {
                    let count = service.labels()?.len();
                    LABEL_PALETTE
                        .get(count % LABEL_PALETTE.len())
                        .copied()
                        .unwrap_or(DEFAULT_LABEL_COLOR)
                        .to_string()
                }
            };
            let label = service.add_label(TransactionLabel::new(name, color))?;
            println!("Added label: {} ({})", label.name, label.color);
            println!("  ID: {}", label.id);
        }

        LabelCommands::Edit { label, name, color } => {
            if name.is_none() && color.is_none() {
                println!("No changes specified. Use --name or --color.");
                return Ok(());
            }

            let existing = resolve_label(&service.labels()?, &label)?;
            let updated = service.update_label(TransactionLabel::with_id(
                existing.id,
                name.unwrap_or(existing.name),
                color.unwrap_or(existing.color),
            ))?;
            println!("Updated label: {} ({})", updated.name, updated.color);
        }

        LabelCommands::Remove { label } => {
            let existing = resolve_label(&service.labels()?, &label)?;
            let removed = service.remove_label(&existing.id)?;
            println!("Removed label: {}", removed.name);
        }

        LabelCommands::Move { label, position } => {
            let labels = service.labels()?;
            let existing = resolve_label(&labels, &label)?;
            let from = labels
                .position(&existing.id)
                .ok_or_else(|| PennywiseError::label_not_found(existing.id.as_str()))?;
            if position == 0 {
                return Err(PennywiseError::Validation(
                    "Positions start at 1".to_string(),
                ));
            }

            let reordered = service.reorder_labels(from, position - 1)?;
            print!("{}", format_label_list(&reordered));
        }
    }

    Ok(())
}
