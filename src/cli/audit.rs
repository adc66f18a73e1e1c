//! Audit log command

use crate::error::PennywiseResult;
use crate::storage::Storage;

/// Handle `pennywise audit`: print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> PennywiseResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
