//! Sign-in commands

use crate::auth::Session;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::UserId;

/// Handle `pennywise login <user>`
pub fn handle_login_command(session: &mut Session, user: &str) -> PennywiseResult<()> {
    let user = UserId::parse(user).map_err(|e| PennywiseError::Validation(e.to_string()))?;
    session.sign_in(user.clone())?;

    let storage = session.open_storage()?;
    println!("Signed in as {}", user);
    println!("Data directory: {}", storage.paths().root().display());
    Ok(())
}

/// Handle `pennywise logout`
pub fn handle_logout_command(session: &mut Session) -> PennywiseResult<()> {
    match session.sign_out()? {
        Some(user) => println!("Signed out {}", user),
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Handle `pennywise whoami`
pub fn handle_whoami_command(session: &Session) -> PennywiseResult<()> {
    let user = session.require_user()?;
    println!("{}", user);
    Ok(())
}
