//! Signed-in user session
//!
//! Pennywise keeps one active user per installation. The session is restored
//! from `config.json` on startup; everything that reads or writes user data
//! goes through [`Session::require_user`] or [`Session::open_storage`].

use crate::config::{PennywisePaths, Settings};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::UserId;
use crate::storage::Storage;

#[derive(Debug, Clone)]
pub struct Session {
    paths: PennywisePaths,
    settings: Settings,
    user: Option<UserId>,
}

impl Session {
    /// Restore the session recorded in the application settings
    ///
    /// An unreadable user name in the settings file leaves the session
    /// signed out.
    pub fn restore(paths: PennywisePaths) -> PennywiseResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let user = match settings.active_user.as_deref() {
            Some(name) => match UserId::parse(name) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring invalid active user");
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            paths,
            settings,
            user,
        })
    }

    pub fn paths(&self) -> &PennywisePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> PennywiseResult<&UserId> {
        self.user.as_ref().ok_or(PennywiseError::NotSignedIn)
    }

    /// Make `user` the active user and persist the choice
    pub fn sign_in(&mut self, user: UserId) -> PennywiseResult<()> {
        self.settings.active_user = Some(user.as_str().to_string());
        self.settings.save(&self.paths)?;
        tracing::info!(user = %user, "signed in");
        self.user = Some(user);
        Ok(())
    }

    /// Clear the active user, returning who was signed in
    pub fn sign_out(&mut self) -> PennywiseResult<Option<UserId>> {
        let previous = self.user.take();
        self.settings.active_user = None;
        self.settings.save(&self.paths)?;
        if let Some(user) = &previous {
            tracing::info!(user = %user, "signed out");
        }
        Ok(previous)
    }

    /// Open the signed-in user's storage, creating default settings documents
    /// on first use
    pub fn open_storage(&self) -> PennywiseResult<Storage> {
        let user = self.require_user()?;
        let storage = Storage::open(&self.paths, user)?;
        storage.initialize()?;
        storage.load_all()?;
        Ok(storage)
    }
}
