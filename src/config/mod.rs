//! Configuration module for Pennywise
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Application settings persistence

pub mod paths;
pub mod settings;

pub use paths::{PennywisePaths, UserPaths};
pub use settings::Settings;
