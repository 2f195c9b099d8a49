//! Engine Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Email for the bootstrap `SuperAdmin` account
    /// (default: "admin@clanhall.local")
    pub bootstrap_admin_email: String,

    /// Password for the bootstrap `SuperAdmin` account (required)
    pub bootstrap_admin_password: String,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bootstrap_admin_email: env::var("CLANHALL_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@clanhall.local".to_string()),
            bootstrap_admin_password: env::var("CLANHALL_ADMIN_PASSWORD")
                .context("CLANHALL_ADMIN_PASSWORD must be set")?,
        })
    }
}
