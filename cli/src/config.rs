//! Connection settings shared by every subcommand.

use std::time::Duration;

use clap::Args;
use thiserror::Error;
use todos_core::UserId;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_USER_ID: UserId = 1554;

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Root URL of the todo service
    #[arg(long, global = true, env = "TODOS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Owner of the list; every request is scoped to this user
    #[arg(long, global = true, env = "TODOS_USER_ID", default_value_t = DEFAULT_USER_ID)]
    pub user_id: UserId,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, global = true, env = "TODOS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("user id is not set; pass --user-id or TODOS_USER_ID")]
    MissingUserId,

    #[error("base url {0:?} must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_id == 0 {
            return Err(ConfigError::MissingUserId);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
