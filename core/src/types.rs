//! Domain DTOs for the todo API.
//!
//! # Design
//! The wire shape is fixed by the remote service: items are
//! `{id, userId, title, completed}` and create payloads are
//! `{title, userId, completed}`. Field declaration order matches the wire
//! order so serialized bodies are byte-compatible.
//!
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned todo identifier.
pub type TodoId = u64;

/// Identifier of the single user this client acts for.
pub type UserId = u64;

/// Id reserved for the not-yet-persisted placeholder shown during an add.
pub const PLACEHOLDER_ID: TodoId = 0;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, user_id: UserId) -> Self {
        Self {
            title: title.into(),
            user_id,
            completed: false,
        }
    }

    /// The synthetic item rendered while the create request is in flight.
    pub fn to_placeholder(&self) -> Todo {
        Todo {
            id: PLACEHOLDER_ID,
            user_id: self.user_id,
            title: self.title.clone(),
            completed: self.completed,
        }
    }
}

/// Which subset of the list is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Selection predicate over `completed`.
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Location hash used by the filter links.
    pub fn route(self) -> &'static str {
        match self {
            Filter::All => "#/",
            Filter::Active => "#/active",
            Filter::Completed => "#/completed",
        }
    }

    /// Resolve a location hash. Anything unrecognised shows everything.
    pub fn from_route(route: &str) -> Self {
        let path = route.trim_start_matches('#').trim_matches('/');
        path.parse().unwrap_or_default()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter {0:?}, expected one of: all, active, completed")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}
