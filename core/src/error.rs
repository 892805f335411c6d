//! Error types for the todo API client and the list controller.
//!
//! # Design
//! `ApiError` describes why a single request failed. `NotFound` gets a
//! dedicated variant because callers frequently distinguish "the resource
//! does not exist" from "the server returned an unexpected status."
//!
//! `ControllerError` is what the list controller hands back to the
//! presentation layer. Every variant except `EmptyTitle` and `UnknownTodo`
//! wraps the `ApiError` that caused it.

use thiserror::Error;

use crate::types::TodoId;

/// Errors produced while building, executing, or parsing a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Failures surfaced by `TodoController` operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("title is empty")]
    EmptyTitle,

    #[error("no todo with id {0}")]
    UnknownTodo(TodoId),

    #[error("loading todos failed")]
    LoadFailed(#[source] ApiError),

    #[error("adding a todo failed")]
    AddFailed(#[source] ApiError),

    #[error("updating todo {id} failed")]
    UpdateFailed {
        id: TodoId,
        #[source]
        source: ApiError,
    },

    #[error("deleting todo {id} failed")]
    DeleteFailed {
        id: TodoId,
        #[source]
        source: ApiError,
    },

    #[error("clearing todos stopped at {id}")]
    BulkDeleteFailed {
        id: TodoId,
        #[source]
        source: ApiError,
    },
}

impl ControllerError {
    /// Text shown in the notification slot for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ControllerError::EmptyTitle => "Title should not be empty",
            ControllerError::UnknownTodo(_) => "Unable to find a todo",
            ControllerError::LoadFailed(_) => "Unable to load todos",
            ControllerError::AddFailed(_) => "Unable to add a todo",
            ControllerError::UpdateFailed { .. } => "Unable to update a todo",
            ControllerError::DeleteFailed { .. } | ControllerError::BulkDeleteFailed { .. } => {
                "Unable to delete a todo"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn delete_failures_share_a_message() {
        let single = ControllerError::DeleteFailed {
            id: 1,
            source: ApiError::NotFound,
        };
        let bulk = ControllerError::BulkDeleteFailed {
            id: 2,
            source: ApiError::NotFound,
        };
        assert_eq!(single.user_message(), bulk.user_message());
    }

    #[test]
    fn transport_failures_keep_their_source() {
        let err = ControllerError::AddFailed(ApiError::HttpError {
            status: 500,
            body: "boom".to_string(),
        });
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "HTTP 500: boom");
    }
}
