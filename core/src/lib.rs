//! Client core for the todo service: request building, the adapter
//! contract, and the list controller.
//!
//! # Overview
//! - `client` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network (host-does-IO pattern).
//! - `api` turns that into the async `TodoApi` contract over any
//!   `Transport` the host supplies.
//! - `controller` owns the list state, reconciles it with responses, and
//!   produces the derived `TodoView` the presentation layer renders.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url` and the owner id.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//! - The controller never mutates the collection speculatively. The add
//!   placeholder is the only optimistic state and lives in its own slot.

pub mod api;
pub mod client;
pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod notification;
pub mod state;
pub mod types;
pub mod view;

pub use api::{HttpTodoApi, TodoApi};
pub use client::TodoClient;
pub use controller::{toggle_all_targets, BulkUpdateReport, EditOutcome, TodoController};
pub use error::{ApiError, ControllerError};
pub use filter::filter_todos;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notification::NOTIFICATION_TIMEOUT;
pub use state::{ControllerState, Notification};
pub use types::{Filter, NewTodo, ParseFilterError, Todo, TodoId, UserId, PLACEHOLDER_ID};
pub use view::TodoView;
