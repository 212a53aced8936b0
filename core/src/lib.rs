//! Synchronous client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` envelopes without
//! touching the network (host-does-IO pattern). On top of that sits
//! `TodoController`, the view-side state: current filter, drafts, the
//! fetched list and the per-item edit state machine.
//!
//! # Design
//! - `TodoClient` is stateless. It holds only its injected `ClientConfig`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoController` reaches the network only through a `Transport` and
//!   reports refusals only through an `AlertSink`. Both are supplied by the host.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod edit;
pub mod error;
pub mod filter;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use controller::{AlertSink, Dispatch, FetchTicket, TodoController};
pub use edit::{EditOutcome, EditState, ItemEditor};
pub use error::ApiError;
pub use filter::Filter;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{AddTodo, Envelope, Todo, TodoId, TodoRef, UpdateTodo};
