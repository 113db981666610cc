//! Typed client for the ticket REST API.
//!
//! # Overview
//! `TicketClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `TicketService` runs
//! that round-trip over a pluggable `Transport`, by default reqwest.
//!
//! # Design
//! - `TicketClient` is stateless; it holds only `base_url`.
//! - Every operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the core stays deterministic in tests.
//! - Non-2xx responses become `ApiError::Status`, whose message is either the
//!   server's `error` field or a fixed per-operation fallback.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{TicketClient, TICKETS_PATH};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::TicketService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    ApiResponse, CreateTicketRequest, Ticket, TicketStatus, UnknownStatus, UpdateStatusRequest,
};
