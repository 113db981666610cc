//! Stateless HTTP request builder and response parser for the ticket API.
//!
//! # Design
//! `TicketClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any status in 200..=299 counts as success.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ApiResponse, CreateTicketRequest, Ticket, TicketStatus, UpdateStatusRequest};

/// Path under the base URL where all ticket resources live.
pub const TICKETS_PATH: &str = "/api/tickets";

const LIST_FAILED: &str = "Failed to fetch tickets";
const GET_FAILED: &str = "Failed to fetch ticket";
const CREATE_FAILED: &str = "Failed to create ticket";
const UPDATE_FAILED: &str = "Failed to update ticket";
const UPDATE_STATUS_FAILED: &str = "Failed to update ticket status";
const DELETE_FAILED: &str = "Failed to delete ticket";

/// Stateless client for the ticket API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. See `TicketService` for the async wrapper that
/// performs the round-trip.
#[derive(Debug, Clone)]
pub struct TicketClient {
    base_url: String,
}

impl TicketClient {
    /// `base_url` is the server origin, e.g. `http://localhost:8080`. An empty
    /// string yields relative paths.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_tickets(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_ticket(&self, id: i64) -> HttpRequest {
        bare_request(HttpMethod::Get, self.ticket_url(id))
    }

    pub fn build_create_ticket(&self, input: &CreateTicketRequest) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_ticket(
        &self,
        id: i64,
        input: &CreateTicketRequest,
    ) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.ticket_url(id), input)
    }

    pub fn build_update_ticket_status(
        &self,
        id: i64,
        status: TicketStatus,
    ) -> Result<HttpRequest, ApiError> {
        json_request(
            HttpMethod::Patch,
            format!("{}/status", self.ticket_url(id)),
            &UpdateStatusRequest { status },
        )
    }

    pub fn build_delete_ticket(&self, id: i64) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.ticket_url(id))
    }

    pub fn parse_list_tickets(&self, response: HttpResponse) -> Result<Vec<Ticket>, ApiError> {
        check_status(&response, LIST_FAILED)?;
        decode(&response)
    }

    pub fn parse_get_ticket(&self, response: HttpResponse) -> Result<Ticket, ApiError> {
        check_status(&response, GET_FAILED)?;
        decode(&response)
    }

    pub fn parse_create_ticket(&self, response: HttpResponse) -> Result<Ticket, ApiError> {
        check_status_with_body(&response, CREATE_FAILED)?;
        decode(&response)
    }

    pub fn parse_update_ticket(&self, response: HttpResponse) -> Result<Ticket, ApiError> {
        check_status_with_body(&response, UPDATE_FAILED)?;
        decode(&response)
    }

    pub fn parse_update_ticket_status(&self, response: HttpResponse) -> Result<Ticket, ApiError> {
        check_status_with_body(&response, UPDATE_STATUS_FAILED)?;
        decode(&response)
    }

    pub fn parse_delete_ticket(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, DELETE_FAILED)
    }

    fn collection_url(&self) -> String {
        format!("{}{TICKETS_PATH}", self.base_url)
    }

    fn ticket_url(&self, id: i64) -> String {
        format!("{}{TICKETS_PATH}/{id}", self.base_url)
    }
}

fn bare_request(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn json_request<T: Serialize>(
    method: HttpMethod,
    path: String,
    payload: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Fail with the fixed `fallback` message on any non-2xx status.
fn check_status(response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        message: fallback.to_string(),
    })
}

/// Like `check_status`, but prefer the `error` field of a JSON error body.
/// Bodies that are not JSON, or carry no non-empty `error`, use `fallback`.
fn check_status_with_body(response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&response.body)
        .ok()
        .and_then(|envelope| envelope.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::Status {
        status: response.status,
        message,
    })
}
