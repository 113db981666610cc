//! Async ticket operations: build, execute, parse in one call.
//!
//! # Design
//! `TicketService` pairs the stateless `TicketClient` with a `Transport`.
//! Each method is a single round-trip with no retries, caching or timeout;
//! callers that need a deadline wrap the future themselves.

use tracing::{debug, warn};

use crate::client::TicketClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CreateTicketRequest, Ticket, TicketStatus};

#[derive(Debug, Clone)]
pub struct TicketService<T = ReqwestTransport> {
    client: TicketClient,
    transport: T,
}

impl TicketService<ReqwestTransport> {
    /// Service over the default reqwest transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    /// Service pointed at `TICKET_API_URL`.
    pub fn from_env() -> Self {
        Self::from_config(&ClientConfig::from_env())
    }
}

impl<T: Transport> TicketService<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: TicketClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &TicketClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_tickets(&self) -> ApiResult<Vec<Ticket>> {
        let response = self.send(self.client.build_list_tickets()).await?;
        logged(self.client.parse_list_tickets(response))
    }

    pub async fn get_ticket(&self, id: i64) -> ApiResult<Ticket> {
        let response = self.send(self.client.build_get_ticket(id)).await?;
        logged(self.client.parse_get_ticket(response))
    }

    /// Not idempotent: every call creates a new ticket.
    pub async fn create_ticket(&self, input: &CreateTicketRequest) -> ApiResult<Ticket> {
        let response = self.send(self.client.build_create_ticket(input)?).await?;
        logged(self.client.parse_create_ticket(response))
    }

    pub async fn update_ticket(&self, id: i64, input: &CreateTicketRequest) -> ApiResult<Ticket> {
        let response = self.send(self.client.build_update_ticket(id, input)?).await?;
        logged(self.client.parse_update_ticket(response))
    }

    pub async fn update_ticket_status(&self, id: i64, status: TicketStatus) -> ApiResult<Ticket> {
        let response = self
            .send(self.client.build_update_ticket_status(id, status)?)
            .await?;
        logged(self.client.parse_update_ticket_status(response))
    }

    pub async fn delete_ticket(&self, id: i64) -> ApiResult<()> {
        let response = self.send(self.client.build_delete_ticket(id)).await?;
        logged(self.client.parse_delete_ticket(response))
    }

    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        debug!(method = %request.method, path = %request.path, "sending ticket request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received ticket response");
        Ok(response)
    }
}

fn logged<R>(result: ApiResult<R>) -> ApiResult<R> {
    if let Err(ApiError::Status { status, message }) = &result {
        warn!(status, %message, "ticket request failed");
    }
    result
}
