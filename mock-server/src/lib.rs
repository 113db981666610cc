use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const TITLE_REQUIRED: &str = "Title cannot be empty";
pub const STATUS_REQUIRED: &str = "Status is required";
pub const INVALID_STATUS: &str = "Invalid status. Must be one of: OPEN, IN_PROGRESS, CLOSED";

/// Front-end dev servers allowed to call the API from a browser.
const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    InProgress,
    Closed,
}

impl Status {
    /// Case-insensitive lookup of a wire name such as `in_progress`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "OPEN" => Some(Status::Open),
            "IN_PROGRESS" => Some(Status::InProgress),
            "CLOSED" => Some(Status::Closed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateTicket {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl CreateTicket {
    fn valid_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.trim().is_empty())
    }
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// In-memory ticket table. Ids are handed out in order and never reused.
#[derive(Debug)]
pub struct Store {
    tickets: BTreeMap<i64, Ticket>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            tickets: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    /// A store holding the three sample tickets the dev server starts with.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.insert("Setup CI/CD Pipeline", "Initial setup of GitHub Actions workflow");
        store.insert("Configure Kubernetes", "Set up K8s deployment manifests");
        store.insert("Implement Authentication", "Add JWT authentication to the system");
        store
    }

    pub fn insert(&mut self, title: &str, description: &str) -> Ticket {
        let id = self.next_id;
        self.next_id += 1;
        let timestamp = now();
        let ticket = Ticket {
            id,
            title: title.to_string(),
            description: description.to_string(),
            status: Status::Open,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };
        self.tickets.insert(id, ticket.clone());
        ticket
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Router over an empty store.
pub fn app() -> Router {
    router(Store::default())
}

/// Router over the sample tickets.
pub fn seeded_app() -> Router {
    router(Store::seeded())
}

pub fn router(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/api/tickets/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/api/tickets/{id}/status", patch(update_ticket_status))
        .with_state(db)
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Serve the seeded API on `listener` with request tracing and CORS.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let app = seeded_app()
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());
    axum::serve(listener, app).await
}

/// Serve an empty store, for tests that need deterministic contents.
pub async fn run_empty(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_tickets(State(db): State<Db>) -> Json<Vec<Ticket>> {
    let store = db.read().await;
    Json(store.tickets.values().cloned().collect())
}

async fn get_ticket(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, StatusCode> {
    let store = db.read().await;
    store.tickets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_ticket(State(db): State<Db>, Json(input): Json<CreateTicket>) -> Response {
    let Some(title) = input.valid_title() else {
        return bad_request(TITLE_REQUIRED);
    };
    let ticket = db.write().await.insert(title, &input.description);
    tracing::debug!(id = ticket.id, "ticket created");
    (StatusCode::CREATED, Json(ticket)).into_response()
}

async fn update_ticket(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<CreateTicket>,
) -> Response {
    let mut store = db.write().await;
    let Some(ticket) = store.tickets.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(title) = input.valid_title() else {
        return bad_request(TITLE_REQUIRED);
    };
    ticket.title = title.to_string();
    ticket.description = input.description.clone();
    ticket.updated_at = now();
    Json(ticket.clone()).into_response()
}

async fn update_ticket_status(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateStatus>,
) -> Response {
    let Some(requested) = input.status else {
        return bad_request(STATUS_REQUIRED);
    };
    let mut store = db.write().await;
    let Some(ticket) = store.tickets.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(status) = Status::parse(&requested) else {
        return bad_request(INVALID_STATUS);
    };
    ticket.status = status;
    ticket.updated_at = now();
    Json(ticket.clone()).into_response()
}

async fn delete_ticket(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .tickets
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
