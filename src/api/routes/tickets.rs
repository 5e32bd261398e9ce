//! Ticket Routes
//!
//! CRUD endpoints for tickets.
//!
//! - GET /api/tickets - List all live tickets
//! - POST /api/tickets - Create a ticket
//! - GET /api/tickets/:id - Get a ticket
//! - PUT /api/tickets/:id - Update a ticket
//! - DELETE /api/tickets/:id - Delete a ticket

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::DeleteResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::tickets::{Ticket, TicketCreate, TicketUpdate};

/// GET /api/tickets
pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Json<Vec<Ticket>> {
    Json(state.store.list().await)
}

/// GET /api/tickets/:id
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state.store.get(&id).await?;
    Ok(Json(ticket))
}

/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TicketCreate>,
) -> ApiResult<(StatusCode, Json<Ticket>)> {
    let ticket = state.store.create(req).await?;

    tracing::info!(ticket_id = %ticket.id, status = %ticket.status, "Created ticket");

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// PUT /api/tickets/:id
///
/// Fields missing from the body keep their current value.
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TicketUpdate>,
) -> ApiResult<Json<Ticket>> {
    let original = state.store.get(&id).await?;
    let updated = state.store.update(&id, req).await?;

    tracing::info!(
        ticket_id = %id,
        old_status = %original.status,
        new_status = %updated.status,
        "Updated ticket"
    );

    Ok(Json(updated))
}

/// DELETE /api/tickets/:id
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = state.store.delete(&id).await?;

    tracing::info!(ticket_id = %id, title = %deleted.title, "Deleted ticket");

    Ok(Json(DeleteResponse {
        status: "success".to_string(),
    }))
}
