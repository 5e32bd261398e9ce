//! Dashboard Route
//!
//! - GET /dashboard - Today's tickets rendered as an HTML page
//!
//! Each request mounts a fresh `TicketView` over the in-process store.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::{StoreTicketSource, TicketView};

/// GET /dashboard
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut view = TicketView::new(StoreTicketSource::new(Arc::clone(&state.store)));
    view.mount().await;
    Html(view.render_page())
}
