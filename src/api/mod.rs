//! TicketMaster REST API
//!
//! HTTP API layer for the ticket service, built with Axum.
//!
//! # Endpoints
//!
//! ## Root
//! - `GET /` - Hello World
//!
//! ## Tickets
//! - `GET /api/tickets` - List all tickets
//! - `POST /api/tickets` - Create a ticket
//! - `GET /api/tickets/:id` - Get a ticket
//! - `PUT /api/tickets/:id` - Update a ticket
//! - `DELETE /api/tickets/:id` - Delete a ticket
//!
//! Ticket paths also accept a trailing slash.
//!
//! ## Dashboard
//! - `GET /dashboard` - Today's open tickets as HTML
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use ticketmaster::api::{serve, ApiConfig, AppState};
//! use ticketmaster::tickets::{StoreConfig, TicketStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(TicketStore::new(StoreConfig::default()));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/tickets",
            get(routes::tickets::list_tickets).post(routes::tickets::create_ticket),
        )
        .route(
            "/tickets/",
            get(routes::tickets::list_tickets).post(routes::tickets::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(routes::tickets::get_ticket)
                .put(routes::tickets::update_ticket)
                .delete(routes::tickets::delete_ticket),
        )
        .route(
            "/tickets/:id/",
            get(routes::tickets::get_ticket)
                .put(routes::tickets::update_ticket)
                .delete(routes::tickets::delete_ticket),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::health::root))
        .route("/dashboard", get(routes::dashboard::dashboard_page))
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("TicketMaster API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("TicketMaster API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{HttpTicketSource, TicketView};
    use crate::tickets::{StoreConfig, TicketStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, Arc<TicketStore>) {
        let store = Arc::new(TicketStore::new(StoreConfig::default()));
        let state = AppState::new(Arc::clone(&store), ApiConfig::default());
        (build_router(state), store)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        app.oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (app, _store) = create_test_app();

        let response = send(app, "GET", "/", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"message": "Hello World"}));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _store) = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = send(app.clone(), "GET", uri, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_create_ticket() {
        let (app, _store) = create_test_app();

        let response = send(
            app,
            "POST",
            "/api/tickets",
            Some(r#"{"id": "123455", "title": "Test Ticket", "status": "Open"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let data = json_body(response).await;
        assert_eq!(data["id"], "123455");
        assert_eq!(data["title"], "Test Ticket");
        assert_eq!(data["status"], "Open");
        assert_eq!(data["details"], "");
    }

    #[tokio::test]
    async fn test_create_ticket_invalid_json() {
        let (app, _store) = create_test_app();

        let response = send(app, "POST", "/api/tickets", Some("not json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_ticket_empty_title() {
        let (app, _store) = create_test_app();

        let response = send(
            app,
            "POST",
            "/api/tickets",
            Some(r#"{"title": "", "status": "Open"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_ticket() {
        let (app, store) = create_test_app();
        store
            .create(crate::tickets::TicketCreate::new("Test Ticket", "Open").id("123455"))
            .await
            .unwrap();

        let response = send(app, "GET", "/api/tickets/123455/", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let data = json_body(response).await;
        assert_eq!(data["title"], "Test Ticket");
        assert_eq!(data["status"], "Open");
    }

    #[tokio::test]
    async fn test_get_ticket_not_found() {
        let (app, _store) = create_test_app();

        let response = send(app, "GET", "/api/tickets/123456", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let data = json_body(response).await;
        assert_eq!(data["error"]["code"], "NOT_FOUND");
        assert_eq!(data["error"]["message"], "Not found: Ticket not found");
    }

    #[tokio::test]
    async fn test_update_ticket() {
        let (app, store) = create_test_app();
        store
            .create(crate::tickets::TicketCreate::new("Test Ticket", "Open").id("1"))
            .await
            .unwrap();

        let response = send(
            app,
            "PUT",
            "/api/tickets/1",
            Some(r#"{"status": "Updated", "title": "Test Ticket Updated", "details": ""}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let data = json_body(response).await;
        assert_eq!(data["title"], "Test Ticket Updated");
        assert_eq!(data["status"], "Updated");
    }

    #[tokio::test]
    async fn test_update_ticket_not_found() {
        let (app, _store) = create_test_app();

        let response = send(
            app,
            "PUT",
            "/api/tickets/12345",
            Some(r#"{"status": "Updated"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_ticket() {
        let (app, store) = create_test_app();
        store
            .create(crate::tickets::TicketCreate::new("Test Ticket", "Open").id("1"))
            .await
            .unwrap();

        let response = send(app.clone(), "DELETE", "/api/tickets/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"status": "success"}));

        let response = send(app, "DELETE", "/api/tickets/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_tickets() {
        let (app, _store) = create_test_app();

        for body in [
            r#"{"id": "123455", "title": "Test Ticket", "status": "Open"}"#,
            r#"{"id": "123456", "title": "Test Ticket 2", "status": "Open"}"#,
        ] {
            let response = send(app.clone(), "POST", "/api/tickets/", Some(body)).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(app, "GET", "/api/tickets", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (app, store) = create_test_app();
        store
            .create(crate::tickets::TicketCreate::new("Printer jam", "Open"))
            .await
            .unwrap();
        store
            .create(crate::tickets::TicketCreate::new("Done already", "Resolved"))
            .await
            .unwrap();

        let response = send(app, "GET", "/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<h2>Today's Tickets</h2>"));
        assert!(html.contains("Printer jam"));
        assert!(!html.contains("Done already"));
    }

    #[tokio::test]
    async fn test_dashboard_reads_served_tickets() {
        let (app, store) = create_test_app();
        store
            .create(crate::tickets::TicketCreate::new("Printer jam", "Open"))
            .await
            .unwrap();
        store
            .create(crate::tickets::TicketCreate::new("VPN", "Pending"))
            .await
            .unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = HttpTicketSource::new(format!("http://{}/api/tickets", addr));
        let mut view = TicketView::new(source);
        view.mount().await;

        assert_eq!(view.filtered().len(), 2);
        assert_eq!(view.summary()["Open"], 1);
        assert_eq!(view.summary()["Pending"], 1);
    }
}
