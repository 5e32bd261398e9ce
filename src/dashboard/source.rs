//! Ticket sources
//!
//! Where the dashboard gets its ticket list from. The HTTP source talks to
//! the ticket API; the store source reads an in-process `TicketStore` for
//! server-side rendering.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use thiserror::Error;

use crate::tickets::{Ticket, TicketStore};

/// Default ticket listing endpoint
pub const DEFAULT_TICKETS_URL: &str = "http://backend:8000/api/tickets";

/// Why a ticket fetch failed. The dashboard treats every variant the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS or transport failure
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body was not a JSON array of tickets
    #[error("Malformed ticket list: {0}")]
    Decode(String),
}

/// Something that can produce the current ticket list
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    /// Fetch all tickets
    async fn fetch_tickets(&self) -> Result<Vec<Ticket>, FetchError>;
}

/// Reads tickets from the ticket API over HTTP.
///
/// No timeout, no retry, no auth headers.
pub struct HttpTicketSource {
    client: Client,
    url: String,
}

impl HttpTicketSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpTicketSource {
    fn default() -> Self {
        Self::new(DEFAULT_TICKETS_URL)
    }
}

#[async_trait]
impl TicketSource for HttpTicketSource {
    fn describe(&self) -> String {
        format!("GET {}", self.url)
    }

    async fn fetch_tickets(&self) -> Result<Vec<Ticket>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let bytes = response.bytes().await.map_err(FetchError::Network)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Reads tickets straight from an in-process store
pub struct StoreTicketSource {
    store: Arc<TicketStore>,
}

impl StoreTicketSource {
    pub fn new(store: Arc<TicketStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TicketSource for StoreTicketSource {
    fn describe(&self) -> String {
        "in-process ticket store".to_string()
    }

    async fn fetch_tickets(&self) -> Result<Vec<Ticket>, FetchError> {
        Ok(self.store.list().await)
    }
}
