//! In-memory ticket store
//!
//! Tickets live in an insertion-ordered map guarded by Tokio's async RwLock.
//! Every ticket carries an expiry instant; expired tickets are invisible to
//! reads immediately and are dropped by `purge_expired` (run periodically by
//! the background sweep).

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;

use super::error::{StoreError, StoreResult};
use super::types::{Ticket, TicketCreate, TicketUpdate, MAX_FIELD_LEN};

/// Ticket store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Lifetime of a ticket from creation, in seconds
    #[serde(default = "default_ticket_expiration")]
    pub ticket_expiration_secs: u64,

    /// How often the background sweep purges expired tickets, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_ticket_expiration() -> u64 {
    2 * 7 * 24 * 60 * 60 // two weeks
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ticket_expiration_secs: default_ticket_expiration(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl StoreConfig {
    /// Builder method: set ticket lifetime
    pub fn expiration_secs(mut self, secs: u64) -> Self {
        self.ticket_expiration_secs = secs;
        self
    }

    fn expires_at(&self, created: DateTime<Utc>) -> DateTime<Utc> {
        let secs = i64::try_from(self.ticket_expiration_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        created
            .checked_add_signed(ChronoDuration::seconds(secs))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[derive(Debug, Clone)]
struct StoredTicket {
    ticket: Ticket,
    expires_at: DateTime<Utc>,
}

impl StoredTicket {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Thread-safe in-memory ticket store
pub struct TicketStore {
    config: StoreConfig,
    entries: RwLock<IndexMap<String, StoredTicket>>,
}

impl TicketStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(IndexMap::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create a ticket, stamping its dates and expiry.
    ///
    /// An empty id gets a fresh UUID. An existing id is overwritten in place.
    pub async fn create(&self, req: TicketCreate) -> StoreResult<Ticket> {
        validate_create(&req)?;

        let now = Utc::now();
        let id = if req.id.trim().is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            req.id
        };

        let ticket = Ticket {
            id: id.clone(),
            title: req.title,
            status: req.status,
            details: req.details.unwrap_or_default(),
            created_date: now,
            updated_date: Some(now),
        };

        let stored = StoredTicket {
            ticket: ticket.clone(),
            expires_at: self.config.expires_at(now),
        };

        let replaced = self.entries.write().await.insert(id, stored);
        if replaced.is_some() {
            tracing::debug!(ticket_id = %ticket.id, "Overwrote existing ticket");
        }

        Ok(ticket)
    }

    /// Get a live ticket by id
    pub async fn get(&self, id: &str) -> StoreResult<Ticket> {
        let now = Utc::now();
        let entries = self.entries.read().await;

        entries
            .get(id)
            .filter(|stored| !stored.is_expired(now))
            .map(|stored| stored.ticket.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Apply a partial update; the expiry is left unchanged
    pub async fn update(&self, id: &str, req: TicketUpdate) -> StoreResult<Ticket> {
        validate_update(&req)?;

        let now = Utc::now();
        let mut entries = self.entries.write().await;

        let stored = entries
            .get_mut(id)
            .filter(|stored| !stored.is_expired(now))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let ticket = &mut stored.ticket;
        if let Some(title) = req.title {
            ticket.title = title;
        }
        if let Some(status) = req.status {
            ticket.status = status;
        }
        if let Some(details) = req.details {
            ticket.details = details;
        }
        ticket.updated_date = Some(now);

        Ok(ticket.clone())
    }

    /// Remove a live ticket, returning it
    pub async fn delete(&self, id: &str) -> StoreResult<Ticket> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;

        match entries.shift_remove(id) {
            Some(stored) if !stored.is_expired(now) => Ok(stored.ticket),
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// All live tickets in insertion order
    pub async fn list(&self) -> Vec<Ticket> {
        let now = Utc::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|stored| !stored.is_expired(now))
            .map(|stored| stored.ticket.clone())
            .collect()
    }

    /// Number of live tickets
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|stored| !stored.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired tickets, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| !stored.is_expired(now));
        before - entries.len()
    }

    /// Start the background expiry sweep
    pub fn start_background_sweep(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        let period = Duration::from_secs(store.config.sweep_interval_secs.max(1));

        tokio::spawn(async move {
            let mut ticker = interval(period);

            loop {
                ticker.tick().await;

                let purged = store.purge_expired().await;
                if purged > 0 {
                    tracing::info!(purged, "Purged expired tickets");
                }
            }
        })
    }
}

fn validate_create(req: &TicketCreate) -> StoreResult<()> {
    validate_field("title", &req.title)?;
    validate_field("status", &req.status)
}

fn validate_update(req: &TicketUpdate) -> StoreResult<()> {
    if let Some(title) = &req.title {
        validate_field("title", title)?;
    }
    if let Some(status) = &req.status {
        validate_field("status", status)?;
    }
    Ok(())
}

fn validate_field(name: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{} cannot be empty", name)));
    }

    if value.chars().count() > MAX_FIELD_LEN {
        return Err(StoreError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            name, MAX_FIELD_LEN
        )));
    }

    Ok(())
}
