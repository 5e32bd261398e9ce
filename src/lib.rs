//! # TicketMaster
//!
//! A support-ticket service with a same-day ticket dashboard.
//!
//! ## Modules
//!
//! - [`tickets`]: Ticket records and the in-memory expiring store
//! - [`dashboard`]: Today's-tickets view: fetch, filter, group, summarize, render
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup for the binaries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ticketmaster::dashboard::{HttpTicketSource, TicketView};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = HttpTicketSource::new("http://backend:8000/api/tickets");
//!     let mut view = TicketView::new(source);
//!
//!     // One fetch; failures are logged and leave the view empty
//!     view.mount().await;
//!
//!     for (status, count) in view.summary() {
//!         println!("{status}: {count}");
//!     }
//!     println!("{}", view.render().to_text());
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod tickets;

// Re-export top-level types for convenience
pub use tickets::{
    StoreConfig, StoreError, StoreResult, Ticket, TicketCreate, TicketStore, TicketUpdate,
};

pub use dashboard::{
    filter_today, group_by_status, summarize_by_status, DashboardSnapshot, FetchError,
    GroupedTickets, HttpTicketSource, Node, PieChart, StatusSummary, StoreTicketSource,
    TicketSource, TicketView,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig};
