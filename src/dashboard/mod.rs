//! Same-day ticket dashboard
//!
//! Fetches the ticket list once, keeps today's open tickets, groups them by
//! status and renders a grouped list plus a status pie chart.
//!
//! - [`source`]: where tickets come from (HTTP API or in-process store)
//! - [`derive`]: pure filtering, grouping and summary functions
//! - [`chart`]: pie chart geometry and SVG drawing
//! - [`node`]: the DOM-like render tree
//! - [`view`]: `TicketView`, which ties the pieces together
//!
//! # Example
//!
//! ```rust,no_run
//! use ticketmaster::dashboard::{HttpTicketSource, TicketView};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut view = TicketView::new(HttpTicketSource::default());
//!     view.mount().await;
//!     println!("{}", view.render().to_text());
//! }
//! ```

pub mod chart;
pub mod derive;
pub mod node;
pub mod source;
pub mod view;

pub use chart::{PieChart, PieSlice, PALETTE};
pub use derive::{
    created_on, filter_today, group_by_status, is_open, summarize_by_status, GroupedTickets,
    StatusSummary,
};
pub use node::Node;
pub use source::{
    FetchError, HttpTicketSource, StoreTicketSource, TicketSource, DEFAULT_TICKETS_URL,
};
pub use view::{DashboardSnapshot, TicketView};
