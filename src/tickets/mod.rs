//! Ticket records and the in-memory ticket store
//!
//! The store backs the ticket API; the `Ticket` type is also what the
//! dashboard reads off the wire.

pub mod error;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::{StoreConfig, TicketStore};
pub use types::{timestamp, Ticket, TicketCreate, TicketUpdate, MAX_FIELD_LEN};
