//! Data Transfer Objects
//!
//! Response types for the API endpoints that are not plain tickets.
//! Ticket requests deserialize straight into `TicketCreate` / `TicketUpdate`.

use serde::Serialize;

// ============================================
// ROOT
// ============================================

/// Root endpoint greeting
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================
// TICKET DTOs
// ============================================

/// Ticket deletion response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Status: "success"
    pub status: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of live tickets
    pub tickets: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
