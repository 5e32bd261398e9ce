//! Same-day filtering, grouping and summary
//!
//! Pure functions over ticket slices. Exclusion by status is
//! case-insensitive while grouping keys are the exact status strings, so
//! "Open" and "open" land in different groups.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::tickets::Ticket;

/// Statuses (lowercase) that count as closed
pub const CLOSED_STATUSES: [&str; 2] = ["complete", "resolved"];

/// Tickets partitioned by exact status, in first-appearance order
pub type GroupedTickets = IndexMap<String, Vec<Ticket>>;

/// Ticket count per exact status, in first-appearance order
pub type StatusSummary = IndexMap<String, usize>;

/// Whether a status still counts as open
pub fn is_open(status: &str) -> bool {
    let lowered = status.to_lowercase();
    !CLOSED_STATUSES.contains(&lowered.as_str())
}

/// Whether the ticket was created on `day` (UTC calendar day)
pub fn created_on(ticket: &Ticket, day: NaiveDate) -> bool {
    ticket.created_day() == day
}

/// Keep open tickets created on `today`, preserving order
pub fn filter_today(tickets: &[Ticket], today: NaiveDate) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| created_on(t, today) && is_open(&t.status))
        .cloned()
        .collect()
}

/// Partition tickets by exact status string
pub fn group_by_status(tickets: &[Ticket]) -> GroupedTickets {
    let mut groups = GroupedTickets::new();
    for ticket in tickets {
        groups
            .entry(ticket.status.clone())
            .or_default()
            .push(ticket.clone());
    }
    groups
}

/// Count tickets per exact status string
pub fn summarize_by_status(tickets: &[Ticket]) -> StatusSummary {
    let mut summary = StatusSummary::new();
    for ticket in tickets {
        *summary.entry(ticket.status.clone()).or_insert(0) += 1;
    }
    summary
}
