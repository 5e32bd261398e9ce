//! Ticket dashboard view
//!
//! `TicketView` owns its state: the last fetched ticket list and everything
//! derived from it. It renders an empty dashboard until `mount` completes,
//! fetches exactly once, and keeps its previous state when that fetch fails.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use super::chart::PieChart;
use super::derive::{
    filter_today, group_by_status, summarize_by_status, GroupedTickets, StatusSummary,
};
use super::node::Node;
use super::source::TicketSource;
use crate::tickets::Ticket;

/// Pixel size of the rendered pie chart
pub const CHART_SIZE: u32 = 320;

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Same-day ticket dashboard
pub struct TicketView<S> {
    source: S,
    clock: Clock,
    mounted: bool,
    today: Option<NaiveDate>,
    tickets: Vec<Ticket>,
    filtered: Vec<Ticket>,
    grouped: GroupedTickets,
    summary: StatusSummary,
    chart: PieChart,
}

/// Serializable view of the derived state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// UTC day the filter was applied for; `None` before a successful fetch
    pub date: Option<NaiveDate>,
    pub total: usize,
    /// Ticket titles per status
    pub groups: IndexMap<String, Vec<String>>,
    pub summary: StatusSummary,
}

impl<S: TicketSource> TicketView<S> {
    /// Create a view with empty state. Nothing is fetched yet.
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: Box::new(Utc::now),
            mounted: false,
            today: None,
            tickets: Vec::new(),
            filtered: Vec::new(),
            grouped: GroupedTickets::new(),
            summary: StatusSummary::new(),
            chart: PieChart::default(),
        }
    }

    /// Builder method: replace the clock used to decide what "today" is
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Fetch tickets once and derive the dashboard state.
    ///
    /// Later calls do nothing. A failed fetch is logged and leaves the
    /// current state untouched.
    pub async fn mount(&mut self) {
        if self.mounted {
            tracing::debug!("Ticket view already mounted, skipping fetch");
            return;
        }
        self.mounted = true;

        let source = self.source.describe();
        match self.source.fetch_tickets().await {
            Ok(tickets) => {
                let today = (self.clock)().date_naive();
                self.apply(tickets, today);
                tracing::info!(
                    source = %source,
                    fetched = self.tickets.len(),
                    today = self.filtered.len(),
                    statuses = self.summary.len(),
                    "Loaded tickets"
                );
            }
            Err(e) => {
                tracing::error!(source = %source, error = %e, "Error fetching tickets");
            }
        }
    }

    fn apply(&mut self, tickets: Vec<Ticket>, today: NaiveDate) {
        let filtered = filter_today(&tickets, today);
        let grouped = group_by_status(&filtered);
        let summary = summarize_by_status(&filtered);

        self.chart = PieChart::from_summary(&summary);
        self.today = Some(today);
        self.tickets = tickets;
        self.filtered = filtered;
        self.grouped = grouped;
        self.summary = summary;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Every ticket from the last successful fetch
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Today's open tickets
    pub fn filtered(&self) -> &[Ticket] {
        &self.filtered
    }

    pub fn grouped(&self) -> &GroupedTickets {
        &self.grouped
    }

    pub fn summary(&self) -> &StatusSummary {
        &self.summary
    }

    pub fn chart(&self) -> &PieChart {
        &self.chart
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            date: self.today,
            total: self.filtered.len(),
            groups: self
                .grouped
                .iter()
                .map(|(status, tickets)| {
                    (status.clone(), tickets.iter().map(|t| t.title.clone()).collect())
                })
                .collect(),
            summary: self.summary.clone(),
        }
    }

    /// Render the current state
    pub fn render(&self) -> Node {
        Node::element("div")
            .class("ticket-view")
            .child(Node::element("h2").with_text("Today's Tickets"))
            .child(self.render_sections())
            .child(Node::element("h2").with_text("Summary Chart"))
            .child(self.render_chart())
    }

    fn render_sections(&self) -> Node {
        let sections = self.grouped.iter().map(|(status, tickets)| {
            let items = tickets.iter().map(|ticket| {
                Node::element("li")
                    .attr("data-ticket-id", ticket.id.clone())
                    .with_text(ticket.title.clone())
            });

            Node::element("div")
                .class("ticket-section")
                .attr("data-status", status.clone())
                .child(Node::element("h3").with_text(status.clone()))
                .child(Node::element("ul").children(items))
        });

        Node::element("div").class("ticket-sections").children(sections)
    }

    fn render_chart(&self) -> Node {
        let legend = self.chart.slices.iter().map(|slice| {
            Node::element("li")
                .attr("data-color", slice.color)
                .with_text(format!("{}: {}", slice.label, slice.value))
        });

        Node::element("div")
            .class("summary-chart")
            .child(self.chart.to_node(CHART_SIZE))
            .child(Node::element("ul").class("chart-legend").children(legend))
    }

    /// Render as a standalone HTML page
    pub fn render_page(&self) -> String {
        format!(
            concat!(
                "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">",
                "<title>Today's Tickets</title></head>",
                "<body>{}</body></html>\n",
            ),
            self.render().to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::source::FetchError;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap()
    }

    /// Source returning a fixed result and counting calls
    struct FixedSource {
        tickets: Option<Vec<Ticket>>,
        calls: Arc<AtomicUsize>,
    }

    impl FixedSource {
        fn ok(tickets: Vec<Ticket>) -> Self {
            Self {
                tickets: Some(tickets),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                tickets: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl TicketSource for FixedSource {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        async fn fetch_tickets(&self) -> Result<Vec<Ticket>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.tickets
                .clone()
                .ok_or_else(|| FetchError::Decode("boom".to_string()))
        }
    }

    fn view(source: FixedSource) -> TicketView<FixedSource> {
        TicketView::new(source).with_clock(now)
    }

    fn ticket(id: &str, title: &str, status: &str, created: DateTime<Utc>) -> Ticket {
        Ticket::new(id, title, status, created)
    }

    #[test]
    fn test_initial_render_is_empty() {
        let view = view(FixedSource::ok(vec![]));
        let tree = view.render();

        assert!(!view.is_mounted());
        assert!(tree.find_by_class("ticket-section").is_empty());
        assert!(tree.find_by_class("pie-slice").is_empty());
        assert_eq!(tree.find_by_tag("h2").len(), 2);
        assert!(tree.text_content().contains("Today's Tickets"));
        assert!(tree.text_content().contains("Summary Chart"));
    }

    #[tokio::test]
    async fn test_mount_filters_to_today() {
        let mut view = view(FixedSource::ok(vec![
            ticket("1", "Printer jam", "Open", now()),
            ticket("2", "Old login", "Resolved", now()),
            ticket("3", "Yesterday's", "Open", now() - Duration::days(1)),
        ]));

        view.mount().await;

        assert!(view.is_mounted());
        assert_eq!(view.tickets().len(), 3);
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(view.filtered()[0].id, "1");
        assert_eq!(view.summary().len(), 1);
        assert_eq!(view.summary()["Open"], 1);
    }

    #[tokio::test]
    async fn test_render_groups_and_chart() {
        let mut view = view(FixedSource::ok(vec![
            ticket("1", "Printer jam", "Open", now()),
            ticket("2", "VPN", "Pending", now()),
            ticket("3", "Monitor", "Open", now()),
        ]));
        view.mount().await;

        let tree = view.render();
        let sections = tree.find_by_class("ticket-section");
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].get_attr("data-status"), Some("Open"));
        assert_eq!(sections[0].find_by_tag("h3")[0].text_content(), "Open");
        let open_titles: Vec<_> = sections[0]
            .find_by_tag("li")
            .iter()
            .map(|li| li.text_content())
            .collect();
        assert_eq!(open_titles, vec!["Printer jam", "Monitor"]);
        assert_eq!(sections[1].find_by_tag("li").len(), 1);

        assert_eq!(tree.find_by_class("pie-slice").len(), 2);
        let legend: Vec<_> = tree.find_by_class("chart-legend")[0]
            .find_by_tag("li")
            .iter()
            .map(|li| li.text_content())
            .collect();
        assert_eq!(legend, vec!["Open: 2", "Pending: 1"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_state_empty() {
        let mut view = view(FixedSource::failing());
        view.mount().await;

        assert!(view.is_mounted());
        assert!(view.tickets().is_empty());
        assert!(view.summary().is_empty());
        assert!(view.chart().is_empty());

        let tree = view.render();
        assert!(tree.find_by_class("ticket-section").is_empty());
        assert!(tree.find_by_class("pie-slice").is_empty());
        assert!(tree.find_by_class("chart-legend")[0].child_nodes().is_empty());
    }

    #[tokio::test]
    async fn test_fetches_once_per_mount() {
        let source = FixedSource::ok(vec![ticket("1", "A", "Open", now())]);
        let calls = Arc::clone(&source.calls);
        let mut view = view(source);

        view.mount().await;
        view.mount().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_views_do_not_share_state() {
        let mut first = view(FixedSource::ok(vec![ticket("1", "A", "Open", now())]));
        first.mount().await;

        let second = view(FixedSource::ok(vec![ticket("2", "B", "Open", now())]));

        assert_eq!(first.filtered().len(), 1);
        assert!(second.filtered().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_records_do_not_hide_valid_tickets() {
        use crate::dashboard::source::HttpTicketSource;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "title": "Printer jam", "status": "Open",
                    "created_date": "2024-05-01T09:00:00Z"},
                {"id": 2, "status": "Open", "created_date": "2024-05-01T10:00:00Z"},
                {"id": 3, "title": "No date", "status": "Open", "created_date": null},
                {"title": "No id", "status": "Pending", "created_date": "2024-05-01T11:00:00Z"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpTicketSource::new(format!("{}/api/tickets", server.uri()));
        let mut view = TicketView::new(source).with_clock(now);
        view.mount().await;

        let titles: Vec<_> = view.filtered().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Printer jam", "", "No id"]);
        assert_eq!(view.summary()["Open"], 2);
        assert_eq!(view.summary()["Pending"], 1);

        let items = view.render().find_by_tag("li").len();
        assert_eq!(items, 3 + view.chart().slices.len());
    }

    #[tokio::test]
    async fn test_snapshot() {
        let mut view = view(FixedSource::ok(vec![
            ticket("1", "A", "Open", now()),
            ticket("2", "B", "Pending", now()),
        ]));
        assert_eq!(view.snapshot().date, None);

        view.mount().await;
        let snapshot = view.snapshot();

        assert_eq!(snapshot.date, Some(now().date_naive()));
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.groups["Open"], vec!["A".to_string()]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["summary"]["Pending"], 1);
        assert_eq!(json["date"], "2024-05-01");
    }

    #[tokio::test]
    async fn test_render_page_escapes_titles() {
        let mut view = view(FixedSource::ok(vec![ticket("1", "<b>bold</b>", "Open", now())]));
        view.mount().await;

        let page = view.render_page();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
