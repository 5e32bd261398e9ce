//! Status pie chart
//!
//! Slice geometry is computed once from the status summary; drawing
//! produces an SVG element for the render tree.

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

use super::derive::StatusSummary;
use super::node::Node;

/// Slice colors, reused in order when there are more statuses than colors
pub const PALETTE: [&str; 4] = [
    "#FF6384", // Red
    "#36A2EB", // Blue
    "#FFCE56", // Yellow
    "#4BC0C0", // Teal
];

/// One slice of the pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
    /// Start angle in radians, 0 at twelve o'clock, clockwise
    pub start_angle: f64,
    /// Angular extent in radians
    pub sweep: f64,
}

impl PieSlice {
    /// Share of the whole pie in [0, 1]
    pub fn fraction(&self) -> f64 {
        self.sweep / TAU
    }
}

/// Pie chart over status counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Build slices in summary order
    pub fn from_summary(summary: &StatusSummary) -> Self {
        let total: usize = summary.values().sum();
        if total == 0 {
            return Self::default();
        }

        let mut start_angle = 0.0;
        let slices = summary
            .iter()
            .enumerate()
            .map(|(idx, (label, &value))| {
                let sweep = value as f64 / total as f64 * TAU;
                let slice = PieSlice {
                    label: label.clone(),
                    value,
                    color: PALETTE[idx % PALETTE.len()],
                    start_angle,
                    sweep,
                };
                start_angle += sweep;
                slice
            })
            .collect();

        Self { slices }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Draw as a square SVG of the given size
    pub fn to_node(&self, size: u32) -> Node {
        let size = size.max(1) as f64;
        let center = size / 2.0;
        let radius = center * 0.95;

        let mut svg = Node::element("svg")
            .class("pie-chart")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", fmt_num(size))
            .attr("height", fmt_num(size))
            .attr("viewBox", format!("0 0 {0} {0}", fmt_num(size)));

        if let [only] = self.slices.as_slice() {
            svg = svg.child(
                Node::element("circle")
                    .class("pie-slice")
                    .attr("cx", fmt_num(center))
                    .attr("cy", fmt_num(center))
                    .attr("r", fmt_num(radius))
                    .attr("fill", only.color)
                    .child(slice_title(only)),
            );
            return svg;
        }

        for slice in &self.slices {
            svg = svg.child(
                Node::element("path")
                    .class("pie-slice")
                    .attr("d", arc_path(center, radius, slice.start_angle, slice.sweep))
                    .attr("fill", slice.color)
                    .child(slice_title(slice)),
            );
        }

        svg
    }
}

fn slice_title(slice: &PieSlice) -> Node {
    Node::element("title").with_text(format!("{}: {}", slice.label, slice.value))
}

/// Point on the circle for an angle measured clockwise from twelve o'clock
fn polar(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    let theta = angle - FRAC_PI_2;
    (center + radius * theta.cos(), center + radius * theta.sin())
}

fn arc_path(center: f64, radius: f64, start: f64, sweep: f64) -> String {
    let (x0, y0) = polar(center, radius, start);
    let (x1, y1) = polar(center, radius, start + sweep);
    let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };

    format!(
        "M {c} {c} L {x0} {y0} A {r} {r} 0 {large} 1 {x1} {y1} Z",
        c = fmt_num(center),
        r = fmt_num(radius),
        x0 = fmt_num(x0),
        y0 = fmt_num(y0),
        x1 = fmt_num(x1),
        y1 = fmt_num(y1),
        large = large_arc,
    )
}

fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}
