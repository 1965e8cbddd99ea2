//! Tool outputs and their text renderings.

use fieldops_async::types::{AppointmentSlot, Customer, Invoice, Job, Page, Territory};
use fieldops_tool_core::{TextFormat, TextOptions};
use serde::Serialize;
use std::fmt::Write as _;
use territory_coverage::{AdjacencyReport, Coordinate, CoverageResult, CoverageStatus, Distance};

fn fmt_point(c: &Coordinate) -> String {
    format!("({:.5}, {:.5})", c.latitude(), c.longitude())
}

fn fmt_distance(d: &Distance) -> String {
    format!("{:.1} mi ({:.1} km)", d.miles, d.meters / 1_000.0)
}

// ============================================================================
// Coverage
// ============================================================================

/// Result of `check_territory_coverage`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CoverageReport(pub CoverageResult);

impl TextFormat for CoverageReport {
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        let r = &self.0;
        let mut out = format!("{} -> {}\n", r.address, fmt_point(&r.coordinate));
        match (&r.status, &r.covering_territory, &r.closest_territory) {
            (CoverageStatus::Covered, Some(cov), _) => {
                let _ = writeln!(
                    out,
                    "Covered by {} ({}), {} boundary with {} vertices",
                    cov.territory.name,
                    cov.territory.id,
                    source_label(cov.boundary.source),
                    cov.boundary.vertex_count()
                );
            }
            (_, _, Some(closest)) => {
                let _ = writeln!(
                    out,
                    "Not covered. Closest territory: {} ({}), {} away",
                    closest.territory.name,
                    closest.territory.id,
                    fmt_distance(&closest.distance)
                );
            }
            _ => out.push_str("Not covered. No territory could be located.\n"),
        }
        let _ = write!(
            out,
            "Checked {} of {} active territories ({} total)",
            r.territories_checked, r.active_territories, r.total_territories
        );
        out
    }
}

const fn source_label(source: territory_coverage::BoundarySource) -> &'static str {
    match source {
        territory_coverage::BoundarySource::Geocoded => "geocoded",
        territory_coverage::BoundarySource::SquareFallback => "fallback square",
        territory_coverage::BoundarySource::Unresolved => "unresolved",
    }
}

/// Result of `check_adjacent_territories`.
#[derive(Debug, Clone, Serialize)]
pub struct AdjacencyResult {
    /// Address as supplied
    pub address: String,
    /// Where the address geocoded to
    pub coordinate: Coordinate,
    /// Territories in range, nearest first
    #[serde(flatten)]
    pub report: AdjacencyReport,
}

impl TextFormat for AdjacencyResult {
    fn fmt_text(&self, opts: &TextOptions) -> String {
        let adjacent = &self.report.adjacent;
        let mut out = format!(
            "{} -> {}\n{} territories within {} mi",
            self.address,
            fmt_point(&self.coordinate),
            adjacent.len(),
            self.report.radius_miles
        );
        let shown = opts.max_items.unwrap_or(adjacent.len());
        for a in adjacent.iter().take(shown) {
            let _ = write!(
                out,
                "\n  {} ({}): {}",
                a.territory.name,
                a.territory.id,
                fmt_distance(&a.distance)
            );
        }
        if adjacent.len() > shown {
            let _ = write!(out, "\n  ... {} more", adjacent.len() - shown);
        }
        if !self.report.unresolved.is_empty() {
            let names: Vec<&str> = self
                .report
                .unresolved
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            let _ = write!(out, "\nCould not locate: {}", names.join(", "));
        }
        out
    }
}

// ============================================================================
// Scheduling
// ============================================================================

/// Result of `get_available_appointments`.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentsResult {
    /// Address as supplied
    pub address: String,
    /// Where the address geocoded to
    pub coordinate: Coordinate,
    /// Open slots in server order
    pub slots: Vec<AppointmentSlot>,
}

impl TextFormat for AppointmentsResult {
    fn fmt_text(&self, opts: &TextOptions) -> String {
        if self.slots.is_empty() {
            return format!("No open appointments near {}", self.address);
        }
        let mut out = format!(
            "{} open appointments near {}",
            self.slots.len(),
            self.address
        );
        let shown = opts.max_items.unwrap_or(self.slots.len());
        for s in self.slots.iter().take(shown) {
            let _ = write!(
                out,
                "\n  {} - {}",
                s.start.format("%Y-%m-%d %H:%M"),
                s.end.format("%H:%M UTC")
            );
            if let Some(tech) = s.technician_name.as_deref().or(s.technician_id.as_deref()) {
                let _ = write!(out, " with {tech}");
            }
        }
        if self.slots.len() > shown {
            let _ = write!(out, "\n  ... {} more", self.slots.len() - shown);
        }
        out
    }
}

// ============================================================================
// Records
// ============================================================================

/// One-line summary of a REST record.
pub trait Summary {
    /// Short human-readable line
    fn summary(&self) -> String;
}

impl Summary for Territory {
    fn summary(&self) -> String {
        let mut s = format!("{} {}", self.id, self.name);
        if !self.active {
            s.push_str(" [inactive]");
        }
        if !self.zip_codes.is_empty() {
            let _ = write!(s, " zips: {}", self.zip_codes.join(", "));
        }
        if !self.cities.is_empty() {
            let _ = write!(s, " cities: {}", self.cities.join(", "));
        }
        s
    }
}

impl Summary for Job {
    fn summary(&self) -> String {
        let mut s = format!("{} {}", self.id, self.title.as_deref().unwrap_or("(untitled)"));
        if let Some(status) = &self.status {
            let _ = write!(s, " [{status}]");
        }
        if let Some(start) = &self.scheduled_start {
            let _ = write!(s, " at {}", start.format("%Y-%m-%d %H:%M"));
        }
        s
    }
}

impl Summary for Customer {
    fn summary(&self) -> String {
        let mut s = format!("{} {}", self.id, self.name);
        if let Some(email) = &self.email {
            let _ = write!(s, " <{email}>");
        }
        s
    }
}

impl Summary for Invoice {
    fn summary(&self) -> String {
        let mut s = format!("{} {}", self.id, self.number.as_deref().unwrap_or("-"));
        if let Some(total) = self.total {
            let _ = write!(s, " {total:.2}");
        }
        if let Some(status) = &self.status {
            let _ = write!(s, " [{status}]");
        }
        if let Some(due) = &self.due_date {
            let _ = write!(s, " due {due}");
        }
        s
    }
}

/// One page of records, passed through from the API.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Listing<T>(pub Page<T>);

impl<T: Serialize + Summary> TextFormat for Listing<T> {
    fn fmt_text(&self, opts: &TextOptions) -> String {
        let page = &self.0;
        let mut out = match (page.page, page.total) {
            (Some(p), Some(total)) => format!("{} items (page {p}, {total} total)", page.data.len()),
            (Some(p), None) => format!("{} items (page {p})", page.data.len()),
            _ => format!("{} items", page.data.len()),
        };
        let shown = opts.max_items.unwrap_or(page.data.len());
        for item in page.data.iter().take(shown) {
            let _ = write!(out, "\n  {}", item.summary());
        }
        if page.data.len() > shown {
            let _ = write!(out, "\n  ... {} more", page.data.len() - shown);
        }
        if page.has_more == Some(true) {
            out.push_str("\nMore pages available.");
        }
        out
    }
}

/// A single record fetched by id.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Record<T>(pub T);

impl<T: Serialize + Summary> TextFormat for Record<T> {
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        let json = serde_json::to_string_pretty(&self.0).unwrap_or_default();
        format!("{}\n{json}", self.0.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_truncates_to_max_items() {
        let page = Page {
            data: vec![
                Territory::new("1", "North"),
                Territory::new("2", "South").with_active(false),
                Territory::new("3", "East"),
            ],
            page: Some(1),
            per_page: Some(25),
            total: Some(3),
            has_more: Some(false),
        };
        let text = Listing(page).fmt_text(&TextOptions::new().with_max_items(Some(2)));
        assert_eq!(
            text,
            "3 items (page 1, 3 total)\n  1 North\n  2 South [inactive]\n  ... 1 more"
        );
    }

    #[test]
    fn listing_serializes_like_the_page() {
        let page = Page {
            data: vec![Territory::new("1", "North")],
            page: None,
            per_page: None,
            total: None,
            has_more: None,
        };
        let v = serde_json::to_value(Listing(page)).unwrap();
        assert_eq!(v["data"][0]["id"], "1");
        assert!(v.get("page").is_none());
    }

    #[test]
    fn job_summary_includes_status() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": 7, "title": "Furnace repair", "status": "scheduled",
            "scheduled_start": "2026-03-04T15:00:00Z"
        }))
        .unwrap();
        assert_eq!(job.summary(), "7 Furnace repair [scheduled] at 2026-03-04 15:00");
    }

    #[test]
    fn empty_appointments_text() {
        let r = AppointmentsResult {
            address: "1 Main St".into(),
            coordinate: Coordinate::new(45.0, -108.0).unwrap(),
            slots: vec![],
        };
        assert_eq!(r.fmt_text(&TextOptions::default()), "No open appointments near 1 Main St");
    }
}
