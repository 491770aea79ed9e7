//! Report formatting utilities for fleet snapshots.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::registry::FleetStats;
use crate::vessel::{Vessel, Voyage};

/// Read-only snapshot of a single vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselReport {
    /// Vessel name.
    pub name: String,
    /// Number of masts.
    pub masts: u8,
    /// Crew capacity, not counting the skipper.
    pub max_crew: u32,
    /// Voyage in progress, if the vessel is under way.
    pub voyage: Option<Voyage>,
    /// Minutes sailed over completed voyages.
    pub minutes_sailed: u64,
    /// Hours sailed over completed voyages.
    pub hours_sailed: f64,
}

impl From<&Vessel> for VesselReport {
    fn from(vessel: &Vessel) -> Self {
        Self {
            name: vessel.name().to_string(),
            masts: vessel.masts(),
            max_crew: vessel.max_crew(),
            voyage: vessel.voyage().cloned(),
            minutes_sailed: vessel.minutes_sailed(),
            hours_sailed: vessel.hours_sailed(),
        }
    }
}

/// Snapshot of a school's vessels together with its registry counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    /// Vessels in commissioning order.
    pub vessels: Vec<VesselReport>,
    /// Registry counters at the time of the snapshot.
    pub stats: FleetStats,
}

impl FleetReport {
    /// Build a report from vessels and the counters they report to.
    pub fn new<'a>(vessels: impl IntoIterator<Item = &'a Vessel>, stats: FleetStats) -> Self {
        Self {
            vessels: vessels.into_iter().map(VesselReport::from).collect(),
            stats,
        }
    }
}

/// Render a fleet report as plain text.
pub fn render_fleet_text(report: &FleetReport) -> String {
    let mut output = String::new();
    if report.vessels.is_empty() {
        let _ = writeln!(output, "Vessels: none");
    } else {
        let _ = writeln!(output, "Vessels:");
        for vessel in &report.vessels {
            let _ = writeln!(output, "- {}", describe_vessel(vessel));
        }
    }
    let _ = writeln!(output, "Total vessels: {}", report.stats.total_vessels);
    let _ = writeln!(output, "Under way: {}", report.stats.vessels_under_way);
    let _ = writeln!(
        output,
        "Fleet minutes sailed: {:.0}",
        report.stats.total_fleet_minutes
    );
    output
}

/// Render a fleet report as Markdown.
pub fn render_fleet_markdown(report: &FleetReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Sailing School Fleet Report\n");
    let _ = writeln!(output, "## Vessels\n");
    if report.vessels.is_empty() {
        let _ = writeln!(output, "No vessels commissioned.\n");
    } else {
        let _ = writeln!(output, "| Name | Masts | Crew | Status | Hours sailed |");
        let _ = writeln!(output, "|------|-------|------|--------|--------------|");
        for vessel in &report.vessels {
            let crew = vessel.voyage.as_ref().map_or(0, |voyage| voyage.crew);
            let _ = writeln!(
                output,
                "| {} | {} | {}/{} | {} | {:.2} |",
                vessel.name,
                vessel.masts,
                crew,
                vessel.max_crew,
                sailing_status(vessel.voyage.as_ref()),
                vessel.hours_sailed
            );
        }
        let _ = writeln!(output);
    }
    let _ = writeln!(output, "## Registry\n");
    let _ = writeln!(output, "- Total vessels: {}", report.stats.total_vessels);
    let _ = writeln!(output, "- Under way: {}", report.stats.vessels_under_way);
    let _ = writeln!(
        output,
        "- Fleet minutes sailed: {:.0}",
        report.stats.total_fleet_minutes
    );
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

fn describe_vessel(vessel: &VesselReport) -> String {
    let crew = vessel.voyage.as_ref().map_or(0, |voyage| voyage.crew);
    format!(
        "{} ({} masts, crew {}): {}; {:.2} hours sailed",
        vessel.name,
        vessel.masts,
        crew,
        sailing_status(vessel.voyage.as_ref()),
        vessel.hours_sailed
    )
}

fn sailing_status(voyage: Option<&Voyage>) -> String {
    match voyage {
        Some(voyage) => format!(
            "sailing under skipper {} on heading {} at {} knots",
            voyage.skipper, voyage.heading, voyage.speed
        ),
        None => "not sailing".to_string(),
    }
}
