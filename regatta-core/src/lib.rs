#![deny(missing_docs)]
//! Regatta core library.
//!
//! Models the vessels of a sailing school: their voyage lifecycle, the
//! speed race between two sailing vessels, and the fleet-wide counters the
//! vessels maintain as they commission, leave and return to port.

pub mod drill;
pub mod error;
pub mod heading;
pub mod limits;
pub mod registry;
pub mod report;
pub mod school;
pub mod vessel;

pub use drill::{Drill, LogEntry, Logbook, Order, VecLogbook};
pub use error::{ErrorKind, RegattaError, Result};
pub use heading::Heading;
pub use registry::{FleetRegistry, FleetStats};
pub use report::{
    FleetReport, VesselReport, render_fleet_markdown, render_fleet_text, render_json,
};
pub use school::SailingSchool;
pub use vessel::{Navigation, RaceOutcome, Vessel, Voyage};
