//! Scripted drills: sequences of orders applied to a sailing school.
//!
//! Drills are JSON arrays of orders tagged by `"order"`:
//!
//! ```json
//! [
//!   { "order": "commission", "name": "Alpha", "masts": 2, "maxCrew": 4 },
//!   { "order": "setSail", "vessel": "Alpha", "speed": 10,
//!     "heading": "running", "skipper": "Jane", "crew": 2 },
//!   { "order": "returnToPort", "vessel": "Alpha", "minutes": 45 }
//! ]
//! ```
//!
//! Text fields may be omitted; a missing field fails its order with
//! `MissingValue` when the order is applied, not when the script is parsed.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{RegattaError, Result};
use crate::school::SailingSchool;

/// One instruction to the school.
///
/// Numbers are read as signed integers so a negative value fails its own
/// order with `InvalidArgument` instead of rejecting the whole script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "order", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Order {
    /// Commission a named vessel.
    Commission {
        /// Vessel name.
        name: Option<String>,
        /// Number of masts.
        masts: i64,
        /// Crew capacity, not counting the skipper.
        max_crew: i64,
    },
    /// Commission a vessel with default name, rig and crew.
    CommissionDefault,
    /// Commission several default vessels.
    CommissionFlotilla {
        /// Number of vessels.
        count: i64,
    },
    /// Start a voyage.
    SetSail {
        /// Vessel name.
        vessel: Option<String>,
        /// Speed in knots.
        speed: i64,
        /// Point of sail.
        heading: Option<String>,
        /// Skipper for this voyage.
        skipper: Option<String>,
        /// Crew aboard.
        crew: i64,
    },
    /// Change heading while sailing.
    ChangeHeading {
        /// Vessel name.
        vessel: Option<String>,
        /// New point of sail.
        heading: Option<String>,
    },
    /// End a voyage.
    ReturnToPort {
        /// Vessel name.
        vessel: Option<String>,
        /// Minutes sailed on this voyage.
        minutes: i64,
    },
    /// Race one vessel against another.
    Race {
        /// Challenging vessel.
        vessel: Option<String>,
        /// Challenged vessel.
        rival: Option<String>,
    },
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "?".to_string());
        match self {
            Self::Commission { name, masts, max_crew } => write!(
                f,
                "commission {} ({masts} masts, {max_crew} crew)",
                show(name)
            ),
            Self::CommissionDefault => f.write_str("commission default vessel"),
            Self::CommissionFlotilla { count } => write!(f, "commission flotilla of {count}"),
            Self::SetSail {
                vessel,
                speed,
                heading,
                skipper,
                crew,
            } => write!(
                f,
                "{} sets sail {} at {speed} knots under {} with {crew} crew",
                show(vessel),
                show(heading),
                show(skipper)
            ),
            Self::ChangeHeading { vessel, heading } => {
                write!(f, "{} comes about to {}", show(vessel), show(heading))
            }
            Self::ReturnToPort { vessel, minutes } => {
                write!(f, "{} returns after {minutes} minutes", show(vessel))
            }
            Self::Race { vessel, rival } => {
                write!(f, "{} races {}", show(vessel), show(rival))
            }
        }
    }
}

/// An ordered list of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Drill {
    orders: Vec<Order>,
}

impl Drill {
    /// Wrap a list of orders.
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Parse a drill from a JSON array of orders.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Orders in execution order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Two sloops meet on a run: Beta catches Alpha, who then returns to port.
    ///
    /// The first race is attempted while Beta is still moored and fails.
    pub fn sea_trial() -> Self {
        let alpha = || Some("Alpha".to_string());
        let beta = || Some("Beta".to_string());
        Self::new(vec![
            Order::Commission {
                name: alpha(),
                masts: 2,
                max_crew: 4,
            },
            Order::SetSail {
                vessel: alpha(),
                speed: 10,
                heading: Some("running".to_string()),
                skipper: Some("Jane".to_string()),
                crew: 2,
            },
            Order::Commission {
                name: beta(),
                masts: 2,
                max_crew: 4,
            },
            Order::Race {
                vessel: alpha(),
                rival: beta(),
            },
            Order::SetSail {
                vessel: beta(),
                speed: 14,
                heading: Some("running".to_string()),
                skipper: Some("Luis".to_string()),
                crew: 3,
            },
            Order::Race {
                vessel: alpha(),
                rival: beta(),
            },
            Order::ReturnToPort {
                vessel: alpha(),
                minutes: 45,
            },
        ])
    }
}

/// Outcome of one applied order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// One-based position of the order in its drill.
    pub step: usize,
    /// Summary of the order.
    pub order: String,
    /// Whether the order was carried out.
    pub succeeded: bool,
    /// Result description or error message.
    pub message: String,
}

/// Sink for drill log entries.
#[cfg_attr(test, mockall::automock)]
pub trait Logbook {
    /// Record the outcome of one order.
    fn record(&mut self, entry: LogEntry);
}

/// Logbook that keeps entries in memory.
#[derive(Debug, Default, Clone)]
pub struct VecLogbook {
    entries: Vec<LogEntry>,
}

impl VecLogbook {
    /// Create an empty logbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order they were recorded.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries recording a failed order.
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.succeeded).count()
    }

    /// Consume the logbook, returning its entries.
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl Logbook for VecLogbook {
    fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

impl SailingSchool {
    /// Carry out a single order, returning a description of what happened.
    pub fn apply(&mut self, order: &Order) -> Result<String> {
        match order {
            Order::Commission {
                name,
                masts,
                max_crew,
            } => {
                let name = required(name, "vessel name")?;
                let masts = in_range(*masts, "mast count")?;
                let max_crew = in_range(*max_crew, "crew capacity")?;
                let vessel = self.commission(name, masts, max_crew)?;
                Ok(format!("commissioned {vessel}"))
            }
            Order::CommissionDefault => {
                let vessel = self.commission_default()?;
                Ok(format!("commissioned {vessel}"))
            }
            Order::CommissionFlotilla { count } => {
                let names: Vec<&str> = self
                    .commission_flotilla(in_range(*count, "flotilla size")?)?
                    .iter()
                    .map(|vessel| vessel.name())
                    .collect();
                Ok(format!("commissioned {}", names.join(", ")))
            }
            Order::SetSail {
                vessel,
                speed,
                heading,
                skipper,
                crew,
            } => {
                let vessel = self.require_mut(required(vessel, "vessel")?)?;
                vessel.set_sail(*speed, heading.as_deref(), skipper.as_deref(), *crew)?;
                Ok(format!("{vessel}"))
            }
            Order::ChangeHeading { vessel, heading } => {
                let vessel = self.require_mut(required(vessel, "vessel")?)?;
                vessel.come_about(heading.as_deref())?;
                Ok(format!("{} now sailing {}", vessel.name(), vessel.heading()))
            }
            Order::ReturnToPort { vessel, minutes } => {
                let vessel = self.require_mut(required(vessel, "vessel")?)?;
                vessel.return_to_port(*minutes)?;
                Ok(format!("{vessel}"))
            }
            Order::Race { vessel, rival } => {
                let vessel = required(vessel, "vessel")?;
                let rival = required(rival, "rival vessel")?;
                Ok(self.race(vessel, rival)?.to_string())
            }
        }
    }

    /// Apply every order of `drill`, recording each outcome in `logbook`.
    ///
    /// Failed orders leave the school unchanged. Unless `halt_on_error` is
    /// set the drill carries on with the next order. Returns the number of
    /// failed orders.
    pub fn run_drill(
        &mut self,
        drill: &Drill,
        logbook: &mut dyn Logbook,
        halt_on_error: bool,
    ) -> usize {
        let mut failures = 0;
        for (index, order) in drill.orders().iter().enumerate() {
            let step = index + 1;
            let (succeeded, message) = match self.apply(order) {
                Ok(message) => (true, message),
                Err(err) => {
                    warn!("drill step {step} ({order}) failed: {err}");
                    failures += 1;
                    (false, err.to_string())
                }
            };
            logbook.record(LogEntry {
                step,
                order: order.to_string(),
                succeeded,
                message,
            });
            if !succeeded && halt_on_error {
                break;
            }
        }
        failures
    }
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| RegattaError::missing(what))
}

fn in_range<T: TryFrom<i64>>(value: i64, what: &str) -> Result<T> {
    T::try_from(value)
        .map_err(|_| RegattaError::InvalidArgument(format!("{what} {value} is out of range")))
}
