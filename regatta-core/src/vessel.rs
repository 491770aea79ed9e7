//! The sailing-school vessel and its voyage lifecycle.
//!
//! A vessel is either in port or under way. The only legal transitions are
//! [`Vessel::start_voyage`], [`Vessel::end_voyage`] and, while sailing,
//! [`Vessel::change_heading`]. Each transition validates every precondition
//! before touching state, so a failed call leaves the vessel and its
//! [`FleetRegistry`] exactly as they were.

use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{RegattaError, Result};
use crate::heading::Heading;
use crate::limits::{
    DEFAULT_HEADING, DEFAULT_SKIPPER, MAX_FLOTILLA, MAX_MASTS, MAX_SPEED_KNOTS, MIN_CREW,
    MIN_FLOTILLA, MIN_MASTS, MIN_SPEED_KNOTS, MINUTES_PER_HOUR,
};
use crate::registry::FleetRegistry;

/// Parameters of the voyage a vessel is currently sailing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voyage {
    /// Speed in knots.
    pub speed: u32,
    /// Current point of sail.
    pub heading: Heading,
    /// Person in charge for this voyage.
    pub skipper: String,
    /// Crew aboard, not counting the skipper.
    pub crew: u32,
}

/// Navigation state of a vessel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Navigation {
    /// Moored; no voyage in progress.
    #[default]
    InPort,
    /// Sailing the given voyage.
    UnderWay(Voyage),
}

/// Result of comparing two vessels' current speeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum RaceOutcome {
    /// One vessel was strictly faster.
    Winner {
        /// Name of the faster vessel.
        winner: String,
        /// Name of the slower vessel.
        loser: String,
    },
    /// Both vessels sailed at the same speed.
    Tie {
        /// Name of the challenging vessel.
        first: String,
        /// Name of the challenged vessel.
        second: String,
    },
}

impl RaceOutcome {
    /// Name of the winning vessel, or `None` on a tie.
    pub fn winner(&self) -> Option<&str> {
        match self {
            Self::Winner { winner, .. } => Some(winner),
            Self::Tie { .. } => None,
        }
    }
}

impl fmt::Display for RaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner { winner, .. } => {
                write!(f, "{winner} crossed the finish line first.")
            }
            Self::Tie { first, second } => {
                write!(f, "{first} and {second} crossed the finish line together.")
            }
        }
    }
}

/// A sailing-school boat.
///
/// Name, mast count and crew capacity are fixed at construction. Not `Clone`:
/// each vessel is counted exactly once by its registry.
#[derive(Debug)]
pub struct Vessel {
    name: String,
    masts: u8,
    max_crew: u32,
    minutes_sailed: u64,
    navigation: Navigation,
    registry: Arc<FleetRegistry>,
}

impl Vessel {
    /// Commission a vessel in the process-wide registry.
    pub fn new(name: &str, masts: u8, max_crew: u32) -> Result<Self> {
        Self::new_in(FleetRegistry::global(), name, masts, max_crew)
    }

    /// Commission a vessel in `registry`.
    ///
    /// Fails with `InvalidArgument` for an empty name or a mast count outside
    /// `MIN_MASTS..=MAX_MASTS`.
    pub fn new_in(
        registry: &Arc<FleetRegistry>,
        name: &str,
        masts: u8,
        max_crew: u32,
    ) -> Result<Self> {
        registry.commission(|_| Self::build(registry, name.to_string(), masts, max_crew))
    }

    /// Commission a default vessel in the process-wide registry.
    pub fn with_defaults() -> Result<Self> {
        Self::with_defaults_in(FleetRegistry::global())
    }

    /// Commission a vessel named after its hull number, with the smallest
    /// rig and crew allowed.
    pub fn with_defaults_in(registry: &Arc<FleetRegistry>) -> Result<Self> {
        Self::default_in(registry, |_| Ok(()))
    }

    /// Default construction where the generated name must also pass `vet`.
    ///
    /// `vet` runs while the hull number is reserved, so the name it sees is
    /// the name the vessel gets.
    pub(crate) fn default_in(
        registry: &Arc<FleetRegistry>,
        vet: impl FnOnce(&str) -> Result<()>,
    ) -> Result<Self> {
        registry.commission(|hull| Self::build_default(registry, hull, vet))
    }

    /// Commission `count` default vessels in the process-wide registry.
    pub fn flotilla(count: usize) -> Result<Vec<Self>> {
        Self::flotilla_in(FleetRegistry::global(), count)
    }

    /// Commission `count` default vessels in order.
    ///
    /// `count` must lie in `MIN_FLOTILLA..=MAX_FLOTILLA`.
    pub fn flotilla_in(registry: &Arc<FleetRegistry>, count: usize) -> Result<Vec<Self>> {
        Self::default_flotilla_in(registry, count, |_| Ok(()))
    }

    /// Flotilla whose generated names must all pass `vet`.
    ///
    /// The size is checked before any name is generated. Hull numbers are
    /// reserved for the whole batch at once; one rejected name leaves the
    /// registry untouched.
    pub(crate) fn default_flotilla_in(
        registry: &Arc<FleetRegistry>,
        count: usize,
        vet: impl Fn(&str) -> Result<()>,
    ) -> Result<Vec<Self>> {
        check_flotilla_size(count)?;
        registry.commission_batch(count, |hull| Self::build_default(registry, hull, &vet))
    }

    fn build_default(
        registry: &Arc<FleetRegistry>,
        hull: u64,
        vet: impl FnOnce(&str) -> Result<()>,
    ) -> Result<Self> {
        let name = format!("Vessel {hull}");
        vet(&name)?;
        Self::build(registry, name, MIN_MASTS, MIN_CREW)
    }

    fn build(
        registry: &Arc<FleetRegistry>,
        name: String,
        masts: u8,
        max_crew: u32,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(RegattaError::empty("vessel name"));
        }
        if !(MIN_MASTS..=MAX_MASTS).contains(&masts) {
            return Err(RegattaError::InvalidArgument(format!(
                "mast count {masts} must be between {MIN_MASTS} and {MAX_MASTS}"
            )));
        }
        info!("commissioned vessel {name} ({masts} masts, up to {max_crew} crew)");
        Ok(Self {
            name,
            masts,
            max_crew,
            minutes_sailed: 0,
            navigation: Navigation::InPort,
            registry: Arc::clone(registry),
        })
    }

    /// Vessel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of masts.
    pub fn masts(&self) -> u8 {
        self.masts
    }

    /// Largest crew the vessel carries, not counting the skipper.
    pub fn max_crew(&self) -> u32 {
        self.max_crew
    }

    /// Whether the vessel is currently sailing.
    pub fn is_under_way(&self) -> bool {
        matches!(self.navigation, Navigation::UnderWay(_))
    }

    /// Current navigation state.
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// The voyage in progress, if any.
    pub fn voyage(&self) -> Option<&Voyage> {
        match &self.navigation {
            Navigation::UnderWay(voyage) => Some(voyage),
            Navigation::InPort => None,
        }
    }

    /// Minutes sailed across all completed voyages.
    pub fn minutes_sailed(&self) -> u64 {
        self.minutes_sailed
    }

    /// Hours sailed across all completed voyages.
    pub fn hours_sailed(&self) -> f64 {
        self.minutes_sailed as f64 / MINUTES_PER_HOUR
    }

    /// Speed in knots; zero in port.
    pub fn speed(&self) -> u32 {
        self.voyage().map_or(0, |voyage| voyage.speed)
    }

    /// Heading text; [`DEFAULT_HEADING`] in port.
    pub fn heading(&self) -> &str {
        self.voyage()
            .map_or(DEFAULT_HEADING, |voyage| voyage.heading.as_str())
    }

    /// Skipper name; [`DEFAULT_SKIPPER`] in port.
    pub fn skipper(&self) -> &str {
        self.voyage()
            .map_or(DEFAULT_SKIPPER, |voyage| voyage.skipper.as_str())
    }

    /// Crew aboard; [`MIN_CREW`] in port.
    pub fn crew_size(&self) -> u32 {
        self.voyage().map_or(MIN_CREW, |voyage| voyage.crew)
    }

    /// Registry this vessel reports to.
    pub fn registry(&self) -> &Arc<FleetRegistry> {
        &self.registry
    }

    /// Leave port.
    ///
    /// Checks, in order: speed range, that the vessel is in port, heading,
    /// skipper, crew size. The first failing check decides the error.
    pub fn start_voyage(
        &mut self,
        speed: u32,
        heading: &str,
        skipper: &str,
        crew: u32,
    ) -> Result<()> {
        self.set_sail(
            i64::from(speed),
            Some(heading),
            Some(skipper),
            i64::from(crew),
        )
    }

    /// [`Vessel::start_voyage`] for drill orders: heading or skipper may be
    /// absent and numbers may be negative. Each bad value fails at its turn
    /// in the usual order.
    pub(crate) fn set_sail(
        &mut self,
        speed: i64,
        heading: Option<&str>,
        skipper: Option<&str>,
        crew: i64,
    ) -> Result<()> {
        let speed = u32::try_from(speed)
            .ok()
            .filter(|speed| (MIN_SPEED_KNOTS..=MAX_SPEED_KNOTS).contains(speed))
            .ok_or_else(|| {
                RegattaError::InvalidArgument(format!(
                    "speed {speed} knots must be between {MIN_SPEED_KNOTS} and {MAX_SPEED_KNOTS}"
                ))
            })?;
        if self.is_under_way() {
            return Err(RegattaError::AlreadyUnderWay(self.name.clone()));
        }
        let heading = Heading::parse(heading.ok_or_else(|| RegattaError::missing("heading"))?)?;
        let skipper = skipper.ok_or_else(|| RegattaError::missing("skipper"))?;
        if skipper.is_empty() {
            return Err(RegattaError::empty("skipper"));
        }
        let crew = u32::try_from(crew)
            .ok()
            .filter(|crew| (MIN_CREW..=self.max_crew).contains(crew))
            .ok_or_else(|| {
                RegattaError::InvalidArgument(format!(
                    "crew of {crew} must be between {MIN_CREW} and {} for {}",
                    self.max_crew, self.name
                ))
            })?;

        self.navigation = Navigation::UnderWay(Voyage {
            speed,
            heading,
            skipper: skipper.to_string(),
            crew,
        });
        self.registry.record_departure();
        info!(
            "{} left port under {skipper}, {heading} at {speed} knots with {crew} crew",
            self.name
        );
        Ok(())
    }

    /// Return to port after sailing `minutes`, restoring in-port defaults.
    pub fn end_voyage(&mut self, minutes: u32) -> Result<()> {
        self.return_to_port(i64::from(minutes))
    }

    pub(crate) fn return_to_port(&mut self, minutes: i64) -> Result<()> {
        if !self.is_under_way() {
            return Err(RegattaError::NotUnderWay(self.name.clone()));
        }
        let minutes = u32::try_from(minutes)
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or_else(|| {
                RegattaError::InvalidArgument(format!(
                    "minutes sailed must be between 1 and {}, got {minutes}",
                    u32::MAX
                ))
            })?;

        self.minutes_sailed += u64::from(minutes);
        self.navigation = Navigation::InPort;
        self.registry.record_return(minutes);
        info!("{} returned to port after {minutes} minutes", self.name);
        Ok(())
    }

    /// Come about to a different recognised heading while sailing.
    pub fn change_heading(&mut self, heading: &str) -> Result<()> {
        self.come_about(Some(heading))
    }

    pub(crate) fn come_about(&mut self, heading: Option<&str>) -> Result<()> {
        let Navigation::UnderWay(voyage) = &mut self.navigation else {
            return Err(RegattaError::NotUnderWay(self.name.clone()));
        };
        let heading = Heading::parse(heading.ok_or_else(|| RegattaError::missing("heading"))?)?;
        if voyage.heading == heading {
            return Err(RegattaError::NoOp(format!(
                "{} is already sailing {heading}",
                self.name
            )));
        }
        voyage.heading = heading;
        debug!("{} changed heading to {heading}", self.name);
        Ok(())
    }

    /// Compare current speeds against `other`.
    ///
    /// Both vessels must be under way on the same heading with the same
    /// number of masts. Neither vessel nor the registry is modified.
    pub fn race(&self, other: &Vessel) -> Result<RaceOutcome> {
        let (Some(mine), Some(theirs)) = (self.voyage(), other.voyage()) else {
            let idle = if self.is_under_way() { other } else { self };
            return Err(RegattaError::NotUnderWay(idle.name.clone()));
        };
        if mine.heading != theirs.heading {
            return Err(RegattaError::IncompatibleRace(format!(
                "{} sails {} but {} sails {}",
                self.name, mine.heading, other.name, theirs.heading
            )));
        }
        if self.masts != other.masts {
            return Err(RegattaError::IncompatibleRace(format!(
                "{} has {} masts but {} has {}",
                self.name, self.masts, other.name, other.masts
            )));
        }

        let outcome = match mine.speed.cmp(&theirs.speed) {
            std::cmp::Ordering::Greater => RaceOutcome::Winner {
                winner: self.name.clone(),
                loser: other.name.clone(),
            },
            std::cmp::Ordering::Less => RaceOutcome::Winner {
                winner: other.name.clone(),
                loser: self.name.clone(),
            },
            std::cmp::Ordering::Equal => RaceOutcome::Tie {
                first: self.name.clone(),
                second: other.name.clone(),
            },
        };
        debug!("race {} vs {}: {outcome}", self.name, other.name);
        Ok(outcome)
    }
}

/// Fails with `InvalidArgument` unless `count` lies in
/// `MIN_FLOTILLA..=MAX_FLOTILLA`.
pub(crate) fn check_flotilla_size(count: usize) -> Result<()> {
    if !(MIN_FLOTILLA..=MAX_FLOTILLA).contains(&count) {
        return Err(RegattaError::InvalidArgument(format!(
            "flotilla size {count} must be between {MIN_FLOTILLA} and {MAX_FLOTILLA}"
        )));
    }
    Ok(())
}

impl fmt::Display for Vessel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: {}, masts: {}, crew: {}, sailing: ",
            self.name,
            self.masts,
            self.crew_size()
        )?;
        match self.voyage() {
            Some(voyage) => write!(
                f,
                "under skipper {} on heading {} at {} knots",
                voyage.skipper, voyage.heading, voyage.speed
            )?,
            None => f.write_str("not sailing")?,
        }
        write!(f, ", hours sailed: {:.2}}}", self.hours_sailed())
    }
}

#[cfg(test)]
mod tests {
    use super::{Navigation, RaceOutcome, Vessel};
    use crate::limits::{DEFAULT_HEADING, DEFAULT_SKIPPER};
    use crate::{ErrorKind, FleetRegistry};

    fn sailing(
        registry: &std::sync::Arc<FleetRegistry>,
        name: &str,
        masts: u8,
        speed: u32,
        heading: &str,
    ) -> Vessel {
        let mut vessel = Vessel::new_in(registry, name, masts, 4).expect("vessel");
        vessel
            .start_voyage(speed, heading, "Skipper", 1)
            .expect("start voyage");
        vessel
    }

    fn assert_in_port(vessel: &Vessel) {
        assert!(!vessel.is_under_way());
        assert_eq!(vessel.navigation(), &Navigation::InPort);
        assert_eq!(vessel.speed(), 0);
        assert_eq!(vessel.heading(), DEFAULT_HEADING);
        assert_eq!(vessel.skipper(), DEFAULT_SKIPPER);
        assert_eq!(vessel.crew_size(), 0);
    }

    #[test]
    fn construction_counts_vessel_and_starts_in_port() {
        let registry = FleetRegistry::new();
        for masts in 1..=4 {
            let before = registry.total_vessels();
            let vessel = Vessel::new_in(&registry, "Gull", masts, 3).expect("vessel");
            assert_eq!(registry.total_vessels(), before + 1);
            assert_eq!(vessel.masts(), masts);
            assert_eq!(vessel.max_crew(), 3);
            assert_eq!(vessel.minutes_sailed(), 0);
            assert_in_port(&vessel);
        }
    }

    #[test]
    fn construction_rejects_bad_arguments_without_counting() {
        let registry = FleetRegistry::new();
        let err = Vessel::new_in(&registry, "", 2, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        for masts in [0, 5] {
            let err = Vessel::new_in(&registry, "Gull", masts, 3).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(registry.total_vessels(), 0);
    }

    #[test]
    fn default_vessels_are_named_after_hull_number() {
        let registry = FleetRegistry::new();
        Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");
        let vessel = Vessel::with_defaults_in(&registry).expect("default vessel");
        assert_eq!(vessel.name(), "Vessel 2");
        assert_eq!(vessel.masts(), 1);
        assert_eq!(vessel.max_crew(), 0);
    }

    #[test]
    fn flotilla_bounds_and_naming() {
        let registry = FleetRegistry::new();
        for count in [0, 11, 20_000_000, usize::MAX] {
            let err = Vessel::flotilla_in(&registry, count).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(registry.total_vessels(), 0);

        let flotilla = Vessel::flotilla_in(&registry, 10).expect("flotilla");
        let names: Vec<&str> = flotilla.iter().map(Vessel::name).collect();
        assert_eq!(names.first(), Some(&"Vessel 1"));
        assert_eq!(names.last(), Some(&"Vessel 10"));
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert_eq!(registry.total_vessels(), 10);
    }

    #[test]
    fn voyage_round_trip_restores_port_defaults() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");

        vessel
            .start_voyage(12, "close-hauled", "Jane", 4)
            .expect("start");
        assert!(vessel.is_under_way());
        assert_eq!(vessel.speed(), 12);
        assert_eq!(vessel.heading(), "close-hauled");
        assert_eq!(vessel.skipper(), "Jane");
        assert_eq!(vessel.crew_size(), 4);
        assert_eq!(registry.vessels_under_way(), 1);

        vessel.end_voyage(90).expect("end");
        assert_in_port(&vessel);
        assert_eq!(vessel.minutes_sailed(), 90);
        assert_eq!(registry.vessels_under_way(), 0);
        assert_eq!(registry.total_fleet_minutes(), 90.0);

        vessel.start_voyage(5, "running", "Ana", 0).expect("start");
        vessel.end_voyage(30).expect("end");
        assert_eq!(vessel.minutes_sailed(), 120);
        assert_eq!(vessel.hours_sailed(), 2.0);
    }

    #[test]
    fn start_voyage_checks_preconditions_in_order() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");

        for speed in [0, 1, 31] {
            let err = vessel.start_voyage(speed, "", "", 99).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "speed {speed}");
        }
        let err = vessel.start_voyage(10, "", "Jane", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = vessel.start_voyage(10, "reaching", "Jane", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = vessel.start_voyage(10, "running", "", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = vessel.start_voyage(10, "running", "Jane", 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert_in_port(&vessel);
        assert_eq!(registry.vessels_under_way(), 0);
    }

    #[test]
    fn absent_heading_or_skipper_is_a_missing_value() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");

        let err = vessel.set_sail(10, None, Some("Jane"), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
        let err = vessel.set_sail(10, Some("running"), None, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
        let err = vessel.set_sail(1, None, None, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = vessel.come_about(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnderWay);
        vessel.start_voyage(10, "running", "Jane", 1).expect("start");
        let err = vessel.come_about(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn negative_numbers_fail_at_their_turn() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");

        let err = vessel.return_to_port(-5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnderWay);
        let err = vessel
            .set_sail(-10, Some("running"), Some("Jane"), 1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = vessel
            .set_sail(10, Some("running"), Some("Jane"), -1)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(registry.vessels_under_way(), 0);

        vessel.start_voyage(10, "running", "Jane", 1).expect("start");
        let err = vessel.set_sail(10, None, None, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyUnderWay);
        for minutes in [-5, 0, i64::from(u32::MAX) + 1] {
            let err = vessel.return_to_port(minutes).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "minutes {minutes}");
        }
        assert!(vessel.is_under_way());
        assert_eq!(registry.total_fleet_minutes(), 0.0);
    }

    #[test]
    fn second_start_fails_and_keeps_first_voyage() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");
        vessel.start_voyage(10, "running", "Jane", 2).expect("start");

        let err = vessel
            .start_voyage(20, "close-hauled", "Luis", 3)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyUnderWay);
        assert_eq!(vessel.speed(), 10);
        assert_eq!(vessel.heading(), "running");
        assert_eq!(vessel.skipper(), "Jane");
        assert_eq!(vessel.crew_size(), 2);
        assert_eq!(registry.vessels_under_way(), 1);
    }

    #[test]
    fn end_voyage_guards() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");
        let err = vessel.end_voyage(10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnderWay);

        vessel.start_voyage(10, "running", "Jane", 2).expect("start");
        let err = vessel.end_voyage(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(vessel.is_under_way());
        assert_eq!(registry.vessels_under_way(), 1);
        assert_eq!(registry.total_fleet_minutes(), 0.0);
    }

    #[test]
    fn change_heading_rules() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");
        let err = vessel.change_heading("running").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnderWay);

        vessel.start_voyage(10, "running", "Jane", 2).expect("start");
        let err = vessel.change_heading("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = vessel.change_heading("beam reach").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        for _ in 0..3 {
            let err = vessel.change_heading("running").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NoOp);
            vessel.change_heading("close-hauled").expect("come about");
            vessel.change_heading("running").expect("come about");
        }
        assert_eq!(vessel.heading(), "running");
        assert_eq!(vessel.speed(), 10);
        assert_eq!(registry.vessels_under_way(), 1);
    }

    #[test]
    fn race_compares_current_speed() {
        let registry = FleetRegistry::new();
        let fast = sailing(&registry, "Fast", 2, 12, "running");
        let slow = sailing(&registry, "Slow", 2, 9, "running");
        let even = sailing(&registry, "Even", 2, 12, "running");

        assert_eq!(fast.race(&slow).expect("race").winner(), Some("Fast"));
        assert_eq!(slow.race(&fast).expect("race").winner(), Some("Fast"));
        assert_eq!(
            fast.race(&even).expect("race"),
            RaceOutcome::Tie {
                first: "Fast".to_string(),
                second: "Even".to_string(),
            }
        );
        assert_eq!(fast.speed(), 12);
        assert_eq!(registry.vessels_under_way(), 3);
    }

    #[test]
    fn race_requires_matching_rigs_and_headings() {
        let registry = FleetRegistry::new();
        let running = sailing(&registry, "A", 2, 10, "running");
        let hauled = sailing(&registry, "B", 2, 10, "close-hauled");
        let three_masts = sailing(&registry, "C", 3, 10, "running");
        let moored = Vessel::new_in(&registry, "D", 2, 4).expect("vessel");

        let err = running.race(&hauled).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleRace);
        let err = running.race(&three_masts).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleRace);

        let err = running.race(&moored).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotUnderWay);
        assert_eq!(format!("{err}"), "vessel D is not under way");
        let err = moored.race(&running).unwrap_err();
        assert_eq!(format!("{err}"), "vessel D is not under way");
    }

    #[test]
    fn race_outcome_renders_description() {
        let outcome = RaceOutcome::Winner {
            winner: "Beta".to_string(),
            loser: "Alpha".to_string(),
        };
        assert_eq!(outcome.to_string(), "Beta crossed the finish line first.");
    }

    #[test]
    fn display_reports_state() {
        let registry = FleetRegistry::new();
        let mut vessel = Vessel::new_in(&registry, "Alpha", 2, 4).expect("vessel");
        assert_eq!(
            vessel.to_string(),
            "{name: Alpha, masts: 2, crew: 0, sailing: not sailing, hours sailed: 0.00}"
        );

        vessel.start_voyage(10, "running", "Jane", 2).expect("start");
        assert_eq!(
            vessel.to_string(),
            "{name: Alpha, masts: 2, crew: 2, sailing: under skipper Jane on heading running at 10 knots, hours sailed: 0.00}"
        );

        vessel.end_voyage(45).expect("end");
        assert!(vessel.to_string().ends_with("hours sailed: 0.75}"));
    }

    #[test]
    fn global_registry_counts_default_constructor() {
        let before = FleetRegistry::global().total_vessels();
        let vessel = Vessel::with_defaults().expect("default vessel");
        assert_eq!(vessel.name(), format!("Vessel {}", before + 1));
        assert_eq!(FleetRegistry::global().total_vessels(), before + 1);
        assert!(std::sync::Arc::ptr_eq(vessel.registry(), FleetRegistry::global()));
    }
}
