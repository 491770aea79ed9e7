//! A sailing school: the vessels it commissioned and their shared registry.

use std::sync::Arc;

use crate::error::{RegattaError, Result};
use crate::registry::{FleetRegistry, FleetStats};
use crate::report::FleetReport;
use crate::vessel::{RaceOutcome, Vessel};

/// Owns a fleet of uniquely named vessels.
#[derive(Debug)]
pub struct SailingSchool {
    registry: Arc<FleetRegistry>,
    vessels: Vec<Vessel>,
}

impl Default for SailingSchool {
    fn default() -> Self {
        Self::new(FleetRegistry::new())
    }
}

impl SailingSchool {
    /// Create a school whose vessels report to `registry`.
    pub fn new(registry: Arc<FleetRegistry>) -> Self {
        Self {
            registry,
            vessels: Vec::new(),
        }
    }

    /// Registry shared by this school's vessels.
    pub fn registry(&self) -> &Arc<FleetRegistry> {
        &self.registry
    }

    /// Current registry counters.
    pub fn stats(&self) -> FleetStats {
        self.registry.snapshot()
    }

    /// Vessels in commissioning order.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// Look up a vessel by name.
    pub fn vessel(&self, name: &str) -> Option<&Vessel> {
        self.vessels.iter().find(|vessel| vessel.name() == name)
    }

    /// Look up a vessel by name for a transition.
    pub fn vessel_mut(&mut self, name: &str) -> Option<&mut Vessel> {
        self.vessels.iter_mut().find(|vessel| vessel.name() == name)
    }

    /// Like [`SailingSchool::vessel_mut`], failing with `MissingValue`.
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Vessel> {
        self.vessel_mut(name)
            .ok_or_else(|| RegattaError::MissingValue(format!("no vessel named {name}")))
    }

    /// Commission a named vessel.
    ///
    /// Names are unique within a school; a duplicate is rejected before the
    /// registry is touched.
    pub fn commission(&mut self, name: &str, masts: u8, max_crew: u32) -> Result<&Vessel> {
        self.ensure_unique(name)?;
        let vessel = Vessel::new_in(&self.registry, name, masts, max_crew)?;
        Ok(self.enlist(vessel))
    }

    /// Commission a default-named vessel.
    ///
    /// The generated name is checked against the school while its hull
    /// number is reserved, so another commission on a shared registry cannot
    /// slip in between.
    pub fn commission_default(&mut self) -> Result<&Vessel> {
        let vessel = Vessel::default_in(&self.registry, |name| self.ensure_unique(name))?;
        Ok(self.enlist(vessel))
    }

    /// Commission `count` default vessels and return them.
    ///
    /// A size outside the flotilla bounds or any clashing name fails the
    /// whole batch with `InvalidArgument`.
    pub fn commission_flotilla(&mut self, count: usize) -> Result<&[Vessel]> {
        let flotilla =
            Vessel::default_flotilla_in(&self.registry, count, |name| self.ensure_unique(name))?;
        let start = self.vessels.len();
        self.vessels.extend(flotilla);
        Ok(&self.vessels[start..])
    }

    /// Race two vessels of this school by name.
    pub fn race(&self, challenger: &str, rival: &str) -> Result<RaceOutcome> {
        let challenger = self
            .vessel(challenger)
            .ok_or_else(|| RegattaError::MissingValue(format!("no vessel named {challenger}")))?;
        let rival = self
            .vessel(rival)
            .ok_or_else(|| RegattaError::MissingValue(format!("no vessel named {rival}")))?;
        challenger.race(rival)
    }

    /// Snapshot of every vessel and the registry counters.
    pub fn report(&self) -> FleetReport {
        FleetReport::new(&self.vessels, self.stats())
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.vessel(name).is_some() {
            return Err(RegattaError::InvalidArgument(format!(
                "vessel name {name} is already in use"
            )));
        }
        Ok(())
    }

    fn enlist(&mut self, vessel: Vessel) -> &Vessel {
        self.vessels.push(vessel);
        &self.vessels[self.vessels.len() - 1]
    }
}
