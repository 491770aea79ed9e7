//! Fleet-wide counters shared by every vessel of a school.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Point-in-time copy of the fleet counters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    /// Vessels ever commissioned.
    pub total_vessels: u64,
    /// Vessels currently under way.
    pub vessels_under_way: u64,
    /// Minutes sailed across all completed voyages.
    pub total_fleet_minutes: f64,
}

/// Guarded fleet counters.
///
/// Counters only change as a side effect of vessel transitions; each update
/// happens inside a single critical section.
#[derive(Debug, Default)]
pub struct FleetRegistry {
    stats: Mutex<FleetStats>,
}

impl FleetRegistry {
    /// Create an independent registry with every counter at zero.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The process-wide registry, created on first use and never reset.
    pub fn global() -> &'static Arc<FleetRegistry> {
        static GLOBAL: OnceLock<Arc<FleetRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(FleetRegistry::new)
    }

    /// Count of vessels ever commissioned.
    pub fn total_vessels(&self) -> u64 {
        self.lock().total_vessels
    }

    /// Count of vessels currently under way.
    pub fn vessels_under_way(&self) -> u64 {
        self.lock().vessels_under_way
    }

    /// Minutes sailed by the whole fleet.
    pub fn total_fleet_minutes(&self) -> f64 {
        self.lock().total_fleet_minutes
    }

    /// Copy of all three counters taken under one lock.
    pub fn snapshot(&self) -> FleetStats {
        *self.lock()
    }

    /// Reserve the next hull number and build a vessel with it.
    ///
    /// `total_vessels` only grows when `build` succeeds.
    pub(crate) fn commission<T>(&self, build: impl FnOnce(u64) -> Result<T>) -> Result<T> {
        let mut stats = self.lock();
        let built = build(stats.total_vessels + 1)?;
        stats.total_vessels += 1;
        Ok(built)
    }

    /// Reserve `count` consecutive hull numbers and build one vessel per
    /// number, all under one lock.
    ///
    /// Nothing is counted unless every build succeeds.
    pub(crate) fn commission_batch<T>(
        &self,
        count: usize,
        build: impl FnMut(u64) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut stats = self.lock();
        let first = stats.total_vessels + 1;
        let built = (first..)
            .take(count)
            .map(build)
            .collect::<Result<Vec<T>>>()?;
        stats.total_vessels += built.len() as u64;
        Ok(built)
    }

    pub(crate) fn record_departure(&self) {
        let mut stats = self.lock();
        stats.vessels_under_way += 1;
        debug_assert!(stats.vessels_under_way <= stats.total_vessels);
    }

    pub(crate) fn record_return(&self, minutes: u32) {
        let mut stats = self.lock();
        debug_assert!(stats.vessels_under_way > 0, "return without a departure");
        stats.vessels_under_way = stats.vessels_under_way.saturating_sub(1);
        stats.total_fleet_minutes += f64::from(minutes);
    }

    fn lock(&self) -> MutexGuard<'_, FleetStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
