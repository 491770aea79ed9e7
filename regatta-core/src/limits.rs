//! Domain limits and sentinel defaults for sailing-school vessels.

/// Fewest masts a vessel may carry.
pub const MIN_MASTS: u8 = 1;
/// Most masts a vessel may carry.
pub const MAX_MASTS: u8 = 4;
/// Slowest sailing speed in knots.
pub const MIN_SPEED_KNOTS: u32 = 2;
/// Fastest sailing speed in knots.
pub const MAX_SPEED_KNOTS: u32 = 30;
/// Smallest crew, not counting the skipper.
pub const MIN_CREW: u32 = 0;
/// Skipper reported while a vessel is in port.
pub const DEFAULT_SKIPPER: &str = "no skipper";
/// Heading reported while a vessel is in port.
pub const DEFAULT_HEADING: &str = "no heading";
/// Smallest flotilla the batch factory builds.
pub const MIN_FLOTILLA: usize = 1;
/// Largest flotilla the batch factory builds.
pub const MAX_FLOTILLA: usize = 10;
/// Minutes in an hour, used when reporting hours sailed.
pub const MINUTES_PER_HOUR: f64 = 60.0;
