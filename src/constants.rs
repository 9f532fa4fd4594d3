//! Tuning constants shared by the simulation systems.
//!
//! Lengths are whole world units, speeds are units per second and times are
//! seconds of simulated (fixed-step) time.

/// Default fixed simulation step, in seconds.
pub const DEFAULT_TIMESTEP: f64 = 1.0 / 60.0;
/// Number of movement-and-resolve passes per fixed tick.
pub const SUB_STEPS: i32 = 4;
/// Extra half-extent given to contact probes on the axis under test.
pub const PROBE_MARGIN: i32 = 2;
/// Downward velocity applied to grounded actors so ground contact persists
/// from one tick to the next.
pub const GROUNDING_FORCE: i32 = 100;

/// Grace window after leaving the ground during which a jump is accepted.
pub const DEFAULT_COYOTE_TIME: f64 = 0.09;
/// Window before landing during which an early jump press is remembered.
pub const DEFAULT_JUMP_BUFFER: f64 = 0.1;
/// Gravity multiplier applied while rising after the jump input is released.
pub const DEFAULT_FALL_MULTIPLIER: f64 = 3.0;
/// Minimum time between two character switches.
pub const DEFAULT_SWITCH_COOLDOWN: f64 = 0.4;

/// Version string written into level descriptors.
pub const LEVEL_FORMAT_VERSION: &str = "0.01";
