//! Setup-time errors.
//!
//! The per-tick systems never fail; everything that can go wrong is a
//! configuration mistake caught when the simulation or an entity is built.

use thiserror::Error;

/// A programmer error detected while configuring or spawning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// A player was given no characters to choose from.
    #[error("player character list is empty")]
    EmptyCharacterList,
    /// The active character index does not address the character list.
    #[error("character index {index} out of range for {len} characters")]
    CharacterIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available characters.
        len: usize,
    },
    /// A box was given a zero or negative half extent.
    #[error("bounds must be positive, got {half_width}x{half_height}")]
    NonPositiveBounds {
        /// Offending half width.
        half_width: i32,
        /// Offending half height.
        half_height: i32,
    },
    /// The fixed timestep is zero, negative or not finite.
    #[error("fixed timestep must be positive and finite, got {0}")]
    NonPositiveTimestep(f64),
}
