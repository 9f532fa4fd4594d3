//! Simulation configuration.
//!
//! Loaded by the binary from JSON; library users build it in code or take
//! [`SimulationConfig::default`].

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::DEFAULT_TIMESTEP;

/// Opaque device input code. The values of the associated constants follow
/// the ASCII-based key numbering used by common windowing libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputCode(pub u32);

impl InputCode {
    /// Space bar.
    pub const SPACE: Self = Self(32);
    /// Letter C.
    pub const C: Self = Self(67);
    /// Letter I.
    pub const I: Self = Self(73);
    /// Letter J.
    pub const J: Self = Self(74);
    /// Letter K.
    pub const K: Self = Self(75);
    /// Letter L.
    pub const L: Self = Self(76);
    /// Letter X.
    pub const X: Self = Self(88);
    /// Letter Z.
    pub const Z: Self = Self(90);
}

/// Which input codes drive each player intent. Any code in a list counts.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    /// Aim/move up.
    pub up: Vec<InputCode>,
    /// Aim/move down.
    pub down: Vec<InputCode>,
    /// Walk left.
    pub left: Vec<InputCode>,
    /// Walk right.
    pub right: Vec<InputCode>,
    /// Jump.
    pub jump: Vec<InputCode>,
    /// First ability slot.
    pub ability_1: Vec<InputCode>,
    /// Second ability slot.
    pub ability_2: Vec<InputCode>,
    /// Cycle to the next character.
    pub switch_character: Vec<InputCode>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: vec![InputCode::I],
            down: vec![InputCode::K],
            left: vec![InputCode::J],
            right: vec![InputCode::L],
            jump: vec![InputCode::SPACE],
            ability_1: vec![InputCode::C],
            ability_2: vec![InputCode::X],
            switch_character: vec![InputCode::Z],
        }
    }
}

/// Top-level simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of one fixed tick in seconds.
    pub timestep: f64,
    /// Input code mapping.
    pub bindings: InputBindings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            bindings: InputBindings::default(),
        }
    }
}

impl SimulationConfig {
    /// Checks the configuration for programmer errors.
    ///
    /// # Errors
    /// Returns [`SetupError::NonPositiveTimestep`] if the timestep is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.timestep.is_finite() && self.timestep > 0.0 {
            Ok(())
        } else {
            Err(SetupError::NonPositiveTimestep(self.timestep))
        }
    }
}
