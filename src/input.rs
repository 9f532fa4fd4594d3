//! Player intent sampling.
//!
//! Device polling is a collaborator behind [`InputSource`]. Sampling happens
//! once per rendered frame and may be followed by zero or more fixed ticks,
//! so edge-triggered intents are latched until [`reset_edge_flags`] clears
//! them at the end of a tick. Level-triggered intents are overwritten on
//! every sample.

use bevy::prelude::*;
use hashbrown::HashSet;

use crate::clock::FixedTimestep;
use crate::config::{InputBindings, InputCode};

/// Device state queried by the sampler.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// True if any of `codes` is currently held.
    fn any_held(&self, codes: &[InputCode]) -> bool;
    /// True if any of `codes` went down this frame.
    fn any_pressed(&self, codes: &[InputCode]) -> bool;
}

/// Edge and level state of one ability button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbilityButton {
    /// Went down since the last tick.
    pub pressed: bool,
    /// Currently held.
    pub held: bool,
    /// Went up since the last tick.
    pub released: bool,
}

/// Per-player intents shared by the fixed-tick systems.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct PlayerInput {
    /// `right - left`.
    pub x_dir: i32,
    /// `down - up`, matching the +y-down world.
    pub y_dir: i32,
    /// Jump currently held.
    pub jump_held: bool,
    /// Jump went down since the last tick.
    pub jump_pressed: bool,
    /// Simulation time of the most recent unconsumed jump press.
    pub time_jump_pressed: Option<f64>,
    /// The two ability slots' buttons.
    pub abilities: [AbilityButton; 2],
    /// Character switch went down since the last tick.
    pub switch_pressed: bool,
}

impl PlayerInput {
    /// Folds one frame of device state into the latched intents.
    pub fn sample<S>(&mut self, bindings: &InputBindings, source: &S, now: f64)
    where
        S: InputSource + ?Sized,
    {
        self.x_dir = axis(source, &bindings.left, &bindings.right);
        self.y_dir = axis(source, &bindings.up, &bindings.down);

        self.jump_held = source.any_held(&bindings.jump);
        if source.any_pressed(&bindings.jump) {
            self.jump_pressed = true;
            self.time_jump_pressed = Some(now);
        }

        let slots = [&bindings.ability_1, &bindings.ability_2];
        for (button, codes) in self.abilities.iter_mut().zip(slots) {
            let held = source.any_held(codes);
            button.pressed |= source.any_pressed(codes);
            button.released |= button.held && !held;
            button.held = held;
        }

        self.switch_pressed |= source.any_pressed(&bindings.switch_character);
    }

    /// Clears every edge-triggered intent.
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.switch_pressed = false;
        for button in &mut self.abilities {
            button.pressed = false;
            button.released = false;
        }
    }
}

fn axis<S>(source: &S, negative: &[InputCode], positive: &[InputCode]) -> i32
where
    S: InputSource + ?Sized,
{
    i32::from(source.any_held(positive)) - i32::from(source.any_held(negative))
}

/// Raw device state pushed by a host that does its own polling.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    held: HashSet<InputCode>,
    pressed: HashSet<InputCode>,
}

impl FrameInput {
    /// Marks `code` as newly pressed and held.
    pub fn press(&mut self, code: InputCode) {
        self.pressed.insert(code);
        self.held.insert(code);
    }

    /// Marks `code` as no longer held.
    pub fn release(&mut self, code: InputCode) {
        self.held.remove(&code);
        self.pressed.remove(&code);
    }

    /// Forgets this frame's presses; held codes stay held.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for FrameInput {
    fn any_held(&self, codes: &[InputCode]) -> bool {
        codes.iter().any(|code| self.held.contains(code))
    }

    fn any_pressed(&self, codes: &[InputCode]) -> bool {
        codes.iter().any(|code| self.pressed.contains(code))
    }
}

/// Samples [`FrameInput`] into [`PlayerInput`] once per frame.
pub fn sample_frame_input(
    mut frame: ResMut<FrameInput>,
    bindings: Res<InputBindings>,
    clock: Res<FixedTimestep>,
    mut input: ResMut<PlayerInput>,
) {
    input.sample(&bindings, &*frame, clock.elapsed);
    frame.end_frame();
}

/// End-of-tick step clearing edge-triggered intents exactly once.
pub fn reset_edge_flags(mut input: ResMut<PlayerInput>) {
    input.clear_edges();
}
