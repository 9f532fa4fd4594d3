//! Headless harness around the platformer [`App`].
//!
//! [`Simulation`] is what the demo binary and the behaviour tests drive. It
//! samples an [`InputSource`] once per call, then lets the fixed-timestep
//! clock decide how many ticks to run.

use bevy::prelude::*;

use crate::clock::{FixedTimestep, FrameDelta};
use crate::config::{InputBindings, SimulationConfig};
use crate::error::SetupError;
use crate::input::{InputSource, PlayerInput};
use crate::plugin::{FixedTick, PlatformerPlugin};
use crate::spawn_world::{describe_level, spawn_level, LevelDescriptor};

/// A platformer world with its schedules installed.
pub struct Simulation {
    app: App,
}

impl Simulation {
    /// Builds a simulation from a validated configuration.
    ///
    /// # Errors
    /// Returns the first problem found by [`SimulationConfig::validate`].
    pub fn new(config: SimulationConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let mut app = App::new();
        app.add_plugins(PlatformerPlugin { config });
        app.finish();
        app.cleanup();
        Ok(Self { app })
    }

    /// Read access to the entity store.
    #[must_use]
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Write access to the entity store.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Spawns `level` and returns the player entity.
    ///
    /// # Errors
    /// Propagates descriptor validation failures.
    pub fn spawn_level(&mut self, level: &LevelDescriptor) -> Result<Entity, SetupError> {
        spawn_level(self.world_mut(), level)
    }

    /// Snapshot of the current world as a level descriptor.
    pub fn describe_level(&mut self) -> Option<LevelDescriptor> {
        describe_level(self.world_mut())
    }

    /// Samples `input`, adds `frame_delta` to the clock and runs every tick
    /// it pays for. Returns the number of ticks run.
    pub fn advance<S>(&mut self, frame_delta: f64, input: &S) -> u32
    where
        S: InputSource + ?Sized,
    {
        self.sample(input);
        let before = self.ticks();
        self.world_mut().resource_mut::<FrameDelta>().0 = frame_delta;
        self.app.update();
        u32::try_from(self.ticks() - before).unwrap_or(u32::MAX)
    }

    /// Samples `input` and runs exactly one tick, ignoring the accumulator.
    pub fn step<S>(&mut self, input: &S)
    where
        S: InputSource + ?Sized,
    {
        self.sample(input);
        let world = self.world_mut();
        world.resource_mut::<FixedTimestep>().begin_tick();
        world.run_schedule(FixedTick);
    }

    /// Simulated time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.world().resource::<FixedTimestep>().elapsed
    }

    /// Ticks run since creation.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.world().resource::<FixedTimestep>().ticks
    }

    /// Stops or resumes the accumulation of frame time.
    pub fn set_paused(&mut self, paused: bool) {
        self.world_mut().resource_mut::<FixedTimestep>().paused = paused;
    }

    fn sample<S>(&mut self, source: &S)
    where
        S: InputSource + ?Sized,
    {
        let world = self.world_mut();
        let now = world.resource::<FixedTimestep>().elapsed;
        world.resource_scope(|world, mut input: Mut<PlayerInput>| {
            input.sample(world.resource::<InputBindings>(), source, now);
        });
    }
}
