//! Bevy plugin wiring the fixed tick into an [`App`].

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;
use log::trace;

use crate::ability::{dispatch_abilities, tick_dash};
use crate::character::handle_character_switch;
use crate::clock::{FixedTimestep, FrameDelta};
use crate::config::SimulationConfig;
use crate::contact::probe_contacts;
use crate::gravity::apply_gravity;
use crate::input::{reset_edge_flags, sample_frame_input, FrameInput, PlayerInput};
use crate::jump::{examine_contacts, handle_jump};
use crate::resolver::resolve_actor_motion;
use crate::walk::handle_walk;

/// Schedule holding one fixed simulation tick.
///
/// Run it with [`World::run_schedule`] after advancing [`FixedTimestep`];
/// [`PlatformerPlugin`] does both from `Update`.
#[derive(ScheduleLabel, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedTick;

/// Installs the simulation resources and the [`FixedTick`] schedule.
#[derive(Debug, Clone, Default)]
pub struct PlatformerPlugin {
    /// Timestep and input bindings.
    pub config: SimulationConfig,
}

impl Plugin for PlatformerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FixedTimestep::new(self.config.timestep))
            .insert_resource(self.config.bindings.clone())
            .init_resource::<PlayerInput>()
            .init_resource::<FrameDelta>();

        let mut tick = Schedule::new(FixedTick);
        tick.set_executor_kind(ExecutorKind::SingleThreaded);
        tick.add_systems(
            (
                probe_contacts,
                examine_contacts,
                handle_jump,
                dispatch_abilities,
                handle_character_switch,
                apply_gravity,
                handle_walk,
                resolve_actor_motion,
                tick_dash,
                reset_edge_flags,
            )
                .chain(),
        );
        app.add_schedule(tick);

        app.add_systems(
            Update,
            (
                sample_frame_input.run_if(resource_exists::<FrameInput>),
                run_fixed_ticks,
            )
                .chain(),
        );
    }
}

/// Feeds this frame's [`FrameDelta`] to the clock and runs every tick it
/// pays for.
pub fn run_fixed_ticks(world: &mut World) {
    let frame_delta = world.resource::<FrameDelta>().0;
    world.resource_mut::<FixedTimestep>().accumulate(frame_delta);

    let mut ran = 0_u32;
    while world.resource_mut::<FixedTimestep>().consume_tick() {
        world.run_schedule(FixedTick);
        ran += 1;
    }
    if ran > 1 {
        trace!("caught up {ran} ticks in one frame");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputBindings;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(PlatformerPlugin::default());
        assert!(app.world().contains_resource::<FixedTimestep>());
        assert!(app.world().contains_resource::<InputBindings>());
        assert!(app.world().contains_resource::<PlayerInput>());
    }

    #[rstest]
    #[case::no_time(0.0, 0)]
    #[case::one_tick(0.25, 1)]
    #[case::catch_up(0.8, 3)]
    fn frame_delta_buys_whole_ticks(#[case] delta: f64, #[case] expected: u64) {
        let mut app = App::new();
        app.add_plugins(PlatformerPlugin {
            config: SimulationConfig {
                timestep: 0.25,
                ..SimulationConfig::default()
            },
        });
        app.world_mut().resource_mut::<FrameDelta>().0 = delta;
        app.update();
        assert_eq!(app.world().resource::<FixedTimestep>().ticks, expected);
    }

    #[rstest]
    fn paused_clock_runs_no_ticks() {
        let mut app = App::new();
        app.add_plugins(PlatformerPlugin::default());
        app.world_mut().resource_mut::<FixedTimestep>().paused = true;
        app.world_mut().resource_mut::<FrameDelta>().0 = 1.0;
        app.update();
        assert_eq!(app.world().resource::<FixedTimestep>().ticks, 0);
    }
}
