//! Behaviour test: a falling actor lands flush on a wide solid.

#[path = "support/thread_safe_sim.rs"]
mod thread_safe_sim;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use bevy::prelude::*;
use coyote::components::{OnGround, Position, Velocity};
use rspec_runner::run_serial;
use test_utils::{fresh_simulation, spawn_test_actor, spawn_test_solid, ScriptedInput};
use thread_safe_sim::{lock_sim, share, SharedSim};

#[derive(Debug, Clone)]
struct LandingWorld {
    sim: SharedSim,
    actor: Entity,
}

impl LandingWorld {
    fn bootstrap() -> Self {
        let mut sim = fresh_simulation();
        let world = sim.world_mut();
        spawn_test_solid(world, (0, 64), (1000, 16));
        let actor = spawn_test_actor(world, (0, 0), (16, 16), (0, 500));
        Self {
            sim: share(sim),
            actor,
        }
    }

    fn run(&self, ticks: u32) {
        let mut sim = lock_sim(&self.sim);
        for _ in 0..ticks {
            sim.step(&ScriptedInput::idle());
        }
    }

    fn position(&self) -> Position {
        let sim = lock_sim(&self.sim);
        *sim.world()
            .get::<Position>(self.actor)
            .expect("actor has a position")
    }

    fn velocity(&self) -> Velocity {
        let sim = lock_sim(&self.sim);
        *sim.world()
            .get::<Velocity>(self.actor)
            .expect("actor has a velocity")
    }

    fn grounded(&self) -> bool {
        let sim = lock_sim(&self.sim);
        sim.world().get::<OnGround>(self.actor).is_some()
    }
}

#[test]
fn falling_actor_lands_flush() {
    run_serial(&rspec::given(
        "an actor falling at 500 units/s toward a wide solid",
        LandingWorld::bootstrap(),
        |ctx| {
            ctx.when("two ticks pass", |ctx| {
                ctx.before_all(|world| world.run(2));

                ctx.then("it is still airborne and falling", |world| {
                    assert_eq!(world.position(), Position::new(0, 16));
                    assert_eq!(world.velocity(), Velocity::new(0, 500));
                    assert!(!world.grounded());
                });
            });

            ctx.when("enough ticks pass to reach the solid", |ctx| {
                ctx.before_all(|world| world.run(8));

                ctx.then("its bottom edge is flush with the solid's top", |world| {
                    assert_eq!(world.position().y + 16, 64 - 16);
                });

                ctx.then("its vertical velocity is zero", |world| {
                    assert_eq!(world.velocity().y, 0);
                });

                ctx.then("it reports ground contact", |world| {
                    assert!(world.grounded());
                });
            });
        },
    ));
}
