//! Character switching through the full tick.

use bevy::prelude::*;
use coyote::components::{
    CollisionBounds, Glide, MultiJump, OnGround, Position, Sprite, SpriteColor, Velocity,
};
use coyote::numeric::displacement;
use coyote::walk::walk_velocity;
use coyote::{CharacterKind, InputCode, PlayerCharacters, Simulation, DEFAULT_TIMESTEP};
use rstest::{fixture, rstest};
use test_utils::{floor_level, fresh_simulation, resting_y, ScriptedInput};

fn current(sim: &Simulation, player: Entity) -> Option<CharacterKind> {
    sim.world()
        .get::<PlayerCharacters>(player)
        .and_then(PlayerCharacters::current)
}

struct Airborne {
    sim: Simulation,
    player: Entity,
}

#[fixture]
fn airborne() -> Airborne {
    let mut sim = fresh_simulation();
    let level = floor_level(1000, &CharacterKind::ALL, 0, -400);
    let player = sim.spawn_level(&level).expect("valid level");
    Airborne { sim, player }
}

#[rstest]
fn requests_inside_cooldown_switch_once(airborne: Airborne) {
    let Airborne { mut sim, player } = airborne;
    let press = ScriptedInput::idle().pressing(InputCode::Z);

    sim.step(&press);
    for _ in 0..5 {
        sim.step(&ScriptedInput::idle());
    }
    // Six ticks after the first press: 0.1 s at 60 Hz.
    sim.step(&press);

    assert_eq!(current(&sim, player), Some(CharacterKind::Avian));
}

#[rstest]
fn switching_after_cooldown_advances_again(airborne: Airborne) {
    let Airborne { mut sim, player } = airborne;
    let press = ScriptedInput::idle().pressing(InputCode::Z);

    sim.step(&press);
    for _ in 0..30 {
        sim.step(&ScriptedInput::idle());
    }
    sim.step(&press);

    assert_eq!(current(&sim, player), Some(CharacterKind::Celeste));
}

#[rstest]
fn mid_air_switch_keeps_momentum(airborne: Airborne) {
    let Airborne { mut sim, player } = airborne;
    for _ in 0..10 {
        sim.step(&ScriptedInput::idle().holding(InputCode::L));
    }
    let before_pos = *sim.world().get::<Position>(player).expect("position");
    let before_vel = *sim.world().get::<Velocity>(player).expect("velocity");
    assert!(before_vel.x > 0 && before_vel.y > 0);

    sim.step(&ScriptedInput::idle().pressing(InputCode::Z));

    let world = sim.world();
    assert_eq!(current(&sim, player), Some(CharacterKind::Avian));
    assert!(world.get::<Glide>(player).is_some());
    assert_eq!(world.get::<MultiJump>(player), Some(&MultiJump { max_jumps: 2 }));
    assert_eq!(
        world.get::<CollisionBounds>(player),
        Some(&CollisionBounds::new(20, 36))
    );
    assert_eq!(
        world.get::<Sprite>(player).map(|s| s.color),
        Some(SpriteColor::Green)
    );

    // The carried velocity is decelerated with the new character's tuning.
    let avian = CharacterKind::Avian.profile();
    let vx = walk_velocity(before_vel.x, 0, &avian.walk, DEFAULT_TIMESTEP);
    let velocity = world.get::<Velocity>(player).expect("velocity");
    let position = world.get::<Position>(player).expect("position");
    assert_eq!(velocity.x, vx);
    assert_eq!(position.x, before_pos.x + displacement(vx, DEFAULT_TIMESTEP));
    assert!(position.y > before_pos.y, "still falling after the switch");
}

fn settle_then_switch(roster: &[CharacterKind], half_height: i32) -> (Simulation, Entity) {
    let mut sim = fresh_simulation();
    let level = floor_level(1000, roster, 0, resting_y(half_height));
    let player = sim.spawn_level(&level).expect("valid level");
    for _ in 0..3 {
        sim.step(&ScriptedInput::idle());
    }
    assert!(sim.world().get::<OnGround>(player).is_some());
    sim.step(&ScriptedInput::idle().pressing(InputCode::Z));
    (sim, player)
}

fn position(sim: &Simulation, player: Entity) -> Position {
    *sim.world().get::<Position>(player).expect("position")
}

#[rstest]
fn grounded_switch_to_taller_character_stays_in_place() {
    let (mut sim, player) = settle_then_switch(&[CharacterKind::Base, CharacterKind::Avian], 32);
    assert_eq!(current(&sim, player), Some(CharacterKind::Avian));
    assert_eq!(position(&sim, player), Position::new(0, resting_y(36)));

    for _ in 0..10 {
        sim.step(&ScriptedInput::idle());
    }
    assert_eq!(position(&sim, player), Position::new(0, resting_y(36)));
    assert!(sim.world().get::<OnGround>(player).is_some());
}

#[rstest]
fn grounded_switch_to_shorter_character_drops_back_onto_the_floor() {
    let (mut sim, player) = settle_then_switch(&[CharacterKind::Avian, CharacterKind::Base], 36);
    assert_eq!(current(&sim, player), Some(CharacterKind::Base));

    for _ in 0..15 {
        sim.step(&ScriptedInput::idle());
    }
    assert_eq!(position(&sim, player), Position::new(0, resting_y(32)));
    assert!(sim.world().get::<OnGround>(player).is_some());
}
