//! Ability slots and their dispatcher.
//!
//! A character's moveset is two [`AbilitySlot`]s of plain function pointers.
//! The dispatcher knows nothing about any particular ability: it maps the
//! slot buttons' edges and levels onto the bound hooks. Hooks get the whole
//! world so they can touch whatever components their ability needs.

use bevy::prelude::*;
use glam::Vec2;
use log::debug;

use crate::clock::FixedTimestep;
use crate::components::{Dash, Glide, Player, Sprite, SpriteColor, Velocity, WalkSpeed};
use crate::input::{AbilityButton, PlayerInput};

/// Callback bound to an ability slot: `(world, dt, entity)`.
pub type AbilityHook = fn(&mut World, f64, Entity);

/// Hooks for one ability button. Unbound hooks are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbilitySlot {
    /// Runs on the tick the button goes down.
    pub pressed: Option<AbilityHook>,
    /// Runs every tick the button is held.
    pub held: Option<AbilityHook>,
    /// Runs on the tick the button goes up.
    pub released: Option<AbilityHook>,
}

impl AbilitySlot {
    /// A slot with no hooks bound.
    pub const EMPTY: Self = Self {
        pressed: None,
        held: None,
        released: None,
    };

    /// Invokes the hooks selected by `button`, in press, hold, release order.
    pub fn invoke(&self, world: &mut World, dt: f64, entity: Entity, button: AbilityButton) {
        let hooks = [
            (button.pressed, self.pressed),
            (button.held, self.held),
            (button.released, self.released),
        ];
        for (active, hook) in hooks {
            if let (true, Some(hook)) = (active, hook) {
                hook(world, dt, entity);
            }
        }
    }
}

/// The two ability slots of the active character.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AbilitySlots {
    /// Slot driven by the first ability button.
    pub primary: AbilitySlot,
    /// Slot driven by the second ability button.
    pub secondary: AbilitySlot,
}

/// Runs bound ability hooks for every player.
pub fn dispatch_abilities(world: &mut World) {
    let dt = world.resource::<FixedTimestep>().timestep;
    let buttons = world.resource::<PlayerInput>().abilities;
    let bound: Vec<(Entity, AbilitySlots)> = world
        .query_filtered::<(Entity, &AbilitySlots), With<Player>>()
        .iter(world)
        .map(|(entity, slots)| (entity, *slots))
        .collect();

    for (entity, slots) in bound {
        for (slot, button) in [slots.primary, slots.secondary].into_iter().zip(buttons) {
            slot.invoke(world, dt, entity, button);
        }
    }
}

/// Glide: marks the glide active while the button is held.
pub fn glide_held(world: &mut World, _dt: f64, entity: Entity) {
    if let Some(mut glide) = world.get_mut::<Glide>(entity) {
        glide.active = true;
    }
}

/// Glide: ends the glide when the button is released.
pub fn glide_released(world: &mut World, _dt: f64, entity: Entity) {
    if let Some(mut glide) = world.get_mut::<Glide>(entity) {
        glide.active = false;
    }
}

/// Direction of a dash for the given input axes; neutral input dashes right.
///
/// # Examples
/// ```
/// use coyote::ability::dash_velocity;
/// assert_eq!(dash_velocity(0, 0, 800), (800, 0));
/// assert_eq!(dash_velocity(0, -1, 800), (0, -800));
/// assert_eq!(dash_velocity(1, -1, 800), (566, -566));
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "Axes are -1..=1 and the result is bounded by the dash power."
)]
#[must_use]
pub fn dash_velocity(x_dir: i32, y_dir: i32, power: i32) -> (i32, i32) {
    let direction = Vec2::new(x_dir as f32, y_dir as f32)
        .try_normalize()
        .unwrap_or(Vec2::X);
    let scaled = direction * power as f32;
    (scaled.x.round() as i32, scaled.y.round() as i32)
}

/// Dash: bursts in the input direction if a charge and the cooldown allow.
pub fn dash_pressed(world: &mut World, _dt: f64, entity: Entity) {
    let (x_dir, y_dir) = {
        let input = world.resource::<PlayerInput>();
        (input.x_dir, input.y_dir)
    };
    let Some(mut dash) = world.get_mut::<Dash>(entity) else {
        return;
    };
    if dash.is_dashing() || dash.charges == 0 {
        return;
    }
    dash.cooldown = dash.cooldown_size;
    dash.charges -= 1;
    let power = dash.power;

    let (vx, vy) = dash_velocity(x_dir, y_dir, power);
    if let Some(mut velocity) = world.get_mut::<Velocity>(entity) {
        *velocity = Velocity::new(vx, vy);
    }
    if let Some(mut walk) = world.get_mut::<WalkSpeed>(entity) {
        walk.max_walk_speed = power;
    }
    if let Some(mut sprite) = world.get_mut::<Sprite>(entity) {
        sprite.color = SpriteColor::Blue;
    }
    debug!("{entity} dashed with velocity ({vx}, {vy})");
}

/// Runs dash cooldowns down and restores walk speed when one expires.
pub fn tick_dash(clock: Res<FixedTimestep>, mut dashers: Query<(&mut Dash, &mut WalkSpeed)>) {
    for (mut dash, mut walk) in &mut dashers {
        if !dash.is_dashing() {
            continue;
        }
        dash.cooldown -= clock.timestep;
        if !dash.is_dashing() {
            dash.cooldown = 0.0;
            walk.max_walk_speed = dash.default_max_walk_speed;
        }
    }
}
