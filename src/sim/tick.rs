//! Fixed timestep frame update
//!
//! One call to [`tick`] runs the ordered per-frame phases: spawn, apply
//! intents, step physics, observe contacts, sync sprites, wrap the ship,
//! reap contacted enemies. Rendering and frame scheduling stay in the
//! platform layer; the sim reports what happened through [`FrameEvent`]s.

use crate::consts::*;
use crate::thrust_direction;

use super::world::{ExplosionSound, World};

/// Input intents for a single tick. Held booleans, set and cleared by the
/// platform's key handlers; the updater reads them without resetting.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
}

/// Something the platform layer should react to after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    EnemyDestroyed { sound: ExplosionSound },
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> Vec<FrameEvent> {
    world.time_ticks += 1;

    run_spawner(world);
    apply_intents(world, input);
    world.physics.step(dt);
    observe_contacts(world);
    sync_visuals(world);
    wrap_ship(world);
    reap_removed(world)
}

/// Spawn one enemy each time the countdown elapses
fn run_spawner(world: &mut World) {
    world.spawn_countdown -= 1;
    if world.spawn_countdown == 0 {
        world.spawn_enemy();
        world.spawn_countdown = SPAWN_INTERVAL_TICKS;
    }
}

/// Turn intents set the angular velocity directly; the thrust intent adds
/// force along the nose for this step only (forces clear after each step).
fn apply_intents(world: &mut World, input: &TickInput) {
    let Some(ship) = world.physics.body_mut(world.ship.body) else {
        return;
    };

    ship.angular_vel = if input.turn_left {
        -SHIP_TURN_SPEED
    } else if input.turn_right {
        SHIP_TURN_SPEED
    } else {
        0.0
    };

    if input.thrust {
        ship.force += SHIP_SPEED * thrust_direction(ship.angle);
    }
}

/// The collision observer: any contact pair involving the ship queues the
/// other body for removal. Removal is deferred to the reap phase so the
/// physics world is never mutated while its contacts are being read, and
/// duplicates are allowed through (reaping tolerates them).
fn observe_contacts(world: &mut World) {
    let ship = world.ship.body;
    for i in 0..world.physics.contacts().len() {
        let contact = world.physics.contacts()[i];
        let other = if contact.b == ship {
            Some(contact.a)
        } else if contact.a == ship {
            Some(contact.b)
        } else {
            None
        };
        if let Some(body) = other {
            world.pending_removal.push(body);
        }
    }
}

/// Copy simulated transforms into the paired sprites
fn sync_visuals(world: &mut World) {
    if let Some(body) = world.physics.body(world.ship.body) {
        let (pos, angle) = (body.pos, body.angle);
        if let Some(node) = world.stage.node_mut(world.ship.node) {
            node.x = pos.x;
            node.y = pos.y;
            node.rotation = angle;
        }
    }

    for i in 0..world.enemies.len() {
        let enemy = world.enemies[i];
        if let Some(body) = world.physics.body(enemy.body) {
            let (pos, angle) = (body.pos, body.angle);
            if let Some(node) = world.stage.node_mut(enemy.node) {
                node.x = pos.x;
                node.y = pos.y;
                node.rotation = angle;
            }
        }
    }
}

/// Toroidal wraparound for the ship only; enemies drift off-arena freely.
/// A coordinate at the far edge teleports to the near edge in the same
/// frame, and the sprite is re-synced so it mirrors the teleported body.
fn wrap_ship(world: &mut World) {
    let Some(body) = world.physics.body_mut(world.ship.body) else {
        return;
    };

    let mut wrapped = false;
    if body.pos.x >= ARENA_WIDTH {
        body.pos.x = 0.0;
        wrapped = true;
    } else if body.pos.x < 0.0 {
        body.pos.x = ARENA_WIDTH;
        wrapped = true;
    }
    if body.pos.y >= ARENA_HEIGHT {
        body.pos.y = 0.0;
        wrapped = true;
    } else if body.pos.y < 0.0 {
        body.pos.y = ARENA_HEIGHT;
        wrapped = true;
    }

    if wrapped {
        let pos = body.pos;
        if let Some(node) = world.stage.node_mut(world.ship.node) {
            node.x = pos.x;
            node.y = pos.y;
        }
    }
}

/// Remove every queued body from the physics world, the enemy list, and the
/// stage in lockstep. Entries whose enemy is already gone (duplicate contact
/// events for one pair) fall through without effect.
fn reap_removed(world: &mut World) -> Vec<FrameEvent> {
    let pending = std::mem::take(&mut world.pending_removal);
    let mut events = Vec::new();

    for body in pending {
        world.physics.remove_body(body);
        let Some(index) = world.enemy_index(body) else {
            continue;
        };
        let enemy = world.enemies.remove(index);
        world.stage.remove_child(enemy.node);
        events.push(FrameEvent::EnemyDestroyed {
            sound: world.random_explosion(),
        });
    }

    events
}
