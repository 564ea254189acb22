//! World state: the ship, the live enemies, and what is pending removal
//!
//! Every entity is a paired (body, node) record so the physics world and the
//! display tree can never drift out of alignment with each other.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::physics::{BodyDef, BodyId, PhysicsWorld, Shape};
use crate::consts::*;
use crate::scene::{
    NodeId, Stage, boundary_shapes, enemy_shapes, ship_shapes, starfield_shapes,
};

/// The player's ship: one body, one sprite, alive for the whole run
#[derive(Debug, Clone, Copy)]
pub struct Ship {
    pub body: BodyId,
    pub node: NodeId,
}

/// A drifting enemy: one sensor body paired with one sprite
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub body: BodyId,
    pub node: NodeId,
}

/// The three explosion sound variants, one chosen at random per kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionSound {
    Crunch,
    Burst,
    Rumble,
}

/// Complete game state, mutated only by the frame update phases
#[derive(Debug)]
pub struct World {
    pub physics: PhysicsWorld,
    pub stage: Stage,
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    /// Bodies observed in contact with the ship this frame; may hold
    /// duplicates, cleared by the reap phase
    pub pending_removal: Vec<BodyId>,
    /// Ticks until the next enemy spawns
    pub spawn_countdown: u32,
    pub time_ticks: u64,
    rng: Pcg32,
}

impl World {
    /// Build the scene and physics world: starfield behind everything,
    /// boundary walls, then the ship centered in the arena.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut stage = Stage::new();
        stage.add_child(starfield_shapes(&mut rng));
        stage.add_child(boundary_shapes());

        let mut physics = PhysicsWorld::new();
        let center = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0);
        let ship_body = physics.add_body(BodyDef {
            pos: center,
            shape: Shape::Rect {
                width: SHIP_WIDTH,
                height: SHIP_HEIGHT,
            },
            ..Default::default()
        });

        let ship_node = stage.add_child(ship_shapes());
        if let Some(node) = stage.node_mut(ship_node) {
            node.x = center.x;
            node.y = center.y;
        }

        Self {
            physics,
            stage,
            ship: Ship {
                body: ship_body,
                node: ship_node,
            },
            enemies: Vec::new(),
            pending_removal: Vec::new(),
            spawn_countdown: SPAWN_INTERVAL_TICKS,
            time_ticks: 0,
            rng,
        }
    }

    /// Create one enemy with uniform random position, drift velocity, and
    /// spin, appending the paired record. There is no cap on enemy count.
    pub fn spawn_enemy(&mut self) {
        let pos = Vec2::new(
            self.rng.random_range(0.0..ARENA_WIDTH),
            self.rng.random_range(0.0..ARENA_HEIGHT),
        );
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * ENEMY_SPEED,
            (self.rng.random::<f32>() - 0.5) * ENEMY_SPEED,
        );
        let angular_vel = (self.rng.random::<f32>() - 0.5) * ENEMY_SPEED;

        let body = self.physics.add_body(BodyDef {
            pos,
            vel,
            angular_vel,
            shape: Shape::Circle {
                radius: ENEMY_RADIUS,
                sensor: true,
            },
            ..Default::default()
        });

        let node = self.stage.add_child(enemy_shapes());
        if let Some(n) = self.stage.node_mut(node) {
            n.x = pos.x;
            n.y = pos.y;
        }

        self.enemies.push(Enemy { body, node });
    }

    /// Index of the enemy owning `body`, if it is still alive
    pub fn enemy_index(&self, body: BodyId) -> Option<usize> {
        self.enemies.iter().position(|e| e.body == body)
    }

    /// Uniformly pick one of the three explosion variants
    pub fn random_explosion(&mut self) -> ExplosionSound {
        match self.rng.random_range(0..3u8) {
            0 => ExplosionSound::Crunch,
            1 => ExplosionSound::Burst,
            _ => ExplosionSound::Rumble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_has_ship_centered() {
        let world = World::new(1);
        let ship = world.physics.body(world.ship.body).unwrap();
        assert_eq!(ship.pos, Vec2::new(640.0, 360.0));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert!(world.enemies.is_empty());
        // Starfield, walls, ship
        assert_eq!(world.stage.len(), 3);
    }

    #[test]
    fn test_spawn_enemy_pairs_body_and_node() {
        let mut world = World::new(2);
        let base_nodes = world.stage.len();

        world.spawn_enemy();
        world.spawn_enemy();

        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.stage.len(), base_nodes + 2);
        for enemy in &world.enemies {
            let body = world.physics.body(enemy.body).unwrap();
            assert!(world.stage.contains(enemy.node));
            assert!(body.pos.x >= 0.0 && body.pos.x <= ARENA_WIDTH);
            assert!(body.vel.x.abs() <= ENEMY_SPEED / 2.0);
            assert!(body.vel.y.abs() <= ENEMY_SPEED / 2.0);
        }
    }

    #[test]
    fn test_same_seed_spawns_identically() {
        let mut a = World::new(77);
        let mut b = World::new(77);
        a.spawn_enemy();
        b.spawn_enemy();

        let pa = a.physics.body(a.enemies[0].body).unwrap().pos;
        let pb = b.physics.body(b.enemies[0].body).unwrap().pos;
        assert_eq!(pa, pb);
    }
}
