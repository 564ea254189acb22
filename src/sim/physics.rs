//! Minimal rigid body world: integration, overlap tests, contact events
//!
//! Enemies are sensor shapes - they detect overlap with the ship but nothing
//! in this game ever bounces, so there is no collision response at all. The
//! world only integrates motion and reports which pairs began touching.

use glam::Vec2;

use crate::rotate_vec;

/// Stable handle for a body in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Collision shape attached to a body, centered on the body origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Oriented rectangle, rotates with the body angle
    Rect { width: f32, height: f32 },
    /// Circle; sensors overlap without any physical presence
    Circle { radius: f32, sensor: bool },
}

/// A rigid body with accumulated force, cleared after each step
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    /// Force accumulated since the last step
    pub force: Vec2,
    pub mass: f32,
    pub damping: f32,
    pub angular_damping: f32,
    pub shape: Shape,
}

/// Construction parameters for a body
#[derive(Debug, Clone)]
pub struct BodyDef {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    pub mass: f32,
    pub damping: f32,
    pub angular_damping: f32,
    pub shape: Shape,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            mass: 1.0,
            damping: 0.0,
            angular_damping: 0.0,
            shape: Shape::Circle {
                radius: 1.0,
                sensor: false,
            },
        }
    }
}

/// Two bodies began overlapping during the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: BodyId,
    pub b: BodyId,
}

/// The physics world: bodies plus the contacts from the latest step
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    bodies: Vec<Body>,
    contacts: Vec<ContactEvent>,
    /// Pairs overlapping as of the previous step, for begin-only events
    overlapping: Vec<(BodyId, BodyId)>,
    next_id: u32,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            pos: def.pos,
            vel: def.vel,
            angle: def.angle,
            angular_vel: def.angular_vel,
            force: Vec2::ZERO,
            mass: def.mass,
            damping: def.damping,
            angular_damping: def.angular_damping,
            shape: def.shape,
        });
        id
    }

    /// Remove a body. Returns false (and changes nothing) when it is
    /// already gone, so duplicate removal requests are harmless.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(index) = self.bodies.iter().position(|b| b.id == id) else {
            return false;
        };
        self.bodies.remove(index);
        self.overlapping.retain(|&(a, b)| a != id && b != id);
        true
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Contact-begin events recorded by the latest `step`
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Semi-implicit Euler: forces integrate into velocity first, then
    /// velocity into position. Accumulated forces are cleared afterward, so
    /// a force must be re-applied every step to persist. Damping follows the
    /// p2-style exponential form `v *= (1 - damping)^dt`.
    pub fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.vel += body.force / body.mass * dt;
            if body.damping > 0.0 {
                body.vel *= (1.0 - body.damping).powf(dt);
            }
            if body.angular_damping > 0.0 {
                body.angular_vel *= (1.0 - body.angular_damping).powf(dt);
            }
            body.pos += body.vel * dt;
            body.angle += body.angular_vel * dt;
            body.force = Vec2::ZERO;
        }

        self.detect_contacts();
    }

    /// Record begin events for pairs that were not overlapping last step
    fn detect_contacts(&mut self) {
        self.contacts.clear();
        let mut now_overlapping = Vec::new();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if !bodies_overlap(a, b) {
                    continue;
                }
                let pair = (a.id.min(b.id), a.id.max(b.id));
                if !self.overlapping.contains(&pair) {
                    self.contacts.push(ContactEvent { a: a.id, b: b.id });
                }
                now_overlapping.push(pair);
            }
        }

        self.overlapping = now_overlapping;
    }
}

fn bodies_overlap(a: &Body, b: &Body) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra, .. }, Shape::Circle { radius: rb, .. }) => {
            a.pos.distance_squared(b.pos) <= (ra + rb) * (ra + rb)
        }
        (Shape::Circle { radius, .. }, Shape::Rect { width, height }) => {
            circle_rect_overlap(a.pos, radius, b.pos, b.angle, width, height)
        }
        (Shape::Rect { width, height }, Shape::Circle { radius, .. }) => {
            circle_rect_overlap(b.pos, radius, a.pos, a.angle, width, height)
        }
        (Shape::Rect { .. }, Shape::Rect { .. }) => rect_rect_overlap(a, b),
    }
}

/// Circle vs oriented rectangle: closest-point test in the rectangle's frame
fn circle_rect_overlap(
    center: Vec2,
    radius: f32,
    rect_pos: Vec2,
    rect_angle: f32,
    width: f32,
    height: f32,
) -> bool {
    let local = rotate_vec(center - rect_pos, -rect_angle);
    let half = Vec2::new(width, height) * 0.5;
    let closest = local.clamp(-half, half);
    local.distance_squared(closest) <= radius * radius
}

/// Oriented rectangle pair via separating axis test
fn rect_rect_overlap(a: &Body, b: &Body) -> bool {
    let corners_a = rect_corners(a);
    let corners_b = rect_corners(b);

    let axes = [
        rotate_vec(Vec2::X, a.angle),
        rotate_vec(Vec2::Y, a.angle),
        rotate_vec(Vec2::X, b.angle),
        rotate_vec(Vec2::Y, b.angle),
    ];

    for axis in axes {
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);
        if max_a < min_b || max_b < min_a {
            return false;
        }
    }
    true
}

fn rect_corners(body: &Body) -> [Vec2; 4] {
    let Shape::Rect { width, height } = body.shape else {
        return [body.pos; 4];
    };
    let half = Vec2::new(width, height) * 0.5;
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| body.pos + rotate_vec(c, body.angle))
}

fn project(points: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for p in points {
        let d = p.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_def(pos: Vec2, radius: f32) -> BodyDef {
        BodyDef {
            pos,
            shape: Shape::Circle {
                radius,
                sensor: true,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_step_integrates_velocity() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(BodyDef {
            vel: Vec2::new(60.0, 0.0),
            ..circle_def(Vec2::ZERO, 5.0)
        });

        world.step(1.0 / 60.0);
        let body = world.body(id).unwrap();
        assert!((body.pos.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_force_cleared_after_step() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(circle_def(Vec2::ZERO, 5.0));

        world.body_mut(id).unwrap().force = Vec2::new(100.0, 0.0);
        world.step(1.0 / 60.0);

        let body = world.body(id).unwrap();
        assert_eq!(body.force, Vec2::ZERO);
        assert!(body.vel.x > 0.0);
    }

    #[test]
    fn test_zero_damping_preserves_velocity() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(BodyDef {
            vel: Vec2::new(50.0, -30.0),
            ..circle_def(Vec2::ZERO, 5.0)
        });

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let body = world.body(id).unwrap();
        assert_eq!(body.vel, Vec2::new(50.0, -30.0));
    }

    #[test]
    fn test_contact_begin_fires_once_while_touching() {
        let mut world = PhysicsWorld::new();
        world.add_body(circle_def(Vec2::ZERO, 10.0));
        world.add_body(circle_def(Vec2::new(5.0, 0.0), 10.0));

        world.step(1.0 / 60.0);
        assert_eq!(world.contacts().len(), 1);

        // Still overlapping next step - no new begin event
        world.step(1.0 / 60.0);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn test_contact_rebegins_after_separation() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(circle_def(Vec2::ZERO, 10.0));
        world.add_body(circle_def(Vec2::new(5.0, 0.0), 10.0));

        world.step(1.0 / 60.0);
        assert_eq!(world.contacts().len(), 1);

        world.body_mut(a).unwrap().pos = Vec2::new(500.0, 0.0);
        world.step(1.0 / 60.0);
        assert!(world.contacts().is_empty());

        world.body_mut(a).unwrap().pos = Vec2::new(5.0, 0.0);
        world.step(1.0 / 60.0);
        assert_eq!(world.contacts().len(), 1);
    }

    #[test]
    fn test_remove_missing_body_is_noop() {
        let mut world = PhysicsWorld::new();
        let id = world.add_body(circle_def(Vec2::ZERO, 5.0));
        assert!(world.remove_body(id));
        assert!(!world.remove_body(id));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_circle_rect_overlap_rotated() {
        let mut world = PhysicsWorld::new();
        world.add_body(BodyDef {
            angle: std::f32::consts::FRAC_PI_4,
            shape: Shape::Rect {
                width: 52.0,
                height: 69.0,
            },
            ..Default::default()
        });
        // Circle just inside the rotated rectangle's reach along x
        world.add_body(circle_def(Vec2::new(40.0, 0.0), 20.0));

        world.step(1.0 / 60.0);
        assert_eq!(world.contacts().len(), 1);
    }

    #[test]
    fn test_circle_rect_miss() {
        assert!(!circle_rect_overlap(
            Vec2::new(100.0, 0.0),
            10.0,
            Vec2::ZERO,
            0.0,
            52.0,
            69.0
        ));
        assert!(circle_rect_overlap(
            Vec2::new(30.0, 0.0),
            10.0,
            Vec2::ZERO,
            0.0,
            52.0,
            69.0
        ));
    }
}
