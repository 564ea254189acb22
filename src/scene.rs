//! Retained display tree
//!
//! The stage holds flat-colored primitive shapes grouped into nodes. The
//! simulation moves nodes by writing their x/y/rotation; the renderer
//! tessellates whatever the stage currently holds. Coordinates are arena
//! pixels, top-left origin, y down.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Stable handle for a node on the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub u32);

/// A filled primitive in node-local coordinates
#[derive(Debug, Clone)]
pub enum Primitive {
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Convex polygon, fan-triangulated from the first point
    Polygon {
        points: Vec<Vec2>,
        color: [f32; 4],
    },
}

/// A drawable node: a transform plus the shapes it carries
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub shapes: Vec<Primitive>,
}

/// The display tree root. Nodes draw in insertion order.
#[derive(Debug, Default)]
pub struct Stage {
    nodes: Vec<Node>,
    next_id: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, shapes: Vec<Primitive>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node {
            id,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            shapes,
        });
        id
    }

    /// Detach a node. Returns false when it was already removed.
    pub fn remove_child(&mut self, id: NodeId) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n.id == id) else {
            return false;
        };
        self.nodes.remove(index);
        true
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Colors for scene elements
pub mod colors {
    pub const STAR: [f32; 3] = [1.0, 1.0, 1.0];
    pub const WALL: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    /// Ship hull, 0x20d3fe
    pub const SHIP_HULL: [f32; 4] = [0.125, 0.827, 0.996, 1.0];
    /// Engine block, 0x1495d1
    pub const SHIP_ENGINE: [f32; 4] = [0.078, 0.584, 0.820, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}

/// Randomly placed backdrop stars, batched into one node's shape list
pub fn starfield_shapes(rng: &mut impl Rng) -> Vec<Primitive> {
    let mut shapes = Vec::with_capacity(STAR_COUNT);
    for _ in 0..STAR_COUNT {
        let x = rng.random_range(0.0..ARENA_WIDTH);
        let y = rng.random_range(0.0..ARENA_HEIGHT);
        let radius = rng.random_range(0.0f32..2.0).ceil().max(1.0);
        let alpha = (rng.random::<f32>() + 0.25).min(1.0);
        let [r, g, b] = colors::STAR;
        shapes.push(Primitive::Circle {
            center: Vec2::new(x, y),
            radius,
            color: [r, g, b, alpha],
        });
    }
    shapes
}

/// Four half-transparent rectangles framing the arena
pub fn boundary_shapes() -> Vec<Primitive> {
    let t = WALL_THICKNESS;
    let (w, h) = (ARENA_WIDTH, ARENA_HEIGHT);
    [
        (Vec2::new(0.0, 0.0), Vec2::new(w, t)),
        (Vec2::new(w - t, t), Vec2::new(t, h - 2.0 * t)),
        (Vec2::new(0.0, h - t), Vec2::new(w, t)),
        (Vec2::new(0.0, t), Vec2::new(t, h - 2.0 * t)),
    ]
    .into_iter()
    .map(|(min, size)| Primitive::Rect {
        min,
        size,
        color: colors::WALL,
    })
    .collect()
}

/// The ship sprite: hull triangle with the nose at the node origin,
/// engine block across the tail
pub fn ship_shapes() -> Vec<Primitive> {
    vec![
        Primitive::Polygon {
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(-26.0, 60.0),
                Vec2::new(26.0, 60.0),
            ],
            color: colors::SHIP_HULL,
        },
        Primitive::Rect {
            min: Vec2::new(-15.0, 60.0),
            size: Vec2::new(30.0, 8.0),
            color: colors::SHIP_ENGINE,
        },
    ]
}

/// The enemy sprite: a filled circle around the node origin
pub fn enemy_shapes() -> Vec<Primitive> {
    vec![Primitive::Circle {
        center: Vec2::ZERO,
        radius: ENEMY_RADIUS,
        color: colors::ENEMY,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_add_and_remove_child() {
        let mut stage = Stage::new();
        let a = stage.add_child(enemy_shapes());
        let b = stage.add_child(enemy_shapes());
        assert_eq!(stage.len(), 2);
        assert_ne!(a, b);

        assert!(stage.remove_child(a));
        assert!(!stage.contains(a));
        assert!(stage.contains(b));
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut stage = Stage::new();
        let id = stage.add_child(Vec::new());
        assert!(stage.remove_child(id));
        assert!(!stage.remove_child(id));
        assert!(stage.is_empty());
    }

    #[test]
    fn test_node_transform_updates() {
        let mut stage = Stage::new();
        let id = stage.add_child(ship_shapes());
        let node = stage.node_mut(id).unwrap();
        node.x = 640.0;
        node.y = 360.0;
        node.rotation = 1.5;

        let node = stage.nodes().iter().find(|n| n.id == id).unwrap();
        assert_eq!(node.x, 640.0);
        assert_eq!(node.rotation, 1.5);
    }

    #[test]
    fn test_starfield_count_and_bounds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let stars = starfield_shapes(&mut rng);
        assert_eq!(stars.len(), STAR_COUNT);
        for star in &stars {
            let Primitive::Circle { center, radius, color } = star else {
                panic!("starfield must be circles");
            };
            assert!(center.x >= 0.0 && center.x <= ARENA_WIDTH);
            assert!(center.y >= 0.0 && center.y <= ARENA_HEIGHT);
            assert!(*radius >= 1.0 && *radius <= 2.0);
            assert!(color[3] >= 0.25 && color[3] <= 1.0);
        }
    }
}
