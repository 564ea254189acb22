//! Tessellation of stage primitives into triangle lists

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::rotate_vec;
use crate::scene::{Node, Primitive, Stage};

/// Circle subdivision: backdrop stars are tiny, sprites get smooth edges
fn circle_segments(radius: f32) -> u32 {
    if radius <= 3.0 { 6 } else { 24 }
}

/// Tessellate every node on the stage, applying each node's transform
pub fn tessellate_stage(stage: &Stage) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for node in stage.nodes() {
        tessellate_node(node, &mut vertices);
    }
    vertices
}

fn tessellate_node(node: &Node, out: &mut Vec<Vertex>) {
    let origin = Vec2::new(node.x, node.y);
    let to_world = |local: Vec2| origin + rotate_vec(local, node.rotation);

    for shape in &node.shapes {
        match shape {
            Primitive::Rect { min, size, color } => {
                let corners = [
                    *min,
                    Vec2::new(min.x + size.x, min.y),
                    Vec2::new(min.x + size.x, min.y + size.y),
                    Vec2::new(min.x, min.y + size.y),
                ]
                .map(to_world);
                push_fan(&corners, *color, out);
            }
            Primitive::Circle {
                center,
                radius,
                color,
            } => {
                let segments = circle_segments(*radius);
                let world_center = to_world(*center);
                for i in 0..segments {
                    let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
                    let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
                    out.push(Vertex::new(world_center.x, world_center.y, *color));
                    out.push(Vertex::new(
                        world_center.x + radius * theta1.cos(),
                        world_center.y + radius * theta1.sin(),
                        *color,
                    ));
                    out.push(Vertex::new(
                        world_center.x + radius * theta2.cos(),
                        world_center.y + radius * theta2.sin(),
                        *color,
                    ));
                }
            }
            Primitive::Polygon { points, color } => {
                let world: Vec<Vec2> = points.iter().map(|p| to_world(*p)).collect();
                push_fan(&world, *color, out);
            }
        }
    }
}

/// Fan-triangulate a convex point loop from its first point
fn push_fan(points: &[Vec2], color: [f32; 4], out: &mut Vec<Vertex>) {
    if points.len() < 3 {
        return;
    }
    let anchor = points[0];
    for window in points[1..].windows(2) {
        out.push(Vertex::new(anchor.x, anchor.y, color));
        out.push(Vertex::new(window[0].x, window[0].y, color));
        out.push(Vertex::new(window[1].x, window[1].y, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_tessellates_to_two_triangles() {
        let mut stage = Stage::new();
        stage.add_child(vec![Primitive::Rect {
            min: Vec2::ZERO,
            size: Vec2::new(10.0, 4.0),
            color: [1.0; 4],
        }]);

        let vertices = tessellate_stage(&stage);
        assert_eq!(vertices.len(), 6);
    }

    #[test]
    fn test_circle_vertex_count_follows_segments() {
        let mut stage = Stage::new();
        stage.add_child(vec![Primitive::Circle {
            center: Vec2::ZERO,
            radius: 20.0,
            color: [1.0; 4],
        }]);

        let vertices = tessellate_stage(&stage);
        assert_eq!(vertices.len(), (circle_segments(20.0) * 3) as usize);
    }

    #[test]
    fn test_node_transform_is_applied() {
        let mut stage = Stage::new();
        let id = stage.add_child(vec![Primitive::Polygon {
            points: vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            color: [1.0; 4],
        }]);
        {
            let node = stage.node_mut(id).unwrap();
            node.x = 100.0;
            node.y = 50.0;
            node.rotation = std::f32::consts::FRAC_PI_2;
        }

        let vertices = tessellate_stage(&stage);
        assert_eq!(vertices.len(), 3);
        // First point is the node origin
        assert!((vertices[0].position[0] - 100.0).abs() < 1e-4);
        assert!((vertices[0].position[1] - 50.0).abs() < 1e-4);
        // (10, 0) rotates a quarter turn onto (0, 10) before translating
        assert!((vertices[1].position[0] - 100.0).abs() < 1e-4);
        assert!((vertices[1].position[1] - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_polygon_emits_nothing() {
        let mut stage = Stage::new();
        stage.add_child(vec![Primitive::Polygon {
            points: vec![Vec2::ZERO, Vec2::new(1.0, 1.0)],
            color: [1.0; 4],
        }]);
        assert!(tessellate_stage(&stage).is_empty());
    }
}
