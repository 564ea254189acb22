//! Astro Drift - a toroidal-arena arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, contacts, the per-frame update)
//! - `scene`: Retained display tree of drawable nodes
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod scene;
pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, independent of frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Arena dimensions in pixels
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    /// Thickness of the decorative boundary walls
    pub const WALL_THICKNESS: f32 = 10.0;
    /// Number of backdrop stars
    pub const STAR_COUNT: usize = 1500;

    /// Thrust force magnitude applied while the thrust intent is held
    pub const SHIP_SPEED: f32 = 100.0;
    /// Fixed turn rate in radians per second
    pub const SHIP_TURN_SPEED: f32 = 2.0;
    /// Ship collision rectangle
    pub const SHIP_WIDTH: f32 = 52.0;
    pub const SHIP_HEIGHT: f32 = 69.0;

    /// Enemy sensor circle radius
    pub const ENEMY_RADIUS: f32 = 20.0;
    /// Scale for the uniform random enemy velocity components
    pub const ENEMY_SPEED: f32 = 100.0;
    /// One enemy spawns every second (in simulation ticks)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
}

/// Rotate a vector by `angle` radians (counter-clockwise in y-up space)
#[inline]
pub fn rotate_vec(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

/// Direction the ship's nose points for a given body angle.
///
/// The sprite is drawn nose-up, so the forward axis sits 90 degrees off the
/// body angle and thrust pushes opposite the engine block.
#[inline]
pub fn thrust_direction(angle: f32) -> Vec2 {
    let heading = angle + std::f32::consts::FRAC_PI_2;
    -Vec2::new(heading.cos(), heading.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_vec_quarter_turn() {
        let v = rotate_vec(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!((v.x).abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_thrust_direction_heading_right() {
        // Body angle of pi/2 points the nose along +x
        let dir = thrust_direction(std::f32::consts::FRAC_PI_2);
        assert!((dir.x - 1.0).abs() < 1e-6);
        assert!(dir.y.abs() < 1e-5);
    }
}
