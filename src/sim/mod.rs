//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod physics;
pub mod tick;
pub mod world;

pub use physics::{Body, BodyDef, BodyId, ContactEvent, PhysicsWorld, Shape};
pub use tick::{FrameEvent, TickInput, tick};
pub use world::{Enemy, ExplosionSound, Ship, World};
