//! Core of a small 2D rigid-body physics engine: vector and matrix math,
//! rigid bodies with semi-implicit Euler integration, contact descriptors and
//! an impulse solver. Coordinates follow screen convention (y grows downwards).

pub mod math;
pub mod objects;
pub mod integration;
pub mod collision;
pub mod shapes;
pub mod world;
pub mod common;
pub mod config;
pub mod error;

// Re-export key types for easier use
pub use math::{Mat22, Transform, Vec2};
pub use objects::{BodyId, BodyIdGenerator, RigidBody};
pub use collision::{CollisionInfo, ContactSolver};
pub use shapes::Polygon;
pub use world::PhysicsWorld;
pub use common::Material;
pub use config::{BodyDef, SolverConfig, WorldConfig};
pub use error::PhysicsError;
