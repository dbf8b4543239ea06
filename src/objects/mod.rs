pub mod body_id;
pub mod rigid_body;

pub use body_id::{BodyId, BodyIdGenerator};
pub use rigid_body::RigidBody;
