pub mod vec2;
pub mod mat22;
pub mod transform;
pub mod utils;

pub use mat22::Mat22;
pub use transform::Transform;
pub use utils::{Overlap, Projection};
pub use vec2::Vec2;
