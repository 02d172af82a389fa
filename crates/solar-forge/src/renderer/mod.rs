pub mod camera;
pub mod traits;

pub use camera::PerspectiveCamera;
pub use traits::{ClearColor, Renderer};
