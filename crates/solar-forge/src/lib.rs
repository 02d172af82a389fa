pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod scene;

// Re-export key types at crate root for convenience
pub use api::controller::SolarController;
pub use api::capability::{gate, CapabilityProbe};
pub use api::config::{Capabilities, Populations, SceneConfig};
pub use api::types::{HostTask, Rect, RootFlag, Viewport};
pub use core::state::{Effect, Expansion, Trigger};
pub use core::time::FrameClock;
pub use error::{CapabilityError, ConfigError};
pub use host::Page;
pub use input::queue::InputEvent;
pub use renderer::camera::PerspectiveCamera;
pub use renderer::traits::{ClearColor, Renderer};
pub use bridge::protocol::ProtocolLayout;
pub use scene::SolarScene;
