pub mod capability;
pub mod config;
pub mod controller;
pub mod types;

pub use capability::{gate, CapabilityProbe};
pub use config::{CameraConfig, Capabilities, Populations, SceneConfig};
pub use controller::SolarController;
pub use types::{HostTask, Rect, RootFlag, Viewport};
