pub mod animate;
pub mod metrics;
pub mod resize;

pub use animate::{camera_distance, hover_scales, FrameInputs, FrameScales};
pub use metrics::FrameMetrics;
pub use resize::{apply_size, target_size};
