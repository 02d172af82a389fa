pub mod smoothing;
pub mod state;
pub mod time;

pub use smoothing::{lerp, Lerp, Smoothed};
pub use state::{Effect, Expansion, Step, Trigger};
pub use time::FrameClock;
