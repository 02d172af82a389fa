//! Once-per-second animation diagnostics. Purely observational.

use crate::core::state::Expansion;
use crate::core::time::FrameClock;

use super::animate::FrameScales;

/// Hover below which the per-second trace stays quiet.
const QUIET_HOVER: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameMetrics {
    frames_this_second: u32,
    /// Frames counted over the last completed second.
    pub fps: u32,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame and log a summary when a second boundary is crossed.
    /// Returns whether a summary was emitted.
    pub fn record(
        &mut self,
        clock: &FrameClock,
        hover: f32,
        scales: FrameScales,
        camera_z: f32,
        state: Expansion,
    ) -> bool {
        self.frames_this_second += 1;
        if !clock.crossed_second() {
            return false;
        }
        self.fps = self.frames_this_second;
        self.frames_this_second = 0;

        if hover <= QUIET_HOVER {
            return false;
        }
        log::debug!(
            "solar: {} hover={:.2} solar_scale={:.2} ring_scale={:.2} camera_z={:.2} fps={}",
            state.name(),
            hover,
            scales.solar,
            scales.rings,
            camera_z,
            self.fps
        );
        true
    }
}
