//! Renderer trait: the GPU seam.
//!
//! The controller never talks to a graphics API. It packs scene and frame
//! data into flat `f32` buffers (see [`crate::bridge::protocol`]) and hands
//! them to a `Renderer`. In the browser the implementation forwards to the
//! JS object that owns the 3D engine; in tests it records calls.

use serde::Deserialize;

/// Clear colour as packed `0xRRGGBB` plus alpha.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClearColor {
    pub rgb: u32,
    pub alpha: f32,
}

impl ClearColor {
    pub const TRANSPARENT: Self = Self { rgb: 0x000000, alpha: 0.0 };

    pub const fn opaque(rgb: u32) -> Self {
        Self { rgb, alpha: 1.0 }
    }
}

/// Renderer contract for the solar scene.
pub trait Renderer {
    /// Resize the output buffer. `width`/`height` are CSS pixels.
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32);

    fn set_clear_color(&mut self, color: ClearColor);

    /// Build the engine-side scene from the static scene buffer. Called once.
    fn upload_scene(&mut self, scene: &[f32]);

    /// Draw one frame from the packed frame buffer.
    fn draw(&mut self, frame: &[f32]);
}
