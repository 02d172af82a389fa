//! `Renderer` over the page-side JS object that owns the 3D engine.
//!
//! The sink receives flat `f32` views into wasm memory laid out by
//! `solar_forge::bridge::protocol`; it must copy anything it keeps past the
//! call.

use solar_forge::{ClearColor, Renderer};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Page-side renderer handed to `solar_init`.
    pub type SolarSink;

    #[wasm_bindgen(method, js_name = setSize)]
    fn set_size(this: &SolarSink, width: u32, height: u32, pixel_ratio: f32);

    #[wasm_bindgen(method, js_name = setClearColor)]
    fn set_clear_color(this: &SolarSink, rgb: u32, alpha: f32);

    #[wasm_bindgen(method)]
    fn build(this: &SolarSink, scene: &[f32]);

    #[wasm_bindgen(method)]
    fn render(this: &SolarSink, frame: &[f32]);
}

pub struct JsRenderer {
    sink: SolarSink,
}

impl JsRenderer {
    pub fn new(sink: SolarSink) -> Self {
        Self { sink }
    }
}

impl Renderer for JsRenderer {
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.sink.set_size(width, height, pixel_ratio);
    }

    fn set_clear_color(&mut self, color: ClearColor) {
        self.sink.set_clear_color(color.rgb, color.alpha);
    }

    fn upload_scene(&mut self, scene: &[f32]) {
        self.sink.build(scene);
    }

    fn draw(&mut self, frame: &[f32]) {
        self.sink.render(frame);
    }
}
