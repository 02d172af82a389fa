use solar_forge::CapabilityProbe;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

const ENGINE_GLOBAL: &str = "THREE";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Capability checks against the live window.
pub struct DomProbe {
    window: Window,
}

impl DomProbe {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// A WebGL context from a scratch canvas, so the target canvas stays
    /// free for the engine to pick its own context type.
    fn scratch_context(&self) -> Result<bool, JsValue> {
        let document = self
            .window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        for kind in ["webgl", "experimental-webgl"] {
            if canvas.get_context(kind)?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl CapabilityProbe for DomProbe {
    fn engine_loaded(&self) -> bool {
        js_sys::Reflect::get(&self.window, &JsValue::from_str(ENGINE_GLOBAL))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }

    fn acquire_context(&self) -> bool {
        self.scratch_context().unwrap_or(false)
    }

    fn prefers_reduced_motion(&self) -> bool {
        matches!(
            self.window.match_media(REDUCED_MOTION_QUERY),
            Ok(Some(query)) if query.matches()
        )
    }

    fn viewport_width(&self) -> f32 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }
}
