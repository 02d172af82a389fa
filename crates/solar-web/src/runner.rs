use solar_forge::{HostTask, InputEvent, SolarController};

use crate::dom::DomPage;
use crate::sink::JsRenderer;

/// Wires the controller to the live page and the JS renderer.
///
/// Lives in a `thread_local!` in the crate root because wasm-bindgen
/// callbacks can only reach it through free functions.
pub struct SolarRunner {
    controller: SolarController,
    page: DomPage,
    renderer: JsRenderer,
}

impl SolarRunner {
    pub fn new(controller: SolarController, page: DomPage, renderer: JsRenderer) -> Self {
        Self { controller, page, renderer }
    }

    /// Upload the scene and render the first frame.
    pub fn start(&mut self) {
        self.controller.start(&mut self.page, &mut self.renderer);
    }

    /// Animation-frame callback.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.page.drop_retired();
        self.controller.tick(timestamp_ms, &mut self.page, &mut self.renderer);
    }

    pub fn handle(&mut self, event: InputEvent) {
        self.controller.handle_input(event, &mut self.page, &mut self.renderer);
    }

    pub fn run_task(&mut self, task: HostTask) {
        self.controller.run_task(task, &mut self.page);
    }

    pub fn controller(&self) -> &SolarController {
        &self.controller
    }

    pub fn page(&self) -> &DomPage {
        &self.page
    }
}
