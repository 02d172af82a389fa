//! Browser bridge for the solar badge.
//!
//! ```js
//! import init, { solar_init } from './pkg/solar_web.js';
//! await init();
//! solar_init(new SolarSink(canvas), JSON.stringify({ hover_ease: 0.02 }));
//! ```

pub mod dom;
pub mod probe;
pub mod runner;
pub mod sink;

use std::cell::RefCell;

use solar_forge::{gate, HostTask, InputEvent, Page, SceneConfig, SolarController};
use wasm_bindgen::prelude::*;

pub use dom::DomPage;
pub use probe::DomProbe;
pub use runner::SolarRunner;
pub use sink::{JsRenderer, SolarSink};

thread_local! {
    static RUNNER: RefCell<Option<SolarRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. `None` before init, or if a callback
/// re-enters while the runner is already borrowed.
fn with_runner<R>(f: impl FnOnce(&mut SolarRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => borrow.as_mut().map(f),
        Err(_) => {
            log::warn!("solar: re-entrant callback dropped");
            None
        }
    })
}

pub(crate) fn dispatch(event: InputEvent) {
    with_runner(|r| r.handle(event));
}

pub(crate) fn on_frame(timestamp_ms: f64) {
    with_runner(|r| r.frame(timestamp_ms));
}

pub(crate) fn on_task(task: HostTask) {
    with_runner(|r| r.run_task(task));
}

/// Build the solar scene on `#solarCanvas` and start it.
///
/// `config_json` overrides any subset of the scene config. On a page
/// without WebGL this only flags the document root and returns.
#[wasm_bindgen]
pub fn solar_init(sink: SolarSink, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let parsed = config_json
        .as_deref()
        .map(SceneConfig::from_json)
        .unwrap_or_else(|| Ok(SceneConfig::default()));
    let level = parsed
        .as_ref()
        .map_or(Ok(log::Level::Info), SceneConfig::log_level);
    let _ = console_log::init_with_level(level.as_ref().copied().unwrap_or(log::Level::Info));
    if let Err(e) = &level {
        log::warn!("solar: {e}; logging at info");
    }

    let config = parsed.unwrap_or_else(|e| {
        log::warn!("solar: {e}; using defaults");
        SceneConfig::default()
    });

    let mut page = match DomPage::locate(config.backdrop_fade_ms) {
        Ok(page) => page,
        Err(e) => {
            log::warn!("solar: page not ready: {e:?}");
            return;
        }
    };
    let probe = DomProbe::new(page.window().clone());
    let Ok(caps) = gate(&probe, &mut page) else {
        return;
    };

    let badge = page.container().clone();
    let window = page.window().clone();
    let controller = SolarController::new(config, caps);
    let runner = SolarRunner::new(controller, page, JsRenderer::new(sink));
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    if let Err(e) = install_listeners(&badge, &window) {
        log::warn!("solar: listener registration failed: {e:?}");
    }
    with_runner(|r| r.start());
    log::info!("solar-forge: initialized");
}

/// Badge and resize listeners. These live as long as the page.
fn install_listeners(badge: &web_sys::Element, window: &web_sys::Window) -> Result<(), JsValue> {
    let listeners = [
        dom::listen(badge.as_ref(), "pointerenter", true, |_| {
            dispatch(InputEvent::BadgeEnter);
        })?,
        dom::listen(badge.as_ref(), "pointerleave", true, |_| {
            dispatch(InputEvent::BadgeLeave);
        })?,
        dom::listen(badge.as_ref(), "pointermove", true, |event| {
            if let Some((x, y)) = dom::client_point(&event) {
                dispatch(InputEvent::BadgePointerMove { x, y });
            }
        })?,
        dom::listen(window.as_ref(), "resize", true, |_| {
            dispatch(InputEvent::Resize);
        })?,
    ];
    for listener in listeners {
        listener.forget();
    }
    Ok(())
}

// ---- State accessors ----

#[wasm_bindgen]
pub fn solar_state() -> String {
    with_runner(|r| r.controller().state().name().to_string()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn solar_hover() -> f32 {
    with_runner(|r| r.controller().hover()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn solar_frame_counter() -> u32 {
    with_runner(|r| r.controller().frame_counter()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn solar_viewport_width() -> f32 {
    with_runner(|r| r.page().viewport().width).unwrap_or(0.0)
}
