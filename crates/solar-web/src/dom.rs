//! `Page` over the live DOM.
//!
//! DOM failures are logged and swallowed here; the controller never sees
//! a `JsValue` error.

use solar_forge::{HostTask, InputEvent, Page, Rect, RootFlag, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, MouseEvent, Window,
};

const CANVAS_ID: &str = "solarCanvas";
const OVERLAY_ID: &str = "solar-expanded";
const BACKDROP_ID: &str = "solar-backdrop";

/// Pre-expand CSS scale transition.
const SCALE_TRANSITION: &str = "transform 0.6s cubic-bezier(0.22, 1, 0.36, 1)";

/// Both layers sit in the root's negative stacking layer so in-flow page
/// content paints over the expanded scene. The backdrop stays underneath.
const OVERLAY_Z: i32 = -1;
const BACKDROP_Z: i32 = -2;

const CANVAS_EXPANDED_CSS: &str = "position: absolute; top: 0; left: 0; width: 100%; \
     height: 100%; z-index: 1; border-radius: 0; pointer-events: none;";

fn overlay_css() -> String {
    format!(
        "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
         z-index: {OVERLAY_Z}; pointer-events: none; overflow: hidden;"
    )
}

fn backdrop_css(fade_ms: u32) -> String {
    format!(
        "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
         z-index: {BACKDROP_Z}; pointer-events: none; opacity: 0; \
         background: radial-gradient(circle at 70% 45%, #1a0f08 0%, #0a0808 70%); \
         transition: opacity {fade_ms}ms ease;"
    )
}

type EventClosure = Closure<dyn FnMut(Event)>;

/// Register `f` for `kind` on `target`, returning the closure that keeps it alive.
pub(crate) fn listen(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    f: impl FnMut(Event) + 'static,
) -> Result<EventClosure, JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    Ok(closure)
}

fn unlisten(target: &EventTarget, kind: &str, closure: &EventClosure) {
    if let Err(e) =
        target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
    {
        log::warn!("solar: removing {kind} listener failed: {e:?}");
    }
}

/// Client coordinates of a pointer/mouse event.
pub(crate) fn client_point(event: &Event) -> Option<(f32, f32)> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|m| (m.client_x() as f32, m.client_y() as f32))
}

fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

fn warn_on_err(what: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("solar: {what} failed: {e:?}");
    }
}

/// Scroll and document pointer-move listeners that live only while expanded.
struct Trackers {
    scroll: EventClosure,
    pointer: EventClosure,
}

pub struct DomPage {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    /// Inline parent the canvas returns to on collapse.
    container: Element,
    hero_content: Option<HtmlElement>,
    hero: Option<HtmlElement>,
    overlay: Option<HtmlElement>,
    backdrop: Option<HtmlElement>,
    backdrop_fade_ms: u32,
    /// Inline styles captured before the canvas moved into the overlay.
    canvas_css: Option<String>,
    hero_css: Option<(String, String)>,
    trackers: Option<Trackers>,
    /// Closures detached from inside their own callback. Dropped on the next frame.
    retired: Vec<EventClosure>,
    raf: Closure<dyn FnMut(f64)>,
}

impl DomPage {
    /// Find the canvas and its surroundings.
    pub fn locate(backdrop_fade_ms: u32) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("missing #solarCanvas"))?
            .dyn_into::<HtmlCanvasElement>()?;
        let container = canvas
            .parent_element()
            .ok_or_else(|| JsValue::from_str("#solarCanvas has no parent"))?;

        let html = |selector: &str| {
            document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        };
        let hero_content = html(".hero-content");
        let hero = html(".hero");
        if hero_content.is_none() {
            log::warn!("solar: no .hero-content element; it will not be raised when expanded");
        }

        let raf = Closure::wrap(Box::new(|timestamp: f64| {
            crate::on_frame(timestamp);
        }) as Box<dyn FnMut(f64)>);

        Ok(Self {
            window,
            document,
            canvas,
            container,
            hero_content,
            hero,
            overlay: None,
            backdrop: None,
            backdrop_fade_ms,
            canvas_css: None,
            hero_css: None,
            trackers: None,
            retired: Vec::new(),
            raf,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Drop closures retired during the previous frame.
    pub fn drop_retired(&mut self) {
        self.retired.clear();
    }

    fn create_div(&self, id: &str, css: &str) -> Result<HtmlElement, JsValue> {
        let el = self.document.create_element("div")?.dyn_into::<HtmlElement>()?;
        el.set_id(id);
        el.style().set_css_text(css);
        Ok(el)
    }

    fn body(&self) -> Result<HtmlElement, JsValue> {
        self.document.body().ok_or_else(|| JsValue::from_str("no body"))
    }

    fn try_show_backdrop(&mut self) -> Result<(), JsValue> {
        let backdrop = match &self.backdrop {
            Some(b) => b.clone(),
            None => {
                let b = self.create_div(BACKDROP_ID, &backdrop_css(self.backdrop_fade_ms))?;
                self.body()?.append_child(&b)?;
                // Force a style flush so the opacity change below transitions.
                let _ = b.get_bounding_client_rect();
                self.backdrop = Some(b.clone());
                b
            }
        };
        backdrop.style().set_property("opacity", "1")
    }

    fn try_mount_overlay(&mut self) -> Result<(), JsValue> {
        if self.overlay.is_some() {
            return Ok(());
        }
        let overlay = self.create_div(OVERLAY_ID, &overlay_css())?;
        self.canvas_css = Some(self.canvas.style().css_text());
        overlay.append_child(&self.canvas)?;
        self.canvas.style().set_css_text(CANVAS_EXPANDED_CSS);
        let body = self.body()?;
        body.insert_before(&overlay, body.first_child().as_ref())?;
        self.overlay = Some(overlay);
        Ok(())
    }

    fn try_unmount_overlay(&mut self) -> Result<(), JsValue> {
        self.container.append_child(&self.canvas)?;
        if let Some(css) = self.canvas_css.take() {
            self.canvas.style().set_css_text(&css);
        }
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
        Ok(())
    }

    fn try_raise_hero(&mut self) -> Result<(), JsValue> {
        let Some(content) = &self.hero_content else {
            return Ok(());
        };
        let hero_css = self.hero.as_ref().map(|h| h.style().css_text()).unwrap_or_default();
        self.hero_css = Some((content.style().css_text(), hero_css));
        if let Some(hero) = &self.hero {
            hero.style().set_property("background", "transparent")?;
        }
        content.style().set_property("position", "relative")?;
        content.style().set_property("z-index", "2")
    }

    fn try_restore_hero(&mut self) {
        let Some((content_css, hero_css)) = self.hero_css.take() else {
            return;
        };
        if let Some(content) = &self.hero_content {
            content.style().set_css_text(&content_css);
        }
        if let Some(hero) = &self.hero {
            hero.style().set_css_text(&hero_css);
        }
    }

    fn try_attach_trackers(&mut self) -> Result<(), JsValue> {
        if self.trackers.is_some() {
            return Ok(());
        }
        let scroll = listen(self.window.as_ref(), "scroll", true, |_| {
            crate::dispatch(InputEvent::Scroll);
        })?;
        let pointer = listen(self.document.as_ref(), "pointermove", true, |event| {
            if let Some((x, y)) = client_point(&event) {
                crate::dispatch(InputEvent::DocumentPointerMove { x, y });
            }
        })?;
        self.trackers = Some(Trackers { scroll, pointer });
        Ok(())
    }

    fn try_set_canvas_scale(&self, scale: Option<f32>) -> Result<(), JsValue> {
        let style = self.canvas.style();
        match scale {
            Some(s) => {
                style.set_property("transition", SCALE_TRANSITION)?;
                style.set_property("transform", &format!("scale({s})"))
            }
            None => {
                // No transition: the overlay takes over in the same frame.
                style.set_property("transition", "none")?;
                style.remove_property("transform").map(|_| ())
            }
        }
    }
}

impl Page for DomPage {
    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32;
        Viewport::new(
            dim(self.window.inner_width()),
            dim(self.window.inner_height()),
            self.window.device_pixel_ratio() as f32,
        )
    }

    fn container_rect(&self) -> Rect {
        rect_of(&self.container)
    }

    fn canvas_rect(&self) -> Rect {
        rect_of(&self.canvas)
    }

    fn set_canvas_scale(&mut self, scale: Option<f32>) {
        warn_on_err("canvas scale", self.try_set_canvas_scale(scale));
    }

    fn show_backdrop(&mut self) {
        let result = self.try_show_backdrop();
        warn_on_err("show backdrop", result);
    }

    fn fade_backdrop(&mut self) {
        if let Some(b) = &self.backdrop {
            warn_on_err("fade backdrop", b.style().set_property("opacity", "0"));
        }
    }

    fn remove_backdrop(&mut self) {
        if let Some(b) = self.backdrop.take() {
            b.remove();
        }
    }

    fn mount_overlay(&mut self) {
        let result = self.try_mount_overlay();
        warn_on_err("mount overlay", result);
    }

    fn unmount_overlay(&mut self) {
        let result = self.try_unmount_overlay();
        warn_on_err("unmount overlay", result);
    }

    fn raise_hero(&mut self) {
        let result = self.try_raise_hero();
        warn_on_err("raise hero", result);
    }

    fn restore_hero(&mut self) {
        self.try_restore_hero();
    }

    fn attach_trackers(&mut self) {
        let result = self.try_attach_trackers();
        warn_on_err("attach trackers", result);
    }

    fn detach_trackers(&mut self) {
        let Some(Trackers { scroll, pointer }) = self.trackers.take() else {
            return;
        };
        unlisten(self.window.as_ref(), "scroll", &scroll);
        unlisten(self.document.as_ref(), "pointermove", &pointer);
        // Collapse usually fires from inside the pointer callback itself.
        self.retired.push(scroll);
        self.retired.push(pointer);
    }

    fn schedule(&mut self, task: HostTask, delay_ms: u32) {
        let callback = Closure::once_into_js(move || crate::on_task(task));
        let result = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms as i32,
            )
            .map(|_| ());
        warn_on_err("schedule", result);
    }

    fn request_frame(&mut self) {
        let result = self
            .window
            .request_animation_frame(self.raf.as_ref().unchecked_ref())
            .map(|_| ());
        warn_on_err("request frame", result);
    }

    fn set_root_flag(&mut self, flag: RootFlag) {
        if let Some(root) = self.document.document_element() {
            warn_on_err("root flag", root.class_list().add_1(flag.class_name()));
        }
    }
}
