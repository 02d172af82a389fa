//! Page trait: the DOM seam.
//!
//! Everything the controller does to the document goes through here:
//! geometry reads, canvas reparenting, the overlay and background layer,
//! hero styling, expanded-mode listeners, timers and frame requests.
//! Implementations must make `show_backdrop` idempotent (create only if
//! absent); every other call is issued at most once per transition by the
//! state machine.

use crate::api::types::{HostTask, Rect, RootFlag, Viewport};

#[cfg(test)]
pub mod recording;

pub trait Page {
    fn viewport(&self) -> Viewport;

    /// Bounding rect of the inline badge container.
    fn container_rect(&self) -> Rect;

    /// Bounding rect of the canvas element.
    fn canvas_rect(&self) -> Rect;

    /// Apply (`Some(scale)`) or clear (`None`) the canvas CSS scale transform.
    fn set_canvas_scale(&mut self, scale: Option<f32>);

    /// Create the fullscreen background layer if absent and fade it in.
    fn show_backdrop(&mut self);

    fn fade_backdrop(&mut self);

    fn remove_backdrop(&mut self);

    /// Create the fullscreen pointer-transparent overlay and move the canvas into it.
    fn mount_overlay(&mut self);

    /// Move the canvas back to its inline parent, restore its inline
    /// styles and remove the overlay element.
    fn unmount_overlay(&mut self);

    fn raise_hero(&mut self);

    fn restore_hero(&mut self);

    /// Register the scroll and document-wide pointer-move listeners.
    fn attach_trackers(&mut self);

    fn detach_trackers(&mut self);

    /// Run `task` after `delay_ms`, handing it back to the controller.
    fn schedule(&mut self, task: HostTask, delay_ms: u32);

    /// Ask for one more animation-frame callback.
    fn request_frame(&mut self);

    fn set_root_flag(&mut self, flag: RootFlag);
}
