/// Browser input the controller reacts to.
/// Coordinates are client-space CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved over the inline badge container.
    BadgePointerMove { x: f32, y: f32 },
    /// Pointer entered the inline badge container.
    BadgeEnter,
    /// Pointer left the inline badge container.
    BadgeLeave,
    /// Document-wide pointer move (only wired while expanded).
    DocumentPointerMove { x: f32, y: f32 },
    /// Document scrolled (only wired while expanded).
    Scroll,
    /// Viewport resized.
    Resize,
}
