use glam::Vec2;

/// Axis-aligned rectangle in CSS pixels, viewport-relative (like `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Map a client-space point into [-1, 1] per axis relative to this rect
    /// (Y grows downward). `None` for a degenerate rect.
    pub fn normalize(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            ((x - self.left) / self.width) * 2.0 - 1.0,
            ((y - self.top) / self.height) * 2.0 - 1.0,
        ))
    }
}

/// Browser viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self { width, height, device_pixel_ratio }
    }

    /// Viewport-normalised position ([-1, 1], Y up) of a client-space point.
    pub fn to_ndc(&self, point: Vec2) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new((point.x / w) * 2.0 - 1.0, -(point.y / h) * 2.0 + 1.0)
    }

    /// Inverse of [`to_ndc`](Self::to_ndc).
    pub fn to_client(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (1.0 - ndc.y) / 2.0 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0, 1.0)
    }
}

/// Classes toggled on the document root for CSS-level fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFlag {
    NoWebgl,
    WebglReady,
    ReducedMotion,
}

impl RootFlag {
    pub fn class_name(self) -> &'static str {
        match self {
            RootFlag::NoWebgl => "no-webgl",
            RootFlag::WebglReady => "webgl-ready",
            RootFlag::ReducedMotion => "reduced-motion",
        }
    }
}

/// Deferred work the host runs after a delay, then hands back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTask {
    /// Remove the background layer if it still belongs to `generation`.
    RemoveBackdrop { generation: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_corners() {
        let r = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(r.normalize(100.0, 50.0), Some(Vec2::new(-1.0, -1.0)));
        assert_eq!(r.normalize(300.0, 150.0), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(r.normalize(200.0, 100.0), Some(Vec2::ZERO));
        assert_eq!(Rect::new(0.0, 0.0, 0.0, 10.0).normalize(1.0, 1.0), None);
    }

    #[test]
    fn ndc_round_trip() {
        let vp = Viewport::new(1000.0, 500.0, 2.0);
        let p = Vec2::new(750.0, 125.0);
        let ndc = vp.to_ndc(p);
        assert!((ndc - Vec2::new(0.5, 0.5)).length() < 1e-6);
        assert!((vp.to_client(ndc) - p).length() < 1e-3);
    }

    #[test]
    fn root_flag_classes() {
        assert_eq!(RootFlag::NoWebgl.class_name(), "no-webgl");
        assert_eq!(RootFlag::ReducedMotion.class_name(), "reduced-motion");
    }
}
