//! Output sizing. Runs on every viewport resize (no debouncing) and on
//! every expand/collapse transition.

use crate::api::types::{Rect, Viewport};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::Renderer;

/// Output size in CSS pixels: the viewport while expanded, otherwise the
/// inline container's box, floored at 1px on each axis.
pub fn target_size(expanded: bool, viewport: Viewport, container: Rect) -> (u32, u32) {
    let (w, h) = if expanded {
        (viewport.width, viewport.height)
    } else {
        (container.width, container.height)
    };
    (w.floor().max(1.0) as u32, h.floor().max(1.0) as u32)
}

/// Apply a target size to the renderer and camera.
pub fn apply_size(
    (width, height): (u32, u32),
    pixel_ratio: f32,
    camera: &mut PerspectiveCamera,
    renderer: &mut impl Renderer,
) {
    renderer.set_size(width, height, pixel_ratio);
    camera.set_aspect(width as f32, height as f32);
    camera.update_projection();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::recording::RecordingRenderer;

    #[test]
    fn expanded_uses_viewport() {
        let vp = Viewport::new(1440.0, 900.0, 2.0);
        let rect = Rect::new(10.0, 10.0, 300.0, 280.0);
        assert_eq!(target_size(true, vp, rect), (1440, 900));
        assert_eq!(target_size(false, vp, rect), (300, 280));
    }

    #[test]
    fn degenerate_container_floors_at_one() {
        let vp = Viewport::default();
        assert_eq!(target_size(false, vp, Rect::new(0.0, 0.0, 0.0, 0.4)), (1, 1));
    }

    #[test]
    fn aspect_matches_both_dimension_sets() {
        let mut camera = PerspectiveCamera::new(40.0, 0.1, 100.0, 4.6);
        let mut renderer = RecordingRenderer::default();
        let vp = Viewport::new(1920.0, 1080.0, 1.0);
        let rect = Rect::new(0.0, 0.0, 320.0, 240.0);

        for expanded in [false, true] {
            let size = target_size(expanded, vp, rect);
            apply_size(size, 1.0, &mut camera, &mut renderer);
            assert!((camera.aspect - size.0 as f32 / size.1 as f32).abs() < 1e-6);
        }
        assert_eq!(renderer.sizes, vec![(320, 240, 1.0), (1920, 1080, 1.0)]);
    }
}
