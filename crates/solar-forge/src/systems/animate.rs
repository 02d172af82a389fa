//! Per-frame transform pipeline.
//!
//! Takes the smoothed pointer/hover values and the clock, and rewrites the
//! scene's local transforms, material drives and camera distance. Rendering
//! and state-machine evaluation happen in the controller around this.

use glam::{Vec2, Vec3};

use crate::api::config::SceneConfig;
use crate::core::smoothing::Lerp;
use crate::renderer::camera::PerspectiveCamera;
use crate::scene::stars;
use crate::scene::SolarScene;

/// Solar group Y spin in rad/s at rest, and the extra at hover = 1.
const SOLAR_SPIN: f32 = 0.25;
const SOLAR_SPIN_HOVER: f32 = 0.3;
const SOLAR_ROLL: f32 = 0.05;
/// Pointer tilt: target X rotation per unit of pointer Y, and its ease factor.
const TILT_GAIN: f32 = 0.4;
const TILT_EASE: f32 = 0.06;

const RING_SPIN: f32 = 0.2;
const RING_SPIN_HOVER: f32 = 0.15;
const RING_ROLL: f32 = 0.08;

const BELT_GROWTH: f32 = 0.2;
const CORE_GROWTH: f32 = 0.03;
const RIBBON_GROWTH: f32 = 0.08;

/// Inputs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub delta: f32,
    pub elapsed: f32,
    pub hover: f32,
    pub pointer: Vec2,
    /// Viewport-normalised anchor while expanded, `None` otherwise.
    pub anchor: Option<Vec2>,
}

/// Scale factors chosen this frame, reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameScales {
    pub solar: f32,
    pub rings: f32,
}

/// Uniform scale of the solar group and ring group for a hover value.
/// Both grow with hover² so the last stretch of the ease fills the viewport.
pub fn hover_scales(hover: f32, config: &SceneConfig) -> FrameScales {
    let h2 = hover * hover;
    FrameScales {
        solar: 1.0 + h2 * config.solar_growth,
        rings: 1.0 + h2 * config.ring_growth,
    }
}

/// Camera distance for a hover value.
pub fn camera_distance(hover: f32, config: &SceneConfig) -> f32 {
    config.camera.base_distance + hover * config.camera.retreat
}

/// Advance every node of the scene by one frame.
pub fn animate(
    scene: &mut SolarScene,
    camera: &mut PerspectiveCamera,
    config: &SceneConfig,
    frame: &FrameInputs,
) -> FrameScales {
    let FrameInputs { delta, elapsed, hover, pointer, anchor } = *frame;
    let nodes = scene.nodes.clone();

    // Whole-group spin, biased by hover, plus pointer tilt.
    {
        let solar = scene.graph.local_mut(nodes.solar);
        solar.rotation.y += delta * (SOLAR_SPIN + hover * SOLAR_SPIN_HOVER);
        solar.rotation.x += (pointer.y * TILT_GAIN - solar.rotation.x) * TILT_EASE;
        solar.rotation.z += delta * SOLAR_ROLL;
    }

    // Breathing material drives.
    let m = &mut scene.materials;
    m.core_emissive = 1.15 + hover * 0.45 + (elapsed * 2.0).sin() * 0.08;
    m.bloom_opacity = 0.4 + hover * 0.15 + (elapsed * 1.6).sin() * 0.05;
    m.corona_opacity = 0.55 + hover * 0.3 + (elapsed * 1.8).sin() * 0.08;

    for (id, ribbon) in nodes.ribbons.iter().zip(&scene.ribbons) {
        scene.graph.local_mut(*id).rotation = ribbon.rotation_at(elapsed);
    }

    camera.set_distance(camera_distance(hover, config));
    camera.update_projection();

    let scales = hover_scales(hover, config);
    scene.graph.local_mut(nodes.solar).set_uniform_scale(scales.solar);
    {
        let rings = scene.graph.local_mut(nodes.ring_group);
        rings.set_uniform_scale(scales.rings);
        rings.rotation.y += delta * (RING_SPIN + hover * RING_SPIN_HOVER);
        rings.rotation.z += delta * RING_ROLL;
    }
    scene.graph.local_mut(nodes.belt).set_uniform_scale(1.0 + hover * BELT_GROWTH);
    scene.graph.local_mut(nodes.core).set_uniform_scale(1.0 + hover * CORE_GROWTH);
    scene
        .graph
        .local_mut(nodes.ribbon_group)
        .set_uniform_scale(1.0 + hover * RIBBON_GROWTH);

    // Keep the sun over its original screen spot while expanded.
    let target = match anchor {
        Some(ndc) => camera.ndc_to_world_plane(ndc),
        None => Vec2::ZERO,
    };
    {
        let solar = scene.graph.local_mut(nodes.solar);
        let current = solar.position.truncate();
        let next = current.lerp_to(target, config.anchor_follow);
        solar.position = Vec3::new(next.x, next.y, 0.0);
    }

    scene.shards.update(elapsed);

    scene.graph.local_mut(nodes.stars).rotation.y += delta * stars::DRIFT_RATE;

    scene.graph.propagate();
    scales
}
