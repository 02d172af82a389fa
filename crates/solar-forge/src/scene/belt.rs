//! Particle belt: point sprites on a randomised flattened torus.
//!
//! Positions and colours are sampled once at build time and never change;
//! the belt only moves through its parent group's transform.

use glam::Vec3;

use super::rng::Rng;

const MAJOR_MIN: f32 = 1.6;
const MAJOR_SPAN: f32 = 0.6;
const MINOR_MIN: f32 = 0.05;
const MINOR_SPAN: f32 = 0.18;
/// Vertical squash of the tube cross-section.
const FLATTEN: f32 = 0.8;

/// Warm orange hue band, fixed saturation, variable lightness.
const HUE_MIN: f32 = 0.08;
const HUE_SPAN: f32 = 0.05;
const SATURATION: f32 = 0.85;
const LIGHTNESS_MIN: f32 = 0.6;
const LIGHTNESS_SPAN: f32 = 0.2;

pub const POINT_SIZE: f32 = 0.045;
pub const OPACITY: f32 = 0.85;

#[derive(Debug, Clone, Default)]
pub struct ParticleBelt {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl ParticleBelt {
    pub fn generate(count: usize, rng: &mut Rng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);

        for _ in 0..count {
            let major = MAJOR_MIN + rng.next_f32() * MAJOR_SPAN;
            let minor = MINOR_MIN + rng.next_f32() * MINOR_SPAN;
            let theta = rng.angle();
            let phi = rng.angle();

            let ring = major + minor * phi.cos();
            positions.push(Vec3::new(
                ring * theta.cos(),
                minor * phi.sin() * FLATTEN,
                ring * theta.sin(),
            ));

            let hue = HUE_MIN + rng.next_f32() * HUE_SPAN;
            let lightness = LIGHTNESS_MIN + rng.next_f32() * LIGHTNESS_SPAN;
            colors.push(hsl_to_rgb(hue, SATURATION, lightness));
        }

        Self { positions, colors }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// HSL (all components in [0, 1]) to sRGB-encoded RGB. The sink decodes
/// to linear, as `Color.setHSL` does.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}
