//! Background star field: static points on a thick spherical shell.
//! Only the whole field rotates, slowly, through its node transform.

use glam::Vec3;

use super::rng::Rng;
use super::shards::to_cartesian;

const DISTANCE_MIN: f32 = 6.0;
const DISTANCE_SPAN: f32 = 8.0;

pub const POINT_SIZE: f32 = 0.03;
pub const OPACITY: f32 = 0.45;
/// Ambient Y rotation in radians per second.
pub const DRIFT_RATE: f32 = 0.02;

#[derive(Debug, Clone, Default)]
pub struct StarField {
    pub positions: Vec<Vec3>,
}

impl StarField {
    pub fn generate(count: usize, rng: &mut Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                let distance = DISTANCE_MIN + rng.next_f32() * DISTANCE_SPAN;
                let theta = rng.angle();
                let phi = rng.polar();
                to_cartesian(distance, theta, phi)
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
