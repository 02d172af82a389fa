//! Shard field: instanced icosahedra orbiting the sun.
//!
//! Each shard carries fixed orbital parameters. Its transform is a pure
//! function of those parameters and the elapsed simulation time, so the
//! same elapsed time always yields the same matrix regardless of how the
//! frames that led there were sliced.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::rng::Rng;

const RADIUS_MIN: f32 = 1.7;
const RADIUS_SPAN: f32 = 0.9;
const SIZE_MIN: f32 = 0.04;
const SIZE_SPAN: f32 = 0.06;
const SPEED_MIN: f32 = 0.15;
const SPEED_SPAN: f32 = 0.35;

/// Azimuthal advance in radians per second per unit of shard speed.
const AZIMUTH_RATE: f32 = 0.6;
/// Polar advance in radians per second per unit of shard speed.
const POLAR_RATE: f32 = 0.24;
const WOBBLE_FREQUENCY: f32 = 1.5;
const WOBBLE_AMPLITUDE: f32 = 0.08;
/// Self-rotation rates about X, Y, Z in radians per second.
const TUMBLE: Vec3 = Vec3::new(0.3, 0.2, 0.15);

pub const GEOMETRY_RADIUS: f32 = 0.05;

/// Persistent per-instance orbital parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShardOrbit {
    pub radius: f32,
    /// Azimuth at t = 0.
    pub theta: f32,
    /// Polar angle at t = 0.
    pub phi: f32,
    pub size: f32,
    pub speed: f32,
    /// Phase offset for the radius wobble and tumble.
    pub phase: f32,
}

impl ShardOrbit {
    /// Orbital angles (theta, phi) after `elapsed` seconds.
    pub fn angles_at(&self, elapsed: f32) -> (f32, f32) {
        (
            self.theta + self.speed * AZIMUTH_RATE * elapsed,
            self.phi + self.speed * POLAR_RATE * elapsed,
        )
    }

    pub fn radius_at(&self, elapsed: f32) -> f32 {
        self.radius + (elapsed * WOBBLE_FREQUENCY + self.phase).sin() * WOBBLE_AMPLITUDE
    }

    /// Instance matrix after `elapsed` seconds.
    pub fn matrix_at(&self, elapsed: f32) -> Mat4 {
        let (theta, phi) = self.angles_at(elapsed);
        let position = to_cartesian(self.radius_at(elapsed), theta, phi);
        let tumble = TUMBLE * elapsed + Vec3::splat(self.phase);
        let rotation = Quat::from_euler(EulerRot::XYZ, tumble.x, tumble.y, tumble.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.size), rotation, position)
    }
}

/// Arena of shard orbits plus their current instance matrices.
#[derive(Debug, Clone, Default)]
pub struct ShardField {
    orbits: Vec<ShardOrbit>,
    matrices: Vec<Mat4>,
}

impl ShardField {
    pub fn generate(count: usize, rng: &mut Rng) -> Self {
        let orbits: Vec<ShardOrbit> = (0..count)
            .map(|_| ShardOrbit {
                radius: RADIUS_MIN + rng.next_f32() * RADIUS_SPAN,
                theta: rng.angle(),
                phi: rng.polar(),
                size: SIZE_MIN + rng.next_f32() * SIZE_SPAN,
                speed: SPEED_MIN + rng.next_f32() * SPEED_SPAN,
                phase: rng.angle(),
            })
            .collect();
        let matrices = orbits.iter().map(|o| o.matrix_at(0.0)).collect();
        Self { orbits, matrices }
    }

    /// Rewrite every instance matrix for the given elapsed time.
    pub fn update(&mut self, elapsed: f32) {
        for (matrix, orbit) in self.matrices.iter_mut().zip(&self.orbits) {
            *matrix = orbit.matrix_at(elapsed);
        }
    }

    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }
}

/// Spherical (radius, azimuth, polar) to Cartesian, Y up.
pub fn to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}
