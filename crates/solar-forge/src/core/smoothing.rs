// core/smoothing.rs
//
// Exponential approach toward a target, one fixed factor per frame.
// Used for the pointer, the hover scalar and the solar group's anchor follow.

use glam::{Vec2, Vec3};

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Values that can be moved a fraction of the way toward another value.
pub trait Lerp: Copy {
    fn lerp_to(self, target: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        lerp(self, target, t)
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

/// A value that eases toward its target by a fixed factor every step.
///
/// Setting the target never moves the value; only `step` does, so the
/// value never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed<T: Lerp> {
    value: T,
    target: T,
    factor: f32,
}

impl<T: Lerp> Smoothed<T> {
    pub fn new(initial: T, factor: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn value(&self) -> T {
        self.value
    }

    /// Advance one frame toward the target. Returns the new value.
    pub fn step(&mut self) -> T {
        self.value = self.value.lerp_to(self.target, self.factor);
        self.value
    }
}
