//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic: a given seed always builds the same scene.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform sample in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform angle in [0, TAU).
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * std::f32::consts::TAU
    }

    /// Polar angle of a point distributed uniformly over a sphere.
    pub fn polar(&mut self) -> f32 {
        (2.0 * self.next_f32() - 1.0).clamp(-1.0, 1.0).acos()
    }

    /// +1.0 or -1.0 with equal probability.
    pub fn sign(&mut self) -> f32 {
        if self.next_f32() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}
