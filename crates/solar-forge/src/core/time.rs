/// Variable-step frame clock driven by animation-frame timestamps.
///
/// Tracks the delta of the latest frame and the total elapsed simulation
/// time (the sum of all deltas). Deltas are clamped so a backgrounded tab
/// resuming after minutes does not produce one enormous rotation step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous frame in milliseconds.
    last_ms: Option<f64>,
    /// Delta of the latest frame in seconds.
    delta: f32,
    /// Sum of all deltas in seconds.
    elapsed: f32,
    /// Upper bound for a single delta.
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_ms: None,
            delta: 0.0,
            elapsed: 0.0,
            max_delta,
        }
    }

    /// Advance to an animation-frame timestamp (ms). The first call yields a zero delta.
    pub fn advance_to(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        self.advance(dt)
    }

    /// Advance by an explicit delta in seconds. Negative deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.delta = dt.clamp(0.0, self.max_delta);
        self.elapsed += self.delta;
        self.delta
    }

    /// Total elapsed simulation time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the latest frame crossed a whole-second boundary.
    pub fn crossed_second(&self) -> bool {
        self.delta > 0.0 && self.elapsed.floor() != (self.elapsed - self.delta).floor()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_timestamp_is_zero_delta() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance_to(1234.0), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn timestamps_accumulate() {
        let mut clock = FrameClock::default();
        clock.advance_to(1000.0);
        let dt = clock.advance_to(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
        clock.advance_to(1032.0);
        assert!((clock.elapsed() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn clamps_long_pauses() {
        let mut clock = FrameClock::new(0.1);
        clock.advance_to(0.0);
        let dt = clock.advance_to(60_000.0);
        assert_eq!(dt, 0.1);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0.0);
    }

    #[test]
    fn detects_second_boundary() {
        let mut clock = FrameClock::default();
        clock.advance(0.05);
        for _ in 0..18 {
            clock.advance(0.05);
            assert!(!clock.crossed_second(), "elapsed {}", clock.elapsed());
        }
        clock.advance(0.06);
        assert!(clock.crossed_second());
    }
}
