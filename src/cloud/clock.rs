/// Monotonic animation time in seconds.
///
/// Owned by the render loop; advanced once per frame before the uniform is
/// written and handed to the shading stage by reference.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    time: f32,
}

impl FrameClock {
    /// A clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { time: 0.0 }
    }

    /// Advance by the elapsed frame delta. Negative or non-finite deltas
    /// are ignored so time never runs backwards.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
    }

    /// Current time in seconds.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Rewind to zero (scene remount).
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(FrameClock::new().time(), 0.0);
        assert_eq!(FrameClock::default(), FrameClock::new());
    }

    #[test]
    fn accumulates_deltas() {
        let mut clock = FrameClock::new();
        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        assert!((clock.time() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ignores_bad_deltas() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        clock.advance(f32::INFINITY);
        assert_eq!(clock.time(), 0.5);
    }

    #[test]
    fn reset_rewinds() {
        let mut clock = FrameClock::new();
        clock.advance(3.0);
        clock.reset();
        assert_eq!(clock.time(), 0.0);
    }
}
