use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds, multiplied by the time scale.
    ///
    /// This is zero while a pausing menu holds the time scale at `0.0`.
    pub dt: f32,

    /// Time elapsed since the previous tick, in seconds, ignoring the time scale.
    pub unscaled_dt: f32,

    /// Unscaled seconds accumulated since the clock was created or reset.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn new() -> Self {
        Self::with_clamps(
            Duration::from_micros(100), // 0.0001s
            Duration::from_millis(250), // 0.25s
        )
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline and elapsed time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.elapsed = 0.0;
    }

    /// Index the next `tick` will report.
    pub fn next_frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock using wall time and returns a new `FrameTime`.
    ///
    /// `time_scale` is the host's current scale; negative values are treated as `1.0`.
    pub fn tick(&mut self, time_scale: f32) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.advance(now, dt, time_scale)
    }

    /// Advances the clock by a fixed step instead of wall time.
    ///
    /// Used by scripted hosts and tests that need reproducible frames.
    pub fn tick_fixed(&mut self, dt: Duration, time_scale: f32) -> FrameTime {
        let now = self.last + dt;
        self.advance(now, dt, time_scale)
    }

    fn advance(&mut self, now: Instant, mut dt: Duration, time_scale: f32) -> FrameTime {
        // Clamp delta time to keep downstream systems stable.
        if dt < self.dt_min {
            dt = self.dt_min;
        } else if dt > self.dt_max {
            dt = self.dt_max;
        }

        self.last = now;
        self.elapsed += dt.as_secs_f64();

        let scale = if time_scale < 0.0 { 1.0 } else { time_scale };
        let unscaled_dt = dt.as_secs_f32();

        let ft = FrameTime {
            dt: unscaled_dt * scale,
            unscaled_dt,
            elapsed: self.elapsed,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(16);

    #[test]
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_fixed(STEP, 1.0).frame_index, 0);
        assert_eq!(clock.tick_fixed(STEP, 1.0).frame_index, 1);
        assert_eq!(clock.next_frame_index(), 2);
    }

    #[test]
    fn zero_time_scale_freezes_scaled_dt_only() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_fixed(STEP, 0.0);
        assert_eq!(ft.dt, 0.0);
        assert!((ft.unscaled_dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn negative_time_scale_means_unscaled() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_fixed(STEP, -1.0);
        assert_eq!(ft.dt, ft.unscaled_dt);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_fixed(Duration::from_secs(5), 1.0);
        assert!((ft.unscaled_dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 0.25).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick_fixed(STEP, 1.0);
        clock.reset();
        let ft = clock.tick_fixed(STEP, 1.0);
        assert!((ft.elapsed - 0.016).abs() < 1e-6);
    }
}
