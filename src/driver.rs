//! Frame clock and per-tick fault isolation

use thiserror::Error;

use crate::renderer::RenderError;

/// A failed frame; the next frame runs normally
#[derive(Debug, Clone, Error)]
pub enum TickError {
    #[error("invalid frame delta: {0}")]
    InvalidDelta(f64),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Tracks the previous animation callback timestamp (ms)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `now` as the baseline for the next delta
    pub fn start(&mut self, now: f64) {
        self.last_time = Some(now);
    }

    /// Milliseconds since the previous call (or the baseline)
    ///
    /// The first call without a baseline yields 0. Callback timestamps may
    /// precede the baseline slightly; such negative deltas clamp to 0.
    pub fn delta(&mut self, now: f64) -> Result<f32, TickError> {
        if !now.is_finite() {
            return Err(TickError::InvalidDelta(now));
        }
        let dt = match self.last_time {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_time = Some(now);
        Ok(dt.max(0.0) as f32)
    }
}

/// Run one frame, logging instead of propagating failure
///
/// Returns whether the frame succeeded.
pub fn run_guarded<F>(frame: F) -> bool
where
    F: FnOnce() -> Result<(), TickError>,
{
    match frame() {
        Ok(()) => true,
        Err(err) => {
            log::error!("Error in game loop: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_from_baseline() {
        let mut clock = FrameClock::new();
        clock.start(1000.0);
        assert_eq!(clock.delta(1016.0).unwrap(), 16.0);
        assert_eq!(clock.delta(1050.0).unwrap(), 34.0);
    }

    #[test]
    fn first_delta_without_baseline_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(5000.0).unwrap(), 0.0);
        assert_eq!(clock.delta(5010.0).unwrap(), 10.0);
    }

    #[test]
    fn negative_delta_clamps() {
        let mut clock = FrameClock::new();
        clock.start(1000.0);
        assert_eq!(clock.delta(995.0).unwrap(), 0.0);
    }

    #[test]
    fn huge_delta_passes_through() {
        let mut clock = FrameClock::new();
        clock.start(0.0);
        assert_eq!(clock.delta(60_000.0).unwrap(), 60_000.0);
    }

    #[test]
    fn non_finite_is_an_error() {
        let mut clock = FrameClock::new();
        clock.start(0.0);
        assert!(matches!(clock.delta(f64::NAN), Err(TickError::InvalidDelta(_))));
        // baseline untouched
        assert_eq!(clock.delta(10.0).unwrap(), 10.0);
    }

    #[test]
    fn guarded_frame_swallows_errors() {
        assert!(run_guarded(|| Ok(())));
        assert!(!run_guarded(|| Err(TickError::InvalidDelta(f64::INFINITY))));
    }
}
