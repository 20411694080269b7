//! Single-shot sweep animation sampled by the host frame loop.

use std::time::{Duration, Instant};

use log::{debug, trace};

/// Progress curve applied to the normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start and end, the stock curve of platform value animators.
    AccelerateDecelerate,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => {
                ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Finished,
    Cancelled,
}

/// Interpolates a scalar from `from` to `to` once over `duration`.
///
/// The clock starts on the first [`SweepAnimator::tick`] after
/// [`SweepAnimator::start`].
#[derive(Debug, Clone)]
pub struct SweepAnimator {
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    state: AnimatorState,
    started_at: Option<Instant>,
}

impl SweepAnimator {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            state: AnimatorState::Idle,
            started_at: None,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start(&mut self) {
        if self.state == AnimatorState::Idle {
            self.state = AnimatorState::Running;
        }
    }

    /// Value after `elapsed` time. Pure; ignores the animator state.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if elapsed >= self.duration {
            return self.to;
        }
        if elapsed.is_zero() {
            return self.from;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Samples the animation at `now`. Yields one value per call while
    /// running; the sample that reaches the end value finishes the run.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if self.state != AnimatorState::Running {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let value = self.value_at(elapsed);
        trace!("Sweep sample {:.2} at {:?}", value, elapsed);

        if elapsed >= self.duration {
            self.state = AnimatorState::Finished;
            debug!("Sweep finished after {:?}", elapsed);
        }
        Some(value)
    }

    /// Stops a running animation. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }
        self.state = AnimatorState::Cancelled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_seconds() -> SweepAnimator {
        SweepAnimator::new(0.0, 360.0, Duration::from_secs(2), Easing::Linear)
    }

    #[test]
    fn test_endpoints_exact() {
        for secs in 1..=30 {
            for easing in [Easing::Linear, Easing::AccelerateDecelerate] {
                let anim = SweepAnimator::new(0.0, 360.0, Duration::from_secs(secs), easing);
                assert_eq!(anim.value_at(Duration::ZERO), 0.0);
                assert_eq!(anim.value_at(Duration::from_secs(secs)), 360.0);
                assert_eq!(anim.value_at(Duration::from_secs(secs + 5)), 360.0);
            }
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let anim = two_seconds();
        assert!((anim.value_at(Duration::from_millis(500)) - 90.0).abs() < 1e-3);
        assert!((anim.value_at(Duration::from_secs(1)) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_accelerate_decelerate_curve() {
        assert!(Easing::AccelerateDecelerate.apply(0.1) < 0.1);
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::AccelerateDecelerate.apply(0.9) > 0.9);
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut anim = two_seconds();
        assert_eq!(anim.tick(Instant::now()), None);
        assert_eq!(anim.state(), AnimatorState::Idle);
    }

    #[test]
    fn test_runs_once() {
        let mut anim = two_seconds();
        anim.start();
        let t0 = Instant::now();

        assert_eq!(anim.tick(t0), Some(0.0));
        let mid = anim.tick(t0 + Duration::from_secs(1)).unwrap_or_default();
        assert!((mid - 180.0).abs() < 1e-3);
        assert_eq!(anim.tick(t0 + Duration::from_secs(2)), Some(360.0));
        assert_eq!(anim.state(), AnimatorState::Finished);
        assert_eq!(anim.tick(t0 + Duration::from_secs(3)), None);

        anim.start();
        assert_eq!(anim.state(), AnimatorState::Finished);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut anim = two_seconds();
        assert!(!anim.cancel());

        anim.start();
        let t0 = Instant::now();
        anim.tick(t0);
        assert!(anim.cancel());
        assert!(!anim.cancel());
        assert_eq!(anim.state(), AnimatorState::Cancelled);
        assert_eq!(anim.tick(t0 + Duration::from_millis(16)), None);
    }
}
