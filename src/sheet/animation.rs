//! Timed show/hide transitions

use std::time::{Duration, Instant};

/// Animated properties of a sheet: list origin and backdrop opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetPose {
    pub list_y: f64,
    pub backdrop_opacity: f64,
}

impl SheetPose {
    pub fn new(list_y: f64, backdrop_opacity: f64) -> Self {
        Self {
            list_y,
            backdrop_opacity,
        }
    }

    fn interpolate(&self, to: &SheetPose, t: f64) -> SheetPose {
        SheetPose {
            list_y: lerp(self.list_y, to.list_y, t),
            backdrop_opacity: lerp(self.backdrop_opacity, to.backdrop_opacity, t),
        }
    }
}

/// One fire-and-forget animation between two poses.
///
/// Completion is observed by polling [`Transition::is_complete`] on each tick.
#[derive(Debug, Clone)]
pub struct Transition {
    from: SheetPose,
    to: SheetPose,
    duration: Duration,
    started_at: Instant,
}

impl Transition {
    pub fn new(from: SheetPose, to: SheetPose, duration: Duration, started_at: Instant) -> Self {
        Self {
            from,
            to,
            duration,
            started_at,
        }
    }

    /// Linear progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn pose_at(&self, now: Instant) -> SheetPose {
        self.from.interpolate(&self.to, ease_in_out(self.progress(now)))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn target(&self) -> SheetPose {
        self.to
    }

    /// Move the list destination without restarting the clock
    pub fn retarget_list(&mut self, list_y: f64) {
        self.to.list_y = list_y;
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_and_midpoint() {
        let start = Instant::now();
        let transition = Transition::new(
            SheetPose::new(24.0, 0.0),
            SheetPose::new(12.0, 1.0),
            Duration::from_millis(200),
            start,
        );

        assert_eq!(transition.pose_at(start), SheetPose::new(24.0, 0.0));
        let middle = transition.pose_at(start + Duration::from_millis(100));
        assert!((middle.list_y - 18.0).abs() < 1e-9);
        assert!((middle.backdrop_opacity - 0.5).abs() < 1e-9);
        assert!(!transition.is_complete(start + Duration::from_millis(199)));
        assert!(transition.is_complete(start + Duration::from_millis(200)));
        assert_eq!(
            transition.pose_at(start + Duration::from_secs(5)),
            SheetPose::new(12.0, 1.0)
        );
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let start = Instant::now();
        let transition = Transition::new(
            SheetPose::new(10.0, 1.0),
            SheetPose::new(20.0, 0.0),
            Duration::ZERO,
            start,
        );
        assert!(transition.is_complete(start));
        assert_eq!(transition.pose_at(start), SheetPose::new(20.0, 0.0));
    }

    #[test]
    fn test_retarget_keeps_clock() {
        let start = Instant::now();
        let mut transition = Transition::new(
            SheetPose::new(24.0, 0.0),
            SheetPose::new(12.0, 1.0),
            Duration::from_millis(100),
            start,
        );
        transition.retarget_list(4.0);
        assert_eq!(transition.target().list_y, 4.0);
        assert!(transition.is_complete(start + Duration::from_millis(100)));
    }
}
