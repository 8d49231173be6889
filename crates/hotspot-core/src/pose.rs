use crate::easing::ease_in_out_cubic;
use glam::Vec3;
use instant::Instant;
use std::time::Duration;

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Componentwise linear interpolation of both vectors.
    #[inline]
    pub fn lerp(&self, end: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(end.position, t),
            target: self.target.lerp(end.target, t),
        }
    }

    /// Pose that frames `point` from `offset` away, looking straight at it.
    #[inline]
    pub fn framing(point: Vec3, offset: Vec3) -> CameraPose {
        CameraPose {
            position: point + offset,
            target: point,
        }
    }
}

/// Time-based transition between two poses with cubic ease-in-out.
#[derive(Clone, Debug)]
pub struct PoseTween {
    pub from: CameraPose,
    pub to: CameraPose,
    started: Instant,
    duration: Duration,
}

impl PoseTween {
    pub fn new(from: CameraPose, to: CameraPose, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in [0, 1]. A zero duration is complete immediately.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = if now > self.started {
            now - self.started
        } else {
            Duration::ZERO
        };
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Pose at linear progress `p`, after easing.
    #[inline]
    pub fn sample(&self, p: f32) -> CameraPose {
        self.from.lerp(&self.to, ease_in_out_cubic(p))
    }

    /// Returns the pose for `now` and whether the tween has finished.
    pub fn step(&self, now: Instant) -> (CameraPose, bool) {
        let p = self.progress(now);
        if p >= 1.0 {
            (self.to, true)
        } else {
            (self.sample(p), false)
        }
    }
}
