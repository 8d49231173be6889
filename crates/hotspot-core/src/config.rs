//! Tuning for the overlay and the banner.
//!
//! Defaults reproduce the behavior of the live product page. Hosts override
//! individual fields with struct update syntax.

use crate::pose::CameraPose;
use glam::Vec3;
use std::time::Duration;

/// Camera offset from a clicked anchor.
pub const FRAMING_OFFSET: Vec3 = Vec3::new(0.5, 0.2, 0.5);
/// Pose the reset button returns to.
pub const HOME_POSE: CameraPose = CameraPose::new(Vec3::new(0.95, 0.05, 3.08), Vec3::ZERO);
pub const CAMERA_TWEEN_MS: u64 = 1000;
/// Matches the 0.3s CSS opacity transition on the floating label.
pub const LABEL_FADE_MS: u64 = 300;
/// Slack on the occlusion test for float error, in world units.
pub const OCCLUSION_EPSILON: f32 = 0.01;

pub const BANNER_DISPLAY_MS: u64 = 3000;
pub const BANNER_TRANSITION_MS: u64 = 800;

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub framing_offset: Vec3,
    pub home_pose: CameraPose,
    pub tween_duration: Duration,
    pub label_fade: Duration,
    pub occlusion_epsilon: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            framing_offset: FRAMING_OFFSET,
            home_pose: HOME_POSE,
            tween_duration: Duration::from_millis(CAMERA_TWEEN_MS),
            label_fade: Duration::from_millis(LABEL_FADE_MS),
            occlusion_epsilon: OCCLUSION_EPSILON,
        }
    }
}

/// How long a banner line stays up, and how long each fade takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BannerTiming {
    pub display: Duration,
    pub transition: Duration,
}

impl BannerTiming {
    pub fn from_millis(display_ms: u64, transition_ms: u64) -> Self {
        Self {
            display: Duration::from_millis(display_ms),
            transition: Duration::from_millis(transition_ms),
        }
    }
}

impl Default for BannerTiming {
    fn default() -> Self {
        Self::from_millis(BANNER_DISPLAY_MS, BANNER_TRANSITION_MS)
    }
}
