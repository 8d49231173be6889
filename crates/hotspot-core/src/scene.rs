//! Capabilities the overlay needs from the rendering side.
//!
//! The web front-end implements these over the host's three.js camera and
//! orbit controls; tests implement them with plain structs.

use crate::pose::CameraPose;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// A camera whose pose can be read and driven, paired with user controls
/// that can be switched off while the overlay animates it.
pub trait CameraRig {
    fn pose(&self) -> CameraPose;
    /// Apply a pose and let the controls resync to it.
    fn set_pose(&mut self, pose: CameraPose);
    fn input_enabled(&self) -> bool;
    fn set_input_enabled(&mut self, enabled: bool);
    /// Project a world-space point to normalized device coordinates.
    fn project(&self, world: Vec3) -> Vec3;
}

/// Geometry that can block the line of sight to an anchor.
pub trait Occluder {
    /// Distance along `dir` (unit length) to the first surface hit from
    /// `origin`, if any.
    fn nearest_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32>;
}

/// Pixel size of the area markers are placed in, read at call time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// NDC to pixels, origin top-left, y down.
    #[inline]
    pub fn ndc_to_pixels(&self, ndc: Vec3) -> Vec2 {
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.width,
            (1.0 - (ndc.y * 0.5 + 0.5)) * self.height,
        )
    }
}

/// Right-handed perspective camera with a look-at target.
///
/// Stands in for the host camera wherever no rendering context exists, such
/// as host-side tests.
#[derive(Clone, Debug)]
pub struct PerspectiveRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub input_enabled: bool,
}

impl PerspectiveRig {
    pub fn new(pose: CameraPose, aspect: f32) -> Self {
        Self {
            eye: pose.position,
            target: pose.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.1,
            zfar: 100.0,
            input_enabled: true,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

impl CameraRig for PerspectiveRig {
    fn pose(&self) -> CameraPose {
        CameraPose::new(self.eye, self.target)
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.position;
        self.target = pose.target;
    }

    fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn project(&self, world: Vec3) -> Vec3 {
        let clip = self.projection_matrix() * self.view_matrix() * Vec4::from((world, 1.0));
        clip.truncate() / clip.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners_map_to_viewport_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.ndc_to_pixels(Vec3::new(-1.0, 1.0, 0.0)), Vec2::new(0.0, 0.0));
        assert_eq!(vp.ndc_to_pixels(Vec3::new(1.0, -1.0, 0.0)), Vec2::new(800.0, 600.0));
        assert_eq!(vp.ndc_to_pixels(Vec3::ZERO), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn empty_viewport_detected() {
        assert!(Viewport::new(0.0, 600.0).is_empty());
        assert!(Viewport::new(800.0, 0.0).is_empty());
        assert!(!Viewport::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn look_at_target_projects_to_center() {
        let rig = PerspectiveRig::new(CameraPose::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO), 1.5);
        let ndc = rig.project(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}
