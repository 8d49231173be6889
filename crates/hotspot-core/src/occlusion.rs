use crate::scene::Occluder;
use glam::Vec3;

/// Why a marker ended up shown or hidden this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityReason {
    /// No model has been registered yet; markers are always shown.
    NoModel,
    /// The ray toward the anchor hit nothing.
    NoHit,
    /// The first hit is at (or within epsilon of) the anchor itself.
    LineOfSight,
    /// The model is in front of the anchor.
    Occluded,
}

impl VisibilityReason {
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, VisibilityReason::Occluded)
    }
}

/// Visibility rule given the first hit distance along the ray.
#[inline]
pub fn classify_hit(hit: Option<f32>, anchor_distance: f32, epsilon: f32) -> VisibilityReason {
    match hit {
        None => VisibilityReason::NoHit,
        Some(d) if d >= anchor_distance - epsilon => VisibilityReason::LineOfSight,
        Some(_) => VisibilityReason::Occluded,
    }
}

/// Cast from `eye` toward `point` and decide whether `model` blocks it.
pub fn line_of_sight(
    model: Option<&dyn Occluder>,
    eye: Vec3,
    point: Vec3,
    epsilon: f32,
) -> VisibilityReason {
    let Some(model) = model else {
        return VisibilityReason::NoModel;
    };
    let to_point = point - eye;
    let distance = to_point.length();
    let dir = to_point.normalize_or_zero();
    if dir == Vec3::ZERO {
        // Camera sits on the anchor; nothing can be in between.
        return VisibilityReason::LineOfSight;
    }
    classify_hit(model.nearest_hit(eye, dir), distance, epsilon)
}
