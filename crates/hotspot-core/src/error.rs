use crate::anchor::AnchorId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotspotError {
    #[error("a camera animation is already running")]
    AnimationInProgress,
    #[error("no anchor with id `{0}`")]
    UnknownAnchor(AnchorId),
    #[error("anchor id `{0}` is already in use")]
    DuplicateAnchor(AnchorId),
    #[error("no marker element registered for `{0}`")]
    ElementNotFound(AnchorId),
    #[error("viewport has zero area")]
    EmptyViewport,
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BannerError {
    #[error("banner needs at least one line")]
    NoLines,
    #[error("display and transition durations are both zero")]
    ZeroDuration,
}
