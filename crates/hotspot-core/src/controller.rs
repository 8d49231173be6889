//! Hotspot overlay state: anchors, occlusion, click-to-focus camera tweens
//! and the floating label.
//!
//! The controller never touches the page. It drives a [`CameraRig`] and
//! queues [`OverlayCommand`]s that the host applies to its elements.

use crate::anchor::{seeded_anchors, AnchorId, AnchorPoint};
use crate::config::OverlayConfig;
use crate::error::HotspotError;
use crate::label::{LabelHandle, LabelSlot, ShownLabel};
use crate::occlusion::{line_of_sight, VisibilityReason};
use crate::pose::{CameraPose, PoseTween};
use crate::scene::{CameraRig, Occluder, Viewport};
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use instant::Instant;
use smallvec::SmallVec;
use std::time::Duration;

/// Page-side effect requested by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayCommand {
    /// Create the floating label and fade it in.
    ShowLabel { handle: LabelHandle, text: String },
    /// Fade the label out now and remove it once `remove_after` has passed.
    RetireLabel {
        handle: LabelHandle,
        remove_after: Duration,
    },
    SetResetVisible(bool),
}

pub type CommandBatch = SmallVec<[OverlayCommand; 4]>;

/// Screen placement for one marker this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPlacement {
    pub id: AnchorId,
    pub screen: Vec2,
    pub reason: VisibilityReason,
}

impl MarkerPlacement {
    #[inline]
    pub fn visible(&self) -> bool {
        self.reason.is_visible()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TweenKind {
    Focus(AnchorId),
    Home,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Idle,
    Animating,
    Finished,
}

#[derive(Debug)]
struct ActiveTween {
    tween: PoseTween,
    kind: TweenKind,
}

pub struct HotspotController {
    config: OverlayConfig,
    anchors: Vec<AnchorPoint>,
    index: FnvHashMap<AnchorId, usize>,
    model: Option<Box<dyn Occluder>>,
    active: Option<ActiveTween>,
    label: LabelSlot,
    reset_visible: bool,
    // Set whenever a pose or the anchor/model set changed since the host last
    // placed markers.
    markers_stale: bool,
    commands: CommandBatch,
}

impl Default for HotspotController {
    fn default() -> Self {
        Self::new()
    }
}

impl HotspotController {
    /// Controller seeded with the page's hotspots and default tuning.
    pub fn new() -> Self {
        Self::with_anchors(OverlayConfig::default(), seeded_anchors())
    }

    /// Later duplicates of an id are dropped with a warning.
    pub fn with_anchors(config: OverlayConfig, anchors: Vec<AnchorPoint>) -> Self {
        let mut ctl = Self {
            config,
            anchors: Vec::with_capacity(anchors.len()),
            index: FnvHashMap::default(),
            model: None,
            active: None,
            label: LabelSlot::new(),
            reset_visible: false,
            markers_stale: true,
            commands: CommandBatch::new(),
        };
        for a in anchors {
            if let Err(e) = ctl.push_anchor(a) {
                log::warn!("[hotspot] skipping seeded anchor: {e}");
            }
        }
        ctl
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    pub fn anchor(&self, id: &AnchorId) -> Option<&AnchorPoint> {
        self.index.get(id).map(|&i| &self.anchors[i])
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<&TweenKind> {
        self.active.as_ref().map(|a| &a.kind)
    }

    pub fn reset_visible(&self) -> bool {
        self.reset_visible
    }

    pub fn current_label(&self) -> Option<&ShownLabel> {
        self.label.current()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Register the geometry used for occlusion tests.
    pub fn set_model(&mut self, model: Box<dyn Occluder>) {
        log::debug!("[hotspot] occlusion model set");
        self.model = Some(model);
        self.markers_stale = true;
    }

    pub fn clear_model(&mut self) {
        self.model = None;
        self.markers_stale = true;
    }

    /// Whether markers need placing again because the controller moved the
    /// camera or changed anchors or model. Clears the flag.
    pub fn take_markers_stale(&mut self) -> bool {
        std::mem::take(&mut self.markers_stale)
    }

    /// Append an anchor at runtime. It behaves exactly like a seeded one.
    pub fn add_tooltip(
        &mut self,
        position: Vec3,
        label: impl Into<String>,
        id: impl Into<AnchorId>,
    ) -> Result<(), HotspotError> {
        self.push_anchor(AnchorPoint::new(id, position, label))
    }

    /// Like [`add_tooltip`](Self::add_tooltip), but the anchor is only added
    /// once `build` has produced its marker. A failed build leaves the
    /// controller untouched, so the same id can be retried.
    pub fn add_tooltip_with<M, E>(
        &mut self,
        position: Vec3,
        label: impl Into<String>,
        id: impl Into<AnchorId>,
        build: impl FnOnce(&AnchorId) -> Result<M, E>,
    ) -> Result<M, E>
    where
        E: From<HotspotError>,
    {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(HotspotError::DuplicateAnchor(id).into());
        }
        let marker = build(&id)?;
        self.push_anchor(AnchorPoint::new(id, position, label))?;
        Ok(marker)
    }

    fn push_anchor(&mut self, anchor: AnchorPoint) -> Result<(), HotspotError> {
        if self.index.contains_key(&anchor.id) {
            return Err(HotspotError::DuplicateAnchor(anchor.id));
        }
        self.index.insert(anchor.id.clone(), self.anchors.len());
        self.anchors.push(anchor);
        self.markers_stale = true;
        Ok(())
    }

    /// Project every anchor for the current frame and decide its visibility.
    ///
    /// Call once per rendered frame; viewport size is taken as given.
    pub fn update_positions(
        &self,
        rig: &impl CameraRig,
        viewport: Viewport,
    ) -> Result<Vec<MarkerPlacement>, HotspotError> {
        if viewport.is_empty() {
            return Err(HotspotError::EmptyViewport);
        }
        let eye = rig.pose().position;
        let model = self.model.as_deref();
        Ok(self
            .anchors
            .iter()
            .map(|a| MarkerPlacement {
                id: a.id.clone(),
                screen: viewport.ndc_to_pixels(rig.project(a.position)),
                reason: line_of_sight(model, eye, a.position, self.config.occlusion_epsilon),
            })
            .collect())
    }

    /// Fly the camera to frame the anchor `id` and show its label.
    ///
    /// Rejected without any state change while another tween is running.
    pub fn handle_click(
        &mut self,
        id: &AnchorId,
        rig: &mut impl CameraRig,
        now: Instant,
    ) -> Result<(), HotspotError> {
        if self.active.is_some() {
            log::debug!("[hotspot] click on {id} ignored, animation running");
            return Err(HotspotError::AnimationInProgress);
        }
        let anchor = self
            .anchor(id)
            .cloned()
            .ok_or_else(|| HotspotError::UnknownAnchor(id.clone()))?;

        self.retire_label();
        let from = rig.pose();
        let to = CameraPose::framing(anchor.position, self.config.framing_offset);
        rig.set_input_enabled(false);
        self.begin(from, to, TweenKind::Focus(anchor.id.clone()), now);

        let (handle, displaced) = self.label.replace(anchor.id, anchor.label.clone());
        debug_assert!(displaced.is_none());
        self.commands.push(OverlayCommand::ShowLabel {
            handle,
            text: anchor.label,
        });

        self.tick(rig, now);
        Ok(())
    }

    /// Tween back to the home pose and give the camera back to the user.
    pub fn reset_camera(
        &mut self,
        rig: &mut impl CameraRig,
        now: Instant,
    ) -> Result<(), HotspotError> {
        if self.active.is_some() {
            log::debug!("[hotspot] reset ignored, animation running");
            return Err(HotspotError::AnimationInProgress);
        }
        self.retire_label();
        self.set_reset_visible(false);
        let from = rig.pose();
        rig.set_input_enabled(false);
        self.begin(from, self.config.home_pose, TweenKind::Home, now);
        self.tick(rig, now);
        Ok(())
    }

    /// Advance the running tween to `now`. Call every display frame.
    pub fn tick(&mut self, rig: &mut impl CameraRig, now: Instant) -> TickStatus {
        let Some(active) = &self.active else {
            return TickStatus::Idle;
        };
        let (pose, done) = active.tween.step(now);
        rig.set_pose(pose);
        self.markers_stale = true;
        if !done {
            return TickStatus::Animating;
        }
        let Some(finished) = self.active.take() else {
            return TickStatus::Idle;
        };
        match finished.kind {
            TweenKind::Focus(id) => {
                log::debug!("[hotspot] focused {id}");
                rig.set_input_enabled(false);
                self.set_reset_visible(true);
            }
            TweenKind::Home => {
                log::debug!("[hotspot] back home");
                rig.set_input_enabled(true);
            }
        }
        TickStatus::Finished
    }

    /// Commands queued since the last drain, in order.
    pub fn drain_commands(&mut self) -> CommandBatch {
        std::mem::take(&mut self.commands)
    }

    fn begin(&mut self, from: CameraPose, to: CameraPose, kind: TweenKind, now: Instant) {
        log::debug!(
            "[hotspot] tween {:?} to pos=({:.3},{:.3},{:.3})",
            kind,
            to.position.x,
            to.position.y,
            to.position.z
        );
        self.active = Some(ActiveTween {
            tween: PoseTween::new(from, to, now, self.config.tween_duration),
            kind,
        });
    }

    fn retire_label(&mut self) {
        if let Some(handle) = self.label.take() {
            self.commands.push(OverlayCommand::RetireLabel {
                handle,
                remove_after: self.config.label_fade,
            });
        }
    }

    fn set_reset_visible(&mut self, visible: bool) {
        if self.reset_visible != visible {
            self.reset_visible = visible;
            self.commands.push(OverlayCommand::SetResetVisible(visible));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PerspectiveRig;

    fn rig() -> PerspectiveRig {
        PerspectiveRig::new(crate::config::HOME_POSE, 16.0 / 9.0)
    }

    #[test]
    fn seeded_controller_has_all_anchors() {
        let ctl = HotspotController::new();
        assert_eq!(ctl.anchors().len(), 13);
        assert!(ctl.anchor(&"tooltip-7".into()).is_some());
        assert!(!ctl.is_animating());
        assert!(!ctl.has_model());
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut ctl = HotspotController::new();
        let err = ctl
            .add_tooltip(Vec3::ZERO, "again", "tooltip-1")
            .unwrap_err();
        assert_eq!(err, HotspotError::DuplicateAnchor("tooltip-1".into()));
        assert_eq!(ctl.anchors().len(), 13);
    }

    #[test]
    fn unknown_anchor_click_changes_nothing() {
        let mut ctl = HotspotController::new();
        let mut r = rig();
        let before = r.pose();
        let err = ctl
            .handle_click(&"nope".into(), &mut r, Instant::now())
            .unwrap_err();
        assert_eq!(err, HotspotError::UnknownAnchor("nope".into()));
        assert_eq!(r.pose(), before);
        assert!(r.input_enabled());
        assert!(ctl.drain_commands().is_empty());
    }

    #[test]
    fn tick_without_tween_is_idle() {
        let mut ctl = HotspotController::new();
        let mut r = rig();
        assert_eq!(ctl.tick(&mut r, Instant::now()), TickStatus::Idle);
    }

    #[test]
    fn applying_a_pose_marks_markers_stale() {
        let mut ctl = HotspotController::new();
        let mut r = rig();
        assert!(ctl.take_markers_stale());
        assert!(!ctl.take_markers_stale());

        let t0 = Instant::now();
        ctl.handle_click(&"tooltip-3".into(), &mut r, t0).unwrap();
        assert!(ctl.take_markers_stale());
        ctl.tick(&mut r, t0 + Duration::from_millis(400));
        assert!(ctl.take_markers_stale());
        ctl.tick(&mut r, t0 + Duration::from_millis(1000));
        assert!(ctl.take_markers_stale());

        // Nothing running: no pose applied, nothing to refresh.
        ctl.tick(&mut r, t0 + Duration::from_millis(1100));
        assert!(!ctl.take_markers_stale());

        // A rejected click applies no pose either.
        ctl.reset_camera(&mut r, t0 + Duration::from_millis(1200)).unwrap();
        ctl.take_markers_stale();
        assert!(ctl.handle_click(&"tooltip-1".into(), &mut r, t0 + Duration::from_millis(1300)).is_err());
        assert!(!ctl.take_markers_stale());
    }

    #[test]
    fn failed_marker_build_leaves_id_free() {
        let mut ctl = HotspotController::new();
        let err = ctl
            .add_tooltip_with(Vec3::ONE, "new", "tooltip-new", |id| {
                Err::<(), _>(HotspotError::ElementNotFound(id.clone()))
            })
            .unwrap_err();
        assert_eq!(err, HotspotError::ElementNotFound("tooltip-new".into()));
        assert!(ctl.anchor(&"tooltip-new".into()).is_none());
        assert_eq!(ctl.anchors().len(), 13);

        let built = ctl
            .add_tooltip_with(Vec3::ONE, "new", "tooltip-new", |id| {
                Ok::<_, HotspotError>(id.as_str().len())
            })
            .unwrap();
        assert_eq!(built, "tooltip-new".len());
        assert_eq!(ctl.anchor(&"tooltip-new".into()).unwrap().label, "new");
    }

    #[test]
    fn duplicate_id_is_refused_before_building() {
        let mut ctl = HotspotController::new();
        let mut built = false;
        let err = ctl
            .add_tooltip_with(Vec3::ZERO, "dup", "tooltip-2", |_| {
                built = true;
                Ok::<(), HotspotError>(())
            })
            .unwrap_err();
        assert_eq!(err, HotspotError::DuplicateAnchor("tooltip-2".into()));
        assert!(!built);
    }

    #[test]
    fn empty_viewport_is_an_error() {
        let ctl = HotspotController::new();
        let err = ctl.update_positions(&rig(), Viewport::new(0.0, 0.0)).unwrap_err();
        assert_eq!(err, HotspotError::EmptyViewport);
    }
}
