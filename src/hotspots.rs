//! `HotspotOverlay`, the JavaScript-facing handle on the hotspot controller.

use crate::bridge::{Camera, JsCameraRig, OrbitControls};
use crate::constants::MARKER_CLASS;
use crate::dom;
use crate::frame::FrameLoop;
use crate::overlay::{self, MarkerRegistry, OverlayView};
use anyhow::anyhow;
use fnv::FnvHashSet;
use glam::{Mat4, Vec3};
use hotspot_core::{AnchorId, HotspotController, HotspotError, MeshSide, TickStatus, TriangleMesh};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

struct OverlayState {
    controller: HotspotController,
    rig: JsCameraRig,
    markers: MarkerRegistry,
    view: OverlayView,
    frames: Option<FrameLoop>,
    // Ids already reported as missing, so the warning is not repeated per frame.
    warned_missing: FnvHashSet<AnchorId>,
}

impl OverlayState {
    /// Apply queued commands, and re-place markers if the controller moved
    /// the camera. Hosts that redraw from the controls' `change` event call
    /// `updatePositions` while this state is borrowed, so that call is
    /// refused and the placement has to happen here.
    fn flush(&mut self) {
        for cmd in self.controller.drain_commands() {
            self.view.apply(cmd);
        }
        if self.controller.take_markers_stale() {
            self.update_positions();
        }
    }

    fn kick_frames(&self) {
        if let Some(frames) = &self.frames {
            frames.kick();
        }
    }

    /// `Ok(false)` when rejected because an animation is running.
    fn focus(&mut self, id: &AnchorId) -> Result<bool, HotspotError> {
        let result = self
            .controller
            .handle_click(id, &mut self.rig, Instant::now());
        self.flush();
        let started = accepted(result)?;
        if started {
            self.kick_frames();
        }
        Ok(started)
    }

    fn reset(&mut self) -> Result<bool, HotspotError> {
        let result = self.controller.reset_camera(&mut self.rig, Instant::now());
        self.flush();
        let started = accepted(result)?;
        if started {
            self.kick_frames();
        }
        Ok(started)
    }

    fn step_frame(&mut self) -> bool {
        let status = self.controller.tick(&mut self.rig, Instant::now());
        self.flush();
        status == TickStatus::Animating
    }

    fn update_positions(&mut self) -> usize {
        self.controller.take_markers_stale();
        let Some(viewport) = dom::window_viewport() else {
            return 0;
        };
        let placements = match self.controller.update_positions(&self.rig, viewport) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("[hotspot] skipping marker update: {e}");
                return 0;
            }
        };
        let report = self.markers.apply(&placements);
        for id in report.missing {
            if self.warned_missing.insert(id.clone()) {
                log::warn!("[hotspot] {}", HotspotError::ElementNotFound(id));
            }
        }
        report.placed
    }

    fn missing_markers(&self) -> Vec<AnchorId> {
        self.controller
            .anchors()
            .iter()
            .filter(|a| !self.markers.contains(&a.id))
            .map(|a| a.id.clone())
            .collect()
    }
}

fn accepted(result: Result<(), HotspotError>) -> Result<bool, HotspotError> {
    match result {
        Ok(()) => Ok(true),
        Err(HotspotError::AnimationInProgress) => Ok(false),
        Err(e) => Err(e),
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn wire_marker_click(state: &Rc<RefCell<OverlayState>>, id: AnchorId, el: &web::HtmlElement) {
    let state = state.clone();
    dom::add_click_listener(el, move || {
        if let Err(e) = state.borrow_mut().focus(&id) {
            log::warn!("[hotspot] click on {id}: {e}");
        }
    });
}

/// Hotspot overlay bound to a three.js camera and its orbit controls.
///
/// Seeded markers are picked up from the document by id at construction;
/// others are registered with `registerMarker` or created by `addTooltip`.
/// Call `updatePositions` once per rendered frame.
#[wasm_bindgen]
pub struct HotspotOverlay {
    state: Rc<RefCell<OverlayState>>,
    document: web::Document,
}

#[wasm_bindgen]
impl HotspotOverlay {
    #[wasm_bindgen(constructor)]
    pub fn new(camera: Camera, controls: OrbitControls) -> Result<HotspotOverlay, JsValue> {
        let document = dom::window_document().ok_or_else(|| js_err("no document"))?;
        let view = OverlayView::new(document.clone()).map_err(|e| js_err(format!("{e:?}")))?;
        let state = Rc::new(RefCell::new(OverlayState {
            controller: HotspotController::new(),
            rig: JsCameraRig::new(camera, controls),
            markers: MarkerRegistry::default(),
            view,
            frames: None,
            warned_missing: FnvHashSet::default(),
        }));

        let state_frames = state.clone();
        let frames = FrameLoop::new(move || state_frames.borrow_mut().step_frame());
        state.borrow_mut().frames = Some(frames);

        let reset_button = state.borrow().view.reset_button().clone();
        let state_reset = state.clone();
        dom::add_click_listener(&reset_button, move || {
            if let Err(e) = state_reset.borrow_mut().reset() {
                log::warn!("[hotspot] reset: {e}");
            }
        });

        let overlay = HotspotOverlay { state, document };
        overlay.bind_seeded_markers();
        Ok(overlay)
    }

    /// Register the element that marks anchor `id`.
    #[wasm_bindgen(js_name = registerMarker)]
    pub fn register_marker(&self, id: String, element: web::HtmlElement) -> Result<(), JsValue> {
        let id = AnchorId::new(id);
        {
            let s = self.state.borrow();
            if s.controller.anchor(&id).is_none() {
                return Err(js_err(HotspotError::UnknownAnchor(id)));
            }
            if s.markers.contains(&id) {
                return Err(js_err(HotspotError::DuplicateAnchor(id)));
            }
        }
        self.bind(id, element);
        Ok(())
    }

    /// Use a flat `xyz` position buffer (and optional triangle indices) as
    /// the occluding model.
    ///
    /// Positions must be in world space: either pass them pre-transformed, or
    /// pass the mesh's column-major `matrixWorld.elements` as `matrix_world`.
    /// A model made of several meshes must be merged into one buffer pair
    /// (each part moved to world space first). `double_sided` matches a
    /// `DoubleSide` material; otherwise only front faces occlude.
    #[wasm_bindgen(js_name = setModel)]
    pub fn set_model(
        &self,
        positions: &[f32],
        indices: &[u32],
        matrix_world: Option<Vec<f32>>,
        double_sided: Option<bool>,
    ) -> Result<(), JsValue> {
        let side = if double_sided.unwrap_or(false) {
            MeshSide::Double
        } else {
            MeshSide::Front
        };
        let mut mesh = TriangleMesh::from_buffers(positions, indices)
            .map_err(js_err)?
            .with_side(side);
        if let Some(m) = matrix_world {
            let cols: [f32; 16] = m
                .as_slice()
                .try_into()
                .map_err(|_| js_err(format!("matrix_world needs 16 elements, got {}", m.len())))?;
            mesh = mesh.transformed(Mat4::from_cols_array(&cols));
        }
        log::info!(
            "[hotspot] model set: {} triangles, {:?}",
            mesh.triangle_count(),
            side
        );
        let mut s = self.state.borrow_mut();
        s.controller.set_model(Box::new(mesh));
        s.flush();
        Ok(())
    }

    #[wasm_bindgen(js_name = clearModel)]
    pub fn clear_model(&self) {
        self.state.borrow_mut().controller.clear_model();
    }

    #[wasm_bindgen(js_name = hasModel)]
    pub fn has_model(&self) -> bool {
        self.state.borrow().controller.has_model()
    }

    /// Add an anchor and create its marker element.
    #[wasm_bindgen(js_name = addTooltip)]
    pub fn add_tooltip(&self, x: f32, y: f32, z: f32, label: String, id: String) -> Result<(), JsValue> {
        self.try_add_tooltip(Vec3::new(x, y, z), label, AnchorId::new(id))
            .map_err(|e| js_err(format!("{e:?}")))
    }

    /// Reposition and show/hide every marker. Returns how many were updated.
    #[wasm_bindgen(js_name = updatePositions)]
    pub fn update_positions(&self) -> u32 {
        // Posing the camera makes OrbitControls emit `change` synchronously,
        // and hosts often redraw from that listener.
        match self.state.try_borrow_mut() {
            Ok(mut s) => s.update_positions() as u32,
            Err(_) => 0,
        }
    }

    /// Fly to anchor `id`. `false` if another animation is still running.
    pub fn focus(&self, id: String) -> Result<bool, JsValue> {
        let mut s = self.state.try_borrow_mut().map_err(|_| js_err("overlay is busy"))?;
        s.focus(&AnchorId::new(id)).map_err(js_err)
    }

    /// Fly back home. `false` if another animation is still running.
    #[wasm_bindgen(js_name = resetCamera)]
    pub fn reset_camera(&self) -> bool {
        let Ok(mut s) = self.state.try_borrow_mut() else {
            return false;
        };
        match s.reset() {
            Ok(started) => started,
            Err(e) => {
                log::warn!("[hotspot] reset: {e}");
                false
            }
        }
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        // Busy only while a click or frame step is being handled.
        self.state
            .try_borrow()
            .map(|s| s.controller.is_animating())
            .unwrap_or(true)
    }

    /// Anchor ids that have no marker element.
    #[wasm_bindgen(js_name = missingMarkers)]
    pub fn missing_markers(&self) -> js_sys::Array {
        self.state
            .borrow()
            .missing_markers()
            .into_iter()
            .map(|id| JsValue::from_str(id.as_str()))
            .collect()
    }
}

impl HotspotOverlay {
    fn bind_seeded_markers(&self) {
        let ids: Vec<AnchorId> = self
            .state
            .borrow()
            .controller
            .anchors()
            .iter()
            .map(|a| a.id.clone())
            .collect();
        let mut bound = 0usize;
        for id in ids {
            let Some(el) = self
                .document
                .get_element_by_id(id.as_str())
                .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
            else {
                continue;
            };
            self.bind(id, el);
            bound += 1;
        }
        log::info!("[hotspot] bound {bound} seeded markers");
    }

    fn bind(&self, id: AnchorId, el: web::HtmlElement) {
        wire_marker_click(&self.state, id.clone(), &el);
        self.state.borrow_mut().markers.insert(id, el);
    }

    fn try_add_tooltip(&self, position: Vec3, label: String, id: AnchorId) -> anyhow::Result<()> {
        if self.document.get_element_by_id(id.as_str()).is_some() {
            return Err(HotspotError::DuplicateAnchor(id).into());
        }
        let document = &self.document;
        // The anchor is only recorded once its element is on the page.
        let el = self.state.borrow_mut().controller.add_tooltip_with(
            position,
            label,
            id.clone(),
            |id| -> anyhow::Result<web::HtmlElement> {
                let el = overlay::create_html_element(document, "div")?;
                el.set_id(id.as_str());
                el.set_class_name(MARKER_CLASS);
                _ = el.style().set_property("display", "none");
                overlay::body(document)?
                    .append_child(&el)
                    .map_err(|e| anyhow!("append marker: {:?}", e))?;
                Ok(el)
            },
        )?;
        self.bind(id, el);
        Ok(())
    }
}
