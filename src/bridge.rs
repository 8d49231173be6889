//! Typed access to the host's three.js camera and orbit controls.
//!
//! Only the handful of members the overlay needs are imported; the objects
//! are passed in from JavaScript and used structurally.

use glam::Vec3;
use hotspot_core::{CameraPose, CameraRig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Vector3;

    #[wasm_bindgen(method, getter)]
    fn x(this: &Vector3) -> f64;
    #[wasm_bindgen(method, getter)]
    fn y(this: &Vector3) -> f64;
    #[wasm_bindgen(method, getter)]
    fn z(this: &Vector3) -> f64;
    #[wasm_bindgen(method)]
    fn set(this: &Vector3, x: f64, y: f64, z: f64) -> Vector3;
    #[wasm_bindgen(method, js_name = clone)]
    fn copy(this: &Vector3) -> Vector3;
    /// Projects in place through the camera and returns `this`.
    #[wasm_bindgen(method)]
    fn project(this: &Vector3, camera: &Camera) -> Vector3;

    pub type Camera;

    #[wasm_bindgen(method, getter)]
    fn position(this: &Camera) -> Vector3;
    #[wasm_bindgen(method, js_name = updateMatrixWorld)]
    fn update_matrix_world(this: &Camera);

    pub type OrbitControls;

    #[wasm_bindgen(method, getter)]
    fn target(this: &OrbitControls) -> Vector3;
    #[wasm_bindgen(method, getter)]
    fn enabled(this: &OrbitControls) -> bool;
    #[wasm_bindgen(method, setter)]
    fn set_enabled(this: &OrbitControls, enabled: bool);
    #[wasm_bindgen(method)]
    fn update(this: &OrbitControls) -> bool;
}

#[inline]
fn to_vec3(v: &Vector3) -> Vec3 {
    Vec3::new(v.x() as f32, v.y() as f32, v.z() as f32)
}

#[inline]
fn assign(v: &Vector3, p: Vec3) {
    v.set(p.x as f64, p.y as f64, p.z as f64);
}

/// [`CameraRig`] over a three.js camera and its `OrbitControls`.
pub struct JsCameraRig {
    camera: Camera,
    controls: OrbitControls,
}

impl JsCameraRig {
    pub fn new(camera: Camera, controls: OrbitControls) -> Self {
        Self { camera, controls }
    }
}

impl CameraRig for JsCameraRig {
    fn pose(&self) -> CameraPose {
        CameraPose::new(
            to_vec3(&self.camera.position()),
            to_vec3(&self.controls.target()),
        )
    }

    fn set_pose(&mut self, pose: CameraPose) {
        assign(&self.camera.position(), pose.position);
        assign(&self.controls.target(), pose.target);
        self.controls.update();
    }

    fn input_enabled(&self) -> bool {
        self.controls.enabled()
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.controls.set_enabled(enabled);
    }

    fn project(&self, world: Vec3) -> Vec3 {
        self.camera.update_matrix_world();
        // Scratch vector borrowed from the camera so no constructor import is
        // needed.
        let scratch = self.camera.position().copy();
        assign(&scratch, world);
        to_vec3(&scratch.project(&self.camera))
    }
}
