#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod banner;
mod bridge;
mod constants;
mod dom;
mod frame;
mod hotspots;
mod overlay;

pub use bridge::{Camera, OrbitControls, Vector3};
pub use hotspots::HotspotOverlay;

fn start_banner(document: &web::Document) {
    match banner::start(document) {
        Ok(true) => {}
        Ok(false) => log::info!("[banner] not started"),
        Err(e) => log::error!("[banner] {:?}", e),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hotspot-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once_into_js(move || start_banner(&doc));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        start_banner(&document);
    }
    Ok(())
}
