use hotspot_core::Viewport;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(target: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Inner size of the window in CSS pixels, read at call time.
pub fn window_viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}

/// One-shot timer. Errors scheduling it are logged and the callback dropped.
pub fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) {
    let Some(w) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    let ms = delay.as_millis().min(i32::MAX as u128) as i32;
    if let Err(e) =
        w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
    {
        log::error!("setTimeout failed: {:?}", e);
    }
}

/// Run `f` on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.request_animation_frame(cb.unchecked_ref());
    }
}

pub fn apply_style(el: &web::HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (k, v) in props {
        _ = style.set_property(k, v);
    }
}

/// Non-negative integer milliseconds from a `data-*` attribute.
pub fn attr_millis(el: &web::Element, name: &str) -> Option<Duration> {
    let raw = el.get_attribute(name)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a millisecond count");
            None
        }
    }
}
