use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop that runs only while its step asks for more
/// frames, and can be restarted with [`FrameLoop::kick`].
#[derive(Clone)]
pub struct FrameLoop {
    tick: Tick,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// `step` returns `true` to be called again on the next frame.
    pub fn new(mut step: impl FnMut() -> bool + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let running = Rc::new(Cell::new(false));
        let tick_clone = tick.clone();
        let running_tick = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if step() {
                request(&tick_clone);
            } else {
                running_tick.set(false);
            }
        }) as Box<dyn FnMut()>));
        Self { tick, running }
    }

    /// Start the loop unless it is already scheduled.
    pub fn kick(&self) {
        if !self.running.replace(true) {
            request(&self.tick);
        }
    }
}

fn request(tick: &Tick) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
