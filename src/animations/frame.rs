use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::dom;
use crate::Result;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop. `tick` receives the frame timestamp and
/// returns whether to keep going. Dropping the loop cancels the next frame.
pub struct FrameLoop {
    frame_id: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut(f64) -> bool + 'static) -> Result<Self> {
        let window = dom::window()?;
        let frame_id = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&callback);
        let id = frame_id.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            id.set(None);
            if !tick(timestamp) {
                return;
            }
            let Some(callback) = weak.upgrade() else {
                return;
            };
            let Ok(callback) = callback.try_borrow() else {
                return;
            };
            if let (Some(window), Some(cb)) = (web_sys::window(), callback.as_ref()) {
                id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = callback.borrow().as_ref() {
            frame_id.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }

        Ok(Self { frame_id, callback })
    }

    pub fn is_running(&self) -> bool {
        self.frame_id.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        if let Ok(mut callback) = self.callback.try_borrow_mut() {
            callback.take();
        }
    }
}
