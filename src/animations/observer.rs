use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::Result;

/// An `IntersectionObserver` that calls back once per element the first
/// time it becomes visible, then stops watching that element.
///
/// Dropping the observer disconnects it.
pub struct OnceVisible {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl OnceVisible {
    pub fn new(threshold: f64, root_margin: Option<&str>, mut on_visible: impl FnMut(Element) + 'static) -> Result<Self> {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Self { observer, _callback: callback })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    pub fn observe_all<'a>(&self, elements: impl IntoIterator<Item = &'a Element>) {
        for element in elements {
            self.observe(element);
        }
    }
}

impl Drop for OnceVisible {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
