//! Typed handles over the rendered page, plus the small DOM helpers the
//! controllers share.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

use crate::{Error, Result};

pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(Error::NoWindow)
}

pub fn body() -> Result<HtmlElement> {
    document()?.body().ok_or_else(|| Error::MissingElement("body".to_string()))
}

/// Collects a `NodeList` into elements, skipping text and comment nodes.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Direct element children of `parent`, in order.
pub fn elements_of(parent: &Element) -> Vec<Element> {
    let mut children = Vec::new();
    let mut next = parent.first_element_child();
    while let Some(child) = next {
        next = child.next_element_sibling();
        children.push(child);
    }
    children
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn create_element(document: &Document, tag: &str, class_name: &str, attributes: &[(&str, &str)]) -> Result<Element> {
    let element = document.create_element(tag)?;
    if !class_name.is_empty() {
        element.set_class_name(class_name);
    }
    for (key, value) in attributes {
        element.set_attribute(key, value)?;
    }
    Ok(element)
}

pub fn insert_after(new_element: &Element, reference: &Element) -> Result<()> {
    if let Some(parent) = reference.parent_node() {
        parent.insert_before(new_element, reference.next_sibling().as_ref())?;
    }
    Ok(())
}

pub fn insert_before(new_element: &Element, reference: &Element) -> Result<()> {
    if let Some(parent) = reference.parent_node() {
        parent.insert_before(new_element, Some(&**reference))?;
    }
    Ok(())
}

pub fn empty(element: &Element) {
    while let Some(child) = element.first_child() {
        let _ = element.remove_child(&child);
    }
}

pub fn set_class(element: &Element, class_name: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class_name, on);
}

pub fn has_class(element: &Element, class_name: &str) -> bool {
    element.class_list().contains(class_name)
}

/// Sets inline style properties, ignoring elements that are not `HtmlElement`s.
pub fn set_style(element: &Element, properties: &[(&str, &str)]) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let style = el.style();
        for (name, value) in properties {
            let _ = style.set_property(name, value);
        }
    }
}

pub fn data_attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", name))
}

/// An event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(target: &EventTarget, event: &'static str, callback: impl FnMut(Event) + 'static) -> Result<Self> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Attaches one listener to `parent` that runs `handler` with the closest
/// element matching `selector` around the event target.
pub fn delegate(
    parent: &EventTarget,
    selector: &str,
    event: &'static str,
    mut handler: impl FnMut(Element, Event) + 'static,
) -> Result<Listener> {
    let selector = selector.to_string();
    Listener::new(parent, event, move |e| {
        let target = e.target().and_then(|t| t.dyn_into::<Element>().ok());
        if let Some(matched) = target.and_then(|t| t.closest(&selector).ok().flatten()) {
            handler(matched, e);
        }
    })
}

/// A value read from the page once and reused until invalidated.
#[derive(Debug)]
pub struct Snapshot<T> {
    value: Option<T>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Snapshot<T> {
    pub fn get_or_capture(&mut self, capture: impl FnOnce() -> T) -> &T {
        self.value.get_or_insert_with(capture)
    }

    pub fn invalidate(&mut self) {
        self.value = None;
    }

    pub fn is_captured(&self) -> bool {
        self.value.is_some()
    }
}

pub const SECTION_SELECTOR: &str = "section[id]";

pub fn capture_sections(document: &Document) -> Vec<Element> {
    query_all(document, SECTION_SELECTOR)
}

/// `(id, top, height)` for every section, in document order.
pub fn section_bounds(sections: &[Element]) -> Vec<SectionBounds> {
    sections
        .iter()
        .filter_map(|section| {
            let el = section.dyn_ref::<HtmlElement>()?;
            Some(SectionBounds {
                id: section.id(),
                top: el.offset_top() as f64,
                height: el.offset_height() as f64,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_captures_once_until_invalidated() {
        let mut captures = 0;
        let mut snapshot = Snapshot::default();
        for _ in 0..60 {
            snapshot.get_or_capture(|| {
                captures += 1;
                vec!["home", "features"]
            });
        }
        assert_eq!(captures, 1);
        assert!(snapshot.is_captured());

        snapshot.invalidate();
        assert!(!snapshot.is_captured());
        let sections = snapshot.get_or_capture(|| {
            captures += 1;
            vec!["about"]
        });
        assert_eq!(sections, &vec!["about"]);
        assert_eq!(captures, 2);
    }
}
