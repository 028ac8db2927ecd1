//! Scroll-triggered reveal of marked elements.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{Document, Element};

use super::observer::OnceVisible;
use crate::dom;
use crate::Result;

pub const REVEAL_SELECTOR: &str = "[data-aos], .scroll-animation, .animate-on-scroll, \
    .scroll-fade-in, .scroll-slide-in-left, .scroll-slide-in-right, .scroll-scale-in";

const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";
const SETTLE_DELAY_MS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    FadeIn,
    SlideInLeft,
    SlideInRight,
    ScaleIn,
    BounceIn,
    Default,
}

impl AnimationKind {
    /// Classes take precedence over `data-aos`; only `bounce-in` is read
    /// from the attribute.
    pub fn detect(has_class: impl Fn(&str) -> bool, aos: Option<&str>) -> Self {
        if has_class("scroll-fade-in") {
            AnimationKind::FadeIn
        } else if has_class("scroll-slide-in-left") {
            AnimationKind::SlideInLeft
        } else if has_class("scroll-slide-in-right") {
            AnimationKind::SlideInRight
        } else if has_class("scroll-scale-in") {
            AnimationKind::ScaleIn
        } else if aos == Some("bounce-in") {
            AnimationKind::BounceIn
        } else {
            AnimationKind::Default
        }
    }

    pub fn of(element: &Element) -> Self {
        Self::detect(|c| dom::has_class(element, c), dom::data_attr(element, "aos").as_deref())
    }

    /// Style applied as soon as the element becomes visible.
    pub fn initial_style(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            AnimationKind::FadeIn => &[("opacity", "0"), ("transition", "opacity 0.8s ease-out")],
            AnimationKind::SlideInLeft => &[
                ("transform", "translateX(-50px)"),
                ("opacity", "0"),
                ("transition", "transform 0.8s ease-out, opacity 0.8s ease-out"),
            ],
            AnimationKind::SlideInRight => &[
                ("transform", "translateX(50px)"),
                ("opacity", "0"),
                ("transition", "transform 0.8s ease-out, opacity 0.8s ease-out"),
            ],
            AnimationKind::ScaleIn => &[
                ("transform", "scale(0.8)"),
                ("opacity", "0"),
                ("transition", "transform 0.6s ease-out, opacity 0.6s ease-out"),
            ],
            AnimationKind::BounceIn => &[
                ("transform", "scale(0.3)"),
                ("opacity", "0"),
                (
                    "transition",
                    "transform 0.8s cubic-bezier(0.68, -0.55, 0.265, 1.55), opacity 0.8s ease-out",
                ),
            ],
            AnimationKind::Default => &[],
        }
    }

    /// Style applied after the settle delay, together with `animated`.
    pub fn final_style(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            AnimationKind::FadeIn => &[("opacity", "1")],
            AnimationKind::SlideInLeft | AnimationKind::SlideInRight => {
                &[("transform", "translateX(0)"), ("opacity", "1")]
            }
            AnimationKind::ScaleIn | AnimationKind::BounceIn => &[("transform", "scale(1)"), ("opacity", "1")],
            AnimationKind::Default => &[],
        }
    }
}

fn trigger(element: &Element, pending: &Rc<RefCell<Vec<Timeout>>>) {
    let kind = AnimationKind::of(element);
    if kind == AnimationKind::Default {
        dom::set_class(element, "animate", true);
        dom::set_class(element, "animated", true);
        return;
    }

    dom::set_style(element, kind.initial_style());
    let element = element.clone();
    pending.borrow_mut().push(Timeout::new(SETTLE_DELAY_MS, move || {
        dom::set_style(&element, kind.final_style());
        dom::set_class(&element, "animated", true);
    }));
}

pub struct ScrollReveal {
    _observer: OnceVisible,
    _pending: Rc<RefCell<Vec<Timeout>>>,
}

impl ScrollReveal {
    pub fn attach(document: &Document) -> Result<Self> {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let observer = {
            let pending = pending.clone();
            OnceVisible::new(THRESHOLD, Some(ROOT_MARGIN), move |element| trigger(&element, &pending))?
        };
        let targets = dom::query_all(document, REVEAL_SELECTOR);
        debug!("Watching {} elements for scroll reveal", targets.len());
        observer.observe_all(&targets);
        Ok(Self { _observer: observer, _pending: pending })
    }
}
