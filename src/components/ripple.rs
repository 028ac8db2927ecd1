use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

const RIPPLE_MS: u32 = 600;
const BASE_STYLE: &str = "position: relative; overflow: hidden;";

/// Inline style for the button, lifted while the pointer is over it.
pub fn button_style(hovered: bool) -> String {
    if hovered {
        format!("{} transform: translateY(-2px) scale(1.02);", BASE_STYLE)
    } else {
        BASE_STYLE.to_string()
    }
}

pub fn effect_classes(pulse: bool, glow: bool) -> Classes {
    classes!(pulse.then_some("animate-pulse"), glow.then_some("animate-glow"))
}

/// A circle covering the larger side of the button, centered on the click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: u32,
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

impl Ripple {
    /// `rect` is `(left, top, width, height)` of the button in client space.
    pub fn at(id: u32, rect: (f64, f64, f64, f64), client_x: f64, client_y: f64) -> Self {
        let (left, top, width, height) = rect;
        let size = width.max(height);
        Self { id, size, x: client_x - left - size / 2.0, y: client_y - top - size / 2.0 }
    }

    pub fn style(&self) -> String {
        format!(
            "position: absolute; width: {0}px; height: {0}px; left: {1}px; top: {2}px; \
             background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
             animation: ripple 0.6s linear; pointer-events: none;",
            self.size, self.x, self.y
        )
    }
}

pub enum RippleAction {
    Add(Ripple),
    Remove(u32),
}

#[derive(Default, PartialEq)]
struct Ripples {
    next_id: u32,
    live: Vec<Ripple>,
}

impl Reducible for Ripples {
    type Action = RippleAction;

    fn reduce(self: Rc<Self>, action: RippleAction) -> Rc<Self> {
        let mut live = self.live.clone();
        let mut next_id = self.next_id;
        match action {
            RippleAction::Add(ripple) => {
                live.push(ripple);
                next_id = next_id.wrapping_add(1);
            }
            RippleAction::Remove(id) => live.retain(|r| r.id != id),
        }
        Rc::new(Self { next_id, live })
    }
}

#[derive(Properties, PartialEq)]
pub struct RippleButtonProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Children,
    #[prop_or(true)]
    pub ripple: bool,
    #[prop_or_default]
    pub pulse: bool,
    #[prop_or_default]
    pub glow: bool,
}

#[function_component(RippleButton)]
pub fn ripple_button(props: &RippleButtonProps) -> Html {
    let ripples = use_reducer(Ripples::default);
    let hovered = use_state_eq(|| false);

    let onclick = {
        let ripples = ripples.clone();
        let forward = props.onclick.clone();
        let enabled = props.ripple;
        Callback::from(move |e: MouseEvent| {
            let button = e.current_target().and_then(|t| t.dyn_into::<Element>().ok()).filter(|_| enabled);
            if let Some(button) = button {
                let rect = button.get_bounding_client_rect();
                let ripple = Ripple::at(
                    ripples.next_id,
                    (rect.left(), rect.top(), rect.width(), rect.height()),
                    e.client_x() as f64,
                    e.client_y() as f64,
                );
                ripples.dispatch(RippleAction::Add(ripple));
                let dispatcher = ripples.dispatcher();
                Timeout::new(RIPPLE_MS, move || dispatcher.dispatch(RippleAction::Remove(ripple.id))).forget();
            }
            forward.emit(e);
        })
    };

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let class = classes!("ripple-button", props.class.clone(), effect_classes(props.pulse, props.glow));

    html! {
        <button {class} style={button_style(*hovered)} {onclick} {onmouseenter} {onmouseleave}>
            { for props.children.iter() }
            { for ripples.live.iter().map(|r| html! { <span key={r.id} class="ripple" style={r.style()}></span> }) }
        </button>
    }
}
