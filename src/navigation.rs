use std::f64::consts::PI;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, Node, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::config::Config;
use crate::dom::{self, SectionBounds, Snapshot};
use crate::scheduler::BrowserScheduler;
use crate::utils::device::viewport_size;
use crate::utils::timing::{Debounce, Throttle};

/// Extra slack so a section counts as current slightly before its top edge.
const SPY_SLACK: f64 = 10.0;
const BACK_TO_TOP_AFTER: f64 = 300.0;
const PROGRESS_RADIUS: f64 = 18.0;
const SCROLL_THROTTLE_MS: u32 = 16;
const RESIZE_DEBOUNCE_MS: u32 = 250;

/// Id of the section under the spy line. When sections overlap the
/// last one in document order wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, offset: f64) -> Option<&str> {
    let line = scroll_y + offset + SPY_SLACK;
    sections
        .iter()
        .filter(|s| line >= s.top && line < s.top + s.height)
        .last()
        .map(|s| s.id.as_str())
}

pub fn progress_circumference() -> f64 {
    2.0 * PI * PROGRESS_RADIUS
}

/// `stroke-dashoffset` for the back-to-top ring.
pub fn progress_offset(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    let progress = if scrollable > 0.0 { (scroll_y / scrollable).min(1.0) } else { 1.0 };
    let circumference = progress_circumference();
    circumference - progress * circumference
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AFTER
}

pub fn scroll_target(section_top: f64, offset: f64) -> f64 {
    section_top - offset
}

fn scroll_y() -> f64 {
    web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn smooth_scroll_to(top: f64) {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Smoothly scrolls so the section sits just below the fixed navbar.
pub fn scroll_to_section(section_id: &str, offset: f64) -> bool {
    let target = dom::document()
        .ok()
        .and_then(|d| d.get_element_by_id(section_id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    match target {
        Some(el) => {
            smooth_scroll_to(scroll_target(el.offset_top() as f64, offset));
            true
        }
        None => false,
    }
}

#[derive(Clone, PartialEq)]
pub enum NavTarget {
    Section(&'static str),
    Page(Route),
}

#[derive(Clone, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub target: NavTarget,
}

pub fn default_items() -> Vec<NavItem> {
    vec![
        NavItem { label: "Home", target: NavTarget::Section("home") },
        NavItem { label: "Features", target: NavTarget::Section("features") },
        NavItem { label: "Testimonials", target: NavTarget::Section("testimonials") },
        NavItem { label: "Courses", target: NavTarget::Page(Route::Courses) },
        NavItem { label: "About", target: NavTarget::Page(Route::About) },
        NavItem { label: "Contact", target: NavTarget::Page(Route::Contact) },
    ]
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    #[prop_or_else(default_items)]
    pub items: Vec<NavItem>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let menu_open = use_state_eq(|| false);
    let is_scrolled = use_state_eq(|| false);
    let active = use_state_eq(|| None::<String>);
    let navbar_ref = use_node_ref();
    let throttle = use_mut_ref(|| Throttle::new(SCROLL_THROTTLE_MS, BrowserScheduler));
    let resize = use_mut_ref(|| Debounce::new(RESIZE_DEBOUNCE_MS, false, BrowserScheduler));
    let sections = use_mut_ref(Snapshot::<Vec<Element>>::default);
    let route = use_route::<Route>();

    let refresh = {
        let is_scrolled = is_scrolled.clone();
        let active = active.clone();
        let scroll = config.scroll.clone();
        let sections = sections.clone();
        move || {
            let y = scroll_y();
            is_scrolled.set(y > scroll.threshold);
            let Ok(document) = dom::document() else {
                return;
            };
            let bounds = dom::section_bounds(sections.borrow_mut().get_or_capture(|| dom::capture_sections(&document)));
            if let Some(id) = active_section(&bounds, y, scroll.offset) {
                active.set(Some(id.to_string()));
            }
        }
    };

    // Each page has its own sections; read them again once it has rendered.
    {
        let refresh = refresh.clone();
        let sections = sections.clone();
        use_effect_with_deps(
            move |_| {
                sections.borrow_mut().invalidate();
                let settle = Timeout::new(0, refresh);
                move || drop(settle)
            },
            route,
        );
    }

    {
        let refresh = refresh.clone();
        use_event_with_window("scroll", move |_: Event| {
            throttle.borrow().run(&refresh);
        });
    }

    {
        let menu_open = menu_open.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                menu_open.set(false);
            }
        });
    }

    {
        let menu_open = menu_open.clone();
        let navbar_ref = navbar_ref.clone();
        use_event_with_window("click", move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = match (navbar_ref.cast::<Element>(), target) {
                (Some(navbar), Some(target)) => navbar.contains(Some(&target)),
                _ => true,
            };
            if !inside {
                menu_open.set(false);
            }
        });
    }

    {
        let menu_open = menu_open.clone();
        let breakpoints = config.clone();
        let refresh = refresh.clone();
        use_event_with_window("resize", move |_: Event| {
            let menu_open = menu_open.clone();
            let breakpoints = breakpoints.clone();
            let refresh = refresh.clone();
            resize.borrow().call(move || {
                let width = viewport_size().map(|(width, _)| width).unwrap_or(0.0);
                if !breakpoints.is_mobile_width(width) {
                    menu_open.set(false);
                }
                refresh();
            });
        });
    }

    // Mirror the menu state on <body> so the page can lock scrolling.
    use_effect_with_deps(
        move |open| {
            if let Ok(body) = dom::body() {
                dom::set_class(&body, "nav-open", *open);
            }
            || ()
        },
        *menu_open,
    );

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let links = props.items.iter().map(|item| match &item.target {
        NavTarget::Section(id) => {
            let id = *id;
            let is_active = active.as_deref() == Some(id);
            let onclick = {
                let menu_open = menu_open.clone();
                let offset = config.scroll.offset;
                Callback::from(move |e: MouseEvent| {
                    if scroll_to_section(id, offset) {
                        e.prevent_default();
                        menu_open.set(false);
                        debug!("Scrolling to #{}", id);
                    }
                })
            };
            html! {
                <li class="nav-item">
                    <a href={format!("/#{}", id)} class={classes!("nav-link", is_active.then(|| "active"))} {onclick}>
                        { item.label }
                    </a>
                </li>
            }
        }
        NavTarget::Page(route) => html! {
            <li class="nav-item" onclick={close_menu.clone()}>
                <Link<Route> to={route.clone()} classes="nav-link">
                    { item.label }
                </Link<Route>>
            </li>
        },
    });

    html! {
        <nav id="navbar" ref={navbar_ref} class={classes!("navbar", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-container">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    <i class="fas fa-graduation-cap"></i>
                    {"LearnEase"}
                </Link<Route>>

                <ul id="nav-menu" class={classes!("nav-menu", (*menu_open).then(|| "active"))}>
                    { for links }
                </ul>

                <div class="nav-actions">
                    { for props.children.iter() }
                    <button id="nav-toggle" class={classes!("nav-toggle", (*menu_open).then(|| "active"))} aria-label="Toggle menu" onclick={toggle_menu}>
                        <span class="bar"></span>
                        <span class="bar"></span>
                        <span class="bar"></span>
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[function_component(BackToTop)]
pub fn back_to_top() -> Html {
    let visible = use_state_eq(|| false);
    let offset = use_state_eq(progress_circumference);
    let throttle = use_mut_ref(|| Throttle::new(SCROLL_THROTTLE_MS, BrowserScheduler));

    {
        let visible = visible.clone();
        let offset = offset.clone();
        use_event_with_window("scroll", move |_: Event| {
            throttle.borrow().run(|| {
                let y = scroll_y();
                visible.set(back_to_top_visible(y));
                let viewport = viewport_size().map(|(_, height)| height).unwrap_or(0.0);
                let height = dom::body().map(|b| b.scroll_height() as f64).unwrap_or(0.0);
                offset.set(progress_offset(y, height, viewport));
            });
        });
    }

    let onclick = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        smooth_scroll_to(0.0);
    });

    let circumference = progress_circumference();
    html! {
        <a id="backToTop" href="#" class={classes!("back-to-top", (*visible).then(|| "show"))} aria-label="Back to top" {onclick}>
            <svg class="progress-ring" width="44" height="44" viewBox="0 0 44 44">
                <circle cx="22" cy="22" r="18" fill="none"
                    style={format!("stroke-dasharray: {:.3}; stroke-dashoffset: {:.3};", circumference, *offset)} />
            </svg>
            <i class="fas fa-arrow-up"></i>
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds { id: "home".into(), top: 0.0, height: 600.0 },
            SectionBounds { id: "features".into(), top: 600.0, height: 800.0 },
            SectionBounds { id: "contact".into(), top: 1400.0, height: 400.0 },
        ]
    }

    #[test]
    fn spy_picks_section_under_the_line() {
        let sections = sections();
        assert_eq!(active_section(&sections, 0.0, 80.0), Some("home"));
        // line = 509 + 80 + 10 = 599, still inside home
        assert_eq!(active_section(&sections, 509.0, 80.0), Some("home"));
        assert_eq!(active_section(&sections, 510.0, 80.0), Some("features"));
        assert_eq!(active_section(&sections, 1500.0, 80.0), Some("contact"));
        assert_eq!(active_section(&sections, 5000.0, 80.0), None);
        assert_eq!(active_section(&[], 0.0, 80.0), None);
    }

    #[test]
    fn ring_offset_tracks_progress() {
        let c = progress_circumference();
        assert!((c - 113.097).abs() < 0.001);
        assert!((progress_offset(0.0, 2000.0, 1000.0) - c).abs() < 1e-9);
        assert!((progress_offset(500.0, 2000.0, 1000.0) - c / 2.0).abs() < 1e-9);
        assert!(progress_offset(5000.0, 2000.0, 1000.0).abs() < 1e-9);
        assert!(progress_offset(0.0, 800.0, 1000.0).abs() < 1e-9);
    }

    #[test]
    fn back_to_top_threshold() {
        assert!(!back_to_top_visible(300.0));
        assert!(back_to_top_visible(301.0));
        assert_eq!(scroll_target(1400.0, 80.0), 1320.0);
    }
}
