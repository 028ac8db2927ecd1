use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::info;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::dom::{self, Listener};

const HIDE_AFTER_LOAD_MS: u32 = 1000;
const HIDE_FALLBACK_MS: u32 = 5000;
const REMOVE_AFTER_HIDE_MS: u32 = 500;
const ENTRANCE_STAGGER_MS: u32 = 100;

pub const DEFAULT_VIDEO: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Showing,
    Hiding,
    Gone,
}

impl LoadPhase {
    /// Only the first hide request counts; the load event and the fallback
    /// timer race for it.
    pub fn hide(self) -> Option<LoadPhase> {
        match self {
            LoadPhase::Showing => Some(LoadPhase::Hiding),
            _ => None,
        }
    }
}

/// Staggers `animate-fade-in-up` across `.animate-on-load` elements.
fn play_entrance() -> Vec<Timeout> {
    let Ok(document) = dom::document() else {
        return Vec::new();
    };
    dom::query_all(&document, ".animate-on-load")
        .into_iter()
        .enumerate()
        .map(|(index, el)| {
            Timeout::new(index as u32 * ENTRANCE_STAGGER_MS, move || {
                dom::set_class(&el, "animate-fade-in-up", true)
            })
        })
        .collect()
}

#[function_component(LoadingScreen)]
pub fn loading_screen() -> Html {
    let phase = use_state_eq(|| LoadPhase::Showing);
    let timers = use_mut_ref(Vec::<Timeout>::new);

    {
        let phase = phase.clone();
        let timers = timers.clone();
        use_effect_with_deps(
            move |_| {
                let current = Rc::new(RefCell::new(LoadPhase::Showing));
                let hide = {
                    let timers = timers.clone();
                    Rc::new(move || {
                        let Some(next) = current.borrow().hide() else {
                            return;
                        };
                        *current.borrow_mut() = next;
                        phase.set(next);
                        let phase = phase.clone();
                        let entrance = timers.clone();
                        timers.borrow_mut().push(Timeout::new(REMOVE_AFTER_HIDE_MS, move || {
                            phase.set(LoadPhase::Gone);
                            entrance.borrow_mut().extend(play_entrance());
                            info!("Page ready");
                        }));
                    })
                };

                let already_loaded = dom::document().map(|d| d.ready_state() == "complete").unwrap_or(false);
                let on_load = {
                    let hide = hide.clone();
                    let timers = timers.clone();
                    move || {
                        let hide = hide.clone();
                        timers.borrow_mut().push(Timeout::new(HIDE_AFTER_LOAD_MS, move || hide()));
                    }
                };

                let listener = if already_loaded {
                    on_load();
                    None
                } else {
                    dom::window()
                        .and_then(|w| Listener::new(&w, "load", move |_| on_load()))
                        .ok()
                };

                let fallback = Timeout::new(HIDE_FALLBACK_MS, move || hide());
                move || {
                    drop(listener);
                    drop(fallback);
                    timers.borrow_mut().clear();
                }
            },
            (),
        );
    }

    if *phase == LoadPhase::Gone {
        return html! {};
    }

    html! {
        <div id="loading-screen" class={classes!("loading-screen", (*phase == LoadPhase::Hiding).then(|| "hidden"))}>
            <div class="loader">
                <div class="loading-morph"><i class="fas fa-graduation-cap"></i></div>
                <span>{"LearnEase"}</span>
            </div>
        </div>
    }
}

/// Handle for opening the shared video player from anywhere in the tree.
#[derive(Clone, PartialEq)]
pub struct VideoControl {
    pub open: Callback<AttrValue>,
    pub close: Callback<()>,
}

#[derive(Properties, PartialEq)]
pub struct VideoModalProps {
    #[prop_or_default]
    pub children: Children,
}

/// Provides `VideoControl` to its children and renders the player overlay.
#[function_component(VideoModal)]
pub fn video_modal(props: &VideoModalProps) -> Html {
    let src = use_state_eq(|| None::<AttrValue>);
    let modal_ref = use_node_ref();

    let control = {
        let open_src = src.clone();
        let close_src = src.clone();
        use_memo(
            move |_| VideoControl {
                open: Callback::from(move |url: AttrValue| open_src.set(Some(url))),
                close: Callback::from(move |_| close_src.set(None)),
            },
            (),
        )
    };

    {
        let close = control.close.clone();
        let open = src.is_some();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if open && e.key() == "Escape" {
                close.emit(());
            }
        });
    }

    use_effect_with_deps(
        move |open| {
            if let Ok(body) = dom::body() {
                dom::set_class(&body, "modal-open", *open);
            }
            || ()
        },
        src.is_some(),
    );

    let on_backdrop = {
        let close = control.close.clone();
        let modal_ref = modal_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let on_backdrop = match (e.target(), modal_ref.get()) {
                (Some(target), Some(modal)) => {
                    let modal: web_sys::EventTarget = modal.into();
                    target == modal
                }
                _ => false,
            };
            if on_backdrop {
                close.emit(());
            }
        })
    };
    let on_close = {
        let close = control.close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    html! {
        <ContextProvider<VideoControl> context={(*control).clone()}>
            { for props.children.iter() }
            <div id="videoModal" ref={modal_ref} class={classes!("video-modal", src.is_some().then(|| "active"))} onclick={on_backdrop}>
                <div class="video-container">
                    <button class="video-close" aria-label="Close video" onclick={on_close}>
                        <i class="fas fa-times"></i>
                    </button>
                    <iframe src={(*src).as_ref().map(|s| s.to_string()).unwrap_or_default()} title="LearnEase demo"
                        frameborder="0" allow="autoplay; encrypted-media" allowfullscreen={true}></iframe>
                </div>
            </div>
        </ContextProvider<VideoControl>>
    }
}
