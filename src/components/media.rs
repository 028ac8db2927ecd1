use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::animations::observer::OnceVisible;
use crate::utils::images::image_dimensions;

const PROGRESS_DURATION_MS: u32 = 2000;
const PROGRESS_THRESHOLD: f64 = 0.5;
const LAZY_MARGIN: &str = "50px";
const LAZY_THRESHOLD: f64 = 0.1;

/// Runs `on_visible` the first time the referenced node scrolls into view.
#[hook]
fn use_first_visible(node: NodeRef, threshold: f64, margin: Option<&'static str>, on_visible: Callback<()>) {
    use_effect_with_deps(
        move |node| {
            let observer = node.cast::<Element>().and_then(|el| {
                let observer = OnceVisible::new(threshold, margin, move |_| on_visible.emit(()))
                    .map_err(|e| warn!("IntersectionObserver unavailable: {}", e))
                    .ok()?;
                observer.observe(&el);
                Some(observer)
            });
            move || drop(observer)
        },
        node,
    );
}

pub fn progress_style(percent: u8, filled: bool) -> String {
    if filled {
        format!("width: {}%; transition: width {}ms ease-out;", percent.min(100), PROGRESS_DURATION_MS)
    } else {
        "width: 0%;".to_string()
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub label: AttrValue,
    pub percent: u8,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let node = use_node_ref();
    let filled = use_state(|| false);
    {
        let filled = filled.clone();
        let start = Callback::from(move |_| {
            let filled = filled.clone();
            gloo_timers::callback::Timeout::new(100, move || filled.set(true)).forget();
        });
        use_first_visible(node.clone(), PROGRESS_THRESHOLD, None, start);
    }

    html! {
        <div class="skill">
            <div class="skill-header">
                <span>{ props.label.clone() }</span>
                <span>{ format!("{}%", props.percent) }</span>
            </div>
            <div class="progress-bar" ref={node}>
                <div class="progress-fill" style={progress_style(props.percent, *filled)}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LazyImageProps {
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// An image whose `src` is only set once it comes within 50px of the
/// viewport and has finished downloading.
#[function_component(LazyImage)]
pub fn lazy_image(props: &LazyImageProps) -> Html {
    let node = use_node_ref();
    let loaded = use_state(|| false);
    {
        let loaded = loaded.clone();
        let src = props.src.clone();
        let start = Callback::from(move |_| {
            let loaded = loaded.clone();
            let src = src.clone();
            spawn_local(async move {
                match image_dimensions(&src).await {
                    Ok(size) => debug!("Loaded {} ({}x{})", src, size.width, size.height),
                    Err(e) => warn!("Image {} failed to load: {}", src, e),
                }
                loaded.set(true);
            });
        });
        use_first_visible(node.clone(), LAZY_THRESHOLD, Some(LAZY_MARGIN), start);
    }

    if *loaded {
        html! { <img ref={node} src={props.src.clone()} alt={props.alt.clone()} class={classes!(props.class.clone(), "loaded")} /> }
    } else {
        html! { <img ref={node} data-src={props.src.clone()} alt={props.alt.clone()} class={props.class.clone()} /> }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_starts_empty_then_transitions() {
        assert_eq!(progress_style(80, false), "width: 0%;");
        assert_eq!(progress_style(80, true), "width: 80%; transition: width 2000ms ease-out;");
        assert!(progress_style(150, true).starts_with("width: 100%;"));
    }
}
