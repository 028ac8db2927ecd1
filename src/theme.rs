//! Light/dark theme: resolution of the initial preference, persistence of
//! the single `darkMode` flag, and the toggle button.

use gloo_timers::callback::Timeout;
use log::{info, warn};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, MediaQueryList, MediaQueryListEvent};
use yew::prelude::*;

use crate::config::DARK_MODE_KEY;
use crate::dom;
use crate::utils::storage::{local_storage, JsonStorage, KeyValueStore};
use crate::Result;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const INDICATOR_VISIBLE_MS: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn toggled(&self) -> Self {
        Theme::from_dark(!self.is_dark())
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "fas fa-sun",
            Theme::Light => "fas fa-moon",
        }
    }

    pub fn meta_color(&self) -> &'static str {
        match self {
            Theme::Dark => "#1a1a1a",
            Theme::Light => "#ffffff",
        }
    }

    pub fn announcement(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark mode enabled",
            Theme::Light => "Light mode enabled",
        }
    }
}

/// A stored flag always wins; only `"true"` means dark. Without one the
/// system color scheme decides.
pub fn resolve_theme(stored: Option<&str>, system_prefers_dark: bool) -> Theme {
    match stored {
        Some(value) => Theme::from_dark(value == "true"),
        None => Theme::from_dark(system_prefers_dark),
    }
}

pub struct ThemePreference<K: KeyValueStore> {
    storage: JsonStorage<K>,
}

impl<K: KeyValueStore> ThemePreference<K> {
    pub fn new(store: K) -> Self {
        Self { storage: JsonStorage::new(store) }
    }

    pub fn stored(&self) -> Option<String> {
        self.storage.raw().get_item(DARK_MODE_KEY).ok().flatten()
    }

    pub fn has_stored(&self) -> bool {
        self.stored().is_some()
    }

    pub fn initial(&self, system_prefers_dark: bool) -> Theme {
        resolve_theme(self.stored().as_deref(), system_prefers_dark)
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        self.storage.set(DARK_MODE_KEY, &theme.is_dark())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThemeChanged {
    is_dark: bool,
}

fn dark_scheme_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

pub fn system_prefers_dark() -> bool {
    dark_scheme_query().map(|q| q.matches()).unwrap_or(false)
}

fn preference() -> Option<ThemePreference<web_sys::Storage>> {
    local_storage().ok().map(ThemePreference::new)
}

/// Reflects `theme` on the page: body class, `theme-color` meta tag and a
/// `themeChanged` window event carrying `{ isDark }`.
pub fn apply_to_document(theme: Theme) -> Result<()> {
    let document = dom::document()?;
    let body = dom::body()?;
    dom::set_class(&body, "dark-mode", theme.is_dark());

    let meta = match dom::query(&document, "meta[name=\"theme-color\"]") {
        Some(meta) => meta,
        None => {
            let meta = dom::create_element(&document, "meta", "", &[("name", "theme-color")])?;
            if let Some(head) = document.head() {
                head.append_child(&meta)?;
            }
            meta
        }
    };
    meta.set_attribute("content", theme.meta_color())?;

    let init = CustomEventInit::new();
    let detail = serde_wasm_bindgen::to_value(&ThemeChanged { is_dark: theme.is_dark() })
        .map_err(|e| crate::Error::Js(e.to_string()))?;
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict("themeChanged", &init)?;
    dom::window()?.dispatch_event(&event)?;
    Ok(())
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_state(|| {
        preference()
            .map(|p| p.initial(system_prefers_dark()))
            .unwrap_or_else(|| Theme::from_dark(system_prefers_dark()))
    });
    let indicator = use_state(|| None::<(Theme, bool)>);
    let indicator_timer = use_mut_ref(|| None::<(Timeout, Option<Timeout>)>);

    // Keep the page in sync with the current theme.
    {
        use_effect_with_deps(
            move |theme| {
                if let Err(e) = apply_to_document(*theme) {
                    warn!("Failed to apply theme: {}", e);
                }
                || ()
            },
            *theme,
        );
    }

    // Follow the system scheme until the visitor picks a theme themselves.
    {
        let theme = theme.clone();
        use_effect_with_deps(
            move |_| {
                let query = dark_scheme_query();
                let listener = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
                    let has_stored = preference().map(|p| p.has_stored()).unwrap_or(false);
                    if !has_stored {
                        theme.set(Theme::from_dark(e.matches()));
                    }
                }) as Box<dyn FnMut(MediaQueryListEvent)>);

                if let Some(query) = &query {
                    let _ = query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
                }

                move || {
                    if let Some(query) = &query {
                        let _ = query.remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    let onclick = {
        let theme = theme.clone();
        let indicator = indicator.clone();
        let indicator_timer = indicator_timer.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let next = theme.toggled();
            if let Some(pref) = preference() {
                if let Err(e) = pref.save(next) {
                    warn!("Could not persist theme: {}", e);
                }
            }
            info!("{}", next.announcement());
            theme.set(next);

            indicator.set(Some((next, false)));
            let reveal = {
                let indicator = indicator.clone();
                Timeout::new(100, move || indicator.set(Some((next, true))))
            };
            let hide = {
                let indicator = indicator.clone();
                let indicator_timer = indicator_timer.clone();
                Timeout::new(INDICATOR_VISIBLE_MS, move || {
                    indicator.set(Some((next, false)));
                    let indicator = indicator.clone();
                    let remove = Timeout::new(300, move || indicator.set(None));
                    if let Some(timers) = indicator_timer.borrow_mut().as_mut() {
                        timers.1 = Some(remove);
                    }
                })
            };
            // Replacing the pair cancels any indicator still on screen.
            *indicator_timer.borrow_mut() = Some((hide, None));
            reveal.forget();
        })
    };

    html! {
        <>
            <button id="theme-toggle" class="theme-toggle" aria-label="Toggle dark mode" {onclick}>
                <i class={theme.icon()}></i>
            </button>
            {
                if let Some((shown_theme, visible)) = *indicator {
                    html! {
                        <div class={classes!("theme-saved-indicator", visible.then(|| "show"))}>
                            { shown_theme.announcement() }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::memory::MemoryStore;

    #[test]
    fn stored_flag_wins_over_system() {
        assert_eq!(resolve_theme(Some("true"), false), Theme::Dark);
        assert_eq!(resolve_theme(Some("false"), true), Theme::Light);
        assert_eq!(resolve_theme(Some("garbage"), true), Theme::Light);
        assert_eq!(resolve_theme(None, true), Theme::Dark);
        assert_eq!(resolve_theme(None, false), Theme::Light);
    }

    #[test]
    fn saved_theme_reads_back() {
        let store = MemoryStore::default();
        let pref = ThemePreference::new(store.clone());
        assert!(!pref.has_stored());
        assert_eq!(pref.initial(true), Theme::Dark);

        pref.save(Theme::Light).unwrap();
        assert_eq!(store.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(pref.initial(true), Theme::Light);
    }

    #[test]
    fn theme_presentation() {
        assert_eq!(Theme::Dark.icon(), "fas fa-sun");
        assert_eq!(Theme::Light.icon(), "fas fa-moon");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.meta_color(), "#1a1a1a");
    }
}
