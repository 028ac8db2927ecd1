//! Offline support. Runs in the service worker context, not the page.

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::js_sys::{self, Array};
use web_sys::{Cache, CacheStorage, ExtendableEvent, FetchEvent, Request, ServiceWorkerGlobalScope};

use crate::{Error, Result};

pub const CACHE_NAME: &str = "learnease-v1";

/// Shell and styles fetched at install time.
pub const PRECACHE_URLS: [&str; 13] = [
    "/",
    "/index.html",
    "/about",
    "/courses",
    "/contact",
    "/assets/css/style.css",
    "/assets/css/components.css",
    "/assets/css/animations.css",
    "/assets/css/themes.css",
    "/learnease.js",
    "/learnease_bg.wasm",
    "/sw.js",
    "/sw_bg.wasm",
];

/// Cache names to delete on activation: everything except `current`.
pub fn stale_caches<'a>(names: &'a [String], current: &str) -> Vec<&'a str> {
    names.iter().map(String::as_str).filter(|name| *name != current).collect()
}

fn to_js(error: Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

async fn precache(caches: CacheStorage) -> Result<()> {
    let cache: Cache = JsFuture::from(caches.open(CACHE_NAME)).await?.dyn_into()?;
    for url in PRECACHE_URLS {
        JsFuture::from(cache.add_with_str(url)).await?;
    }
    info!("Cached {} assets in {}", PRECACHE_URLS.len(), CACHE_NAME);
    Ok(())
}

async fn cache_first(scope: ServiceWorkerGlobalScope, request: Request) -> Result<JsValue> {
    let cached = JsFuture::from(scope.caches()?.match_with_request(&request)).await?;
    if !cached.is_undefined() {
        return Ok(cached);
    }
    Ok(JsFuture::from(scope.fetch_with_request(&request)).await?)
}

async fn prune(caches: CacheStorage) -> Result<()> {
    let keys = JsFuture::from(caches.keys()).await?;
    let names: Vec<String> = Array::from(&keys).iter().filter_map(|k| k.as_string()).collect();
    for name in stale_caches(&names, CACHE_NAME) {
        JsFuture::from(caches.delete(name)).await?;
        info!("Deleted stale cache {}", name);
    }
    Ok(())
}

/// Hooks install, activate and fetch on the worker's global scope.
pub fn register() -> Result<()> {
    let scope = js_sys::global()
        .dyn_into::<ServiceWorkerGlobalScope>()
        .map_err(JsValue::from)?;

    let install = {
        let scope = scope.clone();
        Closure::wrap(Box::new(move |event: ExtendableEvent| {
            let caches = match scope.caches() {
                Ok(caches) => caches,
                Err(e) => {
                    warn!("Cache storage unavailable: {:?}", e);
                    return;
                }
            };
            let work = future_to_promise(async move {
                precache(caches).await.map(|_| JsValue::UNDEFINED).map_err(to_js)
            });
            if let Err(e) = event.wait_until(&work) {
                warn!("Install could not be extended: {:?}", e);
            }
        }) as Box<dyn FnMut(ExtendableEvent)>)
    };

    let activate = {
        let scope = scope.clone();
        Closure::wrap(Box::new(move |event: ExtendableEvent| {
            let Ok(caches) = scope.caches() else {
                return;
            };
            let work = future_to_promise(async move {
                prune(caches).await.map(|_| JsValue::UNDEFINED).map_err(to_js)
            });
            if let Err(e) = event.wait_until(&work) {
                warn!("Activate could not be extended: {:?}", e);
            }
        }) as Box<dyn FnMut(ExtendableEvent)>)
    };

    let fetch = {
        let scope = scope.clone();
        Closure::wrap(Box::new(move |event: FetchEvent| {
            let scope = scope.clone();
            let request = event.request();
            let response = future_to_promise(async move { cache_first(scope, request).await.map_err(to_js) });
            if let Err(e) = event.respond_with(&response) {
                warn!("Could not answer fetch: {:?}", e);
            }
        }) as Box<dyn FnMut(FetchEvent)>)
    };

    scope.add_event_listener_with_callback("install", install.as_ref().unchecked_ref())?;
    scope.add_event_listener_with_callback("activate", activate.as_ref().unchecked_ref())?;
    scope.add_event_listener_with_callback("fetch", fetch.as_ref().unchecked_ref())?;

    // The worker lives as long as its scope.
    install.forget();
    activate.forget();
    fetch.forget();

    info!("Service worker registered ({})", CACHE_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_current_cache() {
        let names = vec!["learnease-v0".to_string(), CACHE_NAME.to_string(), "other".to_string()];
        assert_eq!(stale_caches(&names, CACHE_NAME), vec!["learnease-v0", "other"]);
        assert!(stale_caches(&[CACHE_NAME.to_string()], CACHE_NAME).is_empty());
    }

    #[test]
    fn precache_starts_with_the_root() {
        assert_eq!(PRECACHE_URLS[0], "/");
    }
}
