//! Query-string helpers for the current location.

use log::warn;
use url::Url;

use crate::{dom, Result};

pub fn parse_params(search: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn param_from(search: &str, key: &str) -> Option<String> {
    parse_params(search)
        .into_iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v)
}

pub fn build_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `href` with `key` set to `value`, replacing any earlier occurrences.
pub fn with_param(href: &str, key: &str, value: &str) -> Result<String> {
    let mut url = Url::parse(href)?;
    let kept: Vec<(String, String)> = url.query_pairs().filter(|(k, _)| k != key).map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(key, value);
    }
    Ok(url.to_string())
}

pub fn without_param(href: &str, key: &str) -> Result<String> {
    let mut url = Url::parse(href)?;
    let kept: Vec<(String, String)> = url.query_pairs().filter(|(k, _)| k != key).map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept.iter());
    }
    Ok(url.to_string())
}

pub fn current_params() -> Vec<(String, String)> {
    dom::window()
        .and_then(|w| Ok(w.location().search()?))
        .map(|search| parse_params(&search))
        .unwrap_or_default()
}

pub fn current_param(key: &str) -> Option<String> {
    param_from(&dom::window().ok()?.location().search().ok()?, key)
}

fn replace_location(update: impl FnOnce(&str) -> Result<String>) -> Result<()> {
    let window = dom::window()?;
    let href = window.location().href()?;
    let next = update(&href)?;
    window
        .history()?
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&next))?;
    Ok(())
}

pub fn set_param(key: &str, value: &str) {
    if let Err(e) = replace_location(|href| with_param(href, key, value)) {
        warn!("Could not set query parameter {}: {}", key, e);
    }
}

pub fn remove_param(key: &str) {
    if let Err(e) = replace_location(|href| without_param(href, key)) {
        warn!("Could not remove query parameter {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_strings() {
        let params = parse_params("?course=rust%20basics&level=2&empty=");
        assert_eq!(params[0], ("course".to_string(), "rust basics".to_string()));
        assert_eq!(param_from("?level=2", "level").as_deref(), Some("2"));
        assert_eq!(param_from("?empty=", "empty"), None);
        assert_eq!(param_from("", "level"), None);
    }

    #[test]
    fn builds_encoded_query() {
        assert_eq!(build_query(&[("q", "web design"), ("page", "2")]), "q=web%20design&page=2");
        assert_eq!(build_query(&[]), "");
    }

    #[test]
    fn sets_and_removes_params() {
        let href = "https://learnease.com/courses?level=1&tab=all";
        assert_eq!(with_param(href, "level", "3").unwrap(), "https://learnease.com/courses?tab=all&level=3");
        assert_eq!(without_param(href, "tab").unwrap(), "https://learnease.com/courses?level=1");
        assert_eq!(without_param("https://learnease.com/?a=1", "a").unwrap(), "https://learnease.com/");
        assert!(with_param("not a url", "a", "b").is_err());
    }
}
