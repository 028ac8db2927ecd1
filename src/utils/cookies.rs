use chrono::{Duration, Utc};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::{dom, Error, Result};

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 UTC";

/// Looks `name` up in a `document.cookie` style header.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim_start)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('=').map(str::to_string))
}

pub fn cookie_string(name: &str, value: &str, expires: &str) -> String {
    format!("{}={};expires={};path=/", name, value, expires)
}

fn html_document() -> Result<HtmlDocument> {
    dom::document()?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| Error::MissingElement("html document".to_string()))
}

pub fn set(name: &str, value: &str, days: i64) -> Result<()> {
    let expires = (Utc::now() + Duration::days(days)).format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    html_document()?.set_cookie(&cookie_string(name, value, &expires))?;
    Ok(())
}

pub fn get(name: &str) -> Option<String> {
    let header = html_document().ok()?.cookie().ok()?;
    cookie_value(&header, name)
}

pub fn remove(name: &str) -> Result<()> {
    html_document()?.set_cookie(&cookie_string(name, "", EXPIRED))?;
    Ok(())
}
