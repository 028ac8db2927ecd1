use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsValue;

static MOBILE_AGENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: f64) -> Self {
        if width < 768.0 {
            DeviceClass::Mobile
        } else if width < 1024.0 {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

pub fn is_mobile_agent(user_agent: &str) -> bool {
    MOBILE_AGENT.is_match(user_agent)
}

/// Edge and Chrome both advertise "Chrome", so Edge is matched first.
pub fn browser_name(user_agent: &str) -> &'static str {
    if user_agent.contains("Edg") {
        "Edge"
    } else if user_agent.contains("Chrome") {
        "Chrome"
    } else if user_agent.contains("Firefox") {
        "Firefox"
    } else if user_agent.contains("Safari") {
        "Safari"
    } else {
        "Unknown"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserInfo {
    pub browser: &'static str,
    pub is_mobile: bool,
    pub is_touch: bool,
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl BrowserInfo {
    pub fn device_class(&self) -> DeviceClass {
        if self.is_mobile && self.width < 1024.0 {
            DeviceClass::Mobile
        } else {
            DeviceClass::from_width(self.width)
        }
    }
}

/// `primary` unless it is zero or missing, in which case `fallback`.
fn dimension_or(primary: Option<f64>, fallback: f64) -> f64 {
    primary.filter(|v| *v > 0.0).unwrap_or(fallback)
}

/// Viewport `(width, height)`, falling back to the root element's client
/// size when the window reports none.
pub fn viewport_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let root = window.document().and_then(|d| d.document_element());
    let client = |read: fn(&web_sys::Element) -> i32| root.as_ref().map(|r| read(r) as f64).unwrap_or(0.0);
    Some((
        dimension_or(window.inner_width().ok().and_then(|v| v.as_f64()), client(web_sys::Element::client_width)),
        dimension_or(window.inner_height().ok().and_then(|v| v.as_f64()), client(web_sys::Element::client_height)),
    ))
}

pub fn pixel_ratio_or_default(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

pub fn device_pixel_ratio() -> f64 {
    pixel_ratio_or_default(web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(0.0))
}

/// Reads the current browser; `None` outside a window context.
pub fn browser_info() -> Option<BrowserInfo> {
    let window = web_sys::window()?;
    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    let has_touch_events = web_sys::js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);

    let (width, height) = viewport_size().unwrap_or((0.0, 0.0));

    Some(BrowserInfo {
        browser: browser_name(&user_agent),
        is_mobile: is_mobile_agent(&user_agent),
        is_touch: has_touch_events || navigator.max_touch_points() > 0,
        width,
        height,
        pixel_ratio: device_pixel_ratio(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
    const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36 Edg/120.0";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn width_classes() {
        assert_eq!(DeviceClass::from_width(375.0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(768.0), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_width(1024.0), DeviceClass::Desktop);
    }

    #[test]
    fn user_agents() {
        assert_eq!(browser_name(CHROME), "Chrome");
        assert_eq!(browser_name(EDGE), "Edge");
        assert_eq!(browser_name(IPHONE), "Safari");
        assert!(is_mobile_agent(IPHONE));
        assert!(!is_mobile_agent(CHROME));
    }

    #[test]
    fn mobile_agent_on_wide_screen_is_tablet_or_desktop() {
        let info = BrowserInfo {
            browser: "Safari",
            is_mobile: true,
            is_touch: true,
            width: 1366.0,
            height: 1024.0,
            pixel_ratio: 2.0,
        };
        assert_eq!(info.device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn viewport_falls_back_to_client_size() {
        assert_eq!(dimension_or(Some(1280.0), 1000.0), 1280.0);
        assert_eq!(dimension_or(Some(0.0), 1000.0), 1000.0);
        assert_eq!(dimension_or(None, 720.0), 720.0);
    }

    #[test]
    fn pixel_ratio_defaults_to_one() {
        assert_eq!(pixel_ratio_or_default(2.0), 2.0);
        assert_eq!(pixel_ratio_or_default(0.0), 1.0);
        assert_eq!(pixel_ratio_or_default(f64::NAN), 1.0);
    }
}
