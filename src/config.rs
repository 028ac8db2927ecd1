use log::{warn, Level};
use serde::Deserialize;

/// Element id of an optional JSON block overriding the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "learnease-config";

pub const DEFAULT_TESTIMONIAL_INTERVAL_MS: u32 = 5000;
pub const DEFAULT_NOTIFICATION_MS: u32 = 5000;
pub const DARK_MODE_KEY: &str = "darkMode";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub mobile: u32,
    pub tablet: u32,
    pub desktop: u32,
    pub large: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self { mobile: 640, tablet: 768, desktop: 1024, large: 1280 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration: u32,
    pub easing: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration: 300, easing: "ease-in-out".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Height reserved for the fixed navbar when scrolling to a section.
    pub offset: f64,
    /// Scroll distance after which the navbar switches to its compact look.
    pub threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { offset: 80.0, threshold: 100.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TestimonialConfig {
    pub autoplay: bool,
    pub interval: u32,
}

impl TestimonialConfig {
    /// Autoplay period in milliseconds. A zero interval would spin the
    /// event loop, so it falls back to the default.
    pub fn interval_ms(&self) -> u32 {
        if self.interval == 0 {
            DEFAULT_TESTIMONIAL_INTERVAL_MS
        } else {
            self.interval
        }
    }
}

impl Default for TestimonialConfig {
    fn default() -> Self {
        Self { autoplay: true, interval: DEFAULT_TESTIMONIAL_INTERVAL_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub breakpoints: Breakpoints,
    pub animations: AnimationConfig,
    pub scroll: ScrollConfig,
    pub testimonial: TestimonialConfig,
}

impl Config {
    /// Parses a JSON override. Missing sections keep their defaults.
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads `<script type="application/json" id="learnease-config">` when the
    /// page carries one. Anything malformed is logged and ignored.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring site config override: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn is_mobile_width(&self, width: f64) -> bool {
        width < self.breakpoints.tablet as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_constants() {
        let config = Config::default();
        assert_eq!(config.breakpoints.tablet, 768);
        assert_eq!(config.scroll.offset, 80.0);
        assert_eq!(config.scroll.threshold, 100.0);
        assert!(config.testimonial.autoplay);
        assert_eq!(config.testimonial.interval_ms(), 5000);
    }

    #[test]
    fn partial_override_keeps_other_sections() {
        let config = Config::from_json(r#"{"testimonial": {"interval": 8000}}"#).unwrap();
        assert_eq!(config.testimonial.interval_ms(), 8000);
        assert!(config.testimonial.autoplay);
        assert_eq!(config.breakpoints, Breakpoints::default());
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let config = Config::from_json(r#"{"testimonial": {"autoplay": true, "interval": 0}}"#).unwrap();
        assert_eq!(config.testimonial.interval_ms(), DEFAULT_TESTIMONIAL_INTERVAL_MS);
    }

    #[test]
    fn negative_interval_is_rejected() {
        assert!(Config::from_json(r#"{"testimonial": {"interval": -5}}"#).is_err());
    }

    #[test]
    fn mobile_width_uses_tablet_breakpoint() {
        let config = Config::default();
        assert!(config.is_mobile_width(767.0));
        assert!(!config.is_mobile_width(768.0));
    }
}
