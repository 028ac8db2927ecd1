use once_cell::sync::Lazy;
use regex::Regex;

static CAMEL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+(.)?").unwrap());
static KEBAB_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SLUG_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Upper-cases only the first character, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn camel_case(s: &str) -> String {
    CAMEL_SEPARATOR
        .replace_all(s, |caps: &regex::Captures| {
            caps.get(1).map(|c| c.as_str().to_uppercase()).unwrap_or_default()
        })
        .into_owned()
}

pub fn kebab_case(s: &str) -> String {
    KEBAB_BOUNDARY.replace_all(s, "$1-$2").to_lowercase()
}

/// Shortens `s` to at most `length` characters, suffix included.
pub fn truncate(s: &str, length: usize, suffix: &str) -> String {
    if s.chars().count() <= length {
        return s.to_string();
    }
    let keep = length.saturating_sub(suffix.chars().count());
    s.chars().take(keep).chain(suffix.chars()).collect()
}

pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    let cleaned = NON_SLUG.replace_all(&lowered, "");
    let dashed = SLUG_SEPARATOR.replace_all(&cleaned, "-");
    dashed.trim_matches('-').to_string()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drops markup and decodes the handful of entities `escape_html` produces.
pub fn strip_html(s: &str) -> String {
    HTML_TAG
        .replace_all(s, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_lowercases_tail() {
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(upper_first("email address"), "Email address");
    }

    #[test]
    fn case_conversions() {
        assert_eq!(camel_case("background-color"), "backgroundColor");
        assert_eq!(camel_case("user_first name"), "userFirstName");
        assert_eq!(camel_case("trailing-"), "trailing");
        assert_eq!(kebab_case("backgroundColor"), "background-color");
    }

    #[test]
    fn truncate_counts_suffix() {
        assert_eq!(truncate("short", 10, "..."), "short");
        assert_eq!(truncate("Learn Rust the easy way", 10, "..."), "Learn R...");
        assert_eq!(truncate("abcdef", 2, "..."), "...");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Intro to Web Design!  "), "intro-to-web-design");
        assert_eq!(slugify("Data_Science -- 101"), "data-science-101");
    }

    #[test]
    fn html_escaping() {
        assert_eq!(escape_html("<b>\"Tom & Jerry\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;");
        assert_eq!(strip_html("<p>Fish &amp; <em>chips</em></p>"), "Fish & chips");
    }
}
