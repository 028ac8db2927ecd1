use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\+]?[1-9][0-9\s\-\(\)]{7,}$").unwrap());

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn is_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().map_or(false, |n| !n.is_nan())
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]` with one lowercase,
/// one uppercase, one digit and one of `@$!%*?&`.
pub fn is_strong_password(password: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    password.chars().count() >= 8
        && password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(is_email("ada@learnease.com"));
        assert!(!is_email("ada@learnease"));
        assert!(!is_email("ada @learnease.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn phones() {
        assert!(is_phone("+1 (555) 123-4567"));
        assert!(is_phone("5551234567"));
        assert!(!is_phone("0551234567"));
        assert!(!is_phone("555-12"));
    }

    #[test]
    fn phone_digits_are_ascii_only() {
        assert!(!is_phone("\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}\u{668}\u{669}"));
        assert!(!is_phone("5\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}\u{668}"));
        assert!(is_phone("555 123 4567"));
    }

    #[test]
    fn urls_and_numbers() {
        assert!(is_url("https://learnease.com/courses?id=3"));
        assert!(!is_url("learnease.com"));
        assert!(is_numeric(" 42.5 "));
        assert!(is_numeric("-3e2"));
        assert!(!is_numeric("12abc"));
        assert!(!is_numeric("   "));
        assert!(is_blank(" \t"));
    }

    #[test]
    fn passwords() {
        assert!(is_strong_password("Secur3!pass"));
        assert!(!is_strong_password("Sh0rt!"));
        assert!(!is_strong_password("nouppercase1!"));
        assert!(!is_strong_password("NoSpecial123"));
        assert!(!is_strong_password("Has Space1!"));
    }
}
