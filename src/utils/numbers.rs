use web_sys::js_sys::Math;

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `1234567` -> `"1,234,567"`.
pub fn with_commas(num: i64) -> String {
    let grouped = group_thousands(&num.unsigned_abs().to_string());
    if num < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Fixed decimals with thousands separators, as `en-US` formats them.
pub fn format_number(num: f64, decimals: usize) -> String {
    if !num.is_finite() {
        return num.to_string();
    }
    let fixed = format!("{:.*}", decimals, num.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if num < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Treats `num` as a percentage value: `12.34` -> `"12.3%"`.
pub fn format_percentage(num: f64, decimals: usize) -> String {
    format!("{}%", format_number(num, decimals))
}

pub fn format_currency(amount: f64, currency: &str) -> String {
    let (symbol, decimals) = match currency.to_ascii_uppercase().as_str() {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        other => (format!("{} ", other), 2),
    };
    let formatted = format_number(amount.abs(), decimals);
    if amount < 0.0 {
        format!("-{}{}", symbol, formatted)
    } else {
        format!("{}{}", symbol, formatted)
    }
}

pub fn clamp(num: f64, min: f64, max: f64) -> f64 {
    num.max(min).min(max)
}

pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

pub fn random_between(min: f64, max: f64) -> f64 {
    Math::random() * (max - min) + min
}

/// Inclusive on both ends.
pub fn random_int(min: i64, max: i64) -> i64 {
    (Math::random() * (max - min + 1) as f64).floor() as i64 + min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(1000), "1,000");
        assert_eq!(with_commas(-1234567), "-1,234,567");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(format_number(1234.5, 2), "1,234.50");
        assert_eq!(format_number(1234.4, 0), "1,234");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_percentage(12.34, 1), "12.3%");
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(format_currency(49.9, "USD"), "$49.90");
        assert_eq!(format_currency(-1200.0, "eur"), "-€1,200.00");
        assert_eq!(format_currency(5000.0, "JPY"), "¥5,000");
        assert_eq!(format_currency(10.0, "CHF"), "CHF 10.00");
    }

    #[test]
    fn clamp_and_lerp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
    }
}
