use web_sys::js_sys::Math;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parses `#rrggbb` (the `#` is optional).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Adds `amount` to every channel, saturating. Unparseable input is returned unchanged.
pub fn lighten(color: &str, amount: u8) -> String {
    match hex_to_rgb(color) {
        Some(c) => rgb_to_hex(Rgb {
            r: c.r.saturating_add(amount),
            g: c.g.saturating_add(amount),
            b: c.b.saturating_add(amount),
        }),
        None => color.to_string(),
    }
}

pub fn darken(color: &str, amount: u8) -> String {
    match hex_to_rgb(color) {
        Some(c) => rgb_to_hex(Rgb {
            r: c.r.saturating_sub(amount),
            g: c.g.saturating_sub(amount),
            b: c.b.saturating_sub(amount),
        }),
        None => color.to_string(),
    }
}

pub fn random_color() -> String {
    format!("#{:06x}", (Math::random() * 16_777_215.0).floor() as u32)
}
