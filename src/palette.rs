//! Color tokens shared by the scene, the overlay and the catalog.

use glam::Vec3;

/// Named colors of the site. Values are `#rrggbb` tokens so the same strings
/// can be handed to CSS and parsed for WebGL.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: &'static str,
    pub fog: &'static str,
    pub accent: &'static str,
    pub accent_alt: &'static str,
    pub ground: &'static str,
    pub text: &'static str,
    pub star: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#05060a",
            fog: "#0b0f1a",
            accent: "#7df9ff",
            accent_alt: "#ff5ec4",
            ground: "#0a0d16",
            text: "#e6f1ff",
            star: "#ffffff",
        }
    }
}

/// Parse a `#rrggbb` (or `#rgb`) token into linear-ish `0..=1` RGB.
pub fn parse_hex(token: &str) -> Option<Vec3> {
    let hex = token.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
    match hex.len() {
        6 => Some(Vec3::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| {
                let c = &hex[i..i + 1];
                channel(&format!("{c}{c}"))
            };
            Some(Vec3::new(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_tokens() {
        assert_eq!(parse_hex("#ffffff"), Some(Vec3::ONE));
        assert_eq!(parse_hex("#000"), Some(Vec3::ZERO));
        let c = parse_hex("#ff0080").unwrap();
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 0.0);
        assert!((c.z - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_hex("ffffff"), None);
        assert_eq!(parse_hex("#ggg"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn default_palette_tokens_parse() {
        let p = Palette::default();
        for token in [p.background, p.fog, p.accent, p.accent_alt, p.ground, p.text, p.star] {
            assert!(parse_hex(token).is_some(), "{token}");
        }
    }
}
