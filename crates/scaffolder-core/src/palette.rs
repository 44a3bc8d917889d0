//! Color palette derivation from a single primary color
//!
//! The palette is a pure function of the primary hex color. Anything that is
//! not a 6-digit hex color (optionally `#`-prefixed) yields the fallback
//! palette rather than an error.

use regex::Regex;
use serde::Serialize;
use std::fmt::Write;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
        .expect("hex color pattern is valid")
});

/// Primary color used when the supplied one cannot be parsed
pub const DEFAULT_PRIMARY: &str = "#2563eb";

// Design-system defaults, independent of the primary color
const SUCCESS: &str = "#10b981";
const WARNING: &str = "#f59e0b";
const ERROR: &str = "#ef4444";
const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";
const GRAY: &str = "#6b7280";
const LIGHT_GRAY: &str = "#e5e7eb";
const DARK_GRAY: &str = "#374151";
const BACKGROUND: &str = "#f9fafb";
const SURFACE: &str = "#ffffff";
const TEXT: &str = "#111827";
const TEXT_SECONDARY: &str = "#6b7280";
const BORDER: &str = "#d1d5db";
const SHADOW: &str = "rgba(0, 0, 0, 0.1)";

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb` (either case)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let caps = HEX_COLOR.captures(hex)?;
        let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
        Some(Self {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
        })
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Scale every channel down by `percent`
    pub fn darken(self, percent: f64) -> Self {
        let factor = 1.0 - percent / 100.0;
        self.map(|c| scale(c, factor))
    }

    /// Scale every channel up by `percent`, saturating at 255
    pub fn lighten(self, percent: f64) -> Self {
        let factor = 1.0 + percent / 100.0;
        self.map(|c| scale(c, factor))
    }

    /// Average of each channel with its inverse
    pub fn muted_complement(self) -> Self {
        self.map(|c| {
            let inverse = 255 - c;
            ((f64::from(c) + f64::from(inverse)) / 2.0).round() as u8
        })
    }
}

fn scale(channel: u8, factor: f64) -> u8 {
    (f64::from(channel) * factor).round().clamp(0.0, 255.0) as u8
}

/// Named colors written into the generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    pub primary_dark: String,
    pub primary_light: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub white: String,
    pub black: String,
    pub gray: String,
    pub light_gray: String,
    pub dark_gray: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub shadow: String,
}

impl ColorPalette {
    fn with_brand(primary: String, dark: String, light: String, secondary: String) -> Self {
        Self {
            primary,
            primary_dark: dark,
            accent: light.clone(),
            primary_light: light,
            secondary,
            success: SUCCESS.to_string(),
            warning: WARNING.to_string(),
            error: ERROR.to_string(),
            white: WHITE.to_string(),
            black: BLACK.to_string(),
            gray: GRAY.to_string(),
            light_gray: LIGHT_GRAY.to_string(),
            dark_gray: DARK_GRAY.to_string(),
            background: BACKGROUND.to_string(),
            surface: SURFACE.to_string(),
            text: TEXT.to_string(),
            text_secondary: TEXT_SECONDARY.to_string(),
            border: BORDER.to_string(),
            shadow: SHADOW.to_string(),
        }
    }

    /// Palette used when the primary color is not a valid hex color
    pub fn fallback() -> Self {
        Self::with_brand(
            DEFAULT_PRIMARY.to_string(),
            "#1d4ed8".to_string(),
            "#3b82f6".to_string(),
            "#7c3aed".to_string(),
        )
    }

    /// Fields in declaration order, paired with their camelCase names
    pub fn entries(&self) -> [(&'static str, &str); 19] {
        [
            ("primary", &self.primary),
            ("primaryDark", &self.primary_dark),
            ("primaryLight", &self.primary_light),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("success", &self.success),
            ("warning", &self.warning),
            ("error", &self.error),
            ("white", &self.white),
            ("black", &self.black),
            ("gray", &self.gray),
            ("lightGray", &self.light_gray),
            ("darkGray", &self.dark_gray),
            ("background", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("textSecondary", &self.text_secondary),
            ("border", &self.border),
            ("shadow", &self.shadow),
        ]
    }
}

/// Derive the full palette from a primary hex color
pub fn derive_palette(primary_hex: &str) -> ColorPalette {
    let Some(rgb) = Rgb::from_hex(primary_hex) else {
        tracing::debug!(color = primary_hex, "unparseable primary color, using fallback palette");
        return ColorPalette::fallback();
    };

    ColorPalette::with_brand(
        rgb.to_hex(),
        rgb.darken(20.0).to_hex(),
        rgb.lighten(20.0).to_hex(),
        rgb.muted_complement().to_hex(),
    )
}

/// Render the palette as the `colors.ts` constants module
pub fn render_palette_module(palette: &ColorPalette) -> String {
    let mut out = String::from("export const colors = {\n");
    for (name, value) in palette.entries() {
        let _ = writeln!(out, "  {}: \"{}\",", name, value);
    }
    out.push_str("};\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_with_and_without_hash() {
        let expected = Rgb {
            r: 0x25,
            g: 0x63,
            b: 0xeb,
        };
        assert_eq!(Rgb::from_hex("#2563eb"), Some(expected));
        assert_eq!(Rgb::from_hex("2563EB"), Some(expected));
        assert_eq!(Rgb::from_hex("#2563e"), None);
        assert_eq!(Rgb::from_hex("#2563ebff"), None);
        assert_eq!(Rgb::from_hex("#zz63eb"), None);
    }

    #[test]
    fn test_darken_and_lighten() {
        let rgb = Rgb::from_hex("#2563eb").unwrap();
        assert_eq!(rgb.darken(20.0).to_hex(), "#1e4fbc");
        assert_eq!(rgb.lighten(20.0).to_hex(), "#2c77ff");
    }

    #[test]
    fn test_lighten_saturates() {
        let rgb = Rgb::from_hex("#ffffff").unwrap();
        assert_eq!(rgb.lighten(20.0).to_hex(), "#ffffff");
    }

    #[test]
    fn test_muted_complement_is_midpoint() {
        // c + (255 - c) is always 255, so every channel lands on 128
        for hex in ["#000000", "#2563eb", "#ffffff", "#10b981"] {
            let rgb = Rgb::from_hex(hex).unwrap();
            assert_eq!(rgb.muted_complement().to_hex(), "#808080");
        }
    }

    #[test]
    fn test_derive_normalizes_primary() {
        let palette = derive_palette("FF5733");
        assert_eq!(palette.primary, "#ff5733");
        assert_eq!(palette.accent, palette.primary_light);
        assert_eq!(palette.shadow, "rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn test_invalid_color_uses_fallback() {
        for bad in ["", "#fff", "blue", "#12345g", "##2563eb", " #2563eb"] {
            assert_eq!(derive_palette(bad), ColorPalette::fallback(), "{bad:?}");
        }
        assert_eq!(ColorPalette::fallback().primary, DEFAULT_PRIMARY);
    }

    #[test]
    fn test_render_module_order() {
        let rendered = render_palette_module(&ColorPalette::fallback());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.first(), Some(&"export const colors = {"));
        assert_eq!(lines[1], "  primary: \"#2563eb\",");
        assert_eq!(lines[2], "  primaryDark: \"#1d4ed8\",");
        assert_eq!(lines[19], "  shadow: \"rgba(0, 0, 0, 0.1)\",");
        assert_eq!(lines.last(), Some(&"};"));
        assert_eq!(lines.len(), 21);
        assert!(rendered.ends_with("};\n"));
    }
}
