//! Host theme → CSS custom properties.

use std::fmt;
use thiserror::Error;
use tma_api_types::ThemeParams;

pub const BG_COLOR_VAR: &str = "--tg-theme-bg-color";
pub const TEXT_COLOR_VAR: &str = "--tg-theme-text-color";
pub const BUTTON_COLOR_VAR: &str = "--tg-theme-button-color";
pub const BUTTON_TEXT_COLOR_VAR: &str = "--tg-theme-button-text-color";
pub const SECONDARY_BG_COLOR_VAR: &str = "--tg-theme-secondary-bg-color";
pub const TEXT_COLOR_RGB_VAR: &str = "--tg-theme-text-color-rgb";

const DEFAULT_BG_COLOR: &str = "#ffffff";
const DEFAULT_TEXT_COLOR: &str = "#000000";
const DEFAULT_BUTTON_COLOR: &str = "#3390ec";
const DEFAULT_BUTTON_TEXT_COLOR: &str = "#ffffff";
const DEFAULT_SECONDARY_BG_COLOR: &str = "#f0f0f0";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not set {property}: {reason}")]
pub struct ThemeError {
    pub property: String,
    pub reason: String,
}

/// Where theme variables land; the document root in the browser.
pub trait ThemeSurface {
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Rendered as `r, g, b` for use inside `rgba(var(...), alpha)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// Parses `#rrggbb`, `rrggbb` or `#rgb`. Anything else is black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return Rgb::default();
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => return Rgb::default(),
    };

    let channel = |at: usize| u8::from_str_radix(&expanded[at..at + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Rgb { r, g, b },
        _ => Rgb::default(),
    }
}

fn pick<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

/// Resolved variables in the order they are applied.
pub fn theme_variables(params: &ThemeParams) -> Vec<(&'static str, String)> {
    let text_color = pick(&params.text_color, DEFAULT_TEXT_COLOR);
    vec![
        (BG_COLOR_VAR, pick(&params.bg_color, DEFAULT_BG_COLOR).to_owned()),
        (TEXT_COLOR_VAR, text_color.to_owned()),
        (
            BUTTON_COLOR_VAR,
            pick(&params.button_color, DEFAULT_BUTTON_COLOR).to_owned(),
        ),
        (
            BUTTON_TEXT_COLOR_VAR,
            pick(&params.button_text_color, DEFAULT_BUTTON_TEXT_COLOR).to_owned(),
        ),
        (
            SECONDARY_BG_COLOR_VAR,
            pick(&params.secondary_bg_color, DEFAULT_SECONDARY_BG_COLOR).to_owned(),
        ),
        (TEXT_COLOR_RGB_VAR, hex_to_rgb(text_color).to_string()),
    ]
}

pub fn apply_theme(surface: &dyn ThemeSurface, params: &ThemeParams) -> Result<(), ThemeError> {
    for (name, value) in theme_variables(params) {
        surface.set_property(name, &value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    #[test]
    fn hex_to_rgb_parses_long_and_short_forms() {
        assert_eq!(hex_to_rgb("#3390ec"), Rgb { r: 0x33, g: 0x90, b: 0xec });
        assert_eq!(hex_to_rgb("FFFFFF"), Rgb { r: 255, g: 255, b: 255 });
        assert_eq!(hex_to_rgb("#abc"), Rgb { r: 0xaa, g: 0xbb, b: 0xcc });
    }

    #[test]
    fn malformed_hex_falls_back_to_black() {
        for input in ["", "#", "#12345", "#zzzzzz", "rgb(1,2,3)", "#ééé"] {
            assert_eq!(hex_to_rgb(input), Rgb::default(), "input {input:?}");
        }
        assert_eq!(Rgb::default().to_string(), "0, 0, 0");
    }

    #[test]
    fn defaults_fill_missing_and_blank_params() {
        let params = ThemeParams {
            text_color: Some("#112233".to_owned()),
            bg_color: Some("  ".to_owned()),
            ..ThemeParams::default()
        };
        let vars = theme_variables(&params);

        assert_eq!(vars[0], (BG_COLOR_VAR, "#ffffff".to_owned()));
        assert_eq!(vars[1], (TEXT_COLOR_VAR, "#112233".to_owned()));
        assert_eq!(vars[2], (BUTTON_COLOR_VAR, "#3390ec".to_owned()));
        assert_eq!(vars[5], (TEXT_COLOR_RGB_VAR, "17, 34, 51".to_owned()));
    }

    #[test]
    fn apply_theme_stops_at_first_rejected_property() {
        let surface = RecordingSurface::failing_on(BUTTON_COLOR_VAR);
        let err = apply_theme(&surface, &ThemeParams::default()).unwrap_err();

        assert_eq!(err.property, BUTTON_COLOR_VAR);
        assert_eq!(surface.names(), [BG_COLOR_VAR, TEXT_COLOR_VAR]);
    }
}
