//! Color configuration for the TUI.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Colors of the entry list, the detail view and the status line.
///
/// The ordinal marker is colored by store membership; the title text by the
/// author/content match.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub marker_saved: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub marker_unsaved: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub cursor_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub cursor_saved_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub cursor_unsaved_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub author_match: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub content_match: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub detail_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub detail_title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub detail_label: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            marker_saved: Color::Red,
            marker_unsaved: Color::Green,
            cursor_fg: Color::White,
            cursor_saved_bg: Color::Blue,
            cursor_unsaved_bg: Color::Green,
            author_match: Color::Red,
            content_match: Color::Green,
            detail_border: Color::Cyan,
            detail_title: Color::Red,
            detail_label: Color::Yellow,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color name ("Red", "darkgray", ...) or a `#RRGGBB` / `#RGB` code.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    let color = match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" | "default" => Color::Reset,
        _ => return Err(format!("Unknown color: {}", s)),
    };
    Ok(color)
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB is shorthand for #RRGGBB.
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Red").unwrap(), Color::Red);
        assert_eq!(parse_color_string("red").unwrap(), Color::Red);
        assert_eq!(parse_color_string(" DarkGrey ").unwrap(), Color::DarkGray);
        assert_eq!(parse_color_string("default").unwrap(), Color::Reset);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#FF0000").unwrap(), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color_string("#00ff00").unwrap(), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color_string("#00F").unwrap(), Color::Rgb(0, 0, 255));
        assert_eq!(parse_color_string("#FFF").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("invalid").is_err());
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
        assert!(parse_color_string("#ééé").is_err());
    }

    #[test]
    fn test_marker_defaults_differ_by_membership() {
        let colors = ColorConfig::default();
        assert_ne!(colors.marker_saved, colors.marker_unsaved);
        assert_ne!(colors.cursor_saved_bg, colors.cursor_unsaved_bg);
    }
}
