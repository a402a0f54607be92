//! Category colors
//!
//! This module provides the palette presets, hex color parsing, and the
//! cyclic assignment of palette colors to category labels.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Color used for points without a mapped category
pub const DEFAULT_FALLBACK_COLOR: &str = "#808080";

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB`, or the short `#RGB` form
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => None,
        }
    }

    /// Format as a CSS hex string, e.g. `#4F81BD`
    pub fn to_css_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Predefined color schemes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorScheme {
    /// Office-style default colors
    #[default]
    Office,
    /// Vibrant colors
    Colorful,
    /// High contrast for accessibility
    HighContrast,
    /// Pastel colors
    Pastel,
    /// Ocean-inspired colors
    Ocean,
    /// Forest-inspired colors
    Forest,
}

impl ColorScheme {
    /// Get the colors for this scheme
    pub fn colors(&self) -> Vec<Color> {
        match self {
            ColorScheme::Office => vec![
                Color::rgb(79, 129, 189),   // Blue
                Color::rgb(192, 80, 77),    // Red
                Color::rgb(155, 187, 89),   // Green
                Color::rgb(128, 100, 162),  // Purple
                Color::rgb(75, 172, 198),   // Teal
                Color::rgb(247, 150, 70),   // Orange
                Color::rgb(119, 146, 60),   // Olive
                Color::rgb(166, 166, 166),  // Gray
            ],
            ColorScheme::Colorful => vec![
                Color::rgb(255, 99, 132),
                Color::rgb(54, 162, 235),
                Color::rgb(255, 206, 86),
                Color::rgb(75, 192, 192),
                Color::rgb(153, 102, 255),
                Color::rgb(255, 159, 64),
                Color::rgb(83, 102, 255),
            ],
            ColorScheme::HighContrast => vec![
                Color::rgb(0, 0, 0),
                Color::rgb(230, 159, 0),
                Color::rgb(86, 180, 233),
                Color::rgb(0, 158, 115),
                Color::rgb(240, 228, 66),
                Color::rgb(0, 114, 178),
                Color::rgb(213, 94, 0),
                Color::rgb(204, 121, 167),
            ],
            ColorScheme::Pastel => vec![
                Color::rgb(174, 198, 207),
                Color::rgb(255, 179, 186),
                Color::rgb(255, 223, 186),
                Color::rgb(186, 255, 201),
                Color::rgb(186, 225, 255),
                Color::rgb(218, 186, 255),
            ],
            ColorScheme::Ocean => vec![
                Color::rgb(2, 62, 138),
                Color::rgb(0, 119, 182),
                Color::rgb(0, 150, 199),
                Color::rgb(0, 180, 216),
                Color::rgb(72, 202, 228),
                Color::rgb(144, 224, 239),
            ],
            ColorScheme::Forest => vec![
                Color::rgb(27, 94, 32),
                Color::rgb(67, 160, 71),
                Color::rgb(129, 199, 132),
                Color::rgb(139, 195, 74),
                Color::rgb(104, 159, 56),
                Color::rgb(85, 139, 47),
            ],
        }
    }

    /// Build a palette from this scheme with the given fallback color
    pub fn palette(&self, fallback: impl Into<String>) -> Palette {
        Palette {
            fallback: fallback.into(),
            colors: self.colors().iter().map(Color::to_css_hex).collect(),
        }
    }

    /// Get all available color schemes
    pub fn all() -> Vec<ColorScheme> {
        vec![
            ColorScheme::Office,
            ColorScheme::Colorful,
            ColorScheme::HighContrast,
            ColorScheme::Pastel,
            ColorScheme::Ocean,
            ColorScheme::Forest,
        ]
    }

    /// Get the name of this color scheme
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Office => "Office",
            ColorScheme::Colorful => "Colorful",
            ColorScheme::HighContrast => "High Contrast",
            ColorScheme::Pastel => "Pastel",
            ColorScheme::Ocean => "Ocean",
            ColorScheme::Forest => "Forest",
        }
    }
}

/// Colors assigned to categories, in order, plus the color for everything else
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub fallback: String,
    pub colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        ColorScheme::default().palette(DEFAULT_FALLBACK_COLOR)
    }
}

/// Ordered mapping from category label to color
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorMap {
    entries: Vec<(String, String)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    fallback: String,
}

impl ColorMap {
    /// Color for a point's category; absent or unmapped categories get the fallback
    pub fn color_for(&self, category: Option<&str>) -> &str {
        category
            .and_then(|c| self.index.get(c))
            .map(|&i| self.entries[i].1.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Mapped color of a category, without fallback
    pub fn get(&self, category: &str) -> Option<&str> {
        self.index.get(category).map(|&i| self.entries[i].1.as_str())
    }

    /// Entries in category order, for legends
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, color)| (c.as_str(), color.as_str()))
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign palette colors to categories in list order, cycling when they run out.
///
/// An empty palette maps nothing, so every category resolves to the fallback.
pub fn create_category_color_map(categories: &[String], palette: &Palette) -> ColorMap {
    let mut map = ColorMap {
        fallback: palette.fallback.clone(),
        ..Default::default()
    };

    if palette.colors.is_empty() {
        return map;
    }

    for (i, category) in categories.iter().enumerate() {
        if map.index.contains_key(category) {
            continue;
        }
        let color = palette.colors[i % palette.colors.len()].clone();
        map.index.insert(category.clone(), map.entries.len());
        map.entries.push((category.clone(), color));
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(colors: &[&str]) -> Palette {
        Palette {
            fallback: "#999".to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#4f81bd").unwrap();
        assert_eq!(color, Color::rgb(79, 129, 189));
        assert_eq!(color.to_css_hex(), "#4F81BD");
        assert_eq!(Color::from_hex("FFF"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("zzzzzz"), None);
        assert_eq!(Color::from_hex("red"), None);
    }

    #[test]
    fn test_color_map_in_order() {
        let map = create_category_color_map(&labels(&["todo", "done"]), &palette(&["#a", "#b", "#c"]));
        assert_eq!(map.color_for(Some("todo")), "#a");
        assert_eq!(map.color_for(Some("done")), "#b");
        let entries: Vec<_> = map.entries().collect();
        assert_eq!(entries, vec![("todo", "#a"), ("done", "#b")]);
    }

    #[test]
    fn test_color_map_cycles() {
        let categories = labels(&["a", "b", "c", "d", "e"]);
        let colors = ["#1", "#2"];
        let map = create_category_color_map(&categories, &palette(&colors));

        for (i, category) in categories.iter().enumerate() {
            assert_eq!(map.color_for(Some(category)), colors[i % colors.len()]);
        }
    }

    #[test]
    fn test_color_map_fallbacks() {
        let map = create_category_color_map(&labels(&["a"]), &palette(&["#1"]));
        assert_eq!(map.color_for(None), "#999");
        assert_eq!(map.color_for(Some("unknown")), "#999");
        assert_eq!(map.get("unknown"), None);
    }

    #[test]
    fn test_empty_color_map() {
        let map = create_category_color_map(&[], &palette(&["#1"]));
        assert!(map.is_empty());
        assert_eq!(map.color_for(None), "#999");
        assert_eq!(map.color_for(Some("a")), "#999");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let map = create_category_color_map(&labels(&["a", "b"]), &palette(&[]));
        assert!(map.is_empty());
        assert_eq!(map.color_for(Some("a")), "#999");
    }

    #[test]
    fn test_schemes_produce_palettes() {
        for scheme in ColorScheme::all() {
            let palette = scheme.palette(DEFAULT_FALLBACK_COLOR);
            assert!(!palette.colors.is_empty(), "{}", scheme.name());
            assert!(palette.colors.iter().all(|c| Color::from_hex(c).is_some()));
        }
        assert_eq!(Palette::default().colors[0], "#4F81BD");
    }
}
