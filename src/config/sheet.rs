//! Style configuration consumed by the sheet controller and its rows

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc, time::Duration};

/// Style options for an action sheet.
///
/// Values are taken as given. Alpha outside `0.0..=1.0`, a zero duration or an
/// oversized icon box are not rejected; they simply produce the corresponding
/// (possibly odd) rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfiguration {
    /// Color the backdrop blends the surface toward
    #[serde(with = "color_string")]
    pub dim_background_color: Color,
    /// Backdrop strength once fully shown
    pub dim_background_alpha: f64,
    /// Duration of both the show and the dismiss animation
    pub animation_duration_ms: u64,
    /// Row title font
    pub text_font: TextFont,
    /// Row title color
    #[serde(with = "color_string")]
    pub text_color: Color,
    /// `true` keeps every title on a single line, `false` lets it wrap
    pub wrap_text: bool,
    /// Box the icon glyph is placed into
    pub icon_size: IconSize,
    /// Maximum list height in rows; `None` means two thirds of the surface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u16>,
}

impl Default for SheetConfiguration {
    fn default() -> Self {
        Self {
            dim_background_color: Color::Black,
            dim_background_alpha: 0.3,
            animation_duration_ms: 250,
            text_font: TextFont::default(),
            text_color: Color::DarkGray,
            wrap_text: true,
            icon_size: IconSize::default(),
            max_height: None,
        }
    }
}

impl SheetConfiguration {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Maximum list height for a surface of the given height
    pub fn resolved_max_height(&self, surface_height: u16) -> u16 {
        self.max_height
            .unwrap_or_else(|| (u32::from(surface_height) * 2 / 3) as u16)
    }

    /// Style applied to row titles
    pub fn text_style(&self) -> Style {
        Style::default()
            .fg(self.text_color)
            .add_modifier(self.text_font.modifier())
    }
}

/// Terminal rendition of a font: the attributes a cell can carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFont {
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
}

impl TextFont {
    pub fn modifier(&self) -> Modifier {
        let mut modifier = Modifier::empty();
        if self.bold {
            modifier |= Modifier::BOLD;
        }
        if self.italic {
            modifier |= Modifier::ITALIC;
        }
        if self.underlined {
            modifier |= Modifier::UNDERLINED;
        }
        modifier
    }
}

/// Icon box in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSize {
    pub width: u16,
    pub height: u16,
}

impl Default for IconSize {
    fn default() -> Self {
        Self {
            width: 2,
            height: 1,
        }
    }
}

/// Handle to one configuration value shared by every holder of a clone.
///
/// Controllers built from clones of the same handle observe each other's
/// writes (last writer wins). Controllers built from separate handles are
/// fully independent.
#[derive(Debug, Clone, Default)]
pub struct SharedConfiguration(Rc<RefCell<SheetConfiguration>>);

impl SharedConfiguration {
    pub fn new(configuration: SheetConfiguration) -> Self {
        Self(Rc::new(RefCell::new(configuration)))
    }

    /// Snapshot of the current value
    pub fn get(&self) -> SheetConfiguration {
        self.0.borrow().clone()
    }

    pub fn set(&self, configuration: SheetConfiguration) {
        *self.0.borrow_mut() = configuration;
    }

    /// Mutate the shared value in place
    pub fn update<F: FnOnce(&mut SheetConfiguration)>(&self, f: F) {
        f(&mut self.0.borrow_mut());
    }

    /// Whether both handles point at the same value
    pub fn is_shared_with(&self, other: &SharedConfiguration) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

mod color_string {
    use ratatui::style::Color;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_str(&raw)
            .map_err(|_| serde::de::Error::custom(format!("invalid color `{}`", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_compact_single_line_rows() {
        let configuration = SheetConfiguration::default();
        assert!(configuration.wrap_text);
        assert_eq!(configuration.dim_background_alpha, 0.3);
        assert_eq!(configuration.animation_duration(), Duration::from_millis(250));
        assert_eq!(configuration.icon_size, IconSize { width: 2, height: 1 });
    }

    #[test]
    fn test_max_height_defaults_to_two_thirds() {
        let mut configuration = SheetConfiguration::default();
        assert_eq!(configuration.resolved_max_height(24), 16);
        assert_eq!(configuration.resolved_max_height(10), 6);

        configuration.max_height = Some(40);
        assert_eq!(configuration.resolved_max_height(24), 40);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let shared = SharedConfiguration::default();
        shared.update(|c| {
            c.dim_background_alpha = 4.0;
            c.animation_duration_ms = 0;
        });

        let configuration = shared.get();
        assert_eq!(configuration.dim_background_alpha, 4.0);
        assert_eq!(configuration.animation_duration(), Duration::ZERO);
    }

    #[test]
    fn test_clones_share_last_write() {
        let first = SharedConfiguration::default();
        let second = first.clone();
        let independent = SharedConfiguration::default();

        second.update(|c| c.wrap_text = false);

        assert!(!first.get().wrap_text);
        assert!(independent.get().wrap_text);
        assert!(first.is_shared_with(&second));
        assert!(!first.is_shared_with(&independent));
    }

    #[test]
    fn test_text_style_carries_font_and_color() {
        let configuration = SheetConfiguration {
            text_font: TextFont {
                bold: true,
                italic: false,
                underlined: true,
            },
            text_color: Color::Cyan,
            ..SheetConfiguration::default()
        };

        let style = configuration.text_style();
        assert_eq!(style.fg, Some(Color::Cyan));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
        assert!(!style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_colors_parse_from_strings() {
        let configuration: SheetConfiguration = toml::from_str(
            r##"
            dim_background_color = "#202020"
            text_color = "yellow"
            wrap_text = false
            "##,
        )
        .unwrap();

        assert_eq!(configuration.dim_background_color, Color::Rgb(0x20, 0x20, 0x20));
        assert_eq!(configuration.text_color, Color::Yellow);
        assert!(!configuration.wrap_text);
        assert_eq!(configuration.animation_duration_ms, 250);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result: Result<SheetConfiguration, _> =
            toml::from_str(r#"text_color = "not-a-color""#);
        assert!(result.is_err());
    }
}
