//! Presentation theme catalog: named color palettes and background images,
//! loaded once at startup and read-only afterwards.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Theme family, matching the service's `theme_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Color,
    Background,
}

impl ThemeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Background => "background",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Color => "Colors",
            Self::Background => "Backgrounds",
        }
    }
}

/// The user's choice, applied at generation time. No default: generation is
/// blocked until one is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTheme {
    pub kind: ThemeKind,
    pub name: String,
}

impl SelectedTheme {
    pub fn new(kind: ThemeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// A named color palette. Colors are `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub name: String,
    pub display_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
}

/// A named full-slide background image, referenced by preview path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundTheme {
    pub name: String,
    pub display_name: String,
    pub preview_image: String,
}

/// The full catalog. Selections are validated against it; entries are never
/// mutated at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCatalog {
    pub colors: Vec<ColorTheme>,
    pub backgrounds: Vec<BackgroundTheme>,
}

impl ThemeCatalog {
    /// The catalog shipped with the editor.
    pub fn builtin() -> Self {
        fn color(name: &str, display: &str, primary: &str, secondary: &str, text: &str) -> ColorTheme {
            ColorTheme {
                name: name.to_string(),
                display_name: display.to_string(),
                primary_color: primary.to_string(),
                secondary_color: secondary.to_string(),
                text_color: text.to_string(),
            }
        }
        fn background(name: &str, display: &str, preview: &str) -> BackgroundTheme {
            BackgroundTheme {
                name: name.to_string(),
                display_name: display.to_string(),
                preview_image: preview.to_string(),
            }
        }

        Self {
            colors: vec![
                color("corporate_blue", "Corporate Blue", "#2563eb", "#dbeafe", "#1e40af"),
                color("elegant_purple", "Elegant Purple", "#7c3aed", "#ede9fe", "#5b21b6"),
                color("modern_teal", "Modern Teal", "#0d9488", "#ccfbf1", "#0f766e"),
                color("warm_orange", "Warm Orange", "#ea580c", "#fed7aa", "#c2410c"),
                color("professional_gray", "Professional Gray", "#4b5563", "#f3f4f6", "#374151"),
                color("vibrant_green", "Vibrant Green", "#16a34a", "#dcfce7", "#15803d"),
            ],
            backgrounds: vec![
                background("blue_gradient", "Blue Gradient", "blue_gradient.jpg"),
                background("geometric_pattern", "Geometric Pattern", "geometric_pattern.jpg"),
                background("green_gradient", "Green Gradient", "green_gradient.jpg"),
            ],
        }
    }

    /// Whether a selection names a catalog entry of the matching kind.
    pub fn contains(&self, selected: &SelectedTheme) -> bool {
        match selected.kind {
            ThemeKind::Color => self.colors.iter().any(|t| t.name == selected.name),
            ThemeKind::Background => self.backgrounds.iter().any(|t| t.name == selected.name),
        }
    }

    pub fn display_name(&self, selected: &SelectedTheme) -> Option<&str> {
        match selected.kind {
            ThemeKind::Color => self
                .colors
                .iter()
                .find(|t| t.name == selected.name)
                .map(|t| t.display_name.as_str()),
            ThemeKind::Background => self
                .backgrounds
                .iter()
                .find(|t| t.name == selected.name)
                .map(|t| t.display_name.as_str()),
        }
    }

    pub fn count(&self, kind: ThemeKind) -> usize {
        match kind {
            ThemeKind::Color => self.colors.len(),
            ThemeKind::Background => self.backgrounds.len(),
        }
    }
}

/// Platform catalog path: `<config_dir>/deckdraft/themes.toml`.
pub fn catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("deckdraft").join("themes.toml"))
}

/// Load the catalog: a CWD `deckdraft-themes.toml` overrides the platform
/// file, which overrides the built-in catalog. Override is whole-file: a
/// custom catalog fully replaces the built-in entries.
pub fn load_catalog() -> ThemeCatalog {
    let cwd = load_from_path(&PathBuf::from("deckdraft-themes.toml"));
    let platform = catalog_path().and_then(|p| load_from_path(&p));
    cwd.or(platform).unwrap_or_else(ThemeCatalog::builtin)
}

fn load_from_path(path: &PathBuf) -> Option<ThemeCatalog> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unparsable theme catalog");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.colors.len(), 6);
        assert_eq!(catalog.backgrounds.len(), 3);
    }

    #[test]
    fn test_contains_matches_kind_and_name() {
        let catalog = ThemeCatalog::builtin();
        assert!(catalog.contains(&SelectedTheme::new(ThemeKind::Color, "modern_teal")));
        assert!(catalog.contains(&SelectedTheme::new(ThemeKind::Background, "blue_gradient")));
        // Right name, wrong kind.
        assert!(!catalog.contains(&SelectedTheme::new(ThemeKind::Background, "modern_teal")));
        assert!(!catalog.contains(&SelectedTheme::new(ThemeKind::Color, "no_such_theme")));
    }

    #[test]
    fn test_catalog_toml_round_trip() {
        let catalog = ThemeCatalog::builtin();
        let text = toml::to_string_pretty(&catalog).unwrap();
        let back: ThemeCatalog = toml::from_str(&text).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_theme_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ThemeKind::Color).unwrap(),
            "\"color\""
        );
        assert_eq!(
            serde_json::to_string(&ThemeKind::Background).unwrap(),
            "\"background\""
        );
    }
}
