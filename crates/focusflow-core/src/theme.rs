//! Light and dark color palettes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub card: &'static str,
    pub text_secondary: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub highlight: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
}

pub const LIGHT: Palette = Palette {
    bg: "#F5F1E3",
    text: "#1E3A5F",
    accent: "#A7C7E7",
    card: "#FFFFFF",
    text_secondary: "#7F8C8D",
    primary: "#26A69A",
    secondary: "#80CBC4",
    highlight: "#E0F2F1",
    error: "#F44336",
    success: "#4CAF50",
    warning: "#FF9800",
};

pub const DARK: Palette = Palette {
    bg: "#0E1A2B",
    text: "#F5E8C7",
    accent: "#89A7C1",
    card: "#1A2942",
    text_secondary: "#A0AEC0",
    primary: "#4DB8AC",
    secondary: "#6BCFC7",
    highlight: "#2A3F5F",
    error: "#FF6B6B",
    success: "#51CF66",
    warning: "#FFA94D",
};

impl Theme {
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored theme name; anything unrecognised is `None`.
    pub fn from_stored(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn palettes_differ() {
        assert_eq!(Theme::Dark.palette().bg, "#0E1A2B");
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }

    #[test]
    fn stored_names() {
        assert_eq!(Theme::from_stored("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_stored("sepia"), None);
    }
}
