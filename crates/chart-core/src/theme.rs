// File: crates/chart-core/src/theme.rs
// Summary: Axis colors, fonts and dash patterns; series colors come from the dataset.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    /// Backdrop a host paints behind the chart; the engine itself clears to transparent.
    pub background: String,
    /// Horizontal gridlines and the hover guide.
    pub grid: String,
    pub grid_width: f64,
    pub grid_dash: Vec<f64>,
    /// Axis label text.
    pub label: String,
    pub font: String,
    /// Used for a line column without an entry in the color table.
    pub fallback_series: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            background: "#fff".into(),
            grid: "#bbb".into(),
            grid_width: 1.0,
            grid_dash: vec![5.0, 0.0],
            label: "#96a2aa".into(),
            font: "normal 20px Helvetica, sans-serif".into(),
            fallback_series: "#3dc23f".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            background: "#242f3e".into(),
            grid: "#344658".into(),
            grid_width: 1.0,
            grid_dash: vec![5.0, 0.0],
            label: "#546778".into(),
            font: "normal 20px Helvetica, sans-serif".into(),
            fallback_series: "#4bd964".into(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeSource {
    Named(String),
    Inline(Theme),
}

/// Accepts either a theme name (`"dark"`) or an inline theme object.
pub fn named_or_inline<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Theme, D::Error> {
    match ThemeSource::deserialize(deserializer)? {
        ThemeSource::Named(name) => {
            Theme::by_name(&name).ok_or_else(|| D::Error::custom(format!("unknown theme {name:?}")))
        }
        ThemeSource::Inline(theme) => Ok(theme),
    }
}
