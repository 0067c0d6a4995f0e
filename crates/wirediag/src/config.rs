use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::diagram::DiagramOptions;
use crate::project::CanvasSize;
use crate::rails::RailAssignment;
use crate::routing::grid::OverlapPolicy;
use crate::routing::types::RouterConfig;
use crate::theme::Theme;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "wirediag";

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Smallest `segment_ratio` accepted by `config set`; at 1000 px of canvas
/// height it gives the router's minimum 1 px step.
pub const MIN_SEGMENT_RATIO: f64 = 0.001;

const KEYS: &[&str] = &[
    "defaults.width",
    "defaults.height",
    "defaults.theme",
    "defaults.overlap",
    "defaults.rails",
    "defaults.segment_ratio",
    "defaults.departure_multiplier",
    "defaults.wire_width",
    "defaults.strict",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<OverlapPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rails: Option<RailAssignment>,

    /// Fraction of the canvas height used as the step cap on both axes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_ratio: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_multiplier: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `wirediag config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# wirediag configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.width" => defaults.width = Some(parse_pixels("width", value)?),
            "defaults.height" => defaults.height = Some(parse_pixels("height", value)?),
            "defaults.theme" => {
                if !Theme::names().contains(&value) {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                }
                defaults.theme = Some(value.to_string());
            }
            "defaults.overlap" => {
                let Some(policy) = OverlapPolicy::parse(value) else {
                    anyhow::bail!(
                        "Invalid overlap policy: {value}. Must be 'reject', 'overwrite', or 'track'."
                    );
                };
                defaults.overlap = Some(policy);
            }
            "defaults.rails" => {
                let Some(rails) = RailAssignment::parse(value) else {
                    anyhow::bail!("Invalid rail assignment: {value}. Must be 'shared' or 'round-robin'.");
                };
                defaults.rails = Some(rails);
            }
            "defaults.segment_ratio" => {
                let ratio: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid segment_ratio: {value}. Must be a number."))?;
                if !(MIN_SEGMENT_RATIO..=1.0).contains(&ratio) {
                    anyhow::bail!(
                        "Invalid segment_ratio: {value}. Must be between {MIN_SEGMENT_RATIO} and 1."
                    );
                }
                defaults.segment_ratio = Some(ratio);
            }
            "defaults.departure_multiplier" => {
                let multiplier: f64 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid departure_multiplier: {value}. Must be a number.")
                })?;
                if !multiplier.is_finite() || multiplier < 0.0 {
                    anyhow::bail!("Invalid departure_multiplier: {value}. Must not be negative.");
                }
                defaults.departure_multiplier = Some(multiplier);
            }
            "defaults.wire_width" => defaults.wire_width = Some(parse_pixels("wire_width", value)?),
            "defaults.strict" => {
                let strict = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!("Invalid strict: {value}. Must be 'true' or 'false'."),
                };
                defaults.strict = Some(strict);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }
}

fn parse_pixels(name: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(px) if px > 0 => Ok(px),
        _ => anyhow::bail!("Invalid {name}: {value}. Must be a positive whole number of pixels."),
    }
}

/// Everything a render needs, after merging command-line flags, the
/// project's canvas, the config file and built-in defaults (in that order).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub theme: String,
    pub overlap: OverlapPolicy,
    pub rails: RailAssignment,
    pub segment_ratio: f64,
    pub departure_multiplier: f64,
    pub wire_width: u32,
    pub strict: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::resolve(&Config::default(), None, None, None)
    }
}

impl RenderSettings {
    pub fn resolve(
        config: &Config,
        canvas: Option<&CanvasSize>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        let d = config.defaults.clone().unwrap_or_default();
        Self {
            width: width
                .or(canvas.map(|c| c.width))
                .or(d.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: height
                .or(canvas.map(|c| c.height))
                .or(d.height)
                .unwrap_or(DEFAULT_HEIGHT),
            theme: d.theme.unwrap_or_else(|| "light".to_string()),
            overlap: d.overlap.unwrap_or_default(),
            rails: d.rails.unwrap_or_default(),
            segment_ratio: d
                .segment_ratio
                .unwrap_or(RouterConfig::DEFAULT_SEGMENT_RATIO),
            departure_multiplier: d
                .departure_multiplier
                .unwrap_or(RouterConfig::DEFAULT_DEPARTURE_MULTIPLIER),
            wire_width: d.wire_width.unwrap_or(crate::routing::wire::DEFAULT_WIRE_WIDTH),
            strict: d.strict.unwrap_or(false),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.theme)
    }

    pub fn diagram_options(&self) -> DiagramOptions {
        let mut options = DiagramOptions::new(self.width, self.height);
        options.router = RouterConfig {
            departure_multiplier: self.departure_multiplier,
            wire_width: self.wire_width,
            ..RouterConfig::for_canvas(self.width, self.height, self.segment_ratio)
        };
        options.overlap = self.overlap;
        options.rails = self.rails;
        options.strict = self.strict;
        options
    }
}
