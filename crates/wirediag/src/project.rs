//! Project files: which parts a diagram contains and how they are wired.
//!
//! ```yaml
//! title: Doorbell
//! canvas:
//!   width: 1920
//!   height: 1080
//! controller:
//!   kind: pi-header
//!   label: Raspberry Pi
//! inputs:
//!   - kind: button
//!     label: Doorbell
//!     pin: 11
//! outputs:
//!   - kind: led
//!     label: Chime light
//!     pin: 12
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::components::catalog::{self, PartSpec};
use crate::components::{Component, ComponentKind};
use crate::error::WiringError;
use crate::geometry::Rotation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasSize>,

    pub controller: ControllerEntry,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ComponentEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ComponentEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerEntry {
    #[serde(default = "default_controller_kind")]
    pub kind: String,

    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

fn default_controller_kind() -> String {
    ComponentKind::PiHeader.name().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub kind: String,

    pub label: String,

    /// Physical controller pin for the part's signal lead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u32>,

    /// Extra clockwise rotation of the artwork, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl ComponentEntry {
    /// Catalog part for this entry, turned by its own rotation.
    pub fn build(&self) -> crate::error::Result<Component> {
        let kind: ComponentKind = self.kind.parse()?;
        let spec = PartSpec {
            pin: self.pin,
            resistance: self.resistance,
            image: self.image.clone(),
        };
        let part = catalog::build(kind, &self.label, &spec)?;
        Ok(match self.rotation {
            Some(rotation) => part.rotated(rotation),
            None => part,
        })
    }
}

impl Project {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project: {}", path.display()))?;
        let mut project = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid project file: {}", path.display()))?;
        if let Some(dir) = path.parent() {
            project.resolve_images(dir);
        }
        Ok(project)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let project: Project = serde_yaml::from_str(contents)?;
        if project.title.trim().is_empty() {
            anyhow::bail!("Project title must not be empty");
        }
        if let Some(canvas) = project.canvas {
            if canvas.width == 0 || canvas.height == 0 {
                anyhow::bail!(
                    "Canvas must be at least 1x1, got {}x{}",
                    canvas.width,
                    canvas.height
                );
            }
        }
        Ok(project)
    }

    /// Make relative image paths relative to `dir`.
    pub fn resolve_images(&mut self, dir: &Path) {
        let rebase = |image: &mut Option<PathBuf>| {
            if let Some(path) = image {
                if path.is_relative() {
                    *path = dir.join(&*path);
                }
            }
        };
        rebase(&mut self.controller.image);
        for entry in self.inputs.iter_mut().chain(self.outputs.iter_mut()) {
            rebase(&mut entry.image);
        }
    }

    pub fn controller_component(&self) -> crate::error::Result<Component> {
        let kind: ComponentKind = self.controller.kind.parse()?;
        if !kind.is_controller() {
            return Err(WiringError::InvalidConfig {
                reason: format!("'{}' cannot be used as a controller", self.controller.kind),
            });
        }
        let spec = PartSpec {
            image: self.controller.image.clone(),
            ..PartSpec::default()
        };
        catalog::build(kind, &self.controller.label, &spec)
    }

    pub fn input_components(&self) -> crate::error::Result<Vec<Component>> {
        self.inputs.iter().map(ComponentEntry::build).collect()
    }

    pub fn output_components(&self) -> crate::error::Result<Vec<Component>> {
        self.outputs.iter().map(ComponentEntry::build).collect()
    }
}
