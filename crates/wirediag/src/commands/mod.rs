pub mod completion;
pub mod config;
pub mod render;
pub mod route;
pub mod version;

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, RenderSettings};
use crate::diagram::{Diagram, DiagramBuilder};
use crate::project::Project;

/// Load a project and assemble its diagram under the merged settings.
pub(crate) fn build_diagram(
    file: &Path,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<(Diagram, RenderSettings)> {
    let project = Project::load(file)?;
    let config = Config::load_or_default();
    let settings = RenderSettings::resolve(&config, project.canvas.as_ref(), width, height);
    let diagram = DiagramBuilder::from_project(&project, settings.diagram_options())?.build()?;
    Ok((diagram, settings))
}
