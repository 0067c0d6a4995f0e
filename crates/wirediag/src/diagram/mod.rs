//! Diagram assembly: placing components and routing every wire.

pub mod layout;

use log::{debug, info, warn};

use crate::components::Component;
use crate::error::{Result, WiringError};
use crate::geometry::Rotation;
use crate::palette::{ColorAssigner, Palette};
use crate::project::Project;
use crate::rails::{RailAllocator, RailAssignment};
use crate::routing::grid::{OccupancyGrid, OverlapPolicy};
use crate::routing::route_pins;
use crate::routing::types::{PinKind, RouteResult, RouterConfig, WireRequest};
use crate::routing::wire::{Wire, WireColor};
use layout::{Layout, fit_into};

/// Everything that shapes a diagram apart from its parts.
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    pub width: u32,
    pub height: u32,
    pub overlap: OverlapPolicy,
    pub rails: RailAssignment,
    pub router: RouterConfig,
    /// Abort on the first wire that cannot be built instead of skipping it.
    pub strict: bool,
    pub palette: Palette,
}

impl DiagramOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            overlap: OverlapPolicy::default(),
            rails: RailAssignment::default(),
            router: RouterConfig::for_canvas(width, height, RouterConfig::DEFAULT_SEGMENT_RATIO),
            strict: false,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Input,
    Output,
}

/// A component at its final canvas position.
#[derive(Debug, Clone)]
pub struct PlacedComponent {
    pub role: Role,
    pub component: Component,
}

/// A routed wire and the pins it joins.
#[derive(Debug, Clone)]
pub struct DiagramWire {
    pub component: String,
    pub pin: u32,
    pub controller_pin: u32,
    pub kind: PinKind,
    pub wire: Wire,
}

/// One row of the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: WireColor,
}

/// A fully assembled diagram, ready to draw.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub controller: Component,
    pub components: Vec<PlacedComponent>,
    pub wires: Vec<DiagramWire>,
    /// Wires that were skipped, with the reason.
    pub warnings: Vec<String>,
    pub grid: OccupancyGrid,
}

impl Diagram {
    /// One entry per wire, in routing order. A part with a rated resistance
    /// has it appended, e.g. `... -> Pi pin 12 (120 Ω)`.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.wires
            .iter()
            .map(|w| {
                let mut label =
                    format!("{} -> {} pin {}", w.wire.label, self.controller.label, w.controller_pin);
                if let Some(ohms) = self.component(&w.component).and_then(|c| c.ratings.get("Resistance")) {
                    label.push_str(&format!(" ({ohms})"));
                }
                LegendEntry {
                    label,
                    color: w.wire.color.clone(),
                }
            })
            .collect()
    }

    pub fn component(&self, label: &str) -> Option<&Component> {
        self.components
            .iter()
            .map(|p| &p.component)
            .find(|c| c.label == label)
    }

    pub fn wire_for(&self, component: &str, pin: u32) -> Option<&DiagramWire> {
        self.wires
            .iter()
            .find(|w| w.component == component && w.pin == pin)
    }
}

/// Collects the parts of a diagram and assembles it.
#[derive(Debug, Clone)]
pub struct DiagramBuilder {
    title: String,
    options: DiagramOptions,
    controller: Component,
    inputs: Vec<Component>,
    outputs: Vec<Component>,
}

impl DiagramBuilder {
    pub fn new(title: impl Into<String>, controller: Component, options: DiagramOptions) -> Self {
        Self {
            title: title.into(),
            options,
            controller,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn from_project(project: &Project, options: DiagramOptions) -> Result<Self> {
        let mut builder = Self::new(&project.title, project.controller_component()?, options);
        builder.inputs = project.input_components()?;
        builder.outputs = project.output_components()?;
        Ok(builder)
    }

    /// Add a component to the top row. Its pins should face down.
    pub fn input(mut self, component: Component) -> Self {
        self.inputs.push(component);
        self
    }

    /// Add a component to the bottom row. It is turned half way round so
    /// pins that face down in its artwork face the controller.
    pub fn output(mut self, component: Component) -> Self {
        self.outputs.push(component);
        self
    }

    pub fn build(self) -> Result<Diagram> {
        let DiagramBuilder {
            title,
            options,
            controller,
            inputs,
            outputs,
        } = self;
        let layout = Layout::new(options.width, options.height);

        let controller = fit_into(&controller, layout.controller_area());
        debug!("Placed controller '{}' at {}", controller.label, controller.origin);

        let mut components = Vec::with_capacity(inputs.len() + outputs.len());
        let top = Layout::slots(layout.top_row(), inputs.len());
        for (part, slot) in inputs.iter().zip(top) {
            components.push(PlacedComponent {
                role: Role::Input,
                component: fit_into(part, slot),
            });
        }
        let bottom = Layout::slots(layout.bottom_row(), outputs.len());
        for (part, slot) in outputs.iter().zip(bottom) {
            components.push(PlacedComponent {
                role: Role::Output,
                component: fit_into(&part.rotated(Rotation::Half), slot),
            });
        }
        for placed in &components {
            debug!(
                "Placed {:?} '{}' at {} ({}x{})",
                placed.role,
                placed.component.label,
                placed.component.origin,
                placed.component.size.0,
                placed.component.size.1
            );
        }

        let mut rails = RailAllocator::new(options.rails, &controller);
        let mut colors = ColorAssigner::new(options.palette.clone());
        let mut warnings = Vec::new();
        let mut requests = Vec::new();
        let mut origins = Vec::new();

        for placed in &components {
            let part = &placed.component;
            for (&number, pin) in &part.pins {
                let Some(destination) = pin.destination else {
                    continue;
                };
                let Some(departure) = pin.location else {
                    let err = WiringError::MissingDirection {
                        component: part.label.clone(),
                        pin: number,
                    };
                    skip_or_abort(options.strict, err, &mut warnings)?;
                    continue;
                };
                let controller_pin = rails.resolve(destination);
                let Some(target) = controller.anchor(controller_pin) else {
                    let err = WiringError::UnknownControllerPin {
                        controller: controller.label.clone(),
                        pin: controller_pin,
                    };
                    skip_or_abort(options.strict, err, &mut warnings)?;
                    continue;
                };
                requests.push(WireRequest {
                    label: part.pin_label(number),
                    start: pin.anchor(),
                    destination: target,
                    departure,
                    color: colors.assign(pin.usage),
                });
                origins.push((part.label.clone(), number, controller_pin, pin.usage));
            }
        }

        let grid = OccupancyGrid::with_policy(options.width, options.height, options.overlap);
        let output = route_pins(&requests, &options.router, grid)?;

        let mut wires = Vec::with_capacity(output.results.len());
        for ((_, result), (component, pin, controller_pin, kind)) in
            output.results.into_iter().zip(origins)
        {
            match result {
                RouteResult::Success(wire) => wires.push(DiagramWire {
                    component,
                    pin,
                    controller_pin,
                    kind,
                    wire,
                }),
                RouteResult::Failure { warning, error } => {
                    if options.strict {
                        return Err(error);
                    }
                    warnings.push(warning);
                }
            }
        }

        info!(
            "Assembled '{}': {} components, {} wires, {} skipped",
            title,
            components.len() + 1,
            wires.len(),
            warnings.len()
        );
        Ok(Diagram {
            title,
            width: options.width,
            height: options.height,
            controller,
            components,
            wires,
            warnings,
            grid: output.grid,
        })
    }
}

fn skip_or_abort(strict: bool, err: WiringError, warnings: &mut Vec<String>) -> Result<()> {
    if strict {
        return Err(err);
    }
    warn!("Skipping wire: {err}");
    warnings.push(err.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::catalog;
    use crate::components::{ComponentKind, PinEntry};
    use crate::routing::types::PinDestination;

    fn doorbell(options: DiagramOptions) -> DiagramBuilder {
        DiagramBuilder::new("Doorbell", catalog::pi_header("Raspberry Pi"), options)
            .input(catalog::button("Doorbell", 11))
            .output(catalog::led("Chime light", 12))
            .output(catalog::resistor("R1", 220.0))
    }

    #[test]
    fn routes_every_wired_pin() {
        let diagram = doorbell(DiagramOptions::new(1920, 1080)).build().unwrap();
        assert!(diagram.warnings.is_empty(), "{:?}", diagram.warnings);
        assert_eq!(diagram.components.len(), 3);
        assert_eq!(diagram.wires.len(), 4);

        for dw in &diagram.wires {
            let part = diagram
                .components
                .iter()
                .find(|p| p.component.label == dw.component)
                .unwrap();
            assert_eq!(dw.wire.start(), Some(&part.component.anchor(dw.pin).unwrap()));
            assert_eq!(dw.wire.end(), Some(&diagram.controller.anchor(dw.controller_pin).unwrap()));
            assert!(dw.wire.is_contiguous());
        }
        assert!(diagram.grid.painted_count() > 0);
    }

    #[test]
    fn signal_and_rail_destinations() {
        let diagram = doorbell(DiagramOptions::new(1920, 1080)).build().unwrap();
        assert_eq!(diagram.wire_for("Doorbell", 1).unwrap().controller_pin, 11);
        assert_eq!(diagram.wire_for("Doorbell", 2).unwrap().controller_pin, 6);
        assert_eq!(diagram.wire_for("Chime light", 1).unwrap().controller_pin, 6);
        assert_eq!(diagram.wire_for("Chime light", 2).unwrap().controller_pin, 12);
        assert!(diagram.wire_for("R1", 1).is_none());
    }

    #[test]
    fn wire_colours_follow_pin_kind() {
        let options = DiagramOptions::new(1920, 1080);
        let palette = options.palette.clone();
        let diagram = doorbell(options).build().unwrap();
        assert_eq!(diagram.wire_for("Doorbell", 2).unwrap().wire.color.name, "Black");
        assert_eq!(diagram.wire_for("Doorbell", 1).unwrap().wire.color, palette.signal(0));
        assert_eq!(diagram.wire_for("Chime light", 2).unwrap().wire.color, palette.signal(1));
        assert_eq!(diagram.legend().len(), 4);
    }

    #[test]
    fn legend_carries_rated_resistance() {
        let diagram = doorbell(DiagramOptions::new(1920, 1080)).build().unwrap();
        let legend = diagram.legend();
        let anode = diagram
            .wires
            .iter()
            .position(|w| w.component == "Chime light" && w.pin == 2)
            .unwrap();
        assert!(legend[anode].label.ends_with("pin 12 (120 Ω)"), "{}", legend[anode].label);

        let signal = diagram
            .wires
            .iter()
            .position(|w| w.component == "Doorbell" && w.pin == 1)
            .unwrap();
        assert!(legend[signal].label.ends_with("pin 11"), "{}", legend[signal].label);
        assert!(diagram.component("R1").unwrap().rating_summary().is_some());
    }

    #[test]
    fn pins_leave_towards_the_controller() {
        let diagram = doorbell(DiagramOptions::new(1920, 1080)).build().unwrap();
        let input = diagram.wire_for("Doorbell", 1).unwrap().wire.segment(1).unwrap().clone();
        assert!(input.end.y > input.start.y);
        let output = diagram.wire_for("Chime light", 2).unwrap().wire.segment(1).unwrap().clone();
        assert!(output.end.y < output.start.y);

        let ctrl = &diagram.controller;
        assert!(ctrl.origin.y > diagram.components[0].component.origin.y);
        assert!(ctrl.origin.y < diagram.components[1].component.origin.y);
    }

    #[test]
    fn round_robin_spreads_grounds() {
        let options = DiagramOptions {
            rails: RailAssignment::RoundRobin,
            ..DiagramOptions::new(1920, 1080)
        };
        let diagram = doorbell(options).build().unwrap();
        assert_eq!(diagram.wire_for("Doorbell", 2).unwrap().controller_pin, 6);
        assert_eq!(diagram.wire_for("Chime light", 1).unwrap().controller_pin, 9);
    }

    #[test]
    fn unknown_controller_pin_is_skipped_or_fatal() {
        let build = |strict| {
            DiagramBuilder::new(
                "Broken",
                catalog::pi_header("Raspberry Pi"),
                DiagramOptions {
                    strict,
                    ..DiagramOptions::new(1920, 1080)
                },
            )
            .input(catalog::button("Doorbell", 50))
            .build()
        };

        let diagram = build(false).unwrap();
        assert_eq!(diagram.warnings.len(), 1);
        assert!(diagram.warnings[0].contains("no pin 50"), "{}", diagram.warnings[0]);
        assert_eq!(diagram.wires.len(), 1);

        assert_eq!(
            build(true).unwrap_err(),
            WiringError::UnknownControllerPin {
                controller: "Raspberry Pi".to_string(),
                pin: 50
            }
        );
    }

    #[test]
    fn missing_direction_is_reported() {
        let odd = Component::new("Odd", ComponentKind::Button, (100, 100)).with_pin(
            1,
            PinEntry::new("Signal", PinKind::Input, (40.0, 80.0), (60.0, 90.0))
                .wired_to(PinDestination::Pin(11)),
        );
        let options = DiagramOptions {
            strict: true,
            ..DiagramOptions::new(1920, 1080)
        };
        let err = DiagramBuilder::new("T", catalog::pi_header("Pi"), options)
            .input(odd)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            WiringError::MissingDirection {
                component: "Odd".to_string(),
                pin: 1
            }
        );
    }

    #[test]
    fn rejecting_grid_fails_shared_ground_in_strict_mode() {
        let strict = DiagramOptions {
            strict: true,
            overlap: OverlapPolicy::Reject,
            ..DiagramOptions::new(1920, 1080)
        };
        let err = doorbell(strict).build().unwrap_err();
        assert!(matches!(err, WiringError::CellAlreadyPainted { .. }), "{err}");

        let lenient = DiagramOptions {
            overlap: OverlapPolicy::Reject,
            ..DiagramOptions::new(1920, 1080)
        };
        let diagram = doorbell(lenient).build().unwrap();
        assert!(!diagram.warnings.is_empty());
        assert!(diagram.wires.len() < 4);
    }

    #[test]
    fn tracked_overlaps_keep_every_wire() {
        let options = DiagramOptions {
            overlap: OverlapPolicy::Track,
            ..DiagramOptions::new(1920, 1080)
        };
        let diagram = doorbell(options).build().unwrap();
        assert_eq!(diagram.wires.len(), 4);
        let ground = diagram.controller.anchor(6).unwrap().to_pixel();
        assert!(
            diagram
                .grid
                .collisions()
                .iter()
                .any(|c| (c.x, c.y) == ground)
        );
    }

    #[test]
    fn builds_from_project() {
        let project = Project::from_yaml(
            "title: P\ncontroller:\n  label: Pi\ninputs:\n  - kind: button\n    label: B\n    pin: 13\n",
        )
        .unwrap();
        let diagram = DiagramBuilder::from_project(&project, DiagramOptions::new(1280, 720))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(diagram.title, "P");
        assert_eq!(diagram.wires.len(), 2);
        assert_eq!(diagram.wire_for("B", 1).unwrap().controller_pin, 13);
    }
}
