//! Resolving rail destinations to physical controller pins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::components::Component;
use crate::routing::types::{PinDestination, Rail};

/// Physical header pin every wire of a rail goes to under [`RailAssignment::Shared`].
pub fn canonical_pin(rail: Rail) -> u32 {
    match rail {
        Rail::Ground => 6,
        Rail::V3_3 => 1,
        Rail::V5 => 2,
    }
}

/// How wires to the same rail are spread over the controller's rail pins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RailAssignment {
    /// Every wire of a rail lands on that rail's single canonical pin.
    #[default]
    Shared,
    /// Wires cycle through every controller pin of the rail in pin order.
    RoundRobin,
}

impl RailAssignment {
    pub fn name(self) -> &'static str {
        match self {
            RailAssignment::Shared => "shared",
            RailAssignment::RoundRobin => "round-robin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "shared" => Some(RailAssignment::Shared),
            "round-robin" => Some(RailAssignment::RoundRobin),
            _ => None,
        }
    }
}

/// Hands out controller pins for component destinations.
#[derive(Debug, Clone)]
pub struct RailAllocator {
    mode: RailAssignment,
    pins: BTreeMap<Rail, Vec<u32>>,
    next: BTreeMap<Rail, usize>,
}

impl RailAllocator {
    pub fn new(mode: RailAssignment, controller: &Component) -> Self {
        let pins = Rail::ALL
            .iter()
            .map(|&rail| (rail, controller.pins_of(rail.kind())))
            .collect();
        Self {
            mode,
            pins,
            next: BTreeMap::new(),
        }
    }

    /// Physical controller pin for `destination`.
    ///
    /// Rails resolve to the canonical pin in shared mode, or when the
    /// controller exposes no pin of that rail.
    pub fn resolve(&mut self, destination: PinDestination) -> u32 {
        let rail = match destination {
            PinDestination::Pin(n) => return n,
            PinDestination::Rail(rail) => rail,
        };
        let candidates = self.pins.get(&rail).map(Vec::as_slice).unwrap_or_default();
        if self.mode == RailAssignment::Shared || candidates.is_empty() {
            return canonical_pin(rail);
        }
        let slot = self.next.entry(rail).or_insert(0);
        let pin = candidates[*slot % candidates.len()];
        *slot += 1;
        pin
    }
}
