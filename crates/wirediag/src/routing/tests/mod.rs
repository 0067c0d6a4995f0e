mod serialization;

use super::grid::OccupancyGrid;
use super::router::WireRouter;
use super::types::{Direction, RouteResult, RouterConfig, RoutingOutput, WireRequest};
use super::wire::{Wire, WireColor};
use crate::geometry::Coordinate;

/// Helper to create an unlabelled coordinate.
fn pt(x: f64, y: f64) -> Coordinate {
    Coordinate::at(x, y)
}

/// Helper to create a RouterConfig with equal step caps and the usual
/// 3x clearance and run limit.
fn config(cap: f64) -> RouterConfig {
    RouterConfig {
        max_width_of_wire: cap,
        max_length_of_wire: cap,
        departure_multiplier: 3.0,
        max_same_axis_run: 3,
        wire_width: 3,
    }
}

/// Helper to create a router over an empty grid.
fn router(width: u32, height: u32, cap: f64) -> WireRouter {
    WireRouter::new(config(cap), OccupancyGrid::new(width, height)).unwrap()
}

/// Route one wire, panicking on failure.
fn route(router: &mut WireRouter, start: Coordinate, dest: Coordinate, dir: Direction) -> Wire {
    router
        .create_wire("test", &start, &dest, dir, WireColor::black())
        .unwrap_or_else(|e| panic!("routing {start} -> {dest} failed: {e}"))
}

/// Helper to create a WireRequest.
fn request(label: &str, start: Coordinate, dest: Coordinate, dir: Direction) -> WireRequest {
    WireRequest {
        label: label.to_string(),
        start,
        destination: dest,
        departure: dir,
        color: WireColor::black(),
    }
}

/// Waypoints of a wire: its start followed by every segment end.
fn waypoints(wire: &Wire) -> Vec<Coordinate> {
    let mut points: Vec<Coordinate> = wire.start().into_iter().cloned().collect();
    points.extend(wire.iter().map(|s| s.end.clone()));
    points
}

/// Assert the structural guarantees every routed wire must meet.
fn assert_wire_invariants(wire: &Wire, start: &Coordinate, dest: &Coordinate, config: &RouterConfig) {
    assert!(!wire.is_empty(), "wire has no segments");
    assert_eq!(wire.start(), Some(start), "wire does not start at its anchor");
    assert_eq!(wire.end(), Some(dest), "wire does not end at its destination");
    assert!(wire.is_contiguous(), "wire has a gap: {:?}", waypoints(wire));

    for (i, seg) in wire.iter().enumerate().skip(1) {
        let dx = (seg.end.x - seg.start.x).abs();
        let dy = (seg.end.y - seg.start.y).abs();
        assert!(
            dx == 0.0 || dy == 0.0,
            "segment {} is not axis-aligned: {} -> {}",
            i + 1,
            seg.start,
            seg.end
        );
        assert!(dx <= config.max_width_of_wire + 1e-9, "segment {} too wide", i + 1);
        assert!(dy <= config.max_length_of_wire + 1e-9, "segment {} too long", i + 1);
    }

    let axes: Vec<_> = wire.iter().map(|s| s.axis()).collect();
    for run in axes.windows(4) {
        assert!(
            !(run[0].is_some() && run.iter().all(|a| *a == run[0])),
            "four consecutive segments on {:?}",
            run[0]
        );
    }
}

/// Assert that a routing output has all successes.
fn assert_all_success(output: &RoutingOutput) {
    for (request, result) in &output.results {
        if let RouteResult::Failure { warning, .. } = result {
            panic!("Request {} failed: {}", request.label, warning);
        }
    }
}
