pub mod grid;
pub mod router;
pub mod serialize;
pub mod types;
pub mod wire;

#[cfg(test)]
mod tests;

use log::{info, warn};

use crate::error::Result;
use grid::OccupancyGrid;
use router::WireRouter;
use types::{RouteResult, RouterConfig, RoutingOutput, WireRequest};

/// Route a batch of wire requests into one grid.
///
/// Requests are processed sequentially in order, so later wires paint over
/// (or, under a rejecting grid, fail against) the cells earlier ones used.
/// A request that fails becomes a [`RouteResult::Failure`] carrying the
/// error text; the caller decides whether to skip it or abort.
///
/// Only an invalid `config` fails the whole batch.
pub fn route_pins(
    requests: &[WireRequest],
    config: &RouterConfig,
    grid: OccupancyGrid,
) -> Result<RoutingOutput> {
    let mut router = WireRouter::new(config.clone(), grid)?;
    let mut results = Vec::with_capacity(requests.len());

    for request in requests {
        let result = match router.create_wire(
            &request.label,
            &request.start,
            &request.destination,
            request.departure,
            request.color.clone(),
        ) {
            Ok(wire) => RouteResult::Success(wire),
            Err(err) => {
                warn!("Could not route '{}': {}", request.label, err);
                RouteResult::Failure {
                    warning: format!("Could not route '{}': {}", request.label, err),
                    error: err,
                }
            }
        };
        results.push((request.clone(), result));
    }

    let grid = router.into_grid();
    info!(
        "Routed {}/{} wires, {} cells painted",
        results.iter().filter(|(_, r)| r.wire().is_some()).count(),
        results.len(),
        grid.painted_count()
    );
    Ok(RoutingOutput { results, grid })
}
