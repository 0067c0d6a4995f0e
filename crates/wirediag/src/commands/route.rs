use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::routing::serialize::wire_to_string;

pub fn run(file: &Path, show_grid: bool) -> Result<()> {
    let (diagram, _) = super::build_diagram(file, None, None)?;

    println!("{}", diagram.title.bold());
    for (routed, entry) in diagram.wires.iter().zip(diagram.legend()) {
        println!("{} {}", entry.label.cyan(), entry.color.name.dimmed());
        println!("  {}", wire_to_string(&routed.wire));
    }

    println!();
    println!("{}", "Parts".bold());
    let parts = std::iter::once(&diagram.controller).chain(diagram.components.iter().map(|p| &p.component));
    for part in parts {
        match part.rating_summary() {
            Some(ratings) => println!("  {} ({}): {}", part.label, part.kind, ratings),
            None => println!("  {} ({})", part.label, part.kind),
        }
    }
    for warning in &diagram.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }

    if show_grid {
        let grid = &diagram.grid;
        let total = grid.width() as f64 * grid.height() as f64;
        println!();
        println!("{}", "Grid".bold());
        println!("  Size:        {}x{}", grid.width(), grid.height());
        println!(
            "  Painted:     {} cells ({:.3}%)",
            grid.painted_count(),
            grid.painted_count() as f64 / total.max(1.0) * 100.0
        );
        println!("  Policy:      {}", grid.policy().name());
        if !grid.collisions().is_empty() {
            println!("  Collisions:  {}", grid.collisions().len());
            for c in grid.collisions() {
                println!("    ({}, {}) {}", c.x, c.y, c.owner.dimmed());
            }
        }
    }
    Ok(())
}
