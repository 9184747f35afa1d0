//! Runs the built-in scenarios with every solver and prints the orders.
//!
//! Usage: `cargo run --example scenarios [scenario] [solver]`

use csr_toposort::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let scenarios = match args.next() {
        Some(name) => {
            vec![Scenario::by_name(&name).ok_or_else(|| format!("no scenario named `{name}`"))?]
        }
        None => Scenario::samples(),
    };
    let solvers = match args.next() {
        Some(name) => vec![name.parse::<SolverKind>()?],
        None => SolverKind::ALL.to_vec(),
    };

    let layout = LayoutConfig {
        radius_step: 1.2,
        ..LayoutConfig::default()
    };
    for scenario in &scenarios {
        println!(
            "== {} ({} nodes, {} edges)",
            scenario.name,
            scenario.node_count,
            scenario.edges.len()
        );
        for &kind in &solvers {
            let res = scenario.run(kind, Some(&layout))?;
            if res.has_cycle {
                println!("  {kind:<14} cycle");
                continue;
            }
            println!("  {kind:<14} {:?}", res.order);
        }
        if let Some(points) = scenario.run(SolverKind::Kahn, Some(&layout))?.layout {
            for p in points {
                println!(
                    "    node {:>2} layer {} at ({:>6.2}, {:>6.2}, {:>6.2})",
                    p.id, p.layer, p.x, p.y, p.z
                );
            }
        }
    }
    Ok(())
}
