//! Example: Relax a random point set
//!
//! Builds the diagram of random points, then relaxes it with Lloyd's
//! algorithm and compares region statistics before and after.

use fortune_voronoi::*;

fn region_stats(diagram: &VoronoiDiagram) -> (f64, f64, f64) {
    let areas: Vec<f64> = diagram.cells().iter().map(|c| c.area()).collect();
    let mean = areas.iter().sum::<f64>() / areas.len() as f64;
    let min = areas.iter().copied().fold(f64::INFINITY, f64::min);
    let max = areas.iter().copied().fold(0.0, f64::max);
    (mean, min, max)
}

fn main() {
    println!("Lloyd Relaxation Example");
    println!("========================\n");

    let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
    let points = random_points(500, &bounds, 42);

    let diagram = VoronoiDiagram::new(&points, bounds).expect("Failed to build diagram");
    println!("Initial diagram:");
    println!("  Sites: {}", diagram.site_count());
    println!("  Edges: {}", diagram.edges().len());
    println!("  Vertices: {}", diagram.vertices().len());
    println!("  Hull sites: {}", diagram.hull_points_in_order().len());
    let (mean, min, max) = region_stats(&diagram);
    println!("  Region area: mean={:.2}, min={:.2}, max={:.2}", mean, min, max);
    println!();

    let relaxed = diagram.relaxed(LloydOptions {
        max_iterations: 20,
        convergence_threshold: 0.05,
    });
    let stats = relaxed.lloyd_stats();

    println!("Relaxation:");
    println!("  Iterations run: {}", stats.iterations_run);
    println!("  Converged: {}", stats.converged);
    for (i, d) in stats.max_displacements.iter().enumerate() {
        println!("  Iteration {}: max displacement {:.4}", i + 1, d);
    }
    println!();

    let (mean, min, max) = region_stats(&relaxed);
    println!("Relaxed diagram:");
    println!("  Region area: mean={:.2}, min={:.2}, max={:.2}", mean, min, max);

    #[cfg(feature = "spatial-index")]
    {
        let query = DVec2::new(200.0, 150.0);
        if let Some(id) = relaxed.find_site_at(query) {
            let site = &relaxed.sites()[id];
            println!(
                "  Site owning ({}, {}): #{} at ({:.2}, {:.2})",
                query.x,
                query.y,
                site.input_index(),
                site.coord().x,
                site.coord().y
            );
        }
    }

    println!("\nDone!");
}
