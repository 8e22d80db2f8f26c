//! Single-linkage clustering on a small hand-made 2D dataset.

use outbreak::{Clustering, Point, SingleLinkage};

fn main() {
    // Three well-separated groups, plus one undefined point.
    let features: Vec<Option<Point>> = vec![
        // Group A (near origin)
        Some(Point::new(0.0, 0.0)),
        Some(Point::new(1.0, 2.0)),
        Some(Point::new(2.0, 1.0)),
        // Undefined: skipped, takes no leaf id
        None,
        // Group B (near (20, 20))
        Some(Point::new(20.0, 20.0)),
        Some(Point::new(21.0, 19.0)),
        Some(Point::new(19.0, 21.0)),
        // Group C (near (40, 0))
        Some(Point::new(40.0, 0.0)),
        Some(Point::new(41.0, 1.0)),
    ];

    let model = SingleLinkage::new().with_n_clusters(3);
    let tree = match model.fit(&features) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("clustering failed: {err}");
            std::process::exit(1);
        }
    };

    println!("=== Linkage records ({} leaves) ===", tree.n_leaves());
    for (step, r) in tree.records().iter().enumerate() {
        println!(
            "  {:2}: {:2} + {:2} at {:7.3} -> id {:2} (size {})",
            step,
            r.cluster_a,
            r.cluster_b,
            r.distance,
            tree.n_leaves() + step,
            r.size
        );
    }

    let points: Vec<Point> = features.iter().flatten().copied().collect();
    match model.fit_predict(&points) {
        Ok(labels) => {
            println!("\n=== Flat cut (k={}) ===", model.n_clusters());
            for (p, label) in points.iter().zip(&labels) {
                println!("  ({:5.1}, {:5.1}) => cluster {}", p.x, p.y, label);
            }
        }
        Err(err) => eprintln!("cut failed: {err}"),
    }
}
