//! Cluster regions of a confirmed-cases CSV by outbreak-curve shape.
//!
//! ```bash
//! cargo run --example covid -- time_series_covid19_confirmed_global.csv 5
//! ```

use std::process::ExitCode;

use outbreak::{CaseTable, FeatureExtractor, SingleLinkage};

fn run(path: &str, k: Option<usize>) -> outbreak::Result<()> {
    let table = CaseTable::from_path(path)?;
    let features = FeatureExtractor::new().extract(&table)?;
    let tree = SingleLinkage::new().fit(&features)?;

    let label = |id: usize| -> String {
        match tree.leaf_sources().get(id) {
            Some(&source) => table.regions()[source].label(),
            None => format!("#{id}"),
        }
    };

    println!("latest date: {}", table.latest_date());
    println!("{} regions clustered, {} merges", tree.n_leaves(), tree.len());
    for r in tree.records() {
        println!(
            "{}\t{}\t{:.4}\t{}",
            label(r.cluster_a),
            label(r.cluster_b),
            r.distance,
            r.size
        );
    }

    if let Some(k) = k {
        let labels = tree.cut(k)?;
        println!("\nflat cut, k = {k}:");
        for (leaf, cluster) in labels.iter().enumerate() {
            println!("{cluster}\t{}", label(leaf));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: covid <confirmed.csv> [k]");
        return ExitCode::FAILURE;
    };
    let k = match args.next().map(|s| s.parse::<usize>()) {
        None => None,
        Some(Ok(k)) => Some(k),
        Some(Err(err)) => {
            eprintln!("invalid cluster count: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&path, k) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
