//! Runs a small gene set enrichment and prints the `term` and `p_value` table
//!
//! Usage
//!
//! ```text
//! cargo run --example enrichment [two-sided|greater|less]
//! ```
use std::process;

use simple_logger::SimpleLogger;

use setenrich::{
    significant, Alternative, EnrichmentResult, Grouping, ReferenceSet, SetEnrichmentComputer,
    DEFAULT_SIGNIFICANCE_THRESHOLD,
};

/// Per gene p-values of an upstream differential expression test
const GENE_SCORES: [(&str, f64); 10] = [
    ("g1", 0.001),
    ("g2", 0.02),
    ("g3", 0.31),
    ("g4", 0.47),
    ("g5", 0.88),
    ("g6", 0.004),
    ("g7", 0.049),
    ("g8", 0.51),
    ("g9", 0.73),
    ("g10", 0.12),
];

/// Gene to term annotations
const TERM_GENES: [(&str, &str); 5] = [
    ("termA", "g1"),
    ("termA", "g2"),
    ("termA", "g3"),
    ("termB", "g4"),
    ("termB", "g5"),
];

fn run(alternative: Alternative) -> EnrichmentResult<()> {
    let reference: ReferenceSet = GENE_SCORES.iter().map(|(gene, _)| *gene).collect();
    let grouping: Grouping = TERM_GENES.into_iter().collect();
    let query = significant(GENE_SCORES, DEFAULT_SIGNIFICANCE_THRESHOLD);

    let computer = SetEnrichmentComputer::new(grouping, reference, alternative)?;
    let mut result = computer.get_terms(&query)?;

    // the results are not sorted by default
    result.sort_by(|a, b| a.pvalue().total_cmp(&b.pvalue()));

    println!("term\tp_value");
    for enrichment in &result {
        println!("{}\t{}", enrichment.term(), enrichment.pvalue());
    }
    Ok(())
}

fn main() {
    SimpleLogger::new().init().unwrap();

    let alternative = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Alternative>(),
        None => Ok(Alternative::default()),
    };

    if let Err(err) = alternative.and_then(run) {
        eprintln!("{err}");
        process::exit(1)
    }
}
