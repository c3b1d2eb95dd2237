//! Basic end-to-end analysis walk-through.
//!
//! Builds a small synthetic transaction set, runs the pipeline and prints
//! the classified elasticity table.
//!
//! Usage:
//! ```bash
//! RUST_LOG=info cargo run --example basic_analysis
//! ```

use elasticity_analyzer::prelude::*;

fn sku(id: &str, curve: &[(f64, f64)], lines: usize) -> Vec<TransactionRecord> {
    let mut records = Vec::new();
    for &(price, qty) in curve {
        for _ in 0..lines {
            records.push(TransactionRecord::new(id, price, qty, price * qty));
        }
    }
    records
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Elasticity analysis demo");
    println!("{}", "=".repeat(70));

    // Three SKUs with different demand curves plus one with a frozen price.
    let mut records = Vec::new();
    records.extend(sku(
        "COFFEE-250G",
        &[(6.5, 80.0), (7.0, 71.0), (7.9, 58.0), (8.9, 47.0)],
        9,
    ));
    records.extend(sku(
        "OLIVE-OIL-1L",
        &[(9.0, 40.0), (10.5, 37.5), (12.0, 35.5), (14.0, 33.6)],
        8,
    ));
    records.extend(sku(
        "ENERGY-DRINK",
        &[(1.8, 300.0), (2.0, 215.0), (2.4, 124.0), (2.8, 80.0)],
        10,
    ));
    records.extend(sku("TABLE-SALT", &[(0.9, 60.0)], 40));

    println!("\nInput: {} transactions, 4 SKUs", records.len());

    let pipeline = PipelineBuilder::new()
        .lenient_filtering()
        .build()
        .expect("default configuration is valid");

    let output = match pipeline.run(&records) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("analysis failed: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "\nValid records: {} of {} | candidates: {} (tier {})",
        output.validation.valid,
        output.validation.total,
        output.candidates_evaluated,
        output.tier_used + 1
    );

    println!("\nResults ({} accepted):", output.accepted.len());
    println!(
        "{:<14} {:>11} {:>7} {:<17} {:<12} {:>5}",
        "SKU", "elasticity", "R2", "category", "method", "segs"
    );
    println!("{}", "-".repeat(70));
    for estimate in &output.accepted {
        let category = estimate
            .category
            .map(|c| c.to_string())
            .unwrap_or_default();
        println!(
            "{:<14} {:>11.3} {:>7.3} {:<17} {:<12} {:>5}",
            estimate.product_id,
            estimate.elasticity,
            estimate.r_squared,
            category,
            estimate.method.to_string(),
            estimate.segments
        );
    }

    if let Some(summary) = &output.summary {
        println!(
            "\nMean elasticity {:.3} | median {:.3} | mean R2 {:.3}",
            summary.mean_elasticity, summary.median_elasticity, summary.mean_r_squared
        );
    }

    let csv = results_to_csv_string(&output.accepted).expect("csv rendering");
    println!("\nCSV export:\n{csv}");
}
