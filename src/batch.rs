//! Parallel candidate estimation.
//!
//! Each candidate's estimation reads only that product's own transaction
//! subset and the shared read-only record table, so candidates fan out
//! across Rayon's work-stealing thread pool with no locking. `par_iter`
//! preserves input order on collection, which keeps the parallel path
//! byte-for-byte identical to the sequential one.
//!
//! Compiled only with the `parallel` feature (on by default).

use ahash::AHashMap;
use rayon::prelude::*;

use crate::estimator::{estimate_product, ElasticityEstimate};
use crate::record::TransactionRecord;
use crate::variability::ProductVariabilityProfile;

/// Estimate all candidates in parallel, in candidate order.
///
/// Candidates whose product id is absent from `groups` or whose estimation
/// yields no result are skipped, exactly as in the sequential path.
pub fn estimate_candidates_parallel(
    candidates: &[ProductVariabilityProfile],
    groups: &AHashMap<&str, Vec<&TransactionRecord>>,
    min_bucket_transactions: usize,
) -> Vec<ElasticityEstimate> {
    candidates
        .par_iter()
        .filter_map(|candidate| {
            let rows = groups.get(candidate.product_id.as_str())?;
            estimate_product(&candidate.product_id, rows, min_bucket_transactions)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::group_by_product;
    use crate::variability::score_products;

    fn sku(id: &str, pairs: &[(f64, f64)], lines: usize) -> Vec<TransactionRecord> {
        let mut records = Vec::new();
        for &(price, qty) in pairs {
            for _ in 0..lines {
                records.push(TransactionRecord::new(id, price, qty, price * qty));
            }
        }
        records
    }

    #[test]
    fn parallel_matches_sequential_order_and_content() {
        let mut records = sku("A", &[(10.0, 20.0), (12.0, 15.0), (15.0, 10.0), (18.0, 7.0)], 8);
        records.extend(sku("B", &[(5.0, 40.0), (6.0, 30.0), (8.0, 18.0), (9.0, 15.0)], 8));

        let profiles = score_products(&records);
        let groups = group_by_product(&records);

        let parallel = estimate_candidates_parallel(&profiles, &groups, 2);
        let sequential: Vec<ElasticityEstimate> = profiles
            .iter()
            .filter_map(|p| {
                estimate_product(&p.product_id, groups.get(p.product_id.as_str())?, 2)
            })
            .collect();

        assert_eq!(parallel.len(), sequential.len());
        for (a, b) in parallel.iter().zip(&sequential) {
            assert_eq!(a.product_id, b.product_id);
            assert_eq!(a.elasticity, b.elasticity);
            assert_eq!(a.method, b.method);
        }
    }

    #[test]
    fn missing_group_is_skipped() {
        let records = sku("A", &[(10.0, 20.0), (12.0, 15.0), (15.0, 10.0), (18.0, 7.0)], 8);
        let mut profiles = score_products(&records);
        assert_eq!(profiles.len(), 1);
        profiles[0].product_id = "GHOST".to_string();
        let groups = group_by_product(&records);
        assert!(estimate_candidates_parallel(&profiles, &groups, 2).is_empty());
    }
}
