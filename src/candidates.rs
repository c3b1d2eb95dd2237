//! Candidate selection with tiered threshold relaxation.
//!
//! Real transaction data has low price variance for most SKUs, and a single
//! rigid threshold routinely yields zero usable products. Selection therefore
//! walks an ordered ladder of threshold tiers, strictest first: if a tier
//! does not yield enough survivors, the next (strictly looser) tier is tried.
//! The ladder is plain configuration data, not control flow, so alternative
//! ladders are trivial to test and to ship.
//!
//! Survivors are ranked by descending CV - the most price-variable products
//! are the most informative for regression - and capped to `max_products`.

use serde::{Deserialize, Serialize};

use crate::variability::ProductVariabilityProfile;

/// One rung of the relaxation ladder.
///
/// A profile survives the tier when it satisfies all four minimums. NaN CV
/// (singleton or degenerate products) fails the `>=` comparison and is
/// therefore never selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionTier {
    /// Minimum valid transactions for the product.
    pub min_transactions: usize,
    /// Minimum coefficient of variation of price.
    pub min_cv: f64,
    /// Minimum count of distinct price points.
    pub min_unique_prices: usize,
    /// Minimum price range as percent of mean price.
    pub min_range_pct: f64,
    /// Survivor count that makes this tier's result sufficient. If fewer
    /// survive, the next tier is tried.
    pub enough: usize,
}

impl SelectionTier {
    /// Does `profile` satisfy this tier's thresholds?
    pub fn accepts(&self, profile: &ProductVariabilityProfile) -> bool {
        profile.transactions >= self.min_transactions
            && profile.cv >= self.min_cv
            && profile.unique_prices >= self.min_unique_prices
            && profile.range_pct >= self.min_range_pct
    }
}

/// The default three-tier ladder.
///
/// Tier 1 is the strict profile; tiers 2 and 3 progressively trade
/// selectivity for coverage.
pub fn default_tiers() -> Vec<SelectionTier> {
    vec![
        SelectionTier {
            min_transactions: 20,
            min_cv: 0.15,
            min_unique_prices: 4,
            min_range_pct: 30.0,
            enough: 5,
        },
        SelectionTier {
            min_transactions: 15,
            min_cv: 0.10,
            min_unique_prices: 3,
            min_range_pct: 20.0,
            enough: 3,
        },
        SelectionTier {
            min_transactions: 10,
            min_cv: 0.05,
            min_unique_prices: 2,
            min_range_pct: 0.0,
            enough: 1,
        },
    ]
}

/// Outcome of candidate selection.
#[derive(Debug, Clone)]
pub struct CandidateSelection {
    /// Surviving profiles, ranked by descending CV, capped to the limit.
    pub candidates: Vec<ProductVariabilityProfile>,
    /// Index (0-based) of the tier that produced the result.
    pub tier_used: usize,
}

/// Run the ladder over `profiles`.
///
/// Returns the first tier whose survivors reach its `enough` target;
/// otherwise the last tier that produced any survivors at all. `None` only
/// when every tier yields zero candidates - the caller treats that as the
/// terminal no-usable-data outcome.
pub fn select_candidates(
    profiles: &[ProductVariabilityProfile],
    tiers: &[SelectionTier],
    max_products: usize,
) -> Option<CandidateSelection> {
    let mut fallback: Option<CandidateSelection> = None;

    for (index, tier) in tiers.iter().enumerate() {
        let mut survivors: Vec<ProductVariabilityProfile> = profiles
            .iter()
            .filter(|p| tier.accepts(p))
            .cloned()
            .collect();

        log::debug!(
            "selection tier {}: {} of {} products pass",
            index + 1,
            survivors.len(),
            profiles.len()
        );

        if survivors.is_empty() {
            continue;
        }

        rank_by_cv(&mut survivors);
        // The tier target counts all survivors; the cap only limits how many
        // go on to estimation.
        let sufficient = survivors.len() >= tier.enough;
        survivors.truncate(max_products);
        let selection = CandidateSelection {
            candidates: survivors,
            tier_used: index,
        };

        if sufficient {
            return Some(selection);
        }
        if index + 1 < tiers.len() {
            log::info!(
                "selection tier {} yielded only {} candidates, relaxing criteria",
                index + 1,
                selection.candidates.len()
            );
        }
        fallback = Some(selection);
    }

    fallback
}

/// Sort by descending CV with an explicit total ordering: NaN sinks to the
/// end so degenerate profiles never rank above real candidates.
fn rank_by_cv(profiles: &mut [ProductVariabilityProfile]) {
    profiles.sort_by(|a, b| match (a.cv.is_nan(), b.cv.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => b.cv.partial_cmp(&a.cv).unwrap_or(std::cmp::Ordering::Equal),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, txns: usize, cv: f64, unique: usize, range_pct: f64) -> ProductVariabilityProfile {
        ProductVariabilityProfile {
            product_id: id.to_string(),
            transactions: txns,
            price_mean: 10.0,
            price_std: cv * 10.0,
            price_min: 8.0,
            price_max: 12.0,
            unique_prices: unique,
            cv,
            range_pct,
            price_density: unique as f64 / txns as f64,
            quantity_total: 100.0,
            revenue_total: 1000.0,
        }
    }

    #[test]
    fn strict_tier_wins_when_it_yields_enough() {
        let profiles: Vec<_> = (0..6)
            .map(|i| profile(&format!("P{i}"), 50, 0.2 + i as f64 * 0.01, 6, 40.0))
            .collect();
        let selection = select_candidates(&profiles, &default_tiers(), 30).unwrap();
        assert_eq!(selection.tier_used, 0);
        assert_eq!(selection.candidates.len(), 6);
        // Ranked by descending CV.
        assert_eq!(selection.candidates[0].product_id, "P5");
    }

    #[test]
    fn ladder_relaxes_when_strict_tier_is_thin() {
        // Fails tier 1 (cv 0.12 < 0.15) but passes tier 2.
        let profiles = vec![
            profile("A", 18, 0.12, 3, 25.0),
            profile("B", 18, 0.11, 3, 22.0),
            profile("C", 18, 0.13, 3, 21.0),
        ];
        let selection = select_candidates(&profiles, &default_tiers(), 30).unwrap();
        assert_eq!(selection.tier_used, 1);
        assert_eq!(selection.candidates.len(), 3);
    }

    #[test]
    fn partial_strict_yield_falls_through_but_is_kept_as_fallback() {
        // One product passes tier 1 (enough = 5 not met) and also tier 2
        // (enough = 3 not met) and tier 3 (enough = 1 met).
        let profiles = vec![profile("A", 30, 0.3, 8, 50.0)];
        let selection = select_candidates(&profiles, &default_tiers(), 30).unwrap();
        assert_eq!(selection.candidates.len(), 1);
        assert_eq!(selection.tier_used, 2);
    }

    #[test]
    fn nan_cv_is_never_selected() {
        let profiles = vec![profile("A", 50, f64::NAN, 6, 40.0)];
        assert!(select_candidates(&profiles, &default_tiers(), 30).is_none());
    }

    #[test]
    fn zero_candidates_at_every_tier_is_none() {
        let profiles = vec![profile("A", 2, 0.01, 1, 0.0)];
        assert!(select_candidates(&profiles, &default_tiers(), 30).is_none());
    }

    #[test]
    fn cap_limits_candidate_count() {
        let profiles: Vec<_> = (0..10)
            .map(|i| profile(&format!("P{i}"), 50, 0.2 + i as f64 * 0.01, 6, 40.0))
            .collect();
        let selection = select_candidates(&profiles, &default_tiers(), 4).unwrap();
        assert_eq!(selection.candidates.len(), 4);
        // The cap keeps the highest-CV products.
        assert_eq!(selection.candidates[0].product_id, "P9");
        assert_eq!(selection.candidates[3].product_id, "P6");
    }
}
