//! Result filtering and elasticity classification.
//!
//! Raw per-product estimates are screened against a strictness profile
//! before they reach the output table: the fit must explain enough variance
//! (R2 floor) and the elasticity must be negative and of plausible
//! magnitude. Positive elasticity is economically anomalous for these data -
//! it is diverted to a separate list, never silently accepted. Survivors are
//! labeled on a fixed category ladder and ranked most-elastic first.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::estimator::ElasticityEstimate;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Demand-sensitivity category for a (negative) elasticity value.
///
/// Boundary values belong to the stricter bucket: exactly -0.5 is
/// `SlightlyElastic`, exactly -1.0 is `Elastic`, exactly -2.0 is
/// `HighlyElastic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElasticityCategory {
    /// e > -0.5: demand barely responds to price.
    Inelastic,
    /// -1.0 < e <= -0.5.
    SlightlyElastic,
    /// -2.0 < e <= -1.0.
    Elastic,
    /// e <= -2.0: demand is highly price-sensitive.
    HighlyElastic,
}

impl ElasticityCategory {
    /// Classify an elasticity value on the fixed ladder.
    pub fn from_elasticity(e: f64) -> Self {
        if e > -0.5 {
            ElasticityCategory::Inelastic
        } else if e > -1.0 {
            ElasticityCategory::SlightlyElastic
        } else if e > -2.0 {
            ElasticityCategory::Elastic
        } else {
            ElasticityCategory::HighlyElastic
        }
    }
}

impl fmt::Display for ElasticityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElasticityCategory::Inelastic => write!(f, "Inelastic"),
            ElasticityCategory::SlightlyElastic => write!(f, "Slightly Elastic"),
            ElasticityCategory::Elastic => write!(f, "Elastic"),
            ElasticityCategory::HighlyElastic => write!(f, "Highly Elastic"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter profiles
// ---------------------------------------------------------------------------

/// Acceptance thresholds for estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterProfile {
    /// Minimum coefficient of determination.
    pub min_r_squared: f64,
    /// Most negative elasticity still considered plausible. Estimates at or
    /// below this bound are treated as artifacts of a bad fit.
    pub min_elasticity: f64,
}

impl FilterProfile {
    /// R2 >= 0.4, elasticity > -5.
    pub fn strict() -> Self {
        Self {
            min_r_squared: 0.4,
            min_elasticity: -5.0,
        }
    }

    /// R2 >= 0.3, elasticity > -5. The default.
    pub fn standard() -> Self {
        Self {
            min_r_squared: 0.3,
            min_elasticity: -5.0,
        }
    }

    /// R2 >= 0.1, elasticity > -10.
    pub fn lenient() -> Self {
        Self {
            min_r_squared: 0.1,
            min_elasticity: -10.0,
        }
    }

    /// R2 >= 0.05, elasticity > -20. For noisy real-world data.
    pub fn exploratory() -> Self {
        Self {
            min_r_squared: 0.05,
            min_elasticity: -20.0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_r_squared) {
            return Err("min_r_squared must be within [0, 1]".to_string());
        }
        if self.min_elasticity >= 0.0 {
            return Err("min_elasticity must be negative".to_string());
        }
        Ok(())
    }
}

impl Default for FilterProfile {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Outcome of the result filter.
#[derive(Debug, Clone, Default)]
pub struct FilteredResults {
    /// Estimates that passed all gates, categorized, sorted ascending by
    /// elasticity (most elastic first).
    pub accepted: Vec<ElasticityEstimate>,
    /// Estimates with non-negative elasticity - anomalous, reported apart.
    pub anomalous: Vec<ElasticityEstimate>,
    /// Negative-elasticity estimates rejected for poor fit or implausible
    /// magnitude. Kept for diagnostics.
    pub rejected: Vec<ElasticityEstimate>,
}

/// Screen `estimates` against `profile` and classify the survivors.
pub fn apply_filter(estimates: Vec<ElasticityEstimate>, profile: &FilterProfile) -> FilteredResults {
    let mut results = FilteredResults::default();

    for mut estimate in estimates {
        if estimate.elasticity >= 0.0 {
            log::warn!(
                "product {}: positive elasticity {:.3} (anomalous)",
                estimate.product_id,
                estimate.elasticity
            );
            results.anomalous.push(estimate);
        } else if estimate.r_squared < profile.min_r_squared
            || estimate.elasticity <= profile.min_elasticity
        {
            results.rejected.push(estimate);
        } else {
            estimate.category = Some(ElasticityCategory::from_elasticity(estimate.elasticity));
            results.accepted.push(estimate);
        }
    }

    results.accepted.sort_by(|a, b| {
        a.elasticity
            .partial_cmp(&b.elasticity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
