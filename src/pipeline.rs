//! Unified elasticity analysis pipeline.
//!
//! Connects all stages into the single pure function the crate exposes to
//! its collaborators: transaction records in, classified elasticity table
//! out.
//!
//! ```text
//! raw records -> validate -> variability profiles -> tiered selection
//!                                      |                    |
//!                                      v                    v
//!                                diagnostics        per-candidate:
//!                                                   segment -> regress
//!                                                        |
//!                                                        v
//!                                            filter & classify -> output
//! ```
//!
//! Each candidate's estimation touches only that product's own transaction
//! subset, so the per-candidate loop parallelizes without locking (enabled
//! by the `parallel` feature); results are identical to the sequential
//! path.
//!
//! # Error scoping
//!
//! Per-product failures never abort the run. The only terminal outcome is
//! zero candidates at every relaxation tier
//! ([`ElasticityError::NoUsableData`]).
//!
//! # Example
//!
//! ```ignore
//! use elasticity_analyzer::prelude::*;
//!
//! let pipeline = Pipeline::from_config(AnalysisConfig::default())?;
//! let output = pipeline.run(&records)?;
//! for estimate in &output.accepted {
//!     println!("{}: {:.2}", estimate.product_id, estimate.elasticity);
//! }
//! ```

use ahash::AHashMap;

use crate::candidates::select_candidates;
use crate::classify::{apply_filter, ElasticityCategory};
use crate::config::AnalysisConfig;
use crate::error::{ElasticityError, Result};
use crate::estimator::ElasticityEstimate;
use crate::record::TransactionRecord;
use crate::validation::{filter_valid, ValidationSummary};
use crate::variability::{score_products, ProductVariabilityProfile};

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// Accepted estimates, categorized, most elastic first.
    pub accepted: Vec<ElasticityEstimate>,

    /// Positive-elasticity estimates, reported separately.
    pub anomalous: Vec<ElasticityEstimate>,

    /// Negative-elasticity estimates that failed the fit/magnitude gates.
    pub rejected: Vec<ElasticityEstimate>,

    /// Variability profile of every product seen in the valid records.
    pub profiles: Vec<ProductVariabilityProfile>,

    /// Record counts from validation.
    pub validation: ValidationSummary,

    /// Candidates handed to estimation.
    pub candidates_evaluated: usize,

    /// 0-based index of the selection tier that produced the candidates.
    pub tier_used: usize,

    /// Aggregate statistics over the accepted set; `None` when empty.
    pub summary: Option<ResultSummary>,
}

/// Aggregate statistics over the accepted estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub products: usize,
    pub mean_elasticity: f64,
    pub median_elasticity: f64,
    pub mean_r_squared: f64,
    /// Count per category, in ladder order for the categories present.
    pub category_counts: Vec<(ElasticityCategory, usize)>,
}

impl ResultSummary {
    /// Compute over estimates already sorted ascending by elasticity.
    fn from_accepted(accepted: &[ElasticityEstimate]) -> Option<Self> {
        if accepted.is_empty() {
            return None;
        }
        let n = accepted.len();
        let mean_elasticity = accepted.iter().map(|e| e.elasticity).sum::<f64>() / n as f64;
        let median_elasticity = if n % 2 == 1 {
            accepted[n / 2].elasticity
        } else {
            (accepted[n / 2 - 1].elasticity + accepted[n / 2].elasticity) / 2.0
        };
        let mean_r_squared = accepted.iter().map(|e| e.r_squared).sum::<f64>() / n as f64;

        let ladder = [
            ElasticityCategory::HighlyElastic,
            ElasticityCategory::Elastic,
            ElasticityCategory::SlightlyElastic,
            ElasticityCategory::Inelastic,
        ];
        let category_counts = ladder
            .into_iter()
            .filter_map(|category| {
                let count = accepted.iter().filter(|e| e.category == Some(category)).count();
                (count > 0).then_some((category, count))
            })
            .collect();

        Some(Self {
            products: n,
            mean_elasticity,
            median_elasticity,
            mean_r_squared,
            category_counts,
        })
    }
}

/// Main pipeline - records in, elasticity table out.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration.
    pub fn from_config(config: AnalysisConfig) -> Result<Self> {
        config.validate().map_err(ElasticityError::config)?;
        Ok(Self { config })
    }

    /// Pipeline configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis over `records`.
    ///
    /// Deterministic for a given input and configuration; the records are
    /// consumed read-only.
    pub fn run(&self, records: &[TransactionRecord]) -> Result<AnalysisOutput> {
        let (valid, validation) = filter_valid(records);

        let profiles = score_products(&valid);
        log::info!("variability: {} distinct products profiled", profiles.len());

        let selection = select_candidates(
            &profiles,
            &self.config.selection.tiers,
            self.config.selection.max_products,
        )
        .ok_or(ElasticityError::NoUsableData {
            total_records: validation.total,
            valid_records: validation.valid,
        })?;
        log::info!(
            "selection: {} candidates (tier {})",
            selection.candidates.len(),
            selection.tier_used + 1
        );

        let groups = group_by_product(&valid);
        let estimates = self.estimate_all(&selection.candidates, &groups);
        log::info!(
            "estimation: {} of {} candidates produced a fit",
            estimates.len(),
            selection.candidates.len()
        );

        let filtered = apply_filter(estimates, &self.config.filter);
        log::info!(
            "filtering: {} accepted, {} rejected, {} anomalous",
            filtered.accepted.len(),
            filtered.rejected.len(),
            filtered.anomalous.len()
        );

        let summary = ResultSummary::from_accepted(&filtered.accepted);
        Ok(AnalysisOutput {
            accepted: filtered.accepted,
            anomalous: filtered.anomalous,
            rejected: filtered.rejected,
            profiles,
            validation,
            candidates_evaluated: selection.candidates.len(),
            tier_used: selection.tier_used,
            summary,
        })
    }

    #[cfg(feature = "parallel")]
    fn estimate_all(
        &self,
        candidates: &[ProductVariabilityProfile],
        groups: &AHashMap<&str, Vec<&TransactionRecord>>,
    ) -> Vec<ElasticityEstimate> {
        crate::batch::estimate_candidates_parallel(
            candidates,
            groups,
            self.config.segmentation.min_bucket_transactions,
        )
    }

    #[cfg(not(feature = "parallel"))]
    fn estimate_all(
        &self,
        candidates: &[ProductVariabilityProfile],
        groups: &AHashMap<&str, Vec<&TransactionRecord>>,
    ) -> Vec<ElasticityEstimate> {
        candidates
            .iter()
            .filter_map(|candidate| {
                let rows = groups.get(candidate.product_id.as_str())?;
                crate::estimator::estimate_product(
                    &candidate.product_id,
                    rows,
                    self.config.segmentation.min_bucket_transactions,
                )
            })
            .collect()
    }
}

/// Group valid records by product id, preserving record order per group.
pub(crate) fn group_by_product(
    records: &[TransactionRecord],
) -> AHashMap<&str, Vec<&TransactionRecord>> {
    let mut groups: AHashMap<&str, Vec<&TransactionRecord>> = AHashMap::new();
    for record in records {
        groups.entry(&record.product_id).or_default().push(record);
    }
    groups
}
