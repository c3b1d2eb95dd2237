//! Prelude module for convenient imports.
//!
//! ```
//! use elasticity_analyzer::prelude::*;
//!
//! let pipeline = PipelineBuilder::new().build().unwrap();
//! ```

// ============================================================================
// Core Pipeline
// ============================================================================

pub use crate::builder::PipelineBuilder;
pub use crate::config::{
    AnalysisConfig, ExperimentMetadata, SegmentationConfig, SelectionConfig,
};
pub use crate::pipeline::{AnalysisOutput, Pipeline, ResultSummary};

// ============================================================================
// Records & Validation
// ============================================================================

pub use crate::normalize::{normalize_field, normalize_numeric};
pub use crate::record::TransactionRecord;
pub use crate::validation::{filter_valid, is_valid, ValidationSummary};

// ============================================================================
// Variability & Candidate Selection
// ============================================================================

pub use crate::candidates::{
    default_tiers, select_candidates, CandidateSelection, SelectionTier,
};
pub use crate::variability::{score_products, ProductVariabilityProfile};

// ============================================================================
// Segmentation & Estimation
// ============================================================================

pub use crate::estimator::{estimate_product, ElasticityEstimate, MethodOutcome};
pub use crate::regression::{fit_log_log, LogLogFit};
pub use crate::segmentation::{PriceSegment, SegmentationMethod, SegmentationStrategy};

// ============================================================================
// Classification & Export
// ============================================================================

pub use crate::classify::{
    apply_filter, ElasticityCategory, FilterProfile, FilteredResults,
};
pub use crate::export::{results_to_csv_string, save_results, write_results};

// ============================================================================
// Error handling
// ============================================================================

pub use crate::error::{ElasticityError, Result};

// ============================================================================
// Parallel batch estimation
// ============================================================================

#[cfg(feature = "parallel")]
pub use crate::batch::estimate_candidates_parallel;
