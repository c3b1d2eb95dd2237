//! Fluent builder for pipeline configuration.
//!
//! # Quick Start
//!
//! ```
//! use elasticity_analyzer::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new()
//!     .strict_filtering()
//!     .max_products(10)
//!     .build()
//!     .unwrap();
//! ```
//!
//! # Common Configurations
//!
//! ## Noisy real-world data
//!
//! ```
//! use elasticity_analyzer::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new()
//!     .exploratory_filtering()
//!     .min_bucket_transactions(1)
//!     .build()
//!     .unwrap();
//! ```

use crate::candidates::SelectionTier;
use crate::classify::FilterProfile;
use crate::config::{AnalysisConfig, ExperimentMetadata};
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Fluent builder for creating analysis pipelines.
///
/// Starts from [`AnalysisConfig::default`] and overrides piecewise; the
/// configuration is validated when [`build`](Self::build) constructs the
/// pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    config: AnalysisConfig,
}

impl PipelineBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection tier ladder (strictest first).
    pub fn selection_tiers(mut self, tiers: Vec<SelectionTier>) -> Self {
        self.config.selection.tiers = tiers;
        self
    }

    /// Cap the number of candidates handed to estimation.
    pub fn max_products(mut self, max: usize) -> Self {
        self.config.selection.max_products = max;
        self
    }

    /// Minimum transactions a price bucket needs to survive aggregation.
    pub fn min_bucket_transactions(mut self, min: usize) -> Self {
        self.config.segmentation.min_bucket_transactions = min;
        self
    }

    /// Use an explicit filter profile.
    pub fn filter_profile(mut self, profile: FilterProfile) -> Self {
        self.config.filter = profile;
        self
    }

    /// R2 >= 0.4, elasticity > -5.
    pub fn strict_filtering(self) -> Self {
        self.filter_profile(FilterProfile::strict())
    }

    /// R2 >= 0.1, elasticity > -10.
    pub fn lenient_filtering(self) -> Self {
        self.filter_profile(FilterProfile::lenient())
    }

    /// R2 >= 0.05, elasticity > -20.
    pub fn exploratory_filtering(self) -> Self {
        self.filter_profile(FilterProfile::exploratory())
    }

    /// Attach experiment metadata.
    pub fn metadata(mut self, metadata: ExperimentMetadata) -> Self {
        self.config.metadata = Some(metadata);
        self
    }

    /// The configuration assembled so far.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate and build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        Pipeline::from_config(self.config)
    }
}
