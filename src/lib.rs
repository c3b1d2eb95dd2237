//! Elasticity Analyzer
//!
//! Price elasticity of demand estimation for retail SKUs from raw
//! transactional sales records, with sensitivity classification for
//! revenue-management decisions.
//!
//! # Overview
//!
//! The crate exposes one pure function to its collaborators: a slice of
//! transaction records in, a classified elasticity table out. Everything
//! around it - loading data from files or databases, dashboards, APIs - is
//! the caller's business.
//!
//! Estimation is descriptive, not causal: promotions, seasonality and
//! competitor pricing are not modeled. The pipeline reports what the data
//! it is given shows.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Elasticity Analyzer                       │
//! ├────────────────────────────────────────────────────────────────┤
//! │  normalize/      - comma-decimal coercion, missing markers     │
//! │  validation/     - positive price/quantity/revenue filter      │
//! │  variability/    - per-product price statistics (CV, range%)   │
//! │  candidates/     - tiered threshold relaxation ladder          │
//! │  segmentation/   - price bucketing strategies (4 variants)     │
//! │  regression/     - log-log OLS (slope = elasticity)            │
//! │  estimator/      - per-product max-R2 method selection         │
//! │  classify/       - plausibility filter + category ladder       │
//! │  export/         - CSV result table                            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use elasticity_analyzer::prelude::*;
//!
//! // Ten transactions per price point, demand falling with price.
//! let mut records = Vec::new();
//! for &(price, qty) in &[(10.0, 20.0), (12.0, 15.0), (15.0, 10.0), (18.0, 7.0)] {
//!     for _ in 0..10 {
//!         records.push(TransactionRecord::new("SKU-A", price, qty, price * qty));
//!     }
//! }
//!
//! let pipeline = PipelineBuilder::new().build().unwrap();
//! let output = pipeline.run(&records).unwrap();
//!
//! assert_eq!(output.accepted.len(), 1);
//! assert!(output.accepted[0].elasticity < 0.0);
//! ```

pub mod builder;
pub mod candidates;
pub mod classify;
pub mod config;
pub mod error;
pub mod estimator;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod prelude;
pub mod record;
pub mod regression;
pub mod segmentation;
pub mod validation;
pub mod variability;

#[cfg(feature = "parallel")]
pub mod batch;

// Re-exports - Pipeline
pub use builder::PipelineBuilder;
pub use config::{AnalysisConfig, ExperimentMetadata};
pub use pipeline::{AnalysisOutput, Pipeline, ResultSummary};

// Re-exports - Data model
pub use estimator::{ElasticityEstimate, MethodOutcome};
pub use record::TransactionRecord;
pub use segmentation::{PriceSegment, SegmentationMethod};
pub use variability::ProductVariabilityProfile;

// Re-exports - Classification
pub use classify::{ElasticityCategory, FilterProfile};

// Re-exports - Error handling
pub use error::{ElasticityError, Result};
