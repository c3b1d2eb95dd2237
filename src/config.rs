//! Pipeline configuration management.
//!
//! Unified configuration for the whole elasticity analysis run, with
//! serialization support so an analysis is reproducible from a checked-in
//! file.
//!
//! # Features
//!
//! - **Unified Configuration**: one struct covering selection, segmentation
//!   and result filtering
//! - **Serialization**: save/load as TOML or JSON
//! - **Validation**: configurations are checked before the pipeline runs
//!
//! # Example
//!
//! ```ignore
//! use elasticity_analyzer::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! config.save_toml("analysis.toml")?;
//!
//! let loaded = AnalysisConfig::load_toml("analysis.toml")?;
//! let pipeline = Pipeline::from_config(loaded)?;
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::candidates::{default_tiers, SelectionTier};
use crate::classify::FilterProfile;

/// Unified analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Candidate selection settings.
    pub selection: SelectionConfig,

    /// Price segmentation settings.
    pub segmentation: SegmentationConfig,

    /// Result acceptance thresholds.
    pub filter: FilterProfile,

    /// Experiment metadata (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExperimentMetadata>,
}

/// Candidate selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Cap on candidates handed to estimation, highest CV first.
    pub max_products: usize,

    /// Relaxation ladder, strictest tier first.
    pub tiers: Vec<SelectionTier>,
}

/// Price segmentation configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Buckets with fewer underlying transactions are dropped before
    /// regression.
    pub min_bucket_transactions: usize,
}

/// Experiment metadata for tracking and reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentMetadata {
    /// Experiment name.
    pub name: String,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Version or git commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Custom tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ExperimentMetadata {
    /// Metadata stamped with the current UTC time.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            version: None,
            tags: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::default(),
            segmentation: SegmentationConfig::default(),
            filter: FilterProfile::default(),
            metadata: None,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_products: 30,
            tiers: default_tiers(),
        }
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_bucket_transactions: 2,
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set experiment metadata.
    pub fn with_metadata(mut self, metadata: ExperimentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the result filter profile.
    pub fn with_filter(mut self, filter: FilterProfile) -> Self {
        self.filter = filter;
        self
    }

    /// Set the selection tier ladder.
    pub fn with_tiers(mut self, tiers: Vec<SelectionTier>) -> Self {
        self.selection.tiers = tiers;
        self
    }

    /// Validate the configuration.
    ///
    /// Returns Ok(()) if valid, Err(msg) otherwise.
    pub fn validate(&self) -> Result<(), String> {
        self.selection.validate()?;
        self.segmentation.validate()?;
        self.filter.validate()?;
        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

impl SelectionConfig {
    /// Validate selection configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.tiers.is_empty() {
            return Err("selection requires at least one tier".to_string());
        }
        if self.max_products == 0 {
            return Err("max_products must be > 0".to_string());
        }
        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.enough == 0 {
                return Err(format!("tier {}: enough must be > 0", i + 1));
            }
            if tier.min_cv < 0.0 || tier.min_range_pct < 0.0 {
                return Err(format!("tier {}: thresholds must be non-negative", i + 1));
            }
        }
        // Each tier must be no stricter than its predecessor, otherwise the
        // relaxation ladder cannot widen the candidate set.
        for (i, pair) in self.tiers.windows(2).enumerate() {
            let (outer, inner) = (&pair[0], &pair[1]);
            if inner.min_transactions > outer.min_transactions
                || inner.min_cv > outer.min_cv
                || inner.min_unique_prices > outer.min_unique_prices
                || inner.min_range_pct > outer.min_range_pct
            {
                return Err(format!(
                    "tier {} is stricter than tier {} - tiers must relax monotonically",
                    i + 2,
                    i + 1
                ));
            }
        }
        Ok(())
    }
}

impl SegmentationConfig {
    /// Validate segmentation configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_bucket_transactions == 0 {
            return Err("min_bucket_transactions must be > 0".to_string());
        }
        Ok(())
    }
}
