//! Record validation.
//!
//! Narrows the raw record set to rows usable for elasticity estimation:
//! strictly positive price, quantity and revenue, none of them missing. The
//! filter is a projection - surviving records keep their order and all their
//! fields unchanged.
//!
//! The accompanying [`ValidationSummary`] reports how much data survived.
//! It is a diagnostic, not authoritative state: downstream stages recompute
//! everything they need from the surviving records themselves.

use crate::record::TransactionRecord;

/// Counts from one validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationSummary {
    /// Records presented to the validator.
    pub total: usize,
    /// Records that passed all checks.
    pub valid: usize,
}

impl ValidationSummary {
    /// Records removed by validation.
    pub fn rejected(&self) -> usize {
        self.total - self.valid
    }

    /// Fraction of records that survived, in [0, 1]. Zero input yields 0.
    pub fn retention(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}

/// True when the record has positive, present price, quantity and revenue.
pub fn is_valid(record: &TransactionRecord) -> bool {
    matches!(record.price, Some(p) if p > 0.0)
        && matches!(record.quantity, Some(q) if q > 0.0)
        && matches!(record.revenue, Some(r) if r > 0.0)
}

/// Filter records down to the valid subsequence.
///
/// Output order matches input order; records are cloned unchanged. The
/// summary is logged at `info` level for observability.
pub fn filter_valid(records: &[TransactionRecord]) -> (Vec<TransactionRecord>, ValidationSummary) {
    let valid: Vec<TransactionRecord> = records.iter().filter(|r| is_valid(r)).cloned().collect();
    let summary = ValidationSummary {
        total: records.len(),
        valid: valid.len(),
    };
    log::info!(
        "validation: {} of {} records valid ({:.1}%)",
        summary.valid,
        summary.total,
        summary.retention() * 100.0
    );
    (valid, summary)
}
