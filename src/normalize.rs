//! Numeric field normalization.
//!
//! Source systems in this domain export numbers with a comma decimal
//! separator (`"12,50"`), sometimes with surrounding whitespace, sometimes
//! empty. Normalization coerces any textual representation into an `f64` and
//! maps everything unparseable to `None` - an explicit missing marker, not
//! zero and not an error - so the validator can exclude those rows
//! deterministically.
//!
//! # Properties
//!
//! - Idempotent: normalizing an already-normalized value is a no-op
//!   (`"12.50"` -> `12.50`).
//! - Total: no input panics or errors; bad input yields `None`.
//!
//! # Example
//!
//! ```
//! use elasticity_analyzer::normalize::normalize_numeric;
//!
//! assert_eq!(normalize_numeric("12,50"), Some(12.50));
//! assert_eq!(normalize_numeric("12.50"), Some(12.50));
//! assert_eq!(normalize_numeric("n/a"), None);
//! assert_eq!(normalize_numeric(""), None);
//! ```

/// Normalize one raw field value into a finite `f64`.
///
/// Commas are treated as decimal separators and replaced with points before
/// parsing. Non-finite parse results (`inf`, `NaN` spellings) are also mapped
/// to `None`: a non-finite "price" is missing data, not a number the pipeline
/// can use.
pub fn normalize_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = trimmed.replace(',', ".");
    match candidate.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Normalize an optional raw field; absent fields are missing.
pub fn normalize_field(raw: Option<&str>) -> Option<f64> {
    raw.and_then(normalize_numeric)
}
