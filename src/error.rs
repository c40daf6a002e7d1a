//! Error types shared by every computation in the lab.

use thiserror::Error;

/// Errors returned by the lab computations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    /// A physical or numerical parameter is outside its valid domain
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: String,
    },

    /// An intermediate result was NaN or infinite
    #[error("Numeric anomaly in {quantity}: {value}")]
    NumericAnomaly { quantity: &'static str, value: f64 },
}

pub type LabResult<T> = Result<T, LabError>;

impl LabError {
    pub fn invalid(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        LabError::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }
}

/// Reject values that are not strictly positive and finite.
pub fn ensure_positive(name: &'static str, value: f64) -> LabResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LabError::invalid(name, value, "must be finite and > 0"))
    }
}

/// Pass finite values through, flag everything else as an anomaly.
pub fn ensure_finite(quantity: &'static str, value: f64) -> LabResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LabError::NumericAnomaly { quantity, value })
    }
}

/// Reports the first failing field by name, with its offending value when known.
impl From<validator::ValidationErrors> for LabError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors
            .field_errors()
            .into_iter()
            .min_by_key(|(field, _)| *field)
            .and_then(|(field, errs)| errs.first().map(|err| (field, err.clone())));

        match first {
            Some((field, err)) => LabError::InvalidParameter {
                name: field,
                value: err
                    .params
                    .get("value")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(f64::NAN),
                reason: errors.to_string(),
            },
            None => LabError::InvalidParameter {
                name: "panel",
                value: f64::NAN,
                reason: errors.to_string(),
            },
        }
    }
}
