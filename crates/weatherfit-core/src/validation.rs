//! Validation of untrusted `/predict` payloads
//!
//! Checks run in a fixed order so the reported error is deterministic:
//! missing field, then arity, then the domain of each element.

use crate::error::{Error, Result};
use crate::types::{FeatureVector, InputFeatures, FEATURE_COUNT};
use serde_json::Value;

/// Name of the payload field carrying the feature array
pub const FEATURES_FIELD: &str = "features";

/// Whether `value` is numerically equal to 0 or 1.
///
/// Integers and floats compare by value, so `1.0` passes, and booleans count
/// as `false == 0` and `true == 1`. Strings, null and containers never pass.
pub fn is_binary(value: &Value) -> bool {
    binary_value(value).is_some()
}

fn binary_value(value: &Value) -> Option<u8> {
    if let Value::Bool(flag) = value {
        return Some(u8::from(*flag));
    }

    let n = value.as_f64()?;
    if n == 0.0 {
        Some(0)
    } else if n == 1.0 {
        Some(1)
    } else {
        None
    }
}

/// A validated payload: the model input plus the values as the caller sent them
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFeatures {
    pub vector: FeatureVector,
    pub input: InputFeatures,
}

/// Extract a `FeatureVector` from a request payload.
pub fn parse_features(payload: &Value) -> Result<FeatureVector> {
    validate_payload(payload).map(|validated| validated.vector)
}

/// Validate a request payload, keeping the raw feature values for the echo.
pub fn validate_payload(payload: &Value) -> Result<ValidatedFeatures> {
    let features = payload
        .as_object()
        .and_then(|obj| obj.get(FEATURES_FIELD))
        .ok_or_else(|| Error::missing_field(FEATURES_FIELD))?;

    let items = match features.as_array() {
        Some(items) if items.len() == FEATURE_COUNT => items,
        Some(items) => {
            return Err(Error::WrongArity {
                expected: FEATURE_COUNT,
                actual: items.len(),
            })
        }
        // A scalar or object has no meaningful length; report it as arity 0
        None => {
            return Err(Error::WrongArity {
                expected: FEATURE_COUNT,
                actual: 0,
            })
        }
    };

    let mut values = [0u8; FEATURE_COUNT];
    for (index, item) in items.iter().enumerate() {
        values[index] = binary_value(item).ok_or_else(|| Error::OutOfDomain {
            index,
            value: item.to_string(),
        })?;
    }

    let input = InputFeatures::from_values(items).ok_or(Error::WrongArity {
        expected: FEATURE_COUNT,
        actual: items.len(),
    })?;

    Ok(ValidatedFeatures {
        vector: FeatureVector::from_checked(values),
        input,
    })
}
