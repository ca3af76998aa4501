//! Core types for weatherfit

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of features every request must carry
pub const FEATURE_COUNT: usize = 5;

/// Feature names in positional order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "outlook_rainy",
    "outlook_sunny",
    "temperature_hot",
    "temperature_mild",
    "humidity_normal",
];

/// Five binary weather indicators in fixed positional order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVector([u8; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a vector from raw values.
    ///
    /// Returns `None` if any value is not 0 or 1.
    pub fn new(values: [u8; FEATURE_COUNT]) -> Option<Self> {
        values.iter().all(|v| *v <= 1).then_some(Self(values))
    }

    pub(crate) fn from_checked(values: [u8; FEATURE_COUNT]) -> Self {
        debug_assert!(values.iter().all(|v| *v <= 1));
        Self(values)
    }

    /// Raw values
    pub fn values(&self) -> &[u8; FEATURE_COUNT] {
        &self.0
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Values as a single float row, the shape tree models evaluate
    pub fn as_row(&self) -> [f32; FEATURE_COUNT] {
        self.0.map(f32::from)
    }

    pub fn outlook_rainy(&self) -> bool {
        self.0[0] == 1
    }

    pub fn outlook_sunny(&self) -> bool {
        self.0[1] == 1
    }

    pub fn temperature_hot(&self) -> bool {
        self.0[2] == 1
    }

    pub fn temperature_mild(&self) -> bool {
        self.0[3] == 1
    }

    pub fn humidity_normal(&self) -> bool {
        self.0[4] == 1
    }
}

/// Binary prediction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    /// Conditions are not suitable for exercise
    NotSuitable,
    /// Conditions are suitable for exercise
    Suitable,
}

impl Label {
    /// Integer form used on the wire
    pub fn as_u8(self) -> u8 {
        match self {
            Self::NotSuitable => 0,
            Self::Suitable => 1,
        }
    }

    pub fn is_suitable(self) -> bool {
        self == Self::Suitable
    }

    /// Human-readable message returned to callers
    pub fn message(self) -> &'static str {
        match self {
            Self::Suitable => "Suitable for exercise",
            Self::NotSuitable => "Not suitable for exercise",
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotSuitable),
            1 => Ok(Self::Suitable),
            other => Err(format!("label must be 0 or 1, got {}", other)),
        }
    }
}

/// Named echo of the request features, exactly as the caller sent them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFeatures {
    pub outlook_rainy: Value,
    pub outlook_sunny: Value,
    pub temperature_hot: Value,
    pub temperature_mild: Value,
    pub humidity_normal: Value,
}

impl InputFeatures {
    /// Name the raw values of a payload's feature array.
    ///
    /// Returns `None` unless there are exactly five values.
    pub fn from_values(values: &[Value]) -> Option<Self> {
        let [outlook_rainy, outlook_sunny, temperature_hot, temperature_mild, humidity_normal] =
            <&[Value; FEATURE_COUNT]>::try_from(values).ok()?.clone();
        Some(Self {
            outlook_rainy,
            outlook_sunny,
            temperature_hot,
            temperature_mild,
            humidity_normal,
        })
    }
}

impl From<&FeatureVector> for InputFeatures {
    fn from(features: &FeatureVector) -> Self {
        let [outlook_rainy, outlook_sunny, temperature_hot, temperature_mild, humidity_normal] =
            (*features.values()).map(Value::from);
        Self {
            outlook_rainy,
            outlook_sunny,
            temperature_hot,
            temperature_mild,
            humidity_normal,
        }
    }
}

/// Successful `/predict` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted label, 0 or 1
    pub prediction: Label,

    /// `prediction == 1`
    pub suitable_for_training: bool,

    /// Fixed literal; the model's probabilities are not exposed
    pub confidence: String,

    /// The request features by name
    pub input_features: InputFeatures,

    pub message: String,
}

impl PredictionResult {
    /// Confidence reported for every prediction
    pub const CONFIDENCE: &'static str = "high";

    /// Build the response view for a label and the features that produced it
    pub fn new(label: Label, features: &FeatureVector) -> Self {
        Self::with_input(label, InputFeatures::from(features))
    }

    /// Build the response view echoing `input` verbatim
    pub fn with_input(label: Label, input: InputFeatures) -> Self {
        Self {
            prediction: label,
            suitable_for_training: label.is_suitable(),
            confidence: Self::CONFIDENCE.to_string(),
            input_features: input,
            message: label.message().to_string(),
        }
    }
}

/// `/health` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn healthy(model_loaded: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            message: "AI Model Server is running".to_string(),
            model_loaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_vector_rejects_non_binary() {
        assert!(FeatureVector::new([0, 1, 0, 1, 1]).is_some());
        assert!(FeatureVector::new([0, 2, 0, 1, 1]).is_none());
    }

    #[test]
    fn test_named_accessors() {
        let features = FeatureVector::new([0, 1, 0, 1, 1]).unwrap();
        assert!(!features.outlook_rainy());
        assert!(features.outlook_sunny());
        assert!(!features.temperature_hot());
        assert!(features.temperature_mild());
        assert!(features.humidity_normal());
        assert_eq!(features.as_row(), [0.0, 1.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_label_wire_format() {
        assert_eq!(serde_json::to_string(&Label::Suitable).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Label::NotSuitable).unwrap(), "0");
        assert_eq!(serde_json::from_str::<Label>("1").unwrap(), Label::Suitable);
        assert!(serde_json::from_str::<Label>("2").is_err());
    }

    #[test]
    fn test_prediction_result_suitable() {
        let features = FeatureVector::new([0, 1, 0, 1, 1]).unwrap();
        let result = PredictionResult::new(Label::Suitable, &features);

        assert!(result.suitable_for_training);
        assert_eq!(result.message, "Suitable for exercise");
        assert_eq!(result.confidence, "high");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["prediction"], 1);
        assert_eq!(json["input_features"]["outlook_sunny"], 1);
        assert_eq!(json["input_features"]["outlook_rainy"], 0);
        assert_eq!(json["input_features"]["humidity_normal"], 1);
    }

    #[test]
    fn test_prediction_result_not_suitable() {
        let features = FeatureVector::new([1, 0, 0, 1, 1]).unwrap();
        let result = PredictionResult::new(Label::NotSuitable, &features);

        assert!(!result.suitable_for_training);
        assert_eq!(result.message, "Not suitable for exercise");
        assert_eq!(serde_json::to_value(&result).unwrap()["prediction"], 0);
    }

    #[test]
    fn test_input_features_keep_raw_values() {
        let values = [json!(0.0), json!(1), json!(false), json!(1.0), json!(true)];
        let input = InputFeatures::from_values(&values).unwrap();

        assert_eq!(input.outlook_rainy, json!(0.0));
        assert_eq!(input.outlook_sunny, json!(1));
        assert_eq!(input.temperature_hot, json!(false));
        assert_eq!(input.humidity_normal, json!(true));

        assert!(InputFeatures::from_values(&values[..4]).is_none());
    }

    #[test]
    fn test_health_status() {
        let health = HealthStatus::healthy(false);
        assert_eq!(health.status, "healthy");
        assert!(!health.model_loaded);
    }
}
