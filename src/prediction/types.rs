//! Prediction types and data structures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Class reported by the histopathology classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum Diagnosis {
    /// Non-cancerous tissue.
    #[strum(serialize = "BENIGN")]
    Benign,
    /// Cancerous tissue.
    #[strum(serialize = "MALIGNANT")]
    Malignant,
}

impl Diagnosis {
    /// The other class of the two-class problem.
    pub fn opposite(self) -> Self {
        match self {
            Diagnosis::Benign => Diagnosis::Malignant,
            Diagnosis::Malignant => Diagnosis::Benign,
        }
    }
}

/// One label/score pair as returned by the inference service.
///
/// Decodes only from a JSON object; `["BENIGN", 0.9]` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct LabelScore {
    /// Class label, in whatever case the model emits.
    pub label: String,
    /// Score in [0, 1].
    pub score: f64,
}

impl LabelScore {
    /// Create a new pair.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Parse the label into a known class, ignoring case.
    pub fn diagnosis(&self) -> Option<Diagnosis> {
        self.label.trim().parse().ok()
    }
}

impl TryFrom<Map<String, Value>> for LabelScore {
    type Error = String;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let label = object
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| "missing string field `label`".to_string())?;
        let score = object
            .get("score")
            .and_then(Value::as_f64)
            .ok_or_else(|| "missing numeric field `score`".to_string())?;
        Ok(Self::new(label, score))
    }
}

/// Accepted shapes of the inference service response body.
///
/// Image classification endpoints answer either with a flat list of pairs or
/// with that list wrapped in one more array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UpstreamPayload {
    /// `[{"label": .., "score": ..}, ...]`
    Flat(Vec<LabelScore>),
    /// `[[{"label": .., "score": ..}, ...]]`
    Nested(Vec<Vec<LabelScore>>),
}

impl UpstreamPayload {
    /// Decode a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl From<Vec<LabelScore>> for UpstreamPayload {
    fn from(pairs: Vec<LabelScore>) -> Self {
        UpstreamPayload::Flat(pairs)
    }
}

/// Normalized two-class prediction, built fresh for every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Top-ranked class.
    pub label: Diagnosis,
    /// Score of the top-ranked class.
    pub confidence: f64,
    /// Probability of [`Diagnosis::Benign`].
    pub probability_benign: f64,
    /// Probability of [`Diagnosis::Malignant`].
    pub probability_malignant: f64,
}

impl PredictionResult {
    /// Confidence as a percentage string with two decimals, e.g. `97.32%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }

    /// Probability for the given class.
    pub fn probability(&self, diagnosis: Diagnosis) -> f64 {
        match diagnosis {
            Diagnosis::Benign => self.probability_benign,
            Diagnosis::Malignant => self.probability_malignant,
        }
    }
}
