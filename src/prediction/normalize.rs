//! Reshaping of classifier output into a two-class prediction.

use tracing::debug;

use crate::error::PredictError;

use super::types::{Diagnosis, LabelScore, PredictionResult, UpstreamPayload};

/// Unwrap the optional extra nesting level, yielding the pair sequence.
fn flatten(payload: UpstreamPayload) -> Result<Vec<LabelScore>, PredictError> {
    let pairs = match payload {
        UpstreamPayload::Flat(pairs) => pairs,
        UpstreamPayload::Nested(mut outer) => {
            if outer.len() != 1 {
                return Err(PredictError::UnexpectedResponse(format!(
                    "expected one inner prediction list, got {}",
                    outer.len()
                )));
            }
            outer.remove(0)
        }
    };

    if pairs.is_empty() {
        return Err(PredictError::UnexpectedResponse(
            "empty prediction list".to_string(),
        ));
    }

    Ok(pairs)
}

/// Score of the first pair carrying the given label.
fn score_for(pairs: &[LabelScore], diagnosis: Diagnosis) -> Option<f64> {
    pairs
        .iter()
        .find(|p| p.diagnosis() == Some(diagnosis))
        .map(|p| p.score)
}

/// Build a [`PredictionResult`] from a decoded inference payload.
///
/// The top prediction is the pair with the highest score (first wins on
/// ties). A class missing from the payload gets `1 - confidence`.
pub fn normalize(payload: UpstreamPayload) -> Result<PredictionResult, PredictError> {
    let pairs = flatten(payload)?;

    if let Some(bad) = pairs
        .iter()
        .find(|p| !p.score.is_finite() || !(0.0..=1.0).contains(&p.score))
    {
        return Err(PredictError::UnexpectedResponse(format!(
            "score {} for label {} is outside [0, 1]",
            bad.score, bad.label
        )));
    }

    let top = pairs
        .iter()
        .fold(None::<&LabelScore>, |best, p| match best {
            Some(b) if b.score >= p.score => Some(b),
            _ => Some(p),
        })
        .ok_or_else(|| PredictError::UnexpectedResponse("empty prediction list".to_string()))?;

    let label = top.diagnosis().ok_or_else(|| {
        PredictError::UnexpectedResponse(format!("unrecognized label {:?}", top.label))
    })?;
    let confidence = top.score;

    let derived = 1.0 - confidence;
    let benign = score_for(&pairs, Diagnosis::Benign);
    let malignant = score_for(&pairs, Diagnosis::Malignant);

    if benign.is_none() || malignant.is_none() {
        debug!(
            top = %label,
            missing = %label.opposite(),
            "deriving missing class probability from confidence"
        );
    }

    Ok(PredictionResult {
        label,
        confidence,
        probability_benign: benign.unwrap_or(derived),
        probability_malignant: malignant.unwrap_or(derived),
    })
}
