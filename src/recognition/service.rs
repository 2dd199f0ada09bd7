use anyhow::anyhow;
use bytes::Bytes;

use super::{catalog, resolver};
use crate::error::RecognitionError;
use crate::recognition::dto::NutritionRecord;
use crate::state::AppState;

/// Confidence reported with the fallback record. A fixed constant, not a
/// measured value; kept from the original behavior.
pub const FALLBACK_CONFIDENCE: f32 = 0.9;

/// Run the full recognition pipeline: classify, resolve the top label to a
/// catalog key, look up its macros.
pub async fn analyze(state: &AppState, image: Bytes) -> Result<NutritionRecord, RecognitionError> {
    let predictions = tokio::time::timeout(
        state.config.classifier.timeout(),
        state.classifier.classify(image),
    )
    .await
    .map_err(|_| RecognitionError::ClassifierUnavailable(anyhow!("classification timed out")))?
    .map_err(RecognitionError::ClassifierUnavailable)?;

    let top = predictions.first().ok_or(RecognitionError::NoPrediction)?;
    tracing::debug!(label = %top.label, score = top.score, "top prediction");

    let key = resolver::resolve(&top.label);
    Ok(NutritionRecord {
        food: capitalize(&key),
        confidence: top.score,
        nutrition: catalog::lookup(&key),
    })
}

/// Default-safe record handed to callers that render to a user when
/// recognition fails.
pub fn fallback_record() -> NutritionRecord {
    NutritionRecord {
        food: "Unknown Food".to_string(),
        confidence: FALLBACK_CONFIDENCE,
        nutrition: catalog::DEFAULT_MACROS,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
