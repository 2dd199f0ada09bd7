use serde::{Deserialize, Serialize};

use super::catalog::MacroQuantities;

/// Immutable result of one recognition pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub food: String,
    pub confidence: f32,
    pub nutrition: MacroQuantities,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBytesRequest {
    pub image: serde_bytes::ByteBuf,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub record: NutritionRecord,
    /// True when recognition failed and `record` is the default-safe fallback.
    pub fallback: bool,
}
