mod onnx;

use axum::async_trait;
use bytes::Bytes;

pub use onnx::OnnxClassifier;

/// One candidate labelling of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// Boundary to the image-classification model.
///
/// Implementations return predictions sorted by descending score and never
/// return an empty vec on success.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: Bytes) -> anyhow::Result<Vec<Prediction>>;
}
