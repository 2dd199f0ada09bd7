use thiserror::Error;

/// Why a recognition attempt produced no usable record.
///
/// Callers that render to a user are expected to fall back to
/// [`crate::recognition::service::fallback_record`]; callers that need to know
/// whether the model actually ran can match on the variant.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(#[source] anyhow::Error),

    #[error("classifier returned no predictions")]
    NoPrediction,
}
