use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;
use tokio::sync::OnceCell;
use tract_onnx::prelude::*;

use super::{Classifier, Prediction};
use crate::config::ClassifierConfig;

type RunnablePlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

const INPUT_SIZE: u32 = 224;
// ImageNet normalization constants.
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

struct Loaded {
    plan: RunnablePlan,
    labels: Vec<String>,
}

impl Loaded {
    fn load(model_path: &Path, labels_path: &Path) -> anyhow::Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)
            .with_context(|| format!("read model {}", model_path.display()))?
            .with_input_fact(
                0,
                f32::fact([1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize]).into(),
            )
            .context("set model input fact")?
            .into_optimized()
            .context("optimize model")?
            .into_runnable()
            .context("make model runnable")?;

        let labels: Vec<String> = std::fs::read_to_string(labels_path)
            .with_context(|| format!("read labels {}", labels_path.display()))?
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        anyhow::ensure!(!labels.is_empty(), "labels file is empty");

        Ok(Self { plan, labels })
    }
}

/// In-process image classifier. The model is loaded exactly once, on the first
/// call; concurrent first callers await the same in-flight load through the
/// `OnceCell` rather than each triggering their own.
pub struct OnnxClassifier {
    config: ClassifierConfig,
    loaded: OnceCell<Arc<Loaded>>,
}

impl OnnxClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            loaded: OnceCell::new(),
        }
    }

    async fn loaded(&self) -> anyhow::Result<Arc<Loaded>> {
        let loaded = self
            .loaded
            .get_or_try_init(|| async {
                let model_path = self.config.model_path.clone();
                let labels_path = self.config.labels_path.clone();
                tracing::info!(model = %model_path.display(), "loading classification model");
                let loaded =
                    tokio::task::spawn_blocking(move || Loaded::load(&model_path, &labels_path))
                        .await
                        .context("model load task panicked")??;
                tracing::info!(classes = loaded.labels.len(), "classification model ready");
                Ok::<_, anyhow::Error>(Arc::new(loaded))
            })
            .await?;
        Ok(loaded.clone())
    }
}

#[async_trait]
impl Classifier for OnnxClassifier {
    async fn classify(&self, image: Bytes) -> anyhow::Result<Vec<Prediction>> {
        let loaded = self.loaded().await?;
        let top_k = self.config.top_k;
        tokio::task::spawn_blocking(move || run_inference(&loaded, &image, top_k))
            .await
            .context("inference task panicked")?
    }
}

fn run_inference(loaded: &Loaded, image: &[u8], top_k: usize) -> anyhow::Result<Vec<Prediction>> {
    let img = image::load_from_memory(image).context("decode image")?;
    let rgb = img
        .resize_exact(INPUT_SIZE, INPUT_SIZE, image::imageops::FilterType::Triangle)
        .to_rgb8();

    let tensor: Tensor = tract_ndarray::Array4::from_shape_fn(
        (1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize),
        |(_, c, y, x)| {
            let val = rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
            (val - MEAN[c]) / STD[c]
        },
    )
    .into();

    let result = loaded
        .plan
        .run(tvec!(tensor.into()))
        .context("run inference")?;
    let output = result[0]
        .to_array_view::<f32>()
        .context("read model output")?;
    let logits = output
        .as_slice()
        .context("model output is not contiguous")?;

    let predictions = softmax_top_k(logits, &loaded.labels, top_k);
    anyhow::ensure!(!predictions.is_empty(), "model produced no predictions");
    Ok(predictions)
}

fn softmax_top_k(logits: &[f32], labels: &[String], top_k: usize) -> Vec<Prediction> {
    let max_val = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exp_sum: f32 = logits.iter().map(|x| (x - max_val).exp()).sum();

    let mut scored: Vec<(usize, f32)> = logits
        .iter()
        .enumerate()
        .map(|(i, &x)| (i, (x - max_val).exp() / exp_sum))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .filter_map(|(idx, score)| {
            labels.get(idx).map(|label| Prediction {
                label: label.clone(),
                score,
            })
        })
        .take(top_k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn softmax_scores_sum_to_one_and_sort_descending() {
        let preds = softmax_top_k(&[1.0, 3.0, 2.0], &labels(&["a", "b", "c"]), 3);
        assert_eq!(preds[0].label, "b");
        assert_eq!(preds[1].label, "c");
        assert_eq!(preds[2].label, "a");
        let sum: f32 = preds.iter().map(|p| p.score).sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn softmax_truncates_to_top_k() {
        let preds = softmax_top_k(&[0.1, 0.4, 0.2, 0.9], &labels(&["a", "b", "c", "d"]), 2);
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].label, "d");
        assert_eq!(preds[1].label, "b");
    }

    #[test]
    fn softmax_skips_indices_without_labels() {
        let preds = softmax_top_k(&[0.1, 5.0], &labels(&["only"]), 5);
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].label, "only");
    }
}
