use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub timeout_secs: u64,
    pub top_k: usize,
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let classifier = ClassifierConfig {
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/mobilenetv2-7.onnx".into())
                .into(),
            labels_path: std::env::var("LABELS_PATH")
                .unwrap_or_else(|_| "models/labels.txt".into())
                .into(),
            timeout_secs: std::env::var("CLASSIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
            top_k: std::env::var("CLASSIFY_TOP_K")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(5),
        };
        Ok(Self { classifier })
    }
}
