use std::sync::Arc;

use tokio::sync::RwLock;

use crate::classifier::{Classifier, OnnxClassifier};
use crate::config::AppConfig;
use crate::ledger::repo::MealLedger;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub classifier: Arc<dyn Classifier>,
    pub ledger: Arc<RwLock<MealLedger>>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        // The model itself loads lazily on the first classify call.
        let classifier =
            Arc::new(OnnxClassifier::new(config.classifier.clone())) as Arc<dyn Classifier>;

        Ok(Self {
            config,
            classifier,
            ledger: Arc::new(RwLock::new(MealLedger::default())),
        })
    }

    pub fn from_parts(config: Arc<AppConfig>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config,
            classifier,
            ledger: Arc::new(RwLock::new(MealLedger::default())),
        }
    }

    pub fn fake() -> Self {
        use axum::async_trait;
        use bytes::Bytes;

        use crate::classifier::Prediction;

        #[derive(Clone)]
        struct FakeClassifier;
        #[async_trait]
        impl Classifier for FakeClassifier {
            async fn classify(&self, _image: Bytes) -> anyhow::Result<Vec<Prediction>> {
                Ok(vec![
                    Prediction {
                        label: "banana".into(),
                        score: 0.97,
                    },
                    Prediction {
                        label: "lemon".into(),
                        score: 0.02,
                    },
                ])
            }
        }

        let config = Arc::new(AppConfig {
            classifier: crate::config::ClassifierConfig {
                model_path: "fake.onnx".into(),
                labels_path: "fake-labels.txt".into(),
                timeout_secs: 5,
                top_k: 5,
            },
        });

        Self::from_parts(config, Arc::new(FakeClassifier) as Arc<dyn Classifier>)
    }
}
