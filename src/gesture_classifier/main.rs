use crate::config::{ClassifierConfig, Config, StorageConfig};
use crate::environment::{resolve_model_path, MODEL_DIRECTORY};
use crate::error::{GestureError, Result};
use crate::feature_store::interface::FeatureVectorStore;
use crate::feature_vector::feature_set::FeatureSet;
use crate::feature_vector::main::FeatureVector;
use crate::gesture_classifier::evaluation::AccuracyEvaluation;
use crate::gesture_classifier::model_store::ModelStore;
use crate::library::logger::interface::Logger;
use crate::random_forest::confusion::GeneralConfusionMatrix;
use crate::random_forest::forest::RandomForest;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trains, persists and runs the gesture forest.
///
/// Not safe for concurrent use; callers sharing one instance across threads
/// wrap it in a `Mutex`.
pub struct GestureClassifier {
    config: ClassifierConfig,
    storage: StorageConfig,
    feature_set: FeatureSet,
    model_path: PathBuf,
    model: Option<RandomForest>,
    training_finished: bool,
    evaluation: Option<AccuracyEvaluation>,
    last_evaluation: Option<GeneralConfusionMatrix>,
    store: Arc<dyn FeatureVectorStore + Send + Sync>,
    model_store: Arc<dyn ModelStore + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl GestureClassifier {
    pub fn new(
        config: &Config,
        store: Arc<dyn FeatureVectorStore + Send + Sync>,
        model_store: Arc<dyn ModelStore + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        let classifier = config.classifier.clone();
        let model_path = config
            .storage
            .writable_root
            .join(MODEL_DIRECTORY)
            .join(&classifier.model_name);
        let evaluation = classifier
            .calculate_accuracy
            .then(|| AccuracyEvaluation::new(classifier.test_outputs.clone()));

        Self {
            storage: config.storage.clone(),
            feature_set: config.feature_set,
            model_path,
            model: None,
            training_finished: false,
            evaluation,
            last_evaluation: None,
            config: classifier,
            store,
            model_store,
            logger: logger.with_namespace("classifier"),
        }
    }

    /// Locates and loads the persisted model. A missing or unreadable model
    /// leaves the classifier without one; only logging failures are returned.
    pub fn start(&mut self) -> Result<()> {
        match resolve_model_path(&self.storage, &self.config.model_name) {
            Ok(path) => self.model_path = path,
            Err(e) => self
                .logger
                .warn(&format!("Could not prepare model directory: {}", e))?,
        }

        let path = self.model_path.clone();
        match self.load(&path) {
            Ok(true) => {}
            Ok(false) => self
                .logger
                .info(&format!("No trained model at {}", path.display()))?,
            Err(e) => self.logger.warn(&format!(
                "Could not load model from {}: {}",
                path.display(),
                e
            ))?,
        }
        Ok(())
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.feature_set
    }

    pub fn model_exists(&self) -> bool {
        self.model.is_some()
    }

    pub fn training_finished(&self) -> bool {
        self.training_finished
    }

    pub fn last_evaluation(&self) -> Option<&GeneralConfusionMatrix> {
        self.last_evaluation.as_ref()
    }

    /// Replaces the held model with the one stored at `path`. Returns
    /// `false` and keeps the current model when nothing is stored there.
    pub fn load(&mut self, path: &Path) -> Result<bool> {
        let forest = match self.model_store.load(path)? {
            Some(forest) => forest,
            None => return Ok(false),
        };

        if forest.number_of_inputs() != self.feature_set.dimension() {
            self.logger.warn(&format!(
                "Model at {} takes {} features but the {} feature set has {}",
                path.display(),
                forest.number_of_inputs(),
                self.feature_set,
                self.feature_set.dimension()
            ))?;
        }

        self.logger.info(&format!(
            "Loaded model with {} trees from {}",
            forest.trees().len(),
            path.display()
        ))?;
        self.model = Some(forest);
        Ok(true)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let forest = self.model.as_ref().ok_or(GestureError::ModelNotLoaded)?;
        self.model_store.save(path, forest)?;
        self.logger
            .info(&format!("Saved model to {}", path.display()))?;
        Ok(())
    }

    /// Trains on everything in the store.
    pub fn train(&mut self) -> Result<()> {
        let vectors = self.store.all_feature_vectors()?;
        self.train_on(&vectors)
    }

    /// Fits a new forest and persists it. If persisting fails the new model
    /// is still held in memory, training is not marked finished and the
    /// error is returned.
    pub fn train_on(&mut self, vectors: &[FeatureVector]) -> Result<()> {
        self.training_finished = false;
        let (inputs, outputs) = self.training_arrays(vectors)?;

        self.logger.info(&format!(
            "Training {} trees on {} vectors",
            self.config.forest.number_of_trees,
            inputs.len()
        ))?;
        let forest = RandomForest::learn(&inputs, &outputs, &self.config.forest)?;
        self.model = Some(forest);

        let path = self.model_path.clone();
        self.save(&path)?;
        self.training_finished = true;
        self.logger.info("Training finished")?;
        Ok(())
    }

    fn training_arrays(&self, vectors: &[FeatureVector]) -> Result<(Vec<Vec<f64>>, Vec<i32>)> {
        if vectors.is_empty() {
            return Err(GestureError::Training(
                "no labeled feature vectors".to_string(),
            ));
        }

        let mut inputs = Vec::with_capacity(vectors.len());
        let mut outputs = Vec::with_capacity(vectors.len());
        for (index, vector) in vectors.iter().enumerate() {
            let class_label = match (&vector.gesture, vector.class_label) {
                (Some(_), Some(class_label)) => class_label,
                _ => return Err(GestureError::UnlabeledVector { index }),
            };
            if vector.feature_set() != self.feature_set {
                return Err(GestureError::Training(format!(
                    "vector {} uses the {} feature set, expected {}",
                    index,
                    vector.feature_set(),
                    self.feature_set
                )));
            }
            inputs.push(vector.to_array());
            outputs.push(class_label);
        }
        Ok((inputs, outputs))
    }

    /// Decides a label for `input` and names it through the store.
    pub fn classify(&mut self, input: &[f64]) -> Result<String> {
        let forest = self.model.as_ref().ok_or(GestureError::ModelNotLoaded)?;
        let class_label = forest.decide(input)?;

        if let Some(evaluation) = self.evaluation.as_mut() {
            match evaluation.record(forest, input) {
                Ok(Some(matrix)) => {
                    let _ = self.logger.info(&format!(
                        "Accuracy {:.3}, error {:.3} over {} samples\n{}",
                        matrix.accuracy(),
                        matrix.error(),
                        matrix.total(),
                        matrix
                    ));
                    self.last_evaluation = Some(matrix);
                }
                Ok(None) => {}
                Err(e) => {
                    let _ = self
                        .logger
                        .warn(&format!("Accuracy evaluation failed: {}", e));
                }
            }
        }

        self.store
            .class_label_to_gesture(class_label)?
            .ok_or(GestureError::UnknownClassLabel(class_label))
    }
}
