use crate::error::BoxError;
use crate::feature_store::interface::FeatureVectorStore;
use crate::feature_vector::main::FeatureVector;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Everything a store holds. `gestures[label]` is the name for `label`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreContents {
    pub gestures: Vec<String>,
    pub vectors: Vec<FeatureVector>,
    pub next_id: i64,
}

impl StoreContents {
    pub fn class_label(&self, gesture: &str) -> Option<i32> {
        self.gestures
            .iter()
            .position(|name| name == gesture)
            .map(|label| label as i32)
    }

    pub fn gesture(&self, class_label: i32) -> Option<String> {
        usize::try_from(class_label)
            .ok()
            .and_then(|label| self.gestures.get(label))
            .cloned()
    }

    pub fn insert(&mut self, vector: &FeatureVector, gesture: &str) -> FeatureVector {
        let class_label = match self.class_label(gesture) {
            Some(label) => label,
            None => {
                self.gestures.push(gesture.to_string());
                (self.gestures.len() - 1) as i32
            }
        };

        self.next_id += 1;
        let stored = vector.annotate(gesture, class_label).with_id(self.next_id);
        self.vectors.push(stored.clone());
        stored
    }
}

#[derive(Debug, Default)]
pub struct StoreMemory {
    contents: Mutex<StoreContents>,
}

impl StoreMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_contents<T>(&self, f: impl FnOnce(&mut StoreContents) -> T) -> Result<T, BoxError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| -> BoxError { e.to_string().into() })?;
        Ok(f(&mut contents))
    }
}

impl FeatureVectorStore for StoreMemory {
    fn all_feature_vectors(&self) -> Result<Vec<FeatureVector>, BoxError> {
        self.with_contents(|contents| contents.vectors.clone())
    }

    fn save_gesture(
        &self,
        vector: &FeatureVector,
        gesture: &str,
    ) -> Result<FeatureVector, BoxError> {
        self.with_contents(|contents| contents.insert(vector, gesture))
    }

    fn class_label_to_gesture(&self, class_label: i32) -> Result<Option<String>, BoxError> {
        self.with_contents(|contents| contents.gesture(class_label))
    }

    fn gesture_to_class_label(&self, gesture: &str) -> Result<Option<i32>, BoxError> {
        self.with_contents(|contents| contents.class_label(gesture))
    }
}
