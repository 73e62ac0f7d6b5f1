use crate::error::BoxError;
use crate::feature_vector::main::FeatureVector;

/// Labeled feature vectors plus the gesture name ↔ class label registry.
///
/// Labels are dense (0, 1, 2, ... in order of first use) and a name keeps its
/// label for the life of the store, so a model trained in one session decodes
/// correctly in the next.
pub trait FeatureVectorStore {
    fn all_feature_vectors(&self) -> Result<Vec<FeatureVector>, BoxError>;

    /// Stores `vector` annotated with `gesture`, registering the name if it
    /// is new, and returns the stored copy with its id and label.
    fn save_gesture(&self, vector: &FeatureVector, gesture: &str)
        -> Result<FeatureVector, BoxError>;

    fn class_label_to_gesture(&self, class_label: i32) -> Result<Option<String>, BoxError>;

    fn gesture_to_class_label(&self, gesture: &str) -> Result<Option<i32>, BoxError>;
}
