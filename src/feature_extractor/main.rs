use crate::device_sensor::frame::Frame;
use crate::error::{GestureError, Result};
use crate::feature_extractor::{planar, spatial};
use crate::feature_vector::feature_set::FeatureSet;
use crate::feature_vector::main::{FeatureValues, FeatureVector};

/// Turns a sensor frame into an unannotated [`FeatureVector`].
///
/// Values are assigned to fields by position. A frame with more than one
/// hand concatenates per-hand values without marking which hand they came
/// from, so only the leading values land in the vector and a model trained
/// this way assumes a fixed hand count and order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    feature_set: FeatureSet,
}

impl FeatureExtractor {
    pub fn new(feature_set: FeatureSet) -> Self {
        Self { feature_set }
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.feature_set
    }

    /// Callers are expected to check [`Frame::has_hands`] first; a frame with
    /// no hands is reported as [`GestureError::EmptyFrame`].
    pub fn extract(&self, frame: &Frame) -> Result<FeatureVector> {
        if !frame.has_hands() {
            return Err(GestureError::EmptyFrame);
        }

        let values = match self.feature_set {
            FeatureSet::Spatial => FeatureValues::Spatial(spatial::extract(frame)),
            FeatureSet::Planar => FeatureValues::Planar(planar::extract(frame)),
        };

        Ok(FeatureVector::new(values))
    }

    /// Raw per-hand values before positional assignment. Empty for a frame
    /// with no hands.
    pub fn measurements(&self, frame: &Frame) -> Vec<f64> {
        match self.feature_set {
            FeatureSet::Spatial => spatial::measurements(frame),
            FeatureSet::Planar => planar::measurements(frame),
        }
    }
}
