use crate::error::Result;
use crate::feature_vector::feature_set::{FeatureFields, FeatureSet};
use crate::feature_vector::planar::PlanarFeatures;
use crate::feature_vector::spatial::SpatialFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-numeric fields of a [`FeatureVector`]. They are set when a person
/// names a captured pose and never appear in [`FeatureVector::to_array`].
pub const ANNOTATION_FIELDS: [&str; 3] = ["Gesture", "GestureClassLabel", "ID"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feature_set", content = "features", rename_all = "snake_case")]
pub enum FeatureValues {
    Spatial(SpatialFeatures),
    Planar(PlanarFeatures),
}

impl FeatureValues {
    pub fn feature_set(&self) -> FeatureSet {
        match self {
            FeatureValues::Spatial(_) => FeatureSet::Spatial,
            FeatureValues::Planar(_) => FeatureSet::Planar,
        }
    }

    pub fn to_array(&self) -> Vec<f64> {
        match self {
            FeatureValues::Spatial(features) => features.to_array(),
            FeatureValues::Planar(features) => features.to_array(),
        }
    }

    pub fn from_array(feature_set: FeatureSet, values: &[f64]) -> Result<Self> {
        Ok(match feature_set {
            FeatureSet::Spatial => FeatureValues::Spatial(SpatialFeatures::from_array(values)?),
            FeatureSet::Planar => FeatureValues::Planar(PlanarFeatures::from_array(values)?),
        })
    }
}

/// One captured hand pose. `gesture` and `class_label` are either both set
/// (after annotation) or both absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub id: Option<i64>,
    pub values: FeatureValues,
    pub gesture: Option<String>,
    pub class_label: Option<i32>,
}

impl FeatureVector {
    pub fn new(values: FeatureValues) -> Self {
        Self {
            id: None,
            values,
            gesture: None,
            class_label: None,
        }
    }

    pub fn from_array(feature_set: FeatureSet, values: &[f64]) -> Result<Self> {
        Ok(Self::new(FeatureValues::from_array(feature_set, values)?))
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.values.feature_set()
    }

    /// The numeric features in declared order; annotation fields excluded.
    pub fn to_array(&self) -> Vec<f64> {
        self.values.to_array()
    }

    pub fn annotate(&self, gesture: &str, class_label: i32) -> FeatureVector {
        FeatureVector {
            gesture: Some(gesture.to_string()),
            class_label: Some(class_label),
            ..self.clone()
        }
    }

    pub fn with_id(self, id: i64) -> FeatureVector {
        FeatureVector {
            id: Some(id),
            ..self
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.gesture.is_some() && self.class_label.is_some()
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.feature_set().field_names();
        for (name, value) in names.iter().zip(self.to_array()) {
            writeln!(f, "{}: {}", name, value)?;
        }
        writeln!(
            f,
            "{}: {}",
            ANNOTATION_FIELDS[0],
            self.gesture.as_deref().unwrap_or("")
        )?;
        writeln!(
            f,
            "{}: {}",
            ANNOTATION_FIELDS[1],
            self.class_label.map(|l| l.to_string()).unwrap_or_default()
        )?;
        writeln!(
            f,
            "{}: {}",
            ANNOTATION_FIELDS[2],
            self.id.map(|id| id.to_string()).unwrap_or_default()
        )
    }
}
