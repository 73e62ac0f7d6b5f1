use crate::error::{GestureError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which geometric features a vector carries. The two sets differ in length
/// and meaning, so a model trained on one cannot classify the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    /// Hand-local 3D distances normalised by sphere radius, signed finger
    /// angles, pinch/grab strength and the extended finger count.
    #[default]
    Spatial,
    /// Distances projected onto the sensor plane and finger bending angles.
    Planar,
}

impl FeatureSet {
    pub fn dimension(&self) -> usize {
        match self {
            FeatureSet::Spatial => crate::feature_vector::spatial::SpatialFeatures::FIELDS.len(),
            FeatureSet::Planar => crate::feature_vector::planar::PlanarFeatures::FIELDS.len(),
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            FeatureSet::Spatial => {
                crate::feature_vector::spatial::SpatialFeatures::field_names()
            }
            FeatureSet::Planar => crate::feature_vector::planar::PlanarFeatures::field_names(),
        }
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureSet::Spatial => write!(f, "spatial"),
            FeatureSet::Planar => write!(f, "planar"),
        }
    }
}

/// A named numeric feature and how to read and write it.
pub struct Field<T> {
    pub name: &'static str,
    pub get: fn(&T) -> f64,
    pub set: fn(&mut T, f64),
}

/// Ordered field table shared by `to_array` and `from_array`, so the two
/// directions cannot disagree on order.
pub trait FeatureFields: Default + Sized + 'static {
    const FEATURE_SET: FeatureSet;

    fn fields() -> &'static [Field<Self>];

    fn field_names() -> Vec<&'static str> {
        Self::fields().iter().map(|field| field.name).collect()
    }

    fn to_array(&self) -> Vec<f64> {
        Self::fields().iter().map(|field| (field.get)(self)).collect()
    }

    fn from_array(values: &[f64]) -> Result<Self> {
        let expected = Self::fields().len();
        if values.len() != expected {
            return Err(GestureError::FeatureCount {
                feature_set: Self::FEATURE_SET,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self::from_positional(values))
    }

    /// Assigns values to fields by position. Extra values are ignored and
    /// missing ones leave the field at its default.
    fn from_positional(values: &[f64]) -> Self {
        let mut features = Self::default();
        for (field, &value) in Self::fields().iter().zip(values) {
            (field.set)(&mut features, value);
        }
        features
    }
}
