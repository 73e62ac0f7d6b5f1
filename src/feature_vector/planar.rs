use crate::feature_vector::feature_set::{FeatureFields, FeatureSet, Field};
use serde::{Deserialize, Serialize};

/// Geometry projected onto the sensor plane, in millimetres and degrees.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarFeatures {
    pub palm_to_thumb_distance: f64,
    pub palm_to_index_distance: f64,
    pub palm_to_middle_distance: f64,
    pub palm_to_ring_distance: f64,
    pub palm_to_pinky_distance: f64,
    pub pinky_to_ring_distance: f64,
    pub ring_to_middle_distance: f64,
    pub middle_to_index_distance: f64,
    pub index_to_thumb_distance: f64,
    pub thumb_finger_bending: f64,
    pub index_finger_bending: f64,
    pub middle_finger_bending: f64,
    pub ring_finger_bending: f64,
    pub pinky_finger_bending: f64,
}

macro_rules! field {
    ($name:literal, $field:ident) => {
        Field {
            name: $name,
            get: |features: &PlanarFeatures| features.$field,
            set: |features: &mut PlanarFeatures, value: f64| features.$field = value,
        }
    };
}

impl PlanarFeatures {
    pub const FIELDS: [Field<PlanarFeatures>; 14] = [
        field!("PalmToThumbDistance", palm_to_thumb_distance),
        field!("PalmToIndexDistance", palm_to_index_distance),
        field!("PalmToMiddleDistance", palm_to_middle_distance),
        field!("PalmToRingDistance", palm_to_ring_distance),
        field!("PalmToPinkyDistance", palm_to_pinky_distance),
        field!("PinkyToRingDistance", pinky_to_ring_distance),
        field!("RingToMiddleDistance", ring_to_middle_distance),
        field!("MiddleToIndexDistance", middle_to_index_distance),
        field!("IndexToThumbDistance", index_to_thumb_distance),
        field!("ThumbFingerBending", thumb_finger_bending),
        field!("IndexFingerBending", index_finger_bending),
        field!("MiddleFingerBending", middle_finger_bending),
        field!("RingFingerBending", ring_finger_bending),
        field!("PinkyFingerBending", pinky_finger_bending),
    ];
}

impl FeatureFields for PlanarFeatures {
    const FEATURE_SET: FeatureSet = FeatureSet::Planar;

    fn fields() -> &'static [Field<Self>] {
        &Self::FIELDS
    }
}
