use crate::feature_vector::feature_set::{FeatureFields, FeatureSet, Field};
use serde::{Deserialize, Serialize};

/// Hand-local geometry. Distances are divided by the hand's sphere radius.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialFeatures {
    pub palm_to_thumb_distance: f64,
    pub palm_to_index_distance: f64,
    pub palm_to_middle_distance: f64,
    pub palm_to_ring_distance: f64,
    pub palm_to_pinky_distance: f64,
    pub pinky_to_ring_distance: f64,
    pub ring_to_middle_distance: f64,
    pub middle_to_index_distance: f64,
    pub index_to_thumb_distance: f64,
    pub thumb_to_hand_normal_distance: f64,
    pub index_to_hand_normal_distance: f64,
    pub middle_to_hand_normal_distance: f64,
    pub ring_to_hand_normal_distance: f64,
    pub pinky_to_hand_normal_distance: f64,
    pub radius_sphere: f64,
    pub pinch_strength: f64,
    pub grab_strength: f64,
    pub num_extended_fingers: u32,
}

macro_rules! field {
    ($name:literal, $field:ident) => {
        Field {
            name: $name,
            get: |features: &SpatialFeatures| features.$field,
            set: |features: &mut SpatialFeatures, value: f64| features.$field = value,
        }
    };
}

impl SpatialFeatures {
    pub const FIELDS: [Field<SpatialFeatures>; 18] = [
        field!("PalmToThumbDistance", palm_to_thumb_distance),
        field!("PalmToIndexDistance", palm_to_index_distance),
        field!("PalmToMiddleDistance", palm_to_middle_distance),
        field!("PalmToRingDistance", palm_to_ring_distance),
        field!("PalmToPinkyDistance", palm_to_pinky_distance),
        field!("PinkyToRingDistance", pinky_to_ring_distance),
        field!("RingToMiddleDistance", ring_to_middle_distance),
        field!("MiddleToIndexDistance", middle_to_index_distance),
        field!("IndexToThumbDistance", index_to_thumb_distance),
        field!("ThumbToHandNormalDistance", thumb_to_hand_normal_distance),
        field!("IndexToHandNormalDistance", index_to_hand_normal_distance),
        field!("MiddleToHandNormalDistance", middle_to_hand_normal_distance),
        field!("RingToHandNormalDistance", ring_to_hand_normal_distance),
        field!("PinkyToHandNormalDistance", pinky_to_hand_normal_distance),
        field!("RadiusSphere", radius_sphere),
        field!("PinchStrength", pinch_strength),
        field!("GrabStrength", grab_strength),
        Field {
            name: "NumExtendedFingers",
            get: |features: &SpatialFeatures| features.num_extended_fingers as f64,
            set: |features: &mut SpatialFeatures, value: f64| {
                features.num_extended_fingers = value.round().max(0.0) as u32
            },
        },
    ];

    /// Fields filled from per-hand measurements; the extended finger count
    /// comes from the whole frame instead.
    pub const MEASURED_FIELDS: usize = 17;
}

impl FeatureFields for SpatialFeatures {
    const FEATURE_SET: FeatureSet = FeatureSet::Spatial;

    fn fields() -> &'static [Field<Self>] {
        &Self::FIELDS
    }
}
