//! Features on the sensor's viewing plane: depth is dropped, nothing is
//! rotated into hand space and nothing is normalised.

use crate::device_sensor::frame::{BoneType, Finger, Frame};
use crate::feature_vector::feature_set::FeatureFields;
use crate::feature_vector::planar::PlanarFeatures;

pub fn extract(frame: &Frame) -> PlanarFeatures {
    PlanarFeatures::from_positional(&measurements(frame))
}

pub fn measurements(frame: &Frame) -> Vec<f64> {
    let mut values = Vec::with_capacity(PlanarFeatures::FIELDS.len() * frame.hands.len());

    for hand in &frame.hands {
        let palm = hand.palm_position.xy();
        for finger in &hand.fingers {
            values.push((finger.tip_position.xy() - palm).norm());
        }
    }

    for hand in &frame.hands {
        for i in (1..hand.fingers.len()).rev() {
            let current = hand.fingers[i].tip_position.xy();
            let previous = hand.fingers[i - 1].tip_position.xy();
            values.push((current - previous).norm());
        }
    }

    for hand in &frame.hands {
        for finger in &hand.fingers {
            values.push(finger_bending(finger));
        }
    }

    values
}

/// Degrees between the proximal and intermediate segments; 0 for a straight
/// finger.
pub fn finger_bending(finger: &Finger) -> f64 {
    let segment = |bone_type| {
        finger
            .bone(bone_type)
            .map(|bone| bone.next_joint - bone.prev_joint)
    };

    match (segment(BoneType::Proximal), segment(BoneType::Intermediate)) {
        (Some(proximal), Some(intermediate)) => proximal.angle(&intermediate).to_degrees(),
        _ => 0.0,
    }
}
