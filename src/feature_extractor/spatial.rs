//! Hand-local 3D features. Every hand is moved into its own frame (origin at
//! the palm, axes from palm normal and direction) so distances ignore where
//! the hand is and how it is turned, then divided by the sphere radius so
//! they ignore how big the hand looks.
//!
//! Each block walks every hand in the frame, so a two-hand frame yields the
//! palm distances of both hands before any adjacent-finger distance.

use crate::device_sensor::frame::{BoneType, Finger, Frame, Hand};
use crate::feature_vector::feature_set::FeatureFields;
use crate::feature_vector::spatial::SpatialFeatures;
use nalgebra::{distance, Point3};

pub fn extract(frame: &Frame) -> SpatialFeatures {
    let mut features = SpatialFeatures::from_positional(&measurements(frame));
    features.num_extended_fingers = frame.extended_finger_count() as u32;
    features
}

/// Per-hand values in field order, hands concatenated block by block.
pub fn measurements(frame: &Frame) -> Vec<f64> {
    let mut values = Vec::with_capacity(SpatialFeatures::MEASURED_FIELDS * frame.hands.len());
    palm_to_finger_distances(&mut values, frame);
    adjacent_finger_distances(&mut values, frame);
    hand_to_finger_distances(&mut values, frame);
    miscellaneous_features(&mut values, frame);
    values
}

/// Thumb, index, middle, ring, pinky.
fn palm_to_finger_distances(values: &mut Vec<f64>, frame: &Frame) {
    for hand in &frame.hands {
        let to_hand = hand.world_to_hand();
        let palm = to_hand.transform_point(&Point3::from(hand.palm_position));

        for finger in &hand.fingers {
            let tip = to_hand.transform_point(&Point3::from(finger.tip_position));
            values.push(distance(&tip, &palm) / hand.sphere_radius);
        }
    }
}

/// Pinky-ring, ring-middle, middle-index, index-thumb.
fn adjacent_finger_distances(values: &mut Vec<f64>, frame: &Frame) {
    for hand in &frame.hands {
        let to_hand = hand.world_to_hand();

        for i in (1..hand.fingers.len()).rev() {
            let current = to_hand.transform_point(&Point3::from(hand.fingers[i].tip_position));
            let previous =
                to_hand.transform_point(&Point3::from(hand.fingers[i - 1].tip_position));
            values.push(distance(&current, &previous) / hand.sphere_radius);
        }
    }
}

/// Law-of-cosines style combination of the finger and hand direction
/// magnitudes with the signed finger angle (degrees).
fn hand_to_finger_distances(values: &mut Vec<f64>, frame: &Frame) {
    for hand in &frame.hands {
        for finger in &hand.fingers {
            let angle = finger_angle(hand, finger);
            let finger_magnitude = finger.direction.norm();
            let hand_magnitude = hand.direction.norm();

            let combined = finger_magnitude.powi(2) + hand_magnitude.powi(2)
                - 2.0 * finger_magnitude * hand_magnitude * angle;

            values.push(combined / hand.sphere_radius);
        }
    }
}

/// Angle in degrees between the hand's forward direction and the distal
/// bone. Positive when the finger bends about the metacarpal's x axis in the
/// positive sense; that axis is mirrored for a left hand so both hands agree.
pub fn finger_angle(hand: &Hand, finger: &Finger) -> f64 {
    let hand_forward = hand.direction;
    let tip_forward = finger
        .bone(BoneType::Distal)
        .map(|bone| bone.direction())
        .unwrap_or(finger.direction);

    let raw_angle = hand_forward.angle(&tip_forward).to_degrees();

    let cross = hand_forward.cross(&tip_forward);
    let bone_x = finger
        .bone(BoneType::Metacarpal)
        .map(|bone| bone.x_axis())
        .unwrap_or_else(|| hand.x_axis());
    let bone_x = if hand.is_left() { -bone_x } else { bone_x };

    if cross.dot(&bone_x) >= 0.0 {
        raw_angle
    } else {
        -raw_angle
    }
}

/// Sphere radius, pinch strength, grab strength.
fn miscellaneous_features(values: &mut Vec<f64>, frame: &Frame) {
    for hand in &frame.hands {
        values.push(hand.sphere_radius);
        values.push(hand.pinch_strength);
        values.push(hand.grab_strength);
    }
}
