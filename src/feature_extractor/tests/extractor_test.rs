use super::fixture::{assert_all_close, frame_of, hand, turn_and_move, Fixture};
use crate::device_sensor::frame::{FingerType, Handedness};
use crate::device_sensor::impl_fake::{synthetic_hand_with_curls, HandPose};
use crate::error::GestureError;
use crate::feature_extractor::{planar, spatial};
use crate::feature_vector::feature_set::FeatureSet;
use crate::feature_vector::main::FeatureValues;
use crate::feature_vector::spatial::SpatialFeatures;
use nalgebra::Vector3;

const DISTANCE_FIELDS: usize = 9;

#[test]
fn test_single_hand_has_declared_length_and_finite_values() {
    let f = Fixture::new();

    for feature_set in [FeatureSet::Spatial, FeatureSet::Planar] {
        for pose in HandPose::ALL {
            for handedness in [Handedness::Left, Handedness::Right] {
                let values = f.extract(feature_set, &frame_of(vec![hand(pose, handedness)]));

                assert_eq!(values.len(), feature_set.dimension());
                assert!(
                    values.iter().all(|v| v.is_finite()),
                    "{:?} {:?} {:?}: {:?}",
                    feature_set,
                    pose,
                    handedness,
                    values
                );
            }
        }
    }
}

#[test]
fn test_distances_are_non_negative() {
    let f = Fixture::new();

    for feature_set in [FeatureSet::Spatial, FeatureSet::Planar] {
        for pose in HandPose::ALL {
            let values = f.extract(feature_set, &frame_of(vec![hand(pose, Handedness::Right)]));
            assert!(values[..DISTANCE_FIELDS].iter().all(|&v| v >= 0.0));
        }
    }
}

#[test]
fn test_spatial_distances_ignore_hand_size() {
    let f = Fixture::new();

    for pose in HandPose::ALL {
        let original = hand(pose, Handedness::Right);
        let small = f.extract(FeatureSet::Spatial, &frame_of(vec![original.scaled(0.5)]));
        let large = f.extract(FeatureSet::Spatial, &frame_of(vec![original.scaled(2.5)]));

        assert_all_close(&small[..DISTANCE_FIELDS], &large[..DISTANCE_FIELDS], 1e-9);
    }
}

#[test]
fn test_spatial_features_ignore_hand_orientation() {
    let f = Fixture::new();
    let turns = [
        (Vector3::y(), 1.1),
        (Vector3::x(), -0.6),
        (Vector3::new(1.0, 1.0, 0.5), 2.3),
    ];

    for pose in HandPose::ALL {
        for handedness in [Handedness::Left, Handedness::Right] {
            let original = hand(pose, handedness);
            let expected = f.extract(FeatureSet::Spatial, &frame_of(vec![original.clone()]));

            for (axis, angle) in turns {
                let turned = turn_and_move(&original, axis, angle, Vector3::new(-40.0, 25.0, 60.0));
                let actual = f.extract(FeatureSet::Spatial, &frame_of(vec![turned]));
                assert_all_close(&actual, &expected, 1e-6);
            }
        }
    }
}

#[test]
fn test_extended_finger_count() {
    let f = Fixture::new();

    let open = f
        .spatial
        .extract(&frame_of(vec![hand(HandPose::Open, Handedness::Right)]))
        .unwrap();
    let fist = f
        .spatial
        .extract(&frame_of(vec![hand(HandPose::Fist, Handedness::Left)]))
        .unwrap();

    match (open.values, fist.values) {
        (FeatureValues::Spatial(open), FeatureValues::Spatial(fist)) => {
            assert_eq!(open.num_extended_fingers, 5);
            assert_eq!(fist.num_extended_fingers, 0);
        }
        _ => panic!("expected spatial features"),
    }
}

#[test]
fn test_strengths_and_radius_come_from_the_hand() {
    let f = Fixture::new();
    let pinch = hand(HandPose::Pinch, Handedness::Right);

    let values = f.extract(FeatureSet::Spatial, &frame_of(vec![pinch.clone()]));

    assert_eq!(values[14], pinch.sphere_radius);
    assert_eq!(values[15], pinch.pinch_strength);
    assert_eq!(values[16], pinch.grab_strength);
}

#[test]
fn test_finger_angle_sign_follows_flexion_direction() {
    let mut curls = [0.0; 5];
    curls[1] = 0.4;
    let flexed = synthetic_hand_with_curls(HandPose::Open, curls, Handedness::Right, Vector3::zeros());
    curls[1] = -0.4;
    let hyperextended =
        synthetic_hand_with_curls(HandPose::Open, curls, Handedness::Right, Vector3::zeros());

    let index = |hand: &crate::device_sensor::frame::Hand| {
        let finger = hand.finger(FingerType::Index).unwrap();
        spatial::finger_angle(hand, finger)
    };

    let bent = index(&flexed);
    let straightened = index(&hyperextended);

    assert!(bent.abs() > 1.0);
    assert!((bent + straightened).abs() < 1e-6);
}

#[test]
fn test_finger_angle_agrees_for_mirrored_hands() {
    let right = hand(HandPose::Point, Handedness::Right);
    let left = hand(HandPose::Point, Handedness::Left);

    for finger_type in FingerType::ALL {
        let right_angle = spatial::finger_angle(&right, right.finger(finger_type).unwrap());
        let left_angle = spatial::finger_angle(&left, left.finger(finger_type).unwrap());
        assert!((right_angle - left_angle).abs() < 1e-6);
    }
}

#[test]
fn test_planar_bending_grows_when_curled() {
    let open = hand(HandPose::Open, Handedness::Right);
    let fist = hand(HandPose::Fist, Handedness::Right);

    for finger_type in FingerType::ALL {
        let open_bend = planar::finger_bending(open.finger(finger_type).unwrap());
        let fist_bend = planar::finger_bending(fist.finger(finger_type).unwrap());
        assert!(fist_bend > open_bend, "{:?}", finger_type);
    }
}

#[test]
fn test_planar_distances_ignore_depth() {
    let f = Fixture::new();
    let near = hand(HandPose::Victory, Handedness::Right);
    let far = turn_and_move(&near, Vector3::z(), 0.0, Vector3::new(0.0, 0.0, 120.0));

    let near_values = f.extract(FeatureSet::Planar, &frame_of(vec![near]));
    let far_values = f.extract(FeatureSet::Planar, &frame_of(vec![far]));

    assert_all_close(&near_values, &far_values, 1e-9);
}

#[test]
fn test_frame_without_hands_is_rejected() {
    let f = Fixture::new();
    let empty = frame_of(vec![]);

    assert!(f.spatial.measurements(&empty).is_empty());
    assert!(matches!(
        f.spatial.extract(&empty),
        Err(GestureError::EmptyFrame)
    ));
    assert!(matches!(
        f.planar.extract(&empty),
        Err(GestureError::EmptyFrame)
    ));
}

#[test]
fn test_two_hands_concatenate_block_by_block() {
    let f = Fixture::new();
    let left = hand(HandPose::Open, Handedness::Left);
    let right = hand(HandPose::Fist, Handedness::Right);

    let left_only = f.spatial.measurements(&frame_of(vec![left.clone()]));
    let right_only = f.spatial.measurements(&frame_of(vec![right.clone()]));
    let both_frame = frame_of(vec![left, right]);
    let both = f.spatial.measurements(&both_frame);

    assert_eq!(both.len(), 2 * SpatialFeatures::MEASURED_FIELDS);
    // Palm distances of both hands come before any adjacent distance.
    assert_all_close(&both[0..5], &left_only[0..5], 1e-12);
    assert_all_close(&both[5..10], &right_only[0..5], 1e-12);

    // The vector keeps only the leading values; the count spans both hands.
    let vector = f.spatial.extract(&both_frame).unwrap().to_array();
    assert_all_close(
        &vector[..SpatialFeatures::MEASURED_FIELDS],
        &both[..SpatialFeatures::MEASURED_FIELDS],
        1e-12,
    );
    assert_eq!(vector[17], 5.0);
}
