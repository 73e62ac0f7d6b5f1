use crate::device_sensor::frame::{Bone, BoneType, Finger, FingerType, Frame, Hand, Handedness};
use crate::device_sensor::interface::DeviceSensor;
use crate::error::BoxError;
use crate::library::logger::interface::Logger;
use nalgebra::{IsometryMatrix3, Point3, Rotation3, Translation3, Vector3};
use rand::Rng;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPose {
    Open,
    Fist,
    Point,
    Pinch,
    Victory,
}

impl HandPose {
    pub const ALL: [HandPose; 5] = [
        HandPose::Open,
        HandPose::Fist,
        HandPose::Point,
        HandPose::Pinch,
        HandPose::Victory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HandPose::Open => "open",
            HandPose::Fist => "fist",
            HandPose::Point => "point",
            HandPose::Pinch => "pinch",
            HandPose::Victory => "victory",
        }
    }

    pub fn from_name(name: &str) -> Option<HandPose> {
        HandPose::ALL
            .into_iter()
            .find(|pose| pose.name().eq_ignore_ascii_case(name))
    }

    /// Flexion per joint in radians, thumb to pinky.
    fn curls(&self) -> [f64; 5] {
        match self {
            HandPose::Open => [0.05, 0.05, 0.05, 0.05, 0.05],
            HandPose::Fist => [0.9, 1.4, 1.4, 1.4, 1.4],
            HandPose::Point => [0.9, 0.05, 1.4, 1.4, 1.4],
            HandPose::Pinch => [0.5, 0.7, 0.1, 0.1, 0.1],
            HandPose::Victory => [0.9, 0.05, 0.05, 1.4, 1.4],
        }
    }

    fn sphere_radius(&self) -> f64 {
        match self {
            HandPose::Open => 110.0,
            HandPose::Fist => 38.0,
            HandPose::Point => 55.0,
            HandPose::Pinch => 70.0,
            HandPose::Victory => 60.0,
        }
    }

    fn pinch_strength(&self) -> f64 {
        match self {
            HandPose::Pinch => 0.95,
            HandPose::Fist => 0.6,
            _ => 0.0,
        }
    }

    fn grab_strength(&self) -> f64 {
        match self {
            HandPose::Fist => 1.0,
            HandPose::Point => 0.7,
            HandPose::Victory => 0.5,
            HandPose::Pinch => 0.2,
            HandPose::Open => 0.0,
        }
    }
}

const EXTENDED_CURL: f64 = 0.3;

// Knuckle offset across the palm (mm), knuckle offset toward the fingers (mm),
// splay (radians, toward the thumb side) and bone lengths wrist to tip.
const FINGER_LAYOUT: [(f64, f64, f64, [f64; 4]); 5] = [
    (-45.0, -10.0, 0.8, [20.0, 40.0, 30.0, 22.0]),
    (-22.0, -55.0, 0.08, [65.0, 40.0, 25.0, 18.0]),
    (0.0, -58.0, 0.0, [62.0, 45.0, 28.0, 19.0]),
    (20.0, -55.0, -0.08, [58.0, 42.0, 27.0, 18.0]),
    (38.0, -48.0, -0.16, [53.0, 33.0, 20.0, 17.0]),
];

/// Builds a palm-down hand in `pose`, fingers pointing away from the user
/// (-z), with the palm at `palm_position`.
pub fn synthetic_hand(
    pose: HandPose,
    handedness: Handedness,
    palm_position: Vector3<f64>,
) -> Hand {
    synthetic_hand_with_curls(pose, pose.curls(), handedness, palm_position)
}

pub fn synthetic_hand_with_curls(
    pose: HandPose,
    curls: [f64; 5],
    handedness: Handedness,
    palm_position: Vector3<f64>,
) -> Hand {
    let palm_normal = -Vector3::y();
    let direction = -Vector3::z();

    let mut hand = Hand {
        id: match handedness {
            Handedness::Left => 1,
            Handedness::Right => 2,
        },
        handedness,
        palm_position,
        palm_normal,
        direction,
        sphere_radius: pose.sphere_radius(),
        pinch_strength: pose.pinch_strength(),
        grab_strength: pose.grab_strength(),
        fingers: Vec::new(),
    };

    // Local layout is written for a right hand; the mirrored hand basis puts
    // a left thumb on the other side.
    let to_world = IsometryMatrix3::from_parts(Translation3::from(palm_position), hand.basis());
    let to_world_point = |v: Vector3<f64>| to_world.transform_point(&Point3::from(v)).coords;
    let palm_side = -Vector3::y();

    hand.fingers = FingerType::ALL
        .iter()
        .zip(FINGER_LAYOUT.iter())
        .zip(curls.iter())
        .map(|((&finger_type, &(across, forward, splay, lengths)), &curl)| {
            let heading = Vector3::new(-splay.sin(), 0.0, -splay.cos());
            let lateral = palm_side.cross(&heading).normalize();
            let knuckle = Vector3::new(across, 0.0, forward);
            let wrist_joint = knuckle - heading * lengths[0];

            let mut bones = Vec::with_capacity(4);
            let mut joint = wrist_joint;
            for (index, &bone_type) in BoneType::ALL.iter().enumerate() {
                let flexion = curl * index as f64;
                let bone_direction = heading * flexion.cos() + palm_side * flexion.sin();
                let next_joint = joint + bone_direction * lengths[index];
                let z = -bone_direction;
                let y = z.cross(&lateral);
                bones.push(Bone {
                    bone_type,
                    prev_joint: to_world_point(joint),
                    next_joint: to_world_point(next_joint),
                    basis: to_world.rotation * Rotation3::from_basis_unchecked(&[lateral, y, z]),
                });
                joint = next_joint;
            }

            let distal_direction = bones[3].direction();
            Finger {
                finger_type,
                tip_position: bones[3].next_joint,
                direction: distal_direction,
                is_extended: curl < EXTENDED_CURL,
                bones,
            }
        })
        .collect();

    hand
}

pub fn synthetic_frame(id: i64, poses: &[(HandPose, Handedness)]) -> Frame {
    let hands = poses
        .iter()
        .enumerate()
        .map(|(index, &(pose, handedness))| {
            let offset = index as f64 * 160.0 - 80.0 * (poses.len() as f64 - 1.0);
            synthetic_hand(pose, handedness, Vector3::new(offset, 200.0, 0.0))
        })
        .collect();
    Frame::new(id, hands)
}

/// Replays a repeating script of poses. `None` entries produce frames with no
/// hands. Curls get uniform jitter of up to `jitter` radians.
pub struct DeviceSensorFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Vec<Option<HandPose>>,
    handedness: Handedness,
    jitter: f64,
    cursor: AtomicUsize,
    next_frame_id: AtomicI64,
}

impl DeviceSensorFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let mut script: Vec<Option<HandPose>> = HandPose::ALL.into_iter().map(Some).collect();
        script.push(None);
        Self::with_script(logger, script, 0.05)
    }

    pub fn with_script(
        logger: Arc<dyn Logger + Send + Sync>,
        script: Vec<Option<HandPose>>,
        jitter: f64,
    ) -> Self {
        Self {
            logger: logger.with_namespace("sensor").with_namespace("fake"),
            script,
            handedness: Handedness::Right,
            jitter,
            cursor: AtomicUsize::new(0),
            next_frame_id: AtomicI64::new(1),
        }
    }

    pub fn holding(logger: Arc<dyn Logger + Send + Sync>, pose: HandPose, jitter: f64) -> Self {
        Self::with_script(logger, vec![Some(pose)], jitter)
    }
}

impl DeviceSensor for DeviceSensorFake {
    fn frame(&self) -> Result<Frame, BoxError> {
        let id = self.next_frame_id.fetch_add(1, Ordering::SeqCst);

        if self.script.is_empty() {
            return Ok(Frame::new(id, vec![]));
        }

        let step = self.cursor.fetch_add(1, Ordering::SeqCst) % self.script.len();
        let pose = match self.script[step] {
            Some(pose) => pose,
            None => {
                self.logger.info(&format!("Frame {}: no hands", id))?;
                return Ok(Frame::new(id, vec![]));
            }
        };

        let mut curls = pose.curls();
        if self.jitter > 0.0 {
            let mut rng = rand::rng();
            for curl in curls.iter_mut() {
                *curl = (*curl + rng.random_range(-self.jitter..=self.jitter)).max(0.0);
            }
        }

        let hand = synthetic_hand_with_curls(
            pose,
            curls,
            self.handedness,
            Vector3::new(0.0, 200.0, 0.0),
        );
        self.logger
            .info(&format!("Frame {}: {} hand", id, pose.name()))?;

        Ok(Frame::new(id, vec![hand]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_memory::LoggerMemory;

    #[test]
    fn test_open_hand_extends_every_finger() {
        let frame = synthetic_frame(1, &[(HandPose::Open, Handedness::Right)]);
        assert_eq!(frame.extended_finger_count(), 5);
    }

    #[test]
    fn test_fist_extends_no_fingers() {
        let frame = synthetic_frame(1, &[(HandPose::Fist, Handedness::Right)]);
        assert_eq!(frame.extended_finger_count(), 0);
    }

    #[test]
    fn test_tip_is_end_of_distal_bone() {
        let hand = synthetic_hand(HandPose::Point, Handedness::Left, Vector3::zeros());
        for finger in &hand.fingers {
            let distal = finger.bone(BoneType::Distal).unwrap();
            assert_eq!(finger.tip_position, distal.next_joint);
            assert!((distal.direction().norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_left_thumb_sits_on_the_other_side() {
        let right = synthetic_hand(HandPose::Open, Handedness::Right, Vector3::zeros());
        let left = synthetic_hand(HandPose::Open, Handedness::Left, Vector3::zeros());
        assert!(right.fingers[0].tip_position.x < 0.0);
        assert!(left.fingers[0].tip_position.x > 0.0);
    }

    #[test]
    fn test_script_repeats_with_empty_frames() {
        let sensor = DeviceSensorFake::with_script(
            Arc::new(LoggerMemory::new()),
            vec![Some(HandPose::Fist), None],
            0.0,
        );

        assert!(sensor.frame().unwrap().has_hands());
        assert!(!sensor.frame().unwrap().has_hands());
        assert!(sensor.frame().unwrap().has_hands());
    }
}
