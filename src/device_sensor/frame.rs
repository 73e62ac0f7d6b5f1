use nalgebra::{IsometryMatrix3, Point3, Rotation3, Translation3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FingerType {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerType {
    /// Thumb to pinky, the order the tracker reports fingers in.
    pub const ALL: [FingerType; 5] = [
        FingerType::Thumb,
        FingerType::Index,
        FingerType::Middle,
        FingerType::Ring,
        FingerType::Pinky,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneType {
    Metacarpal,
    Proximal,
    Intermediate,
    Distal,
}

impl BoneType {
    /// Wrist to tip.
    pub const ALL: [BoneType; 4] = [
        BoneType::Metacarpal,
        BoneType::Proximal,
        BoneType::Intermediate,
        BoneType::Distal,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub bone_type: BoneType,
    pub prev_joint: Vector3<f64>,
    pub next_joint: Vector3<f64>,
    /// Columns are the bone's x, y and z axes; z points from the tip back
    /// toward the wrist, as the tracker reports it.
    pub basis: Rotation3<f64>,
}

impl Bone {
    pub fn x_axis(&self) -> Vector3<f64> {
        self.basis.matrix().column(0).into_owned()
    }

    pub fn direction(&self) -> Vector3<f64> {
        -self.basis.matrix().column(2).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finger {
    pub finger_type: FingerType,
    pub tip_position: Vector3<f64>,
    pub direction: Vector3<f64>,
    pub is_extended: bool,
    /// Metacarpal, proximal, intermediate, distal.
    pub bones: Vec<Bone>,
}

impl Finger {
    pub fn bone(&self, bone_type: BoneType) -> Option<&Bone> {
        self.bones.iter().find(|bone| bone.bone_type == bone_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub id: i32,
    pub handedness: Handedness,
    pub palm_position: Vector3<f64>,
    pub palm_normal: Vector3<f64>,
    pub direction: Vector3<f64>,
    pub sphere_radius: f64,
    pub pinch_strength: f64,
    pub grab_strength: f64,
    /// Thumb to pinky.
    pub fingers: Vec<Finger>,
}

impl Hand {
    pub fn is_left(&self) -> bool {
        self.handedness == Handedness::Left
    }

    fn across(&self) -> Vector3<f64> {
        self.palm_normal
            .cross(&self.direction)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// x runs across the palm (mirrored for a left hand), y out of the back
    /// of the hand and z from the fingers toward the wrist.
    pub fn basis(&self) -> Rotation3<f64> {
        let x = if self.is_left() {
            -self.across()
        } else {
            self.across()
        };
        Rotation3::from_basis_unchecked(&[x, -self.palm_normal, -self.direction])
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.basis().matrix().column(0).into_owned()
    }

    /// World-to-hand transform. Hand space has its origin at the palm with
    /// x = normal × direction, y = -normal and z = -direction.
    pub fn world_to_hand(&self) -> IsometryMatrix3<f64> {
        let rotation =
            Rotation3::from_basis_unchecked(&[self.across(), -self.palm_normal, -self.direction]);
        IsometryMatrix3::from_parts(Translation3::from(self.palm_position), rotation).inverse()
    }

    pub fn finger(&self, finger_type: FingerType) -> Option<&Finger> {
        self.fingers
            .iter()
            .find(|finger| finger.finger_type == finger_type)
    }

    /// Applies a rigid transform to every position, direction and basis.
    pub fn transformed(&self, transform: &IsometryMatrix3<f64>) -> Hand {
        let point = |v: &Vector3<f64>| transform.transform_point(&Point3::from(*v)).coords;

        let fingers = self
            .fingers
            .iter()
            .map(|finger| Finger {
                finger_type: finger.finger_type,
                tip_position: point(&finger.tip_position),
                direction: transform.transform_vector(&finger.direction),
                is_extended: finger.is_extended,
                bones: finger
                    .bones
                    .iter()
                    .map(|bone| Bone {
                        bone_type: bone.bone_type,
                        prev_joint: point(&bone.prev_joint),
                        next_joint: point(&bone.next_joint),
                        basis: transform.rotation * bone.basis,
                    })
                    .collect(),
            })
            .collect();

        Hand {
            palm_position: point(&self.palm_position),
            palm_normal: transform.transform_vector(&self.palm_normal),
            direction: transform.transform_vector(&self.direction),
            fingers,
            ..self.clone()
        }
    }

    /// Scales every position and the sphere radius about the world origin.
    pub fn scaled(&self, factor: f64) -> Hand {
        let fingers = self
            .fingers
            .iter()
            .map(|finger| Finger {
                tip_position: finger.tip_position * factor,
                bones: finger
                    .bones
                    .iter()
                    .map(|bone| Bone {
                        prev_joint: bone.prev_joint * factor,
                        next_joint: bone.next_joint * factor,
                        ..bone.clone()
                    })
                    .collect(),
                ..finger.clone()
            })
            .collect();

        Hand {
            palm_position: self.palm_position * factor,
            sphere_radius: self.sphere_radius * factor,
            fingers,
            ..self.clone()
        }
    }
}

/// One snapshot of tracked hands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub id: i64,
    pub hands: Vec<Hand>,
}

impl Frame {
    pub fn new(id: i64, hands: Vec<Hand>) -> Self {
        Self { id, hands }
    }

    pub fn has_hands(&self) -> bool {
        !self.hands.is_empty()
    }

    /// Extended fingers across every hand in the frame.
    pub fn extended_finger_count(&self) -> usize {
        self.hands
            .iter()
            .flat_map(|hand| hand.fingers.iter())
            .filter(|finger| finger.is_extended)
            .count()
    }
}
