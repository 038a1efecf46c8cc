//! Procedural Hand Model
//!
//! A hand is a palm box with four fingers, each a chain of three cylinder
//! segments. Gestures only ever rotate the root joint of each finger about
//! the X axis, so a pose is just four angles.
//!
//! ```text
//!        seg2  seg2  seg2  seg2
//!        seg1  seg1  seg1  seg1
//!        seg0  seg0  seg0  seg0     <- finger roots (posed joints)
//!      ┌───────────────────────┐
//!      │         palm          │
//!      └───────────────────────┘
//! ```

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::choice::Choice;

/// Number of fingers on a hand.
pub const FINGER_COUNT: usize = 4;

/// Number of segments per finger.
pub const SEGMENTS_PER_FINGER: usize = 3;

/// Root joint angle of a curled finger (radians about X).
pub const CURL_ANGLE: f32 = 1.5;

/// Root joint angle of an extended finger (radians about X).
pub const EXTEND_ANGLE: f32 = -0.4;

/// Root joint angles, one per finger.
pub type HandPose = [f32; FINGER_COUNT];

/// Pose for a gesture.
pub fn pose_for(choice: Choice) -> HandPose {
    match choice {
        Choice::Rock => [CURL_ANGLE; FINGER_COUNT],
        Choice::Paper => [EXTEND_ANGLE; FINGER_COUNT],
        Choice::Scissors => [EXTEND_ANGLE, EXTEND_ANGLE, CURL_ANGLE, CURL_ANGLE],
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandColor(pub u32);

/// Pink, the user's hand.
pub const USER_HAND_COLOR: HandColor = HandColor(0xff6b9d);

/// Cyan, the opponent's hand.
pub const OPPONENT_HAND_COLOR: HandColor = HandColor(0x00ffff);

impl HandColor {
    /// Red, green and blue channels.
    pub fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Check the value fits in 24 bits.
    pub fn is_valid(self) -> bool {
        self.0 <= 0xff_ffff
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Hand construction failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandError {
    /// Palm box has a non-positive or non-finite extent
    #[error("invalid palm size {0:?}")]
    InvalidPalm([f32; 3]),

    /// Finger segment has a non-positive or non-finite dimension
    #[error("invalid finger segment (radius {radius}, length {length})")]
    InvalidSegment {
        /// Cylinder radius
        radius: f32,
        /// Cylinder length
        length: f32,
    },

    /// Color does not fit in 24 bits
    #[error("invalid hand color {0:#x}")]
    InvalidColor(u32),
}

// =============================================================================
// BLUEPRINT
// =============================================================================

/// Dimensions used to build a hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandBlueprint {
    /// Palm box extents (width, height, depth)
    pub palm_size: [f32; 3],
    /// X offset of each finger root from the palm center
    pub finger_root_x: [f32; FINGER_COUNT],
    /// Y offset of the finger roots from the palm center
    pub finger_root_y: f32,
    /// Segment cylinder radius
    pub segment_radius: f32,
    /// Segment cylinder length
    pub segment_length: f32,
    /// Radial subdivisions of each segment cylinder
    pub segment_resolution: u32,
}

impl Default for HandBlueprint {
    fn default() -> Self {
        Self {
            palm_size: [1.2, 1.5, 0.3],
            finger_root_x: [-0.3, -0.1, 0.1, 0.3],
            finger_root_y: 0.9,
            segment_radius: 0.12,
            segment_length: 0.35,
            segment_resolution: 8,
        }
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl HandBlueprint {
    /// Check every dimension is usable.
    pub fn validate(&self) -> Result<(), HandError> {
        if !self.palm_size.iter().all(|v| positive(*v)) {
            return Err(HandError::InvalidPalm(self.palm_size));
        }
        if !positive(self.segment_radius) || !positive(self.segment_length) {
            return Err(HandError::InvalidSegment {
                radius: self.segment_radius,
                length: self.segment_length,
            });
        }
        Ok(())
    }

    /// Build an unposed hand from this blueprint.
    pub fn build(&self, color: HandColor) -> Result<HandModel, HandError> {
        if !color.is_valid() {
            return Err(HandError::InvalidColor(color.0));
        }
        self.validate()?;

        let fingers = self.finger_root_x.map(|x| {
            // Each segment hangs off its parent, so only the first sits at the root
            let segments = std::array::from_fn(|i| Segment {
                offset: if i == 0 { [0.0; 3] } else { [0.0, self.segment_length, 0.0] },
                radius: self.segment_radius,
                length: self.segment_length,
            });

            Finger {
                root_offset: [x, self.finger_root_y, 0.0],
                segments,
                curl: 0.0,
            }
        });

        Ok(HandModel {
            color,
            palm_size: self.palm_size,
            segment_resolution: self.segment_resolution,
            fingers,
        })
    }
}

// =============================================================================
// MODEL
// =============================================================================

/// One cylinder of a finger chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Translation relative to the parent (finger root or previous segment)
    pub offset: [f32; 3],
    /// Cylinder radius
    pub radius: f32,
    /// Cylinder length
    pub length: f32,
}

/// A finger: root joint plus its segment chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finger {
    /// Root joint position relative to the palm center
    pub root_offset: [f32; 3],
    /// Segments, parent first
    pub segments: [Segment; SEGMENTS_PER_FINGER],
    /// Root joint rotation about X (radians)
    pub curl: f32,
}

/// A complete hand with its current pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandModel {
    /// Material color
    pub color: HandColor,
    /// Palm box extents
    pub palm_size: [f32; 3],
    /// Radial subdivisions of each segment cylinder
    pub segment_resolution: u32,
    /// Fingers, indexed 0-3 from left to right
    pub fingers: [Finger; FINGER_COUNT],
}

impl HandModel {
    /// Build an unposed hand with the default blueprint.
    pub fn build(color: HandColor) -> Result<Self, HandError> {
        HandBlueprint::default().build(color)
    }

    /// Current root joint angles.
    pub fn pose(&self) -> HandPose {
        self.fingers.each_ref().map(|f| f.curl)
    }

    /// Set root joint angles directly.
    pub fn set_pose(&mut self, pose: HandPose) {
        for (finger, angle) in self.fingers.iter_mut().zip(pose) {
            finger.curl = angle;
        }
    }

    /// Pose the hand for a gesture.
    pub fn apply_pose(&mut self, choice: Choice) {
        self.set_pose(pose_for(choice));
    }

    /// Pose the hand from a gesture name.
    ///
    /// Unknown names leave the hand untouched and return `false`.
    pub fn apply_named_pose(&mut self, name: &str) -> bool {
        match name.parse::<Choice>() {
            Ok(choice) => {
                self.apply_pose(choice);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_structure() {
        let hand = HandModel::build(USER_HAND_COLOR).unwrap();

        assert_eq!(hand.color, USER_HAND_COLOR);
        assert_eq!(hand.palm_size, [1.2, 1.5, 0.3]);
        assert_eq!(hand.fingers.len(), FINGER_COUNT);
        assert_eq!(hand.pose(), [0.0; FINGER_COUNT]);

        for (finger, x) in hand.fingers.iter().zip([-0.3, -0.1, 0.1, 0.3]) {
            assert_eq!(finger.root_offset, [x, 0.9, 0.0]);
            assert_eq!(finger.segments.len(), SEGMENTS_PER_FINGER);
            assert_eq!(finger.segments[0].offset, [0.0; 3]);
            assert_eq!(finger.segments[1].offset, [0.0, 0.35, 0.0]);
            assert_eq!(finger.segments[2].offset, [0.0, 0.35, 0.0]);
        }
    }

    #[test]
    fn test_rock_pose() {
        let mut hand = HandModel::build(USER_HAND_COLOR).unwrap();
        hand.apply_pose(Choice::Rock);
        assert_eq!(hand.pose(), [1.5, 1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_paper_pose() {
        let mut hand = HandModel::build(USER_HAND_COLOR).unwrap();
        hand.apply_pose(Choice::Paper);
        assert_eq!(hand.pose(), [-0.4, -0.4, -0.4, -0.4]);
    }

    #[test]
    fn test_scissors_pose() {
        let mut hand = HandModel::build(OPPONENT_HAND_COLOR).unwrap();
        hand.apply_pose(Choice::Scissors);
        assert_eq!(hand.pose(), [-0.4, -0.4, 1.5, 1.5]);
    }

    #[test]
    fn test_pose_only_touches_root_joints() {
        let mut hand = HandModel::build(USER_HAND_COLOR).unwrap();
        let before = hand.clone();
        hand.apply_pose(Choice::Scissors);

        for (posed, original) in hand.fingers.iter().zip(before.fingers.iter()) {
            assert_eq!(posed.root_offset, original.root_offset);
            assert_eq!(posed.segments, original.segments);
        }
    }

    #[test]
    fn test_unknown_gesture_is_noop() {
        let mut hand = HandModel::build(USER_HAND_COLOR).unwrap();
        hand.apply_pose(Choice::Paper);
        let before = hand.clone();

        assert!(!hand.apply_named_pose("lizard"));
        assert_eq!(hand, before);

        assert!(hand.apply_named_pose("rock"));
        assert_eq!(hand.pose(), pose_for(Choice::Rock));
    }

    #[test]
    fn test_invalid_blueprints() {
        let mut blueprint = HandBlueprint::default();
        blueprint.palm_size[1] = 0.0;
        assert!(matches!(blueprint.build(USER_HAND_COLOR), Err(HandError::InvalidPalm(_))));

        let mut blueprint = HandBlueprint::default();
        blueprint.segment_length = f32::NAN;
        assert!(matches!(blueprint.build(USER_HAND_COLOR), Err(HandError::InvalidSegment { .. })));

        assert_eq!(
            HandModel::build(HandColor(0x1_000000)),
            Err(HandError::InvalidColor(0x1_000000))
        );
    }

    #[test]
    fn test_color_channels() {
        assert_eq!(USER_HAND_COLOR.rgb(), [0xff, 0x6b, 0x9d]);
        assert_eq!(OPPONENT_HAND_COLOR.rgb(), [0x00, 0xff, 0xff]);
    }
}
