//! Stage
//!
//! Which hands are on screen, where they stand, and their idle spin.
//! The renderer mirrors this; nothing here touches a graphics context.

use std::f32::consts::PI;

use serde::{Serialize, Deserialize};

use super::hand::HandModel;
use crate::IDLE_SPIN_RATE;

/// Which player a hand belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left hand, facing the viewer
    User,
    /// Right hand, flipped 180 degrees about Y
    Opponent,
}

impl Side {
    /// Both sides, user first.
    pub const BOTH: [Side; 2] = [Side::User, Side::Opponent];

    /// Fixed placement for this side.
    pub fn placement(self) -> Placement {
        match self {
            Side::User => Placement {
                translation: [-4.0, 0.0, 0.0],
                scale: 0.8,
                yaw: 0.0,
            },
            Side::Opponent => Placement {
                translation: [4.0, 0.0, 0.0],
                scale: 0.8,
                yaw: PI,
            },
        }
    }

    /// Direction of the idle spin about Z.
    pub fn spin_direction(self) -> f32 {
        match self {
            Side::User => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

/// Where a hand sits in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// World position
    pub translation: [f32; 3],
    /// Uniform scale
    pub scale: f32,
    /// Rotation about Y (radians)
    pub yaw: f32,
}

/// A hand attached to the stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StagedHand {
    /// The posed model
    pub model: HandModel,
    /// Accumulated idle rotation about Z (radians)
    pub roll: f32,
}

/// The hands currently on screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    user: Option<StagedHand>,
    opponent: Option<StagedHand>,
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, side: Side) -> &Option<StagedHand> {
        match side {
            Side::User => &self.user,
            Side::Opponent => &self.opponent,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<StagedHand> {
        match side {
            Side::User => &mut self.user,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Put a hand on one side, replacing whatever was there.
    pub fn attach_hand(&mut self, model: HandModel, side: Side) {
        *self.slot_mut(side) = Some(StagedHand { model, roll: 0.0 });
    }

    /// Remove the hand on one side, returning it.
    pub fn detach_hand(&mut self, side: Side) -> Option<HandModel> {
        self.slot_mut(side).take().map(|staged| staged.model)
    }

    /// The hand on one side.
    pub fn hand(&self, side: Side) -> Option<&StagedHand> {
        self.slot(side).as_ref()
    }

    /// Number of attached hands.
    pub fn attached_count(&self) -> usize {
        Side::BOTH.iter().filter(|side| self.slot(**side).is_some()).count()
    }

    /// Advance the idle animation.
    ///
    /// Hands spin in opposite directions while no turn is in flight and
    /// hold still otherwise.
    pub fn idle_step(&mut self, dt: f32, active: bool) {
        if !active {
            return;
        }
        for side in Side::BOTH {
            if let Some(staged) = self.slot_mut(side) {
                staged.roll += side.spin_direction() * IDLE_SPIN_RATE * dt;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::hand::{USER_HAND_COLOR, OPPONENT_HAND_COLOR};

    fn staged_pair() -> Stage {
        let mut stage = Stage::new();
        stage.attach_hand(HandModel::build(USER_HAND_COLOR).unwrap(), Side::User);
        stage.attach_hand(HandModel::build(OPPONENT_HAND_COLOR).unwrap(), Side::Opponent);
        stage
    }

    #[test]
    fn test_placements() {
        let user = Side::User.placement();
        let opponent = Side::Opponent.placement();

        assert_eq!(user.translation, [-4.0, 0.0, 0.0]);
        assert_eq!(opponent.translation, [4.0, 0.0, 0.0]);
        assert_eq!(user.scale, 0.8);
        assert_eq!(opponent.scale, 0.8);
        assert_eq!(user.yaw, 0.0);
        assert_eq!(opponent.yaw, PI);
    }

    #[test]
    fn test_attach_detach() {
        let mut stage = staged_pair();
        assert_eq!(stage.attached_count(), 2);

        let removed = stage.detach_hand(Side::User).unwrap();
        assert_eq!(removed.color, USER_HAND_COLOR);
        assert!(stage.hand(Side::User).is_none());
        assert!(stage.detach_hand(Side::User).is_none());
        assert_eq!(stage.attached_count(), 1);

        let removed = stage.detach_hand(Side::Opponent).unwrap();
        assert_eq!(removed.color, OPPONENT_HAND_COLOR);
        assert_eq!(stage.attached_count(), 0);
    }

    #[test]
    fn test_idle_spin_opposite_directions() {
        let mut stage = staged_pair();
        stage.idle_step(1.0, true);

        let user_roll = stage.hand(Side::User).unwrap().roll;
        let opponent_roll = stage.hand(Side::Opponent).unwrap().roll;
        assert!((user_roll - IDLE_SPIN_RATE).abs() < 1e-6);
        assert!((opponent_roll + IDLE_SPIN_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_no_spin_during_turn() {
        let mut stage = staged_pair();
        stage.idle_step(1.0, false);
        assert_eq!(stage.hand(Side::User).unwrap().roll, 0.0);
        assert_eq!(stage.hand(Side::Opponent).unwrap().roll, 0.0);
    }

    #[test]
    fn test_reattach_resets_roll() {
        let mut stage = staged_pair();
        stage.idle_step(2.0, true);
        stage.attach_hand(HandModel::build(USER_HAND_COLOR).unwrap(), Side::User);
        assert_eq!(stage.hand(Side::User).unwrap().roll, 0.0);
    }
}
