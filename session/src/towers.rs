//! Authoritative tower state for both lane ends.

use lane_rush_core::{BattlefieldLayout, LanePoint, Side, Tuning};

/// Health and placement of a single tower.
///
/// The authoritative channel is only ever written by wholesale overwrites
/// from the server; local combat writes the predicted channel, which is
/// resynchronized on every overwrite.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TowerState {
    authoritative: f32,
    predicted: f32,
    position: LanePoint,
}

impl TowerState {
    fn new(health: f32, position: LanePoint) -> Self {
        Self {
            authoritative: health,
            predicted: health,
            position,
        }
    }

    pub(crate) fn authoritative(&self) -> f32 {
        self.authoritative
    }

    pub(crate) fn predicted(&self) -> f32 {
        self.predicted
    }

    pub(crate) fn position(&self) -> LanePoint {
        self.position
    }

    /// Applies an authoritative overwrite, clamped at zero, and resyncs the
    /// prediction. Returns the clamped value.
    pub(crate) fn overwrite(&mut self, health: f32) -> f32 {
        let clamped = health.max(0.0);
        self.authoritative = clamped;
        self.predicted = clamped;
        clamped
    }

    /// Records a locally simulated hit on the predicted channel only.
    pub(crate) fn absorb_predicted_hit(&mut self, power: f32) {
        self.predicted = (self.predicted - power).max(0.0);
    }
}

/// Both towers of a battle, indexed by owning side.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TowerPair {
    player: TowerState,
    enemy: TowerState,
}

impl TowerPair {
    pub(crate) fn new(tuning: &Tuning, layout: &BattlefieldLayout) -> Self {
        Self {
            player: TowerState::new(tuning.tower_health, layout.tower_position(Side::Player)),
            enemy: TowerState::new(tuning.tower_health, layout.tower_position(Side::Enemy)),
        }
    }

    pub(crate) fn get(&self, side: Side) -> &TowerState {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub(crate) fn get_mut(&mut self, side: Side) -> &mut TowerState {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}
