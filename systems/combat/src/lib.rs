#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that plans one engagement step per unit per tick.
//!
//! The planner works from an immutable start-of-tick snapshot and emits
//! exactly one command per living unit: advance the melee accumulator
//! against the nearest opposing unit, assault the opposing tower on contact,
//! or take a movement step. The session validates and applies those
//! commands, so a roster mutated by a mid-tick kill can never corrupt the
//! planning pass. All player-owned units are planned before all enemy-owned
//! units, and distance ties resolve to the first roster entry scanned, which
//! keeps simultaneous kills deterministic.

use lane_rush_core::{Command, Event, LanePoint, Side, Tuning, UnitId, UnitView};

/// Combat planner that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct Combat {
    player_scratch: Vec<Combatant>,
    enemy_scratch: Vec<Combatant>,
}

impl Combat {
    /// Creates a new combat planner with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes session events and the current unit snapshot to emit one
    /// engagement command per unit.
    ///
    /// Planning only runs for ticks: without a [`Event::TimeAdvanced`] entry
    /// (or after a terminal [`Event::MatchEnded`]) the call is silent.
    pub fn handle(
        &mut self,
        events: &[Event],
        units: &UnitView,
        player_tower: LanePoint,
        enemy_tower: LanePoint,
        tuning: &Tuning,
        out: &mut Vec<Command>,
    ) {
        let mut ticked = false;
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => ticked = true,
                Event::MatchEnded { .. } => return,
                _ => {}
            }
        }
        if !ticked {
            return;
        }

        self.prepare_scratch(units);

        for unit in &self.player_scratch {
            out.push(plan_step(*unit, &self.enemy_scratch, enemy_tower, tuning));
        }
        for unit in &self.enemy_scratch {
            out.push(plan_step(*unit, &self.player_scratch, player_tower, tuning));
        }
    }

    fn prepare_scratch(&mut self, units: &UnitView) {
        self.player_scratch.clear();
        self.enemy_scratch.clear();

        for snapshot in units.iter() {
            let combatant = Combatant {
                id: snapshot.id,
                position: snapshot.position,
                size: snapshot.archetype.size,
            };
            match snapshot.side {
                Side::Player => self.player_scratch.push(combatant),
                Side::Enemy => self.enemy_scratch.push(combatant),
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Combatant {
    id: UnitId,
    position: LanePoint,
    size: f32,
}

/// Plans the single engagement step for one unit.
fn plan_step(
    unit: Combatant,
    opponents: &[Combatant],
    opposing_tower: LanePoint,
    tuning: &Tuning,
) -> Command {
    if let Some(nearest) = nearest_opponent(unit.position, opponents) {
        let reach = (unit.size + nearest.size) * tuning.engage_scale;
        if unit.position.distance_to(nearest.position) <= reach {
            return Command::EngageUnit {
                attacker: unit.id,
                victim: nearest.id,
            };
        }
    }

    let tower_gap = unit.position.distance_to(opposing_tower) - unit.size * tuning.engage_scale;
    if tower_gap < tuning.tower_range_slack {
        return Command::AssaultTower { attacker: unit.id };
    }

    Command::AdvanceUnit { unit: unit.id }
}

/// Scans the opposing roster for the closest combatant. Strict comparison:
/// the first-scanned minimum wins distance ties.
fn nearest_opponent(position: LanePoint, opponents: &[Combatant]) -> Option<Combatant> {
    let mut best: Option<(f32, Combatant)> = None;
    for candidate in opponents {
        let distance = position.distance_to(candidate.position);
        match &mut best {
            Some((best_distance, best_candidate)) => {
                if distance < *best_distance {
                    *best_distance = distance;
                    *best_candidate = *candidate;
                }
            }
            None => best = Some((distance, *candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}
