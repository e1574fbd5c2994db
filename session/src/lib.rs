#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative match session state for Lane Rush.
//!
//! The [`MatchSession`] aggregate owns every piece of mutable battle state:
//! both rosters, both towers, the local economy, the drawn hand, and the
//! match lifecycle. All mutation flows through [`apply`], which executes one
//! [`Command`] and appends the resulting [`Event`]s; read access flows
//! through the [`query`] module. Once the match reaches a terminal state the
//! session absorbs every further simulation command as a no-op.

use std::{sync::Arc, time::Duration};

use lane_rush_core::{
    BattlefieldLayout, Command, Event, LanePoint, MatchState, Side, SpendRejection, Tuning,
    UnitArchetype, UnitId,
};

mod towers;

use towers::TowerPair;

/// Attack accumulator value at which a hit lands.
const ATTACK_READY: f32 = 100.0;

#[derive(Clone, Debug)]
struct UnitInstance {
    id: UnitId,
    side: Side,
    archetype: Arc<UnitArchetype>,
    position: LanePoint,
    health: f32,
    attack_progress: f32,
    animation_phase: f32,
}

impl UnitInstance {
    fn admitted(id: UnitId, side: Side, archetype: Arc<UnitArchetype>, position: LanePoint) -> Self {
        let health = archetype.health;
        Self {
            id,
            side,
            archetype,
            position,
            health,
            attack_progress: 0.0,
            animation_phase: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct HandSlot {
    archetype: Arc<UnitArchetype>,
    cooldown: Duration,
    started_at: Duration,
}

/// Represents the authoritative state of one battle client session.
#[derive(Clone, Debug)]
pub struct MatchSession {
    state: MatchState,
    tuning: Tuning,
    clock: Duration,
    player_name: Option<String>,
    opponent_name: Option<String>,
    hand: Vec<HandSlot>,
    balance: u32,
    next_unit_id: u32,
    player_roster: Vec<UnitInstance>,
    enemy_roster: Vec<UnitInstance>,
    towers: TowerPair,
}

impl MatchSession {
    /// Creates a new session waiting in the lobby.
    #[must_use]
    pub fn new(tuning: Tuning, layout: BattlefieldLayout) -> Self {
        let balance = tuning.starting_balance;
        Self {
            state: MatchState::Lobby,
            towers: TowerPair::new(&tuning, &layout),
            tuning,
            clock: Duration::ZERO,
            player_name: None,
            opponent_name: None,
            hand: Vec::new(),
            balance,
            next_unit_id: 0,
            player_roster: Vec::new(),
            enemy_roster: Vec::new(),
        }
    }

    fn roster(&self, side: Side) -> &[UnitInstance] {
        match side {
            Side::Player => &self.player_roster,
            Side::Enemy => &self.enemy_roster,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Vec<UnitInstance> {
        match side {
            Side::Player => &mut self.player_roster,
            Side::Enemy => &mut self.enemy_roster,
        }
    }

    fn find_unit(&self, id: UnitId) -> Option<(Side, usize)> {
        if let Some(index) = self.player_roster.iter().position(|unit| unit.id == id) {
            return Some((Side::Player, index));
        }
        self.enemy_roster
            .iter()
            .position(|unit| unit.id == id)
            .map(|index| (Side::Enemy, index))
    }

    fn slot_remaining(&self, slot: &HandSlot) -> Duration {
        let elapsed = self.clock.saturating_sub(slot.started_at);
        slot.cooldown.saturating_sub(elapsed)
    }

    fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id = self.next_unit_id.wrapping_add(1);
        id
    }

    fn resolve_spawn(&mut self, slot: usize, out_events: &mut Vec<Event>) {
        let Some(hand_slot) = self.hand.get(slot) else {
            return;
        };

        if !self.slot_remaining(hand_slot).is_zero() {
            out_events.push(Event::SpawnRejected {
                slot,
                reason: SpendRejection::OnCooldown,
            });
            return;
        }

        let cost = hand_slot.archetype.cost;
        if self.balance < cost {
            out_events.push(Event::SpawnRejected {
                slot,
                reason: SpendRejection::InsufficientFunds,
            });
            return;
        }

        self.balance -= cost;
        let clock = self.clock;
        let hand_slot = &mut self.hand[slot];
        hand_slot.started_at = clock;
        out_events.push(Event::SpawnCommitted {
            slot,
            name: hand_slot.archetype.name.clone(),
            cost,
            balance: self.balance,
        });
    }

    fn resolve_engagement(&mut self, attacker: UnitId, victim: UnitId, out_events: &mut Vec<Event>) {
        let Some((attacker_side, attacker_index)) = self.find_unit(attacker) else {
            return;
        };
        let victim_side = attacker_side.opponent();
        let Some(victim_index) = self
            .roster(victim_side)
            .iter()
            .position(|unit| unit.id == victim)
        else {
            return;
        };

        let Some(power) = self.advance_attack(attacker_side, attacker_index) else {
            return;
        };

        let remaining = {
            let victim_unit = &mut self.roster_mut(victim_side)[victim_index];
            victim_unit.health -= power;
            victim_unit.health
        };
        out_events.push(Event::UnitStruck {
            attacker,
            victim,
            power,
            remaining,
        });

        if remaining <= 0.0 {
            let removed = self.roster_mut(victim_side).remove(victim_index);
            let bounty = if attacker_side == Side::Player {
                removed.archetype.cost / self.tuning.reward_divisor
            } else {
                0
            };
            if bounty > 0 {
                self.balance = self.balance.saturating_add(bounty);
            }
            out_events.push(Event::UnitKilled {
                victim,
                side: victim_side,
                bounty,
            });
        }
    }

    fn resolve_tower_assault(&mut self, attacker: UnitId, out_events: &mut Vec<Event>) {
        let Some((attacker_side, attacker_index)) = self.find_unit(attacker) else {
            return;
        };

        let Some(power) = self.advance_attack(attacker_side, attacker_index) else {
            return;
        };

        let target = attacker_side.opponent();
        self.towers.get_mut(target).absorb_predicted_hit(power);
        out_events.push(Event::TowerStruck {
            tower: target,
            power,
        });
    }

    /// Advances one unit's attack accumulator, returning the hit power when
    /// the accumulator fills and resets.
    fn advance_attack(&mut self, side: Side, index: usize) -> Option<f32> {
        let divisor = self.tuning.cooldown_divisor;
        let unit = &mut self.roster_mut(side)[index];
        unit.attack_progress += unit.archetype.speed / divisor;
        if unit.attack_progress < ATTACK_READY {
            return None;
        }
        unit.attack_progress = 0.0;
        Some(unit.archetype.power)
    }

    fn resolve_advance(&mut self, unit_id: UnitId) {
        let Some((side, index)) = self.find_unit(unit_id) else {
            return;
        };
        let divisor = self.tuning.move_divisor;
        let unit = &mut self.roster_mut(side)[index];
        let step = side.advance_sign() * unit.archetype.speed / divisor;
        unit.position = unit.position.shifted_x(step);
    }
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new(Tuning::default(), BattlefieldLayout::default())
    }
}

/// Applies the provided command to the session, mutating state
/// deterministically.
pub fn apply(session: &mut MatchSession, command: Command, out_events: &mut Vec<Event>) {
    if session.state.is_terminal() {
        return;
    }

    match command {
        Command::StartBattle {
            player_name,
            opponent_name,
        } => {
            if session.state != MatchState::Lobby {
                return;
            }
            session.state = MatchState::Battling;
            session.player_name = Some(player_name.clone());
            session.opponent_name = Some(opponent_name.clone());
            out_events.push(Event::BattleStarted {
                player_name,
                opponent_name,
            });
        }
        Command::DrawHand { cards } => {
            if session.state != MatchState::Battling {
                return;
            }
            let clock = session.clock;
            let tuning = session.tuning;
            session.hand = cards
                .into_iter()
                .map(|archetype| {
                    let cooldown = tuning.slot_cooldown(archetype.power, archetype.speed);
                    HandSlot {
                        archetype,
                        cooldown,
                        started_at: clock,
                    }
                })
                .collect();
            out_events.push(Event::HandDrawn {
                slots: session.hand.len(),
            });
        }
        Command::Tick { dt } => {
            if session.state != MatchState::Battling {
                return;
            }
            session.clock = session.clock.saturating_add(dt);
            for unit in session
                .player_roster
                .iter_mut()
                .chain(session.enemy_roster.iter_mut())
            {
                unit.animation_phase += 1.0 / (unit.archetype.speed * 10.0);
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::GrantIncome { amount } => {
            if session.state != MatchState::Battling || session.hand.is_empty() {
                return;
            }
            session.balance = session.balance.saturating_add(amount);
            out_events.push(Event::IncomeGranted {
                amount,
                balance: session.balance,
            });
        }
        Command::SpawnFromSlot { slot } => {
            if session.state != MatchState::Battling {
                return;
            }
            session.resolve_spawn(slot, out_events);
        }
        Command::AdmitUnit { side, archetype } => {
            if session.state != MatchState::Battling {
                return;
            }
            let id = session.allocate_unit_id();
            let position = session.towers.get(side).position();
            let name = archetype.name.clone();
            let unit = UnitInstance::admitted(id, side, archetype, position);
            session.roster_mut(side).push(unit);
            out_events.push(Event::UnitAdmitted {
                unit: id,
                side,
                name,
            });
        }
        Command::OverrideTowerHealth { tower, health } => {
            let clamped = session.towers.get_mut(tower).overwrite(health);
            out_events.push(Event::TowerHealthOverridden {
                tower,
                health: clamped,
            });
        }
        Command::EngageUnit { attacker, victim } => {
            if session.state != MatchState::Battling {
                return;
            }
            session.resolve_engagement(attacker, victim, out_events);
        }
        Command::AssaultTower { attacker } => {
            if session.state != MatchState::Battling {
                return;
            }
            session.resolve_tower_assault(attacker, out_events);
        }
        Command::AdvanceUnit { unit } => {
            if session.state != MatchState::Battling {
                return;
            }
            session.resolve_advance(unit);
        }
        Command::ConcludeMatch { outcome } => {
            if session.state != MatchState::Battling {
                return;
            }
            session.state = outcome.terminal_state();
            out_events.push(Event::MatchEnded { outcome });
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::{sync::Arc, time::Duration};

    use lane_rush_core::{
        LanePoint, MatchState, Side, Tuning, UnitArchetype, UnitSnapshot, UnitView,
    };

    use super::MatchSession;

    /// Current lifecycle state of the match.
    #[must_use]
    pub fn match_state(session: &MatchSession) -> MatchState {
        session.state
    }

    /// Tuning constants the session was created with.
    #[must_use]
    pub fn tuning(session: &MatchSession) -> &Tuning {
        &session.tuning
    }

    /// Simulated time accumulated since the session was created.
    #[must_use]
    pub fn clock(session: &MatchSession) -> Duration {
        session.clock
    }

    /// Current currency balance of the local economy.
    #[must_use]
    pub fn balance(session: &MatchSession) -> u32 {
        session.balance
    }

    /// Display names announced at battle start, if the battle started.
    #[must_use]
    pub fn display_names(session: &MatchSession) -> Option<(&str, &str)> {
        match (&session.player_name, &session.opponent_name) {
            (Some(player), Some(opponent)) => Some((player.as_str(), opponent.as_str())),
            _ => None,
        }
    }

    /// Captures a read-only view of one side's roster.
    #[must_use]
    pub fn roster_view(session: &MatchSession, side: Side) -> UnitView {
        UnitView::from_snapshots(
            session
                .roster(side)
                .iter()
                .map(|unit| UnitSnapshot {
                    id: unit.id,
                    side: unit.side,
                    archetype: Arc::clone(&unit.archetype),
                    position: unit.position,
                    health: unit.health,
                    attack_progress: unit.attack_progress,
                    animation_phase: unit.animation_phase,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of both rosters.
    #[must_use]
    pub fn unit_view(session: &MatchSession) -> UnitView {
        let mut snapshots = roster_view(session, Side::Player).into_vec();
        snapshots.extend(roster_view(session, Side::Enemy).into_vec());
        UnitView::from_snapshots(snapshots)
    }

    /// Authoritative health of the provided tower.
    #[must_use]
    pub fn tower_health(session: &MatchSession, side: Side) -> f32 {
        session.towers.get(side).authoritative()
    }

    /// Locally predicted health of the provided tower.
    #[must_use]
    pub fn predicted_tower_health(session: &MatchSession, side: Side) -> f32 {
        session.towers.get(side).predicted()
    }

    /// Lane position of the provided tower.
    #[must_use]
    pub fn tower_position(session: &MatchSession, side: Side) -> LanePoint {
        session.towers.get(side).position()
    }

    /// Immutable description of one hand slot used for display and input.
    #[derive(Clone, Debug)]
    pub struct HandSlotSnapshot {
        /// Zero-based slot index in button order.
        pub slot: usize,
        /// Archetype held by the slot.
        pub archetype: Arc<UnitArchetype>,
        /// Full cooldown the slot arms with after a spend.
        pub cooldown: Duration,
        /// Cooldown remaining at the current simulation clock.
        pub remaining: Duration,
    }

    /// Captures a read-only view of the drawn hand in button order.
    #[must_use]
    pub fn hand_view(session: &MatchSession) -> Vec<HandSlotSnapshot> {
        session
            .hand
            .iter()
            .enumerate()
            .map(|(slot, hand_slot)| HandSlotSnapshot {
                slot,
                archetype: Arc::clone(&hand_slot.archetype),
                cooldown: hand_slot.cooldown,
                remaining: session.slot_remaining(hand_slot),
            })
            .collect()
    }

    /// Cooldown remaining on one hand slot, or `None` for an absent slot.
    /// Never negative: the subtraction saturates at zero.
    #[must_use]
    pub fn cooldown_remaining(session: &MatchSession, slot: usize) -> Option<Duration> {
        session
            .hand
            .get(slot)
            .map(|hand_slot| session.slot_remaining(hand_slot))
    }
}
