#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Rush battle client.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative match session, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the session executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values for
//! systems and the transport adapter to react to deterministically. Systems
//! consume event streams, query immutable snapshots, and respond exclusively
//! with new command batches.

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

/// Which lane end a unit or tower belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The local player, advancing toward increasing x.
    Player,
    /// The remote opponent, advancing toward decreasing x.
    Enemy,
}

impl Side {
    /// Returns the opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Sign of horizontal travel for units owned by this side.
    #[must_use]
    pub const fn advance_sign(self) -> f32 {
        match self {
            Self::Player => 1.0,
            Self::Enemy => -1.0,
        }
    }
}

/// Unique identifier assigned to a spawned unit instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// How an archetype delivers damage. Carried through the catalog and the
/// wire; combat resolution does not branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    /// Damage intended for every enemy in range.
    Area,
    /// Damage intended for a single target.
    Single,
}

/// Immutable template describing a purchasable unit's stats.
///
/// Serde field names match the wire payloads produced by the battle server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitArchetype {
    /// Catalog name, unique within a deployment.
    pub name: String,
    /// Display glyph drawn by the rendering collaborator.
    pub emoji: String,
    /// Purchase price in currency units.
    pub cost: u32,
    /// Health a freshly spawned instance starts with.
    pub health: f32,
    /// Damage applied by one landed hit.
    pub power: f32,
    /// Body size factor; scales melee reach.
    pub size: f32,
    /// Travel and attack pacing factor. Must be positive: it is used as a
    /// divisor by cooldown and animation math.
    pub speed: f32,
    /// Damage delivery style.
    pub attack_type: AttackType,
}

/// Lifecycle state of the local match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchState {
    /// Waiting in the lobby; no battle state exists yet.
    Lobby,
    /// Battle in progress; simulation commands are live.
    Battling,
    /// Terminal: the local player won.
    Won,
    /// Terminal: the local player lost.
    Lost,
    /// Terminal: the opponent disconnected mid-battle.
    WonByDisconnect,
}

impl MatchState {
    /// Reports whether the state is terminal. Terminal states are absorbing:
    /// no further simulation command mutates the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::WonByDisconnect)
    }
}

/// Outcome delivered by the authority when a battle ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// The local player destroyed the opposing tower.
    Won,
    /// The opposing player destroyed the local tower.
    Lost,
    /// The opponent disconnected before either tower fell.
    WonByDisconnect,
}

impl MatchOutcome {
    /// Terminal match state this outcome transitions into.
    #[must_use]
    pub const fn terminal_state(self) -> MatchState {
        match self {
            Self::Won => MatchState::Won,
            Self::Lost => MatchState::Lost,
            Self::WonByDisconnect => MatchState::WonByDisconnect,
        }
    }
}

/// Reasons a spawn attempt may be rejected without mutating the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpendRejection {
    /// The hand slot has not finished its cooldown.
    OnCooldown,
    /// The balance does not cover the archetype's cost.
    InsufficientFunds,
}

/// Position on the battle lane expressed in virtual canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanePoint {
    x: f32,
    y: f32,
}

impl LanePoint {
    /// Creates a new lane point from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate. Units share one lane height, so this stays
    /// constant over a unit's lifetime.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns a copy shifted horizontally by `dx`.
    #[must_use]
    pub fn shifted_x(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }

    /// Euclidean distance to another lane point.
    #[must_use]
    pub fn distance_to(self, other: LanePoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Transitions the lobby into an active battle and places both towers.
    StartBattle {
        /// Display name of the local player.
        player_name: String,
        /// Display name of the remote opponent.
        opponent_name: String,
    },
    /// Installs the drawn hand and arms every slot cooldown.
    DrawHand {
        /// Archetypes in button order, fixed for the whole battle.
        cards: Vec<Arc<UnitArchetype>>,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Adds accrued income to the balance.
    GrantIncome {
        /// Currency units to add.
        amount: u32,
    },
    /// Attempts to spend the archetype held in a hand slot.
    SpawnFromSlot {
        /// Zero-based hand slot index, in button order.
        slot: usize,
    },
    /// Appends an authoritatively spawned unit to a roster.
    AdmitUnit {
        /// Side that owns the new unit.
        side: Side,
        /// Stats template the instance is created from.
        archetype: Arc<UnitArchetype>,
    },
    /// Authoritative wholesale overwrite of a tower's health.
    OverrideTowerHealth {
        /// Tower being overwritten.
        tower: Side,
        /// New authoritative health value.
        health: f32,
    },
    /// Advances a melee engagement between two opposing units.
    EngageUnit {
        /// Unit whose attack accumulator advances.
        attacker: UnitId,
        /// Opposing unit absorbing the hit once the accumulator fills.
        victim: UnitId,
    },
    /// Advances a melee engagement against the opposing tower.
    AssaultTower {
        /// Unit whose attack accumulator advances.
        attacker: UnitId,
    },
    /// Moves a unit one step toward the opposing tower.
    AdvanceUnit {
        /// Unit taking the step.
        unit: UnitId,
    },
    /// Transitions an active battle into a terminal state.
    ConcludeMatch {
        /// Outcome reported by the authority.
        outcome: MatchOutcome,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms the lobby transitioned into an active battle.
    BattleStarted {
        /// Display name of the local player.
        player_name: String,
        /// Display name of the remote opponent.
        opponent_name: String,
    },
    /// Confirms the hand was installed.
    HandDrawn {
        /// Number of hand slots now available.
        slots: usize,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms accrued income was added to the balance.
    IncomeGranted {
        /// Currency units added.
        amount: u32,
        /// Balance after the grant.
        balance: u32,
    },
    /// Confirms a spend succeeded; the transport forwards the spawn intent.
    SpawnCommitted {
        /// Hand slot that was spent.
        slot: usize,
        /// Catalog name of the archetype to spawn.
        name: String,
        /// Cost deducted from the balance.
        cost: u32,
        /// Balance after the deduction.
        balance: u32,
    },
    /// Reports a spend attempt that was rejected without mutation.
    SpawnRejected {
        /// Hand slot the attempt targeted.
        slot: usize,
        /// Specific reason the attempt failed.
        reason: SpendRejection,
    },
    /// Confirms a unit joined a roster at its owning tower.
    UnitAdmitted {
        /// Identifier allocated to the new instance.
        unit: UnitId,
        /// Side that owns the instance.
        side: Side,
        /// Catalog name of the instance's archetype.
        name: String,
    },
    /// Reports a landed hit between two units.
    UnitStruck {
        /// Unit that landed the hit.
        attacker: UnitId,
        /// Unit that absorbed the hit.
        victim: UnitId,
        /// Damage applied.
        power: f32,
        /// Victim health remaining after the hit.
        remaining: f32,
    },
    /// Confirms a unit died and left its roster.
    UnitKilled {
        /// Unit removed from its roster.
        victim: UnitId,
        /// Side that owned the removed unit.
        side: Side,
        /// Currency reward granted to the local economy. Zero unless the
        /// killer was player-owned.
        bounty: u32,
    },
    /// Reports a landed hit on a tower. Only the predicted health channel
    /// changes locally; the authoritative value arrives by overwrite.
    TowerStruck {
        /// Tower that absorbed the hit.
        tower: Side,
        /// Damage reported for the hit.
        power: f32,
    },
    /// Confirms an authoritative tower health overwrite.
    TowerHealthOverridden {
        /// Tower that was overwritten.
        tower: Side,
        /// New authoritative health value, clamped at zero.
        health: f32,
    },
    /// Announces the single terminal transition of the match.
    MatchEnded {
        /// Outcome the match settled on.
        outcome: MatchOutcome,
    },
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Side that owns the unit.
    pub side: Side,
    /// Stats template the unit was created from.
    pub archetype: Arc<UnitArchetype>,
    /// Current position on the lane.
    pub position: LanePoint,
    /// Remaining health.
    pub health: f32,
    /// Attack accumulator in `[0, 100)`.
    pub attack_progress: f32,
    /// Cosmetic bob/rotation phase.
    pub animation_phase: f32,
}

/// Read-only snapshot describing the units of one or both rosters.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Tunable constants of the battle simulation.
///
/// Every pacing constant lives here instead of at its use site, so a
/// deployment can dial combat, movement, and economy rates without touching
/// simulation code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scale applied to combined unit sizes when testing melee range.
    pub engage_scale: f32,
    /// Extra reach, in lane units, granted when testing tower contact.
    pub tower_range_slack: f32,
    /// Divisor applied to speed when advancing the attack accumulator.
    pub cooldown_divisor: f32,
    /// Divisor applied to a victim's cost when granting a kill bounty.
    pub reward_divisor: u32,
    /// Divisor applied to speed when taking a movement step.
    pub move_divisor: f32,
    /// Milliseconds of simulated time per income grant.
    pub income_interval_ms: u64,
    /// Currency units granted per income interval.
    pub income_amount: u32,
    /// Balance a session starts with.
    pub starting_balance: u32,
    /// Initial health of both towers.
    pub tower_health: f32,
    /// Milliseconds multiplied into the hand slot cooldown formula.
    pub slot_cooldown_unit_ms: u64,
}

impl Tuning {
    /// Simulated time between income grants.
    #[must_use]
    pub const fn income_interval(&self) -> Duration {
        Duration::from_millis(self.income_interval_ms)
    }

    /// Cooldown a hand slot arms with: `power * (1 / speed)` cooldown units.
    #[must_use]
    pub fn slot_cooldown(&self, power: f32, speed: f32) -> Duration {
        let units = power * (1.0 / speed);
        Duration::from_millis((units * self.slot_cooldown_unit_ms as f32) as u64)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            engage_scale: 22.5,
            tower_range_slack: 3.0,
            cooldown_divisor: 10.0,
            reward_divisor: 10,
            move_divisor: 10.0,
            income_interval_ms: 100,
            income_amount: 1,
            starting_balance: 50,
            tower_health: 15_000.0,
            slot_cooldown_unit_ms: 500,
        }
    }
}

/// Lane geometry derived from a virtual canvas, matching the layout the
/// rendering collaborator computes from its own canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattlefieldLayout {
    /// Virtual canvas width in lane units.
    pub width: f32,
    /// Virtual canvas height in lane units.
    pub height: f32,
}

const TOWER_PADDING_RATIO: f32 = 0.05;
const TOWER_SIZE_RATIO: f32 = 0.1;
const LANE_HEIGHT_RATIO: f32 = 0.7;

impl BattlefieldLayout {
    /// Creates a layout for an explicit virtual canvas.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical coordinate shared by towers and units.
    #[must_use]
    pub fn lane_y(&self) -> f32 {
        self.height * LANE_HEIGHT_RATIO
    }

    /// Position of the tower owned by the provided side.
    #[must_use]
    pub fn tower_position(&self, side: Side) -> LanePoint {
        let inset = self.width * TOWER_PADDING_RATIO + self.width * TOWER_SIZE_RATIO / 2.0;
        let x = match side {
            Side::Player => inset,
            Side::Enemy => self.width - inset,
        };
        LanePoint::new(x, self.lane_y())
    }
}

impl Default for BattlefieldLayout {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}
