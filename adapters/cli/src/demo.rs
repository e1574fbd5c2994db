//! Scripted demo battle driven through the full client stack.
//!
//! A small stand-in authority fabricates the wire traffic a real battle
//! server would push (battle start, hand draw, enemy waves, spawn echoes,
//! tower health overwrites, terminal messages) and reacts to the client's
//! outbound intents. Every payload crosses the protocol codec both ways, so
//! the demo exercises the same paths a live connection would.

use std::{sync::mpsc, time::Duration};

use anyhow::Context;
use lane_rush_catalog::Catalog;
use lane_rush_core::{
    BattlefieldLayout, Command, Event, MatchOutcome, Side, Tuning, UnitArchetype,
};
use lane_rush_protocol::{self as protocol, ClientMessage, Ingestion, ServerEnvelope, ServerMessage};
use lane_rush_runtime::schedule_fixed_rate;
use lane_rush_session::{apply, query, MatchSession};
use lane_rush_system_combat::Combat;
use lane_rush_system_economy::Income;

const HAND_NAMES: [&str; 5] = ["Star", "Sneaker", "Smiley", "Cowboy", "Skeleton"];
const ENEMY_WAVE_NAMES: [&str; 2] = ["Hamster", "Smiley"];
const BOT_SPEND_INTERVAL: u32 = 25;

/// Parameters of one demo run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DemoConfig {
    /// Maximum number of ticks before the run stops undecided.
    pub(crate) ticks: u32,
    /// Simulated time per tick.
    pub(crate) tick: Duration,
    /// Ticks between scripted enemy spawns.
    pub(crate) enemy_wave_interval: u32,
    /// Drive ticks through the fixed-rate scheduler in real time.
    pub(crate) realtime: bool,
}

/// Result of one demo run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Summary {
    pub(crate) outcome: Option<MatchOutcome>,
    pub(crate) ticks_run: u32,
    pub(crate) balance: u32,
    pub(crate) player_units: usize,
    pub(crate) enemy_units: usize,
    pub(crate) player_tower: f32,
    pub(crate) enemy_tower: f32,
    pub(crate) outbound_messages: usize,
}

/// Runs the scripted battle until an outcome or the tick budget is reached.
pub(crate) fn run_demo(tuning: Tuning, config: DemoConfig) -> anyhow::Result<Summary> {
    let catalog = Catalog::load().context("embedded catalog failed to load")?;
    let mut session = MatchSession::new(tuning, BattlefieldLayout::default());
    let mut combat = Combat::new();
    let mut income = Income::new(&tuning);
    let mut authority = ScriptedAuthority::new(catalog, tuning.tower_health);

    let mut outbound_messages = 0usize;
    let mut outcome = None;

    // Lobby handshake: the authority announces the battle and the hand.
    let mut opening_events = Vec::new();
    for payload in authority.opening()? {
        deliver(&payload, &mut session, &mut opening_events);
    }
    income.handle(&opening_events, &mut Vec::new());

    let mut ticks_run = 0;
    if config.realtime {
        let (sender, receiver) = mpsc::channel();
        let mut timer = schedule_fixed_rate(config.tick, sender, || ());
        while ticks_run < config.ticks && outcome.is_none() {
            receiver
                .recv()
                .context("tick scheduler stopped unexpectedly")?;
            ticks_run += 1;
            outcome = step(
                ticks_run,
                config,
                &mut session,
                &mut combat,
                &mut income,
                &mut authority,
                &mut outbound_messages,
            )?;
        }
        timer.cancel();
    } else {
        while ticks_run < config.ticks && outcome.is_none() {
            ticks_run += 1;
            outcome = step(
                ticks_run,
                config,
                &mut session,
                &mut combat,
                &mut income,
                &mut authority,
                &mut outbound_messages,
            )?;
        }
    }

    Ok(Summary {
        outcome,
        ticks_run,
        balance: query::balance(&session),
        player_units: query::roster_view(&session, Side::Player).into_vec().len(),
        enemy_units: query::roster_view(&session, Side::Enemy).into_vec().len(),
        player_tower: query::tower_health(&session, Side::Player),
        enemy_tower: query::tower_health(&session, Side::Enemy),
        outbound_messages,
    })
}

/// Advances one tick: scripted traffic, bot input, simulation systems, and
/// the relay of outbound intents back through the stand-in authority.
fn step(
    tick_index: u32,
    config: DemoConfig,
    session: &mut MatchSession,
    combat: &mut Combat,
    income: &mut Income,
    authority: &mut ScriptedAuthority,
    outbound_messages: &mut usize,
) -> anyhow::Result<Option<MatchOutcome>> {
    let mut events = Vec::new();

    for payload in authority.scripted(tick_index, config.enemy_wave_interval)? {
        deliver(&payload, session, &mut events);
    }
    if tick_index % BOT_SPEND_INTERVAL == 0 {
        let slot = (tick_index / BOT_SPEND_INTERVAL) as usize % HAND_NAMES.len();
        apply(session, Command::SpawnFromSlot { slot }, &mut events);
    }
    apply(session, Command::Tick { dt: config.tick }, &mut events);

    let tuning = *query::tuning(session);
    let units = query::unit_view(session);
    let mut commands = Vec::new();
    income.handle(&events, &mut commands);
    combat.handle(
        &events,
        &units,
        query::tower_position(session, Side::Player),
        query::tower_position(session, Side::Enemy),
        &tuning,
        &mut commands,
    );
    for command in commands {
        apply(session, command, &mut events);
    }

    // Relay loop: outbound intents become authority reactions, which come
    // back as inbound traffic until the exchange settles.
    let mut outcome = None;
    while !events.is_empty() {
        let mut inbound = Vec::new();
        for event in &events {
            if let Some(message) = protocol::outbound(event) {
                *outbound_messages += 1;
                tracing::debug!(?message, "outbound intent");
                inbound.extend(authority.react_outbound(&message)?);
            }
            inbound.extend(authority.react_struck_tower(event)?);
            if let Event::MatchEnded { outcome: decided } = event {
                outcome = Some(*decided);
            }
        }
        events.clear();
        for payload in inbound {
            deliver(&payload, session, &mut events);
        }
    }
    Ok(outcome)
}

fn deliver(payload: &str, session: &mut MatchSession, out_events: &mut Vec<Event>) {
    match protocol::ingest_text(payload) {
        Some(Ingestion::Apply(command)) => apply(session, command, out_events),
        Some(Ingestion::Notice(notice)) => tracing::info!(?notice, "lobby notice"),
        None => {}
    }
}

/// Stand-in for the battle server: owns the authoritative tower health and
/// answers client intents the way the real authority would.
struct ScriptedAuthority {
    catalog: Catalog,
    player_tower: f32,
    enemy_tower: f32,
    concluded: bool,
}

impl ScriptedAuthority {
    fn new(catalog: Catalog, tower_health: f32) -> Self {
        Self {
            catalog,
            player_tower: tower_health,
            enemy_tower: tower_health,
            concluded: false,
        }
    }

    fn card(&self, name: &str) -> anyhow::Result<UnitArchetype> {
        let archetype = self.catalog.get(name)?;
        Ok(UnitArchetype::clone(archetype))
    }

    fn wire(message: ServerMessage) -> anyhow::Result<String> {
        serde_json::to_string(&ServerEnvelope { message })
            .context("failed to encode scripted server message")
    }

    fn opening(&self) -> anyhow::Result<Vec<String>> {
        let mut hand = Vec::with_capacity(HAND_NAMES.len());
        for name in HAND_NAMES {
            hand.push(self.card(name)?);
        }
        Ok(vec![
            Self::wire(ServerMessage::StartGame(
                "you".to_owned(),
                "scripted-rival".to_owned(),
            ))?,
            Self::wire(ServerMessage::DrawnHand(hand))?,
        ])
    }

    fn scripted(&self, tick_index: u32, wave_interval: u32) -> anyhow::Result<Vec<String>> {
        if wave_interval == 0 || tick_index % wave_interval != 0 {
            return Ok(Vec::new());
        }
        let wave = (tick_index / wave_interval) as usize;
        let name = ENEMY_WAVE_NAMES[wave % ENEMY_WAVE_NAMES.len()];
        Ok(vec![Self::wire(ServerMessage::UnitSpawned(
            false,
            self.card(name)?,
        ))?])
    }

    fn react_outbound(&mut self, message: &ClientMessage) -> anyhow::Result<Vec<String>> {
        match message {
            ClientMessage::SpawnUnit(name) => Ok(vec![Self::wire(ServerMessage::UnitSpawned(
                true,
                self.card(name)?,
            ))?]),
            ClientMessage::DmgPing(power) => {
                let power: f32 = power
                    .parse()
                    .context("damage ping carried a non-numeric power")?;
                self.enemy_tower = (self.enemy_tower - power).max(0.0);
                let mut replies = vec![Self::wire(ServerMessage::NewTowerHealth(
                    false,
                    self.enemy_tower,
                ))?];
                if self.enemy_tower <= 0.0 && !self.concluded {
                    self.concluded = true;
                    replies.push(Self::wire(ServerMessage::Win)?);
                }
                Ok(replies)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// The opposing client reports damage its units deal to the local tower;
    /// this stands in for that half of the exchange.
    fn react_struck_tower(&mut self, event: &Event) -> anyhow::Result<Vec<String>> {
        let Event::TowerStruck {
            tower: Side::Player,
            power,
        } = event
        else {
            return Ok(Vec::new());
        };

        self.player_tower = (self.player_tower - power).max(0.0);
        let mut replies = vec![Self::wire(ServerMessage::NewTowerHealth(
            true,
            self.player_tower,
        ))?];
        if self.player_tower <= 0.0 && !self.concluded {
            self.concluded = true;
            replies.push(Self::wire(ServerMessage::Lose)?);
        }
        Ok(replies)
    }
}
