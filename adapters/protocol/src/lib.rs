#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! JSON wire codec and event ingestion for the battle transport.
//!
//! Both wire directions are closed tagged-variant enums, so every message
//! kind is dispatched through an exhaustive `match` and a new variant is a
//! compile error rather than a silent fall-through. Inbound payloads that
//! fail to decode or validate are protocol errors: logged, discarded, and
//! never allowed to leave a partial session mutation behind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lane_rush_catalog::{validate, CatalogError};
use lane_rush_core::{Command, Event, MatchOutcome, Side, UnitArchetype};

/// Errors raised while decoding or ingesting wire traffic.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The payload was not valid JSON for any known message shape.
    #[error("malformed wire payload")]
    Malformed(#[from] serde_json::Error),
    /// An embedded archetype failed load-time validation.
    #[error("rejected wire archetype")]
    InvalidCard(#[from] CatalogError),
}

/// Envelope framing every server-originated message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerEnvelope {
    /// Tagged message payload.
    pub message: ServerMessage,
}

/// Every message the battle server can push to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Chat line relayed from another user: sender name and text.
    Chat(String, String),
    /// Battle identifier assigned while the lobby pairs players.
    GameStart(String),
    /// A user joined the lobby.
    UserJoin(String),
    /// A user left the lobby.
    UserLeave(String),
    /// The battle began: local display name, then opponent display name.
    StartGame(String, String),
    /// The hand drawn for this battle, in button order.
    DrawnHand(Vec<UnitArchetype>),
    /// A unit entered the battle: `true` when owned by the local player.
    UnitSpawned(bool, UnitArchetype),
    /// Authoritative tower health: `true` targets the local player's tower.
    NewTowerHealth(bool, f32),
    /// The local player won the battle.
    Win,
    /// The local player lost the battle.
    Lose,
    /// The opponent disconnected mid-battle.
    WinByDisconnect,
}

/// Every message a client can send to the battle server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// Lobby join request carrying the desired user name.
    ConnectReq(String),
    /// Chat line typed by the local user.
    Text(String),
    /// Session teardown notification.
    Disconnect,
    /// Request to start matchmaking from the lobby.
    BeginGame,
    /// Spend intent: spawn the named archetype.
    SpawnUnit(String),
    /// Damage report for a landed hit on the opposing tower.
    DmgPing(String),
}

/// Lobby and chat traffic that never touches the simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// Chat line to display: sender name and text.
    Chat {
        /// Name of the sending user.
        sender: String,
        /// Chat text.
        text: String,
    },
    /// A user joined the lobby.
    UserJoined(String),
    /// A user left the lobby.
    UserLeft(String),
    /// Matchmaking assigned a battle identifier.
    GameStarting(String),
}

/// Result of ingesting one inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum Ingestion {
    /// The message maps onto a session command.
    Apply(Command),
    /// The message only concerns the UI layer.
    Notice(Notice),
}

/// Decodes one wire payload into its envelope.
pub fn decode(text: &str) -> Result<ServerEnvelope, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Encodes one outbound message for the wire.
pub fn encode(message: &ClientMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

/// Maps an inbound message onto the session mutation or notice it implies.
///
/// Archetype payloads are validated here with the same rules the catalog
/// applies at load time; an archetype the catalog would refuse never reaches
/// the session.
pub fn ingest(message: ServerMessage) -> Result<Ingestion, ProtocolError> {
    let ingestion = match message {
        ServerMessage::Chat(sender, text) => Ingestion::Notice(Notice::Chat { sender, text }),
        ServerMessage::GameStart(battle) => Ingestion::Notice(Notice::GameStarting(battle)),
        ServerMessage::UserJoin(name) => Ingestion::Notice(Notice::UserJoined(name)),
        ServerMessage::UserLeave(name) => Ingestion::Notice(Notice::UserLeft(name)),
        ServerMessage::StartGame(player_name, opponent_name) => {
            Ingestion::Apply(Command::StartBattle {
                player_name,
                opponent_name,
            })
        }
        ServerMessage::DrawnHand(cards) => {
            let mut validated = Vec::with_capacity(cards.len());
            for card in cards {
                validate(&card)?;
                validated.push(Arc::new(card));
            }
            Ingestion::Apply(Command::DrawHand { cards: validated })
        }
        ServerMessage::UnitSpawned(is_local, card) => {
            validate(&card)?;
            Ingestion::Apply(Command::AdmitUnit {
                side: side_from_flag(is_local),
                archetype: Arc::new(card),
            })
        }
        ServerMessage::NewTowerHealth(is_local_tower, health) => {
            Ingestion::Apply(Command::OverrideTowerHealth {
                tower: side_from_flag(is_local_tower),
                health,
            })
        }
        ServerMessage::Win => Ingestion::Apply(Command::ConcludeMatch {
            outcome: MatchOutcome::Won,
        }),
        ServerMessage::Lose => Ingestion::Apply(Command::ConcludeMatch {
            outcome: MatchOutcome::Lost,
        }),
        ServerMessage::WinByDisconnect => Ingestion::Apply(Command::ConcludeMatch {
            outcome: MatchOutcome::WonByDisconnect,
        }),
    };
    Ok(ingestion)
}

/// Decodes and ingests one wire payload, logging and discarding protocol
/// errors instead of propagating them.
pub fn ingest_text(text: &str) -> Option<Ingestion> {
    match decode(text).and_then(|envelope| ingest(envelope.message)) {
        Ok(ingestion) => Some(ingestion),
        Err(error) => {
            tracing::warn!(%error, "discarding unusable inbound message");
            None
        }
    }
}

/// Maps a session event onto the outbound message it implies, if any.
///
/// Only player-owned units report tower damage: a strike on the enemy tower
/// becomes a `DmgPing`, while strikes on the local tower stay local because
/// the opponent's client reports its own damage.
pub fn outbound(event: &Event) -> Option<ClientMessage> {
    match event {
        Event::SpawnCommitted { name, .. } => Some(ClientMessage::SpawnUnit(name.clone())),
        Event::TowerStruck {
            tower: Side::Enemy,
            power,
        } => Some(ClientMessage::DmgPing(format!("{power}"))),
        _ => None,
    }
}

const fn side_from_flag(is_local: bool) -> Side {
    if is_local {
        Side::Player
    } else {
        Side::Enemy
    }
}
