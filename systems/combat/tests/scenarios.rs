use std::{sync::Arc, time::Duration};

use lane_rush_core::{
    AttackType, BattlefieldLayout, Command, Event, Side, Tuning, UnitArchetype, UnitId,
};
use lane_rush_session::{apply, query, MatchSession};
use lane_rush_system_combat::Combat;

const TICK: Duration = Duration::from_millis(10);

fn archetype(name: &str, cost: u32, health: f32, power: f32, size: f32, speed: f32) -> Arc<UnitArchetype> {
    Arc::new(UnitArchetype {
        name: name.to_owned(),
        emoji: "?".to_owned(),
        cost,
        health,
        power,
        size,
        speed,
        attack_type: AttackType::Single,
    })
}

fn start_battle(session: &mut MatchSession) {
    let mut events = Vec::new();
    apply(
        session,
        Command::StartBattle {
            player_name: "ana".to_owned(),
            opponent_name: "bob".to_owned(),
        },
        &mut events,
    );
}

fn admit(session: &mut MatchSession, side: Side, archetype: Arc<UnitArchetype>) -> UnitId {
    let mut events = Vec::new();
    apply(session, Command::AdmitUnit { side, archetype }, &mut events);
    match events.first() {
        Some(Event::UnitAdmitted { unit, .. }) => *unit,
        other => panic!("expected UnitAdmitted, got {other:?}"),
    }
}

/// Advances one simulation tick, returning the commands the combat planner
/// produced and the events the session emitted while applying them.
fn run_tick(session: &mut MatchSession, combat: &mut Combat) -> (Vec<Command>, Vec<Event>) {
    let mut events = Vec::new();
    apply(session, Command::Tick { dt: TICK }, &mut events);

    let tuning = *query::tuning(session);
    let units = query::unit_view(session);
    let mut commands = Vec::new();
    combat.handle(
        &events,
        &units,
        query::tower_position(session, Side::Player),
        query::tower_position(session, Side::Enemy),
        &tuning,
        &mut commands,
    );

    for command in &commands {
        apply(session, command.clone(), &mut events);
    }
    (commands, events)
}

// Scenario A: a lone unit (power 10, speed 5, size 1) crosses the empty lane,
// stops at tower contact, and lands one tower hit per full accumulator cycle
// of 100 / (speed / cooldown_divisor) = 200 ticks.
#[test]
fn lone_unit_crosses_the_lane_and_paces_tower_hits() {
    let mut session = MatchSession::default();
    let mut combat = Combat::new();
    start_battle(&mut session);
    let _unit = admit(
        &mut session,
        Side::Player,
        archetype("Spooked", 100, 100.0, 10.0, 1.0, 5.0),
    );

    let mut strike_ticks = Vec::new();
    for tick_index in 1..=2700_u32 {
        let (_, events) = run_tick(&mut session, &mut combat);
        for event in &events {
            if let Event::TowerStruck { tower, power } = event {
                assert_eq!(*tower, Side::Enemy);
                assert_eq!(*power, 10.0);
                strike_ticks.push(tick_index);
            }
        }
    }

    // Lane gap 1024, step speed/10 = 0.5: contact on tick 1999, first landed
    // hit 200 assault ticks later.
    assert_eq!(strike_ticks, vec![2198, 2398, 2598]);
    assert_eq!(
        query::predicted_tower_health(&session, Side::Enemy),
        15_000.0 - 30.0
    );
    assert_eq!(
        query::tower_health(&session, Side::Enemy),
        15_000.0,
        "local assaults must not touch the authoritative channel"
    );
}

// Scenario B: two equal units on a collision course meet mid-lane and fight
// each other; neither tower is ever struck, and the player-first resolution
// order decides the mirror match.
#[test]
fn equal_units_meet_in_melee_before_either_tower() {
    let mut session = MatchSession::default();
    let mut combat = Combat::new();
    start_battle(&mut session);

    let card = archetype("Smiley", 30, 100.0, 10.0, 1.0, 5.0);
    let player = admit(&mut session, Side::Player, Arc::clone(&card));
    let enemy = admit(&mut session, Side::Enemy, card);

    let mut first_strike: Option<Event> = None;
    let mut kills = Vec::new();
    for _ in 0..3200 {
        let (_, events) = run_tick(&mut session, &mut combat);
        for event in &events {
            match event {
                Event::TowerStruck { .. } => panic!("tower struck in a mirror match"),
                Event::UnitStruck { .. } => {
                    if first_strike.is_none() {
                        first_strike = Some(event.clone());
                    }
                }
                Event::UnitKilled { victim, side, bounty } => {
                    kills.push((*victim, *side, *bounty));
                }
                _ => {}
            }
        }
    }

    // Player units resolve first, so the enemy mirror unit dies and the
    // player unit survives with the kill.
    assert_eq!(kills, vec![(enemy, Side::Enemy, 3)]);
    assert!(matches!(
        first_strike,
        Some(Event::UnitStruck { attacker, .. }) if attacker == player
    ));
    let survivors = query::unit_view(&session).into_vec();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, player);
    assert_eq!(query::balance(&session), 53);
}

// Scenario C: a kill pays cost / reward_divisor and the victim is gone from
// the very next planning pass.
#[test]
fn kills_pay_bounty_and_leave_no_stale_targets() {
    // A narrow lane puts both towers 35 units apart, inside mutual melee
    // reach, so the spawned units fight immediately.
    let mut session = MatchSession::new(Tuning::default(), BattlefieldLayout::new(50.0, 720.0));
    let mut combat = Combat::new();
    start_battle(&mut session);

    let _attacker = admit(
        &mut session,
        Side::Player,
        archetype("Boomer", 550, 1000.0, 100.0, 1.0, 1000.0),
    );
    let victim = admit(
        &mut session,
        Side::Enemy,
        archetype("Snail", 30, 10.0, 1.0, 1.0, 1.0),
    );

    let (_, events) = run_tick(&mut session, &mut combat);
    assert!(
        events.iter().any(|event| matches!(
            event,
            Event::UnitKilled { victim: killed, bounty: 3, .. } if *killed == victim
        )),
        "expected the first tick to kill the victim, got {events:?}"
    );
    assert_eq!(query::balance(&session), 53);
    assert!(query::roster_view(&session, Side::Enemy)
        .into_vec()
        .is_empty());

    let (commands, _) = run_tick(&mut session, &mut combat);
    for command in &commands {
        let references_victim = match command {
            Command::EngageUnit { attacker, victim: target } => {
                *attacker == victim || *target == victim
            }
            Command::AssaultTower { attacker } => *attacker == victim,
            Command::AdvanceUnit { unit } => *unit == victim,
            _ => false,
        };
        assert!(
            !references_victim,
            "dead unit referenced by {command:?} on the next planning pass"
        );
    }
}
