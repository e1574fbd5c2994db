use std::{sync::Arc, time::Duration};

use lane_rush_core::{
    AttackType, BattlefieldLayout, Command, Event, Side, SpendRejection, Tuning, UnitArchetype,
};
use lane_rush_session::{apply, query, MatchSession};

fn archetype(name: &str, cost: u32, health: f32, power: f32, speed: f32) -> Arc<UnitArchetype> {
    Arc::new(UnitArchetype {
        name: name.to_owned(),
        emoji: "?".to_owned(),
        cost,
        health,
        power,
        size: 1.0,
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

fn tick(session: &mut MatchSession, dt: Duration) {
    let mut events = Vec::new();
    apply(session, Command::Tick { dt }, &mut events);
}

#[test]
fn underfunded_spend_is_rejected_without_mutation() {
    let tuning = Tuning {
        starting_balance: 40,
        ..Tuning::default()
    };
    let mut session = MatchSession::new(tuning, BattlefieldLayout::default());
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::DrawHand {
            cards: vec![archetype("Cowboy", 50, 85.0, 10.0, 5.0)],
        },
        &mut events,
    );
    // Cooldown: 10 * (1 / 5) * 500ms = 1000ms. Let it lapse so only funds gate.
    tick(&mut session, Duration::from_millis(1000));

    events.clear();
    apply(&mut session, Command::SpawnFromSlot { slot: 0 }, &mut events);

    assert_eq!(
        events,
        vec![Event::SpawnRejected {
            slot: 0,
            reason: SpendRejection::InsufficientFunds,
        }]
    );
    assert_eq!(query::balance(&session), 40);
    assert_eq!(
        query::cooldown_remaining(&session, 0),
        Some(Duration::ZERO),
        "a rejected spend must not rearm the cooldown"
    );
}

#[test]
fn successful_spend_deducts_cost_and_rearms_the_slot() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::DrawHand {
            cards: vec![archetype("Star", 35, 1.0, 10.0, 5.0)],
        },
        &mut events,
    );
    tick(&mut session, Duration::from_millis(1000));

    events.clear();
    apply(&mut session, Command::SpawnFromSlot { slot: 0 }, &mut events);

    assert_eq!(
        events,
        vec![Event::SpawnCommitted {
            slot: 0,
            name: "Star".to_owned(),
            cost: 35,
            balance: 15,
        }]
    );
    assert_eq!(
        query::cooldown_remaining(&session, 0),
        Some(Duration::from_millis(1000))
    );

    events.clear();
    apply(&mut session, Command::SpawnFromSlot { slot: 0 }, &mut events);
    assert_eq!(
        events,
        vec![Event::SpawnRejected {
            slot: 0,
            reason: SpendRejection::OnCooldown,
        }]
    );
    assert_eq!(query::balance(&session), 15);
}

#[test]
fn spend_attempts_on_cooldown_are_rejected_at_draw_time() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::DrawHand {
            cards: vec![archetype("Star", 35, 1.0, 10.0, 5.0)],
        },
        &mut events,
    );

    events.clear();
    apply(&mut session, Command::SpawnFromSlot { slot: 0 }, &mut events);
    assert_eq!(
        events,
        vec![Event::SpawnRejected {
            slot: 0,
            reason: SpendRejection::OnCooldown,
        }]
    );
}

#[test]
fn cooldowns_saturate_at_zero() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::DrawHand {
            cards: vec![archetype("Star", 35, 1.0, 10.0, 5.0)],
        },
        &mut events,
    );
    tick(&mut session, Duration::from_secs(3600));

    assert_eq!(
        query::cooldown_remaining(&session, 0),
        Some(Duration::ZERO)
    );
}

#[test]
fn player_kills_reward_a_truncated_bounty() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    // speed 1000 fills the accumulator in a single engagement step.
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Boomer", 550, 1.0, 150.0, 1000.0),
        },
        &mut events,
    );
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Enemy,
            archetype: archetype("Hamster", 35, 45.0, 10.0, 1.0),
        },
        &mut events,
    );

    let attacker = query::roster_view(&session, Side::Player).into_vec()[0].id;
    let victim = query::roster_view(&session, Side::Enemy).into_vec()[0].id;

    events.clear();
    apply(
        &mut session,
        Command::EngageUnit { attacker, victim },
        &mut events,
    );

    assert_eq!(
        events,
        vec![
            Event::UnitStruck {
                attacker,
                victim,
                power: 150.0,
                remaining: -105.0,
            },
            Event::UnitKilled {
                victim,
                side: Side::Enemy,
                bounty: 3,
            },
        ]
    );
    assert_eq!(query::balance(&session), 53);
    assert!(query::roster_view(&session, Side::Enemy).into_vec().is_empty());
}

#[test]
fn enemy_kills_grant_no_bounty() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Enemy,
            archetype: archetype("Boomer", 550, 1.0, 150.0, 1000.0),
        },
        &mut events,
    );
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Hamster", 35, 45.0, 10.0, 1.0),
        },
        &mut events,
    );

    let attacker = query::roster_view(&session, Side::Enemy).into_vec()[0].id;
    let victim = query::roster_view(&session, Side::Player).into_vec()[0].id;

    events.clear();
    apply(
        &mut session,
        Command::EngageUnit { attacker, victim },
        &mut events,
    );

    assert_eq!(query::balance(&session), 50);
    assert!(query::roster_view(&session, Side::Player).into_vec().is_empty());
    assert!(matches!(
        events.last(),
        Some(Event::UnitKilled { bounty: 0, .. })
    ));
}

#[test]
fn engagements_referencing_removed_units_are_no_ops() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Boomer", 550, 1.0, 150.0, 1000.0),
        },
        &mut events,
    );
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Enemy,
            archetype: archetype("Hamster", 35, 45.0, 10.0, 1.0),
        },
        &mut events,
    );

    let attacker = query::roster_view(&session, Side::Player).into_vec()[0].id;
    let victim = query::roster_view(&session, Side::Enemy).into_vec()[0].id;

    apply(
        &mut session,
        Command::EngageUnit { attacker, victim },
        &mut events,
    );
    assert!(query::roster_view(&session, Side::Enemy).into_vec().is_empty());

    // A second strike planned against the already-removed victim must not
    // mutate anything.
    events.clear();
    apply(
        &mut session,
        Command::EngageUnit { attacker, victim },
        &mut events,
    );
    assert!(events.is_empty());
    assert_eq!(query::balance(&session), 53);
}

#[test]
fn tower_assaults_only_touch_the_predicted_channel() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Boomer", 550, 1.0, 150.0, 1000.0),
        },
        &mut events,
    );
    let attacker = query::roster_view(&session, Side::Player).into_vec()[0].id;

    events.clear();
    apply(&mut session, Command::AssaultTower { attacker }, &mut events);

    assert_eq!(
        events,
        vec![Event::TowerStruck {
            tower: Side::Enemy,
            power: 150.0,
        }]
    );
    assert_eq!(query::tower_health(&session, Side::Enemy), 15_000.0);
    assert_eq!(
        query::predicted_tower_health(&session, Side::Enemy),
        14_850.0
    );
}

#[test]
fn authoritative_overwrite_resyncs_the_prediction() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Boomer", 550, 1.0, 150.0, 1000.0),
        },
        &mut events,
    );
    let attacker = query::roster_view(&session, Side::Player).into_vec()[0].id;
    apply(&mut session, Command::AssaultTower { attacker }, &mut events);

    events.clear();
    apply(
        &mut session,
        Command::OverrideTowerHealth {
            tower: Side::Enemy,
            health: 14_700.0,
        },
        &mut events,
    );

    assert_eq!(query::tower_health(&session, Side::Enemy), 14_700.0);
    assert_eq!(
        query::predicted_tower_health(&session, Side::Enemy),
        14_700.0
    );
}

#[test]
fn slow_attackers_accumulate_before_landing() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    // speed 50 -> +5 progress per engagement step; 20 steps to land.
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Nerd", 314, 200.0, 15.0, 50.0),
        },
        &mut events,
    );
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Enemy,
            archetype: archetype("Hippo", 500, 750.0, 10.0, 0.6),
        },
        &mut events,
    );

    let attacker = query::roster_view(&session, Side::Player).into_vec()[0].id;
    let victim = query::roster_view(&session, Side::Enemy).into_vec()[0].id;

    events.clear();
    for _ in 0..19 {
        apply(
            &mut session,
            Command::EngageUnit { attacker, victim },
            &mut events,
        );
    }
    assert!(events.is_empty(), "no hit before the accumulator fills");

    apply(
        &mut session,
        Command::EngageUnit { attacker, victim },
        &mut events,
    );
    assert_eq!(
        events,
        vec![Event::UnitStruck {
            attacker,
            victim,
            power: 15.0,
            remaining: 735.0,
        }]
    );

    let attacker_snapshot = query::roster_view(&session, Side::Player).into_vec();
    assert_eq!(attacker_snapshot[0].attack_progress, 0.0);
}

#[test]
fn advancing_units_move_toward_the_opposing_tower() {
    let mut session = MatchSession::default();
    start_battle(&mut session);

    let mut events = Vec::new();
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Player,
            archetype: archetype("Ninja", 200, 100.0, 20.0, 1.4),
        },
        &mut events,
    );
    apply(
        &mut session,
        Command::AdmitUnit {
            side: Side::Enemy,
            archetype: archetype("Ninja", 200, 100.0, 20.0, 1.4),
        },
        &mut events,
    );

    let player = query::roster_view(&session, Side::Player).into_vec()[0].id;
    let enemy = query::roster_view(&session, Side::Enemy).into_vec()[0].id;

    apply(&mut session, Command::AdvanceUnit { unit: player }, &mut events);
    apply(&mut session, Command::AdvanceUnit { unit: enemy }, &mut events);

    let player_x = query::roster_view(&session, Side::Player).into_vec()[0]
        .position
        .x();
    let enemy_x = query::roster_view(&session, Side::Enemy).into_vec()[0]
        .position
        .x();

    let step = 1.4 / 10.0;
    assert!((player_x - (query::tower_position(&session, Side::Player).x() + step)).abs() < 1e-4);
    assert!((enemy_x - (query::tower_position(&session, Side::Enemy).x() - step)).abs() < 1e-4);
}
