#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic income accrual system.
//!
//! Income is paced on the simulation clock, not wall time: the system
//! accumulates [`Event::TimeAdvanced`] durations once a hand has been drawn
//! and emits one [`Command::GrantIncome`] per whole income interval,
//! carrying any remainder into the next tick.

use std::time::Duration;

use lane_rush_core::{Command, Event, Tuning};

/// Pure system that paces income grants on the simulation clock.
#[derive(Debug)]
pub struct Income {
    interval: Duration,
    amount: u32,
    accumulator: Duration,
    active: bool,
}

impl Income {
    /// Creates an income system using the session's tuning constants.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval: tuning.income_interval(),
            amount: tuning.income_amount,
            accumulator: Duration::ZERO,
            active: false,
        }
    }

    /// Consumes session events and emits income grant commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::HandDrawn { .. } => self.active = true,
                Event::MatchEnded { .. } => {
                    self.active = false;
                    self.accumulator = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if !self.active || self.interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        for _ in 0..self.resolve_grants() {
            out.push(Command::GrantIncome {
                amount: self.amount,
            });
        }
    }

    fn resolve_grants(&mut self) -> usize {
        let mut grants = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            grants += 1;
        }
        grants
    }
}
