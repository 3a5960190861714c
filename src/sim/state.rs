//! Game session state and transitions
//!
//! Two phases only: `Running` and `Ended`. Every mutation goes through
//! `on_tap`, `on_tick` or `restart` and reports what happened as a
//! [`GameEvent`] so the host can log, notify and redraw.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bubble::{Bubble, generate_bubbles};
use super::clock::{ClockTick, GameClock};
use super::hit::{PointerEvent, find_hit_index};
use crate::settings::Settings;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, taps pop bubbles
    Running,
    /// Clock expired, waiting for restart
    Ended,
}

/// Something a session mutation produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bubble was popped; `score` is the new total
    Popped { bubble_id: u32, score: u64 },
    /// One second elapsed
    Ticked { remaining: u32 },
    /// Countdown hit zero. Fired once per round.
    GameEnded { final_score: u64 },
    /// A new round started
    Restarted { round: u32 },
}

/// Read-only view for the render surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub bubbles: Vec<Bubble>,
    pub score: u64,
    pub remaining_seconds: u32,
    pub phase: GamePhase,
    pub round: u32,
}

/// Complete mutable state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Live bubbles, in generation order
    pub bubbles: Vec<Bubble>,
    pub score: u64,
    pub phase: GamePhase,
    /// Rounds started so far (1 after construction)
    pub round: u32,
    clock: GameClock,
    settings: Settings,
    rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a running session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.validated();
        let mut session = Self {
            seed,
            bubbles: Vec::new(),
            score: 0,
            phase: GamePhase::Running,
            round: 1,
            clock: GameClock::new(settings.round_seconds),
            settings,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        session.spawn_bubbles();
        session
    }

    /// Build a running session around a fixed bubble set (tests, replays)
    pub fn with_bubbles(bubbles: Vec<Bubble>) -> Self {
        let mut session = Self::new(0);
        session.next_id = bubbles
            .iter()
            .map(|b| b.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        session.bubbles = bubbles;
        session
    }

    fn spawn_bubbles(&mut self) {
        self.bubbles = generate_bubbles(
            &mut self.rng,
            &self.settings.field,
            self.settings.bubble_count,
            &mut self.next_id,
        );
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle a tap. Pops the first bubble containing the point.
    ///
    /// Misses and taps while `Ended` leave the session untouched.
    pub fn on_tap(&mut self, point: PointerEvent) -> Option<GameEvent> {
        if self.phase != GamePhase::Running {
            return None;
        }

        let index = find_hit_index(&self.bubbles, point)?;
        let popped = self.bubbles.remove(index);
        self.score += 1;

        log::debug!(
            "Popped bubble {} at ({}, {}), score {}",
            popped.id,
            popped.pos.x,
            popped.pos.y,
            self.score
        );

        Some(GameEvent::Popped {
            bubble_id: popped.id,
            score: self.score,
        })
    }

    /// Advance the countdown by one interval
    pub fn on_tick(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Running {
            return None;
        }

        match self.clock.tick() {
            ClockTick::Counting(remaining) => Some(GameEvent::Ticked { remaining }),
            ClockTick::Expired => {
                self.phase = GamePhase::Ended;
                log::info!("Round {} over, final score {}", self.round, self.score);
                Some(GameEvent::GameEnded {
                    final_score: self.score,
                })
            }
            ClockTick::Stopped => None,
        }
    }

    /// Start a new round from `Ended`
    ///
    /// Returns `false` (and changes nothing) while a round is still running.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Ended {
            return false;
        }

        self.spawn_bubbles();
        self.score = 0;
        self.clock.reset();
        self.phase = GamePhase::Running;
        self.round += 1;

        log::info!("Round {} started", self.round);
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bubbles: self.bubbles.clone(),
            score: self.score,
            remaining_seconds: self.clock.remaining(),
            phase: self.phase,
            round: self.round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BUBBLE_COUNT, ROUND_SECONDS};

    fn run_out_clock(session: &mut GameSession) -> Vec<GameEvent> {
        (0..ROUND_SECONDS).filter_map(|_| session.on_tick()).collect()
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(12345);
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.bubbles.len(), BUBBLE_COUNT);
        assert_eq!(session.score, 0);
        assert_eq!(session.remaining_seconds(), 30);
    }

    #[test]
    fn test_tap_hit_pops_and_scores() {
        let mut session = GameSession::with_bubbles(vec![Bubble::new(1, 10.0, 10.0, 5.0)]);
        let event = session.on_tap(PointerEvent::new(10.0, 10.0));

        assert_eq!(
            event,
            Some(GameEvent::Popped {
                bubble_id: 1,
                score: 1
            })
        );
        assert_eq!(session.score, 1);
        assert!(session.bubbles.is_empty());
    }

    #[test]
    fn test_tap_miss_is_noop() {
        let mut session = GameSession::with_bubbles(vec![Bubble::new(1, 10.0, 10.0, 5.0)]);
        let before = session.snapshot();

        assert_eq!(session.on_tap(PointerEvent::new(500.0, 500.0)), None);
        assert_eq!(session.on_tap(PointerEvent::new(15.0, 10.0)), None);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_duplicate_removed_by_id() {
        let mut session = GameSession::with_bubbles(vec![
            Bubble::new(4, 10.0, 10.0, 5.0),
            Bubble::new(9, 10.0, 10.0, 5.0),
        ]);
        session.on_tap(PointerEvent::new(10.0, 10.0));

        assert_eq!(session.bubbles.len(), 1);
        assert_eq!(session.bubbles[0].id, 9);
    }

    #[test]
    fn test_end_fires_exactly_once() {
        let mut session = GameSession::new(1);
        let events = run_out_clock(&mut session);

        assert_eq!(events.len(), ROUND_SECONDS as usize);
        assert_eq!(events.last(), Some(&GameEvent::GameEnded { final_score: 0 }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
                .count(),
            1
        );
        assert!(session.is_ended());
        assert_eq!(session.remaining_seconds(), 0);

        // Stray ticks
        assert_eq!(session.on_tick(), None);
        assert_eq!(session.on_tick(), None);
        assert!(session.is_ended());
    }

    #[test]
    fn test_final_score_carried_in_event() {
        let mut session = GameSession::with_bubbles(vec![
            Bubble::new(1, 100.0, 100.0, 50.0),
            Bubble::new(2, 400.0, 400.0, 50.0),
        ]);
        session.on_tap(PointerEvent::new(100.0, 100.0));
        session.on_tap(PointerEvent::new(400.0, 400.0));

        let events = run_out_clock(&mut session);
        assert_eq!(events.last(), Some(&GameEvent::GameEnded { final_score: 2 }));
    }

    #[test]
    fn test_taps_ignored_while_ended() {
        let mut session = GameSession::with_bubbles(vec![Bubble::new(1, 10.0, 10.0, 5.0)]);
        run_out_clock(&mut session);

        assert_eq!(session.on_tap(PointerEvent::new(10.0, 10.0)), None);
        assert_eq!(session.score, 0);
        assert_eq!(session.bubbles.len(), 1);
    }

    #[test]
    fn test_restart_from_ended() {
        let mut session = GameSession::new(77);
        let first_ids: Vec<u32> = session.bubbles.iter().map(|b| b.id).collect();
        let target = session.bubbles[0].pos;
        session.on_tap(target.into());
        run_out_clock(&mut session);

        assert!(session.restart());
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.score, 0);
        assert_eq!(session.remaining_seconds(), 30);
        assert_eq!(session.bubbles.len(), BUBBLE_COUNT);
        assert_eq!(session.round, 2);
        assert!(session.bubbles.iter().all(|b| !first_ids.contains(&b.id)));

        // Next round ends again, once
        let events = run_out_clock(&mut session);
        assert!(matches!(events.last(), Some(GameEvent::GameEnded { .. })));
    }

    #[test]
    fn test_fixed_bubbles_with_max_id() {
        let mut session = GameSession::with_bubbles(vec![Bubble::new(u32::MAX, 10.0, 10.0, 5.0)]);
        assert_eq!(session.bubbles.len(), 1);

        session.on_tap(PointerEvent::new(10.0, 10.0));
        run_out_clock(&mut session);
        assert!(session.restart());
        assert_eq!(session.bubbles.len(), BUBBLE_COUNT);
    }

    #[test]
    fn test_restart_while_running_is_noop() {
        let mut session = GameSession::new(5);
        session.on_tick();
        let before = session.snapshot();

        assert!(!session.restart());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_clearing_field_keeps_clock_running() {
        let mut session = GameSession::with_bubbles(vec![Bubble::new(1, 10.0, 10.0, 5.0)]);
        session.on_tap(PointerEvent::new(10.0, 10.0));
        assert!(session.bubbles.is_empty());
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.on_tick(), Some(GameEvent::Ticked { remaining: 29 }));
    }

    #[test]
    fn test_custom_settings() {
        let settings = Settings {
            round_seconds: 5,
            bubble_count: 3,
            ..Settings::default()
        };
        let mut session = GameSession::with_settings(2, settings);
        assert_eq!(session.bubbles.len(), 3);
        assert_eq!(session.remaining_seconds(), 5);
        let events: Vec<_> = (0..5).filter_map(|_| session.on_tick()).collect();
        assert!(matches!(events.last(), Some(GameEvent::GameEnded { .. })));
    }
}
