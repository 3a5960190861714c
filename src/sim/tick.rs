//! Single entry point for advancing a session
//!
//! Hosts turn timer ticks and user input into [`Command`]s and feed them
//! through [`apply`] one at a time, which keeps every mutation serialized.

use serde::{Deserialize, Serialize};

use super::hit::PointerEvent;
use super::state::{GameEvent, GameSession};

/// Input commands (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Pointer tap on the play field
    Tap(PointerEvent),
    /// One clock interval elapsed
    Tick,
    /// Restart button on the game-over dialog
    Restart,
}

/// Apply one command to the session
pub fn apply(session: &mut GameSession, command: Command) -> Option<GameEvent> {
    match command {
        Command::Tap(point) => session.on_tap(point),
        Command::Tick => session.on_tick(),
        Command::Restart => session
            .restart()
            .then_some(GameEvent::Restarted {
                round: session.round,
            }),
    }
}
