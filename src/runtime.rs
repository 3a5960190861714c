//! Game loop host
//!
//! One tokio task owns the [`GameSession`]. The countdown is a periodic
//! `tokio::time::interval` polled in the same `select!` as the command queue,
//! so ticks, taps and restarts are applied strictly one after another. After
//! every change the task publishes a [`Snapshot`] on a watch channel for the
//! render surface.
//!
//! The task stops on [`GameHandle::shutdown`] or once every handle is
//! dropped, taking the timer with it.

use std::fmt;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::notify::Notifier;
use crate::sim::{Command, GameEvent, GameSession, PointerEvent, Snapshot, apply};

/// The game task has stopped and no longer accepts commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopClosed;

impl fmt::Display for LoopClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("game loop closed")
    }
}

impl std::error::Error for LoopClosed {}

#[derive(Debug)]
enum LoopCmd {
    Input(Command),
    GetState { respond: oneshot::Sender<Snapshot> },
    Shutdown,
}

/// Cloneable handle for feeding input to a running game
#[derive(Debug, Clone)]
pub struct GameHandle {
    tx: mpsc::UnboundedSender<LoopCmd>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    fn send(&self, cmd: LoopCmd) -> Result<(), LoopClosed> {
        self.tx.send(cmd).map_err(|_| LoopClosed)
    }

    pub fn tap(&self, x: f32, y: f32) -> Result<(), LoopClosed> {
        self.send(LoopCmd::Input(Command::Tap(PointerEvent::new(x, y))))
    }

    pub fn restart(&self) -> Result<(), LoopClosed> {
        self.send(LoopCmd::Input(Command::Restart))
    }

    /// Current state, after every command queued before this call
    pub async fn snapshot(&self) -> Result<Snapshot, LoopClosed> {
        let (respond, rx) = oneshot::channel();
        self.send(LoopCmd::GetState { respond })?;
        rx.await.map_err(|_| LoopClosed)
    }

    /// Receiver that sees a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Stop the loop and its timer
    pub fn shutdown(&self) -> Result<(), LoopClosed> {
        self.send(LoopCmd::Shutdown)
    }
}

/// Spawn the game loop on the current tokio runtime
///
/// The join handle resolves to the session as it was when the loop stopped.
pub fn spawn_game<N>(session: GameSession, notifier: N) -> (GameHandle, JoinHandle<GameSession>)
where
    N: Notifier + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (snap_tx, snap_rx) = watch::channel(session.snapshot());

    log::info!(
        "Game started with seed {} ({} bubbles, {}s)",
        session.seed,
        session.bubbles.len(),
        session.remaining_seconds()
    );

    let task = tokio::spawn(run_loop(session, notifier, rx, snap_tx));
    let handle = GameHandle {
        tx,
        snapshots: snap_rx,
    };
    (handle, task)
}

async fn run_loop<N: Notifier>(
    mut session: GameSession,
    notifier: N,
    mut rx: mpsc::UnboundedReceiver<LoopCmd>,
    snapshots: watch::Sender<Snapshot>,
) -> GameSession {
    let period = session.settings().tick_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let command = tokio::select! {
            _ = ticker.tick(), if !session.is_ended() => Command::Tick,
            msg = rx.recv() => match msg {
                Some(LoopCmd::Input(cmd)) => cmd,
                Some(LoopCmd::GetState { respond }) => {
                    let _ = respond.send(session.snapshot());
                    continue;
                }
                Some(LoopCmd::Shutdown) | None => break,
            },
        };

        let Some(event) = apply(&mut session, command) else {
            continue;
        };

        match event {
            GameEvent::GameEnded { final_score } => notifier.on_game_end(final_score),
            // Fresh round gets a full first interval
            GameEvent::Restarted { .. } => ticker.reset(),
            GameEvent::Popped { .. } | GameEvent::Ticked { .. } => {}
        }

        snapshots.send_replace(session.snapshot());
    }

    log::info!("Game loop stopped (round {}, score {})", session.round, session.score);
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use crate::sim::{Bubble, GamePhase};
    use std::time::Duration;

    fn single_bubble_session() -> GameSession {
        GameSession::with_bubbles(vec![Bubble::new(1, 10.0, 10.0, 5.0)])
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_through_loop() {
        let recorder = RecordingNotifier::default();
        let (handle, _task) = spawn_game(single_bubble_session(), recorder);

        handle.tap(400.0, 400.0).unwrap();
        handle.tap(10.0, 10.0).unwrap();
        let snap = handle.snapshot().await.unwrap();

        assert_eq!(snap.score, 1);
        assert!(snap.bubbles.is_empty());
        assert_eq!(snap.phase, GamePhase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ends_once_and_notifies() {
        let recorder = RecordingNotifier::default();
        let (handle, _task) = spawn_game(single_bubble_session(), recorder.clone());
        handle.tap(10.0, 10.0).unwrap();

        tokio::time::sleep(Duration::from_millis(15_500)).await;
        let mid = handle.snapshot().await.unwrap();
        assert_eq!(mid.remaining_seconds, 15);
        assert_eq!(mid.phase, GamePhase::Running);

        tokio::time::sleep(Duration::from_secs(60)).await;
        let end = handle.snapshot().await.unwrap();
        assert_eq!(end.phase, GamePhase::Ended);
        assert_eq!(end.remaining_seconds, 0);
        assert_eq!(recorder.scores(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_taps_ignored_after_end() {
        let recorder = RecordingNotifier::default();
        let (handle, _task) = spawn_game(single_bubble_session(), recorder);

        tokio::time::sleep(Duration::from_secs(31)).await;
        handle.tap(10.0, 10.0).unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.bubbles.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_rearms_clock() {
        let recorder = RecordingNotifier::default();
        let (handle, _task) = spawn_game(GameSession::new(42), recorder.clone());

        tokio::time::sleep(Duration::from_secs(31)).await;
        handle.restart().unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.remaining_seconds, 30);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.bubbles.len(), 15);
        assert_eq!(snap.round, 2);
        assert_eq!(recorder.scores(), vec![0]);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(handle.snapshot().await.unwrap().phase, GamePhase::Ended);
        assert_eq!(recorder.scores(), vec![0, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_sees_changes() {
        let recorder = RecordingNotifier::default();
        let (handle, _task) = spawn_game(single_bubble_session(), recorder);
        let mut rx = handle.subscribe();

        handle.tap(10.0, 10.0).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().score, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_loop() {
        let recorder = RecordingNotifier::default();
        let (handle, task) = spawn_game(single_bubble_session(), recorder.clone());

        handle.shutdown().unwrap();
        let session = task.await.unwrap();
        assert_eq!(session.remaining_seconds(), 30);

        assert_eq!(handle.tap(10.0, 10.0), Err(LoopClosed));
        assert_eq!(handle.snapshot().await, Err(LoopClosed));
        assert!(recorder.scores().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handles_stops_loop() {
        let recorder = RecordingNotifier::default();
        let (handle, task) = spawn_game(single_bubble_session(), recorder);
        drop(handle);

        let session = task.await.unwrap();
        assert_eq!(session.phase, GamePhase::Running);
    }
}
