//! Game-over notification seam
//!
//! The core hands the final score to a [`Notifier`] and never hears back.
//! Permission checks and the actual system alert belong to the host.

use serde::{Deserialize, Serialize};

/// Notification channel the game posts to
pub const CHANNEL_ID: &str = "bubble_game_channel";
/// Human-readable channel name
pub const CHANNEL_NAME: &str = "Bubble Game Notifications";
/// Game-over notifications replace each other
pub const NOTIFICATION_ID: u32 = 1;

/// A system-level alert, ready for a platform backend to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub channel_id: String,
    pub id: u32,
    pub title: String,
    pub body: String,
    /// Heads-up alert rather than a silent tray entry
    pub high_priority: bool,
    /// Dismiss when tapped
    pub auto_cancel: bool,
}

impl Notification {
    pub fn game_over(score: u64) -> Self {
        Self {
            channel_id: CHANNEL_ID.to_string(),
            id: NOTIFICATION_ID,
            title: "Game Over".to_string(),
            body: format!("Final score: {score}!"),
            high_priority: true,
            auto_cancel: true,
        }
    }

    /// One-line rendering for log-backed hosts
    pub fn summary(&self) -> String {
        let priority = if self.high_priority { "high" } else { "default" };
        format!(
            "[{} ({})#{}, {} priority] {}: {}",
            CHANNEL_NAME, self.channel_id, self.id, priority, self.title, self.body
        )
    }
}

/// Receives the final score when a round ends (fire-and-forget)
pub trait Notifier: Send {
    fn on_game_end(&self, score: u64);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn on_game_end(&self, score: u64) {
        (**self).on_game_end(score)
    }
}

/// Runtime permission to post notifications
pub trait PermissionCheck: Send {
    fn granted(&self) -> bool;
}

/// A permission answer fixed at startup
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission(pub bool);

impl PermissionCheck for StaticPermission {
    fn granted(&self) -> bool {
        self.0
    }
}

/// Default notifier: writes the notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn on_game_end(&self, score: u64) {
        log::info!("{}", Notification::game_over(score).summary());
    }
}

/// Forwards to `inner` only when `permission` is granted
///
/// A denied permission is a silent no-op; the round still ends normally.
pub struct GatedNotifier<N, P> {
    inner: N,
    permission: P,
}

impl<N: Notifier, P: PermissionCheck> GatedNotifier<N, P> {
    pub fn new(inner: N, permission: P) -> Self {
        Self { inner, permission }
    }
}

impl<N: Notifier, P: PermissionCheck> Notifier for GatedNotifier<N, P> {
    fn on_game_end(&self, score: u64) {
        if !self.permission.granted() {
            log::debug!("Notification permission denied, skipping game-over alert");
            return;
        }
        self.inner.on_game_end(score);
    }
}
