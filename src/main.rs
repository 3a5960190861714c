//! Bubble Pop entry point
//!
//! Runs the game loop headless on a tokio runtime. Input comes from stdin
//! (`x y` to tap, `r` to restart, `q` to quit) or from the demo auto-player.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use bubble_pop::notify::StaticPermission;
use bubble_pop::renderer::{Frame, vertex};
use bubble_pop::sim::{GamePhase, GameSession};
use bubble_pop::{GameHandle, GatedNotifier, LogNotifier, Settings, spawn_game};

/// Tap the bubbles before the clock runs out
#[derive(Debug, Parser)]
#[command(name = "bubble-pop", version)]
struct Cli {
    /// Seed for the bubble layout (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Let the auto-player pop bubbles for one round, then exit
    #[arg(long)]
    demo: bool,

    /// Behave as if notification permission was refused
    #[arg(long)]
    deny_notifications: bool,

    /// Print the triangle-list size of every frame
    #[arg(long)]
    vertex_stats: bool,
}

/// Demo auto-player tap cadence
const DEMO_TAP_INTERVAL: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_millis() as u64,
    };

    log::info!("Bubble Pop starting...");

    let permission = StaticPermission(settings.notifications_enabled && !cli.deny_notifications);
    let notifier = GatedNotifier::new(LogNotifier, permission);
    let session = GameSession::with_settings(seed, settings);
    let (handle, task) = spawn_game(session, notifier);

    let render = tokio::spawn(render_loop(handle.clone(), cli.vertex_stats));

    if cli.demo {
        demo_player(&handle).await?;
    } else {
        stdin_player(&handle).await?;
    }

    handle.shutdown().ok();
    let session = task.await.context("game task panicked")?;
    render.abort();

    log::info!("Bye! Played {} round(s), last score {}", session.round, session.score);
    Ok(())
}

/// Print the frame every time the session changes
async fn render_loop(handle: GameHandle, vertex_stats: bool) {
    let mut rx = handle.subscribe();
    let frame = Frame::project(&rx.borrow_and_update());
    print_frame(&frame, vertex_stats);
    while rx.changed().await.is_ok() {
        let frame = Frame::project(&rx.borrow_and_update());
        print_frame(&frame, vertex_stats);
    }
}

fn print_frame(frame: &Frame, vertex_stats: bool) {
    for line in frame.text_lines() {
        println!("{line}");
    }
    if vertex_stats {
        println!("{}", vertex_summary(frame));
    }
    println!();
}

fn vertex_summary(frame: &Frame) -> String {
    let vertices = frame.vertices();
    format!(
        "vertices: {} ({} bytes)",
        vertices.len(),
        vertex::as_bytes(&vertices).len()
    )
}

async fn stdin_player(handle: &GameHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        match line {
            "" => continue,
            "q" | "quit" => break,
            "r" | "restart" => handle.restart()?,
            _ => match parse_tap(line) {
                Some((x, y)) => handle.tap(x, y)?,
                None => log::warn!("Unrecognized input {:?} (expected `x y`, `r` or `q`)", line),
            },
        }
    }
    Ok(())
}

fn parse_tap(line: &str) -> Option<(f32, f32)> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((x, y))
}

/// Taps the first live bubble every half second until the round ends
async fn demo_player(handle: &GameHandle) -> anyhow::Result<()> {
    let mut cadence = tokio::time::interval(DEMO_TAP_INTERVAL);
    loop {
        cadence.tick().await;
        let snap = handle.snapshot().await?;
        if snap.phase == GamePhase::Ended {
            log::info!("Demo finished with {} point(s)", snap.score);
            return Ok(());
        }
        if let Some(target) = snap.bubbles.first() {
            handle.tap(target.pos.x, target.pos.y)?;
        }
    }
}
