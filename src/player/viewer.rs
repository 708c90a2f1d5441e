//! Interactive viewer frame loop.
//!
//! Each iteration applies finished simulations, advances the clock,
//! draws a frame and waits for input. While playing or waiting on the
//! backend it wakes at the frame interval; otherwise it sleeps until
//! input arrives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::layout::Rect;

use super::input::handle_event;
use super::render;
use super::state::InputResult;
use crate::session::Session;
use crate::simulation::SimulationWorker;
use crate::tui::{current_theme, TerminalGuard};

/// Poll interval while nothing animates.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// How the viewer ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerExit {
    /// The user quit
    Quit,
    /// SIGTERM or SIGHUP
    Signal,
}

fn register_signals() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&flag))
        .context("Failed to register SIGTERM handler")?;
    #[cfg(unix)]
    signal_hook::flag::register(signal_hook::consts::SIGHUP, Arc::clone(&flag))
        .context("Failed to register SIGHUP handler")?;
    Ok(flag)
}

/// Time to wait for input before the next frame.
pub fn poll_timeout(session: &Session, frame_interval: Duration) -> Duration {
    if session.is_animating() || session.is_simulating() {
        frame_interval
    } else {
        IDLE_POLL
    }
}

/// Run the viewer until the user quits or a termination signal arrives.
#[cfg(not(tarpaulin_include))]
pub fn run_viewer(
    session: &mut Session,
    worker: &mut SimulationWorker,
    frame_interval: Duration,
) -> Result<ViewerExit> {
    let terminated = register_signals()?;
    let theme = current_theme();
    let mut guard = TerminalGuard::enter()?;
    tracing::info!(backend = worker.backend(), "viewer started");

    let exit = loop {
        if terminated.load(Ordering::Relaxed) {
            tracing::info!("termination signal received");
            break ViewerExit::Signal;
        }

        while let Some(outcome) = worker.poll() {
            session.apply_outcome(outcome);
        }
        session.tick(Instant::now());

        guard
            .terminal()
            .draw(|frame| render::draw(frame, session, &theme))?;

        if event::poll(poll_timeout(session, frame_interval))? {
            let ev = event::read()?;
            let size = guard.terminal().size()?;
            let screen = Rect::new(0, 0, size.width, size.height);
            if handle_event(ev, session, worker, screen) == InputResult::Quit {
                break ViewerExit::Quit;
            }
        }
    };

    tracing::info!(?exit, "viewer stopped");
    Ok(exit)
}
