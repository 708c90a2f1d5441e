//! Input handling for the viewer.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the appropriate handlers and returning control flow signals.

mod keyboard;
mod mouse;

pub use keyboard::handle_key_event;
pub use mouse::handle_mouse_event;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::player::state::InputResult;
use crate::session::Session;
use crate::simulation::SimulationWorker;

/// Handle any input event, dispatching to the appropriate handler.
///
/// `screen` is the current terminal area, used to hit-test mouse clicks.
pub fn handle_event(
    event: Event,
    session: &mut Session,
    worker: &mut SimulationWorker,
    screen: Rect,
) -> InputResult {
    match event {
        Event::Key(key) => handle_key_event(key, session, worker),
        Event::Mouse(mouse) => handle_mouse_event(mouse, session, screen),
        // Resize is picked up by the next draw
        _ => InputResult::Continue,
    }
}
