//! Keyboard input handling for the viewer.
//!
//! Handles playback controls, seeking, parameter editing, variable
//! selection, camera movement and overlay toggles.

use std::f64::consts::PI;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::state::InputResult;
use crate::session::{Focus, Session};
use crate::simulation::SimulationWorker;

/// Camera rotation per key press, radians.
const ORBIT_STEP: f64 = PI / 36.0;
const ZOOM_IN: f64 = 0.9;
const ZOOM_OUT: f64 = 1.0 / 0.9;
/// Fraction of the range covered by Shift+arrow seeks.
const SHIFT_SEEK_FRACTION: f64 = 0.05;
/// Parameter steps applied by `{` and `}`.
const COARSE_STEPS: i32 = 10;

/// Handle a keyboard event.
pub fn handle_key_event(
    key: KeyEvent,
    session: &mut Session,
    worker: &mut SimulationWorker,
) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    // If help is showing, any key closes it
    if session.show_help {
        session.show_help = false;
        return InputResult::Continue;
    }

    match key.code {
        // === Quit ===
        KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return InputResult::Quit
        }
        KeyCode::Esc => {
            if session.show_inspector {
                session.show_inspector = false;
            } else {
                return InputResult::Quit;
            }
        }

        // === Overlays and panels ===
        KeyCode::Char('?') => session.show_help = true,
        KeyCode::Char('i') => session.show_inspector = !session.show_inspector,
        KeyCode::Char('c') => session.show_panels = !session.show_panels,

        // === Playback ===
        KeyCode::Char(' ') => session.toggle_playback(),
        KeyCode::Char('r') => session.reset_playback(),
        KeyCode::Char('+') | KeyCode::Char('=') => session.speed.speed_up(),
        KeyCode::Char('-') | KeyCode::Char('_') => session.speed.speed_down(),
        KeyCode::Home => session.jump_to_start(),
        KeyCode::End => session.jump_to_end(),
        KeyCode::Left => handle_seek(session, key.modifiers, -1.0),
        KeyCode::Right => handle_seek(session, key.modifiers, 1.0),

        // === Parameters and variables ===
        KeyCode::Tab | KeyCode::BackTab => session.switch_focus(),
        KeyCode::Up => session.move_cursor(-1),
        KeyCode::Down => session.move_cursor(1),
        KeyCode::Char('[') => session.nudge_parameter(-1),
        KeyCode::Char(']') => session.nudge_parameter(1),
        KeyCode::Char('{') => session.nudge_parameter(-COARSE_STEPS),
        KeyCode::Char('}') => session.nudge_parameter(COARSE_STEPS),
        KeyCode::Enter => {
            if session.focus == Focus::Variables {
                session.toggle_variable_at_cursor();
            }
        }
        KeyCode::Char('S') => {
            // Errors are reported through the status line
            let _ = session.begin_simulation(worker);
        }

        // === Camera ===
        KeyCode::Char('a') => session.camera.orbit(-ORBIT_STEP, 0.0),
        KeyCode::Char('d') => session.camera.orbit(ORBIT_STEP, 0.0),
        KeyCode::Char('w') => session.camera.orbit(0.0, ORBIT_STEP),
        KeyCode::Char('s') => session.camera.orbit(0.0, -ORBIT_STEP),
        KeyCode::Char('z') => session.camera.zoom(ZOOM_IN),
        KeyCode::Char('x') => session.camera.zoom(ZOOM_OUT),

        _ => {}
    }
    InputResult::Continue
}

/// Seek by the configured step, or by 5% of the range with Shift.
fn handle_seek(session: &mut Session, modifiers: KeyModifiers, direction: f64) {
    let step = if modifiers.contains(KeyModifiers::SHIFT) {
        session
            .time_range()
            .map_or(0.0, |r| r.duration() * SHIFT_SEEK_FRACTION)
    } else {
        session.seek_step()
    };
    session.seek_by(direction * step);
}
