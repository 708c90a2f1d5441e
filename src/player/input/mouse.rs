//! Mouse input handling for the viewer.
//!
//! Left click on the progress bar seeks; the scroll wheel zooms the camera.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::player::render::fraction_at;
use crate::player::state::InputResult;
use crate::session::Session;
use crate::tui::ui::viewer_layout;

const WHEEL_ZOOM: f64 = 0.9;

/// Handle a mouse event against a screen of size `screen`.
pub fn handle_mouse_event(mouse: MouseEvent, session: &mut Session, screen: Rect) -> InputResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = viewer_layout(screen, session.show_panels, session.parameters.len() as u16);
            if mouse.row == layout.progress.y {
                if let Some(fraction) = fraction_at(layout.progress, mouse.column) {
                    session.seek_to_fraction(fraction);
                }
            }
        }
        MouseEventKind::ScrollUp => session.camera.zoom(WHEEL_ZOOM),
        MouseEventKind::ScrollDown => session.camera.zoom(1.0 / WHEEL_ZOOM),
        _ => {}
    }
    InputResult::Continue
}
