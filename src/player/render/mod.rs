//! Rendering components for the viewer.
//!
//! `draw` lays out one full frame: scene, side panels, progress bar,
//! status bar and any open overlay.

mod chart;
mod overlays;
mod panels;
mod progress;
mod scene;
mod status;

use ratatui::Frame;

use crate::session::Session;
use crate::tui::ui::viewer_layout;
use crate::tui::Theme;

pub use chart::{render_chart, series_points, y_bounds};
pub use overlays::{inspector_lines, render_help, render_inspector, HELP_LINES};
pub use panels::{parameter_line, render_parameters, render_variables, slider};
pub use progress::{bar_span, build_progress_bar_chars, format_duration, fraction_at, render_progress_bar};
pub use scene::{aspect_bounds, overlay_text, render_scene};
pub use status::{render_status_bar, status_summary};

/// Draw a complete viewer frame.
pub fn draw(frame: &mut Frame, session: &Session, theme: &Theme) {
    let area = frame.area();
    let layout = viewer_layout(area, session.show_panels, session.parameters.len() as u16);

    render_scene(frame, layout.scene, session, theme);
    if let Some(panels) = layout.panels {
        render_parameters(frame, panels.parameters, session, theme);
        render_variables(frame, panels.variables, session, theme);
        render_chart(frame, panels.chart, session, theme);
    }
    render_progress_bar(frame, layout.progress, session.playback.current_time, session.time_range());
    render_status_bar(frame, layout.status, session, theme);

    if session.show_inspector {
        render_inspector(frame, area, session, theme);
    }
    if session.show_help {
        render_help(frame, area, theme);
    }
}
