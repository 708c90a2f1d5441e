//! Layout helpers for the viewer screen.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the viewer screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerLayout {
    pub scene: Rect,
    /// Side column for parameters, variables and the chart; `None` when hidden
    pub panels: Option<PanelLayout>,
    pub progress: Rect,
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub parameters: Rect,
    pub variables: Rect,
    pub chart: Rect,
}

/// Split the screen: scene on the left, panels on the right, two bottom rows.
pub fn viewer_layout(area: Rect, show_panels: bool, parameter_rows: u16) -> ViewerLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    if !show_panels {
        return ViewerLayout {
            scene: rows[0],
            panels: None,
            progress: rows[1],
            status: rows[2],
        };
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            // Borders plus one row per parameter
            Constraint::Length(parameter_rows + 2),
            Constraint::Percentage(30),
            Constraint::Min(5),
        ])
        .split(columns[1]);

    ViewerLayout {
        scene: columns[0],
        panels: Some(PanelLayout {
            parameters: side[0],
            variables: side[1],
            chart: side[2],
        }),
        progress: rows[1],
        status: rows[2],
    }
}

/// Create a centered layout with the given constraints.
///
/// Returns the center area that can be used for content.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical_layout[1])[1]
}
