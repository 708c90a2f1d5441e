//! Help and object inspector overlays.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::session::Session;
use crate::tui::ui::centered_rect;
use crate::tui::Theme;

/// Help text lines for the help overlay.
pub const HELP_LINES: &[&str] = &[
    "",
    "  Playback",
    "    Space        Play / Pause",
    "    r            Reset to time zero",
    "    <-/->        Seek by the seek step",
    "    Shift+<-/->  Seek by 5%",
    "    Home/End     Go to start / end",
    "    +/-          Speed up / down",
    "",
    "  Model",
    "    Tab          Switch parameters / variables",
    "    Up/Down      Move selection",
    "    [ / ]        Decrease / increase parameter",
    "    { / }        Adjust by ten steps",
    "    Enter        Chart / hide variable",
    "    S            Re-simulate with parameters",
    "",
    "  View",
    "    a/d w/s      Orbit camera",
    "    z/x          Zoom in / out",
    "    c            Toggle side panels",
    "    i            Object inspector",
    "    ?            Show this help",
    "    q            Quit",
    "",
    "         Press any key to close",
];

pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(60, 80, area);
    let lines: Vec<Line> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();
    let help = Paragraph::new(lines).style(theme.text_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style())
            .title(" fmuviz help "),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

/// Lines describing the objects, the mass position, the parameters and
/// the values at the current time.
pub fn inspector_lines(session: &Session) -> Vec<String> {
    let Some(result) = session.result() else {
        return vec!["No simulation loaded".to_string()];
    };

    let mut lines = Vec::new();
    for object in &result.objects {
        lines.push(format!(
            "{} ({}) - {} samples",
            object.id,
            object.kind,
            object.data.len()
        ));
    }
    let mass = session.frame.mass;
    lines.push(format!("Position: ({:.3}, {:.3}, {:.3})", mass.x, mass.y, mass.z));
    let params: Vec<String> = session
        .parameters
        .iter()
        .map(|p| format!("{}={:.2}{}", p.name, p.value, unit_suffix(&p.unit)))
        .collect();
    lines.push(format!("Parameters: {}", params.join(", ")));
    lines.push(String::new());

    match session.current_sample() {
        Some(sample) => {
            lines.push(format!("t = {:.3}s", sample.time));
            for (name, value) in &sample.values {
                lines.push(format!("  {} = {:.4}", name, value));
            }
        }
        None => lines.push("No sample at this time".to_string()),
    }
    lines
}

fn unit_suffix(unit: &str) -> String {
    if unit.is_empty() {
        String::new()
    } else {
        format!(" {}", unit)
    }
}

pub fn render_inspector(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let popup = centered_rect(50, 60, area);
    let lines: Vec<Line> = inspector_lines(session).into_iter().map(Line::from).collect();
    let inspector = Paragraph::new(lines).style(theme.text_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.accent_style())
            .title(" Inspector "),
    );
    frame.render_widget(Clear, popup);
    frame.render_widget(inspector, popup);
}
