//! Status bar rendering for the viewer.
//!
//! Displays play state, speed, model, the last status message and a
//! short key hint.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::session::{Session, StatusKind};
use crate::tui::Theme;

/// Key hints shown at the right edge.
const HINTS: &[(&str, &str)] = &[("space", "play"), ("S", "simulate"), ("?", "help"), ("q", "quit")];

/// Build styled spans for keybinding hints, separated by " | ".
fn hint_spans(keys: &[(&str, &str)], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(format!(": {}", desc), theme.text_secondary_style()));
    }
    spans
}

/// Left part of the status bar.
pub fn status_summary(session: &Session) -> String {
    let state = if session.playback.is_playing {
        "⏸"
    } else {
        "▶"
    };
    let model = session
        .model()
        .map(|m| format!("{} ({})", m.name, m.size_display()))
        .unwrap_or_else(|| "no model".to_string());
    format!(
        " {}  spd:{:.1}x  model:{}",
        state,
        session.speed.multiplier(),
        model
    )
}

/// Render the status/controls bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let summary = status_summary(session);
    let mut spans = vec![Span::styled(summary.clone(), theme.text_style())];
    let mut used = summary.width();

    if let Some(status) = &session.status {
        let style = match status.kind {
            StatusKind::Info => theme.accent_style(),
            StatusKind::Error => theme.error_style(),
        };
        let text = format!("  {}", status.text);
        used += text.width();
        spans.push(Span::styled(text, style));
    }

    let hints = hint_spans(HINTS, theme);
    let hints_width: usize = hints.iter().map(|s| s.content.width()).sum();
    let width = area.width as usize;
    if used + hints_width + 2 <= width {
        spans.push(Span::styled(
            " ".repeat(width - used - hints_width),
            Style::default(),
        ));
        spans.extend(hints);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
