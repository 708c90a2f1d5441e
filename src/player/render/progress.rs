//! Progress bar rendering for the viewer.
//!
//! Displays playback progress through the time range.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::trajectory::TimeRange;

/// Columns reserved for the padding and time display.
pub const TIME_DISPLAY_WIDTH: u16 = 14;

/// Format a duration in seconds to MM:SS format.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Build the progress bar character array.
///
/// Returns the bar and the number of filled positions. The playhead sits
/// at the first unfilled position.
pub fn build_progress_bar_chars(bar_width: usize, current_time: f64, range: TimeRange) -> (Vec<char>, usize) {
    let progress = if range.duration() > 0.0 {
        ((current_time - range.min()) / range.duration()).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];
    if filled < bar_width {
        bar[filled] = '⏺';
    }
    (bar, filled)
}

/// Column span of the clickable bar inside `area`.
pub fn bar_span(area: Rect) -> (u16, u16) {
    (area.x + 1, area.width.saturating_sub(TIME_DISPLAY_WIDTH))
}

/// Fraction of the range under `column`, if it lies on the bar.
pub fn fraction_at(area: Rect, column: u16) -> Option<f64> {
    let (start, width) = bar_span(area);
    if width == 0 || column < start || column >= start + width {
        return None;
    }
    Some(f64::from(column - start) / f64::from(width))
}

/// Render the progress bar with the elapsed and total time.
pub fn render_progress_bar(frame: &mut Frame, area: Rect, current_time: f64, range: Option<TimeRange>) {
    let Some(range) = range else {
        let empty = Paragraph::new(" No simulation loaded").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let (_, bar_width) = bar_span(area);
    let (bar, filled) = build_progress_bar_chars(bar_width as usize, current_time, range);

    let mut spans = Vec::with_capacity(bar.len() + 2);
    spans.push(Span::raw(" "));
    for (i, &c) in bar.iter().enumerate() {
        let span = if i < filled {
            Span::styled("━", Style::default().fg(Color::Green))
        } else if i == filled {
            Span::styled(c.to_string(), Style::default().fg(Color::White))
        } else {
            Span::styled(c.to_string(), Style::default().fg(Color::DarkGray))
        };
        spans.push(span);
    }
    spans.push(Span::styled(
        format!(
            " {}/{}",
            format_duration(current_time - range.min()),
            format_duration(range.duration())
        ),
        Style::default().fg(Color::Gray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
