//! Real-time chart of the selected variables.
//!
//! Each selected variable is drawn from the trajectory history up to the
//! current time. A marker tracks the current value of the first one.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::session::Session;
use crate::trajectory::{value_bounds, Sample, TimeSeries};
use crate::tui::Theme;

/// `(time, value)` points of `variable` over `samples`.
pub fn series_points(samples: &[Sample], variable: &str) -> Vec<(f64, f64)> {
    samples
        .iter()
        .filter_map(|s| s.get(variable).map(|v| (s.time, v)))
        .collect()
}

/// Y range covering every selected variable over the full series, padded
/// so flat lines stay visible.
pub fn y_bounds(series: &TimeSeries, variables: &[String]) -> [f64; 2] {
    let (lo, hi) = variables
        .iter()
        .filter_map(|v| value_bounds(series, v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return [-1.0, 1.0];
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    [lo - pad, hi + pad]
}

pub fn render_chart(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_secondary_style())
        .title(" Chart ");

    let (Some(series), Some(range)) = (session.series(), session.time_range()) else {
        let empty = Paragraph::new("No data").style(theme.text_secondary_style()).block(block);
        frame.render_widget(empty, area);
        return;
    };

    let selected = session.selected_variables();
    if selected.is_empty() {
        let empty = Paragraph::new("Select variables to chart")
            .style(theme.text_secondary_style())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let history = session.history();
    let lines: Vec<Vec<(f64, f64)>> = selected
        .iter()
        .map(|v| series_points(history, v))
        .collect();
    let marker: Vec<(f64, f64)> = session
        .current_sample()
        .and_then(|s| s.get(&selected[0]).map(|v| (session.playback.current_time, v)))
        .into_iter()
        .collect();

    let mut datasets: Vec<Dataset> = selected
        .iter()
        .zip(&lines)
        .enumerate()
        .map(|(i, (name, points))| {
            Dataset::default()
                .name(name.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme.series_color(i)))
                .data(points)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(theme.accent_bold_style())
            .data(&marker),
    );

    let [y_min, y_max] = y_bounds(series, selected);
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.text_secondary_style())
                .bounds([range.min(), range.max()])
                .labels([
                    Span::raw(format!("{:.1}", range.min())),
                    Span::raw(format!("{:.1}", range.max())),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme.text_secondary_style())
                .bounds([y_min, y_max])
                .labels([
                    Span::raw(format!("{:.2}", y_min)),
                    Span::raw(format!("{:.2}", y_max)),
                ]),
        );
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TimeSeries {
        TimeSeries::new(vec![
            Sample::new(0.0).with("x", 1.0).with("v", -3.0),
            Sample::new(1.0).with("x", 2.0),
            Sample::new(2.0).with("x", 5.0).with("v", 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn points_skip_samples_without_the_variable() {
        let s = series();
        assert_eq!(series_points(s.samples(), "v"), vec![(0.0, -3.0), (2.0, 4.0)]);
        assert!(series_points(s.samples(), "missing").is_empty());
    }

    #[test]
    fn bounds_cover_all_selected_variables() {
        let [lo, hi] = y_bounds(&series(), &["x".to_string(), "v".to_string()]);
        assert!(lo < -3.0 && lo > -3.5);
        assert!(hi > 5.0 && hi < 5.5);
    }

    #[test]
    fn bounds_default_when_nothing_matches() {
        assert_eq!(y_bounds(&series(), &["nope".to_string()]), [-1.0, 1.0]);
    }

    #[test]
    fn flat_series_gets_padding() {
        let flat = TimeSeries::new(vec![Sample::new(0.0).with("c", 2.0), Sample::new(1.0).with("c", 2.0)]).unwrap();
        let [lo, hi] = y_bounds(&flat, &["c".to_string()]);
        assert!(lo < 2.0 && hi > 2.0);
    }
}
