//! Side panels: model parameters and chart variable selection.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::session::{Focus, Session};
use crate::simulation::Parameter;
use crate::tui::Theme;

const SLIDER_WIDTH: usize = 10;

/// `[■■■■□□□□□□]` style slider for a parameter's position in its range.
pub fn slider(param: &Parameter) -> String {
    let filled = (param.ratio() * SLIDER_WIDTH as f64).round() as usize;
    let filled = filled.min(SLIDER_WIDTH);
    format!("[{}{}]", "■".repeat(filled), "□".repeat(SLIDER_WIDTH - filled))
}

/// One parameter row, label padded to `label_width`.
pub fn parameter_line(param: &Parameter, label_width: usize) -> String {
    let pad = label_width.saturating_sub(param.label.width());
    format!(
        "{}{} {} {:.2} {}",
        param.label,
        " ".repeat(pad),
        slider(param),
        param.value,
        param.unit
    )
    .trim_end()
    .to_string()
}

fn panel_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.accent_style()
    } else {
        theme.text_secondary_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

pub fn render_parameters(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let focused = session.focus == Focus::Parameters;
    let title = if session.is_simulating() {
        " Parameters (simulating...) "
    } else {
        " Parameters "
    };
    let label_width = session
        .parameters
        .iter()
        .map(|p| p.label.width())
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = session
        .parameters
        .iter()
        .map(|p| ListItem::new(parameter_line(p, label_width)).style(theme.text_style()))
        .collect();

    let list = List::new(items)
        .block(panel_block(title, focused, theme))
        .highlight_style(if focused {
            theme.selection_style()
        } else {
            Style::default()
        });
    let mut state = ListState::default().with_selected(Some(session.parameter_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_variables(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let focused = session.focus == Focus::Variables;
    let selected = session.selected_variables();

    let items: Vec<ListItem> = session
        .chartable_variables()
        .into_iter()
        .map(|name| {
            let position = selected.iter().position(|s| s == name);
            let (check, style) = match position {
                Some(i) => ("[x] ", Style::default().fg(theme.series_color(i))),
                None => ("[ ] ", theme.text_secondary_style()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(check, style),
                Span::styled(name.to_string(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel_block(" Variables ", focused, theme))
        .highlight_style(if focused {
            theme.selection_style()
        } else {
            Style::default()
        });
    let mut state = ListState::default().with_selected(Some(session.variable_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::trajectory::{Sample, SimObject, SimulationResult, TimeRange, TimeSeries};
    use ratatui::{backend::TestBackend, Terminal};

    fn mass() -> Parameter {
        Parameter::new("mass", "Mass", "kg", 1.0, 0.0, 10.0, 0.1)
    }

    #[test]
    fn slider_reflects_ratio() {
        assert_eq!(slider(&mass()), "[■□□□□□□□□□]");
        let mut full = mass();
        full.set(10.0);
        assert_eq!(slider(&full), "[■■■■■■■■■■]");
    }

    #[test]
    fn parameter_line_aligns_labels() {
        assert_eq!(parameter_line(&mass(), 9), "Mass      [■□□□□□□□□□] 1.00 kg");
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn variable_panel_marks_selection() {
        let mut session = Session::new(&Config::default(), None);
        session.load_result(SimulationResult {
            time_range: TimeRange::new(0.0, 1.0).unwrap(),
            variables: vec!["time".into(), "a".into(), "b".into(), "c".into()],
            objects: vec![SimObject {
                id: "m".into(),
                kind: "trajectory".into(),
                data: TimeSeries::new(vec![Sample::new(0.0)]).unwrap(),
            }],
        });

        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                render_variables(f, area, &session, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("[x] a"));
        assert!(text.contains("[x] b"));
        assert!(text.contains("[ ] c"));
        assert!(!text.contains("time"));
    }

    #[test]
    fn parameter_panel_lists_defaults() {
        let session = Session::new(&Config::default(), None);
        let mut terminal = Terminal::new(TestBackend::new(50, 4)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                render_parameters(f, area, &session, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Parameters"));
        assert!(text.contains("Mass"));
        assert!(text.contains("100.00 N/m"));
    }
}
