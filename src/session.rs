//! Viewer session state.
//!
//! A `Session` is the single context object the frame loop, input
//! handlers and renderers share. It owns the loaded model, the current
//! result, the playback clock and everything derived from them.

use std::time::Instant;

use crate::config::Config;
use crate::player::playback::{self, clock, Ticker};
use crate::player::state::{PlaybackSpeed, PlaybackState};
use crate::scene::{default_camera, Camera, PositionMapping, SceneFrame};
use crate::simulation::{
    ModelFile, Parameters, SimulationError, SimulationOutcome, SimulationRequest, SimulationWorker,
};
use crate::trajectory::{history_until, sample_at, Sample, SimulationResult, TimeRange, TimeSeries};

/// Which side panel receives list navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Parameters,
    Variables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Shared viewer state.
pub struct Session {
    model: Option<ModelFile>,
    pub parameters: Parameters,
    result: Option<SimulationResult>,
    pub playback: PlaybackState,
    pub speed: PlaybackSpeed,
    pub frame: SceneFrame,
    pub camera: Camera,
    selected: Vec<String>,
    pub focus: Focus,
    pub parameter_cursor: usize,
    pub variable_cursor: usize,
    pub status: Option<StatusMessage>,
    pub show_panels: bool,
    pub show_help: bool,
    pub show_inspector: bool,
    pending: Option<u64>,
    ticker: Ticker,
    mapping: PositionMapping,
    object_index: usize,
    default_variables: usize,
    seek_step: f64,
    autoplay: bool,
}

impl Session {
    pub fn new(config: &Config, model: Option<ModelFile>) -> Self {
        Self {
            model,
            parameters: config.initial_parameters(),
            result: None,
            playback: PlaybackState::INITIAL,
            speed: config.initial_speed(),
            frame: SceneFrame::initial(),
            camera: default_camera(),
            selected: Vec::new(),
            focus: Focus::default(),
            parameter_cursor: 0,
            variable_cursor: 0,
            status: None,
            show_panels: true,
            show_help: false,
            show_inspector: false,
            pending: None,
            ticker: Ticker::new(),
            mapping: config.position_mapping(),
            object_index: config.scene.object_index,
            default_variables: config.chart.default_variables,
            seek_step: config.playback.seek_step,
            autoplay: config.playback.autoplay,
        }
    }

    pub fn model(&self) -> Option<&ModelFile> {
        self.model.as_ref()
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn time_range(&self) -> Option<TimeRange> {
        self.result.as_ref().map(|r| r.time_range)
    }

    /// Trajectory of the animated object.
    pub fn series(&self) -> Option<&TimeSeries> {
        self.result.as_ref()?.series(self.object_index)
    }

    /// Sample shown at the current playback time.
    pub fn current_sample(&self) -> Option<&Sample> {
        sample_at(self.series()?, self.playback.current_time)
    }

    /// Samples up to the current playback time.
    pub fn history(&self) -> &[Sample] {
        match self.series() {
            Some(series) => history_until(series, self.playback.current_time),
            None => &[],
        }
    }

    pub fn selected_variables(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, variable: &str) -> bool {
        self.selected.iter().any(|v| v == variable)
    }

    /// Variables offered in the variable panel.
    pub fn chartable_variables(&self) -> Vec<&str> {
        self.result
            .as_ref()
            .map(|r| r.chartable_variables().collect())
            .unwrap_or_default()
    }

    pub fn is_simulating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn seek_step(&self) -> f64 {
        self.seek_step
    }

    /// Replace the displayed result.
    ///
    /// Playback stops at time zero (clamped into the new range), the chart
    /// selection falls back to the first chartable variables and the
    /// scene jumps to the first sample.
    pub fn load_result(&mut self, result: SimulationResult) {
        let range = result.time_range;
        self.selected = result
            .chartable_variables()
            .take(self.default_variables)
            .map(str::to_string)
            .collect();
        tracing::info!(
            objects = result.objects.len(),
            samples = result.sample_count(),
            min = range.min(),
            max = range.max(),
            "loaded simulation result"
        );
        self.status = Some(StatusMessage::info(format!(
            "Loaded {} samples over {:.2}s",
            result.sample_count(),
            range.duration()
        )));
        self.result = Some(result);
        self.variable_cursor = 0;
        self.ticker.stop();
        self.playback = clock::reset(range);
        if self.autoplay {
            self.playback = clock::toggle(self.playback, range);
        }
        self.refresh_frame();
    }

    /// Build a request from the loaded model and current parameters.
    pub fn prepare_request(&self) -> Result<SimulationRequest, SimulationError> {
        if self.pending.is_some() {
            return Err(SimulationError::Busy);
        }
        let model = self.model.as_ref().ok_or(SimulationError::NoModel)?;
        Ok(SimulationRequest {
            model: model.clone(),
            parameters: self.parameters.to_json(),
        })
    }

    /// Submit a re-simulation to `worker`.
    ///
    /// The current result stays on screen until the outcome arrives.
    pub fn begin_simulation(&mut self, worker: &mut SimulationWorker) -> Result<u64, SimulationError> {
        let submitted = self
            .prepare_request()
            .and_then(|request| worker.submit(request));
        match submitted {
            Ok(id) => {
                tracing::info!(id, backend = worker.backend(), "simulation requested");
                self.pending = Some(id);
                self.status = Some(StatusMessage::info("Simulating..."));
                Ok(id)
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Apply a finished simulation.
    ///
    /// A failure leaves the previous result and playback state untouched
    /// and only reports the error.
    pub fn apply_outcome(&mut self, outcome: SimulationOutcome) {
        if self.pending != Some(outcome.id) {
            tracing::debug!(id = outcome.id, "ignoring stale simulation outcome");
            return;
        }
        self.pending = None;
        match outcome.result {
            Ok(result) => self.load_result(result),
            Err(e) => {
                tracing::warn!(error = %e, "simulation failed, keeping previous result");
                self.status = Some(StatusMessage::error(e.user_message()));
            }
        }
    }

    /// Advance playback by the wall-clock time since the last tick.
    pub fn tick(&mut self, now: Instant) {
        let Some(range) = self.time_range() else {
            self.ticker.stop();
            return;
        };
        let delta = self.ticker.elapsed(now, self.playback.is_playing);
        if delta > 0.0 {
            self.playback = playback::step(self.playback, delta, self.speed, range);
            self.refresh_frame();
        }
        if !self.playback.is_playing {
            self.ticker.stop();
        }
    }

    /// Whether the frame loop should keep ticking at full rate.
    pub fn is_animating(&self) -> bool {
        self.playback.is_playing
    }

    pub fn toggle_playback(&mut self) {
        self.apply_clock(clock::toggle);
    }

    /// Stop and rewind to time zero, clamped into the loaded range.
    pub fn reset_playback(&mut self) {
        if let Some(range) = self.time_range() {
            self.playback = clock::reset(range);
            self.ticker.stop();
            self.refresh_frame();
        }
    }

    pub fn seek_by(&mut self, offset: f64) {
        self.apply_clock(|state, range| clock::seek_by(state, offset, range));
    }

    pub fn seek_to_fraction(&mut self, fraction: f64) {
        self.apply_clock(|state, range| clock::seek_to_fraction(state, fraction, range));
    }

    pub fn jump_to_start(&mut self) {
        self.apply_clock(clock::jump_to_start);
    }

    pub fn jump_to_end(&mut self) {
        self.apply_clock(clock::jump_to_end);
    }

    fn apply_clock(&mut self, op: impl FnOnce(PlaybackState, TimeRange) -> PlaybackState) {
        let Some(range) = self.time_range() else {
            return;
        };
        self.playback = op(self.playback, range);
        if !self.playback.is_playing {
            self.ticker.stop();
        }
        self.refresh_frame();
    }

    fn refresh_frame(&mut self) {
        self.frame = playback::frame_at(
            &self.frame,
            self.series(),
            self.playback.current_time,
            &self.mapping,
        );
    }

    /// Add or remove a variable from the chart.
    pub fn toggle_variable(&mut self, variable: &str) {
        if let Some(pos) = self.selected.iter().position(|v| v == variable) {
            self.selected.remove(pos);
        } else if self.chartable_variables().contains(&variable) {
            self.selected.push(variable.to_string());
        }
    }

    pub fn toggle_variable_at_cursor(&mut self) {
        let Some(name) = self
            .chartable_variables()
            .get(self.variable_cursor)
            .map(|v| v.to_string())
        else {
            return;
        };
        self.toggle_variable(&name);
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Parameters => Focus::Variables,
            Focus::Variables => Focus::Parameters,
        };
    }

    /// Move the cursor of the focused panel.
    pub fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            Focus::Parameters => (&mut self.parameter_cursor, self.parameters.len()),
            Focus::Variables => {
                let len = self.result.as_ref().map_or(0, |r| r.chartable_variables().count());
                (&mut self.variable_cursor, len)
            }
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Step the selected parameter by whole increments.
    pub fn nudge_parameter(&mut self, steps: i32) {
        if let Some(param) = self.parameters.get_mut(self.parameter_cursor) {
            param.nudge(steps);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::DVec3;

    use super::*;
    use crate::simulation::SimulationBackend;
    use crate::trajectory::SimObject;

    fn sample(t: f64, y: f64) -> Sample {
        Sample::new(t)
            .with("body1.r_0[1]", 0.3)
            .with("body1.r_0[2]", y)
            .with("body1.r_0[3]", 0.0)
            .with("spring.f", y * 10.0)
    }

    fn result(max: f64) -> SimulationResult {
        SimulationResult {
            time_range: TimeRange::new(0.0, max).unwrap(),
            variables: vec![
                "time".into(),
                "body1.r_0[2]".into(),
                "spring.f".into(),
                "body1.r_0[1]".into(),
            ],
            objects: vec![SimObject {
                id: "mass".into(),
                kind: "trajectory".into(),
                data: TimeSeries::new(vec![sample(0.0, -0.2), sample(1.0, -1.0), sample(max, -1.5)])
                    .unwrap(),
            }],
        }
    }

    fn session() -> Session {
        Session::new(&Config::default(), Some(ModelFile::new("msd.fmu", vec![1, 2, 3])))
    }

    struct FailingBackend;

    impl SimulationBackend for FailingBackend {
        fn describe(&self) -> String {
            "failing".into()
        }

        fn simulate(&self, _: &SimulationRequest) -> Result<SimulationResult, SimulationError> {
            Err(SimulationError::Upstream {
                status: 500,
                message: "solver diverged".into(),
            })
        }
    }

    #[test]
    fn load_resets_playback_and_selects_defaults() {
        let mut s = session();
        s.playback = PlaybackState::new(3.0, true);
        s.load_result(result(5.0));

        assert_eq!(s.playback, PlaybackState::new(0.0, false));
        assert_eq!(s.selected_variables(), ["body1.r_0[2]", "spring.f"]);
        assert_eq!(s.frame.mass, DVec3::new(0.3, -0.2, 0.0));
    }

    #[test]
    fn load_clamps_start_into_range() {
        let mut s = session();
        let mut r = result(5.0);
        r.time_range = TimeRange::new(1.0, 5.0).unwrap();
        s.load_result(r);
        assert_eq!(s.playback.current_time, 1.0);
    }

    #[test]
    fn reset_stays_inside_late_starting_range() {
        let mut s = session();
        let mut r = result(5.0);
        r.time_range = TimeRange::new(1.0, 5.0).unwrap();
        s.load_result(r);

        s.jump_to_end();
        s.reset_playback();
        assert_eq!(s.playback, PlaybackState::new(1.0, false));

        s.toggle_playback();
        assert_eq!(s.playback, PlaybackState::new(1.0, true));
        s.tick(std::time::Instant::now());
        let range = s.time_range().unwrap();
        assert!(range.contains(s.playback.current_time));
    }

    #[test]
    fn autoplay_starts_playing_after_load() {
        let mut config = Config::default();
        config.playback.autoplay = true;
        let mut s = Session::new(&config, None);
        s.load_result(result(5.0));
        assert!(s.playback.is_playing);
    }

    #[test]
    fn tick_advances_and_moves_the_mass() {
        let mut s = session();
        s.load_result(result(5.0));
        s.toggle_playback();

        let t0 = Instant::now();
        s.tick(t0);
        s.tick(t0 + Duration::from_millis(500));
        assert!((s.playback.current_time - 0.5).abs() < 1e-9);
        // Ceiling lookup: 0.5 shows the sample at 1.0
        assert_eq!(s.frame.mass.y, -1.0);
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let mut s = session();
        s.load_result(result(5.0));
        let t0 = Instant::now();
        s.tick(t0);
        s.tick(t0 + Duration::from_secs(2));
        assert_eq!(s.playback.current_time, 0.0);
    }

    #[test]
    fn controls_without_result_are_ignored() {
        let mut s = session();
        s.toggle_playback();
        s.seek_by(1.0);
        s.jump_to_end();
        assert_eq!(s.playback, PlaybackState::INITIAL);
        assert_eq!(s.frame, SceneFrame::initial());
    }

    #[test]
    fn seeking_updates_frame() {
        let mut s = session();
        s.load_result(result(5.0));
        s.jump_to_end();
        assert_eq!(s.playback, PlaybackState::new(5.0, false));
        assert_eq!(s.frame.mass.y, -1.5);

        s.reset_playback();
        assert_eq!(s.playback, PlaybackState::INITIAL);
        assert_eq!(s.frame.mass.y, -0.2);
    }

    #[test]
    fn simulation_requires_a_model() {
        let mut s = Session::new(&Config::default(), None);
        let mut worker = SimulationWorker::spawn(Box::new(FailingBackend));
        let err = s.begin_simulation(&mut worker).unwrap_err();
        assert_eq!(err, SimulationError::NoModel);
        assert_eq!(s.status.as_ref().unwrap().text, "Load a model file first");
        assert!(!s.is_simulating());
    }

    #[test]
    fn second_request_while_busy_is_refused() {
        let mut s = session();
        let mut worker = SimulationWorker::spawn(Box::new(FailingBackend));
        s.begin_simulation(&mut worker).unwrap();
        assert!(s.is_simulating());
        assert_eq!(s.begin_simulation(&mut worker), Err(SimulationError::Busy));
    }

    #[test]
    fn failed_simulation_keeps_previous_result_and_playback() {
        let mut s = session();
        s.load_result(result(5.0));
        s.seek_by(2.0);
        s.toggle_variable("spring.f");
        let before_playback = s.playback;
        let before_selection = s.selected_variables().to_vec();

        let mut worker = SimulationWorker::spawn(Box::new(FailingBackend));
        s.begin_simulation(&mut worker).unwrap();
        let outcome = worker.wait(Duration::from_secs(5)).expect("outcome");
        s.apply_outcome(outcome);

        assert!(!s.is_simulating());
        assert_eq!(s.result(), Some(&result(5.0)));
        assert_eq!(s.playback, before_playback);
        assert_eq!(s.selected_variables(), before_selection.as_slice());
        let status = s.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Simulation failed: solver diverged");
    }

    #[test]
    fn successful_outcome_replaces_result() {
        let mut s = session();
        s.load_result(result(5.0));
        s.seek_by(3.0);
        s.pending = Some(7);

        s.apply_outcome(SimulationOutcome {
            id: 7,
            result: Ok(result(8.0)),
        });
        assert_eq!(s.time_range().unwrap().max(), 8.0);
        assert_eq!(s.playback, PlaybackState::INITIAL);
        assert!(!s.is_simulating());
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut s = session();
        s.pending = Some(2);
        s.apply_outcome(SimulationOutcome {
            id: 1,
            result: Ok(result(8.0)),
        });
        assert!(s.result().is_none());
        assert!(s.is_simulating());
    }

    #[test]
    fn toggling_variables() {
        let mut s = session();
        s.load_result(result(5.0));
        s.toggle_variable("body1.r_0[2]");
        assert_eq!(s.selected_variables(), ["spring.f"]);
        s.toggle_variable("body1.r_0[1]");
        assert_eq!(s.selected_variables(), ["spring.f", "body1.r_0[1]"]);
        // Unknown and time columns are not chartable
        s.toggle_variable("time");
        s.toggle_variable("nope");
        assert_eq!(s.selected_variables().len(), 2);
    }

    #[test]
    fn cursor_stays_inside_focused_list() {
        let mut s = session();
        s.load_result(result(5.0));
        s.move_cursor(5);
        assert_eq!(s.parameter_cursor, 1);
        s.move_cursor(-9);
        assert_eq!(s.parameter_cursor, 0);

        s.switch_focus();
        s.move_cursor(2);
        assert_eq!(s.variable_cursor, 2);
        s.toggle_variable_at_cursor();
        assert!(s.is_selected("body1.r_0[1]"));
    }

    #[test]
    fn nudge_changes_selected_parameter() {
        let mut s = session();
        s.parameter_cursor = 1;
        s.nudge_parameter(2);
        assert_eq!(s.parameters.get("stiffness").unwrap().value, 110.0);
        assert_eq!(s.parameters.get("mass").unwrap().value, 1.0);
    }
}
