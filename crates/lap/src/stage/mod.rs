//! Workflow stages and the runner that drives them.
//!
//! Every stage is a composition of validate, load, compute, persist. The
//! runner walks a stage through `Idle -> Validating -> Running -> Done`,
//! dropping to `Failed` on the first error. Nothing is retried.

mod analyze;
mod pipeline;
mod progress;
mod qc;
mod report;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{LapError, Result};

pub use analyze::{
    AnalysisReport, AnalyzeConfig, AnalyzeStage, Analyzer, FeatureResult, PlaceholderAnalyzer,
    results_table,
};
pub use pipeline::{GUIDANCE_STEPS, PipelineConfig, PipelineOutputs, run_pipeline};
pub use progress::ProgressLog;
pub use qc::{QcConfig, QcReport, QcStage, QcStatus, compute_qc};
pub use report::{ReportConfig, ReportStage};

/// A single named unit of pipeline work.
pub trait Stage {
    /// Stage name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Check inputs before any processing starts.
    fn validate(&self) -> Result<()>;

    /// Load inputs, compute, and write outputs.
    fn run(&self) -> Result<StageOutcome>;

    /// Shared progress log to append the outcome summary to, if any.
    fn log_file(&self) -> Option<&Path> {
        None
    }
}

/// What a completed stage produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// One-line summary, also appended to the progress log.
    pub summary: String,
    /// Files written by the stage.
    pub outputs: Vec<PathBuf>,
}

impl StageOutcome {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.push(path.into());
        self
    }
}

/// Lifecycle state of a stage invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageState {
    #[default]
    Idle,
    Validating,
    Running,
    Done,
    Failed,
}

impl StageState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: StageState) -> bool {
        use StageState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Running)
                | (Validating, Failed)
                | (Running, Done)
                | (Running, Failed)
        )
    }

    /// Done and Failed are terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, StageState::Done | StageState::Failed)
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageState::Idle => write!(f, "idle"),
            StageState::Validating => write!(f, "validating"),
            StageState::Running => write!(f, "running"),
            StageState::Done => write!(f, "done"),
            StageState::Failed => write!(f, "failed"),
        }
    }
}

/// Drives one stage invocation through its lifecycle.
#[derive(Debug, Default)]
pub struct StageRunner {
    state: StageState,
}

impl StageRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StageState {
        self.state
    }

    /// Run a stage to completion. A runner drives a single invocation;
    /// calling this again after a terminal state runs from `Idle` again.
    pub fn execute(&mut self, stage: &dyn Stage) -> Result<StageOutcome> {
        self.state = StageState::Idle;
        info!("Starting {} stage", stage.name());

        self.transition(stage, StageState::Validating);
        if let Err(e) = stage.validate() {
            return Err(self.fail(stage, e));
        }

        self.transition(stage, StageState::Running);
        let outcome = match stage.run() {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail(stage, e)),
        };

        if let Some(log_file) = stage.log_file() {
            if let Err(e) = ProgressLog::new(log_file).append(&outcome.summary) {
                return Err(self.fail(stage, e));
            }
        }

        self.transition(stage, StageState::Done);
        info!("{}", outcome.summary);
        for path in &outcome.outputs {
            info!("Results saved to: {}", path.display());
        }
        Ok(outcome)
    }

    fn transition(&mut self, stage: &dyn Stage, next: StageState) {
        debug_assert!(self.state.can_transition_to(next));
        debug!("{} stage: {} -> {}", stage.name(), self.state, next);
        self.state = next;
    }

    fn fail(&mut self, stage: &dyn Stage, err: LapError) -> LapError {
        self.transition(stage, StageState::Failed);
        debug!("{} stage failed: {}", stage.name(), err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::cell::Cell;

    struct FakeStage {
        valid: bool,
        succeed: bool,
        ran: Cell<bool>,
        log_file: Option<PathBuf>,
    }

    impl FakeStage {
        fn new(valid: bool, succeed: bool) -> Self {
            Self {
                valid,
                succeed,
                ran: Cell::new(false),
                log_file: None,
            }
        }
    }

    impl Stage for FakeStage {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn validate(&self) -> Result<()> {
            if self.valid {
                Ok(())
            } else {
                Err(LapError::NotFound {
                    path: PathBuf::from("missing.tsv"),
                })
            }
        }

        fn run(&self) -> Result<StageOutcome> {
            self.ran.set(true);
            if self.succeed {
                Ok(StageOutcome::new("fake completed"))
            } else {
                Err(LapError::stage("fake", "boom"))
            }
        }

        fn log_file(&self) -> Option<&Path> {
            self.log_file.as_deref()
        }
    }

    #[test]
    fn test_transitions() {
        use StageState::*;
        assert!(Idle.can_transition_to(Validating));
        assert!(Validating.can_transition_to(Failed));
        assert!(Running.can_transition_to(Done));
        assert!(!Idle.can_transition_to(Running));
        assert!(!Done.can_transition_to(Running));
        assert!(!Failed.can_transition_to(Validating));
        assert!(Done.is_terminal() && Failed.is_terminal());
    }

    #[test]
    fn test_success_reaches_done() {
        let mut runner = StageRunner::new();
        let outcome = runner.execute(&FakeStage::new(true, true)).unwrap();
        assert_eq!(outcome.summary, "fake completed");
        assert_eq!(runner.state(), StageState::Done);
    }

    #[test]
    fn test_validation_failure_skips_run() {
        let stage = FakeStage::new(false, true);
        let mut runner = StageRunner::new();

        let err = runner.execute(&stage).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(runner.state(), StageState::Failed);
        assert!(!stage.ran.get());
    }

    #[test]
    fn test_run_failure() {
        let mut runner = StageRunner::new();
        let err = runner.execute(&FakeStage::new(true, false)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StageFailure);
        assert_eq!(runner.state(), StageState::Failed);
    }

    #[test]
    fn test_appends_progress_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("logs/pipeline.log");
        let mut stage = FakeStage::new(true, true);
        stage.log_file = Some(log.clone());

        StageRunner::new().execute(&stage).unwrap();
        StageRunner::new().execute(&stage).unwrap();

        let text = std::fs::read_to_string(&log).unwrap();
        assert_eq!(text, "fake completed\nfake completed\n");
    }
}
