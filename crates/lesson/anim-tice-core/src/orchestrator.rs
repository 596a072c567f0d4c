//! Lesson lifecycle: build steps, show the title, run each step between its
//! hooks, tear down.
//!
//! Each [`Orchestrator`] runs its lesson once. Any failure aborts the remaining
//! steps and skips [`Lesson::teardown`], but the title is still removed from
//! the scene on the way out.

use std::ops::{Deref, DerefMut};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{LessonConfig, StyleConfig};
use crate::diagnostics::DiagnosticsCfg;
use crate::engine::RenderEngine;
use crate::error::{ConfigError, Hook, LessonError};
use crate::lesson::{Lesson, Step, StepList};
use crate::stage::Stage;
use crate::text::Language;

/// Where a lesson is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    StepsBuilt,
    TitleShown,
    /// Executing the step at this index (hooks included).
    Running(usize),
    TornDown,
    /// A run failed; the instance cannot be run again.
    Aborted,
}

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f32>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub lesson: String,
    pub language: Language,
    /// Title text as shown, in the active language.
    pub title: String,
    /// Executed steps in execution order.
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ms: Option<f32>,
}

impl RunReport {
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Drives one lesson through its lifecycle against a rendering engine.
pub struct Orchestrator<L, E> {
    lesson: L,
    stage: Stage<E>,
    steps: Vec<Step<L, E>>,
    phase: Phase,
    diagnostics: DiagnosticsCfg,
}

impl<L, E> Orchestrator<L, E>
where
    L: Lesson<E>,
    E: RenderEngine,
{
    /// Create an orchestrator. Omitted configuration falls back to the lesson's
    /// default titles and the baseline [`StyleConfig`].
    ///
    /// A style with a zero, negative or non-finite field is rejected.
    pub fn new(
        lesson: L,
        engine: E,
        config: Option<LessonConfig>,
        style: Option<StyleConfig>,
    ) -> Result<Self, LessonError> {
        let config = match config {
            Some(config) => config,
            None => lesson.default_config()?,
        };
        let style = style.unwrap_or_default();
        if !style.is_valid() {
            return Err(ConfigError::InvalidStyle.into());
        }
        Ok(Self::with_config(lesson, engine, config, style))
    }

    /// Create an orchestrator from complete configuration. The style is taken
    /// as given.
    pub fn with_config(lesson: L, engine: E, config: LessonConfig, style: StyleConfig) -> Self {
        Self {
            lesson,
            stage: Stage::new(engine, config, style),
            steps: Vec::new(),
            phase: Phase::Uninitialized,
            diagnostics: DiagnosticsCfg::default(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsCfg) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lesson(&self) -> &L {
        &self.lesson
    }

    pub fn stage(&self) -> &Stage<E> {
        &self.stage
    }

    /// Names of the built steps, empty before the run starts.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn into_parts(self) -> (L, Stage<E>) {
        (self.lesson, self.stage)
    }

    /// Run the whole lifecycle. Can only be called once per instance.
    pub fn run(&mut self) -> Result<RunReport, LessonError> {
        if self.phase != Phase::Uninitialized {
            return Err(LessonError::AlreadyRun);
        }
        let result = self.run_lifecycle();
        if let Err(err) = &result {
            warn!(lesson = self.lesson.name(), phase = ?self.phase, error = %err, "lesson aborted");
            self.phase = Phase::Aborted;
        }
        result
    }

    fn build_steps(&mut self) -> Result<(), LessonError> {
        let mut list = StepList::new();
        self.lesson.build_steps(&self.stage, &mut list);
        if list.is_empty() {
            return Err(ConfigError::NoSteps {
                lesson: self.lesson.name().to_string(),
            }
            .into());
        }
        self.steps = list.into_steps();
        self.phase = Phase::StepsBuilt;
        info!(
            lesson = self.lesson.name(),
            steps = self.steps.len(),
            "steps built"
        );
        Ok(())
    }

    fn run_lifecycle(&mut self) -> Result<RunReport, LessonError> {
        let started = Instant::now();
        self.build_steps()?;

        let Self {
            lesson,
            stage,
            steps,
            phase,
            diagnostics,
        } = self;

        stage.show_title()?;
        *phase = Phase::TitleShown;
        let title = stage.config().title().to_string();
        let language = stage.language();
        info!(lesson = lesson.name(), %language, title = %title, "title shown");

        let mut scope = TitleScope::new(stage);
        let mut executed = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter_mut().enumerate() {
            *phase = Phase::Running(index);
            let step_started = Instant::now();
            let name = step.name().to_string();
            debug!(index, step = %name, "step starting");

            lesson
                .before_step(&mut scope, &name)
                .map_err(|source| LessonError::Hook {
                    hook: Hook::BeforeStep,
                    name: name.clone(),
                    source,
                })?;
            step.execute(lesson, &mut scope)
                .map_err(|source| LessonError::Step {
                    index,
                    name: name.clone(),
                    source,
                })?;
            lesson
                .after_step(&mut scope, &name)
                .map_err(|source| LessonError::Hook {
                    hook: Hook::AfterStep,
                    name: name.clone(),
                    source,
                })?;

            let step_ms = elapsed_ms(step_started);
            debug!(index, step = %name, elapsed_ms = step_ms, "step finished");
            executed.push(StepRecord {
                name,
                elapsed_ms: diagnostics.enabled.then_some(step_ms),
            });
        }

        let last = executed
            .last()
            .map(|s: &StepRecord| s.name.clone())
            .unwrap_or_default();
        lesson
            .teardown(&mut scope)
            .map_err(|source| LessonError::Hook {
                hook: Hook::Teardown,
                name: last,
                source,
            })?;
        scope.disarm();
        *phase = Phase::TornDown;
        info!(lesson = lesson.name(), steps = executed.len(), "torn down");

        Ok(RunReport {
            lesson: lesson.name().to_string(),
            language,
            title,
            steps: executed,
            total_ms: diagnostics.enabled.then(|| elapsed_ms(started)),
        })
    }
}

impl<L, E> std::fmt::Debug for Orchestrator<L, E>
where
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("phase", &self.phase)
            .field("steps", &self.steps)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(since: Instant) -> f32 {
    since.elapsed().as_secs_f32() * 1000.0
}

/// Holds the stage while the title is on screen. Unless disarmed after a
/// clean teardown, dropping it removes the title from the scene.
struct TitleScope<'a, E: RenderEngine> {
    stage: &'a mut Stage<E>,
    armed: bool,
}

impl<'a, E: RenderEngine> TitleScope<'a, E> {
    fn new(stage: &'a mut Stage<E>) -> Self {
        Self { stage, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<E: RenderEngine> Deref for TitleScope<'_, E> {
    type Target = Stage<E>;

    fn deref(&self) -> &Stage<E> {
        self.stage
    }
}

impl<E: RenderEngine> DerefMut for TitleScope<'_, E> {
    fn deref_mut(&mut self) -> &mut Stage<E> {
        self.stage
    }
}

impl<E: RenderEngine> Drop for TitleScope<'_, E> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.stage.release_title() {
            Ok(Some(id)) => warn!(%id, "title released without teardown"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to release title"),
        }
    }
}
