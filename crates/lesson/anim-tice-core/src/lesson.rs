//! The extension point every concrete lesson implements.
//!
//! A lesson supplies its ordered steps and, optionally, overrides the
//! per-step hooks and teardown. The orchestrator decides when each is called.

use crate::config::LessonConfig;
use crate::engine::RenderEngine;
use crate::error::{ConfigError, TitleVariant};
use crate::stage::Stage;

/// Step body written as a plain function or method, e.g. `Self::step_intro`.
///
/// Function pointers carry no captured state, so lessons generic over the
/// engine can use their own methods with any `E`, borrowed engines included.
pub type StepFn<L, E> = fn(&mut L, &mut Stage<E>) -> anyhow::Result<()>;

/// Step body that captures its own state. Captures must be owned.
pub type StepClosure<L, E> = Box<dyn FnMut(&mut L, &mut Stage<E>) -> anyhow::Result<()>>;

/// Body of a step. Runs against the lesson's own state and the shared stage.
pub enum StepAction<L, E> {
    Method(StepFn<L, E>),
    Closure(StepClosure<L, E>),
}

/// A named unit of rendering work.
pub struct Step<L, E> {
    name: String,
    action: StepAction<L, E>,
}

impl<L, E> Step<L, E> {
    pub fn new(name: impl Into<String>, action: StepFn<L, E>) -> Self {
        Self {
            name: name.into(),
            action: StepAction::Method(action),
        }
    }

    pub fn from_closure<F>(name: impl Into<String>, action: F) -> Self
    where
        F: FnMut(&mut L, &mut Stage<E>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            action: StepAction::Closure(Box::new(action)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn execute(&mut self, lesson: &mut L, stage: &mut Stage<E>) -> anyhow::Result<()> {
        match &mut self.action {
            StepAction::Method(action) => action(lesson, stage),
            StepAction::Closure(action) => action(lesson, stage),
        }
    }
}

impl<L, E> std::fmt::Debug for Step<L, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// Ordered step sequence filled in by [`Lesson::build_steps`].
///
/// Order is preserved. Duplicate names are allowed.
pub struct StepList<L, E> {
    steps: Vec<Step<L, E>>,
}

impl<L, E> Default for StepList<L, E> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<L, E> StepList<L, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, action: StepFn<L, E>) -> &mut Self {
        self.steps.push(Step::new(name, action));
        self
    }

    /// Push only when `include` holds, for steps toggled by lesson style.
    pub fn push_if(
        &mut self,
        include: bool,
        name: impl Into<String>,
        action: StepFn<L, E>,
    ) -> &mut Self {
        if include {
            self.push(name, action);
        }
        self
    }

    /// Push a step whose body captures state, such as a loop variable.
    pub fn push_closure<F>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: FnMut(&mut L, &mut Stage<E>) -> anyhow::Result<()> + 'static,
    {
        self.steps.push(Step::from_closure(name, action));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.name())
    }

    pub(crate) fn into_steps(self) -> Vec<Step<L, E>> {
        self.steps
    }
}

impl<L, E> std::fmt::Debug for StepList<L, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// A concrete lesson.
///
/// Only [`build_steps`](Lesson::build_steps) is required. It is called exactly
/// once per run, by the orchestrator, and must add at least one step.
pub trait Lesson<E: RenderEngine>: Sized {
    /// Name used in logs and reports. Defaults to the type name without its
    /// module path or generic arguments.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Titles used when the caller does not pass a [`LessonConfig`].
    fn default_config(&self) -> Result<LessonConfig, ConfigError> {
        Err(ConfigError::MissingTitle {
            which: TitleVariant::English,
        })
    }

    fn build_steps(&self, stage: &Stage<E>, steps: &mut StepList<Self, E>);

    /// Runs before each step body. No-op by default.
    fn before_step(&mut self, _stage: &mut Stage<E>, _step: &str) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after each step body. Holds for the configured pause by default.
    fn after_step(&mut self, stage: &mut Stage<E>, _step: &str) -> anyhow::Result<()> {
        stage.pause()?;
        Ok(())
    }

    /// Runs once after the last step. Fades the title out by default.
    fn teardown(&mut self, stage: &mut Stage<E>) -> anyhow::Result<()> {
        stage.fade_out_title()?;
        Ok(())
    }
}

/// `a::b::Lesson<c::D>` -> `Lesson`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
