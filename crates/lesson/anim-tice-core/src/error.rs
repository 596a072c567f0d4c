//! Error taxonomy for lesson configuration, engine calls and lesson runs.

use thiserror::Error;

use crate::engine::ObjectId;

/// Which title variant a [`ConfigError::MissingTitle`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleVariant {
    English,
    Other,
}

impl std::fmt::Display for TitleVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TitleVariant::English => f.write_str("english"),
            TitleVariant::Other => f.write_str("other-language"),
        }
    }
}

/// Problems with how a lesson was configured. Never recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{which} title is empty")]
    MissingTitle { which: TitleVariant },

    #[error("unsupported language tag '{tag}' (expected one of: en, ar)")]
    UnsupportedLanguage { tag: String },

    #[error("style values must be positive and finite")]
    InvalidStyle,

    #[error("lesson '{lesson}' built no steps")]
    NoSteps { lesson: String },
}

/// Failures reported by a [`RenderEngine`](crate::engine::RenderEngine).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown scene object {0}")]
    UnknownObject(ObjectId),

    #[error("render backend error: {0}")]
    Backend(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Lifecycle hook names carried by [`LessonError::Hook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    BeforeStep,
    AfterStep,
    Teardown,
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hook::BeforeStep => f.write_str("before_step"),
            Hook::AfterStep => f.write_str("after_step"),
            Hook::Teardown => f.write_str("teardown"),
        }
    }
}

/// Anything that can stop a lesson run.
#[derive(Debug, Error)]
pub enum LessonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("step {index} ('{name}') failed: {source}")]
    Step {
        index: usize,
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{hook} hook failed around step '{name}': {source}")]
    Hook {
        hook: Hook,
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("lesson has already been run; each instance runs exactly once")]
    AlreadyRun,
}

impl LessonError {
    /// The failing step's name, if this error came from a step body or one of its hooks.
    pub fn step_name(&self) -> Option<&str> {
        match self {
            LessonError::Step { name, .. } | LessonError::Hook { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, LessonError::Config(_))
    }
}
