//! anim-tice-core
//!
//! Lifecycle layer for bilingual animated lessons. A lesson supplies an ordered
//! list of named steps; the [`Orchestrator`] builds them, writes the title in as
//! a banner, runs each step between its hooks and fades the title out. All
//! drawing is delegated to a [`RenderEngine`] implementation.
//!
//! ```no_run
//! use anim_tice::{Lesson, LessonConfig, Orchestrator, RecordingEngine, RenderEngine, Stage, StepList};
//!
//! struct Intro;
//!
//! impl<E: RenderEngine> Lesson<E> for Intro {
//!     fn build_steps(&self, _stage: &Stage<E>, steps: &mut StepList<Self, E>) {
//!         steps.push("intro", |_, stage| {
//!             stage.retitle("Let's measure.", "لنقس.")?;
//!             Ok(())
//!         });
//!     }
//! }
//!
//! let config = LessonConfig::new("Ruler", "مسطرة", "en")?;
//! let mut lesson = Orchestrator::new(Intro, RecordingEngine::new(), Some(config), None)?;
//! let report = lesson.run()?;
//! assert_eq!(report.title, "Ruler");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod banner;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod lesson;
pub mod orchestrator;
pub mod recording;
pub mod stage;
pub mod text;

pub use crate::banner::place_as_banner;
pub use crate::config::{LessonConfig, StyleConfig};
pub use crate::diagnostics::DiagnosticsCfg;
pub use crate::engine::{Animation, Edge, ObjectId, RenderEngine};
pub use crate::error::{ConfigError, EngineError, EngineResult, Hook, LessonError, TitleVariant};
pub use crate::lesson::{Lesson, Step, StepAction, StepClosure, StepFn, StepList};
pub use crate::orchestrator::{Orchestrator, Phase, RunReport, StepRecord};
pub use crate::recording::RecordingEngine;
pub use crate::stage::Stage;
pub use crate::text::{resolve, Language, TextOptions};
