//! Dry-runs a ruler lesson on the recording engine and prints its storyboard.
//!
//! cargo run -p anim-tice-core --example ruler_lesson -- ar

use anim_tice::{
    Animation, ConfigError, Lesson, LessonConfig, Orchestrator, RecordingEngine, RenderEngine,
    Stage, StepList, StyleConfig,
};

/// Lesson-specific knobs layered over the shared style.
#[derive(Clone, Debug)]
struct RulerStyle {
    base: StyleConfig,
    show_freehand_contrast: bool,
    font_size_small: f32,
}

impl Default for RulerStyle {
    fn default() -> Self {
        Self {
            base: StyleConfig::default(),
            show_freehand_contrast: true,
            font_size_small: 28.0,
        }
    }
}

struct RulerLesson {
    style: RulerStyle,
}

impl RulerLesson {
    fn step_intro<E: RenderEngine>(&mut self, _stage: &mut Stage<E>) -> anyhow::Result<()> {
        Ok(())
    }

    fn step_freehand_vs_ruler<E: RenderEngine>(&mut self, stage: &mut Stage<E>) -> anyhow::Result<()> {
        stage.retitle(
            "Exploration: freehand vs ruler.",
            "استكشاف: الرسم الحر مقابل المسطرة.",
        )?;
        stage.wait(0.15)?;
        Ok(())
    }

    fn step_construct_segment<E: RenderEngine>(&mut self, stage: &mut Stage<E>) -> anyhow::Result<()> {
        stage.retitle("Align the ruler with the two points.", "نحاذي المسطرة مع النقطتين.")?;
        let rt_fast = stage.style().rt_fast;
        for label in ["A", "B"] {
            let id = stage.text_same(label)?;
            stage.play(Animation::FadeIn { target: id }, rt_fast)?;
        }
        stage.retitle("Trace the segment along the ruler edge.", "نرسم القطعة على حافة المسطرة.")?;
        Ok(())
    }

    fn step_institutionalization<E: RenderEngine>(
        &mut self,
        stage: &mut Stage<E>,
    ) -> anyhow::Result<()> {
        stage.retitle("Institutionalization: segment vs line.", "التثبيت: القطعة والمستقيم.")?;
        let opts = anim_tice::TextOptions::body(stage.style())
            .with_font_size(self.style.font_size_small)
            .with_scale(0.55);
        let summary = stage.text_with(
            "Segment: has two endpoints (A and B).",
            "القطعة: لها نهايتان (A و B).",
            opts,
        )?;
        let rt_norm = stage.style().rt_norm;
        stage.play(Animation::FadeIn { target: summary }, rt_norm)?;
        stage.wait(1.0)?;
        Ok(())
    }
}

impl<E: RenderEngine> Lesson<E> for RulerLesson {
    fn default_config(&self) -> Result<LessonConfig, ConfigError> {
        LessonConfig::new(
            "Using a ruler to construct line segments and lines",
            "استعمال المسطرة لإنشاء قطع ومستقيمات",
            "en",
        )
    }

    fn build_steps(&self, _stage: &Stage<E>, steps: &mut StepList<Self, E>) {
        steps.push("intro", Self::step_intro);
        steps.push_if(
            self.style.show_freehand_contrast,
            "freehand_vs_ruler",
            Self::step_freehand_vs_ruler,
        );
        steps
            .push("construct_segment", Self::step_construct_segment)
            .push("institutionalization", Self::step_institutionalization);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "anim_tice=info".into()))
        .init();

    let lesson = RulerLesson {
        style: RulerStyle::default(),
    };
    let config = match std::env::args().nth(1) {
        Some(tag) => Some(LessonConfig::with_language(
            "Using a ruler to construct line segments and lines",
            "استعمال المسطرة لإنشاء قطع ومستقيمات",
            tag.parse()?,
        )?),
        None => None,
    };
    let style = lesson.style.base.clone();

    let mut orch = Orchestrator::new(lesson, RecordingEngine::new(), config, Some(style))?;
    let report = orch.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let (_, stage) = orch.into_parts();
    println!("{}", stage.engine().timeline_json()?);
    Ok(())
}
