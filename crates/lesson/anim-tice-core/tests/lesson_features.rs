use anim_tice::recording::Command;
use anim_tice::{
    place_as_banner, resolve, Animation, ConfigError, Edge, Language, Lesson, LessonConfig,
    Orchestrator, RecordingEngine, RenderEngine, Stage, StepList, TextOptions,
};

/// Prompts replace the title; an optional step is toggled by the lesson's own style.
struct Parallels {
    show_real_world: bool,
    shown_prompts: Vec<String>,
}

impl Parallels {
    fn step_explore<E: RenderEngine>(&mut self, stage: &mut Stage<E>) -> anyhow::Result<()> {
        let title = stage.retitle("Look at the rails.", "انظر إلى السكة.")?;
        self.shown_prompts
            .push(stage.resolve("Look at the rails.", "انظر إلى السكة.").to_string());
        assert_eq!(stage.title(), Some(title));
        Ok(())
    }

    fn step_real_world<E: RenderEngine>(&mut self, stage: &mut Stage<E>) -> anyhow::Result<()> {
        let hint = stage.text("Rails never meet.", "السكتان لا تلتقيان.")?;
        stage.engine_mut().to_edge(hint, Edge::Bottom);
        let rt = stage.style().rt_fast;
        stage.play(Animation::FadeIn { target: hint }, rt)?;
        stage.play(Animation::FadeOut { target: hint }, rt)?;
        Ok(())
    }

    fn step_rule<E: RenderEngine>(&mut self, stage: &mut Stage<E>) -> anyhow::Result<()> {
        stage.retitle("Parallel lines never meet.", "المستقيمان المتوازيان لا يلتقيان.")?;
        self.shown_prompts.push(
            stage
                .resolve("Parallel lines never meet.", "المستقيمان المتوازيان لا يلتقيان.")
                .to_string(),
        );
        Ok(())
    }
}

impl<E: RenderEngine> Lesson<E> for Parallels {
    fn name(&self) -> &str {
        "M3_G06"
    }

    fn default_config(&self) -> Result<LessonConfig, ConfigError> {
        LessonConfig::new(
            "Parallelism and perpendicularity",
            "التوازي والتعامد",
            "ar",
        )
    }

    fn build_steps(&self, _stage: &Stage<E>, steps: &mut StepList<Self, E>) {
        steps
            .push("explore", Self::step_explore)
            .push_if(self.show_real_world, "real_world", Self::step_real_world)
            .push("rule", Self::step_rule);
    }
}

fn lesson(show_real_world: bool) -> Parallels {
    Parallels {
        show_real_world,
        shown_prompts: Vec::new(),
    }
}

#[test]
fn default_config_and_style_apply_when_omitted() {
    let mut orch = Orchestrator::new(lesson(true), RecordingEngine::new(), None, None).unwrap();
    let report = orch.run().unwrap();

    assert_eq!(report.lesson, "M3_G06");
    assert_eq!(report.language, Language::Ar);
    assert_eq!(report.title, "التوازي والتعامد");
    assert_eq!(report.step_names(), vec!["explore", "real_world", "rule"]);
    assert_eq!(
        orch.lesson().shown_prompts,
        vec!["انظر إلى السكة.", "المستقيمان المتوازيان لا يلتقيان."]
    );
}

#[test]
fn toggled_off_step_is_never_built() {
    let mut orch = Orchestrator::new(lesson(false), RecordingEngine::new(), None, None).unwrap();
    assert!(orch.step_names().is_empty());
    let report = orch.run().unwrap();
    assert_eq!(report.step_names(), vec!["explore", "rule"]);
}

#[test]
fn retitled_banner_is_the_one_faded_at_teardown() {
    let config = LessonConfig::new("Parallel lines", "المستقيمات المتوازية", "en").unwrap();
    let mut orch =
        Orchestrator::new(lesson(false), RecordingEngine::new(), Some(config), None).unwrap();
    orch.run().unwrap();

    let engine = orch.stage().engine();
    let title = match &engine.timeline()[0].command {
        Command::Text { id, content, .. } => {
            assert_eq!(content, "Parallel lines");
            *id
        }
        other => panic!("expected title text first, got {other:?}"),
    };

    let transforms = engine
        .timeline()
        .iter()
        .filter(|e| {
            matches!(e.command, Command::Play { animation: Animation::Transform { source, .. }, .. } if source == title)
        })
        .count();
    assert_eq!(transforms, 2);

    let last = &engine.timeline().last().unwrap().command;
    assert_eq!(
        *last,
        Command::Play {
            animation: Animation::FadeOut { target: title },
            run_time: orch.stage().style().rt_fast,
        }
    );
    assert_eq!(
        engine.object(title).unwrap().content,
        "Parallel lines never meet."
    );
    assert_eq!(engine.on_screen().count(), 0);
}

#[test]
fn resolver_and_banner_compose_on_any_engine() {
    let mut engine = RecordingEngine::new();
    let text = resolve("Ruler", "مسطرة", "ar").unwrap();
    let id = anim_tice::text::render_text(
        &mut engine,
        text,
        TextOptions::body(&Default::default()).with_scale(0.4),
    )
    .unwrap();
    let pinned = place_as_banner(&mut engine, id);

    let obj = engine.object(pinned).unwrap();
    assert_eq!(obj.content, "مسطرة");
    assert_eq!(obj.scale, 0.4);
    assert!(obj.position[1] > 3.0);
}

#[test]
fn borrowed_engine_outlives_the_lesson() {
    let mut engine = RecordingEngine::new();
    {
        let mut orch = Orchestrator::new(lesson(false), &mut engine, None, None).unwrap();
        orch.run().unwrap();
    }
    assert_eq!(engine.written_texts(), vec!["التوازي والتعامد"]);
    assert_eq!(engine.on_screen().count(), 0);
}
