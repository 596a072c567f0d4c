//! Per-lesson context handed to step bodies and lifecycle hooks.

use crate::banner::place_as_banner;
use crate::config::{LessonConfig, StyleConfig};
use crate::engine::{Animation, ObjectId, RenderEngine};
use crate::error::EngineResult;
use crate::text::{render_text, Language, TextOptions};

/// Owns the engine, both configuration records and the title artifact.
#[derive(Debug)]
pub struct Stage<E> {
    engine: E,
    config: LessonConfig,
    style: StyleConfig,
    title: Option<ObjectId>,
}

impl<E: RenderEngine> Stage<E> {
    pub fn new(engine: E, config: LessonConfig, style: StyleConfig) -> Self {
        Self {
            engine,
            config,
            style,
            title: None,
        }
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn language(&self) -> Language {
        self.config.language()
    }

    /// The banner currently owned by the lesson, if shown and not yet torn down.
    pub fn title(&self) -> Option<ObjectId> {
        self.title
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Direct engine access for step bodies drawing their own content.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Pick the variant matching the lesson language.
    pub fn resolve<'a>(&self, english: &'a str, other: &'a str) -> &'a str {
        self.language().pick(english, other)
    }

    /// Body text in the lesson language, at the default scale.
    pub fn text(&mut self, english: &str, other: &str) -> EngineResult<ObjectId> {
        let opts = TextOptions::body(&self.style);
        self.text_with(english, other, opts)
    }

    pub fn text_with(
        &mut self,
        english: &str,
        other: &str,
        opts: TextOptions,
    ) -> EngineResult<ObjectId> {
        let content = self.language().pick(english, other);
        render_text(&mut self.engine, content, opts)
    }

    /// Body text shown identically in every language, such as numbers, letters
    /// or symbols.
    pub fn text_same(&mut self, content: &str) -> EngineResult<ObjectId> {
        let opts = TextOptions::body(&self.style);
        self.text_same_with(content, opts)
    }

    pub fn text_same_with(
        &mut self,
        content: &str,
        opts: TextOptions,
    ) -> EngineResult<ObjectId> {
        render_text(&mut self.engine, content, opts)
    }

    pub fn banner(&mut self, id: ObjectId) -> ObjectId {
        place_as_banner(&mut self.engine, id)
    }

    pub fn play(&mut self, animation: Animation, run_time: f32) -> EngineResult<()> {
        self.engine.play(animation, run_time)
    }

    pub fn wait(&mut self, duration: f32) -> EngineResult<()> {
        self.engine.wait(duration)
    }

    /// Hold for the configured inter-step pause.
    pub fn pause(&mut self) -> EngineResult<()> {
        let pause = self.style.pause;
        self.engine.wait(pause)
    }

    /// Build a step prompt: resolved text at prompt scale, placed as a banner.
    pub fn prompt(&mut self, english: &str, other: &str) -> EngineResult<ObjectId> {
        let opts = TextOptions::prompt(&self.style);
        let id = self.text_with(english, other, opts)?;
        Ok(self.banner(id))
    }

    /// Morph the title into a step prompt at the fast run-time.
    ///
    /// The title handle stays the same, so teardown still fades it. Without a
    /// title on screen the prompt is written in instead and becomes the title.
    pub fn retitle(&mut self, english: &str, other: &str) -> EngineResult<ObjectId> {
        let prompt = self.prompt(english, other)?;
        let rt_fast = self.style.rt_fast;
        match self.title {
            Some(title) => {
                self.engine.play(
                    Animation::Transform {
                        source: title,
                        target: prompt,
                    },
                    rt_fast,
                )?;
                Ok(title)
            }
            None => {
                self.engine
                    .play(Animation::Write { target: prompt }, rt_fast)?;
                self.title = Some(prompt);
                Ok(prompt)
            }
        }
    }

    /// Resolve and render the title, pin it as a banner and write it in.
    pub(crate) fn show_title(&mut self) -> EngineResult<ObjectId> {
        let opts = TextOptions::title(&self.style);
        let content = self.config.title().to_string();
        let id = render_text(&mut self.engine, &content, opts)?;
        let id = self.banner(id);
        let rt_norm = self.style.rt_norm;
        self.engine.play(Animation::Write { target: id }, rt_norm)?;
        self.title = Some(id);
        Ok(id)
    }

    /// Fade the title out at the fast run-time and release it.
    pub fn fade_out_title(&mut self) -> EngineResult<()> {
        if let Some(id) = self.title {
            let rt_fast = self.style.rt_fast;
            self.engine.play(Animation::FadeOut { target: id }, rt_fast)?;
            self.title = None;
        }
        Ok(())
    }

    /// Drop the title without animation. Used on failure paths.
    pub(crate) fn release_title(&mut self) -> EngineResult<Option<ObjectId>> {
        match self.title.take() {
            Some(id) => self.engine.remove(id).map(|_| Some(id)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Command, RecordingEngine};
    use crate::text::DEFAULT_TEXT_SCALE;

    fn stage(lang: &str) -> Stage<RecordingEngine> {
        let cfg = LessonConfig::new("Ruler", "مسطرة", lang).unwrap();
        Stage::new(RecordingEngine::new(), cfg, StyleConfig::default())
    }

    #[test]
    fn show_title_writes_banner_at_normal_runtime() {
        let mut st = stage("ar");
        let id = st.show_title().unwrap();
        assert_eq!(st.title(), Some(id));

        let obj = st.engine().object(id).unwrap();
        assert_eq!(obj.content, "مسطرة");
        assert_eq!(obj.font_size, 38.0);
        assert!(obj.on_screen);

        let last = st.engine().timeline().last().unwrap();
        assert_eq!(
            last.command,
            Command::Play {
                animation: Animation::Write { target: id },
                run_time: 1.0
            }
        );
    }

    #[test]
    fn retitle_keeps_title_handle() {
        let mut st = stage("en");
        let title = st.show_title().unwrap();
        let kept = st.retitle("Align the ruler.", "نحاذي المسطرة.").unwrap();
        assert_eq!(kept, title);
        assert_eq!(
            st.engine().object(title).unwrap().content,
            "Align the ruler."
        );
    }

    #[test]
    fn retitle_without_title_adopts_prompt() {
        let mut st = stage("en");
        let id = st.retitle("Intro", "مقدمة").unwrap();
        assert_eq!(st.title(), Some(id));
        assert!(st.engine().object(id).unwrap().on_screen);
    }

    #[test]
    fn fade_out_releases_title_once() {
        let mut st = stage("en");
        st.show_title().unwrap();
        st.fade_out_title().unwrap();
        assert_eq!(st.title(), None);
        let plays_before = st.engine().timeline().len();
        st.fade_out_title().unwrap();
        assert_eq!(st.engine().timeline().len(), plays_before);
        assert_eq!(st.engine().on_screen().count(), 0);
    }

    #[test]
    fn text_same_renders_one_string_in_every_language() {
        for lang in ["en", "ar"] {
            let mut st = stage(lang);
            let id = st.text_same("3/4").unwrap();
            let obj = st.engine().object(id).unwrap();
            assert_eq!(obj.content, "3/4");
            assert_eq!(obj.font_size, StyleConfig::default().font_size_main);
            assert_eq!(obj.scale, DEFAULT_TEXT_SCALE);
        }
    }

    #[test]
    fn text_same_with_honours_options() {
        let mut st = stage("ar");
        let opts = TextOptions::body(st.style()).with_scale(1.2).with_font_size(20.0);
        let id = st.text_same_with("A", opts).unwrap();
        let obj = st.engine().object(id).unwrap();
        assert_eq!((obj.font_size, obj.scale), (20.0, 1.2));
    }

    #[test]
    fn invalid_style_does_not_panic_on_construction() {
        let cfg = LessonConfig::new("Ruler", "مسطرة", "en").unwrap();
        let style = StyleConfig {
            pause: 0.0,
            ..StyleConfig::default()
        };
        let st = Stage::new(RecordingEngine::new(), cfg, style);
        assert!(!st.style().is_valid());
    }

    #[test]
    fn pause_waits_configured_duration() {
        let mut st = stage("en");
        st.pause().unwrap();
        assert_eq!(st.engine().clock(), StyleConfig::default().pause);
    }
}
