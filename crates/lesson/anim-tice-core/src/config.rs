//! Shared style and lesson configuration.
//!
//! Both records are built once per lesson, handed to it by value, and only read
//! afterwards. Lessons needing extra knobs wrap these in their own structs
//! rather than extending them.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TitleVariant};
use crate::text::Language;

/// Typography and pacing shared by all lessons. All fields must be positive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_size_title: f32,
    pub font_size_main: f32,
    /// Seconds held after each step.
    pub pause: f32,
    /// Run-time of quick transitions (title fade-out, retitling).
    pub rt_fast: f32,
    /// Run-time of regular animations (title write-in).
    pub rt_norm: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size_title: 38.0,
            font_size_main: 34.0,
            pause: 0.45,
            rt_fast: 0.7,
            rt_norm: 1.0,
        }
    }
}

impl StyleConfig {
    pub fn is_valid(&self) -> bool {
        [
            self.font_size_title,
            self.font_size_main,
            self.pause,
            self.rt_fast,
            self.rt_norm,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Titles and active language of one lesson.
///
/// Both title variants are required even though only one is displayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLessonConfig")]
pub struct LessonConfig {
    title_en: String,
    title_ar: String,
    language: Language,
}

#[derive(Deserialize)]
struct RawLessonConfig {
    title_en: String,
    title_ar: String,
    #[serde(default = "default_language_tag")]
    language: String,
}

fn default_language_tag() -> String {
    Language::default().tag().to_string()
}

impl TryFrom<RawLessonConfig> for LessonConfig {
    type Error = ConfigError;

    fn try_from(raw: RawLessonConfig) -> Result<Self, Self::Error> {
        LessonConfig::new(raw.title_en, raw.title_ar, &raw.language)
    }
}

impl LessonConfig {
    /// Build a config from titles and a raw language tag such as `"en"` or `"ar"`.
    pub fn new(
        title_en: impl Into<String>,
        title_ar: impl Into<String>,
        language: &str,
    ) -> Result<Self, ConfigError> {
        Self::with_language(title_en, title_ar, language.parse()?)
    }

    pub fn with_language(
        title_en: impl Into<String>,
        title_ar: impl Into<String>,
        language: Language,
    ) -> Result<Self, ConfigError> {
        let title_en = title_en.into();
        let title_ar = title_ar.into();
        if title_en.trim().is_empty() {
            return Err(ConfigError::MissingTitle {
                which: TitleVariant::English,
            });
        }
        if title_ar.trim().is_empty() {
            return Err(ConfigError::MissingTitle {
                which: TitleVariant::Other,
            });
        }
        Ok(Self {
            title_en,
            title_ar,
            language,
        })
    }

    pub fn title_en(&self) -> &str {
        &self.title_en
    }

    pub fn title_ar(&self) -> &str {
        &self.title_ar
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The title in the active language.
    pub fn title(&self) -> &str {
        self.language.pick(&self.title_en, &self.title_ar)
    }
}
