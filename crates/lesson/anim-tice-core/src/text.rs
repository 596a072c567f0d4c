//! Bilingual text selection.
//!
//! Every lesson carries two versions of each string: English and one other
//! language. The active [`Language`] picks which one reaches the renderer.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::StyleConfig;
use crate::engine::{ObjectId, RenderEngine};
use crate::error::{ConfigError, EngineResult};

/// Scale applied to body text unless a call overrides it.
pub const DEFAULT_TEXT_SCALE: f32 = 0.6;
/// Scale applied to the lesson title.
pub const TITLE_SCALE: f32 = 0.62;
/// Scale applied to step prompts that replace the title.
pub const PROMPT_SCALE: f32 = 0.52;

/// Supported display languages. Unknown tags are rejected, never defaulted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// English text for `en`, the other variant for every other supported tag.
    pub fn pick<'a>(self, english: &'a str, other: &'a str) -> &'a str {
        match self {
            Language::En => english,
            Language::Ar => other,
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.tag() == tag)
            .ok_or_else(|| ConfigError::UnsupportedLanguage {
                tag: tag.to_string(),
            })
    }
}

impl TryFrom<String> for Language {
    type Error = ConfigError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Select the display string for a raw language tag.
///
/// Fails with [`ConfigError::UnsupportedLanguage`] for a tag outside the
/// supported set instead of falling back to either string.
pub fn resolve<'a>(english: &'a str, other: &'a str, tag: &str) -> Result<&'a str, ConfigError> {
    Ok(tag.parse::<Language>()?.pick(english, other))
}

/// Font size and scale handed to the engine's text primitive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    pub font_size: f32,
    pub scale: f32,
}

impl TextOptions {
    pub fn body(style: &StyleConfig) -> Self {
        Self {
            font_size: style.font_size_main,
            scale: DEFAULT_TEXT_SCALE,
        }
    }

    pub fn title(style: &StyleConfig) -> Self {
        Self {
            font_size: style.font_size_title,
            scale: TITLE_SCALE,
        }
    }

    pub fn prompt(style: &StyleConfig) -> Self {
        Self {
            font_size: style.font_size_main,
            scale: PROMPT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Construct already-resolved text through the engine and apply the scale.
pub fn render_text<E: RenderEngine + ?Sized>(
    engine: &mut E,
    content: &str,
    opts: TextOptions,
) -> EngineResult<ObjectId> {
    let id = engine.text(content, opts.font_size)?;
    engine.scale(id, opts.scale);
    Ok(id)
}
