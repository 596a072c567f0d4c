//! Boundary to the external rendering engine.
//!
//! The orchestration core never draws anything itself. It asks a [`RenderEngine`]
//! to construct text, move it, and play a handful of animation primitives.
//! Playback calls may block for as long as the engine needs; the core has no
//! cancellation surface.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Opaque handle to an object living in the engine's scene.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Frame edges an object can be pinned to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Animation primitives the core relies on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Progressively draw an object onto the scene.
    Write { target: ObjectId },
    FadeIn { target: ObjectId },
    /// Fade an object out and drop it from the scene.
    FadeOut { target: ObjectId },
    /// Morph `source` into the shape, content and position of `target`.
    /// `source` keeps its handle; `target` is only a template and is not added.
    Transform { source: ObjectId, target: ObjectId },
}

impl Animation {
    /// The object whose on-screen state changes.
    pub fn subject(&self) -> ObjectId {
        match *self {
            Animation::Write { target }
            | Animation::FadeIn { target }
            | Animation::FadeOut { target } => target,
            Animation::Transform { source, .. } => source,
        }
    }
}

/// Capabilities the lesson lifecycle needs from a renderer.
///
/// Placement and scaling are assumed to always succeed for an object the engine
/// constructed, so they have no error channel.
pub trait RenderEngine {
    /// Build a text object. It is not on screen until an animation adds it.
    fn text(&mut self, content: &str, font_size: f32) -> EngineResult<ObjectId>;

    fn scale(&mut self, id: ObjectId, factor: f32);

    /// Move an object flush against a frame edge, keeping its size and content.
    fn to_edge(&mut self, id: ObjectId, edge: Edge);

    /// Play an animation for `run_time` seconds. Returns when playback is done.
    fn play(&mut self, animation: Animation, run_time: f32) -> EngineResult<()>;

    /// Hold the current frame for `duration` seconds.
    fn wait(&mut self, duration: f32) -> EngineResult<()>;

    /// Drop an object from the scene immediately, without animation.
    fn remove(&mut self, id: ObjectId) -> EngineResult<()>;
}

impl<E: RenderEngine + ?Sized> RenderEngine for &mut E {
    fn text(&mut self, content: &str, font_size: f32) -> EngineResult<ObjectId> {
        (**self).text(content, font_size)
    }

    fn scale(&mut self, id: ObjectId, factor: f32) {
        (**self).scale(id, factor)
    }

    fn to_edge(&mut self, id: ObjectId, edge: Edge) {
        (**self).to_edge(id, edge)
    }

    fn play(&mut self, animation: Animation, run_time: f32) -> EngineResult<()> {
        (**self).play(animation, run_time)
    }

    fn wait(&mut self, duration: f32) -> EngineResult<()> {
        (**self).wait(duration)
    }

    fn remove(&mut self, id: ObjectId) -> EngineResult<()> {
        (**self).remove(id)
    }
}
