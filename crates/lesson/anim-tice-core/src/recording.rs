//! In-memory [`RenderEngine`] that models the scene and records every command.
//!
//! Nothing is drawn. Each object keeps its content, scale, position and
//! visibility, and every call is appended to a timeline stamped with the scene
//! clock (the sum of all run-times and waits so far). Useful for tests and for
//! dry-running a lesson to inspect its storyboard.
//!
//! A `Transform` consumes its target: the source takes over the target's look
//! and the target is dropped from the scene, so repeated retitles do not
//! accumulate hidden objects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::{Animation, Edge, ObjectId, RenderEngine};
use crate::error::{EngineError, EngineResult};

/// Visible frame in scene units, centered on the origin.
pub const FRAME_WIDTH: f32 = 14.222;
pub const FRAME_HEIGHT: f32 = 8.0;
/// Gap kept between an object and the edge it is pinned to.
pub const EDGE_BUFF: f32 = 0.5;

// Rough glyph metrics used to size text objects.
const LINE_HEIGHT_PER_POINT: f32 = 0.0125;
const ADVANCE_PER_POINT: f32 = 0.0075;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub content: String,
    pub font_size: f32,
    pub scale: f32,
    /// Center of the object.
    pub position: [f32; 2],
    pub on_screen: bool,
}

impl SceneObject {
    /// Width and height in scene units.
    pub fn size(&self) -> [f32; 2] {
        let glyphs = self.content.chars().count().max(1) as f32;
        [
            glyphs * self.font_size * ADVANCE_PER_POINT * self.scale,
            self.font_size * LINE_HEIGHT_PER_POINT * self.scale,
        ]
    }
}

/// One engine call as seen by the recorder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Text {
        id: ObjectId,
        content: String,
        font_size: f32,
    },
    Scale {
        id: ObjectId,
        factor: f32,
    },
    ToEdge {
        id: ObjectId,
        edge: Edge,
    },
    Play {
        animation: Animation,
        run_time: f32,
    },
    Wait {
        duration: f32,
    },
    Remove {
        id: ObjectId,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Scene clock (seconds) when the command started.
    pub at: f32,
    pub command: Command,
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    objects: IndexMap<ObjectId, SceneObject>,
    timeline: Vec<TimelineEntry>,
    clock: f32,
    next_id: u32,
    pending_failure: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Objects currently visible, in creation order.
    pub fn on_screen(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .filter(|(_, o)| o.on_screen)
            .map(|(id, o)| (*id, o))
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Total scene time elapsed, in seconds.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Make the next fallible call fail with a backend error.
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.pending_failure = Some(message.into());
    }

    /// Contents shown through `Write` animations, in order, as they read when
    /// written. Later morphs of the same object do not change the result.
    pub fn written_texts(&self) -> Vec<String> {
        self.timeline
            .iter()
            .filter_map(|e| match &e.command {
                Command::Play {
                    animation: Animation::Write { target },
                    ..
                } => self.created_content(*target),
                _ => None,
            })
            .collect()
    }

    fn created_content(&self, id: ObjectId) -> Option<String> {
        self.timeline.iter().find_map(|e| match &e.command {
            Command::Text { id: created, content, .. } if *created == id => Some(content.clone()),
            _ => None,
        })
    }

    pub fn timeline_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.timeline)
    }

    fn record(&mut self, command: Command) {
        self.timeline.push(TimelineEntry {
            at: self.clock,
            command,
        });
    }

    fn check_failure(&mut self) -> EngineResult<()> {
        match self.pending_failure.take() {
            Some(message) => Err(EngineError::Backend(message)),
            None => Ok(()),
        }
    }

    fn get_mut(&mut self, id: ObjectId) -> EngineResult<&mut SceneObject> {
        self.objects
            .get_mut(&id)
            .ok_or(EngineError::UnknownObject(id))
    }
}

impl RenderEngine for RecordingEngine {
    fn text(&mut self, content: &str, font_size: f32) -> EngineResult<ObjectId> {
        self.check_failure()?;
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.objects.insert(
            id,
            SceneObject {
                content: content.to_string(),
                font_size,
                scale: 1.0,
                position: [0.0, 0.0],
                on_screen: false,
            },
        );
        self.record(Command::Text {
            id,
            content: content.to_string(),
            font_size,
        });
        Ok(id)
    }

    fn scale(&mut self, id: ObjectId, factor: f32) {
        match self.objects.get_mut(&id) {
            Some(obj) => obj.scale *= factor,
            None => tracing::warn!(%id, "scale on unknown object ignored"),
        }
        self.record(Command::Scale { id, factor });
    }

    fn to_edge(&mut self, id: ObjectId, edge: Edge) {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                let [w, h] = obj.size();
                match edge {
                    Edge::Top => obj.position[1] = FRAME_HEIGHT / 2.0 - EDGE_BUFF - h / 2.0,
                    Edge::Bottom => obj.position[1] = -FRAME_HEIGHT / 2.0 + EDGE_BUFF + h / 2.0,
                    Edge::Left => obj.position[0] = -FRAME_WIDTH / 2.0 + EDGE_BUFF + w / 2.0,
                    Edge::Right => obj.position[0] = FRAME_WIDTH / 2.0 - EDGE_BUFF - w / 2.0,
                }
            }
            None => tracing::warn!(%id, "to_edge on unknown object ignored"),
        }
        self.record(Command::ToEdge { id, edge });
    }

    fn play(&mut self, animation: Animation, run_time: f32) -> EngineResult<()> {
        self.check_failure()?;
        match animation {
            Animation::Write { target } | Animation::FadeIn { target } => {
                self.get_mut(target)?.on_screen = true;
            }
            Animation::FadeOut { target } => {
                self.get_mut(target)?.on_screen = false;
            }
            Animation::Transform { source, target } => {
                self.get_mut(source)?;
                // The target is only a template; the morphed source takes its place.
                let template = if source == target {
                    self.get_mut(target)?.clone()
                } else {
                    self.objects
                        .shift_remove(&target)
                        .ok_or(EngineError::UnknownObject(target))?
                };
                let obj = self.get_mut(source)?;
                obj.content = template.content;
                obj.font_size = template.font_size;
                obj.scale = template.scale;
                obj.position = template.position;
                obj.on_screen = true;
            }
        }
        self.record(Command::Play {
            animation,
            run_time,
        });
        self.clock += run_time;
        Ok(())
    }

    fn wait(&mut self, duration: f32) -> EngineResult<()> {
        self.check_failure()?;
        self.record(Command::Wait { duration });
        self.clock += duration;
        Ok(())
    }

    fn remove(&mut self, id: ObjectId) -> EngineResult<()> {
        self.get_mut(id)?.on_screen = false;
        self.record(Command::Remove { id });
        Ok(())
    }
}
