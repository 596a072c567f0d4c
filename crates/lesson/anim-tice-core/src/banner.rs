//! Banner placement: pin a rendered object to the top edge of the frame.

use crate::engine::{Edge, ObjectId, RenderEngine};

/// Move `id` to the top edge without touching its size, color or content.
/// Returns the same handle for chaining. Applying it twice is the same as once.
pub fn place_as_banner<E: RenderEngine + ?Sized>(engine: &mut E, id: ObjectId) -> ObjectId {
    engine.to_edge(id, Edge::Top);
    id
}
