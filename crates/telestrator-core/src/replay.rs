//! Replay state reconstruction.
//!
//! A recorded session is replayed by folding its event log up to a requested
//! instant. The fold is total and pure: the same `(events, t)` always yields
//! the same shape list, which is what makes scrubbing and repeated playback
//! reliable.

use crate::events::{EventKind, TimedEvent};
use crate::shapes::{Shape, ShapeId};

/// Timestamp that includes every event (the "show everything" query).
pub const TIME_END: u64 = u64::MAX;

/// Reconstruct the visible shapes at `t` milliseconds into the session.
///
/// Events are stably sorted by timestamp before folding, since video-bound
/// timestamps are not guaranteed monotonic. The result is in stable draw
/// order: committed shapes in commit order, then any shapes still being
/// drawn at `t`, so a stroke is visible mid-draw during replay.
pub fn build_state_at_time(events: &[TimedEvent], t: u64) -> Vec<Shape> {
    let mut ordered: Vec<&TimedEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.t);

    let mut committed: Vec<Shape> = Vec::new();
    // Shapes under construction, in start order. Linear scan is fine: a
    // session rarely has more than one shape building at a time.
    let mut building: Vec<(ShapeId, Shape)> = Vec::new();

    for event in ordered {
        if event.t > t {
            break;
        }

        match &event.kind {
            EventKind::StrokeStart { id, shape } | EventKind::StrokePoint { id, shape } => {
                // Last-write-wins snapshot
                match building.iter_mut().find(|(bid, _)| bid == id) {
                    Some((_, slot)) => *slot = shape.clone(),
                    None => building.push((*id, shape.clone())),
                }
            }
            EventKind::StrokeEnd { id } => {
                if let Some(pos) = building.iter().position(|(bid, _)| bid == id) {
                    committed.push(building.remove(pos).1);
                }
            }
            EventKind::Undo => {
                committed.pop();
            }
            EventKind::Clear => {
                committed.clear();
                building.clear();
            }
            EventKind::VideoPlay { .. } | EventKind::VideoPause { .. } => {}
        }
    }

    committed.extend(building.into_iter().map(|(_, shape)| shape));
    committed
}

/// The final shape set after every event has been applied.
pub fn final_state(events: &[TimedEvent]) -> Vec<Shape> {
    build_state_at_time(events, TIME_END)
}
