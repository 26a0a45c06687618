//! Timed event log for recording sessions.
//!
//! The log is the single source of truth for a recorded annotation session:
//! an append-only sequence of shape lifecycle and media-transport actions,
//! each tagged with a millisecond offset relative to the start of the
//! session.

use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// A media-transport action recorded during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportAction {
    Play,
    Pause,
}

/// The payload of a timed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EventKind {
    /// A new shape began forming.
    StrokeStart { id: ShapeId, shape: Shape },
    /// The shape's geometry updated (latest snapshot, not a delta).
    StrokePoint { id: ShapeId, shape: Shape },
    /// The shape was finalized.
    StrokeEnd { id: ShapeId },
    /// Remove the most recently committed shape.
    Undo,
    /// Remove all committed and in-progress shapes.
    Clear,
    /// The video started playing, at the given absolute video position.
    VideoPlay { pos_ms: u64 },
    /// The video was paused, at the given absolute video position.
    VideoPause { pos_ms: u64 },
}

impl EventKind {
    /// The transport action and absolute video position, for meta events.
    pub fn transport(&self) -> Option<(TransportAction, u64)> {
        match self {
            EventKind::VideoPlay { pos_ms } => Some((TransportAction::Play, *pos_ms)),
            EventKind::VideoPause { pos_ms } => Some((TransportAction::Pause, *pos_ms)),
            _ => None,
        }
    }
}

/// An event with its offset in milliseconds from the session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Offset from the start of the recording session, in milliseconds.
    pub t: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TimedEvent {
    pub fn new(t: u64, kind: EventKind) -> Self {
        Self { t, kind }
    }
}

/// Append-only, time-stamped record of one recording session.
///
/// Insertion order is preserved. For video-bound sessions the timestamps
/// derive from the polled video position, which is not guaranteed monotonic,
/// so consumers must sort (stably) before folding; see
/// [`sorted`](EventLog::sorted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<TimedEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, t: u64, kind: EventKind) {
        self.events.push(TimedEvent::new(t, kind));
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    /// Events sorted by timestamp, with insertion order as tie-break.
    pub fn sorted(&self) -> Vec<TimedEvent> {
        let mut out = self.events.clone();
        out.sort_by_key(|e| e.t);
        out
    }

    /// Sorted sublist of media-transport (play/pause) events.
    pub fn transport_events(&self) -> Vec<TimedEvent> {
        let mut out: Vec<TimedEvent> = self
            .events
            .iter()
            .filter(|e| e.kind.transport().is_some())
            .cloned()
            .collect();
        out.sort_by_key(|e| e.t);
        out
    }

    /// The timeline duration: the largest timestamp in the log, or 0.
    pub fn duration_ms(&self) -> u64 {
        self.events.iter().map(|e| e.t).max().unwrap_or(0)
    }
}

impl From<Vec<TimedEvent>> for EventLog {
    fn from(events: Vec<TimedEvent>) -> Self {
        Self { events }
    }
}

impl From<EventLog> for Vec<TimedEvent> {
    fn from(log: EventLog) -> Self {
        log.events
    }
}
