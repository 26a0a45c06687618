//! Serializable session snapshots.

use crate::events::TimedEvent;
use crate::media::AudioRef;
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything needed to restore and replay a sealed session: the clip
/// range, the event log, the audio reference, and the shapes that were on
/// the canvas when recording began.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub clip_start_ms: Option<u64>,
    pub clip_end_ms: Option<u64>,
    pub events: Vec<TimedEvent>,
    pub audio: Option<AudioRef>,
    pub base_shapes: Vec<Shape>,
}

impl SessionSnapshot {
    pub fn new(
        clip_start_ms: Option<u64>,
        clip_end_ms: Option<u64>,
        events: Vec<TimedEvent>,
        audio: Option<AudioRef>,
        base_shapes: Vec<Shape>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            clip_start_ms,
            clip_end_ms,
            events,
            audio,
            base_shapes,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
