//! Telestrator Core Library
//!
//! Platform-agnostic core for coach video annotation: timed drawing events
//! recorded over a video clip or still image, replayed deterministically in
//! sync with video and narration audio.

pub mod events;
pub mod media;
pub mod playback;
pub mod render;
pub mod replay;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod storage;
pub mod tools;

pub use events::{EventKind, EventLog, TimedEvent, TransportAction};
pub use media::{AudioCapture, AudioPlayback, AudioRef, MediaError, VideoTransport};
pub use playback::{PlaybackClock, PlaybackTick, TransportCommand, END_GRACE_MS, TICK_INTERVAL_MS};
pub use render::Renderer;
pub use replay::{build_state_at_time, final_state, TIME_END};
pub use session::{RecordingSession, TimeBase};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeStyle, ShapeTrait};
pub use snapshot::SessionSnapshot;
pub use tools::{StrokeAction, ToolController, ToolKind, MIN_CIRCLE_RADIUS};
