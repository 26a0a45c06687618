//! Recording session controller.
//!
//! Owns the event log, the clip time range, and the active time base, and
//! orchestrates playback side effects through the media traits. All state
//! lives on one logical thread; handlers are synchronous and append to the
//! log before doing anything else.

use crate::events::{EventKind, EventLog, TransportAction};
use crate::media::{AudioCapture, AudioPlayback, AudioRef, VideoTransport};
use crate::playback::{PlaybackClock, PlaybackTick, TransportCommand};
use crate::replay::{self, TIME_END};
use crate::shapes::Shape;
use crate::snapshot::SessionSnapshot;
use crate::tools::StrokeAction;
use log::{debug, warn};
use std::time::Instant;

/// How event timestamps are derived during recording.
///
/// One base is chosen per session and never changes mid-session: video-bound
/// sessions follow the video's position (so annotation timing survives the
/// coach pausing the video), sessions over a still image follow real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    /// Milliseconds since the recording started, by wall clock.
    WallClock,
    /// Video position relative to the clip start.
    VideoPosition,
}

/// A recording/replay session over one annotation take.
///
/// Created empty, filled by exactly one recording pass, then replayed any
/// number of times. Replays never mutate the event log.
#[derive(Debug)]
pub struct RecordingSession {
    log: EventLog,
    time_base: TimeBase,
    clip_start_ms: Option<u64>,
    clip_end_ms: Option<u64>,
    is_recording: bool,
    is_playback: bool,
    /// Shapes already on the canvas when recording started.
    base_shapes: Vec<Shape>,
    /// Narration captured during the recording pass.
    audio: Option<AudioRef>,
    /// Wall instant the current recording started.
    recording_started: Option<Instant>,
    /// Latest absolute video position, fed by the transport's own
    /// position callback (not by the playback clock).
    video_time_abs_ms: u64,
    clock: PlaybackClock,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    /// Create a session over a still image (wall-clock time base).
    pub fn new() -> Self {
        Self::with_time_base(TimeBase::WallClock)
    }

    /// Create a session bound to a video (video-position time base).
    pub fn video_bound() -> Self {
        Self::with_time_base(TimeBase::VideoPosition)
    }

    fn with_time_base(time_base: TimeBase) -> Self {
        Self {
            log: EventLog::new(),
            time_base,
            clip_start_ms: None,
            clip_end_ms: None,
            is_recording: false,
            is_playback: false,
            base_shapes: Vec::new(),
            audio: None,
            recording_started: None,
            video_time_abs_ms: 0,
            clock: PlaybackClock::new(),
        }
    }

    pub fn time_base(&self) -> TimeBase {
        self.time_base
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn is_playback(&self) -> bool {
        self.is_playback
    }

    /// The absolute video-time window this session covers, once recorded.
    pub fn clip_range(&self) -> Option<(u64, u64)> {
        Some((self.clip_start_ms?, self.clip_end_ms?))
    }

    /// Recorded events (insertion order).
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Captured narration audio, if recording acquired the microphone.
    pub fn audio(&self) -> Option<&AudioRef> {
        self.audio.as_ref()
    }

    /// The largest event timestamp, i.e. the replay timeline length.
    pub fn timeline_duration_ms(&self) -> u64 {
        self.log.duration_ms()
    }

    /// Update the absolute video position from the transport's callback.
    pub fn set_video_time_ms(&mut self, abs_ms: u64) {
        self.video_time_abs_ms = abs_ms;
    }

    pub fn video_time_ms(&self) -> u64 {
        self.video_time_abs_ms
    }

    /// Current session-relative time, per the session's time base.
    fn rel_now(&self) -> u64 {
        match self.time_base {
            TimeBase::WallClock => self
                .recording_started
                .map(|s| s.elapsed().as_millis() as u64)
                .unwrap_or(0),
            TimeBase::VideoPosition => self
                .video_time_abs_ms
                .saturating_sub(self.clip_start_ms.unwrap_or(0)),
        }
    }

    /// Begin a new recording pass.
    ///
    /// Seals nothing from before: the event log is reset, the clip start is
    /// captured (the given value, the current polled video position, or 0
    /// for still-image sessions), and audio capture is started. A microphone
    /// failure degrades to recording without audio. A replay in progress is
    /// interrupted, including its narration audio.
    pub fn start_recording(
        &mut self,
        start_video_ms: Option<u64>,
        base_shapes: Vec<Shape>,
        audio: Option<&mut dyn AudioCapture>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) {
        if self.is_playback {
            self.clock.stop();
            self.is_playback = false;
            if let Some(out) = audio_out {
                out.stop();
            }
        }

        self.log.clear();
        self.audio = None;
        self.base_shapes = base_shapes;
        self.clip_start_ms = Some(match self.time_base {
            TimeBase::VideoPosition => start_video_ms.unwrap_or(self.video_time_abs_ms),
            TimeBase::WallClock => 0,
        });
        self.clip_end_ms = None;
        self.recording_started = Some(Instant::now());

        if let Some(capture) = audio {
            if let Err(e) = capture.start_capture() {
                warn!("recording continues without audio: {e}");
            }
        }

        self.is_recording = true;
        debug!("recording started at clip {:?}", self.clip_start_ms);
    }

    /// Stop the recording pass and seal the clip range.
    ///
    /// If the bound video never advanced, the clip end falls back to
    /// `clip_start + wall duration` so the clip is never inverted. Any shape
    /// still in progress is not auto-committed. No-op when not recording.
    pub fn stop_recording(
        &mut self,
        end_video_ms: Option<u64>,
        audio: Option<&mut dyn AudioCapture>,
    ) {
        if !self.is_recording {
            return;
        }

        let wall_ms = self
            .recording_started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0);
        let start = self.clip_start_ms.unwrap_or(0);
        let end = match self.time_base {
            TimeBase::VideoPosition => {
                let end = end_video_ms.unwrap_or(self.video_time_abs_ms);
                if end > start { end } else { start + wall_ms }
            }
            TimeBase::WallClock => start + wall_ms,
        };
        self.clip_end_ms = Some(end);
        self.recording_started = None;

        if let Some(capture) = audio {
            match capture.stop_capture() {
                Ok(content) => self.audio = Some(content),
                Err(e) => warn!("audio capture did not finalize: {e}"),
            }
        }

        self.is_recording = false;
        debug!("recording stopped, clip {:?}", self.clip_range());
    }

    /// Timestamp and append a shape lifecycle action. Ignored unless
    /// recording.
    pub fn record(&mut self, action: StrokeAction) {
        if !self.is_recording {
            return;
        }
        let t = self.rel_now();
        let kind = match action {
            StrokeAction::Started { id, shape } => EventKind::StrokeStart { id, shape },
            StrokeAction::Updated { id, shape } => EventKind::StrokePoint { id, shape },
            StrokeAction::Committed { id } => EventKind::StrokeEnd { id },
            StrokeAction::Undone => EventKind::Undo,
            StrokeAction::Cleared => EventKind::Clear,
        };
        self.log.push(t, kind);
    }

    /// Timestamp and append a batch of actions.
    pub fn record_all(&mut self, actions: impl IntoIterator<Item = StrokeAction>) {
        for action in actions {
            self.record(action);
        }
    }

    /// Record a video play/pause toggle with its absolute position.
    /// Ignored unless recording.
    pub fn push_transport_event(&mut self, action: TransportAction, pos_ms: u64) {
        if !self.is_recording {
            return;
        }
        let t = self.rel_now();
        let kind = match action {
            TransportAction::Play => EventKind::VideoPlay { pos_ms },
            TransportAction::Pause => EventKind::VideoPause { pos_ms },
        };
        self.log.push(t, kind);
    }

    /// Begin replaying the recorded session.
    ///
    /// No-op when the log is empty or a recording is still in progress.
    /// Seeks the bound video to the clip start and starts it, and plays the
    /// captured narration from the beginning.
    pub fn start_playback(
        &mut self,
        video: Option<&mut dyn VideoTransport>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) {
        if self.log.is_empty() {
            return;
        }
        if self.is_recording {
            warn!("start_playback ignored: recording in progress");
            return;
        }

        self.is_playback = true;
        self.clock.start(&self.log);

        if let (Some(out), Some(content)) = (audio_out, self.audio.as_ref()) {
            if let Err(e) = out.play(content) {
                warn!("replay continues without audio: {e}");
            }
        }

        if self.time_base == TimeBase::VideoPosition {
            if let (Some(v), Some(start)) = (video, self.clip_start_ms) {
                v.seek(start);
                v.play();
                self.video_time_abs_ms = start;
            }
        }
    }

    /// Advance playback using elapsed wall-clock time.
    ///
    /// Call at roughly [`crate::playback::TICK_INTERVAL_MS`]. Returns the
    /// timeline position after the tick.
    pub fn tick_playback(
        &mut self,
        video: Option<&mut dyn VideoTransport>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) -> u64 {
        if !self.is_playback {
            return 0;
        }
        let tick = self.clock.tick();
        self.dispatch_tick(tick, video, audio_out)
    }

    /// Advance playback to an explicit timeline position, dispatching any
    /// due transport commands and auto-stopping past the end of the log.
    pub fn advance_playback_to(
        &mut self,
        timeline_ms: u64,
        video: Option<&mut dyn VideoTransport>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) -> u64 {
        if !self.is_playback {
            return 0;
        }
        let tick = self.clock.advance_to(timeline_ms);
        self.dispatch_tick(tick, video, audio_out)
    }

    fn dispatch_tick(
        &mut self,
        tick: PlaybackTick,
        mut video: Option<&mut dyn VideoTransport>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) -> u64 {
        for command in &tick.commands {
            match command {
                TransportCommand::Seek(pos_ms) => {
                    if let Some(v) = video.as_deref_mut() {
                        v.seek(*pos_ms);
                    }
                    self.video_time_abs_ms = *pos_ms;
                }
                TransportCommand::Play => {
                    if let Some(v) = video.as_deref_mut() {
                        v.play();
                    }
                }
                TransportCommand::Pause => {
                    if let Some(v) = video.as_deref_mut() {
                        v.pause();
                    }
                }
            }
        }

        if tick.finished {
            self.stop_playback(video, audio_out);
        }

        tick.timeline_ms
    }

    /// Stop replay: halt the clock, stop audio, pause the video.
    ///
    /// Safe to call at any time, including when playback never started.
    pub fn stop_playback(
        &mut self,
        video: Option<&mut dyn VideoTransport>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) {
        self.clock.stop();
        self.is_playback = false;

        if let Some(out) = audio_out {
            out.stop();
        }
        if let Some(v) = video {
            v.pause();
        }
    }

    /// Discard the whole session and return to the empty idle state.
    ///
    /// Releases any audio still held: an in-progress capture is stopped and
    /// its take discarded, and replay audio is halted.
    pub fn clear_all(
        &mut self,
        audio: Option<&mut dyn AudioCapture>,
        audio_out: Option<&mut dyn AudioPlayback>,
    ) {
        if let Some(capture) = audio {
            if let Err(e) = capture.stop_capture() {
                debug!("no audio capture to release: {e}");
            }
        }

        self.log.clear();
        self.audio = None;
        self.base_shapes.clear();
        self.clip_start_ms = None;
        self.clip_end_ms = None;
        self.is_recording = false;
        self.is_playback = false;
        self.recording_started = None;
        self.clock.stop();

        if let Some(out) = audio_out {
            out.stop();
        }
    }

    /// The shapes visible right now.
    ///
    /// While recording this replays the log up to the current session time
    /// (so a stroke appears as it is drawn); during playback it follows the
    /// playback timeline; otherwise everything recorded is shown. Base
    /// shapes are always drawn underneath.
    pub fn visible_shapes(&self) -> Vec<Shape> {
        let t = if self.is_recording {
            self.rel_now()
        } else if self.is_playback {
            self.clock.timeline_ms()
        } else {
            TIME_END
        };

        let mut out = self.base_shapes.clone();
        out.extend(replay::build_state_at_time(self.log.events(), t));
        out
    }

    /// Shapes present before the recording pass began.
    pub fn base_shapes(&self) -> &[Shape] {
        &self.base_shapes
    }

    /// Serializable snapshot of the sealed session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.clip_start_ms,
            self.clip_end_ms,
            self.log.events().to_vec(),
            self.audio.clone(),
            self.base_shapes.clone(),
        )
    }

    /// Restore a previously saved session into this one, replacing any
    /// current state. The session ends up idle and ready for playback.
    pub fn load_snapshot(&mut self, snapshot: SessionSnapshot) {
        self.log = EventLog::from(snapshot.events);
        self.clip_start_ms = snapshot.clip_start_ms;
        self.clip_end_ms = snapshot.clip_end_ms;
        self.audio = snapshot.audio;
        self.base_shapes = snapshot.base_shapes;
        self.is_recording = false;
        self.is_playback = false;
        self.recording_started = None;
        self.clock.stop();
    }
}
