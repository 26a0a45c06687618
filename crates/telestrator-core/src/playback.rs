//! Playback clock for session replay.
//!
//! A single periodic ticker advances a virtual timeline and reports which
//! recorded media-transport actions have come due, so the host can keep the
//! video in lockstep with what happened during recording.

use crate::events::{EventLog, TimedEvent, TransportAction};
use std::time::Instant;

/// Recommended tick interval for hosts driving [`PlaybackClock::tick`].
pub const TICK_INTERVAL_MS: u64 = 33;

/// Grace margin past the last event before playback self-terminates.
pub const END_GRACE_MS: u64 = 50;

/// A side effect to apply to the video transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Seek to an absolute video position.
    Seek(u64),
    Play,
    Pause,
}

/// The result of advancing the playback timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackTick {
    /// Current position on the virtual timeline, in milliseconds.
    pub timeline_ms: u64,
    /// Transport commands that came due on this tick, in order.
    pub commands: Vec<TransportCommand>,
    /// True once the timeline has passed the log duration plus grace.
    pub finished: bool,
}

/// Advances a virtual timeline through a recorded session.
///
/// The clock keeps a cursor into the pre-sorted transport-event sublist and
/// never revisits an event, so a tick that lands past several events emits
/// all of their commands at once (in recorded order).
#[derive(Debug, Clone, Default)]
pub struct PlaybackClock {
    started: Option<Instant>,
    timeline_ms: u64,
    /// Transport events sorted by timestamp.
    meta: Vec<TimedEvent>,
    /// Index of the next transport event to fire.
    cursor: usize,
    duration_ms: u64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playback of the given log from timeline zero.
    pub fn start(&mut self, log: &EventLog) {
        self.meta = log.transport_events();
        self.cursor = 0;
        self.duration_ms = log.duration_ms();
        self.timeline_ms = 0;
        self.started = Some(Instant::now());
    }

    /// Stop playback and reset the timeline and cursor.
    pub fn stop(&mut self) {
        self.started = None;
        self.timeline_ms = 0;
        self.cursor = 0;
        self.meta.clear();
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Current timeline position in milliseconds.
    pub fn timeline_ms(&self) -> u64 {
        self.timeline_ms
    }

    /// Advance the timeline using elapsed wall-clock time.
    pub fn tick(&mut self) -> PlaybackTick {
        let elapsed = self
            .started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.advance_to(elapsed)
    }

    /// Advance the timeline to an explicit position.
    ///
    /// Fires every not-yet-fired transport event with `t <= timeline_ms`:
    /// for each, a seek to its recorded absolute video position followed by
    /// the matching play/pause command.
    pub fn advance_to(&mut self, timeline_ms: u64) -> PlaybackTick {
        if self.started.is_none() {
            return PlaybackTick {
                timeline_ms: 0,
                commands: Vec::new(),
                finished: false,
            };
        }

        self.timeline_ms = timeline_ms;

        let mut commands = Vec::new();
        while self.cursor < self.meta.len() && self.meta[self.cursor].t <= timeline_ms {
            if let Some((action, pos_ms)) = self.meta[self.cursor].kind.transport() {
                commands.push(TransportCommand::Seek(pos_ms));
                commands.push(match action {
                    TransportAction::Play => TransportCommand::Play,
                    TransportAction::Pause => TransportCommand::Pause,
                });
            }
            self.cursor += 1;
        }

        PlaybackTick {
            timeline_ms,
            commands,
            finished: timeline_ms >= self.duration_ms + END_GRACE_MS,
        }
    }
}
