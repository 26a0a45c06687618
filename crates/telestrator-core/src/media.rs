//! Media capability traits.
//!
//! The core does not own a video decoder or microphone. It drives them
//! through these narrow traits, and treats recorded audio as an opaque
//! content reference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Media errors.
///
/// Per the error policy, these never escape the session controller: failures
/// are logged and recording/playback degrades gracefully (e.g. a session
/// continues without audio when the microphone is unavailable).
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("audio capture unavailable: {0}")]
    CaptureUnavailable(String),
    #[error("no audio capture in progress")]
    NotCapturing,
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Opaque reference to captured audio content (a URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioRef(String);

impl AudioRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

/// Transport control over the bound video.
pub trait VideoTransport {
    /// Current absolute playback position in milliseconds.
    fn position_ms(&mut self) -> u64;

    /// Seek to an absolute position in milliseconds.
    fn seek(&mut self, ms: u64);

    fn play(&mut self);

    fn pause(&mut self);
}

/// Microphone capture for session narration.
pub trait AudioCapture {
    /// Begin capturing. Fails if the device cannot be acquired.
    fn start_capture(&mut self) -> Result<(), MediaError>;

    /// Stop capturing and finalize the recording into a content reference.
    fn stop_capture(&mut self) -> Result<AudioRef, MediaError>;
}

/// Playback of previously captured audio.
pub trait AudioPlayback {
    /// Play the referenced content from the beginning.
    fn play(&mut self, audio: &AudioRef) -> Result<(), MediaError>;

    /// Stop playback. No-op if nothing is playing.
    fn stop(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles for the media traits.

    use super::*;

    /// Records every transport call it receives.
    #[derive(Debug, Default)]
    pub struct FakeVideo {
        pub position_ms: u64,
        pub calls: Vec<VideoCall>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum VideoCall {
        Seek(u64),
        Play,
        Pause,
    }

    impl VideoTransport for FakeVideo {
        fn position_ms(&mut self) -> u64 {
            self.position_ms
        }

        fn seek(&mut self, ms: u64) {
            self.position_ms = ms;
            self.calls.push(VideoCall::Seek(ms));
        }

        fn play(&mut self) {
            self.calls.push(VideoCall::Play);
        }

        fn pause(&mut self) {
            self.calls.push(VideoCall::Pause);
        }
    }

    /// Audio capture double; can be configured to deny acquisition.
    #[derive(Debug, Default)]
    pub struct FakeAudio {
        pub deny_capture: bool,
        pub capturing: bool,
        pub playing: Option<AudioRef>,
        pub stopped_count: usize,
    }

    impl AudioCapture for FakeAudio {
        fn start_capture(&mut self) -> Result<(), MediaError> {
            if self.deny_capture {
                return Err(MediaError::CaptureUnavailable("permission denied".into()));
            }
            self.capturing = true;
            Ok(())
        }

        fn stop_capture(&mut self) -> Result<AudioRef, MediaError> {
            if !self.capturing {
                return Err(MediaError::NotCapturing);
            }
            self.capturing = false;
            Ok(AudioRef::new("file:///tmp/narration.m4a"))
        }
    }

    impl AudioPlayback for FakeAudio {
        fn play(&mut self, audio: &AudioRef) -> Result<(), MediaError> {
            self.playing = Some(audio.clone());
            Ok(())
        }

        fn stop(&mut self) {
            self.playing = None;
            self.stopped_count += 1;
        }
    }
}
