//! # Tone Dispatch Module
//!
//! This module hands challenge tones to the audio collaborator. The core never
//! synthesizes or plays audio itself; it only asks a `ToneSink` to play a
//! frequency for a duration.
//!
//! ## Behavior
//! - Every request runs on its own short-lived worker thread
//! - Requests are never awaited and report nothing back to the session
//! - Sink failures (no device, closed channel) are logged and swallowed
//! - Overlapping tones are possible when requests arrive quickly

use anyhow::{Result, anyhow};
use crossbeam_channel::{Sender, TrySendError};
use std::sync::Arc;
use std::thread;

/// Default tone length for a challenge.
pub const DEFAULT_TONE_DURATION_MS: u32 = 500;

/// A single "play this tone" request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    pub frequency_hz: f32,
    pub duration_ms: u32,
}

/// The audio collaborator: plays a tone, best effort.
pub trait ToneSink: Send + Sync + 'static {
    fn play_tone(&self, frequency_hz: f32, duration_ms: u32) -> Result<()>;
}

/// Forwards requests to an audio thread owned by the embedding application.
impl ToneSink for Sender<ToneRequest> {
    fn play_tone(&self, frequency_hz: f32, duration_ms: u32) -> Result<()> {
        let request = ToneRequest { frequency_hz, duration_ms };
        match self.try_send(request) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(anyhow!("Tone queue is full")),
            Err(TrySendError::Disconnected(_)) => Err(anyhow!("Audio thread is gone")),
        }
    }
}

/// Fire-and-forget dispatcher in front of a `ToneSink`.
#[derive(Debug)]
pub struct ToneDispatcher<S> {
    sink: Arc<S>,
    duration_ms: u32,
}

impl<S: ToneSink> ToneDispatcher<S> {
    pub fn new(sink: S, duration_ms: u32) -> Self {
        Self {
            sink: Arc::new(sink),
            duration_ms,
        }
    }

    /// Starts playback of `frequency_hz` and returns immediately.
    pub fn dispatch(&self, frequency_hz: f32) {
        let sink = Arc::clone(&self.sink);
        let duration_ms = self.duration_ms;

        log::debug!("[AUDIO] Dispatching {:.2} Hz for {} ms", frequency_hz, duration_ms);

        let spawned = thread::Builder::new()
            .name("tone-playback".to_string())
            .spawn(move || {
                if let Err(err) = sink.play_tone(frequency_hz, duration_ms) {
                    log::warn!("[AUDIO] Error playing tone: {:#}", err);
                }
            });

        // Playback threads are never joined.
        if let Err(err) = spawned {
            log::warn!("[AUDIO] Could not start playback thread: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FailingSink;

    impl ToneSink for FailingSink {
        fn play_tone(&self, _frequency_hz: f32, _duration_ms: u32) -> Result<()> {
            Err(anyhow!("No output device available"))
        }
    }

    #[test]
    fn dispatch_reaches_the_sink() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let dispatcher = ToneDispatcher::new(tx, DEFAULT_TONE_DURATION_MS);

        dispatcher.dispatch(440.0);

        let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            request,
            ToneRequest {
                frequency_hz: 440.0,
                duration_ms: 500
            }
        );
    }

    #[test]
    fn each_request_is_dispatched_independently() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let dispatcher = ToneDispatcher::new(tx, 250);

        dispatcher.dispatch(261.63);
        dispatcher.dispatch(293.66);

        let mut got: Vec<f32> = (0..2)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap().frequency_hz)
            .collect();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(got, vec![261.63, 293.66]);
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let dispatcher = ToneDispatcher::new(FailingSink, 100);
        dispatcher.dispatch(440.0);
    }

    #[test]
    fn closed_channel_reports_an_error() {
        let (tx, rx) = crossbeam_channel::bounded::<ToneRequest>(1);
        drop(rx);
        assert!(tx.play_tone(440.0, 100).is_err());
    }
}
