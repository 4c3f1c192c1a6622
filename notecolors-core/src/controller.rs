//! # Input Routing Module
//!
//! The single place where user actions reach the trainer. Each action is
//! delivered as one `TrainerEvent` and handled exactly once: challenge
//! requests drive tone playback, patch selections are evaluated, and the
//! display is refreshed whenever a note is unlocked.
//!
//! ## Architecture
//! - **UI thread**: sends `TrainerEvent`s over a crossbeam channel
//! - **Trainer thread**: owns the session and runs `TrainerController::run`
//! - **Playback threads**: one per tone, started by the `ToneDispatcher`

use crossbeam_channel::Receiver;
use rand::Rng;

use crate::audio::{ToneDispatcher, ToneSink};
use crate::display::{PatchDisplay, refresh_active};
use crate::error::TrainerError;
use crate::registry::NoteId;
use crate::session::{Challenge, GuessOutcome, TrainerSession};

/// A user action forwarded from the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerEvent {
    /// The learner asked to hear a new note.
    RequestChallenge,
    /// The learner picked the patch for this note.
    PatchSelected(NoteId),
}

/// What handling one event produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    ChallengeIssued(Challenge),
    Guessed(GuessOutcome),
}

/// Owns the session and its collaborators.
pub struct TrainerController<R, S, D> {
    session: TrainerSession<R>,
    tones: ToneDispatcher<S>,
    display: D,
}

impl<R: Rng, S: ToneSink, D: PatchDisplay> TrainerController<R, S, D> {
    /// Wires the collaborators together and paints the initial patches.
    pub fn new(session: TrainerSession<R>, tones: ToneDispatcher<S>, display: D) -> Self {
        let mut controller = Self {
            session,
            tones,
            display,
        };
        controller.refresh_display();
        controller
    }

    /// Routes one user action into the session.
    pub fn handle(&mut self, event: TrainerEvent) -> Result<EventOutcome, TrainerError> {
        match event {
            TrainerEvent::RequestChallenge => {
                let challenge = self.session.issue_challenge()?;
                self.tones.dispatch(challenge.frequency_hz);
                Ok(EventOutcome::ChallengeIssued(challenge))
            }
            TrainerEvent::PatchSelected(note) => {
                let outcome = self.session.evaluate_guess(&note)?;
                if outcome.unlocked_note.is_some() {
                    self.refresh_display();
                }
                Ok(EventOutcome::Guessed(outcome))
            }
        }
    }

    /// Handles events until every sender has been dropped.
    ///
    /// Errors are reported and the loop carries on with the next event.
    pub fn run(mut self, events: Receiver<TrainerEvent>) -> Self {
        log::info!("[CONTROLLER] Waiting for events...");
        for event in events.iter() {
            match self.handle(event) {
                Ok(EventOutcome::Guessed(GuessOutcome {
                    unlocked_note: Some(note),
                    ..
                })) => log::info!("[CONTROLLER] New note unlocked: {}", note),
                Ok(_) => {}
                Err(err) => log::warn!("[CONTROLLER] {:?} rejected: {}", event, err),
            }
        }
        log::info!("[CONTROLLER] Event channel closed, stopping");
        self
    }

    fn refresh_display(&mut self) {
        refresh_active(&mut self.display, self.session.active_notes());
    }
}

impl<R, S, D> TrainerController<R, S, D> {
    pub fn session(&self) -> &TrainerSession<R> {
        &self.session
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_parts(self) -> (TrainerSession<R>, D) {
        (self.session, self.display)
    }
}
