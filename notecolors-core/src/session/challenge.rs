//! Challenge selection and answer evaluation.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{NoteStats, PROGRESSION_THRESHOLD, TrainerSession};
use crate::error::TrainerError;
use crate::registry::NoteId;

/// A posed challenge: the note to identify and the frequency to play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Challenge {
    pub note: NoteId,
    /// Playback frequency in Hz, already scaled to the note's octave.
    pub frequency_hz: f32,
}

/// Result of evaluating one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    /// The note unlocked by this answer, if it triggered progression.
    pub unlocked_note: Option<NoteId>,
}

impl<R: Rng> TrainerSession<R> {
    /// Picks a random active note and makes it the pending challenge.
    ///
    /// Issuing a new challenge while one is pending replaces the target.
    ///
    /// # Returns
    /// * `Ok(challenge)` - The chosen note and its playback frequency
    /// * `Err(TrainerError::UnplayableNote)` - The chosen pitch class has no
    ///   frequency; the target is left untouched
    pub fn issue_challenge(&mut self) -> Result<Challenge, TrainerError> {
        let note = *self
            .active_notes
            .choose(&mut self.rng)
            .ok_or(TrainerError::EmptyPool)?;

        let frequency_hz = note
            .frequency_hz()
            .ok_or(TrainerError::UnplayableNote(note))?;

        self.current_target = Some(note);
        self.stats.entry(note).or_default();

        log::debug!("[SESSION] Challenge issued: {} at {:.2} Hz", note, frequency_hz);
        Ok(Challenge { note, frequency_hz })
    }
}

impl<R> TrainerSession<R> {
    /// Compares the learner's selection against the pending challenge.
    ///
    /// A correct answer bumps the note's counter and clears the target. When
    /// the counter lands exactly on [`PROGRESSION_THRESHOLD`] one unlock is
    /// attempted. A wrong answer keeps the same challenge pending.
    ///
    /// # Returns
    /// * `Ok(outcome)` - Whether the guess was correct and what was unlocked
    /// * `Err(TrainerError::NoActiveChallenge)` - No challenge was pending
    pub fn evaluate_guess(&mut self, selected: &NoteId) -> Result<GuessOutcome, TrainerError> {
        let target = self.current_target.ok_or(TrainerError::NoActiveChallenge)?;

        if *selected != target {
            log::debug!("[SESSION] Wrong guess {} for target {}", selected, target);
            return Ok(GuessOutcome {
                correct: false,
                unlocked_note: None,
            });
        }

        let stats = self.stats.entry(target).or_insert_with(NoteStats::default);
        stats.correct_count += 1;
        let correct_count = stats.correct_count;
        self.current_target = None;

        log::debug!("[SESSION] Correct: {} ({} so far)", target, correct_count);

        // Exact match: later correct answers on the same note never re-trigger.
        let unlocked_note = if correct_count == PROGRESSION_THRESHOLD {
            self.attempt_unlock()
        } else {
            None
        };

        Ok(GuessOutcome {
            correct: true,
            unlocked_note,
        })
    }
}
