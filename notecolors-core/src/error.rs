//! # Error Module
//!
//! Typed, recoverable conditions returned by the trainer core. None of these
//! terminate the process; callers decide how to surface them to the learner.

use thiserror::Error;

use crate::registry::NoteId;

/// Errors produced by the note registry, color mapper and trainer session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainerError {
    /// A note letter outside the fixed registry was supplied.
    #[error("unknown note letter: {0:?}")]
    UnknownNoteLetter(String),

    /// A note identifier could not be parsed (missing or malformed octave).
    #[error("invalid note identifier: {0:?}")]
    InvalidNoteId(String),

    /// The registry entry for this note intentionally has no frequency.
    #[error("note {0} has no playable frequency")]
    UnplayableNote(NoteId),

    /// A guess was submitted while no challenge was pending.
    #[error("no active challenge to evaluate")]
    NoActiveChallenge,

    /// A session was constructed with no candidate notes.
    #[error("the note pool is empty")]
    EmptyPool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PitchClass;

    #[test]
    fn messages_name_the_offending_value() {
        let err = TrainerError::UnknownNoteLetter("z".to_string());
        assert_eq!(err.to_string(), "unknown note letter: \"z\"");

        let err = TrainerError::UnplayableNote(NoteId::new(PitchClass::L, 4));
        assert_eq!(err.to_string(), "note l4 has no playable frequency");
    }
}
