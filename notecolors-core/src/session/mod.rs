//! # Trainer Session
//!
//! Mutable state of one training run: the candidate pool, the unlocked
//! subset, per-note mastery counters and the pending challenge.
//!
//! # Components
//! - `mod.rs`: `TrainerSession` construction and read access
//! - `challenge.rs`: issuing challenges and evaluating guesses
//! - `progression.rs`: unlocking the next note from the pool

mod challenge;
mod progression;

pub use challenge::{Challenge, GuessOutcome};

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use std::collections::BTreeMap;

use crate::error::TrainerError;
use crate::registry::NoteId;

/// Number of correct identifications of one note that triggers an unlock.
pub const PROGRESSION_THRESHOLD: u32 = 3;

/// Mastery counters for a single note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteStats {
    /// Successful identifications of this note.
    pub correct_count: u32,
}

/// State of one training run.
///
/// The session is owned by a single actor and mutated only through
/// [`TrainerSession::issue_challenge`] and [`TrainerSession::evaluate_guess`].
/// Randomness comes from the injected `rng` so runs can be reproduced.
#[derive(Debug)]
pub struct TrainerSession<R = Pcg32> {
    /// Candidate notes in unlock order. Never mutated after construction.
    pool: Vec<NoteId>,
    /// Unlocked notes, in unlock order. Never shrinks.
    active_notes: Vec<NoteId>,
    /// One entry per note that has ever been active.
    stats: BTreeMap<NoteId, NoteStats>,
    /// The note the learner currently has to identify.
    current_target: Option<NoteId>,
    rng: R,
}

impl<R: Rng> TrainerSession<R> {
    /// Starts a session with one note picked uniformly at random from `pool`.
    ///
    /// # Returns
    /// * `Ok(session)` - A session with exactly one active note
    /// * `Err(TrainerError::EmptyPool)` - `pool` has no notes
    pub fn new(pool: Vec<NoteId>, mut rng: R) -> Result<Self, TrainerError> {
        let first = *pool.choose(&mut rng).ok_or(TrainerError::EmptyPool)?;

        let mut stats = BTreeMap::new();
        stats.insert(first, NoteStats::default());

        log::info!(
            "[SESSION] New session over {} pool notes, starting with {}",
            pool.len(),
            first
        );

        Ok(Self {
            pool,
            active_notes: vec![first],
            stats,
            current_target: None,
            rng,
        })
    }
}

impl<R> TrainerSession<R> {
    /// The candidate notes, in unlock order.
    pub fn pool(&self) -> &[NoteId] {
        &self.pool
    }

    /// The unlocked notes, in unlock order.
    pub fn active_notes(&self) -> &[NoteId] {
        &self.active_notes
    }

    /// The pending challenge, if any.
    pub fn current_target(&self) -> Option<NoteId> {
        self.current_target
    }

    /// Mastery counters for a note that has been active.
    pub fn stats(&self, note: &NoteId) -> Option<NoteStats> {
        self.stats.get(note).copied()
    }

    pub fn is_active(&self, note: &NoteId) -> bool {
        self.active_notes.contains(note)
    }

    /// True once every pool note has been unlocked.
    pub fn is_fully_unlocked(&self) -> bool {
        self.pool.iter().all(|note| self.is_active(note))
    }
}
