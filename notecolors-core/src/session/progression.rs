//! Unlocking the next note once mastery is shown.

use super::{NoteStats, TrainerSession};
use crate::registry::NoteId;

impl<R> TrainerSession<R> {
    /// Unlocks the first pool note that is not active yet.
    ///
    /// The pool is scanned in its original order. When every pool note is
    /// already active this is a no-op.
    ///
    /// # Returns
    /// * `Some(note)` - The note that was appended to the active set
    /// * `None` - The pool is fully unlocked
    pub fn attempt_unlock(&mut self) -> Option<NoteId> {
        let next = self
            .pool
            .iter()
            .copied()
            .find(|note| !self.active_notes.contains(note));

        match next {
            Some(note) => {
                self.active_notes.push(note);
                self.stats.entry(note).or_insert_with(NoteStats::default);
                log::info!(
                    "[SESSION] Unlocked {} ({} of {} notes active)",
                    note,
                    self.active_notes.len(),
                    self.pool.len()
                );
                Some(note)
            }
            None => {
                log::debug!("[SESSION] Pool fully unlocked, nothing to add");
                None
            }
        }
    }
}
