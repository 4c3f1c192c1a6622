//! # Display Refresh Module
//!
//! Pushes patch colors to the rendering collaborator.
//!
//! The display path never fails: identifiers that cannot be resolved are
//! painted with `FALLBACK_COLOR` and the remaining patches are still drawn.

use std::collections::BTreeMap;

use crate::color::{FALLBACK_COLOR, Rgb, color_for};
use crate::registry::NoteId;

/// The rendering collaborator.
pub trait PatchDisplay {
    /// Paints the patch for `note`.
    fn set_patch_color(&mut self, note: &NoteId, color: Rgb);

    /// Paints a patch whose stored identifier could not be resolved.
    fn set_unresolved_patch_color(&mut self, raw_id: &str, color: Rgb);
}

/// An in-memory display keyed by the patch identifier text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorBoard {
    patches: BTreeMap<String, Rgb>,
}

impl ColorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, id: &str) -> Option<Rgb> {
        self.patches.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl PatchDisplay for ColorBoard {
    fn set_patch_color(&mut self, note: &NoteId, color: Rgb) {
        self.patches.insert(note.to_string(), color);
    }

    fn set_unresolved_patch_color(&mut self, raw_id: &str, color: Rgb) {
        self.patches.insert(raw_id.to_string(), color);
    }
}

/// Recomputes and pushes the color of every active note.
pub fn refresh_active<D: PatchDisplay + ?Sized>(display: &mut D, active_notes: &[NoteId]) {
    for note in active_notes {
        display.set_patch_color(note, color_for(note));
    }
    log::debug!("[DISPLAY] Refreshed {} patches", active_notes.len());
}

/// Rebuilds a display from stored identifier strings such as `"i4"`.
///
/// # Returns
/// * The number of identifiers that fell back to `FALLBACK_COLOR`
pub fn refresh_from_stored<D: PatchDisplay + ?Sized>(display: &mut D, stored_ids: &[&str]) -> usize {
    let mut fallbacks = 0;
    for raw in stored_ids {
        match raw.parse::<NoteId>() {
            Ok(note) => display.set_patch_color(&note, color_for(&note)),
            Err(err) => {
                log::warn!("[DISPLAY] Error getting color for {:?}: {}", raw, err);
                display.set_unresolved_patch_color(raw, FALLBACK_COLOR);
                fallbacks += 1;
            }
        }
    }
    fallbacks
}
