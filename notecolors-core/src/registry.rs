//! # Note Registry Module
//!
//! This module holds the fixed table of the twelve pitch classes used by the
//! trainer, together with the `NoteId` type that pairs a pitch class with an
//! octave.
//!
//! ## Features
//! - Closed `PitchClass` enum, one variant per registry letter (`i` to `t`)
//! - Base color and optional base frequency for every pitch class
//! - Equal temperament octave scaling relative to the middle octave
//! - Parsing and formatting of note identifiers such as `"i4"` or `"r-1"`

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::color::{MIDDLE_OCTAVE, Rgb};
use crate::error::TrainerError;

/// One of the twelve pitch classes, named by its registry letter.
///
/// The letters run chromatically from `I` (B#/C) to `T` (B/Cb).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
}

impl PitchClass {
    /// Every pitch class in chromatic order.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::I,
        PitchClass::J,
        PitchClass::K,
        PitchClass::L,
        PitchClass::M,
        PitchClass::N,
        PitchClass::O,
        PitchClass::P,
        PitchClass::Q,
        PitchClass::R,
        PitchClass::S,
        PitchClass::T,
    ];

    /// The registry letter for this pitch class.
    pub fn letter(self) -> char {
        match self {
            PitchClass::I => 'i',
            PitchClass::J => 'j',
            PitchClass::K => 'k',
            PitchClass::L => 'l',
            PitchClass::M => 'm',
            PitchClass::N => 'n',
            PitchClass::O => 'o',
            PitchClass::P => 'p',
            PitchClass::Q => 'q',
            PitchClass::R => 'r',
            PitchClass::S => 's',
            PitchClass::T => 't',
        }
    }

    /// Looks up a pitch class by its registry letter.
    ///
    /// # Returns
    /// * `Ok(pitch)` - The matching pitch class
    /// * `Err(TrainerError::UnknownNoteLetter)` - The letter is not registered
    pub fn from_letter(letter: char) -> Result<Self, TrainerError> {
        LETTER_MAP
            .get(&letter)
            .copied()
            .ok_or_else(|| TrainerError::UnknownNoteLetter(letter.to_string()))
    }

    /// The registry entry for this pitch class.
    pub fn definition(self) -> &'static NoteDefinition {
        NoteRegistry::standard().get(self)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Immutable description of a single pitch class.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDefinition {
    /// The pitch class this entry describes.
    pub pitch: PitchClass,
    /// Human readable name, e.g. "A (Orange)".
    pub display_name: &'static str,
    /// Authored color; only its hue is used by the color mapper.
    pub base_color: Rgb,
    /// Frequency in Hz at the middle octave. `None` marks a placeholder
    /// pitch class that cannot be played yet.
    pub base_frequency_hz: Option<f32>,
}

impl NoteDefinition {
    /// Frequency of this pitch class in the given octave.
    ///
    /// Each octave away from the middle octave doubles or halves the base
    /// frequency (f = f4 * 2^(octave - 4)). Octaves so far out that the
    /// result is not a finite positive frequency yield `None`.
    pub fn frequency_at(&self, octave: i32) -> Option<f32> {
        let base = self.base_frequency_hz?;
        let exponent = octave.checked_sub(MIDDLE_OCTAVE)?;
        let frequency = base * 2.0_f32.powi(exponent);
        (frequency.is_finite() && frequency > 0.0).then_some(frequency)
    }
}

/// The fixed table of pitch class definitions.
///
/// There is exactly one entry per `PitchClass`, stored in chromatic order, so
/// lookups by pitch class never fail.
#[derive(Debug)]
pub struct NoteRegistry {
    definitions: Vec<NoteDefinition>,
}

impl NoteRegistry {
    /// The registry shared by the whole process.
    pub fn standard() -> &'static NoteRegistry {
        &NOTE_REGISTRY
    }

    /// Returns the definition for a pitch class.
    pub fn get(&self, pitch: PitchClass) -> &NoteDefinition {
        &self.definitions[pitch.index()]
    }

    /// Returns the definition for a registry letter.
    pub fn lookup(&self, letter: char) -> Result<&NoteDefinition, TrainerError> {
        PitchClass::from_letter(letter).map(|pitch| self.get(pitch))
    }

    /// Iterates over all definitions in chromatic order.
    pub fn iter(&self) -> impl Iterator<Item = &NoteDefinition> {
        self.definitions.iter()
    }
}

/// Statically built registry, in the same order as `PitchClass::ALL`.
///
/// Frequencies are only defined for the pitch classes that are playable in
/// this version of the trainer; the remaining ones are placeholders.
static NOTE_REGISTRY: Lazy<NoteRegistry> = Lazy::new(|| {
    let table: [(&'static str, (f32, f32, f32), Option<f32>); 12] = [
        ("B#/C (Chartreuse)", (0.5, 1.0, 0.0), Some(261.63)), // Middle C
        ("C#/Db (Green)", (0.0, 0.5, 0.0), Some(277.18)),
        ("D (Cyan)", (0.0, 1.0, 1.0), Some(293.66)),
        ("D#/Eb (Blue)", (0.0, 0.0, 1.0), None),      // 311.13 Hz
        ("E/Fb (Indigo)", (0.29, 0.0, 0.51), None),   // 329.63 Hz
        ("F (Violet)", (0.5, 0.0, 1.0), None),        // 349.23 Hz
        ("F#/Gb (Rose)", (1.0, 0.4, 0.7), None),      // 369.99 Hz
        ("G (Red)", (1.0, 0.0, 0.0), None),           // 392.00 Hz
        ("G#/Ab (Vermillion)", (0.9, 0.25, 0.21), None), // 415.30 Hz
        ("A (Orange)", (1.0, 0.65, 0.0), Some(440.00)), // A4 (standard)
        ("A#/Bb (Goldenrod)", (0.85, 0.65, 0.13), None), // 466.16 Hz
        ("B/Cb (Yellow)", (1.0, 1.0, 0.0), None),     // 493.88 Hz
    ];

    let definitions = PitchClass::ALL
        .iter()
        .zip(table)
        .map(|(&pitch, (display_name, (r, g, b), base_frequency_hz))| NoteDefinition {
            pitch,
            display_name,
            base_color: Rgb::new(r, g, b),
            base_frequency_hz,
        })
        .collect();

    NoteRegistry { definitions }
});

/// Static map for letter to pitch class lookups.
static LETTER_MAP: Lazy<BTreeMap<char, PitchClass>> = Lazy::new(|| {
    PitchClass::ALL
        .iter()
        .map(|&pitch| (pitch.letter(), pitch))
        .collect()
});

/// A pitch class in a specific octave.
///
/// Two ids are equal iff both the pitch class and the octave match. The
/// textual form is the letter followed by the octave, e.g. `"j4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId {
    pub pitch: PitchClass,
    pub octave: i32,
}

impl NoteId {
    pub fn new(pitch: PitchClass, octave: i32) -> Self {
        Self { pitch, octave }
    }

    /// Builds an id from a registry letter and an octave.
    pub fn from_letter(letter: char, octave: i32) -> Result<Self, TrainerError> {
        PitchClass::from_letter(letter).map(|pitch| Self::new(pitch, octave))
    }

    /// The registry entry for this note's pitch class.
    pub fn definition(&self) -> &'static NoteDefinition {
        self.pitch.definition()
    }

    /// Playback frequency for this note, if its pitch class is playable.
    pub fn frequency_hz(&self) -> Option<f32> {
        self.definition().frequency_at(self.octave)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch.letter(), self.octave)
    }
}

impl FromStr for NoteId {
    type Err = TrainerError;

    /// Parses ids like `"i4"` or `"r-1"`. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| TrainerError::InvalidNoteId(s.to_string()))?;
        let pitch = PitchClass::from_letter(letter)?;
        let octave = chars
            .as_str()
            .parse::<i32>()
            .map_err(|_| TrainerError::InvalidNoteId(s.to_string()))?;
        Ok(NoteId::new(pitch, octave))
    }
}

impl TryFrom<String> for NoteId {
    type Error = TrainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoteId> for String {
    fn from(id: NoteId) -> Self {
        id.to_string()
    }
}
