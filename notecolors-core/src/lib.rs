// notecolors-core/src/lib.rs

//! The core logic for the note-colors ear trainer.
//! This crate maps pitch classes and octaves to colors and runs the adaptive
//! trainer that unlocks new notes as the learner masters them. It is
//! completely headless: audio output and rendering are supplied by the
//! embedding application through the `ToneSink` and `PatchDisplay` traits.

pub mod audio;
pub mod color;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod registry;
pub mod rng;
pub mod session;

pub use color::{Rgb, color_for, map_color};
pub use error::TrainerError;
pub use registry::{NoteId, PitchClass};
pub use session::{Challenge, GuessOutcome, NoteStats, PROGRESSION_THRESHOLD, TrainerSession};
