//! # Configuration Module
//!
//! Trainer settings loaded from JSON.
//!
//! ```json
//! { "pool": ["i4", "j4", "k4", "r4"], "tone_duration_ms": 500, "seed": 7 }
//! ```
//!
//! Every field is optional. Note ids are validated while the file is read, so
//! an unknown letter is reported before any session exists.

use anyhow::{Context, Result};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::audio::DEFAULT_TONE_DURATION_MS;
use crate::error::TrainerError;
use crate::registry::{NoteId, PitchClass};
use crate::rng::{create_entropy_rng, create_rng};
use crate::session::TrainerSession;

/// Settings for one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Candidate notes in unlock order.
    pub pool: Vec<NoteId>,
    /// Length of each challenge tone.
    pub tone_duration_ms: u32,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            pool: default_pool(),
            tone_duration_ms: DEFAULT_TONE_DURATION_MS,
            seed: None,
        }
    }
}

/// The playable middle-octave notes, in chromatic order.
pub fn default_pool() -> Vec<NoteId> {
    [PitchClass::I, PitchClass::J, PitchClass::K, PitchClass::R]
        .into_iter()
        .map(|pitch| NoteId::new(pitch, 4))
        .collect()
}

impl TrainerConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid trainer configuration")
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        log::info!(
            "[CONFIG] Loaded {} with {} pool notes",
            path.display(),
            config.pool.len()
        );
        Ok(config)
    }

    /// Builds a session over the configured pool.
    pub fn build_session(&self) -> Result<TrainerSession<Pcg32>, TrainerError> {
        let rng = match self.seed {
            Some(seed) => create_rng(seed),
            None => create_entropy_rng(),
        };
        TrainerSession::new(self.pool.clone(), rng)
    }
}
