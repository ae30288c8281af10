use rand::Rng;

use crate::config::CueConfig;

/// Fixed collection of one-shot cue names, all played at a single configured
/// volume. Selection is uniform over the collection.
#[derive(Debug, Clone)]
pub struct CueBank {
    names: Vec<String>,
    volume: f32,
}

impl CueBank {
    pub fn new(names: Vec<String>, volume: f32) -> Self {
        Self { names, volume }
    }

    pub fn from_config(cfg: &CueConfig) -> Self {
        Self::new(cfg.names.clone(), cfg.volume)
    }

    /// One uniform draw; an empty bank yields nothing.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.names.len());
        Some(&self.names[idx])
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
