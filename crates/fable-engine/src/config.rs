//! Configuration for a game engine.

/// Configuration for a [`GameEngine`](crate::GameEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// RNG seed for reproducible dice. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Whether to save automatically while playing.
    pub autosave: bool,
    /// Autosave after this many turns (at least 1).
    pub autosave_interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            autosave: true,
            autosave_interval: 10,
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn autosave on or off.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Set the autosave interval (clamped to at least 1).
    pub fn with_autosave_interval(mut self, turns: u32) -> Self {
        self.autosave_interval = turns.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, None);
        assert!(cfg.autosave);
        assert_eq!(cfg.autosave_interval, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_autosave(false)
            .with_autosave_interval(3);
        assert_eq!(cfg.seed, Some(7));
        assert!(!cfg.autosave);
        assert_eq!(cfg.autosave_interval, 3);
    }

    #[test]
    fn interval_clamped() {
        let cfg = EngineConfig::default().with_autosave_interval(0);
        assert_eq!(cfg.autosave_interval, 1);
    }
}
