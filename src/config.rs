use std::num::NonZeroUsize;

use crate::error::EngineError;
use crate::search::Depth;

/// Search depth used by the Medium and Hard tiers
pub const DEFAULT_SEARCH_DEPTH: Depth = 3;

/// Number of memoized search results kept before the oldest are evicted
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

/// Tunables of a [`BotPlayer`](crate::difficulty::BotPlayer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched by the Medium and Hard tiers
    pub search_depth: Depth,
    /// Maximum number of memo cache entries
    pub cache_capacity: usize,
    /// Seed for the Easy tier's move choice, `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_search_depth(mut self, search_depth: Depth) -> Self {
        self.search_depth = search_depth;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the values and returns the cache capacity as a `NonZeroUsize`
    pub fn validate(&self) -> Result<NonZeroUsize, EngineError> {
        if self.search_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "search_depth must be at least 1".into(),
            ));
        }
        NonZeroUsize::new(self.cache_capacity)
            .ok_or_else(|| EngineError::InvalidConfig("cache_capacity must be > 0".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.validate().map(NonZeroUsize::get), Ok(DEFAULT_CACHE_CAPACITY));
    }

    #[test]
    fn rejects_zero_values() {
        assert_eq!(
            EngineConfig::default().with_search_depth(0).validate(),
            Err(EngineError::InvalidConfig("search_depth must be at least 1".into()))
        );
        assert_eq!(
            EngineConfig::default().with_cache_capacity(0).validate(),
            Err(EngineError::InvalidConfig("cache_capacity must be > 0".into()))
        );
    }

    #[test]
    fn builder_sets_fields() {
        let config = EngineConfig::default()
            .with_search_depth(4)
            .with_cache_capacity(10)
            .with_seed(7);
        assert_eq!(
            config,
            EngineConfig {
                search_depth: 4,
                cache_capacity: 10,
                seed: Some(7)
            }
        );
    }
}
