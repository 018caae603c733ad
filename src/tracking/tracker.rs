use tracing::debug;

use super::correspondence::MatchStrategy;
use super::transition::transition_with;
use super::{Dissimilarity, IdentityMap, TrackingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::Hungarian,
        }
    }
}

impl TrackerConfig {
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Follows objects over consecutive time steps.
///
/// The first step numbers the objects `0..n` in order; every later step runs a transition from
/// the previous map. All maps produced so far are kept in [Tracker::history].
#[derive(Debug)]
pub struct Tracker<T, D> {
    dissimilarity: D,
    config: TrackerConfig,
    history: Vec<IdentityMap<T>>,
}

impl<T, D> Tracker<T, D>
where
    T: Clone,
    D: Dissimilarity<T>,
{
    pub fn new(dissimilarity: D, config: TrackerConfig) -> Self {
        Self {
            dissimilarity,
            config,
            history: Vec::new(),
        }
    }

    pub fn step(&mut self, objects: Vec<T>) -> Result<&IdentityMap<T>, TrackingError> {
        let next = match self.history.last() {
            None => IdentityMap::initial(objects),
            Some(previous) => transition_with(
                previous,
                &objects,
                &self.dissimilarity,
                &self.config.strategy,
            )?,
        };
        debug!(frame = self.history.len(), objects = next.len(), "tracker step");

        self.history.push(next);
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn current(&self) -> Option<&IdentityMap<T>> {
        self.history.last()
    }

    pub fn history(&self) -> &[IdentityMap<T>] {
        &self.history
    }

    pub fn into_history(self) -> Vec<IdentityMap<T>> {
        self.history
    }

    /// Number of steps taken so far
    pub fn frames(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}
