use serde::{Deserialize, Serialize};

use kanon_core::{Duration, Easing};

use crate::mutation::Mutation;

/// One atomic animated unit: all of its mutations play concurrently
/// over the same timeline window, never sequentially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub mutations: Vec<Mutation>,
    /// Effective duration, after speed scaling.
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    /// Base run time of a construction transition before speed scaling.
    pub const DEFAULT_RUN_TIME_SECS: f64 = 1.0;

    pub fn new(mutations: Vec<Mutation>) -> Self {
        Self {
            mutations,
            duration: Duration::from_seconds(Self::DEFAULT_RUN_TIME_SECS),
            easing: Easing::default(),
        }
    }

    pub fn single(mutation: Mutation) -> Self {
        Self::new(vec![mutation])
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
