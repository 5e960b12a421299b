//! The renderer boundary.
//!
//! The orchestrator hands fully decided work to a [`PlaybackSink`]:
//! either an atomic animated [`Transition`] or a single mutation to
//! apply instantly. The real renderer lives outside this crate; tests
//! use [`RecordingSink`] to assert on exactly what crossed the
//! boundary.

use serde::{Deserialize, Serialize};

use kanon_core::Timestamp;

use crate::mutation::Mutation;
use crate::transition::Transition;

/// Consumer of decided animation work.
pub trait PlaybackSink {
    /// Play one atomic transition. Blocking from the kernel's point of
    /// view: control returns only after the transition's virtual
    /// duration has been accounted for.
    fn play(&mut self, transition: Transition);

    /// Apply a mutation's end-state with no animation.
    fn apply(&mut self, mutation: &Mutation);
}

/// One call that crossed the sink boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SinkEvent {
    Played(Transition),
    Applied(Mutation),
}

/// A sink that records every call and advances a virtual clock, for
/// tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
    /// Virtual playhead, advanced by each played transition.
    pub clock: Timestamp,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions that were played, in order.
    pub fn played(&self) -> Vec<&Transition> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Played(t) => Some(t),
                SinkEvent::Applied(_) => None,
            })
            .collect()
    }

    /// Mutations that were applied silently, in order.
    pub fn applied(&self) -> Vec<&Mutation> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Applied(m) => Some(m),
                SinkEvent::Played(_) => None,
            })
            .collect()
    }
}

impl PlaybackSink for RecordingSink {
    fn play(&mut self, transition: Transition) {
        self.clock = self.clock + transition.duration;
        self.events.push(SinkEvent::Played(transition));
    }

    fn apply(&mut self, mutation: &Mutation) {
        self.events.push(SinkEvent::Applied(mutation.clone()));
    }
}
