//! The mode/speed stack state machine.
//!
//! The orchestrator is an owned value passed by reference — never
//! ambient or thread-local state. Callers must keep strict LIFO
//! discipline on the stacks; an unmatched exit is a contract violation
//! and panics, since it would corrupt all subsequent sequencing.
//! The scope guards in [`crate::scope`] make imbalance unreachable
//! from guarded code.

use serde::{Deserialize, Serialize};

use kanon_core::{Duration, Easing};

use crate::mutation::Mutation;
use crate::sink::PlaybackSink;
use crate::transition::Transition;

/// How a submitted mutation is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Apply and animate each mutation as it happens.
    Immediate,
    /// Defer mutations, collecting them into one atomic transition.
    Batching,
    /// Apply each mutation's end-state with no animation.
    Silent,
}

/// The animation orchestration state machine.
pub struct Orchestrator<S: PlaybackSink> {
    sink: S,
    /// Mode stack; the bottom `Immediate` is never popped.
    modes: Vec<Mode>,
    /// One collection list per `Batching` entry on the mode stack.
    batches: Vec<Vec<Mutation>>,
    /// Speed multipliers, composed multiplicatively outermost-first.
    speeds: Vec<f64>,
    base_run_time: Duration,
    easing: Easing,
}

impl<S: PlaybackSink> Orchestrator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            modes: vec![Mode::Immediate],
            batches: Vec::new(),
            speeds: Vec::new(),
            base_run_time: Duration::from_seconds(Transition::DEFAULT_RUN_TIME_SECS),
            easing: Easing::default(),
        }
    }

    /// Override the base run time used for played transitions.
    pub fn with_run_time(mut self, run_time: Duration) -> Self {
        self.base_run_time = run_time;
        self
    }

    pub fn current_mode(&self) -> Mode {
        *self.modes.last().expect("mode stack holds base Immediate")
    }

    /// Product of all active speed multipliers.
    pub fn speed_product(&self) -> f64 {
        self.speeds.iter().product()
    }

    /// Effective duration of an animation submitted now.
    pub fn effective_duration(&self) -> Duration {
        self.base_run_time / self.speed_product()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The single entry point every geometry-mutating call routes
    /// through.
    pub fn submit(&mut self, mutation: Mutation) {
        match self.current_mode() {
            Mode::Immediate => {
                tracing::debug!(%mutation, "playing immediately");
                let transition = Transition::single(mutation)
                    .with_duration(self.effective_duration())
                    .with_easing(self.easing);
                self.sink.play(transition);
            }
            Mode::Batching => {
                tracing::debug!(%mutation, "collected into batch");
                self.batches
                    .last_mut()
                    .expect("batching mode has a collection list")
                    .push(mutation);
            }
            Mode::Silent => {
                tracing::debug!(%mutation, "applied silently");
                self.sink.apply(&mutation);
            }
        }
    }

    /// Push `Batching` with a fresh empty collection list.
    pub fn enter_batch(&mut self) {
        self.modes.push(Mode::Batching);
        self.batches.push(Vec::new());
    }

    /// Pop the current batch and flush it: into the enclosing batch if
    /// one is active, silently if the enclosing mode is silent, or as
    /// one atomic animated transition otherwise. An empty batch flushes
    /// to nothing.
    ///
    /// # Panics
    /// If the current mode is not `Batching`.
    pub fn exit_batch(&mut self) {
        match self.modes.pop() {
            Some(Mode::Batching) => {}
            top => panic!("unbalanced scope: exit_batch with mode {top:?}"),
        }
        let collected = self.batches.pop().expect("batch list tracks mode stack");
        if collected.is_empty() {
            return;
        }
        match self.current_mode() {
            Mode::Batching => {
                tracing::debug!(count = collected.len(), "batch folded into outer batch");
                self.batches
                    .last_mut()
                    .expect("batching mode has a collection list")
                    .extend(collected);
            }
            Mode::Silent => {
                tracing::debug!(count = collected.len(), "batch applied silently");
                for mutation in &collected {
                    self.sink.apply(mutation);
                }
            }
            Mode::Immediate => {
                tracing::debug!(count = collected.len(), "batch played as one transition");
                let transition = Transition::new(collected)
                    .with_duration(self.effective_duration())
                    .with_easing(self.easing);
                self.sink.play(transition);
            }
        }
    }

    /// Push `Silent`: mutations apply to final state with no
    /// transition, so throwaway helper constructions never appear on
    /// screen even momentarily.
    pub fn enter_silent(&mut self) {
        self.modes.push(Mode::Silent);
    }

    /// # Panics
    /// If the current mode is not `Silent`.
    pub fn exit_silent(&mut self) {
        match self.modes.pop() {
            Some(Mode::Silent) => {}
            top => panic!("unbalanced scope: exit_silent with mode {top:?}"),
        }
    }

    /// Push a speed multiplier. Factors must be positive.
    ///
    /// # Panics
    /// On a non-positive factor.
    pub fn enter_speed(&mut self, factor: f64) {
        assert!(
            factor > 0.0 && factor.is_finite(),
            "speed factor must be positive and finite, got {factor}"
        );
        self.speeds.push(factor);
    }

    /// Pop a speed multiplier; the factor is passed again so call sites
    /// stay textually paired, and is checked against the popped value.
    ///
    /// # Panics
    /// If the stack is empty or the factor does not match.
    pub fn exit_speed(&mut self, factor: f64) {
        match self.speeds.pop() {
            Some(top) if (top - factor).abs() < 1e-9 => {}
            top => panic!("unbalanced scope: exit_speed({factor}) against {top:?}"),
        }
    }

    /// Depth of the mode stack above the base mode.
    pub fn scope_depth(&self) -> usize {
        self.modes.len() - 1
    }
}
