//! # kanon-anim
//!
//! The Kanon animation orchestration state machine.
//!
//! Every mutation to a geometric object routes through one
//! [`Orchestrator::submit`] entry point, which decides — from an
//! explicit stack of modes — whether the mutation plays now as a
//! visible animation, is batched with its siblings into one atomic
//! simultaneous transition, or is applied silently. An independent
//! stack of speed multipliers scales the effective duration of whatever
//! plays. The lifecycle glue in [`steps`] expresses entity
//! construction, movement, and removal as submissions.
//!
//! Execution is single-threaded and cooperative: "simultaneous" means
//! visual concurrency within one transition, never parallel execution.

pub mod mutation;
pub mod orchestrator;
pub mod registry;
pub mod scope;
pub mod sink;
pub mod steps;
pub mod transition;

pub use mutation::Mutation;
pub use orchestrator::{Mode, Orchestrator};
pub use registry::Registry;
pub use scope::{BatchScope, SilentScope, SpeedScope};
pub use sink::{PlaybackSink, RecordingSink, SinkEvent};
pub use steps::{ConstructionCtx, EntityOptions};
pub use transition::Transition;
