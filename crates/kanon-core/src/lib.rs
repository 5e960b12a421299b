//! # kanon-core
//!
//! Core types and primitives for the Kanon construction engine.
//! This crate contains foundational types shared across all Kanon crates:
//! vectors, tolerances, durations, easing functions, colors, and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod time;
pub mod types;

pub use color::Color;
pub use config::ToleranceConfig;
pub use error::{KanonError, KanonResult};
pub use math::Vec2;
pub use time::{Duration, Timestamp};
pub use types::Easing;
