//! Scoped-acquisition wrappers for the orchestrator stacks.
//!
//! Guards pair every enter with an exit along all exit paths, including
//! early `?` returns — the RAII pattern applied to animation context
//! rather than memory.

use std::ops::{Deref, DerefMut};

use crate::orchestrator::Orchestrator;
use crate::sink::PlaybackSink;

/// Guard for a `Batching` scope; exits the batch on drop.
pub struct BatchScope<'a, S: PlaybackSink> {
    orch: &'a mut Orchestrator<S>,
}

/// Guard for a `Silent` scope; exits on drop.
pub struct SilentScope<'a, S: PlaybackSink> {
    orch: &'a mut Orchestrator<S>,
}

/// Guard for a speed multiplier; pops it on drop.
pub struct SpeedScope<'a, S: PlaybackSink> {
    orch: &'a mut Orchestrator<S>,
    factor: f64,
}

impl<S: PlaybackSink> Orchestrator<S> {
    /// Enter a batch scope that closes when the guard drops.
    pub fn batch_scope(&mut self) -> BatchScope<'_, S> {
        self.enter_batch();
        BatchScope { orch: self }
    }

    /// Enter a silent scope that closes when the guard drops.
    pub fn silent_scope(&mut self) -> SilentScope<'_, S> {
        self.enter_silent();
        SilentScope { orch: self }
    }

    /// Push a speed multiplier that pops when the guard drops.
    pub fn speed_scope(&mut self, factor: f64) -> SpeedScope<'_, S> {
        self.enter_speed(factor);
        SpeedScope {
            orch: self,
            factor,
        }
    }

    /// Run `f` inside a batch scope. The scope closes before the result
    /// is returned, so collected mutations flush even when `f` fails.
    pub fn with_batch<R, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, E>,
    ) -> Result<R, E> {
        self.enter_batch();
        let out = f(self);
        self.exit_batch();
        out
    }

    /// Run `f` inside a silent scope.
    pub fn with_silent<R, E>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, E>,
    ) -> Result<R, E> {
        self.enter_silent();
        let out = f(self);
        self.exit_silent();
        out
    }

    /// Run `f` with an extra speed multiplier active.
    pub fn with_speed<R, E>(
        &mut self,
        factor: f64,
        f: impl FnOnce(&mut Self) -> Result<R, E>,
    ) -> Result<R, E> {
        self.enter_speed(factor);
        let out = f(self);
        self.exit_speed(factor);
        out
    }
}

macro_rules! impl_scope_deref {
    ($guard:ident) => {
        impl<'a, S: PlaybackSink> Deref for $guard<'a, S> {
            type Target = Orchestrator<S>;
            fn deref(&self) -> &Self::Target {
                self.orch
            }
        }

        impl<'a, S: PlaybackSink> DerefMut for $guard<'a, S> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                self.orch
            }
        }
    };
}

impl_scope_deref!(BatchScope);
impl_scope_deref!(SilentScope);
impl_scope_deref!(SpeedScope);

impl<S: PlaybackSink> Drop for BatchScope<'_, S> {
    fn drop(&mut self) {
        self.orch.exit_batch();
    }
}

impl<S: PlaybackSink> Drop for SilentScope<'_, S> {
    fn drop(&mut self) {
        self.orch.exit_silent();
    }
}

impl<S: PlaybackSink> Drop for SpeedScope<'_, S> {
    fn drop(&mut self) {
        let factor = self.factor;
        self.orch.exit_speed(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::Mutation;
    use crate::sink::RecordingSink;
    use kanon_core::KanonError;
    use kanon_geom::EntityId;

    fn orch() -> Orchestrator<RecordingSink> {
        Orchestrator::new(RecordingSink::new())
    }

    #[test]
    fn test_batch_scope_flushes_on_drop() {
        let mut o = orch();
        {
            let mut scope = o.batch_scope();
            scope.submit(Mutation::Appear(EntityId(0)));
            scope.submit(Mutation::Appear(EntityId(1)));
        }
        assert_eq!(o.scope_depth(), 0);
        let played = o.sink().played();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].mutations.len(), 2);
    }

    #[test]
    fn test_with_batch_flushes_on_error_path() {
        let mut o = orch();
        let result: Result<(), KanonError> = o.with_batch(|o| {
            o.submit(Mutation::Appear(EntityId(0)));
            Err(KanonError::Other("step failed".into()))
        });
        assert!(result.is_err());
        // Scope closed and collected work still flushed.
        assert_eq!(o.scope_depth(), 0);
        assert_eq!(o.sink().played().len(), 1);
    }

    #[test]
    fn test_with_silent_balances() {
        let mut o = orch();
        let ok: Result<(), KanonError> = o.with_silent(|o| {
            o.submit(Mutation::Remove(EntityId(2)));
            Ok(())
        });
        assert!(ok.is_ok());
        assert_eq!(o.scope_depth(), 0);
        assert_eq!(o.sink().applied().len(), 1);
    }

    #[test]
    fn test_speed_scope_pops_on_drop() {
        let mut o = orch();
        {
            let mut scope = o.speed_scope(4.0);
            assert!((scope.speed_product() - 4.0).abs() < 1e-12);
            scope.submit(Mutation::Appear(EntityId(0)));
        }
        assert!((o.speed_product() - 1.0).abs() < 1e-12);
        assert!((o.sink().played()[0].duration.as_seconds() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_nested_guards() {
        let mut o = orch();
        {
            let mut outer = o.batch_scope();
            outer.submit(Mutation::Appear(EntityId(0)));
            {
                let mut inner = outer.batch_scope();
                inner.submit(Mutation::Appear(EntityId(1)));
            }
            assert!(outer.sink().events.is_empty());
        }
        assert_eq!(o.sink().played()[0].mutations.len(), 2);
    }
}
