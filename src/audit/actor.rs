//! Actor identity lookup
//!
//! The engine asks a provider for the current actor instead of reading
//! session state; "nobody is logged in" is a normal answer, not an error.

use crate::models::ActorId;

/// Source of the identity responsible for the current mutation
pub trait ActorProvider {
    fn current_actor(&self) -> Option<ActorId>;
}

/// Provider for unauthenticated contexts (batch jobs, migrations)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActor;

impl ActorProvider for NoActor {
    fn current_actor(&self) -> Option<ActorId> {
        None
    }
}

/// Provider that always reports the same actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedActor(pub ActorId);

impl FixedActor {
    pub fn new(actor: impl Into<ActorId>) -> Self {
        Self(actor.into())
    }
}

impl ActorProvider for FixedActor {
    fn current_actor(&self) -> Option<ActorId> {
        Some(self.0.clone())
    }
}

impl<F> ActorProvider for F
where
    F: Fn() -> Option<ActorId>,
{
    fn current_actor(&self) -> Option<ActorId> {
        self()
    }
}
