use std::any::{Any, TypeId, type_name};

use flume::{Receiver, Sender};
use log::warn;

use crate::Command;

/// Message from a running command back to the owning `StateCtx`.
pub enum Update {
    /// Replacement value addressed by the type it replaces.
    Set(TypeId, Box<dyn Any + Send>),
    /// Command to spawn on the next sync, with a fresh snapshot.
    Enqueue(TypeId),
}

impl std::fmt::Debug for Update {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set(id, _) => f.debug_tuple("Set").field(id).finish(),
            Self::Enqueue(id) => f.debug_tuple("Enqueue").field(id).finish(),
        }
    }
}

/// Channel between running commands/computes and the owning `StateCtx`.
#[derive(Debug)]
pub struct StateRuntime {
    send: Sender<Update>,
    recv: Receiver<Update>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self { send, recv }
    }

    pub fn updater(&self) -> Updater {
        Updater {
            send: self.send.clone(),
        }
    }

    /// Drain everything received so far without waiting.
    pub fn drain(&self) -> Vec<Update> {
        self.recv.try_iter().collect()
    }

    /// Whether something was published and not drained yet.
    pub fn has_pending(&self) -> bool {
        !self.recv.is_empty()
    }
}

/// Send-safe handle that publishes new values for states or computes.
///
/// Values are queued and only become visible after the next
/// `StateCtx::sync_computes`.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub fn set<T: Any + Send>(&self, value: T) {
        if self
            .send
            .send(Update::Set(TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            warn!("StateCtx is gone, dropping update for {}", type_name::<T>());
        }
    }

    /// Ask the owning context to run `T` once the updates sent so far are applied.
    ///
    /// Goes through the regular dispatch path, so latest-only commands still
    /// cancel their previous run.
    pub fn enqueue<T: Command>(&self) {
        if self.send.send(Update::Enqueue(TypeId::of::<T>())).is_err() {
            warn!("StateCtx is gone, dropping command {}", type_name::<T>());
        }
    }
}
