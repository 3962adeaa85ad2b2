//! Task identity and cooperative cancellation for dispatched commands.
//!
//! Every flushed command gets a [`TaskHandle`] whose token is a child of the
//! context's root token, so `StateCtx::shutdown` reaches all of them. Commands
//! marked latest-only additionally keep their handle so the next dispatch of the
//! same command can cancel it.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Identifies one run of a command: the command type plus a generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher is newer.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A running task's id together with its cancellation token.
///
/// Cancellation is cooperative: the command must observe the token, usually via
/// `tokio::select!` on `cancel.cancelled()`.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_accessors() {
        let type_id = TypeId::of::<String>();
        let task_id = TaskId::new(type_id, 42);

        assert_eq!(task_id.type_id(), type_id);
        assert_eq!(task_id.generation(), 42);
    }

    #[test]
    fn task_ids_differ_by_generation_and_type() {
        let id1 = TaskId::new(TypeId::of::<String>(), 1);
        let id2 = TaskId::new(TypeId::of::<String>(), 2);
        let id3 = TaskId::new(TypeId::of::<i32>(), 1);

        assert_ne!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, TaskId::new(TypeId::of::<String>(), 1));
    }

    #[test]
    fn cloned_handles_share_the_token() {
        let handle = TaskHandle::new(
            TaskId::new(TypeId::of::<String>(), 1),
            CancellationToken::new(),
        );
        let clone = handle.clone();
        let token = handle.cancellation_token();

        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancelling_parent_reaches_child_handle() {
        let root = CancellationToken::new();
        let handle = TaskHandle::new(TaskId::new(TypeId::of::<u8>(), 7), root.child_token());

        root.cancel();
        assert!(handle.is_cancelled());
    }
}
