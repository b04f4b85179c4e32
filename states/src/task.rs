//! Handles for background tasks such as table pollers.
//!
//! A task is identified by a [`TaskId`] (owner type plus a generation counter) and
//! stopped cooperatively through the `CancellationToken` held by its [`TaskHandle`].
//!
//! ```ignore
//! let handle = TaskHandle::new(TaskId::new(TypeId::of::<DeviceTableState>(), 1), token);
//! // on shutdown
//! handle.cancel();
//! ```

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Unique identifier for a spawned task.
///
/// The generation distinguishes a restarted poller from the one it replaces, so a
/// late result from the old task can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self { type_id, generation }
    }

    /// Task identifier owned by state type `T`.
    pub fn of<T: 'static>(generation: u64) -> Self {
        Self::new(TypeId::of::<T>(), generation)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a spawned task with cooperative cancellation.
///
/// Clones share the token: cancelling any clone cancels the task.
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

    /// Token to hand to the async body so it can observe cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Requests cancellation. The task stops at its next cancellation check.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
