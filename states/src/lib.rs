//! Typed state container driving the roster UI.
//!
//! - [`State`]: plain values written by the UI or by commands.
//! - [`Compute`]: values derived from states/computes, re-run when their deps change.
//! - [`Command`]: manual-only async side effects that publish through an [`Updater`].
//!
//! Everything lives in a [`StateCtx`], owned by the UI thread.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod runtime;
mod snapshot;
mod state;
mod state_sync_status;
mod task;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::StateError;
pub use runtime::{StateRuntime, Update, Updater};
pub use snapshot::CommandSnapshot;
pub use state::{State, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};

/// Re-exported so command implementors share the same token type.
pub use tokio_util::sync::CancellationToken;
