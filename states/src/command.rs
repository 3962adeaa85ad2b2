use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

/// Future returned by [`Command::run`].
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A manual-only side effect.
///
/// Commands run only when dispatched, never implicitly. They are the only place
/// allowed to do network IO. A command sees an owned snapshot of the context
/// taken at flush time and reports back exclusively through the `Updater`.
pub trait Command: Any + Send {
    fn run(&self, snap: CommandSnapshot, updater: Updater, cancel: CancellationToken)
    -> CommandFuture;

    /// When `true`, dispatching again cancels the previous in-flight run.
    fn latest_only(&self) -> bool {
        false
    }
}
