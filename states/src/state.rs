use std::any::{Any, type_name};

use log::error;

/// A plain value stored in [`StateCtx`](crate::StateCtx), keyed by its type.
///
/// States are mutated on the UI thread through `StateCtx::update` / `state_mut`,
/// or replaced wholesale by a command through [`Updater::set`](crate::Updater::set).
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned copy handed to commands.
    ///
    /// States returning `None` are invisible to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Replace `self` with a value received from an [`Updater`](crate::Updater).
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for states.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("Update for state {} carried a value of another type", type_name::<T>()),
    }
}
