use std::any::type_name;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("State not found: {type_name}")]
    StateNotFound { type_name: &'static str },
    #[error("Compute not found: {type_name}")]
    ComputeNotFound { type_name: &'static str },
    #[error("Command not found: {type_name}")]
    CommandNotFound { type_name: &'static str },
}

impl StateError {
    pub fn state_not_found<T: ?Sized>() -> Self {
        Self::StateNotFound {
            type_name: type_name::<T>(),
        }
    }

    pub fn compute_not_found<T: ?Sized>() -> Self {
        Self::ComputeNotFound {
            type_name: type_name::<T>(),
        }
    }

    pub fn command_not_found<T: ?Sized>() -> Self {
        Self::CommandNotFound {
            type_name: type_name::<T>(),
        }
    }
}
