//! Errors raised by entity operations and the entity factories

use thiserror::Error;

/// Entity errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    /// The entity matrix cannot be inverted
    #[error("Matrix is singular and cannot be inverted (determinant {determinant})")]
    SingularMatrix {
        /// Determinant of the rejected matrix
        determinant: f32,
    },

    /// An enumerated descriptor field holds a value outside its closed set
    #[error("Invalid value {value:?} for field '{field}'")]
    Configuration {
        /// Descriptor key that failed validation
        field: &'static str,
        /// Offending value as written in the descriptor
        value: String,
    },
}
