use thiserror::Error as ThisError;

use crate::SECRET_MINIMUM_LENGTH;

/// The ways a hash configuration can be rejected.
///
/// Errors are reported before any input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// The secret was shorter than [`SECRET_MINIMUM_LENGTH`][].
    #[error("the secret must be at least {min} bytes, but was {len} bytes", min = SECRET_MINIMUM_LENGTH)]
    InvalidSecret {
        /// The length of the rejected secret.
        len: usize,
    },
}
