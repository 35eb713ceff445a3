//! Auth error types.

use thiserror::Error;

/// Errors from the demo login flow.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email or password missing.
    #[error("Please provide email and password")]
    MissingCredentials,

    /// No preset user matches the supplied credentials.
    #[error("Credentials not recognised")]
    InvalidCredentials,

    /// Session snapshot could not be written or removed.
    #[error("Session storage error: {0}")]
    Storage(#[from] classcart_cache::StoreError),
}
