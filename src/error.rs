use crate::validation::FormErrors;
use thiserror::Error;

/// Why a session operation was refused.
///
/// Display strings double as the inline message shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A user with this email already exists.")]
    DuplicateEmail,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("You need to sign in first.")]
    NotAuthenticated,

    #[error("Incorrect current password.")]
    WrongPassword,

    #[error("No venue is selected.")]
    NoVenueSelected,

    #[error("Venue {0} does not exist.")]
    UnknownVenue(u32),

    #[error("{0}")]
    Invalid(#[from] FormErrors),
}

pub type SessionResult<T> = Result<T, SessionError>;
