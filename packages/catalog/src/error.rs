//! Failure type shared by every catalog gateway operation.
//!
//! The variants exist for diagnostics. At the user level every one of them is
//! the same "remote operation failed" condition, see [`CatalogError::user_message`].

use std::fmt;

use thiserror::Error;

/// Message shown wherever a remote operation fails outside the login form.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong talking to the dog service. Please try again.";

/// The remote operation a failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Logout,
    ListBreeds,
    SearchDogs,
    FetchDogs,
    GenerateMatch,
    FetchLocations,
    SearchLocations,
}

impl Operation {
    /// HTTP method and path on the remote service.
    pub fn endpoint(self) -> (&'static str, &'static str) {
        match self {
            Operation::Login => ("POST", "/auth/login"),
            Operation::Logout => ("POST", "/auth/logout"),
            Operation::ListBreeds => ("GET", "/dogs/breeds"),
            Operation::SearchDogs => ("GET", "/dogs/search"),
            Operation::FetchDogs => ("POST", "/dogs"),
            Operation::GenerateMatch => ("POST", "/dogs/match"),
            Operation::FetchLocations => ("POST", "/locations"),
            Operation::SearchLocations => ("POST", "/locations/search"),
        }
    }

    pub fn path(self) -> &'static str {
        self.endpoint().1
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (method, path) = self.endpoint();
        write!(f, "{method} {path}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{operation} returned status {status}")]
    Status { operation: Operation, status: u16 },

    #[error("{operation} failed: {message}")]
    Transport { operation: Operation, message: String },

    #[error("{operation} returned an unreadable body: {message}")]
    Decode { operation: Operation, message: String },

    #[error("{operation} not sent: {reason}")]
    InvalidRequest {
        operation: Operation,
        reason: &'static str,
    },

    #[error("{operation} did not return dog {id}")]
    MissingRecord { operation: Operation, id: String },
}

impl CatalogError {
    pub fn status(operation: Operation, status: u16) -> Self {
        Self::Status { operation, status }
    }

    pub fn transport(operation: Operation, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn decode(operation: Operation, message: impl Into<String>) -> Self {
        Self::Decode {
            operation,
            message: message.into(),
        }
    }

    pub fn invalid_request(operation: Operation, reason: &'static str) -> Self {
        Self::InvalidRequest { operation, reason }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Status { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Decode { operation, .. }
            | Self::InvalidRequest { operation, .. }
            | Self::MissingRecord { operation, .. } => *operation,
        }
    }

    /// The one user-visible rendering of any failure.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}
