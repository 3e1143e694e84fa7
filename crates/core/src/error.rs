//! Usecase error taxonomy.
//!
//! Every variant carries a fixed, caller-facing `message` (e.g.
//! `"failed to create farm"`) and the underlying `cause`. The transport layer
//! picks the HTTP status from the variant and surfaces both strings.

/// The underlying reason for a [`CoreError`].
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A unique field (farm or pond name) is already taken.
    #[error("{message}: {cause}")]
    Conflict {
        message: &'static str,
        #[source]
        cause: Cause,
    },

    /// A referenced parent entity does not exist.
    #[error("{message}: {cause}")]
    BadRequest {
        message: &'static str,
        #[source]
        cause: Cause,
    },

    /// The requested entity (or any entity, for list operations) does not exist.
    #[error("{message}: {cause}")]
    NotFound {
        message: &'static str,
        #[source]
        cause: Cause,
    },

    /// The store failed for a reason other than not-found.
    #[error("{message}: {cause}")]
    Internal {
        message: &'static str,
        #[source]
        cause: Cause,
    },
}

impl CoreError {
    pub fn conflict(message: &'static str, cause: impl Into<Cause>) -> Self {
        Self::Conflict {
            message,
            cause: cause.into(),
        }
    }

    pub fn bad_request(message: &'static str, cause: impl Into<Cause>) -> Self {
        Self::BadRequest {
            message,
            cause: cause.into(),
        }
    }

    pub fn not_found(message: &'static str, cause: impl Into<Cause>) -> Self {
        Self::NotFound {
            message,
            cause: cause.into(),
        }
    }

    pub fn internal(message: &'static str, cause: impl Into<Cause>) -> Self {
        Self::Internal {
            message,
            cause: cause.into(),
        }
    }

    /// The fixed message describing which operation failed.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Conflict { message, .. }
            | Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    /// The underlying cause.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        match self {
            Self::Conflict { cause, .. }
            | Self::BadRequest { cause, .. }
            | Self::NotFound { cause, .. }
            | Self::Internal { cause, .. } => cause.as_ref(),
        }
    }
}
