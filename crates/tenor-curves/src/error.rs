//! Error types for curve and provider operations.
//!
//! Every error here is unrecoverable at its point of origin: a provider
//! either answers a query or the call fails. There is no fallback curve and
//! no retry path; callers must handle the error before any dependent
//! pricing computation can proceed.

use thiserror::Error;

/// A specialized Result type for curve and provider operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve and provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No curve is registered for the requested currency, index or name.
    #[error("Curve not found: {key}")]
    CurveNotFound {
        /// The currency, index or curve name that has no registered curve.
        key: String,
    },

    /// No issuer entry matches the queried legal entity.
    #[error("Issuer curve not found: {issuer}")]
    IssuerNotFound {
        /// The legal entity that matched no stored (key, filter) entry.
        issuer: String,
    },

    /// Insert on a key that is already registered.
    #[error("Curve already set for key: {key}")]
    DuplicateKey {
        /// The key that is already present.
        key: String,
    },

    /// Replace or remove on a key that was never registered.
    #[error("Curve not in set for key: {key}")]
    MissingKey {
        /// The key that is absent.
        key: String,
    },

    /// Two different keys map to identically-named curves.
    #[error("Duplicate curve name across maps: {name}")]
    DuplicateName {
        /// The colliding curve name.
        name: String,
    },

    /// Construction or query input outside the valid domain.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the domain violation.
        reason: String,
    },

    /// Deliberate capability restriction (decorator copy/sensitivity).
    #[error("Unsupported operation: {operation}")]
    Unsupported {
        /// The operation the receiver refuses by design.
        operation: String,
    },
}

impl CurveError {
    /// Creates a curve not found error.
    #[must_use]
    pub fn curve_not_found(key: impl Into<String>) -> Self {
        Self::CurveNotFound { key: key.into() }
    }

    /// Creates an issuer not found error.
    #[must_use]
    pub fn issuer_not_found(issuer: impl Into<String>) -> Self {
        Self::IssuerNotFound {
            issuer: issuer.into(),
        }
    }

    /// Creates a duplicate key error.
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Creates a missing key error.
    #[must_use]
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Creates a duplicate name error.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }
}
