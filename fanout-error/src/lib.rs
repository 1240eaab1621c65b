// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Fanout primitives
//!
//! Fanout never classifies or rewrites a producer's failure: whatever a subject's
//! producer passes to `error()`, or whatever a shared source yields as an error item,
//! reaches consumers as the same [`FanoutError`] value. The type is therefore [`Clone`]
//! without loss, so one failure can be handed to every consumer awaiting it.
//!
//! # Examples
//!
//! ```
//! use fanout_error::{FanoutError, Result};
//!
//! fn fetch() -> Result<u32> {
//!     Err(FanoutError::producer_error("backend unavailable"))
//! }
//!
//! assert!(fetch().is_err());
//! ```

use std::sync::Arc;

/// Root error type for all Fanout operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum FanoutError {
    /// A producer signalled a failure
    ///
    /// Used by subject producers and sources that describe their failure as text.
    #[error("Producer error: {context}")]
    ProducerError {
        /// Description of what went wrong on the producing side
        context: String,
    },

    /// Error raised by user code
    ///
    /// The wrapped error is shared rather than boxed so that cloning the failure for
    /// several consumers keeps the original error and its source chain intact.
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A pending slot was dropped before it was resolved or rejected
    #[error("Pending slot abandoned before settlement")]
    SlotAbandoned,
}

impl FanoutError {
    /// Create a producer error with the given context
    pub fn producer_error(context: impl Into<String>) -> Self {
        Self::ProducerError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Returns `true` if the error came from a producer or from user code,
    /// as opposed to the primitives' own bookkeeping.
    #[must_use]
    pub const fn is_producer_failure(&self) -> bool {
        matches!(self, Self::ProducerError { .. } | Self::UserError(_))
    }
}

/// Specialized Result type for Fanout operations
///
/// # Examples
///
/// ```
/// use fanout_error::Result;
///
/// fn produce() -> Result<String> {
///     Ok("value".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FanoutError>;

/// Extension trait for converting errors into `FanoutError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoFanoutError {
    /// Convert this error into a `FanoutError`
    fn into_fanout(self) -> FanoutError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoFanoutError for E {
    fn into_fanout(self) -> FanoutError {
        FanoutError::user_error(self)
    }
}
