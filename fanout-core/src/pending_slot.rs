// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-shot completion slot.
//!
//! A [`PendingSlot`] pairs a cloneable promise with the means to settle it exactly
//! once. Owners that need to represent "the next event" keep a slot in a field and
//! swap in a fresh one after settling; a settled slot is never reused.
//!
//! ## Example
//!
//! ```
//! use fanout_core::PendingSlot;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let slot = PendingSlot::new();
//! let promise = slot.promise();
//!
//! assert!(slot.resolve(7));
//! assert!(!slot.resolve(8)); // already settled
//!
//! assert_eq!(promise.await.unwrap(), 7);
//! # }
//! ```

use core::fmt;
use fanout_error::FanoutError;
use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

/// Cloneable future observing the settlement of a [`PendingSlot`].
pub type SlotPromise<T> = Shared<BoxFuture<'static, Result<T, FanoutError>>>;

/// A promise paired with resolve/reject operations that take effect once.
pub struct PendingSlot<T> {
    sender: Mutex<Option<oneshot::Sender<Result<T, FanoutError>>>>,
    promise: SlotPromise<T>,
}

impl<T: Clone + Send + Sync + 'static> PendingSlot<T> {
    /// Creates an unsettled slot.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        let promise = rx
            .map(|settled| settled.unwrap_or(Err(FanoutError::SlotAbandoned)))
            .boxed()
            .shared();

        Self {
            sender: Mutex::new(Some(tx)),
            promise,
        }
    }

    /// Creates a slot that is already resolved with `value`.
    #[must_use]
    pub fn resolved(value: T) -> Self {
        let slot = Self::new();
        slot.resolve(value);
        slot
    }

    /// Resolves the slot. Returns `false` if it was already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the slot. Returns `false` if it was already settled.
    pub fn reject(&self, error: FanoutError) -> bool {
        self.settle(Err(error))
    }

    /// Returns a future that completes with the slot's settlement.
    ///
    /// Every promise taken from the same slot observes the same outcome.
    #[must_use]
    pub fn promise(&self) -> SlotPromise<T> {
        self.promise.clone()
    }

    /// Returns `true` once `resolve` or `reject` has been called.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.sender.lock().is_none()
    }

    fn settle(&self, outcome: Result<T, FanoutError>) -> bool {
        match self.sender.lock().take() {
            Some(tx) => {
                // The receiver lives inside `self.promise`, so the send cannot fail.
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for PendingSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PendingSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSlot")
            .field("settled", &self.sender.lock().is_none())
            .finish_non_exhaustive()
    }
}
