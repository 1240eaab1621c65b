// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multi-consumer view over a single-consumer source.
//!
//! A [`SharedIterable`] lets any number of [`SharedIter`] consumers read from one
//! [`SourceIterable`] concurrently.
//!
//! ## Characteristics
//!
//! - **Lazy**: the source is instantiated when the first consumer attaches, not before.
//! - **One pull at a time**: consumers asking for an item while a pull is in flight
//!   share that pull and all receive its result.
//! - **Reference-counted**: when the last consumer detaches the source iterator is torn
//!   down exactly once, in the background. Detaching never waits for it.
//! - **Generations**: attaching after a teardown starts a fresh instantiation, but only
//!   after the previous teardown has finished.
//! - **Cancellable**: a consumer that detaches while its `next()` is pending gets `None`
//!   promptly; the pull keeps serving everyone else.
//!
//! ## Example
//!
//! ```
//! use fanout_core::{Consumer, StreamItem};
//! use fanout_stream::{from_fn, ShareRefCountedExt};
//! use futures::stream;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let shared = from_fn(|| stream::iter((1..=3).map(StreamItem::Value))).share_ref_counted();
//!
//! let first = shared.subscribe();
//! let second = shared.subscribe();
//! assert_eq!(shared.generations(), 1);
//!
//! // Both consumers read from the same instantiation
//! assert_eq!(first.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(second.next().await, Some(StreamItem::Value(2)));
//! # }
//! ```

mod consumer;
mod multiplexer;

pub use consumer::SharedIter;

use crate::SourceIterable;
use alloc::sync::Arc;
use core::fmt;
use multiplexer::Multiplexer;

/// Reference-counted, multi-consumer view over a [`SourceIterable`].
///
/// Cheap to clone; all clones share the same consumers and source generation.
/// See the [module documentation](crate::shared_iter) for details.
pub struct SharedIterable<S: SourceIterable> {
    mux: Arc<Multiplexer<S>>,
}

impl<S: SourceIterable> SharedIterable<S> {
    /// Wraps `source`. Nothing is instantiated until the first [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            mux: Arc::new(Multiplexer::new(source)),
        }
    }

    /// Attaches a new consumer.
    #[must_use]
    pub fn subscribe(&self) -> SharedIter<S> {
        self.mux.attach();
        SharedIter::new(Arc::clone(&self.mux))
    }

    /// Number of attached consumers.
    #[must_use]
    pub fn active_consumers(&self) -> usize {
        self.mux.active_consumers()
    }

    /// Number of times the source has been instantiated.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.mux.generations()
    }

    /// Returns `true` while a generation's teardown has not yet finished.
    #[must_use]
    pub fn is_tearing_down(&self) -> bool {
        self.mux.is_tearing_down()
    }
}

impl<S: SourceIterable> Clone for SharedIterable<S> {
    fn clone(&self) -> Self {
        Self {
            mux: Arc::clone(&self.mux),
        }
    }
}

impl<S: SourceIterable> fmt::Debug for SharedIterable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedIterable")
            .field("active_consumers", &self.active_consumers())
            .field("generations", &self.generations())
            .field("tearing_down", &self.is_tearing_down())
            .finish()
    }
}

/// Extension trait turning any [`SourceIterable`] into a [`SharedIterable`].
pub trait ShareRefCountedExt: SourceIterable + Sized {
    /// Shares this source between consumers; see [`SharedIterable`].
    fn share_ref_counted(self) -> SharedIterable<Self> {
        SharedIterable::new(self)
    }
}

impl<S: SourceIterable> ShareRefCountedExt for S {}
