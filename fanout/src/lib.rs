// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Fanout
//!
//! Two primitives that turn a single asynchronous producer into something many
//! independent consumers can read concurrently, each at its own pace.
//!
//! ## Overview
//!
//! - [`BroadcastSubject`]: a latest-value holder. Producers `put` values; consumers
//!   receive *coalesced* updates, so a burst of puts within one scheduler turn is seen
//!   as a single update carrying the last value.
//! - [`SharedIterable`]: a reference-counted view over a single-consumer source. The
//!   source is instantiated once for all consumers, never pulled twice concurrently, and
//!   torn down once the last consumer leaves.
//!
//! Both hand out consumers implementing [`Consumer`]: `next()` to pull, `detach()` to
//! leave (dropping a consumer detaches it too), and `into_stream()` to use the consumer
//! as a `futures::Stream`.
//!
//! ## Quick Start
//!
//! ```rust
//! use fanout_rx::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let subject = BroadcastSubject::new(String::from("idle"));
//! let updates = subject.subscribe();
//! let next = updates.next();
//!
//! subject.put("loading".to_string());
//! subject.put("ready".to_string());
//!
//! assert_eq!(next.await, Some(StreamItem::Value("ready".to_string())));
//! assert_eq!(subject.current(), "ready");
//! # }
//! ```
//!
//! ## Sharing a source
//!
//! ```rust
//! use fanout_rx::prelude::*;
//! use futures::stream;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let shared = from_fn(|| stream::iter([StreamItem::Value("a"), StreamItem::Value("b")]))
//!     .share_ref_counted();
//!
//! let left = shared.subscribe();
//! let right = shared.subscribe();
//!
//! // Concurrent requests share a single pull
//! let (l, r) = futures::join!(left.next(), right.next());
//! assert_eq!(l, Some(StreamItem::Value("a")));
//! assert_eq!(r, Some(StreamItem::Value("a")));
//! # }
//! ```

pub use fanout_core::{
    race, BroadcastSubject, Consumer, DetachSignal, NextFuture, PendingSlot, Race, SlotPromise,
    StreamItem, SubjectIter,
};
pub use fanout_error::{FanoutError, IntoFanoutError, Result};
pub use fanout_stream::{
    from_fn, FnSource, ShareRefCountedExt, SharedIter, SharedIterable, SourceIterable,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        from_fn, BroadcastSubject, Consumer, FanoutError, ShareRefCountedExt, SharedIterable,
        SourceIterable, StreamItem,
    };
}
