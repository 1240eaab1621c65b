// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The consumer protocol shared by every multi-consumer primitive in Fanout.
//!
//! A consumer pulls with [`next()`](Consumer::next) and leaves with
//! [`detach()`](Consumer::detach). `next()` borrows the handle only long enough to
//! capture what it needs, so a consumer can detach while one of its own `next()`
//! futures is still pending; that future then resolves to `None` promptly.

use crate::StreamItem;
use futures::future::BoxFuture;
use futures::stream::{self, BoxStream, StreamExt};

/// Future returned by [`Consumer::next`].
///
/// - `Some(StreamItem::Value(v))`: the next value
/// - `Some(StreamItem::Error(e))`: the producer failed
/// - `None`: the consumer is done (detached, or the producer completed)
pub type NextFuture<T> = BoxFuture<'static, Option<StreamItem<T>>>;

/// A detachable handle onto a multi-consumer producer.
pub trait Consumer: Send + Sync {
    /// The type of values delivered to this consumer.
    type Item: Send + 'static;

    /// Request the next item.
    fn next(&self) -> NextFuture<Self::Item>;

    /// Stop consuming. Idempotent; never waits for shared cleanup.
    fn detach(&self);

    /// Returns `true` once [`detach()`](Consumer::detach) has been called.
    fn is_detached(&self) -> bool;

    /// Adapt this consumer into a [`Stream`](futures::Stream) that ends on the first `None`.
    ///
    /// The consumer is detached when the stream is dropped.
    fn into_stream(self) -> BoxStream<'static, StreamItem<Self::Item>>
    where
        Self: Sized + 'static,
    {
        stream::unfold(self, |consumer| async move {
            let item = consumer.next().await?;
            Some((item, consumer))
        })
        .boxed()
    }
}
