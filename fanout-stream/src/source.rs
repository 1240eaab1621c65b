// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The seam between a single-consumer async producer and the shared view over it.

use fanout_core::StreamItem;
use futures::future::{self, BoxFuture, FutureExt};
use futures::Stream;

/// A producer that can be instantiated into a fresh single-consumer iterator.
///
/// Each call to [`iterate`](SourceIterable::iterate) starts a new, exclusive run of the
/// producer (opening a connection, starting a subscription, and so on). The shared view
/// calls it once per generation and hands the resulting iterator back to
/// [`terminate`](SourceIterable::terminate) when the last consumer leaves.
pub trait SourceIterable: Send + Sync + 'static {
    /// Values produced by the source.
    type Item: Clone + Send + Sync + 'static;

    /// The iterator produced by one instantiation.
    type Iter: Stream<Item = StreamItem<Self::Item>> + Send + Unpin + 'static;

    /// Instantiate the source.
    fn iterate(&self) -> Self::Iter;

    /// Release an iterator that is no longer needed.
    ///
    /// The default implementation drops it.
    fn terminate(&self, iter: Self::Iter) -> BoxFuture<'static, ()> {
        drop(iter);
        future::ready(()).boxed()
    }
}

/// A [`SourceIterable`] backed by a factory closure. Created by [`from_fn`].
#[derive(Clone)]
pub struct FnSource<F> {
    factory: F,
}

/// Wrap a closure returning a fresh stream per instantiation.
///
/// # Example
///
/// ```
/// use fanout_core::StreamItem;
/// use fanout_stream::{from_fn, SourceIterable};
/// use futures::stream;
///
/// let source = from_fn(|| stream::iter([StreamItem::Value(1), StreamItem::Value(2)]));
/// let _iter = source.iterate();
/// ```
pub fn from_fn<F, S, T>(factory: F) -> FnSource<F>
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
    T: Clone + Send + Sync + 'static,
{
    FnSource { factory }
}

impl<F, S, T> SourceIterable for FnSource<F>
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Stream<Item = StreamItem<T>> + Send + Unpin + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Item = T;
    type Iter = S;

    fn iterate(&self) -> S {
        (self.factory)()
    }
}
