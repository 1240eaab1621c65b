// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::{Receiver, Sender};
use fanout_core::StreamItem;
use fanout_error::FanoutError;
use fanout_stream::SourceIterable;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An instrumented [`SourceIterable`] for multiplexer tests.
///
/// Items are fed through [`push`](Self::push) and read by whichever generation is
/// currently instantiated. The source counts instantiations, pulls and terminations.
/// A gated source holds every teardown until [`release_teardown`](Self::release_teardown)
/// is called, which lets tests observe the window between a detach and the end of
/// the teardown.
///
/// Clones share the same items and counters, so a test keeps one clone as a probe and
/// hands the other to the shared view.
#[derive(Clone)]
pub struct CountingSource<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    sender: Sender<StreamItem<T>>,
    receiver: Receiver<StreamItem<T>>,
    gate: Option<(Sender<()>, Receiver<()>)>,
    instantiations: AtomicUsize,
    pulls: AtomicUsize,
    terminations_started: AtomicUsize,
    terminations_finished: AtomicUsize,
}

impl<T: Clone + Send + Sync + 'static> CountingSource<T> {
    /// Creates a source whose teardowns complete immediately.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates a source whose teardowns wait for [`release_teardown`](Self::release_teardown).
    pub fn gated() -> Self {
        Self::build(Some(async_channel::unbounded()))
    }

    fn build(gate: Option<(Sender<()>, Receiver<()>)>) -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self {
            inner: Arc::new(Inner {
                sender,
                receiver,
                gate,
                instantiations: AtomicUsize::new(0),
                pulls: AtomicUsize::new(0),
                terminations_started: AtomicUsize::new(0),
                terminations_finished: AtomicUsize::new(0),
            }),
        }
    }

    /// Queues a value for the next pull.
    pub fn push(&self, value: T) {
        self.send(StreamItem::Value(value));
    }

    /// Queues an error for the next pull.
    pub fn push_error(&self, error: FanoutError) {
        self.send(StreamItem::Error(error));
    }

    /// Ends the item sequence; pulls after the queued items yield `None`.
    pub fn finish(&self) {
        self.inner.sender.close();
    }

    /// Lets one pending (or future) teardown of a gated source complete.
    pub fn release_teardown(&self) {
        if let Some((gate, _)) = &self.inner.gate {
            gate.try_send(()).expect("teardown gate closed");
        }
    }

    pub fn instantiations(&self) -> usize {
        self.inner.instantiations.load(Ordering::SeqCst)
    }

    pub fn pulls(&self) -> usize {
        self.inner.pulls.load(Ordering::SeqCst)
    }

    pub fn terminations_started(&self) -> usize {
        self.inner.terminations_started.load(Ordering::SeqCst)
    }

    pub fn terminations_finished(&self) -> usize {
        self.inner.terminations_finished.load(Ordering::SeqCst)
    }

    fn send(&self, item: StreamItem<T>) {
        self.inner
            .sender
            .try_send(item)
            .unwrap_or_else(|_| panic!("counting source already finished"));
    }
}

impl<T: Clone + Send + Sync + 'static> Default for CountingSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> SourceIterable for CountingSource<T> {
    type Item = T;
    type Iter = BoxStream<'static, StreamItem<T>>;

    fn iterate(&self) -> Self::Iter {
        self.inner.instantiations.fetch_add(1, Ordering::SeqCst);

        let inner = Arc::clone(&self.inner);
        stream::unfold(inner, |inner| async move {
            inner.pulls.fetch_add(1, Ordering::SeqCst);
            let item = inner.receiver.recv().await.ok()?;
            Some((item, inner))
        })
        .boxed()
    }

    fn terminate(&self, iter: Self::Iter) -> BoxFuture<'static, ()> {
        let inner = Arc::clone(&self.inner);
        async move {
            inner.terminations_started.fetch_add(1, Ordering::SeqCst);
            if let Some((_, gate)) = &inner.gate {
                let _ = gate.recv().await;
            }
            drop(iter);
            inner.terminations_finished.fetch_add(1, Ordering::SeqCst);
        }
        .boxed()
    }
}
