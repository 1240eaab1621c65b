// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::multiplexer::{Multiplexer, Step};
use crate::SourceIterable;
use alloc::sync::Arc;
use core::fmt;
use fanout_core::{race, Consumer, DetachSignal, NextFuture, StreamItem};
use futures::future::{self, BoxFuture, FutureExt};

/// A consumer attached to a [`SharedIterable`](super::SharedIterable).
///
/// Dropping the consumer detaches it.
pub struct SharedIter<S: SourceIterable> {
    mux: Arc<Multiplexer<S>>,
    signal: DetachSignal,
}

impl<S: SourceIterable> SharedIter<S> {
    pub(super) fn new(mux: Arc<Multiplexer<S>>) -> Self {
        Self {
            mux,
            signal: DetachSignal::new(),
        }
    }
}

impl<S: SourceIterable> Consumer for SharedIter<S> {
    type Item = S::Item;

    fn next(&self) -> NextFuture<S::Item> {
        if self.signal.is_triggered() {
            return future::ready(None).boxed();
        }

        match self.mux.step() {
            Step::Pull(pull) => race_pull(&self.signal, pull.boxed()),
            Step::Done => future::ready(None).boxed(),
            Step::AwaitTeardown(teardown) => {
                let mux = Arc::clone(&self.mux);
                let signal = self.signal.clone();
                let mut teardown = teardown;

                async move {
                    loop {
                        let finished = race([
                            signal.triggered().map(|()| false).boxed(),
                            teardown.map(|()| true).boxed(),
                        ])
                        .await;
                        if !finished || signal.is_triggered() {
                            return None;
                        }

                        match mux.step() {
                            Step::Pull(pull) => return race_pull(&signal, pull.boxed()).await,
                            Step::AwaitTeardown(next) => teardown = next,
                            Step::Done => return None,
                        }
                    }
                }
                .boxed()
            }
        }
    }

    fn detach(&self) {
        if self.signal.trigger() {
            self.mux.release();
        }
    }

    fn is_detached(&self) -> bool {
        self.signal.is_triggered()
    }
}

/// Races `pull` against the consumer's own detach signal, which wins ties.
fn race_pull<T: Send + 'static>(
    signal: &DetachSignal,
    pull: BoxFuture<'static, Option<StreamItem<T>>>,
) -> NextFuture<T> {
    race([signal.triggered().map(|()| None).boxed(), pull]).boxed()
}

impl<S: SourceIterable> Drop for SharedIter<S> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<S: SourceIterable> fmt::Debug for SharedIter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedIter")
            .field("detached", &self.signal.is_triggered())
            .finish_non_exhaustive()
    }
}
