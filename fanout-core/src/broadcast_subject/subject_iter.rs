// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::SubjectState;
use crate::logging::trace;
use crate::{race, Consumer, DetachSignal, NextFuture, StreamItem};
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use futures::future::{self, FutureExt};
use parking_lot::Mutex;

/// A consumer attached to a [`BroadcastSubject`](super::BroadcastSubject).
///
/// Dropping the consumer detaches it.
pub struct SubjectIter<T: Clone + Send + Sync + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
    signal: DetachSignal,
    yield_current: AtomicBool,
}

impl<T: Clone + Send + Sync + 'static> SubjectIter<T> {
    pub(super) fn new(state: Arc<Mutex<SubjectState<T>>>, yield_current: bool) -> Self {
        Self {
            state,
            signal: DetachSignal::new(),
            yield_current: AtomicBool::new(yield_current),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Consumer for SubjectIter<T> {
    type Item = T;

    fn next(&self) -> NextFuture<T> {
        if self.signal.is_triggered() {
            return future::ready(None).boxed();
        }

        let state = self.state.lock();
        if self.yield_current.swap(false, Ordering::AcqRel) && !state.closed {
            return future::ready(Some(StreamItem::Value(state.current.clone()))).boxed();
        }
        let promise = state.next_slot.promise();
        drop(state);

        let detached = self.signal.triggered().map(|()| None).boxed();
        let update = promise
            .map(|settled| match settled {
                Ok(Some(value)) => Some(StreamItem::Value(value)),
                Ok(None) => None,
                Err(error) => Some(StreamItem::Error(error)),
            })
            .boxed();

        race([detached, update]).boxed()
    }

    fn detach(&self) {
        if !self.signal.trigger() {
            return;
        }

        let mut state = self.state.lock();
        state.subscribers -= 1;
        trace!(subscribers = state.subscribers, "consumer detached");
    }

    fn is_detached(&self) -> bool {
        self.signal.is_triggered()
    }
}

impl<T: Clone + Send + Sync + 'static> Drop for SubjectIter<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<T: Clone + Send + Sync + 'static> fmt::Debug for SubjectIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectIter")
            .field("detached", &self.signal.is_triggered())
            .finish_non_exhaustive()
    }
}
