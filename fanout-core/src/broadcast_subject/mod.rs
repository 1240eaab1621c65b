// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value subject with coalesced, multi-consumer updates.
//!
//! A [`BroadcastSubject`] holds a current value that can be read synchronously at any
//! time and hands out [`SubjectIter`] consumers that observe *future* updates.
//!
//! ## Characteristics
//!
//! - **Coalescing**: several `put`s within one scheduler turn produce one update that
//!   carries the last value. Consumers never see the intermediate values.
//! - **Hot**: a new consumer sees updates published after it subscribed. Use
//!   [`subscribe_with_current`](BroadcastSubject::subscribe_with_current) to start
//!   from the current value instead.
//! - **Independent consumers**: detaching one consumer never affects the subject or
//!   other consumers.
//! - **Terminal close/error**: once closed, every `next()` resolves to `None`. An error
//!   is delivered once to the consumers awaiting it.
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//!
//! ## Example
//!
//! ```
//! use fanout_core::{BroadcastSubject, Consumer, StreamItem};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let subject = BroadcastSubject::new(0);
//! let consumer = subject.subscribe();
//! let next = consumer.next();
//!
//! subject.put(1);
//! subject.put(2);
//! subject.put(3);
//! assert_eq!(subject.current(), 3);
//!
//! // The three puts surface as a single update
//! assert_eq!(next.await, Some(StreamItem::Value(3)));
//!
//! subject.close();
//! assert_eq!(consumer.next().await, None);
//! # }
//! ```

mod subject_iter;

pub use subject_iter::SubjectIter;

use crate::logging::{debug, trace, warn};
use crate::task;
use crate::PendingSlot;
use alloc::sync::Arc;
use core::fmt;
use core::mem;
use fanout_error::FanoutError;
use parking_lot::Mutex;

pub(crate) struct SubjectState<T> {
    pub(crate) current: T,
    pub(crate) closed: bool,
    /// Settles with `Some(value)` on the next publication, `None` on close.
    pub(crate) next_slot: PendingSlot<Option<T>>,
    pub(crate) publish_scheduled: bool,
    pub(crate) subscribers: usize,
}

/// A latest-value holder that broadcasts coalesced updates to every attached consumer.
///
/// See the [module documentation](crate::broadcast_subject) for details.
pub struct BroadcastSubject<T: Clone + Send + Sync + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> BroadcastSubject<T> {
    /// Creates an open subject holding `initial` as its current value.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                current: initial,
                closed: false,
                next_slot: PendingSlot::new(),
                publish_scheduled: false,
                subscribers: 0,
            })),
        }
    }

    /// Stores `value` as the current value and schedules one publication.
    ///
    /// The current value changes immediately; consumers are notified one scheduler turn
    /// later with whatever value is current at that point. Does nothing once the
    /// subject is closed.
    pub fn put(&self, value: T) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }

        state.current = value;
        if state.publish_scheduled {
            return;
        }
        state.publish_scheduled = true;
        drop(state);

        self.schedule_publish();
    }

    /// Like [`put`](Self::put), computing the new value from the current one.
    ///
    /// `updater` runs while the subject's state is locked and must not call back into
    /// this subject.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&T) -> T,
    {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }

        state.current = updater(&state.current);
        if state.publish_scheduled {
            return;
        }
        state.publish_scheduled = true;
        drop(state);

        self.schedule_publish();
    }

    /// Closes the subject. Consumers awaiting an update, and every later `next()`,
    /// resolve to `None`.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }

        state.closed = true;
        state.next_slot.resolve(None);
        debug!(subscribers = state.subscribers, "subject closed");
    }

    /// Fails the pending update with `reason` and closes the subject.
    ///
    /// Consumers already awaiting the pending update receive the error once; any later
    /// `next()` resolves to `None`. Does nothing if the subject is already closed.
    pub fn error(&self, reason: FanoutError) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }

        state.closed = true;
        debug!(error = %reason, subscribers = state.subscribers, "subject errored");
        state.next_slot.reject(reason);
        state.next_slot = PendingSlot::resolved(None);
    }

    /// Returns the latest value, including one not yet published.
    #[must_use]
    pub fn current(&self) -> T {
        self.state.lock().current.clone()
    }

    /// Returns `true` once [`close`](Self::close) or [`error`](Self::error) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the number of attached consumers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers
    }

    /// Attaches a consumer that observes updates published from now on.
    ///
    /// Subscribing to a closed subject is allowed; the consumer's first `next()`
    /// resolves to `None`.
    #[must_use]
    pub fn subscribe(&self) -> SubjectIter<T> {
        self.attach(false)
    }

    /// Attaches a consumer whose first `next()` yields the current value, followed by
    /// future updates. On a closed subject it behaves like [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn subscribe_with_current(&self) -> SubjectIter<T> {
        self.attach(true)
    }

    fn attach(&self, with_current: bool) -> SubjectIter<T> {
        let mut state = self.state.lock();
        state.subscribers += 1;
        trace!(subscribers = state.subscribers, with_current, "consumer attached");
        drop(state);

        SubjectIter::new(Arc::clone(&self.state), with_current)
    }

    fn schedule_publish(&self) {
        let state = Arc::clone(&self.state);
        if !task::spawn_detached(async move { publish(&state) }) {
            warn!("no runtime available for deferred publication; publishing inline");
            publish(&self.state);
        }
    }
}

/// Resolves the pending slot with the latest value and installs a fresh one.
fn publish<T: Clone + Send + Sync + 'static>(state: &Mutex<SubjectState<T>>) {
    let mut state = state.lock();
    state.publish_scheduled = false;
    if state.closed {
        return;
    }

    let latest = state.current.clone();
    let published = mem::replace(&mut state.next_slot, PendingSlot::new());
    published.resolve(Some(latest));
    trace!(subscribers = state.subscribers, "update published");
}

impl<T: Clone + Send + Sync + Default + 'static> Default for BroadcastSubject<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for BroadcastSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + Sync + fmt::Debug + 'static> fmt::Debug for BroadcastSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BroadcastSubject")
            .field("current", &state.current)
            .field("closed", &state.closed)
            .field("subscribers", &state.subscribers)
            .finish_non_exhaustive()
    }
}
