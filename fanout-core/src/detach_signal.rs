// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-consumer terminal signal.
//!
//! Every consumer handle owns a [`DetachSignal`]. Detaching triggers it, which
//! completes any `next()` racing against it without touching the shared producer.

use alloc::sync::Arc;
use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};

/// Latched, cloneable signal. All clones share the same latch.
///
/// # Example
///
/// ```
/// use fanout_core::DetachSignal;
///
/// let signal = DetachSignal::new();
/// assert!(signal.trigger());
/// assert!(!signal.trigger()); // latched
/// assert!(signal.is_triggered());
/// ```
#[derive(Clone, Debug)]
pub struct DetachSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    triggered: AtomicBool,
    event: Event,
}

impl DetachSignal {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                triggered: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Trigger the signal, waking all listeners.
    ///
    /// Returns `true` only for the call that flipped the latch.
    pub fn trigger(&self) -> bool {
        let first = !self.inner.triggered.swap(true, Ordering::AcqRel);
        if first {
            self.inner.event.notify(usize::MAX);
        }
        first
    }

    /// Check whether the signal has been triggered (non-blocking).
    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::Acquire)
    }

    /// Wait until the signal is triggered.
    ///
    /// The returned future owns a handle to the signal, so it can outlive `self`.
    pub fn triggered(&self) -> Triggered {
        Triggered {
            signal: self.clone(),
            listener: None,
        }
    }
}

impl Default for DetachSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`DetachSignal::triggered()`].
#[must_use = "futures do nothing unless polled"]
#[derive(Debug)]
pub struct Triggered {
    signal: DetachSignal,
    listener: Option<EventListener>,
}

impl Future for Triggered {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.signal.is_triggered() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                // Register, then re-check the latch before parking: a trigger between
                // the check above and `listen()` would otherwise be missed.
                None => self.listener = Some(self.signal.inner.event.listen()),
                Some(listener) => match Pin::new(listener).poll(cx) {
                    Poll::Ready(()) => self.listener = None,
                    Poll::Pending => return Poll::Pending,
                },
            }
        }
    }
}
