// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::{debug, trace, warn};
use crate::SourceIterable;
use alloc::sync::{Arc, Weak};
use fanout_core::{task, DetachSignal, StreamItem};
use futures::future::{self, BoxFuture, Either, FutureExt, Shared};
use futures::lock::Mutex as AsyncMutex;
use futures::stream::{Fuse, StreamExt};
use parking_lot::Mutex;

pub(crate) type PullFuture<T> = Shared<BoxFuture<'static, Option<StreamItem<T>>>>;
pub(crate) type Teardown = Shared<BoxFuture<'static, ()>>;

/// The instantiated source iterator of one generation.
///
/// `iter` is `None` once the teardown has taken it. `stop` is triggered when the last
/// consumer leaves, so a pull nobody polls any more still gives the iterator back.
struct Generation<I> {
    iter: Arc<AsyncMutex<Option<Fuse<I>>>>,
    stop: DetachSignal,
}

impl<I> Clone for Generation<I> {
    fn clone(&self) -> Self {
        Self {
            iter: Arc::clone(&self.iter),
            stop: self.stop.clone(),
        }
    }
}

/// What a consumer's `next()` has to do.
pub(crate) enum Step<T> {
    /// Await this pull (possibly shared with other consumers).
    Pull(PullFuture<T>),
    /// A previous generation is still being torn down; wait for it, then ask again.
    AwaitTeardown(Teardown),
    /// No consumers are attached.
    Done,
}

struct State<S: SourceIterable> {
    active: usize,
    generation: Option<Generation<S::Iter>>,
    in_flight: Option<(u64, PullFuture<S::Item>)>,
    teardown: Option<(u64, Teardown)>,
    next_id: u64,
    generations: usize,
}

/// Shared bookkeeping behind a `SharedIterable` and all of its consumers.
///
/// All fields change synchronously under `state`; futures are only built while the lock
/// is held, never polled.
pub(crate) struct Multiplexer<S: SourceIterable> {
    source: Arc<S>,
    state: Mutex<State<S>>,
}

impl<S: SourceIterable> Multiplexer<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            state: Mutex::new(State {
                active: 0,
                generation: None,
                in_flight: None,
                teardown: None,
                next_id: 0,
                generations: 0,
            }),
        }
    }

    /// Registers a consumer. The first consumer starts a generation unless the previous
    /// one is still being torn down, in which case the first `next()` starts it.
    pub(crate) fn attach(&self) {
        let mut state = self.state.lock();
        state.active += 1;
        trace!(active = state.active, "consumer attached");

        if state.active == 1 && state.teardown.is_none() {
            self.start_generation(&mut state);
        }
    }

    /// Unregisters a consumer. The last one out tears the current generation down.
    pub(crate) fn release(self: &Arc<Self>) {
        let mut state = self.state.lock();
        state.active -= 1;
        trace!(active = state.active, "consumer detached");

        if state.active > 0 {
            return;
        }

        let abandoned_pull = state.in_flight.take().map(|(_, pull)| pull);
        let teardown = state
            .generation
            .take()
            .map(|generation| self.build_teardown(&mut state, generation, abandoned_pull));
        drop(state);

        if let Some(teardown) = teardown {
            if !task::spawn_detached(teardown) {
                warn!("no runtime available for teardown; it will run when the next generation starts");
            }
        }
    }

    pub(crate) fn step(self: &Arc<Self>) -> Step<S::Item> {
        let mut state = self.state.lock();
        if state.active == 0 {
            return Step::Done;
        }

        if state.generation.is_none() {
            if let Some((_, teardown)) = &state.teardown {
                return Step::AwaitTeardown(teardown.clone());
            }
            self.start_generation(&mut state);
        }

        if let Some((_, pull)) = &state.in_flight {
            return Step::Pull(pull.clone());
        }

        match state.generation.clone() {
            Some(generation) => Step::Pull(self.issue_pull(&mut state, generation)),
            None => Step::Done,
        }
    }

    pub(crate) fn active_consumers(&self) -> usize {
        self.state.lock().active
    }

    pub(crate) fn generations(&self) -> usize {
        self.state.lock().generations
    }

    pub(crate) fn is_tearing_down(&self) -> bool {
        self.state.lock().teardown.is_some()
    }

    fn start_generation(&self, state: &mut State<S>) {
        if state.generation.is_some() {
            return;
        }

        let iter = self.source.iterate().fuse();
        state.generation = Some(Generation {
            iter: Arc::new(AsyncMutex::new(Some(iter))),
            stop: DetachSignal::new(),
        });
        state.generations += 1;
        debug!(generation = state.generations, "source instantiated");
    }

    fn issue_pull(
        self: &Arc<Self>,
        state: &mut State<S>,
        generation: Generation<S::Iter>,
    ) -> PullFuture<S::Item> {
        let id = next_id(state);
        let owner = Arc::downgrade(self);

        let pull = async move {
            let mut guard = generation.iter.lock().await;
            let item = match guard.as_mut() {
                // Stop is polled first, so a torn-down generation never pulls again.
                Some(iter) => match future::select(generation.stop.triggered(), iter.next()).await {
                    Either::Left(((), _)) => None,
                    Either::Right((item, _)) => item,
                },
                None => None,
            };
            drop(guard);
            settle_pull(&owner, id);
            item
        }
        .boxed()
        .shared();

        state.in_flight = Some((id, pull.clone()));
        trace!(pull = id, "pull issued");
        pull
    }

    fn build_teardown(
        self: &Arc<Self>,
        state: &mut State<S>,
        generation: Generation<S::Iter>,
        abandoned_pull: Option<PullFuture<S::Item>>,
    ) -> Teardown {
        let id = next_id(state);
        let owner = Arc::downgrade(self);
        let source = Arc::clone(&self.source);
        generation.stop.trigger();
        debug!(teardown = id, "teardown started");

        let teardown = async move {
            // A detached consumer may still hold the in-flight pull without polling it;
            // drive it here so it releases the iterator.
            if let Some(pull) = abandoned_pull {
                pull.await;
            }
            let iter = generation.iter.lock().await.take();
            if let Some(iter) = iter {
                source.terminate(iter.into_inner()).await;
            }
            settle_teardown(&owner, id);
        }
        .boxed()
        .shared();

        state.teardown = Some((id, teardown.clone()));
        teardown
    }
}

fn next_id<S: SourceIterable>(state: &mut State<S>) -> u64 {
    let id = state.next_id;
    state.next_id += 1;
    id
}

fn settle_pull<S: SourceIterable>(owner: &Weak<Multiplexer<S>>, id: u64) {
    let Some(mux) = owner.upgrade() else {
        return;
    };

    let mut state = mux.state.lock();
    if matches!(&state.in_flight, Some((current, _)) if *current == id) {
        let settled = state.in_flight.take();
        drop(state);
        drop(settled);
        trace!(pull = id, "pull settled");
    }
}

fn settle_teardown<S: SourceIterable>(owner: &Weak<Multiplexer<S>>, id: u64) {
    let Some(mux) = owner.upgrade() else {
        return;
    };

    let mut state = mux.state.lock();
    if matches!(&state.teardown, Some((current, _)) if *current == id) {
        let finished = state.teardown.take();
        drop(state);
        drop(finished);
        debug!(teardown = id, "teardown finished");
    }
}
