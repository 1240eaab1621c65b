// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic detached spawning.
//!
//! Deferred work (a subject's coalesced publication, a shared source's teardown) is
//! handed to the runtime selected by feature flag:
//!
//! - **Tokio**: the current runtime handle (default, `runtime-tokio`)
//! - **smol**: `smol::spawn` (`runtime-smol`)
//! - **async-std**: `async_std::task::spawn` (`runtime-async-std`)
//!
//! Spawning is what moves the work to a later scheduler turn: the caller keeps running
//! until it yields, and only then does the spawned future get polled.

use core::future::Future;

/// Spawn `future` on the configured runtime without keeping a handle to it.
///
/// Returns `false` when no runtime is available (no runtime feature enabled, or the
/// Tokio feature is enabled but the caller is outside a Tokio runtime); the future is
/// dropped in that case and the caller is expected to fall back.
///
/// # Example
///
/// ```rust
/// use fanout_core::task::spawn_detached;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, rx) = futures::channel::oneshot::channel();
/// assert!(spawn_detached(async move {
///     let _ = tx.send(42);
/// }));
/// assert_eq!(rx.await.unwrap(), 42);
/// # }
/// ```
#[must_use = "a `false` result means the future was dropped without running"]
pub fn spawn_detached<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    spawn_on_runtime(future)
}

#[cfg(all(feature = "runtime-tokio", not(target_arch = "wasm32")))]
fn spawn_on_runtime<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::runtime::Handle::try_current()
        .map(|handle| drop(handle.spawn(future)))
        .is_ok()
}

#[cfg(all(
    feature = "runtime-smol",
    not(all(feature = "runtime-tokio", not(target_arch = "wasm32")))
))]
fn spawn_on_runtime<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    smol::spawn(future).detach();
    true
}

#[cfg(all(
    feature = "runtime-async-std",
    not(feature = "runtime-smol"),
    not(all(feature = "runtime-tokio", not(target_arch = "wasm32")))
))]
fn spawn_on_runtime<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    drop(async_std::task::spawn(future));
    true
}

#[cfg(not(any(
    all(feature = "runtime-tokio", not(target_arch = "wasm32")),
    feature = "runtime-smol",
    feature = "runtime-async-std"
)))]
fn spawn_on_runtime<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    drop(future);
    false
}
