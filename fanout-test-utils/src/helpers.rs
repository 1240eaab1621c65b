// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::StreamItem;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Lets spawned publications, pulls and teardowns run.
pub async fn settle() {
    sleep(Duration::from_millis(10)).await;
}

/// Panics if `future` completes within `timeout_ms`.
pub async fn assert_pending<F>(future: &mut F, timeout_ms: u64)
where
    F: Future + Unpin,
{
    tokio::select! {
        _ = future => {
            panic!("Unexpected completion, expected the future to stay pending.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Unwraps the value of a `next()` result, panicking on errors and completion.
pub fn unwrap_next<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(value)) => value,
        Some(StreamItem::Error(error)) => panic!("expected a value, got error: {error}"),
        None => panic!("expected a value, got completion"),
    }
}
