// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::{Consumer, StreamItem};
use fanout_stream::ShareRefCountedExt;
use fanout_test_utils::{assert_pending, settle, CountingSource};
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_detached_consumer_gets_none_while_others_keep_the_pull() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let leaving = shared.subscribe();
    let staying = shared.subscribe();
    let leaving_next = leaving.next();
    let mut staying_next = staying.next();
    assert_pending(&mut staying_next, 20).await;

    // Act
    leaving.detach();

    // Assert
    let result = timeout(Duration::from_millis(100), leaving_next).await;
    assert_eq!(result.expect("detached next() should resolve promptly"), None);

    probe.push(7);
    assert_eq!(staying_next.await, Some(StreamItem::Value(7)));
    assert_eq!(probe.pulls(), 1);
}

#[tokio::test]
async fn test_detach_wins_over_value_ready_at_the_same_time() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let first = shared.subscribe();
    let second = shared.subscribe();
    let first_next = first.next();
    let second_next = second.next();
    probe.push(3);
    assert_eq!(second_next.await, Some(StreamItem::Value(3)));

    // Act
    first.detach();

    // Assert
    assert_eq!(first_next.await, None);
}

#[tokio::test]
async fn test_next_after_detach_is_none() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let consumer = shared.subscribe();
    let _other = shared.subscribe();

    // Act
    consumer.detach();
    probe.push(1);

    // Assert
    assert!(consumer.is_detached());
    assert_eq!(consumer.next().await, None);
    assert_eq!(probe.pulls(), 0);
}

#[tokio::test]
async fn test_drop_detaches_and_triggers_teardown() {
    // Arrange
    let probe = CountingSource::<u32>::new();
    let shared = probe.clone().share_ref_counted();
    let consumer = shared.subscribe();

    // Act
    drop(consumer);
    settle().await;

    // Assert
    assert_eq!(shared.active_consumers(), 0);
    assert_eq!(probe.terminations_finished(), 1);
}

#[tokio::test]
async fn test_detach_from_another_task_resolves_pending_next() {
    // Arrange
    let probe = CountingSource::<u32>::new();
    let shared = probe.clone().share_ref_counted();
    let consumer = std::sync::Arc::new(shared.subscribe());
    let waiter = {
        let consumer = consumer.clone();
        tokio::spawn(async move { consumer.next().await })
    };
    settle().await;

    // Act
    consumer.detach();

    // Assert
    let result = timeout(Duration::from_millis(100), waiter).await;
    assert_eq!(result.expect("waiter finished").expect("waiter panicked"), None);
}
