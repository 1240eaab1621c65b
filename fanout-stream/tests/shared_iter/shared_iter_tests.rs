// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::{Consumer, StreamItem};
use fanout_stream::{ShareRefCountedExt, SharedIterable};
use fanout_test_utils::{assert_pending, unwrap_next, CountingSource};

#[tokio::test]
async fn test_source_is_not_instantiated_before_first_subscribe() {
    // Arrange
    let probe = CountingSource::<u32>::new();

    // Act
    let shared = SharedIterable::new(probe.clone());

    // Assert
    assert_eq!(probe.instantiations(), 0);
    assert_eq!(shared.generations(), 0);
    assert_eq!(shared.active_consumers(), 0);
}

#[tokio::test]
async fn test_concurrent_consumers_share_one_instantiation() {
    // Arrange
    let probe = CountingSource::<u32>::new();
    let shared = probe.clone().share_ref_counted();

    // Act
    let consumers: Vec<_> = (0..5).map(|_| shared.subscribe()).collect();

    // Assert
    assert_eq!(consumers.len(), 5);
    assert_eq!(probe.instantiations(), 1);
    assert_eq!(shared.generations(), 1);
    assert_eq!(shared.active_consumers(), 5);
}

#[tokio::test]
async fn test_concurrent_next_calls_share_one_pull() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let consumers: Vec<_> = (0..3).map(|_| shared.subscribe()).collect();
    let pending: Vec<_> = consumers.iter().map(|consumer| consumer.next()).collect();

    // Act
    probe.push(1);
    let items = futures::future::join_all(pending).await;

    // Assert
    assert_eq!(items, vec![Some(StreamItem::Value(1)); 3]);
    assert_eq!(probe.pulls(), 1);
}

#[tokio::test]
async fn test_sequential_next_calls_issue_separate_pulls() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let first = shared.subscribe();
    let second = shared.subscribe();
    probe.push(1);
    probe.push(2);

    // Act
    let a = unwrap_next(first.next().await);
    let b = unwrap_next(second.next().await);

    // Assert
    assert_eq!((a, b), (1, 2));
    assert_eq!(probe.pulls(), 2);
}

#[tokio::test]
async fn test_late_consumer_joins_in_flight_pull() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let early = shared.subscribe();
    let mut early_next = early.next();
    assert_pending(&mut early_next, 20).await;

    // Act
    let late = shared.subscribe();
    let late_next = late.next();
    probe.push(9);

    // Assert
    assert_eq!(early_next.await, Some(StreamItem::Value(9)));
    assert_eq!(late_next.await, Some(StreamItem::Value(9)));
    assert_eq!(probe.instantiations(), 1);
    assert_eq!(probe.pulls(), 1);
}

#[tokio::test]
async fn test_finished_source_yields_none_repeatedly() {
    // Arrange
    let probe = CountingSource::new();
    let shared = probe.clone().share_ref_counted();
    let consumer = shared.subscribe();
    probe.push(1);
    probe.finish();

    // Act & Assert
    assert_eq!(unwrap_next(consumer.next().await), 1);
    assert_eq!(consumer.next().await, None);
    assert_eq!(consumer.next().await, None);
}

#[tokio::test]
async fn test_clones_share_consumers_and_generation() {
    // Arrange
    let probe = CountingSource::<u32>::new();
    let shared = probe.clone().share_ref_counted();
    let clone = shared.clone();

    // Act
    let _first = shared.subscribe();
    let _second = clone.subscribe();

    // Assert
    assert_eq!(shared.active_consumers(), 2);
    assert_eq!(clone.generations(), 1);
    assert_eq!(probe.instantiations(), 1);
}
