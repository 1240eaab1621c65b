// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::{BroadcastSubject, Consumer, StreamItem};
use fanout_stream::ShareRefCountedExt;
use fanout_test_utils::settle;

#[tokio::test]
async fn test_shared_subject_uses_one_subject_consumer() {
    // Arrange
    let subject = BroadcastSubject::new(0);
    let shared = subject.clone().share_ref_counted();

    // Act
    let first = shared.subscribe();
    let second = shared.subscribe();

    // Assert
    assert_eq!(subject.subscriber_count(), 1);

    let first_next = first.next();
    let second_next = second.next();
    settle().await;
    subject.put(4);
    let (a, b) = futures::join!(first_next, second_next);
    assert_eq!(a, Some(StreamItem::Value(4)));
    assert_eq!(b, Some(StreamItem::Value(4)));
}

#[tokio::test]
async fn test_teardown_detaches_subject_consumer() {
    // Arrange
    let subject = BroadcastSubject::new(0);
    let shared = subject.clone().share_ref_counted();
    let consumer = shared.subscribe();

    // Act
    drop(consumer);
    settle().await;

    // Assert
    assert_eq!(subject.subscriber_count(), 0);
}

#[tokio::test]
async fn test_subject_close_ends_shared_consumers() {
    // Arrange
    let subject = BroadcastSubject::new(0);
    let shared = subject.clone().share_ref_counted();
    let consumer = shared.subscribe();
    let next = consumer.next();

    // Act
    subject.close();

    // Assert
    assert_eq!(next.await, None);
}
