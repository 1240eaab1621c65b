// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::{FanoutError, PendingSlot};
use fanout_test_utils::assert_pending;
use futures::FutureExt;

#[tokio::test]
async fn test_new_slot_is_unsettled() {
    // Arrange
    let slot = PendingSlot::<u32>::new();
    let mut promise = slot.promise();

    // Assert
    assert!(!slot.is_settled());
    assert_pending(&mut promise, 20).await;
}

#[tokio::test]
async fn test_resolve_settles_every_promise() {
    // Arrange
    let slot = PendingSlot::new();
    let first = slot.promise();
    let second = slot.promise();

    // Act
    assert!(slot.resolve("done"));

    // Assert
    assert!(slot.is_settled());
    assert_eq!(first.await.expect("resolved"), "done");
    assert_eq!(second.await.expect("resolved"), "done");
    assert_eq!(slot.promise().await.expect("resolved"), "done");
}

#[tokio::test]
async fn test_only_first_settlement_takes_effect() {
    // Arrange
    let slot = PendingSlot::new();

    // Act
    let resolved = slot.resolve(1);
    let resolved_again = slot.resolve(2);
    let rejected = slot.reject(FanoutError::producer_error("late"));

    // Assert
    assert!(resolved);
    assert!(!resolved_again);
    assert!(!rejected);
    assert_eq!(slot.promise().await.expect("resolved"), 1);
}

#[tokio::test]
async fn test_reject_delivers_error() {
    // Arrange
    let slot = PendingSlot::<u32>::new();
    let promise = slot.promise();

    // Act
    assert!(slot.reject(FanoutError::producer_error("failed")));

    // Assert
    let error = promise.await.expect_err("rejected");
    assert_eq!(error.to_string(), "Producer error: failed");
}

#[test]
fn test_resolved_slot_is_ready_immediately() {
    // Arrange
    let slot = PendingSlot::resolved(Some(3));

    // Assert
    assert!(slot.is_settled());
    let outcome = slot.promise().now_or_never().expect("ready");
    assert_eq!(outcome.expect("resolved"), Some(3));
}

#[test]
fn test_dropped_slot_abandons_promises() {
    // Arrange
    let slot = PendingSlot::<u32>::new();
    let promise = slot.promise();

    // Act
    drop(slot);

    // Assert
    let outcome = promise.now_or_never().expect("ready after drop");
    assert!(matches!(outcome, Err(FanoutError::SlotAbandoned)));
}
