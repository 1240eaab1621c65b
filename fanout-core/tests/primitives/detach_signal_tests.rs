// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::DetachSignal;
use futures::FutureExt;
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[test]
fn test_new_signal_not_triggered() {
    let signal = DetachSignal::new();
    assert!(!signal.is_triggered());
}

#[test]
fn test_trigger_reports_first_call_only() {
    let signal = DetachSignal::new();
    assert!(signal.trigger());
    assert!(!signal.trigger());
    assert!(!signal.trigger());
    assert!(signal.is_triggered());
}

#[test]
fn test_clone_shares_latch() {
    let signal = DetachSignal::new();
    let clone = signal.clone();

    clone.trigger();

    assert!(signal.is_triggered());
    assert!(!signal.trigger());
}

#[test]
fn test_triggered_is_ready_when_already_triggered() {
    let signal = DetachSignal::new();
    signal.trigger();

    assert_eq!(signal.triggered().now_or_never(), Some(()));
}

#[test]
fn test_triggered_is_pending_until_trigger() {
    let signal = DetachSignal::new();
    assert_eq!(signal.triggered().now_or_never(), None);
}

#[tokio::test]
async fn test_triggered_waits_until_trigger() {
    // Arrange
    let signal = DetachSignal::new();
    let waiter = tokio::spawn(signal.triggered());
    sleep(Duration::from_millis(10)).await;

    // Act
    signal.trigger();

    // Assert
    let result = timeout(Duration::from_millis(100), waiter).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_all_waiters_are_woken() {
    // Arrange
    let signal = DetachSignal::new();
    let waiters: Vec<_> = (0..10).map(|_| tokio::spawn(signal.triggered())).collect();

    // Act
    signal.trigger();

    // Assert
    for waiter in waiters {
        let result = timeout(Duration::from_millis(100), waiter).await;
        assert!(result.is_ok());
    }
}

#[tokio::test]
async fn test_triggered_outlives_signal_handle() {
    // Arrange
    let signal = DetachSignal::new();
    let trigger = signal.clone();
    let triggered = signal.triggered();
    drop(signal);

    // Act
    trigger.trigger();

    // Assert
    timeout(Duration::from_millis(100), triggered)
        .await
        .expect("triggered future should complete");
}
