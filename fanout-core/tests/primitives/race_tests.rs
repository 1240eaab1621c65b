// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::race;
use fanout_test_utils::assert_pending;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture, FutureExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_first_ready_future_wins() {
    // Arrange
    let (tx, rx) = oneshot::channel::<u32>();
    let contenders: Vec<BoxFuture<'static, u32>> = vec![
        future::pending().boxed(),
        rx.map(|value| value.unwrap_or_default()).boxed(),
    ];
    let mut winner = race(contenders);
    assert_pending(&mut winner, 20).await;

    // Act
    tx.send(9).expect("receiver alive");

    // Assert
    assert_eq!(winner.await, 9);
}

#[test]
fn test_earlier_entry_wins_ties() {
    // Arrange
    let winner = race([future::ready("first"), future::ready("second")]);

    // Assert
    assert_eq!(winner.now_or_never(), Some("first"));
}

#[test]
fn test_empty_race_never_completes() {
    // Arrange
    let winner = race(Vec::<future::Ready<()>>::new());

    // Assert
    assert_eq!(winner.now_or_never(), None);
}

#[tokio::test]
async fn test_losing_branches_are_dropped() {
    // Arrange
    struct DropFlag(Arc<AtomicBool>);
    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    let dropped = Arc::new(AtomicBool::new(false));
    let flag = DropFlag(dropped.clone());
    let loser = async move {
        let _flag = flag;
        future::pending::<u8>().await
    }
    .boxed();

    // Act
    let winner = race([future::ready(1u8).boxed(), loser]).await;

    // Assert
    assert_eq!(winner, 1);
    assert!(dropped.load(Ordering::SeqCst));
}
