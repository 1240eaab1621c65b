// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! First-of-N completion combinator.

use alloc::vec::Vec;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

/// Future returned by [`race`].
///
/// Polls its futures in the order they were supplied and completes with the output of
/// the first one that is ready. When several are ready in the same poll, the earliest
/// entry wins. The remaining futures are dropped together with the `Race`, so a losing
/// branch never produces a second observable result.
#[must_use = "futures do nothing unless polled"]
#[derive(Debug)]
pub struct Race<F> {
    futures: Vec<F>,
}

/// Races a set of futures; see [`Race`].
///
/// An empty race never completes.
///
/// # Example
///
/// ```
/// use fanout_core::race;
/// use futures::future::{self, FutureExt};
///
/// # #[tokio::main]
/// # async fn main() {
/// let winner = race([future::pending::<u8>().boxed(), future::ready(2).boxed()]).await;
/// assert_eq!(winner, 2);
/// # }
/// ```
pub fn race<I>(futures: I) -> Race<I::Item>
where
    I: IntoIterator,
    I::Item: Future + Unpin,
{
    Race {
        futures: futures.into_iter().collect(),
    }
}

impl<F: Future + Unpin> Future for Race<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        for future in &mut self.get_mut().futures {
            if let Poll::Ready(output) = Pin::new(future).poll(cx) {
                return Poll::Ready(output);
            }
        }
        Poll::Pending
    }
}
