// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::SourceIterable;
use fanout_core::{BroadcastSubject, Consumer, StreamItem};
use futures::stream::BoxStream;

/// Each instantiation is a fresh subject consumer observing future updates; dropping
/// the iterator detaches that consumer.
impl<T: Clone + Send + Sync + 'static> SourceIterable for BroadcastSubject<T> {
    type Item = T;
    type Iter = BoxStream<'static, StreamItem<T>>;

    fn iterate(&self) -> Self::Iter {
        self.subscribe().into_stream()
    }
}
