// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_channel::{Receiver, Sender};
use fanout_core::StreamItem;
use fanout_error::FanoutError;

/// A test channel feeding `StreamItem`s into a source built with `from_fn`.
///
/// The receiver is cloned per instantiation, so every generation reads from the same
/// queue.
pub struct TestChannel<T> {
    pub sender: Sender<StreamItem<T>>,
    pub receiver: Receiver<StreamItem<T>>,
}

impl<T> TestChannel<T> {
    /// Creates a new test channel with unbounded capacity.
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self { sender, receiver }
    }

    /// Send a value through the channel.
    pub fn send(&self, value: T) {
        self.send_item(StreamItem::Value(value));
    }

    /// Send an error through the channel.
    pub fn send_error(&self, error: FanoutError) {
        self.send_item(StreamItem::Error(error));
    }

    /// Close the sender side of the channel.
    pub fn close(&self) {
        self.sender.close();
    }

    fn send_item(&self, item: StreamItem<T>) {
        if self.sender.try_send(item).is_err() {
            panic!("test channel closed");
        }
    }
}

impl<T> Default for TestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for [`TestChannel::new`].
pub fn test_channel<T>() -> TestChannel<T> {
    TestChannel::new()
}
