// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

extern crate alloc;

mod logging;

pub mod broadcast_subject;
pub mod consumer;
pub mod detach_signal;
pub mod pending_slot;
pub mod race;
pub mod stream_item;
pub mod task;

pub use self::broadcast_subject::{BroadcastSubject, SubjectIter};
pub use self::consumer::{Consumer, NextFuture};
pub use self::detach_signal::{DetachSignal, Triggered};
pub use self::pending_slot::{PendingSlot, SlotPromise};
pub use self::race::{race, Race};
pub use self::stream_item::StreamItem;
pub use fanout_error::{FanoutError, IntoFanoutError, Result};
