// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the Fanout workspace.
//!
//! Designed for development and testing only, not for production code.
//!
//! # Key Types
//!
//! ## `CountingSource<T>`
//!
//! An instrumented source: counts instantiations, pulls and terminations, and can hold
//! teardowns open until the test releases them.
//!
//! ```rust
//! use fanout_stream::ShareRefCountedExt;
//! use fanout_test_utils::CountingSource;
//!
//! let probe = CountingSource::<u32>::new();
//! let shared = probe.clone().share_ref_counted();
//!
//! let _consumer = shared.subscribe();
//! assert_eq!(probe.instantiations(), 1);
//! ```
//!
//! ## `TestChannel<T>`
//!
//! An unbounded channel of `StreamItem<T>` whose receiver backs a `from_fn` source.
//!
//! ## Helpers
//!
//! - [`settle`]: give spawned publications and teardowns a chance to run
//! - [`assert_pending`]: fail if a future completes within a timeout
//! - [`unwrap_next`]: extract the value from a `next()` result

pub mod counting_source;
pub mod helpers;
pub mod test_channel;

pub use self::counting_source::CountingSource;
pub use self::helpers::{assert_pending, settle, unwrap_next};
pub use self::test_channel::{test_channel, TestChannel};
