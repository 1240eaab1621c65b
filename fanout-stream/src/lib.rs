// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared, reference-counted iteration for Fanout.
//!
//! This crate turns a single-consumer async source into a resource that many consumers
//! iterate concurrently:
//!
//! - [`SourceIterable`]: the seam a producer implements (or [`from_fn`] for closures)
//! - [`SharedIterable`]: the multi-consumer view, created with
//!   [`share_ref_counted()`](ShareRefCountedExt::share_ref_counted)
//! - [`SharedIter`]: one consumer, implementing [`Consumer`](fanout_core::Consumer)
//!
//! A [`BroadcastSubject`](fanout_core::BroadcastSubject) is itself a `SourceIterable`,
//! so a subject's updates can be shared the same way.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

extern crate alloc;

mod logging;

pub mod shared_iter;
pub mod source;
mod subject_source;

pub use self::shared_iter::{ShareRefCountedExt, SharedIter, SharedIterable};
pub use self::source::{from_fn, FnSource, SourceIterable};
