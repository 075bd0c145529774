// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic clocks and debounce primitives.
//!
//! UI runtimes differ in how they schedule work: a browser host has
//! `setTimeout`, a native host has its own event loop, and tests want full
//! control over time. This crate keeps scheduling decisions as plain state
//! machines driven by millisecond timestamps supplied by the host, so the
//! same logic runs everywhere.
//!
//! - [`Clock`]: a source of monotonic millisecond timestamps.
//!   [`ManualClock`] is a shared, settable clock for tests and headless
//!   hosts; [`SystemClock`] (with the `std` feature) reads
//!   `std::time::Instant`.
//! - [`Debouncer`]: coalesces bursts of requests into a single run after a
//!   fixed delay, and drops requests made while a run is in progress.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{Debouncer, RequestOutcome};
//!
//! let mut debounce = Debouncer::new(100);
//!
//! assert_eq!(debounce.request(0), RequestOutcome::Armed);
//! assert_eq!(debounce.request(40), RequestOutcome::Coalesced);
//! assert_eq!(debounce.deadline(), Some(100));
//!
//! assert!(!debounce.begin(99));
//! assert!(debounce.begin(100));
//! // ... do the work ...
//! debounce.finish();
//! assert!(debounce.is_idle());
//! ```
//!
//! The host is expected to call [`Debouncer::begin`] (directly or through a
//! higher-level `poll`) at or after [`Debouncer::deadline`].
//!
//! This crate is `no_std` unless the `std` feature is enabled.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod clock;
mod debounce;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use debounce::{DebounceState, Debouncer, RequestOutcome};
