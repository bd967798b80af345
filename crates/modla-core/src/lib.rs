//! modla core: entitlement gating primitives for real-time audio plugins.
//!
//! This crate decides once, at instantiation, whether a plugin instance is
//! licensed, and then silences its output on the audio thread when it is not.
//! It carries no plugin-framework dependency; the host's feature array and
//! licensing callbacks enter through [`capability`] and [`ffi`].
//!
//! # Execution contexts
//! - Instantiation (may allocate, may log): [`entitlement::check`],
//!   [`entitlement::InstanceLicense::evaluate`], [`capability::CapabilityList::from_raw`].
//! - Audio thread (no allocation, no locks, no logging): [`clock`], [`gate`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Setup failures surface as `ModlaError`/`Result`; per-block paths cannot fail.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod capability;
pub mod clock;
pub mod entitlement;
pub mod error;
pub mod extension;
pub mod ffi;
pub mod gate;
pub mod version;

/// Shared result type.
pub use error::{ModlaError, Result};

pub use capability::{Capability, CapabilityList, LicenseService};
pub use clock::RunCounter;
pub use entitlement::{InstanceLicense, Verdict};
pub use gate::{GateAction, GateTiming, SilenceGate};
