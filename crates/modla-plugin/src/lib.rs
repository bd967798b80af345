//! modla plugin layer.
//!
//! Wires the core gating primitives into what a plugin actually embeds: a
//! per-instance [`LicenseApi`], the strict YAML gate policy, and the C ABI
//! exported for plugins written against the `mod_license_*` header.

pub mod capi;
pub mod config;
pub mod license_api;

pub use config::{GateSection, LicenseConfig};

/// Whether the `licensing` cargo feature is on. When off, every instance is
/// licensed and no gate ever touches audio.
pub const LICENSING_ENABLED: bool = cfg!(feature = "licensing");
pub use license_api::LicenseApi;
