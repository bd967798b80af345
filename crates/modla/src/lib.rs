//! Top-level facade crate for modla.
//!
//! Re-exports the core gating primitives and the plugin layer so plugins can
//! depend on a single crate.

pub mod core {
    pub use modla_core::*;
}

pub mod plugin {
    pub use modla_plugin::*;
}
