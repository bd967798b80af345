//! License config loader (strict parsing).

pub mod schema;

use std::fs;

use modla_core::error::{ModlaError, Result};

pub use schema::{GateSection, LicenseConfig};

pub fn load_from_file(path: &str) -> Result<LicenseConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ModlaError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<LicenseConfig> {
    let cfg: LicenseConfig = serde_yaml::from_str(s)
        .map_err(|e| ModlaError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    tracing::debug!(
        grace_ms = cfg.gate.grace_ms,
        fade_ms = cfg.gate.fade_ms,
        entitlements = cfg.entitlements.len(),
        "license config loaded"
    );
    Ok(cfg)
}
