use serde::Deserialize;

use modla_core::error::{ModlaError, Result};
use modla_core::gate::{DEFAULT_FADE_MS, DEFAULT_GRACE_MS};
use modla_core::GateTiming;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
    pub version: u32,

    #[serde(default)]
    pub gate: GateSection,

    /// Extra entitlement URIs (collections) checked after the plugin's own.
    #[serde(default)]
    pub entitlements: Vec<String>,
}

impl LicenseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ModlaError::UnsupportedVersion(self.version));
        }
        if self.entitlements.iter().any(|e| e.trim().is_empty()) {
            return Err(ModlaError::BadConfig("entitlements must not contain empty uris".into()));
        }

        self.gate.validate()?;

        Ok(())
    }
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gate: GateSection::default(),
            entitlements: Vec::new(),
        }
    }
}

/// Silence timing for unlicensed instances.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateSection {
    /// Unlicensed audio passes untouched this long after instantiation.
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u32,

    /// Ramp to silence after the grace period; 0 is a hard mute.
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u32,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            grace_ms: default_grace_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl GateSection {
    pub fn validate(&self) -> Result<()> {
        if self.grace_ms > 600_000 {
            return Err(ModlaError::BadConfig(
                "gate.grace_ms must be between 0 and 600000".into(),
            ));
        }
        if self.fade_ms > 1000 {
            return Err(ModlaError::BadConfig(
                "gate.fade_ms must be between 0 and 1000".into(),
            ));
        }
        Ok(())
    }

    /// Resolve to sample counts for the host's sample rate.
    pub fn timing(&self, sample_rate: f64) -> Result<GateTiming> {
        GateTiming::from_millis(self.grace_ms, self.fade_ms, sample_rate)
    }
}

fn default_grace_ms() -> u32 {
    DEFAULT_GRACE_MS
}
fn default_fade_ms() -> u32 {
    DEFAULT_FADE_MS
}
