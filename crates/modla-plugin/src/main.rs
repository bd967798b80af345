//! modla-sim: run a plugin instance offline and report what the gate did.
//!
//! Usage: `modla-sim [config.yaml] [--licensed]`
//! - 48 kHz, 256-sample blocks, full-scale stereo input, one second.
//! - Prints a JSON summary on stdout.

use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use modla_core::error::Result;
use modla_core::{Capability, CapabilityList, LicenseService};
use modla_plugin::{config, LicenseApi, LicenseConfig};

const SAMPLE_RATE: f64 = 48_000.0;
const BLOCK: usize = 256;
const PLUGIN_URI: &str = "urn:modla:sim";

/// Stand-in for the host licensing service.
struct SimHost {
    licensed: bool,
}

impl LicenseService for SimHost {
    fn check(&self, _entitlement: &str) -> bool {
        self.licensed
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    licensed: bool,
    run_count: u32,
    blocks: usize,
    first_silent_sample: Option<u32>,
    peak_last_block: f32,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut config_path = None;
    let mut licensed = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--licensed" => licensed = true,
            path => config_path = Some(path.to_string()),
        }
    }

    let cfg = match &config_path {
        Some(path) => config::load_from_file(path)?,
        None => LicenseConfig::default(),
    };
    let timing = cfg.gate.timing(SAMPLE_RATE)?;

    let host = SimHost { licensed };
    let capabilities = CapabilityList::new([Capability::licensing(&host)]);
    let entitlements = std::iter::once(PLUGIN_URI.to_string()).chain(cfg.entitlements.iter().cloned());
    let mut api = LicenseApi::new(&capabilities, entitlements, timing);

    tracing::info!(
        licensed = api.is_licensed(),
        grace_samples = timing.grace_samples,
        fade_samples = timing.fade_samples,
        "simulation starting"
    );

    let blocks = SAMPLE_RATE as usize / BLOCK;
    let mut left = vec![0.0f32; BLOCK];
    let mut right = vec![0.0f32; BLOCK];
    let mut first_silent_sample = None;
    let mut peak_last_block = 0.0f32;

    for _ in 0..blocks {
        left.fill(1.0);
        right.fill(-1.0);

        let start = api.run_count();
        api.run_begin(BLOCK as u32);
        api.run_silence(&mut [&mut left[..], &mut right[..]]);

        if first_silent_sample.is_none() {
            first_silent_sample = (start..)
                .zip(left.iter().zip(&right))
                .find(|(_, (l, r))| **l == 0.0 && **r == 0.0)
                .map(|(pos, _)| pos);
        }
        peak_last_block = left
            .iter()
            .chain(&right)
            .fold(0.0f32, |peak, s| peak.max(s.abs()));
    }

    let summary = Summary {
        licensed: api.is_licensed(),
        run_count: api.run_count(),
        blocks,
        first_silent_sample,
        peak_last_block,
    };
    tracing::info!(stats = ?api.stats(), "simulation finished");

    let out = serde_json::to_string_pretty(&summary)
        .map_err(|e| modla_core::ModlaError::Internal(format!("summary encode failed: {e}")))?;
    println!("{out}");
    Ok(())
}
