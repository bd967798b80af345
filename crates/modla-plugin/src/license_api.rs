//! Per-instance licensing object a plugin embeds.
//!
//! Construct it in the plugin's instantiate callback, then call
//! [`LicenseApi::run_begin`] at the start of every run and
//! [`LicenseApi::run_silence`] on the output buffers at the end.
//!
//! ```
//! use modla_core::{CapabilityList, GateTiming};
//! use modla_plugin::LicenseApi;
//!
//! let caps = CapabilityList::empty();
//! let mut api = LicenseApi::new(&caps, ["urn:example:plugin"], GateTiming::default());
//!
//! let mut left = [0.5f32; 64];
//! let mut right = [0.5f32; 64];
//! api.run_begin(64);
//! api.run_silence(&mut [&mut left[..], &mut right[..]]);
//! assert!(api.is_licensed());
//! assert_eq!(left, [0.5; 64]);
//! ```

use std::slice;

use modla_core::capability::CapabilityList;
use modla_core::ffi::RawFeature;
use modla_core::gate::GateStats;
use modla_core::{version, GateTiming, InstanceLicense, RunCounter, SilenceGate, Verdict};

use crate::LICENSING_ENABLED;

/// Cached verdict, run counter and gate for one plugin instance.
#[derive(Debug, Clone)]
pub struct LicenseApi {
    license: InstanceLicense,
    run_count: RunCounter,
    gate: SilenceGate,
}

impl LicenseApi {
    /// Check `entitlements` against the host once and cache the verdict.
    pub fn new<I, S>(capabilities: &CapabilityList<'_>, entitlements: I, timing: GateTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !LICENSING_ENABLED {
            tracing::info!("licensing compiled out, instance runs unrestricted");
            return Self::with_license(InstanceLicense::from_verdict(Verdict::Licensed), timing);
        }
        Self::with_license(InstanceLicense::evaluate(capabilities, entitlements), timing)
    }

    /// Same as [`LicenseApi::new`], reading the host's raw feature array.
    ///
    /// # Safety
    /// See [`CapabilityList::from_raw`]. The array is only read during this call.
    pub unsafe fn from_features<I, S>(
        features: *const *const RawFeature,
        entitlements: I,
        timing: GateTiming,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let capabilities = CapabilityList::from_raw(features);
        Self::new(&capabilities, entitlements, timing)
    }

    /// Instance whose licensing was decided elsewhere.
    pub fn with_license(license: InstanceLicense, timing: GateTiming) -> Self {
        Self {
            license,
            run_count: RunCounter::new(),
            gate: SilenceGate::new(timing),
        }
    }

    pub fn is_licensed(&self) -> bool {
        self.license.is_licensed()
    }

    pub fn verdict(&self) -> Verdict {
        self.license.verdict()
    }

    /// Samples processed since instantiation (saturating).
    pub fn run_count(&self) -> u32 {
        self.run_count.get()
    }

    pub fn stats(&self) -> GateStats {
        self.gate.stats()
    }

    /// Count this block's samples. Call once at the start of every run.
    #[inline]
    pub fn run_begin(&mut self, n_samples: u32) {
        self.run_count.advance(n_samples);
    }

    /// Silence output buffers if unlicensed. Call at the end of every run,
    /// after the DSP has written its output.
    pub fn run_silence(&mut self, outputs: &mut [&mut [f32]]) {
        if !LICENSING_ENABLED {
            return;
        }
        let verdict = self.license.verdict();
        let counter = self.run_count.get();
        for (channel, buf) in (0u32..).zip(outputs.iter_mut()) {
            self.gate.apply(verdict, counter, buf, channel);
        }
    }

    /// [`LicenseApi::run_silence`] over raw port pointers. Null ports are skipped.
    ///
    /// # Safety
    /// Every non-null pointer must be valid for `n_samples` writes of `f32`
    /// and not aliased by any other live reference during the call.
    pub unsafe fn run_silence_raw(&mut self, outputs: &[*mut f32], n_samples: u32) {
        if !LICENSING_ENABLED {
            return;
        }
        let verdict = self.license.verdict();
        let counter = self.run_count.get();
        for (channel, &ptr) in (0u32..).zip(outputs.iter()) {
            if ptr.is_null() {
                continue;
            }
            let buf = slice::from_raw_parts_mut(ptr, n_samples as usize);
            self.gate.apply(verdict, counter, buf, channel);
        }
    }

    /// Retired noise injection; forwards to [`LicenseApi::run_silence`].
    #[deprecated(
        since = "1.2.0",
        note = "noise can build up to full level through a signal chain; use `run_silence`"
    )]
    pub fn run_noise(&mut self, outputs: &mut [&mut [f32]]) {
        self.run_silence(outputs);
    }

    /// Version of the license library.
    pub fn version() -> &'static str {
        version::version()
    }
}
