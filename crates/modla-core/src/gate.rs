//! Silence injection for unlicensed instances (audio thread).
//!
//! Timing is measured against the run counter, which already includes the
//! current block when the gate runs. Sample `i` of a block of `n` therefore
//! sits at absolute position `counter - n + i`.
//!
//! Policy, per absolute position `p`:
//! - `p < grace`: untouched.
//! - `grace <= p < grace + fade`: the sample is clamped into `[-g, g]`,
//!   `g = 1 - (k + 1) / fade` with `k = p - grace`. The envelope reaches
//!   exactly zero on the last ramp sample.
//! - afterwards: hard zero.
//!
//! Clamping to the envelope (rather than scaling by it) is idempotent: gating
//! the same buffer twice for the same block leaves it as after the first call.
//! NaN samples become zero.
//!
//! Rules: no allocation, no locks, no logging, O(n) per buffer.

use crate::entitlement::Verdict;
use crate::error::{ModlaError, Result};

/// Default grace period before muting starts.
pub const DEFAULT_GRACE_MS: u32 = 0;
/// Default ramp length from full level to silence.
pub const DEFAULT_FADE_MS: u32 = 10;
/// Rate assumed when the caller has none (C ABI).
pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;

/// Gate timing in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTiming {
    pub grace_samples: u32,
    pub fade_samples: u32,
}

impl GateTiming {
    /// Mute from the first sample, no ramp.
    pub const HARD_MUTE: GateTiming = GateTiming {
        grace_samples: 0,
        fade_samples: 0,
    };

    /// Resolve millisecond settings at `sample_rate`.
    pub fn from_millis(grace_ms: u32, fade_ms: u32, sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ModlaError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            grace_samples: ms_to_samples(grace_ms, sample_rate),
            fade_samples: ms_to_samples(fade_ms, sample_rate),
        })
    }

    /// First absolute position that is fully silent.
    #[inline]
    pub fn silent_from(&self) -> u32 {
        self.grace_samples.saturating_add(self.fade_samples)
    }

    /// Envelope bound at absolute position `pos`, in `[0, 1]`.
    #[inline]
    pub fn gain_at(&self, pos: u32) -> f32 {
        if pos < self.grace_samples {
            return 1.0;
        }
        let k = pos - self.grace_samples;
        if k >= self.fade_samples {
            return 0.0;
        }
        1.0 - (k + 1) as f32 / self.fade_samples as f32
    }
}

impl Default for GateTiming {
    fn default() -> Self {
        Self {
            grace_samples: ms_to_samples(DEFAULT_GRACE_MS, DEFAULT_SAMPLE_RATE),
            fade_samples: ms_to_samples(DEFAULT_FADE_MS, DEFAULT_SAMPLE_RATE),
        }
    }
}

fn ms_to_samples(ms: u32, sample_rate: f64) -> u32 {
    let samples = (f64::from(ms) * sample_rate / 1000.0).round();
    // `as` saturates for out-of-range floats.
    samples as u32
}

/// What the gate did to a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Left exactly as the DSP produced it.
    Passed,
    /// Clamped to the ramp envelope.
    Faded,
    /// Overwritten with zeros.
    Silenced,
}

/// Buffer counters kept by the gate. Plain integers, updated in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    pub passed: u64,
    pub faded: u64,
    pub silenced: u64,
    /// Highest channel index seen plus one.
    pub channels: u32,
}

/// Per-instance silence gate.
#[derive(Debug, Clone, Default)]
pub struct SilenceGate {
    timing: GateTiming,
    stats: GateStats,
}

impl SilenceGate {
    pub fn new(timing: GateTiming) -> Self {
        Self {
            timing,
            stats: GateStats::default(),
        }
    }

    pub fn timing(&self) -> GateTiming {
        self.timing
    }

    pub fn stats(&self) -> GateStats {
        self.stats
    }

    /// Gate one output buffer of the current block.
    ///
    /// `counter` is the run counter after this block's advance. `channel`
    /// only feeds the statistics. Licensed instances never have their buffer
    /// touched; a repeated call for the same block leaves the buffer unchanged.
    pub fn apply(&mut self, verdict: Verdict, counter: u32, buf: &mut [f32], channel: u32) -> GateAction {
        self.stats.channels = self.stats.channels.max(channel.saturating_add(1));

        let action = if verdict.is_licensed() {
            GateAction::Passed
        } else {
            silence(self.timing, counter, buf)
        };

        match action {
            GateAction::Passed => self.stats.passed += 1,
            GateAction::Faded => self.stats.faded += 1,
            GateAction::Silenced => self.stats.silenced += 1,
        }
        action
    }

    /// Retired noise injection. Forwards to [`SilenceGate::apply`].
    #[deprecated(
        since = "1.2.0",
        note = "noise can build up to full level through a signal chain; use `apply`"
    )]
    pub fn apply_noise(&mut self, verdict: Verdict, counter: u32, buf: &mut [f32], channel: u32) -> GateAction {
        self.apply(verdict, counter, buf, channel)
    }
}

/// Stateless gate for an unlicensed buffer. Same rules as [`SilenceGate::apply`].
pub fn silence(timing: GateTiming, counter: u32, buf: &mut [f32]) -> GateAction {
    let n = u32::try_from(buf.len()).unwrap_or(u32::MAX);
    let start = counter.saturating_sub(n);
    let end = start.saturating_add(n);

    if start >= timing.silent_from() {
        buf.fill(0.0);
        return GateAction::Silenced;
    }
    if end <= timing.grace_samples {
        return GateAction::Passed;
    }

    let mut pos = start;
    for sample in buf.iter_mut() {
        if pos >= timing.grace_samples {
            *sample = clamp_to(*sample, timing.gain_at(pos));
        }
        pos = pos.saturating_add(1);
    }
    GateAction::Faded
}

#[inline]
fn clamp_to(sample: f32, bound: f32) -> f32 {
    if sample.is_nan() || bound == 0.0 {
        0.0
    } else {
        sample.max(-bound).min(bound)
    }
}
