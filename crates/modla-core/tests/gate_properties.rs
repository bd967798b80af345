//! Gate and clock properties over generated inputs.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use modla_core::clock::{advance, RunCounter};
use modla_core::{GateAction, GateTiming, SilenceGate, Verdict};

/// Deterministic pseudo-random samples in [-1.5, 1.5].
fn signal(len: usize, seed: u32) -> Vec<f32> {
    let mut x = seed.wrapping_mul(2_654_435_761).max(1);
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x as f32 / u32::MAX as f32) * 3.0 - 1.5
        })
        .collect()
}

fn timings() -> [GateTiming; 4] {
    [
        GateTiming::HARD_MUTE,
        GateTiming::default(),
        GateTiming { grace_samples: 100, fade_samples: 37 },
        GateTiming { grace_samples: 0, fade_samples: 1 },
    ]
}

#[test]
fn licensed_is_bit_identical() {
    for timing in timings() {
        for len in [0usize, 1, 64, 511] {
            let mut gate = SilenceGate::new(timing);
            let original = signal(len, len as u32 + 1);
            let mut buf = original.clone();
            let counter = len as u32;
            let action = gate.apply(Verdict::Licensed, counter, &mut buf, 0);
            assert_eq!(action, GateAction::Passed);
            let same = original
                .iter()
                .zip(&buf)
                .all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same, "timing={timing:?} len={len}");
        }
    }
}

#[test]
fn unlicensed_never_amplifies() {
    for timing in timings() {
        let mut gate = SilenceGate::new(timing);
        let mut counter = RunCounter::new();
        for block in 0..12u32 {
            let original = signal(64, block + 7);
            let mut buf = original.clone();
            let c = counter.advance(64);
            gate.apply(Verdict::Unlicensed, c, &mut buf, 0);
            for (before, after) in original.iter().zip(&buf) {
                assert!(after.abs() <= before.abs(), "timing={timing:?} block={block}");
            }
        }
    }
}

#[test]
fn full_silence_is_idempotent() {
    for timing in timings() {
        let counter = timing.silent_from().saturating_add(256);
        let mut gate = SilenceGate::new(timing);
        let mut once = signal(256, 3);
        gate.apply(Verdict::Unlicensed, counter, &mut once, 0);
        let mut twice = once.clone();
        let action = gate.apply(Verdict::Unlicensed, counter, &mut twice, 0);
        assert_eq!(action, GateAction::Silenced);
        assert_eq!(once, twice);
        assert!(twice.iter().all(|s| *s == 0.0));
    }
}

#[test]
fn ramp_window_is_idempotent() {
    let mut gate = SilenceGate::new(GateTiming::default());
    let mut once = [1.0f32; 4];
    gate.apply(Verdict::Unlicensed, 4, &mut once, 0);
    let mut twice = once;
    gate.apply(Verdict::Unlicensed, 4, &mut twice, 0);
    assert!(once.iter().all(|s| *s < 1.0));
    assert_eq!(once, twice);

    for timing in timings() {
        let mut gate = SilenceGate::new(timing);
        let mut counter = RunCounter::new();
        for block in 0..12u32 {
            let c = counter.advance(64);
            let mut once = signal(64, block + 11);
            gate.apply(Verdict::Unlicensed, c, &mut once, 0);
            let mut twice = once.clone();
            gate.apply(Verdict::Unlicensed, c, &mut twice, 0);
            assert_eq!(once, twice, "timing={timing:?} block={block}");
        }
    }
}

#[test]
fn block_straddling_grace_is_idempotent() {
    let timing = GateTiming { grace_samples: 30, fade_samples: 20 };
    let mut gate = SilenceGate::new(timing);
    let mut once = signal(32, 5);
    let original = once.clone();
    assert_eq!(gate.apply(Verdict::Unlicensed, 40, &mut once, 1), GateAction::Faded);
    assert_eq!(once[..22], original[..22]);

    let mut twice = once.clone();
    gate.apply(Verdict::Unlicensed, 40, &mut twice, 1);
    assert_eq!(once, twice);
}

#[test]
fn ramp_is_continuous_across_blocks() {
    let timing = GateTiming { grace_samples: 0, fade_samples: 10 };
    let mut gate = SilenceGate::new(timing);
    let mut counter = RunCounter::new();
    let mut out = Vec::new();
    for _ in 0..4 {
        let mut buf = vec![1.0f32; 3];
        let c = counter.advance(3);
        gate.apply(Verdict::Unlicensed, c, &mut buf, 0);
        out.extend(buf);
    }
    let expected: Vec<f32> = (0..12).map(|p| timing.gain_at(p)).collect();
    assert_eq!(out, expected);
    assert!(out.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(out[9], 0.0);
}

#[test]
fn stats_track_channels_and_actions() {
    let mut gate = SilenceGate::new(GateTiming::HARD_MUTE);
    let mut left = [1.0f32; 8];
    let mut right = [1.0f32; 8];
    gate.apply(Verdict::Unlicensed, 8, &mut left, 0);
    gate.apply(Verdict::Unlicensed, 8, &mut right, 1);
    let stats = gate.stats();
    assert_eq!(stats.silenced, 2);
    assert_eq!(stats.passed, 0);
    assert_eq!(stats.channels, 2);
}

#[test]
#[allow(deprecated)]
fn noise_entry_point_only_silences() {
    let mut gate = SilenceGate::new(GateTiming::HARD_MUTE);
    let mut buf = [0.0f32; 16];
    let action = gate.apply_noise(Verdict::Unlicensed, 16, &mut buf, 0);
    assert_eq!(action, GateAction::Silenced);
    assert!(buf.iter().all(|s| *s == 0.0));

    let mut buf = [0.3f32; 4];
    gate.apply_noise(Verdict::Licensed, 20, &mut buf, 0);
    assert_eq!(buf, [0.3; 4]);
}

#[test]
fn counter_equals_saturating_sum() {
    let sequences: [&[u32]; 3] = [
        &[],
        &[1, 2, 3, 4096, 0, 17],
        &[u32::MAX / 2, u32::MAX / 2, 10, 10],
    ];
    for blocks in sequences {
        let mut c = 0u32;
        for b in blocks {
            c = advance(c, *b);
        }
        let expected = blocks.iter().fold(0u32, |acc, b| acc.saturating_add(*b));
        assert_eq!(c, expected);
    }
    assert_eq!(advance(u32::MAX - 2, 10), u32::MAX);
}
