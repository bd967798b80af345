//! Silence gate vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use modla_core::SilenceGate;

mod vector_loader;
use vector_loader::load;

#[test]
fn gate_vectors() {
    let files = [
        "gate_licensed_untouched.json",
        "gate_licensed_empty.json",
        "gate_ramp_first_block.json",
        "gate_hard_mute.json",
        "gate_in_grace.json",
        "gate_after_fade.json",
        "gate_saturated_counter.json",
    ];

    for f in files {
        let v = load(f);
        let mut gate = SilenceGate::new(v.timing());
        let mut buf = v.input.clone();

        let action = gate.apply(v.verdict(), v.counter, &mut buf, v.channel);

        assert_eq!(action, v.action(), "vector={}", v.description);
        assert_eq!(buf, v.expect, "vector={}", v.description);
        assert_eq!(gate.stats().channels, v.channel + 1, "vector={}", v.description);
    }
}
