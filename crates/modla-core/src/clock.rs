//! Per-instance run counter: samples processed since instantiation.

/// Advance `counter` by one block of `n_samples`.
///
/// Saturates at `u32::MAX` instead of wrapping, so a long-running instance
/// never looks freshly started to the gate.
#[inline]
pub const fn advance(counter: u32, n_samples: u32) -> u32 {
    counter.saturating_add(n_samples)
}

/// Owned run counter. Advance it once per block, from the audio thread only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunCounter(u32);

impl RunCounter {
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub fn advance(&mut self, n_samples: u32) -> u32 {
        self.0 = advance(self.0, n_samples);
        self.0
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_saturated(self) -> bool {
        self.0 == u32::MAX
    }
}

impl From<u32> for RunCounter {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
