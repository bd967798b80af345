//! Entitlement checks and the per-instance cached verdict.
//!
//! Everything here runs in the instantiation context: it may call into the
//! host, allocate, and log. Nothing here is touched from the audio thread
//! except [`InstanceLicense::verdict`], which is a plain copy.

use tracing::{debug, info};

use crate::capability::CapabilityList;

/// Cached licensing outcome for one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Licensed,
    Unlicensed,
}

impl Verdict {
    pub fn is_licensed(self) -> bool {
        matches!(self, Verdict::Licensed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Licensed => "licensed",
            Verdict::Unlicensed => "unlicensed",
        }
    }
}

impl From<bool> for Verdict {
    fn from(licensed: bool) -> Self {
        if licensed {
            Verdict::Licensed
        } else {
            Verdict::Unlicensed
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check one entitlement against the host.
///
/// Without a licensing capability every entitlement passes, so hosts that do
/// not implement licensing are unaffected. No retries, no caching.
pub fn check(capabilities: &CapabilityList<'_>, entitlement: &str) -> bool {
    let Some(service) = capabilities.licensing() else {
        debug!(entitlement, "host offers no licensing capability, permitting");
        return true;
    };

    let licensed = service.check(entitlement);
    debug!(entitlement, licensed, "entitlement checked");
    licensed
}

/// Short-circuit OR over `entitlements`.
///
/// The first passing entitlement settles the verdict and later ones are not
/// checked. An empty set is vacuously licensed.
pub fn fold_verdict<I, F>(entitlements: I, mut check: F) -> Verdict
where
    I: IntoIterator,
    F: FnMut(I::Item) -> bool,
{
    let mut entitlements = entitlements.into_iter().peekable();
    if entitlements.peek().is_none() {
        return Verdict::Licensed;
    }
    Verdict::from(entitlements.any(check))
}

/// Single-assignment license state of a plugin instance.
///
/// Built once at instantiation and never re-evaluated: the host's licensing
/// state is assumed stable for a running instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLicense {
    verdict: Verdict,
}

impl InstanceLicense {
    /// Check every entitlement the instance is associated with (plugin URI,
    /// collection URIs, ...) and cache the result.
    pub fn evaluate<I, S>(capabilities: &CapabilityList<'_>, entitlements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut checked = 0usize;
        let verdict = fold_verdict(entitlements, |e| {
            checked += 1;
            check(capabilities, e.as_ref())
        });

        info!(%verdict, checked, "instance license evaluated");
        Self { verdict }
    }

    /// State with a known verdict, for hosts that decide licensing elsewhere.
    pub fn from_verdict(verdict: Verdict) -> Self {
        Self { verdict }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_licensed(&self) -> bool {
        self.verdict.is_licensed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_stops_at_first_pass() {
        let mut seen = Vec::new();
        let v = fold_verdict(["a", "b", "c"], |e| {
            seen.push(e);
            e == "b"
        });
        assert_eq!(v, Verdict::Licensed);
        assert_eq!(seen, ["a", "b"]);
    }

    #[test]
    fn fold_all_fail() {
        let v = fold_verdict(["a", "b"], |_| false);
        assert_eq!(v, Verdict::Unlicensed);
    }

    #[test]
    fn fold_empty_is_licensed() {
        let v = fold_verdict(Vec::<&str>::new(), |_| false);
        assert_eq!(v, Verdict::Licensed);
    }

    #[test]
    fn fold_order_does_not_change_result() {
        let pass = |e: &str| e == "collection";
        assert_eq!(
            fold_verdict(["plugin", "collection"], pass),
            fold_verdict(["collection", "plugin"], pass)
        );
    }
}
