//! Host capability list (LV2 feature array) as seen by the license core.
//!
//! The list is read-only and only ever searched for the licensing feature.
//! Every other entry is carried as an opaque address.

use std::ffi::{c_void, CStr};

use tracing::{debug, warn};

use crate::ffi::{HostLicenseFeature, RawFeature};

/// Identifier of the host licensing capability.
pub const LICENSE_FEATURE_URI: &str = "http://moddevices.com/ns/ext/license#feature";

/// Something that can tell whether an entitlement is licensed.
///
/// Implemented by the host feature in [`crate::ffi`]; tests and non-LV2 hosts
/// provide their own.
pub trait LicenseService {
    /// Verify `entitlement` (a plugin or collection URI).
    fn check(&self, entitlement: &str) -> bool;
}

/// Payload of a single capability entry.
#[derive(Clone, Copy)]
pub enum CapabilityData<'a> {
    /// The licensing capability, resolved to a callable service.
    Licensing(&'a dyn LicenseService),
    /// Any other host feature. Never dereferenced here.
    Opaque(*const c_void),
}

impl std::fmt::Debug for CapabilityData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityData::Licensing(_) => f.write_str("Licensing(..)"),
            CapabilityData::Opaque(p) => write!(f, "Opaque({p:p})"),
        }
    }
}

/// One (identifier, data) pair from the host.
#[derive(Debug, Clone, Copy)]
pub struct Capability<'a> {
    pub uri: &'a str,
    pub data: CapabilityData<'a>,
}

impl<'a> Capability<'a> {
    /// Licensing capability backed by `service`.
    pub fn licensing(service: &'a dyn LicenseService) -> Self {
        Self {
            uri: LICENSE_FEATURE_URI,
            data: CapabilityData::Licensing(service),
        }
    }

    /// Unrelated host feature.
    pub fn opaque(uri: &'a str, data: *const c_void) -> Self {
        Self {
            uri,
            data: CapabilityData::Opaque(data),
        }
    }
}

/// Ordered capability list supplied at instantiation.
#[derive(Debug, Default)]
pub struct CapabilityList<'a> {
    entries: Vec<Capability<'a>>,
}

impl<'a> CapabilityList<'a> {
    pub fn new(entries: impl IntoIterator<Item = Capability<'a>>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// A host that offers nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability<'a>> {
        self.entries.iter()
    }

    /// First entry whose identifier equals `uri`.
    pub fn find(&self, uri: &str) -> Option<&Capability<'a>> {
        self.entries.iter().find(|c| c.uri == uri)
    }

    /// The licensing service, if the host provides one.
    ///
    /// An entry carrying the licensing identifier but opaque data does not
    /// count: there is nothing callable behind it.
    pub fn licensing(&self) -> Option<&'a dyn LicenseService> {
        self.entries
            .iter()
            .filter(|c| c.uri == LICENSE_FEATURE_URI)
            .find_map(|c| match c.data {
                CapabilityData::Licensing(service) => Some(service),
                CapabilityData::Opaque(_) => None,
            })
    }

    /// Read a null-terminated host feature array.
    ///
    /// A null array is an empty list. The walk stops at the first null entry
    /// or null identifier. Identifiers that are not UTF-8 are skipped, and a
    /// licensing entry with null data is dropped (treated as absent).
    ///
    /// # Safety
    /// `features` must be null or point to a null-terminated array of valid
    /// feature pointers, each with a valid C string identifier, all of which
    /// (and the licensing feature's callbacks) stay alive and unmodified for
    /// `'a`. The licensing entry's data must point to a [`HostLicenseFeature`].
    pub unsafe fn from_raw(features: *const *const RawFeature) -> Self {
        let mut entries = Vec::new();
        if features.is_null() {
            return Self { entries };
        }

        let mut cursor = features;
        loop {
            let Some(raw) = (*cursor).as_ref() else { break };
            if raw.uri.is_null() {
                break;
            }
            cursor = cursor.add(1);

            let Ok(uri) = CStr::from_ptr(raw.uri).to_str() else {
                warn!("skipping host feature with non-utf8 uri");
                continue;
            };

            if uri == LICENSE_FEATURE_URI {
                match (raw.data as *const HostLicenseFeature).as_ref() {
                    Some(host) => entries.push(Capability::licensing(host)),
                    None => warn!(uri, "licensing feature without data, ignoring"),
                }
            } else {
                entries.push(Capability::opaque(uri, raw.data));
            }
        }

        debug!(count = entries.len(), "host capabilities read");
        Self { entries }
    }
}
