//! Extension data published to the host (`extension_data` lookups).
//!
//! The host receives an address per identifier and reads it through its own
//! definition of the table. Nothing here is logged or allocated, so lookups
//! are fine from any thread.

use std::ffi::{c_char, c_void, CStr};
use std::ptr::NonNull;

use crate::version;

/// Identifier of the license interface this library publishes.
pub const LICENSE_INTERFACE_URI: &str = "http://moddevices.com/ns/ext/license#interface";

/// Opaque address of a function table. Never dereferenced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionHandle(NonNull<c_void>);

impl ExtensionHandle {
    pub fn as_ptr(self) -> *const c_void {
        self.0.as_ptr()
    }
}

/// Function table behind [`LICENSE_INTERFACE_URI`].
#[repr(C)]
pub struct LicenseInterface {
    pub version: extern "C" fn() -> *const c_char,
}

extern "C" fn interface_version() -> *const c_char {
    version::version_ptr()
}

static LICENSE_INTERFACE: LicenseInterface = LicenseInterface {
    version: interface_version,
};

fn license_interface() -> *const c_void {
    (&LICENSE_INTERFACE as *const LicenseInterface).cast()
}

struct Entry {
    uri: &'static str,
    table: fn() -> *const c_void,
}

static EXTENSIONS: &[Entry] = &[Entry {
    uri: LICENSE_INTERFACE_URI,
    table: license_interface,
}];

/// Function table for `uri`, or `None` for unknown identifiers.
pub fn lookup(uri: &str) -> Option<ExtensionHandle> {
    EXTENSIONS
        .iter()
        .find(|e| e.uri == uri)
        .and_then(|e| NonNull::new((e.table)().cast_mut()))
        .map(ExtensionHandle)
}

/// [`lookup`] for a C identifier; non-UTF-8 identifiers are unknown.
pub fn lookup_cstr(uri: &CStr) -> Option<ExtensionHandle> {
    uri.to_str().ok().and_then(lookup)
}

/// Identifiers this library answers to.
pub fn published() -> impl Iterator<Item = &'static str> {
    EXTENSIONS.iter().map(|e| e.uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown() {
        assert!(lookup("unknown-uri").is_none());
        assert!(lookup("").is_none());
        let h = lookup(LICENSE_INTERFACE_URI).unwrap();
        assert!(!h.as_ptr().is_null());
        assert_eq!(lookup(LICENSE_INTERFACE_URI), Some(h));
    }

    #[test]
    fn every_published_uri_resolves() {
        let uris: Vec<&str> = published().collect();
        assert_eq!(uris, [LICENSE_INTERFACE_URI]);
        assert!(uris.iter().all(|u| lookup(u).is_some()));
    }

    #[test]
    fn cstr_lookup() {
        let uri = std::ffi::CString::new(LICENSE_INTERFACE_URI).unwrap();
        assert!(lookup_cstr(&uri).is_some());
        assert!(lookup_cstr(c"unknown-uri").is_none());
    }
}
