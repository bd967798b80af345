//! C layouts shared with the plugin host.

use std::ffi::{c_char, c_void, CStr, CString};

use crate::capability::LicenseService;

/// `LV2_Feature`: one entry of the host's null-terminated feature array.
#[repr(C)]
#[derive(Debug)]
pub struct RawFeature {
    pub uri: *const c_char,
    pub data: *mut c_void,
}

/// Host callback returning the license file for a URI, or null.
pub type LicenseFn = unsafe extern "C" fn(handle: *mut c_void, uri: *const c_char) -> *mut c_char;

/// Host callback releasing a string returned by [`LicenseFn`].
pub type FreeFn = unsafe extern "C" fn(handle: *mut c_void, license: *mut c_char);

/// Licensing feature data as published by the host.
///
/// `license` hands back the contents of the license file for a plugin or
/// collection URI (signed and encrypted by the host's licensing service), or
/// null when none exists. Whatever it returns, null included, is handed back
/// to `free`.
#[repr(C)]
#[derive(Debug)]
pub struct HostLicenseFeature {
    handle: *mut c_void,
    license: Option<LicenseFn>,
    free: Option<FreeFn>,
}

impl HostLicenseFeature {
    /// # Safety
    /// `license` and `free` must be safe to call with `handle` for as long as
    /// the returned value lives, and `license` must return null or a valid C
    /// string that stays readable until passed to `free`.
    pub unsafe fn new(handle: *mut c_void, license: Option<LicenseFn>, free: Option<FreeFn>) -> Self {
        Self {
            handle,
            license,
            free,
        }
    }

    /// Ask the host for the license file of `uri`.
    ///
    /// `None` when the host has no license, when a callback is missing, or
    /// when `uri` cannot be passed as a C string.
    pub fn licensee(&self, uri: &str) -> Option<String> {
        let license_fn = self.license?;
        let free_fn = self.free?;
        let uri = CString::new(uri).ok()?;

        // SAFETY: callbacks and handle are valid per the constructor contract
        // (or the host feature array contract in `CapabilityList::from_raw`).
        // Every `license` call is paired with `free`, null result included.
        unsafe {
            let ptr = license_fn(self.handle, uri.as_ptr());
            let license = if ptr.is_null() {
                None
            } else {
                Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
            };
            free_fn(self.handle, ptr);
            license
        }
    }
}

impl LicenseService for HostLicenseFeature {
    /// A non-empty license file from the host counts as licensed. Decrypting
    /// and validating its contents is the host licensing service's job.
    fn check(&self, entitlement: &str) -> bool {
        self.licensee(entitlement)
            .is_some_and(|license| !license.is_empty())
    }
}
