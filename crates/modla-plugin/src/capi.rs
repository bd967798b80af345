//! C ABI compatible with the `mod_license_*` header.
//!
//! The header keeps no per-instance license object: callers hold a
//! `uint32_t run_count` and `mod_license_run_silence` gets no verdict. The
//! verdict therefore lives in a process-wide latch:
//! - starts `Unchecked` (permissive),
//! - every failing check latches `Unlicensed`, whatever passed before it,
//! - a passing check latches `Licensed`.
//!
//! So the latest check decides. A plugin checks its own uri, then its
//! collections, and stops at the first pass, so for one instance the latest
//! check is its verdict. Across instances this fails closed in instantiation
//! order: a licensed instance never unmutes an unlicensed one created after
//! it. The header carries no instance identity, so an unlicensed instance
//! followed by a licensed one looks exactly like a plugin whose own uri
//! failed and whose collection passed; that case reads `Licensed`. Plugins
//! needing a per-instance verdict use [`crate::LicenseApi`].
//!
//! Reading the latch is a single atomic load, fine on the audio thread.

use std::ffi::{c_char, c_void, CStr};
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicU8, Ordering};

use modla_core::capability::CapabilityList;
use modla_core::ffi::RawFeature;
use modla_core::{clock, entitlement, extension, gate, version, GateTiming};

use crate::LICENSING_ENABLED;

/// State of the process-wide verdict latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Latch {
    Unchecked = 0,
    Unlicensed = 1,
    Licensed = 2,
}

static LATCH: AtomicU8 = AtomicU8::new(Latch::Unchecked as u8);

/// Current latch state.
pub fn latch() -> Latch {
    match LATCH.load(Ordering::Acquire) {
        1 => Latch::Unlicensed,
        2 => Latch::Licensed,
        _ => Latch::Unchecked,
    }
}

fn record(licensed: bool) {
    let state = if licensed {
        Latch::Licensed
    } else {
        Latch::Unlicensed
    };
    LATCH.store(state as u8, Ordering::Release);
}

/// Check the license for a plugin or collection uri. Call from
/// `instantiate()`, once per uri; stop at the first `true`.
///
/// # Safety
/// `features` must satisfy [`CapabilityList::from_raw`]; `license_uri` must be
/// null or a valid C string.
#[no_mangle]
pub unsafe extern "C" fn mod_license_check(
    features: *const *const RawFeature,
    license_uri: *const c_char,
) -> bool {
    if !LICENSING_ENABLED {
        record(true);
        return true;
    }
    let licensed = if license_uri.is_null() {
        tracing::warn!("mod_license_check called with null uri");
        false
    } else {
        match CStr::from_ptr(license_uri).to_str() {
            Ok(uri) => {
                let capabilities = CapabilityList::from_raw(features);
                entitlement::check(&capabilities, uri)
            }
            Err(_) => {
                tracing::warn!("mod_license_check called with non-utf8 uri");
                false
            }
        }
    };
    record(licensed);
    licensed
}

/// Count this block's samples; store the result as the new `run_count`.
#[no_mangle]
pub extern "C" fn mod_license_run_begin(run_count: u32, n_samples: u32) -> u32 {
    clock::advance(run_count, n_samples)
}

/// Silence `buf` if the process is unlicensed. Call at the end of `run()`
/// for every audio output, `chn` being the output index.
///
/// The header passes no sample rate, so the fade is the default 480 samples
/// (10 ms at 48 kHz): 5 ms at 96 kHz, about 11 ms at 44.1 kHz. Repeated calls
/// on the same buffer for the same `run_count` leave it unchanged.
///
/// # Safety
/// `buf` must be null or valid for `n_samples` writes of `f32`.
#[no_mangle]
pub unsafe extern "C" fn mod_license_run_silence(
    run_count: u32,
    buf: *mut f32,
    n_samples: u32,
    _chn: u32,
) {
    if buf.is_null() || latch() != Latch::Unlicensed {
        return;
    }
    let buf = slice::from_raw_parts_mut(buf, n_samples as usize);
    gate::silence(GateTiming::default(), run_count, buf);
}

/// Retired noise injection, kept so old callers still link. Injects silence.
///
/// # Safety
/// Same as [`mod_license_run_silence`].
#[deprecated(since = "1.2.0", note = "use mod_license_run_silence")]
#[no_mangle]
pub unsafe extern "C" fn mod_license_run_noise(
    run_count: u32,
    buf: *mut f32,
    n_samples: u32,
    chn: u32,
) {
    mod_license_run_silence(run_count, buf, n_samples, chn);
}

/// License interface for the plugin's `extension_data`, or null.
///
/// # Safety
/// `uri` must be null or a valid C string.
#[no_mangle]
pub unsafe extern "C" fn mod_license_interface(uri: *const c_char) -> *const c_void {
    if uri.is_null() {
        return ptr::null();
    }
    extension::lookup_cstr(CStr::from_ptr(uri)).map_or(ptr::null(), |h| h.as_ptr())
}

/// Library version as a static C string.
#[no_mangle]
pub extern "C" fn mod_license_version() -> *const c_char {
    version::version_ptr()
}
