//! Build-time library version.

use std::ffi::c_char;

/// Library version, embedded at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static VERSION_NUL: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

pub fn version() -> &'static str {
    VERSION
}

/// Version as a static, null-terminated C string.
pub fn version_ptr() -> *const c_char {
    VERSION_NUL.as_ptr().cast()
}
