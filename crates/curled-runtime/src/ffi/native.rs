//! The native capability consumed by sessions
//!
//! `NativeCurl` is the narrow slice of libcurl the runtime calls. `LibCurl`
//! implements it over a dynamically loaded shared object; tests implement it
//! with an in-process stub.

use crate::ffi::types::{
    AbiValue, CurlCode, CurlSlist, CurlVersionInfoData, EasyHandle, InfoSlot,
};
use std::os::raw::{c_char, c_int, c_long};

/// libcurl entry points used by the bindings
///
/// # Safety
///
/// Implementations hand raw pointers to and from C. Methods taking a handle
/// require a pointer previously returned by `easy_init` and not yet passed to
/// `easy_cleanup`.
pub trait NativeCurl: Send + Sync {
    /// `curl_global_init`
    fn global_init(&self, flags: c_long) -> CurlCode;

    /// `curl_global_cleanup`
    fn global_cleanup(&self);

    /// `curl_easy_init`; null on failure
    fn easy_init(&self) -> EasyHandle;

    /// `curl_easy_cleanup`
    ///
    /// # Safety
    ///
    /// `handle` must be live; it is dangling afterwards.
    unsafe fn easy_cleanup(&self, handle: EasyHandle);

    /// `curl_easy_reset`
    ///
    /// # Safety
    ///
    /// `handle` must be live.
    unsafe fn easy_reset(&self, handle: EasyHandle);

    /// `curl_easy_setopt`
    ///
    /// # Safety
    ///
    /// `handle` must be live, and pointer values must stay valid for as long
    /// as the option is installed.
    unsafe fn easy_setopt(&self, handle: EasyHandle, option: c_int, value: AbiValue)
        -> CurlCode;

    /// `curl_easy_getinfo`
    ///
    /// # Safety
    ///
    /// `handle` must be live and `slot` must match the selector's class.
    unsafe fn easy_getinfo(&self, handle: EasyHandle, info: c_int, slot: InfoSlot<'_>)
        -> CurlCode;

    /// `curl_easy_perform`; callbacks run on the calling thread
    ///
    /// # Safety
    ///
    /// `handle` must be live and every installed pointer option valid.
    unsafe fn easy_perform(&self, handle: EasyHandle) -> CurlCode;

    /// `curl_easy_strerror`
    fn easy_strerror(&self, code: CurlCode) -> String;

    /// `curl_slist_append`; null on allocation failure
    ///
    /// # Safety
    ///
    /// `list` must be null or a list built by this capability; `data` must be
    /// NUL-terminated.
    unsafe fn slist_append(&self, list: *mut CurlSlist, data: *const c_char) -> *mut CurlSlist;

    /// `curl_slist_free_all`
    ///
    /// # Safety
    ///
    /// `list` must be null or a list built by this capability, not freed before.
    unsafe fn slist_free_all(&self, list: *mut CurlSlist);

    /// `curl_version`
    fn version(&self) -> String;

    /// `curl_version_info`; the record is owned by the library
    fn version_info(&self, age: c_int) -> *const CurlVersionInfoData;
}
