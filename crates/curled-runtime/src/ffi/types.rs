//! ABI types for the libcurl boundary
//!
//! Defines:
//! - `TypeClass`: the wire type a selector expects
//! - `AbiValue`: an argument passed to `curl_easy_setopt`
//! - `InfoSlot`: an out-parameter passed to `curl_easy_getinfo`
//! - `CurlSlist` / `CurlVersionInfoData`: `#[repr(C)]` mirrors of the
//!   header structs
//!
//! Type mapping:
//! - TypeClass::Bool → AbiValue::Long(0 | 1)
//! - TypeClass::Int → AbiValue::Long(c_long) or AbiValue::OffT(curl_off_t)
//! - TypeClass::CString → AbiValue::Ptr(const char*)
//! - TypeClass::StringList → AbiValue::Ptr(struct curl_slist*)
//! - TypeClass::ReadFn / WriteFn → AbiValue::Ptr(function pointer)
//! - TypeClass::Double → InfoSlot::Double (getinfo only)

use std::fmt;
use std::os::raw::{c_char, c_int, c_long, c_uint, c_void};

/// Opaque `CURL*` easy handle
pub type EasyHandle = *mut c_void;

/// Raw `CURLcode` returned by the easy interface
pub type CurlCode = c_int;

/// `curl_off_t`, a signed 64-bit offset on every supported platform
pub type CurlOffT = i64;

/// Signature shared by read, write and header callbacks:
/// `size_t fn(char *buffer, size_t size, size_t nitems, void *userdata)`
pub type DataCallbackFn =
    extern "C" fn(buffer: *mut c_char, size: usize, nitems: usize, userdata: *mut c_void) -> usize;

/// Wire type expected by an option or info selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Boolean flag passed as a `long` 0 or 1
    Bool,
    /// `long`, or `curl_off_t` for the large-offset options
    Int,
    /// `double`, info only
    Double,
    /// NUL-terminated string
    CString,
    /// `struct curl_slist*` of NUL-terminated strings
    StringList,
    /// Callback libcurl reads upload data from
    ReadFn,
    /// Callback libcurl writes received data to
    WriteFn,
}

impl TypeClass {
    /// Get a display name for this class
    pub fn display_name(&self) -> &'static str {
        match self {
            TypeClass::Bool => "bool",
            TypeClass::Int => "int",
            TypeClass::Double => "double",
            TypeClass::CString => "cstring",
            TypeClass::StringList => "strlist",
            TypeClass::ReadFn => "readfn",
            TypeClass::WriteFn => "writefn",
        }
    }

    /// Whether values of this class can be passed to `curl_easy_setopt`
    pub fn has_encoder(&self) -> bool {
        !matches!(self, TypeClass::Double)
    }

    /// Whether values of this class can be read back with `curl_easy_getinfo`
    pub fn has_decoder(&self) -> bool {
        matches!(
            self,
            TypeClass::Int | TypeClass::Double | TypeClass::CString | TypeClass::StringList
        )
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Argument for the variadic slot of `curl_easy_setopt`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbiValue {
    /// `long` argument
    Long(c_long),
    /// `curl_off_t` argument
    OffT(CurlOffT),
    /// Any pointer argument: string, list, function or userdata.
    ///
    /// # Safety
    ///
    /// The pointee must stay valid for as long as the handle may read it.
    /// Lifetime is managed by the session's retention store.
    Ptr(*const c_void),
}

impl AbiValue {
    /// The null pointer argument, used to clear pointer options
    pub const NULL: AbiValue = AbiValue::Ptr(std::ptr::null());
}

/// Out-parameter for `curl_easy_getinfo`, typed by the selector's class
#[derive(Debug)]
pub enum InfoSlot<'a> {
    Long(&'a mut c_long),
    Double(&'a mut f64),
    Str(&'a mut *const c_char),
    List(&'a mut *mut CurlSlist),
}

/// Raw result read out of an `InfoSlot`, before decoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInfo {
    Long(c_long),
    Double(f64),
    Str(*const c_char),
    List(*mut CurlSlist),
}

/// `struct curl_slist`
#[repr(C)]
#[derive(Debug)]
pub struct CurlSlist {
    pub data: *mut c_char,
    pub next: *mut CurlSlist,
}

/// `curl_version_info_data` up to `CURLVERSION_FOURTH`.
///
/// Fields after `protocols` are only present when `age` says so.
#[repr(C)]
#[derive(Debug)]
pub struct CurlVersionInfoData {
    pub age: c_int,
    pub version: *const c_char,
    pub version_num: c_uint,
    pub host: *const c_char,
    pub features: c_int,
    pub ssl_version: *const c_char,
    pub ssl_version_num: c_long,
    pub libz_version: *const c_char,
    pub protocols: *const *const c_char,
    // CURLVERSION_SECOND
    pub ares: *const c_char,
    pub ares_num: c_int,
    // CURLVERSION_THIRD
    pub libidn: *const c_char,
    // CURLVERSION_FOURTH
    pub iconv_ver_num: c_int,
    pub libssh_version: *const c_char,
}
