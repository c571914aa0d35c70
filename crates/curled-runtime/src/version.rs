//! libcurl version reporting
//!
//! `library_version()` parses the `curl_version()` banner,
//! `library_version_info()` decodes the `curl_version_info_data` record.

use crate::constants::*;
use crate::error::{CurlError, CurlResult};
use crate::ffi::types::CurlVersionInfoData;
use crate::library::Library;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::CStr;
use std::os::raw::c_char;

/// Feature bits of `curl_version_info_data.features`, by name
pub const FEATURE_NAMES: &[(&str, i32)] = &[
    ("IPV6", CURL_VERSION_IPV6),
    ("KERBEROS4", CURL_VERSION_KERBEROS4),
    ("SSL", CURL_VERSION_SSL),
    ("LIBZ", CURL_VERSION_LIBZ),
    ("NTLM", CURL_VERSION_NTLM),
    ("GSSNEGOTIATE", CURL_VERSION_GSSNEGOTIATE),
    ("DEBUG", CURL_VERSION_DEBUG),
    ("CURLDEBUG", CURL_VERSION_CURLDEBUG),
    ("ASYNCHDNS", CURL_VERSION_ASYNCHDNS),
    ("SPNEGO", CURL_VERSION_SPNEGO),
    ("LARGEFILE", CURL_VERSION_LARGEFILE),
    ("IDN", CURL_VERSION_IDN),
    ("SSPI", CURL_VERSION_SSPI),
    ("CONV", CURL_VERSION_CONV),
];

/// Decoded `curl_version_info_data`
///
/// Component fields the library's record is too old to carry are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionInfo {
    pub age: i32,
    pub version: String,
    /// (major, minor, patch) unpacked from the 24-bit `version_num`
    pub version_num: (u8, u8, u8),
    pub host: String,
    pub features: BTreeMap<String, bool>,
    pub ssl_version: Option<String>,
    pub ssl_version_num: i64,
    pub libz_version: Option<String>,
    pub protocols: Vec<String>,
    pub ares: Option<String>,
    pub ares_num: Option<i32>,
    pub libidn: Option<String>,
    pub iconv_ver_num: Option<i32>,
    pub libssh_version: Option<String>,
}

impl VersionInfo {
    /// Whether the named feature (e.g. "SSL") is enabled
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    pub fn supports_protocol(&self, protocol: &str) -> bool {
        self.protocols.iter().any(|p| p.eq_ignore_ascii_case(protocol))
    }
}

/// Component → version map from the `curl_version()` banner
///
/// `"libcurl/7.19.7 OpenSSL/0.9.8k zlib/1.2.3.3"` becomes
/// `{"libcurl": "7.19.7", "OpenSSL": "0.9.8k", "zlib": "1.2.3.3"}`.
/// Words without a `/` map to an empty version.
pub fn library_version(library: &Library) -> BTreeMap<String, String> {
    parse_version_banner(&library.native().version())
}

pub fn parse_version_banner(banner: &str) -> BTreeMap<String, String> {
    banner
        .split_whitespace()
        .map(|word| match word.split_once('/') {
            Some((name, version)) => (name.to_string(), version.to_string()),
            None => (word.to_string(), String::new()),
        })
        .collect()
}

/// Decode `curl_version_info(CURLVERSION_FOURTH)`
pub fn library_version_info(library: &Library) -> CurlResult<VersionInfo> {
    let record = library.native().version_info(CURLVERSION_FOURTH);
    if record.is_null() {
        return Err(CurlError::NativeFailure {
            operation: "curl_version_info",
            code: CURLE_FAILED_INIT,
            selector: None,
            message: "curl_version_info returned null".to_string(),
        });
    }
    // SAFETY: non-null records are static data owned by the library
    Ok(unsafe { decode_version_info(&*record) })
}

/// Unpack a 0xMMmmpp version number
pub fn unpack_version_num(num: u32) -> (u8, u8, u8) {
    (
        ((num >> 16) & 0xff) as u8,
        ((num >> 8) & 0xff) as u8,
        (num & 0xff) as u8,
    )
}

/// Named view of a feature bitmask
pub fn feature_flags(bits: i32) -> BTreeMap<String, bool> {
    FEATURE_NAMES
        .iter()
        .map(|&(name, bit)| (name.to_string(), bits & bit != 0))
        .collect()
}

/// # Safety
///
/// Every non-null pointer in `data` must reference a NUL-terminated string,
/// and `protocols` must be a NULL-terminated array. Fields beyond `age` are
/// not read.
unsafe fn decode_version_info(data: &CurlVersionInfoData) -> VersionInfo {
    let age = data.age;
    let at_least = |required: i32| age >= required;

    VersionInfo {
        age,
        version: opt_string(data.version).unwrap_or_default(),
        version_num: unpack_version_num(data.version_num),
        host: opt_string(data.host).unwrap_or_default(),
        features: feature_flags(data.features),
        ssl_version: opt_string(data.ssl_version),
        ssl_version_num: data.ssl_version_num as i64,
        libz_version: opt_string(data.libz_version),
        protocols: string_array(data.protocols),
        ares: if at_least(CURLVERSION_SECOND) { opt_string(data.ares) } else { None },
        ares_num: at_least(CURLVERSION_SECOND).then_some(data.ares_num),
        libidn: if at_least(CURLVERSION_THIRD) { opt_string(data.libidn) } else { None },
        iconv_ver_num: at_least(CURLVERSION_FOURTH).then_some(data.iconv_ver_num),
        libssh_version: if at_least(CURLVERSION_FOURTH) {
            opt_string(data.libssh_version)
        } else {
            None
        },
    }
}

unsafe fn opt_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

unsafe fn string_array(mut ptr: *const *const c_char) -> Vec<String> {
    let mut out = Vec::new();
    if ptr.is_null() {
        return out;
    }
    while !(*ptr).is_null() {
        out.push(CStr::from_ptr(*ptr).to_string_lossy().into_owned());
        ptr = ptr.add(1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_version_banner() {
        let parsed = parse_version_banner("libcurl/7.19.7 OpenSSL/0.9.8k zlib/1.2.3.3 libidn/1.15");
        assert_eq!(parsed.get("libcurl").map(String::as_str), Some("7.19.7"));
        assert_eq!(parsed.get("OpenSSL").map(String::as_str), Some("0.9.8k"));
        assert_eq!(parsed.len(), 4);
    }

    #[test]
    fn test_parse_banner_without_slash() {
        let parsed = parse_version_banner("libcurl/8.5.0 (SecureTransport)");
        assert_eq!(parsed.get("(SecureTransport)").map(String::as_str), Some(""));
    }

    #[test]
    fn test_unpack_version_num() {
        assert_eq!(unpack_version_num(0x071307), (7, 19, 7));
        assert_eq!(unpack_version_num(0x080500), (8, 5, 0));
    }

    #[test]
    fn test_feature_flags() {
        let flags = feature_flags(CURL_VERSION_SSL | CURL_VERSION_IPV6);
        assert_eq!(flags.get("SSL"), Some(&true));
        assert_eq!(flags.get("IPV6"), Some(&true));
        assert_eq!(flags.get("LIBZ"), Some(&false));
        assert_eq!(flags.len(), FEATURE_NAMES.len());
    }
}
