//! Dynamic loading of libcurl
//!
//! Resolves the shared object from an explicit path, the
//! `LIBCURL_LIBRARY_PATH` environment variable, configured search
//! directories, the platform's standard library directories, and finally the
//! system loader's own search. Entry points are bound once with `libloading`.

use crate::ffi::native::NativeCurl;
use crate::ffi::types::{
    AbiValue, CurlCode, CurlSlist, CurlVersionInfoData, EasyHandle, InfoSlot,
};
use curled_config::LibraryConfig;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_long};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Library loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// No candidate file could be loaded
    #[error("libcurl not found (searched: {searched})")]
    LibraryNotFound { searched: String },

    /// A required entry point is missing
    #[error("symbol '{symbol}' not found in '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    /// The file exists but the dynamic loader rejected it
    #[error("failed to load '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

type GlobalInitFn = unsafe extern "C" fn(c_long) -> CurlCode;
type GlobalCleanupFn = unsafe extern "C" fn();
type EasyInitFn = unsafe extern "C" fn() -> EasyHandle;
type EasyHandleFn = unsafe extern "C" fn(EasyHandle);
type EasySetoptFn = unsafe extern "C" fn(EasyHandle, c_int, ...) -> CurlCode;
type EasyGetinfoFn = unsafe extern "C" fn(EasyHandle, c_int, ...) -> CurlCode;
type EasyPerformFn = unsafe extern "C" fn(EasyHandle) -> CurlCode;
type EasyStrerrorFn = unsafe extern "C" fn(CurlCode) -> *const c_char;
type SlistAppendFn = unsafe extern "C" fn(*mut CurlSlist, *const c_char) -> *mut CurlSlist;
type SlistFreeAllFn = unsafe extern "C" fn(*mut CurlSlist);
type VersionFn = unsafe extern "C" fn() -> *const c_char;
type VersionInfoFn = unsafe extern "C" fn(c_int) -> *const CurlVersionInfoData;

/// libcurl bound through `libloading`
pub struct LibCurl {
    path: PathBuf,
    global_init: GlobalInitFn,
    global_cleanup: GlobalCleanupFn,
    easy_init: EasyInitFn,
    easy_cleanup: EasyHandleFn,
    easy_reset: EasyHandleFn,
    easy_setopt: EasySetoptFn,
    easy_getinfo: EasyGetinfoFn,
    easy_perform: EasyPerformFn,
    easy_strerror: EasyStrerrorFn,
    slist_append: SlistAppendFn,
    slist_free_all: SlistFreeAllFn,
    version: VersionFn,
    version_info: VersionInfoFn,
    // Keeps every function pointer above valid
    _library: libloading::Library,
}

impl LibCurl {
    /// Load libcurl from a specific file
    ///
    /// # Safety note
    ///
    /// Loading runs the library's initializers in this process. Only point
    /// this at a trusted libcurl build.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
            LoadError::LoadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        Self::bind(library, path.to_path_buf())
    }

    /// Locate and load libcurl according to `config`
    pub fn locate(config: &LibraryConfig) -> Result<Self, LoadError> {
        if let Some(path) = &config.path {
            return Self::open(path);
        }
        if let Some(path) = std::env::var_os("LIBCURL_LIBRARY_PATH") {
            if !path.is_empty() {
                return Self::open(Path::new(&path));
            }
        }

        let mut directories = config.search_paths.clone();
        directories.extend(default_search_paths());

        for directory in &directories {
            for name in candidate_names() {
                let candidate = directory.join(name);
                if candidate.exists() {
                    debug!(path = %candidate.display(), "found libcurl candidate");
                    return Self::open(&candidate);
                }
            }
        }

        // Fall back to the platform loader's own search (ld.so.cache etc.)
        for name in candidate_names() {
            if let Ok(library) = unsafe { libloading::Library::new(name) } {
                return Self::bind(library, PathBuf::from(name));
            }
        }

        Err(LoadError::LibraryNotFound {
            searched: directories
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Path or soname this instance was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn bind(library: libloading::Library, path: PathBuf) -> Result<Self, LoadError> {
        let name = path.display().to_string();
        unsafe {
            let curl = LibCurl {
                global_init: symbol(&library, &name, "curl_global_init")?,
                global_cleanup: symbol(&library, &name, "curl_global_cleanup")?,
                easy_init: symbol(&library, &name, "curl_easy_init")?,
                easy_cleanup: symbol(&library, &name, "curl_easy_cleanup")?,
                easy_reset: symbol(&library, &name, "curl_easy_reset")?,
                easy_setopt: symbol(&library, &name, "curl_easy_setopt")?,
                easy_getinfo: symbol(&library, &name, "curl_easy_getinfo")?,
                easy_perform: symbol(&library, &name, "curl_easy_perform")?,
                easy_strerror: symbol(&library, &name, "curl_easy_strerror")?,
                slist_append: symbol(&library, &name, "curl_slist_append")?,
                slist_free_all: symbol(&library, &name, "curl_slist_free_all")?,
                version: symbol(&library, &name, "curl_version")?,
                version_info: symbol(&library, &name, "curl_version_info")?,
                path,
                _library: library,
            };
            info!(path = %curl.path.display(), "loaded libcurl");
            Ok(curl)
        }
    }
}

/// Look up a function symbol and copy out the pointer
///
/// # Safety
///
/// `T` must match the symbol's real signature, and the pointer must not
/// outlive `library`.
unsafe fn symbol<T: Copy>(
    library: &libloading::Library,
    library_name: &str,
    symbol_name: &str,
) -> Result<T, LoadError> {
    library
        .get::<T>(symbol_name.as_bytes())
        .map(|sym| *sym)
        .map_err(|_| LoadError::SymbolNotFound {
            library: library_name.to_string(),
            symbol: symbol_name.to_string(),
        })
}

/// File names tried in each search directory, most specific first
fn candidate_names() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["libcurl.dll", "libcurl-x64.dll", "curl.dll"]
    } else if cfg!(target_os = "macos") {
        &["libcurl.4.dylib", "libcurl.dylib"]
    } else {
        &["libcurl.so.4", "libcurl.so", "libcurl-gnutls.so.4"]
    }
}

/// Platform-specific library directories
fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    #[cfg(target_os = "linux")]
    {
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/usr/lib"));
        paths.push(PathBuf::from("/lib"));

        if cfg!(target_pointer_width = "64") {
            paths.push(PathBuf::from("/usr/lib64"));
            paths.push(PathBuf::from("/lib64"));
        }
        if cfg!(target_arch = "x86_64") {
            paths.push(PathBuf::from("/usr/lib/x86_64-linux-gnu"));
        }
        if cfg!(target_arch = "aarch64") {
            paths.push(PathBuf::from("/usr/lib/aarch64-linux-gnu"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/opt/homebrew/opt/curl/lib"));
        paths.push(PathBuf::from("/usr/local/opt/curl/lib"));
        paths.push(PathBuf::from("/usr/lib"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(system_root) = std::env::var("SystemRoot") {
            paths.push(PathBuf::from(format!("{}\\System32", system_root)));
        }
    }

    paths
}

impl NativeCurl for LibCurl {
    fn global_init(&self, flags: c_long) -> CurlCode {
        unsafe { (self.global_init)(flags) }
    }

    fn global_cleanup(&self) {
        unsafe { (self.global_cleanup)() }
    }

    fn easy_init(&self) -> EasyHandle {
        unsafe { (self.easy_init)() }
    }

    unsafe fn easy_cleanup(&self, handle: EasyHandle) {
        (self.easy_cleanup)(handle)
    }

    unsafe fn easy_reset(&self, handle: EasyHandle) {
        (self.easy_reset)(handle)
    }

    unsafe fn easy_setopt(&self, handle: EasyHandle, option: c_int, value: AbiValue) -> CurlCode {
        match value {
            AbiValue::Long(v) => (self.easy_setopt)(handle, option, v),
            AbiValue::OffT(v) => (self.easy_setopt)(handle, option, v),
            AbiValue::Ptr(p) => (self.easy_setopt)(handle, option, p),
        }
    }

    unsafe fn easy_getinfo(&self, handle: EasyHandle, info: c_int, slot: InfoSlot<'_>) -> CurlCode {
        match slot {
            InfoSlot::Long(out) => (self.easy_getinfo)(handle, info, out as *mut c_long),
            InfoSlot::Double(out) => (self.easy_getinfo)(handle, info, out as *mut f64),
            InfoSlot::Str(out) => (self.easy_getinfo)(handle, info, out as *mut *const c_char),
            InfoSlot::List(out) => (self.easy_getinfo)(handle, info, out as *mut *mut CurlSlist),
        }
    }

    unsafe fn easy_perform(&self, handle: EasyHandle) -> CurlCode {
        (self.easy_perform)(handle)
    }

    fn easy_strerror(&self, code: CurlCode) -> String {
        unsafe { c_string_or_empty((self.easy_strerror)(code)) }
    }

    unsafe fn slist_append(&self, list: *mut CurlSlist, data: *const c_char) -> *mut CurlSlist {
        (self.slist_append)(list, data)
    }

    unsafe fn slist_free_all(&self, list: *mut CurlSlist) {
        (self.slist_free_all)(list)
    }

    fn version(&self) -> String {
        unsafe { c_string_or_empty((self.version)()) }
    }

    fn version_info(&self, age: c_int) -> *const CurlVersionInfoData {
        unsafe { (self.version_info)(age) }
    }
}

unsafe fn c_string_or_empty(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let result = LibCurl::open(Path::new("/nonexistent/libcurl.so.4"));
        assert!(matches!(result, Err(LoadError::LoadFailed { .. })));
    }

    #[test]
    fn test_explicit_path_wins() {
        let config = LibraryConfig {
            path: Some(PathBuf::from("/nonexistent/custom/libcurl.so")),
            ..Default::default()
        };
        match LibCurl::locate(&config) {
            Err(LoadError::LoadFailed { path, .. }) => {
                assert_eq!(path, "/nonexistent/custom/libcurl.so")
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("loaded a library from a missing path"),
        }
    }

    #[test]
    fn test_libcurl_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LibCurl>();
    }

    #[test]
    fn test_candidate_names_nonempty() {
        assert!(!candidate_names().is_empty());
        assert!(candidate_names().iter().all(|n| n.contains("curl")));
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::SymbolNotFound {
            library: "libcurl.so.4".to_string(),
            symbol: "curl_easy_init".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "symbol 'curl_easy_init' not found in 'libcurl.so.4'"
        );
    }
}
