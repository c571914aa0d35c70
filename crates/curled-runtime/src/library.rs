//! Process-wide libcurl state
//!
//! A `Library` owns one native capability and tracks whether
//! `curl_global_init` has run on it. Sessions hold it through an `Arc`, so
//! cleanup can only happen once every session is gone.
//!
//! `Library::system()` is the shared instance used by `Session::create()`.
//! It is loaded at most once per process and its `curl_global_cleanup` is
//! registered with `atexit` the first time it is loaded.

use crate::constants::{
    CURLE_FAILED_INIT, CURLE_OK, CURL_GLOBAL_ALL, CURL_GLOBAL_NOTHING, CURL_GLOBAL_SSL,
    CURL_GLOBAL_WIN32,
};
use crate::error::{CurlError, CurlResult};
use crate::ffi::loader::{LibCurl, LoadError};
use crate::ffi::native::NativeCurl;
use curled_config::{GlobalFlags, LibraryConfig};
use std::os::raw::c_long;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{debug, info};

static SYSTEM: OnceLock<Result<Arc<Library>, LoadError>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlobalState {
    Uninitialized,
    Initialized,
    CleanedUp,
}

/// A loaded libcurl plus its global init state
pub struct Library {
    native: Box<dyn NativeCurl>,
    flags: c_long,
    state: Mutex<GlobalState>,
    cleanup_on_drop: bool,
}

/// `curl_global_init` bits for a configured flag set
pub fn global_flag_bits(flags: GlobalFlags) -> c_long {
    let bits = match flags {
        GlobalFlags::All => CURL_GLOBAL_ALL,
        GlobalFlags::Ssl => CURL_GLOBAL_SSL,
        GlobalFlags::Win32 => CURL_GLOBAL_WIN32,
        GlobalFlags::Nothing => CURL_GLOBAL_NOTHING,
    };
    bits as c_long
}

impl Library {
    /// Wrap a capability. Global init is deferred to the first session.
    pub fn new(native: impl NativeCurl + 'static) -> Self {
        Self::from_boxed(Box::new(native))
    }

    pub fn from_boxed(native: Box<dyn NativeCurl>) -> Self {
        Self {
            native,
            flags: CURL_GLOBAL_ALL as c_long,
            state: Mutex::new(GlobalState::Uninitialized),
            cleanup_on_drop: true,
        }
    }

    /// Use `flags` for `curl_global_init` instead of `CURL_GLOBAL_ALL`
    pub fn with_flags(mut self, flags: GlobalFlags) -> Self {
        self.flags = global_flag_bits(flags);
        self
    }

    /// Load libcurl as described by `config`
    pub fn load(config: &LibraryConfig) -> CurlResult<Self> {
        let curl = LibCurl::locate(config)?;
        Ok(Self::new(curl).with_flags(config.global_flags.unwrap_or_default()))
    }

    /// The process-wide instance, loaded on first use
    ///
    /// Honors `LIBCURL_LIBRARY_PATH`. Its global cleanup runs from an
    /// `atexit` handler, never on drop.
    pub fn system() -> CurlResult<Arc<Library>> {
        let loaded = SYSTEM.get_or_init(|| {
            let curl = LibCurl::locate(&LibraryConfig::default())?;
            let mut library = Library::new(curl);
            library.cleanup_on_drop = false;
            // SAFETY: registering a plain extern "C" fn with no captured state
            unsafe {
                libc::atexit(cleanup_system_library);
            }
            Ok(Arc::new(library))
        });
        match loaded {
            Ok(library) => Ok(Arc::clone(library)),
            Err(e) => Err(CurlError::Load(e.clone())),
        }
    }

    pub fn native(&self) -> &dyn NativeCurl {
        self.native.as_ref()
    }

    pub fn flags(&self) -> c_long {
        self.flags
    }

    /// Run `curl_global_init` unless it already succeeded
    ///
    /// A failed init leaves the library uninitialized so a later call can
    /// retry. Init after cleanup is refused.
    pub fn ensure_init(&self) -> CurlResult<()> {
        let mut state = self.lock_state();
        match *state {
            GlobalState::Initialized => Ok(()),
            GlobalState::CleanedUp => Err(CurlError::Capability {
                operation: "curl_global_init",
                code: CURLE_FAILED_INIT,
                selector: None,
            }),
            GlobalState::Uninitialized => {
                let code = self.native.global_init(self.flags);
                if code != CURLE_OK {
                    return Err(CurlError::NativeFailure {
                        operation: "curl_global_init",
                        code,
                        selector: None,
                        message: self.native.easy_strerror(code),
                    });
                }
                info!(flags = self.flags, "libcurl globally initialized");
                *state = GlobalState::Initialized;
                Ok(())
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        *self.lock_state() == GlobalState::Initialized
    }

    /// Run `curl_global_cleanup` if init ran and cleanup has not
    pub fn cleanup(&self) {
        let mut state = self.lock_state();
        if *state == GlobalState::Initialized {
            self.native.global_cleanup();
            *state = GlobalState::CleanedUp;
            info!("libcurl global state cleaned up");
        } else {
            debug!(state = ?*state, "skipping global cleanup");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, GlobalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if self.cleanup_on_drop {
            self.cleanup();
        }
    }
}

extern "C" fn cleanup_system_library() {
    if let Some(Ok(library)) = SYSTEM.get() {
        library.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flag_bits() {
        assert_eq!(global_flag_bits(GlobalFlags::All), 3);
        assert_eq!(global_flag_bits(GlobalFlags::Ssl), 1);
        assert_eq!(global_flag_bits(GlobalFlags::Win32), 2);
        assert_eq!(global_flag_bits(GlobalFlags::Nothing), 0);
    }
}
