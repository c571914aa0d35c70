//! Transfer sessions
//!
//! A `Session` wraps one libcurl easy handle together with the retention
//! store for everything the handle may dereference. Options go in through
//! `set_option`, results come out through `get_info`, and `perform` runs the
//! transfer on the calling thread.
//!
//! # Example
//!
//! ```no_run
//! use curled_runtime::constants::*;
//! use curled_runtime::{Session, Value};
//!
//! let mut session = Session::create()?;
//! session.set_option(CURLOPT_URL, "http://example.com/")?;
//! session.set_option(CURLOPT_FOLLOWLOCATION, true)?;
//! session.perform()?;
//! let code = session.get_info(CURLINFO_RESPONSE_CODE)?;
//! assert_eq!(code, Value::Int(200));
//! # Ok::<(), curled_runtime::CurlError>(())
//! ```

use crate::constants::{
    self, CURLE_BAD_FUNCTION_ARGUMENT, CURLE_FAILED_INIT, CURLE_NOT_BUILT_IN, CURLE_OK,
    CURLE_UNKNOWN_OPTION, CURLOPT_CONNECTTIMEOUT_MS,
    CURLOPT_FOLLOWLOCATION, CURLOPT_MAXREDIRS, CURLOPT_TIMEOUT_MS, CURLOPT_USERAGENT,
    CURLOPT_VERBOSE,
};
use crate::error::{selector_label, CallbackError, CurlError, CurlResult, Direction};
use crate::ffi::callbacks::{HostCallback, Trampoline};
use crate::ffi::marshal::{decode_for_getinfo, encode_for_setopt, Encoded};
use crate::ffi::retention::{NativeList, RetentionStore};
use crate::ffi::table::{classify_info, classify_option, companion_data};
use crate::ffi::types::{AbiValue, CurlCode, CurlSlist, EasyHandle, InfoSlot, RawInfo, TypeClass};
use crate::library::Library;
use crate::value::Value;
use curled_config::TransferConfig;
use std::ffi::CString;
use std::os::raw::{c_char, c_long};
use std::ptr;
use std::sync::Arc;
use tracing::{debug, warn};

/// One libcurl easy handle and the memory it may reference
///
/// Sessions are single-owner: the raw handle makes them neither `Send` nor
/// `Sync`. Use one session per thread.
pub struct Session {
    library: Arc<Library>,
    handle: EasyHandle,
    store: RetentionStore,
}

impl Session {
    /// Create a session on the process-wide library
    pub fn create() -> CurlResult<Self> {
        Self::with_library(Library::system()?)
    }

    /// Create a session on a specific library, initializing it if needed
    pub fn with_library(library: Arc<Library>) -> CurlResult<Self> {
        library.ensure_init()?;

        let handle = library.native().easy_init();
        if handle.is_null() {
            return Err(CurlError::NativeFailure {
                operation: "curl_easy_init",
                code: CURLE_FAILED_INIT,
                selector: None,
                message: "curl_easy_init returned a null handle".to_string(),
            });
        }
        debug!(?handle, "created easy handle");

        Ok(Self {
            library,
            handle,
            store: RetentionStore::new(),
        })
    }

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    /// Set an option
    ///
    /// On success any memory previously retained for `selector` is released
    /// and the new value's memory retained. On failure nothing is retained
    /// and the previous value stays in place. The one exception is a callback
    /// whose previous `*DATA` value cannot be put back: the new callback is
    /// then kept, since the handle refers to it.
    pub fn set_option(&mut self, selector: i32, value: impl Into<Value>) -> CurlResult<()> {
        let class = classify_option(selector)
            .ok_or_else(|| unclassified(Direction::Option, selector))?;
        let encoded = encode_for_setopt(selector, class, value.into())?;

        debug!(
            option = %selector_label(Direction::Option, selector),
            class = %class,
            "setopt"
        );

        match encoded {
            Encoded::Long(v) => self.setopt(selector, AbiValue::Long(v)),
            Encoded::OffT(v) => self.setopt(selector, AbiValue::OffT(v)),
            Encoded::Text(Some(text)) => {
                self.setopt(selector, AbiValue::Ptr(text.as_ptr().cast()))?;
                self.store.retain_text(selector, text);
                Ok(())
            }
            Encoded::Text(None) => {
                self.setopt(selector, AbiValue::NULL)?;
                self.store.release_buffer(selector);
                Ok(())
            }
            Encoded::List(items) => self.set_list(selector, items),
            Encoded::Callback(Some(callback)) => self.set_callback(selector, callback),
            Encoded::Callback(None) => self.clear_callback(selector),
        }
    }

    fn set_list(&mut self, selector: i32, items: Vec<CString>) -> CurlResult<()> {
        match NativeList::build(&self.library, selector, &items)? {
            Some(list) => {
                self.setopt(selector, AbiValue::Ptr(list.as_ptr().cast_const().cast()))?;
                self.store.retain_list(selector, items, list);
            }
            None => {
                self.setopt(selector, AbiValue::NULL)?;
                self.store.release_buffer(selector);
            }
        }
        Ok(())
    }

    fn set_callback(&mut self, selector: i32, callback: HostCallback) -> CurlResult<()> {
        let trampoline = Trampoline::new(selector, callback);

        // Userdata first so the new function never sees the old state
        if let Some(data) = companion_data(selector) {
            self.setopt(data, AbiValue::Ptr(trampoline.userdata().cast_const()))?;
        }

        if let Err(e) = self.setopt(selector, AbiValue::Ptr(trampoline.function_ptr())) {
            if let Some(data) = companion_data(selector) {
                let previous = self
                    .store
                    .callback(selector)
                    .map(|t| t.userdata().cast_const())
                    .unwrap_or(ptr::null());
                if let Err(restore) = self.setopt(data, AbiValue::Ptr(previous)) {
                    // The handle still points at the new state, so it has to stay alive
                    warn!(
                        option = %selector_label(Direction::Option, data),
                        error = %restore,
                        "could not restore callback data"
                    );
                    self.store.retain_callback(selector, trampoline);
                }
            }
            return Err(e);
        }

        self.store.retain_callback(selector, trampoline);
        Ok(())
    }

    fn clear_callback(&mut self, selector: i32) -> CurlResult<()> {
        self.setopt(selector, AbiValue::NULL)?;
        if let Some(data) = companion_data(selector) {
            self.setopt(data, AbiValue::NULL)?;
        }
        self.store.release_callback(selector);
        Ok(())
    }

    fn setopt(&mut self, option: i32, value: AbiValue) -> CurlResult<()> {
        // SAFETY: the handle is live for the session's lifetime and every
        // pointer passed here is retained by the caller on success
        let code = unsafe { self.library.native().easy_setopt(self.handle, option, value) };
        self.check("curl_easy_setopt", code, Some(option))
    }

    /// Read a piece of transfer information
    pub fn get_info(&self, selector: i32) -> CurlResult<Value> {
        let class =
            classify_info(selector).ok_or_else(|| unclassified(Direction::Info, selector))?;

        debug!(
            info = %selector_label(Direction::Info, selector),
            class = %class,
            "getinfo"
        );

        let native = self.library.native();
        let raw = match class {
            TypeClass::Int => {
                let mut out: c_long = 0;
                self.getinfo(selector, InfoSlot::Long(&mut out))?;
                RawInfo::Long(out)
            }
            TypeClass::Double => {
                let mut out: f64 = 0.0;
                self.getinfo(selector, InfoSlot::Double(&mut out))?;
                RawInfo::Double(out)
            }
            TypeClass::CString => {
                let mut out: *const c_char = ptr::null();
                self.getinfo(selector, InfoSlot::Str(&mut out))?;
                RawInfo::Str(out)
            }
            TypeClass::StringList => {
                let mut out: *mut CurlSlist = ptr::null_mut();
                self.getinfo(selector, InfoSlot::List(&mut out))?;
                RawInfo::List(out)
            }
            TypeClass::Bool | TypeClass::ReadFn | TypeClass::WriteFn => {
                return Err(CurlError::UnsupportedSelector {
                    direction: Direction::Info,
                    selector,
                    name: selector_label(Direction::Info, selector),
                })
            }
        };

        // SAFETY: `raw` was just filled by getinfo on this live handle
        unsafe { decode_for_getinfo(selector, class, raw, native) }
    }

    fn getinfo(&self, selector: i32, slot: InfoSlot<'_>) -> CurlResult<()> {
        // SAFETY: the slot type matches the selector's class
        let code = unsafe { self.library.native().easy_getinfo(self.handle, selector, slot) };
        self.check("curl_easy_getinfo", code, Some(selector))
    }

    /// Run the configured transfer
    ///
    /// Callbacks run inline on this thread. If one fails, the transfer is
    /// aborted and the host error is available from `take_callback_error`.
    pub fn perform(&mut self) -> CurlResult<()> {
        for trampoline in self.store.callbacks_mut() {
            trampoline.take_failure();
        }

        debug!(handle = ?self.handle, "perform");
        // SAFETY: every pointer option installed on the handle is retained
        let code = unsafe { self.library.native().easy_perform(self.handle) };
        self.check("curl_easy_perform", code, None)
    }

    /// Take the first failure recorded by a callback during the last
    /// `perform`, discarding any later ones
    pub fn take_callback_error(&mut self) -> Option<CallbackError> {
        self.take_callback_errors().into_iter().next()
    }

    /// Take every callback failure from the last `perform`, oldest first
    pub fn take_callback_errors(&mut self) -> Vec<CallbackError> {
        let mut failures: Vec<_> = self
            .store
            .callbacks_mut()
            .filter_map(Trampoline::take_sequenced_failure)
            .collect();
        failures.sort_by_key(|(sequence, _)| *sequence);
        failures.into_iter().map(|(_, failure)| failure).collect()
    }

    /// Reset every option to its default and drop all retained memory
    pub fn reset(&mut self) {
        // SAFETY: live handle
        unsafe { self.library.native().easy_reset(self.handle) };
        self.store.clear();
        debug!(handle = ?self.handle, "reset");
    }

    /// Apply configured transfer defaults
    pub fn apply_transfer_defaults(&mut self, config: &TransferConfig) -> CurlResult<()> {
        if let Some(follow) = config.follow_location {
            self.set_option(CURLOPT_FOLLOWLOCATION, follow)?;
        }
        if let Some(redirs) = config.max_redirs {
            self.set_option(CURLOPT_MAXREDIRS, redirs)?;
        }
        if let Some(agent) = &config.user_agent {
            self.set_option(CURLOPT_USERAGENT, agent.as_str())?;
        }
        if let Some(timeout) = config.timeout_ms {
            self.set_option(CURLOPT_TIMEOUT_MS, timeout)?;
        }
        if let Some(timeout) = config.connect_timeout_ms {
            self.set_option(CURLOPT_CONNECTTIMEOUT_MS, timeout)?;
        }
        if let Some(verbose) = config.verbose {
            self.set_option(CURLOPT_VERBOSE, verbose)?;
        }
        Ok(())
    }

    /// Release the handle, then the retained memory
    pub fn destroy(mut self) {
        self.release();
    }

    /// Whether memory is retained for `selector`
    pub fn is_retained(&self, selector: i32) -> bool {
        self.store.contains(selector)
    }

    /// Number of retained string and list buffers
    pub fn retained_buffers(&self) -> usize {
        self.store.buffer_count()
    }

    /// Number of installed callback trampolines
    pub fn retained_callbacks(&self) -> usize {
        self.store.callback_count()
    }

    /// How often the callback installed for `selector` has been invoked
    pub fn callback_invocations(&self, selector: i32) -> Option<u64> {
        self.store.callback(selector).map(Trampoline::invocations)
    }

    fn release(&mut self) {
        if !self.handle.is_null() {
            // SAFETY: live handle, nulled right after so this runs once
            unsafe { self.library.native().easy_cleanup(self.handle) };
            debug!(handle = ?self.handle, "released easy handle");
            self.handle = ptr::null_mut();
        }
        self.store.clear();
    }

    /// Map a return code to a result
    fn check(&self, operation: &'static str, code: CurlCode, selector: Option<i32>) -> CurlResult<()> {
        match code {
            CURLE_OK => Ok(()),
            CURLE_FAILED_INIT | CURLE_UNKNOWN_OPTION | CURLE_NOT_BUILT_IN => {
                Err(CurlError::Capability {
                    operation,
                    code,
                    selector,
                })
            }
            CURLE_BAD_FUNCTION_ARGUMENT if operation == "curl_easy_getinfo" => {
                Err(CurlError::Capability {
                    operation,
                    code,
                    selector,
                })
            }
            _ => Err(CurlError::NativeFailure {
                operation,
                code,
                selector,
                message: self.library.native().easy_strerror(code),
            }),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

/// Error for a selector the classification table does not cover
fn unclassified(direction: Direction, selector: i32) -> CurlError {
    let known = match direction {
        Direction::Option => constants::option_name(selector),
        Direction::Info => constants::info_name(selector),
    };
    let other = match direction {
        Direction::Option => constants::info_name(selector),
        Direction::Info => constants::option_name(selector),
    };

    match known.or(other) {
        Some(name) => CurlError::UnsupportedSelector {
            direction,
            selector,
            name: name.to_string(),
        },
        None => CurlError::UnknownSelector {
            direction,
            selector,
        },
    }
}
