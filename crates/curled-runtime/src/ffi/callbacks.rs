//! Callback trampolines - let libcurl call back into host closures
//!
//! libcurl's read, write and header callbacks share one C signature:
//! `size_t fn(char *buffer, size_t size, size_t nitems, void *userdata)`.
//! Rather than generating code per closure, two fixed `extern "C"`
//! trampolines are installed as the function pointer, and the companion
//! `*DATA` option carries a pointer to the heap state holding the host
//! callback. The trampoline recovers that state from `userdata`.
//!
//! # Failure handling
//!
//! Host errors and panics never cross the C boundary. A failing read
//! callback returns `CURL_READFUNC_ABORT`, a failing write callback returns
//! 0 (a short write), and the failure is parked on the trampoline until the
//! session collects it after `perform`.

use crate::constants::CURL_READFUNC_ABORT;
use crate::error::{option_label, CallbackError};
use crate::ffi::types::DataCallbackFn;
use crate::value::{ReadCallback, WriteCallback};
use std::any::Any;
use std::io::{self, ErrorKind};
use std::os::raw::{c_char, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::ptr::{self, NonNull};
use std::slice;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Orders failures recorded on different trampolines
static FAILURE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Host side of a callback option
pub enum HostCallback {
    Read(ReadCallback),
    Write(WriteCallback),
}

/// Heap state `userdata` points at while a trampoline is installed
struct TrampolineState {
    selector: i32,
    callback: HostCallback,
    /// Bytes a read function produced beyond what libcurl asked for
    pending: Vec<u8>,
    failure: Option<(u64, CallbackError)>,
    invocations: u64,
}

/// A registered callback: function pointer plus the state it dispatches to
///
/// The state lives at a fixed heap address from creation until drop, so the
/// userdata pointer handed to libcurl stays valid for the trampoline's whole
/// lifetime.
pub struct Trampoline {
    state: NonNull<TrampolineState>,
}

impl Trampoline {
    pub fn new(selector: i32, callback: HostCallback) -> Self {
        let state = Box::new(TrampolineState {
            selector,
            callback,
            pending: Vec::new(),
            failure: None,
            invocations: 0,
        });
        Self {
            state: NonNull::from(Box::leak(state)),
        }
    }

    /// Function pointer to install for the callback option
    pub fn function_ptr(&self) -> *const c_void {
        let f: DataCallbackFn = match self.state().callback {
            HostCallback::Read(_) => read_trampoline,
            HostCallback::Write(_) => write_trampoline,
        };
        f as *const c_void
    }

    /// Pointer to install for the companion data option
    pub fn userdata(&self) -> *mut c_void {
        self.state.as_ptr() as *mut c_void
    }

    /// Number of times libcurl has called this trampoline
    pub fn invocations(&self) -> u64 {
        self.state().invocations
    }

    /// Take the recorded host failure, if any
    pub fn take_failure(&mut self) -> Option<CallbackError> {
        self.take_sequenced_failure().map(|(_, failure)| failure)
    }

    /// Take the recorded failure with its process-wide sequence number
    ///
    /// Lower numbers were recorded earlier, across all trampolines.
    pub fn take_sequenced_failure(&mut self) -> Option<(u64, CallbackError)> {
        self.state_mut().failure.take()
    }

    fn state(&self) -> &TrampolineState {
        // SAFETY: the state is owned by this trampoline and only mutated by
        // libcurl while `perform` holds the session mutably.
        unsafe { self.state.as_ref() }
    }

    fn state_mut(&mut self) -> &mut TrampolineState {
        // SAFETY: as above; `&mut self` excludes any concurrent trampoline call.
        unsafe { self.state.as_mut() }
    }
}

impl Drop for Trampoline {
    fn drop(&mut self) {
        // SAFETY: created by Box::leak in `new` and dropped exactly once here.
        unsafe { drop(Box::from_raw(self.state.as_ptr())) }
    }
}

impl TrampolineState {
    fn name(&self) -> String {
        option_label(self.selector)
    }

    fn record(&mut self, failure: CallbackError) {
        warn!(error = %failure, "callback failed, aborting transfer");
        // Keep the first failure; later calls are fallout from it
        if self.failure.is_none() {
            let sequence = FAILURE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
            self.failure = Some((sequence, failure));
        }
    }

    /// Produce at most `requested` bytes of upload data
    fn next_chunk(&mut self, requested: usize) -> io::Result<Vec<u8>> {
        if !self.pending.is_empty() {
            let take = requested.min(self.pending.len());
            let rest = self.pending.split_off(take);
            return Ok(std::mem::replace(&mut self.pending, rest));
        }

        match &mut self.callback {
            HostCallback::Read(ReadCallback::Source(reader)) => {
                let mut buf = vec![0u8; requested];
                loop {
                    match reader.read(&mut buf) {
                        Ok(n) => {
                            buf.truncate(n);
                            return Ok(buf);
                        }
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
            }
            HostCallback::Read(ReadCallback::Function(f)) => {
                let mut data = f(requested)?;
                if data.len() > requested {
                    self.pending = data.split_off(requested);
                }
                Ok(data)
            }
            HostCallback::Write(_) => Err(io::Error::new(
                ErrorKind::Unsupported,
                "write callback installed as a read callback",
            )),
        }
    }

    /// Hand one received chunk to the host
    fn deliver(&mut self, data: &[u8]) -> io::Result<()> {
        match &mut self.callback {
            HostCallback::Write(WriteCallback::Sink(writer)) => writer.write_all(data),
            HostCallback::Write(WriteCallback::Function(f)) => f(data),
            HostCallback::Read(_) => Err(io::Error::new(
                ErrorKind::Unsupported,
                "read callback installed as a write callback",
            )),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Installed for `ReadFn` options
///
/// Copies up to `size * nitems` bytes into `buffer` and returns the count;
/// 0 ends the upload.
pub extern "C" fn read_trampoline(
    buffer: *mut c_char,
    size: usize,
    nitems: usize,
    userdata: *mut c_void,
) -> usize {
    // SAFETY: userdata is the state pointer installed next to this function
    let Some(state) = (unsafe { (userdata as *mut TrampolineState).as_mut() }) else {
        return CURL_READFUNC_ABORT;
    };
    state.invocations += 1;

    let requested = size.saturating_mul(nitems);
    let result = panic::catch_unwind(AssertUnwindSafe(|| state.next_chunk(requested)));

    match result {
        Ok(Ok(chunk)) => {
            let len = chunk.len().min(requested);
            if len > 0 && !buffer.is_null() {
                // SAFETY: libcurl guarantees `buffer` holds size * nitems bytes
                unsafe { ptr::copy_nonoverlapping(chunk.as_ptr(), buffer as *mut u8, len) };
            }
            len
        }
        Ok(Err(source)) => {
            let name = state.name();
            state.record(CallbackError::Io { name, source });
            CURL_READFUNC_ABORT
        }
        Err(payload) => {
            let name = state.name();
            state.record(CallbackError::Panicked {
                name,
                message: panic_message(payload),
            });
            CURL_READFUNC_ABORT
        }
    }
}

/// Installed for `WriteFn` options (body and header data)
///
/// Returns `size * nitems` when the host consumed the chunk, 0 otherwise.
pub extern "C" fn write_trampoline(
    buffer: *mut c_char,
    size: usize,
    nitems: usize,
    userdata: *mut c_void,
) -> usize {
    // SAFETY: userdata is the state pointer installed next to this function
    let Some(state) = (unsafe { (userdata as *mut TrampolineState).as_mut() }) else {
        return 0;
    };
    state.invocations += 1;

    let len = size.saturating_mul(nitems);
    let data: &[u8] = if len == 0 || buffer.is_null() {
        &[]
    } else {
        // SAFETY: libcurl passes `size * nitems` readable bytes
        unsafe { slice::from_raw_parts(buffer as *const u8, len) }
    };

    match panic::catch_unwind(AssertUnwindSafe(|| state.deliver(data))) {
        Ok(Ok(())) => data.len(),
        Ok(Err(source)) => {
            let name = state.name();
            state.record(CallbackError::Io { name, source });
            0
        }
        Err(payload) => {
            let name = state.name();
            state.record(CallbackError::Panicked {
                name,
                message: panic_message(payload),
            });
            0
        }
    }
}
