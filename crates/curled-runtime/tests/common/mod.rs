//! Shared test utilities
//!
//! `StubCurl` is an in-process stand-in for libcurl. It records every call,
//! reads option pointers only when a transfer runs (so retention bugs show
//! up as garbage), and drives installed callbacks through the same
//! trampolines a real libcurl would call.

#![allow(dead_code)]

use curled_runtime::constants::*;
use curled_runtime::ffi::{
    AbiValue, CurlCode, CurlSlist, CurlVersionInfoData, DataCallbackFn, EasyHandle, InfoSlot,
    NativeCurl,
};
use curled_runtime::{Library, Session};
use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_long, c_void};
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// An option value as the stub stored it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StubOption {
    Long(i64),
    OffT(i64),
    Ptr(usize),
}

/// Scripted behavior of the stub
#[derive(Debug, Clone)]
pub struct Script {
    /// url → Location target
    pub redirects: HashMap<String, String>,
    /// Body chunks delivered through WRITEFUNCTION, one call each
    pub body_chunks: Vec<Vec<u8>>,
    /// Header lines (without CRLF) sent after the status line
    pub response_headers: Vec<String>,
    /// Bytes requested per READFUNCTION call
    pub upload_chunk: usize,
    pub max_read_calls: usize,
    pub rejected_options: HashMap<i32, CurlCode>,
    /// option → (calls allowed before it starts failing, code)
    pub rejected_after: HashMap<i32, (usize, CurlCode)>,
    pub unsupported_info: HashSet<i32>,
    pub rejected_info: HashMap<i32, CurlCode>,
    pub perform_code: CurlCode,
    pub global_init_code: CurlCode,
    pub fail_easy_init: bool,
    pub fail_slist_append: bool,
    pub ssl_engines: Vec<String>,
    pub cookies: Vec<String>,
    pub version: String,
    pub version_age: c_int,
    pub total_time: f64,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            redirects: HashMap::new(),
            body_chunks: Vec::new(),
            response_headers: Vec::new(),
            upload_chunk: 16,
            max_read_calls: 64,
            rejected_options: HashMap::new(),
            rejected_after: HashMap::new(),
            unsupported_info: HashSet::new(),
            rejected_info: HashMap::new(),
            perform_code: CURLE_OK,
            global_init_code: CURLE_OK,
            fail_easy_init: false,
            fail_slist_append: false,
            ssl_engines: Vec::new(),
            cookies: Vec::new(),
            version: "libcurl/7.19.7 OpenSSL/0.9.8k zlib/1.2.3.3 libidn/1.15".to_string(),
            version_age: CURLVERSION_FOURTH,
            total_time: 0.25,
        }
    }
}

/// Per-handle state
#[derive(Debug, Default)]
pub struct HandleState {
    pub options: HashMap<i32, StubOption>,
    pub effective_url: Option<CString>,
    pub redirect_url: Option<CString>,
    pub content_type: Option<CString>,
    pub response_code: i64,
    pub redirect_count: i64,
    pub performed: usize,
}

/// Everything the stub observed
#[derive(Debug, Default)]
pub struct StubState {
    pub script: Script,
    pub handles: HashMap<usize, HandleState>,
    pub current_handle: usize,
    next_handle: usize,
    pub global_inits: usize,
    pub global_flags: Vec<c_long>,
    pub global_cleanups: usize,
    pub easy_inits: usize,
    pub easy_cleanups: usize,
    pub resets: usize,
    pub setopt_log: Vec<(i32, StubOption)>,
    /// Ordered trace of handle and list releases
    pub events: Vec<String>,
    pub live_nodes: usize,
    pub lists_freed: usize,
    pub write_returns: Vec<usize>,
    pub header_returns: Vec<usize>,
    pub read_returns: Vec<usize>,
    pub uploaded: Vec<u8>,
    /// HTTPHEADER contents read at each perform
    pub request_headers: Vec<Vec<String>>,
    /// URLs requested by each perform
    pub requested_urls: Vec<String>,
}

/// Release-safe version record handed out by `version_info`
struct VersionRecord {
    _strings: Vec<CString>,
    _protocols: Vec<*const c_char>,
    data: Box<CurlVersionInfoData>,
}

// The record is immutable after construction
unsafe impl Send for VersionRecord {}
unsafe impl Sync for VersionRecord {}

impl VersionRecord {
    fn new(age: c_int) -> Self {
        let strings: Vec<CString> = [
            "7.19.7",
            "x86_64-pc-linux-gnu",
            "OpenSSL/0.9.8k",
            "1.2.3.3",
            "http",
            "https",
            "ftp",
            "1.6.0",
            "1.15",
            "libssh2/1.2.2",
        ]
        .iter()
        .map(|s| CString::new(*s).unwrap())
        .collect();

        let protocols = vec![
            strings[4].as_ptr(),
            strings[5].as_ptr(),
            strings[6].as_ptr(),
            ptr::null(),
        ];

        let data = Box::new(CurlVersionInfoData {
            age,
            version: strings[0].as_ptr(),
            version_num: 0x071307,
            host: strings[1].as_ptr(),
            features: CURL_VERSION_IPV6 | CURL_VERSION_SSL | CURL_VERSION_LIBZ,
            ssl_version: strings[2].as_ptr(),
            ssl_version_num: 0x0090_80bf,
            libz_version: strings[3].as_ptr(),
            protocols: protocols.as_ptr(),
            ares: strings[7].as_ptr(),
            ares_num: 0x010600,
            libidn: strings[8].as_ptr(),
            iconv_ver_num: 0,
            libssh_version: strings[9].as_ptr(),
        });

        Self {
            _strings: strings,
            _protocols: protocols,
            data,
        }
    }
}

/// In-process libcurl stand-in
pub struct StubCurl {
    state: Arc<Mutex<StubState>>,
    version: VersionRecord,
}

fn lock(state: &Mutex<StubState>) -> MutexGuard<'_, StubState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Append a node holding a copy of `data`
unsafe fn append_node(
    state: &mut StubState,
    list: *mut CurlSlist,
    data: &CStr,
) -> *mut CurlSlist {
    let node = Box::into_raw(Box::new(CurlSlist {
        data: data.to_owned().into_raw(),
        next: ptr::null_mut(),
    }));
    state.live_nodes += 1;

    if list.is_null() {
        return node;
    }
    let mut tail = list;
    while !(*tail).next.is_null() {
        tail = (*tail).next;
    }
    (*tail).next = node;
    list
}

unsafe fn build_list(state: &mut StubState, items: &[String]) -> *mut CurlSlist {
    let mut list = ptr::null_mut();
    for item in items {
        let item = CString::new(item.as_str()).unwrap();
        list = append_node(state, list, &item);
    }
    list
}

unsafe fn read_list(mut node: *const CurlSlist) -> Vec<String> {
    let mut out = Vec::new();
    while !node.is_null() {
        out.push(CStr::from_ptr((*node).data).to_string_lossy().into_owned());
        node = (*node).next;
    }
    out
}

fn long_option(options: &HashMap<i32, StubOption>, selector: i32) -> Option<i64> {
    match options.get(&selector) {
        Some(StubOption::Long(v)) | Some(StubOption::OffT(v)) => Some(*v),
        _ => None,
    }
}

fn ptr_option(options: &HashMap<i32, StubOption>, selector: i32) -> Option<usize> {
    match options.get(&selector) {
        Some(StubOption::Ptr(p)) => Some(*p),
        _ => None,
    }
}

unsafe fn string_option(options: &HashMap<i32, StubOption>, selector: i32) -> Option<String> {
    ptr_option(options, selector)
        .map(|p| CStr::from_ptr(p as *const c_char).to_string_lossy().into_owned())
}

/// Call a data callback the way libcurl does: size 1, nitems = len
unsafe fn invoke(function: usize, userdata: usize, bytes: &mut [u8]) -> usize {
    let f: DataCallbackFn = std::mem::transmute(function as *const c_void);
    f(
        bytes.as_mut_ptr() as *mut c_char,
        1,
        bytes.len(),
        userdata as *mut c_void,
    )
}

struct Callback {
    function: usize,
    userdata: usize,
}

fn callback(options: &HashMap<i32, StubOption>, function: i32, data: i32) -> Option<Callback> {
    Some(Callback {
        function: ptr_option(options, function)?,
        userdata: ptr_option(options, data).unwrap_or(0),
    })
}

/// What one perform call will do, resolved while the lock is held
struct Plan {
    url: String,
    effective_url: String,
    redirect_url: Option<String>,
    redirect_count: i64,
    response_code: i64,
    too_many_redirects: bool,
    header_lines: Vec<String>,
    body_chunks: Vec<Vec<u8>>,
    upload: bool,
    upload_chunk: usize,
    max_read_calls: usize,
    write: Option<Callback>,
    header: Option<Callback>,
    read: Option<Callback>,
    content_type: Option<String>,
}

impl StubCurl {
    pub fn new(script: Script) -> (Self, Arc<Mutex<StubState>>) {
        let version = VersionRecord::new(script.version_age);
        let state = Arc::new(Mutex::new(StubState {
            script,
            next_handle: 1,
            ..Default::default()
        }));
        (
            Self {
                state: Arc::clone(&state),
                version,
            },
            state,
        )
    }

    fn plan(&self, state: &mut StubState, handle: usize) -> Option<Plan> {
        let options = &state.handles.get(&handle)?.options;
        let script = &state.script;

        // SAFETY: pointers were installed by the session and must still be retained
        let url = unsafe { string_option(options, CURLOPT_URL) }.unwrap_or_default();
        let follow = long_option(options, CURLOPT_FOLLOWLOCATION).unwrap_or(0) != 0;
        let max_redirs = long_option(options, CURLOPT_MAXREDIRS).unwrap_or(-1);
        let nobody = long_option(options, CURLOPT_NOBODY).unwrap_or(0) != 0;
        let upload = long_option(options, CURLOPT_UPLOAD).unwrap_or(0) != 0;

        let mut current = url.clone();
        let mut hops = 0;
        let mut too_many_redirects = false;
        if follow {
            while let Some(next) = script.redirects.get(&current) {
                if max_redirs >= 0 && hops >= max_redirs {
                    too_many_redirects = true;
                    break;
                }
                current = next.clone();
                hops += 1;
            }
        }
        let redirect_url = if follow {
            None
        } else {
            script.redirects.get(&current).cloned()
        };
        let response_code = if redirect_url.is_some() { 302 } else { 200 };

        let mut header_lines = vec![format!("HTTP/1.1 {} OK", response_code)];
        header_lines.extend(script.response_headers.iter().cloned());
        if let Some(location) = &redirect_url {
            header_lines.push(format!("Location: {}", location));
        }
        header_lines.push(String::new());

        let content_type = script.response_headers.iter().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-type")
                .then(|| value.trim().to_string())
        });

        Some(Plan {
            url,
            effective_url: current,
            redirect_url,
            redirect_count: hops,
            response_code,
            too_many_redirects,
            header_lines,
            body_chunks: if nobody {
                Vec::new()
            } else {
                script.body_chunks.clone()
            },
            upload,
            upload_chunk: script.upload_chunk,
            max_read_calls: script.max_read_calls,
            write: callback(options, CURLOPT_WRITEFUNCTION, CURLOPT_WRITEDATA),
            header: callback(options, CURLOPT_HEADERFUNCTION, CURLOPT_HEADERDATA),
            read: callback(options, CURLOPT_READFUNCTION, CURLOPT_READDATA),
            content_type,
        })
    }
}

impl NativeCurl for StubCurl {
    fn global_init(&self, flags: c_long) -> CurlCode {
        let mut state = lock(&self.state);
        state.global_inits += 1;
        state.global_flags.push(flags);
        state.script.global_init_code
    }

    fn global_cleanup(&self) {
        lock(&self.state).global_cleanups += 1;
    }

    fn easy_init(&self) -> EasyHandle {
        let mut state = lock(&self.state);
        if state.script.fail_easy_init {
            return ptr::null_mut();
        }
        let id = state.next_handle;
        state.next_handle += 1;
        state.easy_inits += 1;
        state.current_handle = id;
        state.handles.insert(id, HandleState::default());
        (id << 4) as EasyHandle
    }

    unsafe fn easy_cleanup(&self, handle: EasyHandle) {
        let mut state = lock(&self.state);
        state.handles.remove(&(handle as usize >> 4));
        state.easy_cleanups += 1;
        state.events.push("easy_cleanup".to_string());
    }

    unsafe fn easy_reset(&self, handle: EasyHandle) {
        let mut state = lock(&self.state);
        if let Some(h) = state.handles.get_mut(&(handle as usize >> 4)) {
            h.options.clear();
        }
        state.resets += 1;
    }

    unsafe fn easy_setopt(&self, handle: EasyHandle, option: c_int, value: AbiValue) -> CurlCode {
        let mut state = lock(&self.state);
        let earlier = state.setopt_log.iter().filter(|(opt, _)| *opt == option).count();
        let stored = match value {
            AbiValue::Long(v) => StubOption::Long(v as i64),
            AbiValue::OffT(v) => StubOption::OffT(v),
            AbiValue::Ptr(p) => StubOption::Ptr(p as usize),
        };
        state.setopt_log.push((option, stored));

        if let Some(&code) = state.script.rejected_options.get(&option) {
            return code;
        }
        if let Some(&(accepted, code)) = state.script.rejected_after.get(&option) {
            if earlier >= accepted {
                return code;
            }
        }
        let Some(h) = state.handles.get_mut(&(handle as usize >> 4)) else {
            return CURLE_BAD_FUNCTION_ARGUMENT;
        };
        if stored == StubOption::Ptr(0) {
            h.options.remove(&option);
        } else {
            h.options.insert(option, stored);
        }
        CURLE_OK
    }

    unsafe fn easy_getinfo(&self, handle: EasyHandle, info: c_int, slot: InfoSlot<'_>) -> CurlCode {
        let mut state = lock(&self.state);
        if state.script.unsupported_info.contains(&info) {
            return CURLE_BAD_FUNCTION_ARGUMENT;
        }
        if let Some(&code) = state.script.rejected_info.get(&info) {
            return code;
        }
        let id = handle as usize >> 4;
        if !state.handles.contains_key(&id) {
            return CURLE_BAD_FUNCTION_ARGUMENT;
        }

        match slot {
            InfoSlot::Str(out) => {
                let h = &state.handles[&id];
                let value = match info {
                    CURLINFO_EFFECTIVE_URL => h.effective_url.as_ref(),
                    CURLINFO_REDIRECT_URL => h.redirect_url.as_ref(),
                    CURLINFO_CONTENT_TYPE => h.content_type.as_ref(),
                    _ => None,
                };
                *out = value.map(|s| s.as_ptr()).unwrap_or(ptr::null());
            }
            InfoSlot::Long(out) => {
                let h = &state.handles[&id];
                *out = match info {
                    CURLINFO_RESPONSE_CODE => h.response_code as c_long,
                    CURLINFO_REDIRECT_COUNT => h.redirect_count as c_long,
                    _ => 0,
                };
            }
            InfoSlot::Double(out) => {
                *out = match info {
                    CURLINFO_TOTAL_TIME => state.script.total_time,
                    _ => 0.0,
                };
            }
            InfoSlot::List(out) => {
                let items = match info {
                    CURLINFO_SSL_ENGINES => state.script.ssl_engines.clone(),
                    CURLINFO_COOKIELIST => state.script.cookies.clone(),
                    _ => Vec::new(),
                };
                *out = build_list(&mut state, &items);
            }
        }
        CURLE_OK
    }

    unsafe fn easy_perform(&self, handle: EasyHandle) -> CurlCode {
        let id = handle as usize >> 4;
        let plan = {
            let mut state = lock(&self.state);
            let Some(plan) = self.plan(&mut state, id) else {
                return CURLE_BAD_FUNCTION_ARGUMENT;
            };
            let request_headers = state
                .handles
                .get(&id)
                .and_then(|h| ptr_option(&h.options, CURLOPT_HTTPHEADER))
                .map(|p| read_list(p as *const CurlSlist))
                .unwrap_or_default();
            state.request_headers.push(request_headers);
            state.requested_urls.push(plan.url.clone());
            plan
        };

        if plan.too_many_redirects {
            return CURLE_TOO_MANY_REDIRECTS;
        }

        // Callbacks run without the lock so they may take their time
        let mut code = CURLE_OK;
        let mut read_returns = Vec::new();
        let mut uploaded = Vec::new();
        if let (true, Some(read)) = (plan.upload, &plan.read) {
            for _ in 0..plan.max_read_calls {
                let mut buf = vec![0u8; plan.upload_chunk];
                let n = invoke(read.function, read.userdata, &mut buf);
                read_returns.push(n);
                if n == CURL_READFUNC_ABORT {
                    code = CURLE_ABORTED_BY_CALLBACK;
                    break;
                }
                if n == 0 {
                    break;
                }
                uploaded.extend_from_slice(&buf[..n.min(buf.len())]);
            }
        }

        let mut header_returns = Vec::new();
        if code == CURLE_OK {
            if let Some(header) = &plan.header {
                for line in &plan.header_lines {
                    let mut bytes = format!("{}\r\n", line).into_bytes();
                    let expected = bytes.len();
                    let n = invoke(header.function, header.userdata, &mut bytes);
                    header_returns.push(n);
                    if n != expected {
                        code = CURLE_WRITE_ERROR;
                        break;
                    }
                }
            }
        }

        let mut write_returns = Vec::new();
        if code == CURLE_OK {
            if let Some(write) = &plan.write {
                for chunk in &plan.body_chunks {
                    let mut bytes = chunk.clone();
                    let n = invoke(write.function, write.userdata, &mut bytes);
                    write_returns.push(n);
                    if n != chunk.len() {
                        code = CURLE_WRITE_ERROR;
                        break;
                    }
                }
            }
        }

        let mut state = lock(&self.state);
        state.read_returns.extend(read_returns);
        state.header_returns.extend(header_returns);
        state.write_returns.extend(write_returns);
        state.uploaded.extend(uploaded);
        let perform_code = state.script.perform_code;
        if let Some(h) = state.handles.get_mut(&id) {
            h.effective_url = CString::new(plan.effective_url).ok();
            h.redirect_url = plan.redirect_url.and_then(|u| CString::new(u).ok());
            h.content_type = plan.content_type.and_then(|c| CString::new(c).ok());
            h.response_code = plan.response_code;
            h.redirect_count = plan.redirect_count;
            h.performed += 1;
        }

        if code == CURLE_OK {
            perform_code
        } else {
            code
        }
    }

    fn easy_strerror(&self, code: CurlCode) -> String {
        code_name(code).unwrap_or("unknown error").to_string()
    }

    unsafe fn slist_append(&self, list: *mut CurlSlist, data: *const c_char) -> *mut CurlSlist {
        let mut state = lock(&self.state);
        if state.script.fail_slist_append {
            return ptr::null_mut();
        }
        append_node(&mut state, list, CStr::from_ptr(data))
    }

    unsafe fn slist_free_all(&self, list: *mut CurlSlist) {
        let mut state = lock(&self.state);
        let mut node = list;
        while !node.is_null() {
            let owned = Box::from_raw(node);
            drop(CString::from_raw(owned.data));
            node = owned.next;
            state.live_nodes -= 1;
        }
        state.lists_freed += 1;
        state.events.push("slist_free_all".to_string());
    }

    fn version(&self) -> String {
        lock(&self.state).script.version.clone()
    }

    fn version_info(&self, _age: c_int) -> *const CurlVersionInfoData {
        &*self.version.data
    }
}

/// A library backed by a `StubCurl`, plus access to what the stub saw
pub struct Stub {
    pub library: Arc<Library>,
    pub state: Arc<Mutex<StubState>>,
}

impl Stub {
    pub fn new() -> Self {
        Self::with_script(Script::default())
    }

    pub fn with_script(script: Script) -> Self {
        let (curl, state) = StubCurl::new(script);
        Self {
            library: Arc::new(Library::new(curl)),
            state,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, StubState> {
        lock(&self.state)
    }

    pub fn locked(state: &Mutex<StubState>) -> MutexGuard<'_, StubState> {
        lock(state)
    }

    pub fn script(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.state().script);
    }

    pub fn session(&self) -> Session {
        Session::with_library(Arc::clone(&self.library)).expect("stub session")
    }

    /// Option currently stored on the most recently created handle
    pub fn option(&self, selector: i32) -> Option<StubOption> {
        let state = self.state();
        state
            .handles
            .get(&state.current_handle)?
            .options
            .get(&selector)
            .copied()
    }

    /// Dereference a string option on the most recent handle
    pub fn option_string(&self, selector: i32) -> Option<String> {
        let state = self.state();
        let options = &state.handles.get(&state.current_handle)?.options;
        // SAFETY: only valid while the session retains the buffer, which is
        // exactly what the tests check
        unsafe { string_option(options, selector) }
    }

    /// Call the callback installed through `function`/`data` on the most
    /// recent handle, as libcurl would during a transfer
    pub fn fire(&self, function: i32, data: i32, bytes: &mut [u8]) -> Option<usize> {
        let installed = {
            let state = self.state();
            callback(&state.handles.get(&state.current_handle)?.options, function, data)?
        };
        // SAFETY: the session retains the trampoline state while it is installed
        Some(unsafe { invoke(installed.function, installed.userdata, bytes) })
    }

    /// Walk a list option on the most recent handle
    pub fn option_list(&self, selector: i32) -> Option<Vec<String>> {
        let state = self.state();
        let p = ptr_option(&state.handles.get(&state.current_handle)?.options, selector)?;
        Some(unsafe { read_list(p as *const CurlSlist) })
    }
}

/// Shared recorder for chunks seen by a write callback
pub fn recorder() -> (
    std::rc::Rc<std::cell::RefCell<Vec<Vec<u8>>>>,
    curled_runtime::WriteCallback,
) {
    let chunks = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&chunks);
    let callback = curled_runtime::WriteCallback::function(move |chunk| {
        sink.borrow_mut().push(chunk.to_vec());
        Ok(())
    });
    (chunks, callback)
}
