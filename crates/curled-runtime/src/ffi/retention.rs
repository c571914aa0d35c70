//! Retention stores for ABI-visible memory
//!
//! libcurl keeps the pointers it is given and may read them during any later
//! `perform`. Everything a session hands over (string buffers, `curl_slist`
//! chains, callback state) is parked here, keyed by the selector it was set
//! through, until that selector is overwritten or cleared, the handle is
//! reset, or the session is destroyed.

use crate::error::{CurlError, CurlResult};
use crate::constants::CURLE_OUT_OF_MEMORY;
use crate::ffi::callbacks::Trampoline;
use crate::ffi::types::CurlSlist;
use crate::library::Library;
use std::collections::HashMap;
use std::ffi::CString;
use std::ptr;
use std::sync::Arc;

/// A `curl_slist` built by the native capability and freed through it
pub struct NativeList {
    head: *mut CurlSlist,
    library: Arc<Library>,
}

impl NativeList {
    /// Build a fresh list holding copies of `items` for option `selector`
    ///
    /// Returns `None` for an empty sequence, which is passed as a null list.
    pub fn build(
        library: &Arc<Library>,
        selector: i32,
        items: &[CString],
    ) -> CurlResult<Option<Self>> {
        if items.is_empty() {
            return Ok(None);
        }

        let mut list = NativeList {
            head: ptr::null_mut(),
            library: Arc::clone(library),
        };
        for item in items {
            // SAFETY: `list.head` is null or a list this capability built
            let head = unsafe { library.native().slist_append(list.head, item.as_ptr()) };
            if head.is_null() {
                // `list` drops here and frees what was appended so far
                return Err(CurlError::NativeFailure {
                    operation: "curl_slist_append",
                    code: CURLE_OUT_OF_MEMORY,
                    selector: Some(selector),
                    message: library.native().easy_strerror(CURLE_OUT_OF_MEMORY),
                });
            }
            list.head = head;
        }
        Ok(Some(list))
    }

    pub fn as_ptr(&self) -> *mut CurlSlist {
        self.head
    }
}

impl Drop for NativeList {
    fn drop(&mut self) {
        if !self.head.is_null() {
            // SAFETY: built by this capability and freed only here
            unsafe { self.library.native().slist_free_all(self.head) };
        }
    }
}

/// Memory retained for one string-valued selector
pub enum Retained {
    Text(CString),
    List {
        items: Vec<CString>,
        list: NativeList,
    },
}

/// Per-session buffers and trampolines keyed by option selector
#[derive(Default)]
pub struct RetentionStore {
    buffers: HashMap<i32, Retained>,
    callbacks: HashMap<i32, Trampoline>,
}

impl RetentionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain a string buffer, dropping whatever the selector held before
    pub fn retain_text(&mut self, selector: i32, text: CString) {
        self.buffers.insert(selector, Retained::Text(text));
    }

    /// Retain a list and the strings it was built from
    pub fn retain_list(&mut self, selector: i32, items: Vec<CString>, list: NativeList) {
        self.buffers.insert(selector, Retained::List { items, list });
    }

    pub fn release_buffer(&mut self, selector: i32) -> Option<Retained> {
        self.buffers.remove(&selector)
    }

    pub fn retain_callback(&mut self, selector: i32, trampoline: Trampoline) {
        self.callbacks.insert(selector, trampoline);
    }

    pub fn release_callback(&mut self, selector: i32) -> Option<Trampoline> {
        self.callbacks.remove(&selector)
    }

    pub fn callback(&self, selector: i32) -> Option<&Trampoline> {
        self.callbacks.get(&selector)
    }

    pub fn callbacks_mut(&mut self) -> impl Iterator<Item = &mut Trampoline> {
        self.callbacks.values_mut()
    }

    /// Whether anything is retained for `selector`
    pub fn contains(&self, selector: i32) -> bool {
        self.buffers.contains_key(&selector) || self.callbacks.contains_key(&selector)
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty() && self.callbacks.is_empty()
    }

    /// Drop everything. Only valid once the handle no longer references it.
    pub fn clear(&mut self) {
        self.callbacks.clear();
        self.buffers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CURLOPT_URL, CURLOPT_USERAGENT, CURLOPT_WRITEFUNCTION};
    use crate::ffi::callbacks::HostCallback;
    use crate::value::WriteCallback;

    #[test]
    fn test_replace_and_release() {
        let mut store = RetentionStore::new();
        store.retain_text(CURLOPT_URL, CString::new("http://a.test/").unwrap());
        store.retain_text(CURLOPT_URL, CString::new("http://b.test/").unwrap());
        assert_eq!(store.buffer_count(), 1);

        match store.release_buffer(CURLOPT_URL) {
            Some(Retained::Text(text)) => assert_eq!(text.to_str().unwrap(), "http://b.test/"),
            _ => panic!("expected retained text"),
        }
        assert!(!store.contains(CURLOPT_URL));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = RetentionStore::new();
        store.retain_text(CURLOPT_USERAGENT, CString::new("curled").unwrap());
        store.retain_callback(
            CURLOPT_WRITEFUNCTION,
            Trampoline::new(
                CURLOPT_WRITEFUNCTION,
                HostCallback::Write(WriteCallback::function(|_| Ok(()))),
            ),
        );
        assert!(store.contains(CURLOPT_WRITEFUNCTION));

        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }
}
