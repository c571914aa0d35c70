//! Type codecs - host values ↔ libcurl ABI values
//!
//! - `encode_for_setopt()`: check a host value against a selector's class
//!   and convert it into an owned, ABI-ready form
//! - `decode_for_getinfo()`: convert a raw `getinfo` result back into a host
//!   value
//!
//! # Memory Safety
//!
//! Encoding never hands out pointers. `Encoded` owns its buffers; the session
//! takes pointers from them only once they are about to move into the
//! retention store. Decoding copies strings out before any native free.

use crate::error::{option_label, info_label, CurlError, CurlResult, Direction};
use crate::ffi::callbacks::HostCallback;
use crate::ffi::native::NativeCurl;
use crate::ffi::table::is_off_t_option;
use crate::ffi::types::{RawInfo, TypeClass};
use crate::value::Value;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_long};

/// A host value converted for `curl_easy_setopt`
pub enum Encoded {
    Long(c_long),
    OffT(i64),
    /// `None` clears the option
    Text(Option<CString>),
    /// An empty list clears the option
    List(Vec<CString>),
    /// `None` clears the option
    Callback(Option<HostCallback>),
}

impl Encoded {
    /// Compare the non-callback forms; callbacks never compare equal
    pub fn same_as(&self, other: &Encoded) -> bool {
        match (self, other) {
            (Encoded::Long(a), Encoded::Long(b)) => a == b,
            (Encoded::OffT(a), Encoded::OffT(b)) => a == b,
            (Encoded::Text(a), Encoded::Text(b)) => a == b,
            (Encoded::List(a), Encoded::List(b)) => a == b,
            _ => false,
        }
    }
}

/// Convert `value` for option `selector` of class `class`
pub fn encode_for_setopt(selector: i32, class: TypeClass, value: Value) -> CurlResult<Encoded> {
    let mismatch = |got: &'static str| CurlError::TypeMismatch {
        selector,
        name: option_label(selector),
        class,
        got,
    };

    match (class, value) {
        (TypeClass::Bool, Value::Bool(b)) => Ok(Encoded::Long(b as c_long)),

        (TypeClass::Int, Value::Int(n)) => {
            if is_off_t_option(selector) {
                Ok(Encoded::OffT(n))
            } else {
                c_long::try_from(n)
                    .map(Encoded::Long)
                    .map_err(|_| CurlError::Validation {
                        selector,
                        name: option_label(selector),
                        reason: format!("{} does not fit in a C long", n),
                    })
            }
        }

        (TypeClass::CString, Value::Null) => Ok(Encoded::Text(None)),
        (TypeClass::CString, Value::String(s)) => {
            encode_cstring(selector, s.into_bytes()).map(|c| Encoded::Text(Some(c)))
        }
        (TypeClass::CString, Value::Bytes(bytes)) => {
            encode_cstring(selector, bytes).map(|c| Encoded::Text(Some(c)))
        }

        (TypeClass::StringList, Value::Null) => Ok(Encoded::List(Vec::new())),
        (TypeClass::StringList, Value::List(items)) => items
            .into_iter()
            .map(|item| encode_cstring(selector, item.into_bytes()))
            .collect::<CurlResult<Vec<_>>>()
            .map(Encoded::List),

        (TypeClass::ReadFn, Value::Null) | (TypeClass::WriteFn, Value::Null) => {
            Ok(Encoded::Callback(None))
        }
        (TypeClass::ReadFn, Value::ReadFn(cb)) => {
            Ok(Encoded::Callback(Some(HostCallback::Read(cb))))
        }
        (TypeClass::WriteFn, Value::WriteFn(cb)) => {
            Ok(Encoded::Callback(Some(HostCallback::Write(cb))))
        }

        (TypeClass::Double, _) => Err(CurlError::UnsupportedSelector {
            direction: Direction::Option,
            selector,
            name: option_label(selector),
        }),

        (_, other) => Err(mismatch(other.type_name())),
    }
}

fn encode_cstring(selector: i32, bytes: Vec<u8>) -> CurlResult<CString> {
    CString::new(bytes).map_err(|e| CurlError::Validation {
        selector,
        name: option_label(selector),
        reason: format!("embedded NUL byte at position {}", e.nul_position()),
    })
}

/// Convert a raw `getinfo` result for `selector` of class `class`
///
/// List results are freed through `native` once copied.
///
/// # Safety
///
/// String and list pointers in `raw` must be null or valid as returned by
/// `curl_easy_getinfo` on a live handle of `native`.
pub unsafe fn decode_for_getinfo(
    selector: i32,
    class: TypeClass,
    raw: RawInfo,
    native: &dyn NativeCurl,
) -> CurlResult<Value> {
    match (class, raw) {
        (TypeClass::Int, RawInfo::Long(n)) => Ok(Value::Int(n as i64)),
        (TypeClass::Double, RawInfo::Double(d)) => Ok(Value::Double(d)),
        (TypeClass::CString, RawInfo::Str(ptr)) => {
            if ptr.is_null() {
                Ok(Value::Null)
            } else {
                decode_text(selector, ptr).map(Value::String)
            }
        }
        (TypeClass::StringList, RawInfo::List(head)) => {
            let mut items = Vec::new();
            let mut invalid = None;
            let mut node = head;
            while !node.is_null() {
                let data = (*node).data;
                if !data.is_null() {
                    match decode_text(selector, data) {
                        Ok(item) => items.push(item),
                        Err(e) => {
                            invalid.get_or_insert(e);
                        }
                    }
                }
                node = (*node).next;
            }
            if !head.is_null() {
                native.slist_free_all(head);
            }
            match invalid {
                Some(e) => Err(e),
                None => Ok(Value::List(items)),
            }
        }
        _ => Err(CurlError::UnsupportedSelector {
            direction: Direction::Info,
            selector,
            name: info_label(selector),
        }),
    }
}

unsafe fn decode_text(selector: i32, ptr: *const c_char) -> CurlResult<String> {
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_string)
        .map_err(|e| CurlError::Validation {
            selector,
            name: info_label(selector),
            reason: format!("result is not valid UTF-8: {}", e),
        })
}
