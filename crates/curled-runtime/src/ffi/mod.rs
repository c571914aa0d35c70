//! Foreign function interface to libcurl
//!
//! - `types`: ABI mirrors and the `TypeClass` of each selector
//! - `table`: selector → `TypeClass` classification
//! - `marshal`: host value ↔ ABI value codecs
//! - `callbacks`: `extern "C"` trampolines for read/write/header callbacks
//! - `retention`: per-session storage for memory libcurl may dereference
//! - `native`: the `NativeCurl` capability trait
//! - `loader`: `LibCurl`, the capability backed by a loaded shared object
//!
//! # Safety
//!
//! All `unsafe` code touching libcurl lives in this module. `Session` is the
//! safe wrapper over it.

pub mod callbacks;
pub mod loader;
pub mod marshal;
pub mod native;
pub mod retention;
pub mod table;
pub mod types;

pub use callbacks::{read_trampoline, write_trampoline, HostCallback, Trampoline};
pub use loader::{LibCurl, LoadError};
pub use marshal::{decode_for_getinfo, encode_for_setopt, Encoded};
pub use native::NativeCurl;
pub use retention::{NativeList, Retained, RetentionStore};
pub use table::{classify_info, classify_option, companion_data, is_off_t_option};
pub use types::{
    AbiValue, CurlCode, CurlOffT, CurlSlist, CurlVersionInfoData, DataCallbackFn, EasyHandle,
    InfoSlot, RawInfo, TypeClass,
};
