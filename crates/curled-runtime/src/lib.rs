//! Curled Runtime - typed libcurl bindings
//!
//! Sits between dynamically-typed host values and libcurl's untyped
//! `curl_easy_setopt` / `curl_easy_getinfo` calling convention:
//!
//! - every option and info selector is classified by the wire type it takes
//! - host values are checked and converted to that wire type
//! - strings, lists and callbacks handed to libcurl are kept alive for as
//!   long as the handle may use them
//! - libcurl's read/write/header callbacks are routed back into host closures
//!
//! libcurl itself is loaded at runtime (see [`Library`]); nothing links
//! against it at build time.

pub mod constants;
pub mod error;
pub mod fetch;
pub mod ffi;
pub mod library;
pub mod session;
pub mod value;
pub mod version;

pub use error::{CallbackError, CurlError, CurlResult, Direction};
pub use fetch::{fetch_url, track_location, UrlResult};
pub use ffi::{classify_info, classify_option, LoadError, NativeCurl, TypeClass};
pub use library::Library;
pub use session::Session;
pub use value::{ReadCallback, Value, WriteCallback};
pub use version::{library_version, library_version_info, VersionInfo};
