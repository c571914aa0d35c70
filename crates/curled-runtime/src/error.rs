//! Error types for the curled runtime

use crate::constants;
use crate::ffi::loader::LoadError;
use crate::ffi::types::TypeClass;
use std::fmt;
use std::io;
use thiserror::Error;

/// Which selector namespace an operation addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `curl_easy_setopt` selectors
    Option,
    /// `curl_easy_getinfo` selectors
    Info,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Option => f.write_str("option"),
            Direction::Info => f.write_str("info"),
        }
    }
}

/// Errors returned by sessions, codecs and the library wrapper
#[derive(Error, Debug)]
pub enum CurlError {
    /// The selector is not defined by the libcurl header at all
    #[error("unknown {direction} selector {selector}")]
    UnknownSelector { direction: Direction, selector: i32 },

    /// The header defines the selector but no handler exists for it in this direction
    #[error("{name} is not supported as {direction} selector")]
    UnsupportedSelector {
        direction: Direction,
        selector: i32,
        name: String,
    },

    /// The host value has the wrong shape for the selector's class
    #[error("{name} expects a {class} value, got {got}")]
    TypeMismatch {
        selector: i32,
        name: String,
        class: TypeClass,
        got: &'static str,
    },

    /// The host value has the right shape but cannot be represented natively
    #[error("invalid value for {name}: {reason}")]
    Validation {
        selector: i32,
        name: String,
        reason: String,
    },

    /// The loaded libcurl lacks the requested capability
    #[error("{} is not available in this libcurl ({operation}, code {code})", subject(.operation, .selector))]
    Capability {
        operation: &'static str,
        code: i32,
        selector: Option<i32>,
    },

    /// libcurl reported a failure
    #[error("{}: {message} ({code})", subject(.operation, .selector))]
    NativeFailure {
        operation: &'static str,
        code: i32,
        selector: Option<i32>,
        message: String,
    },

    /// libcurl could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl CurlError {
    /// The raw `CURLcode` behind a native error, if any
    pub fn code(&self) -> Option<i32> {
        match self {
            CurlError::Capability { code, .. } | CurlError::NativeFailure { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// The selector this error concerns, if any
    pub fn selector(&self) -> Option<i32> {
        match self {
            CurlError::UnknownSelector { selector, .. }
            | CurlError::UnsupportedSelector { selector, .. }
            | CurlError::TypeMismatch { selector, .. }
            | CurlError::Validation { selector, .. } => Some(*selector),
            CurlError::Capability { selector, .. } | CurlError::NativeFailure { selector, .. } => {
                *selector
            }
            CurlError::Load(_) => None,
        }
    }
}

/// What a native error is about: the selector's header name when known,
/// otherwise the failing function
fn subject(operation: &str, selector: &Option<i32>) -> String {
    match selector {
        Some(selector) if operation == "curl_easy_getinfo" => info_label(*selector),
        Some(selector) => option_label(*selector),
        None => operation.to_string(),
    }
}

/// Failure raised by host code inside a libcurl callback
#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("{name} callback failed: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name} callback panicked: {message}")]
    Panicked { name: String, message: String },
}

/// Result type for curled operations
pub type CurlResult<T> = Result<T, CurlError>;

/// Header name of an option selector, or its number
pub(crate) fn option_label(selector: i32) -> String {
    constants::option_name(selector)
        .map(str::to_string)
        .unwrap_or_else(|| selector.to_string())
}

/// Header name of an info selector, or its number
pub(crate) fn info_label(selector: i32) -> String {
    constants::info_name(selector)
        .map(str::to_string)
        .unwrap_or_else(|| selector.to_string())
}

/// Header name of a selector in either namespace
pub(crate) fn selector_label(direction: Direction, selector: i32) -> String {
    match direction {
        Direction::Option => option_label(selector),
        Direction::Info => info_label(selector),
    }
}
