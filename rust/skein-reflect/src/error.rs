use std::collections::BTreeMap;
use std::fmt;

/// Status codes carried by [`RpcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// The caller gave up on the call
    Cancelled = 1,

    /// Nothing more specific is known
    Unknown = 2,

    /// Malformed or rejected payload
    InvalidArgument = 3,

    /// The call's deadline passed before it completed
    DeadlineExceeded = 4,

    /// Route or entity not found
    NotFound = 5,

    /// The caller may not perform this call
    PermissionDenied = 7,

    /// Route exists but is not callable this way
    Unimplemented = 12,

    /// Failure inside the server
    Internal = 13,

    /// The server cannot take calls right now
    Unavailable = 14,
}

impl ErrorCode {
    /// Convert from a u32 wire value.
    /// Returns None if the value doesn't match a known code.
    pub fn from_u32(val: u32) -> Option<Self> {
        Some(match val {
            1 => ErrorCode::Cancelled,
            2 => ErrorCode::Unknown,
            3 => ErrorCode::InvalidArgument,
            4 => ErrorCode::DeadlineExceeded,
            5 => ErrorCode::NotFound,
            7 => ErrorCode::PermissionDenied,
            12 => ErrorCode::Unimplemented,
            13 => ErrorCode::Internal,
            14 => ErrorCode::Unavailable,
            _ => return None,
        })
    }

    /// Convert to u32 for wire transmission.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        ErrorCode::from_u32(value).ok_or(UnknownErrorCode(value))
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.as_u32()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Cancelled => "cancelled",
            ErrorCode::Unknown => "unknown",
            ErrorCode::InvalidArgument => "invalid argument",
            ErrorCode::DeadlineExceeded => "deadline exceeded",
            ErrorCode::NotFound => "not found",
            ErrorCode::PermissionDenied => "permission denied",
            ErrorCode::Unimplemented => "unimplemented",
            ErrorCode::Internal => "internal",
            ErrorCode::Unavailable => "unavailable",
        };
        f.write_str(name)
    }
}

/// Error when converting from an unknown error code value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(pub u32);

/// The framework's standard failure type.
///
/// Remote and request-handler methods report failures through this exact
/// type; the method classifiers compare against it by `TypeId`, so a
/// look-alike error type does not qualify.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RpcError {
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Extra key/value pairs forwarded to the caller.
    pub metadata: BTreeMap<String, String>,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        RpcError {
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RpcError::new(ErrorCode::Internal, message)
    }

    /// Attach a metadata entry, replacing any previous value for `key`.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
