//! Descriptors handed to the dispatcher.

use skein_reflect::{MethodHandle, TypeInfo};

use crate::MessageType;

/// A method other servers can call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    method: MethodHandle,
    arg_type: Option<TypeInfo>,
}

impl Remote {
    pub(crate) fn new(method: MethodHandle, arg_type: Option<TypeInfo>) -> Self {
        Remote { method, arg_type }
    }

    pub fn method(&self) -> &MethodHandle {
        &self.method
    }

    /// Whether the method takes a payload after the context.
    pub fn has_args(&self) -> bool {
        self.arg_type.is_some()
    }

    /// The payload's message type.
    pub fn arg_type(&self) -> Option<&TypeInfo> {
        self.arg_type.as_ref()
    }
}

/// A method clients can call with a request or a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    method: MethodHandle,
    arg_type: Option<TypeInfo>,
    message_type: MessageType,
}

impl Handler {
    pub(crate) fn new(
        method: MethodHandle,
        arg_type: Option<TypeInfo>,
        message_type: MessageType,
    ) -> Self {
        Handler {
            method,
            arg_type,
            message_type,
        }
    }

    pub fn method(&self) -> &MethodHandle {
        &self.method
    }

    /// The payload's declared type, `Bytes` for raw handlers.
    pub fn arg_type(&self) -> Option<&TypeInfo> {
        self.arg_type.as_ref()
    }

    /// Whether the payload is passed through undecoded.
    pub fn is_raw_arg(&self) -> bool {
        self.arg_type.as_ref().is_some_and(TypeInfo::is_bytes)
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }
}
