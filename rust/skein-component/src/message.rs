use std::fmt;

use crate::UnknownMessageType;

/// How a client message reaches a handler.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// The client waits for a response.
    Request = 0,

    /// Fire-and-forget; no response is sent.
    Notify = 1,
}

impl MessageType {
    /// Convert from a wire value.
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(MessageType::Request),
            1 => Some(MessageType::Notify),
            _ => None,
        }
    }

    /// Convert to a wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the dispatcher must send a response.
    pub fn expects_response(self) -> bool {
        self == MessageType::Request
    }
}

impl TryFrom<u8> for MessageType {
    type Error = UnknownMessageType;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        MessageType::from_u8(val).ok_or(UnknownMessageType(val))
    }
}

impl From<MessageType> for u8 {
    fn from(ty: MessageType) -> u8 {
        ty.as_u8()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Request => f.write_str("request"),
            MessageType::Notify => f.write_str("notify"),
        }
    }
}
