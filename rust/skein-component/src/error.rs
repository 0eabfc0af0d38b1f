/// Why a component could not be turned into a service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error("no service name for type {type_name}")]
    NoServiceName { type_name: String },

    #[error("type {name} is not exported")]
    TypeNotExported { name: String },

    #[error("type {name} has no exported methods of handler type")]
    NoHandlerMethods { name: String },

    #[error("type {name} has no exported methods of remote type")]
    NoRemoteMethods { name: String },
}

/// Error when converting from an unknown message type value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown message type: {0}")]
pub struct UnknownMessageType(pub u8);
