#![deny(unsafe_code)]
#![doc = include_str!("../README.md")]

// Lets `#[component]` expansions (which use `::skein_component::` paths)
// compile inside this crate's own tests.
extern crate self as skein_component;

mod component;
mod descriptor;
mod error;
mod message;
mod method;
mod name;
mod registry;
mod service;

pub use component::{Component, ComponentOptions};
pub use descriptor::{Handler, Remote};
pub use error::{ComponentError, UnknownMessageType};
pub use message::MessageType;
pub use method::{
    Rejection, check_handler_method, check_remote_method, is_exported, is_handler_method,
    is_remote_method,
};
pub use name::NameFunc;
pub use registry::{
    HandlerMap, RemoteMap, handler_methods, remote_methods, suitable_handler_methods,
    suitable_remote_methods,
};
pub use service::Service;

/// Derives [`reflect::Introspect`] for an inherent impl block.
pub use skein_macros::component;

pub use skein_reflect as reflect;
pub use skein_reflect::{Bytes, Context, ErrorCode, Message, RpcError, context, message, value};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use skein_component::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Bytes, Component, ComponentOptions, Context, ErrorCode, Handler, Message, MessageType,
        NameFunc, Remote, RpcError, Service, component,
    };
    pub use skein_reflect::facet::Facet;
}
