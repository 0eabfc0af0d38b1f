#![deny(unsafe_code)]

//! Introspection model for skein components.
//!
//! Rust has no runtime method reflection, so an owning type describes its
//! callable surface explicitly through [`Introspect`]: a list of [`Method`]s,
//! each with a [`Visibility`] and a [`Signature`] made of [`TypeInfo`]s.
//! The table is usually generated by `#[skein_component::component]`, but it
//! can also be written by hand.
//!
//! A [`TypeInfo`] records a type's identity, whether it is a pointer-like
//! type, and which framework capabilities it carries ([`Context`] and
//! [`Message`]). Capabilities can only be attached through constructors that
//! are bounded by the capability trait, so a flag always mirrors a real impl.
//!
//! ```rust
//! use skein_reflect::{Method, Signature, Visibility};
//!
//! struct Lobby;
//! skein_reflect::value!(Lobby);
//!
//! let method = Method::new(
//!     "Count",
//!     Visibility::Public,
//!     Signature::receiver::<Lobby>().output::<u32>(),
//! );
//! assert_eq!(method.signature().num_in(), 1);
//! ```

mod capability;
mod error;
mod method;
mod signature;
mod types;

pub use capability::{Context, Message};
pub use error::{ErrorCode, RpcError, UnknownErrorCode};
pub use method::{Introspect, Method, MethodHandle, MethodSet, Visibility};
pub use signature::Signature;
pub use types::{Kind, Reflect, TypeInfo};

// Re-exported so `#[derive(Facet)]` message types and the declarative
// macros resolve through a single dependency.
pub use bytes::Bytes;
pub use facet;
