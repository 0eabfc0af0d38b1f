//! Type descriptors.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bytes::Bytes;
use facet::{Facet, Shape};

use crate::{Context, Message, RpcError};

/// Coarse shape of a type, as far as method classification cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Owned value: structs, integers, `String`, `Bytes`, ...
    Value,
    /// Indirection to another value: `Box<T>`, `Arc<T>`, `&'static T`.
    Pointer,
}

/// Identity, kind and capabilities of a `'static` type.
///
/// Message types (and pointers to them) also carry their facet [`Shape`],
/// which is what a dispatcher decodes payloads into.
///
/// Equality and hashing only look at the `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    kind: Kind,
    context: bool,
    shape: Option<&'static Shape>,
}

impl TypeInfo {
    /// A plain value type without capabilities.
    pub fn value<T: 'static>() -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind: Kind::Value,
            context: false,
            shape: None,
        }
    }

    /// A type implementing [`Context`].
    pub fn context<C: Context>() -> Self {
        TypeInfo {
            context: true,
            ..TypeInfo::value::<C>()
        }
    }

    /// A type implementing [`Message`].
    pub fn message<M: Message>() -> Self {
        TypeInfo {
            shape: Some(<M as Facet<'static>>::SHAPE),
            ..TypeInfo::value::<M>()
        }
    }

    /// A pointer type `P` to `pointee`. Capabilities and shape are inherited
    /// from the pointee, so `Box<M>` is a message whenever `M` is.
    pub fn pointer<P: 'static>(pointee: TypeInfo) -> Self {
        TypeInfo {
            id: TypeId::of::<P>(),
            name: type_name::<P>(),
            kind: Kind::Pointer,
            context: pointee.context,
            shape: pointee.shape,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of [`name`](Self::name), without generic arguments
    /// or reference sigils.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        let base = base.rsplit("::").next().unwrap_or(base);
        base.trim_start_matches('&')
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == Kind::Pointer
    }

    pub fn implements_context(&self) -> bool {
        self.context
    }

    pub fn implements_message(&self) -> bool {
        self.shape.is_some()
    }

    /// Facet shape of the message (or of the pointed-to message).
    pub fn shape(&self) -> Option<&'static Shape> {
        self.shape
    }

    /// Exact type comparison.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Whether this is the raw payload type, [`Bytes`].
    pub fn is_bytes(&self) -> bool {
        self.is::<Bytes>()
    }

    /// Whether this is the standard failure type, [`RpcError`].
    pub fn is_rpc_error(&self) -> bool {
        self.is::<RpcError>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("context", &self.context)
            .field("message", &self.shape.is_some())
            .finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Types that can appear in a method [`Signature`](crate::Signature).
///
/// Pointer impls are provided for `Box`, `Arc` and `&'static`; user types opt
/// in through [`message!`](crate::message), [`context!`](crate::context) or
/// [`value!`](crate::value).
pub trait Reflect: 'static {
    fn type_info() -> TypeInfo;
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::pointer::<Self>(T::type_info())
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::pointer::<Self>(T::type_info())
    }
}

impl<T: Reflect> Reflect for &'static T {
    fn type_info() -> TypeInfo {
        TypeInfo::pointer::<Self>(T::type_info())
    }
}

/// Implements [`Message`] and [`Reflect`] for structured payload types.
///
/// The types must already implement `Facet`.
#[macro_export]
macro_rules! message {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Message for $ty {}

            impl $crate::Reflect for $ty {
                fn type_info() -> $crate::TypeInfo {
                    $crate::TypeInfo::message::<$ty>()
                }
            }
        )+
    };
}

/// Implements [`Reflect`] for types that already implement [`Context`].
#[macro_export]
macro_rules! context {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn type_info() -> $crate::TypeInfo {
                    $crate::TypeInfo::context::<$ty>()
                }
            }
        )+
    };
}

/// Implements [`Reflect`] for plain value types.
#[macro_export]
macro_rules! value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn type_info() -> $crate::TypeInfo {
                    $crate::TypeInfo::value::<$ty>()
                }
            }
        )+
    };
}

value!(
    (),
    bool,
    u8,
    u16,
    u32,
    u64,
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    Bytes,
    RpcError,
);
