//! Methods, method handles and per-type method sets.

use std::borrow::Cow;

use crate::{Reflect, Signature, TypeInfo};

/// Whether a method is part of the owning type's public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// `pub fn`
    Public,
    /// Anything narrower than `pub`.
    Private,
}

/// One operation of an owning type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: Cow<'static, str>,
    visibility: Visibility,
    signature: Signature,
}

impl Method {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        visibility: Visibility,
        signature: Signature,
    ) -> Self {
        Method {
            name: name.into(),
            visibility,
            signature,
        }
    }

    pub fn public(name: impl Into<Cow<'static, str>>, signature: Signature) -> Self {
        Method::new(name, Visibility::Public, signature)
    }

    pub fn private(name: impl Into<Cow<'static, str>>, signature: Signature) -> Self {
        Method::new(name, Visibility::Private, signature)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// Stable reference to a method of an owning type: the owner, the method's
/// position in the owner's [`MethodSet`] and its declared name.
///
/// A dispatcher resolves a handle back to the method (and to the code that
/// runs it) through the owner's method table; the handle itself stays valid
/// for as long as the owning type's table does not change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodHandle {
    owner: TypeInfo,
    index: usize,
    name: Cow<'static, str>,
}

impl MethodHandle {
    pub fn owner(&self) -> &TypeInfo {
        &self.owner
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Declared name, before any rewriting.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An owning type that can enumerate its methods.
///
/// Implemented by `#[component]` on an inherent impl block, or by hand.
/// `methods` must return the same table on every call; handle indices
/// point into it.
pub trait Introspect: Reflect {
    fn methods() -> Vec<Method>;
}

/// The enumerated methods of one owning type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet {
    owner: TypeInfo,
    methods: Vec<Method>,
}

impl MethodSet {
    pub fn of<T: Introspect>() -> Self {
        MethodSet::new(T::type_info(), T::methods())
    }

    pub fn new(owner: TypeInfo, methods: Vec<Method>) -> Self {
        MethodSet { owner, methods }
    }

    pub fn owner(&self) -> &TypeInfo {
        &self.owner
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Method> {
        self.methods.get(index)
    }

    pub fn handle(&self, index: usize) -> Option<MethodHandle> {
        self.methods.get(index).map(|method| MethodHandle {
            owner: self.owner,
            index,
            name: method.name.clone(),
        })
    }

    /// Iterates methods with their handles, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (MethodHandle, &Method)> + '_ {
        self.methods.iter().enumerate().map(|(index, method)| {
            let handle = MethodHandle {
                owner: self.owner,
                index,
                name: method.name.clone(),
            };
            (handle, method)
        })
    }

    /// Finds the method a handle was created for. Returns `None` for
    /// handles of another owner or of a table that has since changed.
    pub fn resolve(&self, handle: &MethodHandle) -> Option<&Method> {
        if handle.owner != self.owner {
            return None;
        }
        self.methods
            .get(handle.index)
            .filter(|method| method.name == handle.name)
    }
}
