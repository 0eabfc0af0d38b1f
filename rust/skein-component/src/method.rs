//! Signature predicates for remote and handler methods.
//!
//! Both predicates look at a method's declared shape only. A method that
//! fails one is not an error: it is simply not callable through that path.
//! The `check_*` variants report the first rule that failed so the registry
//! builders can log it.

use std::fmt;

use skein_reflect::{Method, TypeInfo};

/// Whether `name` belongs to the exported surface: its first character is
/// an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// The first classification rule a method violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not part of the public surface.
    Unexported,
    /// Inputs (receiver included) other than 2 or 3.
    InputArity(usize),
    /// First parameter does not implement `Context`.
    MissingContext,
    /// Remote payload does not implement `Message`.
    ArgNotMessage,
    /// Handler payload is neither a pointer nor `Bytes`.
    ArgNotPointerOrBytes,
    /// Wrong number of return values.
    OutputArity(usize),
    /// Remote reply is not a pointer.
    ReplyNotPointer,
    /// Remote reply does not implement `Message`.
    ReplyNotMessage,
    /// Handler reply is neither a pointer nor `Bytes`.
    ReplyNotPointerOrBytes,
    /// Second return value is not exactly `RpcError`.
    ErrorNotRpcError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unexported => write!(f, "method is not public"),
            Rejection::InputArity(n) => {
                write!(f, "expected receiver, context and optional payload, got {n} inputs")
            }
            Rejection::MissingContext => write!(f, "first parameter is not a context"),
            Rejection::ArgNotMessage => write!(f, "payload is not a message"),
            Rejection::ArgNotPointerOrBytes => write!(f, "payload is neither a pointer nor bytes"),
            Rejection::OutputArity(n) => write!(f, "unsupported number of return values: {n}"),
            Rejection::ReplyNotPointer => write!(f, "reply is not a pointer"),
            Rejection::ReplyNotMessage => write!(f, "reply is not a message"),
            Rejection::ReplyNotPointerOrBytes => write!(f, "reply is neither a pointer nor bytes"),
            Rejection::ErrorNotRpcError => write!(f, "second return value is not RpcError"),
        }
    }
}

/// Checks the shape `(&self, ctx, [payload: Message]) -> (Pointer + Message, RpcError)`.
pub fn check_remote_method(method: &Method) -> Result<(), Rejection> {
    if !method.is_public() {
        return Err(Rejection::Unexported);
    }

    let sig = method.signature();
    if let Some(arg) = payload(sig.inputs())? {
        if !arg.implements_message() {
            return Err(Rejection::ArgNotMessage);
        }
    }

    let [reply, err] = sig.outputs() else {
        return Err(Rejection::OutputArity(sig.num_out()));
    };
    if !reply.is_pointer() {
        return Err(Rejection::ReplyNotPointer);
    }
    if !err.is_rpc_error() {
        return Err(Rejection::ErrorNotRpcError);
    }
    if !reply.implements_message() {
        return Err(Rejection::ReplyNotMessage);
    }
    Ok(())
}

/// Checks the shape `(&self, ctx, [payload: Pointer | Bytes]) -> [(Pointer | Bytes, RpcError)]`.
pub fn check_handler_method(method: &Method) -> Result<(), Rejection> {
    if !method.is_public() {
        return Err(Rejection::Unexported);
    }

    let sig = method.signature();
    if let Some(arg) = payload(sig.inputs())? {
        if !arg.is_pointer() && !arg.is_bytes() {
            return Err(Rejection::ArgNotPointerOrBytes);
        }
    }

    match sig.outputs() {
        [] => Ok(()),
        [reply, err] => {
            if !err.is_rpc_error() {
                return Err(Rejection::ErrorNotRpcError);
            }
            if !reply.is_bytes() && !reply.is_pointer() {
                return Err(Rejection::ReplyNotPointerOrBytes);
            }
            Ok(())
        }
        other => Err(Rejection::OutputArity(other.len())),
    }
}

/// Whether `method` can be called by other servers.
pub fn is_remote_method(method: &Method) -> bool {
    check_remote_method(method).is_ok()
}

/// Whether `method` can be called for client messages.
pub fn is_handler_method(method: &Method) -> bool {
    check_handler_method(method).is_ok()
}

/// Splits `[receiver, ctx, payload?]`, requiring `ctx` to be a context.
fn payload(inputs: &[TypeInfo]) -> Result<Option<&TypeInfo>, Rejection> {
    let (ctx, arg) = match inputs {
        [_, ctx] => (ctx, None),
        [_, ctx, arg] => (ctx, Some(arg)),
        other => return Err(Rejection::InputArity(other.len())),
    };
    if !ctx.implements_context() {
        return Err(Rejection::MissingContext);
    }
    Ok(arg)
}
