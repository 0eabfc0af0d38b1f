//! Builders for the name → descriptor tables of one owning type.
//!
//! Methods are visited in [`MethodSet`] order. When two methods end up
//! under the same routed name (usually because of a lossy [`NameFunc`]), the
//! one visited last replaces the earlier entry and a warning is logged.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use skein_reflect::{Introspect, MethodSet};
use tracing::{debug, trace, warn};

use crate::method::{check_handler_method, check_remote_method};
use crate::name::public_name;
use crate::{Handler, MessageType, NameFunc, Remote};

/// Remote descriptors keyed by routed name.
pub type RemoteMap = HashMap<String, Remote>;

/// Handler descriptors keyed by routed name.
pub type HandlerMap = HashMap<String, Handler>;

/// Collects every remote-shaped method of `methods`.
pub fn suitable_remote_methods(methods: &MethodSet, name_func: Option<&NameFunc>) -> RemoteMap {
    let owner = methods.owner().short_name();
    let mut remotes = RemoteMap::new();

    for (handle, method) in methods.iter() {
        if let Err(reason) = check_remote_method(method) {
            trace!(owner, method = method.name(), %reason, "skipping remote candidate");
            continue;
        }

        let name = public_name(method.name(), name_func);
        let arg_type = method.signature().input_at(2).copied();
        debug!(owner, method = method.name(), route = %name, has_args = arg_type.is_some(), "found remote");
        insert_last_wins(&mut remotes, owner, name, Remote::new(handle, arg_type));
    }

    remotes
}

/// Collects every handler-shaped method of `methods`.
pub fn suitable_handler_methods(methods: &MethodSet, name_func: Option<&NameFunc>) -> HandlerMap {
    let owner = methods.owner().short_name();
    let mut handlers = HandlerMap::new();

    for (handle, method) in methods.iter() {
        if let Err(reason) = check_handler_method(method) {
            trace!(owner, method = method.name(), %reason, "skipping handler candidate");
            continue;
        }

        let sig = method.signature();
        let message_type = if sig.num_out() == 0 {
            MessageType::Notify
        } else {
            MessageType::Request
        };
        let name = public_name(method.name(), name_func);
        let handler = Handler::new(handle, sig.input_at(2).copied(), message_type);
        debug!(
            owner,
            method = method.name(),
            route = %name,
            %message_type,
            raw = handler.is_raw_arg(),
            "found handler"
        );
        insert_last_wins(&mut handlers, owner, name, handler);
    }

    handlers
}

/// [`suitable_remote_methods`] over the method table of `T`.
pub fn remote_methods<T: Introspect>(name_func: Option<&NameFunc>) -> RemoteMap {
    suitable_remote_methods(&MethodSet::of::<T>(), name_func)
}

/// [`suitable_handler_methods`] over the method table of `T`.
pub fn handler_methods<T: Introspect>(name_func: Option<&NameFunc>) -> HandlerMap {
    suitable_handler_methods(&MethodSet::of::<T>(), name_func)
}

fn insert_last_wins<D>(map: &mut HashMap<String, D>, owner: &str, name: String, descriptor: D) {
    match map.entry(name) {
        Entry::Occupied(mut entry) => {
            warn!(owner, route = %entry.key(), "duplicate route, replacing earlier method");
            entry.insert(descriptor);
        }
        Entry::Vacant(entry) => {
            entry.insert(descriptor);
        }
    }
}
