use std::sync::Arc;

use skein_reflect::{MethodSet, TypeInfo};
use tracing::debug;

use crate::registry::{HandlerMap, RemoteMap, suitable_handler_methods, suitable_remote_methods};
use crate::{Component, ComponentError, ComponentOptions, is_exported};

/// A registered component: its receiver, routed name and the handler and
/// remote tables extracted from its methods.
pub struct Service<C> {
    name: String,
    owner: TypeInfo,
    receiver: Arc<C>,
    methods: MethodSet,
    handlers: HandlerMap,
    remotes: RemoteMap,
    options: ComponentOptions,
}

impl<C: Component> Service<C> {
    /// Wraps `receiver`. Nothing is extracted until
    /// [`extract_handlers`](Self::extract_handlers) or
    /// [`extract_remotes`](Self::extract_remotes) is called.
    pub fn new(receiver: Arc<C>, options: ComponentOptions) -> Self {
        let methods = MethodSet::of::<C>();
        let owner = *methods.owner();
        let name = options
            .name()
            .map(str::to_owned)
            .unwrap_or_else(|| owner.short_name().to_owned());

        Service {
            name,
            owner,
            receiver,
            methods,
            handlers: HandlerMap::new(),
            remotes: RemoteMap::new(),
            options,
        }
    }

    /// Fills [`handlers`](Self::handlers) from the component's methods.
    pub fn extract_handlers(&mut self) -> Result<(), ComponentError> {
        self.check_type()?;

        let handlers = suitable_handler_methods(&self.methods, self.options.name_func());
        if handlers.is_empty() {
            return Err(ComponentError::NoHandlerMethods {
                name: self.name.clone(),
            });
        }

        debug!(service = %self.name, count = handlers.len(), "extracted handlers");
        self.handlers = handlers;
        Ok(())
    }

    /// Fills [`remotes`](Self::remotes) from the component's methods.
    pub fn extract_remotes(&mut self) -> Result<(), ComponentError> {
        self.check_type()?;

        let remotes = suitable_remote_methods(&self.methods, self.options.name_func());
        if remotes.is_empty() {
            return Err(ComponentError::NoRemoteMethods {
                name: self.name.clone(),
            });
        }

        debug!(service = %self.name, count = remotes.len(), "extracted remotes");
        self.remotes = remotes;
        Ok(())
    }

    /// The receiver's type must have a name and be exported, regardless of
    /// the routed name chosen through options.
    fn check_type(&self) -> Result<(), ComponentError> {
        let type_name = self.owner.short_name();
        if type_name.is_empty() {
            return Err(ComponentError::NoServiceName {
                type_name: self.owner.name().to_owned(),
            });
        }
        if !is_exported(type_name) {
            return Err(ComponentError::TypeNotExported {
                name: type_name.to_owned(),
            });
        }
        Ok(())
    }
}

impl<C> Service<C> {
    /// Routed service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> &Arc<C> {
        &self.receiver
    }

    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    pub fn handlers(&self) -> &HandlerMap {
        &self.handlers
    }

    pub fn remotes(&self) -> &RemoteMap {
        &self.remotes
    }

    pub fn options(&self) -> &ComponentOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bytes, Context, MessageType, NameFunc, RpcError, component};

    pub struct Session;

    impl Context for Session {}

    crate::context!(Session);

    pub struct Gate;

    #[component]
    impl Gate {
        pub fn open(&self, _ctx: &Session, _payload: Bytes) -> Result<Bytes, RpcError> {
            Ok(Bytes::from_static(b"ok"))
        }

        pub fn knock_twice(&self, _ctx: &Session) {}
    }

    impl Component for Gate {}

    #[derive(facet::Facet)]
    pub struct Lookup {
        key: String,
    }

    crate::message!(Lookup);

    /// Takes its payload by value: a remote, but never a handler.
    pub struct Directory;

    #[component]
    impl Directory {
        pub fn find(&self, _ctx: &Session, req: Lookup) -> Result<Box<Lookup>, RpcError> {
            Ok(Box::new(req))
        }
    }

    impl Component for Directory {}

    #[allow(non_camel_case_types)]
    pub struct lowercase_gate;

    #[component]
    impl lowercase_gate {
        pub fn knock(&self, _ctx: &Session) {}
    }

    impl Component for lowercase_gate {}

    #[test]
    fn extracts_handlers_with_type_name() {
        let mut service = Service::new(Arc::new(Gate), ComponentOptions::new());
        service.extract_handlers().expect("handlers");

        assert_eq!(service.name(), "Gate");
        assert_eq!(service.handlers().len(), 2);
        assert_eq!(service.handlers()["open"].message_type(), MessageType::Request);
        assert_eq!(service.handlers()["knock_twice"].message_type(), MessageType::Notify);
        assert!(service.remotes().is_empty());
    }

    #[test]
    fn options_rename_service_and_methods() {
        let options = ComponentOptions::new()
            .with_name("gate")
            .with_name_func(NameFunc::lower_camel_case());
        let mut service = Service::new(Arc::new(Gate), options);
        service.extract_handlers().expect("handlers");

        assert_eq!(service.name(), "gate");
        assert!(service.handlers().contains_key("open"));
        assert!(service.handlers().contains_key("knockTwice"));
        assert!(service.options().name_func().is_some());
    }

    #[test]
    fn no_remotes_is_an_error() {
        let mut service = Service::new(Arc::new(Gate), ComponentOptions::new());
        let err = service.extract_remotes().unwrap_err();
        assert_eq!(
            err,
            ComponentError::NoRemoteMethods {
                name: "Gate".to_owned()
            }
        );
        assert_eq!(err.to_string(), "type Gate has no exported methods of remote type");
        assert!(service.remotes().is_empty());
    }

    #[test]
    fn no_handlers_is_an_error() {
        let mut service = Service::new(Arc::new(Directory), ComponentOptions::new());
        service.extract_remotes().expect("remotes");
        assert_eq!(service.remotes().len(), 1);
        assert!(service.remotes()["find"].arg_type().is_some_and(|ty| !ty.is_pointer()));

        let err = service.extract_handlers().unwrap_err();
        assert_eq!(
            err,
            ComponentError::NoHandlerMethods {
                name: "Directory".to_owned()
            }
        );
        assert_eq!(err.to_string(), "type Directory has no exported methods of handler type");
        assert!(service.handlers().is_empty());
    }

    #[test]
    fn unexported_type_is_rejected_even_when_renamed() {
        let options = ComponentOptions::new().with_name("Gate");
        let mut service = Service::new(Arc::new(lowercase_gate), options);
        let err = service.extract_handlers().unwrap_err();
        assert_eq!(
            err,
            ComponentError::TypeNotExported {
                name: "lowercase_gate".to_owned()
            }
        );
        assert_eq!(err.to_string(), "type lowercase_gate is not exported");
    }
}
