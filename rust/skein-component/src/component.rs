use skein_reflect::Introspect;

use crate::NameFunc;

/// A unit of server logic whose methods are exposed as handlers and/or
/// remotes.
///
/// The lifecycle hooks are called by the application in order: `init` and
/// `after_init` at startup, `before_shutdown` and `shutdown` on the way
/// down. All of them default to doing nothing.
pub trait Component: Introspect + Send + Sync {
    fn init(&self) {}

    fn after_init(&self) {}

    fn before_shutdown(&self) {}

    fn shutdown(&self) {}
}

/// Per-component registration options.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    name: Option<String>,
    name_func: Option<NameFunc>,
}

impl ComponentOptions {
    pub fn new() -> Self {
        ComponentOptions::default()
    }

    /// Route the component under `name` instead of its type name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Rewrite method names before they are routed.
    pub fn with_name_func(mut self, name_func: impl Into<NameFunc>) -> Self {
        self.name_func = Some(name_func.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn name_func(&self) -> Option<&NameFunc> {
        self.name_func.as_ref()
    }
}
