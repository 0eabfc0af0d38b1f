use std::fmt;
use std::sync::Arc;

use heck::{ToLowerCamelCase, ToSnakeCase};

/// Rewrites a method's declared name into the name it is routed under.
///
/// Registry builders take an `Option<&NameFunc>`; `None` keeps declared
/// names as they are.
#[derive(Clone)]
pub struct NameFunc(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl NameFunc {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        NameFunc(Arc::new(f))
    }

    /// `GetItem` → `getitem`
    pub fn lowercase() -> Self {
        NameFunc::new(str::to_lowercase)
    }

    /// `GetItem` → `get_item`
    pub fn snake_case() -> Self {
        NameFunc::new(|name| name.to_snake_case())
    }

    /// `get_item` → `getItem`
    pub fn lower_camel_case() -> Self {
        NameFunc::new(|name| name.to_lower_camel_case())
    }

    pub fn apply(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl fmt::Debug for NameFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NameFunc(..)")
    }
}

impl<F> From<F> for NameFunc
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        NameFunc::new(f)
    }
}

/// The routed name of a method: rewritten when a function is given,
/// declared otherwise.
pub(crate) fn public_name(name: &str, name_func: Option<&NameFunc>) -> String {
    match name_func {
        Some(f) => f.apply(name),
        None => name.to_owned(),
    }
}
