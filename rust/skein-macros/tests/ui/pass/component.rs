use std::sync::Arc;

use skein_component::prelude::*;
use skein_component::reflect::Introspect;

pub struct Session;

impl Context for Session {}

skein_component::context!(Session);

#[derive(facet::Facet)]
pub struct Ping {
    seq: u32,
}

skein_component::message!(Ping);

pub struct Echo;

#[component]
impl Echo {
    pub const LIMIT: usize = 64;

    pub const fn new() -> Self {
        Echo
    }

    /// Request with a typed payload.
    pub fn ping(&self, _ctx: &Session, req: Box<Ping>) -> Result<Box<Ping>, RpcError> {
        Ok(req)
    }

    pub fn raw(&self, _ctx: &Session, mut data: Bytes) -> Result<Bytes, RpcError> {
        data.truncate(Self::LIMIT);
        Ok(data)
    }

    pub async fn later(&self, _ctx: &Session) {}

    pub fn r#type(&self, _ctx: &Session) {}

    fn helper(&self) -> u32 {
        7
    }
}

impl Component for Echo {}

fn main() {
    let methods = Echo::methods();
    assert_eq!(methods.len(), 4);
    assert_eq!(methods[2].name(), "type");
    assert!(!methods[3].is_public());
    assert_eq!(Echo::new().helper(), 7);

    let mut service = Service::new(Arc::new(Echo), ComponentOptions::new());
    service.extract_handlers().expect("handlers");
    service.extract_remotes().expect("remotes");
    assert_eq!(service.handlers().len(), 3);
    assert_eq!(service.remotes().len(), 1);
}
