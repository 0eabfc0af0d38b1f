//! Registry construction over complete component method tables.

use std::collections::BTreeSet;

use facet::Facet;
use skein_component::reflect::{Introspect, Method, MethodSet, Signature};
use skein_component::{
    Bytes, Context, HandlerMap, MessageType, NameFunc, RpcError, component, handler_methods,
    remote_methods,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Session;

impl Context for Session {}

#[derive(Facet)]
pub struct Req {
    id: u64,
}

#[derive(Facet)]
pub struct Resp {
    name: String,
}

#[derive(Facet)]
pub struct Pong {
    at: u64,
}

#[derive(Facet)]
pub struct Evt {
    kind: u8,
}

skein_component::context!(Session);
skein_component::message!(Req, Resp, Pong, Evt);

fn keys<D>(map: &std::collections::HashMap<String, D>) -> BTreeSet<&str> {
    map.keys().map(String::as_str).collect()
}

/// Five methods covering every accepted shape plus one unexported method.
pub struct Inventory;

skein_component::value!(Inventory);

impl Introspect for Inventory {
    fn methods() -> Vec<Method> {
        let base = Signature::receiver::<Self>().input::<&'static Session>();
        vec![
            Method::public(
                "GetItem",
                base.clone()
                    .input::<Box<Req>>()
                    .output::<Box<Resp>>()
                    .output::<RpcError>(),
            ),
            Method::private("notify", base.clone().input::<Box<Req>>()),
            Method::public(
                "Ping",
                base.clone().output::<Box<Pong>>().output::<RpcError>(),
            ),
            Method::public(
                "OnRaw",
                base.clone()
                    .input::<Bytes>()
                    .output::<Bytes>()
                    .output::<RpcError>(),
            ),
            Method::public("OnEvent", base.input::<Box<Evt>>()),
        ]
    }
}

#[test]
fn inventory_scenario() {
    init_tracing();

    let remotes = remote_methods::<Inventory>(None);
    assert_eq!(keys(&remotes), BTreeSet::from(["GetItem", "Ping"]));

    let get_item = &remotes["GetItem"];
    assert!(get_item.has_args());
    assert!(get_item.arg_type().is_some_and(|ty| ty.is::<Box<Req>>()));
    assert_eq!(
        get_item.arg_type().and_then(|ty| ty.shape()).map(|s| s.to_string()),
        Some(Req::SHAPE.to_string())
    );

    let ping = &remotes["Ping"];
    assert!(!ping.has_args());
    assert!(ping.arg_type().is_none());

    let handlers = handler_methods::<Inventory>(None);
    assert!(!handlers.contains_key("notify"));

    let handler_only: BTreeSet<_> = keys(&handlers)
        .into_iter()
        .filter(|name| !remotes.contains_key(*name))
        .collect();
    assert_eq!(handler_only, BTreeSet::from(["OnEvent", "OnRaw"]));

    let on_raw = &handlers["OnRaw"];
    assert!(on_raw.is_raw_arg());
    assert!(on_raw.arg_type().is_some_and(|ty| ty.shape().is_none()));
    assert_eq!(on_raw.message_type(), MessageType::Request);

    let on_event = &handlers["OnEvent"];
    assert!(!on_event.is_raw_arg());
    assert!(on_event.arg_type().is_some_and(|ty| ty.is::<Box<Evt>>()));
    assert_eq!(on_event.message_type(), MessageType::Notify);

    // Request/reply remotes are valid handlers too.
    assert_eq!(handlers["GetItem"].message_type(), MessageType::Request);
    assert_eq!(handlers["Ping"].message_type(), MessageType::Request);
}

#[test]
fn descriptors_keep_payload_flags_consistent() {
    for handler in handler_methods::<Inventory>(None).values() {
        if handler.is_raw_arg() {
            assert!(handler.arg_type().is_some_and(|ty| ty.is_bytes()));
        }
        if let Some(arg) = handler.arg_type() {
            assert!(arg.is_bytes() != arg.implements_message());
        }
    }
    for remote in remote_methods::<Inventory>(None).values() {
        assert_eq!(remote.has_args(), remote.arg_type().is_some());
    }
}

#[test]
fn uppercase_rewrite_still_resolves_the_declared_method() {
    init_tracing();

    pub struct Loud;
    skein_component::value!(Loud);

    impl Introspect for Loud {
        fn methods() -> Vec<Method> {
            vec![Method::public(
                "foo",
                Signature::receiver::<Self>().input::<&'static Session>(),
            )]
        }
    }

    let upper = NameFunc::new(|name: &str| name.to_uppercase());
    let handlers = handler_methods::<Loud>(Some(&upper));
    assert_eq!(keys(&handlers), BTreeSet::from(["FOO"]));

    let methods = MethodSet::of::<Loud>();
    let resolved = methods
        .resolve(handlers["FOO"].method())
        .expect("handle resolves");
    assert_eq!(resolved.name(), "foo");
    assert_eq!(handlers["FOO"].method().name(), "foo");
}

#[test]
fn builders_are_deterministic() {
    let lower = NameFunc::lowercase();
    assert_eq!(
        handler_methods::<Inventory>(Some(&lower)),
        handler_methods::<Inventory>(Some(&lower))
    );
    assert_eq!(
        remote_methods::<Inventory>(None),
        remote_methods::<Inventory>(None)
    );
}

pub struct Odd;

skein_component::value!(Odd);

impl Introspect for Odd {
    fn methods() -> Vec<Method> {
        let recv = Signature::receiver::<Self>();
        let base = recv.clone().input::<&'static Session>();
        vec![
            Method::public("ReceiverOnly", recv.clone()),
            Method::public(
                "TooMany",
                base.clone()
                    .input::<Box<Req>>()
                    .input::<Box<Req>>()
                    .output::<Box<Resp>>()
                    .output::<RpcError>(),
            ),
            Method::public("Single", base.clone().input::<Box<Req>>().output::<Box<Resp>>()),
            Method::public(
                "Triple",
                base.clone()
                    .output::<Box<Resp>>()
                    .output::<RpcError>()
                    .output::<u32>(),
            ),
            Method::public(
                "ValueReply",
                base.clone().output::<u32>().output::<RpcError>(),
            ),
            Method::public(
                "RawRemote",
                base.clone()
                    .input::<Bytes>()
                    .output::<Box<Resp>>()
                    .output::<RpcError>(),
            ),
            Method::public(
                "ValuePayload",
                base.clone().input::<u32>(),
            ),
            Method::public(
                "NoContext",
                recv.input::<u32>().output::<Bytes>().output::<RpcError>(),
            ),
        ]
    }
}

#[test]
fn malformed_shapes_are_excluded() {
    init_tracing();

    assert!(remote_methods::<Odd>(None).is_empty());

    // Raw payloads are fine for handlers, never for remotes.
    let handlers = handler_methods::<Odd>(None);
    assert_eq!(keys(&handlers), BTreeSet::from(["RawRemote"]));
    assert!(handlers["RawRemote"].is_raw_arg());
}

pub struct Shop;

#[component]
impl Shop {
    pub fn get_item(&self, _ctx: &Session, _req: Box<Req>) -> Result<Box<Resp>, RpcError> {
        Ok(Box::new(Resp {
            name: String::new(),
        }))
    }

    pub fn ping(&self, _ctx: &Session) -> Result<Box<Pong>, RpcError> {
        Ok(Box::new(Pong { at: 0 }))
    }

    pub fn on_raw(&self, _ctx: &Session, data: Bytes) -> Result<Bytes, RpcError> {
        Ok(data)
    }

    pub fn on_event(&self, _ctx: &Session, _evt: Box<Evt>) {}

    fn restock(&self, _ctx: &Session, _req: Box<Req>) {}
}

pub struct ShopTable;

skein_component::value!(ShopTable);

impl Introspect for ShopTable {
    fn methods() -> Vec<Method> {
        let base = Signature::receiver::<Self>().input::<&'static Session>();
        vec![
            Method::public(
                "get_item",
                base.clone()
                    .input::<Box<Req>>()
                    .output::<Box<Resp>>()
                    .output::<RpcError>(),
            ),
            Method::public(
                "ping",
                base.clone().output::<Box<Pong>>().output::<RpcError>(),
            ),
            Method::public(
                "on_raw",
                base.clone()
                    .input::<Bytes>()
                    .output::<Bytes>()
                    .output::<RpcError>(),
            ),
            Method::public("on_event", base.clone().input::<Box<Evt>>()),
            Method::private("restock", base.input::<Box<Req>>()),
        ]
    }
}

fn summary(handlers: &HandlerMap) -> Vec<(String, MessageType, bool, usize)> {
    let mut out: Vec<_> = handlers
        .iter()
        .map(|(name, h)| {
            (
                name.clone(),
                h.message_type(),
                h.is_raw_arg(),
                h.method().index(),
            )
        })
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

#[test]
fn component_macro_matches_hand_written_table() {
    let generated = Shop::methods();
    let written = ShopTable::methods();
    assert_eq!(generated.len(), written.len());
    for (g, w) in generated.iter().zip(&written) {
        assert_eq!(g.name(), w.name());
        assert_eq!(g.visibility(), w.visibility());
        assert_eq!(g.signature().num_in(), w.signature().num_in());
        assert_eq!(g.signature().outputs(), w.signature().outputs());
        assert_eq!(g.signature().inputs()[1..], w.signature().inputs()[1..]);
    }

    let camel = NameFunc::lower_camel_case();
    assert_eq!(
        summary(&handler_methods::<Shop>(Some(&camel))),
        summary(&handler_methods::<ShopTable>(Some(&camel)))
    );
    assert_eq!(
        keys(&remote_methods::<Shop>(Some(&camel))),
        BTreeSet::from(["getItem", "ping"])
    );
}
