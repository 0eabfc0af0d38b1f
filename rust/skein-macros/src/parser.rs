//! Inherent impl block parser using unsynn.

use proc_macro2::{Delimiter, Span, TokenStream as TokenStream2, TokenTree};
use quote::quote_spanned;
use unsynn::operator::names::{And, Colon, Comma, Gt, Lt, PathSep, Pound, RArrow, Semicolon};
use unsynn::{
    keyword, unsynn, Any, BraceGroupContaining, BracketGroupContaining, CommaDelimitedVec, Cons,
    Either, EndOfStream, Except, Ident, LiteralString, Many, Optional, ParenthesisGroupContaining,
    Parse, Punct, ToTokenIter, ToTokens, TokenStream,
};

keyword! {
    pub KAsync = "async";
    pub KConst = "const";
    pub KExtern = "extern";
    pub KFn = "fn";
    pub KImpl = "impl";
    pub KSelfKw = "self";
    pub KMut = "mut";
    pub KPub = "pub";
    pub KUnsafe = "unsafe";
    pub KWhere = "where";
}

/// Parses tokens and groups until `C` is found, handling `<...>` correctly.
type VerbatimUntil<C> = Many<Cons<Except<C>, AngleTokenTree>>;

/// A `{ ... }` block with arbitrary content.
type Block = BraceGroupContaining<TokenStream>;

unsynn! {
    /// Parses either a `TokenTree` or `<...>` grouping.
    #[derive(Clone)]
    pub struct AngleTokenTree(
        pub Either<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>, unsynn::TokenTree>,
    );

    pub struct RawAttribute {
        pub _pound: Pound,
        pub body: BracketGroupContaining<TokenStream>,
    }

    pub enum Visibility {
        PubRestricted(Cons<KPub, ParenthesisGroupContaining<TokenStream>>),
        Pub(KPub),
    }

    pub enum FnQualifier {
        Const(KConst),
        Async(KAsync),
        Unsafe(KUnsafe),
        Extern(Cons<KExtern, Optional<LiteralString>>),
    }

    /// `&self`, `&'a self`, `&mut self`, `&'a mut self`
    pub struct RefSelf {
        pub _amp: And,
        pub lifetime: Option<Cons<Punct, Ident>>,
        pub mutability: Option<KMut>,
        pub name: KSelfKw,
    }

    /// `pattern: Type`; the pattern may be `mut x`, `_` or a destructuring.
    pub struct MethodParam {
        pub pat: VerbatimUntil<Colon>,
        pub _colon: Colon,
        pub ty: VerbatimUntil<Comma>,
    }

    pub struct GenericParams {
        pub _lt: Lt,
        pub params: VerbatimUntil<Gt>,
        pub _gt: Gt,
    }

    pub struct TypePath {
        pub leading: Option<PathSep>,
        pub first: Ident,
        pub rest: Any<Cons<PathSep, Ident>>,
    }

    pub struct ReturnType {
        pub _arrow: RArrow,
        pub ty: VerbatimUntil<Either<Block, KWhere>>,
    }

    pub struct WhereClause {
        pub _where: KWhere,
        pub bounds: VerbatimUntil<Block>,
    }

    pub enum MethodParams {
        Receiver(Cons<RefSelf, Optional<Cons<Comma, CommaDelimitedVec<MethodParam>>>>),
        /// `self`, `mut self`, `self: Box<Self>`, ...
        ByValue(Cons<Optional<KMut>, KSelfKw, TokenStream>),
        Associated(CommaDelimitedVec<MethodParam>),
    }

    pub struct ImplMethod {
        pub attributes: Any<RawAttribute>,
        pub vis: Optional<Visibility>,
        pub qualifiers: Any<FnQualifier>,
        pub _fn: KFn,
        pub name: Ident,
        pub generics: Optional<GenericParams>,
        pub params: ParenthesisGroupContaining<MethodParams>,
        pub return_type: Optional<ReturnType>,
        pub where_clause: Optional<WhereClause>,
        pub body: Block,
    }

    /// Associated consts and types, item macros.
    pub struct OtherItem {
        pub attributes: Any<RawAttribute>,
        pub tokens: VerbatimUntil<Either<Either<Semicolon, Block>, KFn>>,
        pub end: Either<Semicolon, Block>,
    }

    pub enum ImplItem {
        Method(ImplMethod),
        Other(OtherItem),
    }

    pub struct ComponentImpl {
        pub attributes: Any<RawAttribute>,
        pub _impl: KImpl,
        pub generics: Optional<GenericParams>,
        pub self_ty: TypePath,
        pub body: BraceGroupContaining<Any<ImplItem>>,
        pub _eos: EndOfStream,
    }

    /// `Result<T, E>` under any path.
    pub struct ResultType {
        pub path: TypePath,
        pub _lt: Lt,
        pub ok: VerbatimUntil<Comma>,
        pub _comma: Comma,
        pub err: VerbatimUntil<Either<Comma, Gt>>,
        pub _trailing: Option<Comma>,
        pub _gt: Gt,
        pub _eos: EndOfStream,
    }
}

impl TypePath {
    /// Get the last segment (e.g., "Result" from "std::result::Result")
    pub fn last_segment(&self) -> String {
        self.rest
            .iter()
            .last()
            .map(|seg| seg.value.second.to_string())
            .unwrap_or_else(|| self.first.to_string())
    }
}

pub struct ParsedComponent {
    pub self_ty: TokenStream2,
    pub methods: Vec<ParsedMethod>,
}

pub struct ParsedMethod {
    pub name: String,
    pub is_pub: bool,
    pub args: Vec<TokenStream2>,
    /// Declared return values: none for `()`, `[T, E]` for `Result<T, E>`,
    /// the type itself otherwise.
    pub outputs: Vec<TokenStream2>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub span: Span,
    pub message: String,
}

impl Error {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn to_compile_error(&self) -> TokenStream2 {
        let msg = &self.message;
        let span = self.span;
        quote_spanned! {span=> compile_error!(#msg); }
    }
}

impl From<unsynn::Error> for Error {
    fn from(err: unsynn::Error) -> Self {
        Self::new(Span::call_site(), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse_component(tokens: &TokenStream2) -> Result<ParsedComponent> {
    let mut iter = tokens.clone().to_token_iter();
    let parsed = ComponentImpl::parse(&mut iter).map_err(Error::from)?;

    if !parsed.generics.is_empty() {
        return Err(Error::new(
            parsed.self_ty.first.span(),
            "component impl blocks cannot declare generics",
        ));
    }

    let mut methods = Vec::new();
    for entry in parsed.body.content {
        let ImplItem::Method(method) = entry.value else {
            continue;
        };
        if let Some(method) = lower_method(method)? {
            methods.push(method);
        }
    }

    Ok(ParsedComponent {
        self_ty: parsed.self_ty.to_token_stream(),
        methods,
    })
}

/// Lowers one method. Methods a shared receiver cannot call synchronously
/// (associated, by-value `self`, `async`, `unsafe`, `extern`) are not part
/// of the method table and yield `None`.
fn lower_method(method: ImplMethod) -> Result<Option<ParsedMethod>> {
    let receiver = match method.params.content {
        MethodParams::Receiver(receiver) => receiver,
        MethodParams::ByValue(_) | MethodParams::Associated(_) => return Ok(None),
    };

    let callable = method
        .qualifiers
        .iter()
        .all(|q| matches!(q.value, FnQualifier::Const(_)));
    if !callable {
        return Ok(None);
    }

    if !method.generics.is_empty() {
        return Err(Error::new(
            method.name.span(),
            "component methods cannot be generic",
        ));
    }

    if receiver.first.mutability.is_some() {
        return Err(Error::new(
            method.name.span(),
            "component methods must take &self, not &mut self",
        ));
    }

    let mut args = Vec::new();
    if let Some(rest) = receiver.second.into_iter().next() {
        for entry in rest.value.second {
            args.push(entry.value.ty.to_token_stream());
        }
    }

    let outputs = match method.return_type.into_iter().next() {
        Some(ret) => lower_outputs(ret.value.ty.to_token_stream()),
        None => Vec::new(),
    };

    let is_pub = matches!(
        method.vis.into_iter().next().map(|v| v.value),
        Some(Visibility::Pub(_))
    );

    let name = method.name.to_string();
    let name = name.strip_prefix("r#").map(str::to_owned).unwrap_or(name);

    Ok(Some(ParsedMethod {
        name,
        is_pub,
        args,
        outputs,
    }))
}

fn lower_outputs(ty: TokenStream2) -> Vec<TokenStream2> {
    if is_unit(&ty) {
        return Vec::new();
    }

    let mut iter = ty.clone().to_token_iter();
    match ResultType::parse(&mut iter) {
        Ok(result) if result.path.last_segment() == "Result" => {
            vec![result.ok.to_token_stream(), result.err.to_token_stream()]
        }
        _ => vec![ty],
    }
}

fn is_unit(ty: &TokenStream2) -> bool {
    let mut trees = ty.clone().into_iter();
    match (trees.next(), trees.next()) {
        (Some(TokenTree::Group(group)), None) => {
            group.delimiter() == Delimiter::Parenthesis && group.stream().is_empty()
        }
        _ => false,
    }
}
