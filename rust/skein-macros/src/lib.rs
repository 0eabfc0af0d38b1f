//! Proc macros for skein components.
//!
//! `#[component]` goes on an inherent impl block. The block is emitted
//! unchanged, followed by `Reflect` and `Introspect` impls describing every
//! `&self` method in declaration order.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;

mod parser;

use parser::{Error, ParsedComponent, ParsedMethod};

#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = TokenStream2::from(item);

    let result = if attr.is_empty() {
        parser::parse_component(&item).map(|parsed| generate(&item, &parsed))
    } else {
        Err(Error::new(
            Span::call_site(),
            "#[component] takes no arguments; use ComponentOptions to rename",
        ))
    };

    match result {
        Ok(tokens) => tokens.into(),
        Err(err) => {
            let mut tokens = item;
            tokens.extend(err.to_compile_error());
            tokens.into()
        }
    }
}

fn generate(item: &TokenStream2, parsed: &ParsedComponent) -> TokenStream2 {
    let self_ty = &parsed.self_ty;
    let methods = parsed.methods.iter().map(method_entry);

    quote! {
        #item

        impl ::skein_component::reflect::Reflect for #self_ty {
            fn type_info() -> ::skein_component::reflect::TypeInfo {
                ::skein_component::reflect::TypeInfo::value::<Self>()
            }
        }

        impl ::skein_component::reflect::Introspect for #self_ty {
            fn methods() -> ::std::vec::Vec<::skein_component::reflect::Method> {
                ::std::vec![#(#methods),*]
            }
        }
    }
}

fn method_entry(method: &ParsedMethod) -> TokenStream2 {
    let name = &method.name;
    let visibility = if method.is_pub {
        quote! { Public }
    } else {
        quote! { Private }
    };
    let inputs = &method.args;
    let outputs = &method.outputs;

    quote! {
        ::skein_component::reflect::Method::new(
            #name,
            ::skein_component::reflect::Visibility::#visibility,
            ::skein_component::reflect::Signature::receiver::<Self>()
                #(.input::<#inputs>())*
                #(.output::<#outputs>())*,
        )
    }
}
