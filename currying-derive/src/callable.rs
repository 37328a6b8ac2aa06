//! Implementation of the `#[callable]` attribute macro.
//!
//! # Generated Code Structure
//!
//! For
//!
//! ```text
//! /// Adds two numbers.
//! #[callable]
//! fn add(a: i64, #[default(10)] b: i64) -> i64 { a + b }
//! ```
//!
//! the macro emits the function unchanged (minus the parameter attributes)
//! followed by:
//!
//! ```text
//! fn add_callable() -> ::currying::Function {
//!     ::currying::Function::new(
//!         "add",
//!         ::currying::Signature::new([
//!             ::currying::Parameter::new("a", ::currying::ParameterKind::PositionalOrKeyword),
//!             ::currying::Parameter::new("b", ::currying::ParameterKind::PositionalOrKeyword)
//!                 .with_default(10),
//!         ]),
//!         |__currying_arguments: &::currying::BoundArguments| {
//!             let a = <i64 as ::currying::FromValue>::from_value(__currying_arguments.require("a")?)?;
//!             let b = <i64 as ::currying::FromValue>::from_value(__currying_arguments.require("b")?)?;
//!             Ok(::currying::Value::from(add(a, b)))
//!         },
//!     )
//!     .with_doc("Adds two numbers.")
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Expr, FnArg, Ident, ItemFn, LitStr, Pat, ReturnType, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    PositionalOnly,
    PositionalOrKeyword,
    KeywordOnly,
}

struct ParameterSpec {
    identifier: Ident,
    ty: Type,
    kind: Kind,
    default: Option<Expr>,
}

pub fn callable_impl(attribute: TokenStream, item: TokenStream) -> TokenStream {
    let expanded =
        expand(attribute.into(), item.into()).unwrap_or_else(|error| error.to_compile_error());
    TokenStream::from(expanded)
}

fn expand(attribute: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let name_override = parse_attribute(attribute)?;
    let mut function: ItemFn = syn::parse2(item)?;

    check_supported(&function)?;
    let parameters = extract_parameters(&mut function)?;
    check_ordering(&parameters)?;

    let function_identifier = function.sig.ident.clone();
    let name = name_override.unwrap_or_else(|| function_identifier.to_string());
    let doc = collect_doc(&function);

    let constructor = generate_constructor(&function, &name, doc.as_deref(), &parameters);

    Ok(quote! {
        #function
        #constructor
    })
}

fn parse_attribute(attribute: TokenStream2) -> syn::Result<Option<String>> {
    let mut name = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            let literal: LitStr = meta.value()?.parse()?;
            name = Some(literal.value());
            Ok(())
        } else {
            Err(meta.error("unsupported #[callable] argument, expected `name = \"...\"`"))
        }
    });
    syn::parse::Parser::parse2(parser, attribute)?;
    Ok(name)
}

fn check_supported(function: &ItemFn) -> syn::Result<()> {
    let signature = &function.sig;

    if let Some(receiver) = signature.receiver() {
        return Err(syn::Error::new(
            receiver.span(),
            "#[callable] does not support methods with a self receiver",
        ));
    }
    if let Some(lt_token) = signature.generics.lt_token {
        return Err(syn::Error::new(
            lt_token.spans[0],
            "#[callable] does not support generic functions",
        ));
    }
    if let Some(asyncness) = signature.asyncness {
        return Err(syn::Error::new(
            asyncness.span,
            "#[callable] does not support async functions",
        ));
    }
    if let Some(variadic) = &signature.variadic {
        return Err(syn::Error::new(
            variadic.dots.spans[0],
            "#[callable] does not support C-variadic functions",
        ));
    }

    Ok(())
}

fn extract_parameters(function: &mut ItemFn) -> syn::Result<Vec<ParameterSpec>> {
    let mut parameters = Vec::with_capacity(function.sig.inputs.len());

    for input in &mut function.sig.inputs {
        let FnArg::Typed(pattern_type) = input else {
            continue;
        };

        let identifier = match pattern_type.pat.as_ref() {
            Pat::Ident(pattern) if pattern.subpat.is_none() => pattern.ident.clone(),
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "#[callable] parameters must be plain identifiers",
                ));
            }
        };

        let mut kind = Kind::PositionalOrKeyword;
        let mut default = None;
        let mut retained = Vec::with_capacity(pattern_type.attrs.len());

        for attribute in pattern_type.attrs.drain(..) {
            let path = attribute.path();
            if path.is_ident("default") {
                default = Some(attribute.parse_args::<Expr>()?);
            } else if path.is_ident("keyword") {
                attribute.meta.require_path_only()?;
                kind = Kind::KeywordOnly;
            } else if path.is_ident("positional") {
                attribute.meta.require_path_only()?;
                kind = Kind::PositionalOnly;
            } else {
                retained.push(attribute);
            }
        }
        pattern_type.attrs = retained;

        parameters.push(ParameterSpec {
            identifier,
            ty: (*pattern_type.ty).clone(),
            kind,
            default,
        });
    }

    Ok(parameters)
}

fn check_ordering(parameters: &[ParameterSpec]) -> syn::Result<()> {
    let mut seen_keyword_only = false;
    let mut seen_positional_or_keyword = false;
    let mut seen_default = false;

    for parameter in parameters {
        match parameter.kind {
            Kind::KeywordOnly => seen_keyword_only = true,
            Kind::PositionalOnly | Kind::PositionalOrKeyword => {
                if parameter.kind == Kind::PositionalOnly && seen_positional_or_keyword {
                    return Err(syn::Error::new(
                        parameter.identifier.span(),
                        "#[positional] parameter follows a parameter that accepts keywords",
                    ));
                }
                if parameter.kind == Kind::PositionalOrKeyword {
                    seen_positional_or_keyword = true;
                }
                if seen_keyword_only {
                    return Err(syn::Error::new(
                        parameter.identifier.span(),
                        "positional parameter follows a #[keyword] parameter",
                    ));
                }
                if parameter.default.is_some() {
                    seen_default = true;
                } else if seen_default {
                    return Err(syn::Error::new(
                        parameter.identifier.span(),
                        "parameter without a default follows a parameter with a default",
                    ));
                }
            }
        }
    }

    Ok(())
}

fn collect_doc(function: &ItemFn) -> Option<String> {
    let lines: Vec<String> = function
        .attrs
        .iter()
        .filter(|attribute| attribute.path().is_ident("doc"))
        .filter_map(|attribute| match &attribute.meta {
            syn::Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(literal),
                    ..
                }) => Some(literal.value().trim().to_owned()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let doc = lines.join("\n").trim().to_owned();
    (!doc.is_empty()).then_some(doc)
}

fn is_result(return_type: &ReturnType) -> bool {
    match return_type {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn generate_constructor(
    function: &ItemFn,
    name: &str,
    doc: Option<&str>,
    parameters: &[ParameterSpec],
) -> TokenStream2 {
    let visibility = &function.vis;
    let function_identifier = &function.sig.ident;
    let constructor_identifier = format_ident!("{}_callable", function_identifier);
    let constructor_doc = format!("Curryable `Function` wrapping [`{function_identifier}`].");

    let parameter_expressions = parameters.iter().map(|parameter| {
        let parameter_name = parameter.identifier.to_string();
        let kind = match parameter.kind {
            Kind::PositionalOnly => quote! { ::currying::ParameterKind::PositionalOnly },
            Kind::PositionalOrKeyword => quote! { ::currying::ParameterKind::PositionalOrKeyword },
            Kind::KeywordOnly => quote! { ::currying::ParameterKind::KeywordOnly },
        };
        let default = parameter
            .default
            .as_ref()
            .map(|expression| quote! { .with_default(#expression) });
        quote! { ::currying::Parameter::new(#parameter_name, #kind) #default }
    });

    let unpack = parameters.iter().map(|parameter| {
        let identifier = &parameter.identifier;
        let ty = &parameter.ty;
        let parameter_name = identifier.to_string();
        quote! {
            let #identifier = <#ty as ::currying::FromValue>::from_value(
                __currying_arguments.require(#parameter_name)?,
            )?;
        }
    });

    let call_arguments = parameters.iter().map(|parameter| &parameter.identifier);
    let invocation = quote! { #function_identifier(#(#call_arguments),*) };
    let result = match &function.sig.output {
        ReturnType::Default => quote! {
            #invocation;
            ::core::result::Result::Ok(::currying::Value::None)
        },
        output if is_result(output) => quote! {
            ::core::result::Result::Ok(::currying::Value::from(#invocation?))
        },
        ReturnType::Type(..) => quote! {
            ::core::result::Result::Ok(::currying::Value::from(#invocation))
        },
    };

    let with_doc = doc.map(|doc| quote! { .with_doc(#doc) });

    quote! {
        #[doc = #constructor_doc]
        #visibility fn #constructor_identifier() -> ::currying::Function {
            ::currying::Function::new(
                #name,
                ::currying::Signature::new([#(#parameter_expressions),*]),
                |__currying_arguments: &::currying::BoundArguments|
                    -> ::core::result::Result<::currying::Value, ::currying::CallError> {
                    #(#unpack)*
                    #result
                },
            )
            #with_doc
        }
    }
}
