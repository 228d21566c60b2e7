//! The `#[api_key]` macro for per-handler API key checks.

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Expr, ExprLit, FnArg, Ident, ItemFn, Lit, ReturnType, Token};

use crate::helpers::{core_crate_path, find_key_param, KeyParam};

/// Parsed arguments for #[api_key(...)]
#[derive(Default)]
pub struct ApiKeyArgs {
    /// header = "X-Custom"
    pub header: Option<String>,
    /// role = "Admin" or roles = ["Admin", "User"]
    pub roles: Vec<String>,
    /// scope = "read" or scopes = ["read", "write"]
    pub scopes: Vec<String>,
}

impl Parse for ApiKeyArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ApiKeyArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "header" => {
                    let lit: syn::LitStr = input.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new_spanned(lit, "header name must not be blank"));
                    }
                    args.header = Some(lit.value());
                }
                "role" | "roles" => args.roles.extend(parse_string_or_array(input)?),
                "scope" | "scopes" => args.scopes.extend(parse_string_or_array(input)?),
                _ => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        "expected 'header', 'role', 'roles', 'scope', or 'scopes'",
                    ));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Parses either a single string "value" or an array ["a", "b"]
fn parse_string_or_array(input: ParseStream) -> syn::Result<Vec<String>> {
    if input.peek(syn::token::Bracket) {
        // Array syntax: ["a", "b"]
        let content;
        syn::bracketed!(content in input);
        let args: Punctuated<Expr, Token![,]> = Punctuated::parse_terminated(&content)?;

        let mut values = Vec::new();
        for arg in args {
            if let Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = arg
            {
                values.push(lit_str.value());
            } else {
                return Err(syn::Error::new_spanned(arg, "expected string literal"));
            }
        }
        Ok(values)
    } else {
        // Single string: "value"
        let lit: syn::LitStr = input.parse()?;
        Ok(vec![lit.value()])
    }
}

pub fn api_key_impl(attrs: TokenStream, input: TokenStream) -> TokenStream {
    let item_fn = parse_macro_input!(input as ItemFn);
    let args = parse_macro_input!(attrs as ApiKeyArgs);

    let attrs = &item_fn.attrs;
    let vis = &item_fn.vis;
    let sig = &item_fn.sig;
    let block = &item_fn.block;
    let fn_name = &sig.ident;
    let asyncness = &sig.asyncness;
    let generics = &sig.generics;

    let original_return = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let core_path = core_crate_path();
    let api_key_path = quote! { #core_path::http::security::api_key };

    // An AuthenticatedKey parameter is bound from the guard result instead of
    // being extracted, since extraction runs before the guard.
    let key_param = find_key_param(&item_fn);
    let inputs: Vec<&FnArg> = sig
        .inputs
        .iter()
        .enumerate()
        .filter(|(index, _)| key_param.as_ref().map(|p| p.index) != Some(*index))
        .map(|(_, arg)| arg)
        .collect();

    let header = match &args.header {
        Some(header) => quote! { ::std::option::Option::Some(#header) },
        None => quote! { ::std::option::Option::None },
    };
    let roles = &args.roles;
    let scopes = &args.scopes;
    let authenticated = if key_param.is_some() {
        quote! { .authenticated() }
    } else {
        quote! {}
    };

    let bind_key = match &key_param {
        Some(KeyParam { ident, ty, .. }) => quote! {
            let #ident: #ty = <#ty>::new(
                __api_key_identity.ok_or(#api_key_path::ApiKeyError::Missing)?,
            );
        },
        None => quote! {
            let _ = __api_key_identity;
        },
    };

    let expanded = quote! {
        #(#attrs)*
        #vis #asyncness fn #fn_name #generics(
            __api_key_req: ::actix_web::HttpRequest,
            #(#inputs),*
        ) -> ::std::result::Result<#original_return, ::actix_web::Error> {
            // API key check generated by #[api_key(...)]
            let __api_key_requirements = #api_key_path::Requirements::new()
                #authenticated
                .roles(&[#(#roles),*] as &[&str])
                .scopes(&[#(#scopes),*] as &[&str]);
            let __api_key_identity = #api_key_path::guard_request(
                &__api_key_req,
                #header,
                &__api_key_requirements,
            )?;
            #bind_key

            ::std::result::Result::Ok(#block)
        }
    };

    expanded.into()
}
