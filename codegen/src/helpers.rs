//! Common helper functions for the API key macro.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{FnArg, ItemFn, Pat, Type};

/// Path of the crate the generated code refers to.
pub fn core_crate_path() -> TokenStream {
    quote! { ::actix_apikey }
}

/// The AuthenticatedKey parameter of a handler.
pub struct KeyParam {
    pub index: usize,
    pub ident: Ident,
    /// Type as written by the user, so their import stays in use.
    pub ty: Box<Type>,
}

/// Finds the AuthenticatedKey parameter in the function signature.
pub fn find_key_param(item_fn: &ItemFn) -> Option<KeyParam> {
    for (index, arg) in item_fn.sig.inputs.iter().enumerate() {
        if let FnArg::Typed(pat_type) = arg {
            if let Type::Path(type_path) = pat_type.ty.as_ref() {
                let type_name = type_path.path.segments.last().map(|s| s.ident.to_string());

                if type_name.as_deref() == Some("AuthenticatedKey") {
                    if let Pat::Ident(pat_ident) = pat_type.pat.as_ref() {
                        return Some(KeyParam {
                            index,
                            ident: pat_ident.ident.clone(),
                            ty: pat_type.ty.clone(),
                        });
                    }
                }
            }
        }
    }
    None
}
