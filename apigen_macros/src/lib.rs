//! `#[derive(ApiParams)]` for apigen params records.
//!
//! The derive registers `apivalidator` as a field attribute, so annotated
//! records compile, and records each annotation in an `ApiParams` impl:
//!
//! ```rust,ignore
//! #[derive(Default, ApiParams)]
//! pub struct ProfileParams {
//!     #[apivalidator("required")]
//!     pub login: String,
//! }
//!
//! assert_eq!(ProfileParams::ANNOTATIONS[0].annotation, "required");
//! ```

use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Meta};

// Must match `attributes(...)` below; a configured `validator_attribute`
// cannot be registered.
const ATTRIBUTE: &str = "apivalidator";

#[proc_macro_derive(ApiParams, attributes(apivalidator))]
pub fn derive_api_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ApiParams can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ApiParams requires named fields",
        ));
    };

    let mut entries = Vec::new();
    for field in &named.named {
        let Some(ident) = &field.ident else { continue };
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident(ATTRIBUTE)) else {
            continue;
        };
        let annotation = annotation_literal(&attr.meta)?;
        let name = ident.unraw().to_string();
        let rust_type = field.ty.to_token_stream().to_string();
        entries.push(quote! {
            ::apigen::spec::ParamAnnotation {
                field: #name,
                rust_type: #rust_type,
                annotation: #annotation,
            }
        });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::apigen::spec::ApiParams for #ident #ty_generics #where_clause {
            const ANNOTATIONS: &'static [::apigen::spec::ParamAnnotation] = &[#(#entries),*];
        }
    })
}

/// `#[apivalidator("...")]` or `#[apivalidator = "..."]`.
fn annotation_literal(meta: &Meta) -> syn::Result<LitStr> {
    match meta {
        Meta::List(list) => list.parse_args::<LitStr>(),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Ok(lit.clone()),
            other => Err(syn::Error::new_spanned(
                other,
                "expected a string literal, e.g. #[apivalidator = \"required\"]",
            )),
        },
        Meta::Path(path) => Err(syn::Error::new_spanned(
            path,
            "expected an annotation string, e.g. #[apivalidator(\"required,min=3\")]",
        )),
    }
}
