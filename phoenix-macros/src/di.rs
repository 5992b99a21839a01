//! Macros for dependency injection

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;

/// Expands a derive-macro for Populate: every non-private field is resolved and assigned
pub(super) fn expand_populate(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let entries = struct_fields(input)?
        .iter()
        .enumerate()
        .filter(|(_, field)| !matches!(field.vis, syn::Visibility::Inherited))
        .map(|(index, field)| {
            let (member, label) = member(index, field);
            let ty = &field.ty;
            quote! {
                .field(#label, |target: &mut Self, value: #ty| target.#member = value)
            }
        });
    Ok(quote! {
        impl #impl_generics ::phoenix_di::Populate for #name #ty_generics #where_clause {
            fn fields() -> ::phoenix_di::Fields<Self> {
                ::phoenix_di::Fields::new()
                    #(#entries)*
            }
        }
    })
}

/// Expands a derive-macro for Inject: every field is resolved in declaration order
pub(super) fn expand_inject(input: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = struct_fields(input)?;
    let types = fields.iter().map(|field| &field.ty);
    let inits = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let (member, _) = member(index, field);
            let ty = &field.ty;
            quote! {
                #member: resolver.resolve::<#ty>()?
            }
        });
    Ok(quote! {
        impl #impl_generics ::phoenix_di::Inject for #name #ty_generics #where_clause {
            fn dependencies(keys: &mut ::std::vec::Vec<::phoenix_di::TypeKey>) {
                #(keys.push(::phoenix_di::TypeKey::of::<#types>());)*
            }

            fn inject(
                resolver: &mut ::phoenix_di::Resolver<'_>
            ) -> ::std::result::Result<Self, ::phoenix_di::Error> {
                ::std::result::Result::Ok(Self { #(#inits,)* })
            }
        }
    })
}

fn struct_fields(input: &syn::DeriveInput) -> syn::Result<&syn::Fields> {
    match &input.data {
        syn::Data::Struct(data) => Ok(&data.fields),
        _ => Err(syn::Error::new_spanned(&input.ident, "target is not a struct"))
    }
}

/// Returns the member to assign and its name for diagnostics
fn member(index: usize, field: &syn::Field) -> (syn::Member, syn::LitStr) {
    match &field.ident {
        Some(ident) => (
            syn::Member::Named(ident.clone()),
            syn::LitStr::new(&ident.unraw().to_string(), ident.span())
        ),
        None => (
            syn::Member::Unnamed(syn::Index::from(index)),
            syn::LitStr::new(&index.to_string(), Span::call_site())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(f: fn(&syn::DeriveInput) -> syn::Result<TokenStream>, src: &str) -> syn::Result<String> {
        let input: syn::DeriveInput = syn::parse_str(src)?;
        f(&input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn it_lists_only_visible_fields() {
        let out = expand(expand_populate, "struct App { pub service: Service, pub(crate) mailer: Mailer, counter: i32 }").unwrap();

        assert!(out.contains("\"service\""));
        assert!(out.contains("\"mailer\""));
        assert!(!out.contains("counter"));
    }

    #[test]
    fn it_uses_indexes_for_tuple_structs() {
        let out = expand(expand_populate, "struct App(pub Service, i32);").unwrap();

        assert!(out.contains("target . 0 = value"));
        assert!(!out.contains("target . 1"));
    }

    #[test]
    fn it_strips_raw_identifier_prefix() {
        let out = expand(expand_populate, "struct App { pub r#type: Kind }").unwrap();

        assert!(out.contains("\"type\""));
    }

    #[test]
    fn it_rejects_enum_for_populate() {
        let err = expand(expand_populate, "enum App { A, B }").unwrap_err();

        assert_eq!(err.to_string(), "target is not a struct");
    }

    #[test]
    fn it_rejects_union_for_inject() {
        let err = expand(expand_inject, "union App { a: u32, b: f32 }").unwrap_err();

        assert_eq!(err.to_string(), "target is not a struct");
    }

    #[test]
    fn it_resolves_every_field_for_inject() {
        let out = expand(expand_inject, "struct Service { config: Config, pub pool: Pool }").unwrap();

        assert!(out.contains("config : resolver . resolve :: < Config > () ?"));
        assert!(out.contains("pool : resolver . resolve :: < Pool > () ?"));
        assert!(out.contains("TypeKey :: of :: < Config > ()"));
    }
}
