//! Derive macro for vtag record descriptions.
//!
//! `#[derive(Record)]` implements `vtag::Describe` for a struct with named fields, turning its fields, visibility
//! and `#[tag(...)]` attributes into a `vtag::TypeDesc::Record`.
//!
//! ## Field attributes
//! - `#[tag(vtag = "name,list,detail")]`: one or more `key = "value"` annotation pairs.
//! - `#[tag(embed)]`: the field is embedded; its own fields are promoted into the parent.
//!
//! A field counts as exported when it is declared with any `pub` visibility.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, LitStr, Token, Visibility};

/// Generates `vtag::Describe` for a struct.
///
/// # Example
/// ```ignore
/// #[derive(vtag::Record)]
/// pub struct Student {
///     #[tag(embed)]
///     pub base: Option<Box<Base>>,
///     #[tag(vtag = "name,list,detail")]
///     pub name: String,
/// }
///
/// // Generates:
/// impl vtag::Describe for Student {
///     fn type_desc() -> vtag::TypeDesc {
///         vtag::TypeDesc::Record(vtag::RecordDesc::from_fn(
///             std::any::type_name::<Self>(),
///             "Student",
///             || vec![
///                 vtag::FieldDesc::new("base", <Option<Box<Base>> as vtag::Describe>::type_desc())
///                     .visible(true)
///                     .embed(true),
///                 vtag::FieldDesc::new("name", <String as vtag::Describe>::type_desc())
///                     .visible(true)
///                     .embed(false)
///                     .tag("vtag", "name,list,detail"),
///             ],
///         ))
///     }
/// }
/// ```
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct FieldAttrs {
    embed: bool,
    tags: Vec<(String, String)>,
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs {
        embed: false,
        tags: Vec::new(),
    };
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            // `embed` alone is the flag; `embed = "..."` is an ordinary tag key.
            if meta.path.is_ident("embed") && !meta.input.peek(Token![=]) {
                attrs.embed = true;
                return Ok(());
            }
            let Some(key) = meta.path.get_ident() else {
                return Err(meta.error("expected `key = \"value\"` or `embed`"));
            };
            let value: LitStr = meta.value()?.parse()?;
            attrs.tags.push((key.to_string(), value.value()));
            Ok(())
        })?;
    }
    Ok(attrs)
}

fn expand_record(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    name,
                    "#[derive(Record)] requires a struct with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(name, "#[derive(Record)] only supports structs"));
        }
    };

    let mut field_descs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);
        let ty = &field.ty;
        let exported = !matches!(field.vis, Visibility::Inherited);
        let attrs = parse_field_attrs(field)?;
        let embed = attrs.embed;
        let tags = attrs.tags.iter().map(|(key, value)| quote!(.tag(#key, #value)));

        field_descs.push(quote! {
            ::vtag::FieldDesc::new(#field_name, <#ty as ::vtag::Describe>::type_desc())
                .visible(#exported)
                .embed(#embed)
                #(#tags)*
        });
    }

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::vtag::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::vtag::Describe for #name #ty_generics #where_clause {
            fn type_desc() -> ::vtag::TypeDesc {
                ::vtag::TypeDesc::Record(::vtag::RecordDesc::from_fn(
                    ::std::any::type_name::<Self>(),
                    #name_str,
                    || ::std::vec![#(#field_descs),*],
                ))
            }
        }
    })
}
