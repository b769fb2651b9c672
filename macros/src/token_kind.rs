use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Variant};

use crate::to_words;

/// `#[punct(..)]` roles and the `Punctuation` constants they fill.
const ROLES: [(&str, &str); 7] = [
    ("comma", "COMMA"),
    ("lparen", "LPAREN"),
    ("rparen", "RPAREN"),
    ("lbrace", "LBRACE"),
    ("rbrace", "RBRACE"),
    ("lbracket", "LBRACKET"),
    ("rbracket", "RBRACKET"),
];

struct KindVariant {
    name: Ident,
    spelling: LitStr,
    role: Option<Ident>,
}

fn parse_variant(variant: &Variant) -> syn::Result<KindVariant> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            variant,
            "TokenKind can only be derived for fieldless variants",
        ));
    }

    let mut spelling = None;
    let mut literal = None;
    let mut role = None;
    for attr in &variant.attrs {
        if attr.path().is_ident("spelling") {
            spelling = Some(attr.parse_args::<LitStr>()?);
        } else if attr.path().is_ident("token") {
            literal = logos_literal(attr);
        } else if attr.path().is_ident("punct") {
            let ident: Ident = attr.parse_args()?;
            if !ROLES.iter().any(|(r, _)| ident == r) {
                let known: Vec<_> = ROLES.iter().map(|(r, _)| *r).collect();
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!(
                        "unknown punctuation `{}`; expected one of {}",
                        ident,
                        known.join(", ")
                    ),
                ));
            }
            role = Some(ident);
        }
    }

    let name = variant.ident.clone();
    let spelling = spelling
        .or(literal)
        .unwrap_or_else(|| LitStr::new(&to_words(&name.to_string()), name.span()));
    Ok(KindVariant {
        name,
        spelling,
        role,
    })
}

/// The literal of a logos `#[token("..", ..)]` attribute.
fn logos_literal(attr: &Attribute) -> Option<LitStr> {
    attr.parse_args_with(|input: syn::parse::ParseStream| {
        let lit: LitStr = input.parse()?;
        let _rest: TokenStream = input.parse()?;
        Ok(lit)
    })
    .ok()
}

fn punctuation_impl(input: &DeriveInput, variants: &[KindVariant]) -> syn::Result<TokenStream> {
    let mut assigned: Vec<Option<&Ident>> = vec![None; ROLES.len()];
    for variant in variants {
        let Some(role) = &variant.role else {
            continue;
        };
        let Some(slot) = ROLES.iter().position(|(r, _)| role == r) else {
            continue;
        };
        if assigned[slot].is_some() {
            return Err(syn::Error::new_spanned(
                role,
                format!("`{}` is assigned to more than one variant", role),
            ));
        }
        assigned[slot] = Some(&variant.name);
    }

    if assigned.iter().all(Option::is_none) {
        return Ok(TokenStream::new());
    }

    let missing: Vec<_> = ROLES
        .iter()
        .zip(&assigned)
        .filter(|(_, variant)| variant.is_none())
        .map(|((role, _), _)| *role)
        .collect();
    if !missing.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!(
                "Punctuation needs every role; missing #[punct(..)] for {}",
                missing.join(", ")
            ),
        ));
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let consts = ROLES.iter().zip(&assigned).filter_map(|((_, konst), variant)| {
        let konst = Ident::new(konst, proc_macro2::Span::call_site());
        variant.map(|v| quote! { const #konst: Self = Self::#v; })
    });
    Ok(quote! {
        impl #impl_generics ::frontkit::Punctuation for #ident #ty_generics #where_clause {
            #(#consts)*
        }
    })
}

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "TokenKind can only be derived for enums",
        ));
    };

    let variants = data
        .variants
        .iter()
        .map(parse_variant)
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let arms = variants.iter().map(|v| {
        let name = &v.name;
        let spelling = &v.spelling;
        quote! { Self::#name => #spelling, }
    });
    let punctuation = punctuation_impl(&input, &variants)?;

    Ok(quote! {
        impl #impl_generics ::frontkit::TokenKind for #ident #ty_generics #where_clause {
            fn spelling(&self) -> &'static str {
                match *self {
                    #(#arms)*
                }
            }
        }

        #punctuation
    })
}
