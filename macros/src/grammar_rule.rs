use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

use crate::to_words;

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "GrammarRule can only be derived for enums",
        ));
    };

    let mut names = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "GrammarRule can only be derived for fieldless variants",
            ));
        }
        let mut name = None;
        for attr in &variant.attrs {
            if attr.path().is_ident("name") {
                name = Some(attr.parse_args::<LitStr>()?);
            }
        }
        let ident = &variant.ident;
        let name =
            name.unwrap_or_else(|| LitStr::new(&to_words(&ident.to_string()), ident.span()));
        names.push((ident, name));
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let all = names.iter().map(|(v, _)| quote! { Self::#v });
    let arms = names.iter().map(|(v, name)| quote! { Self::#v => #name, });

    Ok(quote! {
        impl #impl_generics ::frontkit::GrammarRule for #ident #ty_generics #where_clause {
            const ALL: &'static [Self] = &[#(#all),*];

            fn name(self) -> &'static str {
                match self {
                    #(#arms)*
                }
            }
        }
    })
}
