//! UpdateRecord derive macro implementation

mod attrs;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use attrs::{get_field_column, get_table_attrs};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table_attrs = get_table_attrs(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "UpdateRecord can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "UpdateRecord can only be derived for structs",
            ));
        }
    };

    let mut field_exprs: Vec<TokenStream> = Vec::new();
    for field in fields {
        let Some(column) = get_field_column(field)? else {
            continue;
        };
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        field_exprs.push(quote! {
            ::sqlpatch::Field::new(#column, &self.#ident)
        });
    }

    let record_table_impl = table_attrs.map(|attrs| {
        let table = attrs.table;
        let id_column = attrs.id_column;
        quote! {
            impl #impl_generics ::sqlpatch::RecordTable for #name #ty_generics #where_clause {
                const TABLE: &'static str = #table;
                const ID_COLUMN: &'static str = #id_column;
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::sqlpatch::UpdateRecord for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::sqlpatch::Field<'_>> {
                ::std::vec![#(#field_exprs),*]
            }
        }

        #record_table_impl
    })
}
