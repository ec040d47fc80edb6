//! Attribute parsing for the UpdateRecord derive macro.

use syn::Result;

use crate::sql_ident::{parse_sql_ident, parse_table_name};

pub(super) struct TableAttrs {
    pub(super) table: String,
    pub(super) id_column: String,
}

#[derive(Default)]
struct StructAttrList {
    table: Option<String>,
    id_column: Option<String>,
}

impl syn::parse::Parse for StructAttrList {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = StructAttrList::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            match key.as_str() {
                "table" => attrs.table = Some(parse_table_name(&value)?),
                "id_column" => attrs.id_column = Some(parse_sql_ident(&value, "id_column")?),
                _ => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown struct attribute `{key}` (expected `table` or `id_column`)"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

struct FieldAttrs {
    column: Option<String>,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut column = None;

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            match key.as_str() {
                "column" => column = Some(parse_sql_ident(&value, "column")?),
                _ => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown field attribute `{key}` (expected `column`)"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(Self { column })
    }
}

/// Column tag of a field, if it carries one.
pub(super) fn get_field_column(field: &syn::Field) -> Result<Option<String>> {
    let mut column = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("sql") {
            continue;
        }
        let parsed: FieldAttrs = attr.parse_args()?;
        if parsed.column.is_some() {
            column = parsed.column;
        }
    }

    Ok(column)
}

/// Table metadata from `#[sql(table = "...", id_column = "...")]`, if present.
pub(super) fn get_table_attrs(input: &syn::DeriveInput) -> Result<Option<TableAttrs>> {
    let mut merged = StructAttrList::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("sql") {
            continue;
        }
        let parsed: StructAttrList = attr.parse_args()?;
        if parsed.table.is_some() {
            merged.table = parsed.table;
        }
        if parsed.id_column.is_some() {
            merged.id_column = parsed.id_column;
        }
    }

    match (merged.table, merged.id_column) {
        (Some(table), Some(id_column)) => Ok(Some(TableAttrs { table, id_column })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(syn::Error::new_spanned(
            &input.ident,
            "#[sql(table = \"...\")] requires #[sql(id_column = \"...\")]",
        )),
        (None, Some(_)) => Err(syn::Error::new_spanned(
            &input.ident,
            "#[sql(id_column = \"...\")] requires #[sql(table = \"...\")]",
        )),
    }
}
