use crate::{
    util::{snake_ident_str, snake_name_str},
    Column, GenerateSettings, PrimaryKey,
};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use sea_query::ColumnType;

/// A discovered table together with the type name it is mapped to
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub(crate) table_name: String,
    pub(crate) type_name: String,
    pub(crate) columns: Vec<Column>,
    pub(crate) primary_keys: Vec<PrimaryKey>,
}

impl Table {
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// File stem shared by the model and the query file of this table, `pub mod` of
    /// [`Table::get_module_name_ident`] resolves to it
    pub fn get_module_name(&self) -> String {
        snake_name_str(&self.table_name)
    }

    pub fn get_module_name_ident(&self) -> Ident {
        format_ident!("{}", snake_ident_str(&self.table_name))
    }

    pub fn get_type_ident(&self) -> Ident {
        format_ident!("{}", self.type_name)
    }

    pub fn get_entity_alias_ident(&self) -> Ident {
        format_ident!("{}Entity", self.type_name)
    }

    pub fn get_active_model_alias_ident(&self) -> Ident {
        format_ident!("{}ActiveModel", self.type_name)
    }

    pub fn get_query_ident(&self) -> Ident {
        format_ident!("{}Query", self.type_name)
    }

    /// Accessor on the query façade
    pub fn get_accessor_ident(&self) -> Ident {
        format_ident!("{}", snake_ident_str(&self.type_name))
    }

    pub fn is_primary_key(&self, column: &Column) -> bool {
        self.primary_keys.iter().any(|pk| pk.name == column.name)
    }

    pub fn get_primary_key_columns(&self) -> Vec<&Column> {
        self.primary_keys
            .iter()
            .filter_map(|pk| self.columns.iter().find(|col| col.name == pk.name))
            .collect()
    }

    pub fn get_column_names_snake_case(&self) -> Vec<Ident> {
        self.columns
            .iter()
            .map(|col| col.get_name_snake_case())
            .collect()
    }

    pub fn get_column_rs_types(&self, settings: &GenerateSettings) -> Vec<TokenStream> {
        self.columns
            .iter()
            .map(|col| col.get_rs_type(settings, self.is_primary_key(col)))
            .collect()
    }

    /// Type accepted by `find_by_id`, a tuple for composite keys
    pub fn get_primary_key_rs_type(&self, settings: &GenerateSettings) -> Option<TokenStream> {
        let types: Vec<TokenStream> = self
            .get_primary_key_columns()
            .into_iter()
            .map(|col| col.get_base_rs_type(settings.field_signable))
            .collect();
        match types.len() {
            0 => None,
            1 => types.into_iter().next(),
            _ => Some(quote! { (#(#types),*) }),
        }
    }

    /// `Eq` is derived unless a column holds a float or a JSON value
    pub fn get_eq_needed(&self) -> TokenStream {
        let has_float = self.columns.iter().any(|col| {
            matches!(
                col.col_type,
                ColumnType::Float | ColumnType::Double | ColumnType::Json | ColumnType::JsonBinary
            )
        });
        if has_float {
            quote! {}
        } else {
            quote! { , Eq }
        }
    }
}
