use super::*;
use syn::{punctuated::Punctuated, token::Comma};

impl EntityWriter {
    pub fn gen_model_code_blocks(table: &Table, context: &EntityWriterContext) -> Vec<TokenStream> {
        vec![
            Self::gen_model_import(),
            Self::gen_table_name_const(table),
            Self::gen_model_struct(table, context),
            Self::gen_relation_enum(),
            Self::gen_impl_active_model_behavior(),
            Self::gen_type_aliases(table),
        ]
    }

    pub fn gen_model_import() -> TokenStream {
        quote! {
            use sea_orm::entity::prelude::*;
        }
    }

    pub fn gen_table_name_const(table: &Table) -> TokenStream {
        let table_name = table.table_name.as_str();
        quote! {
            pub const TABLE_NAME: &str = #table_name;
        }
    }

    pub fn gen_model_struct(table: &Table, context: &EntityWriterContext) -> TokenStream {
        let settings = &context.settings;
        let table_name = table.table_name.as_str();
        let column_names_snake_case = table.get_column_names_snake_case();
        let column_rs_types = table.get_column_rs_types(settings);
        let if_eq_needed = table.get_eq_needed();
        let schema_name = match context.gen_schema_name() {
            Some(schema_name) => quote! { , schema_name = #schema_name },
            None => quote! {},
        };
        let attrs: Vec<TokenStream> = table
            .columns
            .iter()
            .map(|col| {
                let mut attrs: Punctuated<_, Comma> = Punctuated::new();
                let is_primary_key = table.is_primary_key(col);
                if !col.is_snake_case_name() {
                    let column_name = &col.name;
                    attrs.push(quote! { column_name = #column_name });
                }
                if is_primary_key {
                    attrs.push(quote! { primary_key });
                    if !col.auto_increment {
                        attrs.push(quote! { auto_increment = false });
                    }
                }
                if settings.field_with_type_tag {
                    if let Some(column_type) = col.get_col_type_attr() {
                        attrs.push(quote! { column_type = #column_type });
                        if !col.not_null && !is_primary_key {
                            attrs.push(quote! { nullable });
                        }
                    }
                }
                if settings.field_with_index_tag && !is_primary_key {
                    if col.unique {
                        attrs.push(quote! { unique });
                    } else if col.indexed {
                        attrs.push(quote! { indexed });
                    }
                }
                if attrs.is_empty() {
                    quote! {}
                } else {
                    quote! {
                        #[sea_orm(#attrs)]
                    }
                }
            })
            .collect();
        quote! {
            #[derive(Clone, Debug, PartialEq, DeriveEntityModel #if_eq_needed)]
            #[sea_orm(table_name = #table_name #schema_name)]
            pub struct Model {
                #(
                    #attrs
                    pub #column_names_snake_case: #column_rs_types,
                )*
            }
        }
    }

    pub fn gen_relation_enum() -> TokenStream {
        quote! {
            #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
            pub enum Relation {}
        }
    }

    pub fn gen_impl_active_model_behavior() -> TokenStream {
        quote! {
            impl ActiveModelBehavior for ActiveModel {}
        }
    }

    pub fn gen_type_aliases(table: &Table) -> TokenStream {
        let type_ident = table.get_type_ident();
        let entity_alias = table.get_entity_alias_ident();
        let active_model_alias = table.get_active_model_alias_ident();
        quote! {
            pub type #type_ident = Model;
            pub type #entity_alias = Entity;
            pub type #active_model_alias = ActiveModel;
        }
    }
}
