use super::*;
use crate::Column;
use heck::ToSnakeCase;
use proc_macro2::Ident;
use quote::format_ident;

impl EntityWriter {
    pub fn gen_query_code_blocks(table: &Table, context: &EntityWriterContext) -> Vec<TokenStream> {
        let mut code_blocks = vec![
            Self::gen_query_import(table, context),
            Self::gen_query_struct(table),
            Self::gen_impl_query(table, context),
        ];
        if context.settings.with_unit_test {
            code_blocks.push(Self::gen_query_tests(table, context));
        }
        code_blocks
    }

    pub fn gen_query_import(table: &Table, context: &EntityWriterContext) -> TokenStream {
        let model_module: syn::Path = syn::parse_str(context.settings.get_model_module())
            .unwrap_or_else(|_| syn::parse_quote!(crate::model));
        let module = table.get_module_name_ident();
        let type_ident = table.get_type_ident();
        let entity_alias = table.get_entity_alias_ident();
        let active_model_alias = table.get_active_model_alias_ident();
        let filter_imports = if Self::unique_finder_columns(table, context).is_empty() {
            quote! {}
        } else {
            quote! { ColumnTrait, QueryFilter, }
        };
        quote! {
            use #model_module::#module::{self, #type_ident, #active_model_alias, #entity_alias};
            use sea_orm::{
                ActiveModelTrait, #filter_imports DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
            };
        }
    }

    pub fn gen_query_struct(table: &Table) -> TokenStream {
        let query_ident = table.get_query_ident();
        quote! {
            #[derive(Clone, Copy, Debug)]
            pub struct #query_ident<'a> {
                db: &'a DatabaseConnection,
            }
        }
    }

    pub fn gen_impl_query(table: &Table, context: &EntityWriterContext) -> TokenStream {
        let settings = &context.settings;
        let module = table.get_module_name_ident();
        let query_ident = table.get_query_ident();
        let type_ident = table.get_type_ident();
        let entity_alias = table.get_entity_alias_ident();
        let active_model_alias = table.get_active_model_alias_ident();

        let by_id = match table.get_primary_key_rs_type(settings) {
            Some(pk_type) => quote! {
                pub async fn find_by_id(&self, id: #pk_type) -> Result<Option<#type_ident>, DbErr> {
                    #entity_alias::find_by_id(id).one(self.db).await
                }

                pub async fn delete_by_id(&self, id: #pk_type) -> Result<u64, DbErr> {
                    let res = #entity_alias::delete_by_id(id).exec(self.db).await?;
                    Ok(res.rows_affected)
                }
            },
            None => quote! {},
        };

        let finders: Vec<TokenStream> = Self::unique_finder_columns(table, context)
            .into_iter()
            .map(|col| {
                let fn_name: Ident = format_ident!("find_by_{}", col.name.to_snake_case());
                let arg = col.get_name_snake_case();
                let arg_type = col.get_base_rs_type(settings.field_signable);
                let variant = col.get_name_camel_case();
                quote! {
                    pub async fn #fn_name(&self, #arg: #arg_type) -> Result<Option<#type_ident>, DbErr> {
                        #entity_alias::find()
                            .filter(#module::Column::#variant.eq(#arg))
                            .one(self.db)
                            .await
                    }
                }
            })
            .collect();

        quote! {
            impl<'a> #query_ident<'a> {
                pub fn new(db: &'a DatabaseConnection) -> Self {
                    Self { db }
                }

                pub fn table_name(&self) -> &'static str {
                    #module::TABLE_NAME
                }

                pub async fn find_all(&self) -> Result<Vec<#type_ident>, DbErr> {
                    #entity_alias::find().all(self.db).await
                }

                pub async fn count(&self) -> Result<u64, DbErr> {
                    #entity_alias::find().count(self.db).await
                }

                pub async fn create(&self, model: #active_model_alias) -> Result<#type_ident, DbErr> {
                    model.insert(self.db).await
                }

                pub async fn update(&self, model: #active_model_alias) -> Result<#type_ident, DbErr> {
                    model.update(self.db).await
                }

                #by_id

                #(#finders)*
            }
        }
    }

    pub fn gen_query_tests(table: &Table, context: &EntityWriterContext) -> TokenStream {
        let query_ident = table.get_query_ident();
        let type_ident = table.get_type_ident();
        let table_name = table.table_name.as_str();
        let backend = format_ident!("{}", context.backend.sea_orm_variant());
        let test_fn = format_ident!("test_{}_query_find_all", table.get_module_name());
        quote! {
        }
    }

    /// Façade declared in the query `mod.rs`, one accessor per mapped table
    pub fn gen_query_facade(&self) -> TokenStream {
        let accessors: Vec<TokenStream> = self
            .tables
            .iter()
            .map(|table| {
                let module = table.get_module_name_ident();
                let accessor = table.get_accessor_ident();
                let query_ident = table.get_query_ident();
                quote! {
                    pub fn #accessor(&self) -> #module::#query_ident<'_> {
                        #module::#query_ident::new(&self.db)
                    }
                }
            })
            .collect();
        quote! {
            use sea_orm::DatabaseConnection;

            #[derive(Debug)]
            pub struct Query {
                db: DatabaseConnection,
            }

            pub fn use_db(db: DatabaseConnection) -> Query {
                Query::new(db)
            }

            impl Query {
                pub fn new(db: DatabaseConnection) -> Self {
                    Self { db }
                }

                pub fn db(&self) -> &DatabaseConnection {
                    &self.db
                }

                #(#accessors)*
            }

            impl From<DatabaseConnection> for Query {
                fn from(db: DatabaseConnection) -> Self {
                    Self::new(db)
                }
            }
        }
    }

    /// Unique non-key columns get a `find_by_<column>` helper when index tags are on
    fn unique_finder_columns<'t>(
        table: &'t Table,
        context: &EntityWriterContext,
    ) -> Vec<&'t Column> {
        if !context.settings.field_with_index_tag {
            return Vec::new();
        }
        table
            .columns
            .iter()
            .filter(|col| col.unique && !table.is_primary_key(col))
            .collect()
    }
}
