use crate::{Backend, GenerateSettings, Table};
use proc_macro2::TokenStream;
use quote::quote;
use std::path::PathBuf;
use tracing::info;

mod model;
mod query;

#[derive(Clone, Debug)]
pub struct EntityWriter {
    pub(crate) tables: Vec<Table>,
}

/// Which output directory a generated file belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputKind {
    Model,
    Query,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    pub kind: OutputKind,
    pub name: String,
    pub content: String,
}

/// Every file of one generation run, rendered in memory
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSet {
    pub files: Vec<OutputFile>,
}

impl FileSet {
    pub fn iter(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.iter()
    }

    pub fn of_kind(&self, kind: OutputKind) -> impl Iterator<Item = &OutputFile> {
        self.files.iter().filter(move |file| file.kind == kind)
    }

    pub fn get(&self, kind: OutputKind, name: &str) -> Option<&OutputFile> {
        self.files
            .iter()
            .find(|file| file.kind == kind && file.name == name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Destination of a file under the configured output directories
    pub fn path_of(file: &OutputFile, settings: &GenerateSettings) -> PathBuf {
        let dir = match file.kind {
            OutputKind::Model => settings.model_dir(),
            OutputKind::Query => settings.query_dir(),
        };
        dir.join(&file.name)
    }
}

#[derive(Debug)]
pub struct EntityWriterContext {
    pub(crate) settings: GenerateSettings,
    pub(crate) backend: Backend,
    pub(crate) schema_name: Option<String>,
}

impl EntityWriterContext {
    pub fn new(settings: GenerateSettings, backend: Backend, schema_name: Option<String>) -> Self {
        Self {
            settings,
            backend,
            schema_name,
        }
    }

    /// Postgres' default schema is left implicit
    pub(crate) fn gen_schema_name(&self) -> Option<String> {
        self.schema_name
            .as_ref()
            .filter(|name| name.as_str() != "public")
            .cloned()
    }
}

impl EntityWriter {
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn generate(self, context: &EntityWriterContext) -> FileSet {
        let mut files = Vec::new();
        files.extend(self.write_models(context));
        files.push(self.write_model_index_file());
        files.push(self.write_prelude());
        files.extend(self.write_queries(context));
        files.push(self.write_query_index_file());
        FileSet { files }
    }

    pub fn write_models(&self, context: &EntityWriterContext) -> Vec<OutputFile> {
        self.tables
            .iter()
            .map(|table| {
                let file_name = format!("{}.rs", table.get_module_name());
                info!("Generating model {}", file_name);
                for column in table.columns.iter() {
                    info!(
                        "    > {}",
                        column.get_info(&context.settings, table.is_primary_key(column))
                    );
                }

                let mut lines = Vec::new();
                Self::write_doc_comment(
                    &mut lines,
                    &format!("`SeaORM` Entity of table `{}`.", table.table_name),
                );
                Self::write(&mut lines, Self::gen_model_code_blocks(table, context));
                OutputFile {
                    kind: OutputKind::Model,
                    name: file_name,
                    content: Self::finish(lines.join("\n\n")),
                }
            })
            .collect()
    }

    pub fn write_queries(&self, context: &EntityWriterContext) -> Vec<OutputFile> {
        self.tables
            .iter()
            .map(|table| {
                let file_name = format!("{}.rs", table.get_module_name());
                info!("Generating query {}", file_name);

                let mut lines = Vec::new();
                Self::write_doc_comment(
                    &mut lines,
                    &format!("Query helpers of table `{}`.", table.table_name),
                );
                Self::write(&mut lines, Self::gen_query_code_blocks(table, context));
                OutputFile {
                    kind: OutputKind::Query,
                    name: file_name,
                    content: Self::finish(lines.join("\n\n")),
                }
            })
            .collect()
    }

    pub fn write_model_index_file(&self) -> OutputFile {
        let mut lines = Vec::new();
        Self::write_doc_comment(&mut lines, "Model index.");
        Self::write(
            &mut lines,
            vec![quote! {
                pub mod prelude;
            }],
        );
        lines.push("".to_owned());
        let code_blocks: Vec<TokenStream> = self.tables.iter().map(Self::gen_mod).collect();
        Self::write(&mut lines, code_blocks);
        OutputFile {
            kind: OutputKind::Model,
            name: "mod.rs".to_owned(),
            content: Self::finish(lines.join("\n")),
        }
    }

    pub fn write_prelude(&self) -> OutputFile {
        let mut lines = Vec::new();
        Self::write_doc_comment(&mut lines, "Model prelude.");
        let code_blocks = self.tables.iter().map(Self::gen_prelude_use).collect();
        Self::write(&mut lines, code_blocks);
        OutputFile {
            kind: OutputKind::Model,
            name: "prelude.rs".to_owned(),
            content: Self::finish(lines.join("\n")),
        }
    }

    pub fn write_query_index_file(&self) -> OutputFile {
        let mut lines = Vec::new();
        Self::write_doc_comment(&mut lines, "Query façade.");
        let code_blocks: Vec<TokenStream> = self.tables.iter().map(Self::gen_mod).collect();
        Self::write(&mut lines, code_blocks);
        lines.push("".to_owned());
        Self::write(&mut lines, vec![self.gen_query_facade()]);
        OutputFile {
            kind: OutputKind::Query,
            name: "mod.rs".to_owned(),
            content: Self::finish(lines.join("\n")),
        }
    }

    pub fn write(lines: &mut Vec<String>, code_blocks: Vec<TokenStream>) {
        lines.extend(
            code_blocks
                .into_iter()
                .map(|code_block| code_block.to_string())
                .collect::<Vec<_>>(),
        );
    }

    pub fn write_doc_comment(lines: &mut Vec<String>, title: &str) {
        let ver = env!("CARGO_PKG_VERSION");
        lines.push(format!(
            "//! {title} Generated by dalgen-codegen {ver}, do not edit."
        ));
        lines.push("".to_owned());
    }

    fn finish(mut content: String) -> String {
        content.push('\n');
        content
    }

    pub fn gen_mod(table: &Table) -> TokenStream {
        let module = table.get_module_name_ident();
        quote! {
            pub mod #module;
        }
    }

    pub fn gen_prelude_use(table: &Table) -> TokenStream {
        let module = table.get_module_name_ident();
        let type_ident = table.get_type_ident();
        let entity_alias = table.get_entity_alias_ident();
        let active_model_alias = table.get_active_model_alias_ident();
        quote! {
            pub use super::#module::{#type_ident, #active_model_alias, #entity_alias};
        }
    }
}
