use crate::Error;
use std::path::{self, Component, Path, PathBuf};

/// Database backend the generated code talks to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Postgres,
    Sqlite,
}

impl Backend {
    /// Variant name of `sea_orm::DatabaseBackend`
    pub fn sea_orm_variant(&self) -> &'static str {
        match self {
            Self::MySql => "MySql",
            Self::Postgres => "Postgres",
            Self::Sqlite => "Sqlite",
        }
    }
}

/// Output locations and feature flags of one generation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateSettings {
    pub(crate) model_dir: PathBuf,
    pub(crate) query_dir: PathBuf,
    pub(crate) model_module: String,
    /// Nullable columns become `Option<T>`
    pub field_nullable: bool,
    /// Non-key columns carrying a default value become `Option<T>`
    pub field_coverable: bool,
    /// Unsigned integer columns keep an unsigned Rust type
    pub field_signable: bool,
    /// Emit `unique` / `indexed` column attributes
    pub field_with_index_tag: bool,
    /// Emit `column_type` column attributes
    pub field_with_type_tag: bool,
    /// Emit a test module in every query file
    pub with_unit_test: bool,
}

impl GenerateSettings {
    /// Settings with every field flag off; the model module path is inferred from the directories
    pub fn new<M, Q>(model_dir: M, query_dir: Q) -> Self
    where
        M: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        let model_dir = model_dir.into();
        let query_dir = query_dir.into();
        let model_module = infer_model_module(&model_dir, &query_dir);
        Self {
            model_dir,
            query_dir,
            model_module,
            field_nullable: false,
            field_coverable: false,
            field_signable: false,
            field_with_index_tag: false,
            field_with_type_tag: false,
            with_unit_test: false,
        }
    }

    /// Every field flag on, unit tests off
    pub fn with_all_field_options<M, Q>(model_dir: M, query_dir: Q) -> Self
    where
        M: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        Self {
            field_nullable: true,
            field_coverable: true,
            field_signable: true,
            field_with_index_tag: true,
            field_with_type_tag: true,
            with_unit_test: false,
            ..Self::new(model_dir, query_dir)
        }
    }

    /// Override the module path the query files import models from
    pub fn model_module<S: Into<String>>(mut self, module: S) -> Self {
        self.model_module = module.into();
        self
    }

    pub fn unit_test(mut self, with_unit_test: bool) -> Self {
        self.with_unit_test = with_unit_test;
        self
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn query_dir(&self) -> &Path {
        &self.query_dir
    }

    pub fn get_model_module(&self) -> &str {
        &self.model_module
    }

    /// Both directories receive a `mod.rs` and one file per table, so they must not overlap
    pub fn validate(&self) -> Result<(), Error> {
        let model_dir = lexical_absolute(&self.model_dir);
        let query_dir = lexical_absolute(&self.query_dir);
        if model_dir.starts_with(&query_dir) || query_dir.starts_with(&model_dir) {
            return Err(Error::OutputDir(format!(
                "model directory `{}` and query directory `{}` overlap",
                self.model_dir.display(),
                self.query_dir.display()
            )));
        }
        Ok(())
    }
}

fn lexical_absolute(dir: &Path) -> PathBuf {
    path::absolute(dir)
        .unwrap_or_else(|_| dir.to_owned())
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Path of the model module as seen from a file inside the query module.
///
/// Sibling directories resolve through `super::super`, directories below a
/// `src/` component resolve to a `crate::` path, anything else to `crate::model`.
pub fn infer_model_module(model_dir: &Path, query_dir: &Path) -> String {
    let model_name = model_dir
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| syn::parse_str::<syn::Ident>(name).is_ok());
    if let Some(model_name) = model_name {
        let model_parent = normalize(model_dir.parent());
        let query_parent = normalize(query_dir.parent());
        if model_parent == query_parent {
            return format!("super::super::{model_name}");
        }
    }
    let components: Vec<String> = normalize(Some(model_dir));
    if let Some(pos) = components.iter().rposition(|c| c == "src") {
        let segments = &components[pos + 1..];
        if !segments.is_empty()
            && segments
                .iter()
                .all(|s| syn::parse_str::<syn::Ident>(s).is_ok())
        {
            return format!("crate::{}", segments.join("::"));
        }
    }
    "crate::model".to_owned()
}

fn normalize(path: Option<&Path>) -> Vec<String> {
    path.map(|path| {
        path.components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_sibling_dirs() {
        assert_eq!(
            infer_model_module(Path::new("./src/dal/model"), Path::new("./src/dal/query")),
            "super::super::model"
        );
        assert_eq!(
            infer_model_module(Path::new("entity"), Path::new("query")),
            "super::super::entity"
        );
    }

    #[test]
    fn test_infer_crate_path() {
        assert_eq!(
            infer_model_module(Path::new("./src/data/model"), Path::new("./src/dal/query")),
            "crate::data::model"
        );
    }

    #[test]
    fn test_infer_fallback() {
        assert_eq!(
            infer_model_module(Path::new("/tmp/out/models-v1"), Path::new("/var/query")),
            "crate::model"
        );
    }

    #[test]
    fn test_validate_output_dirs() {
        assert!(GenerateSettings::new("./src/dal/model", "src/dal/query")
            .validate()
            .is_ok());
        assert!(GenerateSettings::new("src/dal/model", "src/dal/model_query")
            .validate()
            .is_ok());
        for (model_dir, query_dir) in [
            ("src/dal", "src/dal"),
            ("./src/dal", "src/dal/"),
            ("src/dal", "src/dal/query"),
            ("src/dal/model", "./src/dal"),
        ] {
            assert!(
                matches!(
                    GenerateSettings::new(model_dir, query_dir).validate(),
                    Err(Error::OutputDir(_))
                ),
                "{model_dir} / {query_dir}"
            );
        }
    }

    #[test]
    fn test_all_field_options() {
        let settings = GenerateSettings::with_all_field_options("src/dal/model", "src/dal/query");
        assert!(settings.field_nullable);
        assert!(settings.field_coverable);
        assert!(settings.field_signable);
        assert!(settings.field_with_index_tag);
        assert!(settings.field_with_type_tag);
        assert!(!settings.with_unit_test);
        assert_eq!(settings.get_model_module(), "super::super::model");

        let settings = settings.model_module("crate::models").unit_test(true);
        assert_eq!(settings.get_model_module(), "crate::models");
        assert!(settings.with_unit_test);
    }
}
