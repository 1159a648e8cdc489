use crate::{load_config, output, ConfigSchema, DatabasePool, Error, Generator};
use dalgen_codegen::{GenerateSettings, TableMapping};
use std::path::{Path, PathBuf};
use tracing::info;

/// Drives one generation run: config, connection, generation, commit
#[derive(Clone, Debug)]
pub struct Orchestrator {
    config_path: PathBuf,
    schema: ConfigSchema,
    mapping: TableMapping,
    settings: GenerateSettings,
    format: bool,
}

/// What a successful run wrote
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: Vec<PathBuf>,
}

impl Summary {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Orchestrator {
    pub fn new<P>(
        config_path: P,
        schema: ConfigSchema,
        mapping: TableMapping,
        settings: GenerateSettings,
    ) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            config_path: config_path.into(),
            schema,
            mapping,
            settings,
            format: true,
        }
    }

    /// Run `rustfmt` over the staged files, on by default
    pub fn format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn schema(&self) -> ConfigSchema {
        self.schema
    }

    pub fn mapping(&self) -> &TableMapping {
        &self.mapping
    }

    pub fn settings(&self) -> &GenerateSettings {
        &self.settings
    }

    pub async fn run<G>(&self, generator: &G) -> Result<Summary, Error>
    where
        G: Generator + ?Sized,
    {
        self.mapping.validate()?;
        self.settings.validate()?;
        let options = load_config(&self.config_path, self.schema)?;
        info!("Using database {}", options.redacted_url());

        let pool = DatabasePool::connect(&options).await?;
        let generated = generator
            .generate(&pool, &self.mapping, &self.settings)
            .await;
        pool.close().await;
        let files = generated?;

        let files = output::commit(&files, &self.settings, self.format)?;
        info!("... Done.");
        Ok(Summary { files })
    }
}
