use crate::DatabasePool;
use async_trait::async_trait;
use dalgen_codegen::{
    EntityTransformer, EntityWriterContext, Error, FileSet, GenerateSettings, SchemaTable,
    TableMapping,
};
use tracing::{debug, info};

/// Turns a live schema into the files of one generation run.
///
/// Implementations render everything in memory; writing the [`FileSet`] to
/// disk is left to the caller.
#[async_trait(?Send)]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        pool: &DatabasePool,
        mapping: &TableMapping,
        settings: &GenerateSettings,
    ) -> Result<FileSet, Error>;
}

/// Discovers the mapped tables with sea-schema and renders them with `dalgen-codegen`
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaGenerator;

#[async_trait(?Send)]
impl Generator for SchemaGenerator {
    async fn generate(
        &self,
        pool: &DatabasePool,
        mapping: &TableMapping,
        settings: &GenerateSettings,
    ) -> Result<FileSet, Error> {
        info!("Discovering schema ...");
        let (schema_name, tables) = discover(pool, mapping).await?;
        info!("... discovered {} table(s).", tables.len());
        let writer = EntityTransformer::transform(tables, mapping)?;
        let context = EntityWriterContext::new(settings.clone(), pool.backend(), schema_name);
        let files = writer.generate(&context);
        debug!("Rendered {} file(s)", files.len());
        Ok(files)
    }
}

fn discovery_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Discovery(err.to_string())
}

/// Tables named in `mapping`, written back as `CREATE TABLE` statements
pub async fn discover(
    pool: &DatabasePool,
    mapping: &TableMapping,
) -> Result<(Option<String>, Vec<SchemaTable>), Error> {
    let filter_tables = |table: &str| -> bool { mapping.contains_table(table) };

    let discovered = match pool {
        #[cfg(feature = "sqlx-mysql")]
        DatabasePool::MySql { pool, database } => {
            use sea_schema::mysql::discovery::SchemaDiscovery;

            let schema_discovery = SchemaDiscovery::new(pool.clone(), database);
            let schema = schema_discovery.discover().await.map_err(discovery_error)?;
            let tables = schema
                .tables
                .into_iter()
                .filter(|table| filter_tables(&table.info.name))
                .map(|table| SchemaTable::new(table.info.name.clone(), table.write()))
                .collect();
            (None, tables)
        }
        #[cfg(feature = "sqlx-postgres")]
        DatabasePool::Postgres { pool, schema } => {
            use sea_schema::postgres::discovery::SchemaDiscovery;

            let schema_discovery = SchemaDiscovery::new(pool.clone(), schema);
            let schema = schema_discovery.discover().await.map_err(discovery_error)?;
            let tables = schema
                .tables
                .into_iter()
                .filter(|table| filter_tables(&table.info.name))
                .map(|table| SchemaTable::new(table.info.name.clone(), table.write()))
                .collect();
            (Some(schema.schema), tables)
        }
        #[cfg(feature = "sqlx-sqlite")]
        DatabasePool::Sqlite(pool) => {
            use sea_schema::sqlite::discovery::SchemaDiscovery;

            let schema_discovery = SchemaDiscovery::new(pool.clone());
            let schema = schema_discovery
                .discover()
                .await
                .map_err(discovery_error)?
                .merge_indexes_into_table();
            let tables = schema
                .tables
                .into_iter()
                .filter(|table| filter_tables(&table.name))
                .map(|table| SchemaTable::new(table.name.clone(), table.write()))
                .collect();
            (None, tables)
        }
    };
    Ok(discovered)
}
