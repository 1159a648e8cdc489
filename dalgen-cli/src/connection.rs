use crate::ConnectOptions;
use dalgen_codegen::Backend;
use tracing::info;
use url::Url;

/// An open pool for one of the supported backends
#[derive(Debug, Clone)]
pub enum DatabasePool {
    #[cfg(feature = "sqlx-mysql")]
    MySql {
        pool: sqlx::MySqlPool,
        database: String,
    },
    #[cfg(feature = "sqlx-postgres")]
    Postgres { pool: sqlx::PgPool, schema: String },
    #[cfg(feature = "sqlx-sqlite")]
    Sqlite(sqlx::SqlitePool),
}

impl DatabasePool {
    pub async fn connect(options: &ConnectOptions) -> Result<Self, sqlx::Error> {
        let max_connections = options.max_connections;
        let url = options.url.as_str();
        let pool = match options.backend {
            #[cfg(feature = "sqlx-mysql")]
            Backend::MySql => {
                let database = database_name(url)?;
                info!("Connecting to MySQL ...");
                let pool = connect::<sqlx::MySql>(max_connections, url, None).await?;
                Self::MySql { pool, database }
            }
            #[cfg(feature = "sqlx-postgres")]
            Backend::Postgres => {
                let schema = options
                    .schema
                    .clone()
                    .unwrap_or_else(|| crate::DEFAULT_POSTGRES_SCHEMA.to_owned());
                info!("Connecting to Postgres ...");
                let pool = connect::<sqlx::Postgres>(max_connections, url, Some(&schema)).await?;
                Self::Postgres { pool, schema }
            }
            #[cfg(feature = "sqlx-sqlite")]
            Backend::Sqlite => {
                info!("Connecting to SQLite ...");
                Self::Sqlite(connect::<sqlx::Sqlite>(max_connections, url, None).await?)
            }
            #[allow(unreachable_patterns)]
            backend => {
                return Err(sqlx::Error::Configuration(
                    format!("{backend:?} support is not compiled in").into(),
                ))
            }
        };
        Ok(pool)
    }

    pub fn backend(&self) -> Backend {
        match self {
            #[cfg(feature = "sqlx-mysql")]
            Self::MySql { .. } => Backend::MySql,
            #[cfg(feature = "sqlx-postgres")]
            Self::Postgres { .. } => Backend::Postgres,
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(_) => Backend::Sqlite,
        }
    }

    pub async fn close(&self) {
        match self {
            #[cfg(feature = "sqlx-mysql")]
            Self::MySql { pool, .. } => pool.close().await,
            #[cfg(feature = "sqlx-postgres")]
            Self::Postgres { pool, .. } => pool.close().await,
            #[cfg(feature = "sqlx-sqlite")]
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

/// First path segment of a server URL; discovery needs an explicit database
#[cfg_attr(not(feature = "sqlx-mysql"), allow(dead_code))]
fn database_name(url: &str) -> Result<String, sqlx::Error> {
    let missing = || {
        sqlx::Error::Configuration(
            format!("There is no database name as part of the url path: {url}").into(),
        )
    };
    let url = Url::parse(url).map_err(|err| sqlx::Error::Configuration(err.into()))?;
    let database_name = url
        .path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|name| !name.is_empty())
        .ok_or_else(missing)?;
    Ok(database_name.to_owned())
}

async fn connect<DB>(
    max_connections: u32,
    url: &str,
    schema: Option<&str>,
) -> Result<sqlx::Pool<DB>, sqlx::Error>
where
    DB: sqlx::Database,
    for<'a> &'a mut <DB as sqlx::Database>::Connection: sqlx::Executor<'a>,
{
    let mut pool_options = sqlx::pool::PoolOptions::<DB>::new().max_connections(max_connections);
    // Postgres only; MySQL and SQLite connect with schema `None`
    if let Some(schema) = schema {
        let sql = format!("SET search_path = '{schema}'");
        pool_options = pool_options.after_connect(move |conn, _| {
            let sql = sql.clone();
            Box::pin(async move {
                sqlx::Executor::execute(conn, sql.as_str())
                    .await
                    .map(|_| ())
            })
        });
    }
    pool_options.connect(url).await
}
