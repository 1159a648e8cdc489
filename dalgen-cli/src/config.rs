use crate::ConfigError;
use dalgen_codegen::Backend;
use serde::Deserialize;
use serde_yaml::Value;
use std::{env, fs, path::Path};
use url::Url;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 1;
pub const DEFAULT_POSTGRES_SCHEMA: &str = "public";

const ENV_PREFIX: &str = "env:";

/// Layout of the YAML configuration file
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigSchema {
    /// `database: { dialect, host, port, username, password, name }`
    #[value(name = "orm")]
    Orm,
    /// `data: { database: { driver, source } }`
    #[value(name = "db")]
    DbMessage,
}

/// Connection parameters normalised from either config layout
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub backend: Backend,
    pub url: String,
    /// Postgres `search_path`, `None` for other backends
    pub schema: Option<String>,
    pub max_connections: u32,
}

impl ConnectOptions {
    /// Connection URL with the password masked, safe to log
    pub fn redacted_url(&self) -> String {
        match Url::parse(&self.url) {
            Ok(mut url) if url.password().is_some() => {
                let _ = url.set_password(Some("***"));
                url.to_string()
            }
            _ => self.url.clone(),
        }
    }
}

impl std::fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("backend", &self.backend)
            .field("url", &self.redacted_url())
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct OrmConfig {
    pub database: OrmDatabase,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrmDatabase {
    pub dialect: Option<String>,
    pub host: Option<Scalar>,
    pub port: Option<Port>,
    pub username: Option<Scalar>,
    pub password: Option<Scalar>,
    pub name: Option<Scalar>,
    pub schema: Option<String>,
    pub max_connections: Option<u32>,
}

/// A plain YAML scalar read as text, so `password: 123456` or `name: 2024` are accepted
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// A port written either as a number or as a string, e.g. after `env:` resolution
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Text(String),
}

impl Port {
    fn value(&self) -> Result<u16, ConfigError> {
        match self {
            Self::Number(port) => Ok(*port),
            Self::Text(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSource(format!("invalid port `{port}`"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DbMessageConfig {
    pub data: DbMessageData,
}

#[derive(Debug, Deserialize)]
pub struct DbMessageData {
    pub database: DbMessageDatabase,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DbMessageDatabase {
    pub driver: Option<String>,
    pub source: Option<String>,
    pub schema: Option<String>,
    pub max_connections: Option<u32>,
}

/// Read `path`, resolve `env:` references and normalise it into [`ConnectOptions`]
pub fn load_config<P: AsRef<Path>>(
    path: P,
    schema: ConfigSchema,
) -> Result<ConnectOptions, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_config(&content, schema).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_owned(),
            source,
        },
        err => err,
    })
}

/// Same as [`load_config`] over an in-memory document
pub fn parse_config(content: &str, schema: ConfigSchema) -> Result<ConnectOptions, ConfigError> {
    let parse_err = |source| ConfigError::Parse {
        path: Default::default(),
        source,
    };
    let mut value: Value = serde_yaml::from_str(content).map_err(parse_err)?;
    resolve_env(&mut value)?;
    match schema {
        ConfigSchema::Orm => {
            let config: OrmConfig = serde_yaml::from_value(value).map_err(parse_err)?;
            config.database.into_connect_options()
        }
        ConfigSchema::DbMessage => {
            let config: DbMessageConfig = serde_yaml::from_value(value).map_err(parse_err)?;
            config.data.database.into_connect_options()
        }
    }
}

/// Replace every `env:NAME` string in the document with the value of `NAME`
pub fn resolve_env(value: &mut Value) -> Result<(), ConfigError> {
    match value {
        Value::String(s) => {
            if let Some(name) = s.strip_prefix(ENV_PREFIX) {
                let name = name.trim().to_owned();
                *s = env::var(&name).map_err(|source| ConfigError::MissingEnv { name, source })?;
            }
        }
        Value::Sequence(seq) => {
            for item in seq.iter_mut() {
                resolve_env(item)?;
            }
        }
        Value::Mapping(map) => {
            for (_, item) in map.iter_mut() {
                resolve_env(item)?;
            }
        }
        Value::Tagged(tagged) => resolve_env(&mut tagged.value)?,
        _ => {}
    }
    Ok(())
}

impl OrmDatabase {
    pub fn into_connect_options(self) -> Result<ConnectOptions, ConfigError> {
        let backend = parse_backend(&required(self.dialect, "database.dialect")?)?;
        let name = required(self.name.map(Scalar::into_text), "database.name")?;
        let url = match backend {
            Backend::Sqlite => sqlite_url(&name),
            Backend::MySql | Backend::Postgres => {
                let host = required(self.host.map(Scalar::into_text), "database.host")?;
                let username = required(self.username.map(Scalar::into_text), "database.username")?;
                let password = self.password.map(Scalar::into_text);
                let port = match self.port {
                    Some(port) => port.value()?,
                    None => default_port(backend),
                };
                let mut url = server_url(backend, &host, port)?;
                set_credentials(&mut url, &username, password.as_deref())?;
                url.set_path(&name);
                url.to_string()
            }
        };
        Ok(ConnectOptions {
            backend,
            url,
            schema: search_path(backend, self.schema),
            max_connections: max_connections(self.max_connections),
        })
    }
}

impl DbMessageDatabase {
    pub fn into_connect_options(self) -> Result<ConnectOptions, ConfigError> {
        let backend = parse_backend(&required(self.driver, "data.database.driver")?)?;
        let source = required(self.source, "data.database.source")?;
        let url = normalize_source(backend, &source)?;
        Ok(ConnectOptions {
            backend,
            url,
            schema: search_path(backend, self.schema),
            max_connections: max_connections(self.max_connections),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingField(field))
}

pub fn parse_backend(driver: &str) -> Result<Backend, ConfigError> {
    match driver.trim().to_ascii_lowercase().as_str() {
        #[cfg(feature = "sqlx-mysql")]
        "mysql" => Ok(Backend::MySql),
        #[cfg(feature = "sqlx-postgres")]
        "postgres" | "postgresql" => Ok(Backend::Postgres),
        #[cfg(feature = "sqlx-sqlite")]
        "sqlite" | "sqlite3" => Ok(Backend::Sqlite),
        _ => Err(ConfigError::UnsupportedDriver(driver.to_owned())),
    }
}

fn default_port(backend: Backend) -> u16 {
    match backend {
        Backend::MySql => 3306,
        Backend::Postgres => 5432,
        Backend::Sqlite => 0,
    }
}

fn scheme(backend: Backend) -> &'static str {
    match backend {
        Backend::MySql => "mysql",
        Backend::Postgres => "postgres",
        Backend::Sqlite => "sqlite",
    }
}

fn search_path(backend: Backend, schema: Option<String>) -> Option<String> {
    match backend {
        Backend::Postgres => Some(
            schema
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_POSTGRES_SCHEMA.to_owned()),
        ),
        Backend::MySql | Backend::Sqlite => None,
    }
}

fn max_connections(value: Option<u32>) -> u32 {
    value.filter(|n| *n > 0).unwrap_or(DEFAULT_MAX_CONNECTIONS)
}

fn sqlite_url(path: &str) -> String {
    if path.starts_with("sqlite:") {
        path.to_owned()
    } else if path == ":memory:" {
        "sqlite::memory:".to_owned()
    } else {
        format!("sqlite://{path}")
    }
}

fn server_url(backend: Backend, host: &str, port: u16) -> Result<Url, ConfigError> {
    let mut url = Url::parse(&format!("{}://{host}", scheme(backend)))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidSource(format!("invalid host `{host}`")));
    }
    url.set_port(Some(port))
        .map_err(|_| ConfigError::InvalidSource(format!("invalid port `{port}`")))?;
    Ok(url)
}

fn set_credentials(url: &mut Url, username: &str, password: Option<&str>) -> Result<(), ConfigError> {
    url.set_username(username)
        .map_err(|_| ConfigError::InvalidSource(format!("invalid username `{username}`")))?;
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        url.set_password(Some(password))
            .map_err(|_| ConfigError::InvalidSource("invalid password".to_owned()))?;
    }
    Ok(())
}

/// Accept a URL for any backend, plus the DSN forms common in service configs:
/// `user:pass@tcp(host:port)/db?params` for MySQL and `host=.. user=.. dbname=..`
/// for Postgres
pub fn normalize_source(backend: Backend, source: &str) -> Result<String, ConfigError> {
    let source = source.trim();
    if backend == Backend::Sqlite {
        return Ok(sqlite_url(source));
    }
    if source.contains("://") {
        let url = Url::parse(source)?;
        let expected = match backend {
            Backend::MySql => &["mysql"][..],
            _ => &["postgres", "postgresql"][..],
        };
        if !expected.contains(&url.scheme()) {
            return Err(ConfigError::InvalidSource(format!(
                "scheme `{}` does not match driver `{}`",
                url.scheme(),
                scheme(backend)
            )));
        }
        // MySQL discovery reads the schema named by the URL path
        let database = url.path_segments().and_then(|mut segments| segments.next());
        if backend == Backend::MySql && database.map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField("data.database.source.database"));
        }
        return Ok(url.to_string());
    }
    match backend {
        Backend::MySql => mysql_dsn_url(source),
        _ => postgres_dsn_url(source),
    }
}

fn mysql_dsn_url(dsn: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidSource(format!("malformed MySQL DSN `{dsn}`"));
    // `user:pass@net(addr)/db?params`: the database follows the last `/` before the params
    let net_end = dsn.rfind(')').map_or(0, |close| close + 1);
    let params = dsn[net_end..].find('?').map_or(dsn.len(), |pos| pos + net_end);
    let slash = dsn[..params]
        .rfind('/')
        .filter(|slash| *slash >= net_end)
        .ok_or_else(invalid)?;
    let (left, right) = (&dsn[..slash], &dsn[slash + 1..]);
    let database = right.split('?').next().unwrap_or_default();
    if database.is_empty() {
        return Err(invalid());
    }
    let (userinfo, net) = match left.rsplit_once('@') {
        Some((userinfo, net)) => (Some(userinfo), net),
        None => (None, left),
    };
    let addr = match (net.find('('), net.rfind(')')) {
        (Some(open), Some(close)) if open < close => &net[open + 1..close],
        (None, None) => "",
        _ => return Err(invalid()),
    };
    let (host, port) = match addr.rsplit_once(':') {
        Some((host, port)) => (host, port.parse().map_err(|_| invalid())?),
        None if addr.is_empty() => ("127.0.0.1", default_port(Backend::MySql)),
        None => (addr, default_port(Backend::MySql)),
    };
    let mut url = server_url(Backend::MySql, host, port)?;
    if let Some(userinfo) = userinfo {
        let (username, password) = match userinfo.split_once(':') {
            Some((username, password)) => (username, Some(password)),
            None => (userinfo, None),
        };
        set_credentials(&mut url, username, password)?;
    }
    url.set_path(database);
    Ok(url.to_string())
}

fn postgres_dsn_url(dsn: &str) -> Result<String, ConfigError> {
    let mut host = "localhost";
    let mut port = default_port(Backend::Postgres);
    let mut username = None;
    let mut password = None;
    let mut database = None;
    let mut sslmode = None;
    for pair in dsn.split_whitespace() {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ConfigError::InvalidSource(format!("malformed Postgres DSN entry `{pair}`"))
        })?;
        match key {
            "host" => host = value,
            "port" => {
                port = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidSource(format!("invalid port `{value}`")))?
            }
            "user" => username = Some(value),
            "password" => password = Some(value),
            "dbname" => database = Some(value),
            "sslmode" => sslmode = Some(value),
            _ => {}
        }
    }
    let database = database.ok_or(ConfigError::MissingField("data.database.source.dbname"))?;
    let mut url = server_url(Backend::Postgres, host, port)?;
    if let Some(username) = username {
        set_credentials(&mut url, username, password)?;
    }
    url.set_path(database);
    if let Some(sslmode) = sslmode {
        url.query_pairs_mut().append_pair("sslmode", sslmode);
    }
    Ok(url.to_string())
}
