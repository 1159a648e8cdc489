use async_trait::async_trait;
use dalgen_cli::{ConfigError, ConfigSchema, DatabasePool, Error, Generator, Orchestrator, SchemaGenerator};
use dalgen_codegen::{FileSet, GenerateSettings, OutputFile, OutputKind, TableMapping};
use pretty_assertions::assert_eq;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};
use tempfile::TempDir;

/// Returns a fixed file set, or fails, and counts its invocations
#[derive(Default)]
struct FakeGenerator {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeGenerator {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl Generator for FakeGenerator {
    async fn generate(
        &self,
        _pool: &DatabasePool,
        mapping: &TableMapping,
        _settings: &GenerateSettings,
    ) -> Result<FileSet, dalgen_codegen::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(dalgen_codegen::Error::UnknownTable("user".to_owned()));
        }
        let mut files = Vec::new();
        for entry in mapping.iter() {
            files.push(OutputFile {
                kind: OutputKind::Model,
                name: format!("{}.rs", entry.table),
                content: format!("pub struct {};\n", entry.type_name),
            });
            files.push(OutputFile {
                kind: OutputKind::Query,
                name: format!("{}.rs", entry.table),
                content: format!("pub struct {}Query;\n", entry.type_name),
            });
        }
        Ok(FileSet { files })
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn settings(&self) -> GenerateSettings {
        GenerateSettings::with_all_field_options(self.path("src/dal/model"), self.path("src/dal/query"))
    }

    fn write_config(&self, content: &str) -> PathBuf {
        let path = self.path("config.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    /// ORM record config pointing at an SQLite file inside the workspace
    fn sqlite_config(&self, db_file: &str) -> PathBuf {
        self.write_config(&format!(
            "database:\n  dialect: sqlite\n  name: {}\n",
            self.path(db_file).display()
        ))
    }

    async fn create_sqlite_schema(&self, db_file: &str) {
        let url = format!("sqlite://{}?mode=rwc", self.path(db_file).display());
        let pool = sqlx::SqlitePool::connect(&url).await.unwrap();
        for sql in [
            "CREATE TABLE user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username VARCHAR(64) NOT NULL,
                nickname VARCHAR(64),
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            "CREATE UNIQUE INDEX uk_user_username ON user (username)",
            "CREATE TABLE user_auth (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                secret TEXT NOT NULL
            )",
            "CREATE INDEX idx_user_auth_user_id ON user_auth (user_id)",
            "CREATE TABLE user_profile (
                user_id INTEGER NOT NULL PRIMARY KEY,
                bio TEXT,
                level INTEGER NOT NULL DEFAULT 1
            )",
        ] {
            sqlx::query(sql).execute(&pool).await.unwrap();
        }
        pool.close().await;
    }
}

fn mapping() -> TableMapping {
    TableMapping::new()
        .map("user", "User")
        .map("user_auth", "UserAuth")
        .map("user_profile", "UserProfile")
}

fn read_dir_sorted(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_unreachable_database() {
    let workspace = Workspace::new();
    let config = workspace.sqlite_config("missing/app.db");
    let generator = FakeGenerator::default();

    let result = Orchestrator::new(config, ConfigSchema::Orm, mapping(), workspace.settings())
        .format(false)
        .run(&generator)
        .await;

    assert!(matches!(result, Err(Error::Connection(_))));
    assert_eq!(generator.calls(), 0);
    assert!(!workspace.path("src/dal/model").exists());
}

#[tokio::test]
async fn test_missing_config() {
    let workspace = Workspace::new();
    let generator = FakeGenerator::default();

    let result = Orchestrator::new(
        workspace.path("config.yaml"),
        ConfigSchema::Orm,
        mapping(),
        workspace.settings(),
    )
    .run(&generator)
    .await;

    assert!(matches!(result, Err(Error::Config(ConfigError::Read { .. }))));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_config_of_other_schema() {
    let workspace = Workspace::new();
    let config = workspace.sqlite_config("app.db");
    let generator = FakeGenerator::default();

    let result = Orchestrator::new(config, ConfigSchema::DbMessage, mapping(), workspace.settings())
        .run(&generator)
        .await;

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse { .. }))));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_invalid_mapping() {
    let workspace = Workspace::new();
    let generator = FakeGenerator::default();
    let mapping = mapping().map("user_login_log", "User");

    let result = Orchestrator::new(
        workspace.path("config.yaml"),
        ConfigSchema::Orm,
        mapping,
        workspace.settings(),
    )
    .run(&generator)
    .await;

    assert!(matches!(
        result,
        Err(Error::Generation(dalgen_codegen::Error::Mapping(_)))
    ));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_shared_output_dir() {
    let workspace = Workspace::new();
    workspace.create_sqlite_schema("app.db").await;
    let config = workspace.sqlite_config("app.db");
    let generator = FakeGenerator::default();
    let settings =
        GenerateSettings::with_all_field_options(workspace.path("src/dal"), workspace.path("src/dal"));

    let result = Orchestrator::new(config, ConfigSchema::Orm, mapping(), settings)
        .format(false)
        .run(&generator)
        .await;

    assert!(matches!(
        result,
        Err(Error::Generation(dalgen_codegen::Error::OutputDir(_)))
    ));
    assert_eq!(generator.calls(), 0);
    assert!(!workspace.path("src/dal").exists());
}

#[tokio::test]
async fn test_fake_generator_output() {
    let workspace = Workspace::new();
    workspace.create_sqlite_schema("app.db").await;
    let config = workspace.sqlite_config("app.db");
    let generator = FakeGenerator::default();

    let summary = Orchestrator::new(config, ConfigSchema::Orm, mapping(), workspace.settings())
        .format(false)
        .run(&generator)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(summary.len(), 6);
    assert_eq!(
        read_dir_sorted(&workspace.path("src/dal/query")),
        vec!["user.rs", "user_auth.rs", "user_profile.rs"]
    );
    assert_eq!(
        fs::read_to_string(workspace.path("src/dal/model/user_auth.rs")).unwrap(),
        "pub struct UserAuth;\n"
    );
    assert_eq!(read_dir_sorted(&workspace.path("src/dal")), vec!["model", "query"]);
}

#[tokio::test]
async fn test_generator_failure_writes_nothing() {
    let workspace = Workspace::new();
    workspace.create_sqlite_schema("app.db").await;
    let config = workspace.sqlite_config("app.db");
    let generator = FakeGenerator::failing();

    let result = Orchestrator::new(config, ConfigSchema::Orm, mapping(), workspace.settings())
        .format(false)
        .run(&generator)
        .await;

    assert!(matches!(
        result,
        Err(Error::Generation(dalgen_codegen::Error::UnknownTable(_)))
    ));
    assert_eq!(generator.calls(), 1);
    assert!(!workspace.path("src/dal").exists());
}

#[tokio::test]
async fn test_generate_from_sqlite() {
    let workspace = Workspace::new();
    workspace.create_sqlite_schema("app.db").await;
    let config = workspace.sqlite_config("app.db");
    let orchestrator = Orchestrator::new(config, ConfigSchema::Orm, mapping(), workspace.settings())
        .format(false);

    let summary = orchestrator.run(&SchemaGenerator).await.unwrap();
    assert_eq!(summary.len(), 9);

    assert_eq!(
        read_dir_sorted(&workspace.path("src/dal/model")),
        vec!["mod.rs", "prelude.rs", "user.rs", "user_auth.rs", "user_profile.rs"]
    );
    assert_eq!(
        read_dir_sorted(&workspace.path("src/dal/query")),
        vec!["mod.rs", "user.rs", "user_auth.rs", "user_profile.rs"]
    );
    for path in summary.files.iter() {
        assert!(!fs::read_to_string(path).unwrap().trim().is_empty(), "{}", path.display());
    }

    let user = fs::read_to_string(workspace.path("src/dal/model/user.rs")).unwrap();
    assert!(user.contains("table_name = \"user\""));
    assert!(user.contains("pub const TABLE_NAME : & str = \"user\""));
    assert!(user.contains("pub type User = Model ;"));
    assert!(user.contains("pub nickname : Option < String >"));

    let facade = fs::read_to_string(workspace.path("src/dal/query/mod.rs")).unwrap();
    assert!(facade.contains("pub struct Query"));
    assert!(facade.contains("impl From < DatabaseConnection > for Query"));
}

#[tokio::test]
async fn test_generate_is_idempotent() {
    let workspace = Workspace::new();
    workspace.create_sqlite_schema("app.db").await;
    let config = workspace.sqlite_config("app.db");
    let orchestrator = Orchestrator::new(config, ConfigSchema::Orm, mapping(), workspace.settings())
        .format(false);

    let first = orchestrator.run(&SchemaGenerator).await.unwrap();
    let first_contents: Vec<Vec<u8>> = first.files.iter().map(|p| fs::read(p).unwrap()).collect();

    let second = orchestrator.run(&SchemaGenerator).await.unwrap();
    let second_contents: Vec<Vec<u8>> = second.files.iter().map(|p| fs::read(p).unwrap()).collect();

    assert_eq!(first.files, second.files);
    assert_eq!(first_contents, second_contents);
}

#[tokio::test]
async fn test_unknown_table_keeps_output() {
    let workspace = Workspace::new();
    workspace.create_sqlite_schema("app.db").await;
    let config = workspace.sqlite_config("app.db");
    let model_dir = workspace.path("src/dal/model");
    fs::create_dir_all(&model_dir).unwrap();
    fs::write(model_dir.join("user.rs"), "// previous run\n").unwrap();

    let result = Orchestrator::new(
        config,
        ConfigSchema::Orm,
        mapping().map("user_login_log", "UserLoginLog"),
        workspace.settings(),
    )
    .format(false)
    .run(&SchemaGenerator)
    .await;

    match result {
        Err(Error::Generation(dalgen_codegen::Error::UnknownTable(table))) => {
            assert_eq!(table, "user_login_log")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(read_dir_sorted(&model_dir), vec!["user.rs"]);
    assert_eq!(
        fs::read_to_string(model_dir.join("user.rs")).unwrap(),
        "// previous run\n"
    );
}
