use crate::{ConfigSchema, Orchestrator};
use dalgen_codegen::{GenerateSettings, TableMapping};

/// A fixed orchestrator configuration shipped as its own binary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub config_path: &'static str,
    pub schema: ConfigSchema,
    pub tables: &'static [(&'static str, &'static str)],
    pub model_dir: &'static str,
    pub query_dir: &'static str,
}

/// `gen-user`: ORM record config, data access layer under `src/dal`
pub const USER: Preset = Preset {
    name: "user",
    config_path: "./config.yaml",
    schema: ConfigSchema::Orm,
    tables: &[
        ("user", "User"),
        ("user_auth", "UserAuth"),
        ("user_profile", "UserProfile"),
    ],
    model_dir: "./src/dal/model",
    query_dir: "./src/dal/query",
};

/// `gen-db`: DB message config, persistent objects under `src/data`
pub const DB: Preset = Preset {
    name: "db",
    config_path: "./config.db.yaml",
    schema: ConfigSchema::DbMessage,
    tables: &[
        ("user", "UserPo"),
        ("user_auth", "UserAuthPo"),
        ("user_login_log", "UserLoginLogPo"),
    ],
    model_dir: "./src/data/model",
    query_dir: "./src/data/query",
};

pub const PRESETS: [Preset; 2] = [USER, DB];

impl Preset {
    pub fn by_name(name: &str) -> Option<Preset> {
        PRESETS.into_iter().find(|preset| preset.name == name)
    }

    pub fn mapping(&self) -> TableMapping {
        self.tables.iter().copied().collect()
    }

    /// Every field option on, unit test emission off
    pub fn settings(&self) -> GenerateSettings {
        GenerateSettings::with_all_field_options(self.model_dir, self.query_dir)
    }

    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.config_path, self.schema, self.mapping(), self.settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_presets_are_valid() {
        for preset in PRESETS {
            preset.mapping().validate().unwrap();
            assert_eq!(preset.mapping().len(), 3);
        }
    }

    #[test]
    fn test_user_preset() {
        let orchestrator = USER.orchestrator();
        assert_eq!(orchestrator.config_path(), Path::new("./config.yaml"));
        assert_eq!(orchestrator.schema(), ConfigSchema::Orm);
        assert_eq!(orchestrator.mapping().type_name_of("user_auth"), Some("UserAuth"));
        let settings = orchestrator.settings();
        assert_eq!(settings.model_dir(), Path::new("./src/dal/model"));
        assert_eq!(settings.query_dir(), Path::new("./src/dal/query"));
        assert_eq!(settings.get_model_module(), "super::super::model");
        assert!(settings.field_nullable);
        assert!(settings.field_coverable);
        assert!(settings.field_signable);
        assert!(settings.field_with_index_tag);
        assert!(settings.field_with_type_tag);
        assert!(!settings.with_unit_test);
    }

    #[test]
    fn test_db_preset() {
        let orchestrator = DB.orchestrator();
        assert_eq!(orchestrator.config_path(), Path::new("./config.db.yaml"));
        assert_eq!(orchestrator.schema(), ConfigSchema::DbMessage);
        assert_eq!(
            orchestrator.mapping().tables().collect::<Vec<_>>(),
            vec!["user", "user_auth", "user_login_log"]
        );
        assert_eq!(
            orchestrator.mapping().type_name_of("user_login_log"),
            Some("UserLoginLogPo")
        );
        assert_eq!(orchestrator.settings().model_dir(), Path::new("./src/data/model"));
        assert_eq!(orchestrator.settings().query_dir(), Path::new("./src/data/query"));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Preset::by_name("user"), Some(USER));
        assert_eq!(Preset::by_name("db"), Some(DB));
        assert_eq!(Preset::by_name("admin"), None);
    }
}
