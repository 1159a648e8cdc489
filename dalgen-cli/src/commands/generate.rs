use crate::{
    ConfigError, ConfigSchema, Error, GenerateArgs, Orchestrator, Preset, SchemaGenerator, Summary,
};
use dalgen_codegen::GenerateSettings;

/// Run one of the built-in presets against the live schema
pub async fn run_preset(preset: Preset) -> Result<Summary, Error> {
    preset.orchestrator().run(&SchemaGenerator).await
}

pub async fn run_generate_command(args: GenerateArgs) -> Result<Summary, Error> {
    let orchestrator = build_orchestrator(args)?;
    orchestrator.run(&SchemaGenerator).await
}

/// Merge the flags over the selected preset
pub fn build_orchestrator(args: GenerateArgs) -> Result<Orchestrator, ConfigError> {
    let preset = args.preset.map(|name| name.preset());

    let config_path = match (args.config, preset) {
        (Some(path), _) => path,
        (None, Some(preset)) => preset.config_path.into(),
        (None, None) => return Err(ConfigError::MissingArgument("--config")),
    };
    let schema = args
        .schema
        .or(preset.map(|preset| preset.schema))
        .unwrap_or(ConfigSchema::Orm);
    let mapping = match (args.tables.is_empty(), preset) {
        (false, _) => args.tables.into_iter().collect(),
        (true, Some(preset)) => preset.mapping(),
        (true, None) => return Err(ConfigError::MissingArgument("--table")),
    };
    let model_dir = match (args.model_dir, preset) {
        (Some(dir), _) => dir,
        (None, Some(preset)) => preset.model_dir.into(),
        (None, None) => return Err(ConfigError::MissingArgument("--model-dir")),
    };
    let query_dir = match (args.query_dir, preset) {
        (Some(dir), _) => dir,
        (None, Some(preset)) => preset.query_dir.into(),
        (None, None) => return Err(ConfigError::MissingArgument("--query-dir")),
    };

    let settings = GenerateSettings::with_all_field_options(model_dir, query_dir)
        .unit_test(args.with_unit_test);
    Ok(Orchestrator::new(config_path, schema, mapping, settings).format(!args.no_format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{presets, Cli, Commands};
    use clap::Parser;
    use dalgen_codegen::TableMapping;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let cli = Cli::parse_from(["dalgen", "generate"].iter().chain(args).copied());
        match cli.command {
            Commands::Generate(args) => args,
            command => panic!("unexpected command {command:?}"),
        }
    }

    #[test]
    fn test_preset_defaults() {
        let orchestrator = build_orchestrator(generate_args(&["--preset", "user"])).unwrap();
        let expected = presets::USER.orchestrator();
        assert_eq!(orchestrator.config_path(), expected.config_path());
        assert_eq!(orchestrator.schema(), expected.schema());
        assert_eq!(orchestrator.mapping(), expected.mapping());
        assert_eq!(orchestrator.settings(), expected.settings());
    }

    #[test]
    fn test_flags_override_preset() {
        let orchestrator = build_orchestrator(generate_args(&[
            "--preset",
            "db",
            "--config",
            "conf/prod.yaml",
            "--table",
            "account=AccountPo",
            "--model-dir",
            "./src/store/model",
            "--with-unit-test",
        ]))
        .unwrap();
        assert_eq!(orchestrator.config_path(), Path::new("conf/prod.yaml"));
        assert_eq!(orchestrator.schema(), ConfigSchema::DbMessage);
        assert_eq!(
            orchestrator.mapping(),
            &TableMapping::new().map("account", "AccountPo")
        );
        assert_eq!(orchestrator.settings().model_dir(), Path::new("./src/store/model"));
        assert_eq!(orchestrator.settings().query_dir(), Path::new("./src/data/query"));
        assert!(orchestrator.settings().with_unit_test);
    }

    #[test]
    fn test_without_preset() {
        let orchestrator = build_orchestrator(generate_args(&[
            "-c",
            "config.yaml",
            "-t",
            "user=User",
            "--model-dir",
            "src/model",
            "--query-dir",
            "src/query",
        ]))
        .unwrap();
        assert_eq!(orchestrator.schema(), ConfigSchema::Orm);
        assert_eq!(orchestrator.settings().get_model_module(), "super::super::model");
    }

    #[test]
    fn test_without_preset_missing_arguments() {
        let err = build_orchestrator(generate_args(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument("--config")));

        let err = build_orchestrator(generate_args(&["-c", "config.yaml"])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument("--table")));

        let err =
            build_orchestrator(generate_args(&["-c", "config.yaml", "-t", "user=User"])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument("--model-dir")));
    }
}
