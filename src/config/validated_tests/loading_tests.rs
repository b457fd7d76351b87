//! Tests for configuration loading and required fields.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, tempdir};

use super::*;
use crate::config::write_default_config;

mod required_fields {
    use super::*;

    #[test]
    fn missing_execution_file_returns_error() {
        let cli = cli(&["--bearer-token", "t"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "execution.file",
                ..
            })
        ));
    }

    #[test]
    fn execution_file_from_cli() {
        let cli = cli(&["--execution-file", "run.json"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.execution_file.to_str(), Some("run.json"));
    }

    #[test]
    fn execution_file_from_toml() {
        let cli = cli(&[]);
        let toml = toml("[execution]\nfile = \"from-file.json\"");
        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.execution_file.to_str(), Some("from-file.json"));
    }

    #[test]
    fn credentials_are_not_validated_here() {
        // Completeness is checked by the task, not by configuration loading.
        let cli = cli(&["--execution-file", "run.json", "--consumer-key", "ck"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.params.credentials.consumer_key.as_deref(), Some("ck"));
        assert!(config.params.credentials.resolve().is_err());
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cli = cli(&["--execution-file", "run.json"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.endpoint.as_str(), "https://api.twitter.com/2/tweets");
        assert!(config.params.execution_id.is_none());
        assert!(config.params.custom_fields.is_none());
        assert!(config.params.custom_message.is_none());
        assert!(config.params.options.is_none());
        assert!(!config.dry_run);
        assert!(!config.verbose);
    }
}

mod load {
    use super::*;

    #[test]
    fn load_without_config_file() {
        let cli = cli(&["--execution-file", "run.json", "--bearer-token", "t"]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.params.credentials.bearer_token.as_deref(), Some("t"));
    }

    #[test]
    fn load_with_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[credentials]\nbearer_token = \"file-token\"\n\n[execution]\nfile = \"run.json\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["-c", path])).unwrap();

        assert_eq!(
            config.params.credentials.bearer_token.as_deref(),
            Some("file-token")
        );
        assert_eq!(config.execution_file.to_str(), Some("run.json"));
    }

    #[test]
    fn load_missing_config_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = ValidatedConfig::load(&cli(&["-c", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}

mod init {
    use super::*;

    #[test]
    fn write_default_config_creates_parseable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x-notify.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(TomlConfig::parse(&content).is_ok());
    }

    #[test]
    fn write_default_config_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("x-notify.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_never_contains_secrets() {
        let cli = cli(&[
            "--execution-file",
            "run.json",
            "--consumer-key",
            "ck",
            "--consumer-secret",
            "very-secret-consumer",
            "--access-token",
            "at",
            "--access-secret",
            "very-secret-access",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        let text = config.to_string();

        assert!(text.contains("auth: oauth1"));
        assert!(!text.contains("very-secret"));
    }

    #[test]
    fn display_reports_current_execution_by_default() {
        let config = ValidatedConfig::from_raw(&cli(&["--execution-file", "run.json"]), None).unwrap();

        assert!(config.to_string().contains("execution_id: current"));
    }
}
