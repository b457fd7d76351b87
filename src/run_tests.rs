//! Tests for the run module.

use std::io::Write;

use tempfile::NamedTempFile;
use x_notify::config::Cli;

use super::*;

const EXECUTION_JSON: &str = r#"{
    "id": "abc123",
    "namespace": "company.team",
    "flow_id": "deploy",
    "link": "https://kestra.example.com/ui/executions/company.team/deploy/abc123",
    "status": "SUCCESS",
    "start_date": "2024-05-01T10:00:00Z",
    "duration": "PT1M30S"
}"#;

fn execution_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{EXECUTION_JSON}").unwrap();
    file
}

fn config_for(file: &NamedTempFile, extra: &[&str]) -> ValidatedConfig {
    let path = file.path().to_str().unwrap();
    let mut args = vec!["x-notify", "--execution-file", path];
    args.extend_from_slice(extra);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(args), None).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn executions_error_displays_source() {
        let error = RunError::Executions(ExecutionError::NoCurrent);

        assert!(error.to_string().contains("Failed to load executions"));
    }

    #[test]
    fn task_error_is_transparent() {
        let error = RunError::from(TaskError::EmptyMessage);

        assert_eq!(error.to_string(), TaskError::EmptyMessage.to_string());
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::Templates(TemplateError::NotFound {
            template: "x".to_string(),
        });

        assert!(format!("{error:?}").contains("Templates"));
    }
}

mod create_task {
    use super::*;

    #[test]
    fn uses_configured_endpoint() {
        let file = execution_file();
        let config = config_for(&file, &["--endpoint", "https://api.example.com/2/tweets"]);

        let task = create_task(&config).unwrap();

        assert_eq!(task.endpoint().as_str(), "https://api.example.com/2/tweets");
    }

    #[test]
    fn missing_execution_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let cli = Cli::parse_from_iter(["x-notify", "--execution-file", path.to_str().unwrap()]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        let result = create_task(&config);

        assert!(matches!(
            result,
            Err(RunError::Executions(ExecutionError::FileRead { .. }))
        ));
    }

    #[test]
    fn malformed_execution_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"id\": 1}}").unwrap();
        let config = config_for(&file, &[]);

        let result = create_task(&config);

        assert!(matches!(
            result,
            Err(RunError::Executions(ExecutionError::Parse { .. }))
        ));
    }
}

mod execute {
    use super::*;

    #[tokio::test]
    async fn dry_run_composes_without_sending() {
        let file = execution_file();
        // Unroutable endpoint: any send attempt would fail the test.
        let config = config_for(
            &file,
            &[
                "--dry-run",
                "--bearer-token",
                "t",
                "--endpoint",
                "http://127.0.0.1:9/never",
            ],
        );

        let result = execute(config).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn dry_run_still_validates_credentials() {
        let file = execution_file();
        let config = config_for(&file, &["--dry-run", "--consumer-key", "ck"]);

        let result = execute(config).await;

        assert!(matches!(
            result,
            Err(RunError::Task(TaskError::Credential(_)))
        ));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_sending() {
        let file = execution_file();
        let config = config_for(&file, &[]);

        let result = execute(config).await;

        assert!(matches!(
            result,
            Err(RunError::Task(TaskError::Credential(_)))
        ));
    }
}
