//! Tests for validated configuration.

use std::time::Duration;

use clap::Parser;

use super::cli::Cli;
use super::file::ConfigFile;
use super::validated::{ValidatedConfig, write_default_config};
use super::{ConfigError, ValidationErrors};
use crate::fetch::AuthType;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["data-go-kr", "--config", "api.json"];
    full_args.extend(args);
    Cli::parse_from(full_args)
}

/// Helper to parse a JSON config
fn json(content: &str) -> ConfigFile {
    ConfigFile::parse_json(content).unwrap()
}

/// A config file with every required field set
fn complete_file() -> ConfigFile {
    json(
        r#"{
            "serviceKey": "FILE_KEY",
            "authType": "query",
            "endpoint": "https://api.example.com/svc",
            "serviceName": "getList"
        }"#,
    )
}

fn messages(errors: &ValidationErrors) -> Vec<String> {
    errors.errors().iter().map(ToString::to_string).collect()
}

fn query_pairs(config: &ValidatedConfig) -> Vec<(&str, &str)> {
    config
        .params
        .query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

mod defaults {
    use super::*;

    #[test]
    fn numeric_defaults_apply() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&complete_file())).unwrap();

        assert_eq!(config.retry_policy.max_retries, 5);
        assert_eq!(config.retry_policy.delay, Duration::from_millis(1000));
        assert_eq!(config.pretty, None);
        assert!(!config.verbose);
        assert_eq!(query_pairs(&config), vec![("numOfRows", "10"), ("pageNo", "1")]);
    }

    #[test]
    fn required_fields_come_from_file() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&complete_file())).unwrap();

        assert_eq!(config.params.service_key, "FILE_KEY");
        assert_eq!(config.params.service_name, "getList");
        assert_eq!(config.params.auth_type, AuthType::Query);
        assert_eq!(config.params.endpoint.as_str(), "https://api.example.com/svc");
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_strings_override_file() {
        let cli = cli(&[
            "--service-key",
            "CLI_KEY",
            "--service-name",
            "getOther",
            "--auth-type",
            "header",
            "--endpoint",
            "https://cli.example.com",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap();

        assert_eq!(config.params.service_key, "CLI_KEY");
        assert_eq!(config.params.service_name, "getOther");
        assert_eq!(config.params.auth_type, AuthType::Header);
        assert_eq!(config.params.endpoint.as_str(), "https://cli.example.com/");
    }

    #[test]
    fn cli_numbers_override_file() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "maxRetries": 9, "delay": 900, "numOfRows": 90, "pageNo": 9, "pretty": 8
            }"#,
        );
        let cli = cli(&[
            "--max-retries",
            "1",
            "--delay",
            "100",
            "--num-of-rows",
            "10",
            "--page-no",
            "3",
            "--pretty",
            "2",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.retry_policy.max_retries, 1);
        assert_eq!(config.retry_policy.delay, Duration::from_millis(100));
        assert_eq!(config.pretty, Some(2));
        assert_eq!(query_pairs(&config), vec![("numOfRows", "10"), ("pageNo", "3")]);
    }

    #[test]
    fn file_numbers_override_defaults() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "maxRetries": 2, "delay": 250, "pretty": 4
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert_eq!(config.retry_policy.max_retries, 2);
        assert_eq!(config.retry_policy.delay, Duration::from_millis(250));
        assert_eq!(config.pretty, Some(4));
    }

    #[test]
    fn blank_cli_string_falls_back_to_file() {
        let cli = cli(&["--service-key", "  "]);

        let config = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap();

        assert_eq!(config.params.service_key, "FILE_KEY");
    }

    #[test]
    fn explicit_cli_zero_wins_and_is_rejected() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "maxRetries": 3
            }"#,
        );

        let errors = ValidatedConfig::from_raw(&cli(&["--max-retries", "0"]), Some(&file))
            .unwrap_err();

        assert_eq!(
            messages(&errors),
            vec!["max-retries should be integer and greater than 0"]
        );
    }

    #[test]
    fn file_null_counts_as_absent() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "delay": null
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert_eq!(config.retry_policy.delay, Duration::from_millis(1000));
    }

    #[test]
    fn file_auth_type_is_case_insensitive() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "HEADER",
                "endpoint": "https://api.example.com", "serviceName": "s"
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert_eq!(config.params.auth_type, AuthType::Header);
    }
}

mod validation {
    use super::*;

    #[test]
    fn missing_required_fields_listed_in_order() {
        let errors = ValidatedConfig::from_raw(&cli(&[]), None).unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                "service-key must be defined",
                "service-name must be defined",
                "auth-type must be defined",
                "endpoint must be defined",
            ]
        );
        assert!(matches!(
            errors.errors()[0],
            ConfigError::MissingRequired {
                field: "service-key",
                ..
            }
        ));
    }

    #[test]
    fn numeric_errors_come_before_required_errors() {
        let file = json(r#"{"delay": "fast", "pageNo": -1, "pretty": 1.5}"#);

        let errors = ValidatedConfig::from_raw(&cli(&["--max-retries", "-2"]), Some(&file))
            .unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                "max-retries should be integer and greater than 0",
                "delay should be integer and greater than 0",
                "page-no should be integer and greater than 0",
                "pretty should be integer and greater than 0",
                "service-key must be defined",
                "service-name must be defined",
                "auth-type must be defined",
                "endpoint must be defined",
            ]
        );
    }

    #[test]
    fn wrongly_typed_text_fields_are_each_reported() {
        let file = json(
            r#"{
                "serviceKey": 12345, "authType": 7,
                "endpoint": "https://api.example.com", "serviceName": ["s"]
            }"#,
        );

        let errors = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap_err();

        assert_eq!(
            messages(&errors),
            vec![
                "service-key should be a string",
                "service-name should be a string",
                "auth-type should be a string",
            ]
        );
    }

    #[test]
    fn cli_value_wins_over_wrongly_typed_file_value() {
        let file = json(
            r#"{
                "serviceKey": 12345, "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s"
            }"#,
        );

        let config =
            ValidatedConfig::from_raw(&cli(&["--service-key", "CLI_KEY"]), Some(&file)).unwrap();

        assert_eq!(config.params.service_key, "CLI_KEY");
    }

    #[test]
    fn invalid_auth_type_in_file() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "cookie",
                "endpoint": "https://api.example.com", "serviceName": "s"
            }"#,
        );

        let errors = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
        assert!(matches!(
            &errors.errors()[0],
            ConfigError::InvalidAuthType { value } if value == "cookie"
        ));
    }

    #[test]
    fn relative_endpoint_is_rejected() {
        let cli = cli(&["--endpoint", "api.example.com/svc"]);

        let errors = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap_err();

        assert!(matches!(
            errors.errors()[0],
            ConfigError::InvalidUrl { .. }
        ));
    }

    #[test]
    fn opaque_endpoint_is_rejected() {
        let cli = cli(&["--endpoint", "mailto:someone@example.com"]);

        let errors = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap_err();

        assert!(matches!(
            errors.errors()[0],
            ConfigError::InvalidUrl { .. }
        ));
    }

    #[test]
    fn retries_beyond_u32_are_out_of_range() {
        let cli = cli(&["--max-retries", "5000000000"]);

        let errors = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap_err();

        assert!(matches!(
            errors.errors()[0],
            ConfigError::OutOfRange {
                field: "max-retries",
                ..
            }
        ));
    }

    #[test]
    fn errors_display_one_per_line() {
        let errors = ValidatedConfig::from_raw(&cli(&[]), None).unwrap_err();

        assert_eq!(errors.to_string().lines().count(), 4);
    }
}

mod query {
    use super::*;

    #[test]
    fn pass_through_params_follow_pagination_in_file_order() {
        let file = json(
            r#"{
                "returnType": "json",
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "stationName": "종로구",
                "ver": 1.3,
                "flag": true
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert_eq!(
            query_pairs(&config),
            vec![
                ("numOfRows", "10"),
                ("pageNo", "1"),
                ("returnType", "json"),
                ("stationName", "종로구"),
                ("ver", "1.3"),
                ("flag", "true"),
            ]
        );
    }

    #[test]
    fn null_pass_through_is_skipped() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "dataTerm": null
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        assert_eq!(query_pairs(&config), vec![("numOfRows", "10"), ("pageNo", "1")]);
    }

    #[test]
    fn control_fields_are_not_sent() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "maxRetries": 1, "delay": 1, "pretty": 2
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();

        let keys: Vec<&str> = query_pairs(&config).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["numOfRows", "pageNo"]);
    }

    #[test]
    fn disable_flags_drop_pagination() {
        let cli = cli(&["--no-num-of-rows", "--no-page-no"]);

        let config = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap();

        assert!(config.params.query.is_empty());
    }

    #[test]
    fn disable_flag_ignores_invalid_file_value() {
        let file = json(
            r#"{
                "serviceKey": "K", "authType": "query",
                "endpoint": "https://api.example.com", "serviceName": "s",
                "numOfRows": 0
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["--no-num-of-rows"]), Some(&file)).unwrap();

        assert_eq!(query_pairs(&config), vec![("pageNo", "1")]);
    }
}

mod loading {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_config_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"serviceKey": "K", "authType": "query", "endpoint": "https://api.example.com", "serviceName": "s"}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["data-go-kr", "--config", path]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.params.service_name, "s");
    }

    #[test]
    fn load_missing_file_fails() {
        let cli = Cli::parse_from(["data-go-kr", "--config", "/nonexistent/data-go-kr.json"]);

        let errors = ValidatedConfig::load(&cli).unwrap_err();

        assert!(matches!(errors.errors()[0], ConfigError::FileRead { .. }));
    }

    #[test]
    fn write_default_config_creates_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data-go-kr.json");

        write_default_config(&path).unwrap();

        let file = ConfigFile::load(&path).unwrap();
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&file)).unwrap();
        assert_eq!(config.params.auth_type, AuthType::Query);
        assert_eq!(config.params.query.len(), 5);
    }
}

mod display {
    use super::*;

    #[test]
    fn display_masks_service_key() {
        let cli = cli(&["--service-key", "ABCDEFGHIJ"]);

        let config = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap();
        let shown = config.to_string();

        assert!(shown.contains("ABCD****"));
        assert!(!shown.contains("ABCDEFGHIJ"));
    }

    #[test]
    fn display_masks_short_key_entirely() {
        let cli = cli(&["--service-key", "ABC"]);

        let config = ValidatedConfig::from_raw(&cli, Some(&complete_file())).unwrap();

        assert!(config.to_string().contains("service_key: ****"));
    }
}
