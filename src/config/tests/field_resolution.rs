//! Tests for field resolution methods (`resolve_token`,
//! `repository_locators`, `search_config`, `sheets_config`).

use std::time::Duration;

use rstest::rstest;

use crate::PrSweepConfig;
use crate::github::ReportError;

#[rstest]
fn resolve_token_prefers_configured_value() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = PrSweepConfig {
        token: Some("my-token".to_owned()),
        ..Default::default()
    };

    let token = config.resolve_token().expect("token should resolve");
    assert_eq!(token.value(), "my-token");
}

#[rstest]
fn resolve_token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = PrSweepConfig::default();

    let token = config.resolve_token().expect("token should resolve");
    assert_eq!(token.value(), "legacy-token");
}

#[rstest]
#[case::unset(None)]
#[case::blank(Some("   "))]
fn resolve_token_returns_error_when_missing(#[case] configured: Option<&str>) {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = PrSweepConfig {
        token: configured.map(ToOwned::to_owned),
        ..Default::default()
    };

    assert_eq!(config.resolve_token(), Err(ReportError::MissingToken));
}

#[rstest]
fn repository_locators_split_comma_separated_list() {
    let config = PrSweepConfig {
        repositories: Some(" octo/one, octo/two ,,".to_owned()),
        ..Default::default()
    };

    let locators = config
        .repository_locators()
        .expect("repositories should parse");
    let rendered: Vec<String> = locators.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["octo/one", "octo/two"]);
}

#[rstest]
#[case::unset(None)]
#[case::only_commas(Some(" , "))]
fn repository_locators_require_an_entry(#[case] repositories: Option<&str>) {
    let config = PrSweepConfig {
        repositories: repositories.map(ToOwned::to_owned),
        ..Default::default()
    };

    let error = config
        .repository_locators()
        .expect_err("empty list should be rejected");
    assert!(matches!(error, ReportError::Configuration { .. }));
}

#[rstest]
fn repository_locators_reject_malformed_entry() {
    let config = PrSweepConfig {
        repositories: Some("octo/one,not-a-slug".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.repository_locators(),
        Err(ReportError::InvalidRepository {
            input: "not-a-slug".to_owned()
        })
    );
}

#[rstest]
fn search_config_carries_base_token_and_timeout() {
    let config = PrSweepConfig {
        token: Some("ghp_example".to_owned()),
        api_base: "https://ghe.example.com/api/v3".to_owned(),
        request_timeout_seconds: 5,
        ..Default::default()
    };

    let search = config.search_config().expect("search config should build");
    assert_eq!(search.api_base, "https://ghe.example.com/api/v3");
    assert_eq!(search.token.as_deref(), Some("ghp_example"));
    assert_eq!(search.timeout, Duration::from_secs(5));
}

#[rstest]
fn sheets_config_requires_spreadsheet_id() {
    let _guard = env_lock::lock_env([("GOOGLE_SHEETS_ACCESS_TOKEN", Some("ya29.env"))]);
    let config = PrSweepConfig::default();

    assert!(config.sheets_config().is_none());
}

#[rstest]
fn sheets_config_requires_a_token() {
    let _guard = env_lock::lock_env([("GOOGLE_SHEETS_ACCESS_TOKEN", None::<&str>)]);
    let config = PrSweepConfig {
        spreadsheet_id: Some("sheet-id".to_owned()),
        ..Default::default()
    };

    assert!(config.sheets_config().is_none());
}

#[rstest]
fn sheets_config_falls_back_to_environment_token() {
    let _guard = env_lock::lock_env([("GOOGLE_SHEETS_ACCESS_TOKEN", Some("ya29.env"))]);
    let config = PrSweepConfig {
        spreadsheet_id: Some("sheet-id".to_owned()),
        ..Default::default()
    };

    let sheets = config.sheets_config().expect("sheets config should resolve");
    assert_eq!(sheets.spreadsheet_id, "sheet-id");
    assert_eq!(sheets.access_token, "ya29.env");
    assert_eq!(sheets.base_url, "https://sheets.googleapis.com");
}
