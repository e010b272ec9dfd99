#![allow(clippy::unwrap_used, clippy::expect_used)]

use common_enums::{GatewayEndpoint, HashAlgorithm};
use ogone_cli::{
    app::{self, Command},
    configs::{workspace_path, Config},
};

mod common;

#[test]
fn test_config_file_is_loaded() {
    let (_dir, config) = common::load_test_config();

    assert_eq!(config.common.environment, "development");
    assert!(!config.log.console.enabled);
    assert!(config.connectors.ogone.debug);
    assert!(!config.connectors.ogone.utf8);
    assert_eq!(config.connectors.ogone.hash_algorithm, HashAlgorithm::Sha1);
    assert_eq!(config.auth.pspid, "foobar");
    assert_eq!(config.redirection.accept_url, None);
    assert!(config.proxy.bypass_proxy_urls.is_empty());
}

#[test]
fn test_unknown_environment_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staging.toml");
    std::fs::write(
        &path,
        r#"
[common]
environment = "staging"

[connectors.ogone]
base_url = "https://secure.ogone.com/ncol/"

[auth]
pspid = "foobar"
api_user = "api_user"
api_password = "api_password"
sha_in = "in"
sha_out = "out"
"#,
    )
    .unwrap();

    let error = Config::new_with_config_path(Some(path)).unwrap_err();
    assert!(error.to_string().contains("Invalid environment 'staging'"));
}

#[test]
fn test_missing_credentials_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("incomplete.toml");
    std::fs::write(
        &path,
        r#"
[common]
environment = "development"

[connectors.ogone]
base_url = "https://secure.ogone.com/ncol/"
"#,
    )
    .unwrap();

    assert!(Config::new_with_config_path(Some(path)).is_err());
}

#[test]
fn test_shipped_development_config_answers_from_fixtures() {
    let config = Config::new_with_config_path(Some(
        workspace_path().join("config").join("development.toml"),
    ))
    .unwrap();

    let fixtures_dir = config.connectors.ogone.fixtures_dir.unwrap();
    assert!(fixtures_dir.is_absolute());
    assert!(fixtures_dir.join("deposited.xml").exists());
}

#[tokio::test]
async fn test_sign_uses_configured_sha_in() {
    let (_dir, config) = common::load_test_config();
    let command = Command::Sign {
        parameters: [
            ("PSPID", "MyPSPID"),
            ("ORDERID", "1234"),
            ("AMOUNT", "1500"),
            ("CURRENCY", "EUR"),
            ("LANGUAGE", "en_US"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect(),
    };

    let output = app::run(command, &config).await.unwrap();
    assert_eq!(output["algorithm"], "sha1");
    assert_eq!(
        output["shasign"],
        "f4cc376cd7a834d997b91598fa747825a238be0a"
    );
}

#[tokio::test]
async fn test_verify_checks_sha_out() {
    let (_dir, config) = common::load_test_config();
    let query = "orderID=ord_42&currency=EUR&amount=42&PAYID=3014&NCERROR=0\
        &BRAND=VISA&ACCEPTANCE=test123&STATUS=9&SHASIGN=FB8BF903A9927DC7764A80C7E012236C7F26A4B1";

    let output = app::run(
        Command::Verify {
            query: query.to_string(),
        },
        &config,
    )
    .await
    .unwrap();
    assert_eq!(output["verified"], true);
    assert_eq!(output["status"], 9);
    assert_eq!(output["order_id"], "ord_42");

    let output = app::run(
        Command::Verify {
            query: query.replace("STATUS=9", "STATUS=5"),
        },
        &config,
    )
    .await
    .unwrap();
    assert_eq!(output["verified"], false);
}

#[tokio::test]
async fn test_endpoint_follows_environment_switch() {
    let (_dir, mut config) = common::load_test_config();

    let output = app::run(
        Command::Endpoint {
            endpoint: GatewayEndpoint::DirectQuery,
        },
        &config,
    )
    .await
    .unwrap();
    assert_eq!(
        output["url"],
        "https://secure.ogone.com/ncol/test/querydirect.asp"
    );

    config.connectors.ogone.debug = false;
    config.connectors.ogone.utf8 = true;
    let output = app::run(
        Command::Endpoint {
            endpoint: GatewayEndpoint::StandardOrder,
        },
        &config,
    )
    .await
    .unwrap();
    assert_eq!(
        output["url"],
        "https://secure.ogone.com/ncol/prod/orderstandard_utf8.asp"
    );
}

#[tokio::test]
async fn test_check_instruction_reports_missing_lang() {
    let (_dir, config) = common::load_test_config();
    let transaction = app::TransactionArgs {
        amount: 4200,
        currency: "EUR".to_string(),
        order_id: None,
        extended_data: Vec::new(),
    };

    let output = app::run(
        Command::CheckInstruction {
            transaction: transaction.clone(),
            payment_system: "ogone_gateway".to_string(),
        },
        &config,
    )
    .await
    .unwrap();
    assert_eq!(output["valid"], false);
    assert_eq!(output["field_errors"][0]["field"], "data.lang");
    assert_eq!(output["field_errors"][0]["message"], "form.error.required");

    let error = app::run(
        Command::CheckInstruction {
            transaction,
            payment_system: "paypal".to_string(),
        },
        &config,
    )
    .await
    .unwrap_err();
    assert!(matches!(
        error.current_context(),
        ogone_cli::error::CliError::InvalidArgument(_)
    ));
}
