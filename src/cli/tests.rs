//! Tests for the CLI module

use super::*;
use crate::config::AppConfig;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.session.wait_on_exit = false;
    config.session.max_attempts = 3;
    config
}

async fn mount_stores_and_devices(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/stores"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "s1", "name": "Магазин"}]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "d1", "name": "POS-1", "store_id": "s1"}]
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_parse_devices() {
    let cli = Cli::try_parse_from(["evotor-export", "devices"]).unwrap();
    assert_eq!(cli.command, Commands::Devices);
    assert!(!cli.no_wait);
}

#[test]
fn test_parse_goods_with_flags() {
    let cli = Cli::try_parse_from([
        "evotor-export",
        "goods",
        "--store-id",
        "s1",
        "--output",
        "out.json",
        "--no-wait",
        "--max-attempts",
        "2",
    ])
    .unwrap();

    assert_eq!(
        cli.command,
        Commands::Goods {
            store_id: Some("s1".into()),
            output: Some(PathBuf::from("out.json")),
        }
    );

    let mut config = AppConfig::default();
    cli.apply_overrides(&mut config);
    assert_eq!(config.session.goods_output, PathBuf::from("out.json"));
    assert_eq!(config.session.max_attempts, 2);
    assert!(!config.session.wait_on_exit);
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["evotor-export"]).is_err());
}

#[test]
fn test_base_url_override_is_validated() {
    let cli = Cli::try_parse_from(["evotor-export", "--base-url", "nonsense", "devices"]).unwrap();
    assert!(cli.load_config().is_err());
}

#[test]
fn test_outcome_exit_codes() {
    assert_eq!(Outcome::Completed.exit_code(), 0);
    assert_eq!(Outcome::Interrupted.exit_code(), 0);
    assert_eq!(Outcome::Declined.exit_code(), 1);
}

#[test]
fn test_runner_from_cli() {
    let cli = Cli::try_parse_from(["evotor-export", "goods", "--token", "abc"]).unwrap();
    let config = cli.load_config().unwrap();
    let runner = Runner::from_cli(&cli, config, ScriptedConsole::default());
    let debug = format!("{runner:?}");
    assert!(debug.contains("has_token: true"));
    assert!(debug.contains("Goods"));
}

// ============================================================================
// ScriptedConsole Tests
// ============================================================================

#[tokio::test]
async fn test_scripted_console_confirm() {
    let mut console = ScriptedConsole::new(["Y", "n", "yes"]);
    assert!(console.confirm("Retry? ").await.unwrap());
    assert!(!console.confirm("Retry? ").await.unwrap());
    assert!(!console.confirm("Retry? ").await.unwrap());
    assert!(matches!(
        console.confirm("Retry? ").await,
        Err(crate::Error::Interrupted)
    ));
    assert_eq!(console.prompts().len(), 4);
}

// ============================================================================
// Stores and Devices Flow
// ============================================================================

#[tokio::test]
async fn test_stores_and_devices_prints_result() {
    let mock_server = MockServer::start().await;
    mount_stores_and_devices(&mock_server).await;

    let console = ScriptedConsole::new(["tok"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    let outcome = runner.run().await.unwrap();
    assert_eq!(outcome, Outcome::Completed);

    let output = runner.console().output();
    assert!(output.contains("GetStoresAndDevices v1.0.0"));
    assert!(output.contains("Input token, please: tok"));
    assert!(output.contains("Result:"));
    assert!(output.contains("\"name\": \"Магазин\""));
    assert!(output.contains("        \"devices\": ["));
}

#[tokio::test]
async fn test_token_flag_skips_prompt() {
    let mock_server = MockServer::start().await;
    mount_stores_and_devices(&mock_server).await;

    let console = ScriptedConsole::new(Vec::<String>::new());
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console)
        .with_token(Some("tok".into()));

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);
    assert!(runner.console().prompts().is_empty());
}

#[tokio::test]
async fn test_retry_after_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_stores_and_devices(&mock_server).await;

    let console = ScriptedConsole::new(["tok", "y", "tok"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);

    let prompts = runner.console().prompts();
    assert_eq!(
        prompts,
        &[
            "Input token, please: ".to_string(),
            "An error occurred. Retry? (y/n): ".to_string(),
            "Input token, please: ".to_string(),
        ]
    );
    // The banner is printed again on the second pass
    assert_eq!(
        runner.console().output().matches("GetStoresAndDevices v").count(),
        2
    );
}

#[tokio::test]
async fn test_declining_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let console = ScriptedConsole::new(["tok", "n"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Declined);
    assert_eq!(runner.console().remaining(), 0);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let console = ScriptedConsole::new(["tok", "y", "tok", "y", "tok", "y", "tok"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Declined);

    let retries = runner
        .console()
        .prompts()
        .iter()
        .filter(|p| p.starts_with("An error occurred"))
        .count();
    assert_eq!(retries, 2);
}

#[tokio::test]
async fn test_empty_token_offers_retry() {
    let mock_server = MockServer::start().await;
    mount_stores_and_devices(&mock_server).await;

    let console = ScriptedConsole::new(["   ", "y", "tok"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);
}

#[tokio::test]
async fn test_blank_configured_token_prompts_on_retry() {
    let mock_server = MockServer::start().await;
    mount_stores_and_devices(&mock_server).await;

    let console = ScriptedConsole::new(["y", "tok"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console)
        .with_token(Some("  ".into()));

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);
    assert_eq!(
        runner.console().prompts(),
        &[
            "An error occurred. Retry? (y/n): ".to_string(),
            "Input token, please: ".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_no_content_offers_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_stores_and_devices(&mock_server).await;

    let console = ScriptedConsole::new(["tok", "y", "tok"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);
    assert!(runner
        .console()
        .prompts()
        .contains(&"An error occurred. Retry? (y/n): ".to_string()));
}

#[tokio::test]
async fn test_closed_input_is_interrupt() {
    let mock_server = MockServer::start().await;

    let console = ScriptedConsole::new(Vec::<String>::new());
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Interrupted);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_payload_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&mock_server)
        .await;

    let console = ScriptedConsole::new(["tok", "y"]);
    let mut runner = Runner::new(config_for(&mock_server), Flow::StoresAndDevices, console);

    let err = runner.run().await.unwrap_err();
    assert!(matches!(err, crate::Error::MissingField { .. }));
    // No retry prompt for structural errors
    assert_eq!(runner.console().remaining(), 1);
}

#[tokio::test]
async fn test_wait_on_exit_prompts_for_enter() {
    let mock_server = MockServer::start().await;
    mount_stores_and_devices(&mock_server).await;

    let mut config = config_for(&mock_server);
    config.session.wait_on_exit = true;

    let console = ScriptedConsole::new(["tok", ""]);
    let mut runner = Runner::new(config, Flow::StoresAndDevices, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);
    assert_eq!(
        runner.console().prompts().last().map(String::as_str),
        Some("\nPress Enter to exit...")
    );
}

// ============================================================================
// Goods Flow
// ============================================================================

#[tokio::test]
async fn test_goods_prompts_for_store_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stores/s42/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "g1", "name": "Молоко"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("goods.json");
    let flow = Flow::Goods {
        store_id: None,
        output: output.clone(),
    };

    let console = ScriptedConsole::new(["tok", "s42"]);
    let mut runner = Runner::new(config_for(&mock_server), flow, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Completed);
    assert_eq!(
        runner.console().prompts(),
        &[
            "Input token, please: ".to_string(),
            "Input store_id, please: ".to_string(),
        ]
    );
    assert!(runner.console().output().contains("GetAllGoods v1.0.0"));
    assert!(runner.console().output().contains("Saved to"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved, json!([{"id": "g1", "name": "Молоко"}]));
}

#[tokio::test]
async fn test_goods_empty_store_id_offers_retry() {
    let mock_server = MockServer::start().await;

    let dir = tempdir().unwrap();
    let flow = Flow::Goods {
        store_id: None,
        output: dir.path().join("goods.json"),
    };

    let console = ScriptedConsole::new(["tok", "", "n"]);
    let mut runner = Runner::new(config_for(&mock_server), flow, console);

    assert_eq!(runner.run().await.unwrap(), Outcome::Declined);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
