/*
[INPUT]:  Mock scoring/accounts/cards/passwords responses
[OUTPUT]: Test results for the CRUD resource clients
[POS]:    Integration tests - non-session resources
[UPDATE]: When resource endpoints or defaults change
*/

mod common;

use std::sync::Arc;

use common::{float_for, names, record, setup_mock_server};
use float_sdk::{Args, Float, FloatConfig, ModuleConfig, ModuleOverlay, MockTransport};
use rstest::rstest;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn offline_float() -> Float {
    assert_ok!(Float::builder(FloatConfig::default())
        .transport(Arc::new(MockTransport::new()))
        .build())
}

fn module_config(float: &Float, namespace: &str) -> ModuleConfig {
    match namespace {
        "users" => float.users().config(),
        "passwords" => float.passwords().config(),
        "scoring" => float.scoring().config(),
        "accounts" => float.accounts().config(),
        "cards" => float.cards().config(),
        other => panic!("unknown module {other}"),
    }
}

#[rstest]
#[case("users", "api-auth.hellofloat.com", true)]
#[case("passwords", "api-auth.hellofloat.com", false)]
#[case("scoring", "api-scoring.hellofloat.com", true)]
#[case("accounts", "accounts.float.systems", true)]
#[case("cards", "api-cards.hellofloat.com", true)]
fn test_module_defaults(#[case] namespace: &str, #[case] host: &str, #[case] credentials: bool) {
    let float = offline_float();
    assert_eq!(
        module_config(&float, namespace),
        ModuleConfig::new(host, credentials)
    );
}

#[rstest]
#[case("users")]
#[case("passwords")]
#[case("scoring")]
#[case("accounts")]
#[case("cards")]
fn test_module_init_overlay(#[case] namespace: &str) {
    let float = offline_float();
    let overlay = ModuleOverlay::host("qa-api.hellofloat.com:4445");
    match namespace {
        "users" => {
            float.users().init(&overlay);
        }
        "passwords" => {
            float.passwords().init(&overlay);
        }
        "scoring" => {
            float.scoring().init(&overlay);
        }
        "accounts" => {
            float.accounts().init(&overlay);
        }
        _ => {
            float.cards().init(&overlay);
        }
    }
    assert_eq!(module_config(&float, namespace).host, "qa-api.hellofloat.com:4445");
}

#[test]
fn test_config_file_overlays_defaults() {
    let config = assert_ok!(FloatConfig::from_yaml_str(
        "cards:\n  host: qa-api.hellofloat.com:4445\npasswords:\n  with_credentials: true\n"
    ));
    let float = assert_ok!(Float::builder(config)
        .transport(Arc::new(MockTransport::new()))
        .build());

    assert_eq!(float.cards().config().host, "qa-api.hellofloat.com:4445");
    assert_eq!(float.passwords().config(), ModuleConfig::new("api-auth.hellofloat.com", true));
    assert_eq!(float.users().config().host, "api-auth.hellofloat.com");
}

#[tokio::test]
async fn test_scoring_operations() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/source/bankaccount"))
        .and(body_json(json!({"routing": "021000021", "account": "1234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "b1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "b1"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/score"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"score": 701})))
        .expect(1)
        .mount(&server)
        .await;

    let float = float_for(&server);
    let log = record(float.events());

    let bank = assert_ok!(
        float
            .call("addBankAccount", Args::new([json!({"routing": "021000021", "account": "1234"})]))
            .await
    );
    assert_eq!(bank, json!({"id": "b1"}));
    assert_eq!(
        assert_ok!(float.call("getBankAccount", Args::default()).await),
        json!([{"id": "b1"}])
    );
    assert_eq!(
        assert_ok!(float.scoring().get_score().await),
        json!({"score": 701})
    );
    assert_eq!(names(&log), vec!["scoring.bank_added"]);
}

#[tokio::test]
async fn test_accounts_operations_are_namespaced() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/account/bank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/account/bank/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let float = float_for(&server);
    let log = record(float.events());

    let account = assert_ok!(
        float
            .call("accounts.addBank", Args::new([json!({"account": "5678"})]))
            .await
    );
    assert_ok!(
        float
            .call("accounts.deleteBankAccount", Args::new([account]))
            .await
    );
    assert_eq!(names(&log), vec!["accounts.bank_added", "accounts.bank_deleted"]);
}

#[tokio::test]
async fn test_cards_operations() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/card"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"last4": "4242"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"last4": "4242"})))
        .expect(1)
        .mount(&server)
        .await;

    let float = float_for(&server);
    let log = record(float.cards().events());

    assert_ok!(float.call("createCard", Args::default()).await);
    let card = assert_ok!(float.call("getCard", Args::default()).await);
    assert_eq!(card["last4"], "4242");
    assert_eq!(names(&log), vec!["card_created"]);
}

#[tokio::test]
async fn test_credential_flag_reaches_transport() {
    let transport = Arc::new(MockTransport::new());
    transport.reply_json(json!({"ok": true})).reply_json(json!({"ok": true}));
    let float = assert_ok!(Float::builder(FloatConfig::default())
        .transport(transport.clone())
        .build());

    assert_ok!(float.call("requestPasswordReset", Args::new([json!({"phone": "+1234567890"})])).await);
    assert_ok!(float.call("getCard", Args::default()).await);

    let requests = transport.requests();
    assert!(!requests[0].with_credentials);
    assert!(requests[1].with_credentials);
}
