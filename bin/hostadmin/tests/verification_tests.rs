mod common;

use common::*;
use hostadmin_core::RefundError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_incomplete_destination_never_triggers_verification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .respond_with(success(json!({ "account_name": "Nobody" })))
        .expect(0)
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);

    // Ten digits but no bank yet
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    assert!(!workflow.is_verifying());

    // Bank present, account number too short, too long, not numeric
    workflow.set_bank_code(BANK_CODE).unwrap();
    for number in ["012345678", "01234567890", "01234x6789"] {
        workflow.set_account_number(number).unwrap();
        assert!(!workflow.is_verifying());
    }

    // Complete number, bank removed
    workflow.set_bank_code("").unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    assert!(!workflow.is_verifying());

    assert_eq!(workflow.settle_verification().await, None);
    assert_eq!(workflow.draft().unwrap().destination_account_name(), "");
}

#[tokio::test]
async fn test_successful_verification_populates_account_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .and(body_json(json!({
            "account_number": ACCOUNT_NUMBER,
            "bank_code": BANK_CODE
        })))
        .respond_with(success(json!({ "account_name": "Jane Doe" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    assert!(workflow.is_verifying());

    let verified = workflow.settle_verification().await;

    assert_eq!(verified, Some(Ok("Jane Doe".to_string())));
    assert_eq!(workflow.draft().unwrap().destination_account_name(), "Jane Doe");
    assert!(!workflow.is_verifying());
}

#[tokio::test]
async fn test_missing_account_name_becomes_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .respond_with(success(json!({})))
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();

    assert_eq!(workflow.settle_verification().await, Some(Ok(String::new())));
    assert_eq!(workflow.draft().unwrap().destination_account_name(), "");
}

#[tokio::test]
async fn test_failed_verification_clears_account_name() {
    let server = MockServer::start().await;
    mount_verified(&server, ACCOUNT_NUMBER, "Jane Doe").await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .and(body_partial_json(json!({ "account_number": "1111111111" })))
        .respond_with(failure(422, "Could not resolve account name"))
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    assert_eq!(
        workflow.settle_verification().await,
        Some(Ok("Jane Doe".to_string()))
    );

    workflow.set_account_number("1111111111").unwrap();
    let verified = workflow.settle_verification().await;

    assert_eq!(
        verified,
        Some(Err(RefundError::VerificationFailed {
            reason: "Could not resolve account name".to_string()
        }))
    );
    assert_eq!(workflow.draft().unwrap().destination_account_name(), "");
}

#[tokio::test]
async fn test_changing_bank_reverifies_with_new_bank_code() {
    let server = MockServer::start().await;
    for (bank_code, account_name) in [(BANK_CODE, "Jane Doe"), ("044", "Jane A. Doe")] {
        Mock::given(method("POST"))
            .and(path("/admin/wallet/verify-account"))
            .and(body_json(json!({
                "account_number": ACCOUNT_NUMBER,
                "bank_code": bank_code
            })))
            .respond_with(success(json!({ "account_name": account_name })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    assert_eq!(
        workflow.settle_verification().await,
        Some(Ok("Jane Doe".to_string()))
    );

    workflow.set_bank_code("044").unwrap();
    assert!(workflow.is_verifying());
    assert_eq!(workflow.draft().unwrap().destination_account_name(), "");

    assert_eq!(
        workflow.settle_verification().await,
        Some(Ok("Jane A. Doe".to_string()))
    );
    assert_eq!(
        workflow.draft().unwrap().destination_account_name(),
        "Jane A. Doe"
    );
}

#[tokio::test]
async fn test_later_request_wins_over_slow_earlier_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .and(body_partial_json(json!({ "account_number": "2222222222" })))
        .respond_with(
            success(json!({ "account_name": "Stale Name" })).set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_verified(&server, "3333333333", "Fresh Name").await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number("2222222222").unwrap();
    workflow.set_account_number("3333333333").unwrap();

    assert_eq!(
        workflow.settle_verification().await,
        Some(Ok("Fresh Name".to_string()))
    );

    // Give the slow response time to arrive; it must not be applied.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(workflow.settle_verification().await, None);
    assert_eq!(
        workflow.draft().unwrap().destination_account_name(),
        "Fresh Name"
    );
}

#[tokio::test]
async fn test_outcome_already_received_is_discarded_once_superseded() {
    let server = MockServer::start().await;
    mount_verified(&server, "2222222222", "Stale Name").await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .and(body_partial_json(json!({ "account_number": "3333333333" })))
        .respond_with(
            success(json!({ "account_name": "Fresh Name" })).set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number("2222222222").unwrap();

    // Let the first lookup finish and queue its outcome before superseding it
    tokio::time::sleep(Duration::from_millis(200)).await;
    workflow.set_account_number("3333333333").unwrap();

    assert_eq!(
        workflow.settle_verification().await,
        Some(Ok("Fresh Name".to_string()))
    );
    assert_eq!(
        workflow.draft().unwrap().destination_account_name(),
        "Fresh Name"
    );
}

#[tokio::test]
async fn test_unchanged_input_does_not_verify_twice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .respond_with(success(json!({ "account_name": "Jane Doe" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    workflow.set_bank_code(BANK_CODE).unwrap();

    assert_eq!(
        workflow.settle_verification().await,
        Some(Ok("Jane Doe".to_string()))
    );
}

#[tokio::test]
async fn test_closing_the_draft_abandons_verification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "data": { "account_name": "Late" } }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut workflow = workflow(&server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();
    assert!(workflow.is_verifying());

    workflow.close();

    assert!(!workflow.is_verifying());
    assert!(workflow.draft().is_none());
    assert_eq!(workflow.settle_verification().await, None);
}
