#![allow(dead_code)]

use hostadmin_core::{AdminClient, AdminSession, RefundWorkflow};
use hostadmin_primitives::models::RefundListInfo;
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok_test_123";
pub const ACCOUNT_NUMBER: &str = "0123456789";
pub const BANK_CODE: &str = "058";
pub const TRANSACTION_REF: &str = "TX-100";

pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "debug");
        hostadmin::utility::logging::setup_logging();
    });
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "message": "OK",
        "data": data
    }))
}

pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "status": "error",
        "message": message
    }))
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/admin/auth/login"))
        .respond_with(success(json!({
            "token": TOKEN,
            "admin": { "id": "adm_1", "email": "ops@hostadmin.io", "name": "Ops" }
        })))
        .mount(server)
        .await;
}

pub async fn login(server: &MockServer) -> AdminSession {
    init_tracing();
    mount_login(server).await;

    let client = AdminClient::new(reqwest::Client::new(), &server.uri()).unwrap();
    client
        .login("ops@hostadmin.io", &SecretString::from("hunter22"))
        .await
        .unwrap()
}

pub async fn workflow(server: &MockServer) -> RefundWorkflow {
    let session = login(server).await;
    RefundWorkflow::new(session, RefundListInfo::default())
}

/// Answers verification for `account_number` with `account_name`.
pub async fn mount_verified(server: &MockServer, account_number: &str, account_name: &str) {
    Mock::given(method("POST"))
        .and(path("/admin/wallet/verify-account"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_partial_json(json!({ "account_number": account_number })))
        .respond_with(success(json!({ "account_name": account_name })))
        .mount(server)
        .await;
}

pub fn refund_list_body(items: Value) -> ResponseTemplate {
    let total = items.as_array().map_or(0, Vec::len);
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "message": "Refunds retrieved",
        "data": items,
        "page_number": 1,
        "total_pages": 1,
        "total_items": total
    }))
}

/// Opens a draft for [`TRANSACTION_REF`] with a verified destination.
pub async fn verified_draft(server: &MockServer, amount: i64) -> RefundWorkflow {
    mount_verified(server, ACCOUNT_NUMBER, "Jane Doe").await;

    let mut workflow = workflow(server).await;
    workflow.open_initiate(TRANSACTION_REF);
    workflow.set_amount(amount).unwrap();
    workflow.set_bank_code(BANK_CODE).unwrap();
    workflow.set_account_number(ACCOUNT_NUMBER).unwrap();

    let verified = workflow.settle_verification().await;
    assert_eq!(verified, Some(Ok("Jane Doe".to_string())));
    workflow
}

/// Runs phase one to completion, leaving the workflow on the transfer step
/// for refund `R123`.
pub async fn transfer_step(server: &MockServer) -> RefundWorkflow {
    Mock::given(method("POST"))
        .and(path("/admin/transactions/refund"))
        .respond_with(success(json!({ "reference": "R123" })))
        .mount(server)
        .await;

    let mut workflow = verified_draft(server, 2500).await;
    let handle = workflow.submit_refund().await.unwrap();
    assert_eq!(handle.reference, "R123");
    workflow
}
