//! Integration tests for the workflow over HTTP

use super::*;
use chrono::NaiveDate;
use integrations_sendpost::{
    Credentials, FailureKind, Step, StepStatus, WorkflowOrchestrator, WorkflowSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount(server: &MockServer, verb: &str, endpoint: &str, template: ResponseTemplate) {
    Mock::given(method(verb))
        .and(path(api_path(endpoint)))
        .respond_with(template)
        .mount(server)
        .await;
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn settings() -> WorkflowSettings {
    WorkflowSettings {
        from_email: "news@acme.test".to_string(),
        to_email: "customer@acme.test".to_string(),
        domain: "acme.test".to_string(),
        webhook_url: "https://hooks.acme.test/sendpost".to_string(),
    }
}

#[tokio::test]
async fn test_workflow_continues_past_failures() {
    let (server, client) = setup().await;

    mount(&server, "GET", "/account/subaccount/", ok(json!([{"id": 7, "apiKey": "k7"}]))).await;
    mount(
        &server,
        "POST",
        "/account/subaccount/",
        ResponseTemplate::new(403).set_body_json(json!({"message": "Sub-account limit reached"})),
    )
    .await;
    mount(
        &server,
        "POST",
        "/account/webhook",
        ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid webhook URL"})),
    )
    .await;
    mount(&server, "GET", "/account/webhook", ok(json!([]))).await;
    mount(&server, "POST", "/subaccount/domain", ok(json!({"id": 3, "name": "acme.test"}))).await;
    mount(&server, "GET", "/subaccount/domain", ok(json!([{"id": 3}]))).await;
    mount(&server, "GET", "/account/ip/", ok(json!([]))).await;
    mount(&server, "GET", "/account/ippool", ok(json!([]))).await;
    mount(
        &server,
        "POST",
        "/subaccount/email/",
        ok(json!([{"messageId": "sent-1", "to": "customer@acme.test"}])),
    )
    .await;
    mount(&server, "GET", "/account/subaccount/stat/7", ok(json!([]))).await;
    mount(
        &server,
        "GET",
        "/account/subaccount/stat/7/aggregate",
        ResponseTemplate::new(503).set_body_string("upstream unavailable"),
    )
    .await;
    mount(&server, "GET", "/account/stat", ok(json!([]))).await;
    mount(&server, "GET", "/account/message/sent-1", ok(json!({"messageID": "sent-1"}))).await;

    let orchestrator = WorkflowOrchestrator::new(
        client,
        Credentials::new("test-account-key", "test-sub-account-key").unwrap(),
        settings(),
    )
    .unwrap()
    .with_today(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

    let report = orchestrator.run().await;

    let statuses: Vec<(Step, StepStatus)> = report
        .results
        .iter()
        .map(|result| (result.step, result.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (Step::ListSubAccounts, StepStatus::Success),
            (Step::CreateSubAccount, StepStatus::Failure),
            (Step::CreateWebhook, StepStatus::Failure),
            (Step::ListWebhooks, StepStatus::Success),
            (Step::AddDomain, StepStatus::Success),
            (Step::ListDomains, StepStatus::Success),
            (Step::ListIps, StepStatus::Success),
            (Step::CreateIpPool, StepStatus::Skipped),
            (Step::ListIpPools, StepStatus::Success),
            (Step::SendTransactionalEmail, StepStatus::Success),
            (Step::SendMarketingEmail, StepStatus::Success),
            (Step::SubAccountStats, StepStatus::Success),
            (Step::AggregateStats, StepStatus::Failure),
            (Step::AccountStats, StepStatus::Success),
            (Step::MessageDetails, StepStatus::Success),
        ]
    );

    let create = report.result(Step::CreateSubAccount).unwrap().failure.clone().unwrap();
    assert_eq!(create.kind, FailureKind::Authentication);
    assert_eq!(create.message, "Sub-account limit reached");

    let webhook = report.result(Step::CreateWebhook).unwrap().failure.clone().unwrap();
    assert_eq!(webhook.kind, FailureKind::RemoteValidation);
    assert_eq!(webhook.status_code, Some(422));

    let aggregate = report.result(Step::AggregateStats).unwrap().failure.clone().unwrap();
    assert_eq!(aggregate.kind, FailureKind::Server);
    assert_eq!(aggregate.status_code, Some(503));
    assert_eq!(aggregate.message, "upstream unavailable");

    assert_eq!(report.state.sub_account_id, Some(7));
    assert_eq!(report.state.domain_id.as_deref(), Some("3"));
    assert_eq!(report.state.sent_message_id.as_deref(), Some("sent-1"));
    assert_eq!(report.state.ip_pool_id, None);
}

#[tokio::test]
async fn test_workflow_request_details() {
    let (server, client) = setup().await;

    mount(&server, "GET", "/account/subaccount/", ok(json!([]))).await;
    mount(&server, "POST", "/account/subaccount/", ok(json!({"id": 12, "apiKey": "fresh"}))).await;
    Mock::given(method("POST"))
        .and(path(api_path("/account/webhook")))
        .and(header("X-Account-ApiKey", "test-account-key"))
        .and(body_partial_json(json!({
            "url": "https://hooks.acme.test/sendpost",
            "enabled": true,
            "softBounced": true,
            "spam": true
        })))
        .respond_with(ok(json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "GET", "/account/webhook", ok(json!([{"id": 99}]))).await;
    Mock::given(method("POST"))
        .and(path(api_path("/subaccount/domain")))
        .and(header("X-SubAccount-ApiKey", "test-sub-account-key"))
        .and(body_partial_json(json!({"name": "acme.test"})))
        .respond_with(ok(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "GET", "/subaccount/domain", ok(json!([]))).await;
    Mock::given(method("GET"))
        .and(path(api_path("/account/ip/")))
        .respond_with(ok(json!([{"id": 1, "publicIP": "192.0.2.10"}])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/account/ippool")))
        .and(body_partial_json(json!({
            "routingStrategy": 0,
            "ips": [{"publicIP": "192.0.2.10"}],
            "warmupInterval": 24,
            "overflowStrategy": 0
        })))
        .respond_with(ok(json!({"id": 8, "name": "Marketing Pool 1717000000"})))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "GET", "/account/ippool", ok(json!([{"id": 8}]))).await;
    Mock::given(method("POST"))
        .and(path(api_path("/subaccount/email/")))
        .and(body_partial_json(json!({"ippool": "Marketing Pool 1717000000"})))
        .respond_with(ok(json!([{"messageId": "m-9"}])))
        .expect(2)
        .mount(&server)
        .await;
    for endpoint in ["/account/subaccount/stat/12", "/account/stat"] {
        Mock::given(method("GET"))
            .and(path(api_path(endpoint)))
            .and(query_param("from", "2024-06-03"))
            .and(query_param("to", "2024-06-10"))
            .respond_with(ok(json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(api_path("/account/subaccount/stat/12/aggregate")))
        .and(query_param("from", "2024-06-03"))
        .and(query_param("to", "2024-06-10"))
        .respond_with(ok(json!({"processed": 0})))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "GET", "/account/message/m-9", ok(json!({"messageID": "m-9"}))).await;

    let orchestrator = WorkflowOrchestrator::new(
        client,
        Credentials::new("test-account-key", "test-sub-account-key").unwrap(),
        settings(),
    )
    .unwrap()
    .with_today(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

    let report = orchestrator.run().await;

    assert!(report.is_clean(), "{:#?}", report.results);
    assert_eq!(report.state.sub_account_id, Some(12));
    assert_eq!(report.state.sub_account_key.as_deref(), Some("fresh"));
    assert_eq!(report.state.webhook_id, Some(99));
    assert_eq!(report.state.ip_pool_id, Some(8));
}
