//! Integration tests for the HTTP client

use super::*;
use chrono::NaiveDate;
use integrations_sendpost::types::{
    CreateDomainRequest, EmailAddress, EmailMessage, Recipient, StatsWindow,
};
use integrations_sendpost::{SendPostApi, SendPostError};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_sub_accounts_with_account_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/subaccount/")))
        .and(header("X-Account-ApiKey", "test-account-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Primary", "apiKey": "k-1", "type": 1, "blocked": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client.list_sub_accounts(&account_key()).await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name.as_deref(), Some("Primary"));
    assert_eq!(
        accounts[0].kind(),
        Some(integrations_sendpost::types::SubAccountKind::Plus)
    );
}

#[tokio::test]
async fn test_create_domain_with_sub_account_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("/subaccount/domain")))
        .and(header("X-SubAccount-ApiKey", "test-sub-account-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "mail.example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "name": "mail.example.com",
            "dkim": {"type": "TXT", "host": "sp._domainkey", "textValue": "k=rsa; p=MIGf"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let domain = client
        .create_domain(&sub_account_key(), &CreateDomainRequest::new("mail.example.com"))
        .await
        .unwrap();

    assert_eq!(domain.id, Some(9));
    let dkim = domain.dkim.unwrap();
    assert_eq!(dkim.record_type.as_deref(), Some("TXT"));
    assert_eq!(dkim.text_value.as_deref(), Some("k=rsa; p=MIGf"));
}

#[tokio::test]
async fn test_stats_window_in_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/subaccount/stat/42")))
        .and(query_param("from", "2024-02-26"))
        .and(query_param("to", "2024-03-04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2024-03-01", "stat": {"processed": 5, "delivered": 4}},
            {"date": "2024-03-02", "stat": {"processed": 3, "delivered": 3, "hardBounced": 0}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let window = StatsWindow::trailing(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 7);
    let stats = client
        .sub_account_stats(&account_key(), 42, window)
        .await
        .unwrap();

    let totals = integrations_sendpost::types::StatTotals::from_daily(&stats);
    assert_eq!(totals.processed, 8);
    assert_eq!(totals.delivered, 7);
}

#[tokio::test]
async fn test_account_stats_accept_spams_field() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/stat")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2024-03-01", "stat": {"processed": 1, "spams": 2}}
        ])))
        .mount(&server)
        .await;

    let window = StatsWindow::trailing(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 7);
    let stats = client.account_stats(&account_key(), window).await.unwrap();

    assert_eq!(stats[0].stat.as_ref().and_then(|s| s.spam), Some(2));
}

#[tokio::test]
async fn test_send_email_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("/subaccount/email/")))
        .and(header("X-SubAccount-ApiKey", "test-sub-account-key"))
        .and(body_partial_json(json!({
            "from": {"email": "sender@example.com", "name": "Your Company"},
            "to": [{"email": "to@example.com", "customFields": {"customer_id": "67890"}}],
            "trackOpens": true,
            "trackClicks": true,
            "ippool": "Pool A"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"messageId": "abc-123", "to": "to@example.com", "submittedAt": 1717000000}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let message = EmailMessage::builder(EmailAddress::named("sender@example.com", "Your Company"), "Hello")
        .to(Recipient::named("to@example.com", "Customer").custom_field("customer_id", "67890"))
        .text_body("Hello there")
        .track_all()
        .ip_pool(Some("Pool A".to_string()))
        .build();

    let responses = client.send_email(&sub_account_key(), &message).await.unwrap();

    assert_eq!(responses[0].message_id.as_deref(), Some("abc-123"));
    assert_eq!(responses[0].submitted_at, Some(1_717_000_000));
}

#[tokio::test]
async fn test_get_message_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/message/abc-123")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messageID": "abc-123",
            "subAccountID": 42,
            "publicIP": "1.2.3.4",
            "to": {"email": "to@example.com", "name": "Customer"},
            "attempt": 1
        })))
        .mount(&server)
        .await;

    let message = client.get_message(&account_key(), "abc-123").await.unwrap();

    assert_eq!(message.message_id.as_deref(), Some("abc-123"));
    assert_eq!(message.sub_account_id, Some(42));
    assert_eq!(message.to.and_then(|to| to.name).as_deref(), Some("Customer"));
}

#[test_case(400, "missing name" ; "bad request")]
#[test_case(401, "invalid api key" ; "unauthorized")]
#[test_case(403, "not allowed" ; "forbidden")]
#[test_case(404, "no such domain" ; "not found")]
#[test_case(409, "already exists" ; "conflict")]
#[test_case(422, "invalid url" ; "unprocessable")]
#[test_case(500, "internal error" ; "server error")]
#[tokio::test]
async fn test_error_status_mapping(status: u16, message: &str) {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/webhook")))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"message": message})))
        .mount(&server)
        .await;

    let error = client.list_webhooks(&account_key()).await.unwrap_err();

    assert_eq!(error.status_code(), Some(status));
    assert_eq!(error.message(), message);
    let expected_variant = match status {
        400 => matches!(error, SendPostError::BadRequest { .. }),
        401 => matches!(error, SendPostError::Authentication { .. }),
        403 => matches!(error, SendPostError::Permission { .. }),
        404 => matches!(error, SendPostError::NotFound { .. }),
        409 => matches!(error, SendPostError::Conflict { .. }),
        422 => matches!(error, SendPostError::Validation { .. }),
        _ => matches!(error, SendPostError::Server { .. }),
    };
    assert!(expected_variant, "unexpected variant {:?}", error);
}

#[tokio::test]
async fn test_rate_limit_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/ip/")))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "7")
                .set_body_json(json!({"error": "Too many requests"})),
        )
        .mount(&server)
        .await;

    match client.list_ips(&account_key()).await {
        Err(SendPostError::RateLimit {
            message,
            retry_after,
        }) => {
            assert_eq!(message, "Too many requests");
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("Expected RateLimit error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/account/ippool")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    match client.list_ip_pools(&account_key()).await {
        Err(SendPostError::Deserialization { body, .. }) => {
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("Expected Deserialization error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("/subaccount/domain")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let error = client.list_domains(&sub_account_key()).await.unwrap_err();

    assert!(matches!(error, SendPostError::Timeout { .. }), "{:?}", error);
    assert!(error.is_transport());
    assert_eq!(error.status_code(), None);
}
