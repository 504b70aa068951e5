use anyhow::Result;
use hotel_dd::{
    ContactMessage, ContactService, HotelError, HttpMailChannel, RetryPolicy,
};
use httpmock::prelude::*;
use std::time::Duration;

/// 聯絡表單完整寄送流程集成測試
/// 測試場景：
/// 1. 郵件 API 正常接受
/// 2. 認證失敗立即放棄
/// 3. 伺服器錯誤重試直到用完額度
fn test_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(100),
    }
}

fn contact() -> ContactMessage {
    ContactMessage {
        name: "Ana Obiang".to_string(),
        email: "ana@example.com".to_string(),
        message: "Do you have apartments available in July?".to_string(),
    }
}

fn service_for(server: &MockServer) -> ContactService<HttpMailChannel> {
    let channel = HttpMailChannel::new(
        server.url("/v3/mail/send"),
        "SG.test-key",
        "noreply@hotel-dd.test",
    );
    ContactService::new(channel, test_policy(), "frontdesk@hotel-dd.test")
}

#[tokio::test]
async fn test_contact_message_delivered_on_first_attempt() -> Result<()> {
    let server = MockServer::start();
    let mail_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v3/mail/send")
            .header("authorization", "Bearer SG.test-key");
        then.status(202);
    });

    let result = service_for(&server).send(&contact()).await?;

    mail_mock.assert_hits(1);
    assert!(result.succeeded);
    assert_eq!(result.attempt_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() -> Result<()> {
    let server = MockServer::start();
    let mail_mock = server.mock(|when, then| {
        when.method(POST).path("/v3/mail/send");
        then.status(401).body(r#"{"errors":[{"message":"bad key"}]}"#);
    });

    let err = service_for(&server).send(&contact()).await.unwrap_err();

    // exactly one call despite a budget of 3
    mail_mock.assert_hits(1);
    assert!(matches!(err, HotelError::TerminalDeliveryFailure { .. }));
    Ok(())
}

#[tokio::test]
async fn test_server_errors_exhaust_retry_budget() -> Result<()> {
    let server = MockServer::start();
    let mail_mock = server.mock(|when, then| {
        when.method(POST).path("/v3/mail/send");
        then.status(503);
    });

    let err = service_for(&server).send(&contact()).await.unwrap_err();

    mail_mock.assert_hits(3);
    assert!(matches!(err, HotelError::RetriesExhausted { attempts: 3 }));
    Ok(())
}

#[tokio::test]
async fn test_payload_rejection_is_not_retried() -> Result<()> {
    let server = MockServer::start();
    let mail_mock = server.mock(|when, then| {
        when.method(POST).path("/v3/mail/send");
        then.status(400).body("from address not verified");
    });

    let err = service_for(&server).send(&contact()).await.unwrap_err();

    mail_mock.assert_hits(1);
    match err {
        HotelError::TerminalDeliveryFailure { detail } => {
            assert!(detail.contains("from address not verified"));
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
