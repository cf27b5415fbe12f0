use crate::common::{test_context::TestContext, BOUND_OPEN_ID, VALID_TICKET};
use merchant_bot::{
    apis::users::{BindUserRequest, UNLIMITED},
    config::MerchantConfig,
    Error,
};

#[tokio::test]
async fn signed_requests_are_accepted() {
    let ctx = TestContext::start().await;

    let balance = ctx.client.users.balance(BOUND_OPEN_ID).await.unwrap();
    assert_eq!(balance, 5000);

    let info = ctx.client.users.info(BOUND_OPEN_ID).await.unwrap();
    assert_eq!(info.uid, 987654);
    assert!(info.is_active());

    let meal = ctx.client.users.meal_info(BOUND_OPEN_ID).await.unwrap();
    assert_eq!(meal.expire_time, UNLIMITED);
    assert_eq!(meal.month_limit, UNLIMITED);

    let stat = ctx.client.users.pay_stat(BOUND_OPEN_ID).await.unwrap();
    assert_eq!(stat.total_order_count, 700);

    let accounts = ctx.client.channel_accounts.list(BOUND_OPEN_ID).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert!(accounts[0].is_online());
}

#[tokio::test]
async fn every_request_carries_the_signing_fields() {
    let ctx = TestContext::start().await;

    ctx.client.users.balance(BOUND_OPEN_ID).await.unwrap();

    let requests = ctx.mock_server.received_requests().await;
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    for field in ["connect_type=xbot", "open_id=10001", "timestamp=", "sign="] {
        assert!(body.contains(field), "{} missing from {}", field, body);
    }
}

#[tokio::test]
async fn upstream_rejections_surface_as_api_errors() {
    let ctx = TestContext::start().await;

    let err = ctx.client.users.balance("20002").await.unwrap_err();
    match err {
        Error::ApiError(e) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.to_string(), "user not bound");
        }
        e => panic!("Unexpected error: {}", e),
    }
}

#[tokio::test]
async fn bind_then_unbind() {
    let ctx = TestContext::start().await;

    ctx.client
        .users
        .bind(&BindUserRequest {
            ticket: VALID_TICKET.to_string(),
            open_id: "20002".to_string(),
        })
        .await
        .unwrap();
    assert!(ctx.mock_server.is_bound("20002"));

    ctx.client.users.unbind("20002").await.unwrap();
    assert!(!ctx.mock_server.is_bound("20002"));
}

#[tokio::test]
async fn configuration_changes_apply_to_the_next_request() {
    let ctx = TestContext::start().await;

    ctx.client
        .config()
        .save_config(&MerchantConfig::new(ctx.mock_server.url(), "wrong-secret"))
        .await
        .unwrap();

    let err = ctx.client.users.balance(BOUND_OPEN_ID).await.unwrap_err();
    assert_eq!(err.to_string(), "invalid signature");

    ctx.client
        .config()
        .save_config(&MerchantConfig::new(ctx.mock_server.url(), ctx.secret.as_str()))
        .await
        .unwrap();

    assert_eq!(ctx.client.users.balance(BOUND_OPEN_ID).await.unwrap(), 5000);
}
