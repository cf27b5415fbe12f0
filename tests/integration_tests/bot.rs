use crate::common::{test_context::TestContext, ALLOWED_GROUP_ID, BOUND_OPEN_ID, VALID_TICKET};
use merchant_bot::{
    bot::{IncomingMessage, Reply},
    gate::GROUP_NOT_ENABLED_NOTICE,
};

const USER_ID: i64 = 10001;
const SUPERUSER_ID: i64 = 1;

async fn reply_text(ctx: &TestContext, message: IncomingMessage) -> String {
    ctx.bot.handle(&message).await.expect("No reply").text
}

#[tokio::test]
async fn balance_in_private_and_allowed_group() {
    let ctx = TestContext::start().await;

    let private = reply_text(&ctx, IncomingMessage::private(USER_ID, "/balance")).await;
    assert_eq!(private, "💰 Current balance: ¥50.00");

    let group = reply_text(
        &ctx,
        IncomingMessage::group(ALLOWED_GROUP_ID, USER_ID, "/check-balance"),
    )
    .await;
    assert_eq!(group, "💰 Current balance: ¥50.00");
}

#[tokio::test]
async fn other_groups_are_turned_away() {
    let ctx = TestContext::start().await;

    let reply = ctx
        .bot
        .handle(&IncomingMessage::group(999, USER_ID, "/stats").with_message_id(7))
        .await;

    assert_eq!(reply, Some(Reply::quoting(7, GROUP_NOT_ENABLED_NOTICE)));
    assert!(ctx.mock_server.received_requests().await.is_empty());
}

#[tokio::test]
async fn group_stats_are_bucketized() {
    let ctx = TestContext::start().await;

    let text = reply_text(
        &ctx,
        IncomingMessage::group(ALLOWED_GROUP_ID, USER_ID, "/pay-stats"),
    )
    .await;

    assert!(text.contains("[Today]\nAmount: ¥100 - 500\nOrders: 3"), "{}", text);
    assert!(text.contains("[Total]\nAmount: ¥50K - 100K\nOrders: 700"), "{}", text);
}

#[tokio::test]
async fn binding_lifecycle() {
    let ctx = TestContext::start().await;
    let new_user = 20002;

    let text = reply_text(&ctx, IncomingMessage::private(new_user, "/me")).await;
    assert_eq!(text, "❌ Query failed: user not bound");

    let text = reply_text(&ctx, IncomingMessage::private(new_user, "/bind nope")).await;
    assert_eq!(text, "❌ Bind failed: invalid ticket");

    let text = reply_text(
        &ctx,
        IncomingMessage::private(new_user, format!("/bind {}", VALID_TICKET)),
    )
    .await;
    assert_eq!(text, "✅ Bound successfully!");

    let text = reply_text(&ctx, IncomingMessage::private(new_user, "/me")).await;
    assert!(text.contains("Username: merchant"), "{}", text);

    let text = reply_text(&ctx, IncomingMessage::private(new_user, "/unbind")).await;
    assert_eq!(text, "✅ Unbound successfully!");
    assert!(!ctx.mock_server.is_bound("20002"));
    assert!(ctx.mock_server.is_bound(BOUND_OPEN_ID));
}

#[tokio::test]
async fn superuser_reconfigures_groups() {
    let ctx = TestContext::start().await;
    let new_group = 555;

    let rejected = ctx
        .bot
        .handle(&IncomingMessage::group(new_group, USER_ID, "/plan"))
        .await
        .unwrap();
    assert_eq!(rejected.text, GROUP_NOT_ENABLED_NOTICE);

    let text = reply_text(
        &ctx,
        IncomingMessage::private(SUPERUSER_ID, format!("/set-merchant-groups {}", new_group))
            .as_superuser(),
    )
    .await;
    assert!(text.contains("Groups: 1"), "{}", text);

    let text = reply_text(&ctx, IncomingMessage::group(new_group, USER_ID, "/plan")).await;
    assert!(text.contains("Name: Standard"), "{}", text);
    assert!(text.contains("Monthly limit: unlimited"), "{}", text);

    let text = reply_text(
        &ctx,
        IncomingMessage::group(ALLOWED_GROUP_ID, USER_ID, "/plan").with_message_id(3),
    )
    .await;
    assert_eq!(text, GROUP_NOT_ENABLED_NOTICE);
}

#[tokio::test]
async fn admin_commands_never_leak_the_secret() {
    let ctx = TestContext::start().await;

    let text = reply_text(
        &ctx,
        IncomingMessage::private(SUPERUSER_ID, "/merchant-config").as_superuser(),
    )
    .await;

    assert!(text.contains(&ctx.mock_server.url()), "{}", text);
    assert!(!text.contains(&ctx.secret), "{}", text);
}
