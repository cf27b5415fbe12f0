use crate::{
    apis::users::{BindUserRequest, UNLIMITED},
    bot::{
        format::{
            format_amount, format_avg_amount, format_group_ids, format_limit, format_rate,
            format_time, mask_account_name, mask_amount, mask_secret, mask_user_id,
            mask_username, parse_group_ids,
        },
        Command, IncomingMessage, Reply,
    },
    client::MerchantClient,
    config::MerchantConfig,
    Error,
};
use chrono::Utc;
use reqwest::Url;
use std::fmt::Write;

const PERMISSION_DENIED: &str = "❌ Permission denied, superusers only";
const SET_SYSTEM_USAGE: &str = "Usage: /set-merchant-system <api_url> <secret>";
const SET_GROUPS_USAGE: &str =
    "Usage: /set-merchant-groups <group1,group2,...>\nExample: /set-merchant-groups 123456,789012";

const USER_HELP: &str = "🤖 Merchant bot guide

📝 Account
/bind <ticket> - bind your merchant account
/unbind - unbind your merchant account
/me - show your profile
/balance - show your balance

📦 Plan
/plan - show your plan details

📊 Statistics
/today - today's figures
/stats - full statistics
/channels - channel accounts";

const ADMIN_HELP: &str = "

⚙️ Superuser commands
/set-merchant-system <api_url> <secret> - configure the merchant API
/set-merchant-groups <group1,group2,...> - set the allowed groups
/merchant-config - show the current configuration";

const HELP_TIP: &str =
    "\n\n💡 Tip: talk to the bot privately; enabled groups can use it too";

pub(crate) async fn dispatch(
    client: &MerchantClient,
    message: &IncomingMessage,
    command: Command,
) -> Option<Reply> {
    if command.is_admin() && !message.is_private() {
        return None;
    }

    let text = match command {
        Command::SetSystem(args) => set_system(client, message, &args).await,
        Command::SetGroups(args) => set_groups(client, message, &args).await,
        Command::ViewConfig => view_config(client, message).await,
        Command::Bind(ticket) => bind(client, message, ticket).await,
        Command::Unbind => unbind(client, message).await,
        Command::Profile => profile(client, message).await,
        Command::Balance => balance(client, message).await,
        Command::Plan => plan(client, message).await,
        Command::TodayStats => today_stats(client, message).await,
        Command::Stats => stats(client, message).await,
        Command::Channels => channels(client, message).await,
        Command::Help => help(message),
    };

    Some(Reply::text(text))
}

fn query_failed(e: Error) -> String {
    tracing::warn!("Merchant query failed: {}", e);
    format!("❌ Query failed: {}", e)
}

async fn set_system(client: &MerchantClient, message: &IncomingMessage, args: &[String]) -> String {
    if !message.is_superuser {
        return PERMISSION_DENIED.to_string();
    }

    let (base_url, secret) = match args {
        [base_url, secret, ..] => (base_url, secret),
        _ => return format!("❌ Missing arguments\n{}", SET_SYSTEM_USAGE),
    };

    if let Err(e) = Url::parse(base_url) {
        return format!("❌ Invalid API URL {}: {}\n{}", base_url, e, SET_SYSTEM_USAGE);
    }

    let config = MerchantConfig::new(base_url.as_str(), secret.as_str());
    if let Err(e) = client.config().save_config(&config).await {
        return format!("❌ Failed to save: {}", e);
    }

    format!(
        "✅ Merchant system configured\n\nAPI URL: {}\nSecret: {}",
        base_url,
        mask_secret(secret)
    )
}

async fn set_groups(client: &MerchantClient, message: &IncomingMessage, args: &str) -> String {
    if !message.is_superuser {
        return PERMISSION_DENIED.to_string();
    }

    let groups = match parse_group_ids(args) {
        Ok(groups) => groups,
        Err(e) => return format!("❌ Failed to parse: {}\n{}", e, SET_GROUPS_USAGE),
    };
    if groups.is_empty() {
        return format!("❌ At least one group id is required\n{}", SET_GROUPS_USAGE);
    }

    let mut config = match client.config().get_config().await {
        Ok(config) => config,
        Err(e) => {
            return format!(
                "❌ Failed to load configuration: {}\nConfigure the API first with /set-merchant-system",
                e
            )
        }
    };

    config.allowed_groups = groups;
    if let Err(e) = client.config().save_config(&config).await {
        return format!("❌ Failed to save: {}", e);
    }

    format!(
        "✅ Allowed groups updated\n\nGroups: {}\nGroup ids: {}",
        config.allowed_groups.len(),
        format_group_ids(&config.allowed_groups)
    )
}

async fn view_config(client: &MerchantClient, message: &IncomingMessage) -> String {
    if !message.is_superuser {
        return PERMISSION_DENIED.to_string();
    }

    match client.config().get_config().await {
        Ok(config) => format!(
            "⚙️ Merchant configuration\n\nAPI URL: {}\nSecret: {}\nAllowed groups: {} ({})",
            config.base_url,
            mask_secret(config.secret.expose_secret()),
            format_group_ids(&config.allowed_groups),
            config.allowed_groups.len()
        ),
        Err(e) => format!("❌ Failed to load configuration: {}", e),
    }
}

async fn bind(client: &MerchantClient, message: &IncomingMessage, ticket: Option<String>) -> String {
    let ticket = match ticket {
        Some(ticket) => ticket,
        None => return "❌ Please provide a bind ticket\nUsage: /bind <ticket>".to_string(),
    };

    let request = BindUserRequest {
        ticket,
        open_id: message.open_id(),
    };
    match client.users.bind(&request).await {
        Ok(()) => "✅ Bound successfully!".to_string(),
        Err(e) => format!("❌ Bind failed: {}", e),
    }
}

async fn unbind(client: &MerchantClient, message: &IncomingMessage) -> String {
    match client.users.unbind(&message.open_id()).await {
        Ok(()) => "✅ Unbound successfully!".to_string(),
        Err(e) => format!("❌ Unbind failed: {}", e),
    }
}

async fn profile(client: &MerchantClient, message: &IncomingMessage) -> String {
    let info = match client.users.info(&message.open_id()).await {
        Ok(info) => info,
        Err(e) => return query_failed(e),
    };

    let status = if info.is_active() { "active" } else { "disabled" };
    let (uid, username) = if message.is_private() {
        (info.uid.to_string(), info.username.clone())
    } else {
        (mask_user_id(info.uid), mask_username(&info.username))
    };

    format!(
        "📋 Profile\n\nUser ID: {}\nUsername: {}\nBalance: ¥{}\nStatus: {}",
        uid,
        username,
        format_amount(info.balance),
        status
    )
}

async fn balance(client: &MerchantClient, message: &IncomingMessage) -> String {
    match client.users.balance(&message.open_id()).await {
        Ok(balance) => format!("💰 Current balance: ¥{}", format_amount(balance)),
        Err(e) => query_failed(e),
    }
}

async fn plan(client: &MerchantClient, message: &IncomingMessage) -> String {
    let meal = match client.users.meal_info(&message.open_id()).await {
        Ok(meal) => meal,
        Err(e) => return query_failed(e),
    };

    let (expire_time, expire_status) = if meal.expire_time == UNLIMITED {
        ("permanent".to_string(), "never expires")
    } else if meal.expire_time < Utc::now().timestamp() {
        (format_time(meal.expire_time), "expired")
    } else {
        (format_time(meal.expire_time), "active")
    };

    let channel_count = if i64::from(meal.channel_account_count) == UNLIMITED {
        "unlimited".to_string()
    } else {
        meal.channel_account_count.to_string()
    };

    format!(
        "📦 Plan\n\nName: {}\nExpires: {}\nStatus: {}\nChannel accounts: {}\nDaily limit: {}\nMonthly limit: {}\nRate: {}",
        meal.meal_name,
        expire_time,
        expire_status,
        channel_count,
        format_limit(meal.day_limit),
        format_limit(meal.month_limit),
        format_rate(meal.rate)
    )
}

/// Exact amounts in private chats, ranges in groups.
fn display_amount(message: &IncomingMessage, cents: i64) -> String {
    if message.is_private() {
        format!("¥{}", format_amount(cents))
    } else {
        format!("¥{}", mask_amount(cents))
    }
}

async fn today_stats(client: &MerchantClient, message: &IncomingMessage) -> String {
    let stat = match client.users.pay_stat(&message.open_id()).await {
        Ok(stat) => stat,
        Err(e) => return query_failed(e),
    };

    let average = if message.is_private() {
        format!("¥{}", format_avg_amount(stat.today_amount, stat.today_order_count))
    } else {
        let cents = if stat.today_order_count == 0 {
            0
        } else {
            stat.today_amount / stat.today_order_count
        };
        display_amount(message, cents)
    };

    format!(
        "📊 Today\n\n💰 Collected: {}\n📦 Orders: {}\n📈 Average order: {}",
        display_amount(message, stat.today_amount),
        stat.today_order_count,
        average
    )
}

async fn stats(client: &MerchantClient, message: &IncomingMessage) -> String {
    let stat = match client.users.pay_stat(&message.open_id()).await {
        Ok(stat) => stat,
        Err(e) => return query_failed(e),
    };

    let periods = [
        ("Today", stat.today_amount, stat.today_order_count),
        ("This week", stat.week_amount, stat.week_order_count),
        ("This month", stat.month_amount, stat.month_order_count),
        ("Total", stat.total_amount, stat.total_order_count),
    ];

    let mut text = String::from("📊 Payment statistics");
    for (label, amount, orders) in periods {
        let _ = write!(
            text,
            "\n\n[{}]\nAmount: {}\nOrders: {}",
            label,
            display_amount(message, amount),
            orders
        );
    }
    text
}

async fn channels(client: &MerchantClient, message: &IncomingMessage) -> String {
    let accounts = match client.channel_accounts.list(&message.open_id()).await {
        Ok(accounts) => accounts,
        Err(e) => return query_failed(e),
    };

    if accounts.is_empty() {
        return "📋 No channel accounts".to_string();
    }

    let mut text = format!("📋 Channel accounts ({})\n", accounts.len());
    for (i, account) in accounts.iter().enumerate() {
        let name = if message.is_private() {
            account.name.clone()
        } else {
            mask_account_name(&account.name)
        };
        let status = if account.is_enabled() { "enabled" } else { "disabled" };
        let online = if account.is_online() { "online" } else { "offline" };

        let _ = write!(
            text,
            "\n{}. {}\n   Pay type: {}\n   Status: {} | {}\n   Today: ¥{} / ¥{}",
            i + 1,
            name,
            account.pay_type_name,
            status,
            online,
            format_amount(account.day_amount),
            format_amount(account.day_amount_limit)
        );
        if i + 1 < accounts.len() {
            text.push('\n');
        }
    }
    text
}

fn help(message: &IncomingMessage) -> String {
    let mut text = USER_HELP.to_string();
    if message.is_superuser {
        text.push_str(ADMIN_HELP);
    }
    text.push_str(HELP_TIP);
    text
}
