//! Console host for the merchant plugin.
//!
//! Reads one chat message per line from stdin and prints the replies:
//!
//! ```text
//! 10001: /balance           private message from user 10001
//! 10001@123456: /today      message from user 10001 in group 123456
//! /merchant-help            private message from `default_user_id`
//! ```

mod log;

use anyhow::Context;
use merchant_bot::{
    bot::{IncomingMessage, Reply},
    config::ConfigStore,
    storage::FileStorage,
    MerchantBot, MerchantClient,
};
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(serde::Deserialize, Debug)]
struct Config {
    superusers: Vec<i64>,
    storage_dir: PathBuf,
    default_user_id: i64,
    log_level: String,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        let mut conf = config::Config::new();
        conf.set_default("superusers", Vec::<i64>::new())?
            .set_default("storage_dir", "./data")?
            .set_default("default_user_id", 10001_i64)?
            .set_default("log_level", "info")?;
        conf
            // Add in `./merchant-bot.toml`
            .merge(config::File::with_name("merchant-bot").required(false))?
            // Add in settings from the environment (with a prefix of MERCHANT_BOT)
            .merge(config::Environment::with_prefix("MERCHANT_BOT"))?;
        conf.try_into()
            .context("Failed to assemble the required configuration")
    }
}

/// Splits `user@group: text`, `user: text` or plain `text` into a message.
fn parse_line(line: &str, config: &Config, message_id: i64) -> Option<IncomingMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let message = match line.split_once(':') {
        Some((sender, text)) if !sender.trim().starts_with('/') => {
            let sender = sender.trim();
            match sender.split_once('@') {
                Some((user, group)) => IncomingMessage::group(
                    group.trim().parse().ok()?,
                    user.trim().parse().ok()?,
                    text.trim(),
                ),
                None => IncomingMessage::private(sender.parse().ok()?, text.trim()),
            }
        }
        _ => IncomingMessage::private(config.default_user_id, line),
    };

    let message = message.with_message_id(message_id);
    Some(if config.superusers.contains(&message.user_id) {
        message.as_superuser()
    } else {
        message
    })
}

fn print_reply(reply: &Reply) {
    match reply.quote {
        Some(message_id) => println!("[reply to #{}] {}", message_id, reply.text),
        None => println!("{}", reply.text),
    }
    println!();
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;
    log::init(&config.log_level);

    let store = ConfigStore::new(Arc::new(FileStorage::new(&config.storage_dir)));
    let bot = MerchantBot::new(MerchantClient::new(store));
    tracing::info!(storage_dir = %config.storage_dir.display(), "Merchant bot ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut message_id = 0;
    while let Some(line) = lines.next_line().await? {
        message_id += 1;
        let message = match parse_line(&line, &config, message_id) {
            Some(message) => message,
            None => {
                tracing::warn!("Unrecognized input line: {}", line);
                continue;
            }
        };

        if let Some(reply) = bot.handle(&message).await {
            print_reply(&reply);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merchant_bot::bot::Chat;

    fn config() -> Config {
        Config {
            superusers: vec![1],
            storage_dir: PathBuf::from("./data"),
            default_user_id: 10001,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn plain_text_comes_from_the_default_user() {
        let message = parse_line("/merchant-help", &config(), 3).unwrap();
        assert_eq!(message.user_id, 10001);
        assert_eq!(message.chat, Chat::Private);
        assert_eq!(message.message_id, 3);
        assert!(!message.is_superuser);
    }

    #[test]
    fn sender_and_group_prefixes() {
        let message = parse_line("1@500: /set-merchant-system https://a.example.com k", &config(), 1)
            .unwrap();
        assert_eq!(message.user_id, 1);
        assert_eq!(message.chat, Chat::Group { group_id: 500 });
        assert_eq!(message.text, "/set-merchant-system https://a.example.com k");
        assert!(message.is_superuser);
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        assert!(parse_line("   ", &config(), 1).is_none());
        assert!(parse_line("abc: /balance", &config(), 1).is_none());
    }
}
