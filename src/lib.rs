//! Merchant system plugin for chat bots.
//!
//! Lets chat users bind their merchant account and query profile, balance, plan,
//! payment statistics and channel accounts with slash commands, while superusers
//! configure the merchant API endpoint and which groups may use it.
//!
//! # Usage
//!
//! ## Prerequisites
//!
//! Obtain the base URL of your merchant system and the secret used to sign API requests.
//! Both are set at runtime by a superuser with `/set-merchant-system`.
//!
//! ## Initialize a new `MerchantBot`
//!
//! Create a [`ConfigStore`](crate::config::ConfigStore) over a
//! [`Storage`](crate::storage::Storage) backend, build a
//! [`MerchantClient`](crate::client::MerchantClient) on top of it and hand it to a
//! [`MerchantBot`](crate::bot::MerchantBot).
//!
//! ```rust,no_run
//! # use merchant_bot::{bot::*, config::ConfigStore, storage::FileStorage, MerchantClient};
//! # use std::sync::Arc;
//! #
//! # #[tokio::main]
//! # async fn main() {
//! let config = ConfigStore::new(Arc::new(FileStorage::new("./data")));
//! let bot = MerchantBot::new(MerchantClient::new(config));
//!
//! let message = IncomingMessage::group(123456, 10001, "/balance").with_message_id(1);
//! if let Some(reply) = bot.handle(&message).await {
//!     println!("{}", reply.text);
//! }
//! # }
//! ```
//!
//! Merchant commands sent in a group are only answered if the group is in the
//! allow-list set with `/set-merchant-groups`. Private chats are always answered.
//!
//! ## Calling the merchant API directly
//!
//! ```rust,no_run
//! # use merchant_bot::{MerchantClient, Error};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let client: MerchantClient = unreachable!();
//! #
//! let balance = client.users.balance("10001").await?;
//! tracing::info!("Balance: {:.2}", balance as f64 / 100.0);
//!
//! for account in client.channel_accounts.list("10001").await? {
//!     tracing::info!("Channel account {}: {}", account.id, account.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every request is a form-encoded `POST` signed with an MD5 digest of its sorted
//! parameters and the secret, see [`signing`](crate::signing).

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod bot;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
mod middlewares;
pub mod signing;
pub mod storage;

pub use bot::MerchantBot;
pub use client::MerchantClient;
pub use error::Error;
