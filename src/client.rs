//! Module containing the main merchant API client.

use crate::{
    apis::{channel_accounts::ChannelAccountsApi, users::UsersApi, MerchantClientInner},
    config::ConfigStore,
    middlewares::{
        error_handling::ErrorHandlingMiddleware, inject_user_agent::InjectUserAgentMiddleware,
    },
};
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use std::sync::Arc;

/// Client for the merchant system APIs.
///
/// Every call reads the endpoint and secret from the [`ConfigStore`](crate::config::ConfigStore)
/// at the time it is made, so configuration changes apply to the next request.
/// Failed requests are never retried.
#[derive(Debug, Clone)]
pub struct MerchantClient {
    /// Merchant user APIs client.
    pub users: UsersApi,
    /// Channel accounts APIs client.
    pub channel_accounts: ChannelAccountsApi,
    config: ConfigStore,
}

impl MerchantClient {
    /// Builds a new [`MerchantClient`](crate::client::MerchantClient) with the default configuration.
    pub fn new(config: ConfigStore) -> MerchantClient {
        MerchantClientBuilder::new(config).build()
    }

    /// Returns a new builder to configure a new [`MerchantClient`](crate::client::MerchantClient).
    pub fn builder(config: ConfigStore) -> MerchantClientBuilder {
        MerchantClientBuilder::new(config)
    }

    /// The configuration store backing this client.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }
}

/// Builder for a [`MerchantClient`](crate::client::MerchantClient).
#[derive(Debug)]
pub struct MerchantClientBuilder {
    client: reqwest::Client,
    config: ConfigStore,
}

impl MerchantClientBuilder {
    /// Creates a new builder to configure a [`MerchantClient`](crate::client::MerchantClient).
    pub fn new(config: ConfigStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Consumes the builder and builds a new [`MerchantClient`](crate::client::MerchantClient).
    pub fn build(self) -> MerchantClient {
        let inner = Arc::new(MerchantClientInner {
            client: build_client_with_middleware(self.client),
            config: self.config.clone(),
        });

        MerchantClient {
            users: UsersApi::new(inner.clone()),
            channel_accounts: ChannelAccountsApi::new(inner),
            config: self.config,
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

fn build_client_with_middleware(client: reqwest::Client) -> ClientWithMiddleware {
    reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(ErrorHandlingMiddleware)
        .with(InjectUserAgentMiddleware::new())
        .build()
}
