//! The single durable record owned by the plugin, and its accessor.

use crate::{error::Error, storage::Storage};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tokio::sync::RwLock;

/// Storage key under which the configuration record is persisted.
pub const CONFIG_KEY: &str = "merchant:config";

/// Upstream endpoint, shared secret and group allow-list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MerchantConfig {
    /// Base URL of the merchant API, without the route suffix.
    pub base_url: String,
    /// Shared secret used to sign requests.
    pub secret: ApiSecret,
    /// Groups in which merchant commands are enabled.
    #[serde(default)]
    pub allowed_groups: Vec<i64>,
}

impl MerchantConfig {
    /// Builds a fresh configuration with an empty allow-list.
    pub fn new(base_url: impl Into<String>, secret: impl Into<ApiSecret>) -> Self {
        Self {
            base_url: base_url.into(),
            secret: secret.into(),
            allowed_groups: Vec::new(),
        }
    }
}

/// Wrapper for the API secret that makes it harder to leak it in logs.
///
/// It is a wrapper around a [`secrecy::Secret`](secrecy::Secret).
///
/// ```rust
/// # use merchant_bot::config::ApiSecret;
/// let secret = ApiSecret::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", secret).contains("supersecret"));
///
/// // But it is stored in clear when serialized
/// let serialized = serde_json::to_string(&secret).unwrap();
/// assert!(serialized.contains("supersecret"));
/// ```
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiSecret(#[serde(serialize_with = "serialize_secret")] Secret<String>);

impl ApiSecret {
    /// Wraps a secret string in a new `ApiSecret`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl<T> From<T> for ApiSecret
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        ApiSecret::new(s)
    }
}

impl PartialEq for ApiSecret {
    fn eq(&self, other: &Self) -> bool {
        self.expose_secret() == other.expose_secret()
    }
}

fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    secret.expose_secret().serialize(serializer)
}

/// Reads and writes the [`MerchantConfig`](crate::config::MerchantConfig) record.
///
/// A single reader-writer lock is shared by every clone of the store: concurrent
/// reads proceed together, a save excludes every other access.
#[derive(Clone)]
pub struct ConfigStore {
    storage: Arc<dyn Storage>,
    lock: Arc<RwLock<()>>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Loads the current configuration.
    ///
    /// Fails with [`Error::NotConfigured`](crate::Error::NotConfigured) if nothing
    /// has been saved yet.
    pub async fn get_config(&self) -> Result<MerchantConfig, Error> {
        let _guard = self.lock.read().await;

        let bytes = self
            .storage
            .get(CONFIG_KEY)
            .await
            .map_err(Error::Storage)?
            .ok_or(Error::NotConfigured)?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replaces the stored configuration with `config`.
    pub async fn save_config(&self, config: &MerchantConfig) -> Result<(), Error> {
        let bytes = serde_json::to_vec(config)?;

        let _guard = self.lock.write().await;
        self.storage
            .set(CONFIG_KEY, bytes)
            .await
            .map_err(Error::Storage)?;

        tracing::info!(
            base_url = %config.base_url,
            allowed_groups = config.allowed_groups.len(),
            "Saved merchant configuration"
        );

        Ok(())
    }
}
