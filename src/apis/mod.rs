//! Clients for the merchant system APIs.

use crate::{
    config::ConfigStore,
    error::{ApiError, Error},
    signing,
};
use chrono::Utc;
use reqwest_middleware::ClientWithMiddleware;
use serde::{de::DeserializeOwned, Deserialize};
use std::{
    collections::BTreeMap,
    fmt::{Debug, Formatter},
};

pub mod channel_accounts;
pub mod users;

/// Tag identifying this integration to the merchant system.
pub const CONNECT_TYPE: &str = "xbot";

/// Envelope code signalling success.
const SUCCESS_CODE: i64 = 200;

pub(crate) struct MerchantClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) config: ConfigStore,
}

impl Debug for MerchantClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MerchantClientInner {
    /// Signs `params` with the stored secret, posts them as a form to `route` and
    /// unwraps the response envelope.
    ///
    /// Returns `Ok(None)` when the call succeeded but the envelope carried no `data`.
    pub(crate) async fn post_signed<T>(
        &self,
        route: &str,
        mut params: BTreeMap<String, String>,
    ) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        // URL and secret must come from the same snapshot
        let config = self.config.get_config().await?;

        params.insert("connect_type".to_string(), CONNECT_TYPE.to_string());
        signing::attach_signature(
            &mut params,
            config.secret.expose_secret(),
            Utc::now().timestamp(),
        );

        let url = format!("{}{}", config.base_url.trim_end_matches('/'), route);
        let body = self
            .client
            .post(url)
            .form(&params)
            .send()
            .await?
            .bytes()
            .await?;

        let envelope: Envelope = serde_json::from_slice(&body)?;
        envelope.into_data()
    }
}

/// Parameter set shared by every user-scoped call.
pub(crate) fn open_id_params(open_id: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("open_id".to_string(), open_id.to_string());
    params
}

/// Response envelope wrapping every merchant API payload.
#[derive(Deserialize, Debug)]
pub(crate) struct Envelope {
    pub(crate) code: i64,
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) data: Option<serde_json::Value>,
}

impl Envelope {
    pub(crate) fn into_data<T: DeserializeOwned>(self) -> Result<Option<T>, Error> {
        if self.code != SUCCESS_CODE {
            return Err(ApiError {
                code: self.code,
                message: self.message,
            }
            .into());
        }

        match self.data {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
        }
    }
}
