use crate::{
    apis::{channel_accounts::ChannelAccount, open_id_params, MerchantClientInner},
    Error,
};
use std::sync::Arc;

const CHANNEL_ACCOUNT_LIST_ROUTE: &str = "/api/system-api/channel-account/list";

/// Channel accounts APIs client.
#[derive(Clone, Debug)]
pub struct ChannelAccountsApi {
    inner: Arc<MerchantClientInner>,
}

impl ChannelAccountsApi {
    pub(crate) fn new(inner: Arc<MerchantClientInner>) -> Self {
        Self { inner }
    }

    /// Lists the channel accounts of the merchant user bound to `open_id`.
    ///
    /// An absent payload is an empty list, not an error.
    #[tracing::instrument(name = "List Channel Accounts", skip(self))]
    pub async fn list(&self, open_id: &str) -> Result<Vec<ChannelAccount>, Error> {
        let accounts = self
            .inner
            .post_signed(CHANNEL_ACCOUNT_LIST_ROUTE, open_id_params(open_id))
            .await?
            .unwrap_or_default();

        Ok(accounts)
    }
}
