use crate::common::{mock_server::MerchantMockServer, ALLOWED_GROUP_ID};
use merchant_bot::{
    config::{ConfigStore, MerchantConfig},
    storage::MemoryStorage,
    MerchantBot, MerchantClient,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct TestContext {
    pub bot: MerchantBot,
    pub client: MerchantClient,
    pub secret: String,
    pub mock_server: MerchantMockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        // Generate a new random secret for this specific test
        let secret = Uuid::new_v4().to_string();

        let mock_server = MerchantMockServer::start(&secret).await;

        // Point a fresh configuration store at the mock server
        let store = ConfigStore::new(Arc::new(MemoryStorage::new()));
        let mut config = MerchantConfig::new(mock_server.url(), secret.as_str());
        config.allowed_groups = vec![ALLOWED_GROUP_ID];
        store.save_config(&config).await.unwrap();

        let client = MerchantClient::new(store);
        let bot = MerchantBot::new(client.clone());

        Self {
            bot,
            client,
            secret,
            mock_server,
        }
    }
}
