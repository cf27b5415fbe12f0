//! Gates evaluated before a command handler runs.
//!
//! A [`MerchantBot`](crate::bot::MerchantBot) walks its gates in order; the first
//! one returning [`GateDecision::Reject`] ends processing of the message with the
//! attached reply.

use crate::{
    bot::{Command, IncomingMessage, Reply},
    config::ConfigStore,
};
use async_trait::async_trait;
use std::fmt::Debug;

/// Notice sent when a merchant command is used in a group that is not allow-listed.
pub const GROUP_NOT_ENABLED_NOTICE: &str =
    "⚠️ Merchant features are not enabled for this group\nPlease contact a superuser to enable them";

/// Outcome of a single gate.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GateDecision {
    /// Let the next gate, or the handler, run.
    Continue,
    /// Stop here and answer with this reply.
    Reject(Reply),
}

#[async_trait]
pub trait Gate: Debug + Send + Sync {
    async fn check(&self, message: &IncomingMessage, command: &Command) -> GateDecision;
}

/// Group allow-list check backed by the stored configuration.
#[derive(Debug, Clone)]
pub struct AccessGate {
    config: ConfigStore,
}

impl AccessGate {
    pub fn new(config: ConfigStore) -> Self {
        Self { config }
    }

    /// Returns `true` only if `group_id` is in the stored allow-list.
    ///
    /// An empty allow-list, a missing configuration or a failure to load it all
    /// deny access.
    pub async fn is_group_allowed(&self, group_id: i64) -> bool {
        let config = match self.config.get_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(group_id, "Denying group, configuration unavailable: {}", e);
                return false;
            }
        };

        config.allowed_groups.contains(&group_id)
    }
}

#[async_trait]
impl Gate for AccessGate {
    async fn check(&self, message: &IncomingMessage, command: &Command) -> GateDecision {
        let group_id = match message.group_id() {
            Some(group_id) if command.is_merchant_command() => group_id,
            _ => return GateDecision::Continue,
        };

        if self.is_group_allowed(group_id).await {
            GateDecision::Continue
        } else {
            tracing::info!(
                group_id,
                user_id = message.user_id,
                "Rejected merchant command from a group that is not allow-listed"
            );
            GateDecision::Reject(Reply::quoting(message.message_id, GROUP_NOT_ENABLED_NOTICE))
        }
    }
}
