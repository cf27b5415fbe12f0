//! Chat surface of the plugin.
//!
//! The host bot framework turns each inbound chat event into an
//! [`IncomingMessage`](crate::bot::IncomingMessage), resolves whether the sender is a
//! superuser, and delivers whatever [`Reply`](crate::bot::Reply) comes back.
//! Transport, routing and permissions stay on the host side.

use crate::{
    client::MerchantClient,
    gate::{AccessGate, Gate, GateDecision},
};
use std::sync::Arc;

mod command;
pub mod format;
mod handlers;

pub use command::{Command, COMMAND_PREFIX};

/// Where a message was sent.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Chat {
    /// One-to-one conversation with the bot.
    Private,
    /// Group conversation.
    Group { group_id: i64 },
}

/// A chat message handed over by the host framework.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub user_id: i64,
    pub chat: Chat,
    pub text: String,
    /// Resolved by the host framework.
    pub is_superuser: bool,
}

impl IncomingMessage {
    pub fn private(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            message_id: 0,
            user_id,
            chat: Chat::Private,
            text: text.into(),
            is_superuser: false,
        }
    }

    pub fn group(group_id: i64, user_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat: Chat::Group { group_id },
            ..Self::private(user_id, text)
        }
    }

    pub fn with_message_id(mut self, message_id: i64) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn as_superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    pub fn is_private(&self) -> bool {
        self.chat == Chat::Private
    }

    pub fn group_id(&self) -> Option<i64> {
        match self.chat {
            Chat::Group { group_id } => Some(group_id),
            Chat::Private => None,
        }
    }

    /// Identifier of the sender in the merchant system.
    pub fn open_id(&self) -> String {
        self.user_id.to_string()
    }
}

/// Text to send back, optionally quoting the triggering message.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Reply {
    pub text: String,
    pub quote: Option<i64>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quote: None,
        }
    }

    pub fn quoting(message_id: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quote: Some(message_id),
        }
    }
}

/// Dispatches chat commands to the merchant API.
///
/// Gates run in registration order before any handler; the group allow-list
/// [`AccessGate`](crate::gate::AccessGate) is always installed first.
#[derive(Debug, Clone)]
pub struct MerchantBot {
    client: MerchantClient,
    gates: Vec<Arc<dyn Gate>>,
}

impl MerchantBot {
    pub fn new(client: MerchantClient) -> Self {
        let access_gate = AccessGate::new(client.config().clone());
        Self {
            client,
            gates: vec![Arc::new(access_gate)],
        }
    }

    /// Appends a gate to the chain.
    pub fn with_gate(mut self, gate: impl Gate + 'static) -> Self {
        self.gates.push(Arc::new(gate));
        self
    }

    /// Handles one chat message.
    ///
    /// Returns `None` when the message is not addressed to this plugin or must be
    /// ignored silently.
    #[tracing::instrument(
        name = "Handle Message",
        skip(self, message),
        fields(user_id = message.user_id, chat = ?message.chat)
    )]
    pub async fn handle(&self, message: &IncomingMessage) -> Option<Reply> {
        let command = Command::parse(&message.text)?;

        for gate in &self.gates {
            if let GateDecision::Reject(reply) = gate.check(message, &command).await {
                return Some(reply);
            }
        }

        handlers::dispatch(&self.client, message, command).await
    }
}
