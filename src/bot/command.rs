//! Chat command parsing.

/// Prefix every command starts with.
pub const COMMAND_PREFIX: char = '/';

/// A recognized chat command and its raw arguments.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// `/set-merchant-system <base_url> <secret>`
    SetSystem(Vec<String>),
    /// `/set-merchant-groups <id1,id2,...>`
    SetGroups(String),
    /// `/merchant-config`
    ViewConfig,
    /// `/bind <ticket>`
    Bind(Option<String>),
    Unbind,
    Profile,
    Balance,
    Plan,
    TodayStats,
    Stats,
    Channels,
    Help,
}

impl Command {
    /// Parses a chat message.
    ///
    /// Returns `None` for anything that is not one of this plugin's commands, so the
    /// message can be left to other handlers.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().strip_prefix(COMMAND_PREFIX)?;
        let (name, rest) = match text.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (text, ""),
        };

        let command = match name {
            "set-merchant-system" => {
                Command::SetSystem(rest.split_whitespace().map(str::to_string).collect())
            }
            "set-merchant-groups" => Command::SetGroups(rest.to_string()),
            "merchant-config" => Command::ViewConfig,
            "bind" => Command::Bind(rest.split_whitespace().next().map(str::to_string)),
            "unbind" => Command::Unbind,
            "me" | "profile" => Command::Profile,
            "balance" | "check-balance" => Command::Balance,
            "plan" | "my-plan" => Command::Plan,
            "today" | "today-stats" => Command::TodayStats,
            "stats" | "pay-stats" => Command::Stats,
            "channels" | "accounts" => Command::Channels,
            "merchant-help" | "merchant-menu" => Command::Help,
            _ => return None,
        };

        Some(command)
    }

    /// Superuser commands, only honoured in private chats.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Command::SetSystem(_) | Command::SetGroups(_) | Command::ViewConfig
        )
    }

    /// Commands subject to the group allow-list.
    pub fn is_merchant_command(&self) -> bool {
        !self.is_admin()
    }
}
