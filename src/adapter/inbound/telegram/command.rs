//! Chat command parsing.

/// Supported chat commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Balance,
    Index,
    SavingsPlan,
    Cancel,
}

impl ChatCommand {
    /// Handler name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Balance => "balance",
            Self::Index => "index",
            Self::SavingsPlan => "savings_plan",
            Self::Cancel => "cancel",
        }
    }
}

/// Parse error for chat messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a chat message into a command.
///
/// Only the first token counts; a `@botname` suffix is ignored.
pub fn parse_command(text: &str) -> Result<ChatCommand, CommandParseError> {
    let Some(raw_command) = text.split_whitespace().next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(ChatCommand::Start),
        "/balance" => Ok(ChatCommand::Balance),
        "/index" => Ok(ChatCommand::Index),
        "/savings_plan" => Ok(ChatCommand::SavingsPlan),
        "/cancel" => Ok(ChatCommand::Cancel),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Commands offered on the reply keyboard.
pub const COMMAND_KEYBOARD: [&str; 4] = ["/savings_plan", "/balance", "/index", "/cancel"];

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Say hello"),
        ("balance", "Current portfolio"),
        ("index", "Current index portfolio"),
        ("savings_plan", "Compute and execute the savings plan"),
        ("cancel", "Abort the current conversation"),
    ]
}
