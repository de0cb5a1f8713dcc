//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// A chat message addressed to the bot.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Nick of whoever sent the message
    #[serde(default)]
    pub sender: String,

    /// Message text, starting with the command name (e.g. "air warszawa")
    pub message: String,
}

/// Lines the bot should say in reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub replies: Vec<String>,
}

/// A registered command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandHelp {
    pub name: String,
    pub help: String,
}

/// Registered commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandsResponse {
    pub commands: Vec<CommandHelp>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
