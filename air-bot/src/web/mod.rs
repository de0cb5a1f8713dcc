//! Web layer for the bot.
//!
//! A webhook-style endpoint: the chat side posts each message that looks
//! like a command and says whatever replies come back.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
