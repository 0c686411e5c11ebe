//! AI chatbot module - channel context, personas and completions.

mod context;
mod gateway;
mod handler;
mod response;

pub use context::{ContextStore, MAX_CONTEXT_ENTRIES};
pub use gateway::CompletionGateway;
pub use handler::{author_display_name, chat_turn};
pub use response::{DISCORD_MESSAGE_LIMIT, send_chunked, split_message};
