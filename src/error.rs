use reqwest::StatusCode;
use thiserror::Error;

use crate::persona::MAX_NICKNAME_CHARS;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("OpenRouter API error ({status}): {message}")]
    OpenRouterApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("OpenRouter response error: {0}")]
    OpenRouterResponse(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Nickname is {0} characters long")]
    NicknameTooLong(usize),

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Platform lookup failed: {0}")]
    Lookup(String),
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

impl BotError {
    /// Returns a user-friendly error message suitable for displaying in Discord
    ///
    /// Completion failures other than `OpenRouterApi` are shown as a random
    /// apology by the gateway instead.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BotError::Serenity(_) | BotError::Lookup(_) => {
                "Sorry, I'm having trouble communicating with Discord right now. Please try again later.".to_string()
            }
            BotError::Config(_) | BotError::EnvVar(_) => {
                "Sorry, there's a configuration issue on my end. Please contact the bot administrator.".to_string()
            }
            BotError::OpenRouterApi { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    "Sorry, I'm having authentication issues with my AI service. Please contact the bot administrator.".to_string()
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    "Sorry, I've hit my rate limit. Please try again in a few moments.".to_string()
                }
                status if status.is_server_error() => {
                    "Sorry, the AI service is experiencing issues right now. Please try again later.".to_string()
                }
                _ => {
                    "Sorry, there was an issue with my request to the AI service. Please try again or contact the bot administrator.".to_string()
                }
            },
            BotError::OpenRouterResponse(_) | BotError::Reqwest(_) => {
                "Sorry, I couldn't reach my AI service. Please try again in a moment.".to_string()
            }
            BotError::NicknameTooLong(_) => {
                format!("❌ Nickname too long! Keep it under {MAX_NICKNAME_CHARS} characters.")
            }
            BotError::InvalidUserId(_) => {
                "❌ Invalid user ID. Please provide a valid Discord user ID.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: StatusCode) -> BotError {
        BotError::OpenRouterApi {
            status,
            message: "upstream said no".to_string(),
        }
    }

    #[test]
    fn openrouter_status_selects_message() {
        assert!(api_error(StatusCode::UNAUTHORIZED).user_message().contains("authentication"));
        assert!(api_error(StatusCode::TOO_MANY_REQUESTS).user_message().contains("rate limit"));
        assert!(api_error(StatusCode::BAD_GATEWAY).user_message().contains("experiencing issues"));
        assert!(api_error(StatusCode::BAD_REQUEST).user_message().contains("issue with my request"));
    }

    #[test]
    fn nickname_message_names_the_limit() {
        assert!(BotError::NicknameTooLong(64).user_message().contains("50 characters"));
    }
}
