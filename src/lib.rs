pub mod auto_response;
pub mod bot;
pub mod chatbot;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod openrouter;
pub mod persona;
pub mod platform;
pub mod relay;
pub mod types;

pub use bot::run;
