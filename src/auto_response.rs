//! Keyword reactions for casual messages.

mod handler;
mod matching;
mod rules;

pub use handler::handle_keyword_reaction;
pub use rules::{Comeback, KeywordRule, hardcoded_keyword_rules};
