/// Which canned line a rule answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comeback {
    GoodBot,
    BadBot,
}

/// React to messages containing a keyword, sometimes with a comeback line.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub name: &'static str,
    /// Lowercase phrase searched for in the message.
    pub pattern: &'static str,
    pub reaction: &'static str,
    /// Probability in `[0, 1]` of also sending a comeback.
    pub reply_chance: f64,
    pub comeback: Comeback,
}

/// Returns the built-in keyword rules, in priority order.
#[must_use]
pub fn hardcoded_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule {
            name: "good-bot",
            pattern: "good bot",
            reaction: "😏",
            reply_chance: 0.3,
            comeback: Comeback::GoodBot,
        },
        KeywordRule {
            name: "bad-bot",
            pattern: "bad bot",
            reaction: "🙄",
            reply_chance: 1.0,
            comeback: Comeback::BadBot,
        },
    ]
}
