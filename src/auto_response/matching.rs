//! Content matching for keyword rules.

use super::rules::KeywordRule;

/// Returns the first rule whose pattern appears in `content`, ignoring case.
pub fn select_keyword_rule<'a>(rules: &'a [KeywordRule], content: &str) -> Option<&'a KeywordRule> {
    let content = content.to_lowercase();
    rules.iter().find(|rule| content.contains(rule.pattern))
}
