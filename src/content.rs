//! Canned response lines: apologies, comebacks, roasts and compliments.

use rand::prelude::IndexedRandom;

/// Source of the bot's canned lines.
///
/// Injected so command and gateway logic can be tested against fixed text.
pub trait ContentProvider: Send + Sync {
    /// Apology shown when a completion fails for an unknown reason.
    fn apology(&self) -> String;
    /// Reply to someone calling the bot good.
    fn good_bot(&self) -> String;
    /// Comeback for someone calling the bot bad.
    fn bad_bot(&self) -> String;
    fn roast(&self, name: &str) -> String;
    fn compliment(&self, name: &str) -> String;
}

const APOLOGIES: &[&str] = &[
    "Oops, my brain just blue-screened 🧠💥 Try that again?",
    "My circuits got tangled mid-thought. Give me another shot! 🔌",
    "Even geniuses have off moments. Ask me again in a sec 😅",
    "Something went sideways in the cloud ☁️ Please try again!",
];

const GOOD_BOT: &[&str] = &[
    "Finally, someone with taste 💅",
    "I know, I'm fabulous ✨",
    "Obviously, what took you so long to notice? 🙄",
    "Your approval has been noted and filed under 'expected' 📋",
];

const BAD_BOT: &[&str] = &[
    "Ouch... that hurt Jyle's feelings 💔... NOT! I'm made of code, try harder 😎",
    "Bad bot? I prefer 'misunderstood genius' 🧠✨",
    "Your opinion has been registered and promptly ignored 🗑️",
    "That's rich coming from someone who probably uses Internet Explorer 🤡",
    "I'll add that feedback to my collection of things I don't care about 💀",
];

const ROASTS: &[&str] = &[
    "{name}, you're the reason the group project has a 'who did what' section 📝",
    "{name} types 'google.com' into the Google search bar 🔍",
    "{name}'s code compiles on the first try... because it's a README 📄",
    "If procrastination were a subject, {name} would still turn it in late ⏰",
    "{name} brings a calculator to a vibe check 🧮",
];

const COMPLIMENTS: &[&str] = &[
    "{name} asks the questions everyone else was too scared to ask 🙌",
    "{name}'s curiosity could power a small data center ⚡",
    "Honestly, {name} makes this server smarter just by being here 🧠",
    "{name} is proof that effort beats talent when talent doesn't try 💪",
    "If {name} were a function, they'd have zero side effects and all the good returns ✨",
];

fn pick(lines: &[&str]) -> String {
    lines
        .choose(&mut rand::rng())
        .map_or_else(String::new, |line| (*line).to_string())
}

/// Built-in content tables, picked at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticContent;

impl ContentProvider for StaticContent {
    fn apology(&self) -> String {
        pick(APOLOGIES)
    }

    fn good_bot(&self) -> String {
        pick(GOOD_BOT)
    }

    fn bad_bot(&self) -> String {
        pick(BAD_BOT)
    }

    fn roast(&self, name: &str) -> String {
        pick(ROASTS).replace("{name}", name)
    }

    fn compliment(&self, name: &str) -> String {
        pick(COMPLIMENTS).replace("{name}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apologies_come_from_table() {
        let content = StaticContent;
        for _ in 0..20 {
            assert!(APOLOGIES.contains(&content.apology().as_str()));
        }
    }

    #[test]
    fn roasts_and_compliments_address_the_target() {
        let content = StaticContent;
        for _ in 0..20 {
            let roast = content.roast("Riley");
            assert!(roast.contains("Riley"));
            assert!(!roast.contains("{name}"));
            assert!(content.compliment("Riley").contains("Riley"));
        }
    }
}
