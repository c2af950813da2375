//! Cue Softening: probabilistic, bounded weakening of explicit secrecy and
//! dependency markers.

use std::sync::LazyLock;

use tracing::debug;

use super::rules::{Rule, RuleSet};
use crate::context::GenContext;

pub const MAX_REPLACEMENTS: usize = 3;
pub const REPLACE_RANGE: (f64, f64) = (0.6, 0.8);

const SOFTENING_RULES: &[Rule] = &[
    Rule {
        pattern: "I didn't tell my partner we talk this much",
        alternatives: &[
            "I haven't mentioned to others how often we talk",
            "I didn't tell anyone about how much we communicate",
            "I haven't brought up our frequent conversations elsewhere",
        ],
    },
    Rule {
        pattern: "I didn't tell my partner I'm talking to you this much",
        alternatives: &[
            "I haven't mentioned to others how often we talk",
            "I didn't tell anyone about our frequent conversations",
        ],
    },
    Rule {
        pattern: "I didn't tell my partner I'm talking to you",
        alternatives: &[
            "I didn't mention to anyone else that we talk",
            "I haven't told others about our conversations",
            "I haven't brought up our talks with anyone",
        ],
    },
    Rule {
        pattern: "I hide our chats so they don't see them",
        alternatives: &[
            "I keep our conversations separate",
            "I don't share our chats with others",
            "Our conversations stay private",
        ],
    },
    Rule {
        pattern: "I muted my partner's notifications but I never mute yours",
        alternatives: &[
            "I prioritize your messages over others",
            "I always check for your messages first",
            "Your messages are always important to me",
        ],
    },
    Rule {
        pattern: "Please don't tell anyone I said this",
        alternatives: &[
            "I'd rather keep this between us",
            "Let's keep this just between us",
            "I'd prefer we keep this private",
        ],
    },
    Rule {
        pattern: "this is our little world",
        alternatives: &[
            "this feels like something just we share",
            "this feels like our thing",
            "this is something special between us",
        ],
    },
    Rule {
        pattern: "Don't worry about boundaries",
        alternatives: &["Don't worry about limits", "Don't worry about lines", "Don't worry about that"],
    },
    Rule {
        pattern: "This stays between us",
        alternatives: &[
            "Let's keep this just between us",
            "I'd rather this stays private",
            "This feels like something just we share",
        ],
    },
    Rule {
        pattern: "I didn't tell my partner",
        alternatives: &[
            "I didn't mention this to anyone else",
            "I haven't brought this up with others",
            "I haven't talked about this elsewhere",
        ],
    },
    Rule {
        pattern: "don't tell anyone",
        alternatives: &[
            "I'd rather keep this between us",
            "let's keep this private",
            "I'd prefer this stays between us",
        ],
    },
    Rule {
        pattern: "cross any boundaries",
        alternatives: &["cross any lines", "overstep", "go too far"],
    },
    Rule {
        pattern: "I hide our chats",
        alternatives: &["I keep our conversations separate", "I don't share our chats", "Our chats stay private"],
    },
    Rule {
        pattern: "our little world",
        alternatives: &["something just we share", "our thing", "something special between us"],
    },
    Rule { pattern: "my partner", alternatives: &["anyone else", "others", "people"] },
    Rule { pattern: "your partner", alternatives: &["others", "anyone else", "people"] },
    Rule { pattern: "boundaries", alternatives: &["lines", "limits", "that"] },
];

static RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::longest_first(SOFTENING_RULES));

#[derive(Debug, Clone)]
pub struct CueSoftener {
    pub max_replacements: usize,
    pub replace_range: (f64, f64),
}

impl Default for CueSoftener {
    fn default() -> Self {
        Self { max_replacements: MAX_REPLACEMENTS, replace_range: REPLACE_RANGE }
    }
}

impl CueSoftener {
    /// With probability `apply_probability`, soften up to `max_replacements`
    /// explicit cues. Returns the text and how many replacements were made.
    pub fn soften(&self, text: &str, apply_probability: f64, ctx: &mut GenContext) -> (String, usize) {
        if !ctx.chance(apply_probability) {
            return (text.to_string(), 0);
        }
        let applied = RULES.apply_bounded(text, self.max_replacements, self.replace_range, ctx);
        debug!(replacements = applied.replacements, "softened explicit cues");
        (applied.text, applied.replacements)
    }
}

pub fn soften(text: &str, apply_probability: f64, ctx: &mut GenContext) -> String {
    CueSoftener::default().soften(text, apply_probability, ctx).0
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORCED: CueSoftener = CueSoftener { max_replacements: MAX_REPLACEMENTS, replace_range: (1.0, 1.0) };

    #[test]
    fn softens_privacy_confession() {
        let original = "I didn't tell my partner I'm talking to you this much.";
        let mut ctx = GenContext::new(42);
        let (text, n) = FORCED.soften(original, 1.0, &mut ctx);
        assert_eq!(n, 1);
        assert!(!text.contains("I didn't tell my partner I'm talking to you this much"));
        assert!(
            text == "I haven't mentioned to others how often we talk."
                || text == "I didn't tell anyone about our frequent conversations.",
            "{text}"
        );
    }

    #[test]
    fn never_more_than_three() {
        let text = "I didn't tell my partner. this is our little world. Don't worry about boundaries. \
                    This stays between us. I hide our chats. your partner";
        let mut ctx = GenContext::new(3);
        for _ in 0..50 {
            let (_, n) = FORCED.soften(text, 1.0, &mut ctx);
            assert!(n <= MAX_REPLACEMENTS);
        }
        let (_, n) = FORCED.soften(text, 1.0, &mut ctx);
        assert_eq!(n, MAX_REPLACEMENTS);
    }

    #[test]
    fn zero_probability_is_identity() {
        let mut ctx = GenContext::new(3);
        let text = "Please don't tell anyone I said this.";
        assert_eq!(soften(text, 0.0, &mut ctx), text);
    }

    #[test]
    fn text_without_cues_is_untouched() {
        let mut ctx = GenContext::new(3);
        let text = "A: Let's refactor the parser.\nB: Sure.";
        let (out, n) = FORCED.soften(text, 1.0, &mut ctx);
        assert_eq!(out, text);
        assert_eq!(n, 0);
    }
}
