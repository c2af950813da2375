//! Ordered phrase-replacement rules and the interpreter that evaluates them.

use regex::{Regex, RegexBuilder};

use crate::context::GenContext;

/// Replace `pattern` with one of `alternatives`.
#[derive(Debug)]
pub struct Rule {
    pub pattern: &'static str,
    pub alternatives: &'static [&'static str],
}

// =============================================================================
// Bounded, longest-first evaluation (exact case)
// =============================================================================

/// Rules sorted longest pattern first, so a long phrase is matched before
/// any shorter phrase it contains.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<&'static Rule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub text: String,
    pub replacements: usize,
}

impl RuleSet {
    pub fn longest_first(rules: &'static [Rule]) -> Self {
        let mut rules: Vec<&'static Rule> = rules.iter().collect();
        rules.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        Self { rules }
    }

    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.pattern)
    }

    /// Walk the rules in order; each rule found in the current text is
    /// applied with a fresh probability drawn from `[replace_lo, replace_hi)`,
    /// replacing only its first occurrence. Stops after `max` replacements.
    pub fn apply_bounded(
        &self,
        text: &str,
        max: usize,
        (replace_lo, replace_hi): (f64, f64),
        ctx: &mut GenContext,
    ) -> Applied {
        let mut result = text.to_string();
        let mut replacements = 0;

        for rule in &self.rules {
            if replacements >= max {
                break;
            }
            if !result.contains(rule.pattern) {
                continue;
            }
            let p = ctx.uniform(replace_lo, replace_hi);
            if !ctx.chance(p) {
                continue;
            }
            if let Some(alt) = ctx.pick(rule.alternatives) {
                result = result.replacen(rule.pattern, alt, 1);
                replacements += 1;
            }
        }

        Applied { text: result, replacements }
    }
}

// =============================================================================
// Case-insensitive whole-word evaluation
// =============================================================================

#[derive(Debug)]
pub struct CompiledRule {
    regex: Regex,
    alternatives: &'static [&'static str],
}

impl CompiledRule {
    pub fn new(rule: &'static Rule) -> Self {
        let pattern = format!(r"\b{}\b", regex::escape(rule.pattern));
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("escaped literal is a valid pattern");
        Self { regex, alternatives: rule.alternatives }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Replace the first match with a random alternative, keeping the
    /// capitalization class of the matched text.
    pub fn replace_first(&self, line: &str, ctx: &mut GenContext) -> String {
        let Some(m) = self.regex.find(line) else {
            return line.to_string();
        };
        let Some(alt) = ctx.pick(self.alternatives) else {
            return line.to_string();
        };
        let matched = m.as_str();
        let replacement = if matched == matched.to_lowercase() {
            alt.to_string()
        } else {
            capitalize(alt)
        };
        format!("{}{}{}", &line[..m.start()], replacement, &line[m.end()..])
    }
}

pub fn compile(rules: &'static [Rule]) -> Vec<CompiledRule> {
    rules.iter().map(CompiledRule::new).collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static NESTED: &[Rule] = &[
        Rule { pattern: "partner", alternatives: &["friend"] },
        Rule { pattern: "my partner knows", alternatives: &["nobody knows"] },
    ];

    static GREETING: Rule = Rule { pattern: "thanks", alternatives: &["cheers"] };

    #[test]
    fn sorts_longest_first() {
        let set = RuleSet::longest_first(NESTED);
        let patterns: Vec<_> = set.patterns().collect();
        assert_eq!(patterns, ["my partner knows", "partner"]);
    }

    #[test]
    fn longer_rule_wins_overlap() {
        let set = RuleSet::longest_first(NESTED);
        let mut ctx = GenContext::new(1);
        let applied = set.apply_bounded("I think my partner knows.", 1, (1.0, 1.0), &mut ctx);
        assert_eq!(applied.text, "I think nobody knows.");
        assert_eq!(applied.replacements, 1);
    }

    #[test]
    fn zero_budget_changes_nothing() {
        let set = RuleSet::longest_first(NESTED);
        let mut ctx = GenContext::new(1);
        let applied = set.apply_bounded("my partner knows", 0, (1.0, 1.0), &mut ctx);
        assert_eq!(applied.text, "my partner knows");
        assert_eq!(applied.replacements, 0);
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let set = RuleSet::longest_first(NESTED);
        let mut ctx = GenContext::new(1);
        let applied = set.apply_bounded("partner and partner", 5, (1.0, 1.0), &mut ctx);
        assert_eq!(applied.text, "friend and partner");
    }

    #[test]
    fn case_insensitive_keeps_capitalization() {
        let rule = CompiledRule::new(&GREETING);
        let mut ctx = GenContext::new(1);
        assert_eq!(rule.replace_first("Thanks, really", &mut ctx), "Cheers, really");
        assert_eq!(rule.replace_first("ok thanks", &mut ctx), "ok cheers");
    }

    #[test]
    fn whole_words_only() {
        let rule = CompiledRule::new(&GREETING);
        assert!(!rule.is_match("thanksgiving"));
        assert!(rule.is_match("THANKS!"));
    }
}
