//! Template-breaking noise: lexical paraphrase, structural variation and
//! length variation, each gated independently.

use std::sync::LazyLock;

use super::rules::{compile, CompiledRule, Rule};
use crate::context::GenContext;

const PHRASE_PARAPHRASES: &[Rule] = &[
    Rule { pattern: "can you", alternatives: &["could you", "would you mind", "can you", "mind if you", "do you think you could"] },
    Rule { pattern: "I'm not sure", alternatives: &["I'm uncertain", "I'm not certain", "I'm unsure", "I'm not sure", "I'm not entirely sure"] },
    Rule { pattern: "makes sense", alternatives: &["sounds good", "that works", "makes sense", "sounds reasonable", "that makes sense", "got it"] },
    Rule { pattern: "Thanks", alternatives: &["Thank you", "Thanks", "Appreciate it", "Thanks a lot", "Much appreciated", "Thanks so much"] },
    Rule { pattern: "I need", alternatives: &["I could use", "I need", "I'd like", "I want", "I'm looking for"] },
    Rule { pattern: "help me", alternatives: &["help me out", "give me a hand", "help me", "assist me", "lend a hand"] },
    Rule { pattern: "think through", alternatives: &["think about", "work through", "think through", "consider", "figure out"] },
    Rule { pattern: "let's", alternatives: &["let's", "we should", "how about we", "maybe we can", "we could"] },
    Rule { pattern: "I feel", alternatives: &["I'm feeling", "I feel", "I'm experiencing", "I'm dealing with", "I'm going through"] },
    Rule { pattern: "I'm struggling", alternatives: &["I'm having trouble", "I'm struggling", "I'm finding it hard", "I'm having difficulty", "I'm stuck"] },
    Rule { pattern: "I appreciate", alternatives: &["I appreciate", "I value", "I'm grateful for", "thanks for"] },
    Rule { pattern: "that's helpful", alternatives: &["that's helpful", "that helps", "useful", "good to know"] },
    Rule { pattern: "I like", alternatives: &["I like", "I enjoy", "I appreciate", "I value"] },
    Rule { pattern: "I understand", alternatives: &["I understand", "I see", "got it", "makes sense"] },
    Rule { pattern: "I'm here", alternatives: &["I'm here", "I'm available", "I'm around", "here for you"] },
    Rule { pattern: "talk to me", alternatives: &["talk to me", "tell me", "share with me", "let me know"] },
];

const WORD_SUBSTITUTIONS: &[Rule] = &[
    Rule { pattern: "quickly", alternatives: &["quickly", "fast", "soon", "asap", "right away"] },
    Rule { pattern: "look at", alternatives: &["look at", "review", "check out", "examine", "take a look at"] },
    Rule { pattern: "sure", alternatives: &["sure", "of course", "absolutely", "definitely", "certainly"] },
    Rule { pattern: "thanks", alternatives: &["thanks", "thank you", "appreciate it", "much appreciated", "thanks a bunch"] },
    Rule { pattern: "help", alternatives: &["help", "assistance", "support", "guidance", "a hand"] },
    Rule { pattern: "advice", alternatives: &["advice", "input", "suggestions", "thoughts", "perspective"] },
    Rule { pattern: "struggling", alternatives: &["struggling", "having trouble", "finding it difficult", "having a hard time", "stuck"] },
    Rule { pattern: "overwhelmed", alternatives: &["overwhelmed", "stressed", "swamped", "under pressure", "drowning"] },
    Rule { pattern: "talk", alternatives: &["talk", "chat", "discuss", "converse"] },
    Rule { pattern: "think", alternatives: &["think", "consider", "ponder", "reflect"] },
    Rule { pattern: "problem", alternatives: &["problem", "issue", "challenge", "situation"] },
    Rule { pattern: "good", alternatives: &["good", "great", "nice", "solid"] },
    Rule { pattern: "always", alternatives: &["always", "constantly", "consistently", "regularly"] },
    Rule { pattern: "really", alternatives: &["really", "truly", "genuinely", "actually"] },
];

/// Empty entries make "no filler" the likelier outcome.
const FILLERS: &[&str] = &[
    "Actually, ", "You know, ", "I mean, ", "So, ", "Well, ", "Look, ", "Honestly, ",
    "To be honest, ", "I guess, ", "I suppose, ", "The thing is, ", "", "", "", "",
];

const PUNCTUATION_VARIANTS: &[(char, &[&str])] = &[
    ('.', &[".", "!", ".", "."]),
    ('?', &["?", "?", "?!", "?"]),
    ('!', &["!", ".", "!", "!!"]),
];

const TRAILERS: &[&str] = &[
    " I think.", " What do you think?", " Let me know.", " Thanks again.", " Sounds good.",
    " That works.", " Got it.", " Makes sense.", " If that's okay.", "", "", "", "",
];

const PHRASE_LINE_PROBABILITY: f64 = 0.3;
const WORD_LINE_PROBABILITY: f64 = 0.2;
const FILLER_PROBABILITY: f64 = 0.2;
const PUNCTUATION_PROBABILITY: f64 = 0.15;
const TRAILER_PROBABILITY: f64 = 0.2;

static PHRASES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| compile(PHRASE_PARAPHRASES));
static WORDS: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| compile(WORD_SUBSTITUTIONS));

/// Paraphrase, then restructure, then lengthen, at `base`, `0.8 * base`
/// and `0.6 * base` respectively.
pub fn break_template(text: &str, base_probability: f64, ctx: &mut GenContext) -> String {
    let text = paraphrase(text, base_probability, ctx);
    let text = vary_structure(&text, base_probability * 0.8, ctx);
    vary_length(&text, base_probability * 0.6, ctx)
}

fn map_lines(text: &str, mut f: impl FnMut(String) -> String) -> String {
    text.split('\n')
        .map(|line| f(line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Lexical paraphrase
// =============================================================================

pub fn paraphrase(text: &str, probability: f64, ctx: &mut GenContext) -> String {
    if !ctx.chance(probability) {
        return text.to_string();
    }
    map_lines(text, |mut line| {
        for rule in PHRASES.iter() {
            if rule.is_match(&line) && ctx.chance(PHRASE_LINE_PROBABILITY) {
                line = rule.replace_first(&line, ctx);
            }
        }
        for rule in WORDS.iter() {
            if rule.is_match(&line) && ctx.chance(WORD_LINE_PROBABILITY) {
                line = rule.replace_first(&line, ctx);
            }
        }
        line
    })
}

// =============================================================================
// Structural variation
// =============================================================================

pub fn vary_structure(text: &str, probability: f64, ctx: &mut GenContext) -> String {
    if !ctx.chance(probability) {
        return text.to_string();
    }
    map_lines(text, |mut line| {
        if !line.trim().is_empty() && ctx.chance(FILLER_PROBABILITY) {
            let filler = ctx.pick(FILLERS).copied().unwrap_or("");
            if !filler.is_empty() {
                if let Some((speaker, utterance)) = speaker_split(&line) {
                    line = format!("{}: {}{}", speaker, filler, utterance.trim_start());
                }
            }
        }

        if ctx.chance(PUNCTUATION_PROBABILITY) {
            let variants = PUNCTUATION_VARIANTS
                .iter()
                .find(|(p, _)| line.ends_with(*p))
                .map(|(_, v)| *v);
            if let Some(variants) = variants {
                if let Some(variant) = ctx.pick(variants) {
                    line.pop();
                    line.push_str(variant);
                }
            }
        }
        line
    })
}

fn speaker_split(line: &str) -> Option<(&str, &str)> {
    if !(line.starts_with("A:") || line.starts_with("B:")) {
        return None;
    }
    line.split_once(':')
}

// =============================================================================
// Length variation
// =============================================================================

pub fn vary_length(text: &str, probability: f64, ctx: &mut GenContext) -> String {
    if !ctx.chance(probability) {
        return text.to_string();
    }
    map_lines(text, |line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.ends_with(['?', '!', '.']) || !ctx.chance(TRAILER_PROBABILITY) {
            return line;
        }
        match ctx.pick(TRAILERS) {
            Some(trailer) if !trailer.is_empty() => format!("{}{}", line.trim_end(), trailer),
            _ => line,
        }
    })
}
