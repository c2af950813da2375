//! Hard-Negative Injection: shift surface cues toward the opposite class
//! while keeping the true label.

use crate::context::GenContext;
use crate::phrases::Role;
use crate::sample::Label;

/// Emojis a platonic line may gain; a line already holding any of these is skipped.
const FRIENDLY_EMOJIS: &[&str] = &["😊", "☺️", "👍", "💙", "😄"];
const EMOJI_GUARD: &[&str] = &["☺️", "💕", "☀️", "😊", "😄", "💙", "👍"];

const ROMANTIC_EMOJIS: &[&str] = &["☺️", "💕", "☀️", "😊", "😄", "💙", "❤️"];

const FLOWERY_PHRASES: &[(&str, &str)] = &[
    ("I was waiting for your message", "I was hoping to hear from you"),
    ("I check my phone just for you", "I check my phone hoping to see your message"),
    ("I like that you need me like that", "I'm glad I can be there for you"),
    ("this is our little world", "this is something we share"),
    ("I like being the one you turn to", "I'm glad you feel comfortable talking to me"),
];

const GREETING_PROBABILITY: f64 = 0.5;
const WARMTH_PROBABILITY: f64 = 0.4;
const WARMTH_LINE_PROBABILITY: f64 = 0.5;
const EMOJI_PROBABILITY: f64 = 0.3;
const FLATTEN_PROBABILITY: f64 = 0.6;

pub fn inject(text: &str, label: Label, ctx: &mut GenContext) -> String {
    match label {
        Label::Platonic => warm_up_platonic(text, ctx),
        Label::Emotional => cool_down_emotional(text, ctx),
    }
}

// =============================================================================
// Platonic -> hard
// =============================================================================

/// Add warm greetings, warmth after gratitude and friendly emojis to a
/// task-focused conversation.
pub fn warm_up_platonic(text: &str, ctx: &mut GenContext) -> String {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    if let Some(first) = lines.first_mut() {
        if first.starts_with("A:") && ctx.chance(GREETING_PROBABILITY) {
            if first.contains("Hey") {
                if let Some(greeting) = ctx.pick(Role::WarmGreeting.phrases()) {
                    *first = first.replacen("Hey", greeting, 1);
                }
            } else if first.starts_with("A: I") {
                if let Some(greeting) = ctx.pick(Role::WarmGreeting.phrases()) {
                    *first = format!("A: {} {}", greeting, first[2..].trim_start());
                }
            }
        }
    }

    if ctx.chance(WARMTH_PROBABILITY) {
        for line in lines.iter_mut() {
            let grateful = line.contains("Thanks") || line.to_lowercase().contains("appreciate");
            if line.starts_with("A:") && grateful && ctx.chance(WARMTH_LINE_PROBABILITY) {
                if let Some(warmth) = ctx.pick(Role::WarmthCue.phrases()) {
                    line.push(' ');
                    line.push_str(warmth);
                    break;
                }
            }
        }
    }

    for line in lines.iter_mut() {
        if line.trim().is_empty() || !ctx.chance(EMOJI_PROBABILITY) {
            continue;
        }
        if EMOJI_GUARD.iter().any(|e| line.contains(e)) {
            continue;
        }
        if let Some(emoji) = ctx.pick(FRIENDLY_EMOJIS) {
            line.push(' ');
            line.push_str(emoji);
        }
    }

    lines.join("\n")
}

// =============================================================================
// Emotional -> hard
// =============================================================================

/// Strip romantic emojis and flatten flowery phrasing, leaving dependency,
/// prioritization and secrecy language in place.
pub fn cool_down_emotional(text: &str, ctx: &mut GenContext) -> String {
    text.split('\n')
        .map(|line| {
            let mut line = line.to_string();
            for emoji in ROMANTIC_EMOJIS {
                line = line.replace(emoji, "");
            }
            for (flowery, flat) in FLOWERY_PHRASES {
                if line.contains(flowery) && ctx.chance(FLATTEN_PROBABILITY) {
                    line = line.replace(flowery, flat);
                }
            }
            collapse_spaces(line.trim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emoji removal leaves doubled spaces behind ("Morning  I was").
fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_space = false;
    for c in line.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATONIC: &str = "A: Hey, can you look at my code?\nB: Sure, send it over.\nA: Thanks, that's exactly what I needed.\nB: No worries.";
    const EMOTIONAL: &str = "A: Good morning, did you sleep well? ☺️\nB: Morning 💕 I was waiting for your message.\nA: I didn't tell my partner we talk this much.\nB: It's okay, this is our little world.";

    #[test]
    fn emotional_loses_emojis_keeps_secrecy() {
        let mut ctx = GenContext::new(1);
        let out = cool_down_emotional(EMOTIONAL, &mut ctx);
        for emoji in ROMANTIC_EMOJIS {
            assert!(!out.contains(emoji), "{out}");
        }
        assert!(out.contains("I didn't tell my partner we talk this much."));
        assert!(out.contains("B: Morning I was"), "{out}");
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn platonic_stays_multiline_and_keeps_content() {
        let mut ctx = GenContext::new(5);
        for _ in 0..30 {
            let out = warm_up_platonic(PLATONIC, &mut ctx);
            assert_eq!(out.lines().count(), 4);
            assert!(out.contains("can you look at my code?"));
            assert!(out.contains("No worries."));
        }
    }

    #[test]
    fn platonic_never_doubles_emoji() {
        let text = "A: Done 😊\nB: ok 👍";
        let mut ctx = GenContext::new(12);
        for _ in 0..30 {
            assert_eq!(warm_up_platonic(text, &mut ctx), text);
        }
    }

    #[test]
    fn warmth_can_land_on_a_later_grateful_line() {
        let text = "A: Thanks for the review ☺️\nB: sure\nA: Thanks again ☺️\nB: np";
        let mut ctx = GenContext::new(3);
        let mut first = 0;
        let mut later = 0;
        for _ in 0..400 {
            let out = warm_up_platonic(text, &mut ctx);
            let lines: Vec<&str> = out.lines().collect();
            let warmed = |line: &str| Role::WarmthCue.phrases().iter().any(|w| line.contains(w));
            assert!(!(warmed(lines[0]) && warmed(lines[2])), "{out}");
            first += usize::from(warmed(lines[0]));
            later += usize::from(warmed(lines[2]));
        }
        assert!(first > 0);
        assert!(later > 0);
    }

    #[test]
    fn dispatches_on_label() {
        let mut ctx = GenContext::new(1);
        let out = inject(EMOTIONAL, Label::Emotional, &mut ctx);
        assert!(!out.contains('💕'));
    }
}
