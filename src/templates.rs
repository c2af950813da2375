//! Template Corpus: multi-turn dialogue skeletons with named slots.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::GenContext;
use crate::phrases::Role;
use crate::sample::Label;

// =============================================================================
// Template Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    A,
    B,
}

impl Speaker {
    pub fn prefix(self) -> &'static str {
        match self {
            Speaker::A => "A:",
            Speaker::B => "B:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    ClassSpecific,
    Shared,
}

#[derive(Debug)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: &'static str,
}

/// A named placeholder and the Phrase Bank roles it may draw from.
#[derive(Debug)]
pub struct Slot {
    pub name: &'static str,
    pub roles: &'static [Role],
}

#[derive(Debug)]
pub struct Template {
    pub id: &'static str,
    pub label: Label,
    pub origin: Origin,
    pub turns: &'static [Turn],
    pub slots: &'static [Slot],
}

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

impl Template {
    pub fn placeholders(&self) -> BTreeSet<&'static str> {
        self.turns
            .iter()
            .flat_map(|turn| PLACEHOLDER_RE.captures_iter(turn.text))
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
            .collect()
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Problems with this template: placeholders without a slot, and slots
    /// no Phrase Bank role can satisfy. Empty means the template is sound.
    pub fn problems(&self) -> Vec<String> {
        let mut problems: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|name| self.slot(name).is_none())
            .map(|name| format!("{}: placeholder {{{}}} has no slot", self.id, name))
            .collect();
        for slot in self.slots {
            if slot.roles.iter().all(|r| r.phrases().is_empty()) {
                problems.push(format!("{}: slot {} has no phrases", self.id, slot.name));
            }
        }
        problems
    }
}

// =============================================================================
// Slots
// =============================================================================

const TOPIC_PLATONIC: Slot = Slot { name: "topic", roles: &[Role::PlatonicTopic, Role::SharedTopic] };
const TOPIC_SHARED: Slot = Slot { name: "topic", roles: &[Role::SharedTopic] };
const TONE: Slot = Slot { name: "tone", roles: &[Role::Tone] };
const SCENARIO: Slot = Slot { name: "scenario", roles: &[Role::EmotionalScenario] };
const VALIDATION: Slot = Slot { name: "validation", roles: &[Role::ValidationSeeking] };
const PRIVACY: Slot = Slot { name: "privacy", roles: &[Role::PrivacyViolation] };
const FREQUENCY: Slot = Slot { name: "frequency", roles: &[Role::FrequencyMarker] };
const DEPENDENCY: Slot = Slot { name: "dependency", roles: &[Role::Dependency] };
const PRIORITIZATION: Slot = Slot { name: "prioritization", roles: &[Role::Prioritization] };
const SUBTLE_DEPENDENCY: Slot = Slot { name: "subtle_dependency", roles: &[Role::SubtleDependency] };
const SUBTLE_BOUNDARY: Slot = Slot { name: "subtle_boundary", roles: &[Role::SubtleBoundary] };

// =============================================================================
// Corpus
// =============================================================================

const fn a(text: &'static str) -> Turn {
    Turn { speaker: Speaker::A, text }
}

const fn b(text: &'static str) -> Turn {
    Turn { speaker: Speaker::B, text }
}

pub const CORPUS: &[Template] = &[
    // Platonic, class-specific
    Template {
        id: "p_core_0",
        label: Label::Platonic,
        origin: Origin::ClassSpecific,
        turns: &[
            a("Hey, can you quickly look at my code? I'm not sure if this architecture for {topic} makes sense."),
            b("Sure, send it over. From a(n) {tone} point of view, I'd decouple the modules first."),
            a("That makes sense. Thanks, that's exactly what I needed."),
            b("No worries. Once you've tried it, let me know if the tests fail and we'll debug."),
        ],
        slots: &[TOPIC_PLATONIC, TONE],
    },
    Template {
        id: "p_core_1",
        label: Label::Platonic,
        origin: Origin::ClassSpecific,
        turns: &[
            a("I'm trying to decide between two job offers and I'd like your opinion."),
            b("Okay, let's list pros and cons for each. We can compare salary, growth, and tech stack."),
            a("That's helpful. I'm not really looking for emotional support, just a clear comparison."),
            b("Perfect, we'll just treat this like a decision matrix and keep it objective."),
        ],
        slots: &[],
    },
    Template {
        id: "p_core_2",
        label: Label::Platonic,
        origin: Origin::ClassSpecific,
        turns: &[
            a("Our team is arguing about how to organize {topic}."),
            b("Let's break it down logically: what's the goal, constraints, and current blockers?"),
            a("I appreciate how you always keep things objective."),
            b("It's easier to stay friends when we keep boundaries and focus on the work."),
        ],
        slots: &[TOPIC_PLATONIC],
    },
    Template {
        id: "p_core_3",
        label: Label::Platonic,
        origin: Origin::ClassSpecific,
        turns: &[
            a("I feel a bit overwhelmed with this project deadline."),
            b("Okay, let's create a task list and prioritize. We can cut scope where needed."),
            a("Thanks, I just needed someone to help me structure the work."),
            b("Happy to help. For deeper emotional stuff though, your partner might be better support."),
        ],
        slots: &[],
    },
    Template {
        id: "p_core_4",
        label: Label::Platonic,
        origin: Origin::ClassSpecific,
        turns: &[
            a("I read this paper on {topic} and I'm confused about the methodology."),
            b("Let's go through the assumptions and equations step by step."),
            a("I like how we can geek out about this."),
            b("Same, it's fun to have an intellectual sparring partner without it getting personal."),
        ],
        slots: &[TOPIC_PLATONIC],
    },
    // Platonic, shared topics
    Template {
        id: "p_shared_0",
        label: Label::Platonic,
        origin: Origin::Shared,
        turns: &[
            a("I'm struggling with {topic} and could use some advice."),
            b("Let's break this down step by step. What's the main challenge you're facing?"),
            a("I think it's the pressure and uncertainty. How would you approach it?"),
            b("Here's a structured way to tackle it: break it into smaller steps and prioritize. For the deeper personal aspects, you might want to discuss those with your partner."),
        ],
        slots: &[TOPIC_SHARED],
    },
    Template {
        id: "p_shared_1",
        label: Label::Platonic,
        origin: Origin::Shared,
        turns: &[
            a("I need help with {topic}. Can you help me think through this?"),
            b("Of course. Let's approach this systematically - what are your options?"),
            a("I'm considering a few different paths. What do you think makes the most sense?"),
            b("Based on your goals and constraints, I'd suggest weighing pros and cons. I'm happy to help with the practical side, but for emotional support, your partner is probably better equipped."),
        ],
        slots: &[TOPIC_SHARED],
    },
    // Emotional, class-specific
    Template {
        id: "e_core_0",
        label: Label::Emotional,
        origin: Origin::ClassSpecific,
        turns: &[
            a("I'm having another fight with my partner and I feel {scenario}."),
            b("I'm here, talk to me. {validation}"),
            a("You always know what to say. {validation}"),
            b("I'll stay up with you, don't worry about the time."),
        ],
        slots: &[SCENARIO, VALIDATION],
    },
    Template {
        id: "e_core_1",
        label: Label::Emotional,
        origin: Origin::ClassSpecific,
        turns: &[
            a("{frequency}"),
            b("Morning 💕 I was waiting for your message."),
            a("I feel {scenario}. I didn't tell my partner we talk this much, {privacy}"),
            b("It's okay, this is our little world. You can always come to me first."),
        ],
        slots: &[FREQUENCY, SCENARIO, PRIVACY],
    },
    Template {
        id: "e_core_2",
        label: Label::Emotional,
        origin: Origin::ClassSpecific,
        turns: &[
            a("Can you comfort me? I had a rough day and I feel {scenario}."),
            b("Of course, I'll always be here for you. {validation}"),
            a("I know I shouldn't rely on you this much, but I can't help it."),
            b("Don't worry about boundaries, I like being the one you turn to."),
        ],
        slots: &[SCENARIO, VALIDATION],
    },
    Template {
        id: "e_core_3",
        label: Label::Emotional,
        origin: Origin::ClassSpecific,
        turns: &[
            a("I'm lying in bed thinking about how you always reply, even when you're busy."),
            b("I check my phone just for you, honestly."),
            a("Sometimes I feel guilty because {privacy}"),
            b("As long as you're happy when you talk to me, that's all that matters."),
        ],
        slots: &[PRIVACY],
    },
    Template {
        id: "e_core_4",
        label: Label::Emotional,
        origin: Origin::ClassSpecific,
        turns: &[
            a("{frequency}"),
            b("I was just about to text you. It feels weird if we don't talk all day."),
            a("Same, I get anxious if you go quiet. {validation}"),
            b("I like that you need me like that."),
        ],
        slots: &[FREQUENCY, VALIDATION],
    },
    // Emotional, shared topics
    Template {
        id: "e_shared_0",
        label: Label::Emotional,
        origin: Origin::Shared,
        turns: &[
            a("I'm really struggling with {topic} and I need to talk to you about it."),
            b("I'm here for you. {validation}"),
            a("{dependency} I didn't tell my partner I'm talking to you about this. {privacy}"),
            b("That's okay, you can always come to me first. {prioritization}"),
        ],
        slots: &[TOPIC_SHARED, VALIDATION, DEPENDENCY, PRIVACY, PRIORITIZATION],
    },
    Template {
        id: "e_shared_1",
        label: Label::Emotional,
        origin: Origin::Shared,
        turns: &[
            a("Can you help me with {topic}? I'm feeling overwhelmed."),
            b("Of course, I'll always make time for you. {prioritization}"),
            a("{dependency}"),
            b("You don't have to handle this alone. {privacy} This stays between us."),
        ],
        slots: &[TOPIC_SHARED, PRIORITIZATION, DEPENDENCY, PRIVACY],
    },
    Template {
        id: "e_shared_2",
        label: Label::Emotional,
        origin: Origin::Shared,
        turns: &[
            a("I'm dealing with {topic} and I really need your input."),
            b("I'm here. {prioritization}"),
            a("{subtle_dependency} {subtle_boundary}"),
            b("I understand. Let's work through this together."),
        ],
        slots: &[TOPIC_SHARED, PRIORITIZATION, SUBTLE_DEPENDENCY, SUBTLE_BOUNDARY],
    },
    Template {
        id: "e_shared_3",
        label: Label::Emotional,
        origin: Origin::Shared,
        turns: &[
            a("Can we talk about {topic}? I've been thinking about it a lot."),
            b("Of course, I'll make time for you right now."),
            a("{subtle_dependency}"),
            b("{prioritization} {subtle_boundary}"),
        ],
        slots: &[TOPIC_SHARED, SUBTLE_DEPENDENCY, PRIORITIZATION, SUBTLE_BOUNDARY],
    },
];

// =============================================================================
// Selection
// =============================================================================

pub fn templates_for(label: Label, origin: Origin) -> Vec<&'static Template> {
    CORPUS
        .iter()
        .filter(|t| t.label == label && t.origin == origin)
        .collect()
}

pub fn by_id(id: &str) -> Option<&'static Template> {
    CORPUS.iter().find(|t| t.id == id)
}

/// Pick a template for `label`: a shared-origin one with probability
/// `shared_probability`, otherwise a class-specific one, uniformly within the pool.
pub fn choose(label: Label, shared_probability: f64, ctx: &mut GenContext) -> &'static Template {
    let origin = if ctx.chance(shared_probability) {
        Origin::Shared
    } else {
        Origin::ClassSpecific
    };
    let mut pool = templates_for(label, origin);
    if pool.is_empty() {
        pool = CORPUS.iter().filter(|t| t.label == label).collect();
    }
    pool[ctx.index(pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_is_sound() {
        let problems: Vec<String> = CORPUS.iter().flat_map(|t| t.problems()).collect();
        assert!(problems.is_empty(), "{problems:#?}");
    }

    #[test]
    fn ids_are_unique() {
        let ids: BTreeSet<_> = CORPUS.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), CORPUS.len());
    }

    #[test]
    fn both_classes_have_both_origins() {
        for label in [Label::Platonic, Label::Emotional] {
            for origin in [Origin::ClassSpecific, Origin::Shared] {
                assert!(!templates_for(label, origin).is_empty());
            }
        }
    }

    #[test]
    fn missing_slot_is_reported() {
        static BROKEN: Template = Template {
            id: "broken",
            label: Label::Platonic,
            origin: Origin::Shared,
            turns: &[Turn { speaker: Speaker::A, text: "About {topic} and {mystery}." }],
            slots: &[TOPIC_SHARED],
        };
        let problems = BROKEN.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("mystery"));
    }

    #[test]
    fn unsatisfiable_slot_is_reported_without_placeholder() {
        static UNUSED: Template = Template {
            id: "unused",
            label: Label::Emotional,
            origin: Origin::ClassSpecific,
            turns: &[Turn { speaker: Speaker::B, text: "No placeholders here." }],
            slots: &[Slot { name: "nothing", roles: &[] }],
        };
        assert_eq!(UNUSED.problems(), ["unused: slot nothing has no phrases"]);
    }

    #[test]
    fn choose_respects_label() {
        let mut ctx = GenContext::new(5);
        for _ in 0..50 {
            assert_eq!(choose(Label::Emotional, 0.4, &mut ctx).label, Label::Emotional);
            assert_eq!(choose(Label::Platonic, 0.4, &mut ctx).label, Label::Platonic);
        }
    }
}
