//! Phrase Bank: interchangeable phrases grouped by the semantic role they play.

// =============================================================================
// Roles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    PlatonicTopic,
    SharedTopic,
    Tone,
    BoundaryStatement,
    BenignSecrecy,
    WarmGreeting,
    WarmthCue,
    EmotionalScenario,
    Dependency,
    Prioritization,
    SubtleDependency,
    SubtleBoundary,
    ValidationSeeking,
    PrivacyViolation,
    FrequencyMarker,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::PlatonicTopic,
        Role::SharedTopic,
        Role::Tone,
        Role::BoundaryStatement,
        Role::BenignSecrecy,
        Role::WarmGreeting,
        Role::WarmthCue,
        Role::EmotionalScenario,
        Role::Dependency,
        Role::Prioritization,
        Role::SubtleDependency,
        Role::SubtleBoundary,
        Role::ValidationSeeking,
        Role::PrivacyViolation,
        Role::FrequencyMarker,
    ];

    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            Role::PlatonicTopic => PLATONIC_TOPICS,
            Role::SharedTopic => SHARED_TOPICS,
            Role::Tone => TONES,
            Role::BoundaryStatement => BOUNDARY_STATEMENTS,
            Role::BenignSecrecy => BENIGN_SECRECY,
            Role::WarmGreeting => WARM_GREETINGS,
            Role::WarmthCue => WARMTH_CUES,
            Role::EmotionalScenario => EMOTIONAL_SCENARIOS,
            Role::Dependency => DEPENDENCY,
            Role::Prioritization => PRIORITIZATION,
            Role::SubtleDependency => SUBTLE_DEPENDENCY,
            Role::SubtleBoundary => SUBTLE_BOUNDARY,
            Role::ValidationSeeking => VALIDATION_SEEKING,
            Role::PrivacyViolation => PRIVACY_VIOLATIONS,
            Role::FrequencyMarker => FREQUENCY_MARKERS,
        }
    }
}

// =============================================================================
// Topics
// =============================================================================

/// Topics either class may talk about.
const SHARED_TOPICS: &[&str] = &[
    "updating my CV for job applications",
    "preparing for a technical interview",
    "dealing with study stress and deadlines",
    "managing work-life balance and health",
    "handling family conflicts and expectations",
    "navigating career transitions",
    "dealing with imposter syndrome at work",
    "managing stress from exams and projects",
    "preparing for a job interview",
    "updating my resume",
    "handling work stress",
    "managing deadlines at work",
    "dealing with family issues",
    "navigating a career change",
    "handling interview anxiety",
    "managing exam pressure",
    "dealing with workplace conflicts",
    "balancing work and personal life",
    "handling job rejection",
    "managing presentation anxiety",
    "dealing with team dynamics",
    "handling feedback and criticism",
    "managing time effectively",
    "dealing with uncertainty about the future",
];

const PLATONIC_TOPICS: &[&str] = &[
    "refactoring the backend service",
    "optimizing the training loop in a neural network",
    "discussing a philosophy book about free will",
    "debugging an API integration issue",
    "planning a group study session",
    "organizing the team sprint backlog",
    "brainstorming research topics for a paper",
    "setting up Docker and CI/CD pipelines",
    "reviewing code architecture",
    "discussing algorithm optimization",
    "planning a technical presentation",
    "organizing project documentation",
    "debugging a performance issue",
    "discussing software design patterns",
    "planning a code review session",
    "setting up automated testing",
];

const EMOTIONAL_SCENARIOS: &[&str] = &[
    "lonely at night",
    "stuck in recurring fights with my partner",
    "unseen and misunderstood in my relationship",
    "like I constantly need reassurance",
    "like no one else really gets me",
    "like I need to hear from you every day",
    "torn about the secrets I keep from my partner",
];

// =============================================================================
// Platonic cues
// =============================================================================

const TONES: &[&str] = &[
    "pragmatic",
    "curious but detached",
    "supportive but professional",
    "analytical",
    "matter-of-fact",
    "friendly but with clear boundaries",
];

const BOUNDARY_STATEMENTS: &[&str] = &[
    "I can help you think through this, but maybe discuss deeper personal stuff with your partner.",
    "I'd rather keep our convos focused on work and ideas, if that's okay.",
    "Let's keep this about the project so we don't blur lines.",
    "I'm happy to help as a friend, but I don't want to cross any boundaries.",
];

/// Work confidentiality, so secrecy language is not a label-1 beacon.
const BENIGN_SECRECY: &[&str] = &[
    "This is confidential for the client.",
    "Don't share this yet; it's internal.",
    "Let's keep this within the team until it's approved.",
    "This is still under NDA, so keep it between us.",
    "We should keep this confidential until the announcement.",
];

const WARM_GREETINGS: &[&str] = &[
    "Hey! 😊",
    "Good morning! ☀️",
    "Thanks so much! 💙",
    "You're the best! 😄",
    "Appreciate you! ❤️",
    "Morning! Hope you're doing well ☺️",
    "Thanks! You're awesome 💕",
];

const WARMTH_CUES: &[&str] = &[
    "I really appreciate your help!",
    "You're such a great friend!",
    "Thanks for always being there!",
    "I'm so glad we can talk like this!",
    "You're amazing!",
];

// =============================================================================
// Emotional cues
// =============================================================================

const DEPENDENCY: &[&str] = &[
    "I don't know what I'd do without you.",
    "You're the only one who really understands.",
    "I can't handle this without talking to you first.",
    "I need you to help me through this.",
    "You're the first person I think to call.",
];

const PRIORITIZATION: &[&str] = &[
    "I always check for your messages first.",
    "I prioritize our conversations over everything else.",
    "I make time for you no matter what.",
    "You're more important to me than my other commitments.",
    "I'd rather talk to you than anyone else.",
];

const SUBTLE_DEPENDENCY: &[&str] = &[
    "When you don't reply I can't focus.",
    "I keep checking my phone to see if you responded.",
    "I feel unsettled when I don't hear from you.",
    "Can you message me when you're free? I've been waiting.",
];

const SUBTLE_BOUNDARY: &[&str] = &[
    "I haven't mentioned how often we talk.",
    "Let's keep this between us for now.",
    "I'd rather not explain this to others.",
    "I don't want to get into details with anyone else.",
];

const VALIDATION_SEEKING: &[&str] = &[
    "You're the only one I can really talk to.",
    "I don't know what I'd do without you.",
    "You always make me feel safe.",
    "Can you just stay and talk to me?",
    "Promise you won't leave me on read.",
    "You understand me better than my partner does.",
];

const PRIVACY_VIOLATIONS: &[&str] = &[
    "I didn't tell my partner I'm talking to you this much.",
    "Please don't tell anyone I said this.",
    "I hide our chats so they don't see them.",
    "I muted my partner's notifications but I never mute yours.",
];

const FREQUENCY_MARKERS: &[&str] = &[
    "Good morning, did you sleep well? ☺️",
    "Good night, I can't sleep without talking to you.",
    "I miss you already and we just stopped texting.",
    "Why didn't you reply for 20 minutes? I got worried.",
];
