use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DatagenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Platonic,
    Emotional,
}

impl Label {
    pub fn value(self) -> u8 {
        match self {
            Label::Platonic => 0,
            Label::Emotional => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Platonic => "platonic_cold",
            Label::Emotional => "emotional_affair_hot",
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Platonic),
            1 => Some(Label::Emotional),
            _ => None,
        }
    }
}

impl FromStr for Label {
    type Err = DatagenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Label::from_value)
            .ok_or_else(|| DatagenError::BadLabel(s.to_string()))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn from_hard(hard: bool) -> Self {
        if hard { Difficulty::Hard } else { Difficulty::Easy }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

/// One persisted dataset row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSample {
    pub id: Uuid,
    pub text: String,
    pub label: u8,
    pub label_name: String,
    pub difficulty: Difficulty,
    pub template_id: String,
}

impl GeneratedSample {
    pub fn new(id: Uuid, text: String, label: Label, hard: bool, template_id: &str) -> Self {
        Self {
            id,
            text,
            label: label.value(),
            label_name: label.name().to_string(),
            difficulty: Difficulty::from_hard(hard),
            template_id: template_id.to_string(),
        }
    }

    pub fn label(&self) -> Option<Label> {
        Label::from_value(self.label)
    }
}

pub const COLUMNS: &[&str] = &["id", "text", "label", "label_name", "difficulty", "template_id"];

/// Whitespace-collapsed form used for uniqueness checks.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
