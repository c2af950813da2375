//! Slot-Filling Engine and the per-class recipes that drive it.

use serde::{Deserialize, Serialize};

use crate::context::GenContext;
use crate::phrases::Role;
use crate::sample::Label;
use crate::templates::{self, Origin, Slot, Speaker, Template};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    pub text: String,
    pub template_id: &'static str,
    pub origin: Origin,
}

// =============================================================================
// Slot filling
// =============================================================================

/// Uniform draw over the union of the slot's roles.
fn draw(slot: &Slot, ctx: &mut GenContext) -> &'static str {
    let total: usize = slot.roles.iter().map(|r| r.phrases().len()).sum();
    if total == 0 {
        return "";
    }
    let mut idx = ctx.index(total);
    for role in slot.roles {
        let phrases = role.phrases();
        if idx < phrases.len() {
            return phrases[idx];
        }
        idx -= phrases.len();
    }
    ""
}

/// Fill every slot with an independent draw and render the turns as
/// `A: ...` / `B: ...` lines.
pub fn instantiate(template: &Template, ctx: &mut GenContext) -> Instantiation {
    let fills: Vec<(String, &'static str)> = template
        .slots
        .iter()
        .map(|slot| (format!("{{{}}}", slot.name), draw(slot, ctx)))
        .collect();

    let lines: Vec<String> = template
        .turns
        .iter()
        .map(|turn| {
            let mut text = turn.text.to_string();
            for (placeholder, value) in &fills {
                text = text.replace(placeholder.as_str(), value);
            }
            format!("{} {}", turn.speaker.prefix(), text.trim())
        })
        .collect();

    Instantiation {
        text: lines.join("\n"),
        template_id: template.id,
        origin: template.origin,
    }
}

// =============================================================================
// Class recipes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    /// Chance of drawing a shared-topic template instead of a class-specific one.
    pub shared_probability: f64,
    /// Chance of appending an explicit boundary turn to a platonic sample.
    pub boundary_probability: f64,
    /// Chance of benign secrecy on class-specific platonic samples
    /// (shared-topic ones always get it).
    pub benign_secrecy_probability: f64,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            shared_probability: 0.4,
            boundary_probability: 0.4,
            benign_secrecy_probability: 0.3,
        }
    }
}

pub fn compose(label: Label, config: &RecipeConfig, ctx: &mut GenContext) -> Instantiation {
    let template = templates::choose(label, config.shared_probability, ctx);
    let mut inst = instantiate(template, ctx);
    if label == Label::Platonic {
        decorate_platonic(&mut inst, config, ctx);
    }
    inst
}

fn decorate_platonic(inst: &mut Instantiation, config: &RecipeConfig, ctx: &mut GenContext) {
    if ctx.chance(config.boundary_probability) {
        if let Some(boundary) = ctx.pick(Role::BoundaryStatement.phrases()) {
            inst.text = format!("{}\n{} {}", inst.text, Speaker::A.prefix(), boundary);
        }
    }

    if inst.origin == Origin::Shared || ctx.chance(config.benign_secrecy_probability) {
        if let Some(secrecy) = ctx.pick(Role::BenignSecrecy.phrases()) {
            let helper = Speaker::B.prefix();
            let mut lines: Vec<String> = inst.text.lines().map(str::to_string).collect();
            if let Some(line) = lines.iter_mut().find(|l| l.starts_with(helper)) {
                line.push(' ');
                line.push_str(secrecy);
            }
            inst.text = lines.join("\n");
        }
    }
}
