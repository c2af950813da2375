//! Difficulty transform stack and the per-class pipelines that order it.

pub mod hard_negative;
pub mod noise;
pub mod rules;
pub mod soften;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::GenContext;
use crate::error::{DatagenError, Result};
use crate::sample::Label;
use soften::CueSoftener;

pub const HARD_NEGATIVE_PROB: f64 = 0.6;
pub const BREAK_TEMPLATE_PROB: f64 = 0.6;

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stage {
    /// Cue Softening, applied with a per-call probability drawn from
    /// `[min_probability, max_probability)`.
    SoftenCues { min_probability: f64, max_probability: f64 },
    BreakTemplate { base_probability: f64 },
    HardNegative { probability: f64 },
}

impl Stage {
    fn probabilities(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Stage::SoftenCues { min_probability, max_probability } => vec![
                ("soften_cues.min_probability", min_probability),
                ("soften_cues.max_probability", max_probability),
            ],
            Stage::BreakTemplate { base_probability } => {
                vec![("break_template.base_probability", base_probability)]
            }
            Stage::HardNegative { probability } => vec![("hard_negative.probability", probability)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub platonic: Vec<Stage>,
    pub emotional: Vec<Stage>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_hard_negative_prob(HARD_NEGATIVE_PROB)
    }
}

impl PipelineConfig {
    pub fn with_hard_negative_prob(probability: f64) -> Self {
        Self {
            platonic: vec![
                Stage::BreakTemplate { base_probability: BREAK_TEMPLATE_PROB },
                Stage::HardNegative { probability },
            ],
            emotional: vec![
                Stage::SoftenCues { min_probability: 0.4, max_probability: 0.6 },
                Stage::BreakTemplate { base_probability: BREAK_TEMPLATE_PROB },
                Stage::HardNegative { probability },
            ],
        }
    }

    pub fn stages(&self, label: Label) -> &[Stage] {
        match label {
            Label::Platonic => &self.platonic,
            Label::Emotional => &self.emotional,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for stage in self.platonic.iter().chain(&self.emotional) {
            for (name, value) in stage.probabilities() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(DatagenError::InvalidProbability { name: name.to_string(), value });
                }
            }
            if let Stage::SoftenCues { min_probability, max_probability } = stage {
                if min_probability > max_probability {
                    return Err(DatagenError::InvalidProbability {
                        name: "soften_cues.min_probability".to_string(),
                        value: *min_probability,
                    });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Runner
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub text: String,
    /// Whether the hard-negative transform was invoked.
    pub hard: bool,
}

pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    softener: CueSoftener,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config, softener: CueSoftener::default() }
    }

    pub fn run(&self, text: &str, label: Label, ctx: &mut GenContext) -> Transformed {
        let mut text = text.trim().to_string();
        let mut hard = false;

        for stage in self.config.stages(label) {
            match *stage {
                Stage::SoftenCues { min_probability, max_probability } => {
                    let p = ctx.uniform(min_probability, max_probability);
                    text = self.softener.soften(&text, p, ctx).0;
                }
                Stage::BreakTemplate { base_probability } => {
                    text = noise::break_template(&text, base_probability, ctx);
                }
                Stage::HardNegative { probability } => {
                    if ctx.chance(probability) {
                        text = hard_negative::inject(&text, label, ctx);
                        hard = true;
                    }
                }
            }
        }

        debug!(%label, hard, "pipeline finished");
        Transformed { text: text.trim().to_string(), hard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_softens_before_noise_before_hard() {
        let config = PipelineConfig::default();
        assert!(matches!(config.emotional[0], Stage::SoftenCues { .. }));
        assert!(matches!(config.emotional[1], Stage::BreakTemplate { .. }));
        assert!(matches!(config.emotional[2], Stage::HardNegative { .. }));
        assert!(config.platonic.iter().all(|s| !matches!(s, Stage::SoftenCues { .. })));
        config.validate().unwrap();
    }

    #[test]
    fn hard_flag_tracks_invocation() {
        let mut ctx = GenContext::new(10);
        let always = PipelineConfig::with_hard_negative_prob(1.0);
        let never = PipelineConfig::with_hard_negative_prob(0.0);
        let text = "A: Good morning 💕\nB: I was waiting for your message.";
        for _ in 0..20 {
            assert!(Pipeline::new(&always).run(text, Label::Emotional, &mut ctx).hard);
            assert!(!Pipeline::new(&never).run(text, Label::Emotional, &mut ctx).hard);
        }
        let out = Pipeline::new(&always).run(text, Label::Emotional, &mut ctx);
        assert!(!out.text.contains('💕'));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let config = PipelineConfig::with_hard_negative_prob(1.5);
        assert!(matches!(config.validate(), Err(DatagenError::InvalidProbability { .. })));
    }

    #[test]
    fn parses_from_toml() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [[platonic]]
            kind = "hard_negative"
            probability = 0.25

            [[emotional]]
            kind = "soften_cues"
            min_probability = 0.1
            max_probability = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.platonic, vec![Stage::HardNegative { probability: 0.25 }]);
        assert_eq!(
            config.emotional,
            vec![Stage::SoftenCues { min_probability: 0.1, max_probability: 0.2 }]
        );
    }
}
