//! Deduplicating generation loop.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::context::GenContext;
use crate::sample::{normalize, Difficulty, GeneratedSample, Label};
use crate::slots::{self, RecipeConfig};
use crate::transform::{Pipeline, PipelineConfig};

pub const MAX_RETRIES: usize = 50;

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub label: Label,
    pub requested: usize,
    pub samples: Vec<GeneratedSample>,
    /// The retry bound was hit before `requested` was reached.
    pub exhausted: bool,
}

impl GenerationOutcome {
    pub fn produced(&self) -> usize {
        self.samples.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub requested: usize,
    pub produced: usize,
    pub easy: usize,
    pub hard: usize,
}

impl RunSummary {
    pub fn of(samples: &[GeneratedSample], requested: usize) -> Self {
        let hard = samples.iter().filter(|s| s.difficulty == Difficulty::Hard).count();
        Self { requested, produced: samples.len(), easy: samples.len() - hard, hard }
    }

    pub fn duplicates_prevented(&self) -> usize {
        self.requested.saturating_sub(self.produced)
    }
}

/// Owns the random stream and the uniqueness set shared by both classes.
pub struct Generator {
    ctx: GenContext,
    pipeline: PipelineConfig,
    recipe: RecipeConfig,
    max_retries: usize,
    seen: HashSet<String>,
}

impl Generator {
    pub fn new(ctx: GenContext, pipeline: PipelineConfig, recipe: RecipeConfig) -> Self {
        Self { ctx, pipeline, recipe, max_retries: MAX_RETRIES, seen: HashSet::new() }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    /// One candidate sample and whether it was made hard; not yet deduplicated.
    pub fn candidate(&mut self, label: Label) -> (String, bool, &'static str) {
        let inst = slots::compose(label, &self.recipe, &mut self.ctx);
        let out = Pipeline::new(&self.pipeline).run(&inst.text, label, &mut self.ctx);
        (out.text, out.hard, inst.template_id)
    }

    /// Produce up to `target` unique samples of `label`. Gives up after
    /// `max_retries` consecutive collisions and returns a short result.
    pub fn generate(&mut self, target: usize, label: Label) -> GenerationOutcome {
        let mut samples = Vec::with_capacity(target);
        let mut retries = 0;
        let mut exhausted = false;

        while samples.len() < target {
            let (text, hard, template_id) = self.candidate(label);
            if self.seen.insert(normalize(&text)) {
                let id = self.ctx.uuid();
                samples.push(GeneratedSample::new(id, text, label, hard, template_id));
                retries = 0;
            } else {
                retries += 1;
                if retries >= self.max_retries {
                    warn!(
                        %label,
                        produced = samples.len(),
                        requested = target,
                        "could not generate a unique example after {} retries",
                        self.max_retries
                    );
                    exhausted = true;
                    break;
                }
            }
        }

        GenerationOutcome { label, requested: target, samples, exhausted }
    }

    /// Both classes, platonic first, then shuffled together.
    pub fn run(&mut self, num_platonic: usize, num_emotional: usize) -> Vec<GeneratedSample> {
        let platonic = self.generate(num_platonic, Label::Platonic);
        let emotional = self.generate(num_emotional, Label::Emotional);

        let mut rows: Vec<GeneratedSample> = platonic.samples.into_iter().chain(emotional.samples).collect();
        self.ctx.shuffle(&mut rows);

        let summary = RunSummary::of(&rows, num_platonic + num_emotional);
        info!(
            requested = summary.requested,
            produced = summary.produced,
            duplicates_prevented = summary.duplicates_prevented(),
            easy = summary.easy,
            hard = summary.hard,
            "generation finished"
        );
        rows
    }
}
