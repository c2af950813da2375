use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DatagenError, Result};
use crate::generator::MAX_RETRIES;
use crate::slots::RecipeConfig;
use crate::splitter::SplitConfig;
use crate::transform::PipelineConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    #[serde(flatten)]
    pub split: SplitConfig,
    pub train_file: String,
    pub val_file: String,
    pub test_file: String,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            split: SplitConfig::default(),
            train_file: "train.csv".into(),
            val_file: "val.csv".into(),
            test_file: "test.csv".into(),
        }
    }
}

/// Everything a run needs. Every field has a default, so a TOML file only
/// has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub seed: u64,
    pub num_platonic: usize,
    pub num_emotional: usize,
    pub max_retries: usize,
    pub data_dir: PathBuf,
    pub dataset_file: String,
    pub split: SplitSettings,
    pub recipe: RecipeConfig,
    pub pipeline: PipelineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            num_platonic: 1000,
            num_emotional: 1000,
            max_retries: MAX_RETRIES,
            data_dir: PathBuf::from("data"),
            dataset_file: "deepsea_conversations_v2.csv".into(),
            split: SplitSettings::default(),
            recipe: RecipeConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Settings {
    /// Defaults, overlaid with the TOML file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("recipe.shared_probability", self.recipe.shared_probability),
            ("recipe.boundary_probability", self.recipe.boundary_probability),
            ("recipe.benign_secrecy_probability", self.recipe.benign_secrecy_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DatagenError::InvalidProbability { name: name.to_string(), value });
            }
        }
        if self.max_retries == 0 {
            return Err(DatagenError::InvalidSplit("max_retries must be at least 1".into()));
        }
        self.pipeline.validate()?;
        self.split.split.validate()
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(&self.dataset_file)
    }

    /// `(split name, path)` for train, validation and test under `dir`.
    pub fn split_paths(&self, dir: &Path) -> [(&'static str, PathBuf); 3] {
        [
            ("train", dir.join(&self.split.train_file)),
            ("validation", dir.join(&self.split.val_file)),
            ("test", dir.join(&self.split.test_file)),
        ]
    }
}
