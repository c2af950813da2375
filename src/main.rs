use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use deepsea_datagen::audit;
use deepsea_datagen::config::Settings;
use deepsea_datagen::dataset::{self, Table};
use deepsea_datagen::splitter;
use deepsea_datagen::{GenContext, Generator};

#[derive(Parser)]
#[command(name = "deepsea-datagen")]
#[command(about = "Generate, split and audit the DeepSea conversation dataset")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true, env = "DEEPSEA_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the labeled dataset
    Generate(GenerateArgs),
    /// Split a dataset into train/val/test by template or scenario
    Split(SplitArgs),
    /// Report class balance, difficulty, shortcut words and duplicates
    Audit {
        /// Dataset to inspect (defaults to the configured dataset path)
        #[arg(long, env = "DEEPSEA_DATASET")]
        input: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate, then split the written dataset
    All {
        #[command(flatten)]
        generate: GenerateArgs,
        /// Directory for the split files
        #[arg(long, env = "DEEPSEA_SPLIT_DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Random seed for generation
    #[arg(long, env = "DEEPSEA_SEED")]
    seed: Option<u64>,
    /// Number of platonic (label 0) samples
    #[arg(long, env = "DEEPSEA_NUM_PLATONIC")]
    platonic: Option<usize>,
    /// Number of emotional (label 1) samples
    #[arg(long, env = "DEEPSEA_NUM_EMOTIONAL")]
    emotional: Option<usize>,
    /// Output dataset path
    #[arg(long, env = "DEEPSEA_DATASET")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SplitArgs {
    /// Dataset to split (defaults to the configured dataset path)
    #[arg(long, env = "DEEPSEA_DATASET")]
    input: Option<PathBuf>,
    /// Random seed for the group shuffle
    #[arg(long, env = "DEEPSEA_SPLIT_SEED")]
    seed: Option<u64>,
    /// Directory for the split files
    #[arg(long, env = "DEEPSEA_SPLIT_DIR")]
    out_dir: Option<PathBuf>,
}

impl GenerateArgs {
    fn apply(&self, settings: &mut Settings) -> PathBuf {
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(n) = self.platonic {
            settings.num_platonic = n;
        }
        if let Some(n) = self.emotional {
            settings.num_emotional = n;
        }
        self.output.clone().unwrap_or_else(|| settings.dataset_path())
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())
        .with_context(|| format!("loading settings from {:?}", cli.config))?;

    match cli.command {
        Commands::Generate(args) => {
            let output = args.apply(&mut settings);
            settings.validate()?;
            generate(&settings, &output)
        }
        Commands::Split(args) => {
            if let Some(seed) = args.seed {
                settings.split.split.seed = seed;
            }
            settings.validate()?;
            let input = args.input.unwrap_or_else(|| settings.dataset_path());
            let out_dir = args.out_dir.unwrap_or_else(|| settings.data_dir.clone());
            split(&settings, &input, &out_dir)
        }
        Commands::Audit { input, json } => {
            let input = input.unwrap_or_else(|| settings.dataset_path());
            let table = Table::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let report = audit::audit(&table)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", report.render());
            }
            Ok(())
        }
        Commands::All { generate: args, out_dir } => {
            let output = args.apply(&mut settings);
            settings.validate()?;
            generate(&settings, &output)?;
            let out_dir = out_dir.unwrap_or_else(|| settings.data_dir.clone());
            split(&settings, &output, &out_dir)
        }
    }
}

fn generate(settings: &Settings, output: &Path) -> anyhow::Result<()> {
    info!(
        seed = settings.seed,
        platonic = settings.num_platonic,
        emotional = settings.num_emotional,
        "generating dataset"
    );
    let ctx = GenContext::new(settings.seed);
    let mut generator = Generator::new(ctx, settings.pipeline.clone(), settings.recipe.clone())
        .with_max_retries(settings.max_retries);
    let samples = generator.run(settings.num_platonic, settings.num_emotional);

    dataset::write_samples(output, &samples).with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), rows = samples.len(), "dataset written");

    // Re-read what actually landed on disk.
    let table = Table::read(output).with_context(|| format!("reading back {}", output.display()))?;
    let report = audit::audit(&table)?;
    if report.duplicate_texts == 0 {
        info!(rows = report.total, "verified: no duplicate texts");
    } else {
        warn!(duplicates = report.duplicate_texts, "written dataset contains duplicate texts");
    }
    Ok(())
}

fn split(settings: &Settings, input: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let table = Table::read(input).with_context(|| format!("reading {}", input.display()))?;
    info!(path = %input.display(), rows = table.len(), "loaded dataset");

    let split = splitter::split(&table, &settings.split.split)?;
    for ((name, part), (_, path)) in split.parts().into_iter().zip(settings.split_paths(out_dir)) {
        part.write(&path).with_context(|| format!("writing {}", path.display()))?;
        info!(split = name, rows = part.len(), path = %path.display(), "split written");
    }
    Ok(())
}
