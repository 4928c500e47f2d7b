//! pagerank CLI
//!
//! Ranks a directory of HTML pages by sampling and by iteration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rapid_pagerank::config::RankConfig;
use rapid_pagerank::{corpus, report, DanglingPolicy};
use serde_json::json;

#[derive(Parser)]
#[command(name = "pagerank")]
#[command(author, version, about = "Rank HTML pages by PageRank")]
struct Cli {
    /// Directory of .html pages
    corpus: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Probability of following a link
    #[arg(long)]
    damping: Option<f64>,

    /// Pages visited by the sampling estimator
    #[arg(long)]
    samples: Option<usize>,

    /// Max per-page change at which iteration stops
    #[arg(long)]
    threshold: Option<f64>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Spread dangling-page mass uniformly during iteration
    #[arg(long)]
    redistribute_dangling: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn rank_config(&self) -> Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => RankConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RankConfig::default(),
        };
        if let Some(damping) = self.damping {
            config.damping = damping;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.redistribute_dangling {
            config.dangling = DanglingPolicy::Redistribute;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.rank_config()?;

    let graph = corpus::discover(&cli.corpus)
        .with_context(|| format!("reading corpus {}", cli.corpus.display()))?;

    let sampled = config.sampler().run(&graph)?;
    let iterated = config.iterator().run(&graph)?;

    if cli.json {
        let out = json!({
            "samples": config.samples,
            "sampling": sampled,
            "iteration": {
                "iterations": iterated.iterations,
                "delta": iterated.delta,
                "ranks": iterated.distribution,
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!(
            "{}",
            report::render(
                &format!("PageRank Results from Sampling (n = {})", config.samples),
                &sampled
            )
        );
        print!(
            "{}",
            report::render("PageRank Results from Iteration", &iterated.distribution)
        );
    }

    Ok(())
}
