//! `terravis` — inspect GridFloat datasets and export render artifacts.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use report::{ContourExport, DatasetSummary, MeshExport};
use std::fs;
use std::path::PathBuf;
use terravis_gridfloat::GridFloatDataset;
use terravis_scene::{DisplayConfig, SceneState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terravis", version, about = "GridFloat terrain inspection and export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of a dataset (header, cell sizes, statistics).
    Info {
        /// Dataset filename prefix (without .hdr/.flt/.prj extension).
        prefix: PathBuf,
    },

    /// Extract contour segments and write them as JSON.
    Contours {
        /// Dataset filename prefix (without .hdr/.flt/.prj extension).
        prefix: PathBuf,
        /// Number of contour levels.
        #[arg(long)]
        levels: Option<u32>,
        /// Elevation of the lowest contour (defaults near the grid minimum).
        #[arg(long)]
        low: Option<f64>,
        /// Elevation bound of the highest contour (defaults near the grid maximum).
        #[arg(long)]
        high: Option<f64>,
        /// Sampling stride over the grid.
        #[arg(long)]
        stride: Option<u32>,
        /// Display configuration YAML file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Build the colored mesh vertex strips and write them as JSON.
    Mesh {
        /// Dataset filename prefix (without .hdr/.flt/.prj extension).
        prefix: PathBuf,
        /// Sampling stride over the grid.
        #[arg(long)]
        stride: Option<u32>,
        /// Display configuration YAML file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Info { prefix } => info(prefix),
        Command::Contours {
            prefix,
            levels,
            low,
            high,
            stride,
            config,
            output,
        } => contours(prefix, levels, low, high, stride, config, output),
        Command::Mesh {
            prefix,
            stride,
            config,
            output,
        } => mesh(prefix, stride, config, output),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DisplayConfig> {
    match path {
        Some(path) => DisplayConfig::from_yaml_file(&path)
            .with_context(|| format!("loading display config {}", path.display())),
        None => Ok(DisplayConfig::default()),
    }
}

fn load_scene(prefix: &PathBuf, config: DisplayConfig) -> Result<SceneState> {
    let dataset = GridFloatDataset::load(prefix)
        .with_context(|| format!("loading dataset {}", prefix.display()))?;
    let mut scene = SceneState::new(config);
    scene.load(dataset);
    Ok(scene)
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn info(prefix: PathBuf) -> Result<()> {
    let dataset = GridFloatDataset::load(&prefix)
        .with_context(|| format!("loading dataset {}", prefix.display()))?;

    if let Some(projection) = &dataset.projection {
        println!("{projection}\n");
    } else {
        println!("(no projection metadata)\n");
    }
    println!("{}", DatasetSummary::from_dataset(&dataset));
    Ok(())
}

fn contours(
    prefix: PathBuf,
    levels: Option<u32>,
    low: Option<f64>,
    high: Option<f64>,
    stride: Option<u32>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut scene = load_scene(&prefix, load_config(config)?)?;

    if let Some(levels) = levels {
        scene.set_level_count(levels);
    }
    if low.is_some() || high.is_some() {
        let seeded = *scene.request();
        scene.set_range(
            low.unwrap_or(seeded.low_value),
            high.unwrap_or(seeded.high_value),
        );
    }
    if let Some(stride) = stride {
        scene.set_stride(stride).context("invalid stride")?;
    }

    let request = *scene.request();
    let segments = scene.contours().context("contour extraction failed")?;
    let export = ContourExport {
        request,
        segment_count: segments.len(),
        segments: segments.to_vec(),
    };
    write_json(&export, output)
}

fn mesh(
    prefix: PathBuf,
    stride: Option<u32>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut scene = load_scene(&prefix, load_config(config)?)?;

    if let Some(stride) = stride {
        scene.set_stride(stride).context("invalid stride")?;
    }

    let stride = scene.request().stride;
    let marker = scene.peak_marker()?;
    let strips = scene.mesh().context("mesh generation failed")?;
    let export = MeshExport {
        stride,
        strip_count: strips.len(),
        vertex_count: strips.iter().map(Vec::len).sum(),
        strips: strips.to_vec(),
        marker,
    };
    write_json(&export, output)
}
