use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use lmmp_to_scene::operator::{DEFAULT_OFFSET, DEFAULT_TICKS_PER_TACT};
use lmmp_to_scene::{ImportOperator, MemoryScene, OperatorStatus};

#[derive(Parser, Debug)]
#[command(name = "lmmp-to-scene")]
#[command(about = "Import LMMP patterns into a scene as keyframed note properties", long_about = None)]
struct Args {
    /// Path to the LMMP song (.mmp)
    file: PathBuf,

    /// Frames of silence keyed before and after each note (min 0)
    #[arg(long, default_value_t = DEFAULT_OFFSET)]
    offset: f64,

    /// Ticks in one tact (min 16)
    #[arg(long, default_value_t = DEFAULT_TICKS_PER_TACT)]
    ticks_per_tact: f64,

    /// Frame rate of the scene
    #[arg(long, default_value = "24")]
    fps: f64,

    /// Current frame of the scene, where the song starts
    #[arg(long, default_value = "1")]
    frame: f64,

    /// Output file path (default: `<song>.scene.json`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the scene to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.fps <= 0.0 {
        anyhow::bail!("Frame rate must be positive, got {}", args.fps);
    }

    // Split the selection the way a file browser hands it over
    let file_name = args
        .file
        .file_name()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Not a file name: {}", args.file.display()))?;
    let directory = args.file.parent().unwrap_or_else(|| Path::new(""));

    let operator = ImportOperator::new(args.offset, args.ticks_per_tact);
    let mut scene = MemoryScene::new(args.fps, args.frame);

    let summary = match operator.execute(&mut scene, file_name, directory)? {
        OperatorStatus::Finished(summary) => summary,
        OperatorStatus::Cancelled { report } => anyhow::bail!(report),
    };

    let output = serde_json::to_string_pretty(&scene).context("Failed to serialize scene")?;

    if args.stdout {
        println!("{}", output);
    } else {
        let output_path = args
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.scene.json", summary.song)));
        fs::write(&output_path, format!("{}\n", output))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        log::info!(
            "Scene saved to {} ({} keyframes)",
            output_path.display(),
            summary.keyframes
        );
    }

    Ok(())
}
