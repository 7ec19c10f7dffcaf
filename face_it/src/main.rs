//! face_it — entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use face_expression::{Eyes, Mouth};
use face_it::FaceItConfig;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "face_it", about = "Gesture-driven cartoon face")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive window (default)
    Window,

    /// Write a single frame as SVG
    Render {
        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value_t = 400.0)]
        width: f64,

        #[arg(long, default_value_t = 400.0)]
        height: f64,

        #[arg(long)]
        eyes: Option<Eyes>,

        #[arg(long)]
        mouth: Option<Mouth>,

        #[arg(long)]
        scale: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).init();

    let mut cfg = match &cli.config {
        Some(path) => FaceItConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => FaceItConfig::default(),
    };

    match cli.command.unwrap_or(Command::Window) {
        Command::Window => face_it::run(cfg).context("running window")?,
        Command::Render { out, width, height, eyes, mouth, scale } => {
            if let Some(eyes) = eyes { cfg.expression.eyes = eyes; }
            if let Some(mouth) = mouth { cfg.expression.mouth = mouth; }
            if let Some(scale) = scale { cfg.face.scale = scale; }
            cfg.validate().context("render options")?;
            face_it::write_svg(&cfg, width, height, &out)?;
        }
    }
    Ok(())
}
