//! Renders a tile map to PNG after replaying a navigation script.

mod script;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tileview::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "tileview-app", about = "Render a tile grid map to PNG")]
struct Cli {
    /// Map options as JSON
    #[arg(short, long)]
    config: PathBuf,

    /// Directory source URLs are resolved against (defaults to the config's directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Navigation commands, e.g. "right,down,click:790:10,in"
    #[arg(short = 's', long, default_value = "")]
    script: String,

    /// Print the overlay text of the final frame
    #[arg(long)]
    overlay: bool,

    /// Output image
    #[arg(short, long, default_value = "tileview.png")]
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tileview::init_logging();
    let cli = Cli::parse();

    let options = MapOptions::from_json_file(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    let base_dir = cli
        .base_dir
        .clone()
        .or_else(|| cli.config.parent().map(PathBuf::from))
        .unwrap_or_default();
    let events = script::parse_script(&cli.script)?;

    let mut map = MapBuilder::from_options(options)
        .loader(FileLoader::new(base_dir))
        .surface(RasterSurface::new(cli.width, cli.height))
        .build()?;

    let report = map.initialize().await?;
    for failure in report.failures() {
        log::warn!("{} did not load", failure.locator);
    }

    for event in events {
        let redrawn = map.handle_input(event.clone())?;
        log::info!("{:?} -> center {:?} (redrawn: {})", event, map.center(), redrawn);
    }

    let surface = map
        .surface_as::<RasterSurface>()
        .ok_or_else(|| anyhow!("map has no raster surface"))?;
    if cli.overlay {
        for (line, _) in surface.text_lines() {
            println!("{}", line);
        }
    }
    surface
        .save(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    log::info!("wrote {}", cli.output.display());
    Ok(())
}
