use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use trussview::{render_report, RenderOptions, Scene, Truss, TrussSummary};

/// Measure and draw a truss described in a plain-text file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Truss description to load
    file: PathBuf,

    /// Write the diagram to this PNG file
    #[arg(short, long, value_name = "PNG")]
    export: Option<PathBuf>,

    /// Scale from truss units to pixels for the exported image
    #[arg(short, long, default_value_t = RenderOptions::default().zoom)]
    zoom: f32,

    /// Line width in pixels for the exported image
    #[arg(long, default_value_t = RenderOptions::default().stroke_width)]
    stroke_width: f32,

    /// Print a JSON summary instead of the text report
    #[arg(long)]
    json: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    // Check export settings before doing any work so a typo fails fast.
    let options = RenderOptions {
        zoom: args.zoom,
        stroke_width: args.stroke_width,
    };
    if args.export.is_some() {
        options.validate()?;
    }

    let truss = Truss::load(&args.file)?;

    if args.json {
        println!("{}", TrussSummary::new(&truss).to_json()?);
    } else {
        print!("{}", render_report(&truss));
    }

    if let Some(path) = &args.export {
        Scene::from_truss(&truss).export_png(path, &options)?;
    }

    Ok(())
}
