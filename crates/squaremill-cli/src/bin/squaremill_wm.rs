//! Watermarking frontend: JPEG sources to square PNG thumbnails with a
//! diagonal semi-transparent text overlay.

use std::path::PathBuf;

use clap::Parser;
use squaremill_core::{TargetSize, WatermarkSpec};

#[derive(Parser)]
#[command(
    name = "squaremill-wm",
    about = "Convert JPG images to square, watermarked PNG thumbnails",
    version
)]
struct Args {
    /// Folder containing JPG images
    input_folder: PathBuf,

    /// Folder to save PNG images (default: <input>/converted)
    #[arg(short, long)]
    output_folder: Option<PathBuf>,

    /// Edge length of the output square images
    #[arg(
        short,
        long,
        default_value_t = TargetSize::DEFAULT_EDGE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    size: u32,

    /// Watermark text to overlay on each image
    #[arg(short, long, default_value = "Zeno")]
    watermark: String,
}

fn main() -> anyhow::Result<()> {
    squaremill_cli::init_logging();
    let args = Args::parse();

    let spec = WatermarkSpec::new(args.watermark);
    squaremill_cli::run(
        args.input_folder,
        args.output_folder,
        args.size,
        Some(spec),
    )
}
