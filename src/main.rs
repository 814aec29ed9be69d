//! CLI entry point for the photomosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicProcessor};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let processor = MosaicProcessor::new(cli);
    processor.process()
}
