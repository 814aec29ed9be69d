//! Command-line interface: corpus indexing, interactive tiling and re-rendering

use crate::algorithm::matcher::{DistanceWeights, Matcher};
use crate::index::ColorIndex;
use crate::index::builder::build_signature_file;
use crate::io::configuration::{
    DEFAULT_CANVAS_OUTPUT, DEFAULT_CELL_PIXELS, DEFAULT_DESCRIPTOR_OUTPUT,
    DEFAULT_PREVIEW_OUTPUT, DEFAULT_TILE_COUNT, MosaicConfig,
};
use crate::io::descriptor::MosaicDescriptor;
use crate::io::error::{Result, file_system_error};
use crate::io::image::{load_rgb, save_rgb};
use crate::io::progress::ProgressReporter;
use crate::session::display::ScriptedScreen;
use crate::session::editor::EditSession;
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::MosaicGrid;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Build photomosaics from an indexed image corpus and steer tile choices"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Only log warnings and hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log per-row and per-command detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Average every image of a corpus directory into its signature file
    Index {
        /// Corpus directory
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,
    },

    /// Match a target image against a corpus, then edit it interactively
    Tile {
        /// Target image
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Indexed corpus directory
        #[arg(short, long)]
        corpus: PathBuf,

        /// Event script to read instead of standard input
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Where each shown frame is written
        #[arg(short, long, default_value = DEFAULT_PREVIEW_OUTPUT)]
        preview: PathBuf,

        /// Final canvas image
        #[arg(short, long, default_value = DEFAULT_CANVAS_OUTPUT)]
        output: PathBuf,

        /// Final mosaic descriptor
        #[arg(short, long, default_value = DEFAULT_DESCRIPTOR_OUTPUT)]
        descriptor: PathBuf,

        /// Cells along the larger target side; also sets the repeat cooldown
        #[arg(long, default_value_t = DEFAULT_TILE_COUNT)]
        tile_count: u32,

        /// Pixels per rendered cell
        #[arg(long, default_value_t = DEFAULT_CELL_PIXELS)]
        cell_pixels: u32,

        /// Initial distance weights as "Y CR CB"
        #[arg(short, long, default_value_t = DistanceWeights::default())]
        weights: DistanceWeights,
    },

    /// Render a saved mosaic descriptor
    Render {
        /// Descriptor written by a tiling session
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: PathBuf,

        /// Indexed corpus directory
        #[arg(short, long)]
        corpus: PathBuf,

        /// Output image
        #[arg(short, long, default_value = DEFAULT_CANVAS_OUTPUT)]
        output: PathBuf,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Route `log` output to stderr at the requested level
    ///
    /// `RUST_LOG` still applies to modules the flags do not override.
    pub fn init_logging(&self) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .filter_level(self.log_level())
            .target(env_logger::Target::Stderr)
            .init();
    }
}

/// Runs the selected subcommand
pub struct MosaicProcessor {
    cli: Cli,
    progress: ProgressReporter,
}

impl MosaicProcessor {
    /// Create a processor for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        let progress = ProgressReporter::new(cli.should_show_progress());
        Self { cli, progress }
    }

    /// Execute the subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if indexing, matching, the session or saving fails
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();

        match &self.cli.command {
            Command::Index { corpus } => {
                build_signature_file(corpus, &self.progress)?;
            }
            Command::Tile {
                target,
                corpus,
                events,
                preview,
                output,
                descriptor,
                tile_count,
                cell_pixels,
                weights,
            } => {
                let config = MosaicConfig {
                    tile_count: *tile_count,
                    cell_pixels: *cell_pixels,
                    weights: weights.values(),
                    canvas_output: output.clone(),
                    descriptor_output: descriptor.clone(),
                };
                self.tile(target, corpus, events.as_deref(), preview, &config)?;
            }
            Command::Render {
                descriptor,
                corpus,
                output,
            } => {
                self.render(descriptor, corpus, output)?;
            }
        }

        log::info!("Done in {:.1}s", start_time.elapsed().as_secs_f64());
        Ok(())
    }

    fn tile(
        &self,
        target: &Path,
        corpus: &Path,
        events: Option<&Path>,
        preview: &Path,
        config: &MosaicConfig,
    ) -> Result<()> {
        let mut index = ColorIndex::load(corpus)?;
        let target_image = load_rgb(target)?;

        let weights = DistanceWeights::new(config.weights)?;
        let matcher = Matcher::new(weights, config.cooldown());
        let grid = MosaicGrid::build(
            &target_image,
            &mut index,
            &matcher,
            config.tile_count,
            config.cell_pixels,
            &self.progress,
        )?;
        let canvas = Canvas::render(&grid, &index, &self.progress);

        let reader: Box<dyn BufRead> = match events {
            Some(path) => Box::new(std::io::BufReader::new(
                std::fs::File::open(path).map_err(file_system_error(path, "open event script"))?,
            )),
            None => Box::new(std::io::stdin().lock()),
        };
        let mut display = ScriptedScreen::new(reader, Some(preview.to_path_buf()));

        let mut session = EditSession::new(index, grid, matcher, canvas);
        let summary = session.run(&mut display)?;
        log::info!(
            "Session ended after {} events, {} frames",
            summary.events,
            summary.frames
        );

        let (index, grid, canvas) = session.into_parts();
        save_rgb(canvas.image(), &config.canvas_output)?;
        MosaicDescriptor::from_grid(&grid, &index).write(&config.descriptor_output)?;
        log::info!(
            "Saved {} and {}",
            config.canvas_output.display(),
            config.descriptor_output.display()
        );
        Ok(())
    }

    fn render(&self, descriptor_path: &Path, corpus: &Path, output: &Path) -> Result<()> {
        let index = ColorIndex::load(corpus)?;
        let descriptor = MosaicDescriptor::read(descriptor_path)?;
        let grid = descriptor.to_grid(&index, descriptor_path)?;
        let canvas = Canvas::render(&grid, &index, &self.progress);
        save_rgb(canvas.image(), output)?;
        log::info!("Saved {}", output.display());
        Ok(())
    }
}
