//! rasterprep CLI - batch normalization of raster images.

use std::path::{Path, PathBuf};

use clap::Parser;
use rasterprep_core::Raster;
use rasterprep_pipeline::{
    BatchOptions, BatchRunner, CollaboratorError, DisplaySink, ImageDecoder, ImagePipeline,
    ImageWriter, PipelineOptions,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rasterprep")]
#[command(about = "Normalize contrast, color and gamma across a set of images")]
#[command(version)]
struct Cli {
    /// Image file or directory of images to correct.
    #[arg(long)]
    image_path: PathBuf,

    /// Directory corrected images are written into (created if
    /// missing). Without it the input files are overwritten.
    #[arg(long)]
    output_path: Option<PathBuf>,

    /// Reference image whose per-channel histograms every input is
    /// matched against.
    #[arg(long)]
    color_match_path: Option<PathBuf>,

    /// Enable adaptive contrast enhancement on the value plane.
    #[arg(long)]
    contrast: bool,

    /// Enable iterative gamma correction of low-contrast images.
    #[arg(long)]
    gamma: bool,

    /// Write a side-by-side before/after preview next to each output.
    #[arg(long)]
    display_results: bool,

    /// Process images on all cores. Ignored with --display-results.
    #[arg(long)]
    parallel: bool,
}

struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<Raster, CollaboratorError> {
        Ok(rasterprep_io::read_image(path)?)
    }
}

struct FileWriter;

impl ImageWriter for FileWriter {
    fn write(&self, raster: &Raster, path: &Path) -> Result<(), CollaboratorError> {
        rasterprep_io::write_image(raster, path)?;
        Ok(())
    }
}

/// Headless preview: writes the original and corrected image side by
/// side as `<stem>_compare.png`.
struct PreviewSink {
    out_dir: Option<PathBuf>,
}

impl PreviewSink {
    fn preview_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_owned());
        let name = format!("{stem}_compare.png");
        match (&self.out_dir, source.parent()) {
            (Some(dir), _) => dir.join(name),
            (None, Some(parent)) => parent.join(name),
            (None, None) => PathBuf::from(name),
        }
    }
}

impl DisplaySink for PreviewSink {
    fn show(
        &self,
        source: &Path,
        original: &Raster,
        corrected: &Raster,
    ) -> Result<(), CollaboratorError> {
        let composite = side_by_side(original, corrected)?;
        let path = self.preview_path(source);
        rasterprep_io::write_image(&composite, &path)?;
        tracing::info!("preview written to {}", path.display());
        Ok(())
    }
}

/// Joins two same-shaped rasters into one twice-as-wide image.
fn side_by_side(left: &Raster, right: &Raster) -> Result<Raster, CollaboratorError> {
    if !left.same_shape(right) {
        return Err("preview requires original and corrected to share a shape".into());
    }

    let width = left.width();
    let height = left.height();
    let channels = left.channels();
    let row = (width * channels) as usize;

    let mut out = Raster::new(width * 2, height, channels)?;
    for y in 0..height as usize {
        let src = y * row;
        let dst = y * row * 2;
        out.data_mut()[dst..dst + row].copy_from_slice(&left.data()[src..src + row]);
        out.data_mut()[dst + row..dst + 2 * row].copy_from_slice(&right.data()[src..src + row]);
    }
    Ok(out)
}

fn collect_inputs(image_path: &Path) -> CliResult<Vec<PathBuf>> {
    if image_path.is_dir() {
        Ok(rasterprep_io::list_images(image_path)?)
    } else if image_path.is_file() {
        Ok(vec![image_path.to_path_buf()])
    } else {
        Err(format!("no such file or directory: {}", image_path.display()).into())
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let paths = collect_inputs(&cli.image_path)?;
    if paths.is_empty() {
        return Err(format!("no images found under {}", cli.image_path.display()).into());
    }
    tracing::info!("processing {} image(s)", paths.len());

    let color_match = match &cli.color_match_path {
        Some(path) => Some(rasterprep_io::read_image(path).map_err(|e| -> CliError {
            format!("failed to load reference {}: {e}", path.display()).into()
        })?),
        None => None,
    };

    if let Some(dir) = &cli.output_path {
        std::fs::create_dir_all(dir)?;
    }

    let pipeline = ImagePipeline::new(PipelineOptions {
        contrast: cli.contrast,
        color_match,
        gamma: cli.gamma,
    });
    if pipeline.options().is_passthrough() {
        tracing::warn!("no correction stage enabled, images will be copied unchanged");
    }

    let runner = BatchRunner::new(
        pipeline,
        FileDecoder,
        FileWriter,
        BatchOptions {
            output_dir: cli.output_path.clone(),
            parallel: cli.parallel,
        },
    );

    let sink = PreviewSink {
        out_dir: cli.output_path.clone(),
    };
    let display = cli
        .display_results
        .then_some(&sink as &dyn DisplaySink);

    let summary = runner.run(&paths, display);
    if summary.failed > 0 {
        tracing::warn!("{} of {} images failed", summary.failed, paths.len());
    }
    if summary.processed == 0 {
        return Err("no image was processed successfully".into());
    }
    Ok(())
}
