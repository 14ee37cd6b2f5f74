//! Batch execution of the pipeline over many files.
//!
//! The runner does not read or write files itself. Decoding, writing
//! and display are supplied through the [`ImageDecoder`],
//! [`ImageWriter`] and [`DisplaySink`] traits, so the orchestration
//! can be tested without touching the filesystem. One image's failure
//! never aborts the batch; it is logged and counted, and the run
//! continues with the next file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rasterprep_core::Raster;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::pipeline::ImagePipeline;

/// Errors reported by batch collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Loads an image file into a [`Raster`].
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<Raster, CollaboratorError>;
}

/// Persists a corrected [`Raster`] to a file.
pub trait ImageWriter {
    fn write(&self, raster: &Raster, path: &Path) -> Result<(), CollaboratorError>;
}

/// Presents an original/corrected pair to the user.
pub trait DisplaySink {
    fn show(
        &self,
        source: &Path,
        original: &Raster,
        corrected: &Raster,
    ) -> Result<(), CollaboratorError>;
}

/// How the batch run writes and presents its results.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Directory corrected images are written into, keeping each
    /// source file's name. `None` overwrites the source files.
    pub output_dir: Option<PathBuf>,
    /// Process images on the rayon thread pool. Ignored when a
    /// display sink is attached, because display is interactive and
    /// must stay in file order.
    pub parallel: bool,
}

/// Counts for a finished batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Runs an [`ImagePipeline`] over a list of files.
pub struct BatchRunner<D, W> {
    pipeline: ImagePipeline,
    decoder: D,
    writer: W,
    options: BatchOptions,
}

impl<D, W> BatchRunner<D, W>
where
    D: ImageDecoder + Sync,
    W: ImageWriter + Sync,
{
    pub fn new(pipeline: ImagePipeline, decoder: D, writer: W, options: BatchOptions) -> Self {
        Self {
            pipeline,
            decoder,
            writer,
            options,
        }
    }

    /// Processes every path in `paths`, in order unless parallel
    /// execution is enabled.
    pub fn run(&self, paths: &[PathBuf], display: Option<&dyn DisplaySink>) -> BatchSummary {
        let parallel = self.options.parallel && display.is_none();
        if self.options.parallel && display.is_some() {
            warn!("display requested, falling back to sequential processing");
        }

        let summary = if parallel {
            let failed = AtomicUsize::new(0);
            paths.par_iter().for_each(|path| {
                if self.run_one(path, None).is_err() {
                    failed.fetch_add(1, Ordering::Relaxed);
                }
            });
            let failed = failed.load(Ordering::Relaxed);
            BatchSummary {
                processed: paths.len() - failed,
                failed,
            }
        } else {
            let mut summary = BatchSummary::default();
            for path in paths {
                match self.run_one(path, display) {
                    Ok(()) => summary.processed += 1,
                    Err(()) => summary.failed += 1,
                }
            }
            summary
        };

        info!(
            processed = summary.processed,
            failed = summary.failed,
            "batch finished"
        );
        summary
    }

    fn run_one(&self, path: &Path, display: Option<&dyn DisplaySink>) -> Result<(), ()> {
        let raster = match self.decoder.decode(path) {
            Ok(raster) => raster,
            Err(err) => {
                warn!("skipping {}: decode failed: {err}", path.display());
                return Err(());
            }
        };

        let result = self.pipeline.process(raster);

        let target = self.target_path(path);
        if let Err(err) = self.writer.write(&result.corrected, &target) {
            warn!("skipping {}: write failed: {err}", target.display());
            return Err(());
        }

        if let Some(sink) = display {
            if let Err(err) = sink.show(path, &result.original, &result.corrected) {
                warn!("display failed for {}: {err}", path.display());
            }
        }

        info!("corrected {} -> {}", path.display(), target.display());
        Ok(())
    }

    fn target_path(&self, source: &Path) -> PathBuf {
        match (&self.options.output_dir, source.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => source.to_path_buf(),
        }
    }
}
