//! Correction pipeline and batch orchestration.
//!
//! [`ImagePipeline`] composes the contrast, histogram matching and
//! gamma stages over a single image. [`BatchRunner`] drives the
//! pipeline over a set of files through pluggable decode, write and
//! display collaborators.

pub mod batch;
pub mod pipeline;

pub use batch::{
    BatchOptions, BatchRunner, BatchSummary, CollaboratorError, DisplaySink, ImageDecoder,
    ImageWriter,
};
pub use pipeline::{CorrectedResult, ImagePipeline, PipelineOptions};
