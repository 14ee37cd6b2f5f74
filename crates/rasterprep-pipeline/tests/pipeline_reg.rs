//! End-to-end regression tests for the correction pipeline.

use rasterprep_core::{Histogram, Raster};
use rasterprep_filter::gamma;
use rasterprep_pipeline::{ImagePipeline, PipelineOptions};

/// Gray image whose luma occupies a narrow band of levels.
fn banded_gray(width: u32, height: u32, low: u8, span: u8) -> Raster {
    let mut raster = Raster::new(width, height, 3).unwrap();
    for (i, px) in raster.pixels_mut().enumerate() {
        let v = low + (i % span as usize) as u8;
        px.copy_from_slice(&[v, v, v]);
    }
    raster
}

fn luma_spread(raster: &Raster) -> u8 {
    let hist = raster.luma_histogram();
    hist.percentile(0.99) - hist.percentile(0.01)
}

#[test]
fn disabled_pipeline_is_identity() {
    let pipeline = ImagePipeline::new(PipelineOptions::default());
    let input = banded_gray(32, 32, 60, 40);
    let result = pipeline.process(input.clone());
    assert_eq!(result.corrected, input);
}

#[test]
fn gamma_stage_resolves_washed_out_image() {
    // A bright band of levels reads as low-contrast; iterative gamma
    // darkening widens it past the classifier threshold.
    let input = banded_gray(100, 100, 230, 11);
    assert!(gamma::is_low_contrast(&input, gamma::LOW_CONTRAST_THRESHOLD).unwrap());

    let pipeline = ImagePipeline::new(PipelineOptions {
        contrast: false,
        color_match: None,
        gamma: true,
    });
    let result = pipeline.process(input.clone());

    assert_eq!(result.original, input);
    assert!(
        !gamma::is_low_contrast(&result.corrected, gamma::LOW_CONTRAST_THRESHOLD).unwrap()
    );
}

#[test]
fn contrast_stage_widens_narrow_band() {
    let input = banded_gray(64, 64, 120, 8);
    let before = luma_spread(&input);

    let pipeline = ImagePipeline::new(PipelineOptions {
        contrast: true,
        color_match: None,
        gamma: false,
    });
    let result = pipeline.process(input);
    assert!(luma_spread(&result.corrected) > before);
}

#[test]
fn color_match_pulls_source_toward_reference() {
    let source = banded_gray(64, 64, 40, 8);
    let reference = banded_gray(64, 64, 200, 8);

    let pipeline = ImagePipeline::new(PipelineOptions {
        contrast: false,
        color_match: Some(reference),
        gamma: false,
    });
    let result = pipeline.process(source);

    let mean = result
        .corrected
        .data()
        .iter()
        .map(|&v| v as u64)
        .sum::<u64>()
        / result.corrected.data().len() as u64;
    assert!(mean > 150, "matched mean {mean} still dark");
}

#[test]
fn stages_compose_without_failing() {
    let reference = banded_gray(32, 32, 90, 60);
    let input = banded_gray(48, 48, 200, 10);

    let pipeline = ImagePipeline::new(PipelineOptions {
        contrast: true,
        color_match: Some(reference),
        gamma: true,
    });
    let result = pipeline.process(input.clone());

    assert_eq!(result.original, input);
    assert_ne!(result.corrected, input);
    assert!(result.corrected.same_shape(&input));
}

#[test]
fn histogram_percentiles_survive_pipeline_shapes() {
    // Shape metadata is untouched by every stage.
    let input = banded_gray(33, 17, 10, 200);
    let pipeline = ImagePipeline::new(PipelineOptions {
        contrast: true,
        color_match: None,
        gamma: true,
    });
    let result = pipeline.process(input);
    assert_eq!(result.corrected.width(), 33);
    assert_eq!(result.corrected.height(), 17);
    assert_eq!(result.corrected.channels(), 3);

    let hist = Histogram::from_samples(result.corrected.data().iter().copied());
    assert_eq!(hist.total(), 33 * 17 * 3);
}
