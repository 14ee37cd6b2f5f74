//! Composition of the correction stages into a single pipeline.
//!
//! Stages always run in a fixed order: contrast enhancement, then
//! histogram matching against a reference image, then adaptive gamma
//! correction. Each stage is individually optional. A stage that fails
//! logs a warning and is skipped, so the pipeline itself never fails;
//! the output is then the result of the stages that did succeed.

use rasterprep_core::Raster;
use rasterprep_filter::{clahe, gamma};
use tracing::{debug, warn};

/// Which stages the pipeline runs, and with what inputs.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Run CLAHE contrast enhancement on the value plane.
    pub contrast: bool,
    /// Match each channel's histogram against this reference image.
    pub color_match: Option<Raster>,
    /// Run iterative gamma correction while the image is low-contrast.
    pub gamma: bool,
}

impl PipelineOptions {
    /// True when no stage is enabled and `process` returns its input
    /// unchanged.
    pub fn is_passthrough(&self) -> bool {
        !self.contrast && self.color_match.is_none() && !self.gamma
    }
}

/// The untouched input alongside the corrected output.
#[derive(Debug, Clone)]
pub struct CorrectedResult {
    pub original: Raster,
    pub corrected: Raster,
}

/// Applies the configured correction stages to one image at a time.
#[derive(Debug, Clone)]
pub struct ImagePipeline {
    options: PipelineOptions,
}

impl ImagePipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs the enabled stages over `raster` and returns both the
    /// original and the corrected image.
    ///
    /// Stage failures are logged and the stage is skipped; the
    /// remaining stages run on the last successfully produced buffer.
    /// With every stage disabled the corrected image is bit-identical
    /// to the original.
    pub fn process(&self, raster: Raster) -> CorrectedResult {
        let original = raster.clone();
        let mut working = raster;

        if self.options.contrast {
            match clahe::enhance(&working) {
                Ok(enhanced) => {
                    debug!("contrast enhancement applied");
                    working = enhanced;
                }
                Err(err) => warn!("contrast enhancement skipped: {err}"),
            }
        }

        if let Some(reference) = &self.options.color_match {
            match rasterprep_color::match_histograms(&working, reference) {
                Ok(matched) => {
                    debug!("histogram matching applied");
                    working = matched;
                }
                Err(err) => warn!("histogram matching skipped: {err}"),
            }
        }

        if self.options.gamma {
            match gamma::correct(&working) {
                Ok(corrected) => {
                    debug!("gamma correction applied");
                    working = corrected;
                }
                Err(err) => warn!("gamma correction skipped: {err}"),
            }
        }

        CorrectedResult {
            original,
            corrected: working,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_raster() -> Raster {
        let mut raster = Raster::new(16, 16, 3).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                let v = (x * 16 + y) as u8;
                raster.set_sample(x, y, 0, v).unwrap();
                raster.set_sample(x, y, 1, v / 2).unwrap();
                raster.set_sample(x, y, 2, v / 4).unwrap();
            }
        }
        raster
    }

    #[test]
    fn passthrough_is_bit_identical() {
        let pipeline = ImagePipeline::new(PipelineOptions::default());
        assert!(pipeline.options().is_passthrough());

        let input = gradient_raster();
        let result = pipeline.process(input.clone());
        assert_eq!(result.original, input);
        assert_eq!(result.corrected, input);
    }

    #[test]
    fn original_is_preserved_across_stages() {
        let pipeline = ImagePipeline::new(PipelineOptions {
            contrast: true,
            color_match: None,
            gamma: true,
        });

        let input = gradient_raster();
        let result = pipeline.process(input.clone());
        assert_eq!(result.original, input);
    }

    #[test]
    fn failed_stage_keeps_previous_buffer() {
        // A grayscale reference cannot be matched against an RGB
        // source, so the matching stage is skipped.
        let reference = Raster::new(4, 4, 1).unwrap();
        let pipeline = ImagePipeline::new(PipelineOptions {
            contrast: false,
            color_match: Some(reference),
            gamma: false,
        });

        let input = gradient_raster();
        let result = pipeline.process(input.clone());
        assert_eq!(result.corrected, input);
    }

    #[test]
    fn contrast_stage_changes_low_contrast_image() {
        let mut input = Raster::new(32, 32, 3).unwrap();
        for (i, px) in input.pixels_mut().enumerate() {
            let v = 120 + (i % 8) as u8;
            px.copy_from_slice(&[v, v, v]);
        }

        let pipeline = ImagePipeline::new(PipelineOptions {
            contrast: true,
            color_match: None,
            gamma: false,
        });
        let result = pipeline.process(input.clone());
        assert_ne!(result.corrected, input);
    }
}
