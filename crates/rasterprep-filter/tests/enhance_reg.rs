//! Regression tests for the contrast enhancement stage on full rasters.

use rasterprep_core::Raster;
use rasterprep_filter::clahe;

fn luma_spread(raster: &Raster) -> u8 {
    let hist = raster.luma_histogram();
    hist.percentile(0.99) - hist.percentile(0.01)
}

/// Gray RGB raster with texture confined to eight adjacent levels.
fn narrow_band(width: u32, height: u32, low: u8) -> Raster {
    let mut raster = Raster::new(width, height, 3).unwrap();
    for y in 0..height {
        for x in 0..width {
            let v = low + ((x + y) % 8) as u8;
            for c in 0..3 {
                raster.set_sample(x, y, c, v).unwrap();
            }
        }
    }
    raster
}

#[test]
fn enhance_widens_flat_exposure() {
    let input = narrow_band(64, 64, 120);
    let before = luma_spread(&input);
    let out = clahe::enhance(&input).unwrap();
    assert!(out.same_shape(&input));
    assert!(luma_spread(&out) > before);
}

#[test]
fn enhance_keeps_neutral_grays_neutral() {
    // Zero-saturation pixels must come back with r == g == b, whatever
    // the value plane was remapped to.
    let input = narrow_band(32, 32, 90);
    let out = clahe::enhance(&input).unwrap();
    for px in out.pixels() {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}
