//! Filter regression test
//!
//! Checks each filter against small hand-computed fixtures and the
//! algebraic properties the filters are expected to keep.

use bmpfx_core::{Pixel, Raster};
use bmpfx_filter::{
    Filter, FilterKind, Kernel, crop, gaussian_blur, grayscale, negative, sharpen, shuffle_tiles,
};
use bmpfx_io::{Bitmap, decode, encode};
use bmpfx_test::{RegParams, fixtures};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn red_rows(raster: &Raster) -> Vec<Vec<u8>> {
    raster.rows().map(|row| row.iter().map(|p| p.r).collect()).collect()
}

#[test]
fn filters_reg() {
    let mut rp = RegParams::new("filters");
    let source = fixtures::gradient(17, 11);

    // --- Test 1: negative is an involution ---
    let mut neg = source.clone();
    negative(&mut neg);
    rp.write_raster(&neg).expect("write negative");
    negative(&mut neg);
    rp.compare_raster(&source, &neg);

    // --- Test 2: grayscale is idempotent ---
    let mut gray = source.clone();
    grayscale(&mut gray);
    let once = gray.clone();
    grayscale(&mut gray);
    rp.compare_raster(&once, &gray);
    let all_gray = gray.pixels().all(|p| p.r == p.g && p.g == p.b);
    rp.compare_values(1.0, if all_gray { 1.0 } else { 0.0 }, 0.0);

    // --- Test 3: crop at or beyond the size is a no-op ---
    let mut cropped = source.clone();
    crop(&mut cropped, 17, 11);
    rp.compare_raster(&source, &cropped);
    crop(&mut cropped, 100, 100);
    rp.compare_raster(&source, &cropped);
    crop(&mut cropped, 5, 100);
    rp.compare_values(5.0, cropped.width() as f64, 0.0);
    rp.compare_values(11.0, cropped.height() as f64, 0.0);

    // --- Test 4: shuffle with a single tile is a no-op ---
    let mut rng = StdRng::seed_from_u64(7);
    let mut shuffled = source.clone();
    shuffle_tiles(&mut shuffled, 1, &mut rng).expect("shuffle 1");
    rp.compare_raster(&source, &shuffled);

    // --- Test 5: shuffle keeps the multiset of tiles ---
    let numbered = fixtures::numbered(12, 12);
    let mut shuffled = numbered.clone();
    shuffle_tiles(&mut shuffled, 3, &mut rng).expect("shuffle 9");
    rp.write_raster(&shuffled).expect("write shuffle");
    let mut before: Vec<_> = numbered.pixels().copied().collect();
    let mut after: Vec<_> = shuffled.pixels().copied().collect();
    before.sort_by_key(|p| p.channels());
    after.sort_by_key(|p| p.channels());
    rp.compare_values(1.0, if before == after { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: a filtered raster survives the codec ---
    let mut blurred = gaussian_blur(&fixtures::gradient(7, 5), 90.0).expect("wide blur");
    negative(&mut blurred);
    let bytes = encode(&Bitmap::from_raster(blurred.clone())).expect("encode");
    let decoded = decode(&bytes).expect("decode").into_raster();
    rp.compare_raster(&blurred, &decoded);

    assert!(rp.cleanup(), "filters regression test failed");
}

#[test]
fn sharpen_fixture_reg() {
    let mut rp = RegParams::new("sharpen_fixture");

    let mut input = Raster::filled(3, 3, Pixel::gray(5));
    input.set(1, 1, Pixel::gray(255)).unwrap();
    input.set(1, 0, Pixel::gray(8)).unwrap();

    let result = sharpen(&input);
    let expected = vec![vec![2, 0, 2], vec![0, 255, 0], vec![5, 0, 5]];
    rp.compare_values(1.0, if red_rows(&result) == expected { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "sharpen fixture regression test failed");
}

#[test]
fn gaussian_fixture_reg() {
    let mut rp = RegParams::new("gaussian_fixture");

    let mut input = Raster::filled(3, 3, Pixel::gray(100));
    input.set(0, 0, Pixel::new(200, 100, 100)).unwrap();
    input.set(1, 0, Pixel::new(150, 100, 100)).unwrap();

    let blurred = gaussian_blur(&input, 1.0).expect("gaussian_blur");
    let expected = vec![vec![135, 120, 104], vec![109, 105, 101], vec![101, 101, 100]];
    let red = red_rows(&blurred);
    eprintln!("  blurred red: {:?}", red);
    rp.compare_values(1.0, if red == expected { 1.0 } else { 0.0 }, 0.0);

    // Uniform channels stay uniform under a normalised kernel
    let flat = blurred.pixels().all(|p| p.g == 100 && p.b == 100);
    rp.compare_values(1.0, if flat { 1.0 } else { 0.0 }, 0.0);

    // The same result through a built filter
    let filter = Filter::new(FilterKind::GaussianBlur, &["1"]).expect("build blur");
    let mut via_filter = input.clone();
    filter.apply(&mut via_filter).expect("apply blur");
    rp.compare_raster(&blurred, &via_filter);

    // sigma 1 uses the minimum kernel size
    let kernel = Kernel::gaussian(1.0).expect("kernel");
    rp.compare_values(5.0, kernel.size() as f64, 0.0);
    rp.compare_values(1.0, kernel.sum(), 1e-9);

    assert!(rp.cleanup(), "gaussian fixture regression test failed");
}
