//! End-to-end regression test: command line to output file

use bmpfx::filter::{FilterError, PipelineConfig};
use bmpfx::io::{Bitmap, IoError, read_bmp_file, write_bmp_file};
use bmpfx::{Error, Pixel, Raster, cli, process_file};
use bmpfx_test::{RegParams, fixtures};

#[test]
fn process_file_reg() {
    let mut rp = RegParams::new("process_file");
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");

    let source = fixtures::gradient(30, 20);
    write_bmp_file(&Bitmap::from_raster(source.clone()), &input).expect("write input");

    // --- Test 1: crop + negative through the command line ---
    let argv = [
        "image_processor".to_string(),
        input.display().to_string(),
        output.display().to_string(),
        "-crop".to_string(),
        "10".to_string(),
        "5".to_string(),
        "-neg".to_string(),
    ];
    let args = cli::parse_args(argv).expect("parse");
    process_file(&args.input, &args.output, &args.filters, PipelineConfig::default())
        .expect("process");

    let result = read_bmp_file(&output).expect("read output").into_raster();
    let expected = Raster::from_fn(10, 5, |x, y| source.pixel(x, y).inverted());
    rp.compare_raster(&expected, &result);

    // --- Test 2: a seeded shuffle gives the same file twice ---
    let args = cli::parse_args([
        "p",
        input.to_str().expect("utf-8 path"),
        output.to_str().expect("utf-8 path"),
        "-shuffle",
        "4",
        "-gs",
    ])
    .expect("parse");
    let config = PipelineConfig::with_seed(5);
    process_file(&args.input, &args.output, &args.filters, config).expect("first run");
    let first = std::fs::read(&output).expect("read first");
    process_file(&args.input, &args.output, &args.filters, config).expect("second run");
    let second = std::fs::read(&output).expect("read second");
    rp.compare_strings(&first, &second);

    assert!(rp.cleanup(), "process_file regression test failed");
}

#[test]
fn process_file_errors_reg() {
    let mut rp = RegParams::new("process_file_errors");
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.bmp");
    let output = dir.path().join("out.bmp");
    write_bmp_file(
        &Bitmap::from_raster(Raster::filled(4, 4, Pixel::gray(50))),
        &input,
    )
    .expect("write input");

    // --- Test 1: unknown filter leaves no output behind ---
    let args = cli::parse_args(["p", "in", "out", "-gummy"]).expect("parse");
    let err = process_file(&input, &output, &args.filters, PipelineConfig::default())
        .unwrap_err();
    rp.compare_strings(b"gummy is not a valid filter name", err.to_string().as_bytes());
    let is_param = matches!(err, Error::Parameter(FilterError::UnknownFilter(_)));
    rp.compare_values(1.0, if is_param { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(0.0, if output.exists() { 1.0 } else { 0.0 }, 0.0);

    // --- Test 2: missing input ---
    let missing = dir.path().join("missing.bmp");
    let err = process_file(&missing, &output, &[], PipelineConfig::default()).unwrap_err();
    let is_open = matches!(err, Error::Io(IoError::Open { .. }));
    rp.compare_values(1.0, if is_open { 1.0 } else { 0.0 }, 0.0);

    // --- Test 3: usage errors from the tokenizer ---
    let err = cli::parse_args(["p", "in"]).unwrap_err();
    rp.compare_strings(b"not enough params", err.to_string().as_bytes());

    assert!(rp.cleanup(), "process_file errors regression test failed");
}
