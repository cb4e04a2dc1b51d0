//! Integration tests for the binarize / histogram pipeline
//!
//! These exercise the public byte-in, PNG-out operations end to end with
//! synthetic images, covering the threshold boundary, histogram mass
//! conservation, lossless round trips and each error class.

use eclipixel::codec::{decode_intensity, decode_raster, encode_png};
use eclipixel::utils::binarization::{THRESHOLD, threshold_binarize};
use eclipixel::utils::histogram::{CHART_HEIGHT, CHART_WIDTH, render_chart};
use eclipixel::{Grid, Histogram, PipelineError, analyze, binarize, histogram};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;

fn gray_grid(width: usize, height: usize, values: &[u8]) -> Grid {
    Grid::from_raw(width, height, 1, values.to_vec()).expect("buffer matches dimensions")
}

fn gray_png(width: usize, height: usize, values: &[u8]) -> Vec<u8> {
    encode_png(&gray_grid(width, height, values)).expect("encode")
}

/// Black pixels counted up from the bottom of chart column `x`
fn bar_height(chart: &Grid, x: usize) -> usize {
    (0..chart.height())
        .rev()
        .take_while(|&y| chart.pixel(x, y) == Some(&[0u8, 0, 0][..]))
        .count()
}

/// Deterministic noise so tests don't need fixtures
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn scenario_a_all_black() {
    let raw = gray_png(4, 4, &[0; 16]);

    let binary = decode_raster(&binarize(&raw).unwrap()).unwrap();
    assert_eq!((binary.width(), binary.height()), (4, 4));
    assert!(binary.as_bytes().iter().all(|&v| v == 0));

    let hist = Histogram::from_grid(&decode_intensity(&raw).unwrap()).unwrap();
    assert_eq!(hist.count(0), 16);
    assert!((1..=255u8).all(|i| hist.count(i) == 0));
}

#[test]
fn scenario_b_mixed_values() {
    let raw = gray_png(2, 2, &[100, 150, 127, 200]);
    let binary = decode_raster(&binarize(&raw).unwrap()).unwrap();
    assert_eq!(binary.as_bytes(), &[0, 255, 0, 255]);
}

#[test]
fn scenario_c_uniform_image_has_flat_chart() {
    for (w, h) in [(1, 1), (3, 5), (64, 32)] {
        let raw = gray_png(w, h, &vec![10; w * h]);
        let chart = decode_raster(&histogram(&raw).unwrap()).unwrap();
        assert_eq!((chart.width(), chart.height()), (CHART_WIDTH, CHART_HEIGHT));
        for x in 0..CHART_WIDTH {
            assert_eq!(bar_height(&chart, x), 0, "column {x} for {w}x{h}");
        }
    }
}

#[test]
fn scenario_d_empty_input_fails_to_decode() {
    assert!(matches!(binarize(&[]), Err(PipelineError::Decode(_))));
    assert!(matches!(histogram(&[]), Err(PipelineError::Decode(_))));
    assert!(matches!(decode_intensity(&[]), Err(PipelineError::Decode(_))));
}

#[test]
fn scenario_e_two_channel_grid_fails_to_encode() {
    let grid = Grid::filled(3, 3, 2, 128);
    assert!(matches!(encode_png(&grid), Err(PipelineError::Encode(_))));
}

#[test]
fn threshold_boundary() {
    let binary = threshold_binarize(&gray_grid(2, 1, &[127, 128]), THRESHOLD).unwrap();
    assert_eq!(binary.get(0, 0), 0);
    assert_eq!(binary.get(1, 0), 255);
}

#[test]
fn binarized_output_is_two_level() {
    let values = noise(40 * 30, 7);
    let binary = decode_raster(&binarize(&gray_png(40, 30, &values)).unwrap()).unwrap();
    assert_eq!((binary.width(), binary.height(), binary.channels()), (40, 30, 1));
    assert!(binary.as_bytes().iter().all(|&v| v == 0 || v == 255));

    for (&src, &dst) in values.iter().zip(binary.as_bytes()) {
        assert_eq!(dst == 255, src > THRESHOLD);
    }
}

#[test]
fn histogram_mass_is_conserved() {
    for (w, h, seed) in [(1, 1, 1), (17, 9, 2), (128, 64, 3)] {
        let gray = gray_grid(w, h, &noise(w * h, seed));
        let hist = Histogram::from_grid(&gray).unwrap();
        assert_eq!(hist.bins().iter().sum::<u64>(), (w * h) as u64);
        assert_eq!(hist.total(), (w * h) as u64);
    }
}

#[test]
fn histogram_is_deterministic() {
    let raw = gray_png(32, 32, &noise(1024, 11));
    let gray = decode_intensity(&raw).unwrap();
    assert_eq!(Histogram::from_grid(&gray).unwrap(), Histogram::from_grid(&gray).unwrap());
    assert_eq!(histogram(&raw).unwrap(), histogram(&raw).unwrap());
}

#[test]
fn histogram_uses_grayscale_not_binarized_values() {
    // A ramp occupies many bins; a binarized image would only fill 0 and 255
    let values: Vec<u8> = (0..=255u8)
        .flat_map(|v| std::iter::repeat_n(v, (v as usize % 3) + 1))
        .collect();
    let raw = gray_png(values.len(), 1, &values);
    let chart = decode_raster(&histogram(&raw).unwrap()).unwrap();

    let drawn = (0..CHART_WIDTH).filter(|&x| bar_height(&chart, x) > 0).count();
    assert!(drawn > 2, "only {drawn} bars drawn");
}

#[test]
fn chart_bar_tallest_at_most_frequent_bin() {
    let mut values = vec![50u8; 30];
    values.extend(vec![200u8; 10]);
    values.extend(vec![0u8; 5]);
    let hist = Histogram::from_grid(&gray_grid(values.len(), 1, &values)).unwrap();
    let chart = render_chart(&hist);

    assert_eq!(bar_height(&chart, 50), CHART_HEIGHT);
    // (10 - 0) / (30 - 0) * 200 truncated
    assert_eq!(bar_height(&chart, 200), 66);
    assert_eq!(bar_height(&chart, 0), 33);
    assert_eq!(bar_height(&chart, 1), 0);
}

#[test]
fn round_trip_binary_grid() {
    let binary = threshold_binarize(&gray_grid(23, 7, &noise(23 * 7, 5)), THRESHOLD).unwrap();
    let decoded = decode_raster(&encode_png(&binary).unwrap()).unwrap();
    assert_eq!(decoded, binary);
    assert_eq!(decode_intensity(&encode_png(&binary).unwrap()).unwrap(), binary);
}

#[test]
fn round_trip_histogram_chart() {
    let hist = Histogram::from_grid(&gray_grid(16, 16, &noise(256, 9))).unwrap();
    let chart = render_chart(&hist);
    let decoded = decode_raster(&encode_png(&chart).unwrap()).unwrap();
    assert_eq!(decoded, chart);
}

#[test]
fn color_input_is_accepted() {
    let img = RgbImage::from_fn(6, 4, |x, _| {
        if x < 3 { Rgb([255, 255, 255]) } else { Rgb([255, 0, 0]) }
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageOutputFormat::Png)
        .unwrap();

    let binary = decode_raster(&binarize(buf.get_ref()).unwrap()).unwrap();
    // white -> 255, pure red has luma 76 -> 0
    assert_eq!(binary.get(0, 0), 255);
    assert_eq!(binary.get(5, 3), 0);
}

#[test]
fn jpeg_input_is_accepted() {
    let img = RgbImage::from_pixel(16, 16, Rgb([240, 240, 240]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageOutputFormat::Jpeg(90))
        .unwrap();

    let binary = decode_raster(&binarize(buf.get_ref()).unwrap()).unwrap();
    assert_eq!((binary.width(), binary.height()), (16, 16));
    assert!(binary.as_bytes().iter().all(|&v| v == 255));
}

#[test]
fn analyze_returns_both_outputs() {
    let raw = gray_png(10, 10, &noise(100, 3));
    let result = analyze(&raw).unwrap();
    assert_eq!(decode_raster(&result.binary_png).unwrap().width(), 10);
    assert_eq!(decode_raster(&result.chart_png).unwrap().width(), CHART_WIDTH);
}

#[test]
fn degenerate_grid_is_invalid_input() {
    let empty = Grid::new(0, 3, 1);
    assert!(matches!(
        threshold_binarize(&empty, THRESHOLD),
        Err(PipelineError::InvalidInput(_))
    ));
    assert!(matches!(Histogram::from_grid(&empty), Err(PipelineError::InvalidInput(_))));
}
