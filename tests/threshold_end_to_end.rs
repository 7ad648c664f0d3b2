use imkernel::lowlevel::{huang_threshold, otsu_threshold, Histogram};
use imkernel::{
    binarize, binarize_isodata, binarize_niblack, binarize_otsu, is_grayscale, Method,
    NiblackParams, Pixel, PixelBuffer,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Left `split` columns at `low`, the rest at `high`.
fn two_level(width: usize, height: usize, split: usize, low: u8, high: u8) -> PixelBuffer {
    let data = (0..width * height)
        .map(|i| Pixel::gray(if i % width < split { low } else { high }))
        .collect();
    PixelBuffer::from_pixels(data, width, height).unwrap()
}

fn noisy_color(seed: u64, width: usize, height: usize) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|i| {
            let base: u8 = if (i % width) < width / 3 { 40 } else { 190 };
            let jitter = |rng: &mut StdRng| base.saturating_add(rng.random_range(0..40u8));
            Pixel::rgb(jitter(&mut rng), jitter(&mut rng), jitter(&mut rng))
        })
        .collect();
    PixelBuffer::from_pixels(data, width, height).unwrap()
}

fn is_binary(img: &PixelBuffer) -> bool {
    img.pixels()
        .iter()
        .all(|px| *px == Pixel::gray(0) || *px == Pixel::gray(255))
}

#[test]
fn otsu_separates_two_gray_regions() {
    let mut img = two_level(40, 30, 25, 20, 220);
    let threshold = binarize_otsu(&mut img, None);
    assert!(threshold > 20 && threshold < 220, "threshold {threshold}");
    for y in 0..30 {
        for x in 0..40 {
            let expected = if x < 25 { 0 } else { 255 };
            assert_eq!(img.get(x, y), Some(&Pixel::gray(expected)));
        }
    }
}

#[test]
fn huang_and_otsu_stay_in_range_on_random_images() {
    for seed in 0..6u64 {
        let img = noisy_color(seed, 33, 21);
        let mut gray = img.clone();
        imkernel::ensure_grayscale(&mut gray);
        let hist = Histogram::from_buffer(&gray);
        let otsu = otsu_threshold(&hist);
        let huang = huang_threshold(&hist);
        assert!(otsu > 40, "otsu {otsu}");

        let mut out = img.clone();
        assert_eq!(binarize(&mut out, Method::Huang, None), Some(huang));
        assert!(is_binary(&out));
    }
}

#[test]
fn isodata_on_uniform_image_marks_everything_foreground() {
    for value in [0u8, 1, 57, 128, 255] {
        let mut img = PixelBuffer::filled(16, 9, Pixel::gray(value)).unwrap();
        let outcome = binarize_isodata(&mut img, None);
        assert!(outcome.iterations <= 2, "value {value}: {outcome:?}");
        assert!(img.pixels().iter().all(|px| *px == Pixel::gray(255)));
    }
}

#[test]
fn niblack_on_uniform_image_ignores_k() {
    for k in [-0.8, -0.2, 0.0, 0.5] {
        let mut img = PixelBuffer::filled(23, 17, Pixel::gray(93)).unwrap();
        binarize_niblack(&mut img, NiblackParams::new(7, k).unwrap(), None);
        assert!(img.pixels().iter().all(|px| *px == Pixel::gray(255)), "k {k}");
    }
}

#[test]
fn niblack_marks_dark_text_on_light_background() {
    let mut img = PixelBuffer::filled(30, 30, Pixel::gray(200)).unwrap();
    for y in 10..20 {
        for x in 12..15 {
            img.write(x, y, Pixel::gray(30));
        }
    }
    binarize_niblack(&mut img, NiblackParams::new(15, -0.2).unwrap(), None);
    assert_eq!(img.get(13, 15), Some(&Pixel::gray(0)));
    assert_eq!(img.get(2, 2), Some(&Pixel::gray(255)));
}

#[test]
fn color_input_is_converted_before_binarizing() {
    for method in [
        Method::Otsu,
        Method::Huang,
        Method::Isodata,
        Method::Niblack(NiblackParams::default()),
    ] {
        let mut img = noisy_color(99, 24, 18);
        binarize(&mut img, method, None);
        assert!(is_grayscale(&img));
        assert!(is_binary(&img), "{method:?}");
    }
}

#[test]
fn progress_is_non_decreasing_and_completes() {
    for method in [
        Method::Otsu,
        Method::Huang,
        Method::Isodata,
        Method::Niblack(NiblackParams::new(5, -0.2).unwrap()),
    ] {
        let mut img = noisy_color(3, 40, 48);
        let mut events = Vec::new();
        let mut sink = |p: u8| events.push(p);
        binarize(&mut img, method, Some(&mut sink));
        assert!(!events.is_empty());
        assert!(events.windows(2).all(|w| w[0] <= w[1]), "{method:?}: {events:?}");
        assert_eq!(events.last(), Some(&100));
    }
}

#[test]
fn niblack_progress_follows_rows() {
    let mut img = noisy_color(5, 8, 48);
    let mut events = Vec::new();
    let mut sink = |p: u8| events.push(p);
    binarize_niblack(&mut img, NiblackParams::new(3, 0.0).unwrap(), Some(&mut sink));
    assert_eq!(events, vec![0, 20, 41, 62, 83, 100]);
}

#[test]
fn isodata_progress_milestones() {
    let mut img = two_level(10, 10, 4, 30, 170);
    let mut events = Vec::new();
    let mut sink = |p: u8| events.push(p);
    binarize_isodata(&mut img, Some(&mut sink));
    assert_eq!(events, vec![10, 30, 80, 100]);
}
