use imkernel::{gaussian_1d, gaussian_2d, ImKernelError, Kernel, Pixel, PixelBuffer};

#[test]
fn pixel_buffer_rejects_mismatched_lengths() {
    let err = PixelBuffer::from_pixels(vec![Pixel::gray(0); 3], 2, 2)
        .err()
        .unwrap();
    assert_eq!(err, ImKernelError::BufferTooSmall { needed: 4, got: 3 });

    let err = PixelBuffer::from_pixels(vec![Pixel::gray(0); 5], 2, 2)
        .err()
        .unwrap();
    assert_eq!(
        err,
        ImKernelError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );
}

#[test]
fn pixel_buffer_rows_and_bounds() {
    let data: Vec<Pixel> = (0u8..12).map(Pixel::gray).collect();
    let img = PixelBuffer::from_pixels(data, 4, 3).unwrap();
    assert_eq!(img.width(), 4);
    assert_eq!(img.height(), 3);
    assert_eq!(
        img.row(1).unwrap(),
        &[Pixel::gray(4), Pixel::gray(5), Pixel::gray(6), Pixel::gray(7)]
    );
    assert!(img.row(3).is_none());
    assert!(img.get(4, 0).is_none());
    assert_eq!(img.sample(-1, 5), Pixel::gray(8));
}

#[test]
fn write_is_unclamped_but_in_bounds() {
    let mut img = PixelBuffer::new(3, 2).unwrap();
    img.write(2, 1, Pixel::rgb(1, 2, 3));
    assert_eq!(img.get(2, 1), Some(&Pixel::rgb(1, 2, 3)));
}

#[test]
fn gaussian_kernels_are_odd_and_normalized() {
    for size in 0..12usize {
        for sigma in [0.3, 1.0, 4.0] {
            let k1 = gaussian_1d(size, sigma).unwrap();
            assert_eq!(k1.width() % 2, 1, "size {size}");
            assert!((k1.sum() - 1.0).abs() < 1e-9);

            let k2 = gaussian_2d(size, sigma).unwrap();
            assert_eq!(k2.width(), k2.height());
            assert_eq!(k2.width() % 2, 1);
            assert!((k2.sum() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn user_kernels_round_trip_through_from_3x3() {
    let weights = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];
    let kernel = Kernel::from_3x3(weights).unwrap();
    assert_eq!(kernel.as_slice(), &weights);
    assert_eq!(kernel.center(), (1, 1));

    let err = Kernel::from_3x3([f64::NAN; 9]).unwrap_err();
    assert!(matches!(err, ImKernelError::InvalidKernel { .. }));
}
