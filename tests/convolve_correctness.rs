use integral_ops::{
    convolve, convolve_border, convolve_sparse, integral_image, ImageView, IntegralKernel,
    OwnedImage, Rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_u8(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random_range(0..=255)).collect()
}

/// Direct evaluation: every block summed pixel by pixel with a zero border.
fn reference_response(
    src: &[u8],
    width: usize,
    height: usize,
    kernel: &IntegralKernel,
    x: isize,
    y: isize,
) -> i32 {
    let mut total = 0i32;
    for (rect, scale) in kernel.iter() {
        let r = rect.translate(x, y);
        let mut sum = 0i32;
        for yy in r.y0.max(0)..r.y1.min(height as isize) {
            for xx in r.x0.max(0)..r.x1.min(width as isize) {
                sum += i32::from(src[yy as usize * width + xx as usize]);
            }
        }
        total += sum * scale;
    }
    total
}

/// 3x3 weights {1,1,1; 2,2,2; 1,1,1} as two overlapping blocks.
fn weighted_rows_kernel() -> IntegralKernel {
    IntegralKernel::from_pairs([(Rect::new(-1, -1, 2, 2), 1), (Rect::new(-1, 0, 2, 1), 1)])
        .unwrap()
}

/// Two-rectangle Haar-like feature: left half minus right half.
fn haar_kernel() -> IntegralKernel {
    IntegralKernel::from_pairs([(Rect::new(-3, -2, 0, 3), 1), (Rect::new(0, -2, 3, 3), -1)])
        .unwrap()
}

#[test]
fn convolve_matches_direct_evaluation() {
    let (width, height) = (19, 14);
    let src = random_u8(width, height, 5);
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();

    for kernel in [weighted_rows_kernel(), haar_kernel(), IntegralKernel::box_filter(2)] {
        let mut out = OwnedImage::<i32>::zeros(width, height).unwrap();
        convolve(table.view(), &kernel, out.view_mut()).unwrap();
        for y in 0..height {
            for x in 0..width {
                let want = reference_response(&src, width, height, &kernel, x as isize, y as isize);
                assert_eq!(out.get(x, y), Some(want), "at ({x}, {y})");
            }
        }
    }
}

#[test]
fn weighted_rows_kernel_matches_dense_weights() {
    let (width, height) = (6, 5);
    let src: Vec<u8> = (0..width * height).map(|i| (i % 10) as u8).collect();
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();
    let kernel = weighted_rows_kernel();
    let weights = [[1, 1, 1], [2, 2, 2], [1, 1, 1]];

    for y in 0..height as isize {
        for x in 0..width as isize {
            let mut want = 0i32;
            for (dy, row) in weights.iter().enumerate() {
                for (dx, &weight) in row.iter().enumerate() {
                    let (xx, yy) = (x + dx as isize - 1, y + dy as isize - 1);
                    if xx >= 0 && yy >= 0 && xx < width as isize && yy < height as isize {
                        want += weight * i32::from(src[yy as usize * width + xx as usize]);
                    }
                }
            }
            assert_eq!(convolve_sparse(table.view(), &kernel, x, y), want);
        }
    }
}

#[test]
fn sparse_matches_dense_at_every_pixel() {
    let (width, height) = (16, 11);
    let src = random_u8(width, height, 17);
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();
    let kernel = haar_kernel();

    let mut out = OwnedImage::<i32>::zeros(width, height).unwrap();
    convolve(table.view(), &kernel, out.view_mut()).unwrap();
    for y in 0..height {
        for x in 0..width {
            let sparse = convolve_sparse(table.view(), &kernel, x as isize, y as isize);
            assert_eq!(out.get(x, y), Some(sparse));
        }
    }
}

#[test]
fn sparse_outside_image_sees_only_overlap() {
    let src = [1u8; 25];
    let table = integral_image(ImageView::from_slice(&src, 5, 5).unwrap()).unwrap();
    let kernel = IntegralKernel::box_filter(1);
    assert_eq!(convolve_sparse(table.view(), &kernel, -1, -1), 1);
    assert_eq!(convolve_sparse(table.view(), &kernel, 5, 2), 3);
    assert_eq!(convolve_sparse(table.view(), &kernel, -5, 40), 0);
}

#[test]
fn sparse_at_extreme_points_is_zero() {
    let src = [1u8; 16];
    let table = integral_image(ImageView::from_slice(&src, 4, 4).unwrap()).unwrap();
    let kernel = IntegralKernel::box_filter(1);
    for (x, y) in [
        (isize::MAX, 0),
        (0, isize::MAX),
        (isize::MIN, isize::MIN),
        (isize::MAX, isize::MIN),
    ] {
        assert_eq!(convolve_sparse(table.view(), &kernel, x, y), 0, "at ({x}, {y})");
    }
}

#[test]
fn unbounded_block_covers_whole_image() {
    let src = [1u8; 16];
    let table = integral_image(ImageView::from_slice(&src, 4, 4).unwrap()).unwrap();
    let everything = Rect::new(isize::MIN, isize::MIN, isize::MAX, isize::MAX);
    let kernel = IntegralKernel::from_pairs([(everything, 1)]).unwrap();
    assert_eq!(convolve_sparse(table.view(), &kernel, 2, 1), 16);

    let mut out = OwnedImage::<i32>::zeros(4, 4).unwrap();
    convolve(table.view(), &kernel, out.view_mut()).unwrap();
    assert!(out.data().iter().all(|&v| v == 16));
}

#[test]
fn border_variant_is_identical_to_full_convolution() {
    let (width, height) = (24, 18);
    let src = random_u8(width, height, 23);
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();

    for kernel in [weighted_rows_kernel(), haar_kernel(), IntegralKernel::box_filter(3)] {
        let border = kernel.border();
        let mut full = OwnedImage::<i32>::zeros(width, height).unwrap();
        convolve(table.view(), &kernel, full.view_mut()).unwrap();

        for extra in [0, 1, 5] {
            let mut zoned = OwnedImage::<i32>::zeros(width, height).unwrap();
            convolve_border(
                table.view(),
                &kernel,
                zoned.view_mut(),
                border.x + extra,
                border.y + extra,
            )
            .unwrap();
            assert_eq!(full, zoned, "extra border {extra}");
        }
    }
}

#[test]
fn empty_blocks_contribute_nothing() {
    let (width, height) = (10, 7);
    let src = random_u8(width, height, 31);
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();
    let base = IntegralKernel::box_filter(1);
    let padded = IntegralKernel::from_pairs([
        (Rect::centered(1), 1),
        (Rect::new(2, 0, 2, 4), 9),
        (Rect::new(40, 40, -40, -40), -3),
    ])
    .unwrap();

    let mut a = OwnedImage::<i32>::zeros(width, height).unwrap();
    let mut b = OwnedImage::<i32>::zeros(width, height).unwrap();
    convolve(table.view(), &base, a.view_mut()).unwrap();
    convolve_border(table.view(), &padded, b.view_mut(), 1, 1).unwrap();
    assert_eq!(a, b);
}

#[test]
fn float_tables_convolve_in_f64() {
    let (width, height) = (9, 6);
    let src: Vec<f32> = (0..width * height).map(|i| (i % 7) as f32 * 0.5).collect();
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();
    let kernel = haar_kernel();
    let border = kernel.border();

    let mut full = OwnedImage::<f64>::zeros(width, height).unwrap();
    let mut zoned = OwnedImage::<f64>::zeros(width, height).unwrap();
    convolve(table.view(), &kernel, full.view_mut()).unwrap();
    convolve_border(table.view(), &kernel, zoned.view_mut(), border.x, border.y).unwrap();
    assert_eq!(full, zoned);

    let sparse = convolve_sparse(table.view(), &kernel, 4, 3);
    assert_eq!(full.get(4, 3), Some(sparse));
}

#[test]
fn output_shape_must_match_table() {
    let src = [0u8; 12];
    let table = integral_image(ImageView::from_slice(&src, 4, 3).unwrap()).unwrap();
    let mut out = OwnedImage::<i32>::zeros(3, 4).unwrap();
    let kernel = IntegralKernel::box_filter(1);
    assert!(convolve(table.view(), &kernel, out.view_mut()).is_err());
    assert!(convolve_border(table.view(), &kernel, out.view_mut(), 1, 1).is_err());
    assert!(out.data().iter().all(|&v| v == 0));
}
